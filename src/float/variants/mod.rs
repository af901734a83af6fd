//! Size-specialized transforms.
//!
//! Each variant accepts exactly one size and must agree with
//! [`ReferenceFft`](crate::float::ReferenceFft) to within the validation
//! tolerance, stage by stage where it exposes stages.

pub mod passthrough;
pub mod table;
pub mod unrolled;

pub use passthrough::Passthrough;
pub use table::TableFft;
pub use unrolled::{Unrolled2, Unrolled4, Unrolled8, Unrolled16};

#[cfg(test)]
#[path = "variants_tests.rs"]
mod tests;
