pub(crate) mod core;
pub mod reference;
pub mod twiddle;
pub mod variants;

pub use crate::common::{FftError, Transform};
pub use self::core::{bit_reverse, swap_pairs};
pub use reference::ReferenceFft;
pub use twiddle::{TwiddleTable, table_for};
pub use variants::{Passthrough, TableFft, Unrolled2, Unrolled4, Unrolled8, Unrolled16};
