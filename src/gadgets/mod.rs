pub mod basic;
pub mod int;

pub use crate::gadgets::int::{IntWires, bits_from_bigint_with_len};
