mod bigint;
mod decimal;
mod ops;
mod words;

pub use bigint::BigInt;
pub use words::{WordStore, INLINE_WORDS};
