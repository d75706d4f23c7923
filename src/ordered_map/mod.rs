mod read_op;
pub mod record;
mod slice_op;

pub use read_op::ArrReadable;
pub use record::OrderedMap;
pub use slice_op::{ArrTransform, Constructible};

#[cfg(test)]
mod tests;
