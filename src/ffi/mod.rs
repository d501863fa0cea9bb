//! Foreign-call boundary: buffers, attributes, call frames and signatures

mod buffer;
mod frame;
mod signature;

pub use buffer::{Buffer, BufferSpec, Rank};
pub use frame::{Attributes, CallFrame};
pub use signature::{AttrSpec, Binding, Signature};
