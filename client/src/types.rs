pub use error::*;
pub use stack_reader::*;
pub use tvm_stack_entry::*;

mod error;
mod stack_reader;
mod tvm_stack_entry;
