mod builder;
mod dictionary;
mod leading_bit_utils;
mod parser;
pub mod predefined_readers;
pub mod predefined_writers;
mod types;

pub(crate) use builder::DictBuilder;
pub use dictionary::{DictKey, Dictionary};
pub(crate) use parser::DictParser;
pub use types::{KeyReader, ValReader, ValWriter};
