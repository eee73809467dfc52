pub mod either;
pub mod option;
pub mod reference;

#[cfg(test)]
pub(crate) mod test_types;
