//! Binding tests.

pub mod tests_bind;
