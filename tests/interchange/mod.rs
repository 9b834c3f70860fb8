//! Error payload serialization tests

pub mod tests_error_writer;
