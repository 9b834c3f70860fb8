//! Query path binding tests

pub mod tests_type_segments;
