//! Parse session test suite
