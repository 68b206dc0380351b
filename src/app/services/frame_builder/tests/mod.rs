//! Frame builder test suite

mod builder_tests;
