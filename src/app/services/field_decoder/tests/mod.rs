//! Field decoder test suite
