//! Mapping integration tests

mod mapping_tests;
