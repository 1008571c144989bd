//! Cross-module tests for the entity/component store

mod query_fuzz;
