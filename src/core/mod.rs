//! Core logic: types, storage-backed store, meal planner, queries, parsing.

pub mod parser;
pub mod planner;
pub mod query;
pub mod seed;
pub mod store;
pub mod types;
