//! Requirement validation engine.
//!
//! Checks an [`ExtractedRecord`](crate::extraction::ExtractedRecord) against
//! the rules of a requirement set. Pure logic: inputs arrive fully
//! materialized and results are returned, never persisted here.

pub mod chain;
pub mod comparator;
pub mod evaluator;
pub mod operators;
pub mod rules;
