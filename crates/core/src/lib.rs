//! Domain logic for certificate-of-insurance requirement checking.
//!
//! Everything in this crate is pure: no database, no network. The db and api
//! crates feed it materialized inputs and persist or render its outputs.

pub mod audit;
pub mod documents;
pub mod error;
pub mod extraction;
pub mod fields;
pub mod requirements;
pub mod samples;
pub mod types;
