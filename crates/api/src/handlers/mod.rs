pub mod audit;
pub mod catalog;
pub mod documents;
pub mod requirement_sets;
pub mod requirements;
pub mod validation;
