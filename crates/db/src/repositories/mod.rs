//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Owner-scoped tables take the
//! caller's `owner_id` explicitly; there is no ambient session.

pub mod audit_repo;
pub mod document_repo;
pub mod extracted_data_repo;
pub mod requirement_repo;
pub mod requirement_set_repo;

pub use audit_repo::AuditLogRepo;
pub use document_repo::DocumentRepo;
pub use extracted_data_repo::ExtractedDataRepo;
pub use requirement_repo::RequirementRepo;
pub use requirement_set_repo::RequirementSetRepo;
