//! Success envelope shared by every `/api/v1` handler.
//!
//! Certificates, requirement sets, validation reports and audit pages all come
//! back as `{ "data": ... }`; errors use `{ "error", "code" }` from
//! [`crate::error::AppError`].

use serde::Serialize;

/// `{ "data": T }` wrapper returned inside `Json`.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
