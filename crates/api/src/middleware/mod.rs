//! Request extractors shared by handlers.
//!
//! - [`identity::CallerIdentity`] -- The caller's user id from `X-User-Id`.

pub mod identity;
