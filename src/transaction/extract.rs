//! Extractors that turn malformed requests into [Error::Validation].
//!
//! Axum's own `Json` and `Path` reject with a mix of 400, 415 and 422
//! responses in plain text. These wrappers keep every shape mismatch a 400
//! with the crate's JSON error body, and they run before any handler touches
//! the database.

use axum::extract::{FromRequest, FromRequestParts};

use crate::Error;

/// Like `axum::Json`, but rejects with [Error::Validation].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct ValidJson<T>(pub T);

/// Like `axum::extract::Path`, but rejects with [Error::Validation].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct ValidPath<T>(pub T);
