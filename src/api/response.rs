//! Shared response envelope.
//!
//! Successful responses use `{ "success": true, "data": ... }`; failures are
//! rendered by [`AppError`](super::error::AppError) as
//! `{ "success": false, "message": ..., "code": ... }`.

use serde::Serialize;

/// Standard success envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(ApiResponse::new(orders)))
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
