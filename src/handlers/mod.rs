// One handler module per endpoint. POST endpoints pick the operation from
// the body's `action` field rather than from the path.
pub mod auth;
pub mod connect;
pub mod logs;
pub mod servers;
pub mod utils;

use crate::error::ApiError;

/// Fallback for any method an endpoint does not serve
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
