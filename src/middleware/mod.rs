pub mod auth;
pub mod response;

pub use auth::{access_guard, RouteGuard};
pub use response::{ApiResult, DataResponse};
