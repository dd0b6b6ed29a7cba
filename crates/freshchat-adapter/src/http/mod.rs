/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod channels;
pub mod client;
pub mod config;
pub mod conversations;
pub mod error;
pub mod headers;
pub mod response;
pub mod users;

pub use client::{FreshchatClient, QueryParams};
pub use config::{DEFAULT_BASE_URL, FreshchatConfig, resolve_url};
pub use error::{ApiError, ApiErrorKind, FreshchatError, Result, map_status_to_error};
pub use headers::{authorization_value, merge_headers};
pub use response::{FreshchatResponse, ResponseBody, decode_nested_json};
