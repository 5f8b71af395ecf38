mod json_body;
mod requests_logging;

pub use json_body::{JsonBody, QueryParams};
pub use requests_logging::{log_requests, RequestsLoggingLevel};
