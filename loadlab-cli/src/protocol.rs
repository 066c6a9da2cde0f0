pub const DEFAULT_API_URL: &str = "http://localhost:5001/api";
pub const DEFAULT_POLICY_API_URL: &str = "http://localhost:8001/api";

pub const EXPERIMENTS_ROUTE: &str = "/experiments";
pub const SERVICES_ROUTE: &str = "/services";
pub const CLIENT_APPS_ROUTE: &str = "/apps";
pub const BALANCING_POLICIES_ROUTE: &str = "/policies/balancing";

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("backend returned {status}: {message}")]
    Http { status: u16, message: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}
