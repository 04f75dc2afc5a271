//! Caller details captured server-side.

/// Network origin of a request, taken from the connection and headers
/// rather than from the request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOrigin {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}
