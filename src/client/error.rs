#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Billing API unreachable: {0}")]
    Unreachable(String),
    #[error("Billing API error: HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl ApiError {
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ApiError::Unreachable(_)
                | ApiError::Status {
                    status: 429 | 500..=599,
                    ..
                }
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}
