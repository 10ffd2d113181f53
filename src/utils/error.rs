use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog request failed: {0}")]
    UpstreamHttp(#[from] reqwest::Error),

    #[error("{message}")]
    UpstreamRejected { status: u16, message: String },

    #[error("{message}")]
    Validation { message: String },

    #[error("{entity} not found")]
    NotFound { entity: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration value for {field}: {reason} (got '{value}')")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, CatalogError>;

impl CatalogError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(entity: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
        }
    }

    /// HTTP status this error maps to when reported to a caller.
    pub fn status(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            Self::NotFound { .. } => 404,
            Self::UpstreamRejected { status, .. } => *status,
            Self::UpstreamHttp(_) | Self::Io(_) | Self::InvalidConfigValue { .. } => 500,
        }
    }

    /// Message safe to put in a response body. Transport and internal errors
    /// get a generic line; their detail only goes to the log.
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation { .. } | Self::NotFound { .. } | Self::UpstreamRejected { .. } => {
                self.to_string()
            }
            Self::UpstreamHttp(_) => "Failed to reach the university catalog".to_string(),
            Self::Io(_) | Self::InvalidConfigValue { .. } => "Internal server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(CatalogError::validation("limit too large").status(), 400);
        assert_eq!(CatalogError::not_found("University").status(), 404);
        assert_eq!(
            CatalogError::UpstreamRejected {
                status: 429,
                message: "too many requests".to_string(),
            }
            .status(),
            429
        );
        assert_eq!(
            CatalogError::Io(std::io::Error::new(std::io::ErrorKind::Other, "boom")).status(),
            500
        );
    }

    #[test]
    fn test_not_found_message() {
        let err = CatalogError::not_found("University");
        assert_eq!(err.to_string(), "University not found");
        assert_eq!(err.public_message(), "University not found");
    }

    #[test]
    fn test_internal_detail_is_not_public() {
        let err = CatalogError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "disk exploded",
        ));
        assert_eq!(err.public_message(), "Internal server error");
        assert!(err.to_string().contains("disk exploded"));
    }
}
