use thiserror::Error;

#[derive(Error, Debug)]
pub enum CartError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: u64 },

    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("Request timed out after {limit:?}: {operation}")]
    Timeout {
        operation: String,
        limit: std::time::Duration,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl CartError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CartError::NotFound { .. })
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CartError::ApiError(_) | CartError::UnexpectedStatus { .. } => {
                "The catalog service could not be reached".to_string()
            }
            CartError::Timeout { .. } => "The catalog service did not answer in time".to_string(),
            CartError::IoError(_) => "The cart storage could not be accessed".to_string(),
            CartError::SerializationError(_) => "The stored cart is not valid JSON".to_string(),
            CartError::NotFound { resource, id } => format!("No {} with id {}", resource, id),
            CartError::ConfigError { message } => format!("Invalid configuration: {}", message),
            CartError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid configuration value for '{}': {}", field, reason)
            }
            CartError::MissingConfigError { field } => {
                format!("Missing configuration value '{}'", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CartError::ApiError(_) | CartError::UnexpectedStatus { .. } | CartError::Timeout { .. } => {
                "Check --api-endpoint and that the catalog service is running"
            }
            CartError::IoError(_) => "Check that --storage-path exists and is writable",
            CartError::SerializationError(_) => {
                "Delete or repair the cart file under --storage-path"
            }
            CartError::NotFound { .. } => "Check the product id against the catalog",
            CartError::ConfigError { .. }
            | CartError::InvalidConfigValueError { .. }
            | CartError::MissingConfigError { .. } => "Run with --help to see the accepted options",
        }
    }

    /// A `CartError` only stops the CLI while it loads config or opens the
    /// cart, so every variant is a startup failure.
    pub fn exit_code(&self) -> i32 {
        EXIT_STARTUP_FAILURE
    }
}

/// Process status when config loading, validation, or cart hydration fails.
pub const EXIT_STARTUP_FAILURE: i32 = 1;

/// Process status when the requested cart operation was not applied.
pub const EXIT_OPERATION_FAILURE: i32 = 2;

pub type Result<T> = std::result::Result<T, CartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_resource() {
        let err = CartError::NotFound {
            resource: "product",
            id: 42,
        };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "product 42 not found");
        assert_eq!(err.user_friendly_message(), "No product with id 42");
    }

    #[test]
    fn test_startup_errors_exit_with_one() {
        let err = CartError::MissingConfigError {
            field: "catalog.endpoint".to_string(),
        };
        assert_eq!(err.exit_code(), 1);

        let io = CartError::IoError(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert_eq!(io.exit_code(), 1);
        assert!(!io.is_not_found());

        let corrupt = CartError::from(serde_json::from_str::<u32>("not json").unwrap_err());
        assert_eq!(corrupt.exit_code(), EXIT_STARTUP_FAILURE);
        assert_ne!(EXIT_STARTUP_FAILURE, EXIT_OPERATION_FAILURE);
    }

    #[test]
    fn test_timeout_message_keeps_sub_second_limit() {
        let err = CartError::Timeout {
            operation: "fetch_stock".to_string(),
            limit: std::time::Duration::from_millis(20),
        };
        assert_eq!(err.to_string(), "Request timed out after 20ms: fetch_stock");
    }
}
