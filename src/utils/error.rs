use thiserror::Error;

/// Why a single stream record could not be flattened into an audit line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlattenError {
    #[error("record has no dynamodb change body")]
    MissingChange,

    #[error("record has no NewImage")]
    MissingNewImage,

    #[error("NewImage is missing attribute '{attribute}'")]
    MissingAttribute { attribute: String },

    #[error("attribute '{attribute}' has type tag {found}, expected {expected}")]
    UnexpectedType {
        attribute: String,
        expected: &'static str,
        found: &'static str,
    },
}

#[derive(Error, Debug)]
pub enum ForwarderError {
    #[error("Record {index} is malformed: {source}")]
    MalformedRecord {
        index: usize,
        #[source]
        source: FlattenError,
    },

    #[error("Delivery to stream '{stream}' failed: {message}")]
    DeliveryError {
        stream: String,
        code: Option<String>,
        message: String,
        retryable: bool,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Delivery,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ForwarderError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ForwarderError::MalformedRecord { .. } | ForwarderError::SerializationError(_) => {
                ErrorCategory::Input
            }
            ForwarderError::DeliveryError { .. } => ErrorCategory::Delivery,
            ForwarderError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ForwarderError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ForwarderError::DeliveryError { retryable: true, .. } => ErrorSeverity::Medium,
            ForwarderError::MalformedRecord { .. }
            | ForwarderError::SerializationError(_)
            | ForwarderError::DeliveryError { .. } => ErrorSeverity::High,
            ForwarderError::InvalidConfigValueError { .. } | ForwarderError::IoError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    /// Whether the platform re-running the same batch could succeed.
    /// The forwarder never retries on its own.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ForwarderError::DeliveryError { retryable: true, .. })
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ForwarderError::MalformedRecord { .. } => {
                "Check that every stream record carries a NewImage with orderId (S), state (S) and lastUpdatedDate (N)"
            }
            ForwarderError::DeliveryError { retryable: true, .. } => {
                "The delivery stream is throttled or unreachable; let the event source retry the batch"
            }
            ForwarderError::DeliveryError { .. } => {
                "Verify the delivery stream exists in this region and the role may call firehose:PutRecord"
            }
            ForwarderError::SerializationError(_) => {
                "Make sure the input is a DynamoDB stream event in JSON form"
            }
            ForwarderError::IoError(_) => "Check file paths and permissions",
            ForwarderError::InvalidConfigValueError { .. } => {
                "Review the environment variables or command line flags"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ForwarderError::MalformedRecord { index, source } => {
                format!("Stream record #{} could not be read: {}", index, source)
            }
            ForwarderError::DeliveryError { stream, code, .. } => match code {
                Some(code) => format!("Could not deliver audit records to '{}' ({})", stream, code),
                None => format!("Could not deliver audit records to '{}'", stream),
            },
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ForwarderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_record_is_input_error() {
        let err = ForwarderError::MalformedRecord {
            index: 2,
            source: FlattenError::MissingAttribute {
                attribute: "state".to_string(),
            },
        };

        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(!err.is_retryable());
        assert_eq!(
            err.to_string(),
            "Record 2 is malformed: NewImage is missing attribute 'state'"
        );
    }

    #[test]
    fn test_throttled_delivery_is_retryable() {
        let err = ForwarderError::DeliveryError {
            stream: "OrdersAuditFirehose".to_string(),
            code: Some("ServiceUnavailableException".to_string()),
            message: "slow down".to_string(),
            retryable: true,
        };

        assert_eq!(err.category(), ErrorCategory::Delivery);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.is_retryable());
        assert!(err
            .user_friendly_message()
            .contains("ServiceUnavailableException"));
    }

    #[test]
    fn test_config_errors_are_critical() {
        let err = ForwarderError::InvalidConfigValueError {
            field: "line_style".to_string(),
            value: "pretty".to_string(),
            reason: "Expected 'spaced' or 'compact'".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
