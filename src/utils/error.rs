use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration parse error in {field}: {message}")]
    ConfigParseError { field: String, message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid form submission: {message}")]
    FormError { message: String },
}

impl RelayError {
    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            RelayError::Transport(_) => "Could not reach the webhook".to_string(),
            RelayError::IoError(e) => format!("File access failed: {}", e),
            RelayError::SerializationError(_) => "Could not encode the notification".to_string(),
            RelayError::ConfigParseError { field, .. } => {
                format!("Configuration file could not be parsed ({})", field)
            }
            RelayError::MissingConfigError { field } => {
                format!("Required setting '{}' is missing", field)
            }
            RelayError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            RelayError::FormError { .. } => "The form body could not be read".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RelayError::Transport(_) => "Check network access and the webhook URL",
            RelayError::IoError(_) => "Check that the config path exists and is readable",
            RelayError::SerializationError(_) => "Report this as a bug",
            RelayError::ConfigParseError { .. } => "Fix the TOML syntax in the config file",
            RelayError::MissingConfigError { .. } => {
                "Set it in the config file, via CLI flag or FORM_RELAY_* environment variable"
            }
            RelayError::InvalidConfigValueError { .. } => "Correct the value and restart",
            RelayError::FormError { .. } => {
                "Send the form as application/x-www-form-urlencoded or multipart/form-data"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_messages() {
        let err = RelayError::MissingConfigError {
            field: "sink.webhook_url".to_string(),
        };
        assert_eq!(err.to_string(), "Missing configuration: sink.webhook_url");
        assert!(err.user_friendly_message().contains("sink.webhook_url"));
        assert!(err.recovery_suggestion().contains("FORM_RELAY_"));
    }
}
