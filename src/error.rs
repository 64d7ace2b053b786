//! Error types and handling for the `CartPilot` core

use thiserror::Error;

/// Main error type for the `CartPilot` core
#[derive(Error, Debug)]
pub enum CartPilotError {
    /// Malformed user input, caught before any network call
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Geocoding service unreachable, returned garbage, or did not know
    /// the postcode
    #[error("Lookup failed: {message}")]
    LookupFailed { message: String },

    /// Basket storage errors
    #[error("Persistence error: {message}")]
    Persistence { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl CartPilotError {
    /// Create a new invalid-input error
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a new lookup error
    pub fn lookup_failed<S: Into<String>>(message: S) -> Self {
        Self::LookupFailed {
            message: message.into(),
        }
    }

    /// Create a new persistence error
    pub fn persistence<S: Into<String>>(message: S) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            CartPilotError::InvalidInput { message } => {
                format!("Invalid input: {message}")
            }
            CartPilotError::LookupFailed { .. } => {
                "Unable to look up that postcode. Please check it and try again.".to_string()
            }
            CartPilotError::Persistence { .. } => {
                "Could not read or save your basket. Your device storage may be full.".to_string()
            }
            CartPilotError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            CartPilotError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let input_err = CartPilotError::invalid_input("bad postcode");
        assert!(matches!(input_err, CartPilotError::InvalidInput { .. }));

        let lookup_err = CartPilotError::lookup_failed("connection refused");
        assert!(matches!(lookup_err, CartPilotError::LookupFailed { .. }));

        let persistence_err = CartPilotError::persistence("disk full");
        assert!(matches!(persistence_err, CartPilotError::Persistence { .. }));
    }

    #[test]
    fn test_user_messages() {
        let input_err = CartPilotError::invalid_input("not a postcode");
        assert!(input_err.user_message().contains("not a postcode"));

        let lookup_err = CartPilotError::lookup_failed("timeout");
        assert!(lookup_err.user_message().contains("postcode"));

        let config_err = CartPilotError::config("missing key");
        assert!(config_err.user_message().contains("Configuration error"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CartPilotError = io_err.into();
        assert!(matches!(err, CartPilotError::Io { .. }));
    }
}
