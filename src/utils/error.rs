use thiserror::Error;

#[derive(Error, Debug)]
pub enum StepError {
    #[error("{step} call failed with status {status}: {body}")]
    RemoteCallError {
        step: String,
        status: u16,
        body: String,
    },

    #[error("{step} call could not be completed: {source}")]
    TransportError {
        step: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{step} response is missing required field '{field}'")]
    MissingFieldError { step: String, field: String },

    #[error("Required input '{field}' is missing or blank")]
    MissingInputError { field: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Remote,
    Response,
    Input,
    Config,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl StepError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            StepError::RemoteCallError { .. } | StepError::TransportError { .. } => {
                ErrorCategory::Remote
            }
            StepError::MissingFieldError { .. } | StepError::SerializationError(_) => {
                ErrorCategory::Response
            }
            StepError::MissingInputError { .. } => ErrorCategory::Input,
            StepError::ConfigError { .. }
            | StepError::InvalidConfigValueError { .. }
            | StepError::ConfigValidationError { .. } => ErrorCategory::Config,
            StepError::IoError(_) => ErrorCategory::Io,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Remote => ErrorSeverity::Medium,
            ErrorCategory::Response | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Config | ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    /// Process exit code the CLI reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            StepError::RemoteCallError { step, status, .. } => {
                format!("The {} service rejected the request (HTTP {})", step, status)
            }
            StepError::TransportError { step, .. } => {
                format!("Could not reach the {} service", step)
            }
            StepError::MissingFieldError { step, field } => {
                format!("The {} service did not return '{}'", step, field)
            }
            StepError::MissingInputError { field } => {
                format!("Input '{}' must not be empty", field)
            }
            StepError::SerializationError(_) => {
                "The service returned a response that is not valid JSON".to_string()
            }
            StepError::IoError(e) => format!("Could not write the output file: {}", e),
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Remote => {
                "Check that the RMA service is reachable and healthy, then rerun the step"
            }
            ErrorCategory::Response => {
                "Inspect the RMA service response; the step cannot continue without this field"
            }
            ErrorCategory::Input => "Provide a non-empty value for every required input",
            ErrorCategory::Config => "Review --base-url, --timeout-seconds and the config file",
            ErrorCategory::Io => "Check that the output path is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, StepError>;
