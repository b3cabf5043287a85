use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Input file not found: {path}")]
    MissingInputError { path: String },

    #[error("Missing required column: {column}")]
    SchemaError { column: String },

    #[error("Cannot parse timestamp value: {value:?}")]
    DateParseError { value: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Schema,
    Transform,
    Output,
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::MissingInputError { .. } => ErrorCategory::Input,
            EtlError::SchemaError { .. } => ErrorCategory::Schema,
            EtlError::DateParseError { .. } => ErrorCategory::Transform,
            EtlError::CsvError(_) => ErrorCategory::Input,
            EtlError::IoError(_) | EtlError::SerializationError(_) => ErrorCategory::Output,
            EtlError::ConfigError { .. } | EtlError::InvalidConfigValueError { .. } => {
                ErrorCategory::Config
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 缺少輸入檔案視為「無工作可做」而非失敗
            EtlError::MissingInputError { .. } => ErrorSeverity::Low,
            EtlError::SchemaError { .. }
            | EtlError::DateParseError { .. }
            | EtlError::CsvError(_) => ErrorSeverity::High,
            EtlError::IoError(_) | EtlError::SerializationError(_) => ErrorSeverity::Critical,
            EtlError::ConfigError { .. } | EtlError::InvalidConfigValueError { .. } => {
                ErrorSeverity::Medium
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::MissingInputError { path } => {
                format!("Input file not found at {}", path)
            }
            EtlError::SchemaError { column } => format!(
                "The legacy export is missing the required column '{}'",
                column
            ),
            EtlError::DateParseError { value } => format!(
                "A creation date could not be understood: {:?}. No output was written.",
                value
            ),
            EtlError::CsvError(e) => format!("The legacy export could not be read: {}", e),
            EtlError::IoError(e) => format!("A file operation failed: {}", e),
            EtlError::SerializationError(e) => format!("The output could not be encoded: {}", e),
            EtlError::ConfigError { message } => format!("Configuration problem: {}", message),
            EtlError::InvalidConfigValueError { field, value, .. } => {
                format!("Configuration value '{}' is not usable for {}", value, field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::MissingInputError { .. } => {
                "Download the legacy incident export and place it at the expected path, \
                 then re-run. Note this run still exits with status 0."
                    .to_string()
            }
            EtlError::SchemaError { .. } => {
                "Check that the export comes from the incident module and was not \
                 re-exported with custom columns".to_string()
            }
            EtlError::DateParseError { .. } => {
                "Fix the offending row in the export, or extend the accepted date \
                 formats if the source system changed".to_string()
            }
            EtlError::CsvError(_) => {
                "Verify the export is a delimited text file and not a spreadsheet".to_string()
            }
            EtlError::IoError(_) => {
                "Check permissions and free space on the output directory".to_string()
            }
            EtlError::SerializationError(_) => {
                "Re-run with --verbose and report the failing record".to_string()
            }
            EtlError::ConfigError { .. } | EtlError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and re-run".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
