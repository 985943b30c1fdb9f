use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Aggregate weights must sum to 100, got {actual}")]
    InvalidWeights { actual: f64 },

    #[error("All {attempts} classifier providers failed")]
    ClassifierUnavailable { attempts: usize },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

impl ScoreError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            ScoreError::CsvError(_) => {
                "The genetic data file could not be read as CSV/TSV.".to_string()
            }
            ScoreError::IoError(_) => "A file could not be read or written.".to_string(),
            ScoreError::SerializationError(_) => {
                "A profile or result could not be (de)serialized.".to_string()
            }
            ScoreError::ConfigValidationError { field, .. }
            | ScoreError::InvalidConfigValueError { field, .. }
            | ScoreError::MissingConfigError { field } => {
                format!("Configuration problem in '{}'.", field)
            }
            ScoreError::InvalidWeights { actual } => format!(
                "Component weights must add up to 100 (currently {}).",
                actual
            ),
            ScoreError::ClassifierUnavailable { .. } => {
                "No trait classifier could produce a result.".to_string()
            }
            ScoreError::ProcessingError { message } => message.clone(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ScoreError::CsvError(_) | ScoreError::IoError(_) => {
                "Check that the input file is a raw 23andMe/Ancestry/MyHeritage export or manual HLA notation."
            }
            ScoreError::SerializationError(_) => {
                "Check that the profiles file is valid JSON matching the trait profile schema."
            }
            ScoreError::ConfigValidationError { .. }
            | ScoreError::InvalidConfigValueError { .. }
            | ScoreError::MissingConfigError { .. } => {
                "Review the scoring TOML / CLI flags against the documented defaults."
            }
            ScoreError::InvalidWeights { .. } => {
                "Adjust --visual-weight/--personality-weight/--genetic-weight so they total 100."
            }
            ScoreError::ClassifierUnavailable { .. } => {
                "The comparison can still run; missing traits are treated as neutral."
            }
            ScoreError::ProcessingError { .. } => "Re-run with --verbose for details.",
        }
    }
}

pub type Result<T> = std::result::Result<T, ScoreError>;
