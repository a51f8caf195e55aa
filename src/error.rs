use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldkitError {
    #[error("invalid date or time input")]
    InvalidInput,
    #[error("layout provided not supported: {0}")]
    LayoutNotSupported(String),
    #[error("cannot parse {input:?} as {layout}")]
    LayoutMismatch { layout: String, input: String },
    #[error("date parsing failed")]
    DateParsingFailed,
    #[error("is empty")]
    Empty,
    #[error("is not a number ({0})")]
    NotANumber(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Lock poisoned: {0}")]
    Lock(String),
}

pub type Result<T> = std::result::Result<T, FieldkitError>;

// Helper conversions
impl From<config::ConfigError> for FieldkitError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
