use thiserror::Error;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Failures while turning a fetched resource into series or districts.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    #[error("failed to fetch '{source_name}': {reason}")]
    Fetch { source_name: String, reason: String },
    #[error("no valid rows in '{source_name}' ({rows_read} read)")]
    Empty { source_name: String, rows_read: usize },
    #[error("malformed '{source_name}': {reason}")]
    Malformed { source_name: String, reason: String },
}

/// Derived metrics that are undefined for the given input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricError {
    #[error("series has {len} points, {required} required")]
    SeriesTooShort { len: usize, required: usize },
    #[error("baseline value at '{label}' is zero")]
    ZeroBaseline { label: String },
    #[error("capacity must be greater than zero")]
    ZeroCapacity,
}

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        let exit_code = match err {
            LoadError::Fetch { .. } => 4,
            LoadError::Empty { .. } | LoadError::Malformed { .. } => 3,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl From<MetricError> for AppError {
    fn from(err: MetricError) -> Self {
        AppError::new(3, err.to_string())
    }
}
