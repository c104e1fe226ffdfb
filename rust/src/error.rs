//! Error handling and result types for DAF index operations.
//!
//! Lookups that find nothing are not errors; they report `false` or an empty
//! sequence. Errors are reserved for rejected input and for invariant checks.

/// Error type for DAF index operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DafError {
    /// A required key or value was absent.
    InvalidArgument(String),
    /// Construction parameters were rejected.
    InvalidConfiguration(String),
    /// An internal invariant does not hold (reported by validation only).
    CorruptedTree(String),
}

impl DafError {
    /// Create an InvalidConfiguration error for a rejected capacity
    pub fn invalid_capacity(capacity: usize, min_required: usize) -> Self {
        Self::InvalidConfiguration(format!(
            "Capacity {} is invalid (minimum required: {})",
            capacity, min_required
        ))
    }

    /// Create an InvalidArgument error naming the offending argument
    pub fn invalid_argument(argument: &str, details: &str) -> Self {
        Self::InvalidArgument(format!("{} {}", argument, details))
    }

    /// Create a CorruptedTree error with context
    pub fn corrupted_tree(component: &str, details: &str) -> Self {
        Self::CorruptedTree(format!("{} corruption: {}", component, details))
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::InvalidConfiguration(_))
    }
}

impl std::fmt::Display for DafError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DafError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            DafError::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
            DafError::CorruptedTree(msg) => write!(f, "Corrupted tree: {}", msg),
        }
    }
}

impl std::error::Error for DafError {}

/// Internal result type for invariant checks
pub(crate) type TreeResult<T> = Result<T, DafError>;

/// Public result type for fallible operations
pub type DafResult<T> = Result<T, DafError>;

/// Result type for construction
pub type InitResult<T> = Result<T, DafError>;
