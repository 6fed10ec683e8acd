//! Error types for immuno operations.
//!
//! Provides structured error handling instead of panics.

use std::error::Error;
use std::fmt;

/// Result type for immuno operations.
pub type Result<T> = std::result::Result<T, ImmunoError>;

/// Errors that can occur while configuring or driving an automaton.
#[derive(Debug, Clone, PartialEq)]
pub enum ImmunoError {
    /// Configuration errors.
    Config(ConfigError),
    /// Grid shape and addressing errors.
    Grid(GridError),
}

impl fmt::Display for ImmunoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImmunoError::Config(e) => write!(f, "Config error: {}", e),
            ImmunoError::Grid(e) => write!(f, "Grid error: {}", e),
        }
    }
}

impl Error for ImmunoError {}

impl From<ConfigError> for ImmunoError {
    fn from(e: ConfigError) -> Self {
        ImmunoError::Config(e)
    }
}

impl From<GridError> for ImmunoError {
    fn from(e: GridError) -> Self {
        ImmunoError::Grid(e)
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Invalid value.
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
    /// Out of range.
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue {
                field,
                value,
                reason,
            } => {
                write!(f, "Invalid value for {}: {} ({})", field, value, reason)
            }
            ConfigError::OutOfRange {
                field,
                min,
                max,
                value,
            } => {
                write!(
                    f,
                    "{} out of range: {} (must be {}-{})",
                    field, value, min, max
                )
            }
        }
    }
}

/// Grid shape and addressing errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Width or height is zero.
    EmptyDimensions,
    /// A supplied grid does not match the automaton's shape.
    /// Dimensions are `(width, height)`.
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// A coordinate lies outside the grid.
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::EmptyDimensions => write!(f, "grid dimensions must be non-zero"),
            GridError::DimensionMismatch { expected, found } => write!(
                f,
                "Dimension mismatch: expected {}x{}, found {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
            GridError::OutOfBounds {
                x,
                y,
                width,
                height,
            } => write!(
                f,
                "Position ({}, {}) outside {}x{} grid",
                x, y, width, height
            ),
        }
    }
}

// Convenience constructors
impl ImmunoError {
    pub fn invalid_config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ImmunoError::Config(ConfigError::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        })
    }

    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, value: f64) -> Self {
        ImmunoError::Config(ConfigError::OutOfRange {
            field: field.into(),
            min,
            max,
            value,
        })
    }

    pub fn dimension_mismatch(expected: (usize, usize), found: (usize, usize)) -> Self {
        ImmunoError::Grid(GridError::DimensionMismatch { expected, found })
    }
}
