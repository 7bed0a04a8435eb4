//! Error kinds raised by the metric aggregation core.

use std::fmt;
use thiserror::Error;

/// Which index overflowed in an [`InteropError::OutOfRange`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IndexAxis {
    Row,
    Column,
    Bin,
    Buffer,
}

impl fmt::Display for IndexAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexAxis::Row => write!(f, "Row"),
            IndexAxis::Column => write!(f, "Column"),
            IndexAxis::Bin => write!(f, "Bin"),
            IndexAxis::Buffer => write!(f, "Buffer"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InteropError {
    #[error("{axis} index out of bounds: {index} >= {bound}")]
    OutOfRange {
        axis: IndexAxis,
        index: usize,
        bound: usize,
    },

    #[error("Invalid filter option: {0}")]
    InvalidFilterOption(String),

    #[error("Invalid metric type: {0}")]
    InvalidMetricType(String),
}

impl InteropError {
    pub fn out_of_range(axis: IndexAxis, index: usize, bound: usize) -> Self {
        InteropError::OutOfRange { axis, index, bound }
    }
}

/// Result type alias for core operations.
pub type InteropResult<T> = Result<T, InteropError>;
