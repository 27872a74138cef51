use pyo3::{exceptions::{PyIndexError, PyValueError}, PyErr};
use thiserror::Error;

/// Errors raised by the grid and neighborhood routines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Two coordinate arrays do not have the same number of columns.
    #[error("shape mismatch: rows have {left} columns on the left and {right} on the right")]
    ShapeMismatch { left: usize, right: usize },

    /// A query point lies outside of the grid.
    #[error("point {point:?} out of bounds for grid of shape {shape:?}")]
    OutOfBounds { point: Vec<isize>, shape: Vec<usize> },

    /// A grid shape is not 2D/3D or has an empty axis.
    #[error("invalid grid shape {shape:?}: {reason}")]
    InvalidShape { shape: Vec<usize>, reason: &'static str },

    /// A point or coordinate row has the wrong number of elements.
    #[error("expected {expected} coordinates per point, got {got}")]
    InvalidWidth { expected: usize, got: usize },

    /// Negative neighborhood radius.
    #[error("radius must be non-negative, got {0}")]
    InvalidRadius(isize),
}

impl From<GridError> for PyErr {
    fn from(err: GridError) -> PyErr {
        match err {
            GridError::OutOfBounds { .. } => PyIndexError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = GridError::ShapeMismatch { left: 2, right: 3 };
        assert_eq!(
            err.to_string(),
            "shape mismatch: rows have 2 columns on the left and 3 on the right"
        );
        let err = GridError::OutOfBounds { point: vec![0, 4], shape: vec![10, 10] };
        assert_eq!(err.to_string(), "point [0, 4] out of bounds for grid of shape [10, 10]");
        let err = GridError::InvalidWidth { expected: 3, got: 2 };
        assert_eq!(err.to_string(), "expected 3 coordinates per point, got 2");
        assert_eq!(GridError::InvalidRadius(-1).to_string(), "radius must be non-negative, got -1");
    }

    #[test]
    fn test_python_exception_types() {
        pyo3::prepare_freethreaded_python();
        pyo3::Python::with_gil(|py| {
            let err: PyErr = GridError::InvalidWidth { expected: 2, got: 3 }.into();
            assert!(err.is_instance_of::<PyValueError>(py));
            let err: PyErr = GridError::OutOfBounds { point: vec![0], shape: vec![1] }.into();
            assert!(err.is_instance_of::<PyIndexError>(py));
        });
    }
}
