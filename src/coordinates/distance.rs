use pyo3::prelude::*;
use crate::exceptions::GridError;

/// Euclidean distance between two points of the same dimension.
pub fn euclidean(a: &[f64], b: &[f64]) -> Result<f64, GridError> {
    if a.len() != b.len() {
        return Err(GridError::ShapeMismatch { left: a.len(), right: b.len() });
    }
    let sum: f64 = a.iter().zip(b).map(|(p, q)| (p - q) * (p - q)).sum();
    Ok(sum.sqrt())
}

#[pyfunction]
#[pyo3(signature = (a, b))]
/// Euclidean distance between two coordinate rows.
pub fn dist_xyz(a: Vec<f64>, b: Vec<f64>) -> PyResult<f64> {
    Ok(euclidean(&a, &b)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean() {
        assert_eq!(euclidean(&[1.0, 1.0, 1.0], &[1.0, 1.0, 1.0]), Ok(0.0));
        assert_eq!(euclidean(&[0.0, 0.0], &[3.0, 4.0]), Ok(5.0));
        assert!(matches!(
            euclidean(&[0.0, 0.0], &[3.0, 4.0, 1.0]),
            Err(GridError::ShapeMismatch { left: 2, right: 3 })
        ));
    }
}
