use pyo3::prelude::*;
use numpy::ndarray::{Array1, Array2, ArrayView2};
use crate::coordinates::{Coord2D, Coord3D};
use crate::exceptions::GridError;

// Column order is explicit in every emitter. `get_xyz` writes reversed rows while the
// neighborhood functions write rows in field order; the two are not interchangeable.

/// Write 2D coordinates as `(x, y)` rows.
pub fn coords_to_array_xy(coords: &[Coord2D]) -> Array2<isize> {
    let mut out = Array2::<isize>::zeros((coords.len(), 2));
    for (i, c) in coords.iter().enumerate() {
        out[[i, 0]] = c.x;
        out[[i, 1]] = c.y;
    }
    out
}

/// Write 2D coordinates as `(y, x)` rows.
pub fn coords_to_array_yx(coords: &[Coord2D]) -> Array2<isize> {
    let mut out = Array2::<isize>::zeros((coords.len(), 2));
    for (i, c) in coords.iter().enumerate() {
        out[[i, 0]] = c.y;
        out[[i, 1]] = c.x;
    }
    out
}

/// Write 3D coordinates as `(x, y, z)` rows.
pub fn coords_to_array_xyz(coords: &[Coord3D]) -> Array2<isize> {
    let mut out = Array2::<isize>::zeros((coords.len(), 3));
    for (i, c) in coords.iter().enumerate() {
        out[[i, 0]] = c.x;
        out[[i, 1]] = c.y;
        out[[i, 2]] = c.z;
    }
    out
}

/// Write 3D coordinates as `(z, y, x)` rows.
pub fn coords_to_array_zyx(coords: &[Coord3D]) -> Array2<isize> {
    let mut out = Array2::<isize>::zeros((coords.len(), 3));
    for (i, c) in coords.iter().enumerate() {
        out[[i, 0]] = c.z;
        out[[i, 1]] = c.y;
        out[[i, 2]] = c.x;
    }
    out
}

pub fn indices_to_array(indices: Vec<isize>) -> Array1<isize> {
    Array1::from_vec(indices)
}

/// Read a point from any Python sequence of integers or a 1D numpy array.
pub fn extract_point(obj: &Bound<'_, PyAny>) -> PyResult<Vec<isize>> {
    match obj.extract::<Vec<isize>>() {
        Ok(point) => Ok(point),
        // numpy arrays are not sequences for pyo3
        Err(err) => {
            if obj.hasattr("tolist")? {
                obj.call_method0("tolist")?.extract()
            } else {
                Err(err)
            }
        }
    }
}

/// Read a query point given as a Python sequence `(x, y)`.
pub fn point_2d(point: &[isize]) -> Result<Coord2D, GridError> {
    if point.len() != 2 {
        return Err(GridError::InvalidWidth { expected: 2, got: point.len() });
    }
    Ok(Coord2D::new(point[0], point[1]))
}

/// Read a query point given as a Python sequence `(x, y, z)`.
pub fn point_3d(point: &[isize]) -> Result<Coord3D, GridError> {
    if point.len() != 3 {
        return Err(GridError::InvalidWidth { expected: 3, got: point.len() });
    }
    Ok(Coord3D::new(point[0], point[1], point[2]))
}

/// Convert (N, 2) array of `(x, y)` rows into coordinates.
pub fn array_to_coords_2d(array: ArrayView2<isize>) -> Result<Vec<Coord2D>, GridError> {
    if array.ncols() != 2 {
        return Err(GridError::InvalidWidth { expected: 2, got: array.ncols() });
    }
    Ok(array.rows().into_iter().map(Coord2D::from).collect())
}

/// Convert (N, 3) array of `(x, y, z)` rows into coordinates.
pub fn array_to_coords_3d(array: ArrayView2<isize>) -> Result<Vec<Coord3D>, GridError> {
    if array.ncols() != 3 {
        return Err(GridError::InvalidWidth { expected: 3, got: array.ncols() });
    }
    Ok(array.rows().into_iter().map(Coord3D::from).collect())
}
