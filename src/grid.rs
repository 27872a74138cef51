use log::debug;
use pyo3::{prelude::*, Python};
use numpy::{IntoPyArray, PyArray1, PyArray2, ndarray::Array2};

use crate::array::{
    coords_to_array_xy, coords_to_array_xyz, coords_to_array_yx, coords_to_array_zyx,
    extract_point, indices_to_array,
};
use crate::coordinates::{Coord2D, Coord3D};
use crate::exceptions::GridError;
use crate::neighbors::{indexed_neighbors_2d, indexed_neighbors_3d, radius};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Extents of a regular 2D or 3D grid. `size_x` is the first (slowest) axis of the
/// C-order flattened data array.
pub enum GridShape {
    Plane { size_x: usize, size_y: usize },
    Volume { size_x: usize, size_y: usize, size_z: usize },
}

impl GridShape {
    pub fn from_slice(shape: &[usize]) -> Result<Self, GridError> {
        if shape.iter().any(|&n| n == 0) {
            return Err(GridError::InvalidShape {
                shape: shape.to_vec(),
                reason: "every axis must have at least one element",
            });
        }
        if shape.iter().any(|&n| n > isize::MAX as usize) {
            return Err(GridError::InvalidShape {
                shape: shape.to_vec(),
                reason: "axis length does not fit in a signed index",
            });
        }
        match *shape {
            [size_x, size_y] => Ok(GridShape::Plane { size_x, size_y }),
            [size_x, size_y, size_z] => Ok(GridShape::Volume { size_x, size_y, size_z }),
            _ => Err(GridError::InvalidShape {
                shape: shape.to_vec(),
                reason: "only 2D and 3D grids are supported",
            }),
        }
    }

    pub fn ndim(&self) -> usize {
        match self {
            GridShape::Plane { .. } => 2,
            GridShape::Volume { .. } => 3,
        }
    }

    pub fn dims(&self) -> Vec<usize> {
        match *self {
            GridShape::Plane { size_x, size_y } => vec![size_x, size_y],
            GridShape::Volume { size_x, size_y, size_z } => vec![size_x, size_y, size_z],
        }
    }

    pub fn count(&self) -> usize {
        self.dims().iter().product()
    }
}

/// Every point of a 2D grid with `x` as the outer loop.
pub fn grid_coords_2d(size_x: usize, size_y: usize) -> Vec<Coord2D> {
    let (size_x, size_y) = (size_x as isize, size_y as isize);
    (1..=size_x)
        .flat_map(|x| (1..=size_y).map(move |y| Coord2D::new(x, y)))
        .collect()
}

/// Every point of a 3D grid with `x` as the outer loop and `z` as the inner loop.
pub fn grid_coords_3d(size_x: usize, size_y: usize, size_z: usize) -> Vec<Coord3D> {
    let (size_x, size_y, size_z) = (size_x as isize, size_y as isize, size_z as isize);
    (1..=size_x)
        .flat_map(|x| {
            (1..=size_y).flat_map(move |y| (1..=size_z).map(move |z| Coord3D::new(x, y, z)))
        })
        .collect()
}

/// Coordinate table of a grid. Row `i` is the 1-indexed position of element `i` of the
/// C-order flattened data. Columns are reversed: `(y, x)` for 2D and `(z, y, x)` for 3D.
pub fn xyz_table(shape: &GridShape) -> Array2<isize> {
    match *shape {
        GridShape::Plane { size_x, size_y } => {
            coords_to_array_yx(&grid_coords_2d(size_x, size_y))
        }
        GridShape::Volume { size_x, size_y, size_z } => {
            coords_to_array_zyx(&grid_coords_3d(size_x, size_y, size_z))
        }
    }
}

#[pyfunction]
#[pyo3(signature = (shape))]
/// Coordinates of every element of an array of the given shape, starting from 1.
/// For shape `(X, Y, Z)` rows are `(z, y, x)`; for `(X, Y)` they are `(y, x)`.
pub fn get_xyz<'py>(py: Python<'py>, shape: Vec<usize>) -> PyResult<Py<PyArray2<isize>>> {
    let shape = GridShape::from_slice(&shape)?;
    Ok(xyz_table(&shape).into_pyarray_bound(py).unbind())
}

#[pyclass]
#[derive(Clone, PartialEq, Eq)]
/// A regular grid matching a data array of the given shape.
/// Points are rows of `coordinates()`, i.e. in reversed axis order, so that the linear
/// indices returned by `neighbors` index the flattened data array directly.
pub struct Grid {
    shape: GridShape,
}

#[pymethods]
impl Grid {
    #[new]
    #[pyo3(signature = (shape))]
    pub fn new(shape: Vec<usize>) -> PyResult<Self> {
        let shape = GridShape::from_slice(&shape)?;
        debug!("created grid with shape {:?}", shape.dims());
        Ok(Self { shape })
    }

    pub fn __repr__(&self) -> String {
        format!("Grid(shape={:?})", self.shape.dims())
    }

    #[getter]
    pub fn shape(&self) -> Vec<usize> {
        self.shape.dims()
    }

    #[getter]
    pub fn ndim(&self) -> usize {
        self.shape.ndim()
    }

    pub fn count(&self) -> usize {
        self.shape.count()
    }

    /// Same as `get_xyz(self.shape)`.
    pub fn coordinates<'py>(&self, py: Python<'py>) -> Py<PyArray2<isize>> {
        xyz_table(&self.shape).into_pyarray_bound(py).unbind()
    }

    #[pyo3(signature = (point, r=1))]
    /// Neighbors of a point within Chebyshev radius `r`.
    /// Returns `(linear_indices, coordinates)`, where coordinates are rows in the same
    /// order as `coordinates()`.
    pub fn neighbors<'py>(
        &self,
        py: Python<'py>,
        point: &Bound<'py, PyAny>,
        r: isize,
    ) -> PyResult<(Py<PyArray1<isize>>, Py<PyArray2<isize>>)> {
        let (indices, coords) = self.neighbors_of(&extract_point(point)?, radius(r)?)?;
        Ok((
            indices_to_array(indices).into_pyarray_bound(py).unbind(),
            coords.into_pyarray_bound(py).unbind(),
        ))
    }

    /// Position of a point in the flattened data array.
    pub fn linear_index(&self, point: &Bound<'_, PyAny>) -> PyResult<isize> {
        Ok(self.linear_index_of(&extract_point(point)?)?)
    }
}

/// A point read in the reversed axis order of `get_xyz`, with the grid extents in the
/// same order. `xm` is the last axis of the data array.
enum Point {
    Plane { p: Coord2D, xm: usize, ym: usize },
    Volume { p: Coord3D, xm: usize, ym: usize, zm: usize },
}

impl Grid {
    pub fn grid_shape(&self) -> GridShape {
        self.shape
    }

    /// Neighbors of a `coordinates()` row. Rows of the returned array are in the same
    /// reversed axis order, and the indices locate them in the flattened data.
    pub fn neighbors_of(
        &self,
        point: &[isize],
        r: usize,
    ) -> Result<(Vec<isize>, Array2<isize>), GridError> {
        match self.check_point(point)? {
            Point::Plane { p, xm, ym } => {
                let (indices, coords) = indexed_neighbors_2d(p, xm, ym, r)?;
                Ok((indices, coords_to_array_xy(&coords)))
            }
            Point::Volume { p, xm, ym, zm } => {
                let (indices, coords) = indexed_neighbors_3d(p, xm, ym, zm, r)?;
                Ok((indices, coords_to_array_xyz(&coords)))
            }
        }
    }

    pub fn linear_index_of(&self, point: &[isize]) -> Result<isize, GridError> {
        let index = match self.check_point(point)? {
            Point::Plane { p, xm, .. } => p.linear_index(xm as isize),
            Point::Volume { p, xm, ym, .. } => p.linear_index(xm as isize, ym as isize),
        };
        Ok(index)
    }

    fn check_point(&self, point: &[isize]) -> Result<Point, GridError> {
        let (checked, valid) = match (self.shape, point) {
            (GridShape::Plane { size_x, size_y }, &[a, b]) => {
                let p = Coord2D::new(a, b);
                let valid = p.is_valid(size_y as isize, size_x as isize);
                (Point::Plane { p, xm: size_y, ym: size_x }, valid)
            }
            (GridShape::Volume { size_x, size_y, size_z }, &[a, b, c]) => {
                let p = Coord3D::new(a, b, c);
                let valid = p.is_valid(size_z as isize, size_y as isize, size_x as isize);
                (Point::Volume { p, xm: size_z, ym: size_y, zm: size_x }, valid)
            }
            _ => {
                return Err(GridError::InvalidWidth {
                    expected: self.shape.ndim(),
                    got: point.len(),
                });
            }
        };
        if !valid {
            return Err(GridError::OutOfBounds { point: point.to_vec(), shape: self.shape.dims() });
        }
        Ok(checked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use numpy::ndarray::array;

    #[test]
    fn test_xyz_2d() {
        let shape = GridShape::from_slice(&[2, 3]).unwrap();
        let table = xyz_table(&shape);
        assert_eq!(table, array![[1, 1], [2, 1], [3, 1], [1, 2], [2, 2], [3, 2]]);
    }

    #[test]
    fn test_xyz_3d() {
        let shape = GridShape::from_slice(&[2, 1, 3]).unwrap();
        let table = xyz_table(&shape);
        assert_eq!(
            table,
            array![[1, 1, 1], [2, 1, 1], [3, 1, 1], [1, 1, 2], [2, 1, 2], [3, 1, 2]]
        );
    }

    #[test]
    fn test_xyz_matches_flatten_order() {
        // row i of the table locates element i of a C-order array of shape (4, 3, 2)
        let (sx, sy, sz) = (4usize, 3usize, 2usize);
        let shape = GridShape::from_slice(&[sx, sy, sz]).unwrap();
        let table = xyz_table(&shape);
        assert_eq!(table.nrows(), sx * sy * sz);
        for (i, row) in table.rows().into_iter().enumerate() {
            let (z, y, x) = (row[0] as usize - 1, row[1] as usize - 1, row[2] as usize - 1);
            assert_eq!(x * sy * sz + y * sz + z, i);
        }
    }

    #[test]
    fn test_invalid_shape() {
        assert!(matches!(
            GridShape::from_slice(&[4]),
            Err(GridError::InvalidShape { .. })
        ));
        assert!(matches!(
            GridShape::from_slice(&[4, 0, 2]),
            Err(GridError::InvalidShape { .. })
        ));
        assert!(matches!(
            GridShape::from_slice(&[usize::MAX, 2]),
            Err(GridError::InvalidShape { .. })
        ));
        assert!(matches!(
            GridShape::from_slice(&[1, 2, 3, 4]),
            Err(GridError::InvalidShape { .. })
        ));
    }

    #[test]
    fn test_shape_accessors() {
        let shape = GridShape::from_slice(&[4, 3, 2]).unwrap();
        assert_eq!(shape.ndim(), 3);
        assert_eq!(shape.count(), 24);
        assert_eq!(shape.dims(), vec![4, 3, 2]);
    }

    #[test]
    fn test_grid_linear_index_matches_table() {
        let grid = Grid::new(vec![3, 4, 2]).unwrap();
        let table = xyz_table(&grid.grid_shape());
        for (i, row) in table.rows().into_iter().enumerate() {
            assert_eq!(grid.linear_index_of(&row.to_vec()).unwrap(), i as isize);
        }
        let grid = Grid::new(vec![3, 5]).unwrap();
        let table = xyz_table(&grid.grid_shape());
        for (i, row) in table.rows().into_iter().enumerate() {
            assert_eq!(grid.linear_index_of(&row.to_vec()).unwrap(), i as isize);
        }
    }

    #[test]
    fn test_repr() {
        let grid = Grid::new(vec![3, 4]).unwrap();
        assert_eq!(grid.__repr__(), "Grid(shape=[3, 4])");
        assert_eq!(grid.count(), 12);
    }

    fn assert_neighbors_match_table(grid: &Grid, r: usize) {
        let table = xyz_table(&grid.grid_shape());
        for (own, row) in table.rows().into_iter().enumerate() {
            let (indices, coords) = grid.neighbors_of(&row.to_vec(), r).unwrap();
            assert_eq!(indices.len(), coords.nrows());
            assert!(!indices.contains(&(own as isize)));
            for (k, &i) in indices.iter().enumerate() {
                // each neighbor row is the table row its linear index points at
                assert_eq!(table.row(i as usize), coords.row(k));
                let d = table
                    .row(i as usize)
                    .iter()
                    .zip(row.iter())
                    .map(|(a, b)| (a - b).abs())
                    .max()
                    .unwrap();
                assert!(d >= 1 && d <= r as isize);
            }
        }
    }

    #[test]
    fn test_grid_neighbors_3d() {
        let grid = Grid::new(vec![4, 3, 2]).unwrap();
        assert_neighbors_match_table(&grid, 1);
        assert_neighbors_match_table(&grid, 2);
        let (indices, _) = grid.neighbors_of(&[1, 2, 2], 1).unwrap();
        assert_eq!(indices.len(), 17);
    }

    #[test]
    fn test_grid_neighbors_2d() {
        let grid = Grid::new(vec![3, 5]).unwrap();
        assert_neighbors_match_table(&grid, 1);
        assert_neighbors_match_table(&grid, 3);
        // row (y, x) = (3, 2) is interior on a 3 x 5 grid
        let (indices, coords) = grid.neighbors_of(&[3, 2], 1).unwrap();
        assert_eq!(indices.len(), 8);
        assert_eq!(coords.row(0).to_vec(), vec![2, 1]);
        assert_eq!(indices[0], 1);
    }

    #[test]
    fn test_grid_point_errors() {
        let grid = Grid::new(vec![4, 3, 2]).unwrap();
        assert_eq!(
            grid.neighbors_of(&[1, 1], 1).unwrap_err(),
            GridError::InvalidWidth { expected: 3, got: 2 }
        );
        assert_eq!(
            grid.linear_index_of(&[1, 1, 1, 1]).unwrap_err(),
            GridError::InvalidWidth { expected: 3, got: 4 }
        );
        // rows are (z, y, x) so z is bounded by the last axis
        assert!(matches!(
            grid.neighbors_of(&[3, 1, 1], 1).unwrap_err(),
            GridError::OutOfBounds { .. }
        ));
        assert_eq!(grid.linear_index_of(&[2, 3, 4]), Ok(23));
    }
}
