use std::ops::RangeInclusive;

use log::{debug, trace};
use pyo3::{prelude::*, Python};
use numpy::{IntoPyArray, PyArray1, PyArray2, PyReadonlyArray2, ndarray::Array1};
use rayon::prelude::*;

use crate::array::{
    array_to_coords_2d, array_to_coords_3d, coords_to_array_xy, coords_to_array_xyz,
    extract_point, indices_to_array, point_2d, point_3d,
};
use crate::coordinates::{Coord2D, Coord3D};
use crate::exceptions::GridError;
use crate::setdiff::setdiff_coords;

/// Validate a radius given from Python.
pub fn radius(r: isize) -> Result<usize, GridError> {
    if r < 0 {
        return Err(GridError::InvalidRadius(r));
    }
    Ok(r as usize)
}

fn check_extents(extents: &[usize]) -> Result<(), GridError> {
    if extents.iter().any(|&n| n == 0) {
        return Err(GridError::InvalidShape {
            shape: extents.to_vec(),
            reason: "every axis must have at least one element",
        });
    }
    if extents.iter().any(|&n| n > isize::MAX as usize) {
        return Err(GridError::InvalidShape {
            shape: extents.to_vec(),
            reason: "axis length does not fit in a signed index",
        });
    }
    Ok(())
}

/// The part of `[center - r, center + r]` inside `[1, upper]`.
fn clipped_range(center: isize, r: isize, upper: isize) -> RangeInclusive<isize> {
    center.saturating_sub(r).max(1)..=center.saturating_add(r).min(upper)
}

/// Lattice points within Chebyshev radius `r` of `point` on the grid `[1, xm] x [1, ym]`,
/// excluding `point` itself.
///
/// The box is clipped at the grid boundary, never padded. Output is sorted with `x`
/// as the slowest-varying field.
pub fn neighbors_2d(
    point: Coord2D,
    xm: usize,
    ym: usize,
    r: usize,
) -> Result<Vec<Coord2D>, GridError> {
    check_extents(&[xm, ym])?;
    let (xm, ym) = (xm as isize, ym as isize);
    if !point.is_valid(xm, ym) {
        return Err(GridError::OutOfBounds {
            point: vec![point.x, point.y],
            shape: vec![xm as usize, ym as usize],
        });
    }
    // a radius beyond the largest extent already covers the grid
    let r = r.min(xm.max(ym) as usize) as isize;

    let ys = clipped_range(point.y, r, ym);
    let cube: Vec<Coord2D> = clipped_range(point.x, r, xm)
        .flat_map(|x| ys.clone().map(move |y| Coord2D::new(x, y)))
        .collect();
    let out = setdiff_coords(&cube, &[point]);
    trace!("{} neighbors around {:?} (r={})", out.len(), point, r);
    Ok(out)
}

/// Lattice points within Chebyshev radius `r` of `point` on the grid
/// `[1, xm] x [1, ym] x [1, zm]`, excluding `point` itself.
/// Output is sorted with `x` slowest and `z` fastest.
pub fn neighbors_3d(
    point: Coord3D,
    xm: usize,
    ym: usize,
    zm: usize,
    r: usize,
) -> Result<Vec<Coord3D>, GridError> {
    check_extents(&[xm, ym, zm])?;
    let (xm, ym, zm) = (xm as isize, ym as isize, zm as isize);
    if !point.is_valid(xm, ym, zm) {
        return Err(GridError::OutOfBounds {
            point: vec![point.x, point.y, point.z],
            shape: vec![xm as usize, ym as usize, zm as usize],
        });
    }
    let r = r.min(xm.max(ym).max(zm) as usize) as isize;

    let ys = clipped_range(point.y, r, ym);
    let zs = clipped_range(point.z, r, zm);
    let cube: Vec<Coord3D> = clipped_range(point.x, r, xm)
        .flat_map(|x| {
            let zs = zs.clone();
            ys.clone().flat_map(move |y| zs.clone().map(move |z| Coord3D::new(x, y, z)))
        })
        .collect();
    let out = setdiff_coords(&cube, &[point]);
    trace!("{} neighbors around {:?} (r={})", out.len(), point, r);
    Ok(out)
}

/// Neighbors of a 2D point together with their offsets into a flat array with
/// strides `(1, xm)`.
pub fn indexed_neighbors_2d(
    point: Coord2D,
    xm: usize,
    ym: usize,
    r: usize,
) -> Result<(Vec<isize>, Vec<Coord2D>), GridError> {
    let coords = neighbors_2d(point, xm, ym, r)?;
    let indices = coords.iter().map(|c| c.linear_index(xm as isize)).collect();
    Ok((indices, coords))
}

/// Neighbors of a 3D point together with their offsets into a flat array with
/// strides `(1, xm, xm * ym)`.
pub fn indexed_neighbors_3d(
    point: Coord3D,
    xm: usize,
    ym: usize,
    zm: usize,
    r: usize,
) -> Result<(Vec<isize>, Vec<Coord3D>), GridError> {
    let coords = neighbors_3d(point, xm, ym, zm, r)?;
    let indices = coords
        .iter()
        .map(|c| c.linear_index(xm as isize, ym as isize))
        .collect();
    Ok((indices, coords))
}

/// A neighbor table in compressed-row form.
/// Neighbors of the `i`-th query are `indices[offsets[i]..offsets[i + 1]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborTable {
    pub offsets: Vec<isize>,
    pub indices: Vec<isize>,
}

impl NeighborTable {
    fn from_rows(rows: Vec<Vec<isize>>) -> Self {
        let mut offsets = Vec::with_capacity(rows.len() + 1);
        let mut indices = Vec::with_capacity(rows.iter().map(|row| row.len()).sum());
        offsets.push(0);
        for row in rows {
            indices.extend(row);
            offsets.push(indices.len() as isize);
        }
        Self { offsets, indices }
    }

    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Linear indices of the neighbors of the `i`-th query.
    pub fn row(&self, i: usize) -> &[isize] {
        let start = self.offsets[i] as usize;
        let end = self.offsets[i + 1] as usize;
        &self.indices[start..end]
    }
}

/// Linear neighbor indices of many 2D points, computed in parallel.
pub fn neighbor_table_2d(
    points: &[Coord2D],
    xm: usize,
    ym: usize,
    r: usize,
) -> Result<NeighborTable, GridError> {
    debug!("building 2D neighbor table for {} points (r={})", points.len(), r);
    let rows = points
        .par_iter()
        .map(|&p| indexed_neighbors_2d(p, xm, ym, r).map(|(indices, _)| indices))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(NeighborTable::from_rows(rows))
}

/// Linear neighbor indices of many 3D points, computed in parallel.
pub fn neighbor_table_3d(
    points: &[Coord3D],
    xm: usize,
    ym: usize,
    zm: usize,
    r: usize,
) -> Result<NeighborTable, GridError> {
    debug!("building 3D neighbor table for {} points (r={})", points.len(), r);
    let rows = points
        .par_iter()
        .map(|&p| indexed_neighbors_3d(p, xm, ym, zm, r).map(|(indices, _)| indices))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(NeighborTable::from_rows(rows))
}

/////////////////////////////////////////////////////////////////////////////////////////
///////////   Python interface   ////////////////////////////////////////////////////////
/////////////////////////////////////////////////////////////////////////////////////////

#[pyfunction]
#[pyo3(signature = (point, xm, ym, r))]
/// Coordinates within Chebyshev radius `r` of `point = (x, y)`, excluding the point.
/// Rows are `(x, y)` with `1 <= x <= xm` and `1 <= y <= ym`.
pub fn kc_coord_2d<'py>(
    py: Python<'py>,
    point: &Bound<'py, PyAny>,
    xm: usize,
    ym: usize,
    r: isize,
) -> PyResult<Py<PyArray2<isize>>> {
    let point = point_2d(&extract_point(point)?)?;
    let coords = neighbors_2d(point, xm, ym, radius(r)?)?;
    Ok(coords_to_array_xy(&coords).into_pyarray_bound(py).unbind())
}

#[pyfunction]
#[pyo3(signature = (point, xm, ym, zm, r))]
/// Neighbors of `point = (x, y, z)` within Chebyshev radius `r`, excluding the point.
/// Returns `(linear_indices, coordinates)`. Coordinates are `(x, y, z)` rows and
/// `linear_indices` are offsets with strides `(1, xm, xm * ym)`.
pub fn kc_coord_3d<'py>(
    py: Python<'py>,
    point: &Bound<'py, PyAny>,
    xm: usize,
    ym: usize,
    zm: usize,
    r: isize,
) -> PyResult<(Py<PyArray1<isize>>, Py<PyArray2<isize>>)> {
    let point = point_3d(&extract_point(point)?)?;
    let (indices, coords) = indexed_neighbors_3d(point, xm, ym, zm, radius(r)?)?;
    Ok((
        indices_to_array(indices).into_pyarray_bound(py).unbind(),
        coords_to_array_xyz(&coords).into_pyarray_bound(py).unbind(),
    ))
}

#[pyfunction]
#[pyo3(signature = (point, xm, ym, r))]
/// 2D version of `kc_coord_3d`. Linear indices use strides `(1, xm)`.
pub fn kc_index_2d<'py>(
    py: Python<'py>,
    point: &Bound<'py, PyAny>,
    xm: usize,
    ym: usize,
    r: isize,
) -> PyResult<(Py<PyArray1<isize>>, Py<PyArray2<isize>>)> {
    let point = point_2d(&extract_point(point)?)?;
    let (indices, coords) = indexed_neighbors_2d(point, xm, ym, radius(r)?)?;
    Ok((
        indices_to_array(indices).into_pyarray_bound(py).unbind(),
        coords_to_array_xy(&coords).into_pyarray_bound(py).unbind(),
    ))
}

fn table_to_pyarrays(
    py: Python<'_>,
    table: NeighborTable,
) -> (Py<PyArray1<isize>>, Py<PyArray1<isize>>) {
    (
        Array1::from_vec(table.offsets).into_pyarray_bound(py).unbind(),
        Array1::from_vec(table.indices).into_pyarray_bound(py).unbind(),
    )
}

#[pyfunction]
#[pyo3(signature = (points, xm, ym, r))]
/// Linear neighbor indices of every `(x, y)` row of `points`, as `(offsets, indices)`.
pub fn kc_index_2d_many<'py>(
    py: Python<'py>,
    points: PyReadonlyArray2<isize>,
    xm: usize,
    ym: usize,
    r: isize,
) -> PyResult<(Py<PyArray1<isize>>, Py<PyArray1<isize>>)> {
    let points = array_to_coords_2d(points.as_array())?;
    let r = radius(r)?;
    let table = py.allow_threads(|| neighbor_table_2d(&points, xm, ym, r))?;
    Ok(table_to_pyarrays(py, table))
}

#[pyfunction]
#[pyo3(signature = (points, xm, ym, zm, r))]
/// Linear neighbor indices of every `(x, y, z)` row of `points`, as `(offsets, indices)`.
pub fn kc_index_3d_many<'py>(
    py: Python<'py>,
    points: PyReadonlyArray2<isize>,
    xm: usize,
    ym: usize,
    zm: usize,
    r: isize,
) -> PyResult<(Py<PyArray1<isize>>, Py<PyArray1<isize>>)> {
    let points = array_to_coords_3d(points.as_array())?;
    let r = radius(r)?;
    let table = py.allow_threads(|| neighbor_table_3d(&points, xm, ym, zm, r))?;
    Ok(table_to_pyarrays(py, table))
}
