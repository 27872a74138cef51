use std::collections::BTreeSet;

use pyo3::{prelude::*, Python};
use numpy::{
    IntoPyArray, PyArray2, PyReadonlyArray2,
    ndarray::{Array2, ArrayView2},
};
use crate::exceptions::GridError;

/// Row-wise set difference of two 2D arrays.
/// Each row is compared as a whole. The result holds the unique rows of `a1` that do
/// not appear in `a2`, sorted lexicographically, like `np.setdiff1d` over row records.
pub fn setdiff_rows<T>(a1: ArrayView2<T>, a2: ArrayView2<T>) -> Result<Array2<T>, GridError>
where
    T: Ord + Clone + Default,
{
    let ncols = a1.ncols();
    if a2.ncols() != ncols {
        return Err(GridError::ShapeMismatch { left: ncols, right: a2.ncols() });
    }
    let excluded: BTreeSet<Vec<T>> = a2.rows().into_iter().map(|row| row.to_vec()).collect();
    let kept: BTreeSet<Vec<T>> = a1
        .rows()
        .into_iter()
        .map(|row| row.to_vec())
        .filter(|row| !excluded.contains(row))
        .collect();

    let mut out = Array2::<T>::default((kept.len(), ncols));
    for (i, row) in kept.into_iter().enumerate() {
        for (j, value) in row.into_iter().enumerate() {
            out[[i, j]] = value;
        }
    }
    Ok(out)
}

/// Same as `setdiff_rows` for slices of typed coordinates.
pub fn setdiff_coords<C: Ord + Copy>(a1: &[C], a2: &[C]) -> Vec<C> {
    let excluded: BTreeSet<C> = a2.iter().copied().collect();
    let kept: BTreeSet<C> = a1.iter().copied().filter(|c| !excluded.contains(c)).collect();
    kept.into_iter().collect()
}

#[pyfunction]
/// Rows of `a1` that are not in `a2`. Both arrays must have the same number of columns.
/// The output is deduplicated and sorted row by row.
pub fn setdiff_nd<'py>(
    py: Python<'py>,
    a1: PyReadonlyArray2<isize>,
    a2: PyReadonlyArray2<isize>,
) -> PyResult<Py<PyArray2<isize>>> {
    let out = setdiff_rows(a1.as_array(), a2.as_array())?;
    Ok(out.into_pyarray_bound(py).unbind())
}
