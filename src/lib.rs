use pyo3::prelude::*;
pub mod exceptions;
pub mod coordinates;
pub mod array;
pub mod setdiff;
pub mod grid;
pub mod neighbors;

/// A Python module implemented in Rust.
#[pymodule]
fn _densityclust_ext(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Add __version__
    let mut version = env!("CARGO_PKG_VERSION").to_string();
    version = version.replace("-alpha", "a").replace("-beta", "b");
    m.add("__version__", version)?;

    m.add_class::<grid::Grid>()?;
    m.add_function(pyo3::wrap_pyfunction!(grid::get_xyz, m)?)?;
    m.add_function(pyo3::wrap_pyfunction!(setdiff::setdiff_nd, m)?)?;
    m.add_function(pyo3::wrap_pyfunction!(neighbors::kc_coord_2d, m)?)?;
    m.add_function(pyo3::wrap_pyfunction!(neighbors::kc_coord_3d, m)?)?;
    m.add_function(pyo3::wrap_pyfunction!(neighbors::kc_index_2d, m)?)?;
    m.add_function(pyo3::wrap_pyfunction!(neighbors::kc_index_2d_many, m)?)?;
    m.add_function(pyo3::wrap_pyfunction!(neighbors::kc_index_3d_many, m)?)?;
    m.add_function(pyo3::wrap_pyfunction!(coordinates::dist_xyz, m)?)?;
    Ok(())
}
