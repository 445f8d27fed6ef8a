//! Despeckle
//!
//! Selective median denoising for grayscale images, with Python bindings
//! via PyO3 and WASM bindings for JavaScript.
//!
//! ## Image Format
//!
//! Images are single-channel intensity grids, handled either as flat
//! row-major buffers plus dimensions or as 2-D `ndarray` arrays of shape
//! (height, width). Both bit depths are supported:
//! - `u8`: 8-bit intensities (0-255)
//! - `f32`: float intensities, native range
//!
//! ## Filter Architecture
//!
//! A pixel is replaced by the median of its spatial neighborhood only when
//! it deviates from that median by more than a relative threshold, so flat
//! regions and real edges survive while impulse noise is removed. The pass
//! never mutates its input and returns a freshly allocated buffer.
//!
//! A minimal plain-text loader ([`pnm::PnmImage`]) turns ASCII pixel
//! streams into buffers the filters accept.

pub mod error;
pub mod filters;
pub mod pnm;

#[cfg(feature = "wasm")]
pub mod wasm;

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray2, PyReadonlyArray2};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::filters::despeckle::{despeckle_array_f32, despeckle_array_u8, DespeckleParams};
    use crate::filters::median::{median_f32 as median_f32_impl, median_u8 as median_u8_impl};

    // ========================================================================
    // Despeckle Filter
    // ========================================================================

    /// Despeckle a grayscale u8 image.
    ///
    /// A pixel is replaced by its neighborhood median when its relative
    /// deviation from that median exceeds `beta`.
    ///
    /// # Arguments
    /// * `image` - Grayscale image (height, width)
    /// * `reach` - Neighborhood radius in grid steps (default: 2)
    /// * `beta` - Relative-deviation threshold (default: 0.2)
    #[pyfunction]
    #[pyo3(signature = (image, reach=2, beta=0.2))]
    pub fn despeckle_image<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u8>,
        reach: usize,
        beta: f32,
    ) -> Bound<'py, PyArray2<u8>> {
        let input = image.as_array();
        let result = despeckle_array_u8(input, &DespeckleParams::new(reach, beta));
        result.into_pyarray(py)
    }

    /// Despeckle a grayscale f32 image.
    ///
    /// Replaced pixels carry the neighborhood median unrounded.
    ///
    /// # Arguments
    /// * `image` - Grayscale image (height, width)
    /// * `reach` - Neighborhood radius in grid steps (default: 2)
    /// * `beta` - Relative-deviation threshold (default: 0.2)
    #[pyfunction]
    #[pyo3(signature = (image, reach=2, beta=0.2))]
    pub fn despeckle_image_f32<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, f32>,
        reach: usize,
        beta: f32,
    ) -> Bound<'py, PyArray2<f32>> {
        let input = image.as_array();
        let result = despeckle_array_f32(input, &DespeckleParams::new(reach, beta));
        result.into_pyarray(py)
    }

    // ========================================================================
    // Median
    // ========================================================================

    /// Median of a sequence of u8 intensities.
    ///
    /// Raises ValueError for an empty sequence.
    #[pyfunction]
    pub fn median(values: Vec<u8>) -> PyResult<f32> {
        median_u8_impl(&values).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Median of a sequence of f32 intensities.
    ///
    /// Raises ValueError for an empty sequence.
    #[pyfunction]
    pub fn median_f32(values: Vec<f32>) -> PyResult<f32> {
        median_f32_impl(&values).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Despeckle Python extension module
    #[pymodule]
    pub fn despeckle(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(despeckle_image, m)?)?;
        m.add_function(wrap_pyfunction!(despeckle_image_f32, m)?)?;
        m.add_function(wrap_pyfunction!(median, m)?)?;
        m.add_function(wrap_pyfunction!(median_f32, m)?)?;

        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::despeckle;
