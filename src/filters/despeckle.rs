//! Selective median despeckle filter.
//!
//! Replaces a pixel with the median of its spatial neighborhood when the
//! pixel deviates too far from that median, and leaves it alone otherwise.
//! Uniform regions and genuine edges pass through; isolated impulse noise
//! ("speckles", salt-and-pepper) is removed.
//!
//! The pass is data-parallel: the input buffer is shared read-only and every
//! worker writes only its own output rows.
//!
//! Both u8 (0-255) and f32 modes are supported. Flat row-major slices are
//! the primary interface; `ndarray` wrappers are provided for callers that
//! already hold 2-D arrays.

use ndarray::{Array2, ArrayView2};
use rayon::prelude::*;

use crate::error::DespeckleError;
use crate::filters::core::{neighbor_values_f32, neighbor_values_u8};
use crate::filters::median::{median_f32, median_u8};

// ============================================================================
// Parameters
// ============================================================================

/// Tuning parameters for the despeckle pass.
#[derive(Clone, Copy, Debug)]
pub struct DespeckleParams {
    /// Neighborhood radius in grid steps.
    pub reach: usize,
    /// Relative-deviation threshold above which a pixel is replaced.
    pub beta: f32,
}

impl DespeckleParams {
    /// Create parameters with an explicit reach and threshold.
    pub fn new(reach: usize, beta: f32) -> Self {
        DespeckleParams { reach, beta }
    }
}

impl Default for DespeckleParams {
    fn default() -> Self {
        DespeckleParams {
            reach: 2,
            beta: 0.2,
        }
    }
}

fn validate_dimensions(len: usize, width: usize, height: usize) -> Result<(), DespeckleError> {
    if width == 0 || height == 0 {
        return Err(DespeckleError::EmptyDimensions { width, height });
    }
    if len != width * height {
        return Err(DespeckleError::DimensionMismatch { len, width, height });
    }
    Ok(())
}

// ============================================================================
// Despeckle - flat buffers
// ============================================================================

/// Despeckle a row-major pixel buffer - u8 version.
///
/// For every pixel the median of its neighborhood is computed; the pixel is
/// replaced by that median (rounded to the nearest intensity) when
/// `|pixel - median| / (pixel + 0.1)` exceeds `beta`. The input buffer is
/// never mutated; a fresh output buffer is returned.
///
/// # Arguments
/// * `pixels` - Row-major intensity buffer of length `width * height`
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `params` - Neighborhood reach and replacement threshold
///
/// # Returns
/// The despeckled buffer, or an error when the dimensions are zero or do
/// not match the buffer length
pub fn despeckle_u8(
    pixels: &[u8],
    width: usize,
    height: usize,
    params: &DespeckleParams,
) -> Result<Vec<u8>, DespeckleError> {
    validate_dimensions(pixels.len(), width, height)?;

    let mut output = pixels.to_vec();
    output
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, out_row)| {
            for col in 0..width {
                let index = row * width + col;
                let neighbors = neighbor_values_u8(index, width, height, pixels, params.reach);
                let med = median_u8(&neighbors)
                    .expect("neighborhood always contains the center pixel");

                let value = pixels[index] as f32;
                if (value - med).abs() / (value + 0.1) > params.beta {
                    out_row[col] = med.round().clamp(0.0, 255.0) as u8;
                }
            }
        });

    Ok(output)
}

/// Despeckle a row-major pixel buffer - f32 version.
///
/// Same pass as [`despeckle_u8`] with exact float output: replaced pixels
/// carry the neighborhood median unrounded. The deviation bias term `0.1`
/// is absolute, so intensities are expected in their native range rather
/// than normalized to 0-1.
///
/// # Arguments
/// * `pixels` - Row-major intensity buffer of length `width * height`
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `params` - Neighborhood reach and replacement threshold
///
/// # Returns
/// The despeckled buffer, or an error when the dimensions are zero or do
/// not match the buffer length
pub fn despeckle_f32(
    pixels: &[f32],
    width: usize,
    height: usize,
    params: &DespeckleParams,
) -> Result<Vec<f32>, DespeckleError> {
    validate_dimensions(pixels.len(), width, height)?;

    let mut output = pixels.to_vec();
    output
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, out_row)| {
            for col in 0..width {
                let index = row * width + col;
                let neighbors = neighbor_values_f32(index, width, height, pixels, params.reach);
                let med = median_f32(&neighbors)
                    .expect("neighborhood always contains the center pixel");

                let value = pixels[index];
                if (value - med).abs() / (value + 0.1) > params.beta {
                    out_row[col] = med;
                }
            }
        });

    Ok(output)
}

// ============================================================================
// Despeckle - ndarray wrappers
// ============================================================================

/// Despeckle a 2-D intensity array - u8 version.
///
/// # Arguments
/// * `input` - Grayscale image of shape (height, width)
/// * `params` - Neighborhood reach and replacement threshold
///
/// # Returns
/// Despeckled image with the same shape
pub fn despeckle_array_u8(input: ArrayView2<u8>, params: &DespeckleParams) -> Array2<u8> {
    let (height, width) = input.dim();
    if height == 0 || width == 0 {
        return input.to_owned();
    }

    let flat: Vec<u8> = input.iter().copied().collect();
    let result = despeckle_u8(&flat, width, height, params)
        .expect("view dimensions are consistent");
    Array2::from_shape_vec((height, width), result)
        .expect("output length matches input shape")
}

/// Despeckle a 2-D intensity array - f32 version.
///
/// # Arguments
/// * `input` - Grayscale image of shape (height, width)
/// * `params` - Neighborhood reach and replacement threshold
///
/// # Returns
/// Despeckled image with the same shape
pub fn despeckle_array_f32(input: ArrayView2<f32>, params: &DespeckleParams) -> Array2<f32> {
    let (height, width) = input.dim();
    if height == 0 || width == 0 {
        return input.to_owned();
    }

    let flat: Vec<f32> = input.iter().copied().collect();
    let result = despeckle_f32(&flat, width, height, params)
        .expect("view dimensions are consistent");
    Array2::from_shape_vec((height, width), result)
        .expect("output length matches input shape")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn test_uniform_buffer_unchanged() {
        let pixels = vec![42u8; 16];

        for beta in [0.0, 0.2, 10.0] {
            let result =
                despeckle_u8(&pixels, 4, 4, &DespeckleParams::new(2, beta)).unwrap();
            assert_eq!(result, pixels);
        }
    }

    #[test]
    fn test_outlier_replaced_with_small_beta() {
        let pixels = vec![10u8, 10, 10, 10, 100, 10, 10, 10, 10];

        let result = despeckle_u8(&pixels, 3, 3, &DespeckleParams::new(1, 0.2)).unwrap();

        assert_eq!(result, vec![10u8; 9]);
    }

    #[test]
    fn test_outlier_kept_with_large_beta() {
        let pixels = vec![10u8, 10, 10, 10, 100, 10, 10, 10, 10];

        let result = despeckle_u8(&pixels, 3, 3, &DespeckleParams::new(1, 10.0)).unwrap();

        assert_eq!(result, pixels);
    }

    #[test]
    fn test_input_buffer_untouched() {
        let pixels = vec![10u8, 10, 10, 10, 100, 10, 10, 10, 10];
        let snapshot = pixels.clone();

        let _ = despeckle_u8(&pixels, 3, 3, &DespeckleParams::default()).unwrap();

        assert_eq!(pixels, snapshot);
    }

    #[test]
    fn test_f32_outlier_replaced() {
        let pixels = vec![10.0f32, 10.0, 10.0, 10.0, 100.0, 10.0, 10.0, 10.0, 10.0];

        let result = despeckle_f32(&pixels, 3, 3, &DespeckleParams::new(1, 0.2)).unwrap();

        assert_eq!(result, vec![10.0f32; 9]);
    }

    #[test]
    fn test_f32_uniform_unchanged() {
        let pixels = vec![0.5f32; 9];

        let result = despeckle_f32(&pixels, 3, 3, &DespeckleParams::default()).unwrap();

        assert_eq!(result, pixels);
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let pixels = vec![0u8; 8];

        assert!(matches!(
            despeckle_u8(&pixels, 3, 3, &DespeckleParams::default()),
            Err(DespeckleError::DimensionMismatch { len: 8, .. })
        ));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            despeckle_u8(&[], 0, 3, &DespeckleParams::default()),
            Err(DespeckleError::EmptyDimensions { .. })
        ));
        assert!(matches!(
            despeckle_u8(&[], 3, 0, &DespeckleParams::default()),
            Err(DespeckleError::EmptyDimensions { .. })
        ));
    }

    #[test]
    fn test_default_params() {
        let params = DespeckleParams::default();
        assert_eq!(params.reach, 2);
        assert_eq!(params.beta, 0.2);
    }

    #[test]
    fn test_reach_zero_is_identity() {
        // A pixel never deviates from itself.
        let pixels = vec![10u8, 200, 30, 40, 5, 60, 70, 80, 90];

        let result = despeckle_u8(&pixels, 3, 3, &DespeckleParams::new(0, 0.0)).unwrap();

        assert_eq!(result, pixels);
    }

    #[test]
    fn test_edge_outlier_replaced() {
        // Outlier on a border pixel: its clipped neighborhood still votes it out.
        let pixels = vec![10u8, 10, 10, 100, 10, 10, 10, 10, 10, 10, 10, 10];

        let result = despeckle_u8(&pixels, 4, 3, &DespeckleParams::new(1, 0.2)).unwrap();

        assert_eq!(result, vec![10u8; 12]);
    }

    #[test]
    fn test_array_wrapper_matches_flat() {
        let pixels = vec![10u8, 10, 10, 10, 100, 10, 10, 10, 10];
        let image = Array2::from_shape_vec((3, 3), pixels.clone()).unwrap();
        let params = DespeckleParams::new(1, 0.2);

        let from_array = despeckle_array_u8(image.view(), &params);
        let from_flat = despeckle_u8(&pixels, 3, 3, &params).unwrap();

        assert_eq!(from_array.into_raw_vec_and_offset().0, from_flat);
    }

    #[test]
    fn test_array_wrapper_empty_input() {
        let image = Array2::<f32>::zeros((0, 4));

        let result = despeckle_array_f32(image.view(), &DespeckleParams::default());

        assert_eq!(result.dim(), (0, 4));
    }
}
