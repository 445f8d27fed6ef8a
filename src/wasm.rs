//! WebAssembly exports for the despeckle filters.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Images are
//! passed as flat row-major arrays together with their dimensions.

use wasm_bindgen::prelude::*;

use crate::filters::despeckle::{despeckle_f32, despeckle_u8, DespeckleParams};

// ============================================================================
// Despeckle - u8 (8-bit)
// ============================================================================

/// Despeckle a grayscale u8 image.
///
/// # Arguments
/// * `data` - Flat array of intensity bytes (length = width * height)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `reach` - Neighborhood radius in grid steps
/// * `beta` - Relative-deviation replacement threshold
///
/// # Returns
/// Flat array of despeckled intensity bytes
#[wasm_bindgen]
pub fn despeckle_wasm(data: &[u8], width: usize, height: usize, reach: usize, beta: f32) -> Vec<u8> {
    despeckle_u8(data, width, height, &DespeckleParams::new(reach, beta))
        .expect("Invalid dimensions")
}

// ============================================================================
// Despeckle - f32 (float)
// ============================================================================

/// Despeckle a grayscale f32 image.
///
/// # Arguments
/// * `data` - Flat array of intensity floats (length = width * height)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `reach` - Neighborhood radius in grid steps
/// * `beta` - Relative-deviation replacement threshold
///
/// # Returns
/// Flat array of despeckled intensity floats
#[wasm_bindgen]
pub fn despeckle_f32_wasm(
    data: &[f32],
    width: usize,
    height: usize,
    reach: usize,
    beta: f32,
) -> Vec<f32> {
    despeckle_f32(data, width, height, &DespeckleParams::new(reach, beta))
        .expect("Invalid dimensions")
}
