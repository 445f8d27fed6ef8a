//! Plain-text pixel-buffer loader.
//!
//! Reads the minimal ASCII grid format the despeckle pass ingests: a
//! format-marker line (ignored), a `width height maxval` header, then
//! whitespace-separated integer samples in row-major order. Line breaks
//! inside the sample stream carry no meaning.
//!
//! Grayscale sources stored with three identical channels per pixel are
//! reduced to a single channel here, so the filters only ever see one
//! intensity per pixel.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use crate::error::DespeckleError;

/// A decoded single-channel image.
#[derive(Clone, Debug)]
pub struct PnmImage {
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Largest sample value declared by the header.
    pub max_value: u32,
    /// Row-major intensity buffer, one sample per pixel.
    pub pixels: Vec<u8>,
}

impl PnmImage {
    /// Decode an image from a buffered reader.
    ///
    /// The first non-empty line is the format marker and is skipped wholly.
    /// Channel count is inferred from the sample count: `width * height`
    /// samples are taken as-is, `3 * width * height` samples are reduced to
    /// the first sample of each triple.
    ///
    /// # Arguments
    /// * `reader` - Source of the ASCII pixel stream
    ///
    /// # Returns
    /// The decoded image, or an error describing the malformed input
    pub fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, DespeckleError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;

        let mut lines = text.lines().skip_while(|line| line.trim().is_empty());
        // Format marker line, ignored.
        if lines.next().is_none() {
            return Err(DespeckleError::MissingHeader);
        }

        let mut tokens = lines.flat_map(str::split_whitespace);
        let width: usize = parse_token(tokens.next())?;
        let height: usize = parse_token(tokens.next())?;
        let max_value: u32 = parse_token(tokens.next())?;

        if width == 0 || height == 0 {
            return Err(DespeckleError::EmptyDimensions { width, height });
        }
        if max_value == 0 || max_value > 255 {
            return Err(DespeckleError::UnsupportedMaxValue(max_value));
        }

        let mut samples = Vec::with_capacity(width * height);
        for token in tokens {
            let value: u8 = token
                .parse()
                .map_err(|_| DespeckleError::InvalidToken(token.to_string()))?;
            samples.push(value);
        }

        let expected = width * height;
        let pixels = if samples.len() == expected {
            samples
        } else if samples.len() == expected * 3 {
            // Grayscale stored as identical RGB triples: keep one channel.
            samples.into_iter().step_by(3).collect()
        } else {
            return Err(DespeckleError::ChannelCount {
                found: samples.len(),
                expected,
            });
        };

        Ok(PnmImage {
            width,
            height,
            max_value,
            pixels,
        })
    }

    /// Decode an image from a file on disk.
    ///
    /// # Arguments
    /// * `path` - Path to the ASCII image file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DespeckleError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}

fn parse_token<T: FromStr>(token: Option<&str>) -> Result<T, DespeckleError> {
    let token = token.ok_or(DespeckleError::MissingHeader)?;
    token
        .parse()
        .map_err(|_| DespeckleError::InvalidToken(token.to_string()))
}
