/// Selection masks drawn by the client
///
/// A mask arrives as a flat bitstring, one character per pixel, and is
/// rendered into a two-color raster before being shipped to the remote
/// generator as a PNG.

mod codec;

pub use codec::{decode_result_payload, encode_mask_png, PNG_DATA_URI_PREFIX};

use image::{Rgb, RgbImage};

use crate::error::{EditError, Result};

/// Mask edge length in pixels (masks are square)
pub const MASK_SIZE: u32 = 256;

/// Total number of pixels in a mask bitstring
pub const MASK_PIXELS: usize = (MASK_SIZE as usize) * (MASK_SIZE as usize);

/// Color for unselected ('0') pixels
const BACKGROUND_COLOR: [u8; 3] = [255, 255, 255];

/// Color for selected ('1') pixels
const SELECTED_COLOR: [u8; 3] = [11, 198, 212];

/// A validated 256x256 binary selection mask.
///
/// Parsed from a row-major bitstring of '0' (unselected) and '1'
/// (selected) characters. Any other character or length is rejected at
/// parse time, so a constructed mask is always well-formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionMask {
    bits: Vec<bool>,
}

impl SelectionMask {
    /// Parse a mask from its bitstring representation.
    ///
    /// # Arguments
    /// * `bitstring` - Row-major string of exactly 65536 '0'/'1' characters
    ///
    /// # Returns
    /// * `Ok(SelectionMask)` - The validated mask
    /// * `Err(EditError::InvalidMaskCharacter)` - A character was neither '0' nor '1'
    /// * `Err(EditError::InvalidMaskLength)` - The string was not 65536 characters
    pub fn parse(bitstring: &str) -> Result<Self> {
        let mut bits = Vec::with_capacity(MASK_PIXELS);

        for (index, ch) in bitstring.chars().enumerate() {
            match ch {
                '0' => bits.push(false),
                '1' => bits.push(true),
                found => return Err(EditError::InvalidMaskCharacter { index, found }),
            }
        }

        if bits.len() != MASK_PIXELS {
            return Err(EditError::InvalidMaskLength {
                expected: MASK_PIXELS,
                found: bits.len(),
            });
        }

        Ok(SelectionMask { bits })
    }

    /// Whether the pixel at (row, col) is selected.
    pub fn is_selected(&self, row: u32, col: u32) -> bool {
        self.bits[(row * MASK_SIZE + col) as usize]
    }

    /// Number of selected pixels in the mask.
    pub fn selected_count(&self) -> usize {
        self.bits.iter().filter(|&&bit| bit).count()
    }

    /// Render the mask as a two-color RGB raster.
    ///
    /// Unselected pixels become white, selected pixels the accent color
    /// the generation service expects.
    pub fn to_raster(&self) -> RgbImage {
        let mut raster = RgbImage::new(MASK_SIZE, MASK_SIZE);

        for row in 0..MASK_SIZE {
            for col in 0..MASK_SIZE {
                let color = if self.is_selected(row, col) {
                    SELECTED_COLOR
                } else {
                    BACKGROUND_COLOR
                };
                raster.put_pixel(col, row, Rgb(color));
            }
        }

        raster
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_mask() {
        let mask = SelectionMask::parse(&"0".repeat(MASK_PIXELS)).unwrap();
        assert_eq!(mask.selected_count(), 0);

        let mask = SelectionMask::parse(&"1".repeat(MASK_PIXELS)).unwrap();
        assert_eq!(mask.selected_count(), MASK_PIXELS);
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        let result = SelectionMask::parse("0101");
        assert!(matches!(
            result,
            Err(EditError::InvalidMaskLength {
                expected: MASK_PIXELS,
                found: 4
            })
        ));
    }

    #[test]
    fn test_parse_rejects_bad_character() {
        let mut bitstring = "0".repeat(MASK_PIXELS);
        bitstring.replace_range(10..11, "x");

        let result = SelectionMask::parse(&bitstring);
        assert!(matches!(
            result,
            Err(EditError::InvalidMaskCharacter {
                index: 10,
                found: 'x'
            })
        ));
    }

    #[test]
    fn test_raster_is_row_major() {
        // Select the first pixel of the second row (flat index 256)
        let mut bitstring = "0".repeat(MASK_PIXELS);
        bitstring.replace_range(256..257, "1");

        let mask = SelectionMask::parse(&bitstring).unwrap();
        let raster = mask.to_raster();

        assert_eq!(raster.get_pixel(0, 1).0, SELECTED_COLOR);
        assert_eq!(raster.get_pixel(1, 0).0, BACKGROUND_COLOR);
    }

    #[test]
    fn test_empty_mask_rasters_to_white() {
        let mask = SelectionMask::parse(&"0".repeat(MASK_PIXELS)).unwrap();
        let raster = mask.to_raster();

        assert_eq!(raster.dimensions(), (MASK_SIZE, MASK_SIZE));
        assert!(raster.pixels().all(|pixel| pixel.0 == BACKGROUND_COLOR));
    }
}
