/// Transport encoding for masks and generated images
///
/// Masks travel to the generation service as base64-encoded PNGs inside a
/// data URI; the generated image comes back the same way and is decoded
/// here into raw JPEG bytes for the caller to save.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::ImageFormat;

use crate::error::{EditError, Result};
use crate::mask::SelectionMask;

/// Data URI prefix prepended to the encoded mask PNG
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Encode a selection mask as a base64 PNG string.
///
/// The raster is serialized into an in-memory buffer, so concurrent
/// requests never share an intermediate file.
pub fn encode_mask_png(mask: &SelectionMask) -> Result<String> {
    let raster = mask.to_raster();

    let mut png_bytes = Vec::new();
    raster.write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)?;

    Ok(STANDARD.encode(&png_bytes))
}

/// Decode a generated-image data URI into raw image bytes.
///
/// The payload has the form `"<mime prefix>,<base64 data>"`; everything
/// after the first comma is base64-decoded. The decoded bytes are a
/// finished JPEG the caller writes to disk verbatim.
pub fn decode_result_payload(payload: &str) -> Result<Vec<u8>> {
    let (_prefix, encoded) = payload.split_once(',').ok_or_else(|| {
        EditError::PayloadDecode("result payload is missing its data URI prefix".to_string())
    })?;

    STANDARD
        .decode(encoded)
        .map_err(|e| EditError::PayloadDecode(format!("invalid base64 payload: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::{MASK_PIXELS, MASK_SIZE};

    #[test]
    fn test_encode_empty_mask_is_white_png() {
        let mask = SelectionMask::parse(&"0".repeat(MASK_PIXELS)).unwrap();
        let encoded = encode_mask_png(&mask).unwrap();

        let png_bytes = STANDARD.decode(&encoded).unwrap();
        let decoded = image::load_from_memory_with_format(&png_bytes, ImageFormat::Png)
            .unwrap()
            .to_rgb8();

        assert_eq!(decoded.dimensions(), (MASK_SIZE, MASK_SIZE));
        assert!(decoded.pixels().all(|pixel| pixel.0 == [255, 255, 255]));
    }

    #[test]
    fn test_encode_round_trips_raster_exactly() {
        // Checkerboard-ish pattern; PNG is lossless so the decoded raster
        // must match the original pixel for pixel.
        let bitstring: String = (0..MASK_PIXELS)
            .map(|i| if (i / 3) % 2 == 0 { '1' } else { '0' })
            .collect();
        let mask = SelectionMask::parse(&bitstring).unwrap();

        let encoded = encode_mask_png(&mask).unwrap();
        let png_bytes = STANDARD.decode(&encoded).unwrap();
        let decoded = image::load_from_memory_with_format(&png_bytes, ImageFormat::Png)
            .unwrap()
            .to_rgb8();

        assert_eq!(decoded, mask.to_raster());
    }

    #[test]
    fn test_decode_result_payload() {
        let payload = format!("data:image/jpeg;base64,{}", STANDARD.encode(b"jpeg bytes"));
        let decoded = decode_result_payload(&payload).unwrap();
        assert_eq!(decoded, b"jpeg bytes");
    }

    #[test]
    fn test_decode_rejects_missing_prefix() {
        let result = decode_result_payload("no-comma-here");
        assert!(matches!(result, Err(EditError::PayloadDecode(_))));
    }

    #[test]
    fn test_decode_rejects_bad_base64() {
        let result = decode_result_payload("data:image/jpeg;base64,!!!not-base64!!!");
        assert!(matches!(result, Err(EditError::PayloadDecode(_))));
    }
}
