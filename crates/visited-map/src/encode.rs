//! PNG encoding of the finished canvas.

use tiny_skia::Pixmap;

use crate::error::MapError;

/// Serialize the canvas to PNG bytes.
///
/// The output depends only on the pixels: no timestamps or other
/// metadata chunks are written, so identical canvases give identical bytes.
pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>, MapError> {
    pixmap
        .encode_png()
        .map_err(|e| MapError::Encode(e.to_string()))
}
