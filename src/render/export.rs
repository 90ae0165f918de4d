use crate::error::{QrError, QrResult};
use image::{EncodableLayout, ImageBuffer, ImageOutputFormat, PixelWithColorType};
use std::io::Cursor;

/// Encode any 8-bit RGB/RGBA/luma buffer as PNG bytes.
pub fn to_png<P>(image: &ImageBuffer<P, Vec<P::Subpixel>>) -> QrResult<Vec<u8>>
where
    P: PixelWithColorType,
    [P::Subpixel]: EncodableLayout,
{
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageOutputFormat::Png)
        .map_err(QrError::Export)?;
    Ok(out.into_inner())
}
