use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::{CountdownError, CountdownResult};
use crate::foundation::math::flatten_premul_u8;

/// One rendered frame as straight-alpha RGBA8 pixels, tightly packed, row-major.
///
/// Bitmaps are immutable once built; the encoder only reads them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Bitmap {
    /// Wrap an RGBA8 buffer, checking its length against the dimensions.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> CountdownResult<Self> {
        let expected = Canvas { width, height }.rgba_len();
        if data.len() != expected {
            return Err(CountdownError::validation(format!(
                "bitmap buffer is {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Flatten a premultiplied pixmap over an opaque `backdrop`; every output pixel is opaque.
    pub(crate) fn from_premul_pixmap(pixmap: &vello_cpu::Pixmap, backdrop: Rgb8) -> Self {
        let mut data = pixmap.data_as_u8_slice().to_vec();
        for px in data.chunks_exact_mut(4) {
            let a = px[3];
            px[0] = flatten_premul_u8(px[0], a, backdrop.r);
            px[1] = flatten_premul_u8(px[1], a, backdrop.g);
            px[2] = flatten_premul_u8(px[2], a, backdrop.b);
            px[3] = 255;
        }
        Self {
            width: u32::from(pixmap.width()),
            height: u32::from(pixmap.height()),
            data,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as a [`Canvas`].
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Raw RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the bitmap, returning its RGBA8 bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Pixel at `(x, y)`, or `None` outside the bitmap.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// `true` when every pixel has full alpha.
    pub fn is_opaque(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 255)
    }

    /// Copy into an `image` buffer, e.g. for PNG output.
    pub fn to_rgba_image(&self) -> CountdownResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| CountdownError::validation("bitmap buffer does not match dimensions"))
    }
}
