use eyre::WrapErr;

/// A decoded photo cut: tightly packed RGB8 pixels.
///
/// Decoded once at startup from the bytes the feed delivered; read-only
/// while the render loop samples it.
pub struct Photo {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Photo {
    pub fn decode(bytes: &[u8]) -> eyre::Result<Self> {
        let decoded = image::load_from_memory(bytes).wrap_err("decoding photo")?;
        let rgb = decoded.to_rgb8();

        Ok(Self {
            width: rgb.width(),
            height: rgb.height(),
            pixels: rgb.into_raw(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `x` and `y` must be inside the image.
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let offset = ((y * self.width + x) * 3) as usize;
        (
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn decodes_png_bytes_to_rgb() {
        let mut source = image::RgbImage::new(2, 2);
        source.put_pixel(0, 0, image::Rgb([255, 0, 0]));
        source.put_pixel(1, 0, image::Rgb([0, 255, 0]));
        source.put_pixel(0, 1, image::Rgb([0, 0, 255]));
        source.put_pixel(1, 1, image::Rgb([10, 20, 30]));

        let mut bytes = Vec::new();
        source
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let photo = Photo::decode(&bytes).unwrap();
        assert_eq!(photo.width(), 2);
        assert_eq!(photo.height(), 2);
        assert_eq!(photo.pixel(0, 0), (255, 0, 0));
        assert_eq!(photo.pixel(1, 1), (10, 20, 30));
    }

    #[test]
    fn rejects_garbage_bytes() {
        assert!(Photo::decode(b"not an image").is_err());
    }
}
