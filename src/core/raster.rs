use image::{ColorType, DynamicImage, GenericImageView};

/// A decoded image held in memory.
///
/// Owned by whichever pipeline stage is working on it; operations take a shared
/// reference and return a new raster rather than editing in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    image: DynamicImage,
}

impl Raster {
    pub fn new(image: DynamicImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Colour model of the pixel buffer.
    pub fn color_model(&self) -> ColorType {
        self.image.color()
    }

    /// Raw pixel bytes in the raster's native layout.
    pub fn pixels(&self) -> &[u8] {
        self.image.as_bytes()
    }

    pub fn as_image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn into_image(self) -> DynamicImage {
        self.image
    }
}

impl From<DynamicImage> for Raster {
    fn from(image: DynamicImage) -> Self {
        Self::new(image)
    }
}
