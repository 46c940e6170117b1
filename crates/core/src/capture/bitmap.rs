use crate::capture::CaptureError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Pixel layouts a bitmap can be allocated with.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
pub enum PixelConfig {
    #[default]
    Argb8888,
    Rgb565,
    Alpha8,
    RgbaF16,
}

impl PixelConfig {
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelConfig::Argb8888 => 4,
            PixelConfig::Rgb565 => 2,
            PixelConfig::Alpha8 => 1,
            PixelConfig::RgbaF16 => 8,
        }
    }
}

/// Screen content held in memory, as handed to the processing pipeline.
pub trait Bitmap: Send + Sync {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn config(&self) -> PixelConfig;
}

impl std::fmt::Debug for dyn Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("config", &self.config())
            .finish()
    }
}

/// Trait implemented by capture backends to allocate bitmaps.
pub trait BitmapFactory: Send + Sync {
    /// Allocates a bitmap with the given dimensions and pixel layout.
    fn create_bitmap(
        &self,
        width: u32,
        height: u32,
        config: PixelConfig,
    ) -> Result<Arc<dyn Bitmap>, CaptureError>;

    /// Allocates a bitmap holding the given region of `source`.
    fn create_bitmap_region(
        &self,
        source: &Arc<dyn Bitmap>,
        left: u32,
        top: u32,
        width: u32,
        height: u32,
    ) -> Result<Arc<dyn Bitmap>, CaptureError>;
}

pub struct BitmapFactoryRegistration {
    pub factory: &'static dyn BitmapFactory,
}

inventory::collect!(BitmapFactoryRegistration);

pub fn bitmap_factories() -> impl Iterator<Item = &'static dyn BitmapFactory> {
    inventory::iter::<BitmapFactoryRegistration>.into_iter().map(|entry| entry.factory)
}

#[macro_export]
macro_rules! register_bitmap_factory {
    ($factory:expr) => {
        inventory::submit! {
            $crate::capture::BitmapFactoryRegistration { factory: $factory }
        }
    };
}
