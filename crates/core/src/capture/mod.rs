mod bitmap;
mod error;
mod reader;

pub use bitmap::{
    Bitmap, BitmapFactory, BitmapFactoryRegistration, PixelConfig, bitmap_factories,
};
pub use error::{CaptureError, CaptureErrorKind};
pub use reader::{
    Frame, FrameReader, FrameReaderProvider, FrameReaderRegistration, FrameReaderRequest,
    ImageFormat, RequestError, frame_reader_providers,
};

pub use crate::register_bitmap_factory;
pub use crate::register_frame_reader_provider;
