use crate::capture::CaptureError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Buffer formats a frame reader can deliver.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
pub enum ImageFormat {
    #[default]
    Rgba8888,
    Rgbx8888,
    Rgb565,
}

impl ImageFormat {
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            ImageFormat::Rgba8888 | ImageFormat::Rgbx8888 => 4,
            ImageFormat::Rgb565 => 2,
        }
    }
}

/// A single captured frame handed out by a [`FrameReader`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    format: ImageFormat,
    pixels: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32, format: ImageFormat, pixels: Vec<u8>) -> Self {
        Self { width, height, format, pixels }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Rejected [`FrameReaderRequest`] parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("frame reader dimensions must be non-zero, got {width}x{height}")]
    EmptyDimensions { width: u32, height: u32 },
    #[error("frame reader needs at least one buffered image")]
    NoImages,
}

/// Geometry and buffering parameters a frame reader is opened with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameReaderRequest {
    width: u32,
    height: u32,
    format: ImageFormat,
    max_images: u32,
}

impl FrameReaderRequest {
    pub fn new(
        width: u32,
        height: u32,
        format: ImageFormat,
        max_images: u32,
    ) -> Result<Self, RequestError> {
        if width == 0 || height == 0 {
            return Err(RequestError::EmptyDimensions { width, height });
        }
        if max_images == 0 {
            return Err(RequestError::NoImages);
        }
        Ok(Self { width, height, format, max_images })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn max_images(&self) -> u32 {
        self.max_images
    }
}

/// Streams captured frames for one recording session.
pub trait FrameReader: Send + Sync {
    /// The parameters this reader was opened with.
    fn request(&self) -> FrameReaderRequest;

    /// Returns the most recent frame, discarding older buffered ones, or
    /// `None` when everything has already been consumed.
    fn acquire_latest_frame(&self) -> Result<Option<Frame>, CaptureError>;

    /// Releases the buffers backing this reader.
    fn close(&self);
}

impl std::fmt::Debug for dyn FrameReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameReader").field("request", &self.request()).finish()
    }
}

/// Trait implemented by capture backends to open frame readers.
pub trait FrameReaderProvider: Send + Sync {
    fn new_reader(
        &self,
        request: &FrameReaderRequest,
    ) -> Result<Arc<dyn FrameReader>, CaptureError>;
}

pub struct FrameReaderRegistration {
    pub provider: &'static dyn FrameReaderProvider,
}

inventory::collect!(FrameReaderRegistration);

pub fn frame_reader_providers() -> impl Iterator<Item = &'static dyn FrameReaderProvider> {
    inventory::iter::<FrameReaderRegistration>.into_iter().map(|entry| entry.provider)
}

#[macro_export]
macro_rules! register_frame_reader_provider {
    ($provider:expr) => {
        inventory::submit! {
            $crate::capture::FrameReaderRegistration { provider: $provider }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{CaptureError, CaptureErrorKind};
    use rstest::rstest;

    struct StubReader {
        request: FrameReaderRequest,
    }

    impl FrameReader for StubReader {
        fn request(&self) -> FrameReaderRequest {
            self.request
        }

        fn acquire_latest_frame(&self) -> Result<Option<Frame>, CaptureError> {
            Ok(None)
        }

        fn close(&self) {}
    }

    struct StubReaderProvider;

    impl FrameReaderProvider for StubReaderProvider {
        fn new_reader(
            &self,
            request: &FrameReaderRequest,
        ) -> Result<Arc<dyn FrameReader>, CaptureError> {
            if request.max_images() > 8 {
                return Err(CaptureError::new(
                    CaptureErrorKind::CapabilityUnavailable,
                    "too many buffered images",
                ));
            }
            Ok(Arc::new(StubReader { request: *request }))
        }
    }

    static PROVIDER: StubReaderProvider = StubReaderProvider;

    register_frame_reader_provider!(&PROVIDER);

    #[rstest]
    fn registration_exposes_provider() {
        let request = FrameReaderRequest::new(800, 600, ImageFormat::Rgba8888, 2).unwrap();
        let providers: Vec<_> = frame_reader_providers().collect();
        assert!(providers.iter().any(|provider| provider.new_reader(&request).is_ok()));
    }

    #[rstest]
    fn request_keeps_parameters() {
        let request = FrameReaderRequest::new(800, 600, ImageFormat::Rgb565, 2).unwrap();
        assert_eq!(request.width(), 800);
        assert_eq!(request.height(), 600);
        assert_eq!(request.format(), ImageFormat::Rgb565);
        assert_eq!(request.max_images(), 2);
    }

    #[rstest]
    #[case(0, 600)]
    #[case(800, 0)]
    #[case(0, 0)]
    fn request_rejects_empty_dimensions(#[case] width: u32, #[case] height: u32) {
        let err = FrameReaderRequest::new(width, height, ImageFormat::Rgba8888, 2).unwrap_err();
        assert_eq!(err, RequestError::EmptyDimensions { width, height });
    }

    #[rstest]
    fn request_rejects_zero_max_images() {
        let err = FrameReaderRequest::new(800, 600, ImageFormat::Rgba8888, 0).unwrap_err();
        assert_eq!(err, RequestError::NoImages);
    }

    #[rstest]
    fn frame_exposes_pixels() {
        let frame = Frame::new(2, 1, ImageFormat::Rgba8888, vec![0xAA; 8]);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 1);
        assert_eq!(frame.pixels().len(), 8);
        assert_eq!(
            frame.pixels().len(),
            (frame.width() * frame.height()) as usize * frame.format().bytes_per_pixel()
        );
    }
}
