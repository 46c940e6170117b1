use smartclick_core::capture::{
    Bitmap, BitmapFactory, CaptureError, CaptureErrorKind, PixelConfig,
};
use smartclick_core::register_bitmap_factory;
use std::sync::{Arc, Mutex, RwLock};

static MOCK_BITMAP_CREATOR: MockBitmapCreator = MockBitmapCreator::new();

register_bitmap_factory!(&MOCK_BITMAP_CREATOR);

/// Bitmap double whose getters report whatever was last stamped onto it.
#[derive(Debug, Default)]
pub struct MockBitmap {
    stubs: Mutex<BitmapStubs>,
}

#[derive(Debug, Default, Clone, Copy)]
struct BitmapStubs {
    width: u32,
    height: u32,
    config: PixelConfig,
}

impl MockBitmap {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn stub_width(&self, width: u32) {
        self.stubs.lock().expect("bitmap stubs poisoned").width = width;
    }

    pub fn stub_height(&self, height: u32) {
        self.stubs.lock().expect("bitmap stubs poisoned").height = height;
    }

    pub fn stub_config(&self, config: PixelConfig) {
        self.stubs.lock().expect("bitmap stubs poisoned").config = config;
    }
}

impl Bitmap for MockBitmap {
    fn width(&self) -> u32 {
        self.stubs.lock().expect("bitmap stubs poisoned").width
    }

    fn height(&self) -> u32 {
        self.stubs.lock().expect("bitmap stubs poisoned").height
    }

    fn config(&self) -> PixelConfig {
        self.stubs.lock().expect("bitmap stubs poisoned").config
    }
}

/// Capability a test installs to satisfy intercepted bitmap allocations.
pub trait MockBitmapFactory: Send + Sync {
    fn create(&self, width: u32, height: u32, config: PixelConfig) -> Arc<MockBitmap>;

    fn create_region(
        &self,
        source: &Arc<dyn Bitmap>,
        left: u32,
        top: u32,
        width: u32,
        height: u32,
    ) -> Arc<MockBitmap>;
}

/// Factory returning a fresh, unstubbed [`MockBitmap`] per call.
#[derive(Debug, Default)]
pub struct FreshBitmapFactory;

impl MockBitmapFactory for FreshBitmapFactory {
    fn create(&self, _width: u32, _height: u32, _config: PixelConfig) -> Arc<MockBitmap> {
        MockBitmap::new()
    }

    fn create_region(
        &self,
        _source: &Arc<dyn Bitmap>,
        _left: u32,
        _top: u32,
        _width: u32,
        _height: u32,
    ) -> Arc<MockBitmap> {
        MockBitmap::new()
    }
}

struct MockBitmapCreator {
    factory: RwLock<Option<Arc<dyn MockBitmapFactory>>>,
}

impl MockBitmapCreator {
    const fn new() -> Self {
        Self { factory: RwLock::new(None) }
    }

    fn delegate(&self) -> Result<Arc<dyn MockBitmapFactory>, CaptureError> {
        self.factory.read().expect("bitmap factory slot poisoned").clone().ok_or_else(|| {
            CaptureError::new(
                CaptureErrorKind::MockNotRegistered,
                "no mock bitmap factory installed",
            )
        })
    }
}

impl BitmapFactory for MockBitmapCreator {
    fn create_bitmap(
        &self,
        width: u32,
        height: u32,
        config: PixelConfig,
    ) -> Result<Arc<dyn Bitmap>, CaptureError> {
        let mock = self.delegate()?.create(width, height, config);
        mock.stub_width(width);
        mock.stub_height(height);
        mock.stub_config(config);
        tracing::debug!(width, height, ?config, "mock bitmap created");
        Ok(mock)
    }

    fn create_bitmap_region(
        &self,
        source: &Arc<dyn Bitmap>,
        left: u32,
        top: u32,
        width: u32,
        height: u32,
    ) -> Result<Arc<dyn Bitmap>, CaptureError> {
        let mock = self.delegate()?.create_region(source, left, top, width, height);
        mock.stub_width(width);
        mock.stub_height(height);
        tracing::debug!(left, top, width, height, "mock bitmap cropped");
        Ok(mock)
    }
}

/// Installs the factory consulted by intercepted bitmap allocations.
pub fn set_mock_bitmap_factory(factory: Arc<dyn MockBitmapFactory>) {
    *MOCK_BITMAP_CREATOR.factory.write().expect("bitmap factory slot poisoned") = Some(factory);
}

/// Clears the installed factory. Intended for per-test teardown; a later
/// allocation without a newly installed factory fails again.
pub fn reset_bitmap_creator() {
    *MOCK_BITMAP_CREATOR.factory.write().expect("bitmap factory slot poisoned") = None;
}

/// The interception point, for explicit injection into code under test.
pub fn bitmap_creator() -> &'static dyn BitmapFactory {
    &MOCK_BITMAP_CREATOR
}

pub struct BitmapFactoryGuard {
    previous: Option<Arc<dyn MockBitmapFactory>>,
}

impl Drop for BitmapFactoryGuard {
    fn drop(&mut self) {
        *MOCK_BITMAP_CREATOR.factory.write().expect("bitmap factory slot poisoned") =
            self.previous.take();
    }
}

/// Installs a factory for the current scope, restoring the previous one on
/// drop.
pub fn install_mock_bitmap_factory(factory: Arc<dyn MockBitmapFactory>) -> BitmapFactoryGuard {
    let mut slot = MOCK_BITMAP_CREATOR.factory.write().expect("bitmap factory slot poisoned");
    let previous = slot.replace(factory);
    BitmapFactoryGuard { previous }
}
