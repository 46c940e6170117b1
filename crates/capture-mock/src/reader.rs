use smartclick_core::capture::{
    CaptureError, CaptureErrorKind, Frame, FrameReader, FrameReaderProvider, FrameReaderRequest,
};
use smartclick_core::register_frame_reader_provider;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

static MOCK_READER_PROVIDER: MockReaderProvider = MockReaderProvider::new();

register_frame_reader_provider!(&MOCK_READER_PROVIDER);

/// Frame reader double fed by the test author.
#[derive(Debug)]
pub struct MockFrameReader {
    request: FrameReaderRequest,
    frames: Mutex<Vec<Frame>>,
    close_count: AtomicUsize,
}

impl MockFrameReader {
    pub fn new(request: FrameReaderRequest) -> Arc<Self> {
        Arc::new(Self {
            request,
            frames: Mutex::new(Vec::new()),
            close_count: AtomicUsize::new(0),
        })
    }

    /// Queues a frame to hand out on the next acquire call.
    pub fn push_frame(&self, frame: Frame) {
        self.frames.lock().expect("mock frame queue poisoned").push(frame);
    }

    pub fn close_count(&self) -> usize {
        self.close_count.load(Ordering::SeqCst)
    }
}

impl FrameReader for MockFrameReader {
    fn request(&self) -> FrameReaderRequest {
        self.request
    }

    fn acquire_latest_frame(&self) -> Result<Option<Frame>, CaptureError> {
        let mut frames = self.frames.lock().expect("mock frame queue poisoned");
        let latest = frames.pop();
        frames.clear();
        Ok(latest)
    }

    fn close(&self) {
        self.close_count.fetch_add(1, Ordering::SeqCst);
    }
}

struct MockReaderProvider {
    reader: RwLock<Option<Arc<MockFrameReader>>>,
    creations: AtomicUsize,
}

impl MockReaderProvider {
    const fn new() -> Self {
        Self { reader: RwLock::new(None), creations: AtomicUsize::new(0) }
    }
}

impl FrameReaderProvider for MockReaderProvider {
    fn new_reader(
        &self,
        request: &FrameReaderRequest,
    ) -> Result<Arc<dyn FrameReader>, CaptureError> {
        // The installed reader is handed out as-is; the request is only traced.
        let reader =
            self.reader.read().expect("mock reader slot poisoned").clone().ok_or_else(|| {
                CaptureError::new(
                    CaptureErrorKind::MockNotRegistered,
                    "no mock frame reader installed",
                )
            })?;
        self.creations.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(
            width = request.width(),
            height = request.height(),
            "mock frame reader handed out"
        );
        Ok(reader)
    }
}

/// Installs the reader handed out by intercepted reader instantiations.
pub fn set_mock_reader(reader: Arc<MockFrameReader>) {
    *MOCK_READER_PROVIDER.reader.write().expect("mock reader slot poisoned") = Some(reader);
}

/// How many readers have been handed out since the last reset.
pub fn reader_creation_count() -> usize {
    MOCK_READER_PROVIDER.creations.load(Ordering::SeqCst)
}

/// Clears the installed reader and zeroes the creation counter. Intended for
/// per-test teardown.
pub fn reset_reader_state() {
    *MOCK_READER_PROVIDER.reader.write().expect("mock reader slot poisoned") = None;
    MOCK_READER_PROVIDER.creations.store(0, Ordering::SeqCst);
}

/// The interception point, for explicit injection into code under test.
pub fn reader_provider() -> &'static dyn FrameReaderProvider {
    &MOCK_READER_PROVIDER
}

pub struct ReaderGuard {
    previous: Option<Arc<MockFrameReader>>,
    previous_count: usize,
}

impl Drop for ReaderGuard {
    fn drop(&mut self) {
        *MOCK_READER_PROVIDER.reader.write().expect("mock reader slot poisoned") =
            self.previous.take();
        MOCK_READER_PROVIDER.creations.store(self.previous_count, Ordering::SeqCst);
    }
}

/// Installs a reader for the current scope. Dropping the guard restores the
/// previously installed reader and the creation count as of install time.
pub fn install_mock_reader(reader: Arc<MockFrameReader>) -> ReaderGuard {
    let mut slot = MOCK_READER_PROVIDER.reader.write().expect("mock reader slot poisoned");
    let previous = slot.replace(reader);
    ReaderGuard { previous, previous_count: MOCK_READER_PROVIDER.creations.load(Ordering::SeqCst) }
}
