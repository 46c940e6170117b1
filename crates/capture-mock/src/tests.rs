use crate::{
    FreshBitmapFactory, MockFrameReader, bitmap_creator, install_mock_bitmap_factory,
    install_mock_reader, reader_creation_count, reader_provider, reset_bitmap_creator,
    reset_reader_state, set_mock_bitmap_factory, set_mock_reader,
};
use smartclick_core::capture::{
    Bitmap, BitmapFactory, CaptureErrorKind, FrameReader, FrameReaderProvider, FrameReaderRequest,
    ImageFormat, PixelConfig,
};
use rstest::rstest;
use serial_test::serial;
use std::sync::Arc;

fn reader_request() -> FrameReaderRequest {
    FrameReaderRequest::new(800, 600, ImageFormat::Rgba8888, 2).unwrap()
}

#[rstest]
#[serial]
fn full_bitmap_cycle() {
    set_mock_bitmap_factory(Arc::new(FreshBitmapFactory));

    let bitmap = bitmap_creator().create_bitmap(100, 200, PixelConfig::Argb8888).unwrap();
    assert_eq!(bitmap.width(), 100);
    assert_eq!(bitmap.height(), 200);
    assert_eq!(bitmap.config(), PixelConfig::Argb8888);

    reset_bitmap_creator();

    let err = bitmap_creator().create_bitmap(100, 200, PixelConfig::Argb8888).unwrap_err();
    assert_eq!(err.kind, CaptureErrorKind::MockNotRegistered);
}

#[rstest]
#[serial]
fn components_reset_independently() {
    let _factory = install_mock_bitmap_factory(Arc::new(FreshBitmapFactory));
    set_mock_reader(MockFrameReader::new(reader_request()));

    reset_reader_state();

    // Clearing the reader slot must not disturb the bitmap slot.
    assert!(bitmap_creator().create_bitmap(1, 1, PixelConfig::Argb8888).is_ok());
    let err = reader_provider().new_reader(&reader_request()).unwrap_err();
    assert_eq!(err.kind, CaptureErrorKind::MockNotRegistered);
}

#[rstest]
#[serial]
fn recording_session_counts_reader_instantiations() {
    reset_reader_state();
    let mock = MockFrameReader::new(reader_request());
    let _guard = install_mock_reader(Arc::clone(&mock));

    // One reader per recording session start; a restart asks again.
    reader_provider().new_reader(&reader_request()).unwrap();
    assert_eq!(reader_creation_count(), 1);
    mock.close();
    reader_provider().new_reader(&reader_request()).unwrap();
    assert_eq!(reader_creation_count(), 2);
    assert_eq!(mock.close_count(), 1);
}
