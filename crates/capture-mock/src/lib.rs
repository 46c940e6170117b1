//! In-memory capture doubles for SmartClick tests.
//!
//! The real capture backends drive the platform's screen recording APIs.
//! The two components here stand in for them so pipeline tests run without
//! native capture: a bitmap creator that delegates to a factory installed by
//! the test and stamps the requested geometry onto whatever it returns, and a
//! frame reader provider that hands out a single installed reader while
//! counting how often it was asked for one.
//!
//! Both keep their state in process-wide slots. Tests either call the
//! `reset_*` functions from their teardown hook or use the `install_*`
//! variants, whose guards restore the previous state when dropped.

mod bitmap;
mod reader;

pub use bitmap::{
    BitmapFactoryGuard, FreshBitmapFactory, MockBitmap, MockBitmapFactory, bitmap_creator,
    install_mock_bitmap_factory, reset_bitmap_creator, set_mock_bitmap_factory,
};
pub use reader::{
    MockFrameReader, ReaderGuard, install_mock_reader, reader_creation_count, reader_provider,
    reset_reader_state, set_mock_reader,
};

#[cfg(test)]
mod tests;
