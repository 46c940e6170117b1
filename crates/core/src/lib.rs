//! Core types and traits shared by the SmartClick capture stack.
//!
//! The `capture` module defines the surface that capture backends implement:
//! bitmap allocation, frame readers and the registries backends register
//! themselves into. Backends live in their own crates and register their
//! capabilities with the `register_*` macros.

pub mod capture;
