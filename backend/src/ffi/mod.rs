//! Python FFI layer
//!
//! PyO3 bindings exposing the allocation engine to Python, plus the dict
//! conversion helpers the bindings are built on. Compiled only with the
//! `pyo3` feature so the pure-Rust crate carries no Python linkage.

pub mod engine;
pub mod types;
