//! Bulling (workspace facade crate).
//!
//! This package exposes the `bulling::{core,adapter,input,types}` public API while
//! the implementation lives in dedicated crates under `crates/`.

pub use bulling_adapter as adapter;
pub use bulling_core as core;
pub use bulling_input as input;
pub use bulling_types as types;
