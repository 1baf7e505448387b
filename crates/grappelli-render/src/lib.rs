//! Renderer for Grappelli markup trees.
//!
//! Accepts a composed [`Node`](grappelli_core::node::Node), drives every
//! deferred branch to completion under a cancellation token, and produces
//! markup, either as one buffered string or as an incremental byte-chunk
//! stream. This crate is the only place deferred branches execute;
//! composition in `grappelli-core` stays pure.

pub mod escape;
pub mod renderer;

pub use escape::escape;
pub use renderer::{RenderError, StreamConfig, render_stream, render_to_string};
