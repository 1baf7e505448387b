//! # Grappelli
//!
//! A markup-construction library: build a tree of markup nodes from a
//! compact DSL and a CSS-like selector syntax, defer subtrees and
//! attributes that are produced asynchronously, and render the result to
//! markup once, in exactly the order the tree was composed.
//!
//! ## Core Principles
//!
//! - **Total composition**: appending any node kind onto any other has a
//!   defined result; the API has no error path and never panics.
//! - **Lazy deferral**: composing onto a deferred subtree builds a new
//!   deferred computation; nothing executes until the renderer drives it.
//! - **Order preservation**: the fully-resolved markup order equals the
//!   order of composition calls, however sync and async branches
//!   interleave.
//!
//! ## Example
//!
//! ```
//! use grappelli::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let page = el("div#app.card").unwrap()
//! 	.child(span().class("title").child("Hello"))
//! 	.async_child(async { Node::text("from later") });
//!
//! let html = render_to_string(page, &CancellationToken::new())
//! 	.await
//! 	.unwrap();
//! assert_eq!(
//! 	html,
//! 	"<div id=\"app\" class=\"card\"><span class=\"title\">Hello</span>from later</div>"
//! );
//! # }
//! ```

/// Node model, composition engine, selector parser, and DSL constructors.
pub mod core {
	pub use grappelli_core::*;
}

/// Rendering: escaping, deferred-branch driving, streaming output.
pub mod render {
	pub use grappelli_render::*;
}

pub use grappelli_core::compose::{compose, compose_attr};
pub use grappelli_core::node::{Attribute, AttributeNode, Element, IntoNode, Node};
pub use grappelli_core::selector::{ParseError, parse_selector};
pub use grappelli_render::renderer::{
	RenderError, StreamConfig, render_stream, render_to_string,
};

/// Commonly used items, importable in one line.
pub mod prelude {
	pub use grappelli_core::compose::{compose, compose_attr};
	pub use grappelli_core::dsl::*;
	pub use grappelli_core::node::{Attribute, AttributeNode, Element, IntoNode, Node};
	pub use grappelli_core::selector::parse_selector;
	pub use grappelli_render::renderer::{
		RenderError, StreamConfig, render_stream, render_to_string,
	};
	pub use tokio_util::sync::CancellationToken;
}
