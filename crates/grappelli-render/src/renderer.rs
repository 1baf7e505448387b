//! Tree-to-markup rendering.
//!
//! The renderer is the single consumer of a composed tree and the only
//! place deferred branches are driven: composition builds futures and
//! streams, rendering resolves them, one at a time, in document order. A
//! [`CancellationToken`] threaded through the drive call aborts resolution
//! at the next suspension point without corrupting output already produced
//! for resolved siblings.
//!
//! Two entry points share one driver:
//!
//! - [`render_to_string`] buffers the whole document and returns it.
//! - [`render_stream`] yields byte chunks as subtrees resolve, for
//!   incremental delivery of large or slow trees.

use std::mem;
use std::pin::Pin;

use bytes::Bytes;
use futures::stream;
use futures::{Future, Stream, StreamExt};
use grappelli_core::node::{AttributeNode, Element, Node};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::escape::escape;

/// Error raised while driving a tree to markup.
///
/// Serialization itself cannot fail; the only failure mode is the caller's
/// cancellation signal firing while a deferred branch is being resolved.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
	/// The cancellation token fired before the tree was fully resolved.
	#[error("render cancelled before the tree was fully resolved")]
	Cancelled,
}

/// Configuration for [`render_stream`].
///
/// # Examples
///
/// ```
/// use grappelli_render::renderer::StreamConfig;
///
/// let config = StreamConfig::new().with_chunk_size(8192);
/// assert_eq!(config.chunk_size, 8192);
/// ```
#[derive(Debug, Clone)]
pub struct StreamConfig {
	/// Minimum buffered size, in bytes, before a chunk is emitted.
	pub chunk_size: usize,
}

impl Default for StreamConfig {
	fn default() -> Self {
		Self { chunk_size: 4096 }
	}
}

impl StreamConfig {
	/// Creates a config with the default chunk size.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the chunk size.
	pub fn with_chunk_size(mut self, size: usize) -> Self {
		self.chunk_size = size;
		self
	}
}

/// Void elements render without a closing tag and never take children.
const VOID_TAGS: [&str; 13] = [
	"area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
	"track", "wbr",
];

fn is_void(tag: &str) -> bool {
	VOID_TAGS.contains(&tag)
}

/// Renders a tree to a complete markup string, driving every deferred
/// branch under `token`.
///
/// # Examples
///
/// ```
/// use grappelli_core::dsl::div;
/// use grappelli_render::renderer::render_to_string;
/// use tokio_util::sync::CancellationToken;
///
/// # #[tokio::main]
/// # async fn main() {
/// let tree = div().class("box").child("hi");
/// let html = render_to_string(tree, &CancellationToken::new())
/// 	.await
/// 	.unwrap();
/// assert_eq!(html, "<div class=\"box\">hi</div>");
/// # }
/// ```
pub async fn render_to_string(
	node: Node,
	token: &CancellationToken,
) -> Result<String, RenderError> {
	let mut driver = Driver::new(node, token.clone(), usize::MAX);
	while let Some(task) = driver.stack.pop() {
		driver.process(task).await?;
	}
	Ok(mem::take(&mut driver.buf))
}

/// Renders a tree as a stream of byte chunks, emitted once at least
/// `config.chunk_size` bytes have accumulated or the tree is exhausted.
///
/// Cancellation surfaces as a single `Err(RenderError::Cancelled)` item,
/// after which the stream ends; chunks already emitted remain valid
/// prefixes of the document.
pub fn render_stream(
	node: Node,
	token: CancellationToken,
	config: StreamConfig,
) -> Pin<Box<dyn Stream<Item = Result<Bytes, RenderError>> + Send>> {
	let driver = Driver::new(node, token, config.chunk_size);
	Box::pin(stream::unfold(driver, |mut driver| async move {
		driver.next_chunk().await.map(|chunk| (chunk, driver))
	}))
}

/// One unit of pending serialization work.
enum Task {
	/// Serialize this node (possibly expanding into further tasks).
	Emit(Node),
	/// Emit the closing tag of an already-opened element.
	Close(String),
}

/// Explicit-stack serializer.
///
/// Children are pushed in reverse so they pop in document order; an
/// element pushes its `Close` task beneath its children. Keeping the
/// continuation as a plain stack avoids boxed recursive futures and gives
/// the streaming renderer a natural place to pause between tasks.
struct Driver {
	stack: Vec<Task>,
	token: CancellationToken,
	buf: String,
	chunk_size: usize,
}

impl Driver {
	fn new(node: Node, token: CancellationToken, chunk_size: usize) -> Self {
		Self {
			stack: vec![Task::Emit(node)],
			token,
			buf: String::new(),
			chunk_size,
		}
	}

	/// Awaits `future` unless the cancellation token fires first.
	async fn drive<T>(
		token: &CancellationToken,
		future: impl Future<Output = T>,
	) -> Result<T, RenderError> {
		tokio::select! {
			biased;
			_ = token.cancelled() => {
				debug!("render aborted by cancellation");
				Err(RenderError::Cancelled)
			}
			value = future => Ok(value),
		}
	}

	/// Runs tasks until a chunk is ready, the tree is exhausted, or the
	/// render is cancelled. After an error or exhaustion, returns `None`
	/// forever.
	async fn next_chunk(&mut self) -> Option<Result<Bytes, RenderError>> {
		while let Some(task) = self.stack.pop() {
			if let Err(err) = self.process(task).await {
				self.stack.clear();
				self.buf.clear();
				return Some(Err(err));
			}
			if self.buf.len() >= self.chunk_size {
				return Some(Ok(Bytes::from(mem::take(&mut self.buf))));
			}
		}
		if self.buf.is_empty() {
			None
		} else {
			Some(Ok(Bytes::from(mem::take(&mut self.buf))))
		}
	}

	async fn process(&mut self, task: Task) -> Result<(), RenderError> {
		match task {
			Task::Close(tag) => {
				self.buf.push_str("</");
				self.buf.push_str(&tag);
				self.buf.push('>');
			}
			Task::Emit(node) => match node {
				Node::Element(el) => self.open_element(el).await?,
				Node::Text(s) => self.buf.push_str(&escape(&s)),
				Node::Raw(s) => self.buf.push_str(&s),
				Node::Comment(s) => {
					self.buf.push_str("<!--");
					self.buf.push_str(&s);
					self.buf.push_str("-->");
				}
				Node::Fragment(items) => {
					for item in items.into_iter().rev() {
						self.stack.push(Task::Emit(item));
					}
				}
				Node::Async(future) => {
					trace!("resolving deferred subtree");
					let resolved = Self::drive(&self.token, future).await?;
					self.stack.push(Task::Emit(resolved));
				}
				Node::AsyncSeq(mut seq) => {
					trace!("pulling next deferred sibling");
					if let Some(item) = Self::drive(&self.token, seq.next()).await? {
						// Re-queue the remainder behind the item just
						// pulled; the sequence is single-pass.
						self.stack.push(Task::Emit(Node::AsyncSeq(seq)));
						self.stack.push(Task::Emit(item));
					}
				}
			},
		}
		Ok(())
	}

	/// Serializes an element's open tag, resolving deferred attributes
	/// in declaration order, then queues its children and closing tag.
	async fn open_element(&mut self, el: Element) -> Result<(), RenderError> {
		let Element {
			tag,
			attributes,
			children,
		} = el;
		self.buf.push('<');
		self.buf.push_str(&tag);
		for attr_node in attributes {
			let attr = match attr_node {
				AttributeNode::Attribute(attr) => attr,
				AttributeNode::Async(future) => {
					trace!("resolving deferred attribute");
					Self::drive(&self.token, future).await?
				}
			};
			self.buf.push(' ');
			self.buf.push_str(&attr.name);
			self.buf.push_str("=\"");
			self.buf.push_str(&escape(&attr.value));
			self.buf.push('"');
		}
		if is_void(&tag) {
			self.buf.push_str(" />");
		} else {
			self.buf.push('>');
			self.stack.push(Task::Close(tag));
			for child in children.into_iter().rev() {
				self.stack.push(Task::Emit(child));
			}
		}
		Ok(())
	}
}
