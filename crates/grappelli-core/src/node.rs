//! Node and attribute model for the markup tree.
//!
//! The `Node` enum is the core abstraction of the library: a closed set of
//! markup-tree variants covering elements, string-bearing leaves,
//! transparent fragments, and deferred subtrees that resolve when the
//! renderer drives them.
//!
//! ## Example
//!
//! ```
//! use grappelli_core::node::{Element, Node};
//!
//! let view = Node::Element(Element::new("div")).child("Hello, World!");
//! ```

use std::borrow::Cow;
use std::fmt;
use std::pin::Pin;

use futures::Future;
use futures::Stream;

/// A deferred computation yielding exactly one [`Node`] when driven.
pub type BoxNodeFuture = Pin<Box<dyn Future<Output = Node> + Send + 'static>>;

/// A deferred, single-pass sequence of [`Node`]s, produced incrementally.
///
/// Restart semantics are not guaranteed: once partially consumed, the
/// remainder is all that is left.
pub type BoxNodeStream = Pin<Box<dyn Stream<Item = Node> + Send + 'static>>;

/// A deferred computation yielding one [`Attribute`] when driven.
pub type BoxAttributeFuture = Pin<Box<dyn Future<Output = Attribute> + Send + 'static>>;

/// A unified representation of markup-tree content.
///
/// Nodes are combined with [`compose`](crate::compose::compose), which is
/// total over every pair of variants. Deferred variants (`Async`,
/// `AsyncSeq`) are never executed by composition itself; only the renderer
/// drives them to completion.
pub enum Node {
	/// A markup element with attributes and ordered children.
	Element(Element),
	/// Escapable text content.
	Text(String),
	/// Pre-escaped, trusted markup emitted verbatim.
	Raw(String),
	/// A markup comment payload.
	Comment(String),
	/// A transparent grouping; composing it into anything splices its
	/// children in order, without markup of its own.
	Fragment(Vec<Node>),
	/// A subtree that is not known yet; resolves to exactly one node.
	Async(BoxNodeFuture),
	/// A deferred, possibly unbounded sequence of sibling nodes.
	AsyncSeq(BoxNodeStream),
}

/// A markup element: free-form tag, ordered attributes, ordered children.
///
/// Tag and attribute names are accepted verbatim; no vocabulary validation
/// is performed.
pub struct Element {
	/// The tag name (e.g. `"div"`).
	pub tag: String,
	/// Attributes in insertion order.
	pub attributes: Vec<AttributeNode>,
	/// Children in insertion order; order is render order.
	pub children: Vec<Node>,
}

impl Element {
	/// Creates an element with no attributes and no children.
	pub fn new(tag: impl Into<String>) -> Self {
		Self {
			tag: tag.into(),
			attributes: Vec::new(),
			children: Vec::new(),
		}
	}
}

/// An attribute slot on an element: either a resolved name/value pair or a
/// deferred computation producing one.
pub enum AttributeNode {
	/// A resolved attribute.
	Attribute(Attribute),
	/// A deferred attribute; resolved by the renderer in document order.
	Async(BoxAttributeFuture),
}

/// A resolved attribute name/value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
	/// Attribute name, accepted verbatim.
	pub name: String,
	/// Attribute value.
	pub value: String,
}

impl Attribute {
	/// Creates an attribute from a name and a value.
	pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			value: value.into(),
		}
	}
}

impl Node {
	/// Creates a text node.
	pub fn text(content: impl Into<String>) -> Self {
		Self::Text(content.into())
	}

	/// Creates a raw (pre-escaped) markup node.
	pub fn raw(content: impl Into<String>) -> Self {
		Self::Raw(content.into())
	}

	/// Creates a comment node.
	pub fn comment(content: impl Into<String>) -> Self {
		Self::Comment(content.into())
	}

	/// Creates a fragment from any collection of convertible values.
	pub fn fragment(children: impl IntoIterator<Item = impl IntoNode>) -> Self {
		Self::Fragment(children.into_iter().map(|c| c.into_node()).collect())
	}

	/// Wraps a future as a deferred subtree.
	///
	/// The future is not polled here; the renderer drives it when the
	/// surrounding position is reached.
	pub fn deferred<F>(future: F) -> Self
	where
		F: Future<Output = Node> + Send + 'static,
	{
		Self::Async(Box::pin(future))
	}

	/// Wraps a stream as a deferred sequence of sibling nodes.
	pub fn deferred_seq<S>(stream: S) -> Self
	where
		S: Stream<Item = Node> + Send + 'static,
	{
		Self::AsyncSeq(Box::pin(stream))
	}

	/// Returns `true` for the string-bearing leaf variants
	/// (`Text`, `Raw`, `Comment`).
	pub fn is_leaf(&self) -> bool {
		matches!(self, Self::Text(_) | Self::Raw(_) | Self::Comment(_))
	}
}

impl AttributeNode {
	/// Wraps a future as a deferred attribute.
	pub fn deferred<F>(future: F) -> Self
	where
		F: Future<Output = Attribute> + Send + 'static,
	{
		Self::Async(Box::pin(future))
	}
}

impl fmt::Debug for Node {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Element(el) => f.debug_tuple("Element").field(el).finish(),
			Self::Text(s) => f.debug_tuple("Text").field(s).finish(),
			Self::Raw(s) => f.debug_tuple("Raw").field(s).finish(),
			Self::Comment(s) => f.debug_tuple("Comment").field(s).finish(),
			Self::Fragment(children) => f.debug_tuple("Fragment").field(children).finish(),
			Self::Async(_) => f.debug_tuple("Async").field(&"<deferred>").finish(),
			Self::AsyncSeq(_) => f.debug_tuple("AsyncSeq").field(&"<deferred>").finish(),
		}
	}
}

impl fmt::Debug for Element {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Element")
			.field("tag", &self.tag)
			.field("attributes", &self.attributes)
			.field("children", &self.children)
			.finish()
	}
}

impl fmt::Debug for AttributeNode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Attribute(attr) => f.debug_tuple("Attribute").field(attr).finish(),
			Self::Async(_) => f.debug_tuple("Async").field(&"<deferred>").finish(),
		}
	}
}

/// Trait for types that can be converted into a [`Node`].
///
/// This is the conversion seam the DSL constructors build on: strings
/// become text nodes, collections become fragments, `Option` renders its
/// content or nothing.
pub trait IntoNode {
	/// Converts self into a Node.
	fn into_node(self) -> Node;
}

impl IntoNode for Node {
	fn into_node(self) -> Node {
		self
	}
}

impl IntoNode for Element {
	fn into_node(self) -> Node {
		Node::Element(self)
	}
}

impl IntoNode for String {
	fn into_node(self) -> Node {
		Node::Text(self)
	}
}

impl IntoNode for &String {
	fn into_node(self) -> Node {
		Node::Text(self.clone())
	}
}

impl IntoNode for &str {
	fn into_node(self) -> Node {
		Node::Text(self.to_string())
	}
}

impl IntoNode for Cow<'_, str> {
	fn into_node(self) -> Node {
		Node::Text(self.into_owned())
	}
}

impl<T: IntoNode> IntoNode for Option<T> {
	fn into_node(self) -> Node {
		match self {
			Some(v) => v.into_node(),
			None => Node::Fragment(Vec::new()),
		}
	}
}

impl<T: IntoNode> IntoNode for Vec<T> {
	fn into_node(self) -> Node {
		Node::Fragment(self.into_iter().map(|v| v.into_node()).collect())
	}
}

impl IntoNode for () {
	fn into_node(self) -> Node {
		Node::Fragment(Vec::new())
	}
}

impl<A: IntoNode, B: IntoNode> IntoNode for (A, B) {
	fn into_node(self) -> Node {
		Node::Fragment(vec![self.0.into_node(), self.1.into_node()])
	}
}

impl<A: IntoNode, B: IntoNode, C: IntoNode> IntoNode for (A, B, C) {
	fn into_node(self) -> Node {
		Node::Fragment(vec![
			self.0.into_node(),
			self.1.into_node(),
			self.2.into_node(),
		])
	}
}
