//! Fluent constructors over the composition engine.
//!
//! Everything here is sugar: each builder method is a single call to
//! [`compose`] or [`compose_attr`], so the DSL inherits the composition
//! rules verbatim: fragments splice, adjacent compatible leaves collapse,
//! attributes on non-elements are silently ignored, and deferred children
//! stay lazy until the renderer drives them.
//!
//! ## Example
//!
//! ```
//! use grappelli_core::dsl::{div, el, span};
//!
//! let card = el("div#card.box").unwrap()
//! 	.child(span().class("title").child("Hello"))
//! 	.child("world");
//! ```

use futures::Future;

use crate::compose::{compose, compose_attr};
use crate::node::{Attribute, AttributeNode, Element, IntoNode, Node};
use crate::selector::{ParseError, parse_selector};

impl Node {
	/// Appends a child; shorthand for `compose(self, child)`.
	pub fn child(self, child: impl IntoNode) -> Node {
		compose(self, child.into_node())
	}

	/// Appends several children in order.
	pub fn children(self, children: impl IntoIterator<Item = impl IntoNode>) -> Node {
		children
			.into_iter()
			.fold(self, |node, child| compose(node, child.into_node()))
	}

	/// Appends a deferred child that resolves when rendered.
	pub fn async_child<F>(self, future: F) -> Node
	where
		F: Future<Output = Node> + Send + 'static,
	{
		compose(self, Node::deferred(future))
	}

	/// Appends an attribute; shorthand for `compose_attr`.
	///
	/// A no-op unless the receiver is an element (possibly behind a
	/// deferred wrapper).
	pub fn attr(self, name: impl Into<String>, value: impl Into<String>) -> Node {
		compose_attr(
			self,
			AttributeNode::Attribute(Attribute::new(name, value)),
		)
	}

	/// Appends a deferred attribute that resolves when rendered.
	pub fn async_attr<F>(self, future: F) -> Node
	where
		F: Future<Output = Attribute> + Send + 'static,
	{
		compose_attr(self, AttributeNode::deferred(future))
	}

	/// Sets the `class` attribute.
	pub fn class(self, value: impl Into<String>) -> Node {
		self.attr("class", value)
	}

	/// Sets the `id` attribute.
	pub fn id(self, value: impl Into<String>) -> Node {
		self.attr("id", value)
	}
}

/// Creates an element node from a selector string.
///
/// ## Example
///
/// ```
/// use grappelli_core::dsl::el;
///
/// let node = el("button#submit.primary[type=submit]").unwrap();
/// ```
pub fn el(selector: &str) -> Result<Node, ParseError> {
	parse_selector(selector).map(Node::Element)
}

/// Creates an element node with the given tag and no content.
pub fn tag(name: impl Into<String>) -> Node {
	Node::Element(Element::new(name))
}

/// Wraps `template_content` as a same-document shadow template under a
/// fresh `tag` element: the first child is a `<template
/// shadowrootmode="open">` carrying the subtree, and any children appended
/// afterwards land behind it, so the declarative shadow root always
/// precedes caller-supplied content.
///
/// ## Example
///
/// ```
/// use grappelli_core::dsl::{shadow_scoped, span};
///
/// let widget = shadow_scoped("my-counter", span().child("shadow content"))
/// 	.child("light content");
/// ```
pub fn shadow_scoped(tag_name: impl Into<String>, template_content: impl IntoNode) -> Node {
	let template = tag("template")
		.attr("shadowrootmode", "open")
		.child(template_content);
	tag(tag_name).child(template)
}

macro_rules! tag_constructors {
	($($(#[$doc:meta])* $name:ident)*) => {
		$(
			$(#[$doc])*
			pub fn $name() -> Node {
				tag(stringify!($name))
			}
		)*
	};
}

tag_constructors! {
	/// `<html>` element constructor.
	html
	/// `<head>` element constructor.
	head
	/// `<body>` element constructor.
	body
	/// `<div>` element constructor.
	div
	/// `<span>` element constructor.
	span
	/// `<p>` element constructor.
	p
	/// `<a>` element constructor.
	a
	/// `<ul>` element constructor.
	ul
	/// `<ol>` element constructor.
	ol
	/// `<li>` element constructor.
	li
	/// `<h1>` element constructor.
	h1
	/// `<h2>` element constructor.
	h2
	/// `<h3>` element constructor.
	h3
	/// `<form>` element constructor.
	form
	/// `<input>` element constructor.
	input
	/// `<button>` element constructor.
	button
	/// `<img>` element constructor.
	img
	/// `<br>` element constructor.
	br
	/// `<hr>` element constructor.
	hr
	/// `<meta>` element constructor.
	meta
	/// `<link>` element constructor.
	link
	/// `<section>` element constructor.
	section
	/// `<header>` element constructor.
	header
	/// `<footer>` element constructor.
	footer
	/// `<article>` element constructor.
	article
	/// `<table>` element constructor.
	table
	/// `<tr>` element constructor.
	tr
	/// `<td>` element constructor.
	td
}

#[cfg(test)]
mod tests {
	use super::*;

	fn as_element(node: Node) -> Element {
		match node {
			Node::Element(el) => el,
			other => panic!("expected Element, got {:?}", other),
		}
	}

	#[test]
	fn test_tag_constructor() {
		assert_eq!(as_element(div()).tag, "div");
		assert_eq!(as_element(button()).tag, "button");
	}

	#[test]
	fn test_builder_chains_through_composition() {
		let el = as_element(
			div()
				.id("main")
				.class("card")
				.child(span().child("hi"))
				.child("there"),
		);
		assert_eq!(el.attributes.len(), 2);
		assert_eq!(el.children.len(), 2);
	}

	#[test]
	fn test_text_candidate_becomes_first_child() {
		let el = as_element(p().child("lead").child(span()));
		assert!(matches!(&el.children[0], Node::Text(s) if s == "lead"));
	}

	#[test]
	fn test_attr_on_text_is_noop() {
		let node = Node::text("t").attr("class", "x");
		assert!(matches!(node, Node::Text(s) if s == "t"));
	}

	#[test]
	fn test_children_splices_in_order() {
		let el = as_element(ul().children(vec![li().child("a"), li().child("b")]));
		assert_eq!(el.children.len(), 2);
	}

	#[test]
	fn test_el_parses_selector() {
		let el = as_element(el("div#x.y").unwrap());
		assert_eq!(el.tag, "div");
		assert_eq!(el.attributes.len(), 2);
	}

	#[test]
	fn test_el_propagates_parse_error() {
		assert!(el("#no-tag").is_err());
	}

	#[test]
	fn test_shadow_scoped_places_template_first() {
		let el = as_element(
			shadow_scoped("my-widget", span().child("inside")).child("light dom"),
		);
		assert_eq!(el.tag, "my-widget");
		assert_eq!(el.children.len(), 2);
		match &el.children[0] {
			Node::Element(template) => {
				assert_eq!(template.tag, "template");
				assert!(matches!(
					&template.attributes[0],
					AttributeNode::Attribute(attr)
						if attr.name == "shadowrootmode" && attr.value == "open"
				));
			}
			other => panic!("expected template element, got {:?}", other),
		}
		assert!(matches!(&el.children[1], Node::Text(s) if s == "light dom"));
	}

	#[test]
	fn test_async_child_stays_lazy_until_driven() {
		let node = div().async_child(async { span().child("late") });
		let el = as_element(node);
		assert!(matches!(&el.children[0], Node::Async(_)));
	}
}
