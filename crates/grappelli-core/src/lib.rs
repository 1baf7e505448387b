//! Core of the Grappelli markup-construction library.
//!
//! This crate owns the pieces with algorithmic content and no I/O:
//!
//! - **Node & attribute model** ([`node`]): the closed set of markup-tree
//!   variants, including deferred subtrees typed as boxed futures and
//!   streams.
//! - **Composition engine** ([`compose`]): the total append/merge
//!   algorithm over every pair of node kinds, lazily re-entered inside
//!   deferred branches.
//! - **Selector parser** ([`selector`]): the `tag#id.class[attr=value]`
//!   grammar with its attribute-collision policy.
//! - **DSL constructors** ([`dsl`]): fluent sugar expressed as repeated
//!   composition calls.
//!
//! Rendering lives in `grappelli-render`; this crate never drives a
//! deferred value.

pub mod compose;
pub mod dsl;
pub mod node;
pub mod selector;

pub use compose::{compose, compose_attr};
pub use node::{
	Attribute, AttributeNode, BoxAttributeFuture, BoxNodeFuture, BoxNodeStream, Element,
	IntoNode, Node,
};
pub use selector::{ParseError, parse_selector};
