//! Node and attribute composition.
//!
//! `compose` appends one node onto another and is total over every pair of
//! node kinds: there is no error case, every combination has a defined
//! result. Deferred operands are never awaited here; composition wraps
//! them in new deferred values whose bodies re-enter `compose` once the
//! operand resolves, so left-associative chaining reproduces the exact
//! order of application even when branches resolve asynchronously.

use futures::StreamExt;
use futures::stream;

use crate::node::{AttributeNode, Node};

/// Appends node `b` onto node `a`, producing the combined node.
///
/// Dispatch by the shape of `a`:
///
/// - `Element`: `b` becomes a child. Fragments splice their items
///   individually; an incoming leaf may instead be absorbed into the
///   element's last child when the two collapse without changing the last
///   child's kind (see [`absorb_into_last`]).
/// - `Fragment`: `b` (or its items, if `b` is itself a fragment) is
///   appended to the item list.
/// - `Async`: the result is a new deferred node that resolves `a` first,
///   then composes `b` onto the resolved value.
/// - Leaves (`Text`, `Raw`, `Comment`): two leaves merge by string
///   concatenation per [`merge_leaves`]; a leaf and a non-leaf pair up as
///   a two-item fragment so nothing is lost.
/// - `AsyncSeq`: `b` is appended to the deferred sequence by streaming
///   concatenation; appending an `Async` node flips the outer wrapper to
///   `Async`, because producing the final sequence requires resolving `b`.
///
/// ## Example
///
/// ```
/// use grappelli_core::compose::compose;
/// use grappelli_core::node::Node;
///
/// let merged = compose(Node::text("Hello, "), Node::text("World!"));
/// assert!(matches!(merged, Node::Text(s) if s == "Hello, World!"));
/// ```
pub fn compose(a: Node, b: Node) -> Node {
	match a {
		Node::Element(mut el) => {
			match b {
				Node::Fragment(items) => el.children.extend(items),
				other => append_child(&mut el.children, other),
			}
			Node::Element(el)
		}
		Node::Fragment(mut items) => {
			match b {
				Node::Fragment(more) => items.extend(more),
				other => items.push(other),
			}
			Node::Fragment(items)
		}
		Node::Async(future) => Node::Async(Box::pin(async move { compose(future.await, b) })),
		Node::AsyncSeq(seq) => match b {
			Node::AsyncSeq(tail) => Node::AsyncSeq(Box::pin(seq.chain(tail))),
			Node::Async(future) => Node::Async(Box::pin(async move {
				let resolved = future.await;
				Node::AsyncSeq(Box::pin(seq.chain(stream::iter(vec![resolved]))))
			})),
			Node::Fragment(items) => Node::AsyncSeq(Box::pin(seq.chain(stream::iter(items)))),
			other => Node::AsyncSeq(Box::pin(seq.chain(stream::iter(vec![other])))),
		},
		leaf => merge_leaves(leaf, b),
	}
}

/// Appends attribute `b` onto node `a`.
///
/// Attributes are only meaningful on elements, including elements still
/// hidden behind a deferred wrapper; on every other kind the addition is a
/// no-op and `a` is returned unchanged. There is no collision handling
/// here: programmatic composition appends in call order, and only the
/// selector grammar merges colliding names.
pub fn compose_attr(a: Node, b: AttributeNode) -> Node {
	match a {
		Node::Element(mut el) => {
			el.attributes.push(b);
			Node::Element(el)
		}
		Node::Async(future) => {
			Node::Async(Box::pin(async move { compose_attr(future.await, b) }))
		}
		other => other,
	}
}

/// Merges a leaf `a` with node `b`.
///
/// Two leaves merge by string concatenation; the result kind follows a
/// fixed matrix: merging toward `Comment` always wins, `Raw` absorbs
/// `Text`, and same-kind pairs concatenate. The one asymmetric cell is
/// `Text` + `Raw`: the raw operand is **discarded** and the text side
/// returned unchanged, unlike the mirrored `Raw` + `Text` which
/// concatenates. Callers are known to depend on both behaviors, so the
/// asymmetry is load-bearing; do not "repair" it.
///
/// A leaf cannot hold children, so any non-leaf `b` pairs up with `a` as a
/// two-item fragment, preserving both order and content.
fn merge_leaves(a: Node, b: Node) -> Node {
	match (a, b) {
		(Node::Text(mut s), Node::Text(t)) => {
			s.push_str(&t);
			Node::Text(s)
		}
		// Asymmetric drop cell: Text + Raw keeps the text, loses the raw.
		(Node::Text(s), Node::Raw(_)) => Node::Text(s),
		(Node::Text(mut s), Node::Comment(t)) => {
			s.push_str(&t);
			Node::Comment(s)
		}
		(Node::Raw(mut s), Node::Text(t) | Node::Raw(t)) => {
			s.push_str(&t);
			Node::Raw(s)
		}
		(Node::Raw(mut s), Node::Comment(t)) => {
			s.push_str(&t);
			Node::Comment(s)
		}
		(Node::Comment(mut s), Node::Text(t) | Node::Raw(t) | Node::Comment(t)) => {
			s.push_str(&t);
			Node::Comment(s)
		}
		(a, b) => Node::Fragment(vec![a, b]),
	}
}

/// Appends `b` to an element's child list, collapsing adjacent compatible
/// leaves: when the current last child can absorb `b` without changing its
/// own kind (`Text` absorbs `Text`; `Raw` absorbs `Text`/`Raw`; `Comment`
/// absorbs `Text`/`Raw`/`Comment`), the payloads concatenate in place
/// instead of growing a new sibling. Every other combination, including
/// the kind-changing `Comment` merges and the `Text`/`Raw` pair, appends
/// `b` as a new child so no content is reordered or lost at the element
/// boundary.
fn append_child(children: &mut Vec<Node>, b: Node) {
	match children.last_mut() {
		Some(last) => {
			if let Some(unabsorbed) = absorb_into_last(last, b) {
				children.push(unabsorbed);
			}
		}
		None => children.push(b),
	}
}

/// Tries to absorb `b` into `last`, returning `b` back when the pair does
/// not collapse.
fn absorb_into_last(last: &mut Node, b: Node) -> Option<Node> {
	match (last, b) {
		(Node::Text(s), Node::Text(t)) => {
			s.push_str(&t);
			None
		}
		(Node::Raw(s), Node::Text(t) | Node::Raw(t)) => {
			s.push_str(&t);
			None
		}
		(Node::Comment(s), Node::Text(t) | Node::Raw(t) | Node::Comment(t)) => {
			s.push_str(&t);
			None
		}
		(_, b) => Some(b),
	}
}
