//! CSS-like selector parsing.
//!
//! Turns a compact selector string such as
//! `div#main.card.wide[data-role=hero]` into an [`Element`] descriptor
//! with no children. This is the only string-based input format of the
//! library; everything else is built programmatically.
//!
//! ## Grammar
//!
//! `tagName (classSelector | idSelector | attrSelector)*`, with optional
//! whitespace after each token:
//!
//! - tag name: an ASCII letter followed by ASCII letters, digits, or `-`
//! - `#id`: any run excluding `#`, `.`, `[`, trimmed of whitespace
//! - `.class`: a run excluding whitespace, `[`, `.`, `#`
//! - `[name=value]`: name of letters/digits/`-`, value anything up to `]`
//!
//! Repeated occurrences of the same logical key merge: `id` keeps the last
//! value, `class` and every other attribute grow by space-concatenation,
//! and the first occurrence of a key fixes its position in the attribute
//! list.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::node::{Attribute, AttributeNode, Element};

/// Error raised when a selector string does not match the grammar.
///
/// Carries the original input and the byte offset the scanner stopped at,
/// so callers can point at the offending character.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("selector parse error at byte {position} in {input:?}: {message}")]
pub struct ParseError {
	/// The input that failed to parse.
	pub input: String,
	/// Byte offset of the failure.
	pub position: usize,
	/// What the scanner expected.
	pub message: String,
}

impl ParseError {
	fn new(input: &str, position: usize, message: impl Into<String>) -> Self {
		Self {
			input: input.to_string(),
			position,
			message: message.into(),
		}
	}
}

/// Parses a selector string into an element descriptor.
///
/// ## Example
///
/// ```
/// use grappelli_core::selector::parse_selector;
///
/// let el = parse_selector("input.form-field[type=text]").unwrap();
/// assert_eq!(el.tag, "input");
/// assert_eq!(el.attributes.len(), 2);
/// ```
pub fn parse_selector(input: &str) -> Result<Element, ParseError> {
	let mut chars = input.char_indices().peekable();
	let mut attrs: Vec<(String, String)> = Vec::new();

	skip_whitespace(&mut chars);
	let tag = parse_tag_name(input, &mut chars)?;
	skip_whitespace(&mut chars);

	while let Some(&(position, c)) = chars.peek() {
		match c {
			'#' => {
				chars.next();
				let value = take_while(&mut chars, |c| !matches!(c, '#' | '.' | '['));
				merge_attribute(&mut attrs, "id", value.trim().to_string());
			}
			'.' => {
				chars.next();
				let value =
					take_while(&mut chars, |c| {
						!c.is_whitespace() && !matches!(c, '[' | '.' | '#')
					});
				merge_attribute(&mut attrs, "class", value);
				skip_whitespace(&mut chars);
			}
			'[' => {
				chars.next();
				let (name, value) = parse_attr_selector(input, &mut chars)?;
				merge_attribute(&mut attrs, &name, value);
				skip_whitespace(&mut chars);
			}
			c if c.is_whitespace() => {
				chars.next();
			}
			c => {
				return Err(ParseError::new(
					input,
					position,
					format!("expected '#', '.' or '[', found {:?}", c),
				));
			}
		}
	}

	let mut element = Element::new(tag);
	element.attributes = attrs
		.into_iter()
		.map(|(name, value)| AttributeNode::Attribute(Attribute::new(name, value)))
		.collect();
	Ok(element)
}

fn parse_tag_name(
	input: &str,
	chars: &mut Peekable<CharIndices<'_>>,
) -> Result<String, ParseError> {
	match chars.peek() {
		Some(&(_, c)) if c.is_ascii_alphabetic() => {}
		Some(&(position, c)) => {
			return Err(ParseError::new(
				input,
				position,
				format!("expected tag name to start with a letter, found {:?}", c),
			));
		}
		None => {
			return Err(ParseError::new(
				input,
				input.len(),
				"expected tag name, found end of input",
			));
		}
	}
	Ok(take_while(chars, |c| {
		c.is_ascii_alphanumeric() || c == '-'
	}))
}

/// Parses the remainder of `[name=value]` after the opening bracket.
fn parse_attr_selector(
	input: &str,
	chars: &mut Peekable<CharIndices<'_>>,
) -> Result<(String, String), ParseError> {
	let name = take_while(chars, |c| c.is_ascii_alphanumeric() || c == '-');
	match chars.next() {
		Some((_, '=')) => {}
		Some((position, c)) => {
			return Err(ParseError::new(
				input,
				position,
				format!("expected '=' in attribute selector, found {:?}", c),
			));
		}
		None => {
			return Err(ParseError::new(
				input,
				input.len(),
				"expected '=' in attribute selector, found end of input",
			));
		}
	}
	let value = take_while(chars, |c| c != ']');
	match chars.next() {
		Some((_, ']')) => Ok((name, value)),
		_ => Err(ParseError::new(
			input,
			input.len(),
			"expected ']' to close attribute selector",
		)),
	}
}

fn skip_whitespace(chars: &mut Peekable<CharIndices<'_>>) {
	while matches!(chars.peek(), Some(&(_, c)) if c.is_whitespace()) {
		chars.next();
	}
}

fn take_while(chars: &mut Peekable<CharIndices<'_>>, accept: impl Fn(char) -> bool) -> String {
	let mut out = String::new();
	while let Some(&(_, c)) = chars.peek() {
		if !accept(c) {
			break;
		}
		out.push(c);
		chars.next();
	}
	out
}

/// Folds a new occurrence of `name` into the attribute list.
///
/// The first occurrence of a key fixes its position. A repeated `id`
/// replaces the stored value outright; every other repeated key grows by
/// space-concatenation in order of appearance.
fn merge_attribute(attrs: &mut Vec<(String, String)>, name: &str, value: String) {
	match attrs.iter_mut().find(|(existing, _)| existing == name) {
		Some((_, existing)) if name == "id" => *existing = value,
		Some((_, existing)) => {
			existing.push(' ');
			existing.push_str(&value);
		}
		None => attrs.push((name.to_string(), value)),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn resolved(attrs: &[AttributeNode]) -> Vec<(&str, &str)> {
		attrs
			.iter()
			.map(|a| match a {
				AttributeNode::Attribute(attr) => (attr.name.as_str(), attr.value.as_str()),
				AttributeNode::Async(_) => panic!("unexpected deferred attribute"),
			})
			.collect()
	}

	#[test]
	fn test_bare_tag() {
		let el = parse_selector("div").unwrap();
		assert_eq!(el.tag, "div");
		assert!(el.attributes.is_empty());
		assert!(el.children.is_empty());
	}

	#[test]
	fn test_tag_with_digits_and_hyphen() {
		assert_eq!(parse_selector("h2").unwrap().tag, "h2");
		assert_eq!(parse_selector("my-widget").unwrap().tag, "my-widget");
	}

	#[test]
	fn test_id_and_classes() {
		let el = parse_selector("div#main.card.wide").unwrap();
		assert_eq!(
			resolved(&el.attributes),
			vec![("id", "main"), ("class", "card wide")]
		);
	}

	#[test]
	fn test_attr_selector() {
		let el = parse_selector("a[href=/home][target=_blank]").unwrap();
		assert_eq!(
			resolved(&el.attributes),
			vec![("href", "/home"), ("target", "_blank")]
		);
	}

	#[test]
	fn test_collision_policy() {
		// Last id wins; class and other repeats space-concatenate; first
		// occurrence fixes position.
		let el = parse_selector("div#a#b.c1.c2[data-x=1][data-x=2]").unwrap();
		assert_eq!(
			resolved(&el.attributes),
			vec![("id", "b"), ("class", "c1 c2"), ("data-x", "1 2")]
		);
	}

	#[test]
	fn test_id_from_attr_selector_replaces_hash_id() {
		let el = parse_selector("div#a[id=b]").unwrap();
		assert_eq!(resolved(&el.attributes), vec![("id", "b")]);
	}

	#[test]
	fn test_class_from_attr_selector_concatenates() {
		let el = parse_selector("div.a[class=b]").unwrap();
		assert_eq!(resolved(&el.attributes), vec![("class", "a b")]);
	}

	#[test]
	fn test_whitespace_tolerated_between_tokens() {
		let el = parse_selector("  div  .card  [data-x=1]  ").unwrap();
		assert_eq!(el.tag, "div");
		assert_eq!(
			resolved(&el.attributes),
			vec![("class", "card"), ("data-x", "1")]
		);
	}

	#[test]
	fn test_id_value_is_trimmed() {
		let el = parse_selector("div# main .card").unwrap();
		assert_eq!(
			resolved(&el.attributes),
			vec![("id", "main"), ("class", "card")]
		);
	}

	#[test]
	fn test_attr_value_may_contain_spaces_and_delimiters() {
		let el = parse_selector("div[title=a #b .c]").unwrap();
		assert_eq!(resolved(&el.attributes), vec![("title", "a #b .c")]);
	}

	#[test]
	fn test_error_on_empty_input() {
		let err = parse_selector("").unwrap_err();
		assert_eq!(err.position, 0);
		assert!(err.message.contains("expected tag name"));
	}

	#[test]
	fn test_error_on_leading_digit() {
		let err = parse_selector("1div").unwrap_err();
		assert_eq!(err.position, 0);
	}

	#[test]
	fn test_error_on_unexpected_character() {
		let err = parse_selector("div>span").unwrap_err();
		assert_eq!(err.position, 3);
		assert!(err.message.contains("'>'"));
	}

	#[test]
	fn test_error_on_unterminated_attr_selector() {
		let err = parse_selector("div[data-x=1").unwrap_err();
		assert!(err.message.contains("']'"));
	}

	#[test]
	fn test_error_on_missing_equals() {
		let err = parse_selector("div[data-x]").unwrap_err();
		assert!(err.message.contains("'='"));
	}

	#[test]
	fn test_error_display_names_input_and_position() {
		let err = parse_selector("div>").unwrap_err();
		let text = err.to_string();
		assert!(text.contains("byte 3"));
		assert!(text.contains("div>"));
	}
}
