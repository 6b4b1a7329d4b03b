//! Pattern parsing.
//!
//! A pattern is a `/`-separated list of segments. Each segment is literal
//! text, a named parameter `:name`, an optional named parameter `:name?`, or
//! a bare `*` in last position which captures the rest of the path.
//!
//! Leading, trailing and repeated slashes are insignificant, both in patterns
//! and in request paths.

use super::error::RouterError;
use super::params::REST_KEY;

use std::borrow::Cow;

const SLASH: char = '/';
const COLON: char = ':';
const QUESTION: char = '?';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternNode {
    Literal { text: Box<str> },
    Named { name: Box<str>, optional: bool },
    Rest,
}

impl PatternNode {
    pub fn is_capture(&self) -> bool {
        !matches!(self, Self::Literal { .. })
    }
}

/// Removes leading, trailing and repeated slashes.
///
/// `"//users//42/"` and `"users/42"` both normalize to `"users/42"`, and
/// `"/"` normalizes to the empty string.
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    let clean = !path.starts_with(SLASH) && !path.ends_with(SLASH) && !path.contains("//");
    if clean {
        return Cow::Borrowed(path);
    }
    let mut out = String::with_capacity(path.len());
    for part in path.split(SLASH).filter(|p| !p.is_empty()) {
        if !out.is_empty() {
            out.push(SLASH);
        }
        out.push_str(part);
    }
    Cow::Owned(out)
}

/// Parses a pattern into its nodes.
///
/// The root pattern yields a single empty literal, so it compiles to an
/// expression matching only the empty path.
pub fn parse_pattern(pattern: &str) -> Result<Vec<PatternNode>, RouterError> {
    let normalized = normalize_path(pattern);
    let parts: Vec<&str> = normalized.split(SLASH).collect();
    let last = parts.len() - 1;

    let mut nodes = Vec::with_capacity(parts.len());
    for (i, &part) in parts.iter().enumerate() {
        let node = if part.starts_with(COLON) && part != ":" && part != ":?" {
            let optional = part.ends_with(QUESTION);
            let name = if optional {
                &part[1..part.len() - 1]
            } else {
                &part[1..]
            };
            if name == REST_KEY {
                return Err(RouterError::ReservedParamName {
                    pattern: pattern.into(),
                });
            }
            PatternNode::Named {
                name: name.into(),
                optional,
            }
        } else if part == REST_KEY && i == last {
            PatternNode::Rest
        } else {
            PatternNode::Literal { text: part.into() }
        };
        nodes.push(node);
    }
    Ok(nodes)
}
