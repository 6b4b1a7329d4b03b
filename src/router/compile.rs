use super::error::RouterError;
use super::pattern::{parse_pattern, PatternNode};

use regex::{Regex, RegexBuilder};
use smallvec::SmallVec;

/// Node shape as seen by the specificity ordering.
///
/// Declared from most to least specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeKind {
    Literal,
    Required,
    Optional,
    Rest,
}

impl From<&PatternNode> for NodeKind {
    fn from(node: &PatternNode) -> Self {
        match node {
            PatternNode::Literal { .. } => Self::Literal,
            PatternNode::Named {
                optional: false, ..
            } => Self::Required,
            PatternNode::Named { optional: true, .. } => Self::Optional,
            PatternNode::Rest => Self::Rest,
        }
    }
}

pub type PriorityKey = SmallVec<[NodeKind; 8]>;

/// A parsed pattern together with its matching expression.
#[derive(Debug)]
pub struct CompiledPattern {
    source: Box<str>,
    nodes: Vec<PatternNode>,
    regex: Regex,
    key: PriorityKey,
}

impl CompiledPattern {
    pub fn new(pattern: &str) -> Result<Self, RouterError> {
        let nodes = parse_pattern(pattern)?;
        let regex = compile_nodes(&nodes)?;
        let key = nodes.iter().map(NodeKind::from).collect();
        tracing::trace!(pattern, regex = regex.as_str(), "compiled pattern");
        Ok(Self {
            source: pattern.into(),
            nodes,
            regex,
            key,
        })
    }

    /// The pattern string as registered.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn nodes(&self) -> &[PatternNode] {
        &self.nodes
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn priority_key(&self) -> &[NodeKind] {
        &self.key
    }
}

/// Builds the anchored, case-insensitive expression for `nodes`.
///
/// | Pattern         | Expression                         |
/// |-----------------|------------------------------------|
/// | (no nodes)      | `^$`                               |
/// | `abc`           | `^abc$`                            |
/// | `abc/:foo/xyz`  | `^abc/([^/]+?)/xyz$`               |
/// | `abc/:foo?/xyz` | `^abc(?:/([^/]+?))?/xyz$`          |
/// | `abc/:foo?/*`   | `^abc(?:/([^/]+?))?(?:/(.+))?$`    |
pub fn compile_nodes(nodes: &[PatternNode]) -> Result<Regex, RouterError> {
    let mut expr = String::from("^");
    for (i, node) in nodes.iter().enumerate() {
        let sep = if i == 0 { "" } else { "/" };
        match node {
            PatternNode::Literal { text } => {
                expr.push_str(sep);
                expr.push_str(&regex::escape(text));
            }
            PatternNode::Named {
                optional: false, ..
            } => {
                expr.push_str(sep);
                expr.push_str("([^/]+?)");
            }
            PatternNode::Named { optional: true, .. } => {
                expr.push_str("(?:");
                expr.push_str(sep);
                expr.push_str("([^/]+?))?");
            }
            PatternNode::Rest => {
                expr.push_str("(?:");
                expr.push_str(sep);
                expr.push_str("(.+))?");
            }
        }
    }
    expr.push('$');

    let regex = RegexBuilder::new(&expr).case_insensitive(true).build()?;
    Ok(regex)
}
