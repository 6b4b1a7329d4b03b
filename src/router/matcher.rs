use super::cache::CompiledTable;
use super::compile::CompiledPattern;
use super::params::{Params, REST_KEY};
use super::pattern::{normalize_path, PatternNode};

use std::sync::Arc;

/// One pattern that matched a path.
#[derive(Debug, Clone)]
pub struct PathMatch {
    /// Registration index of the pattern.
    pub index: usize,
    pub pattern: Arc<CompiledPattern>,
    pub params: Params,
}

/// Matches `path` against every pattern of `table`.
///
/// All matches are returned, most specific first.
pub fn match_path(table: &CompiledTable, path: &str) -> Vec<PathMatch> {
    let path = normalize_path(path);
    table
        .entries()
        .iter()
        .filter_map(|entry| {
            let params = capture_params(&entry.pattern, &path)?;
            Some(PathMatch {
                index: entry.index,
                pattern: Arc::clone(&entry.pattern),
                params,
            })
        })
        .collect()
}

/// Runs one pattern against an already normalized path.
pub fn capture_params(pattern: &CompiledPattern, path: &str) -> Option<Params> {
    let caps = pattern.regex().captures(path)?;
    let mut params = Params::new();
    let mut groups = caps.iter().skip(1);
    for node in pattern.nodes() {
        let name: &str = match node {
            PatternNode::Literal { .. } => continue,
            PatternNode::Named { name, .. } => name,
            PatternNode::Rest => REST_KEY,
        };
        let value = groups.next().flatten().map(|m| m.as_str());
        params.set(name, value);
    }
    Some(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(pattern: &str, path: &str) -> Option<Params> {
        let compiled = CompiledPattern::new(pattern).unwrap();
        capture_params(&compiled, &normalize_path(path))
    }

    #[test]
    fn named() {
        let p = capture("/users/:id", "/users/42").unwrap();
        assert_eq!(p.iter().collect::<Vec<_>>(), vec![("id", "42")]);
        assert!(capture("/users/:id", "/users").is_none());
        assert!(capture("/users/:id", "/users/42/x").is_none());
    }

    #[test]
    fn optional_absent() {
        let p = capture("/users/:id?/profile", "/users/profile").unwrap();
        assert!(p.is_empty());
        let p = capture("/users/:id?/profile", "/users/7/profile").unwrap();
        assert_eq!(p.get("id"), Some("7"));
    }

    #[test]
    fn rest() {
        let p = capture("/files/*", "/files/a/b/c").unwrap();
        assert_eq!(p.rest(), Some("a/b/c"));
        let p = capture("/files/*", "/files").unwrap();
        assert!(!p.contains(REST_KEY));
    }

    #[test]
    fn keeps_value_case() {
        let p = capture("/users/:name", "/USERS/Alice").unwrap();
        assert_eq!(p.get("name"), Some("Alice"));
    }

    #[test]
    fn duplicate_names_last_write_wins() {
        let p = capture("/org/:id/user/:id", "/org/1/user/2").unwrap();
        assert_eq!(p.get("id"), Some("2"));
        assert_eq!(p.len(), 1);
    }
}
