mod imp;

pub mod cache;
pub mod compile;
pub mod error;
pub mod matcher;
pub mod order;
pub mod params;
pub mod pattern;

pub use self::cache::{CompiledTable, PatternCache};
pub use self::compile::CompiledPattern;
pub use self::error::RouterError;
pub use self::matcher::{match_path, PathMatch};
pub use self::params::{Params, REST_KEY};
pub use self::pattern::{normalize_path, parse_pattern, PatternNode};

use self::cache::TableCache;

use std::sync::Arc;

/// An ordered collection of patterns, each bound to a value.
///
/// Patterns are compiled at insertion. The specificity ordering is computed
/// on the first lookup after a change and reused until the next change.
#[derive(Debug)]
pub struct Router<T> {
    routes: Vec<Route<T>>,
    version: u64,
    patterns: Arc<PatternCache>,
    table: TableCache,
}

#[derive(Debug)]
struct Route<T> {
    pattern: Arc<CompiledPattern>,
    data: T,
}

/// A route whose pattern matched the looked-up path.
#[derive(Debug)]
pub struct RouteMatch<'r, T> {
    /// Registration index of the route.
    pub index: usize,
    pub pattern: &'r str,
    pub data: &'r T,
    pub params: Params,
}
