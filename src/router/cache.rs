use super::compile::CompiledPattern;
use super::error::RouterError;
use super::order::compare_entries;

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use dashmap::DashMap;
use once_cell::sync::Lazy;

static GLOBAL: Lazy<Arc<PatternCache>> = Lazy::new(|| Arc::new(PatternCache::new()));

/// Compiled patterns keyed by pattern string.
///
/// Identical pattern strings share one [`CompiledPattern`] no matter which
/// route collection they belong to.
#[derive(Debug, Default)]
pub struct PatternCache {
    map: DashMap<Box<str>, Arc<CompiledPattern>>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self {
            map: DashMap::new(),
        }
    }

    /// The process-wide cache used by routers built with `Router::new`.
    ///
    /// It keeps one entry per distinct pattern string for the life of the
    /// process. Routers built from patterns generated at runtime should get
    /// their own cache through `Router::with_cache`.
    pub fn global() -> Arc<PatternCache> {
        Arc::clone(&GLOBAL)
    }

    pub fn get_or_compile(&self, pattern: &str) -> Result<Arc<CompiledPattern>, RouterError> {
        if let Some(hit) = self.map.get(pattern) {
            tracing::trace!(pattern, "pattern cache hit");
            return Ok(Arc::clone(hit.value()));
        }
        // Two threads may compile the same pattern here; the first insert wins.
        let compiled = Arc::new(CompiledPattern::new(pattern)?);
        let entry = self.map.entry(pattern.into()).or_insert(compiled);
        Ok(Arc::clone(entry.value()))
    }

    /// Compiles every pattern and orders them by specificity.
    ///
    /// Entry indices refer to positions in `patterns`.
    pub fn compile_sorted<'a, I>(&self, patterns: I) -> Result<CompiledTable, RouterError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let compiled = patterns
            .into_iter()
            .map(|p| self.get_or_compile(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CompiledTable::from_compiled(0, compiled))
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.map.contains_key(pattern)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&self) {
        self.map.clear()
    }
}

#[derive(Debug, Clone)]
pub struct TableEntry {
    pub index: usize,
    pub pattern: Arc<CompiledPattern>,
}

/// Patterns of one route collection in the order the matcher tries them.
#[derive(Debug)]
pub struct CompiledTable {
    version: u64,
    entries: Vec<TableEntry>,
}

impl CompiledTable {
    pub fn from_compiled<I>(version: u64, compiled: I) -> Self
    where
        I: IntoIterator<Item = Arc<CompiledPattern>>,
    {
        let mut entries: Vec<TableEntry> = compiled
            .into_iter()
            .enumerate()
            .map(|(index, pattern)| TableEntry { index, pattern })
            .collect();
        entries.sort_by(|a, b| {
            compare_entries(
                (a.index, a.pattern.priority_key()),
                (b.index, b.pattern.priority_key()),
            )
        });
        Self { version, entries }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Holds the sorted table of one route collection, keyed by its version.
///
/// A stale table is replaced, never mutated, so readers holding the old
/// `Arc` keep a consistent ordering.
pub(crate) struct TableCache {
    slot: ArcSwapOption<CompiledTable>,
}

impl TableCache {
    pub(crate) fn new() -> Self {
        Self {
            slot: ArcSwapOption::empty(),
        }
    }

    pub(crate) fn get_or_build(
        &self,
        version: u64,
        build: impl FnOnce() -> CompiledTable,
    ) -> Arc<CompiledTable> {
        if let Some(table) = self.slot.load_full() {
            if table.version == version {
                return table;
            }
        }
        let table = Arc::new(build());
        tracing::debug!(version, routes = table.len(), "built route table");
        self.slot.store(Some(Arc::clone(&table)));
        table
    }

    pub(crate) fn invalidate(&self) {
        self.slot.store(None);
    }
}

impl Default for TableCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TableCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let version = self.slot.load().as_ref().map(|t| t.version);
        f.debug_struct("TableCache")
            .field("version", &version)
            .finish()
    }
}
