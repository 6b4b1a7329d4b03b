use super::cache::{CompiledTable, PatternCache, TableCache};
use super::error::RouterError;
use super::matcher::match_path;
use super::{Route, RouteMatch, Router};

use std::sync::Arc;

impl<T> Router<T> {
    /// Creates a router compiling through [`PatternCache::global`], which is
    /// never pruned.
    pub fn new() -> Self {
        Self::with_cache(PatternCache::global())
    }

    /// Creates a router compiling its patterns through `patterns`.
    pub fn with_cache(patterns: Arc<PatternCache>) -> Self {
        Self {
            routes: Vec::new(),
            version: 0,
            patterns,
            table: TableCache::new(),
        }
    }

    pub fn clear(&mut self) {
        self.routes.clear();
        self.table.invalidate();
        self.touch();
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Pattern and value of the route registered at `index`.
    pub fn get(&self, index: usize) -> Option<(&str, &T)> {
        self.routes
            .get(index)
            .map(|r| (r.pattern.source(), &r.data))
    }

    /// Routes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.routes.iter().map(|r| (r.pattern.source(), &r.data))
    }

    pub fn insert(&mut self, pattern: &str, data: T) -> &mut Self {
        if let Err(e) = self.insert_route(pattern, data) {
            panic!("{}: pattern = {:?}", e, pattern);
        }
        self
    }

    pub fn try_insert(&mut self, pattern: &str, data: T) -> Result<&mut Self, RouterError> {
        self.insert_route(pattern, data)?;
        Ok(self)
    }

    /// The most specific route matching `path`.
    pub fn find(&self, path: &str) -> Option<RouteMatch<'_, T>> {
        self.find_all(path).into_iter().next()
    }

    /// Every route matching `path`, most specific first.
    pub fn find_all(&self, path: &str) -> Vec<RouteMatch<'_, T>> {
        let table = self.table();
        match_path(&table, path)
            .into_iter()
            .map(|m| {
                let route = &self.routes[m.index];
                RouteMatch {
                    index: m.index,
                    pattern: route.pattern.source(),
                    data: &route.data,
                    params: m.params,
                }
            })
            .collect()
    }

    /// The patterns in the order lookups try them.
    pub fn table(&self) -> Arc<CompiledTable> {
        self.table.get_or_build(self.version, || {
            let compiled = self.routes.iter().map(|r| Arc::clone(&r.pattern));
            CompiledTable::from_compiled(self.version, compiled)
        })
    }
}

impl<T> Router<T> {
    fn insert_route(&mut self, pattern: &str, data: T) -> Result<(), RouterError> {
        let pattern = self.patterns.get_or_compile(pattern)?;
        self.routes.push(Route { pattern, data });
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.version += 1;
    }
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}
