use super::cors::{preflight_method, CorsOptions};
use super::dispatch::{Dispatch, Selected};
use crate::config::DispatchConfig;
use crate::router::{PatternCache, RouteMatch, Router, RouterError};

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

pub use http::Method;
use http::{HeaderMap, Request};

/// A registered route: the method it answers and what it dispatches to.
#[derive(Debug)]
pub struct RouteEntry<T> {
    pub method: Method,
    pub data: T,
    /// Overrides the router's default CORS rule.
    pub cors: Option<CorsOptions>,
}

impl<T> RouteEntry<T> {
    pub fn new(method: Method, data: T) -> Self {
        Self {
            method,
            data,
            cors: None,
        }
    }

    pub fn with_cors(mut self, cors: impl Into<CorsOptions>) -> Self {
        self.cors = Some(cors.into());
        self
    }
}

/// Computes the CORS rule of a request whose route has none of its own.
///
/// The selected route is passed with the router default as its rule.
pub type CorsProvider<T> =
    dyn Fn(&Method, &HeaderMap, &Selected<'_, T>) -> CorsOptions + Send + Sync;

pub struct HttpRouter<T> {
    routes: Router<RouteEntry<T>>,
    default_cors: CorsOptions,
    cors_provider: Option<Box<CorsProvider<T>>>,
}

impl<T: fmt::Debug> fmt::Debug for HttpRouter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRouter")
            .field("routes", &self.routes)
            .field("default_cors", &self.default_cors)
            .field("cors_provider", &self.cors_provider.is_some())
            .finish()
    }
}

impl<T> Default for HttpRouter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> HttpRouter<T> {
    pub fn new() -> Self {
        Self {
            routes: Router::new(),
            default_cors: CorsOptions::Disabled,
            cors_provider: None,
        }
    }

    pub fn with_cache(patterns: Arc<PatternCache>) -> Self {
        Self {
            routes: Router::with_cache(patterns),
            default_cors: CorsOptions::Disabled,
            cors_provider: None,
        }
    }

    pub fn with_config(config: &DispatchConfig) -> Self {
        let mut router = Self::new();
        router.set_default_cors(config.default_cors.clone());
        router
    }

    /// CORS rule for routes registered without one.
    pub fn set_default_cors(&mut self, cors: impl Into<CorsOptions>) -> &mut Self {
        self.default_cors = cors.into();
        self
    }

    pub fn default_cors(&self) -> &CorsOptions {
        &self.default_cors
    }

    /// Computes the CORS rule per request for routes registered without one,
    /// e.g. to echo an allowed `Origin`. Takes precedence over the default
    /// rule.
    pub fn set_cors_provider<F>(&mut self, provider: F) -> &mut Self
    where
        F: Fn(&Method, &HeaderMap, &Selected<'_, T>) -> CorsOptions + Send + Sync + 'static,
    {
        self.cors_provider = Some(Box::new(provider));
        self
    }

    pub fn clear_cors_provider(&mut self) -> &mut Self {
        self.cors_provider = None;
        self
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Routes in registration order as `(method, pattern, data)`.
    pub fn iter(&self) -> impl Iterator<Item = (&Method, &str, &T)> {
        self.routes
            .iter()
            .map(|(pattern, entry)| (&entry.method, pattern, &entry.data))
    }

    pub fn insert(&mut self, method: Method, pattern: &str, data: T) -> &mut Self {
        self.routes.insert(pattern, RouteEntry::new(method, data));
        self
    }

    pub fn try_insert(
        &mut self,
        method: Method,
        pattern: &str,
        data: T,
    ) -> Result<&mut Self, RouterError> {
        self.routes.try_insert(pattern, RouteEntry::new(method, data))?;
        Ok(self)
    }

    pub fn insert_entry(&mut self, pattern: &str, entry: RouteEntry<T>) -> &mut Self {
        self.routes.insert(pattern, entry);
        self
    }

    pub fn try_insert_entry(
        &mut self,
        pattern: &str,
        entry: RouteEntry<T>,
    ) -> Result<&mut Self, RouterError> {
        self.routes.try_insert(pattern, entry)?;
        Ok(self)
    }

    /// Registers a route by method name. The name is upper-cased; `None`
    /// means `GET`.
    pub fn try_insert_str(
        &mut self,
        method: Option<&str>,
        pattern: &str,
        data: T,
    ) -> Result<&mut Self, RouterError> {
        let method = parse_method(method.unwrap_or("GET"))?;
        self.try_insert(method, pattern, data)
    }

    /// The route that would handle `method` on `path`, ignoring preflights.
    pub fn find(&self, method: &Method, path: &str) -> Option<Selected<'_, T>> {
        match self.dispatch_parts(method, path, &HeaderMap::new()) {
            Dispatch::Matched(s) => Some(s),
            _ => None,
        }
    }

    pub fn dispatch<B>(&self, req: &Request<B>) -> Dispatch<'_, T> {
        self.dispatch_parts(req.method(), req.uri().path(), req.headers())
    }

    /// Resolves a request to a route.
    ///
    /// Path matches are scanned for the request method first. Failing that,
    /// a CORS preflight is resolved against the method it announces.
    pub fn dispatch_parts(
        &self,
        method: &Method,
        path: &str,
        headers: &HeaderMap,
    ) -> Dispatch<'_, T> {
        let ret = self.resolve(method, path, headers);
        tracing::debug!(
            %method,
            path,
            outcome = ret.outcome(),
            route = ret.selected().map(|s| s.index),
            "dispatch"
        );
        ret
    }
}

impl<T> HttpRouter<T> {
    fn resolve(&self, method: &Method, path: &str, headers: &HeaderMap) -> Dispatch<'_, T> {
        let mut matches = self.routes.find_all(path);
        if matches.is_empty() {
            return Dispatch::NotFound;
        }

        if let Some(i) = matches.iter().position(|m| m.data.method == *method) {
            let selected = self.select(method, headers, matches.swap_remove(i));
            return Dispatch::Matched(selected);
        }

        if let Some(intended) = preflight_method(method, headers) {
            if let Some(i) = matches.iter().position(|m| m.data.method == intended) {
                let selected = self.select(method, headers, matches.swap_remove(i));
                return Dispatch::Preflight(selected);
            }
        }

        Dispatch::MethodNotAllowed
    }

    fn select<'r>(
        &'r self,
        method: &Method,
        headers: &HeaderMap,
        m: RouteMatch<'r, RouteEntry<T>>,
    ) -> Selected<'r, T> {
        let entry = m.data;
        let mut selected = Selected {
            index: m.index,
            method: &entry.method,
            pattern: m.pattern,
            data: &entry.data,
            params: m.params,
            cors: Cow::Borrowed(entry.cors.as_ref().unwrap_or(&self.default_cors)),
        };
        if entry.cors.is_none() {
            if let Some(provider) = &self.cors_provider {
                selected.cors = Cow::Owned(provider(method, headers, &selected));
            }
        }
        selected
    }
}

fn parse_method(method: &str) -> Result<Method, RouterError> {
    let upper = method.trim().to_ascii_uppercase();
    Method::from_bytes(upper.as_bytes()).map_err(|_| RouterError::InvalidMethod {
        method: method.into(),
    })
}
