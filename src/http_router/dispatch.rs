use super::cors::{CorsHeaders, CorsOptions};
use crate::router::Params;

use std::borrow::Cow;

use http::{Method, StatusCode};

/// Outcome of dispatching one request.
#[derive(Debug)]
pub enum Dispatch<'r, T> {
    /// A route with the request's own method matched the path.
    Matched(Selected<'r, T>),
    /// A CORS preflight whose intended method has a route. The response is
    /// the route's CORS headers and an empty body; no handler runs.
    Preflight(Selected<'r, T>),
    /// No pattern matches the path.
    NotFound,
    /// Some pattern matches the path, none with the requested method.
    MethodNotAllowed,
}

/// The route a request resolved to.
#[derive(Debug)]
pub struct Selected<'r, T> {
    /// Registration index of the route.
    pub index: usize,
    pub method: &'r Method,
    pub pattern: &'r str,
    pub data: &'r T,
    pub params: Params,
    /// The route's own CORS rule, else the router's CORS provider, else the
    /// router default.
    pub cors: Cow<'r, CorsOptions>,
}

impl<'r, T> Dispatch<'r, T> {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Matched(_) | Self::Preflight(_) => StatusCode::OK,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    pub fn is_preflight(&self) -> bool {
        matches!(self, Self::Preflight(_))
    }

    pub fn selected(&self) -> Option<&Selected<'r, T>> {
        match self {
            Self::Matched(s) | Self::Preflight(s) => Some(s),
            Self::NotFound | Self::MethodNotAllowed => None,
        }
    }

    /// CORS headers the response must carry.
    pub fn cors_headers(&self) -> CorsHeaders {
        match self {
            Self::Matched(s) => s.cors.headers(None),
            Self::Preflight(s) => s.cors.headers(Some(s.method)),
            Self::NotFound | Self::MethodNotAllowed => CorsHeaders::new(),
        }
    }

    pub(super) fn outcome(&self) -> &'static str {
        match self {
            Self::Matched(_) => "matched",
            Self::Preflight(_) => "preflight",
            Self::NotFound => "not found",
            Self::MethodNotAllowed => "method not allowed",
        }
    }
}
