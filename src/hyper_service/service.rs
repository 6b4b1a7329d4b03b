use super::handler::{BoxHandler, Handler};
use super::{BoxError, BoxFuture, Request, Response};
use crate::http_router::{CorsHeaders, CorsOptions, Dispatch, HttpRouter, Method, RouteEntry};

use std::sync::Arc;
use std::task::{Context, Poll};

use http::{HeaderMap, StatusCode};
use hyper::service::Service;
use hyper::Body;

/// Serves requests through an [`HttpRouter`] of handlers.
///
/// Requests without a matching path get `404`, requests whose path matches
/// only routes of other methods get `405`. CORS preflights resolved to a
/// route are answered with `200`, the route's CORS headers and no body.
pub struct RouterService<H = BoxHandler> {
    router: Arc<HttpRouter<H>>,
}

impl<H> Clone for RouterService<H> {
    fn clone(&self) -> Self {
        Self {
            router: Arc::clone(&self.router),
        }
    }
}

impl<H> RouterService<H> {
    pub fn new(router: HttpRouter<H>) -> Self {
        Self::from_shared(Arc::new(router))
    }

    pub fn from_shared(router: Arc<HttpRouter<H>>) -> Self {
        Self { router }
    }

    pub fn router(&self) -> &HttpRouter<H> {
        &self.router
    }
}

impl<H> Service<Request> for RouterService<H>
where
    H: Handler + Send + Sync,
{
    type Response = Response;
    type Error = BoxError;
    type Future = BoxFuture<'static, Result<Response, BoxError>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request) -> Self::Future {
        match self.router.dispatch(&req) {
            Dispatch::Matched(s) => {
                let cors = s.cors.headers(None);
                let fut = s.data.call(req, s.params);
                Box::pin(async move {
                    let mut res = fut.await?;
                    append_cors(res.headers_mut(), cors);
                    Ok(res)
                })
            }
            Dispatch::Preflight(s) => {
                let cors = s.cors.headers(Some(s.method));
                Box::pin(async move {
                    let mut res = Response::new(Body::empty());
                    append_cors(res.headers_mut(), cors);
                    Ok(res)
                })
            }
            Dispatch::NotFound => Box::pin(async { status_response(StatusCode::NOT_FOUND) }),
            Dispatch::MethodNotAllowed => {
                Box::pin(async { status_response(StatusCode::METHOD_NOT_ALLOWED) })
            }
        }
    }
}

/// Headers the handler already set are kept.
fn append_cors(headers: &mut HeaderMap, cors: CorsHeaders) {
    for (name, value) in cors {
        headers.entry(name).or_insert(value);
    }
}

fn status_response(status: StatusCode) -> Result<Response, BoxError> {
    let reason = status.canonical_reason().unwrap_or_default();
    let body = format!("{} {}", status.as_u16(), reason);
    let res = hyper::Response::builder()
        .status(status)
        .body(Body::from(body))?;
    Ok(res)
}

impl HttpRouter<BoxHandler> {
    pub fn route(
        &mut self,
        method: Method,
        path: &str,
        h: impl Handler + Send + Sync + 'static,
    ) -> &mut Self {
        self.insert(method, path, Box::new(h))
    }

    pub fn route_with_cors(
        &mut self,
        method: Method,
        path: &str,
        cors: impl Into<CorsOptions>,
        h: impl Handler + Send + Sync + 'static,
    ) -> &mut Self {
        let entry = RouteEntry::new(method, Box::new(h) as BoxHandler).with_cors(cors);
        self.insert_entry(path, entry)
    }

    pub fn into_service(self) -> RouterService {
        RouterService::new(self)
    }
}

macro_rules! define_method {
    ($name:tt, $method:tt) => {
        pub fn $name(&mut self, path: &str, h: impl Handler + Send + Sync + 'static) -> &mut Self {
            self.route(Method::$method, path, h)
        }
    };
}

impl HttpRouter<BoxHandler> {
    define_method!(get, GET);
    define_method!(post, POST);
    define_method!(put, PUT);
    define_method!(delete, DELETE);
    define_method!(head, HEAD);
    define_method!(options, OPTIONS);
    define_method!(connect, CONNECT);
    define_method!(patch, PATCH);
    define_method!(trace, TRACE);
}
