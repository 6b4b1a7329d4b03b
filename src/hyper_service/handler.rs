use super::{BoxError, BoxFuture, Future, Request, Response, StdError};
use crate::router::Params;

/// Runs a request that dispatched to its route.
///
/// `params` holds the path parameters the route's pattern captured.
pub trait Handler {
    fn call(&self, req: Request, params: Params) -> BoxFuture<'static, Result<Response, BoxError>>;
}

pub type BoxHandler = Box<dyn Handler + Send + Sync>;

impl Handler for BoxHandler {
    fn call(&self, req: Request, params: Params) -> BoxFuture<'static, Result<Response, BoxError>> {
        Handler::call(&**self, req, params)
    }
}

/// Any `async fn(Request, Params) -> Result<Response, E>` is a handler.
///
/// The handler's own error type is boxed into a [`BoxError`].
impl<F, E, Fut> Handler for F
where
    F: Fn(Request, Params) -> Fut,
    E: StdError + Send + Sync + 'static,
    Fut: Future<Output = Result<Response, E>> + Send + 'static,
{
    fn call(&self, req: Request, params: Params) -> BoxFuture<'static, Result<Response, BoxError>> {
        let fut = (self)(req, params);
        Box::pin(async move { fut.await.map_err(BoxError::from) })
    }
}
