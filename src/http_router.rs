#![forbid(unsafe_code)]

mod cors;
mod dispatch;
mod router;
mod router_macro;

pub use self::cors::{preflight_method, CorsHeaders, CorsOptions, CorsRule};
pub use self::dispatch::{Dispatch, Selected};
pub use self::router::{CorsProvider, HttpRouter, Method, RouteEntry};
