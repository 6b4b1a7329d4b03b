//! Pattern routing with specificity ordering and CORS preflight dispatch.
//!
//! Patterns are `/`-separated segments: literal text, `:name`, `:name?` or a
//! trailing `*`. When several patterns match a path the most specific one
//! wins; see [`router::order`].
//!
//! ```
//! use trellis_router::{http_router, Dispatch, HttpRouter, Method};
//!
//! let router: HttpRouter<u32> = http_router! {
//!     GET "/users/:id" => 1,
//!     GET "/users/active" => 2,
//! };
//!
//! match router.dispatch_parts(&Method::GET, "/users/42", &Default::default()) {
//!     Dispatch::Matched(s) => {
//!         assert_eq!(*s.data, 1);
//!         assert_eq!(s.params.get("id"), Some("42"));
//!     }
//!     _ => unreachable!(),
//! }
//! ```

#![forbid(unsafe_code)]

pub mod router;

#[cfg(feature = "http-router")]
pub mod config;

#[cfg(feature = "http-router")]
pub mod http_router;

#[cfg(feature = "hyper-service")]
pub mod hyper_service;

pub use crate::router::{Params, RouteMatch, Router, RouterError, REST_KEY};

#[cfg(feature = "http-router")]
pub use crate::config::DispatchConfig;

#[cfg(feature = "http-router")]
pub use crate::http_router::{CorsOptions, CorsRule, Dispatch, HttpRouter, Method, RouteEntry};

#[cfg(feature = "hyper-service")]
pub use crate::hyper_service::{BoxHandler, Handler, RouterService};
