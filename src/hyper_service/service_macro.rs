#[macro_export]
macro_rules! router_service {
    {$($method:tt $pattern:expr => $handler:expr),+ $(,)?} => {{
        let mut __router = $crate::HttpRouter::<$crate::BoxHandler>::new();
        $($crate::router_service!(@entry __router, $method, $pattern, $handler);)+
        __router.into_service()
    }};

    {@entry $router:expr, GET, $pattern:expr, $handler:expr} => {
        $router.route($crate::Method::GET, $pattern, $handler)
    };
    {@entry $router:expr, POST, $pattern:expr, $handler:expr} => {
        $router.route($crate::Method::POST, $pattern, $handler)
    };
    {@entry $router:expr, PUT, $pattern:expr, $handler:expr} => {
        $router.route($crate::Method::PUT, $pattern, $handler)
    };
    {@entry $router:expr, DELETE, $pattern:expr, $handler:expr} => {
        $router.route($crate::Method::DELETE, $pattern, $handler)
    };
    {@entry $router:expr, HEAD, $pattern:expr, $handler:expr} => {
        $router.route($crate::Method::HEAD, $pattern, $handler)
    };
    {@entry $router:expr, OPTIONS, $pattern:expr, $handler:expr} => {
        $router.route($crate::Method::OPTIONS, $pattern, $handler)
    };
    {@entry $router:expr, CONNECT, $pattern:expr, $handler:expr} => {
        $router.route($crate::Method::CONNECT, $pattern, $handler)
    };
    {@entry $router:expr, PATCH, $pattern:expr, $handler:expr} => {
        $router.route($crate::Method::PATCH, $pattern, $handler)
    };
    {@entry $router:expr, TRACE, $pattern:expr, $handler:expr} => {
        $router.route($crate::Method::TRACE, $pattern, $handler)
    };
}
