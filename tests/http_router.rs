#![cfg(feature = "http-router")]

use trellis_router::http_router::{Dispatch, HttpRouter, Method, RouteEntry};
use trellis_router::{http_router, CorsOptions, CorsRule, DispatchConfig, RouterError};

use http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_EXPOSE_HEADERS, ACCESS_CONTROL_REQUEST_METHOD, ORIGIN,
};
use http::{HeaderMap, HeaderValue, Request, StatusCode};

fn preflight(intended: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCESS_CONTROL_REQUEST_METHOD, HeaderValue::from_static(intended));
    headers
}

fn data<T: Copy>(d: Dispatch<'_, T>) -> Option<T> {
    match d {
        Dispatch::Matched(s) => Some(*s.data),
        _ => None,
    }
}

#[test]
fn http_router_macro() {
    let router: HttpRouter<i32> = http_router! {
        GET "/u/:uid/p/:pid" => 1,
        POST "/u/:uid/p" => 2,
        GET "/v1/info" => 3,
        POST "/v1/info" => 4,
        HEAD "/*" => 5,
    };

    assert_eq!(*router.find(&Method::GET, "/u/asd/p/qwe").unwrap().data, 1);
    assert_eq!(*router.find(&Method::POST, "/u/asd/p").unwrap().data, 2);
    assert_eq!(*router.find(&Method::GET, "/v1/info").unwrap().data, 3);
    assert_eq!(*router.find(&Method::POST, "/v1/info").unwrap().data, 4);
    assert_eq!(*router.find(&Method::HEAD, "/home/asd").unwrap().data, 5);
    assert!(router.find(&Method::PUT, "/v1/info").is_none());
}

#[test]
fn not_found_and_method_not_allowed() {
    let router: HttpRouter<i32> = http_router! {
        GET "/widgets" => 1,
        POST "/widgets" => 2,
    };
    let headers = HeaderMap::new();

    let d = router.dispatch_parts(&Method::GET, "/gadgets", &headers);
    assert!(matches!(d, Dispatch::NotFound));
    assert_eq!(d.status(), StatusCode::NOT_FOUND);

    let d = router.dispatch_parts(&Method::DELETE, "/widgets", &headers);
    assert!(matches!(d, Dispatch::MethodNotAllowed));
    assert_eq!(d.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(d.cors_headers().is_empty());

    assert_eq!(data(router.dispatch_parts(&Method::POST, "/widgets", &headers)), Some(2));
}

#[test]
fn method_resolved_over_all_path_matches() {
    let router: HttpRouter<i32> = http_router! {
        POST "/users/:id" => 1,
        GET "/users/active" => 2,
    };
    let headers = HeaderMap::new();

    // the literal route ranks first but only answers GET
    let d = router.dispatch_parts(&Method::POST, "/users/active", &headers);
    match d {
        Dispatch::Matched(s) => {
            assert_eq!(*s.data, 1);
            assert_eq!(s.params.get("id"), Some("active"));
            assert_eq!(s.pattern, "/users/:id");
        }
        other => panic!("unexpected dispatch: {:?}", other),
    }

    assert_eq!(data(router.dispatch_parts(&Method::GET, "/users/active", &headers)), Some(2));
    assert!(matches!(
        router.dispatch_parts(&Method::GET, "/users/7", &headers),
        Dispatch::MethodNotAllowed
    ));
}

#[test]
fn preflight_resolves_intended_method() {
    let mut router: HttpRouter<i32> = HttpRouter::new();
    router
        .insert(Method::GET, "/widgets", 1)
        .insert_entry(
            "/widgets",
            RouteEntry::new(Method::POST, 2).with_cors(CorsRule {
                allow_origin: Some("https://app.example".into()),
                allow_headers: Some("content-type".into()),
                expose_headers: Some("x-total".into()),
            }),
        );

    let d = router.dispatch_parts(&Method::OPTIONS, "/widgets", &preflight("POST"));
    assert!(d.is_preflight());
    assert_eq!(d.status(), StatusCode::OK);
    let s = d.selected().unwrap();
    assert_eq!(*s.data, 2);
    assert_eq!(s.method, Method::POST);

    let headers = d.cors_headers();
    assert_eq!(headers.len(), 3);
    assert_eq!(headers[0].0, ACCESS_CONTROL_ALLOW_ORIGIN);
    assert_eq!(headers[0].1, "https://app.example");
    assert_eq!(headers[1].0, ACCESS_CONTROL_ALLOW_HEADERS);
    assert_eq!(headers[2].0, ACCESS_CONTROL_ALLOW_METHODS);
    assert_eq!(headers[2].1, "POST");

    let d = router.dispatch_parts(&Method::OPTIONS, "/widgets", &preflight("get"));
    assert_eq!(*d.selected().unwrap().data, 1);

    let d = router.dispatch_parts(&Method::OPTIONS, "/widgets", &preflight("DELETE"));
    assert!(matches!(d, Dispatch::MethodNotAllowed));

    let d = router.dispatch_parts(&Method::OPTIONS, "/widgets", &HeaderMap::new());
    assert!(matches!(d, Dispatch::MethodNotAllowed));

    let d = router.dispatch_parts(&Method::OPTIONS, "/gadgets", &preflight("POST"));
    assert!(matches!(d, Dispatch::NotFound));
}

#[test]
fn preflight_allows_intended_method() {
    let mut router: HttpRouter<i32> = HttpRouter::new();
    router.set_default_cors(true).insert(Method::PUT, "/widgets", 1);

    let d = router.dispatch_parts(&Method::OPTIONS, "/widgets", &preflight("put"));
    assert!(d.is_preflight());
    let headers = d.cors_headers();
    let names: Vec<&str> = headers.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(
        names,
        [
            "access-control-allow-origin",
            "access-control-allow-headers",
            "access-control-allow-methods"
        ]
    );
    assert_eq!(headers[2].1, "PUT");

    let d = router.dispatch_parts(&Method::PUT, "/widgets", &HeaderMap::new());
    let headers = d.cors_headers();
    assert!(headers.iter().all(|(n, _)| *n != ACCESS_CONTROL_ALLOW_METHODS));

    router.set_default_cors(false);
    let d = router.dispatch_parts(&Method::OPTIONS, "/widgets", &preflight("PUT"));
    assert!(d.is_preflight());
    assert!(d.cors_headers().is_empty());
}

#[test]
fn explicit_options_route_wins_over_preflight() {
    let router: HttpRouter<i32> = http_router! {
        POST "/widgets" => 1,
        OPTIONS "/widgets" => 2,
    };

    let d = router.dispatch_parts(&Method::OPTIONS, "/widgets", &preflight("POST"));
    assert!(!d.is_preflight());
    assert_eq!(data(d), Some(2));
}

#[test]
fn default_cors_applies_without_route_rule() {
    let config = DispatchConfig::from_toml_str("default_cors = true").unwrap();
    let mut router: HttpRouter<i32> = HttpRouter::with_config(&config);
    router
        .insert(Method::GET, "/open", 1)
        .insert_entry("/closed", RouteEntry::new(Method::GET, 2).with_cors(false));

    let d = router.dispatch_parts(&Method::GET, "/open", &HeaderMap::new());
    let headers = d.cors_headers();
    assert_eq!(headers.len(), 2);
    assert_eq!(headers[1].0, ACCESS_CONTROL_EXPOSE_HEADERS);
    assert_eq!(headers[1].1, "*");

    let d = router.dispatch_parts(&Method::GET, "/closed", &HeaderMap::new());
    assert_eq!(*d.selected().unwrap().cors, CorsOptions::Disabled);
    assert!(d.cors_headers().is_empty());
}

#[test]
fn cors_provider_computes_rule_per_request() {
    let mut router: HttpRouter<i32> = HttpRouter::new();
    router
        .set_default_cors(true)
        .insert(Method::GET, "/echo", 1)
        .insert_entry("/own", RouteEntry::new(Method::GET, 2).with_cors(false));
    router.set_cors_provider(|_, headers, selected| {
        assert_eq!(*selected.cors, CorsOptions::Permissive);
        match headers.get(ORIGIN).and_then(|v| v.to_str().ok()) {
            Some(origin) if origin.ends_with(".example") => CorsOptions::Custom(CorsRule {
                allow_origin: Some(origin.to_owned()),
                ..CorsRule::default()
            }),
            _ => CorsOptions::Disabled,
        }
    });

    let mut headers = HeaderMap::new();
    headers.insert(ORIGIN, HeaderValue::from_static("https://app.example"));
    let d = router.dispatch_parts(&Method::GET, "/echo", &headers);
    let cors = d.cors_headers();
    assert_eq!(cors.len(), 1);
    assert_eq!(cors[0].0, ACCESS_CONTROL_ALLOW_ORIGIN);
    assert_eq!(cors[0].1, "https://app.example");

    headers.insert(ORIGIN, HeaderValue::from_static("https://elsewhere.test"));
    let d = router.dispatch_parts(&Method::GET, "/echo", &headers);
    assert!(d.cors_headers().is_empty());

    // a route's own rule is never replaced
    let d = router.dispatch_parts(&Method::GET, "/own", &HeaderMap::new());
    assert_eq!(*d.selected().unwrap().cors, CorsOptions::Disabled);

    router.clear_cors_provider();
    let d = router.dispatch_parts(&Method::GET, "/echo", &headers);
    assert_eq!(*d.selected().unwrap().cors, CorsOptions::Permissive);
}

#[test]
fn dispatch_request() {
    let router: HttpRouter<i32> = http_router! {
        GET "/files/*" => 1,
    };
    let req = Request::get("http://localhost//files//a/b.txt")
        .body(())
        .unwrap();

    match router.dispatch(&req) {
        Dispatch::Matched(s) => assert_eq!(s.params.rest(), Some("a/b.txt")),
        other => panic!("unexpected dispatch: {:?}", other),
    }
}

#[test]
fn method_names() {
    let mut router: HttpRouter<i32> = HttpRouter::new();
    router
        .try_insert_str(Some("post"), "/a", 1)
        .unwrap()
        .try_insert_str(None, "/a", 2)
        .unwrap();

    assert_eq!(*router.find(&Method::POST, "/a").unwrap().data, 1);
    assert_eq!(*router.find(&Method::GET, "/a").unwrap().data, 2);

    let err = router.try_insert_str(Some("bad method"), "/a", 3).unwrap_err();
    assert!(matches!(err, RouterError::InvalidMethod { .. }));
    assert_eq!(router.len(), 2);
}

#[test]
fn bad_pattern_fails_registration() {
    let mut router: HttpRouter<i32> = HttpRouter::new();
    assert!(router.try_insert(Method::GET, "/x/:*", 1).is_err());
    assert!(router.is_empty());
}
