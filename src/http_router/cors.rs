use http::header::{
    HeaderName, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_EXPOSE_HEADERS, ACCESS_CONTROL_REQUEST_METHOD,
};
use http::{HeaderMap, HeaderValue, Method};
use serde::Deserialize;
use smallvec::SmallVec;

pub type CorsHeaders = SmallVec<[(HeaderName, HeaderValue); 4]>;

/// CORS policy of a route.
///
/// Deserializes from `false`, `true` or a table of [`CorsRule`] fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "RawCorsOptions")]
pub enum CorsOptions {
    /// No CORS headers are emitted; handlers may still set their own.
    #[default]
    Disabled,
    /// Any origin, any request header, every response header exposed.
    Permissive,
    Custom(CorsRule),
}

/// `allow_headers` only applies to preflight responses and
/// `expose_headers` only to the others. Preflight responses of an enabled
/// rule always allow the method the preflight asked for.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct CorsRule {
    pub allow_origin: Option<String>,
    pub allow_headers: Option<String>,
    pub expose_headers: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCorsOptions {
    Flag(bool),
    Rule(CorsRule),
}

impl From<RawCorsOptions> for CorsOptions {
    fn from(raw: RawCorsOptions) -> Self {
        match raw {
            RawCorsOptions::Flag(false) => Self::Disabled,
            RawCorsOptions::Flag(true) => Self::Permissive,
            RawCorsOptions::Rule(rule) => Self::Custom(rule),
        }
    }
}

impl From<bool> for CorsOptions {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::Permissive
        } else {
            Self::Disabled
        }
    }
}

impl From<CorsRule> for CorsOptions {
    fn from(rule: CorsRule) -> Self {
        Self::Custom(rule)
    }
}

impl CorsOptions {
    /// Headers to attach to a response.
    ///
    /// `preflight` is the method a preflight asked about, `None` for any
    /// other request.
    pub fn headers(&self, preflight: Option<&Method>) -> CorsHeaders {
        let mut out = CorsHeaders::new();
        match self {
            Self::Disabled => return out,
            Self::Permissive => {
                let any = HeaderValue::from_static("*");
                out.push((ACCESS_CONTROL_ALLOW_ORIGIN, any.clone()));
                if preflight.is_some() {
                    out.push((ACCESS_CONTROL_ALLOW_HEADERS, any));
                } else {
                    out.push((ACCESS_CONTROL_EXPOSE_HEADERS, any));
                }
            }
            Self::Custom(rule) => {
                push_value(&mut out, ACCESS_CONTROL_ALLOW_ORIGIN, &rule.allow_origin);
                if preflight.is_some() {
                    push_value(&mut out, ACCESS_CONTROL_ALLOW_HEADERS, &rule.allow_headers);
                } else {
                    push_value(&mut out, ACCESS_CONTROL_EXPOSE_HEADERS, &rule.expose_headers);
                }
            }
        }
        if let Some(method) = preflight {
            match HeaderValue::from_str(method.as_str()) {
                Ok(v) => out.push((ACCESS_CONTROL_ALLOW_METHODS, v)),
                Err(_) => tracing::warn!(%method, "invalid cors method value"),
            }
        }
        out
    }
}

fn push_value(out: &mut CorsHeaders, name: HeaderName, value: &Option<String>) {
    let value = match value {
        Some(v) => v,
        None => return,
    };
    match HeaderValue::from_str(value) {
        Ok(v) => out.push((name, v)),
        Err(_) => tracing::warn!(header = %name, value = %value, "invalid cors header value"),
    }
}

/// The method a CORS preflight asks about, `None` if the request is not a
/// preflight.
pub fn preflight_method(method: &Method, headers: &HeaderMap) -> Option<Method> {
    if *method != Method::OPTIONS {
        return None;
    }
    let raw = headers.get(ACCESS_CONTROL_REQUEST_METHOD)?;
    let raw = raw.to_str().ok()?.trim().to_ascii_uppercase();
    Method::from_bytes(raw.as_bytes()).ok()
}
