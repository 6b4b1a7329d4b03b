use super::params::REST_KEY;

#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("parameter name can not be {:?}", REST_KEY)]
    ReservedParamName { pattern: Box<str> },

    #[error("invalid http method: {method:?}")]
    InvalidMethod { method: Box<str> },

    #[error("failed to compile pattern expression")]
    Regex(#[from] regex::Error),
}
