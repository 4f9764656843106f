//! Signed request construction
//!
//! An [`EndpointRequest`] names a path template such as
//! `/stops/{stop_id}/route_type/{route_type}`, the arguments for its
//! placeholders and the caller's query parameters. [`RequestBuilder`] turns it
//! into a [`SignedUrl`]:
//!
//! 1. placeholders are replaced and the `/v3` prefix is prepended
//! 2. `devid` becomes the first query parameter, followed by the caller's
//! 3. `path?query` is signed with the API key
//! 4. `&signature=<hex>` is appended and the base URL prefixed
//!
//! The signed bytes are exactly the path and query that go on the wire.

use std::fmt;

use crate::config::Credentials;
use crate::error::PtvError;
use crate::models::RouteType;
use crate::query::QueryParams;
use crate::signature;

/// Version prefix of every Timetable API path
pub const API_VERSION: &str = "/v3";

/// Query parameter carrying the developer id
pub const DEVELOPER_ID_PARAM: &str = "devid";

/// Query parameter carrying the request signature
pub const SIGNATURE_PARAM: &str = "signature";

/// Value substituted into a path placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum PathArg {
    /// Numeric identifier, inserted verbatim
    Id(u64),
    /// Coordinate or other number, inserted verbatim
    Number(f64),
    /// Free text, percent-encoded as a single path segment
    Text(String),
}

impl PathArg {
    fn render(&self) -> String {
        match self {
            Self::Id(id) => id.to_string(),
            Self::Number(n) => n.to_string(),
            Self::Text(text) => urlencoding::encode(text).into_owned(),
        }
    }
}

impl From<u64> for PathArg {
    fn from(id: u64) -> Self {
        Self::Id(id)
    }
}

impl From<u32> for PathArg {
    fn from(id: u32) -> Self {
        Self::Id(u64::from(id))
    }
}

impl From<RouteType> for PathArg {
    fn from(route_type: RouteType) -> Self {
        Self::Id(u64::from(route_type.code()))
    }
}

impl From<f64> for PathArg {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for PathArg {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for PathArg {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// One call's worth of request data, built fresh for every call
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointRequest {
    path_template: String,
    path_args: Vec<(String, PathArg)>,
    query: QueryParams,
}

impl EndpointRequest {
    /// Start a request for a path template (relative to the version prefix)
    #[must_use]
    pub fn new(path_template: impl Into<String>) -> Self {
        Self {
            path_template: path_template.into(),
            path_args: Vec::new(),
            query: QueryParams::new(),
        }
    }

    /// Bind a placeholder in the path template
    #[must_use]
    pub fn arg(mut self, placeholder: impl Into<String>, value: impl Into<PathArg>) -> Self {
        self.path_args.push((placeholder.into(), value.into()));
        self
    }

    /// Replace the query parameters
    #[must_use]
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Path template as given
    #[must_use]
    pub fn path_template(&self) -> &str {
        &self.path_template
    }

    /// Caller-supplied query parameters
    #[must_use]
    pub const fn query(&self) -> &QueryParams {
        &self.query
    }

    /// Substitute placeholders and prepend the version prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if a placeholder has no argument, an argument has no
    /// placeholder, or a brace is left unclosed.
    pub fn render_path(&self) -> Result<String, PtvError> {
        let mut path = String::from(API_VERSION);
        let mut used = vec![false; self.path_args.len()];
        let mut rest = self.path_template.as_str();

        while let Some(open) = rest.find('{') {
            path.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let close = after.find('}').ok_or_else(|| {
                PtvError::InvalidRequest(format!(
                    "unclosed placeholder in path template {}",
                    self.path_template
                ))
            })?;
            let name = &after[..close];

            let index = self
                .path_args
                .iter()
                .position(|(placeholder, _)| placeholder == name)
                .ok_or_else(|| {
                    PtvError::InvalidRequest(format!("missing path argument {{{name}}}"))
                })?;
            used[index] = true;
            let arg = &self.path_args[index].1;
            if matches!(arg, PathArg::Number(n) if !n.is_finite()) {
                return Err(PtvError::InvalidRequest(format!(
                    "path argument {{{name}}} must be a finite number"
                )));
            }
            path.push_str(&arg.render());

            rest = &after[close + 1..];
        }
        path.push_str(rest);

        if let Some((name, _)) = self
            .path_args
            .iter()
            .zip(&used)
            .find_map(|(arg, used)| (!used).then_some(arg))
        {
            return Err(PtvError::InvalidRequest(format!(
                "path argument {name} has no placeholder in {}",
                self.path_template
            )));
        }

        Ok(path)
    }
}

/// A fully signed, absolute request URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedUrl {
    url: String,
    message_len: usize,
    message_start: usize,
    signature: String,
}

impl SignedUrl {
    /// The absolute URL to send
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// The exact `path?query` string that was signed
    #[must_use]
    pub fn signed_message(&self) -> &str {
        &self.url[self.message_start..self.message_start + self.message_len]
    }

    /// Rendered path, starting with the version prefix
    #[must_use]
    pub fn path(&self) -> &str {
        let message = self.signed_message();
        message.split_once('?').map_or(message, |(path, _)| path)
    }

    /// Upper-case hex signature
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }
}

impl fmt::Display for SignedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl AsRef<str> for SignedUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

/// Signs endpoint requests with a set of credentials
#[derive(Debug, Clone, Copy)]
pub struct RequestBuilder<'a> {
    credentials: &'a Credentials,
    base_url: &'a str,
}

impl<'a> RequestBuilder<'a> {
    /// Create a builder for the given credentials and base URL
    #[must_use]
    pub fn new(credentials: &'a Credentials, base_url: &'a str) -> Self {
        Self {
            credentials,
            base_url: base_url.trim_end_matches('/'),
        }
    }

    /// Build the signed URL for a request
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be rendered or the caller tried to
    /// set `devid` or `signature` themselves.
    pub fn build(&self, request: &EndpointRequest) -> Result<SignedUrl, PtvError> {
        let path = request.render_path()?;

        for reserved in [DEVELOPER_ID_PARAM, SIGNATURE_PARAM] {
            if request.query.contains(reserved) {
                return Err(PtvError::InvalidRequest(format!(
                    "query parameter {reserved} is set by the client"
                )));
            }
        }

        if let Some(name) = request.query.first_non_finite() {
            return Err(PtvError::InvalidRequest(format!(
                "query parameter {name} must be a finite number"
            )));
        }

        let mut query = QueryParams::new();
        query.insert(DEVELOPER_ID_PARAM, self.credentials.developer_id.as_str());
        for (name, value) in request.query.iter() {
            query.insert(name, value.clone());
        }

        let message = format!("{path}?{}", query.encode());
        let signature = signature::sign(
            self.credentials.api_key().as_bytes(),
            message.as_bytes(),
        );

        let url = format!(
            "{}{message}&{SIGNATURE_PARAM}={signature}",
            self.base_url
        );

        Ok(SignedUrl {
            url,
            message_len: message.len(),
            message_start: self.base_url.len(),
            signature,
        })
    }
}
