use std::fmt;

use http::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use http::{HeaderMap, Method};

use super::body::RequestBody;
use super::credentials::{AuthMode, Credentials};

/// `X-Dataverse-key`: carries the API token, and the admin key on signing calls.
pub const TOKEN_HEADER: HeaderName = HeaderName::from_static("x-dataverse-key");

/// One logical API call.
///
/// Built from a [`Client`](crate::Client) with [`Client::request`](crate::Client::request)
/// and consumed by [`Client::execute`](crate::Client::execute) or
/// [`Client::execute_stream`](crate::Client::execute_stream). The server base,
/// token and credentials are copied from the client at construction time.
///
/// `path` is either relative to the server base or a fully qualified URL that
/// already starts with the server base, in which case it is used verbatim.
pub struct Request {
    server: String,
    path: String,
    method: Method,
    body: Option<RequestBody>,
    headers: HeaderMap,
    token: Option<String>,
    credentials: Option<Credentials>,
}

impl Request {
    pub(crate) fn new(
        server: String,
        path: String,
        method: Method,
        token: Option<String>,
        credentials: Option<Credentials>,
    ) -> Self {
        Self {
            server,
            path,
            method,
            body: None,
            headers: HeaderMap::new(),
            token,
            credentials,
        }
    }

    /// Set the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Add a header value. Values for the same name accumulate.
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Add every value of `headers`, keeping values already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use dataverse_api::{Client, json_content_header};
    /// use http::Method;
    ///
    /// let client = Client::new("https://demo.dataverse.org");
    /// let request = client
    ///     .request(Method::POST, "/api/v1/dataverses/root/datasets")
    ///     .headers(json_content_header())
    ///     .body(r#"{"datasetVersion":{}}"#);
    /// assert_eq!(request.header_map()["content-type"], "application/json");
    /// ```
    #[must_use]
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        append_all(&mut self.headers, headers);
        self
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Caller-supplied headers.
    pub fn header_map(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// The authentication mode this request will use.
    pub fn auth_mode(&self) -> AuthMode {
        if self.credentials.is_some() {
            AuthMode::SignedUrl
        } else {
            AuthMode::TokenHeader
        }
    }

    pub(crate) fn take_body(&mut self) -> Option<RequestBody> {
        self.body.take()
    }

    pub(crate) fn take_headers(&mut self) -> HeaderMap {
        std::mem::take(&mut self.headers)
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("server", &self.server)
            .field("path", &self.path)
            .field("method", &self.method)
            .field("body", &self.body)
            .field("headers", &self.headers)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("credentials", &self.credentials)
            .finish()
    }
}

/// Move every value of `source` into `target` without replacing any.
pub(crate) fn append_all(target: &mut HeaderMap, source: HeaderMap) {
    let mut current = None;
    for (name, value) in source {
        // Only the first value of each name carries the name.
        if let Some(name) = name {
            current = Some(name);
        }
        if let Some(name) = &current {
            target.append(name.clone(), value);
        }
    }
}

/// Headers for a JSON request body.
pub fn json_content_header() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.append(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}
