use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

use ironvim_soap::TransportError;

use crate::config::ClientConfig;

pub const SOAP_CONTENT_TYPE: &str = r#"text/xml; charset="utf-8""#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    /// Upper bound for the whole exchange, taken from the call's deadline.
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name).next()
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// All values of header `name`, compared case-insensitively.
    pub fn header_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        find_header(&self.headers, name)
    }
}

fn find_header<'a>(
    headers: &'a [(String, String)],
    name: &str,
) -> impl Iterator<Item = &'a str> {
    headers
        .iter()
        .filter(move |(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// Blocking HTTP transport. Failures below HTTP (connect, TLS, timeouts) are
/// reported as [`TransportError`]; every received status is a response.
pub trait HttpClient {
    fn send_request(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<H: HttpClient + ?Sized> HttpClient for &H {
    fn send_request(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send_request(request)
    }
}

impl<H: HttpClient + ?Sized> HttpClient for Box<H> {
    fn send_request(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send_request(request)
    }
}

impl<H: HttpClient + ?Sized> HttpClient for Arc<H> {
    fn send_request(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send_request(request)
    }
}

#[derive(Debug)]
pub struct HttpBuilder {
    url: String,
    soap_action: String,
    user_agent: String,
    cookie: Option<String>,
    headers: Vec<(String, String)>,
}

impl HttpBuilder {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            url: config.url.to_string(),
            soap_action: format!("urn:vim25/{}", config.api_version),
            user_agent: config.user_agent.clone(),
            cookie: None,
            headers: vec![],
        }
    }

    pub fn with_cookie(&mut self, cookie: String) -> &mut Self {
        self.cookie = Some(cookie);
        self
    }

    pub fn with_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    fn build_headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![
            ("Content-Type".to_string(), SOAP_CONTENT_TYPE.to_string()),
            ("SOAPAction".to_string(), self.soap_action.clone()),
            ("User-Agent".to_string(), self.user_agent.clone()),
        ];

        if let Some(cookie) = &self.cookie {
            headers.push(("Cookie".to_string(), cookie.clone()));
        }

        headers.extend(self.headers.iter().cloned());
        headers
    }

    pub fn post(&self, body: String, timeout: Option<Duration>) -> HttpRequest {
        HttpRequest {
            method: Method::Post,
            url: self.url.clone(),
            headers: self.build_headers(),
            body: Some(body),
            timeout,
        }
    }
}
