use std::error::Error as StdError;
use std::sync::Arc;
use std::time::Duration;

use ironvim_client_core::http::{HttpClient, HttpRequest, HttpResponse, Method};
use ironvim_soap::{TransportError, TransportErrorKind};
use tracing::{debug, error, info_span, instrument};

/// Blocking transport on a shared `ureq` agent.
pub struct UreqHttpClient {
    agent: ureq::Agent,
}

impl UreqHttpClient {
    /// `insecure` accepts any server certificate and host name.
    pub fn new(insecure: bool) -> anyhow::Result<Self> {
        let connector = if insecure {
            tracing::warn!("TLS certificate verification is disabled");
            native_tls::TlsConnector::builder()
                .danger_accept_invalid_certs(true)
                .danger_accept_invalid_hostnames(true)
                .build()?
        } else {
            native_tls::TlsConnector::new()?
        };

        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(30))
            .timeout_read(Duration::from_secs(300))
            .tls_connector(Arc::new(connector))
            .build();

        Ok(Self { agent })
    }
}

fn collect_headers(response: &ureq::Response) -> Vec<(String, String)> {
    response
        .headers_names()
        .iter()
        .flat_map(|name| {
            response
                .all(name)
                .into_iter()
                .map(move |value| (name.clone(), value.to_string()))
        })
        .collect()
}

fn read_response(response: ureq::Response) -> Result<HttpResponse, TransportError> {
    let status_code = response.status();
    let headers = collect_headers(&response);
    let body = response.into_string().map_err(|e| {
        error!(error = %e, "failed to read response body");
        TransportError::new(io_kind(&e), e)
    })?;

    Ok(HttpResponse {
        status_code,
        headers,
        body,
    })
}

fn io_kind(error: &std::io::Error) -> TransportErrorKind {
    match error.kind() {
        std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock => TransportErrorKind::Timeout,
        _ => TransportErrorKind::Io,
    }
}

fn transport_kind(transport: &ureq::Transport) -> TransportErrorKind {
    let source = transport.source();
    if source.is_some_and(|source| source.downcast_ref::<native_tls::Error>().is_some()) {
        return TransportErrorKind::Tls;
    }

    match transport.kind() {
        ureq::ErrorKind::Dns | ureq::ErrorKind::ConnectionFailed | ureq::ErrorKind::ProxyConnect => {
            TransportErrorKind::Connect
        }
        ureq::ErrorKind::Io => source
            .and_then(|source| source.downcast_ref::<std::io::Error>())
            .map_or(TransportErrorKind::Io, io_kind),
        _ => TransportErrorKind::Other,
    }
}

impl HttpClient for UreqHttpClient {
    #[instrument(
        name = "http_client.send_request",
        level = "debug",
        skip_all,
        fields(method = %request.method, url = %request.url)
    )]
    fn send_request(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let span = info_span!("http.request", body_length = request.body.as_ref().map_or(0, String::len));
        let _enter = span.enter();

        let method = match request.method {
            Method::Get => "GET",
            Method::Post => "POST",
        };
        let mut ureq_request = self.agent.request(method, &request.url);

        for (name, value) in &request.headers {
            ureq_request = ureq_request.set(name, value);
        }

        if let Some(timeout) = request.timeout {
            ureq_request = ureq_request.timeout(timeout);
        }

        let result = match &request.body {
            Some(body) => ureq_request.send_string(body),
            None => ureq_request.call(),
        };

        match result {
            Ok(response) => read_response(response),
            // Faults arrive as 500; the SOAP layer decides what a status means.
            Err(ureq::Error::Status(status, response)) => {
                debug!(status, "received status response");
                read_response(response)
            }
            Err(ureq::Error::Transport(transport)) => {
                let kind = transport_kind(&transport);
                error!(error = %transport, ?kind, "request failed");
                Err(TransportError::new(kind, transport))
            }
        }
    }
}
