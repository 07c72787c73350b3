use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use ironvim_soap::soap::{RequestEnvelope, read_response};
use ironvim_soap::{Context, RoundTripper, SoapBody, SoapError};
use tracing::{Span, debug, instrument, trace};

use crate::config::ClientConfig;
use crate::http::{HttpBuilder, HttpClient, HttpResponse};

pub const SESSION_COOKIE_NAME: &str = "vmware_soap_session";

static CLIENT_IDS: AtomicU64 = AtomicU64::new(0);

/// SOAP over HTTP: one POST per round trip.
///
/// The session cookie handed out by `Login` is kept and sent back on every later
/// request. Clients are `Send + Sync` when `H` is; concurrent calls share the cookie.
#[derive(Debug)]
pub struct SoapClient<H> {
    http: H,
    config: ClientConfig,
    id: u64,
    requests: AtomicU64,
    cookie: Mutex<Option<String>>,
}

impl<H: HttpClient> SoapClient<H> {
    pub fn new(http: H, config: ClientConfig) -> Self {
        Self {
            http,
            config,
            id: CLIENT_IDS.fetch_add(1, Ordering::Relaxed) + 1,
            requests: AtomicU64::new(0),
            cookie: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session_cookie(&self) -> Option<String> {
        self.cookie
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the session cookie, e.g. to resume a saved session.
    pub fn set_session_cookie(&self, cookie: Option<String>) {
        *self.cookie.lock().unwrap_or_else(PoisonError::into_inner) = cookie;
    }

    fn remember_session(&self, response: &HttpResponse) {
        if let Some(cookie) = session_cookie(response) {
            debug!(client = self.id, "session cookie updated");
            self.set_session_cookie(Some(cookie));
        }
    }
}

/// The `name=value` part of the session `Set-Cookie` header, if present.
pub fn session_cookie(response: &HttpResponse) -> Option<String> {
    response.header_values("Set-Cookie").find_map(|header| {
        let pair = header.split(';').next()?.trim();
        let (name, _) = pair.split_once('=')?;
        (name.trim() == SESSION_COOKIE_NAME).then(|| pair.to_string())
    })
}

impl<H: HttpClient> RoundTripper for SoapClient<H> {
    #[instrument(
        name = "soap_client.round_trip",
        level = "debug",
        skip_all,
        fields(client = self.id, request = tracing::field::Empty, operation = req.operation()),
        err
    )]
    fn round_trip(
        &self,
        ctx: &Context,
        req: &dyn SoapBody,
        res: &mut dyn SoapBody,
    ) -> Result<(), SoapError> {
        ctx.check()?;

        let request_id = self.requests.fetch_add(1, Ordering::Relaxed) + 1;
        Span::current().record("request", request_id);

        let generated = (ctx.operation_id().is_none() && self.config.operation_ids)
            .then(|| uuid::Uuid::new_v4().to_string());
        let operation_id = ctx.operation_id().or(generated.as_deref());

        let body = match operation_id {
            Some(operation_id) => RequestEnvelope::builder()
                .body(req)
                .operation_id(operation_id)
                .build()
                .to_xml_string()?,
            None => RequestEnvelope::builder()
                .body(req)
                .build()
                .to_xml_string()?,
        };
        trace!(client = self.id, request = request_id, %body, "request body");

        let mut builder = HttpBuilder::new(&self.config);
        if let Some(cookie) = self.session_cookie() {
            builder.with_cookie(cookie);
        }

        let response = self
            .http
            .send_request(builder.post(body, ctx.remaining()))?;
        self.remember_session(&response);

        trace!(
            client = self.id,
            request = request_id,
            status = response.status_code,
            body = %response.body,
            "response body"
        );

        match response.status_code {
            // Faults arrive with 500.
            200 | 500 => {
                read_response(&response.body, res)?;
                match res.fault() {
                    Some(fault) => Err(SoapError::Fault(fault.clone())),
                    None => Ok(()),
                }
            }
            status => Err(SoapError::HttpStatus {
                status,
                body: response.body,
            }),
        }
    }
}
