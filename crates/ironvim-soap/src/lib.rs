pub mod context;
pub mod macros;
pub mod method;
pub mod namespace;
pub mod soap;

use std::error::Error as StdError;

use ironvim_xml::XmlError;
use ironvim_xml::builder::XmlBuilderError;

pub use context::Context;
pub use method::{Body, HasFault, Method, MethodInfo, RoundTripper, SoapBody, invoke};
pub use soap::fault::{Fault, FaultDetail};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Connect,
    Timeout,
    Io,
    Tls,
    Other,
}

/// A failure below the SOAP layer. The original error is kept as the source.
#[derive(Debug, thiserror::Error)]
#[error("{kind:?} error: {source}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    #[source]
    pub source: Box<dyn StdError + Send + Sync>,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self {
            kind,
            source: source.into(),
        }
    }

    /// Connection resets, timeouts and I/O errors may succeed when tried again.
    pub fn is_temporary(&self) -> bool {
        matches!(
            self.kind,
            TransportErrorKind::Connect | TransportErrorKind::Timeout | TransportErrorKind::Io
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SoapError {
    #[error("{0}")]
    Fault(Fault),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("unexpected HTTP status {status}")]
    HttpStatus { status: u16, body: String },

    #[error("XML error: {0}")]
    Xml(#[from] XmlError),

    #[error("call cancelled")]
    Cancelled,

    #[error("deadline exceeded")]
    DeadlineExceeded,

    #[error("{operation} reply carried neither a response nor a fault")]
    MissingResponse { operation: &'static str },
}

impl From<XmlBuilderError> for SoapError {
    fn from(error: XmlBuilderError) -> Self {
        Self::Xml(error.into())
    }
}

impl SoapError {
    pub fn fault(&self) -> Option<&Fault> {
        match self {
            Self::Fault(fault) => Some(fault),
            _ => None,
        }
    }

    /// True when this is a fault whose detail names `kind`, e.g. `"NotAuthenticated"`.
    pub fn is_fault_kind(&self, kind: &str) -> bool {
        self.fault()
            .and_then(|fault| fault.detail.as_ref())
            .is_some_and(|detail| detail.kind == kind)
    }

    pub fn is_temporary(&self) -> bool {
        matches!(self, Self::Transport(error) if error.is_temporary())
    }
}
