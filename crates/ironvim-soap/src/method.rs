use std::any::Any;
use std::sync::Arc;

use ironvim_xml::XmlError;
use ironvim_xml::builder::{Element, XmlSerialize};
use ironvim_xml::parser::{Node, XmlDeserialize};
use tracing::{debug, instrument};

use crate::{Context, Fault, SoapError};

pub trait HasFault {
    fn fault(&self) -> Option<&Fault>;
}

/// The payload of one envelope, seen by the transport without knowing the operation.
pub trait SoapBody: HasFault {
    fn operation(&self) -> &'static str;

    fn response_tag(&self) -> &'static str;

    /// Builds the request element (`<Login xmlns="urn:vim25">...`).
    fn encode_request(&self) -> Result<Element<'_>, SoapError>;

    /// Fills the response slot from the element named [`SoapBody::response_tag`].
    fn decode_response<'a>(&mut self, node: Node<'a, 'a>) -> Result<(), XmlError>;

    fn set_fault(&mut self, fault: Fault);

    /// Drops any response or fault left by an earlier exchange.
    fn clear(&mut self);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Sends a request body and fills a response body.
///
/// Implementations perform exactly one exchange. On success the response body holds
/// either the decoded response or the fault the server returned; a transport may also
/// report that fault as [`SoapError::Fault`].
pub trait RoundTripper {
    fn round_trip(
        &self,
        ctx: &Context,
        req: &dyn SoapBody,
        res: &mut dyn SoapBody,
    ) -> Result<(), SoapError>;
}

impl<R: RoundTripper + ?Sized> RoundTripper for &R {
    fn round_trip(
        &self,
        ctx: &Context,
        req: &dyn SoapBody,
        res: &mut dyn SoapBody,
    ) -> Result<(), SoapError> {
        (**self).round_trip(ctx, req, res)
    }
}

impl<R: RoundTripper + ?Sized> RoundTripper for Box<R> {
    fn round_trip(
        &self,
        ctx: &Context,
        req: &dyn SoapBody,
        res: &mut dyn SoapBody,
    ) -> Result<(), SoapError> {
        (**self).round_trip(ctx, req, res)
    }
}

impl<R: RoundTripper + ?Sized> RoundTripper for Arc<R> {
    fn round_trip(
        &self,
        ctx: &Context,
        req: &dyn SoapBody,
        res: &mut dyn SoapBody,
    ) -> Result<(), SoapError> {
        (**self).round_trip(ctx, req, res)
    }
}

/// A remote operation, implemented on its request type.
pub trait Method: XmlSerialize + 'static {
    /// Request element name, e.g. `PowerOnVM_Task`.
    const NAME: &'static str;
    const RESPONSE_TAG: &'static str;
    const NAMESPACE: &'static str = crate::namespace::VIM25;

    type Response: for<'a> XmlDeserialize<'a> + 'static;
}

/// One catalog row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodInfo {
    pub name: &'static str,
    pub request_type: &'static str,
    pub response_tag: &'static str,
}

/// Envelope body for method `M`. After a round trip at most one of `res` and
/// `fault` is set.
pub struct Body<M: Method> {
    pub req: Option<M>,
    pub res: Option<M::Response>,
    pub fault: Option<Fault>,
}

impl<M: Method> Default for Body<M> {
    fn default() -> Self {
        Self {
            req: None,
            res: None,
            fault: None,
        }
    }
}

impl<M: Method> Body<M> {
    pub fn request(req: M) -> Self {
        Self {
            req: Some(req),
            ..Self::default()
        }
    }

    pub fn into_result(self) -> Result<M::Response, SoapError> {
        if let Some(fault) = self.fault {
            return Err(SoapError::Fault(fault));
        }
        self.res
            .ok_or(SoapError::MissingResponse { operation: M::NAME })
    }
}

impl<M: Method> HasFault for Body<M> {
    fn fault(&self) -> Option<&Fault> {
        self.fault.as_ref()
    }
}

impl<M: Method> SoapBody for Body<M> {
    fn operation(&self) -> &'static str {
        M::NAME
    }

    fn response_tag(&self) -> &'static str {
        M::RESPONSE_TAG
    }

    fn encode_request(&self) -> Result<Element<'_>, SoapError> {
        let req = self.req.as_ref().ok_or(XmlError::MissingField {
            field: "req",
            parent: M::NAME,
        })?;

        let element = Element::new(M::NAME)
            .set_namespace(M::NAMESPACE)
            .add_namespace_declaration(M::NAMESPACE, None);
        Ok(req.append_to_element(element))
    }

    fn decode_response<'a>(&mut self, node: Node<'a, 'a>) -> Result<(), XmlError> {
        self.res = Some(<M::Response as XmlDeserialize<'a>>::from_node(node)?);
        Ok(())
    }

    fn set_fault(&mut self, fault: Fault) {
        self.fault = Some(fault);
    }

    fn clear(&mut self) {
        self.res = None;
        self.fault = None;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Performs `M` with one round trip through `rt`.
///
/// Transport errors are returned unchanged. A fault left in the response body is
/// returned as [`SoapError::Fault`], and a body with neither response nor fault as
/// [`SoapError::MissingResponse`].
#[instrument(level = "debug", skip_all, fields(operation = M::NAME))]
pub fn invoke<M, R>(ctx: &Context, rt: &R, req: M) -> Result<M::Response, SoapError>
where
    M: Method,
    R: RoundTripper + ?Sized,
{
    let req_body = Body::request(req);
    let mut res_body = Body::<M>::default();

    rt.round_trip(ctx, &req_body, &mut res_body)?;

    let result = res_body.into_result();
    if let Err(error) = &result {
        debug!(%error, "call failed");
    }
    result
}
