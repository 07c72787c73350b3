use std::sync::Mutex;

use ironvim_macros::{XmlDeserialize, XmlSerialize};
use ironvim_soap::{
    Body, Context, Fault, FaultDetail, Method, RoundTripper, SoapBody, SoapError, TransportError,
    TransportErrorKind,
};
use ironvim_xml::parser::UnParsed;

#[derive(Debug, Clone, PartialEq, XmlSerialize, XmlDeserialize)]
pub struct Ping {
    #[xml(rename = "_this")]
    this: String,
    message: String,
    count: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, XmlSerialize, XmlDeserialize)]
pub struct PingResponse {
    returnval: String,
}

ironvim_soap::define_methods! {
    ping: Ping => PingResponse, "Ping";
}

struct Stub<F>(F);

impl<F> RoundTripper for Stub<F>
where
    F: Fn(&dyn SoapBody, &mut dyn SoapBody) -> Result<(), SoapError>,
{
    fn round_trip(
        &self,
        _ctx: &Context,
        req: &dyn SoapBody,
        res: &mut dyn SoapBody,
    ) -> Result<(), SoapError> {
        (self.0)(req, res)
    }
}

fn request() -> Ping {
    Ping {
        this: "ServiceInstance".to_string(),
        message: "hello".to_string(),
        count: Some(3),
    }
}

fn answer(res: &mut dyn SoapBody, returnval: &str) {
    let body = res
        .as_any_mut()
        .downcast_mut::<Body<Ping>>()
        .expect("response body is Body<Ping>");
    body.res = Some(PingResponse {
        returnval: returnval.to_string(),
    });
}

#[test]
fn canned_response_is_returned_unchanged() {
    let stub = Stub(|_req: &dyn SoapBody, res: &mut dyn SoapBody| {
        answer(res, "pong");
        Ok(())
    });

    let response = ping(&Context::background(), &stub, request()).unwrap();
    assert_eq!(
        response,
        PingResponse {
            returnval: "pong".to_string()
        }
    );
}

#[derive(Debug, thiserror::Error)]
#[error("link down on port {0}")]
struct LinkDown(u32);

#[test]
fn transport_error_is_returned_unchanged() {
    let stub = Stub(|_req: &dyn SoapBody, _res: &mut dyn SoapBody| {
        Err(SoapError::Transport(TransportError::new(
            TransportErrorKind::Connect,
            LinkDown(443),
        )))
    });

    let err = ping(&Context::background(), &stub, request()).unwrap_err();
    let SoapError::Transport(transport) = err else {
        panic!("expected a transport error, got {err:?}");
    };
    assert_eq!(transport.kind, TransportErrorKind::Connect);
    assert!(transport.is_temporary());
    let source = transport
        .source
        .downcast_ref::<LinkDown>()
        .expect("source keeps its type");
    assert_eq!(source.0, 443);
}

#[test]
fn transport_sees_the_callers_request() {
    let seen = Mutex::new(None);
    let stub = Stub(|req: &dyn SoapBody, res: &mut dyn SoapBody| {
        assert_eq!(req.operation(), "Ping");
        assert_eq!(req.response_tag(), "PingResponse");
        let body = req
            .as_any()
            .downcast_ref::<Body<Ping>>()
            .expect("request body is Body<Ping>");
        *seen.lock().unwrap() = body.req.clone();
        answer(res, "pong");
        Ok(())
    });

    ping(&Context::background(), &stub, request()).unwrap();
    assert_eq!(seen.into_inner().unwrap(), Some(request()));
}

#[test]
fn repeated_calls_are_identical() {
    let stub = Stub(|req: &dyn SoapBody, res: &mut dyn SoapBody| {
        let message = req
            .as_any()
            .downcast_ref::<Body<Ping>>()
            .and_then(|body| body.req.as_ref())
            .map(|req| req.message.to_uppercase())
            .unwrap_or_default();
        answer(res, &message);
        Ok(())
    });

    let ctx = Context::background();
    let first = ping(&ctx, &stub, request()).unwrap();
    let second = ping(&ctx, &stub, request()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.returnval, "HELLO");
}

#[test]
fn fault_in_body_becomes_an_error() {
    let stub = Stub(|_req: &dyn SoapBody, res: &mut dyn SoapBody| {
        res.set_fault(Fault {
            code: "ServerFaultCode".to_string(),
            string: "Permission to perform this operation was denied.".to_string(),
            detail: Some(FaultDetail {
                kind: "NoPermission".to_string(),
                raw: UnParsed::default(),
            }),
        });
        Ok(())
    });

    let err = ping(&Context::background(), &stub, request()).unwrap_err();
    assert!(err.is_fault_kind("NoPermission"));
    assert!(!err.is_temporary());
    assert_eq!(
        err.to_string(),
        "ServerFaultCode: Permission to perform this operation was denied."
    );
}

#[test]
fn empty_reply_is_missing_response() {
    let stub = Stub(|_req: &dyn SoapBody, _res: &mut dyn SoapBody| Ok(()));

    let err = ping(&Context::background(), &stub, request()).unwrap_err();
    assert!(matches!(
        err,
        SoapError::MissingResponse { operation: "Ping" }
    ));
}

#[test]
fn catalog_lists_the_table() {
    assert_eq!(CATALOG.len(), 1);
    assert_eq!(CATALOG[0].name, "Ping");
    assert_eq!(CATALOG[0].request_type, "Ping");
    assert_eq!(CATALOG[0].response_tag, <Ping as Method>::RESPONSE_TAG);
    assert_eq!(<Ping as Method>::NAMESPACE, "urn:vim25");
}
