use std::fs;

use ironvim_macros::{XmlDeserialize, XmlSerialize};
use ironvim_soap::soap::{RequestEnvelope, read_response};
use ironvim_soap::{Body, SoapBody, SoapError};
use ironvim_xml::XmlError;

#[derive(Debug, Clone, PartialEq, XmlSerialize, XmlDeserialize)]
pub struct Ping {
    message: String,
}

#[derive(Debug, Clone, PartialEq, XmlSerialize, XmlDeserialize)]
pub struct PingResponse {
    returnval: String,
}

ironvim_soap::define_methods! {
    ping: Ping => PingResponse, "Ping";
}

#[test]
fn request_envelope_layout() {
    let body = Body::request(Ping {
        message: "salt & pepper".to_string(),
    });

    let xml = RequestEnvelope::builder()
        .body(&body)
        .operation_id("op-7")
        .build()
        .to_xml_string()
        .unwrap();

    assert_eq!(
        xml,
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<soapenv:Envelope xmlns:soapenv=\"http://schemas.xmlsoap.org/soap/envelope/\"",
            " xmlns:xsd=\"http://www.w3.org/2001/XMLSchema\"",
            " xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">",
            "<soapenv:Header><operationID>op-7</operationID></soapenv:Header>",
            "<soapenv:Body><Ping xmlns=\"urn:vim25\"><message>salt &amp; pepper</message></Ping></soapenv:Body>",
            "</soapenv:Envelope>"
        )
    );
}

#[test]
fn request_envelope_without_header() {
    let body = Body::request(Ping {
        message: "x".to_string(),
    });
    let xml = RequestEnvelope::builder()
        .body(&body)
        .build()
        .to_xml_string()
        .unwrap();
    assert!(!xml.contains("Header"));
}

#[test]
fn empty_request_body_cannot_be_encoded() {
    let body = Body::<Ping>::default();
    assert!(matches!(
        body.encode_request(),
        Err(SoapError::Xml(XmlError::MissingField { field: "req", .. }))
    ));
}

#[test]
#[tracing_test::traced_test]
fn response_is_decoded() {
    let xml = fs::read_to_string("tests/resources/ping_response.xml").unwrap();
    let mut body = Body::<Ping>::default();

    read_response(&xml, &mut body).unwrap();

    assert!(body.fault.is_none());
    assert_eq!(
        body.into_result().unwrap(),
        PingResponse {
            returnval: "pong".to_string()
        }
    );
}

#[test]
#[tracing_test::traced_test]
fn fault_is_stored_in_body() {
    let xml = fs::read_to_string("tests/resources/invalid_login_fault.xml").unwrap();
    let mut body = Body::<Ping>::default();

    read_response(&xml, &mut body).unwrap();

    let fault = body.fault.clone().unwrap();
    assert_eq!(fault.code, "ServerFaultCode");
    assert_eq!(
        fault.string,
        "Cannot complete login due to an incorrect user name or password."
    );
    assert_eq!(fault.detail.as_ref().unwrap().kind, "InvalidLogin");
    assert!(body.res.is_none());

    let err = body.into_result().unwrap_err();
    assert!(err.is_fault_kind("InvalidLogin"));
    assert!(logs_contain("server returned a fault"));
}

#[test]
fn unexpected_response_element_is_rejected() {
    let xml = r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/"><soapenv:Body><PongResponse xmlns="urn:vim25"/></soapenv:Body></soapenv:Envelope>"#;
    let mut body = Body::<Ping>::default();

    let err = read_response(xml, &mut body).unwrap_err();
    assert!(matches!(
        err,
        SoapError::Xml(XmlError::XmlInvalidTag { ref expected, ref found })
            if expected == "PingResponse" && found == "PongResponse"
    ));
}

#[test]
fn non_soap_root_is_rejected() {
    let mut body = Body::<Ping>::default();
    let err = read_response("<html><body>502</body></html>", &mut body).unwrap_err();
    assert!(matches!(err, SoapError::Xml(XmlError::XmlInvalidTag { .. })));

    let err = read_response("<Envelope><Body/></Envelope>", &mut body).unwrap_err();
    assert!(matches!(
        err,
        SoapError::Xml(XmlError::XmlInvalidNamespace { .. })
    ));
}

#[test]
fn empty_body_is_missing_response() {
    let xml = r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/"><soapenv:Body/></soapenv:Envelope>"#;
    let mut body = Body::<Ping>::default();
    assert!(matches!(
        read_response(xml, &mut body),
        Err(SoapError::MissingResponse { operation: "Ping" })
    ));
}

#[test]
fn reading_a_response_replaces_an_earlier_fault() {
    let fault = fs::read_to_string("tests/resources/invalid_login_fault.xml").unwrap();
    let response = fs::read_to_string("tests/resources/ping_response.xml").unwrap();
    let mut body = Body::<Ping>::default();

    read_response(&fault, &mut body).unwrap();
    assert!(body.fault.is_some());

    read_response(&response, &mut body).unwrap();
    assert!(body.fault.is_none());
    assert_eq!(
        body.into_result().unwrap(),
        PingResponse {
            returnval: "pong".to_string()
        }
    );
}
