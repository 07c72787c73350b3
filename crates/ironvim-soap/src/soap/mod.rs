pub mod fault;

use ironvim_xml::builder::{Builder, Declaration, Element};
use ironvim_xml::parser::{Node, XmlDeserialize, first_element_child, parse};
use ironvim_xml::{XSD_NAMESPACE_ALIAS, XSD_NAMESPACE_URI, XSI_NAMESPACE_ALIAS, XSI_NAMESPACE_URI, XmlError};
use tracing::{debug, instrument};

use crate::SoapError;
use crate::method::SoapBody;
use crate::namespace::{SOAP_ENVELOPE, SOAP_ENVELOPE_ALIAS};
use fault::Fault;

/// A SOAP 1.1 request: optional `operationID` header and one body element.
#[derive(typed_builder::TypedBuilder)]
pub struct RequestEnvelope<'a> {
    body: &'a dyn SoapBody,
    #[builder(default, setter(strip_option))]
    operation_id: Option<&'a str>,
}

impl RequestEnvelope<'_> {
    pub fn to_xml_string(&self) -> Result<String, SoapError> {
        let mut envelope = Element::new("Envelope")
            .set_namespace(SOAP_ENVELOPE)
            .add_namespace_declaration(SOAP_ENVELOPE, Some(SOAP_ENVELOPE_ALIAS))
            .add_namespace_declaration(XSD_NAMESPACE_URI, Some(XSD_NAMESPACE_ALIAS))
            .add_namespace_declaration(XSI_NAMESPACE_URI, Some(XSI_NAMESPACE_ALIAS));

        if let Some(operation_id) = self.operation_id {
            envelope = envelope.add_child(
                Element::new("Header")
                    .set_namespace(SOAP_ENVELOPE)
                    .add_child(Element::new("operationID").set_text(operation_id)),
            );
        }

        let body = Element::new("Body")
            .set_namespace(SOAP_ENVELOPE)
            .add_child(self.body.encode_request()?);

        let builder = Builder::new(
            Some(Declaration::new("1.0", "UTF-8")),
            envelope.add_child(body),
        );
        Ok(builder.to_xml_string()?)
    }
}

fn soap_child<'a>(node: Node<'a, 'a>, name: &str) -> Option<Node<'a, 'a>> {
    node.children().find(|child| {
        child.is_element()
            && child.tag_name().name() == name
            && child.tag_name().namespace() == Some(SOAP_ENVELOPE)
    })
}

/// Decodes a response envelope into `res`, replacing whatever it held.
///
/// A `Fault` payload is stored with [`SoapBody::set_fault`] and is not an error here;
/// the caller decides how to surface it. An empty `Body` is
/// [`SoapError::MissingResponse`].
#[instrument(level = "trace", skip_all, fields(operation = res.operation()))]
pub fn read_response(xml: &str, res: &mut dyn SoapBody) -> Result<(), SoapError> {
    res.clear();

    let document = parse(xml)?;
    let root = document.root_element();

    if root.tag_name().name() != "Envelope" {
        return Err(XmlError::XmlInvalidTag {
            expected: "Envelope".to_string(),
            found: root.tag_name().name().to_string(),
        }
        .into());
    }
    if root.tag_name().namespace() != Some(SOAP_ENVELOPE) {
        return Err(XmlError::XmlInvalidNamespace {
            expected: SOAP_ENVELOPE.to_string(),
            found: root.tag_name().namespace().map(ToString::to_string),
        }
        .into());
    }

    let body = soap_child(root, "Body")
        .ok_or_else(|| XmlError::InvalidXml("SOAP envelope has no Body".to_string()))?;

    let Some(payload) = first_element_child(body) else {
        return Err(SoapError::MissingResponse {
            operation: res.operation(),
        });
    };

    if payload.tag_name().name() == "Fault" {
        let fault = Fault::from_node(payload)?;
        debug!(%fault, "server returned a fault");
        res.set_fault(fault);
        return Ok(());
    }

    if payload.tag_name().name() != res.response_tag() {
        return Err(XmlError::XmlInvalidTag {
            expected: res.response_tag().to_string(),
            found: payload.tag_name().name().to_string(),
        }
        .into());
    }

    res.decode_response(payload)?;
    Ok(())
}
