use ironvim_xml::XmlError;
use ironvim_xml::parser::{
    Node, UnParsed, XmlDeserialize, XmlVisitor, first_element_child, node_text, xsi_type,
};
use tracing::trace;

/// A decoded `soapenv:Fault`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    pub code: String,
    pub string: String,
    pub detail: Option<FaultDetail>,
}

/// The typed payload of a fault, e.g. `InvalidLogin` or `NotAuthenticated`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaultDetail {
    pub kind: String,
    pub raw: UnParsed,
}

impl FaultDetail {
    fn from_element<'a>(node: Node<'a, 'a>) -> Result<Self, XmlError> {
        let name = node.tag_name().name();
        let kind = xsi_type(node)
            .unwrap_or_else(|| name.strip_suffix("Fault").unwrap_or(name))
            .to_string();

        Ok(Self {
            kind,
            raw: UnParsed::from_node(node)?,
        })
    }
}

impl std::fmt::Display for Fault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.string)
    }
}

impl std::error::Error for Fault {}

#[derive(Default)]
pub struct FaultVisitor {
    code: Option<String>,
    string: Option<String>,
    detail: Option<FaultDetail>,
}

impl<'a> XmlVisitor<'a> for FaultVisitor {
    type Value = Fault;

    fn visit_children(
        &mut self,
        children: impl Iterator<Item = Node<'a, 'a>>,
    ) -> Result<(), XmlError> {
        for child in children.filter(Node::is_element) {
            match child.tag_name().name() {
                "faultcode" => self.code = Some(node_text(child).trim().to_string()),
                "faultstring" => self.string = Some(node_text(child).to_string()),
                "detail" => {
                    self.detail = first_element_child(child)
                        .map(FaultDetail::from_element)
                        .transpose()?;
                }
                other => trace!(tag = other, "skipping fault element"),
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<Self::Value, XmlError> {
        Ok(Fault {
            code: self.code.ok_or(XmlError::MissingField {
                field: "faultcode",
                parent: "Fault",
            })?,
            string: self.string.unwrap_or_default(),
            detail: self.detail,
        })
    }
}

impl XmlDeserialize<'_> for Fault {
    type Visitor = FaultVisitor;

    fn visitor() -> Self::Visitor {
        FaultVisitor::default()
    }
}
