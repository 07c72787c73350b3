use ironvim_xml::XmlError;
use ironvim_xml::builder::{Attribute, Element, XmlSerialize};
use ironvim_xml::parser::{Node, XmlDeserialize, XmlVisitor, node_text};

/// A typed handle to a server-side object, written as `<x type="VirtualMachine">vm-42</x>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ManagedObjectReference {
    pub kind: String,
    pub value: String,
}

impl ManagedObjectReference {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }

    /// The root object every session starts from.
    pub fn service_instance() -> Self {
        Self::new("ServiceInstance", "ServiceInstance")
    }
}

impl std::fmt::Display for ManagedObjectReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.value)
    }
}

impl std::str::FromStr for ManagedObjectReference {
    type Err = XmlError;

    /// Parses the `Type:value` form produced by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((kind, value)) if !kind.is_empty() && !value.is_empty() => {
                Ok(Self::new(kind, value))
            }
            _ => Err(XmlError::InvalidValue {
                ty: "ManagedObjectReference",
                value: s.to_string(),
            }),
        }
    }
}

impl XmlSerialize for ManagedObjectReference {
    fn append_to_element<'a>(&'a self, element: Element<'a>) -> Element<'a> {
        element
            .add_attribute(Attribute::new("type", self.kind.as_str()))
            .set_text(self.value.as_str())
    }
}

#[derive(Default)]
pub struct ManagedObjectReferenceVisitor {
    kind: Option<String>,
    value: Option<String>,
}

impl<'a> XmlVisitor<'a> for ManagedObjectReferenceVisitor {
    type Value = ManagedObjectReference;

    fn visit_node(&mut self, node: Node<'a, 'a>) -> Result<(), XmlError> {
        self.kind = node.attribute("type").map(ToString::to_string);
        self.value = Some(node_text(node).trim().to_string());
        Ok(())
    }

    fn finish(self) -> Result<Self::Value, XmlError> {
        Ok(ManagedObjectReference {
            kind: self.kind.ok_or(XmlError::MissingField {
                field: "type",
                parent: "ManagedObjectReference",
            })?,
            value: self.value.unwrap_or_default(),
        })
    }
}

impl XmlDeserialize<'_> for ManagedObjectReference {
    type Visitor = ManagedObjectReferenceVisitor;

    fn visitor() -> Self::Visitor {
        ManagedObjectReferenceVisitor::default()
    }
}
