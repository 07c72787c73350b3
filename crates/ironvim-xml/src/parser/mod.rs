use tracing::trace;

use crate::XmlError;
use crate::builder::{self, Element, XmlSerialize};

pub use roxmltree::*;

pub fn parse(xml: &str) -> Result<Document<'_>, XmlError> {
    Ok(Document::parse(xml)?)
}

/// Receives the nodes of one element and produces a value from them.
///
/// [`NodeDeserializer`] calls `visit_node` with the element itself, then
/// `visit_children` with its child nodes (text and comments included), then `finish`.
pub trait XmlVisitor<'a> {
    type Value;

    fn visit_node(&mut self, _node: Node<'a, 'a>) -> Result<(), XmlError> {
        Ok(())
    }

    fn visit_children(
        &mut self,
        _children: impl Iterator<Item = Node<'a, 'a>>,
    ) -> Result<(), XmlError> {
        Ok(())
    }

    fn finish(self) -> Result<Self::Value, XmlError>;
}

pub trait XmlDeserialize<'a>: Sized {
    type Visitor: XmlVisitor<'a, Value = Self>;

    fn visitor() -> Self::Visitor;

    fn from_node(node: Node<'a, 'a>) -> Result<Self, XmlError> {
        NodeDeserializer::new(node).deserialize(Self::visitor())
    }
}

pub struct NodeDeserializer<'a> {
    root: Node<'a, 'a>,
}

impl<'a> NodeDeserializer<'a> {
    pub fn new(root: Node<'a, 'a>) -> Self {
        Self { root }
    }

    pub fn deserialize<V>(self, mut visitor: V) -> Result<V::Value, XmlError>
    where
        V: XmlVisitor<'a>,
    {
        if !self.root.is_element() {
            return Err(XmlError::InvalidNodeType {
                expected: NodeType::Element,
                found: self.root.node_type(),
            });
        }

        visitor.visit_node(self.root)?;
        visitor.visit_children(self.root.children())?;
        visitor.finish()
    }
}

/// The local part of `xsi:type`, if the element carries one.
pub fn xsi_type<'a>(node: Node<'a, 'a>) -> Option<&'a str> {
    node.attribute((crate::XSI_NAMESPACE_URI, "type"))
        .map(|value| value.rsplit_once(':').map_or(value, |(_, local)| local))
}

pub fn node_text<'a>(node: Node<'a, 'a>) -> &'a str {
    node.text().unwrap_or_default()
}

/// The first element child of `node`, skipping whitespace and comments.
pub fn first_element_child<'a>(node: Node<'a, 'a>) -> Option<Node<'a, 'a>> {
    node.children().find(Node::is_element)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnParsedAttribute {
    pub name: String,
    pub namespace: Option<String>,
    pub value: String,
}

/// An owned copy of an element the typed model does not cover.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UnParsed {
    pub name: String,
    pub namespace: Option<String>,
    pub attributes: Vec<UnParsedAttribute>,
    pub text: Option<String>,
    pub children: Vec<UnParsed>,
}

impl UnParsed {
    pub fn child(&self, name: &str) -> Option<&UnParsed> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name == name)
            .map(|attribute| attribute.value.as_str())
    }

    pub fn xsi_type(&self) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| {
                attribute.name == "type"
                    && attribute.namespace.as_deref() == Some(crate::XSI_NAMESPACE_URI)
            })
            .map(|attribute| {
                attribute
                    .value
                    .rsplit_once(':')
                    .map_or(attribute.value.as_str(), |(_, local)| local)
            })
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    fn capture(node: Node<'_, '_>) -> Self {
        let text = node
            .children()
            .filter(Node::is_text)
            .filter_map(|child| child.text())
            .collect::<String>();
        let children = node
            .children()
            .filter(Node::is_element)
            .map(Self::capture)
            .collect::<Vec<_>>();

        Self {
            name: node.tag_name().name().to_string(),
            namespace: node.tag_name().namespace().map(ToString::to_string),
            attributes: node
                .attributes()
                .map(|attribute| UnParsedAttribute {
                    name: attribute.name().to_string(),
                    namespace: attribute.namespace().map(ToString::to_string),
                    value: attribute.value().to_string(),
                })
                .collect(),
            text: (children.is_empty() && !text.is_empty()).then_some(text),
            children,
        }
    }
}

pub struct UnParsedVisitor {
    value: Option<UnParsed>,
}

impl<'a> XmlVisitor<'a> for UnParsedVisitor {
    type Value = UnParsed;

    fn visit_node(&mut self, node: Node<'a, 'a>) -> Result<(), XmlError> {
        trace!(tag = node.tag_name().name(), "capturing unparsed element");
        self.value = Some(UnParsed::capture(node));
        Ok(())
    }

    fn finish(self) -> Result<Self::Value, XmlError> {
        self.value
            .ok_or_else(|| XmlError::InvalidXml("no element to capture".to_string()))
    }
}

impl XmlDeserialize<'_> for UnParsed {
    type Visitor = UnParsedVisitor;

    fn visitor() -> Self::Visitor {
        UnParsedVisitor { value: None }
    }
}

impl XmlSerialize for UnParsed {
    fn append_to_element<'a>(&'a self, mut element: Element<'a>) -> Element<'a> {
        for attribute in &self.attributes {
            let mut written = builder::Attribute::new(&attribute.name, attribute.value.as_str());
            // Only xsi is guaranteed to be declared by the envelope.
            if attribute.namespace.as_deref() == Some(crate::XSI_NAMESPACE_URI) {
                written = written.set_namespace(crate::XSI_NAMESPACE_URI);
            } else if attribute.namespace.is_some() {
                continue;
            }
            element = element.add_attribute(written);
        }

        if let Some(text) = &self.text {
            return element.set_text(text.as_str());
        }

        element.add_children(
            self.children
                .iter()
                .map(|child| child.append_to_element(Element::new(&child.name))),
        )
    }
}
