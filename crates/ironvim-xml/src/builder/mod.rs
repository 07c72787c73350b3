//! Builder half of the crate: an owned-or-borrowed element tree that knows how to
//! write itself with namespace aliases resolved from the declarations in scope.
mod attribute;
mod document;
mod declaration;
mod element;
mod namespace;

use std::borrow::Cow;
use std::collections::HashMap;

pub use self::attribute::*;
pub use self::document::*;
pub use self::declaration::*;
pub use self::element::*;
pub use self::namespace::*;

/// Namespace -> alias. `None` marks the default namespace (`xmlns="..."`).
pub type AliasMap<'a> = HashMap<Namespace<'a>, Option<&'a str>>;

#[derive(Debug, thiserror::Error)]
pub enum XmlBuilderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("UTF-8 error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),
    #[error("Namespace '{ns}' not declared for tag '{tag}'")]
    NamespaceNotDeclared { tag: String, ns: String },
    #[error("Namespace '{ns}' has no alias for attribute '{attr}'")]
    NamespaceHasNoAlias { attr: String, ns: String },
}

pub trait NamespaceWrite<'a> {
    fn ns_write<W: std::io::Write>(
        &self,
        w: &mut W,
        aliases: &AliasMap<'a>,
    ) -> Result<(), XmlBuilderError>;
}

/// Writes a value as the content of an element it is handed.
///
/// The caller owns the element name; the value fills in attributes, text and children.
/// Values that live in polymorphic slots (`xsd:anyType`, base-typed arrays) report their
/// wire type through [`XmlSerialize::xsi_type`] so [`serialize_child`] can tag them.
pub trait XmlSerialize {
    fn append_to_element<'a>(&'a self, element: Element<'a>) -> Element<'a>;

    fn xsi_type(&self) -> Option<&'static str> {
        None
    }
}

impl<T: XmlSerialize + ?Sized> XmlSerialize for &T {
    fn append_to_element<'a>(&'a self, element: Element<'a>) -> Element<'a> {
        (**self).append_to_element(element)
    }

    fn xsi_type(&self) -> Option<&'static str> {
        (**self).xsi_type()
    }
}

impl<T: XmlSerialize + ?Sized> XmlSerialize for Box<T> {
    fn append_to_element<'a>(&'a self, element: Element<'a>) -> Element<'a> {
        (**self).append_to_element(element)
    }

    fn xsi_type(&self) -> Option<&'static str> {
        (**self).xsi_type()
    }
}

/// Creates `<name>` for `value`, adding `xsi:type` when the value declares one.
pub fn serialize_child<'a, T>(name: &'a str, value: &'a T) -> Element<'a>
where
    T: XmlSerialize + ?Sized,
{
    let mut element = Element::new(name);
    if let Some(type_name) = value.xsi_type() {
        element = element.add_attribute(
            Attribute::new("type", type_name).set_namespace(crate::XSI_NAMESPACE_URI),
        );
    }
    value.append_to_element(element)
}

/// Escapes the five predefined XML entities. Borrows when nothing needs escaping.
pub fn escape(value: &str) -> Cow<'_, str> {
    if !value
        .chars()
        .any(|c| matches!(c, '&' | '<' | '>' | '"' | '\''))
    {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_xml() {
        let builder = Builder::new(None, Element::new("root"));
        assert_eq!(builder.to_xml_string().unwrap(), "<root/>");
    }

    #[test]
    fn test_xml_with_attributes() {
        let element = Element::new("root").add_attribute(Attribute::new("attr1", "value1"));
        let builder = Builder::new(None, element);
        assert_eq!(builder.to_xml_string().unwrap(), r#"<root attr1="value1"/>"#);
    }

    #[test]
    fn test_xml_with_nested_children() {
        let grandchild = Element::new("grandchild").set_text("Deep content");
        let child1 = Element::new("child1").add_child(grandchild);
        let child2 = Element::new("child2").set_text("Child 2 content");
        let element = Element::new("root").add_child(child1).add_child(child2);

        let xml_string = Builder::new(None, element).to_xml_string().unwrap();
        assert_eq!(
            xml_string,
            "<root><child1><grandchild>Deep content</grandchild></child1><child2>Child 2 content</child2></root>"
        );
    }

    #[test]
    fn test_prefixed_namespace() {
        let element = Element::new("Envelope")
            .set_namespace("http://schemas.xmlsoap.org/soap/envelope/")
            .add_namespace_declaration("http://schemas.xmlsoap.org/soap/envelope/", Some("soapenv"));

        let xml_string = Builder::new(None, element).to_xml_string().unwrap();
        assert_eq!(
            xml_string,
            r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/"/>"#
        );
    }

    #[test]
    fn test_default_namespace_is_inherited_by_unqualified_children() {
        let element = Element::new("Login")
            .set_namespace("urn:vim25")
            .add_namespace_declaration("urn:vim25", None)
            .add_child(Element::new("userName").set_text("root"));

        let xml_string = Builder::new(None, element).to_xml_string().unwrap();
        assert_eq!(
            xml_string,
            r#"<Login xmlns="urn:vim25"><userName>root</userName></Login>"#
        );
    }

    #[test]
    fn test_declarations_are_visible_to_descendants() {
        let grandchild = Element::new("grandchild").set_namespace("http://example.com/ns1");
        let child = Element::new("child")
            .set_namespace("http://example.com/ns2")
            .add_child(grandchild);
        let root = Element::new("root")
            .add_namespace_declaration("http://example.com/ns1", Some("ns1"))
            .add_namespace_declaration("http://example.com/ns2", Some("ns2"))
            .add_child(child);

        let xml_string = Builder::new(None, root).to_xml_string().unwrap();
        assert!(xml_string.contains("<ns2:child><ns1:grandchild/></ns2:child>"));
    }

    #[test]
    fn test_undeclared_namespace_is_rejected() {
        let element = Element::new("root").set_namespace("http://example.com/missing");
        let result = Builder::new(None, element).to_xml_string();
        assert!(matches!(
            result,
            Err(XmlBuilderError::NamespaceNotDeclared { .. })
        ));
    }

    #[test]
    fn test_namespaced_attribute_needs_prefix() {
        let element = Element::new("val")
            .add_namespace_declaration(crate::XSI_NAMESPACE_URI, None)
            .add_attribute(Attribute::new("type", "xsd:string").set_namespace(crate::XSI_NAMESPACE_URI));

        let result = Builder::new(None, element).to_xml_string();
        assert!(matches!(
            result,
            Err(XmlBuilderError::NamespaceHasNoAlias { .. })
        ));
    }

    #[test]
    fn test_special_characters_are_escaped() {
        let element = Element::new("test")
            .add_attribute(Attribute::new("name", "a\"b<c"))
            .set_text("Text with <>&\"' characters");

        let xml_string = Builder::new(None, element).to_xml_string().unwrap();
        assert_eq!(
            xml_string,
            r#"<test name="a&quot;b&lt;c">Text with &lt;&gt;&amp;&quot;&apos; characters</test>"#
        );
    }

    #[test]
    fn test_escape_borrows_clean_input() {
        assert!(matches!(escape("plain text"), Cow::Borrowed(_)));
        assert_eq!(escape("a&b"), "a&amp;b");
    }

    #[test]
    fn test_setting_text_overwrites_children() {
        let element = Element::new("container")
            .add_child(Element::new("item"))
            .set_text("New text");

        let xml_string = Builder::new(None, element).to_xml_string().unwrap();
        assert_eq!(xml_string, "<container>New text</container>");
    }

    #[test]
    fn test_builder_with_declaration() {
        let declaration = Declaration::new("1.0", "UTF-8");
        let element = Element::new("root").set_text("content");
        let xml_string = Builder::new(Some(declaration), element)
            .to_xml_string()
            .unwrap();
        assert_eq!(
            xml_string,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<root>content</root>"
        );
    }

    #[test]
    fn test_declaration_with_standalone() {
        let declaration = Declaration::new("1.0", "UTF-8").with_standalone(false);
        assert_eq!(
            declaration.to_string(),
            r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#
        );
    }

    #[test]
    fn test_serialize_child_adds_xsi_type() {
        struct Typed;

        impl XmlSerialize for Typed {
            fn append_to_element<'a>(&'a self, element: Element<'a>) -> Element<'a> {
                element.set_text("group-d1")
            }

            fn xsi_type(&self) -> Option<&'static str> {
                Some("ManagedObjectReference")
            }
        }

        let root = Element::new("root")
            .add_namespace_declaration(crate::XSI_NAMESPACE_URI, Some(crate::XSI_NAMESPACE_ALIAS))
            .add_child(serialize_child("val", &Typed));

        let xml_string = Builder::new(None, root).to_xml_string().unwrap();
        assert!(xml_string.contains(r#"<val xsi:type="ManagedObjectReference">group-d1</val>"#));
    }
}
