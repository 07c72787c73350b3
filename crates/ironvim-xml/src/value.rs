use std::marker::PhantomData;

use crate::XmlError;
use crate::builder::{Element, XmlSerialize};
use crate::parser::{Node, XmlDeserialize, XmlVisitor, node_text};

/// Values carried as the text content of a single element.
pub trait FromXmlText: Sized {
    const TYPE_NAME: &'static str;

    fn from_xml_text(text: &str) -> Result<Self, XmlError>;
}

/// Visitor for any [`FromXmlText`] value. An empty element yields an empty text.
pub struct TextVisitor<'a, T> {
    text: Option<&'a str>,
    __phantom: PhantomData<T>,
}

impl<T> Default for TextVisitor<'_, T> {
    fn default() -> Self {
        Self {
            text: None,
            __phantom: PhantomData,
        }
    }
}

impl<'a, T: FromXmlText> XmlVisitor<'a> for TextVisitor<'a, T> {
    type Value = T;

    fn visit_node(&mut self, node: Node<'a, 'a>) -> Result<(), XmlError> {
        self.text = Some(node_text(node));
        Ok(())
    }

    fn finish(self) -> Result<Self::Value, XmlError> {
        T::from_xml_text(self.text.unwrap_or_default())
    }
}

impl FromXmlText for String {
    const TYPE_NAME: &'static str = "string";

    fn from_xml_text(text: &str) -> Result<Self, XmlError> {
        Ok(text.to_string())
    }
}

impl FromXmlText for bool {
    const TYPE_NAME: &'static str = "boolean";

    fn from_xml_text(text: &str) -> Result<Self, XmlError> {
        match text.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(XmlError::InvalidValue {
                ty: Self::TYPE_NAME,
                value: other.to_string(),
            }),
        }
    }
}

impl<'a> XmlDeserialize<'a> for String {
    type Visitor = TextVisitor<'a, Self>;

    fn visitor() -> Self::Visitor {
        TextVisitor::default()
    }
}

impl<'a> XmlDeserialize<'a> for bool {
    type Visitor = TextVisitor<'a, Self>;

    fn visitor() -> Self::Visitor {
        TextVisitor::default()
    }
}

impl XmlSerialize for String {
    fn append_to_element<'a>(&'a self, element: Element<'a>) -> Element<'a> {
        element.set_text(self.as_str())
    }
}

impl XmlSerialize for str {
    fn append_to_element<'a>(&'a self, element: Element<'a>) -> Element<'a> {
        element.set_text(self)
    }
}

impl XmlSerialize for bool {
    fn append_to_element<'a>(&'a self, element: Element<'a>) -> Element<'a> {
        element.set_text(if *self { "true" } else { "false" })
    }
}

macro_rules! xml_num_value {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl FromXmlText for $ty {
                const TYPE_NAME: &'static str = $name;

                fn from_xml_text(text: &str) -> Result<Self, XmlError> {
                    text.trim().parse().map_err(|_| XmlError::InvalidValue {
                        ty: Self::TYPE_NAME,
                        value: text.to_string(),
                    })
                }
            }

            impl<'a> XmlDeserialize<'a> for $ty {
                type Visitor = TextVisitor<'a, Self>;

                fn visitor() -> Self::Visitor {
                    TextVisitor::default()
                }
            }

            impl XmlSerialize for $ty {
                fn append_to_element<'a>(&'a self, element: Element<'a>) -> Element<'a> {
                    element.set_text(self.to_string())
                }
            }
        )*
    };
}

xml_num_value! {
    i16 => "short",
    i32 => "int",
    i64 => "long",
    u8 => "unsignedByte",
    f32 => "float",
    f64 => "double",
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_numbers_are_trimmed() {
        let doc = parse("<n> 42 </n>").unwrap();
        assert_eq!(i32::from_node(doc.root_element()).unwrap(), 42);
        assert_eq!(i64::from_node(doc.root_element()).unwrap(), 42);
    }

    #[test]
    fn test_string_keeps_whitespace() {
        let doc = parse("<s> padded </s>").unwrap();
        assert_eq!(String::from_node(doc.root_element()).unwrap(), " padded ");
    }

    #[test]
    fn test_empty_element_is_empty_string() {
        let doc = parse("<s/>").unwrap();
        assert_eq!(String::from_node(doc.root_element()).unwrap(), "");
    }

    #[test]
    fn test_bool_forms() {
        for (xml, expected) in [("<b>true</b>", true), ("<b>0</b>", false), ("<b>1</b>", true)] {
            let doc = parse(xml).unwrap();
            assert_eq!(bool::from_node(doc.root_element()).unwrap(), expected);
        }

        let doc = parse("<b>yes</b>").unwrap();
        assert!(matches!(
            bool::from_node(doc.root_element()),
            Err(XmlError::InvalidValue { ty: "boolean", .. })
        ));
    }

    #[test]
    fn test_invalid_number_names_type() {
        let doc = parse("<n>abc</n>").unwrap();
        let err = i16::from_node(doc.root_element()).unwrap_err();
        assert_eq!(err.to_string(), r#"Invalid short value: "abc""#);
    }

    #[test]
    fn test_scalars_write_text() {
        let xml = 7_i64.append_to_element(Element::new("n")).to_xml_string().unwrap();
        assert_eq!(xml, "<n>7</n>");
        let xml = false.append_to_element(Element::new("b")).to_xml_string().unwrap();
        assert_eq!(xml, "<b>false</b>");
    }
}
