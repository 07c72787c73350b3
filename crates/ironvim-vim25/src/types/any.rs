use ironvim_xml::XmlError;
use ironvim_xml::builder::{Element, XmlSerialize, serialize_child};
use ironvim_xml::parser::{Node, UnParsed, XmlDeserialize, XmlVisitor, xsi_type};
use tracing::trace;

use super::{DateTime, ManagedObjectReference, TaskInfo, UserSession};

/// A value in an `xsd:anyType` slot, such as `DynamicProperty.val`.
///
/// Types without a variant of their own are kept as [`AnyType::Other`].
#[derive(Debug, Clone, PartialEq)]
pub enum AnyType {
    String(String),
    Boolean(bool),
    Int(i32),
    Long(i64),
    Double(f64),
    DateTime(DateTime),
    Mor(ManagedObjectReference),
    ArrayOfString(Vec<String>),
    ArrayOfMor(Vec<ManagedObjectReference>),
    TaskInfo(Box<TaskInfo>),
    UserSession(Box<UserSession>),
    Other(UnParsed),
}

impl AnyType {
    /// Text of string values and of simple values kept as `Other` (enums such as
    /// `VirtualMachinePowerState`).
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            Self::Other(raw) if raw.children.is_empty() => Some(raw.text()),
            _ => None,
        }
    }

    pub fn as_mor(&self) -> Option<&ManagedObjectReference> {
        match self {
            Self::Mor(mor) => Some(mor),
            _ => None,
        }
    }

    pub fn as_task_info(&self) -> Option<&TaskInfo> {
        match self {
            Self::TaskInfo(info) => Some(info),
            _ => None,
        }
    }

    pub fn as_user_session(&self) -> Option<&UserSession> {
        match self {
            Self::UserSession(session) => Some(session),
            _ => None,
        }
    }

    /// The wire type name, without prefix.
    pub fn type_name(&self) -> &str {
        match self {
            Self::String(_) => "string",
            Self::Boolean(_) => "boolean",
            Self::Int(_) => "int",
            Self::Long(_) => "long",
            Self::Double(_) => "double",
            Self::DateTime(_) => "dateTime",
            Self::Mor(_) => "ManagedObjectReference",
            Self::ArrayOfString(_) => "ArrayOfString",
            Self::ArrayOfMor(_) => "ArrayOfManagedObjectReference",
            Self::TaskInfo(_) => "TaskInfo",
            Self::UserSession(_) => "UserSession",
            Self::Other(raw) => raw.xsi_type().unwrap_or(&raw.name),
        }
    }
}

impl XmlSerialize for AnyType {
    fn append_to_element<'a>(&'a self, element: Element<'a>) -> Element<'a> {
        match self {
            Self::String(value) => value.append_to_element(element),
            Self::Boolean(value) => value.append_to_element(element),
            Self::Int(value) => value.append_to_element(element),
            Self::Long(value) => value.append_to_element(element),
            Self::Double(value) => value.append_to_element(element),
            Self::DateTime(value) => value.append_to_element(element),
            Self::Mor(value) => value.append_to_element(element),
            Self::ArrayOfString(values) => {
                element.add_children(values.iter().map(|value| serialize_child("string", value)))
            }
            Self::ArrayOfMor(values) => element.add_children(
                values
                    .iter()
                    .map(|value| serialize_child("ManagedObjectReference", value)),
            ),
            Self::TaskInfo(info) => info.append_to_element(element),
            Self::UserSession(session) => session.append_to_element(element),
            Self::Other(raw) => raw.append_to_element(element),
        }
    }

    fn xsi_type(&self) -> Option<&'static str> {
        match self {
            Self::String(_) => Some("xsd:string"),
            Self::Boolean(_) => Some("xsd:boolean"),
            Self::Int(_) => Some("xsd:int"),
            Self::Long(_) => Some("xsd:long"),
            Self::Double(_) => Some("xsd:double"),
            Self::DateTime(_) => Some("xsd:dateTime"),
            Self::Mor(_) => Some("ManagedObjectReference"),
            Self::ArrayOfString(_) => Some("ArrayOfString"),
            Self::ArrayOfMor(_) => Some("ArrayOfManagedObjectReference"),
            Self::TaskInfo(_) => Some("TaskInfo"),
            Self::UserSession(_) => Some("UserSession"),
            // Carries its own xsi:type attribute.
            Self::Other(_) => None,
        }
    }
}

fn array_items<'a, T: XmlDeserialize<'a>>(node: Node<'a, 'a>) -> Result<Vec<T>, XmlError> {
    node.children()
        .filter(Node::is_element)
        .map(T::from_node)
        .collect()
}

#[derive(Default)]
pub struct AnyTypeVisitor {
    value: Option<AnyType>,
}

impl<'a> XmlVisitor<'a> for AnyTypeVisitor {
    type Value = AnyType;

    fn visit_node(&mut self, node: Node<'a, 'a>) -> Result<(), XmlError> {
        let value = match xsi_type(node) {
            Some("string") => AnyType::String(String::from_node(node)?),
            Some("boolean") => AnyType::Boolean(bool::from_node(node)?),
            Some("int" | "short") => AnyType::Int(i32::from_node(node)?),
            Some("long") => AnyType::Long(i64::from_node(node)?),
            Some("double" | "float") => AnyType::Double(f64::from_node(node)?),
            Some("dateTime") => AnyType::DateTime(DateTime::from_node(node)?),
            Some("ManagedObjectReference") => {
                AnyType::Mor(ManagedObjectReference::from_node(node)?)
            }
            Some("ArrayOfString") => AnyType::ArrayOfString(array_items(node)?),
            Some("ArrayOfManagedObjectReference") => AnyType::ArrayOfMor(array_items(node)?),
            Some("TaskInfo") => AnyType::TaskInfo(Box::new(TaskInfo::from_node(node)?)),
            Some("UserSession") => {
                AnyType::UserSession(Box::new(UserSession::from_node(node)?))
            }
            other => {
                trace!(xsi_type = ?other, "keeping anyType value unparsed");
                AnyType::Other(UnParsed::from_node(node)?)
            }
        };
        self.value = Some(value);
        Ok(())
    }

    fn finish(self) -> Result<Self::Value, XmlError> {
        self.value
            .ok_or_else(|| XmlError::InvalidXml("anyType value without element".to_string()))
    }
}

impl XmlDeserialize<'_> for AnyType {
    type Visitor = AnyTypeVisitor;

    fn visitor() -> Self::Visitor {
        AnyTypeVisitor::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironvim_xml::builder::Builder;
    use ironvim_xml::parser::parse;

    const XSI: &str = r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:xsd="http://www.w3.org/2001/XMLSchema""#;

    fn read(body: &str, attrs: &str) -> AnyType {
        let xml = format!("<val {XSI} {attrs}>{body}</val>");
        let doc = parse(&xml).unwrap();
        AnyType::from_node(doc.root_element()).unwrap()
    }

    #[test]
    fn test_scalars_dispatch_on_xsi_type() {
        assert_eq!(
            read("vm-1", r#"xsi:type="xsd:string""#),
            AnyType::String("vm-1".to_string())
        );
        assert_eq!(read("true", r#"xsi:type="xsd:boolean""#), AnyType::Boolean(true));
        assert_eq!(read("12", r#"xsi:type="xsd:int""#), AnyType::Int(12));
    }

    #[test]
    fn test_mor_and_arrays() {
        assert_eq!(
            read("group-d1", r#"type="Folder" xsi:type="ManagedObjectReference""#),
            AnyType::Mor(ManagedObjectReference::new("Folder", "group-d1"))
        );

        let array = read(
            r#"<ManagedObjectReference type="VirtualMachine">vm-1</ManagedObjectReference><ManagedObjectReference type="VirtualMachine">vm-2</ManagedObjectReference>"#,
            r#"xsi:type="ArrayOfManagedObjectReference""#,
        );
        let AnyType::ArrayOfMor(items) = array else {
            panic!("expected an array");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].value, "vm-2");
    }

    #[test]
    fn test_enum_values_stay_readable() {
        let value = read("poweredOn", r#"xsi:type="VirtualMachinePowerState""#);
        assert_eq!(value.type_name(), "VirtualMachinePowerState");
        assert_eq!(value.as_str(), Some("poweredOn"));
    }

    #[test]
    fn test_written_with_xsi_type() {
        let values = [
            AnyType::String("a".to_string()),
            AnyType::ArrayOfString(vec!["x".to_string(), "y".to_string()]),
        ];
        let root = Element::new("set")
            .add_namespace_declaration(ironvim_xml::XSI_NAMESPACE_URI, Some("xsi"))
            .add_children(values.iter().map(|value| serialize_child("value", value)));
        let xml = Builder::new(None, root).to_xml_string().unwrap();

        assert!(xml.contains(r#"<value xsi:type="xsd:string">a</value>"#));
        assert!(xml.contains(
            r#"<value xsi:type="ArrayOfString"><string>x</string><string>y</string></value>"#
        ));
    }
}
