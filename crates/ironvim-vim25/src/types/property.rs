//! `PropertyCollector` specs and results.
use ironvim_macros::{XmlDeserialize, XmlSerialize};
use ironvim_xml::XmlError;
use ironvim_xml::builder::{Element, XmlSerialize};
use ironvim_xml::parser::{Node, XmlDeserialize, XmlVisitor, xsi_type};

use super::{AnyType, LocalizedMethodFault, ManagedObjectReference};
use crate::macros::this_requests;

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct PropertySpec {
    #[xml(rename = "type")]
    pub kind: String,
    pub all: Option<bool>,
    pub path_set: Vec<String>,
}

impl PropertySpec {
    pub fn new<I, S>(kind: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let path_set: Vec<String> = paths.into_iter().map(Into::into).collect();
        Self {
            kind: kind.into(),
            all: path_set.is_empty().then_some(true),
            path_set,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
#[xml(type_name = "SelectionSpec")]
pub struct SelectionSpec {
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
#[xml(type_name = "TraversalSpec")]
pub struct TraversalSpec {
    pub name: Option<String>,
    #[xml(rename = "type")]
    pub kind: String,
    pub path: String,
    pub skip: Option<bool>,
    pub select_set: Vec<AnySelectionSpec>,
}

/// An entry of `selectSet`: a reference to a named spec or a traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnySelectionSpec {
    Selection(SelectionSpec),
    Traversal(TraversalSpec),
}

impl From<SelectionSpec> for AnySelectionSpec {
    fn from(value: SelectionSpec) -> Self {
        Self::Selection(value)
    }
}

impl From<TraversalSpec> for AnySelectionSpec {
    fn from(value: TraversalSpec) -> Self {
        Self::Traversal(value)
    }
}

impl XmlSerialize for AnySelectionSpec {
    fn append_to_element<'a>(&'a self, element: Element<'a>) -> Element<'a> {
        match self {
            Self::Selection(spec) => spec.append_to_element(element),
            Self::Traversal(spec) => spec.append_to_element(element),
        }
    }

    fn xsi_type(&self) -> Option<&'static str> {
        match self {
            Self::Selection(spec) => spec.xsi_type(),
            Self::Traversal(spec) => spec.xsi_type(),
        }
    }
}

#[derive(Default)]
pub struct AnySelectionSpecVisitor {
    value: Option<AnySelectionSpec>,
}

impl<'a> XmlVisitor<'a> for AnySelectionSpecVisitor {
    type Value = AnySelectionSpec;

    fn visit_node(&mut self, node: Node<'a, 'a>) -> Result<(), XmlError> {
        self.value = Some(match xsi_type(node) {
            Some("TraversalSpec") => TraversalSpec::from_node(node)?.into(),
            _ => SelectionSpec::from_node(node)?.into(),
        });
        Ok(())
    }

    fn finish(self) -> Result<Self::Value, XmlError> {
        self.value
            .ok_or_else(|| XmlError::InvalidXml("empty selection spec".to_string()))
    }
}

impl XmlDeserialize<'_> for AnySelectionSpec {
    type Visitor = AnySelectionSpecVisitor;

    fn visitor() -> Self::Visitor {
        AnySelectionSpecVisitor::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct ObjectSpec {
    pub obj: ManagedObjectReference,
    pub skip: Option<bool>,
    pub select_set: Vec<AnySelectionSpec>,
}

impl ObjectSpec {
    pub fn new(obj: ManagedObjectReference) -> Self {
        Self {
            obj,
            skip: None,
            select_set: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct PropertyFilterSpec {
    pub prop_set: Vec<PropertySpec>,
    pub object_set: Vec<ObjectSpec>,
    pub report_missing_objects_in_results: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct RetrieveOptions {
    pub max_objects: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, XmlSerialize, XmlDeserialize)]
pub struct DynamicProperty {
    pub name: String,
    pub val: AnyType,
}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct MissingProperty {
    pub path: String,
    pub fault: LocalizedMethodFault,
}

#[derive(Debug, Clone, PartialEq, XmlSerialize, XmlDeserialize)]
pub struct ObjectContent {
    pub obj: ManagedObjectReference,
    pub prop_set: Vec<DynamicProperty>,
    pub missing_set: Vec<MissingProperty>,
}

impl ObjectContent {
    pub fn property(&self, name: &str) -> Option<&AnyType> {
        self.prop_set
            .iter()
            .find(|property| property.name == name)
            .map(|property| &property.val)
    }
}

#[derive(Debug, Clone, Default, PartialEq, XmlSerialize, XmlDeserialize)]
pub struct RetrieveResult {
    pub token: Option<String>,
    pub objects: Vec<ObjectContent>,
}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct RetrievePropertiesEx {
    #[xml(rename = "_this")]
    pub this: ManagedObjectReference,
    pub spec_set: Vec<PropertyFilterSpec>,
    pub options: RetrieveOptions,
}

/// Empty when nothing matched.
#[derive(Debug, Clone, Default, PartialEq, XmlSerialize, XmlDeserialize)]
pub struct RetrievePropertiesExResponse {
    pub returnval: Option<RetrieveResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct ContinueRetrievePropertiesEx {
    #[xml(rename = "_this")]
    pub this: ManagedObjectReference,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, XmlSerialize, XmlDeserialize)]
pub struct ContinueRetrievePropertiesExResponse {
    pub returnval: RetrieveResult,
}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct CancelRetrievePropertiesEx {
    #[xml(rename = "_this")]
    pub this: ManagedObjectReference,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct RetrieveProperties {
    #[xml(rename = "_this")]
    pub this: ManagedObjectReference,
    pub spec_set: Vec<PropertyFilterSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, XmlSerialize, XmlDeserialize)]
pub struct RetrievePropertiesResponse {
    pub returnval: Vec<ObjectContent>,
}

this_requests! {
    CreatePropertyCollector;
    DestroyPropertyCollector;
    DestroyPropertyFilter;
}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct CreateFilter {
    #[xml(rename = "_this")]
    pub this: ManagedObjectReference,
    pub spec: PropertyFilterSpec,
    pub partial_updates: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironvim_xml::builder::{Builder, serialize_child};

    #[test]
    fn test_property_spec_without_paths_selects_all() {
        let spec = PropertySpec::new("Folder", Vec::<String>::new());
        assert_eq!(spec.all, Some(true));

        let spec = PropertySpec::new("VirtualMachine", ["name"]);
        assert_eq!(spec.all, None);
        assert_eq!(spec.path_set, vec!["name".to_string()]);
    }

    #[test]
    fn test_traversal_specs_are_typed() {
        let spec = ObjectSpec {
            obj: ManagedObjectReference::new("Folder", "group-d1"),
            skip: Some(true),
            select_set: vec![
                TraversalSpec {
                    name: Some("folderTraversal".to_string()),
                    kind: "Folder".to_string(),
                    path: "childEntity".to_string(),
                    skip: Some(false),
                    select_set: vec![
                        SelectionSpec {
                            name: Some("folderTraversal".to_string()),
                        }
                        .into(),
                    ],
                }
                .into(),
            ],
        };

        let root = Element::new("root")
            .add_namespace_declaration(ironvim_xml::XSI_NAMESPACE_URI, Some("xsi"))
            .add_child(serialize_child("objectSet", &spec));
        let xml = Builder::new(None, root).to_xml_string().unwrap();

        assert!(xml.contains(
            r#"<selectSet xsi:type="TraversalSpec"><name>folderTraversal</name><type>Folder</type><path>childEntity</path><skip>false</skip><selectSet xsi:type="SelectionSpec"><name>folderTraversal</name></selectSet></selectSet>"#
        ));

        let doc = ironvim_xml::parser::parse(&xml).unwrap();
        let node = ironvim_xml::parser::first_element_child(doc.root_element()).unwrap();
        assert_eq!(ObjectSpec::from_node(node).unwrap(), spec);
    }
}
