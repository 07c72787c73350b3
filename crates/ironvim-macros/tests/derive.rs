use ironvim_macros::{XmlDeserialize, XmlSerialize};
use ironvim_xml::XmlError;
use ironvim_xml::builder::{Element, XmlSerialize};
use ironvim_xml::parser::{XmlDeserialize, parse};

#[derive(Debug, Clone, PartialEq, XmlSerialize, XmlDeserialize)]
#[xml(type_name = "PropertySpec")]
struct PropertySpec {
    #[xml(rename = "type")]
    kind: String,
    all: Option<bool>,
    path_set: Vec<String>,
}

#[derive(Debug, PartialEq, XmlDeserialize)]
struct Counted {
    #[xml(default)]
    call_count: i32,
    label: String,
}

#[test]
fn serializes_fields_in_order_with_camel_case_names() {
    let spec = PropertySpec {
        kind: "VirtualMachine".to_string(),
        all: None,
        path_set: vec!["name".to_string(), "runtime.powerState".to_string()],
    };

    let xml = spec
        .append_to_element(Element::new("propSet"))
        .to_xml_string()
        .unwrap();

    assert_eq!(
        xml,
        "<propSet><type>VirtualMachine</type><pathSet>name</pathSet><pathSet>runtime.powerState</pathSet></propSet>"
    );
    assert_eq!(spec.xsi_type(), Some("PropertySpec"));
}

#[test]
fn deserializes_and_skips_unknown_children() {
    let doc = parse(
        "<propSet><type>Folder</type><extra>ignored</extra><all>true</all><pathSet>name</pathSet></propSet>",
    )
    .unwrap();

    let spec = PropertySpec::from_node(doc.root_element()).unwrap();
    assert_eq!(
        spec,
        PropertySpec {
            kind: "Folder".to_string(),
            all: Some(true),
            path_set: vec!["name".to_string()],
        }
    );
}

#[test]
fn missing_required_field_is_reported() {
    let doc = parse("<propSet><all>false</all></propSet>").unwrap();
    let err = PropertySpec::from_node(doc.root_element()).unwrap_err();
    assert!(matches!(
        err,
        XmlError::MissingField {
            field: "kind",
            parent: "PropertySpec"
        }
    ));
}

#[test]
fn default_field_may_be_absent() {
    let doc = parse("<c><label>x</label></c>").unwrap();
    let counted = Counted::from_node(doc.root_element()).unwrap();
    assert_eq!(
        counted,
        Counted {
            call_count: 0,
            label: "x".to_string()
        }
    );
}
