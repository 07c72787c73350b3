use std::collections::HashSet;
use std::fs;

use chrono::{TimeZone, Utc};
use ironvim_soap::soap::{RequestEnvelope, read_response};
use ironvim_soap::{Body, Context, Method, RoundTripper, SoapBody, SoapError};
use ironvim_vim25::methods;
use ironvim_vim25::types::*;

/// Answers `Login` with a fixed session.
struct LoginStub {
    session: UserSession,
}

impl RoundTripper for LoginStub {
    fn round_trip(
        &self,
        _ctx: &Context,
        req: &dyn SoapBody,
        res: &mut dyn SoapBody,
    ) -> Result<(), SoapError> {
        assert_eq!(req.operation(), "Login");
        let body = res
            .as_any_mut()
            .downcast_mut::<Body<Login>>()
            .expect("Login body");
        body.res = Some(LoginResponse {
            returnval: self.session.clone(),
        });
        Ok(())
    }
}

fn session() -> UserSession {
    let login_time = DateTime(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());
    UserSession {
        key: "52b0b1f4-6c9b-0f1a-3c7e-8d0f0a3d9e21".to_string(),
        user_name: "VSPHERE.LOCAL\\Administrator".to_string(),
        full_name: "Administrator vsphere.local".to_string(),
        login_time,
        last_active_time: login_time,
        locale: "en".to_string(),
        message_locale: "en".to_string(),
        extension_session: false,
        ip_address: Some("10.0.0.5".to_string()),
        user_agent: None,
        call_count: Some(0),
    }
}

fn login_request() -> Login {
    Login {
        this: ManagedObjectReference::new("SessionManager", "SessionManager"),
        user_name: "administrator@vsphere.local".to_string(),
        password: "secret".to_string(),
        locale: None,
    }
}

#[test]
fn login_returns_the_stub_session() {
    let stub = LoginStub { session: session() };
    let response = methods::login(&Context::background(), &stub, login_request()).unwrap();
    assert_eq!(response.returnval, session());
}

#[test]
fn login_debug_hides_password() {
    assert!(!format!("{:?}", login_request()).contains("secret"));
}

#[test]
fn login_envelope_body() {
    let body = Body::request(login_request());
    let xml = RequestEnvelope::builder()
        .body(&body)
        .build()
        .to_xml_string()
        .unwrap();

    assert!(xml.contains(concat!(
        "<soapenv:Body><Login xmlns=\"urn:vim25\">",
        "<_this type=\"SessionManager\">SessionManager</_this>",
        "<userName>administrator@vsphere.local</userName>",
        "<password>secret</password>",
        "</Login></soapenv:Body>"
    )));
}

#[test]
fn power_on_envelope_uses_wire_name() {
    let body = Body::request(PowerOnVmTask::new(ManagedObjectReference::new(
        "VirtualMachine",
        "vm-42",
    )));
    let xml = RequestEnvelope::builder()
        .body(&body)
        .build()
        .to_xml_string()
        .unwrap();

    assert!(xml.contains(r#"<PowerOnVM_Task xmlns="urn:vim25"><_this type="VirtualMachine">vm-42</_this></PowerOnVM_Task>"#));
    assert_eq!(<PowerOnVmTask as Method>::RESPONSE_TAG, "PowerOnVM_TaskResponse");
}

#[test]
#[tracing_test::traced_test]
fn retrieve_result_is_decoded() {
    let xml = fs::read_to_string("tests/resources/retrieve_properties_ex_response.xml").unwrap();
    let mut body = Body::<RetrievePropertiesEx>::default();
    read_response(&xml, &mut body).unwrap();

    let result = body.into_result().unwrap().returnval.unwrap();
    assert_eq!(result.token.as_deref(), Some("1"));
    assert_eq!(result.objects.len(), 1);

    let vm = &result.objects[0];
    assert_eq!(vm.obj, ManagedObjectReference::new("VirtualMachine", "vm-42"));
    assert_eq!(vm.property("name").and_then(AnyType::as_str), Some("web-01"));
    assert_eq!(
        vm.property("runtime.powerState")
            .and_then(AnyType::as_str)
            .and_then(|state| state.parse::<VirtualMachinePowerState>().ok()),
        Some(VirtualMachinePowerState::PoweredOn)
    );
    assert_eq!(
        vm.property("datastore"),
        Some(&AnyType::ArrayOfMor(vec![ManagedObjectReference::new(
            "Datastore",
            "datastore-11"
        )]))
    );

    assert_eq!(vm.missing_set.len(), 1);
    assert_eq!(vm.missing_set[0].path, "config.annotation");
    assert_eq!(vm.missing_set[0].fault.kind(), "NoPermission");
    assert_eq!(vm.missing_set[0].fault.message(), "Permission denied");
}

#[test]
fn task_info_is_decoded_from_any_type() {
    let xml = fs::read_to_string("tests/resources/task_info_response.xml").unwrap();
    let mut body = Body::<RetrievePropertiesEx>::default();
    read_response(&xml, &mut body).unwrap();

    let result = body.into_result().unwrap().returnval.unwrap();
    let info = result.objects[0]
        .property("info")
        .and_then(AnyType::as_task_info)
        .unwrap();

    assert_eq!(info.state, TaskInfoState::Error);
    assert!(info.state.is_done());
    assert_eq!(info.entity_name.as_deref(), Some("web-01"));
    assert_eq!(info.event_chain_id, 5012);
    assert_eq!(info.reason.as_ref().and_then(|r| r.xsi_type()), Some("TaskReasonUser"));

    let error = info.error.as_ref().unwrap();
    assert_eq!(error.kind(), "InvalidPowerState");
    assert!(error.message().starts_with("The attempted operation"));
    assert_eq!(info.complete_time.unwrap().to_string(), "2024-05-01T10:00:01Z");
}

#[test]
fn catalog_wire_names_are_unique() {
    let mut seen = HashSet::new();
    for info in methods::CATALOG {
        assert!(seen.insert(info.name), "duplicate operation {}", info.name);
        assert_eq!(info.response_tag, format!("{}Response", info.name));
    }
    assert!(methods::CATALOG.len() >= 50);
}

#[test]
fn catalog_lookup() {
    let info = methods::find("RetrievePropertiesEx").unwrap();
    assert_eq!(info.request_type, "RetrievePropertiesEx");
    assert!(methods::find("NoSuchMethod").is_none());
}

#[test]
fn catalog_is_a_subset_of_vim25() {
    assert_eq!(methods::CATALOG.len(), 52);
    assert!(methods::find("PowerOnVM_Task").is_some());
    assert!(methods::find("CreateVM_Task").is_none());
    assert!(methods::find("ReconfigVM_Task").is_none());
}
