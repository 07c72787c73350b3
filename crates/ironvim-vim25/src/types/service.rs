use ironvim_macros::{XmlDeserialize, XmlSerialize};

use super::ManagedObjectReference;
use crate::macros::this_requests;

this_requests! {
    RetrieveServiceContent;
    CurrentTime;
}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct AboutInfo {
    pub name: String,
    pub full_name: String,
    pub vendor: String,
    pub version: String,
    pub patch_level: Option<String>,
    pub build: String,
    pub locale_version: Option<String>,
    pub locale_build: Option<String>,
    pub os_type: String,
    pub product_line_id: String,
    pub api_type: String,
    pub api_version: String,
    pub instance_uuid: Option<String>,
    pub license_product_name: Option<String>,
    pub license_product_version: Option<String>,
}

impl AboutInfo {
    /// `VirtualCenter` for vCenter, `HostAgent` for a standalone ESXi host.
    pub fn is_vcenter(&self) -> bool {
        self.api_type == "VirtualCenter"
    }
}

/// Entry points returned by `RetrieveServiceContent`.
#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct ServiceContent {
    pub root_folder: ManagedObjectReference,
    pub property_collector: ManagedObjectReference,
    pub view_manager: Option<ManagedObjectReference>,
    pub about: AboutInfo,
    pub setting: Option<ManagedObjectReference>,
    pub user_directory: Option<ManagedObjectReference>,
    pub session_manager: Option<ManagedObjectReference>,
    pub authorization_manager: Option<ManagedObjectReference>,
    pub service_manager: Option<ManagedObjectReference>,
    pub perf_manager: Option<ManagedObjectReference>,
    pub scheduled_task_manager: Option<ManagedObjectReference>,
    pub alarm_manager: Option<ManagedObjectReference>,
    pub event_manager: Option<ManagedObjectReference>,
    pub task_manager: Option<ManagedObjectReference>,
    pub extension_manager: Option<ManagedObjectReference>,
    pub customization_spec_manager: Option<ManagedObjectReference>,
    pub custom_fields_manager: Option<ManagedObjectReference>,
    pub account_manager: Option<ManagedObjectReference>,
    pub diagnostic_manager: Option<ManagedObjectReference>,
    pub license_manager: Option<ManagedObjectReference>,
    pub search_index: Option<ManagedObjectReference>,
    pub file_manager: Option<ManagedObjectReference>,
    pub virtual_disk_manager: Option<ManagedObjectReference>,
    pub ovf_manager: Option<ManagedObjectReference>,
    pub guest_operations_manager: Option<ManagedObjectReference>,
}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct RetrieveServiceContentResponse {
    pub returnval: ServiceContent,
}
