use ironvim_macros::{XmlDeserialize, XmlSerialize};

use super::ManagedObjectReference;
use crate::macros::{this_requests, xml_enum};

xml_enum! {
    pub enum VirtualMachinePowerState {
        PoweredOff => "poweredOff",
        PoweredOn => "poweredOn",
        Suspended => "suspended",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct PowerOnVmTask {
    #[xml(rename = "_this")]
    pub this: ManagedObjectReference,
    pub host: Option<ManagedObjectReference>,
}

impl PowerOnVmTask {
    pub fn new(this: ManagedObjectReference) -> Self {
        Self { this, host: None }
    }
}

this_requests! {
    PowerOffVmTask;
    ResetVmTask;
    SuspendVmTask;
    ShutdownGuest;
    RebootGuest;
    StandbyGuest;
    UnregisterVm;
    MarkAsTemplate;
    /// Applies to any managed entity.
    DestroyTask;
}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct RenameTask {
    #[xml(rename = "_this")]
    pub this: ManagedObjectReference,
    pub new_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct CreateSnapshotTask {
    #[xml(rename = "_this")]
    pub this: ManagedObjectReference,
    pub name: String,
    pub description: Option<String>,
    pub memory: bool,
    pub quiesce: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct RemoveAllSnapshotsTask {
    #[xml(rename = "_this")]
    pub this: ManagedObjectReference,
    pub consolidate: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct RevertToCurrentSnapshotTask {
    #[xml(rename = "_this")]
    pub this: ManagedObjectReference,
    pub host: Option<ManagedObjectReference>,
    pub suppress_power_on: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct AnswerVm {
    #[xml(rename = "_this")]
    pub this: ManagedObjectReference,
    pub question_id: String,
    pub answer_choice: String,
}
