use ironvim_macros::{XmlDeserialize, XmlSerialize};
use ironvim_xml::parser::UnParsed;

use super::{AnyType, DateTime, ManagedObjectReference};
use crate::macros::{this_requests, xml_enum};

xml_enum! {
    pub enum TaskInfoState {
        Queued => "queued",
        Running => "running",
        Success => "success",
        Error => "error",
    }
}

impl TaskInfoState {
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }
}

/// A fault with its server-side localized message, as found in `TaskInfo.error`.
#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct LocalizedMethodFault {
    pub fault: UnParsed,
    pub localized_message: Option<String>,
}

impl LocalizedMethodFault {
    /// The fault type, e.g. `FileNotFound`.
    pub fn kind(&self) -> &str {
        self.fault.xsi_type().unwrap_or(&self.fault.name)
    }

    pub fn message(&self) -> &str {
        self.localized_message.as_deref().unwrap_or_else(|| self.kind())
    }
}

#[derive(Debug, Clone, PartialEq, XmlSerialize, XmlDeserialize)]
pub struct TaskInfo {
    pub key: String,
    pub task: ManagedObjectReference,
    pub name: Option<String>,
    pub description_id: String,
    pub entity: Option<ManagedObjectReference>,
    pub entity_name: Option<String>,
    pub locked: Vec<ManagedObjectReference>,
    pub state: TaskInfoState,
    pub cancelled: bool,
    pub cancelable: bool,
    pub error: Option<LocalizedMethodFault>,
    pub result: Option<AnyType>,
    pub progress: Option<i32>,
    pub reason: Option<UnParsed>,
    pub queue_time: DateTime,
    pub start_time: Option<DateTime>,
    pub complete_time: Option<DateTime>,
    pub event_chain_id: i32,
    pub change_tag: Option<String>,
    pub parent_task_key: Option<String>,
    pub root_task_key: Option<String>,
    pub activation_id: Option<String>,
}

this_requests! {
    CancelTask;
}
