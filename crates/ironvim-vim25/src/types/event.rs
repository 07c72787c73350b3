use ironvim_macros::{XmlDeserialize, XmlSerialize};

use super::{DateTime, ManagedObjectReference};
use crate::macros::xml_enum;

xml_enum! {
    pub enum EventFilterSpecRecursionOption {
        SelfOnly => "self",
        Children => "children",
        All => "all",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct EventFilterSpecByEntity {
    pub entity: ManagedObjectReference,
    pub recursion: EventFilterSpecRecursionOption,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct EventFilterSpecByTime {
    pub begin_time: Option<DateTime>,
    pub end_time: Option<DateTime>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct EventFilterSpec {
    pub entity: Option<EventFilterSpecByEntity>,
    pub time: Option<EventFilterSpecByTime>,
    pub event_type_id: Vec<String>,
    pub max_count: Option<i32>,
}

/// Fields common to every event type. Subtype fields are not kept.
#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct Event {
    pub key: i32,
    pub chain_id: i32,
    pub created_time: DateTime,
    pub user_name: Option<String>,
    pub full_formatted_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct QueryEvents {
    #[xml(rename = "_this")]
    pub this: ManagedObjectReference,
    pub filter: EventFilterSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct QueryEventsResponse {
    pub returnval: Vec<Event>,
}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct LogUserEvent {
    #[xml(rename = "_this")]
    pub this: ManagedObjectReference,
    pub entity: ManagedObjectReference,
    pub msg: String,
}
