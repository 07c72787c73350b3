use ironvim_macros::{XmlDeserialize, XmlSerialize};

use super::{AnyType, ManagedObjectReference};

#[derive(Debug, Clone, PartialEq, XmlSerialize, XmlDeserialize)]
pub struct OptionValue {
    pub key: String,
    pub value: AnyType,
}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct QueryOptions {
    #[xml(rename = "_this")]
    pub this: ManagedObjectReference,
    /// A full key, or a prefix ending in `.`.
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, XmlSerialize, XmlDeserialize)]
pub struct QueryOptionsResponse {
    pub returnval: Vec<OptionValue>,
}

#[derive(Debug, Clone, PartialEq, XmlSerialize, XmlDeserialize)]
pub struct UpdateOptions {
    #[xml(rename = "_this")]
    pub this: ManagedObjectReference,
    pub changed_value: Vec<OptionValue>,
}
