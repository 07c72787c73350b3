//! Response shapes shared by many operations.
use ironvim_macros::{XmlDeserialize, XmlSerialize};

use super::{DateTime, ManagedObjectReference};

/// Reply of an operation that returns nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct VoidResponse {}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct MorResponse {
    pub returnval: ManagedObjectReference,
}

/// Reply of the `*_Task` operations: the task to wait on.
pub type TaskResponse = MorResponse;

#[derive(Debug, Clone, Default, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct OptionalMorResponse {
    pub returnval: Option<ManagedObjectReference>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct MorListResponse {
    pub returnval: Vec<ManagedObjectReference>,
}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct BoolResponse {
    pub returnval: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct StringResponse {
    pub returnval: String,
}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct DateTimeResponse {
    pub returnval: DateTime,
}
