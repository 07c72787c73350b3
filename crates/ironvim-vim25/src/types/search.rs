//! `SearchIndex` lookups. All of them answer with an optional reference.
use ironvim_macros::{XmlDeserialize, XmlSerialize};

use super::ManagedObjectReference;

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct FindByUuid {
    #[xml(rename = "_this")]
    pub this: ManagedObjectReference,
    pub datacenter: Option<ManagedObjectReference>,
    pub uuid: String,
    pub vm_search: bool,
    pub instance_uuid: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct FindAllByUuid {
    #[xml(rename = "_this")]
    pub this: ManagedObjectReference,
    pub datacenter: Option<ManagedObjectReference>,
    pub uuid: String,
    pub vm_search: bool,
    pub instance_uuid: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct FindByIp {
    #[xml(rename = "_this")]
    pub this: ManagedObjectReference,
    pub datacenter: Option<ManagedObjectReference>,
    pub ip: String,
    pub vm_search: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct FindByDnsName {
    #[xml(rename = "_this")]
    pub this: ManagedObjectReference,
    pub datacenter: Option<ManagedObjectReference>,
    pub dns_name: String,
    pub vm_search: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct FindByInventoryPath {
    #[xml(rename = "_this")]
    pub this: ManagedObjectReference,
    pub inventory_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct FindByDatastorePath {
    #[xml(rename = "_this")]
    pub this: ManagedObjectReference,
    pub datacenter: ManagedObjectReference,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct FindChild {
    #[xml(rename = "_this")]
    pub this: ManagedObjectReference,
    pub entity: ManagedObjectReference,
    pub name: String,
}
