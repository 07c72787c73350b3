//! Folder, datacenter and datastore operations.
use ironvim_macros::{XmlDeserialize, XmlSerialize};

use super::ManagedObjectReference;
use crate::macros::this_requests;

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct CreateFolder {
    #[xml(rename = "_this")]
    pub this: ManagedObjectReference,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct CreateDatacenter {
    #[xml(rename = "_this")]
    pub this: ManagedObjectReference,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct MoveIntoFolderTask {
    #[xml(rename = "_this")]
    pub this: ManagedObjectReference,
    pub list: Vec<ManagedObjectReference>,
}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct PowerOnMultiVmTask {
    #[xml(rename = "_this")]
    pub this: ManagedObjectReference,
    pub vm: Vec<ManagedObjectReference>,
}

this_requests! {
    UnregisterAndDestroyTask;
    RefreshDatastore;
    RefreshDatastoreStorageInfo;
    DestroyDatastore;
}

#[derive(Debug, Clone, PartialEq, Eq, XmlSerialize, XmlDeserialize)]
pub struct RenameDatastore {
    #[xml(rename = "_this")]
    pub this: ManagedObjectReference,
    pub new_name: String,
}
