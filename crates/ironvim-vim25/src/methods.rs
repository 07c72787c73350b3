//! The vim25 operation table.
//!
//! This is a subset of the vim25 method set, not all of it. [`find`] returns
//! `None` for a real vim25 operation that has no row here:
//!
//! ```
//! use ironvim_vim25::methods;
//!
//! assert!(methods::find("PowerOnVM_Task").is_some());
//! assert!(methods::find("CreateVM_Task").is_none());
//! ```
//!
//! One row per operation: wrapper name, request type, response type, wire name.
//! Adding an operation is one row here plus its request type in [`crate::types`].
use crate::types::*;

ironvim_soap::define_methods! {
    // ServiceInstance
    retrieve_service_content: RetrieveServiceContent => RetrieveServiceContentResponse, "RetrieveServiceContent";
    current_time: CurrentTime => DateTimeResponse, "CurrentTime";

    // SessionManager
    login: Login => LoginResponse, "Login";
    logout: Logout => VoidResponse, "Logout";
    session_is_active: SessionIsActive => BoolResponse, "SessionIsActive";
    terminate_session: TerminateSession => VoidResponse, "TerminateSession";
    set_locale: SetLocale => VoidResponse, "SetLocale";
    acquire_clone_ticket: AcquireCloneTicket => StringResponse, "AcquireCloneTicket";

    // PropertyCollector
    retrieve_properties: RetrieveProperties => RetrievePropertiesResponse, "RetrieveProperties";
    retrieve_properties_ex: RetrievePropertiesEx => RetrievePropertiesExResponse, "RetrievePropertiesEx";
    continue_retrieve_properties_ex: ContinueRetrievePropertiesEx => ContinueRetrievePropertiesExResponse, "ContinueRetrievePropertiesEx";
    cancel_retrieve_properties_ex: CancelRetrievePropertiesEx => VoidResponse, "CancelRetrievePropertiesEx";
    create_property_collector: CreatePropertyCollector => MorResponse, "CreatePropertyCollector";
    destroy_property_collector: DestroyPropertyCollector => VoidResponse, "DestroyPropertyCollector";
    create_filter: CreateFilter => MorResponse, "CreateFilter";
    destroy_property_filter: DestroyPropertyFilter => VoidResponse, "DestroyPropertyFilter";

    // Task
    cancel_task: CancelTask => VoidResponse, "CancelTask";

    // VirtualMachine
    power_on_vm_task: PowerOnVmTask => TaskResponse, "PowerOnVM_Task";
    power_off_vm_task: PowerOffVmTask => TaskResponse, "PowerOffVM_Task";
    reset_vm_task: ResetVmTask => TaskResponse, "ResetVM_Task";
    suspend_vm_task: SuspendVmTask => TaskResponse, "SuspendVM_Task";
    shutdown_guest: ShutdownGuest => VoidResponse, "ShutdownGuest";
    reboot_guest: RebootGuest => VoidResponse, "RebootGuest";
    standby_guest: StandbyGuest => VoidResponse, "StandbyGuest";
    unregister_vm: UnregisterVm => VoidResponse, "UnregisterVM";
    mark_as_template: MarkAsTemplate => VoidResponse, "MarkAsTemplate";
    create_snapshot_task: CreateSnapshotTask => TaskResponse, "CreateSnapshot_Task";
    remove_all_snapshots_task: RemoveAllSnapshotsTask => TaskResponse, "RemoveAllSnapshots_Task";
    revert_to_current_snapshot_task: RevertToCurrentSnapshotTask => TaskResponse, "RevertToCurrentSnapshot_Task";
    answer_vm: AnswerVm => VoidResponse, "AnswerVM";

    // ManagedEntity
    destroy_task: DestroyTask => TaskResponse, "Destroy_Task";
    rename_task: RenameTask => TaskResponse, "Rename_Task";

    // Folder
    create_folder: CreateFolder => MorResponse, "CreateFolder";
    create_datacenter: CreateDatacenter => MorResponse, "CreateDatacenter";
    move_into_folder_task: MoveIntoFolderTask => TaskResponse, "MoveIntoFolder_Task";
    unregister_and_destroy_task: UnregisterAndDestroyTask => TaskResponse, "UnregisterAndDestroy_Task";

    // Datacenter
    power_on_multi_vm_task: PowerOnMultiVmTask => TaskResponse, "PowerOnMultiVM_Task";

    // Datastore
    refresh_datastore: RefreshDatastore => VoidResponse, "RefreshDatastore";
    refresh_datastore_storage_info: RefreshDatastoreStorageInfo => VoidResponse, "RefreshDatastoreStorageInfo";
    rename_datastore: RenameDatastore => VoidResponse, "RenameDatastore";
    destroy_datastore: DestroyDatastore => VoidResponse, "DestroyDatastore";

    // SearchIndex
    find_by_uuid: FindByUuid => OptionalMorResponse, "FindByUuid";
    find_all_by_uuid: FindAllByUuid => MorListResponse, "FindAllByUuid";
    find_by_ip: FindByIp => OptionalMorResponse, "FindByIp";
    find_by_dns_name: FindByDnsName => OptionalMorResponse, "FindByDnsName";
    find_by_inventory_path: FindByInventoryPath => OptionalMorResponse, "FindByInventoryPath";
    find_by_datastore_path: FindByDatastorePath => OptionalMorResponse, "FindByDatastorePath";
    find_child: FindChild => OptionalMorResponse, "FindChild";

    // OptionManager
    query_options: QueryOptions => QueryOptionsResponse, "QueryOptions";
    update_options: UpdateOptions => VoidResponse, "UpdateOptions";

    // EventManager
    query_events: QueryEvents => QueryEventsResponse, "QueryEvents";
    log_user_event: LogUserEvent => VoidResponse, "LogUserEvent";
}

/// Looks up a catalog row by wire name.
pub fn find(name: &str) -> Option<&'static ironvim_soap::MethodInfo> {
    CATALOG.iter().find(|info| info.name == name)
}
