//! NetworkPorts - the network-port object context a device owns.

use bacnet_object_common::{
    ObjectError, ObjectHandler, ObjectResult, PropertyLists, ReadPropertyRequest,
    WritePropertyRequest,
};
use bacnet_types::ObjectType;
use tracing::info;

use crate::apply;
use crate::port::PortProfile;
use crate::read;
use crate::staging::{StagedField, StagedValue, StagingStore};
use crate::store::{PortHandle, PortStore};
use crate::write;

/// Committed ports plus their staged secure-connect edits.
///
/// Operations take `&self`/`&mut self`; a device that services requests
/// from several threads wraps the context in a lock.
#[derive(Debug, Clone)]
pub struct NetworkPorts {
    store: PortStore,
    staging: StagingStore,
}

impl NetworkPorts {
    pub fn new(profile: PortProfile) -> Self {
        Self {
            store: PortStore::new(profile),
            staging: StagingStore::new(),
        }
    }

    /// Drops every port and every staged edit.
    pub fn reset(&mut self) {
        self.store.clear();
        self.staging.clear();
        info!(profile = %self.store.profile(), "network ports reset");
    }

    pub fn profile(&self) -> PortProfile {
        self.store.profile()
    }

    pub fn store(&self) -> &PortStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut PortStore {
        &mut self.store
    }

    pub fn staging(&self) -> &StagingStore {
        &self.staging
    }

    /// Creates the port if it does not exist yet.
    pub fn create(&mut self, instance: u32) -> ObjectResult<PortHandle> {
        self.store.create_or_get(instance)
    }

    pub fn set_dirty(&mut self, instance: u32, value: StagedValue) -> ObjectResult<()> {
        apply::set_dirty(&mut self.store, &mut self.staging, instance, value)
    }

    /// Returns the staged value of `field`, if it is dirty.
    ///
    /// This is the only way to observe a staged value.
    pub fn staged_value(&self, instance: u32, field: StagedField) -> ObjectResult<Option<StagedValue>> {
        let handle = self.handle(instance)?;
        Ok(self.staging.staged_value(handle, field))
    }

    pub fn is_dirty(&self, instance: u32, field: StagedField) -> ObjectResult<bool> {
        let handle = self.handle(instance)?;
        Ok(self.staging.is_dirty(handle, field))
    }

    pub fn has_pending(&self, instance: u32) -> ObjectResult<bool> {
        let handle = self.handle(instance)?;
        Ok(self.staging.has_pending(handle))
    }

    pub fn apply(&mut self, instance: u32) -> ObjectResult<usize> {
        apply::apply(&mut self.store, &mut self.staging, instance)
    }

    pub fn apply_all(&mut self) -> ObjectResult<usize> {
        apply::apply_all(&mut self.store, &mut self.staging)
    }

    pub fn discard(&mut self, instance: u32) -> ObjectResult<usize> {
        apply::discard(&mut self.store, &mut self.staging, instance)
    }

    fn handle(&self, instance: u32) -> ObjectResult<PortHandle> {
        self.store
            .handle(instance)
            .ok_or_else(|| ObjectError::unknown_object(ObjectType::NETWORK_PORT, instance))
    }
}

impl ObjectHandler for NetworkPorts {
    fn object_type(&self) -> ObjectType {
        ObjectType::NETWORK_PORT
    }

    fn property_lists(&self) -> PropertyLists {
        self.store.property_lists()
    }

    fn count(&self) -> usize {
        self.store.count()
    }

    fn valid_instance(&self, instance: u32) -> bool {
        self.store.contains(instance)
    }

    fn index_to_instance(&self, index: usize) -> Option<u32> {
        self.store.instances().get(index).copied()
    }

    fn read_property(&self, request: &ReadPropertyRequest, buf: &mut [u8]) -> ObjectResult<usize> {
        read::read_property(&self.store, request, buf)
    }

    fn write_property(&mut self, request: &WritePropertyRequest) -> ObjectResult<()> {
        write::write_property(&mut self.store, &mut self.staging, request)
    }

    fn object_name(&self, instance: u32) -> Option<String> {
        self.store
            .get(instance)
            .map(|port| port.object_name().to_string())
    }

    fn activate_changes(&mut self) -> ObjectResult<()> {
        self.apply_all().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bacnet_types::{ObjectIdentifier, PropertyIdentifier};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_handler_directory() {
        let mut ports = NetworkPorts::new(PortProfile::Standard);
        ports.create(20).unwrap();
        ports.create(3).unwrap();

        assert_eq!(ports.count(), 2);
        assert_eq!(ports.index_to_instance(0), Some(3));
        assert_eq!(ports.index_to_instance(2), None);
        assert!(ports.valid_instance(20));
        assert!(!ports.valid_instance(21));
        assert_eq!(ports.object_name(3).as_deref(), Some("NP-3"));
        assert!(ports.has_property(PropertyIdentifier::CHANGES_PENDING));
        assert_eq!(
            ports.object_identifiers(),
            vec![
                ObjectIdentifier::new(ObjectType::NETWORK_PORT, 3).unwrap(),
                ObjectIdentifier::new(ObjectType::NETWORK_PORT, 20).unwrap(),
            ]
        );
    }

    #[test]
    fn test_activate_changes_applies_staged() {
        let mut ports = NetworkPorts::new(PortProfile::StandardWithSecureConnect);
        ports.create(1).unwrap();
        ports
            .set_dirty(1, StagedValue::DirectConnectInitiateEnable(true))
            .unwrap();
        assert!(ports.has_pending(1).unwrap());

        ports.activate_changes().unwrap();
        assert!(!ports.has_pending(1).unwrap());
        let sc = ports.store().port(1).unwrap().secure_connect().unwrap();
        assert!(sc.direct_connect_initiate_enable());
    }

    #[test]
    fn test_staging_queries_reject_unknown_instance() {
        let ports = NetworkPorts::new(PortProfile::StandardWithSecureConnect);
        assert!(ports
            .staged_value(5, StagedField::PrimaryHubUri)
            .is_err());
        assert!(ports.is_dirty(5, StagedField::PrimaryHubUri).is_err());
    }

    #[test]
    fn test_reset() {
        let mut ports = NetworkPorts::new(PortProfile::StandardWithSecureConnect);
        ports.create(1).unwrap();
        ports
            .set_dirty(1, StagedValue::HubFunctionEnable(true))
            .unwrap();
        ports.reset();
        assert_eq!(ports.count(), 0);
        ports.create(1).unwrap();
        assert!(!ports.has_pending(1).unwrap());
    }

    #[test]
    fn test_reused_slot_starts_clean() {
        let mut ports = NetworkPorts::new(PortProfile::StandardWithSecureConnect);
        let old = ports.create(1).unwrap();
        ports
            .set_dirty(1, StagedValue::PrimaryHubUri("stale".into()))
            .unwrap();
        ports.reset();

        let fresh = ports.create(42).unwrap();
        assert_eq!(fresh, old);
        assert!(!ports.has_pending(42).unwrap());
        assert!(ports.staging().pending_handles().is_empty());
        assert_eq!(ports.apply(42).unwrap(), 0);

        let port = ports.store().port(42).unwrap();
        assert_eq!(port.secure_connect().unwrap().primary_hub_uri(), "");
        assert!(!port.changes_pending());
    }
}
