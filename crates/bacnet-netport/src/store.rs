//! PortStore - authoritative table of committed network-port records.
//!
//! Records live in a slot vector and are addressed internally by a
//! [`PortHandle`] (slot index) that survives renumbering. Instance numbers
//! are resolved through a `SyncMap`, so looking up an instance that was
//! never created fails instead of creating an empty record.

use bacnet_object_common::{ObjectError, ObjectResult, PropertyLists, SyncMap, SyncMapError};
use bacnet_types::{NetworkType, ObjectType, MAX_INSTANCE};
use std::fmt;
use tracing::{debug, instrument};

use crate::port::{NetworkPort, PortProfile};
use crate::properties;

/// Stable internal reference to a port record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortHandle(usize);

impl PortHandle {
    #[cfg(test)]
    pub(crate) const fn from_index(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for PortHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Committed network-port records, indexed by instance number.
#[derive(Debug, Clone)]
pub struct PortStore {
    profile: PortProfile,
    slots: Vec<NetworkPort>,
    instances: SyncMap<u32, PortHandle>,
}

impl PortStore {
    /// Creates an empty store whose ports carry the given profile.
    pub fn new(profile: PortProfile) -> Self {
        Self {
            profile,
            slots: Vec::new(),
            instances: SyncMap::new(),
        }
    }

    pub fn profile(&self) -> PortProfile {
        self.profile
    }

    /// Returns the property lists for ports in this store.
    pub fn property_lists(&self) -> PropertyLists {
        properties::property_lists(self.profile)
    }

    /// Removes every port.
    ///
    /// Staging records are keyed by slot, so this is only reachable through
    /// [`NetworkPorts::reset`](crate::NetworkPorts::reset), which clears both.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.instances.clear();
    }

    /// Returns the handle for `instance`, creating a default port if needed.
    #[instrument(skip(self))]
    pub fn create_or_get(&mut self, instance: u32) -> ObjectResult<PortHandle> {
        if let Some(handle) = self.instances.get(&instance) {
            return Ok(*handle);
        }
        check_instance(instance)?;

        let handle = PortHandle(self.slots.len());
        self.instances
            .insert_new(instance, handle)
            .map_err(|_| ObjectError::DuplicateInstance { instance })?;
        self.slots.push(NetworkPort::new(instance, self.profile));
        debug!(%handle, "created network port");
        Ok(handle)
    }

    pub fn handle(&self, instance: u32) -> Option<PortHandle> {
        self.instances.get(&instance).copied()
    }

    pub fn instance_of(&self, handle: PortHandle) -> Option<u32> {
        self.slots.get(handle.0).map(|port| port.instance)
    }

    /// Renumbers the port referenced by `handle`.
    ///
    /// # Errors
    ///
    /// - `UnknownObject` if the handle references no port
    /// - `ValidationFailure` if `new_instance` exceeds the instance range
    /// - `DuplicateInstance` if another port already uses `new_instance`
    #[instrument(skip(self))]
    pub fn set_instance_number(&mut self, handle: PortHandle, new_instance: u32) -> ObjectResult<()> {
        let old_instance = self
            .instance_of(handle)
            .ok_or_else(|| ObjectError::unknown_object(ObjectType::NETWORK_PORT, new_instance))?;
        check_instance(new_instance)?;

        self.instances
            .rekey(&old_instance, new_instance)
            .map_err(|e| match e {
                SyncMapError::KeyExists => ObjectError::DuplicateInstance {
                    instance: new_instance,
                },
                SyncMapError::KeyNotFound => {
                    ObjectError::unknown_object(ObjectType::NETWORK_PORT, old_instance)
                }
            })?;
        self.slots[handle.0].instance = new_instance;
        debug!(old_instance, "renumbered network port");
        Ok(())
    }

    pub fn set_port_type(&mut self, instance: u32, port_type: NetworkType) -> ObjectResult<()> {
        self.port_mut(instance)?.set_port_type(port_type);
        Ok(())
    }

    /// Returns the number of ports.
    pub fn count(&self) -> usize {
        self.instances.len()
    }

    /// Returns all instance numbers in ascending order.
    pub fn instances(&self) -> Vec<u32> {
        let mut instances: Vec<u32> = self.instances.keys().copied().collect();
        instances.sort_unstable();
        instances
    }

    pub fn contains(&self, instance: u32) -> bool {
        self.instances.contains_key(&instance)
    }

    pub fn get(&self, instance: u32) -> Option<&NetworkPort> {
        self.handle(instance).and_then(|h| self.slots.get(h.0))
    }

    /// Gets a port by instance number.
    pub fn port(&self, instance: u32) -> ObjectResult<&NetworkPort> {
        self.get(instance)
            .ok_or_else(|| ObjectError::unknown_object(ObjectType::NETWORK_PORT, instance))
    }

    /// Gets a mutable reference to a port.
    ///
    /// Returns `Err(UnknownObject)` if the port doesn't exist.
    pub fn port_mut(&mut self, instance: u32) -> ObjectResult<&mut NetworkPort> {
        let handle = self
            .handle(instance)
            .ok_or_else(|| ObjectError::unknown_object(ObjectType::NETWORK_PORT, instance))?;
        Ok(&mut self.slots[handle.0])
    }

    pub fn port_by_handle(&self, handle: PortHandle) -> Option<&NetworkPort> {
        self.slots.get(handle.0)
    }

    pub(crate) fn port_by_handle_mut(&mut self, handle: PortHandle) -> Option<&mut NetworkPort> {
        self.slots.get_mut(handle.0)
    }
}

fn check_instance(instance: u32) -> ObjectResult<()> {
    if instance > MAX_INSTANCE {
        return Err(ObjectError::validation(
            "object-identifier",
            format!("instance {} exceeds {}", instance, MAX_INSTANCE),
        ));
    }
    Ok(())
}
