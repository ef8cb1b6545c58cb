//! Staged (not yet applied) BACnet/SC parameters.
//!
//! A staged field is simply a `Some` in [`PendingSecureConnect`]; there is
//! no separate dirty flag. Staged values are never visible through property
//! reads, only through [`StagingStore::staged_value`].

use bacnet_object_common::{ObjectResult, SyncMap};
use bacnet_types::PropertyIdentifier;
use std::fmt;

use crate::port::SecureConnectParams;
use crate::store::PortHandle;

/// The BACnet/SC fields that change through staging and apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StagedField {
    PrimaryHubUri,
    FailoverHubUri,
    HubFunctionEnable,
    HubFunctionBinding,
    DirectConnectInitiateEnable,
    DirectConnectAcceptEnable,
    DirectConnectBinding,
}

impl StagedField {
    pub const ALL: [StagedField; 7] = [
        StagedField::PrimaryHubUri,
        StagedField::FailoverHubUri,
        StagedField::HubFunctionEnable,
        StagedField::HubFunctionBinding,
        StagedField::DirectConnectInitiateEnable,
        StagedField::DirectConnectAcceptEnable,
        StagedField::DirectConnectBinding,
    ];

    /// Returns the property that reads the committed value of this field.
    pub const fn property(&self) -> PropertyIdentifier {
        match self {
            StagedField::PrimaryHubUri => PropertyIdentifier::SC_PRIMARY_HUB_URI,
            StagedField::FailoverHubUri => PropertyIdentifier::SC_FAILOVER_HUB_URI,
            StagedField::HubFunctionEnable => PropertyIdentifier::SC_HUB_FUNCTION_ENABLE,
            StagedField::HubFunctionBinding => PropertyIdentifier::SC_HUB_FUNCTION_BINDING,
            StagedField::DirectConnectInitiateEnable => {
                PropertyIdentifier::SC_DIRECT_CONNECT_INITIATE_ENABLE
            }
            StagedField::DirectConnectAcceptEnable => {
                PropertyIdentifier::SC_DIRECT_CONNECT_ACCEPT_ENABLE
            }
            StagedField::DirectConnectBinding => PropertyIdentifier::SC_DIRECT_CONNECT_BINDING,
        }
    }

    pub fn from_property(property: PropertyIdentifier) -> Option<Self> {
        StagedField::ALL
            .into_iter()
            .find(|field| field.property() == property)
    }
}

impl fmt::Display for StagedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.property())
    }
}

/// A typed value for one staged field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagedValue {
    PrimaryHubUri(String),
    FailoverHubUri(String),
    HubFunctionEnable(bool),
    HubFunctionBinding(String),
    DirectConnectInitiateEnable(bool),
    DirectConnectAcceptEnable(bool),
    DirectConnectBinding(String),
}

impl StagedValue {
    pub fn field(&self) -> StagedField {
        match self {
            StagedValue::PrimaryHubUri(_) => StagedField::PrimaryHubUri,
            StagedValue::FailoverHubUri(_) => StagedField::FailoverHubUri,
            StagedValue::HubFunctionEnable(_) => StagedField::HubFunctionEnable,
            StagedValue::HubFunctionBinding(_) => StagedField::HubFunctionBinding,
            StagedValue::DirectConnectInitiateEnable(_) => StagedField::DirectConnectInitiateEnable,
            StagedValue::DirectConnectAcceptEnable(_) => StagedField::DirectConnectAcceptEnable,
            StagedValue::DirectConnectBinding(_) => StagedField::DirectConnectBinding,
        }
    }

    /// Checks the value against the field's constraints.
    ///
    /// Uses the committed setters on a scratch record so staging and apply
    /// enforce identical limits.
    pub fn validate(&self) -> ObjectResult<()> {
        let mut scratch = SecureConnectParams::default();
        self.write_to(&mut scratch)
    }

    /// Writes the value into committed parameters.
    pub fn write_to(&self, params: &mut SecureConnectParams) -> ObjectResult<()> {
        match self {
            StagedValue::PrimaryHubUri(uri) => params.set_primary_hub_uri(uri),
            StagedValue::FailoverHubUri(uri) => params.set_failover_hub_uri(uri),
            StagedValue::HubFunctionEnable(enable) => {
                params.set_hub_function_enable(*enable);
                Ok(())
            }
            StagedValue::HubFunctionBinding(binding) => params.set_hub_function_binding(binding),
            StagedValue::DirectConnectInitiateEnable(enable) => {
                params.set_direct_connect_initiate_enable(*enable);
                Ok(())
            }
            StagedValue::DirectConnectAcceptEnable(enable) => {
                params.set_direct_connect_accept_enable(*enable);
                Ok(())
            }
            StagedValue::DirectConnectBinding(binding) => {
                params.set_direct_connect_binding(binding)
            }
        }
    }
}

/// Pending BACnet/SC edits for one port.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingSecureConnect {
    pub primary_hub_uri: Option<String>,
    pub failover_hub_uri: Option<String>,
    pub hub_function_enable: Option<bool>,
    pub hub_function_binding: Option<String>,
    pub direct_connect_initiate_enable: Option<bool>,
    pub direct_connect_accept_enable: Option<bool>,
    pub direct_connect_binding: Option<String>,
}

impl PendingSecureConnect {
    /// Stages a value, replacing any earlier staged value for the field.
    pub fn stage(&mut self, value: StagedValue) {
        match value {
            StagedValue::PrimaryHubUri(v) => self.primary_hub_uri = Some(v),
            StagedValue::FailoverHubUri(v) => self.failover_hub_uri = Some(v),
            StagedValue::HubFunctionEnable(v) => self.hub_function_enable = Some(v),
            StagedValue::HubFunctionBinding(v) => self.hub_function_binding = Some(v),
            StagedValue::DirectConnectInitiateEnable(v) => {
                self.direct_connect_initiate_enable = Some(v)
            }
            StagedValue::DirectConnectAcceptEnable(v) => {
                self.direct_connect_accept_enable = Some(v)
            }
            StagedValue::DirectConnectBinding(v) => self.direct_connect_binding = Some(v),
        }
    }

    /// Returns the staged value of `field`, if it is dirty.
    pub fn get(&self, field: StagedField) -> Option<StagedValue> {
        match field {
            StagedField::PrimaryHubUri => {
                self.primary_hub_uri.clone().map(StagedValue::PrimaryHubUri)
            }
            StagedField::FailoverHubUri => {
                self.failover_hub_uri.clone().map(StagedValue::FailoverHubUri)
            }
            StagedField::HubFunctionEnable => {
                self.hub_function_enable.map(StagedValue::HubFunctionEnable)
            }
            StagedField::HubFunctionBinding => self
                .hub_function_binding
                .clone()
                .map(StagedValue::HubFunctionBinding),
            StagedField::DirectConnectInitiateEnable => self
                .direct_connect_initiate_enable
                .map(StagedValue::DirectConnectInitiateEnable),
            StagedField::DirectConnectAcceptEnable => self
                .direct_connect_accept_enable
                .map(StagedValue::DirectConnectAcceptEnable),
            StagedField::DirectConnectBinding => self
                .direct_connect_binding
                .clone()
                .map(StagedValue::DirectConnectBinding),
        }
    }

    pub fn is_dirty(&self, field: StagedField) -> bool {
        match field {
            StagedField::PrimaryHubUri => self.primary_hub_uri.is_some(),
            StagedField::FailoverHubUri => self.failover_hub_uri.is_some(),
            StagedField::HubFunctionEnable => self.hub_function_enable.is_some(),
            StagedField::HubFunctionBinding => self.hub_function_binding.is_some(),
            StagedField::DirectConnectInitiateEnable => {
                self.direct_connect_initiate_enable.is_some()
            }
            StagedField::DirectConnectAcceptEnable => self.direct_connect_accept_enable.is_some(),
            StagedField::DirectConnectBinding => self.direct_connect_binding.is_some(),
        }
    }

    /// Returns every dirty value, in field order.
    pub fn dirty_values(&self) -> Vec<StagedValue> {
        StagedField::ALL
            .into_iter()
            .filter_map(|field| self.get(field))
            .collect()
    }

    pub fn dirty_count(&self) -> usize {
        StagedField::ALL
            .into_iter()
            .filter(|field| self.is_dirty(*field))
            .count()
    }

    pub fn is_clean(&self) -> bool {
        self.dirty_count() == 0
    }

    /// Writes every dirty value into a copy of `committed`.
    ///
    /// Returns the merged parameters, or the first validation failure.
    /// `committed` itself is never modified.
    pub fn merged_with(&self, committed: &SecureConnectParams) -> ObjectResult<SecureConnectParams> {
        let mut merged = committed.clone();
        for value in self.dirty_values() {
            value.write_to(&mut merged)?;
        }
        Ok(merged)
    }
}

/// Per-port staging records, keyed by port handle.
#[derive(Debug, Clone, Default)]
pub struct StagingStore {
    pending: SyncMap<PortHandle, PendingSecureConnect>,
}

impl StagingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a staged value for `handle`.
    ///
    /// The caller has already checked that the port exists and the value is
    /// valid.
    pub(crate) fn stage(&mut self, handle: PortHandle, value: StagedValue) {
        self.pending
            .get_or_insert_with(handle, PendingSecureConnect::default)
            .stage(value);
    }

    pub fn pending(&self, handle: PortHandle) -> Option<&PendingSecureConnect> {
        self.pending.get(&handle).filter(|p| !p.is_clean())
    }

    pub fn staged_value(&self, handle: PortHandle, field: StagedField) -> Option<StagedValue> {
        self.pending.get(&handle).and_then(|p| p.get(field))
    }

    pub fn is_dirty(&self, handle: PortHandle, field: StagedField) -> bool {
        self.pending
            .get(&handle)
            .is_some_and(|p| p.is_dirty(field))
    }

    pub fn has_pending(&self, handle: PortHandle) -> bool {
        self.pending(handle).is_some()
    }

    /// Removes and returns the staged record for `handle`.
    pub(crate) fn take(&mut self, handle: PortHandle) -> Option<PendingSecureConnect> {
        self.pending.remove(&handle)
    }

    /// Returns the handles with at least one dirty field, in slot order.
    pub fn pending_handles(&self) -> Vec<PortHandle> {
        let mut handles: Vec<PortHandle> = self
            .pending
            .iter()
            .filter(|(_, p)| !p.is_clean())
            .map(|(h, _)| *h)
            .collect();
        handles.sort_unstable();
        handles
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::{MAX_BINDING_LEN, MAX_HUB_URI_LEN};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_field_property_mapping() {
        for field in StagedField::ALL {
            assert_eq!(StagedField::from_property(field.property()), Some(field));
        }
        assert_eq!(
            StagedField::from_property(PropertyIdentifier::SC_HEARTBEAT_TIMEOUT),
            None
        );
    }

    #[test]
    fn test_stage_marks_dirty() {
        let mut pending = PendingSecureConnect::default();
        assert!(pending.is_clean());

        pending.stage(StagedValue::HubFunctionEnable(true));
        pending.stage(StagedValue::PrimaryHubUri("wss://a".into()));
        pending.stage(StagedValue::PrimaryHubUri("wss://b".into()));

        assert_eq!(pending.dirty_count(), 2);
        assert!(pending.is_dirty(StagedField::PrimaryHubUri));
        assert!(!pending.is_dirty(StagedField::FailoverHubUri));
        assert_eq!(
            pending.get(StagedField::PrimaryHubUri),
            Some(StagedValue::PrimaryHubUri("wss://b".into()))
        );
        assert_eq!(pending.get(StagedField::DirectConnectBinding), None);
    }

    #[test]
    fn test_merge_leaves_unstaged_fields() {
        let mut committed = SecureConnectParams::default();
        committed.set_failover_hub_uri("wss://failover").unwrap();
        let mut pending = PendingSecureConnect::default();
        pending.stage(StagedValue::PrimaryHubUri("wss://primary".into()));

        let merged = pending.merged_with(&committed).unwrap();
        assert_eq!(merged.primary_hub_uri(), "wss://primary");
        assert_eq!(merged.failover_hub_uri(), "wss://failover");
        assert_eq!(committed.primary_hub_uri(), "");
    }

    #[test]
    fn test_merge_rejects_whole_record() {
        let mut committed = SecureConnectParams::default();
        committed.set_primary_hub_uri("wss://committed").unwrap();
        let before = committed.clone();
        let pending = PendingSecureConnect {
            primary_hub_uri: Some("wss://primary".into()),
            hub_function_binding: Some("b".repeat(MAX_BINDING_LEN + 1)),
            ..Default::default()
        };

        assert!(matches!(
            pending.merged_with(&committed),
            Err(bacnet_object_common::ObjectError::ValidationFailure { .. })
        ));
        assert_eq!(committed, before);
        assert_eq!(pending.dirty_count(), 2);
    }

    #[test]
    fn test_validate_limits() {
        let long = "u".repeat(MAX_HUB_URI_LEN + 1);
        assert!(StagedValue::PrimaryHubUri(long).validate().is_err());
        let long = "b".repeat(MAX_BINDING_LEN + 1);
        assert!(StagedValue::DirectConnectBinding(long).validate().is_err());
        assert!(StagedValue::DirectConnectAcceptEnable(true).validate().is_ok());
    }

    #[test]
    fn test_store_pending_handles() {
        let mut staging = StagingStore::new();
        let h = PortHandle::from_index(2);
        assert!(!staging.has_pending(h));

        staging.stage(h, StagedValue::HubFunctionEnable(true));
        assert!(staging.has_pending(h));
        assert!(staging.is_dirty(h, StagedField::HubFunctionEnable));
        assert_eq!(staging.pending_handles(), vec![h]);

        let taken = staging.take(h).unwrap();
        assert_eq!(taken.dirty_count(), 1);
        assert!(!staging.has_pending(h));
    }
}
