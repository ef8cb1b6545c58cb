//! Staging and atomic apply of BACnet/SC parameters.
//!
//! Staged values only reach the committed record through [`apply`], which
//! moves every dirty field of one port or none of them.

use bacnet_object_common::{ObjectError, ObjectResult};
use bacnet_types::ObjectType;
use tracing::{debug, info, instrument, warn};

use crate::port::no_secure_connect;
use crate::staging::{StagedValue, StagingStore};
use crate::store::{PortHandle, PortStore};

fn resolve(store: &PortStore, instance: u32) -> ObjectResult<PortHandle> {
    store
        .handle(instance)
        .ok_or_else(|| ObjectError::unknown_object(ObjectType::NETWORK_PORT, instance))
}

/// Stages a BACnet/SC value for `instance` without touching its committed
/// value.
///
/// The value is validated now so that a later apply only fails on
/// conditions that changed in between. The port's changes-pending flag is
/// raised.
#[instrument(skip(store, staging, value), fields(field = %value.field()))]
pub fn set_dirty(
    store: &mut PortStore,
    staging: &mut StagingStore,
    instance: u32,
    value: StagedValue,
) -> ObjectResult<()> {
    let handle = resolve(store, instance)?;
    if !store.profile().has_secure_connect() {
        return Err(no_secure_connect());
    }
    value.validate()?;

    staging.stage(handle, value);
    if let Some(port) = store.port_by_handle_mut(handle) {
        port.set_changes_pending(true);
    }
    debug!("staged secure-connect value");
    Ok(())
}

/// Commits every dirty staged field of `instance`.
///
/// Returns the number of fields committed; a port with nothing staged is
/// a successful no-op. If any staged value fails validation against the
/// committed record, nothing is committed and the staged values are kept.
#[instrument(skip(store, staging))]
pub fn apply(store: &mut PortStore, staging: &mut StagingStore, instance: u32) -> ObjectResult<usize> {
    let handle = resolve(store, instance)?;
    let Some(pending) = staging.pending(handle) else {
        return Ok(0);
    };

    let committed = store
        .port_by_handle(handle)
        .and_then(|port| port.secure_connect())
        .ok_or_else(no_secure_connect)?;
    let merged = pending.merged_with(committed).inspect_err(|e| {
        warn!(error = %e, "pending secure-connect parameters rejected");
    })?;
    let count = pending.dirty_count();

    let port = store
        .port_by_handle_mut(handle)
        .ok_or_else(|| ObjectError::unknown_object(ObjectType::NETWORK_PORT, instance))?;
    port.replace_secure_connect(merged)?;
    port.set_changes_pending(false);
    staging.take(handle);

    info!(fields = count, "applied pending secure-connect parameters");
    Ok(count)
}

/// Applies every port with pending edits.
///
/// All ports are attempted; the first failure is returned after the rest
/// have been applied. Returns the total number of fields committed.
pub fn apply_all(store: &mut PortStore, staging: &mut StagingStore) -> ObjectResult<usize> {
    let mut total = 0;
    let mut first_error = None;

    for handle in staging.pending_handles() {
        let Some(instance) = store.instance_of(handle) else {
            continue;
        };
        match apply(store, staging, instance) {
            Ok(count) => total += count,
            Err(e) => {
                warn!(instance, error = %e, "apply failed");
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(total),
    }
}

/// Drops every staged field of `instance`.
///
/// Returns the number of fields discarded.
#[instrument(skip(store, staging))]
pub fn discard(store: &mut PortStore, staging: &mut StagingStore, instance: u32) -> ObjectResult<usize> {
    let handle = resolve(store, instance)?;
    let count = staging.take(handle).map_or(0, |p| p.dirty_count());
    if let Some(port) = store.port_by_handle_mut(handle) {
        port.set_changes_pending(false);
    }
    if count > 0 {
        info!(fields = count, "discarded pending secure-connect parameters");
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::{PortProfile, MAX_BINDING_LEN};
    use crate::staging::StagedField;
    use pretty_assertions::assert_eq;

    fn secure_store() -> (PortStore, StagingStore) {
        let mut store = PortStore::new(PortProfile::StandardWithSecureConnect);
        store.create_or_get(1234).unwrap();
        (store, StagingStore::new())
    }

    fn committed(store: &PortStore, instance: u32) -> crate::port::SecureConnectParams {
        store
            .port(instance)
            .unwrap()
            .secure_connect()
            .unwrap()
            .clone()
    }

    #[test]
    fn test_staging_does_not_touch_committed() {
        let (mut store, mut staging) = secure_store();
        set_dirty(
            &mut store,
            &mut staging,
            1234,
            StagedValue::PrimaryHubUri("test-uri-1".into()),
        )
        .unwrap();

        assert_eq!(committed(&store, 1234).primary_hub_uri(), "");
        assert!(store.port(1234).unwrap().changes_pending());

        assert_eq!(apply(&mut store, &mut staging, 1234).unwrap(), 1);
        assert_eq!(committed(&store, 1234).primary_hub_uri(), "test-uri-1");
        assert!(!store.port(1234).unwrap().changes_pending());

        let handle = store.handle(1234).unwrap();
        assert!(!staging.is_dirty(handle, StagedField::PrimaryHubUri));
    }

    #[test]
    fn test_apply_clean_is_noop() {
        let (mut store, mut staging) = secure_store();
        let before = committed(&store, 1234);
        assert_eq!(apply(&mut store, &mut staging, 1234).unwrap(), 0);
        assert_eq!(committed(&store, 1234), before);
    }

    #[test]
    fn test_unknown_instance() {
        let (mut store, mut staging) = secure_store();
        let err = set_dirty(
            &mut store,
            &mut staging,
            99,
            StagedValue::HubFunctionEnable(true),
        )
        .unwrap_err();
        assert!(matches!(err, ObjectError::UnknownObject { instance: 99, .. }));
        assert!(staging.pending_handles().is_empty());
        assert!(apply(&mut store, &mut staging, 99).is_err());
        assert!(discard(&mut store, &mut staging, 99).is_err());
    }

    #[test]
    fn test_standard_profile_rejects_staging() {
        let mut store = PortStore::new(PortProfile::Standard);
        let mut staging = StagingStore::new();
        store.create_or_get(1).unwrap();
        let err = set_dirty(
            &mut store,
            &mut staging,
            1,
            StagedValue::HubFunctionEnable(true),
        )
        .unwrap_err();
        assert!(matches!(err, ObjectError::ValidationFailure { .. }));
        assert!(!store.port(1).unwrap().changes_pending());
    }

    #[test]
    fn test_oversize_value_rejected_at_staging() {
        let (mut store, mut staging) = secure_store();
        let long = "x".repeat(200);
        assert!(set_dirty(
            &mut store,
            &mut staging,
            1234,
            StagedValue::FailoverHubUri(long)
        )
        .is_err());
        let handle = store.handle(1234).unwrap();
        assert!(!staging.has_pending(handle));
    }

    #[test]
    fn test_discard() {
        let (mut store, mut staging) = secure_store();
        set_dirty(
            &mut store,
            &mut staging,
            1234,
            StagedValue::HubFunctionEnable(true),
        )
        .unwrap();
        assert_eq!(discard(&mut store, &mut staging, 1234).unwrap(), 1);
        assert_eq!(apply(&mut store, &mut staging, 1234).unwrap(), 0);
        assert!(!committed(&store, 1234).hub_function_enable());
        assert!(!store.port(1234).unwrap().changes_pending());
    }

    #[test]
    fn test_apply_all() {
        let (mut store, mut staging) = secure_store();
        store.create_or_get(1).unwrap();
        store.create_or_get(2).unwrap();
        set_dirty(&mut store, &mut staging, 1, StagedValue::HubFunctionEnable(true)).unwrap();
        set_dirty(
            &mut store,
            &mut staging,
            2,
            StagedValue::DirectConnectBinding(":47809".into()),
        )
        .unwrap();
        set_dirty(
            &mut store,
            &mut staging,
            2,
            StagedValue::DirectConnectAcceptEnable(true),
        )
        .unwrap();

        assert_eq!(apply_all(&mut store, &mut staging).unwrap(), 3);
        assert!(committed(&store, 1).hub_function_enable());
        assert_eq!(committed(&store, 2).direct_connect_binding(), ":47809");
        assert!(committed(&store, 2).direct_connect_accept_enable());
        assert!(staging.pending_handles().is_empty());
    }

    #[test]
    fn test_renumber_keeps_pending() {
        let (mut store, mut staging) = secure_store();
        set_dirty(
            &mut store,
            &mut staging,
            1234,
            StagedValue::HubFunctionBinding("B".into()),
        )
        .unwrap();
        let handle = store.handle(1234).unwrap();
        store.set_instance_number(handle, 77).unwrap();

        assert_eq!(apply(&mut store, &mut staging, 77).unwrap(), 1);
        assert_eq!(committed(&store, 77).hub_function_binding(), "B");
    }

    #[test]
    fn test_rejected_apply_commits_nothing() {
        let (mut store, mut staging) = secure_store();
        set_dirty(
            &mut store,
            &mut staging,
            1234,
            StagedValue::PrimaryHubUri("wss://primary".into()),
        )
        .unwrap();
        let handle = store.handle(1234).unwrap();
        staging.stage(
            handle,
            StagedValue::DirectConnectBinding("b".repeat(MAX_BINDING_LEN + 1)),
        );
        let before = store.port(1234).unwrap().clone();

        assert!(matches!(
            apply(&mut store, &mut staging, 1234),
            Err(ObjectError::ValidationFailure { .. })
        ));
        assert_eq!(store.port(1234).unwrap(), &before);
        assert!(store.port(1234).unwrap().changes_pending());
        assert!(staging.is_dirty(handle, StagedField::PrimaryHubUri));
        assert!(staging.is_dirty(handle, StagedField::DirectConnectBinding));

        assert!(apply_all(&mut store, &mut staging).is_err());
        assert_eq!(store.port(1234).unwrap(), &before);
        assert_eq!(staging.pending(handle).unwrap().dirty_count(), 2);
    }
}
