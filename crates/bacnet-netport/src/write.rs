//! WriteProperty dispatch for network-port objects.
//!
//! Secure-connect parameters that change together are never written
//! directly: a write stages the value and it takes effect on the next
//! apply.

use bacnet_codec::ApplicationValue as V;
use bacnet_object_common::{ArrayIndex, ObjectError, ObjectResult, WritePropertyRequest};
use bacnet_types::{ObjectType, PropertyIdentifier as P};
use tracing::{debug, instrument};

use crate::apply;
use crate::properties::{declared_type, is_array};
use crate::staging::{StagedField, StagedValue, StagingStore};
use crate::store::PortStore;

/// Properties written straight into the committed record.
const DIRECT: &[P] = &[
    P::OBJECT_NAME,
    P::DESCRIPTION,
    P::OUT_OF_SERVICE,
    P::MAX_MASTER,
    P::MAX_INFO_FRAMES,
    P::LINK_SPEED,
];

/// Applies a WriteProperty request to a network port.
///
/// # Errors
///
/// - `UnknownObject` / `UnknownProperty` as for reads
/// - `PropertyIsNotAnArray` for an element write to a scalar
/// - `WriteAccessDenied` for read-only properties
/// - `InvalidDataType` if the value has the wrong application type
/// - `ValidationFailure` if the value is out of range
#[instrument(skip(store, staging, request), fields(
    instance = request.object_instance,
    property = %request.property,
))]
pub fn write_property(
    store: &mut PortStore,
    staging: &mut StagingStore,
    request: &WritePropertyRequest,
) -> ObjectResult<()> {
    let property = request.property;
    let instance = request.object_instance;

    if request.object_type != ObjectType::NETWORK_PORT {
        return Err(ObjectError::unknown_object(request.object_type, instance));
    }
    if !store.contains(instance) {
        return Err(ObjectError::unknown_object(ObjectType::NETWORK_PORT, instance));
    }
    if !store.property_lists().contains(property) {
        return Err(ObjectError::unknown_property(ObjectType::NETWORK_PORT, property));
    }
    if request.array_index != ArrayIndex::All && !is_array(property) {
        return Err(ObjectError::PropertyIsNotAnArray { property });
    }

    let staged = StagedField::from_property(property);
    if staged.is_none() && !DIRECT.contains(&property) {
        return Err(ObjectError::WriteAccessDenied { property });
    }
    check_type(property, &request.value)?;

    if let Some(field) = staged {
        let value = to_staged(field, &request.value)
            .ok_or_else(|| wrong_type(property, &request.value))?;
        return apply::set_dirty(store, staging, instance, value);
    }

    let port = store.port_mut(instance)?;
    match (property, &request.value) {
        (P::OBJECT_NAME, V::CharacterString(name)) => port.set_object_name(name)?,
        (P::DESCRIPTION, V::CharacterString(text)) => port.set_description(text)?,
        (P::OUT_OF_SERVICE, V::Boolean(flag)) => port.set_out_of_service(*flag),
        (P::MAX_MASTER, V::Unsigned(n)) => port.set_max_master(to_u8("max-master", *n)?)?,
        (P::MAX_INFO_FRAMES, V::Unsigned(n)) => {
            port.set_max_info_frames(to_u8("max-info-frames", *n)?)?
        }
        (P::LINK_SPEED, V::Real(speed)) => port.set_link_speed(*speed)?,
        (_, value) => return Err(wrong_type(property, value)),
    }
    debug!("property written");
    Ok(())
}

fn check_type(property: P, value: &V) -> ObjectResult<()> {
    match declared_type(property) {
        Some(tag) if tag == value.tag() => Ok(()),
        _ => Err(wrong_type(property, value)),
    }
}

fn wrong_type(property: P, value: &V) -> ObjectError {
    let expected = declared_type(property)
        .map(|tag| tag.to_string())
        .unwrap_or_else(|| "none".to_string());
    ObjectError::invalid_data_type(
        property,
        format!("expected {}, got {}", expected, value.tag()),
    )
}

fn to_u8(field: &str, n: u64) -> ObjectResult<u8> {
    u8::try_from(n).map_err(|_| ObjectError::validation(field, format!("{} out of range", n)))
}

fn to_staged(field: StagedField, value: &V) -> Option<StagedValue> {
    let staged = match (field, value) {
        (StagedField::PrimaryHubUri, V::CharacterString(s)) => StagedValue::PrimaryHubUri(s.clone()),
        (StagedField::FailoverHubUri, V::CharacterString(s)) => {
            StagedValue::FailoverHubUri(s.clone())
        }
        (StagedField::HubFunctionEnable, V::Boolean(b)) => StagedValue::HubFunctionEnable(*b),
        (StagedField::HubFunctionBinding, V::CharacterString(s)) => {
            StagedValue::HubFunctionBinding(s.clone())
        }
        (StagedField::DirectConnectInitiateEnable, V::Boolean(b)) => {
            StagedValue::DirectConnectInitiateEnable(*b)
        }
        (StagedField::DirectConnectAcceptEnable, V::Boolean(b)) => {
            StagedValue::DirectConnectAcceptEnable(*b)
        }
        (StagedField::DirectConnectBinding, V::CharacterString(s)) => {
            StagedValue::DirectConnectBinding(s.clone())
        }
        _ => return None,
    };
    Some(staged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::PortProfile;
    use pretty_assertions::assert_eq;

    fn setup(profile: PortProfile) -> (PortStore, StagingStore) {
        let mut store = PortStore::new(profile);
        store.create_or_get(10).unwrap();
        (store, StagingStore::new())
    }

    fn request(property: P, value: V) -> WritePropertyRequest {
        WritePropertyRequest::new(ObjectType::NETWORK_PORT, 10, property, value)
    }

    #[test]
    fn test_direct_write() {
        let (mut store, mut staging) = setup(PortProfile::Standard);
        write_property(
            &mut store,
            &mut staging,
            &request(P::OBJECT_NAME, V::CharacterString("Trunk".into())),
        )
        .unwrap();
        write_property(&mut store, &mut staging, &request(P::MAX_MASTER, V::Unsigned(32))).unwrap();

        let port = store.port(10).unwrap();
        assert_eq!(port.object_name(), "Trunk");
        assert_eq!(port.max_master(), 32);
    }

    #[test]
    fn test_out_of_range_write_keeps_value() {
        let (mut store, mut staging) = setup(PortProfile::Standard);
        let err = write_property(&mut store, &mut staging, &request(P::MAX_MASTER, V::Unsigned(300)))
            .unwrap_err();
        assert!(matches!(err, ObjectError::ValidationFailure { .. }));
        assert_eq!(store.port(10).unwrap().max_master(), 127);
    }

    #[test]
    fn test_read_only_property() {
        let (mut store, mut staging) = setup(PortProfile::Standard);
        assert_eq!(
            write_property(&mut store, &mut staging, &request(P::APDU_LENGTH, V::Unsigned(480))),
            Err(ObjectError::WriteAccessDenied {
                property: P::APDU_LENGTH
            })
        );
    }

    #[test]
    fn test_wrong_type() {
        let (mut store, mut staging) = setup(PortProfile::Standard);
        let err = write_property(&mut store, &mut staging, &request(P::OUT_OF_SERVICE, V::Unsigned(1)))
            .unwrap_err();
        assert!(matches!(err, ObjectError::InvalidDataType { .. }));
    }

    #[test]
    fn test_element_write_to_scalar() {
        let (mut store, mut staging) = setup(PortProfile::Standard);
        let req = request(P::OBJECT_NAME, V::CharacterString("x".into()))
            .with_index(ArrayIndex::Element(1));
        assert!(matches!(
            write_property(&mut store, &mut staging, &req),
            Err(ObjectError::PropertyIsNotAnArray { .. })
        ));
    }

    #[test]
    fn test_secure_connect_write_is_staged() {
        let (mut store, mut staging) = setup(PortProfile::StandardWithSecureConnect);
        write_property(
            &mut store,
            &mut staging,
            &request(P::SC_PRIMARY_HUB_URI, V::CharacterString("wss://hub".into())),
        )
        .unwrap();

        let port = store.port(10).unwrap();
        assert_eq!(port.secure_connect().unwrap().primary_hub_uri(), "");
        assert!(port.changes_pending());
        let handle = store.handle(10).unwrap();
        assert_eq!(
            staging.staged_value(handle, StagedField::PrimaryHubUri),
            Some(StagedValue::PrimaryHubUri("wss://hub".into()))
        );
    }

    #[test]
    fn test_unlisted_secure_connect_property_on_standard_store() {
        let (mut store, mut staging) = setup(PortProfile::Standard);
        assert!(matches!(
            write_property(
                &mut store,
                &mut staging,
                &request(P::SC_HUB_FUNCTION_ENABLE, V::Boolean(true))
            ),
            Err(ObjectError::UnknownProperty { .. })
        ));
    }
}
