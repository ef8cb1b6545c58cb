//! ReadProperty dispatch for network-port objects.
//!
//! Reads are a projection of the committed record in [`PortStore`]; staged
//! values are never consulted.

use bacnet_codec::{encode_application_value, ApplicationValue, BitString, CodecError};
use bacnet_object_common::{ArrayIndex, ObjectError, ObjectResult, ReadPropertyRequest};
use bacnet_types::{ObjectIdentifier, ObjectType, PropertyIdentifier as P};
use std::net::{Ipv4Addr, Ipv6Addr};

use crate::port::NetworkPort;
use crate::store::PortStore;

/// The current value of one property.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PropertyValue {
    Single(ApplicationValue),
    Array(Vec<ApplicationValue>),
}

/// Encodes the requested property of a network port into `buf`.
///
/// Returns the number of octets written. An empty array read as a whole
/// encodes to zero octets.
///
/// # Errors
///
/// - `UnknownObject` if the request is not for a network port, or the
///   instance does not exist
/// - `UnknownProperty` if the property is not listed for network ports
/// - `PropertyIsNotAnArray` if an element is requested from a scalar
/// - `InvalidArrayIndex` if the element is past the end of the array
/// - `EncodingBufferTooSmall` if `buf` cannot hold the encoding
pub fn read_property(
    store: &PortStore,
    request: &ReadPropertyRequest,
    buf: &mut [u8],
) -> ObjectResult<usize> {
    if request.object_type != ObjectType::NETWORK_PORT {
        return Err(ObjectError::unknown_object(
            request.object_type,
            request.object_instance,
        ));
    }
    let port = store.port(request.object_instance)?;

    let property = request.property;
    if !store.property_lists().contains(property) {
        return Err(ObjectError::unknown_property(ObjectType::NETWORK_PORT, property));
    }
    let value = property_value(port, property)
        .ok_or_else(|| ObjectError::unknown_property(ObjectType::NETWORK_PORT, property))??;

    match (value, request.array_index) {
        (PropertyValue::Single(value), ArrayIndex::All) => encode_values(buf, &[value]),
        (PropertyValue::Single(_), ArrayIndex::Element(_)) => {
            Err(ObjectError::PropertyIsNotAnArray { property })
        }
        (PropertyValue::Array(values), ArrayIndex::All) => encode_values(buf, &values),
        (PropertyValue::Array(values), ArrayIndex::Element(0)) => {
            encode_values(buf, &[ApplicationValue::Unsigned(values.len() as u64)])
        }
        (PropertyValue::Array(values), ArrayIndex::Element(n)) => {
            let element = usize::try_from(n - 1)
                .ok()
                .and_then(|i| values.get(i))
                .ok_or(ObjectError::InvalidArrayIndex {
                    property,
                    index: n,
                    size: values.len(),
                })?;
            encode_values(buf, std::slice::from_ref(element))
        }
    }
}

fn encode_values(buf: &mut [u8], values: &[ApplicationValue]) -> ObjectResult<usize> {
    let available = buf.len();
    let mut len = 0;
    for value in values {
        let written = match encode_application_value(&mut buf[len..], value) {
            Ok(written) => written,
            Err(CodecError::BufferTooSmall { needed, .. }) => {
                return Err(ObjectError::EncodingBufferTooSmall {
                    needed: len + needed,
                    available,
                })
            }
            Err(e) => return Err(ObjectError::from_encode(e)),
        };
        len += written;
    }
    Ok(len)
}

/// Returns the committed value of `property`, or `None` if the port does
/// not carry it.
pub(crate) fn property_value(
    port: &NetworkPort,
    property: P,
) -> Option<ObjectResult<PropertyValue>> {
    use ApplicationValue as V;

    let single = |value: ApplicationValue| -> Option<ObjectResult<PropertyValue>> {
        Some(Ok(PropertyValue::Single(value)))
    };
    let ipv4 = |addr: Ipv4Addr| V::OctetString(addr.octets().to_vec());
    let ipv6 = |addr: Ipv6Addr| V::OctetString(addr.octets().to_vec());

    match property {
        P::OBJECT_IDENTIFIER => Some(
            ObjectIdentifier::new(ObjectType::NETWORK_PORT, port.instance())
                .map(|id| PropertyValue::Single(V::ObjectIdentifier(id)))
                .map_err(|e| ObjectError::validation("object-identifier", e.to_string())),
        ),
        P::OBJECT_NAME => single(V::CharacterString(port.object_name().to_string())),
        P::OBJECT_TYPE => single(V::Enumerated(u32::from(ObjectType::NETWORK_PORT.as_u16()))),
        P::DESCRIPTION => single(V::CharacterString(port.description().to_string())),
        P::STATUS_FLAGS => single(V::BitString(BitString::from_bits(&port.status_flags()))),
        P::RELIABILITY => single(V::Enumerated(port.reliability().code())),
        P::OUT_OF_SERVICE => single(V::Boolean(port.out_of_service())),
        P::NETWORK_TYPE => single(V::Enumerated(port.port_type().code())),
        P::PROTOCOL_LEVEL => single(V::Enumerated(port.protocol_level().code())),
        P::NETWORK_NUMBER => single(V::Unsigned(u64::from(port.network_number()))),
        P::NETWORK_NUMBER_QUALITY => single(V::Enumerated(port.network_number_quality().code())),
        P::CHANGES_PENDING => single(V::Boolean(port.changes_pending())),
        P::APDU_LENGTH => single(V::Unsigned(u64::from(port.apdu_length()))),
        P::LINK_SPEED => single(V::Real(port.link_speed())),
        P::LINK_SPEEDS => Some(Ok(PropertyValue::Array(
            port.link_speeds().iter().copied().map(V::Real).collect(),
        ))),
        P::LINK_SPEED_AUTONEGOTIATE => single(V::Boolean(port.link_speed_autonegotiate())),
        P::MAC_ADDRESS => single(V::OctetString(port.mac_address().to_vec())),
        P::MAX_MASTER => single(V::Unsigned(u64::from(port.max_master()))),
        P::MAX_INFO_FRAMES => single(V::Unsigned(u64::from(port.max_info_frames()))),

        P::BACNET_IP_MODE => single(V::Enumerated(port.ipv4().mode.code())),
        P::IP_ADDRESS => single(ipv4(port.ipv4().address)),
        P::BACNET_IP_UDP_PORT => single(V::Unsigned(u64::from(port.ipv4().udp_port))),
        P::IP_SUBNET_MASK => single(ipv4(port.ipv4().subnet_mask())),
        P::IP_DEFAULT_GATEWAY => single(ipv4(port.ipv4().gateway)),
        P::IP_DNS_SERVER => Some(Ok(PropertyValue::Array(
            port.ipv4().dns_servers.iter().copied().map(ipv4).collect(),
        ))),
        P::IP_DHCP_ENABLE => single(V::Boolean(port.ipv4().dhcp_enable)),

        P::BACNET_IPV6_MODE => single(V::Enumerated(port.ipv6().mode.code())),
        P::IPV6_ADDRESS => single(ipv6(port.ipv6().address)),
        P::IPV6_PREFIX_LENGTH => single(V::Unsigned(u64::from(port.ipv6().prefix_length))),
        P::BACNET_IPV6_UDP_PORT => single(V::Unsigned(u64::from(port.ipv6().udp_port))),
        P::IPV6_DEFAULT_GATEWAY => single(ipv6(port.ipv6().gateway)),
        P::IPV6_DNS_SERVER => Some(Ok(PropertyValue::Array(
            port.ipv6().dns_servers.iter().copied().map(ipv6).collect(),
        ))),
        P::BACNET_IPV6_MULTICAST_ADDRESS => single(ipv6(port.ipv6().multicast_address)),
        P::IPV6_ZONE_INDEX => single(V::CharacterString(port.ipv6().zone_index.clone())),

        _ => secure_connect_value(port, property).map(|v| Ok(PropertyValue::Single(v))),
    }
}

fn secure_connect_value(port: &NetworkPort, property: P) -> Option<ApplicationValue> {
    use ApplicationValue as V;

    let sc = port.secure_connect()?;
    let value = match property {
        P::MAX_BVLC_LENGTH_ACCEPTED => V::Unsigned(u64::from(sc.max_bvlc_length_accepted())),
        P::MAX_NPDU_LENGTH_ACCEPTED => V::Unsigned(u64::from(sc.max_npdu_length_accepted())),
        P::SC_PRIMARY_HUB_URI => V::CharacterString(sc.primary_hub_uri().to_string()),
        P::SC_FAILOVER_HUB_URI => V::CharacterString(sc.failover_hub_uri().to_string()),
        P::SC_MINIMUM_RECONNECT_TIME => V::Unsigned(u64::from(sc.minimum_reconnect_time())),
        P::SC_MAXIMUM_RECONNECT_TIME => V::Unsigned(u64::from(sc.maximum_reconnect_time())),
        P::SC_CONNECT_WAIT_TIMEOUT => V::Unsigned(u64::from(sc.connect_wait_timeout())),
        P::SC_DISCONNECT_WAIT_TIMEOUT => V::Unsigned(u64::from(sc.disconnect_wait_timeout())),
        P::SC_HEARTBEAT_TIMEOUT => V::Unsigned(u64::from(sc.heartbeat_timeout())),
        P::SC_HUB_FUNCTION_ENABLE => V::Boolean(sc.hub_function_enable()),
        P::SC_HUB_FUNCTION_BINDING => V::CharacterString(sc.hub_function_binding().to_string()),
        P::SC_DIRECT_CONNECT_INITIATE_ENABLE => V::Boolean(sc.direct_connect_initiate_enable()),
        P::SC_DIRECT_CONNECT_ACCEPT_ENABLE => V::Boolean(sc.direct_connect_accept_enable()),
        P::SC_DIRECT_CONNECT_BINDING => V::CharacterString(sc.direct_connect_binding().to_string()),
        _ => return None,
    };
    Some(value)
}
