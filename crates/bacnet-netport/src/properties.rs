//! Network-port property registry.
//!
//! The lists report every declared property regardless of the port's
//! network type; reads never drop a property because it is meaningless for
//! the link technology.

use bacnet_codec::ApplicationTag;
use bacnet_object_common::PropertyLists;
use bacnet_types::PropertyIdentifier as P;
use once_cell::sync::Lazy;

use crate::port::PortProfile;

const REQUIRED: &[P] = &[
    P::OBJECT_IDENTIFIER,
    P::OBJECT_NAME,
    P::OBJECT_TYPE,
    P::STATUS_FLAGS,
    P::RELIABILITY,
    P::OUT_OF_SERVICE,
    P::NETWORK_TYPE,
    P::PROTOCOL_LEVEL,
    P::NETWORK_NUMBER,
    P::NETWORK_NUMBER_QUALITY,
    P::CHANGES_PENDING,
    P::APDU_LENGTH,
    P::LINK_SPEED,
];

const OPTIONAL: &[P] = &[
    P::DESCRIPTION,
    P::MAC_ADDRESS,
    P::MAX_MASTER,
    P::MAX_INFO_FRAMES,
    P::LINK_SPEEDS,
    P::LINK_SPEED_AUTONEGOTIATE,
    P::BACNET_IP_MODE,
    P::IP_ADDRESS,
    P::BACNET_IP_UDP_PORT,
    P::IP_SUBNET_MASK,
    P::IP_DEFAULT_GATEWAY,
    P::IP_DNS_SERVER,
    P::IP_DHCP_ENABLE,
    P::BACNET_IPV6_MODE,
    P::IPV6_ADDRESS,
    P::IPV6_PREFIX_LENGTH,
    P::BACNET_IPV6_UDP_PORT,
    P::IPV6_DEFAULT_GATEWAY,
    P::IPV6_DNS_SERVER,
    P::BACNET_IPV6_MULTICAST_ADDRESS,
    P::IPV6_ZONE_INDEX,
];

const SECURE_CONNECT: &[P] = &[
    P::MAX_BVLC_LENGTH_ACCEPTED,
    P::MAX_NPDU_LENGTH_ACCEPTED,
    P::SC_PRIMARY_HUB_URI,
    P::SC_FAILOVER_HUB_URI,
    P::SC_MINIMUM_RECONNECT_TIME,
    P::SC_MAXIMUM_RECONNECT_TIME,
    P::SC_CONNECT_WAIT_TIMEOUT,
    P::SC_DISCONNECT_WAIT_TIMEOUT,
    P::SC_HEARTBEAT_TIMEOUT,
    P::SC_HUB_FUNCTION_ENABLE,
    P::SC_HUB_FUNCTION_BINDING,
    P::SC_DIRECT_CONNECT_INITIATE_ENABLE,
    P::SC_DIRECT_CONNECT_ACCEPT_ENABLE,
    P::SC_DIRECT_CONNECT_BINDING,
];

const PROPRIETARY: &[P] = &[];

static OPTIONAL_WITH_SECURE_CONNECT: Lazy<Vec<P>> =
    Lazy::new(|| OPTIONAL.iter().chain(SECURE_CONNECT).copied().collect());

/// Returns the property lists for ports of the given profile.
pub fn property_lists(profile: PortProfile) -> PropertyLists {
    match profile {
        PortProfile::Standard => PropertyLists::new(REQUIRED, OPTIONAL, PROPRIETARY),
        PortProfile::StandardWithSecureConnect => PropertyLists::new(
            REQUIRED,
            Lazy::force(&OPTIONAL_WITH_SECURE_CONNECT).as_slice(),
            PROPRIETARY,
        ),
    }
}

/// Returns the application type a property is encoded with.
///
/// For array properties this is the element type.
pub fn declared_type(property: P) -> Option<ApplicationTag> {
    let tag = match property {
        P::OBJECT_IDENTIFIER => ApplicationTag::ObjectIdentifier,
        P::OBJECT_NAME
        | P::DESCRIPTION
        | P::IPV6_ZONE_INDEX
        | P::SC_PRIMARY_HUB_URI
        | P::SC_FAILOVER_HUB_URI
        | P::SC_HUB_FUNCTION_BINDING
        | P::SC_DIRECT_CONNECT_BINDING => ApplicationTag::CharacterString,
        P::OBJECT_TYPE
        | P::RELIABILITY
        | P::NETWORK_TYPE
        | P::PROTOCOL_LEVEL
        | P::NETWORK_NUMBER_QUALITY
        | P::BACNET_IP_MODE
        | P::BACNET_IPV6_MODE => ApplicationTag::Enumerated,
        P::STATUS_FLAGS => ApplicationTag::BitString,
        P::OUT_OF_SERVICE
        | P::CHANGES_PENDING
        | P::LINK_SPEED_AUTONEGOTIATE
        | P::IP_DHCP_ENABLE
        | P::SC_HUB_FUNCTION_ENABLE
        | P::SC_DIRECT_CONNECT_INITIATE_ENABLE
        | P::SC_DIRECT_CONNECT_ACCEPT_ENABLE => ApplicationTag::Boolean,
        P::NETWORK_NUMBER
        | P::APDU_LENGTH
        | P::MAX_MASTER
        | P::MAX_INFO_FRAMES
        | P::BACNET_IP_UDP_PORT
        | P::IPV6_PREFIX_LENGTH
        | P::BACNET_IPV6_UDP_PORT
        | P::MAX_BVLC_LENGTH_ACCEPTED
        | P::MAX_NPDU_LENGTH_ACCEPTED
        | P::SC_MINIMUM_RECONNECT_TIME
        | P::SC_MAXIMUM_RECONNECT_TIME
        | P::SC_CONNECT_WAIT_TIMEOUT
        | P::SC_DISCONNECT_WAIT_TIMEOUT
        | P::SC_HEARTBEAT_TIMEOUT => ApplicationTag::UnsignedInt,
        P::LINK_SPEED | P::LINK_SPEEDS => ApplicationTag::Real,
        P::MAC_ADDRESS
        | P::IP_ADDRESS
        | P::IP_SUBNET_MASK
        | P::IP_DEFAULT_GATEWAY
        | P::IP_DNS_SERVER
        | P::IPV6_ADDRESS
        | P::IPV6_DEFAULT_GATEWAY
        | P::IPV6_DNS_SERVER
        | P::BACNET_IPV6_MULTICAST_ADDRESS => ApplicationTag::OctetString,
        _ => return None,
    };
    Some(tag)
}

/// Returns true if the property is a BACnetARRAY.
pub fn is_array(property: P) -> bool {
    matches!(
        property,
        P::LINK_SPEEDS | P::IP_DNS_SERVER | P::IPV6_DNS_SERVER
    )
}
