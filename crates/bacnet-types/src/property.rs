//! Property identifier space.
//!
//! Property identifiers are 22-bit codes. Values 0-511 and 4194304 and above
//! are reserved for standard properties; 512-4194303 are proprietary.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// BACnet property identifier.
///
/// Object implementations compare identifiers for membership in their
/// property lists, so the type is an opaque code with named constants rather
/// than a closed enum: a request may carry any identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct PropertyIdentifier(u32);

macro_rules! property_identifiers {
    ($($name:ident = $code:literal => $text:literal,)+) => {
        impl PropertyIdentifier {
            $(pub const $name: PropertyIdentifier = PropertyIdentifier($code);)+

            /// Returns the standard hyphenated name, if this code has one.
            pub fn name(&self) -> Option<&'static str> {
                match self.0 {
                    $($code => Some($text),)+
                    _ => None,
                }
            }

            fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($text => Some(Self::$name),)+
                    _ => None,
                }
            }
        }
    };
}

property_identifiers! {
    DESCRIPTION = 28 => "description",
    MAX_INFO_FRAMES = 63 => "max-info-frames",
    MAX_MASTER = 64 => "max-master",
    OBJECT_IDENTIFIER = 75 => "object-identifier",
    OBJECT_NAME = 77 => "object-name",
    OBJECT_TYPE = 79 => "object-type",
    OUT_OF_SERVICE = 81 => "out-of-service",
    PRESENT_VALUE = 85 => "present-value",
    RELIABILITY = 103 => "reliability",
    STATUS_FLAGS = 111 => "status-flags",
    PROPERTY_LIST = 371 => "property-list",
    APDU_LENGTH = 399 => "apdu-length",
    IP_ADDRESS = 400 => "ip-address",
    IP_DEFAULT_GATEWAY = 401 => "ip-default-gateway",
    IP_DHCP_ENABLE = 402 => "ip-dhcp-enable",
    IP_DNS_SERVER = 406 => "ip-dns-server",
    BACNET_IP_MODE = 408 => "bacnet-ip-mode",
    IP_SUBNET_MASK = 411 => "ip-subnet-mask",
    BACNET_IP_UDP_PORT = 412 => "bacnet-ip-udp-port",
    CHANGES_PENDING = 416 => "changes-pending",
    LINK_SPEED = 420 => "link-speed",
    LINK_SPEEDS = 421 => "link-speeds",
    LINK_SPEED_AUTONEGOTIATE = 422 => "link-speed-autonegotiate",
    MAC_ADDRESS = 423 => "mac-address",
    NETWORK_NUMBER = 425 => "network-number",
    NETWORK_NUMBER_QUALITY = 426 => "network-number-quality",
    NETWORK_TYPE = 427 => "network-type",
    BACNET_IPV6_MODE = 435 => "bacnet-ipv6-mode",
    IPV6_ADDRESS = 436 => "ipv6-address",
    IPV6_PREFIX_LENGTH = 437 => "ipv6-prefix-length",
    BACNET_IPV6_UDP_PORT = 438 => "bacnet-ipv6-udp-port",
    IPV6_DEFAULT_GATEWAY = 439 => "ipv6-default-gateway",
    BACNET_IPV6_MULTICAST_ADDRESS = 440 => "bacnet-ipv6-multicast-address",
    IPV6_DNS_SERVER = 441 => "ipv6-dns-server",
    IPV6_ZONE_INDEX = 446 => "ipv6-zone-index",
    PROTOCOL_LEVEL = 482 => "protocol-level",
    MAX_BVLC_LENGTH_ACCEPTED = 4_194_304 => "max-bvlc-length-accepted",
    MAX_NPDU_LENGTH_ACCEPTED = 4_194_305 => "max-npdu-length-accepted",
    SC_PRIMARY_HUB_URI = 4_194_309 => "sc-primary-hub-uri",
    SC_FAILOVER_HUB_URI = 4_194_310 => "sc-failover-hub-uri",
    SC_MINIMUM_RECONNECT_TIME = 4_194_311 => "sc-minimum-reconnect-time",
    SC_MAXIMUM_RECONNECT_TIME = 4_194_312 => "sc-maximum-reconnect-time",
    SC_CONNECT_WAIT_TIMEOUT = 4_194_313 => "sc-connect-wait-timeout",
    SC_DISCONNECT_WAIT_TIMEOUT = 4_194_314 => "sc-disconnect-wait-timeout",
    SC_HEARTBEAT_TIMEOUT = 4_194_315 => "sc-heartbeat-timeout",
    SC_HUB_FUNCTION_ENABLE = 4_194_317 => "sc-hub-function-enable",
    SC_HUB_FUNCTION_BINDING = 4_194_319 => "sc-hub-function-binding",
    SC_DIRECT_CONNECT_INITIATE_ENABLE = 4_194_321 => "sc-direct-connect-initiate-enable",
    SC_DIRECT_CONNECT_ACCEPT_ENABLE = 4_194_322 => "sc-direct-connect-accept-enable",
    SC_DIRECT_CONNECT_BINDING = 4_194_324 => "sc-direct-connect-binding",
}

impl PropertyIdentifier {
    /// First code of the proprietary range.
    pub const PROPRIETARY_MIN: u32 = 512;

    /// Last code of the proprietary range.
    pub const PROPRIETARY_MAX: u32 = 4_194_303;

    /// Creates an identifier from its raw code.
    pub const fn from_u32(code: u32) -> Self {
        PropertyIdentifier(code)
    }

    /// Returns the raw code.
    pub const fn as_u32(&self) -> u32 {
        self.0
    }

    /// Returns true if the code is in the vendor-proprietary range.
    pub const fn is_proprietary(&self) -> bool {
        self.0 >= Self::PROPRIETARY_MIN && self.0 <= Self::PROPRIETARY_MAX
    }
}

impl fmt::Display for PropertyIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}", name),
            None if self.is_proprietary() => write!(f, "proprietary-{}", self.0),
            None => write!(f, "property-{}", self.0),
        }
    }
}

impl FromStr for PropertyIdentifier {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase().replace('_', "-");
        if let Some(id) = PropertyIdentifier::from_name(&lower) {
            return Ok(id);
        }
        lower
            .parse::<u32>()
            .map(PropertyIdentifier)
            .map_err(|_| ParseError::InvalidPropertyIdentifier(s.to_string()))
    }
}

impl From<u32> for PropertyIdentifier {
    fn from(code: u32) -> Self {
        PropertyIdentifier(code)
    }
}

impl From<PropertyIdentifier> for u32 {
    fn from(id: PropertyIdentifier) -> u32 {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_names_round_trip() {
        assert_eq!(PropertyIdentifier::OBJECT_NAME.to_string(), "object-name");
        assert_eq!(
            "sc-primary-hub-uri".parse::<PropertyIdentifier>().unwrap(),
            PropertyIdentifier::SC_PRIMARY_HUB_URI
        );
        assert_eq!(
            "IP_DNS_SERVER".parse::<PropertyIdentifier>().unwrap(),
            PropertyIdentifier::IP_DNS_SERVER
        );
    }

    #[test]
    fn test_numeric_parse() {
        assert_eq!(
            "75".parse::<PropertyIdentifier>().unwrap(),
            PropertyIdentifier::OBJECT_IDENTIFIER
        );
        assert!("not-a-property".parse::<PropertyIdentifier>().is_err());
    }

    #[test]
    fn test_proprietary_range() {
        assert!(!PropertyIdentifier::from_u32(511).is_proprietary());
        assert!(PropertyIdentifier::from_u32(512).is_proprietary());
        assert!(PropertyIdentifier::from_u32(4_194_303).is_proprietary());
        assert!(!PropertyIdentifier::SC_PRIMARY_HUB_URI.is_proprietary());
        assert_eq!(PropertyIdentifier::from_u32(600).to_string(), "proprietary-600");
        assert_eq!(PropertyIdentifier::from_u32(300).to_string(), "property-300");
    }
}
