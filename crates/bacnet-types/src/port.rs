//! Enumerated values carried by network-port properties.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Link technology of a network port (the network-type property).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NetworkType {
    /// ISO 8802-3 Ethernet.
    Ethernet,
    /// ARCNET.
    Arcnet,
    /// Master-slave/token-passing over RS-485.
    Mstp,
    /// Point-to-point.
    Ptp,
    /// LonTalk.
    Lontalk,
    /// BACnet/IP over IPv4.
    BacnetIp,
    /// ZigBee.
    Zigbee,
    /// Virtual network (routing only).
    Virtual,
    /// Non-BACnet network.
    NonBacnet,
    /// BACnet/IPv6.
    BacnetIpv6,
    /// Serial.
    Serial,
    /// BACnet Secure Connect.
    SecureConnect,
}

impl NetworkType {
    /// Every network type, in code order.
    pub const ALL: [NetworkType; 12] = [
        NetworkType::Ethernet,
        NetworkType::Arcnet,
        NetworkType::Mstp,
        NetworkType::Ptp,
        NetworkType::Lontalk,
        NetworkType::BacnetIp,
        NetworkType::Zigbee,
        NetworkType::Virtual,
        NetworkType::NonBacnet,
        NetworkType::BacnetIpv6,
        NetworkType::Serial,
        NetworkType::SecureConnect,
    ];

    /// Returns the enumerated code.
    pub const fn code(&self) -> u32 {
        match self {
            NetworkType::Ethernet => 0,
            NetworkType::Arcnet => 1,
            NetworkType::Mstp => 2,
            NetworkType::Ptp => 3,
            NetworkType::Lontalk => 4,
            NetworkType::BacnetIp => 5,
            NetworkType::Zigbee => 6,
            NetworkType::Virtual => 7,
            NetworkType::NonBacnet => 8,
            NetworkType::BacnetIpv6 => 9,
            NetworkType::Serial => 10,
            NetworkType::SecureConnect => 11,
        }
    }

    /// Returns true if the port runs over an IP datalink.
    pub const fn is_ip(&self) -> bool {
        matches!(
            self,
            NetworkType::BacnetIp | NetworkType::BacnetIpv6 | NetworkType::SecureConnect
        )
    }

    /// Returns true if the port runs over an RS-485 style serial datalink.
    pub const fn is_serial(&self) -> bool {
        matches!(self, NetworkType::Mstp | NetworkType::Serial)
    }

    fn as_str(&self) -> &'static str {
        match self {
            NetworkType::Ethernet => "ethernet",
            NetworkType::Arcnet => "arcnet",
            NetworkType::Mstp => "mstp",
            NetworkType::Ptp => "ptp",
            NetworkType::Lontalk => "lontalk",
            NetworkType::BacnetIp => "bacnet-ip",
            NetworkType::Zigbee => "zigbee",
            NetworkType::Virtual => "virtual",
            NetworkType::NonBacnet => "non-bacnet",
            NetworkType::BacnetIpv6 => "bacnet-ipv6",
            NetworkType::Serial => "serial",
            NetworkType::SecureConnect => "secure-connect",
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NetworkType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_lowercase().replace('_', "-");
        let alias = match normalized.as_str() {
            "ms/tp" => "mstp",
            "bip" | "ipv4" => "bacnet-ip",
            "bip6" | "ipv6" => "bacnet-ipv6",
            "bsc" | "sc" => "secure-connect",
            other => other,
        };
        NetworkType::ALL
            .into_iter()
            .find(|t| t.as_str() == alias)
            .ok_or_else(|| ParseError::InvalidNetworkType(s.to_string()))
    }
}

impl TryFrom<u32> for NetworkType {
    type Error = ParseError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        NetworkType::ALL
            .into_iter()
            .find(|t| t.code() == code)
            .ok_or(ParseError::InvalidEnumerated {
                kind: "network-type",
                value: code,
            })
    }
}

/// Reliability of an object's reported values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Reliability {
    #[default]
    NoFaultDetected,
    NoSensor,
    OverRange,
    UnderRange,
    OpenLoop,
    ShortedLoop,
    NoOutput,
    UnreliableOther,
    ProcessError,
    ConfigurationError,
    CommunicationFailure,
}

impl Reliability {
    /// Returns the enumerated code.
    pub const fn code(&self) -> u32 {
        match self {
            Reliability::NoFaultDetected => 0,
            Reliability::NoSensor => 1,
            Reliability::OverRange => 2,
            Reliability::UnderRange => 3,
            Reliability::OpenLoop => 4,
            Reliability::ShortedLoop => 5,
            Reliability::NoOutput => 6,
            Reliability::UnreliableOther => 7,
            Reliability::ProcessError => 8,
            Reliability::ConfigurationError => 10,
            Reliability::CommunicationFailure => 12,
        }
    }

    /// Returns true if the value signals a fault.
    pub const fn is_fault(&self) -> bool {
        !matches!(self, Reliability::NoFaultDetected)
    }
}

impl fmt::Display for Reliability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Reliability::NoFaultDetected => "no-fault-detected",
            Reliability::NoSensor => "no-sensor",
            Reliability::OverRange => "over-range",
            Reliability::UnderRange => "under-range",
            Reliability::OpenLoop => "open-loop",
            Reliability::ShortedLoop => "shorted-loop",
            Reliability::NoOutput => "no-output",
            Reliability::UnreliableOther => "unreliable-other",
            Reliability::ProcessError => "process-error",
            Reliability::ConfigurationError => "configuration-error",
            Reliability::CommunicationFailure => "communication-failure",
        };
        write!(f, "{}", s)
    }
}

/// How the network number of a port was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NetworkNumberQuality {
    #[default]
    Unknown,
    Learned,
    LearnedConfigured,
    Configured,
}

impl NetworkNumberQuality {
    /// Returns the enumerated code.
    pub const fn code(&self) -> u32 {
        match self {
            NetworkNumberQuality::Unknown => 0,
            NetworkNumberQuality::Learned => 1,
            NetworkNumberQuality::LearnedConfigured => 2,
            NetworkNumberQuality::Configured => 3,
        }
    }
}

impl fmt::Display for NetworkNumberQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkNumberQuality::Unknown => write!(f, "unknown"),
            NetworkNumberQuality::Learned => write!(f, "learned"),
            NetworkNumberQuality::LearnedConfigured => write!(f, "learned-configured"),
            NetworkNumberQuality::Configured => write!(f, "configured"),
        }
    }
}

/// Protocol level a network port operates at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProtocolLevel {
    Physical,
    Protocol,
    #[default]
    BacnetApplication,
    NonBacnetApplication,
}

impl ProtocolLevel {
    /// Returns the enumerated code.
    pub const fn code(&self) -> u32 {
        match self {
            ProtocolLevel::Physical => 0,
            ProtocolLevel::Protocol => 1,
            ProtocolLevel::BacnetApplication => 2,
            ProtocolLevel::NonBacnetApplication => 3,
        }
    }
}

impl fmt::Display for ProtocolLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolLevel::Physical => write!(f, "physical"),
            ProtocolLevel::Protocol => write!(f, "protocol"),
            ProtocolLevel::BacnetApplication => write!(f, "bacnet-application"),
            ProtocolLevel::NonBacnetApplication => write!(f, "non-bacnet-application"),
        }
    }
}

/// BACnet/IP (and BACnet/IPv6) operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IpMode {
    #[default]
    Normal,
    Foreign,
    Bbmd,
}

impl IpMode {
    /// Returns the enumerated code.
    pub const fn code(&self) -> u32 {
        match self {
            IpMode::Normal => 0,
            IpMode::Foreign => 1,
            IpMode::Bbmd => 2,
        }
    }
}

impl fmt::Display for IpMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpMode::Normal => write!(f, "normal"),
            IpMode::Foreign => write!(f, "foreign"),
            IpMode::Bbmd => write!(f, "bbmd"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_network_type_codes_are_unique() {
        for (index, network_type) in NetworkType::ALL.iter().enumerate() {
            assert_eq!(network_type.code(), index as u32);
            assert_eq!(NetworkType::try_from(index as u32).unwrap(), *network_type);
        }
        assert!(NetworkType::try_from(12).is_err());
    }

    #[test]
    fn test_network_type_parse() {
        assert_eq!("bacnet-ip".parse::<NetworkType>().unwrap(), NetworkType::BacnetIp);
        assert_eq!("BIP6".parse::<NetworkType>().unwrap(), NetworkType::BacnetIpv6);
        assert_eq!("MS/TP".parse::<NetworkType>().unwrap(), NetworkType::Mstp);
        assert_eq!("non_bacnet".parse::<NetworkType>().unwrap(), NetworkType::NonBacnet);
        assert!("token-ring".parse::<NetworkType>().is_err());
    }

    #[test]
    fn test_network_type_classification() {
        assert!(NetworkType::BacnetIp.is_ip());
        assert!(NetworkType::SecureConnect.is_ip());
        assert!(!NetworkType::Mstp.is_ip());
        assert!(NetworkType::Mstp.is_serial());
    }

    #[test]
    fn test_reliability_fault() {
        assert!(!Reliability::NoFaultDetected.is_fault());
        assert!(Reliability::CommunicationFailure.is_fault());
        assert_eq!(Reliability::ConfigurationError.code(), 10);
    }

    #[test]
    fn test_display() {
        assert_eq!(NetworkType::BacnetIp.to_string(), "bacnet-ip");
        assert_eq!(ProtocolLevel::default().to_string(), "bacnet-application");
        assert_eq!(NetworkNumberQuality::LearnedConfigured.to_string(), "learned-configured");
        assert_eq!(IpMode::Bbmd.to_string(), "bbmd");
    }
}
