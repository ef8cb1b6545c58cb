//! Object type and object identifier definitions.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest valid object instance number (22 bits).
pub const MAX_INSTANCE: u32 = 0x3F_FFFF;

/// BACnet object type code (10 bits).
///
/// Only the types this stack names are given constants; any other value in
/// range is still representable so that requests for foreign object types can
/// be rejected with a proper error instead of failing to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct ObjectType(u16);

impl ObjectType {
    /// Largest valid object type code.
    pub const MAX: u16 = 0x3FF;

    pub const ANALOG_INPUT: ObjectType = ObjectType(0);
    pub const ANALOG_OUTPUT: ObjectType = ObjectType(1);
    pub const ANALOG_VALUE: ObjectType = ObjectType(2);
    pub const BINARY_INPUT: ObjectType = ObjectType(3);
    pub const DEVICE: ObjectType = ObjectType(8);
    pub const FILE: ObjectType = ObjectType(10);
    pub const NETWORK_PORT: ObjectType = ObjectType(56);

    /// Creates an object type from its code.
    ///
    /// # Errors
    ///
    /// Returns an error if the code does not fit in 10 bits.
    pub const fn new(code: u16) -> Result<Self, ParseError> {
        if code <= Self::MAX {
            Ok(ObjectType(code))
        } else {
            Err(ParseError::InvalidEnumerated {
                kind: "object-type",
                value: code as u32,
            })
        }
    }

    /// Returns the numeric code.
    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    fn name(&self) -> Option<&'static str> {
        let name = match *self {
            ObjectType::ANALOG_INPUT => "analog-input",
            ObjectType::ANALOG_OUTPUT => "analog-output",
            ObjectType::ANALOG_VALUE => "analog-value",
            ObjectType::BINARY_INPUT => "binary-input",
            ObjectType::DEVICE => "device",
            ObjectType::FILE => "file",
            ObjectType::NETWORK_PORT => "network-port",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "object-type-{}", self.0),
        }
    }
}

impl FromStr for ObjectType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "analog-input" => Ok(ObjectType::ANALOG_INPUT),
            "analog-output" => Ok(ObjectType::ANALOG_OUTPUT),
            "analog-value" => Ok(ObjectType::ANALOG_VALUE),
            "binary-input" => Ok(ObjectType::BINARY_INPUT),
            "device" => Ok(ObjectType::DEVICE),
            "file" => Ok(ObjectType::FILE),
            "network-port" => Ok(ObjectType::NETWORK_PORT),
            other => other
                .parse::<u16>()
                .ok()
                .and_then(|code| ObjectType::new(code).ok())
                .ok_or_else(|| ParseError::InvalidObjectType(s.to_string())),
        }
    }
}

impl TryFrom<u16> for ObjectType {
    type Error = ParseError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        ObjectType::new(code)
    }
}

impl From<ObjectType> for u16 {
    fn from(object_type: ObjectType) -> u16 {
        object_type.0
    }
}

/// Object identifier: an object type paired with an instance number.
///
/// On the wire it is packed as `type << 22 | instance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectIdentifier {
    object_type: ObjectType,
    instance: u32,
}

impl ObjectIdentifier {
    /// Creates an object identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the instance exceeds [`MAX_INSTANCE`].
    pub const fn new(object_type: ObjectType, instance: u32) -> Result<Self, ParseError> {
        if instance > MAX_INSTANCE {
            return Err(ParseError::InvalidInstance(instance));
        }
        Ok(Self {
            object_type,
            instance,
        })
    }

    pub const fn object_type(&self) -> ObjectType {
        self.object_type
    }

    pub const fn instance(&self) -> u32 {
        self.instance
    }

    /// Returns the packed 32-bit wire form.
    pub const fn to_packed(&self) -> u32 {
        ((self.object_type.0 as u32) << 22) | self.instance
    }

    /// Unpacks the 32-bit wire form. Every `u32` is a valid identifier.
    pub const fn from_packed(packed: u32) -> Self {
        Self {
            object_type: ObjectType((packed >> 22) as u16),
            instance: packed & MAX_INSTANCE,
        }
    }
}

impl fmt::Display for ObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.object_type, self.instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_object_type_range() {
        assert!(ObjectType::new(56).is_ok());
        assert!(ObjectType::new(1023).is_ok());
        assert!(ObjectType::new(1024).is_err());
    }

    #[test]
    fn test_object_type_parse() {
        assert_eq!(
            "network-port".parse::<ObjectType>().unwrap(),
            ObjectType::NETWORK_PORT
        );
        assert_eq!("DEVICE".parse::<ObjectType>().unwrap(), ObjectType::DEVICE);
        assert_eq!("130".parse::<ObjectType>().unwrap().as_u16(), 130);
        assert!("bogus".parse::<ObjectType>().is_err());
    }

    #[test]
    fn test_object_type_display() {
        assert_eq!(ObjectType::NETWORK_PORT.to_string(), "network-port");
        assert_eq!(ObjectType::new(300).unwrap().to_string(), "object-type-300");
    }

    #[test]
    fn test_object_identifier_packing() {
        let oid = ObjectIdentifier::new(ObjectType::NETWORK_PORT, 1234).unwrap();
        assert_eq!(oid.to_packed(), (56 << 22) | 1234);
        assert_eq!(ObjectIdentifier::from_packed(oid.to_packed()), oid);
        assert_eq!(oid.to_string(), "network-port:1234");
    }

    #[test]
    fn test_object_identifier_instance_bound() {
        assert!(ObjectIdentifier::new(ObjectType::DEVICE, MAX_INSTANCE).is_ok());
        assert_eq!(
            ObjectIdentifier::new(ObjectType::DEVICE, MAX_INSTANCE + 1),
            Err(ParseError::InvalidInstance(MAX_INSTANCE + 1))
        );
    }
}
