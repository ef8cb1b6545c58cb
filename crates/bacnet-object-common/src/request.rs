//! ReadProperty and WriteProperty request data.

use bacnet_codec::ApplicationValue;
use bacnet_types::{ObjectType, PropertyIdentifier};
use std::fmt;

/// Array index of a property access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ArrayIndex {
    /// The whole property (every element, for arrays).
    #[default]
    All,
    /// One element. Index 0 addresses the array size.
    Element(u32),
}

impl fmt::Display for ArrayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayIndex::All => write!(f, "all"),
            ArrayIndex::Element(n) => write!(f, "[{}]", n),
        }
    }
}

/// A property read addressed at one object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadPropertyRequest {
    pub object_type: ObjectType,
    pub object_instance: u32,
    pub property: PropertyIdentifier,
    pub array_index: ArrayIndex,
}

impl ReadPropertyRequest {
    /// Creates a request for the whole property.
    pub fn new(object_type: ObjectType, object_instance: u32, property: PropertyIdentifier) -> Self {
        Self {
            object_type,
            object_instance,
            property,
            array_index: ArrayIndex::All,
        }
    }

    pub fn with_index(mut self, array_index: ArrayIndex) -> Self {
        self.array_index = array_index;
        self
    }
}

/// A property write addressed at one object.
#[derive(Debug, Clone, PartialEq)]
pub struct WritePropertyRequest {
    pub object_type: ObjectType,
    pub object_instance: u32,
    pub property: PropertyIdentifier,
    pub array_index: ArrayIndex,
    pub value: ApplicationValue,
}

impl WritePropertyRequest {
    pub fn new(
        object_type: ObjectType,
        object_instance: u32,
        property: PropertyIdentifier,
        value: ApplicationValue,
    ) -> Self {
        Self {
            object_type,
            object_instance,
            property,
            array_index: ArrayIndex::All,
            value,
        }
    }

    pub fn with_index(mut self, array_index: ArrayIndex) -> Self {
        self.array_index = array_index;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_read_request_defaults_to_all() {
        let req = ReadPropertyRequest::new(
            ObjectType::NETWORK_PORT,
            1,
            PropertyIdentifier::LINK_SPEEDS,
        );
        assert_eq!(req.array_index, ArrayIndex::All);
        let req = req.with_index(ArrayIndex::Element(0));
        assert_eq!(req.array_index.to_string(), "[0]");
    }
}
