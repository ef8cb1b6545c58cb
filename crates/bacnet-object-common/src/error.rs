//! Error types for object property services.
//!
//! Every failure of a read, write or commit is reported as an
//! [`ObjectError`]. Services map it to the BACnet error class and code
//! they return to the requester with [`ObjectError::error_class`] and
//! [`ObjectError::error_code`].

use bacnet_codec::CodecError;
use bacnet_types::{ObjectType, PropertyIdentifier};
use std::fmt;
use thiserror::Error;

/// Result type alias for object operations.
pub type ObjectResult<T> = Result<T, ObjectError>;

/// Errors that can occur while servicing an object.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ObjectError {
    /// No object with this type and instance exists.
    #[error("Unknown object {object_type}:{instance}")]
    UnknownObject {
        object_type: ObjectType,
        instance: u32,
    },

    /// The property is not listed for the object type.
    #[error("Unknown property {property} for {object_type}")]
    UnknownProperty {
        object_type: ObjectType,
        property: PropertyIdentifier,
    },

    /// The array index exceeds the property's current size.
    #[error("Invalid array index {index} for {property} (size {size})")]
    InvalidArrayIndex {
        property: PropertyIdentifier,
        index: u32,
        size: usize,
    },

    /// An array index was given for a property that is not an array.
    #[error("Property {property} is not an array")]
    PropertyIsNotAnArray { property: PropertyIdentifier },

    /// The encoded value does not fit the caller's buffer.
    #[error("Encoding buffer too small: need {needed} octets, have {available}")]
    EncodingBufferTooSmall { needed: usize, available: usize },

    /// A field write violates a field constraint.
    #[error("Invalid value for {field}: {message}")]
    ValidationFailure {
        /// The field that failed validation.
        field: String,
        /// Error message.
        message: String,
    },

    /// Another object already uses this instance number.
    #[error("Instance {instance} already exists")]
    DuplicateInstance { instance: u32 },

    /// The property exists but cannot be written.
    #[error("Write access denied for {property}")]
    WriteAccessDenied { property: PropertyIdentifier },

    /// A written value has the wrong application type.
    #[error("Invalid data type for {property}: {message}")]
    InvalidDataType {
        property: PropertyIdentifier,
        message: String,
    },

    /// Request data could not be decoded.
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
}

impl ObjectError {
    pub fn unknown_object(object_type: ObjectType, instance: u32) -> Self {
        Self::UnknownObject {
            object_type,
            instance,
        }
    }

    pub fn unknown_property(object_type: ObjectType, property: PropertyIdentifier) -> Self {
        Self::UnknownProperty {
            object_type,
            property,
        }
    }

    /// Creates a validation error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationFailure {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn invalid_data_type(property: PropertyIdentifier, message: impl Into<String>) -> Self {
        Self::InvalidDataType {
            property,
            message: message.into(),
        }
    }

    /// Converts an encoder failure into the error a read returns.
    pub fn from_encode(err: CodecError) -> Self {
        match err {
            CodecError::BufferTooSmall { needed, available } => {
                Self::EncodingBufferTooSmall { needed, available }
            }
            other => Self::Codec(other),
        }
    }

    /// Returns the BACnet error class reported to the requester.
    pub fn error_class(&self) -> ErrorClass {
        match self {
            ObjectError::UnknownObject { .. } | ObjectError::DuplicateInstance { .. } => {
                ErrorClass::Object
            }
            ObjectError::UnknownProperty { .. }
            | ObjectError::InvalidArrayIndex { .. }
            | ObjectError::PropertyIsNotAnArray { .. }
            | ObjectError::ValidationFailure { .. }
            | ObjectError::WriteAccessDenied { .. }
            | ObjectError::InvalidDataType { .. } => ErrorClass::Property,
            ObjectError::EncodingBufferTooSmall { .. } => ErrorClass::Resources,
            ObjectError::Codec(_) => ErrorClass::Services,
        }
    }

    /// Returns the BACnet error code reported to the requester.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            ObjectError::UnknownObject { .. } => ErrorCode::UnknownObject,
            ObjectError::UnknownProperty { .. } => ErrorCode::UnknownProperty,
            ObjectError::InvalidArrayIndex { .. } => ErrorCode::InvalidArrayIndex,
            ObjectError::PropertyIsNotAnArray { .. } => ErrorCode::PropertyIsNotAnArray,
            ObjectError::EncodingBufferTooSmall { .. } => ErrorCode::Other,
            ObjectError::ValidationFailure { .. } => ErrorCode::ValueOutOfRange,
            ObjectError::DuplicateInstance { .. } => ErrorCode::DuplicateObjectId,
            ObjectError::WriteAccessDenied { .. } => ErrorCode::WriteAccessDenied,
            ObjectError::InvalidDataType { .. } => ErrorCode::InvalidDataType,
            ObjectError::Codec(_) => ErrorCode::InvalidTag,
        }
    }

    /// Returns true if the request should be aborted rather than answered
    /// with an error PDU.
    pub fn is_abort(&self) -> bool {
        matches!(self, ObjectError::EncodingBufferTooSmall { .. })
    }
}

/// BACnet error class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    Device,
    Object,
    Property,
    Resources,
    Security,
    Services,
}

impl ErrorClass {
    pub const fn code(&self) -> u32 {
        match self {
            ErrorClass::Device => 0,
            ErrorClass::Object => 1,
            ErrorClass::Property => 2,
            ErrorClass::Resources => 3,
            ErrorClass::Security => 4,
            ErrorClass::Services => 5,
        }
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorClass::Device => "device",
            ErrorClass::Object => "object",
            ErrorClass::Property => "property",
            ErrorClass::Resources => "resources",
            ErrorClass::Security => "security",
            ErrorClass::Services => "services",
        };
        write!(f, "{}", s)
    }
}

/// BACnet error code (the subset object services report).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Other,
    InvalidDataType,
    UnknownObject,
    UnknownProperty,
    ValueOutOfRange,
    WriteAccessDenied,
    InvalidArrayIndex,
    DuplicateObjectId,
    PropertyIsNotAnArray,
    InvalidTag,
}

impl ErrorCode {
    pub const fn code(&self) -> u32 {
        match self {
            ErrorCode::Other => 0,
            ErrorCode::InvalidDataType => 9,
            ErrorCode::UnknownObject => 31,
            ErrorCode::UnknownProperty => 32,
            ErrorCode::ValueOutOfRange => 37,
            ErrorCode::WriteAccessDenied => 40,
            ErrorCode::InvalidArrayIndex => 42,
            ErrorCode::DuplicateObjectId => 49,
            ErrorCode::PropertyIsNotAnArray => 50,
            ErrorCode::InvalidTag => 57,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::Other => "other",
            ErrorCode::InvalidDataType => "invalid-data-type",
            ErrorCode::UnknownObject => "unknown-object",
            ErrorCode::UnknownProperty => "unknown-property",
            ErrorCode::ValueOutOfRange => "value-out-of-range",
            ErrorCode::WriteAccessDenied => "write-access-denied",
            ErrorCode::InvalidArrayIndex => "invalid-array-index",
            ErrorCode::DuplicateObjectId => "duplicate-object-id",
            ErrorCode::PropertyIsNotAnArray => "property-is-not-an-array",
            ErrorCode::InvalidTag => "invalid-tag",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_display() {
        let err = ObjectError::unknown_object(ObjectType::NETWORK_PORT, 7);
        assert_eq!(err.to_string(), "Unknown object network-port:7");

        let err = ObjectError::validation("object-name", "too long");
        assert_eq!(err.to_string(), "Invalid value for object-name: too long");
    }

    #[test]
    fn test_class_and_code() {
        let err = ObjectError::unknown_property(
            ObjectType::NETWORK_PORT,
            PropertyIdentifier::PRESENT_VALUE,
        );
        assert_eq!(err.error_class(), ErrorClass::Property);
        assert_eq!(err.error_code(), ErrorCode::UnknownProperty);
        assert_eq!(err.error_code().code(), 32);

        let err = ObjectError::DuplicateInstance { instance: 1 };
        assert_eq!(err.error_class(), ErrorClass::Object);
        assert_eq!(err.error_code().code(), 49);
    }

    #[test]
    fn test_from_encode() {
        let err = ObjectError::from_encode(CodecError::BufferTooSmall {
            needed: 9,
            available: 4,
        });
        assert_eq!(
            err,
            ObjectError::EncodingBufferTooSmall {
                needed: 9,
                available: 4
            }
        );
        assert!(err.is_abort());
        assert!(!ObjectError::from_encode(CodecError::InvalidUtf8).is_abort());
    }
}
