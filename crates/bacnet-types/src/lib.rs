//! Common BACnet types for building-automation object models.
//!
//! This crate provides type-safe representations of the identifier spaces
//! shared by every object implementation in the stack:
//!
//! - [`ObjectType`]: 10-bit object type codes
//! - [`ObjectIdentifier`]: packed (type, instance) pairs
//! - [`PropertyIdentifier`]: 22-bit property codes
//! - [`NetworkType`]: link technology of a network port
//! - [`Reliability`], [`NetworkNumberQuality`], [`ProtocolLevel`], [`IpMode`]:
//!   enumerated network-port property values

mod object;
mod port;
mod property;

pub use object::{ObjectIdentifier, ObjectType, MAX_INSTANCE};
pub use port::{IpMode, NetworkNumberQuality, NetworkType, ProtocolLevel, Reliability};
pub use property::PropertyIdentifier;

/// Common error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid object instance: {0} (must be 0-4194303)")]
    InvalidInstance(u32),

    #[error("invalid object type: {0}")]
    InvalidObjectType(String),

    #[error("invalid property identifier: {0}")]
    InvalidPropertyIdentifier(String),

    #[error("invalid network type: {0}")]
    InvalidNetworkType(String),

    #[error("invalid enumerated value {value} for {kind}")]
    InvalidEnumerated { kind: &'static str, value: u32 },
}
