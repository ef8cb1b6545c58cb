//! BACnet network-port object.
//!
//! A [`NetworkPorts`] context owns the committed port records
//! ([`PortStore`]) and the staged BACnet/SC edits ([`StagingStore`]):
//!
//! - Reads encode the committed value of a listed property; they never see
//!   staged values.
//! - Writes of hub URIs, hub-function and direct-connect settings are staged
//!   and only take effect on [`NetworkPorts::apply`], which commits every
//!   staged field of a port or none of them.
//!
//! # Example
//!
//! ```
//! use bacnet_netport::{NetworkPorts, PortProfile, StagedValue};
//!
//! let mut ports = NetworkPorts::new(PortProfile::StandardWithSecureConnect);
//! ports.create(1234).unwrap();
//! ports
//!     .set_dirty(1234, StagedValue::PrimaryHubUri("wss://hub:4443".into()))
//!     .unwrap();
//! assert_eq!(ports.apply(1234).unwrap(), 1);
//! ```

pub mod apply;
pub mod config;
mod netport;
mod port;
pub mod properties;
mod read;
mod staging;
mod store;
mod write;

pub use config::{ConfigError, NetPortConfig};
pub use netport::NetworkPorts;
pub use port::{
    Ipv4Params, Ipv6Params, NetworkPort, PortProfile, SecureConnectParams, DEFAULT_UDP_PORT,
    MAX_APDU_LENGTH, MAX_BINDING_LEN, MAX_DESCRIPTION_LEN, MAX_DNS_SERVERS, MAX_HUB_URI_LEN,
    MAX_LINK_SPEEDS, MAX_MAC_ADDRESS_LEN, MAX_MASTER, MAX_NETWORK_NUMBER, MAX_OBJECT_NAME_LEN,
    MAX_ZONE_INDEX_LEN, MIN_APDU_LENGTH,
};
pub use read::read_property;
pub use staging::{PendingSecureConnect, StagedField, StagedValue, StagingStore};
pub use store::{PortHandle, PortStore};
pub use write::write_property;
