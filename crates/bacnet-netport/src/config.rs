//! Configuration file support for network ports.
//!
//! A configuration selects the store profile and lists the ports to create:
//!
//! ```toml
//! [store]
//! secure_connect = true
//!
//! [[port]]
//! instance = 1
//! port_type = "bacnet-ip"
//! name = "Building LAN"
//!
//! [port.ip]
//! address = "192.168.1.10"
//! prefix = 24
//!
//! [port.secure_connect]
//! primary_hub_uri = "wss://hub.example:4443"
//! ```

use bacnet_object_common::{ObjectError, ObjectResult};
use bacnet_types::{IpMode, NetworkType};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::netport::NetworkPorts;
use crate::port::{
    Ipv4Params, Ipv6Params, NetworkPort, PortProfile, SecureConnectParams, DEFAULT_UDP_PORT,
};

/// Errors raised while loading or applying a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Port {instance}: {source}")]
    Port {
        instance: u32,
        #[source]
        source: ObjectError,
    },
}

impl ConfigError {
    fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    fn port(instance: u32) -> impl FnOnce(ObjectError) -> Self {
        move |source| Self::Port { instance, source }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Complete network-port configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetPortConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default, rename = "port")]
    pub ports: Vec<PortConfig>,
}

/// Store-wide settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Give every port the BACnet/SC property set.
    #[serde(default)]
    pub secure_connect: bool,
}

impl StoreConfig {
    pub fn profile(&self) -> PortProfile {
        if self.secure_connect {
            PortProfile::StandardWithSecureConnect
        } else {
            PortProfile::Standard
        }
    }
}

/// One `[[port]]` table. Only fields that are present are applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortConfig {
    pub instance: u32,

    #[serde(default = "default_port_type")]
    pub port_type: NetworkType,

    pub name: Option<String>,
    pub description: Option<String>,
    pub network_number: Option<u16>,
    /// Hex octets, optionally separated by `:` or `-`.
    pub mac_address: Option<String>,
    pub max_master: Option<u8>,
    pub max_info_frames: Option<u8>,
    pub apdu_length: Option<u16>,
    pub link_speed: Option<f32>,
    #[serde(default)]
    pub link_speeds: Vec<f32>,

    pub ip: Option<IpConfig>,
    pub ipv6: Option<Ipv6Config>,
    pub secure_connect: Option<SecureConnectConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpConfig {
    #[serde(default)]
    pub mode: IpMode,
    pub address: Ipv4Addr,
    #[serde(default)]
    pub prefix: u8,
    pub gateway: Option<Ipv4Addr>,
    #[serde(default)]
    pub dns: Vec<Ipv4Addr>,
    #[serde(default = "default_udp_port")]
    pub udp_port: u16,
    #[serde(default)]
    pub dhcp: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ipv6Config {
    #[serde(default)]
    pub mode: IpMode,
    pub address: Ipv6Addr,
    #[serde(default)]
    pub prefix_length: u8,
    pub gateway: Option<Ipv6Addr>,
    #[serde(default)]
    pub dns: Vec<Ipv6Addr>,
    #[serde(default = "default_udp_port")]
    pub udp_port: u16,
    pub multicast_address: Option<Ipv6Addr>,
    #[serde(default)]
    pub zone_index: String,
}

/// Committed BACnet/SC values; applied at bring-up without staging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecureConnectConfig {
    pub primary_hub_uri: Option<String>,
    pub failover_hub_uri: Option<String>,
    pub hub_function_enable: Option<bool>,
    pub hub_function_binding: Option<String>,
    pub direct_connect_initiate_enable: Option<bool>,
    pub direct_connect_accept_enable: Option<bool>,
    pub direct_connect_binding: Option<String>,
    pub max_bvlc_length_accepted: Option<u32>,
    pub max_npdu_length_accepted: Option<u32>,
    pub minimum_reconnect_time: Option<u32>,
    pub maximum_reconnect_time: Option<u32>,
    pub connect_wait_timeout: Option<u32>,
    pub disconnect_wait_timeout: Option<u32>,
    pub heartbeat_timeout: Option<u32>,
}

fn default_port_type() -> NetworkType {
    NetworkType::BacnetIp
}

fn default_udp_port() -> u16 {
    DEFAULT_UDP_PORT
}

impl NetPortConfig {
    /// Loads and parses a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), ports = config.ports.len(), "loaded config");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Validates the configuration without building any port.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for port in &self.ports {
            if !seen.insert(port.instance) {
                return Err(ConfigError::invalid(format!(
                    "instance {} listed twice",
                    port.instance
                )));
            }
            if port.secure_connect.is_some() && !self.store.secure_connect {
                return Err(ConfigError::invalid(format!(
                    "port {} has secure_connect settings but store.secure_connect is false",
                    port.instance
                )));
            }
            if let Some(mac) = &port.mac_address {
                parse_mac(mac)?;
            }
        }
        Ok(())
    }
}

impl PortConfig {
    /// Applies this configuration to a port.
    ///
    /// Stops at the first rejected value; fields applied before it keep
    /// their new values.
    pub fn apply_to(&self, port: &mut NetworkPort) -> Result<()> {
        let mac = self.mac_address.as_deref().map(parse_mac).transpose()?;
        self.apply_fields(port, mac.as_deref())
            .map_err(ConfigError::port(self.instance))
    }

    fn apply_fields(&self, port: &mut NetworkPort, mac: Option<&[u8]>) -> ObjectResult<()> {
        port.set_port_type(self.port_type);

        if let Some(name) = &self.name {
            port.set_object_name(name)?;
        }
        if let Some(description) = &self.description {
            port.set_description(description)?;
        }
        if let Some(network_number) = self.network_number {
            port.set_network_number(network_number)?;
        }
        if let Some(mac) = mac {
            port.set_mac_address(mac)?;
        }
        if let Some(max_master) = self.max_master {
            port.set_max_master(max_master)?;
        }
        if let Some(frames) = self.max_info_frames {
            port.set_max_info_frames(frames)?;
        }
        if let Some(length) = self.apdu_length {
            port.set_apdu_length(length)?;
        }
        if let Some(speed) = self.link_speed {
            port.set_link_speed(speed)?;
        }
        if !self.link_speeds.is_empty() {
            port.set_link_speeds(&self.link_speeds)?;
        }
        if let Some(ip) = &self.ip {
            port.set_ipv4(ip.to_params())?;
        }
        if let Some(ipv6) = &self.ipv6 {
            port.set_ipv6(ipv6.to_params())?;
        }
        if let Some(sc) = &self.secure_connect {
            sc.apply_to(port.secure_connect_mut()?)?;
        }
        Ok(())
    }
}

impl IpConfig {
    fn to_params(&self) -> Ipv4Params {
        Ipv4Params {
            mode: self.mode,
            address: self.address,
            prefix: self.prefix,
            gateway: self.gateway.unwrap_or(Ipv4Addr::UNSPECIFIED),
            dns_servers: self.dns.clone(),
            udp_port: self.udp_port,
            dhcp_enable: self.dhcp,
        }
    }
}

impl Ipv6Config {
    fn to_params(&self) -> Ipv6Params {
        Ipv6Params {
            mode: self.mode,
            address: self.address,
            prefix_length: self.prefix_length,
            gateway: self.gateway.unwrap_or(Ipv6Addr::UNSPECIFIED),
            dns_servers: self.dns.clone(),
            udp_port: self.udp_port,
            multicast_address: self.multicast_address.unwrap_or(Ipv6Addr::UNSPECIFIED),
            zone_index: self.zone_index.clone(),
        }
    }
}

impl SecureConnectConfig {
    /// Writes the configured values into `params`.
    ///
    /// Works on a copy, so `params` is unchanged if any value is rejected.
    pub fn apply_to(&self, params: &mut SecureConnectParams) -> ObjectResult<()> {
        let mut next = params.clone();

        if let Some(uri) = &self.primary_hub_uri {
            next.set_primary_hub_uri(uri)?;
        }
        if let Some(uri) = &self.failover_hub_uri {
            next.set_failover_hub_uri(uri)?;
        }
        if let Some(enable) = self.hub_function_enable {
            next.set_hub_function_enable(enable);
        }
        if let Some(binding) = &self.hub_function_binding {
            next.set_hub_function_binding(binding)?;
        }
        if let Some(enable) = self.direct_connect_initiate_enable {
            next.set_direct_connect_initiate_enable(enable);
        }
        if let Some(enable) = self.direct_connect_accept_enable {
            next.set_direct_connect_accept_enable(enable);
        }
        if let Some(binding) = &self.direct_connect_binding {
            next.set_direct_connect_binding(binding)?;
        }
        if let Some(length) = self.max_bvlc_length_accepted {
            next.set_max_bvlc_length_accepted(length);
        }
        if let Some(length) = self.max_npdu_length_accepted {
            next.set_max_npdu_length_accepted(length);
        }
        if self.minimum_reconnect_time.is_some() || self.maximum_reconnect_time.is_some() {
            next.set_reconnect_times(
                self.minimum_reconnect_time
                    .unwrap_or(next.minimum_reconnect_time()),
                self.maximum_reconnect_time
                    .unwrap_or(next.maximum_reconnect_time()),
            )?;
        }
        if let Some(timeout) = self.connect_wait_timeout {
            next.set_connect_wait_timeout(timeout);
        }
        if let Some(timeout) = self.disconnect_wait_timeout {
            next.set_disconnect_wait_timeout(timeout);
        }
        if let Some(timeout) = self.heartbeat_timeout {
            next.set_heartbeat_timeout(timeout);
        }

        *params = next;
        Ok(())
    }
}

impl NetworkPorts {
    /// Builds a populated context from a configuration.
    pub fn from_config(config: &NetPortConfig) -> Result<Self> {
        config.validate()?;

        let mut ports = NetworkPorts::new(config.store.profile());
        for entry in &config.ports {
            ports
                .create(entry.instance)
                .map_err(ConfigError::port(entry.instance))?;
            let port = ports
                .store_mut()
                .port_mut(entry.instance)
                .map_err(ConfigError::port(entry.instance))?;
            entry.apply_to(port)?;
        }
        info!(
            profile = %ports.profile(),
            ports = config.ports.len(),
            "network ports configured"
        );
        Ok(ports)
    }
}

/// Parses a MAC address written as hex octets.
///
/// Accepts `:`/`-` separated octets (`"c0:a8:01:0a:ba:c0"`) or a plain hex
/// string (`"7f"` for an MS/TP station).
pub fn parse_mac(text: &str) -> Result<Vec<u8>> {
    let bad = || ConfigError::invalid(format!("invalid mac_address {:?}", text));

    if text.contains([':', '-']) {
        return text
            .split([':', '-'])
            .map(|part| {
                if part.is_empty() || part.len() > 2 || !is_hex(part) {
                    return Err(bad());
                }
                u8::from_str_radix(part, 16).map_err(|_| bad())
            })
            .collect();
    }

    if text.is_empty() || text.len() % 2 != 0 || !is_hex(text) {
        return Err(bad());
    }
    (0..text.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&text[i..i + 2], 16).map_err(|_| bad()))
        .collect()
}

fn is_hex(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_hexdigit())
}
