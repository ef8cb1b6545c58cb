//! Network port record and related types.
//!
//! A [`NetworkPort`] holds the committed values of one network-port object.
//! Setters validate their input before touching the record, so a failed
//! setter leaves every field as it was.

use bacnet_object_common::{ObjectError, ObjectResult};
use bacnet_types::{IpMode, NetworkNumberQuality, NetworkType, ProtocolLevel, Reliability};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

pub const MAX_OBJECT_NAME_LEN: usize = 64;
pub const MAX_DESCRIPTION_LEN: usize = 64;
pub const MAX_HUB_URI_LEN: usize = 128;
pub const MAX_BINDING_LEN: usize = 64;
pub const MAX_ZONE_INDEX_LEN: usize = 16;
pub const MAX_MAC_ADDRESS_LEN: usize = 18;
pub const MIN_APDU_LENGTH: u16 = 50;
pub const MAX_APDU_LENGTH: u16 = 1476;
pub const MAX_MASTER: u8 = 127;
pub const MAX_DNS_SERVERS: usize = 3;
pub const MAX_LINK_SPEEDS: usize = 8;
pub const MAX_NETWORK_NUMBER: u16 = 65534;
/// Default BACnet/IP and BACnet/IPv6 UDP port.
pub const DEFAULT_UDP_PORT: u16 = 0xBAC0;

/// Which optional property set a store's ports carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PortProfile {
    #[default]
    Standard,
    StandardWithSecureConnect,
}

impl PortProfile {
    pub const fn has_secure_connect(&self) -> bool {
        matches!(self, PortProfile::StandardWithSecureConnect)
    }
}

impl fmt::Display for PortProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortProfile::Standard => write!(f, "standard"),
            PortProfile::StandardWithSecureConnect => write!(f, "standard-with-secure-connect"),
        }
    }
}

/// BACnet/IP addressing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ipv4Params {
    pub mode: IpMode,
    pub address: Ipv4Addr,
    /// Subnet prefix length (0-32); read as a subnet mask.
    pub prefix: u8,
    pub gateway: Ipv4Addr,
    pub dns_servers: Vec<Ipv4Addr>,
    pub udp_port: u16,
    pub dhcp_enable: bool,
}

impl Default for Ipv4Params {
    fn default() -> Self {
        Self {
            mode: IpMode::Normal,
            address: Ipv4Addr::UNSPECIFIED,
            prefix: 0,
            gateway: Ipv4Addr::UNSPECIFIED,
            dns_servers: Vec::new(),
            udp_port: DEFAULT_UDP_PORT,
            dhcp_enable: false,
        }
    }
}

impl Ipv4Params {
    /// Returns the subnet mask for the prefix length.
    pub fn subnet_mask(&self) -> Ipv4Addr {
        let bits = match self.prefix {
            0 => 0,
            p => u32::MAX << (32 - u32::from(p.min(32))),
        };
        Ipv4Addr::from(bits)
    }
}

/// BACnet/IPv6 addressing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ipv6Params {
    pub mode: IpMode,
    pub address: Ipv6Addr,
    pub prefix_length: u8,
    pub gateway: Ipv6Addr,
    pub dns_servers: Vec<Ipv6Addr>,
    pub udp_port: u16,
    pub multicast_address: Ipv6Addr,
    pub zone_index: String,
}

impl Default for Ipv6Params {
    fn default() -> Self {
        Self {
            mode: IpMode::Normal,
            address: Ipv6Addr::UNSPECIFIED,
            prefix_length: 0,
            gateway: Ipv6Addr::UNSPECIFIED,
            dns_servers: Vec::new(),
            udp_port: DEFAULT_UDP_PORT,
            multicast_address: Ipv6Addr::UNSPECIFIED,
            zone_index: String::new(),
        }
    }
}

/// Committed BACnet/SC parameters.
///
/// The first seven fields are the ones that change together through
/// staging and apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecureConnectParams {
    primary_hub_uri: String,
    failover_hub_uri: String,
    hub_function_enable: bool,
    hub_function_binding: String,
    direct_connect_initiate_enable: bool,
    direct_connect_accept_enable: bool,
    direct_connect_binding: String,
    max_bvlc_length_accepted: u32,
    max_npdu_length_accepted: u32,
    /// Seconds.
    minimum_reconnect_time: u32,
    maximum_reconnect_time: u32,
    connect_wait_timeout: u32,
    disconnect_wait_timeout: u32,
    heartbeat_timeout: u32,
}

impl Default for SecureConnectParams {
    fn default() -> Self {
        Self {
            primary_hub_uri: String::new(),
            failover_hub_uri: String::new(),
            hub_function_enable: false,
            hub_function_binding: String::new(),
            direct_connect_initiate_enable: false,
            direct_connect_accept_enable: false,
            direct_connect_binding: String::new(),
            max_bvlc_length_accepted: 1600,
            max_npdu_length_accepted: 1497,
            minimum_reconnect_time: 10,
            maximum_reconnect_time: 600,
            connect_wait_timeout: 10,
            disconnect_wait_timeout: 10,
            heartbeat_timeout: 300,
        }
    }
}

impl SecureConnectParams {
    pub fn primary_hub_uri(&self) -> &str {
        &self.primary_hub_uri
    }

    pub fn failover_hub_uri(&self) -> &str {
        &self.failover_hub_uri
    }

    pub fn hub_function_enable(&self) -> bool {
        self.hub_function_enable
    }

    pub fn hub_function_binding(&self) -> &str {
        &self.hub_function_binding
    }

    pub fn direct_connect_initiate_enable(&self) -> bool {
        self.direct_connect_initiate_enable
    }

    pub fn direct_connect_accept_enable(&self) -> bool {
        self.direct_connect_accept_enable
    }

    pub fn direct_connect_binding(&self) -> &str {
        &self.direct_connect_binding
    }

    pub fn max_bvlc_length_accepted(&self) -> u32 {
        self.max_bvlc_length_accepted
    }

    pub fn max_npdu_length_accepted(&self) -> u32 {
        self.max_npdu_length_accepted
    }

    /// Seconds.
    pub fn minimum_reconnect_time(&self) -> u32 {
        self.minimum_reconnect_time
    }

    pub fn maximum_reconnect_time(&self) -> u32 {
        self.maximum_reconnect_time
    }

    pub fn connect_wait_timeout(&self) -> u32 {
        self.connect_wait_timeout
    }

    pub fn disconnect_wait_timeout(&self) -> u32 {
        self.disconnect_wait_timeout
    }

    pub fn heartbeat_timeout(&self) -> u32 {
        self.heartbeat_timeout
    }

    pub fn set_hub_function_enable(&mut self, enable: bool) {
        self.hub_function_enable = enable;
    }

    pub fn set_direct_connect_initiate_enable(&mut self, enable: bool) {
        self.direct_connect_initiate_enable = enable;
    }

    pub fn set_direct_connect_accept_enable(&mut self, enable: bool) {
        self.direct_connect_accept_enable = enable;
    }

    pub fn set_max_bvlc_length_accepted(&mut self, length: u32) {
        self.max_bvlc_length_accepted = length;
    }

    pub fn set_max_npdu_length_accepted(&mut self, length: u32) {
        self.max_npdu_length_accepted = length;
    }

    pub fn set_connect_wait_timeout(&mut self, seconds: u32) {
        self.connect_wait_timeout = seconds;
    }

    pub fn set_disconnect_wait_timeout(&mut self, seconds: u32) {
        self.disconnect_wait_timeout = seconds;
    }

    pub fn set_heartbeat_timeout(&mut self, seconds: u32) {
        self.heartbeat_timeout = seconds;
    }

    pub fn set_primary_hub_uri(&mut self, uri: &str) -> ObjectResult<()> {
        check_len("sc-primary-hub-uri", uri, MAX_HUB_URI_LEN)?;
        self.primary_hub_uri = uri.to_string();
        Ok(())
    }

    pub fn set_failover_hub_uri(&mut self, uri: &str) -> ObjectResult<()> {
        check_len("sc-failover-hub-uri", uri, MAX_HUB_URI_LEN)?;
        self.failover_hub_uri = uri.to_string();
        Ok(())
    }

    pub fn set_hub_function_binding(&mut self, binding: &str) -> ObjectResult<()> {
        check_len("sc-hub-function-binding", binding, MAX_BINDING_LEN)?;
        self.hub_function_binding = binding.to_string();
        Ok(())
    }

    pub fn set_direct_connect_binding(&mut self, binding: &str) -> ObjectResult<()> {
        check_len("sc-direct-connect-binding", binding, MAX_BINDING_LEN)?;
        self.direct_connect_binding = binding.to_string();
        Ok(())
    }

    /// Sets the reconnect window; the minimum may not exceed the maximum.
    pub fn set_reconnect_times(&mut self, minimum: u32, maximum: u32) -> ObjectResult<()> {
        if minimum == 0 || minimum > maximum {
            return Err(ObjectError::validation(
                "sc-minimum-reconnect-time",
                format!("{} must be 1..={}", minimum, maximum),
            ));
        }
        self.minimum_reconnect_time = minimum;
        self.maximum_reconnect_time = maximum;
        Ok(())
    }
}

/// One network-port object.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkPort {
    pub(crate) instance: u32,
    object_name: String,
    description: String,
    port_type: NetworkType,
    reliability: Reliability,
    out_of_service: bool,
    network_number: u16,
    network_number_quality: NetworkNumberQuality,
    protocol_level: ProtocolLevel,
    changes_pending: bool,
    apdu_length: u16,
    link_speed: f32,
    link_speeds: Vec<f32>,
    link_speed_autonegotiate: bool,
    mac_address: Vec<u8>,
    max_master: u8,
    max_info_frames: u8,
    ipv4: Ipv4Params,
    ipv6: Ipv6Params,
    secure_connect: Option<SecureConnectParams>,
}

impl NetworkPort {
    /// Creates a port with default values.
    pub fn new(instance: u32, profile: PortProfile) -> Self {
        Self {
            instance,
            object_name: format!("NP-{}", instance),
            description: String::new(),
            port_type: NetworkType::Ethernet,
            reliability: Reliability::default(),
            out_of_service: false,
            network_number: 0,
            network_number_quality: NetworkNumberQuality::default(),
            protocol_level: ProtocolLevel::default(),
            changes_pending: false,
            apdu_length: MAX_APDU_LENGTH,
            link_speed: 0.0,
            link_speeds: Vec::new(),
            link_speed_autonegotiate: false,
            mac_address: Vec::new(),
            max_master: MAX_MASTER,
            max_info_frames: 1,
            ipv4: Ipv4Params::default(),
            ipv6: Ipv6Params::default(),
            secure_connect: profile
                .has_secure_connect()
                .then(SecureConnectParams::default),
        }
    }

    pub fn instance(&self) -> u32 {
        self.instance
    }

    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    pub fn set_object_name(&mut self, name: &str) -> ObjectResult<()> {
        if name.is_empty() {
            return Err(ObjectError::validation("object-name", "must not be empty"));
        }
        check_len("object-name", name, MAX_OBJECT_NAME_LEN)?;
        self.object_name = name.to_string();
        Ok(())
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: &str) -> ObjectResult<()> {
        check_len("description", description, MAX_DESCRIPTION_LEN)?;
        self.description = description.to_string();
        Ok(())
    }

    pub fn port_type(&self) -> NetworkType {
        self.port_type
    }

    pub fn set_port_type(&mut self, port_type: NetworkType) {
        self.port_type = port_type;
    }

    pub fn reliability(&self) -> Reliability {
        self.reliability
    }

    pub fn set_reliability(&mut self, reliability: Reliability) {
        self.reliability = reliability;
    }

    pub fn out_of_service(&self) -> bool {
        self.out_of_service
    }

    pub fn set_out_of_service(&mut self, out_of_service: bool) {
        self.out_of_service = out_of_service;
    }

    /// Returns the status flags: in-alarm, fault, overridden, out-of-service.
    pub fn status_flags(&self) -> [bool; 4] {
        [false, self.reliability.is_fault(), false, self.out_of_service]
    }

    pub fn network_number(&self) -> u16 {
        self.network_number
    }

    pub fn set_network_number(&mut self, network_number: u16) -> ObjectResult<()> {
        if network_number > MAX_NETWORK_NUMBER {
            return Err(ObjectError::validation(
                "network-number",
                format!("{} exceeds {}", network_number, MAX_NETWORK_NUMBER),
            ));
        }
        self.network_number = network_number;
        Ok(())
    }

    pub fn network_number_quality(&self) -> NetworkNumberQuality {
        self.network_number_quality
    }

    pub fn set_network_number_quality(&mut self, quality: NetworkNumberQuality) {
        self.network_number_quality = quality;
    }

    pub fn protocol_level(&self) -> ProtocolLevel {
        self.protocol_level
    }

    pub fn set_protocol_level(&mut self, level: ProtocolLevel) {
        self.protocol_level = level;
    }

    pub fn changes_pending(&self) -> bool {
        self.changes_pending
    }

    pub fn set_changes_pending(&mut self, pending: bool) {
        self.changes_pending = pending;
    }

    pub fn apdu_length(&self) -> u16 {
        self.apdu_length
    }

    pub fn set_apdu_length(&mut self, length: u16) -> ObjectResult<()> {
        if !(MIN_APDU_LENGTH..=MAX_APDU_LENGTH).contains(&length) {
            return Err(ObjectError::validation(
                "apdu-length",
                format!("{} outside {}..={}", length, MIN_APDU_LENGTH, MAX_APDU_LENGTH),
            ));
        }
        self.apdu_length = length;
        Ok(())
    }

    pub fn link_speed(&self) -> f32 {
        self.link_speed
    }

    pub fn set_link_speed(&mut self, speed: f32) -> ObjectResult<()> {
        check_speed("link-speed", speed)?;
        self.link_speed = speed;
        Ok(())
    }

    pub fn link_speeds(&self) -> &[f32] {
        &self.link_speeds
    }

    pub fn set_link_speeds(&mut self, speeds: &[f32]) -> ObjectResult<()> {
        if speeds.len() > MAX_LINK_SPEEDS {
            return Err(ObjectError::validation(
                "link-speeds",
                format!("{} entries exceeds {}", speeds.len(), MAX_LINK_SPEEDS),
            ));
        }
        for speed in speeds {
            check_speed("link-speeds", *speed)?;
        }
        self.link_speeds = speeds.to_vec();
        Ok(())
    }

    pub fn link_speed_autonegotiate(&self) -> bool {
        self.link_speed_autonegotiate
    }

    pub fn set_link_speed_autonegotiate(&mut self, enable: bool) {
        self.link_speed_autonegotiate = enable;
    }

    pub fn mac_address(&self) -> &[u8] {
        &self.mac_address
    }

    pub fn set_mac_address(&mut self, mac: &[u8]) -> ObjectResult<()> {
        if mac.len() > MAX_MAC_ADDRESS_LEN {
            return Err(ObjectError::validation(
                "mac-address",
                format!("{} octets exceeds {}", mac.len(), MAX_MAC_ADDRESS_LEN),
            ));
        }
        self.mac_address = mac.to_vec();
        Ok(())
    }

    pub fn max_master(&self) -> u8 {
        self.max_master
    }

    pub fn set_max_master(&mut self, max_master: u8) -> ObjectResult<()> {
        if max_master > MAX_MASTER {
            return Err(ObjectError::validation(
                "max-master",
                format!("{} exceeds {}", max_master, MAX_MASTER),
            ));
        }
        self.max_master = max_master;
        Ok(())
    }

    pub fn max_info_frames(&self) -> u8 {
        self.max_info_frames
    }

    pub fn set_max_info_frames(&mut self, frames: u8) -> ObjectResult<()> {
        if frames == 0 {
            return Err(ObjectError::validation("max-info-frames", "must be at least 1"));
        }
        self.max_info_frames = frames;
        Ok(())
    }

    pub fn ipv4(&self) -> &Ipv4Params {
        &self.ipv4
    }

    /// Replaces the BACnet/IP block after validating it.
    pub fn set_ipv4(&mut self, params: Ipv4Params) -> ObjectResult<()> {
        if params.prefix > 32 {
            return Err(ObjectError::validation(
                "ip-subnet-mask",
                format!("prefix {} exceeds 32", params.prefix),
            ));
        }
        check_dns_count("ip-dns-server", params.dns_servers.len())?;
        self.ipv4 = params;
        Ok(())
    }

    pub fn ipv6(&self) -> &Ipv6Params {
        &self.ipv6
    }

    /// Replaces the BACnet/IPv6 block after validating it.
    pub fn set_ipv6(&mut self, params: Ipv6Params) -> ObjectResult<()> {
        if params.prefix_length > 128 {
            return Err(ObjectError::validation(
                "ipv6-prefix-length",
                format!("{} exceeds 128", params.prefix_length),
            ));
        }
        check_dns_count("ipv6-dns-server", params.dns_servers.len())?;
        check_len("ipv6-zone-index", &params.zone_index, MAX_ZONE_INDEX_LEN)?;
        self.ipv6 = params;
        Ok(())
    }

    /// Returns the committed BACnet/SC parameters, if the port has them.
    pub fn secure_connect(&self) -> Option<&SecureConnectParams> {
        self.secure_connect.as_ref()
    }

    /// Returns the BACnet/SC parameters for direct modification.
    ///
    /// # Errors
    ///
    /// Fails with a validation error on ports without the secure-connect
    /// profile.
    pub fn secure_connect_mut(&mut self) -> ObjectResult<&mut SecureConnectParams> {
        self.secure_connect.as_mut().ok_or_else(no_secure_connect)
    }

    /// Replaces the whole BACnet/SC block at once.
    pub(crate) fn replace_secure_connect(
        &mut self,
        params: SecureConnectParams,
    ) -> ObjectResult<()> {
        let current = self.secure_connect.as_mut().ok_or_else(no_secure_connect)?;
        *current = params;
        Ok(())
    }
}

pub(crate) fn no_secure_connect() -> ObjectError {
    ObjectError::validation("secure-connect", "port has no secure-connect profile")
}

fn check_len(field: &str, value: &str, max: usize) -> ObjectResult<()> {
    if value.len() > max {
        return Err(ObjectError::validation(
            field,
            format!("{} octets exceeds {}", value.len(), max),
        ));
    }
    Ok(())
}

fn check_speed(field: &str, speed: f32) -> ObjectResult<()> {
    if !speed.is_finite() || speed < 0.0 {
        return Err(ObjectError::validation(
            field,
            format!("{} is not a valid speed", speed),
        ));
    }
    Ok(())
}

fn check_dns_count(field: &str, count: usize) -> ObjectResult<()> {
    if count > MAX_DNS_SERVERS {
        return Err(ObjectError::validation(
            field,
            format!("{} servers exceeds {}", count, MAX_DNS_SERVERS),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let port = NetworkPort::new(7, PortProfile::Standard);
        assert_eq!(port.instance(), 7);
        assert_eq!(port.object_name(), "NP-7");
        assert_eq!(port.apdu_length(), 1476);
        assert_eq!(port.max_master(), 127);
        assert_eq!(port.max_info_frames(), 1);
        assert_eq!(port.ipv4().udp_port, 0xBAC0);
        assert!(port.secure_connect().is_none());
    }

    #[test]
    fn test_secure_connect_profile() {
        let mut port = NetworkPort::new(1, PortProfile::StandardWithSecureConnect);
        let sc = port.secure_connect().unwrap();
        assert_eq!(sc.primary_hub_uri(), "");
        assert!(!sc.hub_function_enable());
        port.secure_connect_mut()
            .unwrap()
            .set_primary_hub_uri("wss://hub.example:4443")
            .unwrap();
        assert_eq!(
            port.secure_connect().unwrap().primary_hub_uri(),
            "wss://hub.example:4443"
        );

        let mut plain = NetworkPort::new(2, PortProfile::Standard);
        assert!(matches!(
            plain.secure_connect_mut(),
            Err(ObjectError::ValidationFailure { .. })
        ));
    }

    #[test]
    fn test_failed_setter_keeps_value() {
        let mut port = NetworkPort::new(1, PortProfile::Standard);
        port.set_object_name("Uplink").unwrap();
        assert!(port.set_object_name(&"x".repeat(65)).is_err());
        assert!(port.set_object_name("").is_err());
        assert_eq!(port.object_name(), "Uplink");

        assert!(port.set_apdu_length(49).is_err());
        assert!(port.set_apdu_length(1477).is_err());
        assert_eq!(port.apdu_length(), 1476);

        assert!(port.set_max_master(128).is_err());
        assert!(port.set_max_info_frames(0).is_err());
        assert!(port.set_network_number(65535).is_err());
        assert!(port.set_link_speed(-1.0).is_err());
        assert!(port.set_link_speeds(&[10.0; 9]).is_err());
    }

    #[test]
    fn test_status_flags_follow_reliability() {
        let mut port = NetworkPort::new(1, PortProfile::Standard);
        assert_eq!(port.status_flags(), [false, false, false, false]);
        port.set_reliability(Reliability::CommunicationFailure);
        port.set_out_of_service(true);
        assert_eq!(port.status_flags(), [false, true, false, true]);
    }

    #[test]
    fn test_subnet_mask() {
        let mut params = Ipv4Params::default();
        assert_eq!(params.subnet_mask(), Ipv4Addr::new(0, 0, 0, 0));
        params.prefix = 24;
        assert_eq!(params.subnet_mask(), Ipv4Addr::new(255, 255, 255, 0));
        params.prefix = 32;
        assert_eq!(params.subnet_mask(), Ipv4Addr::new(255, 255, 255, 255));
    }

    #[test]
    fn test_ip_blocks_validated() {
        let mut port = NetworkPort::new(1, PortProfile::Standard);
        let params = Ipv4Params {
            dns_servers: vec![Ipv4Addr::LOCALHOST; 4],
            ..Default::default()
        };
        assert!(port.set_ipv4(params).is_err());

        let params = Ipv6Params {
            zone_index: "z".repeat(17),
            ..Default::default()
        };
        assert!(port.set_ipv6(params).is_err());
        assert_eq!(port.ipv6().zone_index, "");
    }

    #[test]
    fn test_reconnect_window() {
        let mut sc = SecureConnectParams::default();
        assert!(sc.set_reconnect_times(30, 20).is_err());
        sc.set_reconnect_times(5, 120).unwrap();
        assert_eq!(sc.minimum_reconnect_time(), 5);
        assert_eq!(sc.maximum_reconnect_time(), 120);
    }

    #[test]
    fn test_secure_connect_strings_are_bounded() {
        let mut port = NetworkPort::new(1, PortProfile::StandardWithSecureConnect);
        let sc = port.secure_connect_mut().unwrap();
        sc.set_primary_hub_uri("wss://hub").unwrap();

        assert!(sc.set_primary_hub_uri(&"u".repeat(MAX_HUB_URI_LEN + 1)).is_err());
        assert!(sc.set_failover_hub_uri(&"u".repeat(MAX_HUB_URI_LEN + 1)).is_err());
        assert!(sc.set_hub_function_binding(&"b".repeat(MAX_BINDING_LEN + 1)).is_err());
        assert!(sc.set_direct_connect_binding(&"b".repeat(MAX_BINDING_LEN + 1)).is_err());
        sc.set_primary_hub_uri(&"u".repeat(MAX_HUB_URI_LEN)).unwrap();

        let sc = port.secure_connect().unwrap();
        assert_eq!(sc.primary_hub_uri().len(), MAX_HUB_URI_LEN);
        assert_eq!(sc.failover_hub_uri(), "");
        assert_eq!(sc.hub_function_binding(), "");
        assert_eq!(sc.direct_connect_binding(), "");
    }
}
