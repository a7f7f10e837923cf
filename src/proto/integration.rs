//! Integration events published by the network server (`integration.proto`).

use std::collections::HashMap;

use prost_types::{Struct, Timestamp};
use serde::{Deserialize, Serialize};

use super::common::{device_class, DeviceClass, Location};
use super::gw::{DownlinkTxInfo, UplinkRxInfo, UplinkTxInfo};
use super::json;

proto_enum! {
    /// Severity of a log event.
    LogLevel, log_level {
        Info = 0 => "INFO",
        Warning = 1 => "WARNING",
        Error = 2 => "ERROR",
    }
}

proto_enum! {
    /// Category of a log event.
    LogCode, log_code {
        Unknown = 0 => "UNKNOWN",
        DownlinkPayloadSize = 1 => "DOWNLINK_PAYLOAD_SIZE",
        UplinkCodec = 2 => "UPLINK_CODEC",
        DownlinkCodec = 3 => "DOWNLINK_CODEC",
        Otaa = 4 => "OTAA",
        UplinkFCntReset = 5 => "UPLINK_F_CNT_RESET",
        UplinkMic = 6 => "UPLINK_MIC",
        UplinkFCntRetransmission = 7 => "UPLINK_F_CNT_RETRANSMISSION",
        DownlinkGateway = 8 => "DOWNLINK_GATEWAY",
        RelayNewEndDevice = 9 => "RELAY_NEW_END_DEVICE",
        FCntDown = 10 => "F_CNT_DOWN",
    }
}

/// Device context attached to every event.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeviceInfo {
    #[prost(string, tag = "1")]
    #[serde(
        alias = "tenant_id",
        deserialize_with = "json::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub tenant_id: String,
    #[prost(string, tag = "2")]
    #[serde(
        alias = "tenant_name",
        deserialize_with = "json::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub tenant_name: String,
    #[prost(string, tag = "3")]
    #[serde(
        alias = "application_id",
        deserialize_with = "json::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub application_id: String,
    #[prost(string, tag = "4")]
    #[serde(
        alias = "application_name",
        deserialize_with = "json::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub application_name: String,
    #[prost(string, tag = "5")]
    #[serde(
        alias = "device_profile_id",
        deserialize_with = "json::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub device_profile_id: String,
    #[prost(string, tag = "6")]
    #[serde(
        alias = "device_profile_name",
        deserialize_with = "json::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub device_profile_name: String,
    #[prost(string, tag = "7")]
    #[serde(
        alias = "device_name",
        deserialize_with = "json::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub device_name: String,
    #[prost(string, tag = "8")]
    #[serde(
        alias = "dev_eui",
        deserialize_with = "json::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub dev_eui: String,
    #[prost(enumeration = "DeviceClass", tag = "10")]
    #[serde(
        alias = "device_class_enabled",
        with = "device_class",
        skip_serializing_if = "json::is_default"
    )]
    pub device_class_enabled: i32,
    #[prost(map = "string, string", tag = "9")]
    #[serde(deserialize_with = "json::null_as_default", skip_serializing_if = "HashMap::is_empty")]
    pub tags: HashMap<String, String>,
}

/// Uplink frame received from a device (`up`).
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UplinkEvent {
    #[prost(string, tag = "1")]
    #[serde(
        alias = "deduplication_id",
        deserialize_with = "json::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub deduplication_id: String,
    #[prost(message, optional, tag = "2")]
    #[serde(with = "json::timestamp", skip_serializing_if = "Option::is_none")]
    pub time: Option<Timestamp>,
    #[prost(message, optional, tag = "3")]
    #[serde(alias = "device_info", skip_serializing_if = "Option::is_none")]
    pub device_info: Option<DeviceInfo>,
    #[prost(string, tag = "4")]
    #[serde(
        alias = "dev_addr",
        deserialize_with = "json::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub dev_addr: String,
    #[prost(bool, tag = "5")]
    #[serde(deserialize_with = "json::null_as_default", skip_serializing_if = "json::is_default")]
    pub adr: bool,
    #[prost(uint32, tag = "6")]
    #[serde(deserialize_with = "json::null_as_default", skip_serializing_if = "json::is_default")]
    pub dr: u32,
    #[prost(uint32, tag = "7")]
    #[serde(
        alias = "f_cnt",
        deserialize_with = "json::null_as_default",
        skip_serializing_if = "json::is_default"
    )]
    pub f_cnt: u32,
    #[prost(uint32, tag = "8")]
    #[serde(
        alias = "f_port",
        deserialize_with = "json::null_as_default",
        skip_serializing_if = "json::is_default"
    )]
    pub f_port: u32,
    #[prost(bool, tag = "9")]
    #[serde(deserialize_with = "json::null_as_default", skip_serializing_if = "json::is_default")]
    pub confirmed: bool,
    #[prost(bytes = "vec", tag = "10")]
    #[serde(with = "json::base64_bytes", skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<u8>,
    #[prost(message, optional, tag = "11")]
    #[serde(with = "json::structure", skip_serializing_if = "Option::is_none")]
    pub object: Option<Struct>,
    #[prost(message, repeated, tag = "12")]
    #[serde(
        alias = "rx_info",
        deserialize_with = "json::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub rx_info: Vec<UplinkRxInfo>,
    #[prost(message, optional, tag = "13")]
    #[serde(alias = "tx_info", skip_serializing_if = "Option::is_none")]
    pub tx_info: Option<UplinkTxInfo>,
}

/// Device (re)joined the network (`join`).
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JoinEvent {
    #[prost(string, tag = "1")]
    #[serde(
        alias = "deduplication_id",
        deserialize_with = "json::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub deduplication_id: String,
    #[prost(message, optional, tag = "2")]
    #[serde(with = "json::timestamp", skip_serializing_if = "Option::is_none")]
    pub time: Option<Timestamp>,
    #[prost(message, optional, tag = "3")]
    #[serde(alias = "device_info", skip_serializing_if = "Option::is_none")]
    pub device_info: Option<DeviceInfo>,
    #[prost(string, tag = "4")]
    #[serde(
        alias = "dev_addr",
        deserialize_with = "json::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub dev_addr: String,
}

/// Confirmed downlink (n)acknowledged by the device (`ack`).
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AckEvent {
    #[prost(string, tag = "1")]
    #[serde(
        alias = "deduplication_id",
        deserialize_with = "json::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub deduplication_id: String,
    #[prost(message, optional, tag = "2")]
    #[serde(with = "json::timestamp", skip_serializing_if = "Option::is_none")]
    pub time: Option<Timestamp>,
    #[prost(message, optional, tag = "3")]
    #[serde(alias = "device_info", skip_serializing_if = "Option::is_none")]
    pub device_info: Option<DeviceInfo>,
    #[prost(string, tag = "4")]
    #[serde(
        alias = "queue_item_id",
        deserialize_with = "json::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub queue_item_id: String,
    #[prost(bool, tag = "5")]
    #[serde(deserialize_with = "json::null_as_default", skip_serializing_if = "json::is_default")]
    pub acknowledged: bool,
    #[prost(uint32, tag = "6")]
    #[serde(
        alias = "f_cnt_down",
        deserialize_with = "json::null_as_default",
        skip_serializing_if = "json::is_default"
    )]
    pub f_cnt_down: u32,
}

/// Downlink handed to a gateway for transmission (`txack`).
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TxAckEvent {
    #[prost(uint32, tag = "1")]
    #[serde(
        alias = "downlink_id",
        deserialize_with = "json::null_as_default",
        skip_serializing_if = "json::is_default"
    )]
    pub downlink_id: u32,
    #[prost(message, optional, tag = "2")]
    #[serde(with = "json::timestamp", skip_serializing_if = "Option::is_none")]
    pub time: Option<Timestamp>,
    #[prost(message, optional, tag = "3")]
    #[serde(alias = "device_info", skip_serializing_if = "Option::is_none")]
    pub device_info: Option<DeviceInfo>,
    #[prost(string, tag = "4")]
    #[serde(
        alias = "queue_item_id",
        deserialize_with = "json::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub queue_item_id: String,
    #[prost(uint32, tag = "5")]
    #[serde(
        alias = "f_cnt_down",
        deserialize_with = "json::null_as_default",
        skip_serializing_if = "json::is_default"
    )]
    pub f_cnt_down: u32,
    #[prost(string, tag = "6")]
    #[serde(
        alias = "gateway_id",
        deserialize_with = "json::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub gateway_id: String,
    #[prost(message, optional, tag = "7")]
    #[serde(alias = "tx_info", skip_serializing_if = "Option::is_none")]
    pub tx_info: Option<DownlinkTxInfo>,
}

/// Diagnostic message about a device (`log`).
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogEvent {
    #[prost(message, optional, tag = "1")]
    #[serde(with = "json::timestamp", skip_serializing_if = "Option::is_none")]
    pub time: Option<Timestamp>,
    #[prost(message, optional, tag = "2")]
    #[serde(alias = "device_info", skip_serializing_if = "Option::is_none")]
    pub device_info: Option<DeviceInfo>,
    #[prost(enumeration = "LogLevel", tag = "3")]
    #[serde(with = "log_level", skip_serializing_if = "json::is_default")]
    pub level: i32,
    #[prost(enumeration = "LogCode", tag = "4")]
    #[serde(with = "log_code", skip_serializing_if = "json::is_default")]
    pub code: i32,
    #[prost(string, tag = "5")]
    #[serde(deserialize_with = "json::null_as_default", skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[prost(map = "string, string", tag = "6")]
    #[serde(deserialize_with = "json::null_as_default", skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, String>,
}

/// Battery and link margin report (`status`).
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatusEvent {
    #[prost(string, tag = "1")]
    #[serde(
        alias = "deduplication_id",
        deserialize_with = "json::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub deduplication_id: String,
    #[prost(message, optional, tag = "2")]
    #[serde(with = "json::timestamp", skip_serializing_if = "Option::is_none")]
    pub time: Option<Timestamp>,
    #[prost(message, optional, tag = "3")]
    #[serde(alias = "device_info", skip_serializing_if = "Option::is_none")]
    pub device_info: Option<DeviceInfo>,
    #[prost(int32, tag = "5")]
    #[serde(deserialize_with = "json::null_as_default", skip_serializing_if = "json::is_default")]
    pub margin: i32,
    #[prost(bool, tag = "6")]
    #[serde(
        alias = "external_power_source",
        deserialize_with = "json::null_as_default",
        skip_serializing_if = "json::is_default"
    )]
    pub external_power_source: bool,
    #[prost(bool, tag = "7")]
    #[serde(
        alias = "battery_level_unavailable",
        deserialize_with = "json::null_as_default",
        skip_serializing_if = "json::is_default"
    )]
    pub battery_level_unavailable: bool,
    #[prost(float, tag = "8")]
    #[serde(
        alias = "battery_level",
        deserialize_with = "json::null_as_default",
        skip_serializing_if = "json::is_default"
    )]
    pub battery_level: f32,
}

/// Resolved device position (`location`).
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocationEvent {
    #[prost(string, tag = "1")]
    #[serde(
        alias = "deduplication_id",
        deserialize_with = "json::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub deduplication_id: String,
    #[prost(message, optional, tag = "2")]
    #[serde(with = "json::timestamp", skip_serializing_if = "Option::is_none")]
    pub time: Option<Timestamp>,
    #[prost(message, optional, tag = "3")]
    #[serde(alias = "device_info", skip_serializing_if = "Option::is_none")]
    pub device_info: Option<DeviceInfo>,
    #[prost(message, optional, tag = "4")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

/// Event emitted by another integration (`integration`).
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IntegrationEvent {
    #[prost(string, tag = "1")]
    #[serde(
        alias = "deduplication_id",
        deserialize_with = "json::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub deduplication_id: String,
    #[prost(message, optional, tag = "2")]
    #[serde(with = "json::timestamp", skip_serializing_if = "Option::is_none")]
    pub time: Option<Timestamp>,
    #[prost(message, optional, tag = "3")]
    #[serde(alias = "device_info", skip_serializing_if = "Option::is_none")]
    pub device_info: Option<DeviceInfo>,
    #[prost(string, tag = "4")]
    #[serde(
        alias = "integration_name",
        deserialize_with = "json::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub integration_name: String,
    #[prost(string, tag = "5")]
    #[serde(
        alias = "event_type",
        deserialize_with = "json::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub event_type: String,
    #[prost(message, optional, tag = "6")]
    #[serde(with = "json::structure", skip_serializing_if = "Option::is_none")]
    pub object: Option<Struct>,
}
