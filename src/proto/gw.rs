//! Gateway radio metadata (`gw.proto`).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::common::Location;
use super::json;

proto_enum! {
    /// LoRa coding rate.
    CodeRate, code_rate {
        CrUndefined = 0 => "CR_UNDEFINED",
        Cr45 = 1 => "CR_4_5",
        Cr46 = 2 => "CR_4_6",
        Cr47 = 3 => "CR_4_7",
        Cr48 = 4 => "CR_4_8",
        Cr38 = 5 => "CR_3_8",
        Cr26 = 6 => "CR_2_6",
        Cr14 = 7 => "CR_1_4",
        Cr16 = 8 => "CR_1_6",
        Cr56 = 9 => "CR_5_6",
        CrLi45 = 10 => "CR_LI_4_5",
        CrLi46 = 11 => "CR_LI_4_6",
        CrLi48 = 12 => "CR_LI_4_8",
    }
}

proto_enum! {
    /// CRC check result reported by the gateway.
    CrcStatus, crc_status {
        NoCrc = 0 => "NO_CRC",
        BadCrc = 1 => "BAD_CRC",
        CrcOk = 2 => "CRC_OK",
    }
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoraModulationInfo {
    #[prost(uint32, tag = "1")]
    #[serde(deserialize_with = "json::null_as_default", skip_serializing_if = "json::is_default")]
    pub bandwidth: u32,
    #[prost(uint32, tag = "2")]
    #[serde(
        alias = "spreading_factor",
        deserialize_with = "json::null_as_default",
        skip_serializing_if = "json::is_default"
    )]
    pub spreading_factor: u32,
    #[prost(string, tag = "3")]
    #[serde(
        alias = "code_rate_legacy",
        deserialize_with = "json::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub code_rate_legacy: String,
    #[prost(bool, tag = "4")]
    #[serde(
        alias = "polarization_inversion",
        deserialize_with = "json::null_as_default",
        skip_serializing_if = "json::is_default"
    )]
    pub polarization_inversion: bool,
    #[prost(enumeration = "CodeRate", tag = "5")]
    #[serde(alias = "code_rate", with = "code_rate", skip_serializing_if = "json::is_default")]
    pub code_rate: i32,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FskModulationInfo {
    #[prost(uint32, tag = "1")]
    #[serde(
        alias = "frequency_deviation",
        deserialize_with = "json::null_as_default",
        skip_serializing_if = "json::is_default"
    )]
    pub frequency_deviation: u32,
    #[prost(uint32, tag = "2")]
    #[serde(deserialize_with = "json::null_as_default", skip_serializing_if = "json::is_default")]
    pub datarate: u32,
}

/// Modulation parameters. Upstream this is a `oneof`; at most one of the
/// fields is set on a well-formed message.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Modulation {
    #[prost(message, optional, tag = "3")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lora: Option<LoraModulationInfo>,
    #[prost(message, optional, tag = "4")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fsk: Option<FskModulationInfo>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UplinkTxInfo {
    #[prost(uint32, tag = "1")]
    #[serde(deserialize_with = "json::null_as_default", skip_serializing_if = "json::is_default")]
    pub frequency: u32,
    #[prost(message, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modulation: Option<Modulation>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UplinkRxInfo {
    #[prost(string, tag = "1")]
    #[serde(
        alias = "gateway_id",
        deserialize_with = "json::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub gateway_id: String,
    #[prost(uint32, tag = "2")]
    #[serde(
        alias = "uplink_id",
        deserialize_with = "json::null_as_default",
        skip_serializing_if = "json::is_default"
    )]
    pub uplink_id: u32,
    #[prost(int32, tag = "6")]
    #[serde(deserialize_with = "json::null_as_default", skip_serializing_if = "json::is_default")]
    pub rssi: i32,
    #[prost(float, tag = "7")]
    #[serde(deserialize_with = "json::null_as_default", skip_serializing_if = "json::is_default")]
    pub snr: f32,
    #[prost(uint32, tag = "8")]
    #[serde(deserialize_with = "json::null_as_default", skip_serializing_if = "json::is_default")]
    pub channel: u32,
    #[prost(uint32, tag = "9")]
    #[serde(
        alias = "rf_chain",
        deserialize_with = "json::null_as_default",
        skip_serializing_if = "json::is_default"
    )]
    pub rf_chain: u32,
    #[prost(uint32, tag = "10")]
    #[serde(deserialize_with = "json::null_as_default", skip_serializing_if = "json::is_default")]
    pub board: u32,
    #[prost(uint32, tag = "11")]
    #[serde(deserialize_with = "json::null_as_default", skip_serializing_if = "json::is_default")]
    pub antenna: u32,
    #[prost(message, optional, tag = "12")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[prost(bytes = "vec", tag = "13")]
    #[serde(with = "json::base64_bytes", skip_serializing_if = "Vec::is_empty")]
    pub context: Vec<u8>,
    #[prost(map = "string, string", tag = "15")]
    #[serde(deserialize_with = "json::null_as_default", skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
    #[prost(enumeration = "CrcStatus", tag = "16")]
    #[serde(alias = "crc_status", with = "crc_status", skip_serializing_if = "json::is_default")]
    pub crc_status: i32,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DownlinkTxInfo {
    #[prost(uint32, tag = "1")]
    #[serde(deserialize_with = "json::null_as_default", skip_serializing_if = "json::is_default")]
    pub frequency: u32,
    #[prost(int32, tag = "2")]
    #[serde(deserialize_with = "json::null_as_default", skip_serializing_if = "json::is_default")]
    pub power: i32,
    #[prost(message, optional, tag = "3")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modulation: Option<Modulation>,
    #[prost(uint32, tag = "4")]
    #[serde(deserialize_with = "json::null_as_default", skip_serializing_if = "json::is_default")]
    pub board: u32,
    #[prost(uint32, tag = "5")]
    #[serde(deserialize_with = "json::null_as_default", skip_serializing_if = "json::is_default")]
    pub antenna: u32,
    #[prost(bytes = "vec", tag = "7")]
    #[serde(with = "json::base64_bytes", skip_serializing_if = "Vec::is_empty")]
    pub context: Vec<u8>,
}
