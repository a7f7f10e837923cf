//! Types shared across packages (`common.proto`).

use serde::{Deserialize, Serialize};

use super::json;

proto_enum! {
    /// LoRaWAN device class.
    DeviceClass, device_class {
        ClassA = 0 => "CLASS_A",
        ClassB = 1 => "CLASS_B",
        ClassC = 2 => "CLASS_C",
    }
}

proto_enum! {
    /// Origin of a location fix.
    LocationSource, location_source {
        Unknown = 0 => "UNKNOWN",
        Gps = 1 => "GPS",
        Config = 2 => "CONFIG",
        GeoResolverTdoa = 3 => "GEO_RESOLVER_TDOA",
        GeoResolverRssi = 4 => "GEO_RESOLVER_RSSI",
        GeoResolverGnss = 5 => "GEO_RESOLVER_GNSS",
        GeoResolverWifi = 6 => "GEO_RESOLVER_WIFI",
    }
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Location {
    #[prost(double, tag = "1")]
    #[serde(deserialize_with = "json::null_as_default", skip_serializing_if = "json::is_default")]
    pub latitude: f64,
    #[prost(double, tag = "2")]
    #[serde(deserialize_with = "json::null_as_default", skip_serializing_if = "json::is_default")]
    pub longitude: f64,
    #[prost(double, tag = "3")]
    #[serde(deserialize_with = "json::null_as_default", skip_serializing_if = "json::is_default")]
    pub altitude: f64,
    #[prost(enumeration = "LocationSource", tag = "4")]
    #[serde(with = "location_source", skip_serializing_if = "json::is_default")]
    pub source: i32,
    #[prost(float, tag = "5")]
    #[serde(deserialize_with = "json::null_as_default", skip_serializing_if = "json::is_default")]
    pub accuracy: f32,
}
