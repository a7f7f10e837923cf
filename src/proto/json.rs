//! Protobuf JSON mapping helpers.
//!
//! The integration messages are plain prost structs that also derive serde.
//! These helpers give them the canonical protobuf JSON shape: base64 bytes,
//! RFC 3339 timestamps, enums by name and `google.protobuf.Struct` as a JSON
//! object.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use prost_types::value::Kind;
use prost_types::{ListValue, NullValue, Struct, Value};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

// Protobuf JSON parsers accept both alphabets, padded or not.
const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const STANDARD: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const URL_SAFE: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// True when a field holds its proto3 default and should be omitted.
pub fn is_default<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

/// Scalar, repeated and map fields: JSON `null` reads as the field's default.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `bytes` fields as base64 strings.
pub mod base64_bytes {
    use base64::Engine;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{STANDARD, URL_SAFE};

    pub fn serialize<S: Serializer>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        STANDARD
            .decode(&encoded)
            .or_else(|_| URL_SAFE.decode(&encoded))
            .map_err(|e| D::Error::custom(format!("invalid base64 value: {}", e)))
    }
}

/// `google.protobuf.Timestamp` as an RFC 3339 UTC string.
pub mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use prost_types::Timestamp;
    use serde::de::Error as _;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<Timestamp>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let Some(ts) = value else {
            return serializer.serialize_none();
        };
        let dt = u32::try_from(ts.nanos)
            .ok()
            .and_then(|nanos| DateTime::<Utc>::from_timestamp(ts.seconds, nanos))
            .ok_or_else(|| {
                S::Error::custom(format!(
                    "timestamp out of range: seconds={}, nanos={}",
                    ts.seconds, ts.nanos
                ))
            })?;
        serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Timestamp>, D::Error> {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        let dt = DateTime::parse_from_rfc3339(&raw)
            .map_err(|e| D::Error::custom(format!("invalid timestamp '{}': {}", raw, e)))?
            .with_timezone(&Utc);
        Ok(Some(Timestamp {
            seconds: dt.timestamp(),
            nanos: dt.timestamp_subsec_nanos() as i32,
        }))
    }
}

/// `google.protobuf.Struct` as a JSON object.
pub mod structure {
    use prost_types::Struct;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{json_to_struct, struct_to_json};

    pub fn serialize<S: Serializer>(
        value: &Option<Struct>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(s) => serde::Serialize::serialize(&struct_to_json(s), serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Struct>, D::Error> {
        match Option::<serde_json::Value>::deserialize(deserializer)? {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(serde_json::Value::Object(map)) => Ok(Some(json_to_struct(map))),
            Some(other) => Err(D::Error::custom(format!(
                "expected a JSON object for google.protobuf.Struct, got {}",
                other
            ))),
        }
    }
}

pub fn struct_to_json(s: &Struct) -> serde_json::Value {
    serde_json::Value::Object(
        s.fields
            .iter()
            .map(|(k, v)| (k.clone(), value_to_json(v)))
            .collect(),
    )
}

fn value_to_json(value: &Value) -> serde_json::Value {
    match &value.kind {
        None | Some(Kind::NullValue(_)) => serde_json::Value::Null,
        Some(Kind::NumberValue(n)) => serde_json::Number::from_f64(*n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Some(Kind::StringValue(s)) => serde_json::Value::String(s.clone()),
        Some(Kind::BoolValue(b)) => serde_json::Value::Bool(*b),
        Some(Kind::StructValue(s)) => struct_to_json(s),
        Some(Kind::ListValue(list)) => {
            serde_json::Value::Array(list.values.iter().map(value_to_json).collect())
        }
    }
}

pub fn json_to_struct(map: serde_json::Map<String, serde_json::Value>) -> Struct {
    Struct {
        fields: map
            .into_iter()
            .map(|(k, v)| (k, json_to_value(v)))
            .collect(),
    }
}

fn json_to_value(value: serde_json::Value) -> Value {
    let kind = match value {
        serde_json::Value::Null => Kind::NullValue(NullValue::NullValue as i32),
        serde_json::Value::Bool(b) => Kind::BoolValue(b),
        serde_json::Value::Number(n) => Kind::NumberValue(n.as_f64().unwrap_or_default()),
        serde_json::Value::String(s) => Kind::StringValue(s),
        serde_json::Value::Array(items) => Kind::ListValue(ListValue {
            values: items.into_iter().map(json_to_value).collect(),
        }),
        serde_json::Value::Object(map) => Kind::StructValue(json_to_struct(map)),
    };
    Value { kind: Some(kind) }
}

/// Enum field as its symbolic name, or the raw number when unknown.
pub fn serialize_enum<S, F>(value: i32, name_of: F, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    F: Fn(i32) -> Option<&'static str>,
{
    match name_of(value) {
        Some(name) => serializer.serialize_str(name),
        None => serializer.serialize_i32(value),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EnumRepr {
    Name(String),
    Number(i32),
}

/// Enum field from either its symbolic name or its number. `null` is the
/// zero value.
pub fn deserialize_enum<'de, D, F>(deserializer: D, value_of: F) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
    F: Fn(&str) -> Option<i32>,
{
    match Option::<EnumRepr>::deserialize(deserializer)? {
        None => Ok(0),
        Some(EnumRepr::Number(n)) => Ok(n),
        Some(EnumRepr::Name(name)) => {
            value_of(&name).ok_or_else(|| D::Error::custom(format!("unknown enum value '{}'", name)))
        }
    }
}
