//! ChirpStack v4 integration schema.
//!
//! Messages are declared directly with `prost::Message` rather than generated
//! from `.proto` sources, so the crate builds without `protoc`. Field tags
//! match the upstream `integration`, `gw` and `common` packages for the fields
//! we carry; anything else on the wire is skipped as an unknown field.
//!
//! Every message also derives serde with the protobuf JSON mapping (see
//! [`json`]), which is how the receiver accepts `application/json` webhooks
//! and how it renders the normalized payload it persists.

/// Declares a protobuf enum with its symbolic names and a serde module that
/// maps the `i32` field representation to and from those names.
macro_rules! proto_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $serde_mod:ident {
            $( $variant:ident = $value:literal => $label:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
        #[repr(i32)]
        pub enum $name {
            $( $variant = $value, )+
        }

        impl $name {
            /// Name of the value as it appears in the `.proto` definition.
            pub fn as_str_name(&self) -> &'static str {
                match self {
                    $( Self::$variant => $label, )+
                }
            }

            /// Value for a `.proto` name, if it exists.
            pub fn from_str_name(value: &str) -> Option<Self> {
                match value {
                    $( $label => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }

        pub mod $serde_mod {
            use super::$name;

            pub fn serialize<S: ::serde::Serializer>(
                value: &i32,
                serializer: S,
            ) -> Result<S::Ok, S::Error> {
                $crate::proto::json::serialize_enum(
                    *value,
                    |v| $name::try_from(v).ok().map(|e| e.as_str_name()),
                    serializer,
                )
            }

            pub fn deserialize<'de, D: ::serde::Deserializer<'de>>(
                deserializer: D,
            ) -> Result<i32, D::Error> {
                $crate::proto::json::deserialize_enum(deserializer, |s| {
                    $name::from_str_name(s).map(|e| e as i32)
                })
            }
        }
    };
}

pub mod json;

pub mod common;
pub mod gw;
pub mod integration;

pub use integration::{
    AckEvent, DeviceInfo, IntegrationEvent, JoinEvent, LocationEvent, LogEvent, StatusEvent,
    TxAckEvent, UplinkEvent,
};
