//! Macro for integer-backed wire enums with tolerant decoding
//!
//! The backend serializes its enums as integers, but some endpoints (and
//! older payloads) send the same value as a numeric string. Every wire enum
//! in this crate is declared through [`tolerant_int_enum!`] so both forms are
//! accepted while unknown discriminants still fail to decode.
//!
//! # Example
//!
//! ```rust
//! use stickyboard_domain::tolerant_int_enum;
//!
//! tolerant_int_enum! {
//!     /// Card priority bucket
//!     pub enum Bucket {
//!         Low = 0,
//!         High = 1,
//!     }
//! }
//!
//! let from_int: Bucket = serde_json::from_str("1").unwrap();
//! let from_text: Bucket = serde_json::from_str("\"1\"").unwrap();
//! assert_eq!(from_int, Bucket::High);
//! assert_eq!(from_text, Bucket::High);
//! assert_eq!(serde_json::to_string(&Bucket::Low).unwrap(), "0");
//! ```

use serde::{Deserialize, Deserializer};

#[doc(hidden)]
pub use serde as __serde;

/// Raw shape accepted for a tolerant integer enum
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDiscriminant {
    Int(i64),
    Text(String),
}

/// Decode an integer that may arrive either as a JSON number or as a numeric
/// string. Used by [`tolerant_int_enum!`]; exposed for hand-written impls.
///
/// # Errors
/// Fails when the value is neither an integer nor a string holding one.
pub fn deserialize_tolerant_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawDiscriminant::deserialize(deserializer) {
        Ok(RawDiscriminant::Int(value)) => Ok(value),
        Ok(RawDiscriminant::Text(text)) => text.trim().parse::<i64>().map_err(|_| {
            serde::de::Error::custom(format!("expected integer or numeric string, got \"{text}\""))
        }),
        Err(_) => Err(serde::de::Error::custom("expected integer or numeric string")),
    }
}

/// Declares a fieldless enum with explicit integer discriminants and
/// implements tolerant serde for it.
///
/// Generated items:
/// - `Debug, Clone, Copy, PartialEq, Eq, Hash` derives
/// - `as_i64` / `from_i64` conversions
/// - `Serialize` as the raw integer
/// - `Deserialize` from an integer first, then from a numeric string
#[macro_export]
macro_rules! tolerant_int_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($(#[$vmeta])* $variant = $value),+
        }

        impl $name {
            /// Every variant in declaration order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Raw wire value
            #[must_use]
            pub const fn as_i64(self) -> i64 {
                self as i64
            }

            /// Look up a variant by its raw wire value
            #[must_use]
            pub fn from_i64(value: i64) -> Option<Self> {
                match value {
                    $($value => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl $crate::macros::__serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: $crate::macros::__serde::Serializer,
            {
                serializer.serialize_i64(self.as_i64())
            }
        }

        impl<'de> $crate::macros::__serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: $crate::macros::__serde::Deserializer<'de>,
            {
                let raw = $crate::macros::deserialize_tolerant_int(deserializer)?;
                Self::from_i64(raw).ok_or_else(|| {
                    <D::Error as $crate::macros::__serde::de::Error>::custom(format!(
                        "Cannot decode {} from value {}",
                        stringify!($name),
                        raw
                    ))
                })
            }
        }
    };
}
