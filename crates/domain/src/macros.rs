//! Macro for implementing Display and FromStr for wire-code enums
//!
//! Error codes travel as upper-case identifiers (`UNKNOWN_ERROR`). This macro
//! provides both directions of the conversion from a single mapping table,
//! accepting any casing on the parse side.
//!
//! # Example
//!
//! ```rust
//! use meterlink_domain::impl_wire_code_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Outcome {
//!     Accepted,
//!     Rejected,
//! }
//!
//! impl_wire_code_conversions!(Outcome {
//!     Accepted => "ACCEPTED",
//!     Rejected => "REJECTED",
//! });
//!
//! assert_eq!(Outcome::Accepted.to_string(), "ACCEPTED");
//! assert_eq!("rejected".parse::<Outcome>().unwrap(), Outcome::Rejected);
//! ```

/// Implements Display and FromStr traits for wire-code enums
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their upper-case code
///
/// Parsing upper-cases the input before matching, so every `$str` must be
/// written in upper case.
#[macro_export]
macro_rules! impl_wire_code_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self {
                    $(Self::$variant => ::std::write!(f, $str),)+
                }
            }
        }

        impl ::std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.to_ascii_uppercase().as_str() {
                    $($str => ::std::result::Result::Ok(Self::$variant),)+
                    _ => ::std::result::Result::Err(::std::format!(
                        "Invalid {}: {}",
                        ::std::stringify!($enum_name),
                        s
                    )),
                }
            }
        }
    };
}
