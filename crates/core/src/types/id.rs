//! Newtype ids for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe id wrappers that prevent
//! accidentally mixing ids from different entity types. Ids are opaque
//! strings: the seed dataset uses short numeric strings while synthesized
//! identities carry uuid-based ids, and nothing in the system is allowed to
//! care which is which.

/// Macro to define a type-safe id wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>` and `From<&str>` implementations
///
/// # Example
///
/// ```rust
/// # use artvista_core::define_id;
/// define_id!(UserId);
/// define_id!(ArtworkId);
///
/// let user_id = UserId::new("1");
/// let artwork_id = ArtworkId::new("1");
///
/// // These are different types, so this won't compile:
/// // let _: UserId = artwork_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new id from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the id as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the id and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity ids
define_id!(UserId);
define_id!(ArtworkId);
define_id!(CategoryId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        let id = UserId::new("user_42");
        assert_eq!(id.as_str(), "user_42");
        assert_eq!(id.to_string(), "user_42");
        assert_eq!(id.clone().into_inner(), "user_42");
    }

    #[test]
    fn test_id_equality() {
        assert_eq!(ArtworkId::new("7"), ArtworkId::from("7"));
        assert_ne!(ArtworkId::new("7"), ArtworkId::new("8"));
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = ArtworkId::new("3");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"3\"");

        let parsed: ArtworkId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
