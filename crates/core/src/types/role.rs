//! Account roles.

use serde::{Deserialize, Serialize};

/// Account role with different dashboard capabilities.
///
/// A role is chosen at signup and never changes afterwards; there is no
/// promotion or demotion flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Browses the gallery and purchases artwork.
    #[default]
    Buyer,
    /// Lists and manages artwork for sale.
    Artist,
    /// Moderates the marketplace.
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buyer => write!(f, "buyer"),
            Self::Artist => write!(f, "artist"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buyer" => Ok(Self::Buyer),
            "artist" => Ok(Self::Artist),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_buyer() {
        assert_eq!(Role::default(), Role::Buyer);
    }

    #[test]
    fn test_display_from_str_roundtrip() {
        for role in [Role::Buyer, Role::Artist, Role::Admin] {
            let parsed: Role = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("curator".parse::<Role>().is_err());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&Role::Artist).unwrap();
        assert_eq!(json, "\"artist\"");
    }
}
