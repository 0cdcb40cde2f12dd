use serde::{Deserialize, Serialize};

/// Marketplace role registered in the UserProfile contract.
///
/// The contract stores roles as small integers; `0` means the address has
/// never registered, which this enum deliberately does not model - an
/// unregistered profile read comes back as `None` instead.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Buyer,
    Farmer,
    Logistics,
}

impl UserRole {
    /// On-chain integer representation (1-based; 0 is "unregistered").
    pub fn as_u8(&self) -> u8 {
        match self {
            UserRole::Buyer => 1,
            UserRole::Farmer => 2,
            UserRole::Logistics => 3,
        }
    }

    /// Decode the integer the contract returns. `None` for `0`
    /// (unregistered) and for values outside the known role set.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(UserRole::Buyer),
            2 => Some(UserRole::Farmer),
            3 => Some(UserRole::Logistics),
            _ => None,
        }
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            UserRole::Buyer => "Buyer",
            UserRole::Farmer => "Farmer",
            UserRole::Logistics => "Logistics",
        }
    }

    /// Short marketing line shown on the role-selection cards.
    pub fn tagline(&self) -> &'static str {
        match self {
            UserRole::Buyer => "Buy quality beans directly from farmers.",
            UserRole::Farmer => "Upload coffee batches & mint NFTs.",
            UserRole::Logistics => "Handle shipping & tracking.",
        }
    }
}

/// A registered user profile as read from the UserProfile contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfileInfo {
    pub role: UserRole,
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [UserRole::Buyer, UserRole::Farmer, UserRole::Logistics] {
            assert_eq!(UserRole::from_u8(role.as_u8()), Some(role));
        }
    }

    #[test]
    fn test_unregistered_maps_to_none() {
        assert_eq!(UserRole::from_u8(0), None);
        assert_eq!(UserRole::from_u8(7), None);
    }
}
