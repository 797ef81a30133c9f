//! Identity records and the closed role set.
//!
//! DESIGN
//! ======
//! An `Identity` is issued by the identity backend and never edited while the
//! session holding it is alive. Serde field names match the persisted record
//! so a stored identity round-trips without a separate DTO.

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role governing which views an identity may reach.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Member of the public reporting incidents.
    Public,
    /// Police dispatcher.
    Police,
    /// Hospital or ambulance staff.
    Hospital,
    /// Platform administrator.
    Admin,
}

impl Role {
    /// Every role, in directory order.
    pub const ALL: [Role; 4] = [Role::Public, Role::Police, Role::Hospital, Role::Admin];

    /// Wire/storage name of the role.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Police => "police",
            Self::Hospital => "hospital",
            Self::Admin => "admin",
        }
    }

    /// Landing path for this role, used after login and by role redirects.
    #[must_use]
    pub fn home_path(self) -> &'static str {
        match self {
            Self::Police => "/dispatch",
            Self::Hospital => "/ambulance-tracker",
            Self::Admin => "/analytics",
            Self::Public => "/",
        }
    }

    /// Human-readable label for pickers and headers.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Public => "Public",
            Self::Police => "Police",
            Self::Hospital => "Hospital",
            Self::Admin => "Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error returned when parsing an unknown role name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" => Ok(Self::Public),
            "police" => Ok(Self::Police),
            "hospital" => Ok(Self::Hospital),
            "admin" => Ok(Self::Admin),
            _ => Err(UnknownRole(s.to_owned())),
        }
    }
}

/// Role-bearing user profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Identifier issued by the backend.
    pub id: String,
    /// Display name.
    pub name: String,
    pub role: Role,
    pub email: String,
    /// Avatar image reference, if the backend has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Identity {
    /// Uppercase initials of the display name, `"U"` when the name is blank.
    #[must_use]
    pub fn initials(&self) -> String {
        let initials: String = self
            .name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect();
        if initials.is_empty() { "U".to_owned() } else { initials }
    }
}
