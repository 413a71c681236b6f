use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix the backend puts in front of every role claim (`ROLE_ADMIN`).
pub const ROLE_PREFIX: &str = "ROLE_";

/// Permission class of an authenticated user.
///
/// The set is closed: anything the token carries outside of these three
/// values is treated as "no role" by the route guard.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Member,
    Trainer,
    Admin,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl Role {
    pub const ALL: [Role; 3] = [Role::Member, Role::Trainer, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Member => "MEMBER",
            Role::Trainer => "TRAINER",
            Role::Admin => "ADMIN",
        }
    }

    /// Landing path after a successful login.
    pub fn home_path(&self) -> &'static str {
        match self {
            Role::Member => "/member",
            Role::Trainer => "/trainer",
            Role::Admin => "/admin",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}
