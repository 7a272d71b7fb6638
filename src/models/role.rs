use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Hr,
    User,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Hr, Role::User, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Hr => "hr",
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// Where a freshly logged-in account lands.
    pub fn home_path(&self) -> &'static str {
        match self {
            Role::Admin => "/admin",
            Role::Hr => "/hr",
            Role::User => "/user/home",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(raw))
            .ok_or_else(|| Error::invalid("role", format!("Unknown role: {}", raw)))
    }
}

/// Who is looking at the application right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Principal {
    Anonymous,
    Authenticated(Role),
}

impl Principal {
    pub fn role(&self) -> Option<Role> {
        match self {
            Principal::Anonymous => None,
            Principal::Authenticated(role) => Some(*role),
        }
    }
}

impl From<Option<Role>> for Principal {
    fn from(role: Option<Role>) -> Self {
        role.map_or(Principal::Anonymous, Principal::Authenticated)
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Principal::Anonymous => f.write_str("anonymous"),
            Principal::Authenticated(role) => write!(f, "{}", role),
        }
    }
}
