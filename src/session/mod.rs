//! Session persistence.
//!
//! The store is the single owner of the session: everything that needs a
//! token or the current role asks the store at the moment it needs it.

mod file;
mod memory;

pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::role::{Principal, Role};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub tokens: Tokens,
    pub role: Role,
}

pub trait TokenStore: Send + Sync {
    /// Snapshot of the persisted session, or `None` if nothing usable is stored.
    fn load(&self) -> Option<Session>;

    /// Replaces the whole session in one step.
    fn save(&self, session: &Session) -> Result<()>;

    fn clear(&self) -> Result<()>;

    fn set_tokens(&self, tokens: &Tokens, role: Role) -> Result<()> {
        self.save(&Session {
            tokens: tokens.clone(),
            role,
        })
    }

    fn access_token(&self) -> Option<String> {
        self.load().map(|s| s.tokens.access_token)
    }

    fn refresh_token(&self) -> Option<String> {
        self.load().map(|s| s.tokens.refresh_token)
    }

    fn token_type(&self) -> Option<String> {
        self.load().map(|s| s.tokens.token_type)
    }

    fn role(&self) -> Option<Role> {
        self.load().map(|s| s.role)
    }

    fn principal(&self) -> Principal {
        Principal::from(self.role())
    }
}
