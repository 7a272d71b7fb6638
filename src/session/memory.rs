use std::sync::RwLock;

use super::{Session, TokenStore};
use crate::error::Result;

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    session: RwLock<Option<Session>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session: RwLock::new(Some(session)),
        }
    }

    fn replace(&self, value: Option<Session>) {
        match self.session.write() {
            Ok(mut guard) => *guard = value,
            Err(poisoned) => *poisoned.into_inner() = value,
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<Session> {
        match self.session.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn save(&self, session: &Session) -> Result<()> {
        self.replace(Some(session.clone()));
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.replace(None);
        Ok(())
    }
}
