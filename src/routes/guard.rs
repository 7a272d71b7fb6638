use crate::models::role::{Principal, Role};

/// Outcome of checking a principal against a section's allowed roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// Nobody is logged in.
    Login,
    /// Logged in, but as the wrong kind of account.
    Landing,
}

pub fn can_access(principal: Principal, allowed: &[Role]) -> bool {
    check(principal, allowed) == Access::Granted
}

pub fn check(principal: Principal, allowed: &[Role]) -> Access {
    match principal {
        Principal::Anonymous => Access::Login,
        Principal::Authenticated(role) if allowed.contains(&role) => Access::Granted,
        Principal::Authenticated(_) => Access::Landing,
    }
}
