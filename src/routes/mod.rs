//! Role-gated navigation.
//!
//! The route table says which roles may enter each section; the router reads
//! the role from the token store at navigation time and either renders a page
//! or redirects (to `/login` when nobody is logged in, to `/` when the role
//! does not match).

pub mod guard;
pub mod pages;

pub use guard::{can_access, Access};
pub use pages::{AdminPage, HrPage, Page, UserPage};

use std::sync::Arc;
use tracing::debug;

use crate::models::role::{Principal, Role};
use crate::session::TokenStore;
use pages::Resolved;

pub const LOGIN_PATH: &str = "/login";
pub const LANDING_PATH: &str = "/";

const MAX_REDIRECTS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRule {
    pub prefix: &'static str,
    pub allowed: &'static [Role],
}

impl RouteRule {
    fn matches(&self, path: &str) -> bool {
        path == self.prefix
            || path
                .strip_prefix(self.prefix)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// Declarative section table. Paths no rule covers are public.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            rules: vec![
                RouteRule {
                    prefix: "/hr",
                    allowed: &[Role::Hr],
                },
                RouteRule {
                    prefix: "/admin",
                    allowed: &[Role::Admin],
                },
                RouteRule {
                    prefix: "/user",
                    allowed: &[Role::User],
                },
            ],
        }
    }
}

impl RouteTable {
    pub fn new(rules: Vec<RouteRule>) -> Self {
        Self { rules }
    }

    pub fn rule_for(&self, path: &str) -> Option<&RouteRule> {
        self.rules.iter().find(|rule| rule.matches(path))
    }

    pub fn check(&self, principal: Principal, path: &str) -> Access {
        match self.rule_for(path) {
            Some(rule) => guard::check(principal, rule.allowed),
            None => Access::Granted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Render(Page),
    Redirect(String),
}

/// Strips query and fragment and any trailing slash, and makes the path
/// absolute.
pub fn normalize_path(raw: &str) -> String {
    let path = raw
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim();
    let trimmed = path.trim_matches('/');
    format!("/{}", trimmed)
}

#[derive(Clone)]
pub struct Router {
    table: RouteTable,
    store: Arc<dyn TokenStore>,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router").field("table", &self.table).finish()
    }
}

impl Router {
    pub fn new(table: RouteTable, store: Arc<dyn TokenStore>) -> Self {
        Self { table, store }
    }

    pub fn principal(&self) -> Principal {
        self.store.principal()
    }

    pub fn navigate(&self, path: &str) -> Navigation {
        let path = normalize_path(path);
        let principal = self.principal();
        let navigation = match self.table.check(principal, &path) {
            Access::Login => Navigation::Redirect(LOGIN_PATH.to_string()),
            Access::Landing => Navigation::Redirect(LANDING_PATH.to_string()),
            Access::Granted => match pages::resolve(&path) {
                Resolved::Page(page) => Navigation::Render(page),
                Resolved::Redirect(to) => Navigation::Redirect(to.to_string()),
            },
        };
        debug!(path = %path, principal = %principal, navigation = ?navigation, "Navigated");
        navigation
    }

    /// Follows redirects until a page renders. Returns the final path and page.
    pub fn open(&self, path: &str) -> (String, Page) {
        let mut current = normalize_path(path);
        for _ in 0..MAX_REDIRECTS {
            match self.navigate(&current) {
                Navigation::Render(page) => return (current, page),
                Navigation::Redirect(to) => current = to,
            }
        }
        (LANDING_PATH.to_string(), Page::Landing)
    }

    /// Where to go right after a successful login.
    pub fn home(&self) -> String {
        match self.principal() {
            Principal::Authenticated(role) => role.home_path().to_string(),
            Principal::Anonymous => LOGIN_PATH.to_string(),
        }
    }
}
