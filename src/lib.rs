pub mod cli;
pub mod client;
pub mod config;
pub mod dto;
pub mod error;
pub mod forms;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;
pub mod utils;

use std::sync::Arc;

use crate::client::ApiClient;
use crate::config::Config;
use crate::error::Result;
use crate::routes::{RouteTable, Router};
use crate::services::{AdminService, AuthService, HrService, ResumeService, UserService};
use crate::session::{FileTokenStore, TokenStore};

/// Everything a front end needs, wired to one token store and one HTTP client.
#[derive(Clone, Debug)]
pub struct JobBoard {
    pub client: ApiClient,
    pub router: Router,
    pub auth: AuthService,
    pub hr: HrService,
    pub admin: AdminService,
    pub user: UserService,
    pub resume: ResumeService,
}

impl JobBoard {
    pub fn new(config: &Config, store: Arc<dyn TokenStore>) -> Result<Self> {
        let client = ApiClient::new(config, Arc::clone(&store))?;

        Ok(Self {
            router: Router::new(RouteTable::default(), store),
            auth: AuthService::new(client.clone()),
            hr: HrService::new(client.clone()),
            admin: AdminService::new(client.clone()),
            user: UserService::new(client.clone()),
            resume: ResumeService::new(client.clone()),
            client,
        })
    }

    /// Uses the session file named in the configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = Arc::new(FileTokenStore::new(&config.session_file));
        Self::new(config, store)
    }
}
