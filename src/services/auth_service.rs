use tracing::info;

use crate::client::{ApiClient, ApiRequest};
use crate::dto::auth_dto::{
    LoginPayload, MessageResponse, RegisterHrPayload, RegisterUserPayload, TokenResponse,
};
use crate::error::Result;
use crate::models::role::{Principal, Role};
use crate::session::Tokens;
use crate::utils::token::{current_user_id, role_from_access_token};
use crate::utils::validation;

#[derive(Clone, Debug)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Logs in and stores the session. The role comes from the access token.
    pub async fn login(&self, payload: &LoginPayload) -> Result<Role> {
        validation::validate(payload)?;
        let request = ApiRequest::post("api/v1/auth/login").json(payload)?.public();
        let tokens: TokenResponse = self.client.send_json(request).await?;
        let role = self.store_tokens(tokens)?;
        info!(role = %role, "Logged in");
        Ok(role)
    }

    /// Applicant signup logs the new account straight in.
    pub async fn register_user(&self, payload: &RegisterUserPayload) -> Result<Role> {
        payload.check()?;
        let request = ApiRequest::post("api/v1/auth/register/user")
            .json(payload)?
            .public();
        let tokens: TokenResponse = self.client.send_json(request).await?;
        let role = self.store_tokens(tokens)?;
        info!(role = %role, "Registered and logged in");
        Ok(role)
    }

    /// HR signup only files the request; the account waits for an
    /// administrator's approval and no session is created.
    pub async fn register_hr(&self, payload: &RegisterHrPayload) -> Result<MessageResponse> {
        payload.check()?;
        let request = ApiRequest::post("api/v1/auth/register/hr")
            .json(payload)?
            .public();
        let response: MessageResponse = self.client.send_json(request).await?;
        info!("HR registration submitted");
        Ok(response)
    }

    pub fn logout(&self) -> Result<()> {
        self.client.store().clear()?;
        info!("Logged out");
        Ok(())
    }

    pub fn principal(&self) -> Principal {
        self.client.store().principal()
    }

    /// Account id carried in the stored access token.
    pub fn current_user_id(&self) -> Result<i64> {
        current_user_id(self.client.store().as_ref())
    }

    fn store_tokens(&self, response: TokenResponse) -> Result<Role> {
        let role = role_from_access_token(&response.access_token)?;
        self.client.store().set_tokens(
            &Tokens {
                access_token: response.access_token,
                refresh_token: response.refresh_token.unwrap_or_default(),
                token_type: response.token_type,
            },
            role,
        )?;
        Ok(role)
    }
}
