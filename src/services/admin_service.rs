use tracing::info;

use crate::client::{ApiClient, ApiRequest};
use crate::dto::user_dto::{HrIdBody, UserIdBody};
use crate::dto::vacancy_dto::StatusUpdatePayload;
use crate::error::Result;
use crate::models::user::{HrAccount, UserAccount};
use crate::models::vacancy::{ReviewDecision, Vacancy};

/// Moderation calls. Vacancy content is never edited from here; the only
/// vacancy change is a review decision.
#[derive(Clone, Debug)]
pub struct AdminService {
    client: ApiClient,
}

impl AdminService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn users(&self) -> Result<Vec<UserAccount>> {
        self.client.send_json(ApiRequest::get("api/v1/admin/users")).await
    }

    pub async fn delete_user(&self, user_id: i64) -> Result<()> {
        self.client
            .send_unit(ApiRequest::delete(format!("api/v1/admin/users/{}", user_id)))
            .await?;
        info!(user_id, "User deleted");
        Ok(())
    }

    pub async fn toggle_block_user(&self, user_id: i64) -> Result<()> {
        let request = ApiRequest::put(format!("api/v1/admin/toggle-block/user/{}", user_id))
            .json(&UserIdBody { user_id })?;
        self.client.send_unit(request).await?;
        info!(user_id, "User block toggled");
        Ok(())
    }

    pub async fn hrs(&self) -> Result<Vec<HrAccount>> {
        self.client.send_json(ApiRequest::get("api/v1/admin/hrs")).await
    }

    pub async fn pending_hrs(&self) -> Result<Vec<HrAccount>> {
        self.client
            .send_json(ApiRequest::get("api/v1/admin/hrs/pending"))
            .await
    }

    pub async fn delete_hr(&self, hr_id: i64) -> Result<()> {
        self.client
            .send_unit(ApiRequest::delete(format!("api/v1/admin/hrs/{}", hr_id)))
            .await?;
        info!(hr_id, "HR deleted");
        Ok(())
    }

    pub async fn approve_hr(&self, hr_id: i64) -> Result<()> {
        let request = ApiRequest::put(format!("api/v1/admin/approve/hr/{}", hr_id))
            .json(&HrIdBody { hr_id })?;
        self.client.send_unit(request).await?;
        info!(hr_id, "HR approved");
        Ok(())
    }

    pub async fn toggle_block_hr(&self, hr_id: i64) -> Result<()> {
        let request = ApiRequest::put(format!("api/v1/admin/toggle-block/hr/{}", hr_id))
            .json(&HrIdBody { hr_id })?;
        self.client.send_unit(request).await?;
        info!(hr_id, "HR block toggled");
        Ok(())
    }

    pub async fn vacancies_under_review(&self) -> Result<Vec<Vacancy>> {
        self.client
            .send_json(ApiRequest::get("api/v1/admin/vacancies/review"))
            .await
    }

    pub async fn review_vacancy(&self, vacancy_id: i64, decision: ReviewDecision) -> Result<Vacancy> {
        let request = ApiRequest::patch(format!("api/v1/admin/{}/status", vacancy_id))
            .json(&StatusUpdatePayload { status: decision })?;
        let vacancy: Vacancy = self.client.send_json(request).await?;
        info!(vacancy_id, status = %vacancy.status, "Vacancy reviewed");
        Ok(vacancy)
    }
}
