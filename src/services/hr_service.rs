use async_trait::async_trait;
use tracing::info;

use crate::client::{ApiClient, ApiRequest};
use crate::dto::vacancy_dto::{ClassifyResponse, HrProfileUpdate, VacancyPayload};
use crate::error::Result;
use crate::forms::wizard::ProfessionClassifier;
use crate::models::application::Candidate;
use crate::models::user::HrProfile;
use crate::models::vacancy::{ProfessionSuggestion, Vacancy};

#[derive(Clone, Debug)]
pub struct HrService {
    client: ApiClient,
}

impl HrService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn profile(&self) -> Result<HrProfile> {
        self.client.send_json(ApiRequest::get("api/v1/hr/me")).await
    }

    pub async fn update_profile(&self, update: &HrProfileUpdate) -> Result<HrProfile> {
        let request = ApiRequest::put("api/v1/hr/me").json(update)?;
        self.client.send_json(request).await
    }

    /// Deletes the account and drops the local session with it.
    pub async fn delete_profile(&self) -> Result<()> {
        self.client.send_unit(ApiRequest::delete("api/v1/hr/me")).await?;
        self.client.store().clear()?;
        info!("HR account deleted");
        Ok(())
    }

    pub async fn vacancies(&self) -> Result<Vec<Vacancy>> {
        self.client.send_json(ApiRequest::get("api/v1/hr/")).await
    }

    pub async fn vacancy(&self, vacancy_id: i64) -> Result<Vacancy> {
        self.client
            .send_json(ApiRequest::get(format!("api/v1/hr/{}", vacancy_id)))
            .await
    }

    /// New vacancies are always submitted for review.
    pub async fn create_vacancy(&self, payload: VacancyPayload) -> Result<Vacancy> {
        let request = ApiRequest::post("api/v1/hr/").json(&payload.for_creation())?;
        let vacancy: Vacancy = self.client.send_json(request).await?;
        info!(vacancy_id = vacancy.id, "Vacancy created");
        Ok(vacancy)
    }

    /// A rejected vacancy goes back into review when edited.
    pub async fn update_vacancy(&self, vacancy_id: i64, payload: VacancyPayload) -> Result<Vacancy> {
        let request =
            ApiRequest::put(format!("api/v1/hr/{}", vacancy_id)).json(&payload.for_update())?;
        let vacancy: Vacancy = self.client.send_json(request).await?;
        info!(vacancy_id, status = %vacancy.status, "Vacancy updated");
        Ok(vacancy)
    }

    pub async fn delete_vacancy(&self, vacancy_id: i64) -> Result<()> {
        self.client
            .send_unit(ApiRequest::delete(format!("api/v1/hr/{}", vacancy_id)))
            .await?;
        info!(vacancy_id, "Vacancy deleted");
        Ok(())
    }

    pub async fn candidates(&self, vacancy_id: i64) -> Result<Vec<Candidate>> {
        self.client
            .send_json(ApiRequest::get(format!("api/v1/hr/vacancy/{}", vacancy_id)))
            .await
    }

    pub async fn accept_candidate(&self, application_id: i64) -> Result<()> {
        self.decide(application_id, "accept").await
    }

    pub async fn reject_candidate(&self, application_id: i64) -> Result<()> {
        self.decide(application_id, "reject").await
    }

    async fn decide(&self, application_id: i64, action: &str) -> Result<()> {
        let path = format!("api/v1/hr/applications/{}/{}", application_id, action);
        self.client.send_unit(ApiRequest::post(path)).await?;
        info!(application_id, action, "Candidate decision sent");
        Ok(())
    }

    pub async fn classify(&self, description: &str) -> Result<Vec<ProfessionSuggestion>> {
        let request = ApiRequest::post("api/v1/hr/classify").query("description", description);
        let response: ClassifyResponse = self.client.send_json(request).await?;
        Ok(response.professions)
    }
}

#[async_trait]
impl ProfessionClassifier for HrService {
    async fn classify(&self, description: &str) -> Result<Vec<ProfessionSuggestion>> {
        HrService::classify(self, description).await
    }
}
