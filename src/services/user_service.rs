use tracing::info;

use super::resume_service::ResumeFile;
use crate::client::{ApiClient, ApiRequest};
use crate::dto::user_dto::CreateApplicationResponse;
use crate::error::Result;
use crate::models::application::UserApplication;
use crate::models::resume::{Resume, ResumeUpload};
use crate::models::user::UserProfile;
use crate::models::vacancy::PublicVacancy;
use crate::utils::token::current_user_id;
use crate::utils::InFlight;

/// Applicant-side calls. Upload and apply refuse to start while the previous
/// one is still running.
#[derive(Clone, Debug)]
pub struct UserService {
    client: ApiClient,
    uploading: InFlight,
    applying: InFlight,
}

impl UserService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            uploading: InFlight::new("upload"),
            applying: InFlight::new("apply"),
        }
    }

    pub async fn profile(&self) -> Result<UserProfile> {
        self.client.send_json(ApiRequest::get("api/v1/user/profile")).await
    }

    /// Vacancies an administrator has accepted.
    pub async fn accepted_vacancies(&self) -> Result<Vec<PublicVacancy>> {
        self.client.send_json(ApiRequest::get("api/v1/user/accepted")).await
    }

    pub async fn accepted_vacancy(&self, vacancy_id: i64) -> Result<PublicVacancy> {
        self.client
            .send_json(ApiRequest::get(format!("api/v1/user/accepted/{}", vacancy_id)))
            .await
    }

    pub async fn upload_resume(&self, file: ResumeFile) -> Result<ResumeUpload> {
        let _guard = self.uploading.begin()?;
        self.send_resume(file).await
    }

    pub async fn resumes(&self) -> Result<Vec<Resume>> {
        self.client.send_json(ApiRequest::get("api/v1/user/")).await
    }

    pub async fn resume(&self, resume_id: i64) -> Result<Resume> {
        self.client
            .send_json(ApiRequest::get(format!("api/v1/user/{}", resume_id)))
            .await
    }

    pub async fn apply(&self, vacancy_id: i64, resume_id: i64) -> Result<CreateApplicationResponse> {
        let _guard = self.applying.begin()?;
        self.send_application(vacancy_id, resume_id).await
    }

    /// Uploads the résumé and applies with it in one go.
    pub async fn apply_with_resume(
        &self,
        vacancy_id: i64,
        file: ResumeFile,
    ) -> Result<CreateApplicationResponse> {
        let _apply = self.applying.begin()?;
        let upload = {
            let _upload = self.uploading.begin()?;
            self.send_resume(file).await?
        };
        self.send_application(vacancy_id, upload.resume_id).await
    }

    pub async fn applications(&self) -> Result<Vec<UserApplication>> {
        self.client
            .send_json(ApiRequest::get("api/v1/user/applications/"))
            .await
    }

    /// Ids of the vacancies the current user has applied to.
    pub async fn applied_vacancy_ids(&self) -> Result<Vec<i64>> {
        let user_id = current_user_id(self.client.store().as_ref())?;
        self.client
            .send_json(ApiRequest::get(format!("api/v1/user/user/{}/vacancies", user_id)))
            .await
    }

    pub async fn applied_vacancies(&self) -> Result<Vec<PublicVacancy>> {
        let user_id = current_user_id(self.client.store().as_ref())?;
        self.client
            .send_json(ApiRequest::get(format!(
                "api/v1/user/user/{}/vacancies/details",
                user_id
            )))
            .await
    }

    async fn send_resume(&self, file: ResumeFile) -> Result<ResumeUpload> {
        let file_name = file.file_name.clone();
        let request = ApiRequest::post("api/v1/user/").file(file.into_part());
        let upload: ResumeUpload = self.client.send_json(request).await?;
        info!(resume_id = upload.resume_id, file = %file_name, "Resume uploaded");
        Ok(upload)
    }

    async fn send_application(
        &self,
        vacancy_id: i64,
        resume_id: i64,
    ) -> Result<CreateApplicationResponse> {
        let request = ApiRequest::post("api/v1/user/applications/")
            .query("vacancy_id", vacancy_id)
            .query("resume_id", resume_id);
        let created: CreateApplicationResponse = self.client.send_json(request).await?;
        info!(
            vacancy_id,
            application_id = created.application_id,
            "Application created"
        );
        Ok(created)
    }
}
