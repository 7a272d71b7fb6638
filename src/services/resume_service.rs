use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use crate::client::{ApiClient, ApiRequest, FilePart};
use crate::error::{Error, Result};
use crate::models::resume::ProcessedResume;
use crate::utils::path::file_name_from_path;
use crate::utils::InFlight;

/// A résumé file picked for upload.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub file_name: String,
    pub mime: Option<String>,
    pub bytes: Bytes,
}

fn mime_for(file_name: &str) -> Option<&'static str> {
    let extension = Path::new(file_name)
        .extension()?
        .to_str()?
        .to_ascii_lowercase();
    match extension.as_str() {
        "pdf" => Some("application/pdf"),
        "doc" => Some("application/msword"),
        "docx" => Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        "txt" => Some("text/plain"),
        _ => None,
    }
}

impl ResumeFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let file_name = file_name.into();
        Self {
            mime: mime_for(&file_name).map(str::to_string),
            file_name,
            bytes: bytes.into(),
        }
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::invalid("file", "Пожалуйста, выберите файл резюме"))?
            .to_string();
        let bytes = fs::read(path).await?;
        Ok(Self::new(file_name, bytes))
    }

    pub(crate) fn into_part(self) -> FilePart {
        FilePart {
            field: "file",
            file_name: self.file_name,
            mime: self.mime,
            bytes: self.bytes,
        }
    }
}

/// Résumé analysis against a vacancy and download of the stored file.
#[derive(Clone, Debug)]
pub struct ResumeService {
    client: ApiClient,
    processing: InFlight,
    downloading: InFlight,
}

impl ResumeService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            processing: InFlight::new("process"),
            downloading: InFlight::new("download"),
        }
    }

    pub async fn process(&self, vacancy_id: i64, file: ResumeFile) -> Result<ProcessedResume> {
        let _guard = self.processing.begin()?;
        let request = ApiRequest::post("api/v1/resume/process")
            .query("vacancy_id", vacancy_id)
            .file(file.into_part());
        let processed: ProcessedResume = self.client.send_json(request).await?;
        info!(vacancy_id, matching_score = ?processed.matching_score, "Resume processed");
        Ok(processed)
    }

    /// Fetches a stored résumé. Returns the file name (the last segment of
    /// `resume_path`) together with the content.
    pub async fn download(&self, resume_path: &str) -> Result<(String, Bytes)> {
        let _guard = self.downloading.begin()?;
        let file_name = file_name_from_path(resume_path)
            .filter(|name| !name.contains(['?', '#']))
            .ok_or_else(|| Error::invalid("resume_path", "Некорректный путь к файлу резюме"))?
            .to_string();
        let bytes = self
            .client
            .send_bytes(ApiRequest::get(format!("api/v1/resume/download/{}", file_name)))
            .await?;
        Ok((file_name, bytes))
    }

    /// Downloads into `dir` under the server's file name.
    pub async fn save_download(&self, resume_path: &str, dir: &Path) -> Result<PathBuf> {
        let (file_name, bytes) = self.download(resume_path).await?;
        fs::create_dir_all(dir).await?;
        let target = dir.join(&file_name);
        fs::write(&target, &bytes).await?;
        info!(path = %target.display(), size = bytes.len(), "Resume saved");
        Ok(target)
    }
}
