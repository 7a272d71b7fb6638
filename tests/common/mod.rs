#![allow(dead_code)]

//! In-process stand-in for the job-board REST API, served by axum on a
//! random local port.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use jobboard_client::config::Config;
use jobboard_client::session::{MemoryTokenStore, TokenStore};
use jobboard_client::JobBoard;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value as JsonValue};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin-pass";
pub const PROTECTED_PATH: &str = "api/v1/test/protected";
pub const ALWAYS_401_PATH: &str = "api/v1/test/always-401";
pub const BROKEN_PATH: &str = "api/v1/test/broken";

type Reply = (StatusCode, JsonValue);

fn detail(status: StatusCode, message: &str) -> Reply {
    (status, json!({ "detail": message }))
}

#[derive(Debug, Clone)]
struct Account {
    id: i64,
    email: String,
    password: String,
    full_name: String,
    role: &'static str,
    blocked: bool,
    approved: bool,
    company: String,
    contact_info: String,
}

#[derive(Debug, Clone)]
struct StoredApplication {
    id: i64,
    vacancy_id: i64,
    user_id: i64,
    resume_id: i64,
    status: &'static str,
}

#[derive(Debug, Default)]
pub struct Backend {
    accounts: Vec<Account>,
    vacancies: Vec<(i64, JsonValue)>,
    resumes: Vec<(i64, i64, String)>,
    applications: Vec<StoredApplication>,
    access: HashMap<String, i64>,
    refresh: HashMap<String, i64>,
    next_id: i64,
    nonce: u64,
    pub refresh_calls: usize,
    pub fail_refresh: bool,
    pub query_tokens: Vec<Option<String>>,
    pub professions: Vec<(String, String)>,
}

impl Backend {
    fn seeded() -> Self {
        let mut backend = Self {
            next_id: 1,
            professions: vec![("Backend Developer".into(), "Middle".into())],
            ..Default::default()
        };
        let id = backend.next_id();
        backend.accounts.push(Account {
            id,
            email: ADMIN_EMAIL.into(),
            password: ADMIN_PASSWORD.into(),
            full_name: "Admin".into(),
            role: "admin",
            blocked: false,
            approved: true,
            company: String::new(),
            contact_info: String::new(),
        });
        backend
    }

    fn next_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn issue_tokens(&mut self, account_id: i64) -> JsonValue {
        let role = self
            .accounts
            .iter()
            .find(|a| a.id == account_id)
            .map(|a| a.role)
            .unwrap_or("user");
        let mut token = |kind: &str| {
            self.nonce += 1;
            encode(
                &Header::default(),
                &json!({
                    "sub": account_id.to_string(),
                    "type": role,
                    "kind": kind,
                    "exp": 4_102_444_800u64,
                    "nonce": self.nonce,
                }),
                &EncodingKey::from_secret(b"fake-backend-secret"),
            )
            .unwrap()
        };
        let access = token("access");
        let refresh = token("refresh");
        self.access.insert(access.clone(), account_id);
        self.refresh.insert(refresh.clone(), account_id);
        json!({
            "access_token": access,
            "refresh_token": refresh,
            "token_type": "bearer",
        })
    }

    fn account(&self, id: i64) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    fn vacancy(&self, id: i64) -> Option<&(i64, JsonValue)> {
        self.vacancies.iter().find(|(_, v)| v["id"] == id)
    }

    fn vacancy_status(&self, id: i64) -> Option<&str> {
        self.vacancy(id).and_then(|(_, v)| v["status"].as_str())
    }

    fn handle(
        &mut self,
        method: &Method,
        segments: &[&str],
        query: &HashMap<String, String>,
        bearer: Option<&str>,
        content_type: &str,
        body: &[u8],
    ) -> Reply {
        let json_body: JsonValue = serde_json::from_slice(body).unwrap_or(JsonValue::Null);

        if let ["api", "v1", "auth", rest @ ..] = segments {
            return self.auth(method, rest, bearer, &json_body);
        }

        self.query_tokens.push(query.get("token").cloned());
        let Some(caller) = bearer.and_then(|t| self.access.get(t)).copied() else {
            return detail(StatusCode::UNAUTHORIZED, "Could not validate credentials");
        };
        let Some(role) = self.account(caller).map(|a| a.role) else {
            return detail(StatusCode::UNAUTHORIZED, "Could not validate credentials");
        };

        match segments {
            ["api", "v1", "test", "protected"] => (StatusCode::OK, json!({ "ok": true })),
            ["api", "v1", "test", "always-401"] => {
                detail(StatusCode::UNAUTHORIZED, "Not authenticated")
            }
            ["api", "v1", "test", "broken"] => {
                detail(StatusCode::INTERNAL_SERVER_ERROR, "Database is down")
            }
            ["api", "v1", "hr", rest @ ..] if role == "hr" => {
                self.hr(method, rest, query, caller, &json_body)
            }
            ["api", "v1", "admin", rest @ ..] if role == "admin" => {
                self.admin(method, rest, &json_body)
            }
            ["api", "v1", "user", rest @ ..] if role == "user" => {
                self.user(method, rest, query, caller, content_type, body)
            }
            ["api", "v1", "resume", "process"] => (
                StatusCode::OK,
                json!({
                    "first_name": "Ivan",
                    "matching_score": 72.0,
                    "reason": "Good match",
                    "resume_path": "uploads/cv.pdf",
                }),
            ),
            ["api", "v1", "resume", "download", name] => (
                StatusCode::OK,
                JsonValue::String(format!("contents of {}", name)),
            ),
            ["api", "v1", ..] => detail(StatusCode::FORBIDDEN, "Not enough permissions"),
            _ => detail(StatusCode::NOT_FOUND, "Not Found"),
        }
    }

    fn auth(
        &mut self,
        method: &Method,
        rest: &[&str],
        bearer: Option<&str>,
        body: &JsonValue,
    ) -> Reply {
        let field = |name: &str| body[name].as_str().unwrap_or_default().to_string();
        match (method, rest) {
            (&Method::POST, ["login"]) => {
                let found = self
                    .accounts
                    .iter()
                    .find(|a| a.email == field("email") && a.password == field("password"))
                    .cloned();
                match found {
                    None => detail(StatusCode::UNAUTHORIZED, "Incorrect email or password"),
                    Some(a) if a.blocked => detail(StatusCode::FORBIDDEN, "Account is blocked"),
                    Some(a) if !a.approved => {
                        detail(StatusCode::FORBIDDEN, "HR account is not approved yet")
                    }
                    Some(a) => (StatusCode::OK, self.issue_tokens(a.id)),
                }
            }
            (&Method::POST, ["register", kind]) => {
                if self.accounts.iter().any(|a| a.email == field("email")) {
                    return detail(StatusCode::BAD_REQUEST, "Email already registered");
                }
                let id = self.next_id();
                let hr = *kind == "hr";
                self.accounts.push(Account {
                    id,
                    email: field("email"),
                    password: field("password"),
                    full_name: field("full_name"),
                    role: if hr { "hr" } else { "user" },
                    blocked: false,
                    approved: !hr,
                    company: field("company"),
                    contact_info: field("contact_info"),
                });
                if hr {
                    (
                        StatusCode::OK,
                        json!({ "message": "Заявка отправлена на рассмотрение" }),
                    )
                } else {
                    (StatusCode::OK, self.issue_tokens(id))
                }
            }
            (&Method::POST, ["refresh"]) => {
                self.refresh_calls += 1;
                let presented = field("refresh_token");
                let valid = !self.fail_refresh
                    && bearer == Some(presented.as_str())
                    && self.refresh.contains_key(&presented);
                match self.refresh.remove(&presented).filter(|_| valid) {
                    Some(account_id) => (StatusCode::OK, self.issue_tokens(account_id)),
                    None => detail(StatusCode::UNAUTHORIZED, "Invalid refresh token"),
                }
            }
            _ => detail(StatusCode::NOT_FOUND, "Not Found"),
        }
    }

    fn hr(
        &mut self,
        method: &Method,
        rest: &[&str],
        query: &HashMap<String, String>,
        caller: i64,
        body: &JsonValue,
    ) -> Reply {
        let own = |v: &&(i64, JsonValue)| v.0 == caller;
        match (method, rest) {
            (&Method::GET, [""]) => {
                let list: Vec<_> = self.vacancies.iter().filter(own).map(|v| v.1.clone()).collect();
                (StatusCode::OK, json!(list))
            }
            (&Method::POST, [""]) => {
                let id = self.next_id();
                let mut vacancy = body.clone();
                vacancy["id"] = json!(id);
                vacancy["status"] = json!("Under review");
                self.vacancies.push((caller, vacancy.clone()));
                (StatusCode::OK, vacancy)
            }
            (&Method::GET, ["me"]) => match self.account(caller) {
                Some(a) => (
                    StatusCode::OK,
                    json!({
                        "email": a.email,
                        "full_name": a.full_name,
                        "contact_info": a.contact_info,
                        "company": a.company,
                    }),
                ),
                None => detail(StatusCode::NOT_FOUND, "HR not found"),
            },
            (&Method::PUT, ["me"]) => {
                let body = body.clone();
                self.update_account(caller, |a| {
                    if let Some(name) = body["full_name"].as_str() {
                        a.full_name = name.to_string();
                    }
                    if let Some(company) = body["company"].as_str() {
                        a.company = company.to_string();
                    }
                });
                self.hr(&Method::GET, &["me"], query, caller, &JsonValue::Null)
            }
            (&Method::DELETE, ["me"]) => {
                self.accounts.retain(|a| a.id != caller);
                (StatusCode::OK, json!({ "message": "deleted" }))
            }
            (&Method::POST, ["classify"]) => {
                if query.get("description").map_or(true, |d| d.trim().is_empty()) {
                    return detail(StatusCode::UNPROCESSABLE_ENTITY, "description is required");
                }
                let professions: Vec<_> = self
                    .professions
                    .iter()
                    .map(|(p, g)| json!({ "profession": p, "grade": g }))
                    .collect();
                (StatusCode::OK, json!({ "professions": professions }))
            }
            (&Method::GET, ["vacancy", id]) => {
                let vacancy_id: i64 = id.parse().unwrap_or_default();
                let list: Vec<_> = self
                    .applications
                    .iter()
                    .filter(|a| a.vacancy_id == vacancy_id)
                    .map(|a| {
                        let email = self.account(a.user_id).map(|u| u.email.clone());
                        json!({
                            "application_id": a.id,
                            "first_name": "Ivan",
                            "last_name": "Petrov",
                            "email": email,
                            "profession": "Backend Developer",
                            "matching_score": 87.5,
                            "status": a.status,
                            "summary": "Five years of Rust",
                        })
                    })
                    .collect();
                (StatusCode::OK, json!(list))
            }
            (&Method::POST, ["applications", id, action]) => {
                let application_id: i64 = id.parse().unwrap_or_default();
                let status = match *action {
                    "accept" => "accepted",
                    "reject" => "rejected",
                    _ => return detail(StatusCode::NOT_FOUND, "Not Found"),
                };
                match self.applications.iter_mut().find(|a| a.id == application_id) {
                    Some(application) => {
                        application.status = status;
                        (StatusCode::OK, json!({ "message": "ok" }))
                    }
                    None => detail(StatusCode::NOT_FOUND, "Application not found"),
                }
            }
            (method, [id]) => {
                let Ok(vacancy_id) = id.parse::<i64>() else {
                    return detail(StatusCode::NOT_FOUND, "Not Found");
                };
                let Some(index) = self
                    .vacancies
                    .iter()
                    .position(|(owner, v)| *owner == caller && v["id"] == vacancy_id)
                else {
                    return detail(StatusCode::NOT_FOUND, "Vacancy not found");
                };
                match *method {
                    Method::GET => (StatusCode::OK, self.vacancies[index].1.clone()),
                    Method::PUT => {
                        let mut vacancy = body.clone();
                        vacancy["id"] = json!(vacancy_id);
                        self.vacancies[index].1 = vacancy.clone();
                        (StatusCode::OK, vacancy)
                    }
                    Method::DELETE => {
                        self.vacancies.remove(index);
                        (StatusCode::OK, json!({ "message": "deleted" }))
                    }
                    _ => detail(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed"),
                }
            }
            _ => detail(StatusCode::NOT_FOUND, "Not Found"),
        }
    }

    fn admin(&mut self, method: &Method, rest: &[&str], body: &JsonValue) -> Reply {
        let hr_json = |a: &Account| {
            json!({
                "id": a.id,
                "email": a.email,
                "blocked": a.blocked,
                "approved": a.approved,
                "contact_info": a.contact_info,
                "company": a.company,
            })
        };
        match (method, rest) {
            (&Method::GET, ["users"]) => {
                let list: Vec<_> = self
                    .accounts
                    .iter()
                    .filter(|a| a.role == "user")
                    .map(|a| json!({ "id": a.id, "email": a.email, "blocked": a.blocked }))
                    .collect();
                (StatusCode::OK, json!(list))
            }
            (&Method::GET, ["hrs"]) => {
                let list: Vec<_> = self
                    .accounts
                    .iter()
                    .filter(|a| a.role == "hr")
                    .map(hr_json)
                    .collect();
                (StatusCode::OK, json!(list))
            }
            (&Method::GET, ["hrs", "pending"]) => {
                let list: Vec<_> = self
                    .accounts
                    .iter()
                    .filter(|a| a.role == "hr" && !a.approved)
                    .map(hr_json)
                    .collect();
                (StatusCode::OK, json!(list))
            }
            (&Method::PUT, ["approve", "hr", _]) => {
                let id = body["hrId"].as_i64().unwrap_or_default();
                self.update_account(id, |a| a.approved = true)
            }
            (&Method::PUT, ["toggle-block", kind, _]) => {
                let key = if *kind == "hr" { "hrId" } else { "userId" };
                let id = body[key].as_i64().unwrap_or_default();
                self.update_account(id, |a| a.blocked = !a.blocked)
            }
            (&Method::DELETE, ["users" | "hrs", id]) => {
                let id: i64 = id.parse().unwrap_or_default();
                self.accounts.retain(|a| a.id != id);
                (StatusCode::OK, json!({ "message": "deleted" }))
            }
            (&Method::GET, ["vacancies", "review"]) => {
                let list: Vec<_> = self
                    .vacancies
                    .iter()
                    .filter(|(_, v)| v["status"] == "Under review")
                    .map(|(_, v)| v.clone())
                    .collect();
                (StatusCode::OK, json!(list))
            }
            (&Method::PATCH, [id, "status"]) => {
                let vacancy_id: i64 = id.parse().unwrap_or_default();
                let status = body["status"].clone();
                if status != "Accepted" && status != "Rejected" {
                    return detail(StatusCode::UNPROCESSABLE_ENTITY, "Invalid status");
                }
                match self.vacancies.iter_mut().find(|(_, v)| v["id"] == vacancy_id) {
                    Some((_, vacancy)) => {
                        vacancy["status"] = status;
                        (StatusCode::OK, vacancy.clone())
                    }
                    None => detail(StatusCode::NOT_FOUND, "Vacancy not found"),
                }
            }
            _ => detail(StatusCode::NOT_FOUND, "Not Found"),
        }
    }

    fn update_account(&mut self, id: i64, change: impl FnOnce(&mut Account)) -> Reply {
        match self.accounts.iter_mut().find(|a| a.id == id) {
            Some(account) => {
                change(account);
                (StatusCode::OK, json!({ "message": "ok" }))
            }
            None => detail(StatusCode::NOT_FOUND, "Account not found"),
        }
    }

    fn public_vacancy(vacancy: &JsonValue) -> JsonValue {
        let mut public = vacancy.clone();
        if let Some(fields) = public.as_object_mut() {
            fields.remove("status");
        }
        public
    }

    fn user(
        &mut self,
        method: &Method,
        rest: &[&str],
        query: &HashMap<String, String>,
        caller: i64,
        content_type: &str,
        body: &[u8],
    ) -> Reply {
        match (method, rest) {
            (&Method::GET, ["profile"]) => match self.account(caller) {
                Some(a) => (
                    StatusCode::OK,
                    json!({ "id": a.id, "email": a.email, "full_name": a.full_name }),
                ),
                None => detail(StatusCode::NOT_FOUND, "User not found"),
            },
            (&Method::GET, ["accepted"]) => {
                let list: Vec<_> = self
                    .vacancies
                    .iter()
                    .filter(|(_, v)| v["status"] == "Accepted")
                    .map(|(_, v)| Self::public_vacancy(v))
                    .collect();
                (StatusCode::OK, json!(list))
            }
            (&Method::GET, ["accepted", id]) => {
                let vacancy_id: i64 = id.parse().unwrap_or_default();
                match self.vacancy(vacancy_id) {
                    Some((_, v)) if v["status"] == "Accepted" => {
                        (StatusCode::OK, Self::public_vacancy(v))
                    }
                    _ => detail(StatusCode::NOT_FOUND, "Vacancy not found"),
                }
            }
            (&Method::POST, [""]) => {
                let text = String::from_utf8_lossy(body);
                if !content_type.starts_with("multipart/form-data")
                    || !text.contains("name=\"file\"")
                {
                    return detail(StatusCode::UNPROCESSABLE_ENTITY, "file is required");
                }
                let file_name = text
                    .split("filename=\"")
                    .nth(1)
                    .and_then(|rest| rest.split('"').next())
                    .unwrap_or_default()
                    .to_string();
                let id = self.next_id();
                self.resumes.push((id, caller, file_name));
                (
                    StatusCode::OK,
                    json!({ "resume_id": id, "message": "Resume uploaded" }),
                )
            }
            (&Method::GET, [""]) => {
                let list: Vec<_> = self
                    .resumes
                    .iter()
                    .filter(|(_, owner, _)| *owner == caller)
                    .map(|(id, _, name)| json!({ "id": id, "resume_link": format!("uploads/{}", name) }))
                    .collect();
                (StatusCode::OK, json!(list))
            }
            (&Method::POST, ["applications", ""]) => {
                let number = |key: &str| {
                    query
                        .get(key)
                        .and_then(|v| v.parse::<i64>().ok())
                        .unwrap_or_default()
                };
                let (vacancy_id, resume_id) = (number("vacancy_id"), number("resume_id"));
                if self.vacancy_status(vacancy_id) != Some("Accepted") {
                    return detail(StatusCode::NOT_FOUND, "Vacancy not found");
                }
                if self
                    .applications
                    .iter()
                    .any(|a| a.vacancy_id == vacancy_id && a.user_id == caller)
                {
                    return detail(
                        StatusCode::BAD_REQUEST,
                        "Вы уже откликнулись на эту вакансию",
                    );
                }
                let id = self.next_id();
                self.applications.push(StoredApplication {
                    id,
                    vacancy_id,
                    user_id: caller,
                    resume_id,
                    status: "pending",
                });
                (
                    StatusCode::OK,
                    json!({ "message": "Application created", "application_id": id, "matching_score": 87.5 }),
                )
            }
            (&Method::GET, ["applications", ""]) => {
                let list: Vec<_> = self
                    .applications
                    .iter()
                    .filter(|a| a.user_id == caller)
                    .map(|a| {
                        let title = self
                            .vacancy(a.vacancy_id)
                            .and_then(|(_, v)| v["title"].as_str())
                            .unwrap_or_default();
                        json!({ "status": a.status, "vacancy_title": title, "matching_score": 87.5 })
                    })
                    .collect();
                (StatusCode::OK, json!(list))
            }
            (&Method::GET, ["user", id, "vacancies", tail @ ..]) => {
                if id.parse::<i64>().ok() != Some(caller) {
                    return detail(StatusCode::FORBIDDEN, "Not enough permissions");
                }
                let ids: Vec<i64> = self
                    .applications
                    .iter()
                    .filter(|a| a.user_id == caller)
                    .map(|a| a.vacancy_id)
                    .collect();
                match tail {
                    [] => (StatusCode::OK, json!(ids)),
                    ["details"] => {
                        let list: Vec<_> = ids
                            .iter()
                            .filter_map(|id| self.vacancy(*id))
                            .map(|(_, v)| Self::public_vacancy(v))
                            .collect();
                        (StatusCode::OK, json!(list))
                    }
                    _ => detail(StatusCode::NOT_FOUND, "Not Found"),
                }
            }
            (&Method::GET, [id]) => {
                let resume_id: i64 = id.parse().unwrap_or_default();
                match self
                    .resumes
                    .iter()
                    .find(|(rid, owner, _)| *rid == resume_id && *owner == caller)
                {
                    Some((rid, _, name)) => (
                        StatusCode::OK,
                        json!({ "id": rid, "resume_link": format!("uploads/{}", name) }),
                    ),
                    None => detail(StatusCode::NOT_FOUND, "Resume not found"),
                }
            }
            _ => detail(StatusCode::NOT_FOUND, "Not Found"),
        }
    }
}

type Shared = Arc<Mutex<Backend>>;

async fn dispatch(
    State(backend): State<Shared>,
    method: Method,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let segments: Vec<&str> = uri.path().trim_start_matches('/').split('/').collect();

    let (status, payload) = backend.lock().unwrap().handle(
        &method,
        &segments,
        &query,
        bearer,
        content_type,
        &body,
    );
    if let (true, JsonValue::String(raw)) = (uri.path().contains("/resume/download/"), &payload) {
        return (status, raw.clone()).into_response();
    }
    (status, Json(payload)).into_response()
}

pub struct FakeBackend {
    pub base_url: String,
    state: Shared,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(Backend::seeded()));
        let app = Router::new().fallback(dispatch).with_state(Arc::clone(&state));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn config(&self) -> Config {
        Config::new(self.base_url.clone())
    }

    /// A client with its own empty session.
    pub fn board(&self) -> (JobBoard, Arc<MemoryTokenStore>) {
        let store = Arc::new(MemoryTokenStore::new());
        let board = JobBoard::new(&self.config(), Arc::clone(&store) as Arc<dyn TokenStore>)
            .unwrap();
        (board, store)
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut Backend) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }

    /// Every access token issued so far stops working; refresh tokens keep
    /// working.
    pub fn expire_access_tokens(&self) {
        self.with(|b| b.access.clear());
    }

    pub fn refresh_calls(&self) -> usize {
        self.with(|b| b.refresh_calls)
    }
}
