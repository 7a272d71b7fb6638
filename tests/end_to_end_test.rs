mod common;

use std::sync::Arc;

use common::{FakeBackend, ADMIN_EMAIL, ADMIN_PASSWORD};
use jobboard_client::dto::auth_dto::{LoginPayload, RegisterHrPayload, RegisterUserPayload};
use jobboard_client::forms::{VacancyWizard, WizardStep};
use jobboard_client::models::{ApplicationStatus, ReviewDecision, Role, VacancyStatus};
use jobboard_client::routes::{HrPage, Navigation, Page, UserPage};
use jobboard_client::services::ResumeFile;
use jobboard_client::session::{FileTokenStore, TokenStore};
use jobboard_client::JobBoard;
use rust_decimal::Decimal;

#[tokio::test]
async fn vacancy_goes_from_hr_through_review_to_accepted_application() {
    let backend = FakeBackend::start().await;
    let (admin, _) = backend.board();
    let (hr, _) = backend.board();
    let (user, _) = backend.board();

    // HR signs up and has to wait for approval
    let hr_signup = RegisterHrPayload {
        email: "hr@example.com".into(),
        password: "hr-secret".into(),
        full_name: "Anna Smirnova".into(),
        contact_info: "77001234567".into(),
        company: "Acme".into(),
    };
    hr.auth.register_hr(&hr_signup).await.unwrap();
    let hr_login = LoginPayload {
        email: hr_signup.email.clone(),
        password: hr_signup.password.clone(),
    };
    let err = hr.auth.login(&hr_login).await.unwrap_err();
    assert_eq!(err.user_message(), "HR account is not approved yet");

    let role = admin
        .auth
        .login(&LoginPayload {
            email: ADMIN_EMAIL.into(),
            password: ADMIN_PASSWORD.into(),
        })
        .await
        .unwrap();
    assert_eq!(role, Role::Admin);
    let pending = admin.admin.pending_hrs().await.unwrap();
    assert_eq!(pending.len(), 1);
    admin.admin.approve_hr(pending[0].id).await.unwrap();
    assert!(admin.admin.pending_hrs().await.unwrap().is_empty());

    assert_eq!(hr.auth.login(&hr_login).await.unwrap(), Role::Hr);
    assert_eq!(
        hr.router.navigate("/hr/create-vacancy"),
        Navigation::Render(Page::Hr(HrPage::CreateVacancy))
    );

    // two-step creation
    let mut wizard = VacancyWizard::new();
    wizard
        .set_description("Ищем Rust разработчика в платёжную команду")
        .unwrap();
    assert!(wizard.classify(&hr.hr).await.unwrap());
    assert_eq!(wizard.step(), WizardStep::ChoosingProfession);
    wizard.select(0).unwrap();
    {
        let form = wizard.form_mut();
        form.location = "Almaty".into();
        form.salary_min.set("150 000");
        form.salary_max.set("300000");
        form.skills.type_text("Rust,");
        form.skills.type_text("PostgreSQL");
        form.skills.press_enter();
        form.telegram = "  ".into();
    }
    let created = hr.hr.create_vacancy(wizard.submit().unwrap()).await.unwrap();
    assert_eq!(created.title, "Backend Developer");
    assert_eq!(created.position, "Middle");
    assert_eq!(created.status, VacancyStatus::UnderReview);
    assert_eq!(created.salary_min, Some(Decimal::from(150_000)));
    assert_eq!(created.skill_list(), vec!["Rust", "PostgreSQL"]);
    assert_eq!(created.telegram, None);

    // not visible to applicants before review
    assert_eq!(user.auth.register_user(&RegisterUserPayload {
        email: "ivan@example.com".into(),
        password: "user-secret".into(),
        full_name: "Ivan Petrov".into(),
    })
    .await
    .unwrap(), Role::User);
    assert!(user.user.accepted_vacancies().await.unwrap().is_empty());

    let review = admin.admin.vacancies_under_review().await.unwrap();
    assert_eq!(review.iter().map(|v| v.id).collect::<Vec<_>>(), vec![created.id]);
    let accepted = admin
        .admin
        .review_vacancy(created.id, ReviewDecision::Accepted)
        .await
        .unwrap();
    assert_eq!(accepted.status, VacancyStatus::Accepted);

    let listed = user.user.accepted_vacancies().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title.as_deref(), Some("Backend Developer"));
    assert_eq!(
        user.router.navigate(&format!("/user/apply/{}", created.id)),
        Navigation::Render(Page::User(UserPage::Apply {
            vacancy_id: created.id
        }))
    );

    let application = user
        .user
        .apply_with_resume(created.id, ResumeFile::new("cv.pdf", b"%PDF-1.4".to_vec()))
        .await
        .unwrap();
    assert_eq!(application.matching_score, Some(87.5));
    let duplicate = user
        .user
        .apply(created.id, 1)
        .await
        .unwrap_err();
    assert_eq!(duplicate.user_message(), "Вы уже откликнулись на эту вакансию");

    let mine = user.user.applications().await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].status, ApplicationStatus::Pending);
    assert_eq!(user.user.applied_vacancy_ids().await.unwrap(), vec![created.id]);

    let candidates = hr.hr.candidates(created.id).await.unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].application_id, application.application_id);
    assert_eq!(candidates[0].full_name(), "Ivan Petrov");
    hr.hr
        .accept_candidate(application.application_id)
        .await
        .unwrap();

    let mine = user.user.applications().await.unwrap();
    assert_eq!(mine[0].status, ApplicationStatus::Accepted);
    assert_eq!(mine[0].vacancy_title, "Backend Developer");
}

#[tokio::test]
async fn roles_cannot_reach_each_others_endpoints_or_pages() {
    let backend = FakeBackend::start().await;
    let (user, _) = backend.board();
    user.auth
        .register_user(&RegisterUserPayload {
            email: "petr@example.com".into(),
            password: "user-secret".into(),
            full_name: "Petr Ivanov".into(),
        })
        .await
        .unwrap();

    assert_eq!(user.router.navigate("/hr/dashboard"), Navigation::Redirect("/".into()));
    assert_eq!(user.router.open("/admin/users").1, Page::Landing);

    let err = user.admin.users().await.unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(403));
    assert!(!err.is_unauthorized());
    assert_eq!(backend.refresh_calls(), 0);
}

#[tokio::test]
async fn session_file_survives_a_new_client() {
    let backend = FakeBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let session_file = dir.path().join("session.json");

    let first = JobBoard::new(
        &backend.config(),
        Arc::new(FileTokenStore::new(&session_file)),
    )
    .unwrap();
    first
        .auth
        .login(&LoginPayload {
            email: ADMIN_EMAIL.into(),
            password: ADMIN_PASSWORD.into(),
        })
        .await
        .unwrap();

    let store = Arc::new(FileTokenStore::new(&session_file));
    let second = JobBoard::new(&backend.config(), Arc::clone(&store) as Arc<dyn TokenStore>)
        .unwrap();
    assert_eq!(store.role(), Some(Role::Admin));
    assert_eq!(second.router.home(), "/admin");
    assert!(second.admin.users().await.unwrap().is_empty());

    second.auth.logout().unwrap();
    assert!(!session_file.exists());
}

#[tokio::test]
async fn processed_resume_is_scored_and_downloadable() {
    let backend = FakeBackend::start().await;
    let (user, _) = backend.board();
    user.auth
        .register_user(&RegisterUserPayload {
            email: "olga@example.com".into(),
            password: "user-secret".into(),
            full_name: "Olga Sidorova".into(),
        })
        .await
        .unwrap();

    let processed = user
        .resume
        .process(1, ResumeFile::new("cv.pdf", b"%PDF-1.4".to_vec()))
        .await
        .unwrap();
    assert_eq!(processed.matching_score, Some(72.0));
    let path = processed.resume_path.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let saved = user.resume.save_download(&path, dir.path()).await.unwrap();
    assert_eq!(saved, dir.path().join("cv.pdf"));
    assert_eq!(std::fs::read_to_string(&saved).unwrap(), "contents of cv.pdf");
}
