//! `jobboard` command line: a plain-text front end over [`JobBoard`].
//!
//! Every section command first asks the router whether the page it stands
//! for may be opened by the current session.

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::dto::auth_dto::{LoginPayload, RegisterHrPayload, RegisterUserPayload};
use crate::dto::vacancy_dto::HrProfileUpdate;
use crate::error::{Error, Result};
use crate::forms::{group_thousands, SkillsInput, VacancyForm, VacancyWizard};
use crate::models::vacancy::{EmploymentType, ExperienceTime, JobFormat, ReviewDecision};
use crate::models::{Candidate, HrAccount, PublicVacancy, Vacancy};
use crate::routes::{AdminPage, HrPage, Navigation, Page, UserPage, LOGIN_PATH};
use crate::services::ResumeFile;
use crate::utils::validation::normalize_phone;
use crate::JobBoard;

/// jobboard - job board client
#[derive(Parser, Debug)]
#[command(name = "jobboard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Download directory for résumés (overrides DOWNLOAD_DIR)
    #[arg(long)]
    pub download_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and store the session
    Login {
        email: String,
        password: String,
    },

    /// Create an account
    #[command(subcommand)]
    Signup(SignupCommand),

    /// Forget the stored session
    Logout,

    /// Show who is logged in
    Whoami,

    /// Show which page a path opens for the current session
    Open { path: String },

    /// Recruiter pages
    #[command(subcommand)]
    Hr(HrCommand),

    /// Administrator pages
    #[command(subcommand)]
    Admin(AdminCommand),

    /// Applicant pages
    #[command(subcommand)]
    User(UserCommand),
}

#[derive(Subcommand, Debug)]
pub enum SignupCommand {
    /// Applicant account; logs in immediately
    User {
        email: String,
        password: String,
        full_name: String,
    },
    /// Recruiter account; usable once an administrator approves it
    Hr {
        email: String,
        password: String,
        full_name: String,
        /// Phone number, digits only
        phone: String,
        company: String,
    },
}

/// Structured vacancy fields. Unset fields keep their current value.
#[derive(Args, Debug, Default)]
pub struct VacancyFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub position: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub salary_min: Option<String>,
    #[arg(long)]
    pub salary_max: Option<String>,
    /// Full-time, Part-time or Internship
    #[arg(long)]
    pub employment_type: Option<EmploymentType>,
    /// No experience, 1-3 years, 3-5 years or More than 5 years
    #[arg(long)]
    pub experience: Option<ExperienceTime>,
    /// Office, Remote or Hybrid
    #[arg(long)]
    pub format: Option<JobFormat>,
    /// Skill to list; repeat for several. Replaces the current list.
    #[arg(long = "skill")]
    pub skills: Vec<String>,
    #[arg(long)]
    pub telegram: Option<String>,
    #[arg(long)]
    pub whatsapp: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
}

impl VacancyFields {
    pub fn apply_to(&self, form: &mut VacancyForm) {
        let text_fields = [
            (&self.title, &mut form.title),
            (&self.position, &mut form.position),
            (&self.location, &mut form.location),
            (&self.telegram, &mut form.telegram),
            (&self.whatsapp, &mut form.whatsapp),
            (&self.email, &mut form.email),
        ];
        for (value, field) in text_fields {
            if let Some(value) = value {
                *field = value.clone();
            }
        }
        if let Some(raw) = &self.salary_min {
            form.salary_min.set(raw);
        }
        if let Some(raw) = &self.salary_max {
            form.salary_max.set(raw);
        }
        if self.employment_type.is_some() {
            form.employment_type = self.employment_type;
        }
        if self.experience.is_some() {
            form.experience_time = self.experience;
        }
        if self.format.is_some() {
            form.job_format = self.format;
        }
        if !self.skills.is_empty() {
            let mut skills = SkillsInput::new();
            for skill in &self.skills {
                skills.type_text(skill);
                skills.press_enter();
            }
            form.skills = skills;
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum HrCommand {
    /// Show the recruiter profile
    Profile,
    /// Change profile fields
    UpdateProfile {
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Delete the recruiter account
    DeleteAccount,
    /// List own vacancies
    Vacancies,
    /// Show one vacancy
    Vacancy { id: i64 },
    /// Create a vacancy: describe it, pick a suggested profession, fill the rest
    Create {
        /// Free-text job description used for profession suggestions
        description: String,
        /// Number of the suggestion to use, starting at 1; omit to list them
        #[arg(long, value_parser = parse_choice)]
        choice: Option<usize>,
        #[command(flatten)]
        fields: VacancyFields,
    },
    /// Edit a vacancy
    Edit {
        id: i64,
        #[arg(long)]
        description: Option<String>,
        #[command(flatten)]
        fields: VacancyFields,
    },
    /// Delete a vacancy
    Delete { id: i64 },
    /// List applications to a vacancy
    Candidates { vacancy_id: i64 },
    /// Accept an application
    Accept { application_id: i64 },
    /// Reject an application
    Reject { application_id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// List applicant accounts
    Users,
    /// List recruiter accounts
    Hrs,
    /// List recruiters waiting for approval
    Pending,
    /// Approve a recruiter
    Approve { hr_id: i64 },
    /// Block or unblock an applicant
    BlockUser { user_id: i64 },
    /// Block or unblock a recruiter
    BlockHr { hr_id: i64 },
    /// Delete an applicant
    DeleteUser { user_id: i64 },
    /// Delete a recruiter
    DeleteHr { hr_id: i64 },
    /// List vacancies waiting for review
    Review,
    /// Publish a vacancy
    Accept { vacancy_id: i64 },
    /// Turn a vacancy down
    Reject { vacancy_id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Show the applicant profile
    Profile,
    /// List published vacancies
    Vacancies,
    /// Show one published vacancy
    Vacancy { id: i64 },
    /// Upload a résumé
    Upload { file: PathBuf },
    /// Apply to a vacancy with an uploaded résumé or a new file
    Apply {
        vacancy_id: i64,
        #[arg(long, conflicts_with = "file")]
        resume_id: Option<i64>,
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// List own applications
    Applications,
    /// List uploaded résumés
    Resumes,
    /// List vacancies already applied to
    Applied,
    /// Score a résumé against a vacancy
    Process { vacancy_id: i64, file: PathBuf },
    /// Download a stored résumé
    Download { resume_path: String },
}

impl HrCommand {
    fn page(&self) -> Page {
        let page = match self {
            HrCommand::Profile | HrCommand::UpdateProfile { .. } | HrCommand::DeleteAccount => {
                HrPage::Settings
            }
            HrCommand::Vacancies | HrCommand::Delete { .. } => HrPage::Vacancies,
            HrCommand::Vacancy { id } | HrCommand::Edit { id, .. } => {
                HrPage::EditVacancy { vacancy_id: *id }
            }
            HrCommand::Create { .. } => HrPage::CreateVacancy,
            HrCommand::Candidates { vacancy_id } => HrPage::Candidates {
                vacancy_id: *vacancy_id,
            },
            HrCommand::Accept { .. } | HrCommand::Reject { .. } => HrPage::Dashboard,
        };
        Page::Hr(page)
    }
}

impl AdminCommand {
    fn page(&self) -> Page {
        let page = match self {
            AdminCommand::Users | AdminCommand::BlockUser { .. } | AdminCommand::DeleteUser { .. } => {
                AdminPage::Users
            }
            AdminCommand::Hrs | AdminCommand::BlockHr { .. } | AdminCommand::DeleteHr { .. } => {
                AdminPage::Hrs
            }
            AdminCommand::Pending | AdminCommand::Approve { .. } => AdminPage::Pending,
            AdminCommand::Review | AdminCommand::Accept { .. } | AdminCommand::Reject { .. } => {
                AdminPage::ReviewVacancies
            }
        };
        Page::Admin(page)
    }
}

impl UserCommand {
    fn page(&self) -> Page {
        let page = match self {
            UserCommand::Profile | UserCommand::Applications | UserCommand::Applied => {
                UserPage::Profile
            }
            UserCommand::Vacancies | UserCommand::Resumes | UserCommand::Upload { .. } => {
                UserPage::Home
            }
            UserCommand::Vacancy { id } => UserPage::Vacancy { vacancy_id: *id },
            UserCommand::Apply { vacancy_id, .. } | UserCommand::Process { vacancy_id, .. } => {
                UserPage::Apply {
                    vacancy_id: *vacancy_id,
                }
            }
            UserCommand::Download { .. } => UserPage::Home,
        };
        Page::User(page)
    }
}

/// Lets the command through only if the router would render its page.
fn enter(board: &JobBoard, page: Page) -> Result<()> {
    let Some(path) = page.path() else {
        return Err(Error::Session("Страница не найдена".to_string()));
    };
    match board.router.navigate(&path) {
        Navigation::Render(_) => Ok(()),
        Navigation::Redirect(to) if to == LOGIN_PATH => {
            Err(Error::Unauthorized("Войдите в систему".to_string()))
        }
        Navigation::Redirect(_) => Err(Error::Session(format!(
            "Раздел {} недоступен для текущей роли",
            path
        ))),
    }
}

fn amount(value: Option<Decimal>) -> String {
    value
        .map(|v| group_thousands(&v.trunc().to_string()))
        .unwrap_or_else(|| "—".to_string())
}

fn print_vacancy(v: &Vacancy) {
    println!(
        "#{} {} / {} [{}] {} | {}–{} | {}, {}",
        v.id,
        v.title,
        v.position,
        v.status,
        v.location,
        amount(v.salary_min),
        amount(v.salary_max),
        v.employment_type,
        v.job_format,
    );
}

fn print_public_vacancy(v: &PublicVacancy) {
    println!(
        "#{} {} / {} | {} | {}–{}",
        v.id,
        v.title.as_deref().unwrap_or_default(),
        v.position.as_deref().unwrap_or_default(),
        v.location.as_deref().unwrap_or_default(),
        amount(v.salary_min),
        amount(v.salary_max),
    );
}

fn print_candidate(c: &Candidate) {
    let score = c
        .matching_score
        .map(|s| format!("{:.0}%", s))
        .unwrap_or_else(|| "—".to_string());
    println!(
        "application #{} {} ({}) score {} [{}]",
        c.application_id,
        c.full_name(),
        c.profession,
        score,
        c.status
    );
    if !c.summary.is_empty() {
        println!("    {}", c.summary);
    }
}

fn print_hr(hr: &HrAccount) {
    println!(
        "#{} {} {} {} approved={} blocked={}",
        hr.id, hr.email, hr.company, hr.contact_info, hr.approved, hr.blocked
    );
}

pub async fn run(board: &JobBoard, command: Command, download_dir: PathBuf) -> Result<()> {
    match command {
        Command::Login { email, password } => {
            let role = board.auth.login(&LoginPayload { email, password }).await?;
            println!("Logged in as {}. Home: {}", role, board.router.home());
        }
        Command::Signup(SignupCommand::User {
            email,
            password,
            full_name,
        }) => {
            let payload = RegisterUserPayload {
                email,
                password,
                full_name,
            };
            let role = board.auth.register_user(&payload).await?;
            println!("Registered as {}. Home: {}", role, board.router.home());
        }
        Command::Signup(SignupCommand::Hr {
            email,
            password,
            full_name,
            phone,
            company,
        }) => {
            let payload = RegisterHrPayload {
                email,
                password,
                full_name,
                contact_info: normalize_phone(&phone),
                company,
            };
            let response = board.auth.register_hr(&payload).await?;
            println!("{}", response.message);
            println!("Log in once an administrator approves the account: {}", LOGIN_PATH);
        }
        Command::Logout => {
            board.auth.logout()?;
            println!("Logged out");
        }
        Command::Whoami => {
            println!("{}", board.auth.principal());
            if let Ok(id) = board.auth.current_user_id() {
                println!("id {}", id);
            }
        }
        Command::Open { path } => {
            let (path, page) = board.router.open(&path);
            println!("{} -> {:?}", path, page);
        }
        Command::Hr(command) => {
            enter(board, command.page())?;
            run_hr(board, command).await?;
        }
        Command::Admin(command) => {
            enter(board, command.page())?;
            run_admin(board, command).await?;
        }
        Command::User(command) => {
            enter(board, command.page())?;
            run_user(board, command, download_dir).await?;
        }
    }
    Ok(())
}

async fn run_hr(board: &JobBoard, command: HrCommand) -> Result<()> {
    match command {
        HrCommand::Profile => {
            let p = board.hr.profile().await?;
            println!("{} <{}>, {}, {}", p.full_name, p.email, p.company, p.contact_info);
        }
        HrCommand::UpdateProfile {
            full_name,
            company,
            phone,
        } => {
            let update = HrProfileUpdate {
                full_name,
                company,
                contact_info: phone.as_deref().map(normalize_phone),
            };
            let p = board.hr.update_profile(&update).await?;
            println!("{} <{}>, {}, {}", p.full_name, p.email, p.company, p.contact_info);
        }
        HrCommand::DeleteAccount => {
            board.hr.delete_profile().await?;
            println!("Account deleted");
        }
        HrCommand::Vacancies => {
            for vacancy in board.hr.vacancies().await? {
                print_vacancy(&vacancy);
            }
        }
        HrCommand::Vacancy { id } => {
            let vacancy = board.hr.vacancy(id).await?;
            print_vacancy(&vacancy);
            println!("{}", vacancy.description);
            println!("skills: {}", vacancy.skill_list().join(", "));
        }
        HrCommand::Create {
            description,
            choice,
            fields,
        } => {
            let mut wizard = VacancyWizard::new();
            wizard.set_description(description)?;
            wizard.classify(&board.hr).await?;
            if wizard.suggestions().is_empty() {
                println!("Не удалось определить профессии по вашему описанию.");
                return Ok(());
            }
            let Some(choice) = choice else {
                for (i, s) in wizard.suggestions().iter().enumerate() {
                    println!("{}. {} {}", i + 1, s.profession, s.grade);
                }
                println!("Run again with --choice <number>");
                return Ok(());
            };
            wizard.select(choice - 1)?;
            fields.apply_to(wizard.form_mut());
            let vacancy = board.hr.create_vacancy(wizard.submit()?).await?;
            print_vacancy(&vacancy);
        }
        HrCommand::Edit {
            id,
            description,
            fields,
        } => {
            let current = board.hr.vacancy(id).await?;
            let mut form = VacancyForm::from_vacancy(&current);
            if let Some(description) = description {
                form.description = description;
            }
            fields.apply_to(&mut form);
            let vacancy = board.hr.update_vacancy(id, form.to_payload()?).await?;
            print_vacancy(&vacancy);
        }
        HrCommand::Delete { id } => {
            board.hr.delete_vacancy(id).await?;
            println!("Vacancy {} deleted", id);
        }
        HrCommand::Candidates { vacancy_id } => {
            for candidate in board.hr.candidates(vacancy_id).await? {
                print_candidate(&candidate);
            }
        }
        HrCommand::Accept { application_id } => {
            board.hr.accept_candidate(application_id).await?;
            println!("Application {} accepted", application_id);
        }
        HrCommand::Reject { application_id } => {
            board.hr.reject_candidate(application_id).await?;
            println!("Application {} rejected", application_id);
        }
    }
    Ok(())
}

async fn run_admin(board: &JobBoard, command: AdminCommand) -> Result<()> {
    match command {
        AdminCommand::Users => {
            for user in board.admin.users().await? {
                println!("#{} {} blocked={}", user.id, user.email, user.blocked);
            }
        }
        AdminCommand::Hrs => {
            for hr in board.admin.hrs().await? {
                print_hr(&hr);
            }
        }
        AdminCommand::Pending => {
            for hr in board.admin.pending_hrs().await? {
                print_hr(&hr);
            }
        }
        AdminCommand::Approve { hr_id } => {
            board.admin.approve_hr(hr_id).await?;
            println!("HR {} approved", hr_id);
        }
        AdminCommand::BlockUser { user_id } => {
            board.admin.toggle_block_user(user_id).await?;
            println!("User {} block toggled", user_id);
        }
        AdminCommand::BlockHr { hr_id } => {
            board.admin.toggle_block_hr(hr_id).await?;
            println!("HR {} block toggled", hr_id);
        }
        AdminCommand::DeleteUser { user_id } => {
            board.admin.delete_user(user_id).await?;
            println!("User {} deleted", user_id);
        }
        AdminCommand::DeleteHr { hr_id } => {
            board.admin.delete_hr(hr_id).await?;
            println!("HR {} deleted", hr_id);
        }
        AdminCommand::Review => {
            for vacancy in board.admin.vacancies_under_review().await? {
                print_vacancy(&vacancy);
            }
        }
        AdminCommand::Accept { vacancy_id } => {
            let vacancy = board
                .admin
                .review_vacancy(vacancy_id, ReviewDecision::Accepted)
                .await?;
            print_vacancy(&vacancy);
        }
        AdminCommand::Reject { vacancy_id } => {
            let vacancy = board
                .admin
                .review_vacancy(vacancy_id, ReviewDecision::Rejected)
                .await?;
            print_vacancy(&vacancy);
        }
    }
    Ok(())
}

async fn run_user(board: &JobBoard, command: UserCommand, download_dir: PathBuf) -> Result<()> {
    match command {
        UserCommand::Profile => {
            let p = board.user.profile().await?;
            println!("{} <{}>", p.full_name, p.email);
        }
        UserCommand::Vacancies => {
            for vacancy in board.user.accepted_vacancies().await? {
                print_public_vacancy(&vacancy);
            }
        }
        UserCommand::Vacancy { id } => {
            let vacancy = board.user.accepted_vacancy(id).await?;
            print_public_vacancy(&vacancy);
            if let Some(description) = &vacancy.description {
                println!("{}", description);
            }
        }
        UserCommand::Upload { file } => {
            let upload = board.user.upload_resume(ResumeFile::from_path(&file).await?).await?;
            println!("Resume {} uploaded", upload.resume_id);
        }
        UserCommand::Apply {
            vacancy_id,
            resume_id,
            file,
        } => {
            let created = match (resume_id, file) {
                (Some(resume_id), _) => board.user.apply(vacancy_id, resume_id).await?,
                (None, Some(path)) => {
                    let file = ResumeFile::from_path(&path).await?;
                    board.user.apply_with_resume(vacancy_id, file).await?
                }
                (None, None) => {
                    return Err(Error::invalid("file", "Пожалуйста, выберите файл резюме"))
                }
            };
            println!("Application {} created", created.application_id);
            if let Some(score) = created.matching_score {
                println!("Matching score: {:.0}%", score);
            }
        }
        UserCommand::Applications => {
            for application in board.user.applications().await? {
                let score = application
                    .matching_score
                    .map(|s| format!("{:.0}%", s))
                    .unwrap_or_else(|| "—".to_string());
                println!(
                    "{} [{}] score {}",
                    application.vacancy_title, application.status, score
                );
            }
        }
        UserCommand::Resumes => {
            for resume in board.user.resumes().await? {
                println!(
                    "#{} {} {}",
                    resume.id,
                    resume.profession.as_deref().unwrap_or_default(),
                    resume.resume_link.as_deref().unwrap_or_default()
                );
            }
        }
        UserCommand::Applied => {
            for vacancy in board.user.applied_vacancies().await? {
                print_public_vacancy(&vacancy);
            }
        }
        UserCommand::Process { vacancy_id, file } => {
            let file = ResumeFile::from_path(&file).await?;
            let processed = board.resume.process(vacancy_id, file).await?;
            if let Some(score) = processed.matching_score {
                println!("Matching score: {:.0}%", score);
            }
            if let Some(reason) = &processed.reason {
                println!("{}", reason);
            }
            if let Some(path) = &processed.resume_path {
                println!("Stored as {}", path);
            }
        }
        UserCommand::Download { resume_path } => {
            let target = board.resume.save_download(&resume_path, &download_dir).await?;
            println!("Saved to {}", target.display());
        }
    }
    Ok(())
}

/// Suggestions are listed from 1, so 0 is refused rather than read as the first.
fn parse_choice(raw: &str) -> std::result::Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("suggestions are numbered from 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}
