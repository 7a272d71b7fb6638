use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HrPage {
    Dashboard,
    Vacancies,
    Candidates { vacancy_id: i64 },
    Settings,
    CreateVacancy,
    EditVacancy { vacancy_id: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminPage {
    Overview,
    Users,
    Hrs,
    Pending,
    ReviewVacancies,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserPage {
    Home,
    Vacancy { vacancy_id: i64 },
    Apply { vacancy_id: i64 },
    Profile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Landing,
    Login,
    Signup,
    Hr(HrPage),
    Admin(AdminPage),
    User(UserPage),
    /// A path inside a section the principal may enter, but with no page.
    NotFound,
}

/// What a path resolves to before any role check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    Page(Page),
    Redirect(&'static str),
}

fn id(segment: &str) -> Option<i64> {
    segment.parse().ok().filter(|id| *id > 0)
}

fn hr(rest: &[&str]) -> Resolved {
    let page = match rest {
        [] => return Resolved::Redirect("/hr/dashboard"),
        ["dashboard"] => HrPage::Dashboard,
        ["vacancies"] => HrPage::Vacancies,
        ["settings"] => HrPage::Settings,
        ["create-vacancy"] => HrPage::CreateVacancy,
        ["vacancies", raw, "candidates"] => match id(raw) {
            Some(vacancy_id) => HrPage::Candidates { vacancy_id },
            None => return Resolved::Page(Page::NotFound),
        },
        [raw] => match id(raw) {
            Some(vacancy_id) => HrPage::EditVacancy { vacancy_id },
            None => return Resolved::Page(Page::NotFound),
        },
        _ => return Resolved::Page(Page::NotFound),
    };
    Resolved::Page(Page::Hr(page))
}

fn admin(rest: &[&str]) -> Resolved {
    let page = match rest {
        [] => AdminPage::Overview,
        ["users"] => AdminPage::Users,
        ["hrs"] => AdminPage::Hrs,
        ["pending"] => AdminPage::Pending,
        ["review-vacancies"] => AdminPage::ReviewVacancies,
        _ => return Resolved::Page(Page::NotFound),
    };
    Resolved::Page(Page::Admin(page))
}

fn user(rest: &[&str]) -> Resolved {
    let page = match rest {
        [] => return Resolved::Redirect("/user/home"),
        ["home"] => UserPage::Home,
        ["profile"] => UserPage::Profile,
        ["vacancies", raw] => match id(raw) {
            Some(vacancy_id) => UserPage::Vacancy { vacancy_id },
            None => return Resolved::Page(Page::NotFound),
        },
        ["apply", raw] => match id(raw) {
            Some(vacancy_id) => UserPage::Apply { vacancy_id },
            None => return Resolved::Page(Page::NotFound),
        },
        _ => return Resolved::Page(Page::NotFound),
    };
    Resolved::Page(Page::User(page))
}

/// Maps a normalized path (leading `/`, no trailing `/`, no query) to a page.
pub fn resolve(path: &str) -> Resolved {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        [] => Resolved::Page(Page::Landing),
        ["login"] => Resolved::Page(Page::Login),
        ["signup"] => Resolved::Page(Page::Signup),
        ["hr", rest @ ..] => hr(rest),
        ["admin", rest @ ..] => admin(rest),
        ["user", rest @ ..] => user(rest),
        _ => Resolved::Redirect("/"),
    }
}

impl Page {
    /// Canonical path of the page; `None` for `NotFound`.
    pub fn path(&self) -> Option<String> {
        let path = match self {
            Page::Landing => "/".to_string(),
            Page::Login => "/login".to_string(),
            Page::Signup => "/signup".to_string(),
            Page::Hr(page) => match page {
                HrPage::Dashboard => "/hr/dashboard".to_string(),
                HrPage::Vacancies => "/hr/vacancies".to_string(),
                HrPage::Candidates { vacancy_id } => {
                    format!("/hr/vacancies/{}/candidates", vacancy_id)
                }
                HrPage::Settings => "/hr/settings".to_string(),
                HrPage::CreateVacancy => "/hr/create-vacancy".to_string(),
                HrPage::EditVacancy { vacancy_id } => format!("/hr/{}", vacancy_id),
            },
            Page::Admin(page) => match page {
                AdminPage::Overview => "/admin".to_string(),
                AdminPage::Users => "/admin/users".to_string(),
                AdminPage::Hrs => "/admin/hrs".to_string(),
                AdminPage::Pending => "/admin/pending".to_string(),
                AdminPage::ReviewVacancies => "/admin/review-vacancies".to_string(),
            },
            Page::User(page) => match page {
                UserPage::Home => "/user/home".to_string(),
                UserPage::Vacancy { vacancy_id } => format!("/user/vacancies/{}", vacancy_id),
                UserPage::Apply { vacancy_id } => format!("/user/apply/{}", vacancy_id),
                UserPage::Profile => "/user/profile".to_string(),
            },
            Page::NotFound => return None,
        };
        Some(path)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path() {
            Some(path) => f.write_str(&path),
            None => f.write_str("not found"),
        }
    }
}
