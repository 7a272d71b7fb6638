use crate::models::vacancy::split_skills;

pub const SKILL_SEPARATOR: &str = ", ";

/// Tag-style skills field: typed text becomes a skill on Enter or comma.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillsInput {
    skills: Vec<String>,
    pending: String,
}

impl SkillsInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the list from the comma-joined wire form.
    pub fn from_joined(joined: &str) -> Self {
        Self {
            skills: split_skills(joined),
            pending: String::new(),
        }
    }

    /// Feeds typed text; each comma commits what was typed before it.
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            if c == ',' {
                self.commit();
            } else {
                self.pending.push(c);
            }
        }
    }

    pub fn press_enter(&mut self) {
        self.commit();
    }

    /// Adds the pending text as a skill. A blank or duplicate entry is not
    /// added and stays in the text box.
    fn commit(&mut self) -> bool {
        let skill = self.pending.trim();
        if skill.is_empty() || self.skills.iter().any(|s| s == skill) {
            return false;
        }
        self.skills.push(skill.to_string());
        self.pending.clear();
        true
    }

    pub fn remove(&mut self, skill: &str) {
        self.skills.retain(|s| s != skill);
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn pending(&self) -> &str {
        &self.pending
    }

    pub fn to_joined(&self) -> String {
        self.skills.join(SKILL_SEPARATOR)
    }
}
