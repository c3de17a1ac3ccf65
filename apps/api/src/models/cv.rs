use serde::{Deserialize, Serialize};

/// The whole CV draft as the wizard edits it.
///
/// Every field defaults when absent so a partially filled draft (or one
/// persisted by an older build) still deserializes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CvFormData {
    pub personal_info: PersonalInfo,
    pub educations: Vec<Education>,
    pub work_experience: WorkExperience,
    pub skills: Vec<Skill>,
    pub languages: Vec<Language>,
    pub hobbies: Vec<Hobby>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "dateofBirth")]
    pub date_of_birth: String,
    pub nationality: Vec<NationalityEntry>,
    pub sex: Option<Sex>,
    pub address: Address,
    pub social: Social,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    Other,
}

/// A nationality as the form may hold it: the select widget stores
/// `{code, label}` pairs but older drafts stored bare strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NationalityEntry {
    Pair(Nationality),
    Plain(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nationality {
    pub code: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub street: String,
    pub postal_code: String,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Social {
    pub linkedin: String,
    pub github: String,
    pub website: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub school: String,
    pub degree: String,
    pub field_of_study: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperience {
    pub has_work_experience: bool,
    pub experiences: Vec<Experience>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skill {
    pub name: String,
    pub level: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Language {
    pub name: String,
    pub level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Hobby {
    pub name: String,
}

/// Top-level sections of a draft, in the order the wizard visits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    PersonalInfo,
    Educations,
    WorkExperience,
    Skills,
    Languages,
    Hobbies,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::PersonalInfo,
        Section::Educations,
        Section::WorkExperience,
        Section::Skills,
        Section::Languages,
        Section::Hobbies,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Section::PersonalInfo => "personalInfo",
            Section::Educations => "educations",
            Section::WorkExperience => "workExperience",
            Section::Skills => "skills",
            Section::Languages => "languages",
            Section::Hobbies => "hobbies",
        }
    }
}

fn filled(s: &str) -> bool {
    !s.trim().is_empty()
}

impl PersonalInfo {
    pub fn is_populated(&self) -> bool {
        filled(&self.firstname)
            || filled(&self.lastname)
            || filled(&self.email)
            || filled(&self.phone)
            || filled(&self.date_of_birth)
            || !self.nationality.is_empty()
            || self.sex.is_some()
            || self.address.is_populated()
            || self.social.is_populated()
    }
}

impl Address {
    pub fn is_populated(&self) -> bool {
        filled(&self.street) || filled(&self.postal_code) || filled(&self.city) || filled(&self.country)
    }
}

impl Social {
    pub fn is_populated(&self) -> bool {
        filled(&self.linkedin) || filled(&self.github) || filled(&self.website)
    }
}

impl WorkExperience {
    pub fn is_populated(&self) -> bool {
        self.has_work_experience || !self.experiences.is_empty()
    }
}

impl CvFormData {
    /// True when a section carries any user-entered value: non-empty list,
    /// or an object with at least one populated key.
    pub fn section_populated(&self, section: Section) -> bool {
        match section {
            Section::PersonalInfo => self.personal_info.is_populated(),
            Section::Educations => !self.educations.is_empty(),
            Section::WorkExperience => self.work_experience.is_populated(),
            Section::Skills => !self.skills.is_empty(),
            Section::Languages => !self.languages.is_empty(),
            Section::Hobbies => !self.hobbies.is_empty(),
        }
    }

    /// Copies one section from `other` into `self`.
    pub fn take_section(&mut self, other: &CvFormData, section: Section) {
        match section {
            Section::PersonalInfo => self.personal_info = other.personal_info.clone(),
            Section::Educations => self.educations = other.educations.clone(),
            Section::WorkExperience => self.work_experience = other.work_experience.clone(),
            Section::Skills => self.skills = other.skills.clone(),
            Section::Languages => self.languages = other.languages.clone(),
            Section::Hobbies => self.hobbies = other.hobbies.clone(),
        }
    }

    /// Whether the draft holds anything that identifies its owner.
    pub fn has_identity(&self) -> bool {
        let p = &self.personal_info;
        filled(&p.firstname) || filled(&p.lastname) || filled(&p.email)
    }

    pub fn is_empty(&self) -> bool {
        !Section::ALL.iter().any(|s| self.section_populated(*s))
    }
}

/// Section-wise partial update; `None` leaves the section untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CvFormPatch {
    pub personal_info: Option<PersonalInfo>,
    pub educations: Option<Vec<Education>>,
    pub work_experience: Option<WorkExperience>,
    pub skills: Option<Vec<Skill>>,
    pub languages: Option<Vec<Language>>,
    pub hobbies: Option<Vec<Hobby>>,
}

impl CvFormPatch {
    pub fn apply_to(self, data: &mut CvFormData) {
        if let Some(v) = self.personal_info {
            data.personal_info = v;
        }
        if let Some(v) = self.educations {
            data.educations = v;
        }
        if let Some(v) = self.work_experience {
            data.work_experience = v;
        }
        if let Some(v) = self.skills {
            data.skills = v;
        }
        if let Some(v) = self.languages {
            data.languages = v;
        }
        if let Some(v) = self.hobbies {
            data.hobbies = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserializes_partial_draft_with_defaults() {
        let data: CvFormData = serde_json::from_value(json!({
            "personalInfo": { "firstname": "Jean", "dateofBirth": "1990-04-02" },
            "skills": [{ "name": "Rust", "level": 4 }]
        }))
        .unwrap();
        assert_eq!(data.personal_info.firstname, "Jean");
        assert_eq!(data.personal_info.date_of_birth, "1990-04-02");
        assert!(data.educations.is_empty());
        assert_eq!(data.skills[0].level, Some(4));
    }

    #[test]
    fn test_nationality_accepts_string_and_pair() {
        let info: PersonalInfo = serde_json::from_value(json!({
            "nationality": ["FR", { "code": "BE", "label": "Belgian" }]
        }))
        .unwrap();
        assert_eq!(info.nationality[0], NationalityEntry::Plain("FR".into()));
        assert!(matches!(info.nationality[1], NationalityEntry::Pair(_)));
    }

    #[test]
    fn test_section_populated_rules() {
        let mut data = CvFormData::default();
        assert!(data.is_empty());
        data.personal_info.address.city = "Lyon".into();
        assert!(data.section_populated(Section::PersonalInfo));
        assert!(!data.has_identity());
        data.work_experience.has_work_experience = true;
        assert!(data.section_populated(Section::WorkExperience));
        data.personal_info.address.city = "   ".into();
        assert!(!data.section_populated(Section::PersonalInfo));
    }

    #[test]
    fn test_patch_only_touches_given_sections() {
        let mut data = CvFormData::default();
        data.hobbies.push(Hobby { name: "Chess".into() });
        CvFormPatch {
            skills: Some(vec![Skill { name: "Rust".into(), level: None }]),
            ..Default::default()
        }
        .apply_to(&mut data);
        assert_eq!(data.skills.len(), 1);
        assert_eq!(data.hobbies.len(), 1);
    }
}
