//! Validation rules for a CV draft.
//!
//! `CvSchema` is the seam the wizard validates through; `StandardSchema`
//! is the built-in rule set. Partial validation runs the whole rule set and
//! keeps only the issues under the requested paths.

use std::sync::OnceLock;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use regex::Regex;
use serde::Serialize;
use tracing::error;

use crate::models::cv::{CvFormData, NationalityEntry};
use crate::wizard::fields::{
    AddressField, EducationField, ExperienceField, FieldPath, LanguageField, PersonalField,
    SkillField, SocialField,
};

pub const NAME_MAX_LEN: usize = 50;
pub const LANGUAGE_LEVELS: &[&str] = &["A1", "A2", "B1", "B2", "C1", "C2", "native"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MessageKey {
    Required,
    TooLong,
    InvalidEmail,
    InvalidPhone,
    InvalidDate,
    DateInFuture,
    EndDateRequired,
    EndBeforeStart,
    InvalidUrl,
    AtLeastOneNationality,
    AtLeastOneEducation,
    AtLeastOneExperience,
    AtLeastOneSkill,
    AtLeastOneLanguage,
    InvalidSkillLevel,
    InvalidLanguageLevel,
    BlankEntry,
}

impl MessageKey {
    /// Catalog key the message resolves through.
    pub fn key(self) -> &'static str {
        match self {
            MessageKey::Required => "validation.required",
            MessageKey::TooLong => "validation.tooLong",
            MessageKey::InvalidEmail => "validation.invalidEmail",
            MessageKey::InvalidPhone => "validation.invalidPhone",
            MessageKey::InvalidDate => "validation.invalidDate",
            MessageKey::DateInFuture => "validation.dateInFuture",
            MessageKey::EndDateRequired => "validation.endDateRequired",
            MessageKey::EndBeforeStart => "validation.endBeforeStart",
            MessageKey::InvalidUrl => "validation.invalidUrl",
            MessageKey::AtLeastOneNationality => "validation.atLeastOneNationality",
            MessageKey::AtLeastOneEducation => "validation.atLeastOneEducation",
            MessageKey::AtLeastOneExperience => "validation.atLeastOneExperience",
            MessageKey::AtLeastOneSkill => "validation.atLeastOneSkill",
            MessageKey::AtLeastOneLanguage => "validation.atLeastOneLanguage",
            MessageKey::InvalidSkillLevel => "validation.invalidSkillLevel",
            MessageKey::InvalidLanguageLevel => "validation.invalidLanguageLevel",
            MessageKey::BlankEntry => "validation.blankEntry",
        }
    }
}

impl Serialize for MessageKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub path: FieldPath,
    pub message: MessageKey,
}

impl ValidationIssue {
    fn new(path: FieldPath, message: MessageKey) -> Self {
        Self { path, message }
    }
}

/// Validation backend consumed by the validation gate and the submission
/// assembler.
#[async_trait]
pub trait CvSchema: Send + Sync {
    async fn validate_all(&self, data: &CvFormData) -> Vec<ValidationIssue>;

    async fn validate_paths(&self, data: &CvFormData, scope: &[FieldPath]) -> Vec<ValidationIssue> {
        self.validate_all(data)
            .await
            .into_iter()
            .filter(|issue| issue.path.within_any(scope))
            .collect()
    }
}

/// Built-in rule set, dated against the current UTC day.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardSchema;

#[async_trait]
impl CvSchema for StandardSchema {
    async fn validate_all(&self, data: &CvFormData) -> Vec<ValidationIssue> {
        validate_cv(data, Utc::now().date_naive())
    }
}

/// Runs every rule against `data`. Pure so the server can share it.
pub fn validate_cv(data: &CvFormData, today: NaiveDate) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    check_personal_info(data, today, &mut issues);
    check_educations(data, &mut issues);
    check_work_experience(data, &mut issues);
    check_skills(data, &mut issues);
    check_languages(data, &mut issues);
    check_hobbies(data, &mut issues);
    issues
}

fn blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn required_name(value: &str, path: FieldPath, issues: &mut Vec<ValidationIssue>) {
    if blank(value) {
        issues.push(ValidationIssue::new(path, MessageKey::Required));
    } else if value.trim().chars().count() > NAME_MAX_LEN {
        issues.push(ValidationIssue::new(path, MessageKey::TooLong));
    }
}

fn required(value: &str, path: FieldPath, issues: &mut Vec<ValidationIssue>) {
    if blank(value) {
        issues.push(ValidationIssue::new(path, MessageKey::Required));
    }
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$";

// optional leading `+`, then digits or short parenthesised groups joined by
// at most one space or hyphen
const PHONE_PATTERN: &str = r"^\+?(?:\([0-9]{1,4}\)|[0-9])(?:[ -]?(?:\([0-9]{1,4}\)|[0-9]))*$";

static EMAIL_RE: OnceLock<Option<Regex>> = OnceLock::new();
static PHONE_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn compiled(cell: &'static OnceLock<Option<Regex>>, pattern: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            error!(pattern, error = %e, "Failed to compile validation pattern");
            None
        }
    })
    .as_ref()
}

pub fn is_valid_email(value: &str) -> bool {
    compiled(&EMAIL_RE, EMAIL_PATTERN).is_some_and(|re| re.is_match(value.trim()))
}

pub fn is_valid_phone(value: &str) -> bool {
    let value = value.trim();
    let digits = value.chars().filter(char::is_ascii_digit).count();
    (6..=20).contains(&digits)
        && compiled(&PHONE_RE, PHONE_PATTERN).is_some_and(|re| re.is_match(value))
}

pub fn is_valid_link(value: &str) -> bool {
    url::Url::parse(value.trim())
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        .unwrap_or(false)
}

/// Start/end date pair shared by education and experience entries.
fn check_period(
    start: &str,
    end: &str,
    current: bool,
    start_path: FieldPath,
    end_path: FieldPath,
    issues: &mut Vec<ValidationIssue>,
) {
    let start_date = if blank(start) {
        issues.push(ValidationIssue::new(start_path, MessageKey::Required));
        None
    } else {
        let parsed = parse_date(start);
        if parsed.is_none() {
            issues.push(ValidationIssue::new(start_path, MessageKey::InvalidDate));
        }
        parsed
    };

    if current {
        return;
    }
    if blank(end) {
        issues.push(ValidationIssue::new(end_path, MessageKey::EndDateRequired));
        return;
    }
    match (start_date, parse_date(end)) {
        (_, None) => issues.push(ValidationIssue::new(end_path, MessageKey::InvalidDate)),
        (Some(s), Some(e)) if e < s => {
            issues.push(ValidationIssue::new(end_path, MessageKey::EndBeforeStart))
        }
        _ => {}
    }
}

fn check_personal_info(data: &CvFormData, today: NaiveDate, issues: &mut Vec<ValidationIssue>) {
    let p = &data.personal_info;
    let at = FieldPath::Personal;

    required_name(&p.firstname, at(PersonalField::Firstname), issues);
    required_name(&p.lastname, at(PersonalField::Lastname), issues);

    if blank(&p.email) {
        issues.push(ValidationIssue::new(at(PersonalField::Email), MessageKey::Required));
    } else if !is_valid_email(&p.email) {
        issues.push(ValidationIssue::new(at(PersonalField::Email), MessageKey::InvalidEmail));
    }

    if !blank(&p.phone) && !is_valid_phone(&p.phone) {
        issues.push(ValidationIssue::new(at(PersonalField::Phone), MessageKey::InvalidPhone));
    }

    let dob = at(PersonalField::DateOfBirth);
    if blank(&p.date_of_birth) {
        issues.push(ValidationIssue::new(dob, MessageKey::Required));
    } else {
        match parse_date(&p.date_of_birth) {
            None => issues.push(ValidationIssue::new(dob, MessageKey::InvalidDate)),
            Some(d) if d >= today => issues.push(ValidationIssue::new(dob, MessageKey::DateInFuture)),
            Some(_) => {}
        }
    }

    let has_nationality = p.nationality.iter().any(|n| match n {
        NationalityEntry::Plain(s) => !blank(s),
        NationalityEntry::Pair(pair) => !blank(&pair.code),
    });
    if !has_nationality {
        issues.push(ValidationIssue::new(
            at(PersonalField::Nationality),
            MessageKey::AtLeastOneNationality,
        ));
    }

    if p.sex.is_none() {
        issues.push(ValidationIssue::new(at(PersonalField::Sex), MessageKey::Required));
    }

    let address = |f| at(PersonalField::Address(Some(f)));
    required(&p.address.city, address(AddressField::City), issues);
    required(&p.address.country, address(AddressField::Country), issues);

    let social = [
        (&p.social.linkedin, SocialField::Linkedin),
        (&p.social.github, SocialField::Github),
        (&p.social.website, SocialField::Website),
    ];
    for (value, field) in social {
        if !blank(value) && !is_valid_link(value) {
            issues.push(ValidationIssue::new(
                at(PersonalField::Social(Some(field))),
                MessageKey::InvalidUrl,
            ));
        }
    }
}

fn check_educations(data: &CvFormData, issues: &mut Vec<ValidationIssue>) {
    if data.educations.is_empty() {
        issues.push(ValidationIssue::new(FieldPath::Educations, MessageKey::AtLeastOneEducation));
    }
    for (i, edu) in data.educations.iter().enumerate() {
        required(&edu.school, FieldPath::Education(i, EducationField::School), issues);
        required(&edu.degree, FieldPath::Education(i, EducationField::Degree), issues);
        check_period(
            &edu.start_date,
            &edu.end_date,
            edu.current,
            FieldPath::Education(i, EducationField::StartDate),
            FieldPath::Education(i, EducationField::EndDate),
            issues,
        );
    }
}

fn check_work_experience(data: &CvFormData, issues: &mut Vec<ValidationIssue>) {
    let work = &data.work_experience;
    if !work.has_work_experience {
        return;
    }
    if work.experiences.is_empty() {
        issues.push(ValidationIssue::new(FieldPath::Experiences, MessageKey::AtLeastOneExperience));
    }
    for (i, exp) in work.experiences.iter().enumerate() {
        required(&exp.company, FieldPath::Experience(i, ExperienceField::Company), issues);
        required(&exp.position, FieldPath::Experience(i, ExperienceField::Position), issues);
        check_period(
            &exp.start_date,
            &exp.end_date,
            exp.current,
            FieldPath::Experience(i, ExperienceField::StartDate),
            FieldPath::Experience(i, ExperienceField::EndDate),
            issues,
        );
        for (line, text) in exp.responsibilities.iter().enumerate() {
            if blank(text) {
                issues.push(ValidationIssue::new(
                    FieldPath::Responsibility { experience: i, line },
                    MessageKey::BlankEntry,
                ));
            }
        }
    }
}

fn check_skills(data: &CvFormData, issues: &mut Vec<ValidationIssue>) {
    if data.skills.is_empty() {
        issues.push(ValidationIssue::new(FieldPath::Skills, MessageKey::AtLeastOneSkill));
    }
    for (i, skill) in data.skills.iter().enumerate() {
        required(&skill.name, FieldPath::Skill(i, SkillField::Name), issues);
        if let Some(level) = skill.level {
            if !(1..=5).contains(&level) {
                issues.push(ValidationIssue::new(
                    FieldPath::Skill(i, SkillField::Level),
                    MessageKey::InvalidSkillLevel,
                ));
            }
        }
    }
}

fn check_languages(data: &CvFormData, issues: &mut Vec<ValidationIssue>) {
    if data.languages.is_empty() {
        issues.push(ValidationIssue::new(FieldPath::Languages, MessageKey::AtLeastOneLanguage));
    }
    for (i, lang) in data.languages.iter().enumerate() {
        required(&lang.name, FieldPath::Language(i, LanguageField::Name), issues);
        let level_path = FieldPath::Language(i, LanguageField::Level);
        if blank(&lang.level) {
            issues.push(ValidationIssue::new(level_path, MessageKey::Required));
        } else if !LANGUAGE_LEVELS
            .iter()
            .any(|l| l.eq_ignore_ascii_case(lang.level.trim()))
        {
            issues.push(ValidationIssue::new(level_path, MessageKey::InvalidLanguageLevel));
        }
    }
}

fn check_hobbies(data: &CvFormData, issues: &mut Vec<ValidationIssue>) {
    for (i, hobby) in data.hobbies.iter().enumerate() {
        if blank(&hobby.name) {
            issues.push(ValidationIssue::new(FieldPath::Hobby(i), MessageKey::BlankEntry));
        }
    }
}
