//! Typed field paths and the step → fields registry.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::models::Section;
use crate::wizard::steps::{EDUCATION, EXPERIENCE, EXTRAS, PERSONAL_INFO};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AddressField {
    Street,
    PostalCode,
    City,
    Country,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SocialField {
    Linkedin,
    Github,
    Website,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PersonalField {
    Firstname,
    Lastname,
    Email,
    Phone,
    DateOfBirth,
    Nationality,
    Sex,
    /// `None` addresses the whole object.
    Address(Option<AddressField>),
    Social(Option<SocialField>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EducationField {
    School,
    Degree,
    StartDate,
    EndDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExperienceField {
    Company,
    Position,
    StartDate,
    EndDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SkillField {
    Name,
    Level,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LanguageField {
    Name,
    Level,
}

/// Location of a value inside `CvFormData`.
///
/// Section variants (`Educations`, `WorkExperience`, ...) scope every
/// indexed path beneath them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldPath {
    Personal(PersonalField),
    Educations,
    Education(usize, EducationField),
    WorkExperience,
    Experiences,
    Experience(usize, ExperienceField),
    Responsibility { experience: usize, line: usize },
    Skills,
    Skill(usize, SkillField),
    Languages,
    Language(usize, LanguageField),
    Hobbies,
    Hobby(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Key(&'static str),
    Index(usize),
}

impl AddressField {
    fn key(self) -> &'static str {
        match self {
            AddressField::Street => "street",
            AddressField::PostalCode => "postalCode",
            AddressField::City => "city",
            AddressField::Country => "country",
        }
    }
}

impl SocialField {
    fn key(self) -> &'static str {
        match self {
            SocialField::Linkedin => "linkedin",
            SocialField::Github => "github",
            SocialField::Website => "website",
        }
    }
}

impl FieldPath {
    pub fn section(&self) -> Section {
        match self {
            FieldPath::Personal(_) => Section::PersonalInfo,
            FieldPath::Educations | FieldPath::Education(..) => Section::Educations,
            FieldPath::WorkExperience
            | FieldPath::Experiences
            | FieldPath::Experience(..)
            | FieldPath::Responsibility { .. } => Section::WorkExperience,
            FieldPath::Skills | FieldPath::Skill(..) => Section::Skills,
            FieldPath::Languages | FieldPath::Language(..) => Section::Languages,
            FieldPath::Hobbies | FieldPath::Hobby(_) => Section::Hobbies,
        }
    }

    pub fn segments(&self) -> Vec<Segment> {
        use Segment::{Index, Key};
        let mut out = vec![Key(self.section().key())];
        match *self {
            FieldPath::Personal(field) => match field {
                PersonalField::Firstname => out.push(Key("firstname")),
                PersonalField::Lastname => out.push(Key("lastname")),
                PersonalField::Email => out.push(Key("email")),
                PersonalField::Phone => out.push(Key("phone")),
                PersonalField::DateOfBirth => out.push(Key("dateofBirth")),
                PersonalField::Nationality => out.push(Key("nationality")),
                PersonalField::Sex => out.push(Key("sex")),
                PersonalField::Address(sub) => {
                    out.push(Key("address"));
                    out.extend(sub.map(|f| Key(f.key())));
                }
                PersonalField::Social(sub) => {
                    out.push(Key("social"));
                    out.extend(sub.map(|f| Key(f.key())));
                }
            },
            FieldPath::Educations
            | FieldPath::WorkExperience
            | FieldPath::Skills
            | FieldPath::Languages
            | FieldPath::Hobbies => {}
            FieldPath::Education(i, field) => {
                out.push(Index(i));
                out.push(Key(match field {
                    EducationField::School => "school",
                    EducationField::Degree => "degree",
                    EducationField::StartDate => "startDate",
                    EducationField::EndDate => "endDate",
                }));
            }
            FieldPath::Experiences => out.push(Key("experiences")),
            FieldPath::Experience(i, field) => {
                out.extend([Key("experiences"), Index(i)]);
                out.push(Key(match field {
                    ExperienceField::Company => "company",
                    ExperienceField::Position => "position",
                    ExperienceField::StartDate => "startDate",
                    ExperienceField::EndDate => "endDate",
                }));
            }
            FieldPath::Responsibility { experience, line } => {
                out.extend([
                    Key("experiences"),
                    Index(experience),
                    Key("responsibilities"),
                    Index(line),
                ]);
            }
            FieldPath::Skill(i, field) => {
                out.push(Index(i));
                out.push(Key(match field {
                    SkillField::Name => "name",
                    SkillField::Level => "level",
                }));
            }
            FieldPath::Language(i, field) => {
                out.push(Index(i));
                out.push(Key(match field {
                    LanguageField::Name => "name",
                    LanguageField::Level => "level",
                }));
            }
            FieldPath::Hobby(i) => out.extend([Index(i), Key("name")]),
        }
        out
    }

    /// True when `self` is `scope` or nested beneath it.
    pub fn within(&self, scope: &FieldPath) -> bool {
        let own = self.segments();
        let outer = scope.segments();
        own.len() >= outer.len() && own[..outer.len()] == outer[..]
    }

    pub fn within_any(&self, scopes: &[FieldPath]) -> bool {
        scopes.iter().any(|s| self.within(s))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments().into_iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match seg {
                Segment::Key(k) => f.write_str(k)?,
                Segment::Index(n) => write!(f, "{n}")?,
            }
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

const IDENTITY: &[FieldPath] = &[
    FieldPath::Personal(PersonalField::Firstname),
    FieldPath::Personal(PersonalField::Lastname),
];
const CONTACT: &[FieldPath] = &[
    FieldPath::Personal(PersonalField::Email),
    FieldPath::Personal(PersonalField::Phone),
];
const INFO: &[FieldPath] = &[
    FieldPath::Personal(PersonalField::DateOfBirth),
    FieldPath::Personal(PersonalField::Nationality),
    FieldPath::Personal(PersonalField::Sex),
];
const ADDRESS: &[FieldPath] = &[FieldPath::Personal(PersonalField::Address(None))];
const SOCIAL: &[FieldPath] = &[FieldPath::Personal(PersonalField::Social(None))];
const EDUCATIONS: &[FieldPath] = &[FieldPath::Educations];
const WORK: &[FieldPath] = &[FieldPath::WorkExperience];
const SKILLS: &[FieldPath] = &[FieldPath::Skills];
const LANGUAGES: &[FieldPath] = &[FieldPath::Languages];
const HOBBIES: &[FieldPath] = &[FieldPath::Hobbies];

/// Fields validated before leaving `(step, sub_step)`. Unknown positions
/// have no fields.
pub fn fields_for(step: usize, sub_step: usize) -> &'static [FieldPath] {
    match (step, sub_step) {
        (PERSONAL_INFO, 0) => IDENTITY,
        (PERSONAL_INFO, 1) => CONTACT,
        (PERSONAL_INFO, 2) => INFO,
        (PERSONAL_INFO, 3) => ADDRESS,
        (PERSONAL_INFO, 4) => SOCIAL,
        (EDUCATION, 0) => EDUCATIONS,
        (EXPERIENCE, 0) => WORK,
        (EXTRAS, 0) => SKILLS,
        (EXTRAS, 1) => LANGUAGES,
        (EXTRAS, 2) => HOBBIES,
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_form_field_names() {
        let path = FieldPath::Responsibility { experience: 2, line: 1 };
        assert_eq!(
            path.to_string(),
            "workExperience.experiences.2.responsibilities.1"
        );
        assert_eq!(
            FieldPath::Personal(PersonalField::DateOfBirth).to_string(),
            "personalInfo.dateofBirth"
        );
        assert_eq!(
            FieldPath::Personal(PersonalField::Address(Some(AddressField::PostalCode))).to_string(),
            "personalInfo.address.postalCode"
        );
    }

    #[test]
    fn test_section_scope_contains_indexed_paths() {
        let nested = FieldPath::Responsibility { experience: 0, line: 3 };
        assert!(nested.within(&FieldPath::WorkExperience));
        assert!(nested.within(&FieldPath::Experiences));
        assert!(!nested.within(&FieldPath::Educations));
        let city = FieldPath::Personal(PersonalField::Address(Some(AddressField::City)));
        assert!(city.within(&FieldPath::Personal(PersonalField::Address(None))));
        assert!(!city.within(&FieldPath::Personal(PersonalField::Social(None))));
    }

    #[test]
    fn test_sibling_names_do_not_overlap() {
        let first = FieldPath::Personal(PersonalField::Firstname);
        assert!(!first.within(&FieldPath::Personal(PersonalField::Lastname)));
        assert!(first.within(&first));
    }

    #[test]
    fn test_registry_lookup() {
        assert_eq!(
            fields_for(0, 2),
            &[
                FieldPath::Personal(PersonalField::DateOfBirth),
                FieldPath::Personal(PersonalField::Nationality),
                FieldPath::Personal(PersonalField::Sex),
            ]
        );
        assert_eq!(fields_for(3, 1), &[FieldPath::Languages]);
        assert!(fields_for(1, 1).is_empty());
        assert!(fields_for(42, 0).is_empty());
    }
}
