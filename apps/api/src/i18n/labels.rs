use crate::i18n::Catalog;
use crate::wizard::fields::{FieldPath, Segment};

/// Human label of a field, e.g. `workExperience.experiences.0.company`
/// renders as "Company #1". Indices are shown 1-based.
pub fn field_label(path: &FieldPath, catalog: &Catalog) -> String {
    let mut key = String::from("labels");
    let mut positions = Vec::new();
    for segment in path.segments() {
        match segment {
            Segment::Key(k) => {
                key.push('.');
                key.push_str(k);
            }
            Segment::Index(i) => positions.push((i + 1).to_string()),
        }
    }

    let label = catalog.t(&key);
    if positions.is_empty() {
        label
    } else {
        format!("{label} #{}", positions.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Locale;
    use crate::wizard::fields::{EducationField, PersonalField};

    #[test]
    fn test_plain_field_label() {
        let fr = Catalog::new(Locale::Fr);
        assert_eq!(
            field_label(&FieldPath::Personal(PersonalField::Firstname), &fr),
            "Prénom"
        );
    }

    #[test]
    fn test_indexed_labels_are_one_based() {
        let en = Catalog::new(Locale::En);
        assert_eq!(
            field_label(&FieldPath::Education(1, EducationField::Degree), &en),
            "Degree #2"
        );
        assert_eq!(
            field_label(&FieldPath::Responsibility { experience: 0, line: 2 }, &en),
            "Responsibility #1.3"
        );
        assert_eq!(field_label(&FieldPath::Languages, &en), "Languages");
    }
}
