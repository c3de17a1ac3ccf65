pub(super) const ENTRIES: &[(&str, &str)] = &[
    // validation
    ("validation.required", "This field is required"),
    ("validation.tooLong", "Must be at most 50 characters"),
    ("validation.invalidEmail", "Enter a valid email address"),
    ("validation.invalidPhone", "Enter a valid phone number"),
    ("validation.invalidDate", "Enter a valid date (YYYY-MM-DD)"),
    ("validation.dateInFuture", "The date must be in the past"),
    ("validation.endDateRequired", "End date is required unless ongoing"),
    ("validation.endBeforeStart", "End date cannot be before start date"),
    ("validation.invalidUrl", "Enter a full link starting with http:// or https://"),
    ("validation.atLeastOneNationality", "Select at least one nationality"),
    ("validation.atLeastOneEducation", "At least one education entry is required"),
    ("validation.atLeastOneExperience", "Add at least one experience or untick the box"),
    ("validation.atLeastOneSkill", "At least one skill is required"),
    ("validation.atLeastOneLanguage", "At least one language is required"),
    ("validation.invalidSkillLevel", "Skill level must be between 1 and 5"),
    ("validation.invalidLanguageLevel", "Choose a level from A1 to C2 or native"),
    ("validation.blankEntry", "This entry cannot be empty"),
    // labels
    ("labels.personalInfo", "Personal information"),
    ("labels.personalInfo.firstname", "First name"),
    ("labels.personalInfo.lastname", "Last name"),
    ("labels.personalInfo.email", "Email"),
    ("labels.personalInfo.phone", "Phone"),
    ("labels.personalInfo.dateofBirth", "Date of birth"),
    ("labels.personalInfo.nationality", "Nationality"),
    ("labels.personalInfo.sex", "Sex"),
    ("labels.personalInfo.address", "Address"),
    ("labels.personalInfo.address.street", "Street"),
    ("labels.personalInfo.address.postalCode", "Postal code"),
    ("labels.personalInfo.address.city", "City"),
    ("labels.personalInfo.address.country", "Country"),
    ("labels.personalInfo.social", "Social links"),
    ("labels.personalInfo.social.linkedin", "LinkedIn"),
    ("labels.personalInfo.social.github", "GitHub"),
    ("labels.personalInfo.social.website", "Website"),
    ("labels.educations", "Education"),
    ("labels.educations.school", "School"),
    ("labels.educations.degree", "Degree"),
    ("labels.educations.startDate", "Start date"),
    ("labels.educations.endDate", "End date"),
    ("labels.workExperience", "Work experience"),
    ("labels.workExperience.experiences", "Experiences"),
    ("labels.workExperience.experiences.company", "Company"),
    ("labels.workExperience.experiences.position", "Position"),
    ("labels.workExperience.experiences.startDate", "Start date"),
    ("labels.workExperience.experiences.endDate", "End date"),
    ("labels.workExperience.experiences.responsibilities", "Responsibility"),
    ("labels.skills", "Skills"),
    ("labels.skills.name", "Skill"),
    ("labels.skills.level", "Skill level"),
    ("labels.languages", "Languages"),
    ("labels.languages.name", "Language"),
    ("labels.languages.level", "Language level"),
    ("labels.hobbies", "Hobbies"),
    ("labels.hobbies.name", "Hobby"),
    // flow
    ("submission.failed", "Your CV could not be saved. Please try again."),
    ("submission.invalid", "Some information is missing or invalid"),
    ("submission.inFlight", "Your CV is already being saved"),
    ("edit.notFound", "No CV was found for this account. Redirecting…"),
    ("edit.fetchFailed", "Your CV could not be loaded"),
];
