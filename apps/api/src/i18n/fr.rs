pub(super) const ENTRIES: &[(&str, &str)] = &[
    // validation
    ("validation.required", "Ce champ est obligatoire"),
    ("validation.tooLong", "50 caractères maximum"),
    ("validation.invalidEmail", "Adresse e-mail invalide"),
    ("validation.invalidPhone", "Numéro de téléphone invalide"),
    ("validation.invalidDate", "Date invalide (AAAA-MM-JJ)"),
    ("validation.dateInFuture", "La date doit être dans le passé"),
    ("validation.endDateRequired", "La date de fin est obligatoire sauf si en cours"),
    ("validation.endBeforeStart", "La date de fin ne peut pas précéder la date de début"),
    ("validation.invalidUrl", "Saisissez un lien complet commençant par http:// ou https://"),
    ("validation.atLeastOneNationality", "Sélectionnez au moins une nationalité"),
    ("validation.atLeastOneEducation", "Au moins une formation est requise"),
    ("validation.atLeastOneExperience", "Ajoutez au moins une expérience ou décochez la case"),
    ("validation.atLeastOneSkill", "Au moins une compétence est requise"),
    ("validation.atLeastOneLanguage", "Au moins une langue est requise"),
    ("validation.invalidSkillLevel", "Le niveau doit être compris entre 1 et 5"),
    ("validation.invalidLanguageLevel", "Choisissez un niveau de A1 à C2 ou langue maternelle"),
    ("validation.blankEntry", "Cette entrée ne peut pas être vide"),
    // labels
    ("labels.personalInfo", "Informations personnelles"),
    ("labels.personalInfo.firstname", "Prénom"),
    ("labels.personalInfo.lastname", "Nom"),
    ("labels.personalInfo.email", "E-mail"),
    ("labels.personalInfo.phone", "Téléphone"),
    ("labels.personalInfo.dateofBirth", "Date de naissance"),
    ("labels.personalInfo.nationality", "Nationalité"),
    ("labels.personalInfo.sex", "Sexe"),
    ("labels.personalInfo.address", "Adresse"),
    ("labels.personalInfo.address.street", "Rue"),
    ("labels.personalInfo.address.postalCode", "Code postal"),
    ("labels.personalInfo.address.city", "Ville"),
    ("labels.personalInfo.address.country", "Pays"),
    ("labels.personalInfo.social", "Réseaux"),
    ("labels.personalInfo.social.linkedin", "LinkedIn"),
    ("labels.personalInfo.social.github", "GitHub"),
    ("labels.personalInfo.social.website", "Site web"),
    ("labels.educations", "Formation"),
    ("labels.educations.school", "Établissement"),
    ("labels.educations.degree", "Diplôme"),
    ("labels.educations.startDate", "Date de début"),
    ("labels.educations.endDate", "Date de fin"),
    ("labels.workExperience", "Expérience professionnelle"),
    ("labels.workExperience.experiences", "Expériences"),
    ("labels.workExperience.experiences.company", "Entreprise"),
    ("labels.workExperience.experiences.position", "Poste"),
    ("labels.workExperience.experiences.startDate", "Date de début"),
    ("labels.workExperience.experiences.endDate", "Date de fin"),
    ("labels.workExperience.experiences.responsibilities", "Responsabilité"),
    ("labels.skills", "Compétences"),
    ("labels.skills.name", "Compétence"),
    ("labels.skills.level", "Niveau de compétence"),
    ("labels.languages", "Langues"),
    ("labels.languages.name", "Langue"),
    ("labels.languages.level", "Niveau de langue"),
    ("labels.hobbies", "Loisirs"),
    ("labels.hobbies.name", "Loisir"),
    // flow
    ("submission.failed", "Votre CV n'a pas pu être enregistré. Veuillez réessayer."),
    ("submission.invalid", "Certaines informations sont manquantes ou invalides"),
    ("submission.inFlight", "Votre CV est déjà en cours d'enregistrement"),
    ("edit.notFound", "Aucun CV trouvé pour ce compte. Redirection…"),
    ("edit.fetchFailed", "Votre CV n'a pas pu être chargé"),
];
