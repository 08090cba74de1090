//! Résumé entities: one fixed record type per section.
//!
//! Field names on the wire are the camelCase names of the document snapshot
//! (`fullName`, `startDate`, ...). The same names address fields in
//! `update` calls, so every record owns a `set_field` that maps a wire name to
//! its statically-typed field.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ────────────────────────────────────────────────────────────────────────────
// Section kinds and policies
// ────────────────────────────────────────────────────────────────────────────

/// The repeatable sections of a résumé.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    #[serde(alias = "experiences")]
    Experience,
    Education,
    #[serde(alias = "internships")]
    Internship,
    #[serde(alias = "achievements")]
    Achievement,
    #[serde(alias = "projects")]
    Project,
    #[serde(alias = "publications")]
    Publication,
}

impl SectionKind {
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Internship,
        SectionKind::Achievement,
        SectionKind::Project,
        SectionKind::Publication,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Internship => "internship",
            SectionKind::Achievement => "achievement",
            SectionKind::Project => "project",
            SectionKind::Publication => "publication",
        }
    }

    /// How far a section may shrink through `remove`.
    ///
    /// Achievements are optional on a résumé and may be cleared entirely;
    /// every other section keeps one row so the editor always has a form to fill.
    pub fn removal_policy(&self) -> RemovalPolicy {
        match self {
            SectionKind::Achievement => RemovalPolicy::AllowEmpty,
            _ => RemovalPolicy::KeepAtLeastOne,
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalPolicy {
    /// The last remaining entry cannot be removed.
    KeepAtLeastOne,
    /// The section may become empty.
    AllowEmpty,
}

impl RemovalPolicy {
    pub fn minimum_len(&self) -> usize {
        match self {
            RemovalPolicy::KeepAtLeastOne => 1,
            RemovalPolicy::AllowEmpty => 0,
        }
    }
}

/// Result of a document mutation. Mutations never fail; a call that changes
/// nothing reports why.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Applied,
    /// No entry (or set member) matched the address.
    NotFound,
    /// The field name is not part of the addressed record.
    UnknownField,
    /// The value cannot be stored in the field (e.g. an unsupported score kind).
    InvalidValue,
    /// Removal refused by the section's `RemovalPolicy`.
    KeptMinimum,
    /// Set insert of a value already present.
    Duplicate,
    /// Set insert of a value that is empty after trimming.
    Empty,
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Unknown,
    InvalidValue,
}

impl From<FieldError> for Outcome {
    fn from(e: FieldError) -> Self {
        match e {
            FieldError::Unknown => Outcome::UnknownField,
            FieldError::InvalidValue => Outcome::InvalidValue,
        }
    }
}

/// Common behaviour of every repeatable record.
pub trait SectionEntry: Clone {
    const KIND: SectionKind;

    /// A record with the given id and every semantic field empty.
    fn blank(id: Uuid) -> Self;

    fn id(&self) -> Uuid;

    fn set_field(&mut self, field: &str, value: String) -> Result<(), FieldError>;

    /// True if at least one headline field is non-empty.
    fn is_populated(&self) -> bool;
}

/// Empty strings are stored as absent for optional fields.
pub(crate) fn optional(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Personal info (singleton)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub summary: String,
    /// Encoded image (data URL); passed through untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
}

impl PersonalInfo {
    /// Summary length in characters, the unit every summary threshold uses.
    pub fn summary_len(&self) -> usize {
        self.summary.chars().count()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Repeatable records
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: Uuid,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub description: String,
}

impl SectionEntry for Experience {
    const KIND: SectionKind = SectionKind::Experience;

    fn blank(id: Uuid) -> Self {
        Self {
            id,
            company: String::new(),
            position: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            description: String::new(),
        }
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_field(&mut self, field: &str, value: String) -> Result<(), FieldError> {
        match field {
            "company" => self.company = value,
            "position" => self.position = value,
            "startDate" => self.start_date = value,
            "endDate" => self.end_date = value,
            "description" => self.description = value,
            _ => return Err(FieldError::Unknown),
        }
        Ok(())
    }

    fn is_populated(&self) -> bool {
        !self.company.is_empty() || !self.position.is_empty()
    }
}

/// How an education score is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreKind {
    #[serde(alias = "cgpa")]
    Gpa,
    Percentage,
}

impl FromStr for ScoreKind {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gpa" | "cgpa" => Ok(ScoreKind::Gpa),
            "percentage" => Ok(ScoreKind::Percentage),
            _ => Err(FieldError::InvalidValue),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: Uuid,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub graduation_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_kind: Option<ScoreKind>,
}

impl SectionEntry for Education {
    const KIND: SectionKind = SectionKind::Education;

    fn blank(id: Uuid) -> Self {
        Self {
            id,
            institution: String::new(),
            degree: String::new(),
            graduation_date: String::new(),
            score_value: None,
            score_kind: None,
        }
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_field(&mut self, field: &str, value: String) -> Result<(), FieldError> {
        match field {
            "institution" => self.institution = value,
            "degree" => self.degree = value,
            "graduationDate" => self.graduation_date = value,
            "scoreValue" => self.score_value = optional(value),
            "scoreKind" => {
                self.score_kind = if value.trim().is_empty() {
                    None
                } else {
                    Some(value.parse()?)
                }
            }
            _ => return Err(FieldError::Unknown),
        }
        Ok(())
    }

    fn is_populated(&self) -> bool {
        !self.institution.is_empty() || !self.degree.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Internship {
    pub id: Uuid,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub description: String,
}

impl SectionEntry for Internship {
    const KIND: SectionKind = SectionKind::Internship;

    fn blank(id: Uuid) -> Self {
        Self {
            id,
            company: String::new(),
            role: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            description: String::new(),
        }
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_field(&mut self, field: &str, value: String) -> Result<(), FieldError> {
        match field {
            "company" => self.company = value,
            "role" => self.role = value,
            "startDate" => self.start_date = value,
            "endDate" => self.end_date = value,
            "description" => self.description = value,
            _ => return Err(FieldError::Unknown),
        }
        Ok(())
    }

    fn is_populated(&self) -> bool {
        !self.company.is_empty() || !self.role.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: Uuid,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl SectionEntry for Achievement {
    const KIND: SectionKind = SectionKind::Achievement;

    fn blank(id: Uuid) -> Self {
        Self {
            id,
            title: String::new(),
            description: String::new(),
            date: None,
        }
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_field(&mut self, field: &str, value: String) -> Result<(), FieldError> {
        match field {
            "title" => self.title = value,
            "description" => self.description = value,
            "date" => self.date = optional(value),
            _ => return Err(FieldError::Unknown),
        }
        Ok(())
    }

    fn is_populated(&self) -> bool {
        !self.title.is_empty() || !self.description.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Free text, e.g. "Rust, Postgres, Kafka".
    #[serde(default)]
    pub technologies: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_url: Option<String>,
}

impl SectionEntry for Project {
    const KIND: SectionKind = SectionKind::Project;

    fn blank(id: Uuid) -> Self {
        Self {
            id,
            title: String::new(),
            description: String::new(),
            technologies: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            project_url: None,
        }
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_field(&mut self, field: &str, value: String) -> Result<(), FieldError> {
        match field {
            "title" => self.title = value,
            "description" => self.description = value,
            "technologies" => self.technologies = value,
            "startDate" => self.start_date = value,
            "endDate" => self.end_date = value,
            "projectUrl" => self.project_url = optional(value),
            _ => return Err(FieldError::Unknown),
        }
        Ok(())
    }

    // Technologies alone do not make a project worth showing.
    fn is_populated(&self) -> bool {
        !self.title.is_empty() || !self.description.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    pub id: Uuid,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub authors: String,
    #[serde(default)]
    pub journal: String,
    #[serde(default)]
    pub year: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SectionEntry for Publication {
    const KIND: SectionKind = SectionKind::Publication;

    fn blank(id: Uuid) -> Self {
        Self {
            id,
            title: String::new(),
            authors: String::new(),
            journal: String::new(),
            year: String::new(),
            doi: None,
            description: None,
        }
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_field(&mut self, field: &str, value: String) -> Result<(), FieldError> {
        match field {
            "title" => self.title = value,
            "authors" => self.authors = value,
            "journal" => self.journal = value,
            "year" => self.year = value,
            "doi" => self.doi = optional(value),
            "description" => self.description = optional(value),
            _ => return Err(FieldError::Unknown),
        }
        Ok(())
    }

    fn is_populated(&self) -> bool {
        !self.title.is_empty() || !self.authors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_kind_accepts_plural_alias() {
        let kind: SectionKind = serde_json::from_str(r#""experiences""#).unwrap();
        assert_eq!(kind, SectionKind::Experience);
        let kind: SectionKind = serde_json::from_str(r#""education""#).unwrap();
        assert_eq!(kind, SectionKind::Education);
    }

    #[test]
    fn test_only_achievements_may_become_empty() {
        for kind in SectionKind::ALL {
            let expected = if kind == SectionKind::Achievement {
                RemovalPolicy::AllowEmpty
            } else {
                RemovalPolicy::KeepAtLeastOne
            };
            assert_eq!(kind.removal_policy(), expected, "{kind}");
        }
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mut exp = Experience::blank(Uuid::new_v4());
        assert_eq!(
            exp.set_field("role", "Engineer".to_string()),
            Err(FieldError::Unknown)
        );
        assert!(exp.position.is_empty());
    }

    #[test]
    fn test_score_kind_parsing() {
        let mut edu = Education::blank(Uuid::new_v4());
        edu.set_field("scoreKind", "percentage".to_string()).unwrap();
        assert_eq!(edu.score_kind, Some(ScoreKind::Percentage));
        edu.set_field("scoreKind", "CGPA".to_string()).unwrap();
        assert_eq!(edu.score_kind, Some(ScoreKind::Gpa));
        assert_eq!(
            edu.set_field("scoreKind", "letter".to_string()),
            Err(FieldError::InvalidValue)
        );
        edu.set_field("scoreKind", String::new()).unwrap();
        assert_eq!(edu.score_kind, None);
    }

    #[test]
    fn test_project_with_only_technologies_is_not_populated() {
        let mut project = Project::blank(Uuid::new_v4());
        project
            .set_field("technologies", "Rust, Tokio".to_string())
            .unwrap();
        assert!(!project.is_populated());
        project.set_field("title", "Folio".to_string()).unwrap();
        assert!(project.is_populated());
    }

    #[test]
    fn test_optional_fields_cleared_by_empty_value() {
        let mut publication = Publication::blank(Uuid::new_v4());
        publication
            .set_field("doi", "10.1000/xyz".to_string())
            .unwrap();
        assert_eq!(publication.doi.as_deref(), Some("10.1000/xyz"));
        publication.set_field("doi", "  ".to_string()).unwrap();
        assert_eq!(publication.doi, None);
    }

    #[test]
    fn test_snapshot_field_names_are_camel_case() {
        let mut exp = Experience::blank(Uuid::nil());
        exp.start_date = "2021-01".to_string();
        let value = serde_json::to_value(&exp).unwrap();
        assert_eq!(value["startDate"], "2021-01");
        assert!(value.get("start_date").is_none());

        let edu = Education::blank(Uuid::nil());
        let value = serde_json::to_value(&edu).unwrap();
        assert!(value.get("scoreKind").is_none());
    }
}
