//! Document Store: the canonical in-memory résumé and its CRUD discipline.
//!
//! Every operation is synchronous and total: a call that cannot apply reports
//! an `Outcome` instead of failing.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::models::{
    Achievement, Education, Experience, Internship, Outcome, PersonalInfo, Project, Publication,
    SectionEntry, SectionKind, optional,
};
use crate::document::sanitize;

// ────────────────────────────────────────────────────────────────────────────
// Ordered collection of one record type
// ────────────────────────────────────────────────────────────────────────────

/// Entries of one section in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Section<T> {
    entries: Vec<T>,
}

impl<T: SectionEntry> Section<T> {
    /// A section holding a single blank entry, the state every section starts in.
    pub fn starter() -> Self {
        Self {
            entries: vec![T::blank(Uuid::new_v4())],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    pub fn get(&self, id: Uuid) -> Option<&T> {
        self.entries.iter().find(|e| e.id() == id)
    }

    /// Entries with at least one headline field set, in order.
    pub fn populated(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().filter(|e| e.is_populated())
    }

    pub fn any_populated(&self) -> bool {
        self.entries.iter().any(|e| e.is_populated())
    }

    pub fn add(&mut self) -> Uuid {
        let id = self.fresh_id();
        self.entries.push(T::blank(id));
        id
    }

    pub fn update(&mut self, id: Uuid, field: &str, value: String) -> Outcome {
        match self.entries.iter_mut().find(|e| e.id() == id) {
            Some(entry) => match entry.set_field(field, value) {
                Ok(()) => Outcome::Applied,
                Err(e) => e.into(),
            },
            None => Outcome::NotFound,
        }
    }

    pub fn remove(&mut self, id: Uuid) -> Outcome {
        let Some(pos) = self.entries.iter().position(|e| e.id() == id) else {
            return Outcome::NotFound;
        };
        if self.entries.len() <= T::KIND.removal_policy().minimum_len() {
            return Outcome::KeptMinimum;
        }
        self.entries.remove(pos);
        Outcome::Applied
    }

    fn fresh_id(&self) -> Uuid {
        loop {
            let id = Uuid::new_v4();
            if self.get(id).is_none() {
                return id;
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Ordered string set (skills, interests)
// ────────────────────────────────────────────────────────────────────────────

/// Case-sensitive set of trimmed strings that keeps insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(Vec<String>);

impl TagSet {
    pub fn insert(&mut self, value: &str) -> Outcome {
        let value = value.trim();
        if value.is_empty() {
            return Outcome::Empty;
        }
        if self.contains(value) {
            return Outcome::Duplicate;
        }
        self.0.push(value.to_string());
        Outcome::Applied
    }

    pub fn remove(&mut self, value: &str) -> Outcome {
        match self.0.iter().position(|v| v == value) {
            Some(pos) => {
                self.0.remove(pos);
                Outcome::Applied
            }
            None => Outcome::NotFound,
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|v| v == value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

// ────────────────────────────────────────────────────────────────────────────
// The document
// ────────────────────────────────────────────────────────────────────────────

/// The whole résumé. Serializes to the document snapshot shape shared with
/// the suggestion service and the exporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub personal_info: PersonalInfo,
    pub experiences: Section<Experience>,
    pub education: Section<Education>,
    pub internships: Section<Internship>,
    pub achievements: Section<Achievement>,
    pub projects: Section<Project>,
    pub publications: Section<Publication>,
    pub skills: TagSet,
    pub interests: TagSet,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// A fresh document: empty personal info, one blank entry in every
    /// repeatable section, no skills or interests.
    pub fn new() -> Self {
        Self {
            personal_info: PersonalInfo::default(),
            experiences: Section::starter(),
            education: Section::starter(),
            internships: Section::starter(),
            achievements: Section::starter(),
            projects: Section::starter(),
            publications: Section::starter(),
            skills: TagSet::default(),
            interests: TagSet::default(),
        }
    }

    pub fn add(&mut self, kind: SectionKind) -> Uuid {
        match kind {
            SectionKind::Experience => self.experiences.add(),
            SectionKind::Education => self.education.add(),
            SectionKind::Internship => self.internships.add(),
            SectionKind::Achievement => self.achievements.add(),
            SectionKind::Project => self.projects.add(),
            SectionKind::Publication => self.publications.add(),
        }
    }

    pub fn update(&mut self, kind: SectionKind, id: Uuid, field: &str, value: String) -> Outcome {
        match kind {
            SectionKind::Experience => self.experiences.update(id, field, value),
            SectionKind::Education => self.education.update(id, field, value),
            SectionKind::Internship => self.internships.update(id, field, value),
            SectionKind::Achievement => self.achievements.update(id, field, value),
            SectionKind::Project => self.projects.update(id, field, value),
            SectionKind::Publication => self.publications.update(id, field, value),
        }
    }

    pub fn remove(&mut self, kind: SectionKind, id: Uuid) -> Outcome {
        match kind {
            SectionKind::Experience => self.experiences.remove(id),
            SectionKind::Education => self.education.remove(id),
            SectionKind::Internship => self.internships.remove(id),
            SectionKind::Achievement => self.achievements.remove(id),
            SectionKind::Project => self.projects.remove(id),
            SectionKind::Publication => self.publications.remove(id),
        }
    }

    pub fn add_skill(&mut self, value: &str) -> Outcome {
        self.skills.insert(value)
    }

    pub fn remove_skill(&mut self, value: &str) -> Outcome {
        self.skills.remove(value)
    }

    pub fn add_interest(&mut self, value: &str) -> Outcome {
        self.interests.insert(value)
    }

    pub fn remove_interest(&mut self, value: &str) -> Outcome {
        self.interests.remove(value)
    }

    /// Replaces one personal-info field. Name, phone and location are
    /// sanitized first.
    pub fn update_personal_info(&mut self, field: &str, value: String) -> Outcome {
        let info = &mut self.personal_info;
        match field {
            "fullName" => info.full_name = sanitize::full_name(&value),
            "email" => info.email = value,
            "phone" => info.phone = sanitize::phone(&value),
            "location" => info.location = sanitize::location(&value),
            "summary" => info.summary = value,
            "profileImage" => info.profile_image = optional(value),
            "linkedinUrl" => info.linkedin_url = optional(value),
            "githubUrl" => info.github_url = optional(value),
            _ => return Outcome::UnknownField,
        }
        Outcome::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section_len(doc: &Document, kind: SectionKind) -> usize {
        match kind {
            SectionKind::Experience => doc.experiences.len(),
            SectionKind::Education => doc.education.len(),
            SectionKind::Internship => doc.internships.len(),
            SectionKind::Achievement => doc.achievements.len(),
            SectionKind::Project => doc.projects.len(),
            SectionKind::Publication => doc.publications.len(),
        }
    }

    #[test]
    fn test_new_document_has_one_blank_entry_per_section() {
        let doc = Document::new();
        for kind in SectionKind::ALL {
            assert_eq!(section_len(&doc, kind), 1, "{kind}");
        }
        assert!(!doc.experiences.any_populated());
        assert!(doc.skills.is_empty());
        assert!(doc.interests.is_empty());
        assert_eq!(doc.personal_info, PersonalInfo::default());
    }

    #[test]
    fn test_add_appends_blank_entry_with_fresh_id() {
        let mut doc = Document::new();
        let first = doc.experiences.iter().next().unwrap().id;
        let id = doc.add(SectionKind::Experience);
        assert_ne!(id, first);
        assert_eq!(doc.experiences.len(), 2);
        let last = doc.experiences.iter().last().unwrap();
        assert_eq!(last.id, id);
        assert!(!last.is_populated());
    }

    #[test]
    fn test_update_addresses_entry_by_id() {
        let mut doc = Document::new();
        let id = doc.add(SectionKind::Project);
        assert_eq!(
            doc.update(SectionKind::Project, id, "title", "Folio".to_string()),
            Outcome::Applied
        );
        assert_eq!(doc.projects.get(id).unwrap().title, "Folio");
        let first = doc.projects.iter().next().unwrap();
        assert!(first.title.is_empty());
    }

    #[test]
    fn test_update_missing_id_is_not_found() {
        let mut doc = Document::new();
        let before = doc.clone();
        let outcome = doc.update(
            SectionKind::Education,
            Uuid::new_v4(),
            "degree",
            "BSc".to_string(),
        );
        assert_eq!(outcome, Outcome::NotFound);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_update_unknown_field_reported() {
        let mut doc = Document::new();
        let id = doc.internships.iter().next().unwrap().id;
        assert_eq!(
            doc.update(SectionKind::Internship, id, "position", "x".to_string()),
            Outcome::UnknownField
        );
    }

    #[test]
    fn test_last_experience_cannot_be_removed() {
        let mut doc = Document::new();
        let id = doc.experiences.iter().next().unwrap().id;
        assert_eq!(doc.remove(SectionKind::Experience, id), Outcome::KeptMinimum);
        assert_eq!(doc.experiences.len(), 1);
    }

    #[test]
    fn test_remove_when_more_than_one() {
        let mut doc = Document::new();
        let first = doc.publications.iter().next().unwrap().id;
        let second = doc.add(SectionKind::Publication);
        assert_eq!(doc.remove(SectionKind::Publication, first), Outcome::Applied);
        assert_eq!(doc.publications.len(), 1);
        assert!(doc.publications.get(second).is_some());
        assert_eq!(
            doc.remove(SectionKind::Publication, first),
            Outcome::NotFound
        );
    }

    #[test]
    fn test_only_achievement_can_be_removed_to_zero() {
        let mut doc = Document::new();
        let id = doc.achievements.iter().next().unwrap().id;
        assert_eq!(doc.remove(SectionKind::Achievement, id), Outcome::Applied);
        assert!(doc.achievements.is_empty());
        let again = doc.add(SectionKind::Achievement);
        assert_eq!(doc.achievements.len(), 1);
        assert_ne!(again, id);
    }

    #[test]
    fn test_add_skill_is_idempotent() {
        let mut doc = Document::new();
        assert_eq!(doc.add_skill("Python"), Outcome::Applied);
        assert_eq!(doc.add_skill("Python"), Outcome::Duplicate);
        assert_eq!(doc.skills.as_slice(), ["Python".to_string()]);
    }

    #[test]
    fn test_skills_are_trimmed_and_case_sensitive() {
        let mut doc = Document::new();
        assert_eq!(doc.add_skill("  Rust "), Outcome::Applied);
        assert_eq!(doc.add_skill("Rust"), Outcome::Duplicate);
        assert_eq!(doc.add_skill("rust"), Outcome::Applied);
        assert_eq!(doc.add_skill("   "), Outcome::Empty);
        assert_eq!(doc.skills.as_slice(), ["Rust", "rust"]);
    }

    #[test]
    fn test_remove_interest_exact_match() {
        let mut doc = Document::new();
        doc.add_interest("Chess");
        doc.add_interest("Hiking");
        assert_eq!(doc.remove_interest("chess"), Outcome::NotFound);
        assert_eq!(doc.remove_interest("Chess"), Outcome::Applied);
        assert_eq!(doc.interests.as_slice(), ["Hiking"]);
    }

    #[test]
    fn test_personal_info_sanitized_on_entry() {
        let mut doc = Document::new();
        doc.update_personal_info("fullName", "Jane Doe 3rd".to_string());
        doc.update_personal_info("phone", "555-1234 x9".to_string());
        doc.update_personal_info("location", "NYC #1".to_string());
        doc.update_personal_info("email", "j@x.com".to_string());
        let info = &doc.personal_info;
        assert_eq!(info.full_name, "Jane Doe rd");
        assert_eq!(info.phone, "555-1234 9");
        assert_eq!(info.location, "NYC ");
        assert_eq!(info.email, "j@x.com");
    }

    #[test]
    fn test_personal_info_unknown_field() {
        let mut doc = Document::new();
        assert_eq!(
            doc.update_personal_info("twitter", "@jane".to_string()),
            Outcome::UnknownField
        );
    }

    #[test]
    fn test_snapshot_shape() {
        let mut doc = Document::new();
        doc.add_skill("Rust");
        doc.update_personal_info("linkedinUrl", "https://linkedin.com/in/jane".to_string());
        let value = serde_json::to_value(&doc).unwrap();
        for key in [
            "personalInfo",
            "experiences",
            "education",
            "internships",
            "achievements",
            "projects",
            "publications",
            "skills",
            "interests",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert_eq!(value["skills"], serde_json::json!(["Rust"]));
        assert!(value["experiences"].is_array());
        assert_eq!(
            value["personalInfo"]["linkedinUrl"],
            "https://linkedin.com/in/jane"
        );
        assert!(value["personalInfo"].get("githubUrl").is_none());

        let recovered: Document = serde_json::from_value(value).unwrap();
        assert_eq!(recovered, doc);
    }
}
