//! Suggestion Applier: maps a piece of suggested content and its tag onto a
//! Document Store mutation. Synchronous, and unaware of where the content
//! came from.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::{Document, Outcome, SectionKind};

const BULLET: &str = "• ";
const DESCRIPTION_FIELD: &str = "description";

/// Sections whose entries accept achievement bullets.
pub const ACHIEVEMENT_SECTIONS: [SectionKind; 3] = [
    SectionKind::Experience,
    SectionKind::Internship,
    SectionKind::Achievement,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionTag {
    Summary,
    Skill,
    Achievement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ApplyOutcome {
    /// The summary was replaced.
    Summary { outcome: Outcome },
    /// The content went through skill insertion.
    Skill { outcome: Outcome },
    /// Nothing was written: the caller has to pick an entry in one of
    /// `sections` and write `field` through `apply_to_entry`.
    RouteToEntry {
        field: &'static str,
        sections: Vec<SectionKind>,
    },
    /// Content was written into one routed entry.
    Entry {
        section: SectionKind,
        entry_id: Uuid,
        outcome: Outcome,
    },
}

pub fn apply(doc: &mut Document, content: &str, tag: SuggestionTag) -> ApplyOutcome {
    match tag {
        SuggestionTag::Summary => ApplyOutcome::Summary {
            outcome: doc.update_personal_info("summary", content.to_string()),
        },
        SuggestionTag::Skill => ApplyOutcome::Skill {
            outcome: doc.add_skill(content),
        },
        SuggestionTag::Achievement => ApplyOutcome::RouteToEntry {
            field: DESCRIPTION_FIELD,
            sections: ACHIEVEMENT_SECTIONS.to_vec(),
        },
    }
}

/// Runs every item through skill insertion. Reports `Applied` when at least
/// one item was added, otherwise the first item's outcome.
pub fn apply_skills(doc: &mut Document, items: &[String]) -> ApplyOutcome {
    let outcomes: Vec<Outcome> = items.iter().map(|item| doc.add_skill(item)).collect();
    let outcome = if outcomes.iter().any(Outcome::is_applied) {
        Outcome::Applied
    } else {
        outcomes.first().copied().unwrap_or(Outcome::Empty)
    };
    ApplyOutcome::Skill { outcome }
}

/// Field that receives achievement content in `kind`, if any.
pub fn achievement_target(kind: SectionKind) -> Option<&'static str> {
    ACHIEVEMENT_SECTIONS
        .contains(&kind)
        .then_some(DESCRIPTION_FIELD)
}

fn description_of(doc: &Document, kind: SectionKind, id: Uuid) -> Option<String> {
    match kind {
        SectionKind::Experience => doc.experiences.get(id).map(|e| e.description.clone()),
        SectionKind::Internship => doc.internships.get(id).map(|e| e.description.clone()),
        SectionKind::Achievement => doc.achievements.get(id).map(|e| e.description.clone()),
        _ => None,
    }
}

/// Appends `content` as one bullet line to the entry's description.
pub fn apply_to_entry(doc: &mut Document, kind: SectionKind, id: Uuid, content: &str) -> Outcome {
    let Some(field) = achievement_target(kind) else {
        return Outcome::UnknownField;
    };
    let Some(current) = description_of(doc, kind, id) else {
        return Outcome::NotFound;
    };
    let line = format!("{BULLET}{}", content.trim());
    let value = if current.trim().is_empty() {
        line
    } else {
        format!("{}\n{line}", current.trim_end())
    };
    doc.update(kind, id, field, value)
}

/// Replaces the entry's description with a bullet block built from `items`.
pub fn enhance_entry(doc: &mut Document, kind: SectionKind, id: Uuid, items: &[String]) -> Outcome {
    let Some(field) = achievement_target(kind) else {
        return Outcome::UnknownField;
    };
    if items.is_empty() {
        return Outcome::Empty;
    }
    doc.update(kind, id, field, bullet_list(items))
}

/// "• a\n• b"; empty for no items.
pub fn bullet_list(items: &[String]) -> String {
    if items.is_empty() {
        return String::new();
    }
    format!("{BULLET}{}", items.join(format!("\n{BULLET}").as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_replaces_wholesale() {
        let mut doc = Document::new();
        doc.update_personal_info("summary", "old".to_string());
        let outcome = apply(&mut doc, "Seasoned engineer", SuggestionTag::Summary);
        assert_eq!(
            outcome,
            ApplyOutcome::Summary {
                outcome: Outcome::Applied
            }
        );
        assert_eq!(doc.personal_info.summary, "Seasoned engineer");
    }

    #[test]
    fn test_skill_is_deduplicated() {
        let mut doc = Document::new();
        apply(&mut doc, "Python", SuggestionTag::Skill);
        let outcome = apply(&mut doc, "Python", SuggestionTag::Skill);
        assert_eq!(
            outcome,
            ApplyOutcome::Skill {
                outcome: Outcome::Duplicate
            }
        );
        assert_eq!(doc.skills.len(), 1);
    }

    #[test]
    fn test_apply_skills_adds_every_item() {
        let mut doc = Document::new();
        doc.add_skill("Go");
        let items = vec!["Rust".to_string(), "Go".to_string(), "SQL".to_string()];
        assert_eq!(
            apply_skills(&mut doc, &items),
            ApplyOutcome::Skill {
                outcome: Outcome::Applied
            }
        );
        assert_eq!(doc.skills.as_slice(), ["Go", "Rust", "SQL"]);
        assert_eq!(
            apply_skills(&mut doc, &["Rust".to_string()]),
            ApplyOutcome::Skill {
                outcome: Outcome::Duplicate
            }
        );
    }

    #[test]
    fn test_achievement_routes_without_writing() {
        let mut doc = Document::new();
        let before = doc.clone();
        let outcome = apply(&mut doc, "Cut costs 30%", SuggestionTag::Achievement);
        assert_eq!(
            outcome,
            ApplyOutcome::RouteToEntry {
                field: "description",
                sections: ACHIEVEMENT_SECTIONS.to_vec(),
            }
        );
        assert_eq!(doc, before);
    }

    #[test]
    fn test_apply_to_entry_appends_bullets() {
        let mut doc = Document::new();
        let id = doc.experiences.iter().next().unwrap().id;
        assert_eq!(
            apply_to_entry(&mut doc, SectionKind::Experience, id, "Cut costs 30%"),
            Outcome::Applied
        );
        assert_eq!(
            apply_to_entry(&mut doc, SectionKind::Experience, id, " Led 5 engineers "),
            Outcome::Applied
        );
        assert_eq!(
            doc.experiences.get(id).unwrap().description,
            "• Cut costs 30%\n• Led 5 engineers"
        );
    }

    #[test]
    fn test_apply_to_entry_rejects_other_sections() {
        let mut doc = Document::new();
        let id = doc.projects.iter().next().unwrap().id;
        assert_eq!(
            apply_to_entry(&mut doc, SectionKind::Project, id, "x"),
            Outcome::UnknownField
        );
        assert_eq!(
            apply_to_entry(&mut doc, SectionKind::Internship, Uuid::new_v4(), "x"),
            Outcome::NotFound
        );
    }

    #[test]
    fn test_enhance_entry_replaces_with_bullets() {
        let mut doc = Document::new();
        let id = doc.achievements.iter().next().unwrap().id;
        apply_to_entry(&mut doc, SectionKind::Achievement, id, "old");
        let items = vec!["First".to_string(), "Second".to_string()];
        assert_eq!(
            enhance_entry(&mut doc, SectionKind::Achievement, id, &items),
            Outcome::Applied
        );
        assert_eq!(
            doc.achievements.get(id).unwrap().description,
            "• First\n• Second"
        );
        assert_eq!(
            enhance_entry(&mut doc, SectionKind::Achievement, id, &[]),
            Outcome::Empty
        );
    }

    #[test]
    fn test_bullet_list() {
        assert_eq!(bullet_list(&[]), "");
        assert_eq!(bullet_list(&["one".to_string()]), "• one");
    }

    #[test]
    fn test_achievement_target() {
        assert_eq!(achievement_target(SectionKind::Internship), Some("description"));
        assert_eq!(achievement_target(SectionKind::Publication), None);
    }
}
