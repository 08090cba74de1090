//! Renderer: document + template id → rendered view.
//!
//! The view is presentation-ready data: which sections appear, in which column,
//! with each entry already formatted. A section is emitted only when populated,
//! and within a section only populated entries are emitted. The header is
//! always emitted.

use serde::Serialize;
use uuid::Uuid;

use crate::document::{
    Achievement, Document, Education, Experience, Internship, Project, Publication, ScoreKind,
    Section, SectionEntry,
};
use crate::templates::layout::{column_plan, is_placed, ColumnSlot, SectionId};
use crate::templates::registry::{Orientation, TemplateId, ThemeTokens};

const NAME_PLACEHOLDER: &str = "Your Name";
const OPEN_ENDED: &str = "Present";

// ────────────────────────────────────────────────────────────────────────────
// View types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedView {
    pub template: TemplateId,
    pub orientation: Orientation,
    pub theme: ThemeTokens,
    pub header: HeaderBlock,
    pub columns: Vec<RenderedColumn>,
    /// Populated sections the template has no place for.
    pub omitted_sections: Vec<SectionId>,
}

impl RenderedView {
    pub fn section(&self, id: SectionId) -> Option<&RenderedSection> {
        self.columns
            .iter()
            .flat_map(|c| c.sections.iter())
            .find(|s| s.id == id)
    }

    pub fn section_ids(&self) -> Vec<SectionId> {
        self.columns
            .iter()
            .flat_map(|c| c.sections.iter().map(|s| s.id))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderBlock {
    pub name: String,
    /// Email, phone and location, in that order, when present.
    pub contacts: Vec<String>,
    pub links: Vec<ProfileLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileLink {
    pub label: &'static str,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedColumn {
    pub slot: ColumnSlot,
    pub sections: Vec<RenderedSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedSection {
    pub id: SectionId,
    pub title: &'static str,
    pub content: SectionContent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SectionContent {
    Paragraph(String),
    Tags(Vec<String>),
    Entries(Vec<RenderedEntry>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedEntry {
    pub entry_id: Uuid,
    pub heading: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subheading: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dates: Option<String>,
    /// Secondary lines such as "Technologies: ..." or "GPA: 3.8".
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Rendering
// ────────────────────────────────────────────────────────────────────────────

pub fn render(doc: &Document, template: TemplateId) -> RenderedView {
    let orientation = template.orientation();

    let columns = column_plan(orientation)
        .iter()
        .map(|plan| RenderedColumn {
            slot: plan.slot,
            sections: plan
                .sections
                .iter()
                .filter_map(|id| render_section(doc, *id))
                .collect(),
        })
        .collect();

    let omitted_sections = SectionId::ALL
        .into_iter()
        .filter(|id| !is_placed(orientation, *id) && is_section_populated(doc, *id))
        .collect();

    RenderedView {
        template,
        orientation,
        theme: template.theme(),
        header: render_header(doc),
        columns,
        omitted_sections,
    }
}

pub fn is_section_populated(doc: &Document, id: SectionId) -> bool {
    match id {
        SectionId::Summary => !doc.personal_info.summary.is_empty(),
        SectionId::Skills => !doc.skills.is_empty(),
        SectionId::Interests => !doc.interests.is_empty(),
        SectionId::Experience => doc.experiences.any_populated(),
        SectionId::Education => doc.education.any_populated(),
        SectionId::Internships => doc.internships.any_populated(),
        SectionId::Projects => doc.projects.any_populated(),
        SectionId::Publications => doc.publications.any_populated(),
        SectionId::Achievements => doc.achievements.any_populated(),
    }
}

fn render_section(doc: &Document, id: SectionId) -> Option<RenderedSection> {
    if !is_section_populated(doc, id) {
        return None;
    }
    let content = match id {
        SectionId::Summary => SectionContent::Paragraph(doc.personal_info.summary.clone()),
        SectionId::Skills => SectionContent::Tags(doc.skills.as_slice().to_vec()),
        SectionId::Interests => SectionContent::Tags(doc.interests.as_slice().to_vec()),
        SectionId::Experience => entries(&doc.experiences, experience_entry),
        SectionId::Education => entries(&doc.education, education_entry),
        SectionId::Internships => entries(&doc.internships, internship_entry),
        SectionId::Projects => entries(&doc.projects, project_entry),
        SectionId::Publications => entries(&doc.publications, publication_entry),
        SectionId::Achievements => entries(&doc.achievements, achievement_entry),
    };
    Some(RenderedSection {
        id,
        title: id.title(),
        content,
    })
}

fn entries<T: SectionEntry>(
    section: &Section<T>,
    format: fn(&T) -> RenderedEntry,
) -> SectionContent {
    SectionContent::Entries(section.populated().map(format).collect())
}

fn render_header(doc: &Document) -> HeaderBlock {
    let info = &doc.personal_info;
    let name = if info.full_name.is_empty() {
        NAME_PLACEHOLDER.to_string()
    } else {
        info.full_name.clone()
    };

    let contacts = [&info.email, &info.phone, &info.location]
        .into_iter()
        .filter(|v| !v.is_empty())
        .cloned()
        .collect();

    let links = [
        ("LinkedIn", &info.linkedin_url),
        ("GitHub", &info.github_url),
    ]
    .into_iter()
    .filter_map(|(label, url)| {
        url.as_ref().map(|url| ProfileLink {
            label,
            url: url.clone(),
        })
    })
    .collect();

    HeaderBlock {
        name,
        contacts,
        links,
        profile_image: info.profile_image.clone(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Entry formatting (identical across orientations)
// ────────────────────────────────────────────────────────────────────────────

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// "start - end", with a missing end shown as open-ended.
fn date_range(start: &str, end: &str) -> Option<String> {
    if start.is_empty() && end.is_empty() {
        return None;
    }
    let end = if end.is_empty() { OPEN_ENDED } else { end };
    Some(format!("{start} - {end}").trim().to_string())
}

/// Primary headline, falling back to the secondary one when the primary is blank.
fn headline(primary: &str, secondary: &str) -> (String, Option<String>) {
    if primary.is_empty() {
        (secondary.to_string(), None)
    } else {
        (primary.to_string(), non_empty(secondary))
    }
}

fn blank_entry(entry_id: Uuid, heading: String) -> RenderedEntry {
    RenderedEntry {
        entry_id,
        heading,
        subheading: None,
        dates: None,
        details: Vec::new(),
        body: None,
        link: None,
    }
}

fn experience_entry(exp: &Experience) -> RenderedEntry {
    let (heading, subheading) = headline(&exp.position, &exp.company);
    RenderedEntry {
        subheading,
        dates: date_range(&exp.start_date, &exp.end_date),
        body: non_empty(&exp.description),
        ..blank_entry(exp.id, heading)
    }
}

fn internship_entry(intern: &Internship) -> RenderedEntry {
    let (heading, subheading) = headline(&intern.role, &intern.company);
    RenderedEntry {
        subheading,
        dates: date_range(&intern.start_date, &intern.end_date),
        body: non_empty(&intern.description),
        ..blank_entry(intern.id, heading)
    }
}

fn education_entry(edu: &Education) -> RenderedEntry {
    let (heading, subheading) = headline(&edu.degree, &edu.institution);
    let details = edu
        .score_value
        .as_deref()
        .map(|value| match edu.score_kind {
            Some(ScoreKind::Percentage) => format!("{value}%"),
            Some(ScoreKind::Gpa) | None => format!("GPA: {value}"),
        })
        .into_iter()
        .collect();
    RenderedEntry {
        subheading,
        dates: non_empty(&edu.graduation_date),
        details,
        ..blank_entry(edu.id, heading)
    }
}

fn project_entry(project: &Project) -> RenderedEntry {
    let mut details = Vec::new();
    if !project.technologies.is_empty() {
        details.push(format!("Technologies: {}", project.technologies));
    }
    RenderedEntry {
        dates: date_range(&project.start_date, &project.end_date),
        details,
        body: non_empty(&project.description),
        link: project.project_url.clone(),
        ..blank_entry(project.id, project.title.clone())
    }
}

fn publication_entry(publication: &Publication) -> RenderedEntry {
    let mut details = Vec::new();
    if !publication.authors.is_empty() {
        details.push(format!("Authors: {}", publication.authors));
    }
    if !publication.journal.is_empty() {
        details.push(format!("Published in: {}", publication.journal));
    }
    if !publication.year.is_empty() {
        details.push(format!("Year: {}", publication.year));
    }
    if let Some(doi) = &publication.doi {
        details.push(format!("DOI: {doi}"));
    }
    RenderedEntry {
        details,
        body: publication.description.clone(),
        ..blank_entry(publication.id, publication.title.clone())
    }
}

fn achievement_entry(achievement: &Achievement) -> RenderedEntry {
    RenderedEntry {
        dates: achievement.date.clone(),
        body: non_empty(&achievement.description),
        ..blank_entry(achievement.id, achievement.title.clone())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
