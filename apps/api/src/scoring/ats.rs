//! ATS compatibility score and checklist.
//!
//! Rubric (points, capped per category):
//! - contact: 5 each for full name, email, phone, location (max 20)
//! - summary: 15 when longer than 50 characters
//! - experience: 5 per entry with company and position (max 25)
//! - education: 7.5 per entry with institution and degree (max 15)
//! - skills: 1.5 per skill (max 15)
//! - bonus: 5 for more than 5 skills, 5 for a summary longer than 100 characters
//!
//! The category caps sum to exactly 100, so the rounded total never exceeds it.

use serde::{Deserialize, Serialize};

use crate::document::{Document, Education, Experience};

const CONTACT_FIELD_POINTS: f64 = 5.0;
const SUMMARY_POINTS: f64 = 15.0;
const SUMMARY_MIN_CHARS: usize = 50;
const EXPERIENCE_POINTS: f64 = 5.0;
const EXPERIENCE_CAP: f64 = 25.0;
const EDUCATION_POINTS: f64 = 7.5;
const EDUCATION_CAP: f64 = 15.0;
const SKILL_POINTS: f64 = 1.5;
const SKILLS_CAP: f64 = 15.0;
const SKILLS_BONUS_OVER: usize = 5;
const LONG_SUMMARY_OVER: usize = 100;
const BONUS_POINTS: f64 = 5.0;

const MIN_SKILLS_CHECK: usize = 5;
const RECOMMENDED_SUMMARY_CHARS: usize = 100;

const EXCELLENT_FROM: u32 = 80;
const GOOD_FROM: u32 = 60;

// ────────────────────────────────────────────────────────────────────────────
// Report types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreStatus {
    Excellent,
    Good,
    #[serde(rename = "Needs Work")]
    NeedsWork,
}

impl ScoreStatus {
    pub fn from_value(value: u32) -> Self {
        if value >= EXCELLENT_FROM {
            ScoreStatus::Excellent
        } else if value >= GOOD_FROM {
            ScoreStatus::Good
        } else {
            ScoreStatus::NeedsWork
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub label: String,
    pub passed: bool,
    pub critical: bool,
}

/// A concrete tip shown next to the checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Improvement {
    pub title: String,
    pub detail: String,
}

/// Unrounded points per rubric category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub contact: f64,
    pub summary: f64,
    pub experience: f64,
    pub education: f64,
    pub skills: f64,
    pub bonus: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.contact + self.summary + self.experience + self.education + self.skills + self.bonus
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsReport {
    /// 0 – 100
    pub value: u32,
    pub status: ScoreStatus,
    pub breakdown: ScoreBreakdown,
    pub checklist: Vec<CheckResult>,
    pub passed_checks: usize,
    pub critical_issues: usize,
    pub improvements: Vec<Improvement>,
}

impl AtsReport {
    /// False while any critical check fails.
    pub fn export_ready(&self) -> bool {
        self.critical_issues == 0
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

pub fn score(doc: &Document) -> AtsReport {
    let breakdown = compute_breakdown(doc);
    // f64::round rounds half away from zero, i.e. half up for non-negative totals.
    let value = (breakdown.total().round() as u32).min(100);

    let checklist = build_checklist(doc);
    let passed_checks = checklist.iter().filter(|c| c.passed).count();
    let critical_issues = checklist.iter().filter(|c| c.critical && !c.passed).count();

    AtsReport {
        value,
        status: ScoreStatus::from_value(value),
        breakdown,
        checklist,
        passed_checks,
        critical_issues,
        improvements: build_improvements(doc),
    }
}

fn compute_breakdown(doc: &Document) -> ScoreBreakdown {
    let info = &doc.personal_info;
    let summary_len = info.summary_len();

    let contact = [&info.full_name, &info.email, &info.phone, &info.location]
        .iter()
        .filter(|f| !f.is_empty())
        .count() as f64
        * CONTACT_FIELD_POINTS;

    let summary = if summary_len > SUMMARY_MIN_CHARS {
        SUMMARY_POINTS
    } else {
        0.0
    };

    let complete_experiences = doc
        .experiences
        .iter()
        .filter(|e| has_role(e))
        .count() as f64;
    let experience = (complete_experiences * EXPERIENCE_POINTS).min(EXPERIENCE_CAP);

    let complete_education = doc
        .education
        .iter()
        .filter(|e| has_degree(e))
        .count() as f64;
    let education = (complete_education * EDUCATION_POINTS).min(EDUCATION_CAP);

    let skills = (doc.skills.len() as f64 * SKILL_POINTS).min(SKILLS_CAP);

    let mut bonus = 0.0;
    if doc.skills.len() > SKILLS_BONUS_OVER {
        bonus += BONUS_POINTS;
    }
    if summary_len > LONG_SUMMARY_OVER {
        bonus += BONUS_POINTS;
    }

    ScoreBreakdown {
        contact,
        summary,
        experience,
        education,
        skills,
        bonus,
    }
}

fn has_role(exp: &Experience) -> bool {
    !exp.company.is_empty() && !exp.position.is_empty()
}

fn has_degree(edu: &Education) -> bool {
    !edu.institution.is_empty() && !edu.degree.is_empty()
}

fn has_quantified_experience(doc: &Document) -> bool {
    doc.experiences
        .iter()
        .any(|e| e.description.chars().any(|c| c.is_ascii_digit()))
}

fn check(label: &str, passed: bool, critical: bool) -> CheckResult {
    CheckResult {
        label: label.to_string(),
        passed,
        critical,
    }
}

fn build_checklist(doc: &Document) -> Vec<CheckResult> {
    let info = &doc.personal_info;
    let summary_len = info.summary_len();

    vec![
        check(
            "Contact Information Complete",
            !info.full_name.is_empty() && !info.email.is_empty() && !info.phone.is_empty(),
            true,
        ),
        check(
            "Professional Summary Present",
            summary_len > SUMMARY_MIN_CHARS,
            true,
        ),
        check(
            "Work Experience Detailed",
            doc.experiences
                .iter()
                .any(|e| has_role(e) && !e.description.is_empty()),
            true,
        ),
        check(
            "Education Information",
            doc.education.iter().any(has_degree),
            false,
        ),
        check(
            "Relevant Skills Listed",
            doc.skills.len() >= MIN_SKILLS_CHECK,
            false,
        ),
        check("Quantified Achievements", has_quantified_experience(doc), false),
        check(
            "Appropriate Resume Length",
            summary_len >= RECOMMENDED_SUMMARY_CHARS,
            false,
        ),
    ]
}

fn build_improvements(doc: &Document) -> Vec<Improvement> {
    let mut tips = Vec::new();

    if doc.personal_info.summary.is_empty() {
        tips.push(Improvement {
            title: "Add a Professional Summary".to_string(),
            detail: "Include a 2-3 sentence summary highlighting your key qualifications."
                .to_string(),
        });
    }
    if doc.skills.len() < MIN_SKILLS_CHECK {
        tips.push(Improvement {
            title: "Add More Skills".to_string(),
            detail: "Include at least 5-10 relevant skills to improve keyword matching."
                .to_string(),
        });
    }
    if !has_quantified_experience(doc) {
        tips.push(Improvement {
            title: "Quantify Your Achievements".to_string(),
            detail: "Add numbers, percentages, or metrics to your work experience.".to_string(),
        });
    }

    tips
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
