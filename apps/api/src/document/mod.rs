// Document Store: the résumé held in memory for one editing session.
// Owns entity types, entry-time sanitization and the CRUD discipline.

pub mod models;
pub mod sanitize;
pub mod store;

pub use models::{
    Achievement, Education, Experience, Internship, Outcome, Project, Publication, ScoreKind,
    SectionEntry, SectionKind,
};
pub use store::{Document, Section};
