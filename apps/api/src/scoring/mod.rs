// ATS Scoring Engine: a pure, deterministic rubric over the document.
// No I/O and no logging; handlers call `score` on a cloned snapshot.

pub mod ats;

pub use ats::{score, AtsReport};
