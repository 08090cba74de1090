// Suggestions: the synchronous applier over the document and the async client
// for the external suggestion service. The client never mutates a document.

pub mod applier;
pub mod client;

pub use applier::{
    apply, apply_skills, apply_to_entry, enhance_entry, ApplyOutcome, SuggestionTag,
};
pub use client::{
    fetch_suggestions, DisabledSuggestionSource, HttpSuggestionClient, SuggestionContext,
    SuggestionKind, SuggestionPayload, SuggestionSource,
};
