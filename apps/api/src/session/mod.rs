// Editing sessions: the in-memory session store and the HTTP handlers that
// drive the core through it.

pub mod handlers;
pub mod store;

pub use store::{Session, SessionStore};
