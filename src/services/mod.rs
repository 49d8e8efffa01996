//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the auth business logic — session resolution, the
//! access decision table, and the credential exchange — so route handlers
//! stay focused on cookies, redirects, and response shapes.

pub mod auth;
pub mod gate;
pub mod session;
