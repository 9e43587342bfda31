//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own SQL and rule matching so route handlers can stay
//! focused on protocol translation and auth plumbing.

pub mod events;
pub mod ip_rule;
pub mod license;
pub mod rules;
pub mod token;
pub mod version_rule;
