//! authgate admin console.
//!
//! ARCHITECTURE
//! ============
//! `api` talks to the server, `store` keeps the session token between runs,
//! `console` is the view model every command drives, and `render` turns its
//! state into terminal output. `messages` holds the localized toast texts.

pub mod api;
pub mod console;
pub mod messages;
pub mod render;
pub mod store;
