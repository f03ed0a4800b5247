//! Gymdesk back-office library
//!
//! Record operations, list queries and reports for a single gym over an
//! injected entity store.

pub mod app;
pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;
pub mod store;

pub use app::AppServices;
pub use store::EntityStore;
