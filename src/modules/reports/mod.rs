// Reports module
//
// Query Engine (list pages, member profile) and Report Builder (dashboard,
// balance-due, sales, charts, CSV export) over the entity store.

pub mod controllers;
pub mod engine;
pub mod export;
pub mod filters;
pub mod models;
pub mod services;

pub use services::{ListingService, ReportService};
