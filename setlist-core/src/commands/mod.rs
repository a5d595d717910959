//! Commands module - service layer for setlist operations

mod generate;
mod listing;
pub(crate) mod service;

pub use generate::{generate, GenerateInput};
pub use listing::{filtered_accounts, instance_permission_sets};
pub use service::SetlistService;
