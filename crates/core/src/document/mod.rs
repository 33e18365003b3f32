//! Document module - the persisted root document, its migrations and mutations.

mod app_data;
mod migration;
mod mutation;

pub use app_data::AppData;
pub use migration::{
    normalize_document, normalize_value, LoadOutcome, LoadSource, MigrationStep, MIGRATION_STEPS,
};
pub use mutation::{apply_mutation, Mutation};

#[cfg(test)]
mod migration_tests;
