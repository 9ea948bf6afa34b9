//! In-memory tracker store.
//!
//! Used by tests and by the server when no database is configured. The store
//! can be pre-populated from a JSON seed document.

mod seed;
mod tracker;

pub use seed::{SeedDocument, SeedEmployee, SeedError, SeedTask, load_seed_file};
pub use tracker::InMemoryTrackerRepository;
