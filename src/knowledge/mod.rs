//! Knowledge base: Q&A pairs and priced materials.
//!
//! The [`KnowledgeStore`] trait is the query contract; [`SqliteKnowledgeStore`]
//! is the bundled implementation. [`KnowledgeLookup`] layers the search
//! pipeline on top (exact hash, then substring, then "not found").
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use stroyka_core::knowledge::{seed_defaults, KnowledgeLookup, SearchOutcome, SqliteKnowledgeStore};
//!
//! let store = Arc::new(SqliteKnowledgeStore::in_memory().unwrap());
//! seed_defaults(&store).unwrap();
//!
//! let lookup = KnowledgeLookup::new(store);
//! let outcome = lookup.search(42, "Какое сечение провода для розеток?").unwrap();
//! assert!(matches!(outcome, SearchOutcome::Exact { .. }));
//! ```

mod key;
mod lookup;
mod schema;
mod seed;
mod store;
mod types;

pub use key::{normalize, QuestionKey};
pub use lookup::{KnowledgeLookup, SearchOutcome, Suggestion};
pub use schema::{get_schema_version, initialize_schema, is_initialized, SCHEMA_VERSION};
pub use seed::{base_materials, base_questions, seed_defaults, SeedReport};
pub use store::{KnowledgeStore, SqliteKnowledgeStore};
pub use types::{CategoryCount, EntryId, MaterialEntry, QAEntry, StoreStatistics};
