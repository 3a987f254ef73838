//! # stroyka-core
//!
//! Query routing and calculation engine for a construction chat assistant.
//!
//! ## Core Components
//!
//! - **Calc**: Formula library, command parser and result formatter
//! - **Knowledge**: Q&A and material store with exact-then-substring lookup
//! - **Router**: Intent routing for free text and follow-up actions
//! - **Projects**: Stage templates, cost breakdown and schedules
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use stroyka_core::{AssistantConfig, Intent, RequestContext, Router};
//! use stroyka_core::knowledge::{seed_defaults, SqliteKnowledgeStore};
//!
//! let store = Arc::new(SqliteKnowledgeStore::in_memory().unwrap());
//! seed_defaults(&store).unwrap();
//!
//! let router = Router::new(store, AssistantConfig::default());
//! let mut ctx = RequestContext::new(42);
//!
//! let reply = router.route(&mut ctx, "рассчитай бетон 10 М300");
//! assert_eq!(reply.intent, Intent::Calculator);
//! ```

pub mod calc;
pub mod config;
pub mod display;
pub mod error;
pub mod knowledge;
pub mod projects;
pub mod router;

// Re-exports for convenience
pub use calc::{
    format, CalcError, CalculationReport, CalculationRequest, CalculationResult, CalculatorKind,
    CommandParser, FormulaLibrary, PriceBook,
};
pub use config::AssistantConfig;
pub use error::{Error, Result};
pub use knowledge::{
    KnowledgeLookup, KnowledgeStore, MaterialEntry, QAEntry, SearchOutcome, SqliteKnowledgeStore,
    StoreStatistics,
};
pub use projects::{Project, ProjectStage, ProjectType};
pub use router::{FollowUpAction, Intent, Reply, RequestContext, Router};
