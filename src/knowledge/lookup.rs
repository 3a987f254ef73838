//! Knowledge lookup: exact-hash match first, substring search second.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::knowledge::key::QuestionKey;
use crate::knowledge::store::KnowledgeStore;
use crate::knowledge::types::{EntryId, MaterialEntry, QAEntry, StoreStatistics};

/// Next step offered when a search finds nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suggestion {
    NewSearch,
    Calculators,
    Topics,
}

impl Suggestion {
    pub const ALL: [Suggestion; 3] = [
        Suggestion::NewSearch,
        Suggestion::Calculators,
        Suggestion::Topics,
    ];

    /// Follow-up action id.
    pub fn action_id(&self) -> &'static str {
        match self {
            Suggestion::NewSearch => "search_main",
            Suggestion::Calculators => "calculators_main",
            Suggestion::Topics => "knowledge_base",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Suggestion::NewSearch => "🔍 Новый поиск",
            Suggestion::Calculators => "🧮 Калькуляторы",
            Suggestion::Topics => "📚 Все темы",
        }
    }
}

/// Result of a knowledge-base search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The normalized question is stored verbatim; `entry.usage_count`
    /// already includes this retrieval.
    Exact { entry: QAEntry, latency: Duration },
    /// Substring matches in store order.
    Similar(Vec<QAEntry>),
    NotFound { suggestions: Vec<Suggestion> },
}

/// Wraps a [`KnowledgeStore`] with the search pipeline and detail lookups.
#[derive(Clone)]
pub struct KnowledgeLookup {
    store: Arc<dyn KnowledgeStore>,
    qa_limit: usize,
    material_limit: usize,
}

impl KnowledgeLookup {
    /// Lookup with the default limits: 5 Q&A matches, 10 materials.
    pub fn new(store: Arc<dyn KnowledgeStore>) -> Self {
        Self {
            store,
            qa_limit: 5,
            material_limit: 10,
        }
    }

    pub fn with_limits(mut self, qa_limit: usize, material_limit: usize) -> Self {
        self.qa_limit = qa_limit.max(1);
        self.material_limit = material_limit.max(1);
        self
    }

    pub fn store(&self) -> &Arc<dyn KnowledgeStore> {
        &self.store
    }

    /// Search the knowledge base on behalf of `user_id`.
    ///
    /// An exact hit bumps the entry's usage counter once and records the
    /// query with the measured latency. Misses are recorded without an entry.
    /// A failed history write is logged and does not fail the search.
    pub fn search(&self, user_id: i64, query: &str) -> Result<SearchOutcome> {
        let started = Instant::now();
        let query = query.trim();
        if query.is_empty() {
            return Ok(SearchOutcome::NotFound {
                suggestions: Suggestion::ALL.to_vec(),
            });
        }

        let key = QuestionKey::from_question(query);
        if let Some(mut entry) = self.store.get_answer_by_hash(&key)? {
            self.store.increment_usage(entry.id)?;
            entry.usage_count += 1;
            let latency = started.elapsed();
            self.record(user_id, query, Some(entry.id), latency);
            info!(qa_id = entry.id, key = %key, ?latency, "Exact knowledge hit");
            return Ok(SearchOutcome::Exact { entry, latency });
        }

        let similar = self.store.search_qa(query, self.qa_limit)?;
        self.record(user_id, query, None, started.elapsed());
        debug!(matches = similar.len(), "Substring knowledge search");

        if similar.is_empty() {
            Ok(SearchOutcome::NotFound {
                suggestions: Suggestion::ALL.to_vec(),
            })
        } else {
            Ok(SearchOutcome::Similar(similar))
        }
    }

    fn record(&self, user_id: i64, query: &str, qa_id: Option<EntryId>, latency: Duration) {
        if let Err(e) = self.store.record_query(user_id, query, qa_id, latency) {
            warn!(user_id, ?qa_id, error = %e, "Failed to record query history");
        }
    }

    /// Materials matching `query`; `Error::NotFound` when there are none.
    pub fn materials(&self, query: &str) -> Result<Vec<MaterialEntry>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::not_found(query));
        }
        let found = self.store.search_materials(query, self.material_limit)?;
        debug!(query, matches = found.len(), "Material search");
        if found.is_empty() {
            Err(Error::not_found(query))
        } else {
            Ok(found)
        }
    }

    /// Open one Q&A pair; viewing it counts as a use.
    pub fn qa_detail(&self, id: EntryId) -> Result<QAEntry> {
        let mut entry = self
            .store
            .get_qa(id)?
            .ok_or_else(|| Error::entity_not_found("qa", id))?;
        self.store.increment_usage(id)?;
        entry.usage_count += 1;
        Ok(entry)
    }

    pub fn material_detail(&self, id: EntryId) -> Result<MaterialEntry> {
        self.store
            .get_material(id)?
            .ok_or_else(|| Error::entity_not_found("material", id))
    }

    pub fn statistics(&self) -> Result<StoreStatistics> {
        self.store.get_statistics()
    }
}

impl std::fmt::Debug for KnowledgeLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KnowledgeLookup")
            .field("qa_limit", &self.qa_limit)
            .field("material_limit", &self.material_limit)
            .finish()
    }
}
