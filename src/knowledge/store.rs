//! Knowledge store contract and its SQLite implementation.

use crate::error::{Error, Result};
use crate::knowledge::key::{normalize, QuestionKey};
use crate::knowledge::schema::initialize_schema;
use crate::knowledge::types::*;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Query contract the lookup adapter and router rely on.
///
/// Implementations own all entries; callers only ever hold request-scoped
/// copies. Counters are incremented atomically by the store.
pub trait KnowledgeStore: Send + Sync {
    /// Entry whose normalized question hashes to `key`.
    fn get_answer_by_hash(&self, key: &QuestionKey) -> Result<Option<QAEntry>>;

    /// Substring search over questions and answers, in the store's own order.
    fn search_qa(&self, text: &str, limit: usize) -> Result<Vec<QAEntry>>;

    /// Substring search over material names, properties and applications.
    fn search_materials(&self, text: &str, limit: usize) -> Result<Vec<MaterialEntry>>;

    /// Add one to the entry's usage counter.
    fn increment_usage(&self, id: EntryId) -> Result<()>;

    fn get_statistics(&self) -> Result<StoreStatistics>;

    fn get_qa(&self, id: EntryId) -> Result<Option<QAEntry>>;

    fn get_material(&self, id: EntryId) -> Result<Option<MaterialEntry>>;

    /// Append to the query history and bump the user's query counter.
    fn record_query(
        &self,
        user_id: i64,
        query: &str,
        qa_id: Option<EntryId>,
        latency: Duration,
    ) -> Result<()>;
}

/// SQLite-backed knowledge store.
pub struct SqliteKnowledgeStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteKnowledgeStore {
    /// Open or create a knowledge store at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| Error::storage(e.to_string()))?;

        // Pragmas are per connection, so this runs even on an existing file.
        initialize_schema(&conn).map_err(|e| Error::storage(e.to_string()))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Create an in-memory store (for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| Error::storage(e.to_string()))?;
        initialize_schema(&conn).map_err(|e| Error::storage(e.to_string()))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| Error::Internal(format!("Failed to lock connection: {}", e)))?;
        f(&conn).map_err(|e| Error::storage(e.to_string()))
    }

    // ==================== Writes ====================

    /// Insert a Q&A pair and return its id. `entry.id` is ignored.
    pub fn insert_qa(&self, entry: &QAEntry) -> Result<EntryId> {
        let key = QuestionKey::from_question(&entry.question);
        let search_text = normalize(&format!("{} {}", entry.question, entry.answer));
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO qa_pairs (question, question_hash, answer, category, difficulty,
                                       usage_count, tags, search_text)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    entry.question,
                    key.as_str(),
                    entry.answer,
                    entry.category,
                    entry.difficulty.clamp(1, 5),
                    entry.usage_count as i64,
                    entry.tags.join(","),
                    search_text,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Insert a material and return its id. `material.id` is ignored.
    pub fn insert_material(&self, material: &MaterialEntry) -> Result<EntryId> {
        let search_text = normalize(&format!(
            "{} {} {}",
            material.name, material.properties, material.applications
        ));
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO materials (name, category, unit, price_min, price_max, density,
                                        properties, applications, advantages, disadvantages,
                                        suppliers, eco_rating, search_text)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                params![
                    material.name,
                    material.category,
                    material.unit,
                    material.price_min,
                    material.price_max,
                    material.density,
                    material.properties,
                    material.applications,
                    material.advantages,
                    material.disadvantages,
                    material.suppliers,
                    material.eco_rating.min(5),
                    search_text,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    // ==================== Row mapping ====================

    fn row_to_qa(row: &rusqlite::Row) -> rusqlite::Result<QAEntry> {
        let tags: String = row.get(6)?;
        Ok(QAEntry {
            id: row.get(0)?,
            question: row.get(1)?,
            answer: row.get(2)?,
            category: row.get(3)?,
            difficulty: row.get::<_, i64>(4)?.clamp(1, 5) as u8,
            usage_count: row.get::<_, i64>(5)?.max(0) as u64,
            tags: tags
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect(),
        })
    }

    fn row_to_material(row: &rusqlite::Row) -> rusqlite::Result<MaterialEntry> {
        Ok(MaterialEntry {
            id: row.get(0)?,
            name: row.get(1)?,
            category: row.get(2)?,
            unit: row.get(3)?,
            price_min: row.get(4)?,
            price_max: row.get(5)?,
            density: row.get(6)?,
            properties: row.get(7)?,
            applications: row.get(8)?,
            advantages: row.get(9)?,
            disadvantages: row.get(10)?,
            suppliers: row.get(11)?,
            eco_rating: row.get::<_, i64>(12)?.clamp(0, 5) as u8,
        })
    }
}

const QA_COLUMNS: &str = "id, question, answer, category, difficulty, usage_count, tags";

const MATERIAL_COLUMNS: &str = "id, name, category, unit, price_min, price_max, density,
     properties, applications, advantages, disadvantages, suppliers, eco_rating";

/// `%text%` over the normalized text with LIKE wildcards escaped.
fn like_pattern(text: &str) -> String {
    let mut pattern = String::from("%");
    for ch in normalize(text).chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

impl KnowledgeStore for SqliteKnowledgeStore {
    fn get_answer_by_hash(&self, key: &QuestionKey) -> Result<Option<QAEntry>> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {} FROM qa_pairs WHERE question_hash = ?1", QA_COLUMNS),
                params![key.as_str()],
                Self::row_to_qa,
            )
            .optional()
        })
    }

    fn search_qa(&self, text: &str, limit: usize) -> Result<Vec<QAEntry>> {
        let pattern = like_pattern(text);
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM qa_pairs
                 WHERE search_text LIKE ?1 ESCAPE '\\'
                 ORDER BY usage_count DESC, id ASC
                 LIMIT ?2",
                QA_COLUMNS
            ))?;
            let rows = stmt.query_map(params![pattern, limit as i64], Self::row_to_qa)?;
            rows.collect()
        })
    }

    fn search_materials(&self, text: &str, limit: usize) -> Result<Vec<MaterialEntry>> {
        let pattern = like_pattern(text);
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM materials
                 WHERE search_text LIKE ?1 ESCAPE '\\'
                 ORDER BY name ASC, id ASC
                 LIMIT ?2",
                MATERIAL_COLUMNS
            ))?;
            let rows = stmt.query_map(params![pattern, limit as i64], Self::row_to_material)?;
            rows.collect()
        })
    }

    fn increment_usage(&self, id: EntryId) -> Result<()> {
        let updated = self.with_conn(|conn| {
            conn.execute(
                "UPDATE qa_pairs SET usage_count = usage_count + 1 WHERE id = ?1",
                params![id],
            )
        })?;
        if updated == 0 {
            return Err(Error::entity_not_found("qa", id));
        }
        Ok(())
    }

    fn get_statistics(&self) -> Result<StoreStatistics> {
        self.with_conn(|conn| {
            let count = |table: &str| -> rusqlite::Result<u64> {
                let n: i64 =
                    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                        row.get(0)
                    })?;
                Ok(n.max(0) as u64)
            };

            let total_usage: i64 = conn.query_row(
                "SELECT COALESCE(SUM(usage_count), 0) FROM qa_pairs",
                [],
                |row| row.get(0),
            )?;

            let popular_categories: Vec<CategoryCount> = {
                let mut stmt = conn.prepare(
                    "SELECT category, COUNT(*) AS qa_count FROM qa_pairs
                     GROUP BY category
                     ORDER BY qa_count DESC, category ASC
                     LIMIT 5",
                )?;
                let rows = stmt.query_map([], |row| {
                    Ok(CategoryCount {
                        name: row.get(0)?,
                        qa_count: row.get::<_, i64>(1)?.max(0) as u64,
                    })
                })?;
                rows.collect::<rusqlite::Result<_>>()?
            };

            Ok(StoreStatistics {
                qa_pairs: count("qa_pairs")?,
                materials: count("materials")?,
                users: count("users")?,
                queries: count("query_history")?,
                total_usage: total_usage.max(0) as u64,
                popular_categories,
            })
        })
    }

    fn get_qa(&self, id: EntryId) -> Result<Option<QAEntry>> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {} FROM qa_pairs WHERE id = ?1", QA_COLUMNS),
                params![id],
                Self::row_to_qa,
            )
            .optional()
        })
    }

    fn get_material(&self, id: EntryId) -> Result<Option<MaterialEntry>> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {} FROM materials WHERE id = ?1", MATERIAL_COLUMNS),
                params![id],
                Self::row_to_material,
            )
            .optional()
        })
    }

    fn record_query(
        &self,
        user_id: i64,
        query: &str,
        qa_id: Option<EntryId>,
        latency: Duration,
    ) -> Result<()> {
        self.with_conn(|conn| {
            let tx = conn.unchecked_transaction()?;
            tx.execute(
                "INSERT INTO query_history (user_id, query, qa_id, response_time)
                 VALUES (?1, ?2, ?3, ?4)",
                params![user_id, query, qa_id, latency.as_secs_f64()],
            )?;
            tx.execute(
                "INSERT INTO users (user_id, queries) VALUES (?1, 1)
                 ON CONFLICT(user_id) DO UPDATE SET
                     queries = queries + 1,
                     last_active = datetime('now')",
                params![user_id],
            )?;
            tx.commit()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_pairs() -> SqliteKnowledgeStore {
        let store = SqliteKnowledgeStore::in_memory().unwrap();
        store
            .insert_qa(
                &QAEntry::new(
                    "Какой глубины должен быть фундамент?",
                    "Глубина фундамента зависит от глубины промерзания грунта.",
                    "фундамент",
                )
                .with_difficulty(2)
                .with_tags(["глубина", "промерзание"]),
            )
            .unwrap();
        store
            .insert_qa(
                &QAEntry::new(
                    "Что лучше газобетон или кирпич?",
                    "Газобетон теплее, кирпич прочнее.",
                    "стены",
                )
                .with_usage_count(10),
            )
            .unwrap();
        store
    }

    #[test]
    fn test_insert_and_get_by_hash() {
        let store = store_with_pairs();
        let key = QuestionKey::from_question("какой глубины должен быть ФУНДАМЕНТ?");
        let entry = store.get_answer_by_hash(&key).unwrap().unwrap();

        assert_eq!(entry.category, "фундамент");
        assert_eq!(entry.difficulty, 2);
        assert_eq!(entry.tags, vec!["глубина", "промерзание"]);
        assert_eq!(entry.usage_count, 0);
    }

    #[test]
    fn test_duplicate_question_rejected() {
        let store = store_with_pairs();
        let dup = QAEntry::new("что лучше  газобетон или кирпич?", "другой ответ", "стены");
        assert!(store.insert_qa(&dup).unwrap_err().is_store_failure());
    }

    #[test]
    fn test_search_qa_is_case_insensitive_and_ordered() {
        let store = store_with_pairs();
        store
            .insert_qa(&QAEntry::new(
                "Сколько кирпича нужно на дом?",
                "Примерно 22 000 шт.",
                "стены",
            ))
            .unwrap();

        let results = store.search_qa("КИРПИЧ", 5).unwrap();
        assert_eq!(results.len(), 2);
        // Higher usage first
        assert_eq!(results[0].question, "Что лучше газобетон или кирпич?");

        assert_eq!(store.search_qa("кирпич", 1).unwrap().len(), 1);
        assert!(store.search_qa("стропила", 5).unwrap().is_empty());
    }

    #[test]
    fn test_like_wildcards_are_literal() {
        let store = store_with_pairs();
        assert!(store.search_qa("%", 5).unwrap().is_empty());
        assert!(store.search_qa("_", 5).unwrap().is_empty());
    }

    #[test]
    fn test_increment_usage() {
        let store = store_with_pairs();
        let id = store.search_qa("глубины", 1).unwrap()[0].id;

        store.increment_usage(id).unwrap();
        store.increment_usage(id).unwrap();
        assert_eq!(store.get_qa(id).unwrap().unwrap().usage_count, 2);

        assert!(matches!(
            store.increment_usage(999),
            Err(Error::EntityNotFound { entity: "qa", id: 999 })
        ));
    }

    #[test]
    fn test_materials_round_trip_and_search() {
        let store = SqliteKnowledgeStore::in_memory().unwrap();
        let id = store
            .insert_material(
                &MaterialEntry::new("Бетон М300", "бетон", "м³", 4500.0, 5500.0)
                    .with_density(2400.0)
                    .with_applications("Фундаменты, монолитные конструкции")
                    .with_suppliers("Бетон-Сервис, Монолит"),
            )
            .unwrap();

        let material = store.get_material(id).unwrap().unwrap();
        assert_eq!(material.density, Some(2400.0));
        assert_eq!(material.supplier_list().len(), 2);

        assert_eq!(store.search_materials("монолитные", 10).unwrap().len(), 1);
        assert_eq!(store.search_materials("м300", 10).unwrap()[0].id, id);
        assert!(store.get_material(id + 1).unwrap().is_none());
    }

    #[test]
    fn test_record_query_and_statistics() {
        let store = store_with_pairs();
        let id = store.search_qa("газобетон", 1).unwrap()[0].id;

        store
            .record_query(7, "газобетон", Some(id), Duration::from_millis(12))
            .unwrap();
        store
            .record_query(7, "что-то", None, Duration::from_millis(3))
            .unwrap();
        store
            .record_query(8, "крыша", None, Duration::from_millis(3))
            .unwrap();

        let stats = store.get_statistics().unwrap();
        assert_eq!(stats.qa_pairs, 2);
        assert_eq!(stats.materials, 0);
        assert_eq!(stats.users, 2);
        assert_eq!(stats.queries, 3);
        assert_eq!(stats.total_usage, 10);
        assert_eq!(stats.popular_categories.len(), 2);
        assert_eq!(stats.popular_categories[0].qa_count, 1);
    }

    #[test]
    fn test_file_backed_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("knowledge.db");

        {
            let store = SqliteKnowledgeStore::open(&path).unwrap();
            store
                .insert_qa(&QAEntry::new("Вопрос", "Ответ", "общее"))
                .unwrap();
        }

        let reopened = SqliteKnowledgeStore::open(&path).unwrap();
        assert_eq!(reopened.get_statistics().unwrap().qa_pairs, 1);
    }
}
