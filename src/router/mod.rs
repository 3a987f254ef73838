//! Intent routing for inbound chat messages and follow-up actions.
//!
//! Precedence for free text, first match wins:
//!
//! 1. A calculator chosen earlier through `calc_<kind>` takes the whole
//!    message as its parameters.
//! 2. Calculator trigger words run the command parser; a successful
//!    calculation is the reply, a parser error falls through.
//! 3. Material trigger words run a material search.
//! 4. Everything else is a knowledge search.
//!
//! Store failures never escape: they are logged and rendered as a generic
//! "try again" reply.

mod intent;
mod render;
mod types;

pub use intent::{material_search_terms, strip_calculator_triggers, IntentSignals};
pub use types::{FollowUpAction, Intent, Reply, RequestContext};

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, instrument, warn};

use crate::calc::{
    calculator_help, format, overview, CalculatorKind, CommandParser, FormulaLibrary,
};
use crate::config::AssistantConfig;
use crate::error::Error;
use crate::knowledge::{KnowledgeLookup, KnowledgeStore, SearchOutcome};

/// Routes messages and follow-up actions to the calculator, material and
/// knowledge pipelines.
#[derive(Debug)]
pub struct Router {
    lookup: KnowledgeLookup,
    parser: CommandParser,
    config: AssistantConfig,
}

impl Router {
    pub fn new(store: Arc<dyn KnowledgeStore>, config: AssistantConfig) -> Self {
        let lookup = KnowledgeLookup::new(store)
            .with_limits(config.qa_search_limit, config.material_search_limit);
        let parser = CommandParser::new(FormulaLibrary::new(config.prices.clone()));
        Self {
            lookup,
            parser,
            config,
        }
    }

    /// Replace the command parser, e.g. with [`CommandParser::strict`].
    pub fn with_parser(mut self, parser: CommandParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Handle one free-text message.
    #[instrument(skip(self, ctx, text), fields(request_id = %ctx.request_id, user_id = ctx.user_id))]
    pub fn route(&self, ctx: &mut RequestContext, text: &str) -> Reply {
        let text = text.trim();
        if text.is_empty() {
            return match ctx.pending {
                Some(kind) => render::calculator_prompt(kind),
                None => render::search_prompt(),
            };
        }

        if let Some(kind) = ctx.pending.take() {
            debug!(kind = %kind, "Pending calculator");
            return self.run_pending(kind, text);
        }

        let signals = IntentSignals::from_text(text);
        debug!(
            calculator = signals.calculator,
            material = signals.material,
            "Intent signals"
        );

        if signals.calculator {
            if let Some(reply) = self.try_calculator(text) {
                return reply;
            }
        }
        if signals.material {
            return self.material_search(text);
        }
        self.knowledge_search(ctx.user_id, text)
    }

    /// Handle a follow-up action id from an earlier reply.
    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id, user_id = ctx.user_id))]
    pub fn handle_action(&self, ctx: &mut RequestContext, action_id: &str) -> Reply {
        match action_id {
            "calc_help" => {
                return Reply::new(Intent::Calculator, overview())
                    .with_action("calculators_main", "🧮 Калькуляторы")
            }
            "calculators_main" => {
                ctx.pending = None;
                return render::calculator_menu();
            }
            "search_main" | "knowledge_base" => {
                ctx.pending = None;
                return render::search_prompt();
            }
            "stats" => return self.statistics(),
            _ => {}
        }

        if let Some(id) = parse_id(action_id, "qa_") {
            return match self.lookup.qa_detail(id) {
                Ok(entry) => render::qa_detail(&entry),
                Err(Error::EntityNotFound { .. }) => {
                    render::entity_missing(Intent::Knowledge, "Вопрос-ответ")
                }
                Err(e) => self.store_failure(Intent::Knowledge, &e),
            };
        }

        if let Some(id) = parse_id(action_id, "material_") {
            return match self.lookup.material_detail(id) {
                Ok(material) => render::material_detail(&material),
                Err(Error::EntityNotFound { .. }) => {
                    render::entity_missing(Intent::Material, "Материал")
                }
                Err(e) => self.store_failure(Intent::Material, &e),
            };
        }

        let chosen = action_id
            .strip_prefix("calc_")
            .and_then(|slug| CalculatorKind::ALL.into_iter().find(|k| k.slug() == slug));
        if let Some(kind) = chosen {
            ctx.pending = Some(kind);
            return render::calculator_prompt(kind);
        }

        debug!(action_id, "Unknown action");
        render::unknown_action(action_id)
    }

    /// Render store statistics.
    pub fn statistics(&self) -> Reply {
        match self.lookup.statistics() {
            Ok(stats) => render::statistics(&stats, Utc::now()),
            Err(e) => self.store_failure(Intent::Statistics, &e),
        }
    }

    fn run_pending(&self, kind: CalculatorKind, text: &str) -> Reply {
        let mut tokens: Vec<&str> = text.split_whitespace().collect();
        // "фундамент 10 8 1.5 ленточный" typed after choosing the foundation calculator
        if tokens.first().and_then(|t| CalculatorKind::from_token(t)) == Some(kind) {
            tokens.remove(0);
        }
        let params: Vec<String> = tokens.into_iter().map(String::from).collect();

        let result = self.parser.library().compute(kind, &params);
        let mut body = format(kind, &result);
        if !result.is_success() {
            body.push_str("\n\n");
            body.push_str(&calculator_help(kind));
        }
        Reply::new(Intent::Calculator, body)
            .with_action(format!("calc_{}", kind.slug()), "🔁 Еще раз")
            .with_action("calculators_main", "🧮 Калькуляторы")
    }

    fn try_calculator(&self, text: &str) -> Option<Reply> {
        let stripped = strip_calculator_triggers(text);
        let mut candidates = vec![stripped.as_str()];
        if stripped != text {
            candidates.push(text);
        }

        for candidate in candidates.into_iter().filter(|c| !c.is_empty()) {
            let parsed = self.parser.parse(candidate);
            match parsed.kind {
                Some(kind) if parsed.is_success() => {
                    debug!(kind = %kind, "Calculator intent");
                    return Some(
                        Reply::new(Intent::Calculator, format(kind, &parsed.result))
                            .with_action("calculators_main", "🧮 Другие расчеты"),
                    );
                }
                _ => debug!(error = ?parsed.result.error(), "Calculator parse fell through"),
            }
        }
        None
    }

    fn material_search(&self, text: &str) -> Reply {
        let terms = material_search_terms(text);
        for term in &terms {
            match self.lookup.materials(term) {
                Ok(found) => {
                    return render::material_list(term, &found, self.config.material_display_limit)
                }
                Err(Error::NotFound { .. }) => continue,
                Err(e) => return self.store_failure(Intent::Material, &e),
            }
        }
        render::material_not_found(terms.first().map(String::as_str).unwrap_or(text))
    }

    fn knowledge_search(&self, user_id: i64, text: &str) -> Reply {
        match self.lookup.search(user_id, text) {
            Ok(SearchOutcome::Exact { entry, latency }) => {
                render::exact_answer(text, &entry, latency)
            }
            Ok(SearchOutcome::Similar(entries)) => {
                render::similar_questions(&entries, self.config.preview_chars)
            }
            Ok(SearchOutcome::NotFound { suggestions }) => render::not_found(text, &suggestions),
            Err(e) => self.store_failure(Intent::Knowledge, &e),
        }
    }

    fn store_failure(&self, intent: Intent, error: &Error) -> Reply {
        warn!(error = %error, ?intent, "Knowledge store failure");
        render::store_unavailable(intent)
    }
}

fn parse_id(action_id: &str, prefix: &str) -> Option<i64> {
    action_id.strip_prefix(prefix)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::knowledge::{
        seed_defaults, MaterialEntry, QAEntry, QuestionKey, SqliteKnowledgeStore, StoreStatistics,
    };
    use std::time::Duration;

    fn seeded_router() -> (Arc<SqliteKnowledgeStore>, Router) {
        let store = Arc::new(SqliteKnowledgeStore::in_memory().unwrap());
        seed_defaults(&store).unwrap();
        let router = Router::new(store.clone(), AssistantConfig::default());
        (store, router)
    }

    /// Every call fails like a broken database would.
    struct FailingStore;

    impl KnowledgeStore for FailingStore {
        fn get_answer_by_hash(&self, _key: &QuestionKey) -> Result<Option<QAEntry>> {
            Err(Error::storage("disk I/O error"))
        }
        fn search_qa(&self, _text: &str, _limit: usize) -> Result<Vec<QAEntry>> {
            Err(Error::storage("disk I/O error"))
        }
        fn search_materials(&self, _text: &str, _limit: usize) -> Result<Vec<MaterialEntry>> {
            Err(Error::storage("disk I/O error"))
        }
        fn increment_usage(&self, _id: i64) -> Result<()> {
            Err(Error::storage("disk I/O error"))
        }
        fn get_statistics(&self) -> Result<StoreStatistics> {
            Err(Error::storage("disk I/O error"))
        }
        fn get_qa(&self, _id: i64) -> Result<Option<QAEntry>> {
            Err(Error::storage("disk I/O error"))
        }
        fn get_material(&self, _id: i64) -> Result<Option<MaterialEntry>> {
            Err(Error::storage("disk I/O error"))
        }
        fn record_query(
            &self,
            _user_id: i64,
            _query: &str,
            _qa_id: Option<i64>,
            _latency: Duration,
        ) -> Result<()> {
            Err(Error::storage("disk I/O error"))
        }
    }

    #[test]
    fn test_calculator_wins_over_material() {
        let (_, router) = seeded_router();
        let mut ctx = RequestContext::new(1);
        let reply = router.route(&mut ctx, "Рассчитай стоимость стены 100 кирпич премиум");
        assert_eq!(reply.intent, Intent::Calculator);
        assert!(reply.text.starts_with("🧮 *Результат расчета"));
    }

    #[test]
    fn test_calculator_error_falls_through() {
        let (_, router) = seeded_router();
        let mut ctx = RequestContext::new(1);
        let reply = router.route(&mut ctx, "рассчитай цена кирпич");
        assert_eq!(reply.intent, Intent::Material);
        assert!(reply.text.contains("Кирпич керамический"));
    }

    #[test]
    fn test_heuristic_through_full_text() {
        let (_, router) = seeded_router();
        let mut ctx = RequestContext::new(1);
        let reply = router.route(
            &mut ctx,
            "посчитай фундамент длина 10 ширина 8 глубина 1.5 ленточный",
        );
        assert_eq!(reply.intent, Intent::Calculator);
        assert!(reply.text.contains("Ленточный"));
    }

    #[test]
    fn test_material_query() {
        let (_, router) = seeded_router();
        let mut ctx = RequestContext::new(1);
        let reply = router.route(&mut ctx, "Сколько стоит пеноплекс?");
        assert_eq!(reply.intent, Intent::Material);
        assert!(reply.text.contains("*1. Пеноплекс*"));
        assert!(reply.action_ids()[0].starts_with("material_"));

        let missing = router.route(&mut ctx, "цена титановых панелей");
        assert!(missing.text.contains("не найдены"));
    }

    #[test]
    fn test_knowledge_exact_hit() {
        let (store, router) = seeded_router();
        let mut ctx = RequestContext::new(5);
        let reply = router.route(&mut ctx, "Какой глубины должен быть фундамент?");
        assert_eq!(reply.intent, Intent::Knowledge);
        assert!(reply.text.contains("*Использований:* 1\n"));
        assert_eq!(store.get_statistics().unwrap().total_usage, 1);
    }

    #[test]
    fn test_knowledge_similar_and_not_found() {
        let (_, router) = seeded_router();
        let mut ctx = RequestContext::new(5);

        let similar = router.route(&mut ctx, "стропила");
        assert!(similar.text.contains("*Похожие вопросы:*"));
        assert!(similar.action_ids()[0].starts_with("qa_"));

        let nothing = router.route(&mut ctx, "бассейн с подогревом");
        assert_eq!(
            nothing.action_ids(),
            vec!["search_main", "calculators_main", "knowledge_base"]
        );
    }

    #[test]
    fn test_store_failure_renders_try_again() {
        let router = Router::new(Arc::new(FailingStore), AssistantConfig::default());
        let mut ctx = RequestContext::new(1);

        for text in ["как залить фундамент", "цена кирпича"] {
            let reply = router.route(&mut ctx, text);
            assert!(reply.text.contains("Попробуйте еще раз"), "{}", text);
        }
        assert_eq!(router.statistics().intent, Intent::Statistics);
        assert!(router
            .handle_action(&mut ctx, "qa_1")
            .text
            .contains("Попробуйте еще раз"));

        // Calculators do not touch the store
        let calc = router.route(&mut ctx, "посчитай бетон 10 М300");
        assert_eq!(calc.intent, Intent::Calculator);
    }

    #[test]
    fn test_pending_calculator_consumed_once() {
        let (_, router) = seeded_router();
        let mut ctx = RequestContext::new(1);

        let prompt = router.handle_action(&mut ctx, "calc_concrete");
        assert_eq!(prompt.intent, Intent::Calculator);
        assert_eq!(ctx.pending, Some(CalculatorKind::Concrete));

        // Repeating the calculator name is tolerated
        let reply = router.route(ctx.next_request(), "бетон 10 М300");
        assert!(reply.text.contains("3800 кг"));
        assert_eq!(ctx.pending, None);

        let again = router.route(&mut ctx, "10 М300");
        assert_ne!(again.intent, Intent::Calculator);
    }

    #[test]
    fn test_pending_failure_shows_usage() {
        let (_, router) = seeded_router();
        let mut ctx = RequestContext::new(1);
        router.handle_action(&mut ctx, "calc_electrical");

        let reply = router.route(&mut ctx, "много");
        assert!(reply.text.starts_with("❌ *Ошибка:*"));
        assert!(reply.text.contains("Формат: `мощность напряжение фазы`"));
        assert_eq!(ctx.pending, None);
    }

    #[test]
    fn test_empty_text_keeps_pending() {
        let (_, router) = seeded_router();
        let mut ctx = RequestContext::new(1);
        router.handle_action(&mut ctx, "calc_roof");
        router.route(&mut ctx, "   ");
        assert_eq!(ctx.pending, Some(CalculatorKind::Roof));
    }

    #[test]
    fn test_detail_actions() {
        let (store, router) = seeded_router();
        let mut ctx = RequestContext::new(1);

        let qa_id = store.search_qa("розеток", 1).unwrap()[0].id;
        let qa = router.handle_action(&mut ctx, &format!("qa_{}", qa_id));
        assert!(qa.text.contains("Какое сечение провода для розеток?"));
        assert!(qa.text.contains("*Использований:* 1\n"));

        let material_id = store.search_materials("бетон", 1).unwrap()[0].id;
        let material = router.handle_action(&mut ctx, &format!("material_{}", material_id));
        assert!(material.text.contains("*Бетон М300*"));

        assert!(router
            .handle_action(&mut ctx, "qa_999")
            .text
            .contains("Вопрос-ответ не найден"));
        assert!(router
            .handle_action(&mut ctx, "material_999")
            .text
            .contains("Материал не найден"));
    }

    #[test]
    fn test_navigation_actions() {
        let (_, router) = seeded_router();
        let mut ctx = RequestContext::new(1);
        ctx.pending = Some(CalculatorKind::Walls);

        let menu = router.handle_action(&mut ctx, "calculators_main");
        assert_eq!(menu.actions.len(), CalculatorKind::ALL.len() + 1);
        assert_eq!(ctx.pending, None);

        assert!(router
            .handle_action(&mut ctx, "calc_help")
            .text
            .contains("ПОМОЩЬ ПО КАЛЬКУЛЯТОРАМ"));
        assert_eq!(
            router.handle_action(&mut ctx, "material_abc").intent,
            Intent::Navigation
        );
        assert_eq!(
            router.handle_action(&mut ctx, "calc_staircase").intent,
            Intent::Navigation
        );
    }

    #[test]
    fn test_statistics_action() {
        let (_, router) = seeded_router();
        let mut ctx = RequestContext::new(1);
        router.route(&mut ctx, "стропила");

        let reply = router.handle_action(&mut ctx, "stats");
        assert_eq!(reply.intent, Intent::Statistics);
        assert!(reply.text.contains("• Вопросов-ответов: 6\n"));
        assert!(reply.text.contains("• Всего запросов: 1\n"));
    }
}
