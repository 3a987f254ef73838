//! Reply rendering for knowledge, material and statistics views.

use std::fmt::Write as _;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::calc::{calculator_help, CalculatorKind};
use crate::display::{
    capitalize, format_duration, format_number, format_price_range, stars, truncate_text,
};
use crate::knowledge::{MaterialEntry, QAEntry, StoreStatistics, Suggestion};

use super::types::{FollowUpAction, Intent, Reply};

const ELLIPSIS: &str = "...";
const BUTTON_CHARS: usize = 30;
const APPLICATION_PREVIEW_CHARS: usize = 60;
const DETAIL_CHARS: usize = 150;
const APPLICATION_DETAIL_CHARS: usize = 200;

fn category_or_default(category: &str) -> &str {
    if category.trim().is_empty() {
        "Общая"
    } else {
        category
    }
}

pub fn exact_answer(query: &str, entry: &QAEntry, latency: Duration) -> Reply {
    let text = format!(
        "🔍 *Найден ответ на ваш запрос*\n\n\
         *Вопрос:* {}\n\n\
         *Ответ:* {}\n\n\
         *Категория:* {}\n\
         *Сложность:* {}\n\
         *Использований:* {}\n\n\
         ⏱️ *Ответ найден за {}*",
        query,
        entry.answer,
        category_or_default(&entry.category),
        stars(entry.difficulty),
        entry.usage_count,
        format_duration(latency.as_secs_f64()),
    );
    Reply::new(Intent::Knowledge, text)
        .with_action(format!("qa_{}", entry.id), "📝 Подробнее")
        .with_action("search_main", "🔍 Новый поиск")
}

pub fn similar_questions(entries: &[QAEntry], preview_chars: usize) -> Reply {
    let mut text =
        String::from("🔍 *По вашему запросу не найден точный ответ*\n\n*Похожие вопросы:*\n");
    let mut actions = Vec::with_capacity(entries.len() + 1);

    for entry in entries {
        let _ = write!(
            text,
            "\n• *{}*\n  {}\n",
            entry.question,
            truncate_text(&entry.answer, preview_chars, ELLIPSIS)
        );
        actions.push(FollowUpAction::new(
            format!("qa_{}", entry.id),
            format!("📝 {}", truncate_text(&entry.question, BUTTON_CHARS, ELLIPSIS)),
        ));
    }
    actions.push(FollowUpAction::new(
        Suggestion::NewSearch.action_id(),
        Suggestion::NewSearch.label(),
    ));

    Reply::new(Intent::Knowledge, text).with_actions(actions)
}

pub fn not_found(query: &str, suggestions: &[Suggestion]) -> Reply {
    let text = format!(
        "🤔 *По вашему запросу ничего не найдено*\n\n\
         *Запрос:* \"{}\"\n\n\
         *Попробуйте:*\n\
         • Упростить формулировку\n\
         • Использовать другие ключевые слова\n\
         • Задать вопрос по-другому\n\
         • Использовать калькуляторы\n\n\
         *Или выберите действие ниже:*",
        query
    );
    let actions = suggestions
        .iter()
        .map(|s| FollowUpAction::new(s.action_id(), s.label()))
        .collect();
    Reply::new(Intent::Knowledge, text).with_actions(actions)
}

pub fn material_list(query: &str, materials: &[MaterialEntry], shown: usize) -> Reply {
    let mut text = format!("📦 *Материалы по запросу '{}':*\n\n", query);
    let mut actions = Vec::new();

    for (i, material) in materials.iter().take(shown).enumerate() {
        let _ = writeln!(text, "*{}. {}*", i + 1, material.name);
        let _ = writeln!(
            text,
            "   Цена: {} (средняя: {})",
            format_price_range(material.price_min, material.price_max, &material.unit),
            format_number(material.price_avg())
        );
        let _ = writeln!(text, "   Категория: {}", material.category);
        if !material.applications.is_empty() {
            let _ = writeln!(
                text,
                "   Применение: {}",
                truncate_text(&material.applications, APPLICATION_PREVIEW_CHARS, ELLIPSIS)
            );
        }
        text.push('\n');

        actions.push(FollowUpAction::new(
            format!("material_{}", material.id),
            format!("📦 {}", truncate_text(&material.name, BUTTON_CHARS, ELLIPSIS)),
        ));
    }
    if materials.len() > shown {
        let _ = writeln!(text, "_И еще {} в базе_", materials.len() - shown);
    }
    actions.push(FollowUpAction::new("search_main", "🔍 Новый поиск"));

    Reply::new(Intent::Material, text).with_actions(actions)
}

pub fn material_not_found(query: &str) -> Reply {
    Reply::new(
        Intent::Material,
        format!(
            "📦 *Материалы по запросу '{}' не найдены*\n\n\
             Попробуйте другой запрос или воспользуйтесь калькуляторами.",
            query
        ),
    )
    .with_action("search_main", "🔍 Новый поиск")
    .with_action("calculators_main", "🧮 Калькуляторы")
}

pub fn qa_detail(entry: &QAEntry) -> Reply {
    let mut text = format!(
        "📝 *Вопрос-ответ*\n\n\
         *Вопрос:* {}\n\n\
         *Ответ:* {}\n\n\
         *Категория:* {}\n\
         *Сложность:* {}\n\
         *Использований:* {}\n",
        entry.question,
        entry.answer,
        category_or_default(&entry.category),
        stars(entry.difficulty),
        entry.usage_count,
    );
    if !entry.tags.is_empty() {
        let _ = writeln!(text, "*Теги:* {}", entry.tags.join(", "));
    }
    Reply::new(Intent::Knowledge, text).with_action("search_main", "🔍 Новый поиск")
}

pub fn material_detail(material: &MaterialEntry) -> Reply {
    let unit = &material.unit;
    let mut text = format!(
        "📦 *{}*\n\n\
         *Категория:* {}\n\
         *Единица измерения:* {}\n\n\
         *Цены:*\n\
         • Минимальная: {} руб/{}\n\
         • Максимальная: {} руб/{}\n\
         • Средняя: {} руб/{}\n",
        material.name,
        material.category,
        unit,
        format_number(material.price_min),
        unit,
        format_number(material.price_max),
        unit,
        format_number(material.price_avg()),
        unit,
    );

    if material.density.is_some() || !material.properties.is_empty() {
        text.push_str("\n*Характеристики:*\n");
        if let Some(density) = material.density {
            let _ = writeln!(text, "• Плотность: {} кг/м³", format_number(density));
        }
        if !material.properties.is_empty() {
            let _ = writeln!(
                text,
                "• Свойства: {}",
                truncate_text(&material.properties, DETAIL_CHARS, ELLIPSIS)
            );
        }
    }

    let sections = [
        ("Применение", &material.applications, APPLICATION_DETAIL_CHARS),
        ("Преимущества", &material.advantages, DETAIL_CHARS),
        ("Недостатки", &material.disadvantages, DETAIL_CHARS),
    ];
    for (title, body, limit) in sections {
        if !body.is_empty() {
            let _ = write!(text, "\n*{}:* {}\n", title, truncate_text(body, limit, ELLIPSIS));
        }
    }

    let suppliers = material.supplier_list();
    if !suppliers.is_empty() {
        let _ = write!(text, "\n*Поставщики:* {}\n", suppliers.join(", "));
    }
    let _ = write!(text, "*Экологичность:* {}", stars(material.eco_rating));

    Reply::new(Intent::Material, text)
        .with_action("calc_generic-materials", "🧮 Рассчитать количество")
        .with_action("search_main", "🔍 Новый поиск")
}

pub fn statistics(stats: &StoreStatistics, updated_at: DateTime<Utc>) -> Reply {
    let count = |n: u64| format_number(n as f64);
    let mut text = format!(
        "📊 *Статистика базы знаний*\n\n\
         *Объем информации:*\n\
         • Пользователей: {}\n\
         • Вопросов-ответов: {}\n\
         • Материалов: {}\n\n\
         *Активность:*\n\
         • Всего запросов: {}\n\
         • Использований QA: {}\n\n\
         *Популярные категории:*\n",
        count(stats.users),
        count(stats.qa_pairs),
        count(stats.materials),
        count(stats.queries),
        count(stats.total_usage),
    );
    if stats.popular_categories.is_empty() {
        text.push_str("• нет данных\n");
    }
    for category in &stats.popular_categories {
        let _ = writeln!(
            text,
            "• {}: {} вопросов",
            category.name,
            count(category.qa_count)
        );
    }
    let _ = write!(text, "\n*Обновлено:* {}", updated_at.format("%d.%m.%Y %H:%M"));

    Reply::new(Intent::Statistics, text).with_action("stats", "🔄 Обновить")
}

pub fn calculator_menu() -> Reply {
    let actions = CalculatorKind::ALL
        .iter()
        .map(|kind| FollowUpAction::new(format!("calc_{}", kind.slug()), capitalize(kind.identifier())))
        .chain(std::iter::once(FollowUpAction::new("calc_help", "❓ Помощь")))
        .collect();
    Reply::new(
        Intent::Navigation,
        "🧮 *Калькуляторы и расчеты*\n\nВыберите тип расчета:",
    )
    .with_actions(actions)
}

/// Usage card shown after a calculator is chosen from the menu.
pub fn calculator_prompt(kind: CalculatorKind) -> Reply {
    Reply::new(
        Intent::Calculator,
        format!(
            "{}\n\nВведите параметры следующим сообщением.",
            calculator_help(kind)
        ),
    )
    .with_action("calculators_main", "◀️ Калькуляторы")
}

pub fn search_prompt() -> Reply {
    Reply::new(
        Intent::Navigation,
        "🔍 *Поиск по базе знаний*\n\n\
         Напишите вопрос, например: _Какой глубины должен быть фундамент?_\n\
         Для расчета начните сообщение со слова «рассчитай», \
         а для цен материалов со слова «цена».",
    )
    .with_action("calculators_main", "🧮 Калькуляторы")
}

pub fn entity_missing(intent: Intent, what: &str) -> Reply {
    Reply::new(intent, format!("❌ {} не найден.", what)).with_action("search_main", "🔍 Новый поиск")
}

pub fn unknown_action(action_id: &str) -> Reply {
    Reply::new(
        Intent::Navigation,
        format!("❓ Неизвестное действие: {}", action_id),
    )
    .with_action("search_main", "🔍 Новый поиск")
    .with_action("calculators_main", "🧮 Калькуляторы")
}

/// Generic reply when the knowledge store fails.
pub fn store_unavailable(intent: Intent) -> Reply {
    Reply::new(
        intent,
        "⚠️ База знаний временно недоступна. Попробуйте еще раз через минуту.",
    )
    .with_action("search_main", "🔄 Повторить поиск")
}
