//! Starter content for an empty knowledge base.

use tracing::info;

use crate::error::Result;
use crate::knowledge::store::{KnowledgeStore, SqliteKnowledgeStore};
use crate::knowledge::types::{MaterialEntry, QAEntry};

/// The base Q&A set every fresh installation starts with.
pub fn base_questions() -> Vec<QAEntry> {
    vec![
        QAEntry::new(
            "Какой глубины должен быть фундамент?",
            "Глубина фундамента зависит от глубины промерзания грунта. \
             Для средней полосы России: 1.2-1.8 м.",
            "фундамент",
        )
        .with_difficulty(2)
        .with_tags(["глубина", "промерзание"]),
        QAEntry::new(
            "Сколько стоит залить фундамент 10 на 10?",
            "Ленточный фундамент для дома 10×10 м стоит примерно 200-350 тыс. рублей.",
            "фундамент",
        )
        .with_difficulty(2)
        .with_tags(["стоимость", "ленточный"]),
        QAEntry::new(
            "Сколько кирпича нужно на дом 100 м²?",
            "Для дома 100 м² нужно примерно 22,000 шт. кирпича.",
            "стены",
        )
        .with_tags(["кирпич", "расход"]),
        QAEntry::new(
            "Что лучше газобетон или кирпич?",
            "Газобетон: теплее, легче, дешевле. Кирпич: прочнее, долговечнее.",
            "стены",
        )
        .with_tags(["газобетон", "кирпич", "сравнение"]),
        QAEntry::new(
            "Как рассчитать стропила для крыши?",
            "Сечение стропил: 50×150 мм или 50×200 мм. Шаг: 600-1200 мм.",
            "крыша",
        )
        .with_difficulty(3)
        .with_tags(["стропила"]),
        QAEntry::new(
            "Какое сечение провода для розеток?",
            "Для розеток: кабель 3×2.5 мм², автомат 16А.",
            "электрика",
        )
        .with_difficulty(2)
        .with_tags(["кабель", "розетки", "автомат"]),
    ]
}

/// The base material catalogue.
pub fn base_materials() -> Vec<MaterialEntry> {
    vec![
        MaterialEntry::new("Кирпич керамический", "стеновые", "шт", 25.0, 35.0)
            .with_density(1800.0)
            .with_properties("Стандартный размер 250×120×65 мм. Расход 102 шт/м² при толщине 510 мм")
            .with_applications("Стены, фундаменты, цоколи")
            .with_advantages("Прочный, долговечный, негорючий")
            .with_disadvantages("Тяжелый, требует утепления")
            .with_eco_rating(4),
        MaterialEntry::new("Бетон М300", "бетон", "м³", 4500.0, 5500.0)
            .with_density(2400.0)
            .with_properties("Состав на 1 м³: цемент 380 кг, песок 645 кг, щебень 1080 кг, вода 190 л")
            .with_applications("Фундаменты, монолитные конструкции")
            .with_advantages("Высокая прочность")
            .with_disadvantages("Требует армирования и ухода при наборе прочности")
            .with_eco_rating(3),
        MaterialEntry::new("Минеральная вата", "утеплители", "м²", 300.0, 400.0)
            .with_properties("Толщина 100 мм, λ=0.036 Вт/м·К, негорючая")
            .with_applications("Утепление стен, кровли и перекрытий")
            .with_advantages("Негорючая, паропроницаемая")
            .with_disadvantages("Боится влаги")
            .with_eco_rating(3),
        MaterialEntry::new("Пеноплекс", "утеплители", "м²", 250.0, 350.0)
            .with_properties("Толщина 50 мм, λ=0.032 Вт/м·К, водонепроницаемый")
            .with_applications("Утепление фундаментов, цоколей и отмостки")
            .with_advantages("Не впитывает воду, высокая прочность на сжатие")
            .with_disadvantages("Горючий, не пропускает пар")
            .with_eco_rating(2),
    ]
}

/// What [`seed_defaults`] inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub qa_pairs: usize,
    pub materials: usize,
}

/// Insert the base content into every table that is still empty.
pub fn seed_defaults(store: &SqliteKnowledgeStore) -> Result<SeedReport> {
    let stats = store.get_statistics()?;
    let mut report = SeedReport::default();

    if stats.qa_pairs == 0 {
        for entry in base_questions() {
            store.insert_qa(&entry)?;
            report.qa_pairs += 1;
        }
    }
    if stats.materials == 0 {
        for material in base_materials() {
            store.insert_material(&material)?;
            report.materials += 1;
        }
    }

    info!(
        qa_pairs = report.qa_pairs,
        materials = report.materials,
        "Seeded knowledge base"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_fills_empty_store() {
        let store = SqliteKnowledgeStore::in_memory().unwrap();
        let report = seed_defaults(&store).unwrap();

        assert_eq!(report.qa_pairs, 6);
        assert_eq!(report.materials, 4);

        let stats = store.get_statistics().unwrap();
        assert_eq!(stats.qa_pairs, 6);
        assert_eq!(stats.materials, 4);
        assert_eq!(stats.popular_categories[0].name, "стены");
    }

    #[test]
    fn test_seed_is_idempotent() {
        let store = SqliteKnowledgeStore::in_memory().unwrap();
        seed_defaults(&store).unwrap();
        assert_eq!(seed_defaults(&store).unwrap(), SeedReport::default());
        assert_eq!(store.get_statistics().unwrap().qa_pairs, 6);
    }

    #[test]
    fn test_base_materials_have_ordered_prices() {
        for material in base_materials() {
            assert!(material.price_min <= material.price_max, "{}", material.name);
        }
    }
}
