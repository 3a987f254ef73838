//! Calculator usage help.

use super::types::CalculatorKind;

/// Usage card for one calculator.
pub fn calculator_help(kind: CalculatorKind) -> String {
    let (icon, title, example, extra) = match kind {
        CalculatorKind::Foundation => (
            "🧱",
            "Калькулятор фундамента",
            "10 8 1.5 ленточный",
            Some("Типы: ленточный, плитный"),
        ),
        CalculatorKind::Walls => (
            "🏠",
            "Калькулятор стен",
            "40 3 0.4 газобетон",
            Some("Материалы: газобетон, кирпич, дерево"),
        ),
        CalculatorKind::Roof => (
            "🏠",
            "Калькулятор крыши",
            "10 8 30 металлочерепица",
            Some("Материалы: металлочерепица, мягкая"),
        ),
        CalculatorKind::HeatLoss => (
            "🔥",
            "Калькулятор теплопотерь",
            "150 2 москва хорошее",
            Some("Регионы: москва, спб, екатеринбург, новосибирск, сочи, краснодар\nУтепление: нет, слабое, среднее, хорошее, отличное"),
        ),
        CalculatorKind::Cost => (
            "💰",
            "Калькулятор стоимости",
            "фундамент 100 ленточный стандарт",
            Some("Работы: фундамент, стены, крыша, отделка\nКачество: эконом, стандарт, премиум"),
        ),
        CalculatorKind::AreaVolume => (
            "📏",
            "Калькулятор площади/объема",
            "прямоугольник 10 5",
            Some("Фигуры: прямоугольник, треугольник, круг, параллелепипед, цилиндр"),
        ),
        CalculatorKind::WaterSupply => (
            "💧",
            "Калькулятор водоснабжения",
            "4 ванна+душ 200",
            None,
        ),
        CalculatorKind::Electrical => (
            "⚡",
            "Калькулятор электрики",
            "15 220 1",
            Some("Фазы: 1 или 3"),
        ),
        CalculatorKind::Concrete => (
            "🧱",
            "Калькулятор бетона",
            "10 М300 пластификатор",
            Some("Марки: М100, М150, М200, М250, М300, М350"),
        ),
        CalculatorKind::Materials => (
            "📦",
            "Калькулятор материалов",
            "утеплитель 50 м² 100",
            Some("Материалы: бетон (м³), кирпич (м²), утеплитель (м² + толщина), краска (м²)"),
        ),
    };

    let mut text = format!(
        "{} *{}*\nФормат: `{}`\nПример: `{}`",
        icon,
        title,
        kind.usage(),
        example
    );
    if let Some(extra) = extra {
        text.push('\n');
        text.push_str(extra);
    }
    text
}

/// Overview of every calculator with a ready-to-send example command.
pub fn overview() -> String {
    let mut text = String::from("🧮 *ПОМОЩЬ ПО КАЛЬКУЛЯТОРАМ*\n\n*Доступные калькуляторы:*\n\n");
    for (i, kind) in CalculatorKind::ALL.iter().enumerate() {
        text.push_str(&format!(
            "{}. *{}* - `{} {}`\n",
            i + 1,
            kind.identifier(),
            kind.identifier(),
            kind.usage()
        ));
    }
    text.push_str(
        "\n*Примечание:*\n\
         • Все расчеты приблизительные\n\
         • Для точных расчетов нужен проект\n\
         • Цены указаны для средней полосы России\n\
         • Учитывайте региональные коэффициенты\n",
    );
    text
}
