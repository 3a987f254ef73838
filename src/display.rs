//! Text helpers shared by every renderer.

/// Round to whole units and group thousands with spaces: `1234567.8` -> `1 234 568`.
pub fn format_number(value: f64) -> String {
    let rounded = format!("{:.0}", value);
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };
    // "-0" after rounding a tiny negative
    if digits == "0" {
        return "0".to_string();
    }

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    format!("{}{}", sign, grouped)
}

/// Money amount in roubles.
pub fn format_money(value: f64) -> String {
    format!("{} руб", format_number(value))
}

/// `300 - 400 руб/м²`, or a single price when both ends match.
pub fn format_price_range(price_min: f64, price_max: f64, unit: &str) -> String {
    if price_min == price_max {
        format!("{} руб/{}", format_number(price_min), unit)
    } else {
        format!(
            "{} - {} руб/{}",
            format_number(price_min),
            format_number(price_max),
            unit
        )
    }
}

/// Human duration: seconds, minutes or hours with one decimal.
pub fn format_duration(seconds: f64) -> String {
    if seconds < 60.0 {
        format!("{:.1} сек", seconds)
    } else if seconds < 3600.0 {
        format!("{:.1} мин", seconds / 60.0)
    } else {
        format!("{:.1} час", seconds / 3600.0)
    }
}

/// Cut `text` to at most `max_chars` characters, ending with `suffix` when cut.
pub fn truncate_text(text: &str, max_chars: usize, suffix: &str) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(suffix.chars().count());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(suffix);
    out
}

/// Upper-case the first character.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Star rating, capped at five.
pub fn stars(count: u8) -> String {
    "★".repeat(count.min(5) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_grouping() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1000.0), "1 000");
        assert_eq!(format_number(1234567.8), "1 234 568");
        assert_eq!(format_number(-45000.0), "-45 000");
        assert_eq!(format_number(-0.2), "0");
    }

    #[test]
    fn test_format_price_range() {
        assert_eq!(format_price_range(300.0, 400.0, "м²"), "300 - 400 руб/м²");
        assert_eq!(format_price_range(4500.0, 4500.0, "м³"), "4 500 руб/м³");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(12.34), "12.3 сек");
        assert_eq!(format_duration(90.0), "1.5 мин");
        assert_eq!(format_duration(5400.0), "1.5 час");
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        assert_eq!(truncate_text("фундамент", 20, "..."), "фундамент");
        assert_eq!(truncate_text("фундамент", 7, "..."), "фунд...");
    }

    #[test]
    fn test_capitalize_cyrillic() {
        assert_eq!(capitalize("москва"), "Москва");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_stars_capped() {
        assert_eq!(stars(3), "★★★");
        assert_eq!(stars(9), "★★★★★");
    }
}
