use contracts::shared::indicators::{ValueFormat, PLACEHOLDER};

/// Форматирует число с разделителями тысяч (точками)
///
/// # Примеры
/// ```
/// use backend::shared::format::format_number;
/// assert_eq!(format_number(1234567), "1.234.567");
/// assert_eq!(format_number(42), "42");
/// ```
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Amount in millions with two decimals, e.g. `$12.35M`
pub fn format_money_millions(value: f64, currency: &str) -> String {
    format!("{}{:.2}M", currency, value / 1e6)
}

/// Ratio with a trailing `x`, e.g. `1.27x`
pub fn format_multiplier(value: f64, decimals: u8) -> String {
    format!("{:.*}x", decimals as usize, value)
}

/// Render a card value; undefined or non-finite values become the placeholder
pub fn render_value(format: &ValueFormat, value: Option<f64>) -> String {
    let value = match value {
        Some(v) if v.is_finite() => v,
        _ => return PLACEHOLDER.to_string(),
    };

    match format {
        ValueFormat::MoneyMillions { currency } => format_money_millions(value, currency),
        ValueFormat::Multiplier { decimals } => format_multiplier(value, *decimals),
        ValueFormat::Integer => format!("{:.0}", value),
    }
}
