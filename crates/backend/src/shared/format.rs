const THOUSANDS_SEPARATOR: char = ',';

/// Форматирует число с разделителями тысяч
///
/// # Примеры
/// ```ignore
/// assert_eq!(format_number(1234567), "1,234,567");
/// assert_eq!(format_number(42), "42");
/// assert_eq!(format_number(0), "0");
/// ```
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(THOUSANDS_SEPARATOR);
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Округляет до одного знака после запятой, половину от нуля
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Сокращённая денежная сумма: "1.5K", "2.5M", "3.2B"
///
/// Меньше тысячи сумма округляется до целого и группируется по разрядам.
/// Для отрицательных сумм пороги берутся по модулю; NaN и бесконечность дают "0".
pub fn format_compact_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "0".to_string();
    }

    let abs = amount.abs();
    let sign = if amount < 0.0 { "-" } else { "" };

    if abs >= 1_000_000_000.0 {
        format!("{}{:.1}B", sign, round_to_tenth(abs / 1_000_000_000.0))
    } else if abs >= 1_000_000.0 {
        format!("{}{:.1}M", sign, round_to_tenth(abs / 1_000_000.0))
    } else if abs >= 1_000.0 {
        format!("{}{:.1}K", sign, round_to_tenth(abs / 1_000.0))
    } else {
        let rounded = abs.round() as u64;
        if rounded == 0 {
            "0".to_string()
        } else {
            format!("{}{}", sign, format_number(rounded))
        }
    }
}
