use regex::Regex;
use std::sync::OnceLock;

static LEADING_FLOAT: OnceLock<Regex> = OnceLock::new();

fn leading_float() -> &'static Regex {
    LEADING_FLOAT.get_or_init(|| {
        Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)")
            .expect("static price pattern is valid")
    })
}

/// Numeric value of a currency-formatted display price such as `"$19.99"`.
///
/// The first `$` is removed and the longest leading decimal literal is
/// parsed, so `"$12.50 / lb"` is 12.5 and `"1,299.00"` is 1. Strings with no
/// leading number yield `None`.
pub fn parse_display_price(display: &str) -> Option<f64> {
    let stripped = display.replacen('$', "", 1);
    let trimmed = stripped.trim_start();
    let literal = leading_float().find(trimmed)?.as_str();

    match literal.trim_start_matches(['+', '-']) {
        "Infinity" if literal.starts_with('-') => Some(f64::NEG_INFINITY),
        "Infinity" => Some(f64::INFINITY),
        _ => literal.parse::<f64>().ok(),
    }
}

/// Strict less-than against the ceiling; unparseable prices never pass.
pub fn is_below_ceiling(display: &str, ceiling: f64) -> bool {
    parse_display_price(display)
        .map(|price| price < ceiling)
        .unwrap_or(false)
}

/// Formats a ceiling the way it reads in prose: `22` rather than `22.0`.
pub fn format_ceiling(ceiling: f64) -> String {
    format!("{}", ceiling)
}
