//! Display labels and values for the fundamentals table

use serde_json::Value;

/// Table label for a fundamentals key
pub fn label(key: &str) -> String {
    match key {
        "market_cap" => "Market Cap".to_string(),
        "pe_ratio" => "P/E Ratio".to_string(),
        "forward_pe" => "Forward P/E".to_string(),
        "eps" => "EPS".to_string(),
        "dividend_yield" => "Dividend Yield".to_string(),
        "fifty_two_week_range" => "52-Week Range".to_string(),
        "avg_volume" => "Avg Volume".to_string(),
        _ => key
            .split('_')
            .filter(|w| !w.is_empty())
            .map(|w| {
                let mut chars = w.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// Display text for a fundamentals value; `null` renders as `N/A`
pub fn value(key: &str, v: &Value) -> String {
    match v {
        Value::Null => "N/A".to_string(),
        Value::Bool(true) => "Yes".to_string(),
        Value::Bool(false) => "No".to_string(),
        Value::String(s) if s.trim().is_empty() => "N/A".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(x) => number(key, x),
            None => n.to_string(),
        },
        Value::Array(items) => items
            .iter()
            .map(|item| value(key, item))
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) => match (map.get("low"), map.get("high")) {
            (Some(low), Some(high)) => {
                format!("{} - {}", value("", low), value("", high))
            }
            _ => v.to_string(),
        },
    }
}

fn number(key: &str, x: f64) -> String {
    match key {
        "market_cap" => format!("${}", abbreviate(x)),
        "volume" | "avg_volume" => grouped(x.round() as i64),
        "dividend_yield" => format!("{x:.2}%"),
        _ if x.fract() == 0.0 && x.abs() < 1e15 => format!("{}", x as i64),
        _ => format!("{x:.2}"),
    }
}

/// 2_950_000_000_000 -> `2.95T`
pub fn abbreviate(x: f64) -> String {
    const UNITS: &[(f64, &str)] = &[(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];
    for (scale, suffix) in UNITS {
        if x.abs() >= *scale {
            return format!("{:.2}{suffix}", x / scale);
        }
    }
    format!("{x:.2}")
}

/// 1234567 -> `1,234,567`
pub fn grouped(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    if n < 0 {
        result.push('-');
    }
    result.chars().rev().collect()
}
