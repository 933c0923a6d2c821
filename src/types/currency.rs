use rust_decimal::{Decimal, RoundingStrategy};

/// ISO 4217 currencies without a minor unit.
const ZERO_DECIMAL: &[&str] = &[
    "BIF", "CLP", "DJF", "GNF", "ISK", "JPY", "KMF", "KRW", "PYG", "RWF", "UGX", "VND", "VUV",
    "XAF", "XOF", "XPF",
];

/// ISO 4217 currencies with three decimal places.
const THREE_DECIMAL: &[&str] = &["BHD", "IQD", "JOD", "KWD", "LYD", "OMR", "TND"];

/// Number of minor-unit digits for an ISO currency code (case-insensitive).
pub fn precision(code: &str) -> u32 {
    let code = code.trim().to_uppercase();
    if ZERO_DECIMAL.contains(&code.as_str()) {
        0
    } else if THREE_DECIMAL.contains(&code.as_str()) {
        3
    } else {
        2
    }
}

pub fn symbol(code: &str) -> String {
    match code.trim().to_uppercase().as_str() {
        "USD" => "$".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        "INR" => "₹".to_string(),
        "JPY" => "¥".to_string(),
        "AUD" => "A$".to_string(),
        "CAD" => "C$".to_string(),
        "BRL" => "R$".to_string(),
        other => other.to_string(),
    }
}

/// Round to the currency's minor unit, half away from zero.
pub fn round_amount(amount: Decimal, code: &str) -> Decimal {
    amount.round_dp_with_strategy(precision(code), RoundingStrategy::MidpointAwayFromZero)
}

/// Format amount with its symbol and the currency's precision, e.g. `$10.50`.
pub fn format_amount(amount: Decimal, code: &str) -> String {
    let dp = precision(code) as usize;
    let rounded = round_amount(amount, code);
    let sym = symbol(code);
    if sym.is_empty() {
        format!("{:.*}", dp, rounded)
    } else if sym.chars().all(|c| c.is_ascii_uppercase()) {
        format!("{:.*} {}", dp, rounded, sym)
    } else if rounded.is_sign_negative() {
        format!("-{}{:.*}", sym, dp, rounded.abs())
    } else {
        format!("{}{:.*}", sym, dp, rounded)
    }
}
