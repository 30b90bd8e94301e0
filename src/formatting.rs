//! Display formatting for metric values
//!
//! Metric values are formatted once, at fetch time, into the exact strings
//! the display surface renders: USD currency with two decimals for revenue
//! figures, thousands-separated integers for counts.

/// Format a USD amount as `$1,234.56`
///
/// Negative amounts render as `-$1,234.56`.
#[must_use]
pub fn format_usd(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let abs = amount.abs();
    let whole = abs.trunc() as u64;
    let cents = ((abs - abs.trunc()) * 100.0).round() as u64;
    // Rounding cents can carry into the whole part (e.g. 9.999 -> 10.00)
    let (whole, cents) = if cents >= 100 {
        (whole + 1, 0)
    } else {
        (whole, cents)
    };
    format!("{}${}.{:02}", sign, group_thousands(whole), cents)
}

/// Format an integer count as `1,234`
#[must_use]
pub fn format_count(count: i64) -> String {
    let sign = if count < 0 { "-" } else { "" };
    format!("{}{}", sign, group_thousands(count.unsigned_abs()))
}

/// Insert `,` separators every three digits
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
