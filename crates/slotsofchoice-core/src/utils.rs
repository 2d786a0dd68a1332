//! Small helpers for page scripts.

/// Format an amount the way `Intl.NumberFormat("en-US", { style: "currency" })`
/// does: `format_currency(1234.5, "USD")` gives `$1,234.50`.
///
/// The browser export formats through `Intl` itself; this is the fallback for
/// codes `Intl` cannot take and for non-browser callers. Halves round away
/// from zero. Currencies outside the symbol table are prefixed with their ISO
/// code and a non-breaking space.
pub fn format_currency(amount: f64, currency: &str) -> String {
    let code = currency.to_ascii_uppercase();
    let (prefix, decimals) = match currency_symbol(&code) {
        Some((symbol, decimals)) => (symbol.to_string(), decimals),
        None => (format!("{code}\u{a0}"), 2),
    };

    let scaled = (amount.abs() * 10f64.powi(decimals as i32)).round();
    let digits = format!("{:0>width$.0}", scaled, width = decimals + 1);
    let (whole, fraction) = digits.split_at(digits.len() - decimals);

    let sign = if amount < 0.0 && scaled > 0.0 { "-" } else { "" };
    let mut out = format!("{sign}{prefix}{}", group_thousands(whole));
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// en-US symbol and minor-unit digits for common currencies.
fn currency_symbol(code: &str) -> Option<(&'static str, usize)> {
    let entry = match code {
        "USD" => ("$", 2),
        "EUR" => ("€", 2),
        "GBP" => ("£", 2),
        "CAD" => ("CA$", 2),
        "AUD" => ("A$", 2),
        "NZD" => ("NZ$", 2),
        "HKD" => ("HK$", 2),
        "MXN" => ("MX$", 2),
        "BRL" => ("R$", 2),
        "CNY" => ("CN¥", 2),
        "INR" => ("₹", 2),
        "ILS" => ("₪", 2),
        "PHP" => ("₱", 2),
        "TWD" => ("NT$", 2),
        "JPY" => ("¥", 0),
        "KRW" => ("₩", 0),
        "VND" => ("₫", 0),
        _ => return None,
    };
    Some(entry)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// First value of `name` in a query string (with or without the leading `?`).
pub fn url_param(query: &str, name: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}
