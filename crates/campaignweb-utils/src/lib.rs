//! Number formatting and path helpers
//!
//! Monetary values in the source files follow the Brazilian convention
//! (`.` groups thousands, `,` separates decimals). Everything shown to the
//! user is rendered back in that convention.

/// Insert a separator every three digits, counting from the right
pub fn group_thousands(digits: &str, separator: char) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    let mut count = 0;
    for c in digits.chars().rev() {
        if count == 3 {
            result.push(separator);
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    result.chars().rev().collect()
}

/// Format a number with a fixed number of decimals and custom separators
///
/// `format_grouped(1234.5, 2, '.', ',')` gives `"1.234,50"`.
pub fn format_grouped(value: f64, decimals: usize, thousands: char, decimal: char) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let formatted = format!("{:.*}", decimals, value);
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };

    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let mut out = String::from(sign);
    out.push_str(&group_thousands(int_part, thousands));
    if let Some(frac) = frac_part {
        out.push(decimal);
        out.push_str(frac);
    }
    out
}

/// Magnitude bands, largest first
const BANDS: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "k")];

/// Abbreviate a monetary magnitude for chart labels
///
/// Each band is closed at its lower end, so `1e9` renders as `1B` rather than
/// `1000M`. Values are rounded to whole units of the band and grouped with `.`.
pub fn format_value(value: f64) -> String {
    for (threshold, suffix) in BANDS {
        if value >= threshold {
            return format!("{}{}", format_grouped(value / threshold, 0, '.', ','), suffix);
        }
    }
    format_grouped(value, 0, '.', ',')
}

/// Render a value as Brazilian currency: `R$ 1.234,56`
pub fn mask_number(value: f64) -> String {
    format!("R$ {}", format_grouped(value, 2, '.', ','))
}

/// Apply the currency mask to a locale-formatted string
///
/// Thousands dots are dropped and the decimal comma becomes a point before
/// parsing. Anything that does not parse comes back unchanged.
pub fn apply_mask(raw: &str) -> String {
    let normalized = raw.trim().replace('.', "").replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => mask_number(value),
        _ => raw.to_string(),
    }
}

// ==================== Folder Encoding ====================

/// Encode a folder path into a single URL segment (`dados/x` -> `dados_x`)
///
/// Not collision free: a folder name that already contains `_` decodes to a
/// different path.
pub fn encode_folder(path: &str) -> String {
    path.replace('/', "_")
}

/// Reverse of [`encode_folder`]
pub fn decode_folder(segment: &str) -> String {
    segment.replace('_', "/")
}

/// Build the link to a full-table route for a folder
pub fn folder_link(route: &str, folder: &str) -> String {
    format!(
        "{}/{}",
        route.trim_end_matches('/'),
        urlencoding::encode(&encode_folder(folder))
    )
}

/// Escape text for safe inclusion in HTML content or attributes
pub fn escape_html(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
