//! Deterministic re-derivation of canonical metric values
//!
//! Rules:
//! - currency symbols, thousands separators and qualifiers are ignored
//! - thousand / million / billion expand to absolute numbers
//! - a range collapses to its midpoint
//! - decline wording makes the result negative (never for ratios)
//! - scientific notation is rejected
//! - one-sided bounds ("over 10%", "below 3") collapse to the bound
//! - ratios phrased "X to 1", "X:1" or "Xx" collapse to X

use foresight_domain::MetricUnit;
use regex::Regex;
use std::sync::LazyLock;

static CANONICAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+(?:\.\d+)?%?$").expect("valid regex"));

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<num>\d+(?:\.\d+)?)\s*(?P<pct>%|(?:percent(?:age points?)?|per cent)\b)?\s*(?P<scale>(?:thousands?|millions?|billions?|bn)\b)?",
    )
    .expect("valid regex")
});

static RATIO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<num>\d+(?:\.\d+)?)\s*(?:(?:to|:)\s*1(?:\.0+)?\b|x\b|times\b)")
        .expect("valid regex")
});

static DECLINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:decreas\w*|declin\w*|drop\w*|fall\w*|fell|reduc\w*|lower(?:ed)?\s+by|down\s+(?:by\s+)?-?\d|contraction|shrink\w*|negative)",
    )
    .expect("valid regex")
});

static EXPONENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d(?:\.\d+)?e[+-]?\d").expect("valid regex"));

const RANGE_CONNECTORS: [&str; 6] = ["-", "to", "and", "~", "through", "or"];

#[derive(Debug, Clone, Copy)]
struct Quantity {
    value: f64,
    percent: bool,
    scale: Option<f64>,
}

/// Check whether a value is already in canonical form for its unit
///
/// The empty string is canonical for every unit (no extractable number).
pub fn is_canonical(value: &str, unit: MetricUnit) -> bool {
    if value.is_empty() {
        return true;
    }
    if !CANONICAL_RE.is_match(value) {
        return false;
    }
    let percent = value.ends_with('%');
    match unit {
        MetricUnit::Percentage => percent,
        MetricUnit::Ratio | MetricUnit::Amount => !percent,
        MetricUnit::Growth => true,
    }
}

/// Re-derive the canonical value of a raw phrase
///
/// Returns `None` when the phrase holds no extractable number, when an
/// amount is phrased as a percentage, or when a number uses an exponent.
///
/// ```
/// use foresight_domain::MetricUnit;
/// use foresight_gatekeeper::normalize;
///
/// assert_eq!(normalize("decrease by 2%-5%", MetricUnit::Percentage).as_deref(), Some("-3.5%"));
/// assert_eq!(normalize("1.5 to 1", MetricUnit::Ratio).as_deref(), Some("1.5"));
/// ```
pub fn normalize(phrase: &str, unit: MetricUnit) -> Option<String> {
    let text = clean(phrase);
    if EXPONENT_RE.is_match(&text) {
        return None;
    }
    let declining = unit != MetricUnit::Ratio && DECLINE_RE.is_match(&text);

    if unit == MetricUnit::Ratio {
        if let Some(caps) = RATIO_RE.captures(&text) {
            let value: f64 = caps["num"].parse().ok()?;
            return Some(format_number(value));
        }
    }

    let quantities = scan_quantities(&text);
    let first = *quantities.first()?;
    let any_percent = quantities.iter().any(|(q, _)| q.percent);
    if unit == MetricUnit::Amount && any_percent {
        return None;
    }

    let (value, percent, scale) = match quantities.get(1) {
        Some(second) if second.1 => {
            let (a, b) = (first.0, second.0);
            (
                (a.value + b.value) / 2.0,
                a.percent || b.percent,
                a.scale.or(b.scale),
            )
        }
        _ => (first.0.value, first.0.percent, first.0.scale),
    };

    let mut value = value * scale.unwrap_or(1.0);
    if declining {
        value = -value.abs();
    }

    let number = format_number(value);
    let with_percent = match unit {
        MetricUnit::Percentage => true,
        MetricUnit::Ratio | MetricUnit::Amount => false,
        MetricUnit::Growth => percent,
    };

    Some(if with_percent {
        format!("{}%", number)
    } else {
        number
    })
}

/// Render a number with at most six decimals and no trailing zeros
///
/// ```
/// use foresight_gatekeeper::format_number;
///
/// assert_eq!(format_number(1_500_000_000.0), "1500000000");
/// assert_eq!(format_number(-3.5), "-3.5");
/// ```
pub fn format_number(value: f64) -> String {
    let rendered = format!("{:.6}", value);
    let trimmed = rendered.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Lowercase, unify dashes, drop currency symbols and thousands separators
fn clean(phrase: &str) -> String {
    let lowered = phrase.to_lowercase().replace(['\u{2013}', '\u{2014}', '\u{2212}'], "-");
    let chars: Vec<char> = lowered.chars().collect();
    let mut out = String::with_capacity(lowered.len());

    for (i, &c) in chars.iter().enumerate() {
        match c {
            '$' | '\u{20ac}' | '\u{a3}' | '\u{a5}' => continue,
            ',' => {
                let prev_digit = i > 0 && chars[i - 1].is_ascii_digit();
                let next_three = chars.len() > i + 3
                    && chars[i + 1..=i + 3].iter().all(|d| d.is_ascii_digit());
                let group_ends = chars.get(i + 4).is_none_or(|d| !d.is_ascii_digit());
                if prev_digit && next_three && group_ends {
                    continue;
                }
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Find up to two quantities; the flag on the second says whether it closes
/// a range opened by the first
fn scan_quantities(text: &str) -> Vec<(Quantity, bool)> {
    let mut found: Vec<(Quantity, bool)> = Vec::new();
    let mut previous_end = 0;

    for caps in NUMBER_RE.captures_iter(text) {
        let whole = caps.get(0).map(|m| (m.start(), m.end())).unwrap_or((0, 0));
        let Ok(mut value) = caps["num"].parse::<f64>() else {
            continue;
        };

        let negative = explicitly_negative(text, whole.0);
        if negative {
            value = -value;
        }

        let quantity = Quantity {
            value,
            percent: caps.name("pct").is_some(),
            scale: caps.name("scale").map(|m| scale_factor(m.as_str())),
        };

        let number_start = if negative { whole.0 - 1 } else { whole.0 };
        let closes_range = !found.is_empty()
            && previous_end <= number_start
            && RANGE_CONNECTORS.contains(&text[previous_end..number_start].trim());

        found.push((quantity, closes_range));
        previous_end = whole.1;
        if found.len() == 2 {
            break;
        }
    }
    found
}

/// A `-` directly before the number that is not a range separator
fn explicitly_negative(text: &str, start: usize) -> bool {
    let before = &text[..start];
    let Some(stripped) = before.strip_suffix('-') else {
        return false;
    };
    match stripped.chars().last() {
        None => true,
        Some(c) => !(c.is_ascii_alphanumeric() || c == '%' || c == '.'),
    }
}

fn scale_factor(word: &str) -> f64 {
    match word.trim_end_matches('s') {
        "thousand" => 1e3,
        "million" => 1e6,
        "billion" | "bn" => 1e9,
        _ => 1.0,
    }
}
