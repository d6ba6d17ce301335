//! Readers for the free-text profile columns written before the structured
//! compensation and availability fields existed.
//!
//! Typical inputs: `月額100万円〜150万円`, `時給5,000円`, `50〜80万円/月`,
//! `応相談`, `週2〜3日`, `フルタイム`.

use regex::Regex;
use std::sync::OnceLock;

use crate::value_objects::CompensationType;

/// Compensation recovered from legacy text, amounts in yen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyCompensation {
    pub kind: CompensationType,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

fn amount_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d[\d,]*(?:\.\d+)?)\s*(万円|万|千円|円)?").expect("amount regex is valid")
    })
}

fn weekly_days_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"週\s*(\d)(?:\s*[〜~\-ー－]\s*(\d))?\s*日").expect("weekly days regex is valid")
    })
}

/// Folds full-width digits and punctuation into ASCII so one set of patterns covers both.
pub fn fold_width(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '０'..='９' => char::from_u32(c as u32 - '０' as u32 + '0' as u32).unwrap_or(c),
            '，' => ',',
            '．' => '.',
            '～' => '〜',
            _ => c,
        })
        .collect()
}

fn unit_multiplier(unit: &str) -> f64 {
    match unit {
        "万円" | "万" => 10_000.0,
        "千円" => 1_000.0,
        _ => 1.0,
    }
}

fn is_range_mark(c: char) -> bool {
    matches!(c, '〜' | '~' | '-' | 'ー' | '－')
}

/// Counters that mark a number as something other than money (`週2日`, `3ヶ月`, `2024年`)
const NON_MONEY_COUNTERS: [&str; 12] = [
    "日", "ヶ月", "か月", "ヵ月", "カ月", "ケ月", "年", "週", "時間", "回", "名", "人",
];

struct RawAmount<'a> {
    pos: usize,
    value: f64,
    unit: Option<&'a str>,
    before_range: bool,
}

/// Amounts in order of appearance.
///
/// Numbers followed by a non-money counter are skipped. A number without a
/// unit borrows the unit of the next amount only when a range mark follows it
/// directly, so `50〜80万円` reads as 500,000 and 800,000. Any other bare
/// number counts as yen only when the text has no amount with a unit at all.
fn extract_amounts(text: &str) -> Vec<(usize, i64)> {
    let raw: Vec<RawAmount<'_>> = amount_regex()
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let value: f64 = caps.get(1)?.as_str().replace(',', "").parse().ok()?;
            let unit = caps.get(2).map(|m| m.as_str());
            let rest = text[whole.end()..].trim_start();
            if unit.is_none() && NON_MONEY_COUNTERS.iter().any(|c| rest.starts_with(c)) {
                return None;
            }
            Some(RawAmount {
                pos: whole.start(),
                value,
                unit,
                before_range: rest.chars().next().is_some_and(is_range_mark),
            })
        })
        .collect();

    let any_unit = raw.iter().any(|a| a.unit.is_some());

    raw.iter()
        .enumerate()
        .filter_map(|(i, amount)| {
            let unit = match amount.unit {
                Some(unit) => unit,
                None if amount.before_range => raw[i + 1..]
                    .iter()
                    .find_map(|next| next.unit)
                    .unwrap_or("円"),
                None if any_unit => return None,
                None => "円",
            };
            Some((amount.pos, (amount.value * unit_multiplier(unit)).round() as i64))
        })
        .collect()
}

/// Parses legacy compensation text. Returns `None` when nothing usable is found.
pub fn parse_compensation(text: &str) -> Option<LegacyCompensation> {
    let text = fold_width(text.trim());
    if text.is_empty() {
        return None;
    }

    let amounts = extract_amounts(&text);

    let kind = if text.contains("時給") || text.contains("/時間") || text.contains("時間単価") {
        CompensationType::Hourly
    } else if text.contains('月') {
        CompensationType::Monthly
    } else if let Some((_, first)) = amounts.first() {
        if *first >= 100_000 {
            CompensationType::Monthly
        } else {
            CompensationType::Hourly
        }
    } else if text.contains("相談") {
        return Some(LegacyCompensation {
            kind: CompensationType::Negotiable,
            min: None,
            max: None,
        });
    } else {
        return None;
    };

    let (min, max) = match amounts.as_slice() {
        [] => (None, None),
        [(pos, amount)] => {
            let before = text[..*pos].trim_end().chars().next_back();
            if before.is_some_and(is_range_mark) || text.contains("以下") {
                (None, Some(*amount))
            } else {
                (Some(*amount), None)
            }
        }
        [(_, a), (_, b), ..] => (Some(*a.min(b)), Some(*a.max(b))),
    };

    Some(LegacyCompensation { kind, min, max })
}

/// Days per week from legacy availability text; ranges resolve to the upper bound.
pub fn parse_weekly_days(text: &str) -> Option<u8> {
    let text = fold_width(text);
    if let Some(caps) = weekly_days_regex().captures(&text) {
        let low: u8 = caps.get(1)?.as_str().parse().ok()?;
        let high = caps
            .get(2)
            .and_then(|m| m.as_str().parse::<u8>().ok())
            .map_or(low, |high| high.max(low));
        return (1..=7).contains(&high).then_some(high);
    }
    if text.contains("フルタイム") || text.contains("常勤") {
        return Some(5);
    }
    None
}
