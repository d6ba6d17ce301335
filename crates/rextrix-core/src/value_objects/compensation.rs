//! CFO compensation: pricing model and the fixed search bands offered to companies

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// How a CFO prices their engagement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompensationType {
    Monthly,
    Hourly,
    Negotiable,
}

impl CompensationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Hourly => "hourly",
            Self::Negotiable => "negotiable",
        }
    }
}

impl FromStr for CompensationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monthly" => Ok(Self::Monthly),
            "hourly" => Ok(Self::Hourly),
            "negotiable" => Ok(Self::Negotiable),
            other => Err(format!("unknown compensation type: {other}")),
        }
    }
}

impl fmt::Display for CompensationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compensation filter options shown in the search UI.
///
/// Amounts are yen. Bounds are inclusive at both ends, so a fee sitting exactly
/// on a boundary (e.g. 1,000,000) falls in both adjacent bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompensationBand {
    MonthlyUpTo500k,
    Monthly500kTo1m,
    Monthly1mTo2m,
    Monthly2mOrMore,
    HourlyUpTo5k,
    Hourly5kTo10k,
    Hourly10kOrMore,
    Negotiable,
}

impl CompensationBand {
    pub const ALL: [CompensationBand; 8] = [
        Self::MonthlyUpTo500k,
        Self::Monthly500kTo1m,
        Self::Monthly1mTo2m,
        Self::Monthly2mOrMore,
        Self::HourlyUpTo5k,
        Self::Hourly5kTo10k,
        Self::Hourly10kOrMore,
        Self::Negotiable,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::MonthlyUpTo500k => "月額制：〜50万円",
            Self::Monthly500kTo1m => "月額制：50万円〜100万円",
            Self::Monthly1mTo2m => "月額制：100万円〜200万円",
            Self::Monthly2mOrMore => "月額制：200万円以上",
            Self::HourlyUpTo5k => "時給制：〜5,000円",
            Self::Hourly5kTo10k => "時給制：5,000円〜10,000円",
            Self::Hourly10kOrMore => "時給制：10,000円以上",
            Self::Negotiable => "応相談",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::MonthlyUpTo500k => "monthly_up_to_500k",
            Self::Monthly500kTo1m => "monthly_500k_1m",
            Self::Monthly1mTo2m => "monthly_1m_2m",
            Self::Monthly2mOrMore => "monthly_2m_plus",
            Self::HourlyUpTo5k => "hourly_up_to_5k",
            Self::Hourly5kTo10k => "hourly_5k_10k",
            Self::Hourly10kOrMore => "hourly_10k_plus",
            Self::Negotiable => "negotiable",
        }
    }

    pub fn compensation_type(&self) -> CompensationType {
        match self {
            Self::MonthlyUpTo500k
            | Self::Monthly500kTo1m
            | Self::Monthly1mTo2m
            | Self::Monthly2mOrMore => CompensationType::Monthly,
            Self::HourlyUpTo5k | Self::Hourly5kTo10k | Self::Hourly10kOrMore => {
                CompensationType::Hourly
            }
            Self::Negotiable => CompensationType::Negotiable,
        }
    }

    /// Inclusive yen range `(min, max)`; `None` max means unbounded.
    /// The negotiable band has no range.
    pub fn range(&self) -> Option<(i64, Option<i64>)> {
        match self {
            Self::MonthlyUpTo500k => Some((0, Some(500_000))),
            Self::Monthly500kTo1m => Some((500_000, Some(1_000_000))),
            Self::Monthly1mTo2m => Some((1_000_000, Some(2_000_000))),
            Self::Monthly2mOrMore => Some((2_000_000, None)),
            Self::HourlyUpTo5k => Some((0, Some(5_000))),
            Self::Hourly5kTo10k => Some((5_000, Some(10_000))),
            Self::Hourly10kOrMore => Some((10_000, None)),
            Self::Negotiable => None,
        }
    }

    /// Whether a fee of `amount` yen under `kind` pricing belongs to this band
    pub fn contains(&self, kind: CompensationType, amount: Option<i64>) -> bool {
        if kind != self.compensation_type() {
            return false;
        }
        match (self.range(), amount) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some((lo, hi)), Some(amount)) => amount >= lo && hi.is_none_or(|hi| amount <= hi),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown compensation band: {0}")]
pub struct UnknownBand(pub String);

impl FromStr for CompensationBand {
    type Err = UnknownBand;

    /// Accepts either the display label or the ASCII code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|band| band.label() == s || band.code() == s)
            .ok_or_else(|| UnknownBand(s.to_string()))
    }
}

impl fmt::Display for CompensationBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for CompensationBand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for CompensationBand {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_label_and_code() {
        assert_eq!(
            "月額制：200万円以上".parse::<CompensationBand>().unwrap(),
            CompensationBand::Monthly2mOrMore
        );
        assert_eq!(
            "hourly_5k_10k".parse::<CompensationBand>().unwrap(),
            CompensationBand::Hourly5kTo10k
        );
        assert!("月額制：300万円以上".parse::<CompensationBand>().is_err());
    }

    #[test]
    fn test_labels_are_unique() {
        for (i, a) in CompensationBand::ALL.iter().enumerate() {
            for b in &CompensationBand::ALL[i + 1..] {
                assert_ne!(a.label(), b.label());
                assert_ne!(a.code(), b.code());
            }
        }
    }

    #[test]
    fn test_contains_checks_type_first() {
        let band = CompensationBand::Monthly2mOrMore;
        assert!(band.contains(CompensationType::Monthly, Some(2_000_000)));
        assert!(!band.contains(CompensationType::Monthly, Some(500_000)));
        assert!(!band.contains(CompensationType::Hourly, Some(2_000_000)));
        assert!(!band.contains(CompensationType::Monthly, None));
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        assert!(CompensationBand::Monthly500kTo1m.contains(CompensationType::Monthly, Some(1_000_000)));
        assert!(CompensationBand::Monthly1mTo2m.contains(CompensationType::Monthly, Some(1_000_000)));
        assert!(CompensationBand::MonthlyUpTo500k.contains(CompensationType::Monthly, Some(0)));
    }

    #[test]
    fn test_negotiable_band_ignores_amount() {
        assert!(CompensationBand::Negotiable.contains(CompensationType::Negotiable, None));
        assert!(!CompensationBand::Negotiable.contains(CompensationType::Monthly, Some(1)));
    }
}
