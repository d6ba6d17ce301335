//! Japanese prefectures (都道府県)

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Canonical names, ordered by JIS X 0401 code.
pub static PREFECTURES: [&str; 47] = [
    "北海道", "青森県", "岩手県", "宮城県", "秋田県", "山形県", "福島県",
    "茨城県", "栃木県", "群馬県", "埼玉県", "千葉県", "東京都", "神奈川県",
    "新潟県", "富山県", "石川県", "福井県", "山梨県", "長野県", "岐阜県",
    "静岡県", "愛知県", "三重県", "滋賀県", "京都府", "大阪府", "兵庫県",
    "奈良県", "和歌山県", "鳥取県", "島根県", "岡山県", "広島県", "山口県",
    "徳島県", "香川県", "愛媛県", "高知県", "福岡県", "佐賀県", "長崎県",
    "熊本県", "大分県", "宮崎県", "鹿児島県", "沖縄県",
];

/// A validated prefecture name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Prefecture(&'static str);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown prefecture: {0}")]
pub struct UnknownPrefecture(pub String);

impl Prefecture {
    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Name without the 都/府/県 suffix ("東京都" -> "東京"). 北海道 is kept whole.
    pub fn short_name(&self) -> &'static str {
        if self.0 == "北海道" {
            return self.0;
        }
        self.0
            .strip_suffix(['都', '府', '県'])
            .unwrap_or(self.0)
    }

    pub fn all() -> impl Iterator<Item = Prefecture> {
        PREFECTURES.iter().copied().map(Prefecture)
    }

    /// First prefecture mentioned in free text such as "東京都渋谷区" or "大阪 / リモート可".
    ///
    /// Full names win over short names so "東京都" is never read as "京都".
    pub fn find_in(text: &str) -> Option<Prefecture> {
        let earliest = |name_of: fn(&Prefecture) -> &'static str| {
            Self::all()
                .filter_map(|p| text.find(name_of(&p)).map(|pos| (pos, p)))
                .min_by_key(|(pos, p)| (*pos, std::cmp::Reverse(name_of(p).len())))
                .map(|(_, p)| p)
        };

        earliest(|p| p.as_str()).or_else(|| earliest(Prefecture::short_name))
    }
}

impl FromStr for Prefecture {
    type Err = UnknownPrefecture;

    /// Accepts the canonical name or its short form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::all()
            .find(|p| p.as_str() == s || p.short_name() == s)
            .ok_or_else(|| UnknownPrefecture(s.to_string()))
    }
}

impl fmt::Display for Prefecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl Serialize for Prefecture {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

impl<'de> Deserialize<'de> for Prefecture {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
