use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Elements that carry their own elemental damage bonus main stat.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumString, Display,
)]
pub enum Element {
    Physical,
    Fire,
    Ice,
    Electric,
    Ether,
    #[strum(serialize = "Auric Ink")]
    AuricInk,
}

impl Element {
    /// Name used by the Japanese game data.
    pub fn jp_name(&self) -> &'static str {
        match self {
            Self::Physical => "物理",
            Self::Fire => "炎",
            Self::Ice => "氷",
            Self::Electric => "電気",
            Self::Ether => "エーテル",
            Self::AuricInk => "玄墨",
        }
    }
}

/// Canonical stat identifier. Every downstream component works on this type;
/// free-form names only exist at the edges and go through [`normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Stat {
    Hp,
    HpPercent,
    Atk,
    AtkPercent,
    Def,
    DefPercent,
    CritRate,
    CritDmg,
    AnomalyProficiency,
    AnomalyMastery,
    PenRatio,
    Pen,
    EnergyRegen,
    Impact,
    ElementalDmg(Element),
}

const SIMPLE_STATS: [Stat; 14] = [
    Stat::Hp,
    Stat::HpPercent,
    Stat::Atk,
    Stat::AtkPercent,
    Stat::Def,
    Stat::DefPercent,
    Stat::CritRate,
    Stat::CritDmg,
    Stat::AnomalyProficiency,
    Stat::AnomalyMastery,
    Stat::PenRatio,
    Stat::Pen,
    Stat::EnergyRegen,
    Stat::Impact,
];

impl Stat {
    /// Every known stat, elemental variants included.
    pub fn all() -> Vec<Stat> {
        let mut out = SIMPLE_STATS.to_vec();
        out.extend(Element::iter().map(Stat::ElementalDmg));
        out
    }

    pub fn canonical_name(&self) -> String {
        match self {
            Self::Hp => "HP".to_string(),
            Self::HpPercent => "HP%".to_string(),
            Self::Atk => "ATK".to_string(),
            Self::AtkPercent => "ATK%".to_string(),
            Self::Def => "DEF".to_string(),
            Self::DefPercent => "DEF%".to_string(),
            Self::CritRate => "CRIT Rate".to_string(),
            Self::CritDmg => "CRIT DMG".to_string(),
            Self::AnomalyProficiency => "Anomaly Proficiency".to_string(),
            Self::AnomalyMastery => "Anomaly Mastery".to_string(),
            Self::PenRatio => "PEN Ratio".to_string(),
            Self::Pen => "PEN".to_string(),
            Self::EnergyRegen => "Energy Regen".to_string(),
            Self::Impact => "Impact".to_string(),
            Self::ElementalDmg(e) => format!("{} Elemental Damage%", e),
        }
    }

    /// Whether values of this stat are shown as percentages.
    pub fn is_percentage(&self) -> bool {
        !matches!(
            self,
            Self::Hp | Self::Atk | Self::Def | Self::AnomalyProficiency | Self::Pen
        )
    }

    pub fn is_elemental(&self) -> bool {
        matches!(self, Self::ElementalDmg(_))
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_name())
    }
}

impl From<Stat> for String {
    fn from(stat: Stat) -> Self {
        stat.canonical_name()
    }
}

impl FromStr for Stat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s) {
            StatKey::Known(stat) => Ok(stat),
            StatKey::Unrecognized(name) => Err(format!("Unrecognized stat name '{}'", name)),
        }
    }
}

impl TryFrom<String> for Stat {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Output of the normalizer: either a canonical stat or the cleaned-up text
/// of a name nobody has taught us yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StatKey {
    Known(Stat),
    Unrecognized(String),
}

impl StatKey {
    pub fn stat(&self) -> Option<Stat> {
        match self {
            Self::Known(stat) => Some(*stat),
            Self::Unrecognized(_) => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(stat) => write!(f, "{}", stat),
            Self::Unrecognized(name) => f.write_str(name),
        }
    }
}

/// Canonicalizes a free-form stat name. Never fails: names that match no
/// alias and no elemental pattern come back as [`StatKey::Unrecognized`]
/// holding the cleaned text.
pub fn normalize(raw: &str) -> StatKey {
    let cleaned = clean(raw);
    let key = compact(&cleaned);

    if let Some(stat) = lookup_alias(&key) {
        return StatKey::Known(stat);
    }
    if let Some(element) = match_elemental(&key) {
        return StatKey::Known(Stat::ElementalDmg(element));
    }
    StatKey::Unrecognized(cleaned)
}

/// True for the generic "elemental damage" name growth tables use for the
/// curve shared by every element.
pub fn is_elemental_family(raw: &str) -> bool {
    matches!(
        compact(&clean(raw)).as_str(),
        "elementaldamage%" | "elementaldamage" | "elementaldmg%" | "属性ダメージ" | "属性ダメージ%"
    )
}

fn clean(raw: &str) -> String {
    let replaced: String = raw
        .trim()
        .chars()
        .map(|c| match c {
            '％' => '%',
            '（' => '(',
            '）' => ')',
            other => other,
        })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

// Case- and whitespace-insensitive comparison key.
fn compact(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

fn lookup_alias(key: &str) -> Option<Stat> {
    let stat = match key {
        "hp" | "hp(flat)" | "flathp" | "hpflat" | "hp(実数値)" | "hp実数値" => Stat::Hp,
        "hp%" | "hp(%)" | "hppercent" => Stat::HpPercent,
        "atk" | "attack" | "atk(flat)" | "flatatk" | "攻撃力(実数値)" | "攻撃力実数値" => {
            Stat::Atk
        }
        "atk%" | "atk(%)" | "attack%" | "攻撃力%" | "攻撃力(%)" => Stat::AtkPercent,
        "def" | "defense" | "def(flat)" | "flatdef" | "防御力(実数値)" | "防御力実数値" => {
            Stat::Def
        }
        "def%" | "def(%)" | "defense%" | "防御力%" | "防御力(%)" => Stat::DefPercent,
        "critrate" | "critrate%" | "会心率" => Stat::CritRate,
        "critdmg" | "critdmg%" | "critdamage" | "会心ダメージ" => Stat::CritDmg,
        "anomalyproficiency" | "異常マスタリー" => Stat::AnomalyProficiency,
        "anomalymastery" | "anomalymastery%" | "異常掌握" => Stat::AnomalyMastery,
        "penratio" | "penratio%" | "貫通率" => Stat::PenRatio,
        "pen" | "貫通値" => Stat::Pen,
        "energyregen" | "energyregen%" | "エネルギー自動回復" => Stat::EnergyRegen,
        "impact" | "impact%" | "衝撃力" => Stat::Impact,
        _ => return None,
    };
    Some(stat)
}

fn match_elemental(key: &str) -> Option<Element> {
    Element::iter().find(|e| {
        let en = format!("{}elementaldamage%", compact(&e.to_string()));
        let jp = format!("{}属性ダメージ%", e.jp_name());
        key == en || key == jp
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_names_round_trip() {
        for stat in Stat::all() {
            assert_eq!(
                normalize(&stat.canonical_name()),
                StatKey::Known(stat),
                "{} did not normalize back to itself",
                stat
            );
        }
    }

    #[test]
    fn test_flat_and_percent_are_distinct() {
        assert_eq!(normalize("攻撃力(実数値)"), StatKey::Known(Stat::Atk));
        assert_eq!(normalize("攻撃力（％）"), StatKey::Known(Stat::AtkPercent));
        assert_ne!(normalize("HP"), normalize("HP%"));
    }

    #[test]
    fn test_elemental_family_marker() {
        assert!(is_elemental_family("属性ダメージ"));
        assert!(is_elemental_family(" Elemental Damage% "));
        assert!(!is_elemental_family("Fire Elemental Damage%"));
    }
}
