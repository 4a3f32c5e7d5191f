use discforge::stats::{is_elemental_family, normalize, Element, Stat, StatKey};
use rstest::rstest;

#[rstest]
#[case("HP", Stat::Hp)]
#[case("HP(実数値)", Stat::Hp)]
#[case("HP実数値", Stat::Hp)]
#[case("HP%", Stat::HpPercent)]
#[case("HP（％）", Stat::HpPercent)]
#[case("攻撃力(実数値)", Stat::Atk)]
#[case("攻撃力%", Stat::AtkPercent)]
#[case(" atk % ", Stat::AtkPercent)]
#[case("防御力実数値", Stat::Def)]
#[case("防御力(%)", Stat::DefPercent)]
#[case("会心率", Stat::CritRate)]
#[case("crit  rate", Stat::CritRate)]
#[case("会心ダメージ", Stat::CritDmg)]
#[case("異常マスタリー", Stat::AnomalyProficiency)]
#[case("異常掌握", Stat::AnomalyMastery)]
#[case("貫通率", Stat::PenRatio)]
#[case("貫通値", Stat::Pen)]
#[case("エネルギー自動回復", Stat::EnergyRegen)]
#[case("衝撃力", Stat::Impact)]
#[case("炎属性ダメージ%", Stat::ElementalDmg(Element::Fire))]
#[case("玄墨属性ダメージ％", Stat::ElementalDmg(Element::AuricInk))]
#[case("Auric Ink Elemental Damage%", Stat::ElementalDmg(Element::AuricInk))]
#[case("physical elemental damage%", Stat::ElementalDmg(Element::Physical))]
fn test_aliases(#[case] raw: &str, #[case] expected: Stat) {
    assert_eq!(normalize(raw), StatKey::Known(expected));
}

#[rstest]
#[case("CRIT Rte", "CRIT Rte")]
#[case("  Luck   Bonus ", "Luck Bonus")]
#[case("", "")]
#[case("Wind属性ダメージ%", "Wind属性ダメージ%")]
fn test_unrecognized_keeps_cleaned_text(#[case] raw: &str, #[case] cleaned: &str) {
    let key = normalize(raw);
    assert_eq!(key, StatKey::Unrecognized(cleaned.to_string()));
    assert_eq!(key.to_string(), cleaned);
    assert!(key.stat().is_none());
}

#[test]
fn test_display_is_canonical() {
    assert_eq!(normalize("会心ダメージ").to_string(), "CRIT DMG");
    assert_eq!(
        normalize("氷属性ダメージ%").to_string(),
        "Ice Elemental Damage%"
    );
}

#[test]
fn test_normalize_is_idempotent_on_output() {
    for raw in ["攻撃力（％）", "貫通値", "電気属性ダメージ%", "nonsense  key"] {
        let once = normalize(raw).to_string();
        assert_eq!(normalize(&once).to_string(), once);
    }
}

#[test]
fn test_stat_serde_uses_canonical_names() {
    let json = serde_json::to_string(&Stat::ElementalDmg(Element::Ether)).unwrap();
    assert_eq!(json, "\"Ether Elemental Damage%\"");
    let back: Stat = serde_json::from_str("\"エーテル属性ダメージ%\"").unwrap();
    assert_eq!(back, Stat::ElementalDmg(Element::Ether));
    assert!(serde_json::from_str::<Stat>("\"CRIT Rte\"").is_err());
}

#[test]
fn test_generic_elemental_name_is_not_a_stat() {
    assert!(is_elemental_family("属性ダメージ%"));
    assert!(!normalize("属性ダメージ%").is_known());
}
