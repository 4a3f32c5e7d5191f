use crate::error::{DfResult, DiscForgeError};
use crate::growth::{GrowthTables, MainStatCurve, SubStatStep};
use crate::stats::{is_elemental_family, normalize, Stat, StatKey};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Main-stat curves as read from disk, before being merged into tables.
#[derive(Debug, Default)]
pub struct RawMainCurves {
    pub curves: BTreeMap<Stat, MainStatCurve>,
    pub elemental: Option<MainStatCurve>,
}

fn parse_num(field: Option<&str>, row: usize, column: &str) -> DfResult<f64> {
    let raw = field.map(str::trim).unwrap_or("");
    raw.parse::<f64>().map_err(|_| {
        DiscForgeError::Validation(format!(
            "Row {}: column '{}' is not a number: '{}'",
            row, column, raw
        ))
    })
}

/// Reads `name,initial,inc1,inc2,inc3,inc4,inc5,max`.
///
/// A generic "Elemental Damage%" row fills the shared elemental curve. A row
/// naming one specific element does the same, since every element grows
/// identically. Unknown names are skipped.
pub fn read_main_curves<R: Read>(reader: R) -> DfResult<RawMainCurves> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut out = RawMainCurves::default();
    let mut skipped = 0;

    for (idx, result) in rdr.records().enumerate() {
        let row = idx + 2;
        let rec = result?;
        let name = rec.get(0).map(str::trim).unwrap_or("");
        if name.is_empty() {
            continue;
        }

        let initial = parse_num(rec.get(1), row, "initial")?;
        let mut increments = [0.0; 5];
        for (i, inc) in increments.iter_mut().enumerate() {
            *inc = parse_num(rec.get(2 + i), row, &format!("inc{}", i + 1))?;
        }
        let max = parse_num(rec.get(7), row, "max")?;
        let curve = MainStatCurve::new(initial, increments, max);
        curve.validate(name)?;

        if is_elemental_family(name) {
            out.elemental = Some(curve);
            continue;
        }
        match normalize(name) {
            StatKey::Known(Stat::ElementalDmg(_)) => out.elemental = Some(curve),
            StatKey::Known(stat) => {
                out.curves.insert(stat, curve);
            }
            StatKey::Unrecognized(n) => {
                warn!("Growth: skipping unknown main stat '{}' (row {})", n, row);
                skipped += 1;
            }
        }
    }

    debug!(
        "Growth: {} main curves, elemental={}, skipped={}",
        out.curves.len(),
        out.elemental.is_some(),
        skipped
    );
    Ok(out)
}

/// Reads `name,initial,per_step`.
pub fn read_sub_steps<R: Read>(reader: R) -> DfResult<BTreeMap<Stat, SubStatStep>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut steps = BTreeMap::new();

    for (idx, result) in rdr.records().enumerate() {
        let row = idx + 2;
        let rec = result?;
        let name = rec.get(0).map(str::trim).unwrap_or("");
        if name.is_empty() {
            continue;
        }

        let step = SubStatStep {
            initial: parse_num(rec.get(1), row, "initial")?,
            per_step: parse_num(rec.get(2), row, "per_step")?,
        };
        step.validate(name)?;

        match normalize(name) {
            StatKey::Known(stat) => {
                steps.insert(stat, step);
            }
            StatKey::Unrecognized(n) => {
                warn!("Growth: skipping unknown sub stat '{}' (row {})", n, row);
            }
        }
    }

    debug!("Growth: {} sub stat steps", steps.len());
    Ok(steps)
}

/// Loads both CSV files and builds validated tables.
pub fn load_growth_tables<P1: AsRef<Path>, P2: AsRef<Path>>(
    main_path: P1,
    sub_path: P2,
) -> DfResult<GrowthTables> {
    let main_path = main_path.as_ref();
    let sub_path = sub_path.as_ref();
    info!(
        "Growth: loading tables from {:?} and {:?}",
        main_path, sub_path
    );

    let raw = read_main_curves(std::fs::File::open(main_path)?)?;
    let sub = read_sub_steps(std::fs::File::open(sub_path)?)?;

    if raw.curves.is_empty() && raw.elemental.is_none() {
        return Err(DiscForgeError::Validation(format!(
            "No main stat curves found in {:?}",
            main_path
        )));
    }

    GrowthTables::new(raw.curves, raw.elemental, sub)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_elemental_family_row() {
        let data = "name,initial,inc1,inc2,inc3,inc4,inc5,max\n\
                    属性ダメージ,7.5,4.5,4.5,4.5,4.5,4.5,30\n\
                    ATK,79,47,47,48,47,48,316\n";
        let raw = read_main_curves(data.as_bytes()).unwrap();
        assert!(raw.elemental.is_some());
        assert_eq!(raw.curves.get(&Stat::Atk).unwrap().max, 316.0);
    }

    #[test]
    fn test_rejects_inconsistent_curve() {
        let data = "name,initial,inc1,inc2,inc3,inc4,inc5,max\n\
                    ATK,79,47,47,48,47,48,300\n";
        assert!(matches!(
            read_main_curves(data.as_bytes()),
            Err(DiscForgeError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_mismatched_sub_step() {
        let data = "name,initial,per_step\nCRIT Rate,2.4,3.0\n";
        assert!(read_sub_steps(data.as_bytes()).is_err());
    }
}
