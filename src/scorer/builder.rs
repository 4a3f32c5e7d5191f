use crate::er::ErTable;
use crate::error::DfResult;
use crate::growth::loader::load_growth_tables;
use crate::growth::GrowthTables;
use crate::rules::SlotTable;
use crate::scorer::Scorer;
use crate::stats::Stat;
use std::path::Path;
use tracing::debug;

/// Assembles a [`Scorer`]. Anything not provided falls back to the standard
/// game tables.
#[derive(Debug, Default)]
pub struct ScorerBuilder {
    tables: Option<GrowthTables>,
    elemental_reference: Option<Stat>,
}

impl ScorerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_growth_tables(mut self, tables: GrowthTables) -> Self {
        self.tables = Some(tables);
        self
    }

    pub fn with_growth_from_files<P1: AsRef<Path>, P2: AsRef<Path>>(
        mut self,
        main_path: P1,
        sub_path: P2,
    ) -> DfResult<Self> {
        self.tables = Some(load_growth_tables(main_path, sub_path)?);
        Ok(self)
    }

    /// Sub stat whose step measures elemental damage ER.
    pub fn with_elemental_reference(mut self, stat: Stat) -> Self {
        self.elemental_reference = Some(stat);
        self
    }

    pub fn build(self) -> Scorer {
        let mut tables = self.tables.unwrap_or_else(GrowthTables::standard);
        if let Some(stat) = self.elemental_reference {
            tables = tables.with_elemental_step_reference(stat);
        }
        let er = ErTable::build(&tables);
        debug!(
            "Scorer initialized. Elemental ER reference: {}",
            tables.elemental_step_reference()
        );

        Scorer {
            tables,
            er,
            slots: SlotTable::standard(),
        }
    }
}
