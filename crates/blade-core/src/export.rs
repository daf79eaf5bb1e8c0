//! CSV export of the material usages on one blade.

use std::io;

use blade_model::Blade;
use thiserror::Error;

/// File name offered for a materials export.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "materials_report.csv";

const HEADER: [&str; 6] = ["Damage ID", "Description", "Status", "Material", "Qty", "Unit"];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("blade has no material usages to export")]
    NothingToExport,

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to finish CSV output: {0}")]
    Io(#[source] io::Error),
}

/// Render one row per material usage on `blade`, header first, every field
/// double-quoted.
pub fn export_materials_csv(blade: &Blade) -> Result<String, ExportError> {
    let mut rows = Vec::new();
    for damage in &blade.damages {
        for usage in &damage.materials_used {
            rows.push([
                damage.id.to_string(),
                damage.description.clone(),
                damage.status.to_string(),
                usage.name.clone(),
                usage.qty.to_string(),
                usage.unit.clone(),
            ]);
        }
    }
    if rows.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(HEADER)?;
    for row in &rows {
        writer.write_record(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|error| ExportError::Io(error.into_error()))?;

    tracing::debug!(blade = %blade.id, rows = rows.len(), "Exported materials");
    String::from_utf8(bytes)
        .map_err(|error| ExportError::Io(io::Error::new(io::ErrorKind::InvalidData, error)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use blade_model::{BladeId, Damage, DamageStatus, MaterialUsage};

    fn blade_with(materials: Vec<MaterialUsage>) -> Blade {
        let mut blade = Blade::new(BladeId::from("4-1"), "A");
        blade.damages.push(Damage {
            id: 41,
            category: "Cat 2".to_string(),
            status: DamageStatus::InProgress,
            description: "Erosion, tip".to_string(),
            radius: 38.5,
            side: "leading_edge".to_string(),
            turbine_id: 4,
            turbine_serial_no: "SN-4".to_string(),
            blade_serial_no: "A".to_string(),
            notes: Vec::new(),
            logs: Vec::new(),
            materials_used: materials,
        });
        blade
    }

    #[test]
    fn quotes_every_field() {
        let blade = blade_with(vec![MaterialUsage {
            name: "Epoxy".to_string(),
            qty: 2.5,
            unit: "kg".to_string(),
            added_at: None,
        }]);

        let csv = export_materials_csv(&blade).unwrap();

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines,
            vec![
                r#""Damage ID","Description","Status","Material","Qty","Unit""#,
                r#""41","Erosion, tip","in_progress","Epoxy","2.5","kg""#,
            ]
        );
    }

    #[test]
    fn empty_blade_has_nothing_to_export() {
        let blade = blade_with(Vec::new());
        assert!(matches!(
            export_materials_csv(&blade),
            Err(ExportError::NothingToExport)
        ));
    }
}
