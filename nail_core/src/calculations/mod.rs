//! # Soil Nail Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> CalcResult<*Result>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`working_load`] - Tensile working load of a corroded steel bar
//! - [`bond_strength`] - SPT-based adhesion and bond strength per meter

pub mod bond_strength;
pub mod working_load;

use serde::{Deserialize, Serialize};

use crate::corrosion::SacrificialThicknessTable;
use crate::errors::CalcResult;

// Re-export commonly used types
pub use bond_strength::{BondStrengthInput, BondStrengthResult, BondStrengthTable, CorrelationReference};
pub use working_load::{WorkingLoadInput, WorkingLoadResult};

/// Enum wrapper for all calculation requests.
///
/// Lets a JSON document carry either calculator's input with a `"type"`
/// discriminator:
///
/// ```json
/// { "type": "BondStrength", "references": ["Ortigao1997"], "n_spt": 20, "borehole_diameter_mm": 150 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Tensile working load of a nail bar
    WorkingLoad(WorkingLoadInput),
    /// Adhesion and bond strength from SPT
    BondStrength(BondStrengthInput),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::WorkingLoad(w) => &w.label,
            CalculationItem::BondStrength(b) => &b.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::WorkingLoad(_) => "WorkingLoad",
            CalculationItem::BondStrength(_) => "BondStrength",
        }
    }

    /// Run the matching calculator
    pub fn run(&self, table: &SacrificialThicknessTable) -> CalcResult<CalculationOutput> {
        match self {
            CalculationItem::WorkingLoad(input) => {
                working_load::calculate(input, table).map(CalculationOutput::WorkingLoad)
            }
            CalculationItem::BondStrength(input) => {
                bond_strength::calculate(input).map(CalculationOutput::BondStrength)
            }
        }
    }
}

/// Result counterpart of [`CalculationItem`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    WorkingLoad(WorkingLoadResult),
    BondStrength(BondStrengthTable),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corrosion::{AggressivenessClass, DesignLife, SoilType};

    #[test]
    fn test_item_from_json() {
        let json = r#"{
            "type": "BondStrength",
            "label": "SPT-4",
            "references": ["Ortigao1997"],
            "n_spt": 20,
            "borehole_diameter_mm": 150
        }"#;
        let item: CalculationItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.calc_type(), "BondStrength");
        assert_eq!(item.label(), "SPT-4");

        match item.run(SacrificialThicknessTable::shared()).unwrap() {
            CalculationOutput::BondStrength(table) => {
                assert!((table.rows[0].qs_kpa - 200.0).abs() < 1e-9);
            }
            other => panic!("unexpected output {:?}", other),
        }
    }

    #[test]
    fn test_working_load_item() {
        let item = CalculationItem::WorkingLoad(WorkingLoadInput {
            label: String::new(),
            diameter_mm: 32.0,
            aggressiveness: AggressivenessClass::Aggressive,
            soil_type: SoilType::PollutedNaturalSoils,
            design_life: DesignLife::Years50,
        });

        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"type\":\"WorkingLoad\""));

        match item.run(&SacrificialThicknessTable::standard()).unwrap() {
            CalculationOutput::WorkingLoad(result) => {
                assert_eq!(result.sacrificial_thickness_mm, 1.50);
                assert!((result.net_diameter_mm - 29.0).abs() < 1e-9);
            }
            other => panic!("unexpected output {:?}", other),
        }
    }

    #[test]
    fn test_untabulated_design_life_rejected() {
        let json = r#"{
            "type": "WorkingLoad",
            "diameter_mm": 25,
            "aggressiveness": "NotAggressive",
            "soil_type": "CompactedFill",
            "design_life": 10
        }"#;
        assert!(serde_json::from_str::<CalculationItem>(json).is_err());
    }
}
