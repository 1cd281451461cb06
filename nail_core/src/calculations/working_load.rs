//! # Tensile Working Load
//!
//! Allowable axial tension of a steel soil nail after corrosion.
//!
//! ## Assumptions
//!
//! - Corrosion removes the sacrificial thickness uniformly around the bar,
//!   so the diameter loses twice the thickness
//! - Yield strength 500 MPa with a steel safety factor of 1.15
//! - Solid round bar, threads and couplers not deducted
//!
//! ## Example
//!
//! ```rust
//! use nail_core::calculations::working_load::{calculate, WorkingLoadInput};
//! use nail_core::corrosion::{AggressivenessClass, DesignLife, SacrificialThicknessTable, SoilType};
//!
//! let input = WorkingLoadInput {
//!     label: "N-1".to_string(),
//!     diameter_mm: 25.0,
//!     aggressiveness: AggressivenessClass::NotAggressive,
//!     soil_type: SoilType::UndisturbedNaturalSoils,
//!     design_life: DesignLife::Years25,
//! };
//!
//! let result = calculate(&input, SacrificialThicknessTable::shared()).unwrap();
//! assert!((result.working_load_kn - 203.3).abs() < 0.1);
//! ```

use serde::{Deserialize, Serialize};

use crate::corrosion::{AggressivenessClass, DesignLife, SacrificialThicknessTable, SoilType};
use crate::equations::nail::{allowable_stress_mpa, circular_area, net_diameter_mm, tensile_load_kn};
use crate::equations::registry::{Equation, EquationTracker};
use crate::errors::{CalcError, CalcResult};
use crate::units::{Kilopascals, Megapascals, Meters, Millimeters, SqM, SqMm};

/// Steel yield strength (MPa)
pub const STEEL_YIELD_STRENGTH_MPA: f64 = 500.0;

/// Partial safety factor applied to steel yield strength
pub const STEEL_SAFETY_FACTOR: f64 = 1.15;

/// Working load of a bar of `diameter_mm` that has lost
/// `sacrificial_thickness_mm` all around, in kN.
///
/// Pure formula with no validation: a net diameter at or below zero gives
/// a meaningless result. Use [`calculate`] for checked input.
///
/// # Example
///
/// ```rust
/// use nail_core::calculations::working_load::working_load;
///
/// let load = working_load(25.0, 0.30);
/// assert!((load - 203.3).abs() < 0.1);
/// ```
pub fn working_load(diameter_mm: f64, sacrificial_thickness_mm: f64) -> f64 {
    let net_m: Meters = Millimeters(net_diameter_mm(diameter_mm, sacrificial_thickness_mm)).into();
    let area_m2 = circular_area(net_m.0);
    tensile_load_kn(area_m2, allowable_stress_mpa(STEEL_YIELD_STRENGTH_MPA, STEEL_SAFETY_FACTOR))
}

/// Input parameters for a working load check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "N-1",
///   "diameter_mm": 25.0,
///   "aggressiveness": "NotAggressive",
///   "soil_type": "UndisturbedNaturalSoils",
///   "design_life": 25
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingLoadInput {
    /// User label (e.g., "N-1", "Row 3")
    #[serde(default)]
    pub label: String,

    /// Nominal bar diameter in millimeters
    pub diameter_mm: f64,

    /// Ground aggressiveness class
    pub aggressiveness: AggressivenessClass,

    /// Soil category (must belong to `aggressiveness`)
    pub soil_type: SoilType,

    /// Design life (5, 25 or 50 years)
    pub design_life: DesignLife,
}

impl WorkingLoadInput {
    /// Validate input parameters that do not need the table.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.diameter_mm.is_finite() || self.diameter_mm <= 0.0 {
            return Err(CalcError::invalid_input(
                "diameter_mm",
                self.diameter_mm.to_string(),
                "Bar diameter must be a positive number",
            ));
        }
        Ok(())
    }
}

/// Results from a working load check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "sacrificial_thickness_mm": 0.3,
///   "net_diameter_mm": 24.4,
///   "net_area_mm2": 467.6,
///   "allowable_stress_mpa": 434.78,
///   "working_load_kn": 203.3,
///   "equations": { "usages": [ ... ] }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingLoadResult {
    /// Corrosion allowance looked up from the table (mm)
    pub sacrificial_thickness_mm: f64,

    /// Diameter after corrosion d - 2t (mm)
    pub net_diameter_mm: f64,

    /// Net steel area (mm²)
    pub net_area_mm2: f64,

    /// Allowable steel stress f_y / γ_s (MPa)
    pub allowable_stress_mpa: f64,

    /// Tensile working load (kN)
    pub working_load_kn: f64,

    /// Equations applied, in order
    pub equations: EquationTracker,
}

/// Calculate the tensile working load for a nail.
///
/// # Returns
///
/// * `Ok(WorkingLoadResult)` - Calculation results
/// * `Err(CalcError::InvalidCombination)` - Soil type not listed under the class
/// * `Err(CalcError::DomainError)` - Corrosion consumes the whole bar
/// * `Err(CalcError::InvalidInput)` - Non-positive diameter
pub fn calculate(input: &WorkingLoadInput, table: &SacrificialThicknessTable) -> CalcResult<WorkingLoadResult> {
    input.validate()?;

    let thickness_mm = table.lookup(input.aggressiveness, input.soil_type, input.design_life)?;

    let net_mm = Millimeters(net_diameter_mm(input.diameter_mm, thickness_mm));
    if net_mm.value() <= 0.0 {
        tracing::warn!(
            diameter_mm = input.diameter_mm,
            thickness_mm,
            "sacrificial thickness consumes the whole bar"
        );
        return Err(CalcError::domain_error(
            "diameter_mm",
            input.diameter_mm.to_string(),
            format!(
                "Bar diameter must exceed twice the sacrificial thickness ({:.2} mm)",
                2.0 * thickness_mm
            ),
        ));
    }

    let mut equations = EquationTracker::new();
    let context = input.label.as_str();

    equations.record(Equation::NetDiameter, context);
    let net_m: Meters = net_mm.into();

    equations.record(Equation::NetSectionArea, context);
    let area = SqM(circular_area(net_m.value()));

    equations.record(Equation::AllowableSteelStress, context);
    let stress = Megapascals(allowable_stress_mpa(STEEL_YIELD_STRENGTH_MPA, STEEL_SAFETY_FACTOR));

    equations.record(Equation::TensileWorkingLoad, context);
    let load = Kilopascals::from(stress) * area;

    let area_mm2: SqMm = area.into();

    tracing::debug!(
        label = %input.label,
        thickness_mm,
        net_diameter_mm = net_mm.value(),
        working_load_kn = load.value(),
        "working load calculated"
    );

    Ok(WorkingLoadResult {
        sacrificial_thickness_mm: thickness_mm,
        net_diameter_mm: net_mm.value(),
        net_area_mm2: area_mm2.value(),
        allowable_stress_mpa: stress.value(),
        working_load_kn: load.value(),
        equations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_nail() -> WorkingLoadInput {
        WorkingLoadInput {
            label: "Test Nail".to_string(),
            diameter_mm: 25.0,
            aggressiveness: AggressivenessClass::NotAggressive,
            soil_type: SoilType::UndisturbedNaturalSoils,
            design_life: DesignLife::Years25,
        }
    }

    #[test]
    fn test_working_load_formula() {
        // net d = 24.4 mm, A = 4.676e-4 m², 434.78 MPa
        let load = working_load(25.0, 0.30);
        assert!((load - 203.3).abs() < 0.05);
    }

    #[test]
    fn test_zero_thickness_is_gross_section() {
        // 25 mm gross: A = 4.909e-4 m² -> 213.4 kN
        let load = working_load(25.0, 0.0);
        assert!((load - 213.4).abs() < 0.1);
    }

    #[test]
    fn test_calculate_matches_formula() {
        let nail = test_nail();
        let result = calculate(&nail, &SacrificialThicknessTable::standard()).unwrap();

        assert_eq!(result.sacrificial_thickness_mm, 0.30);
        assert!((result.net_diameter_mm - 24.4).abs() < 1e-9);
        assert!((result.net_area_mm2 - 467.6).abs() < 0.1);
        assert!((result.allowable_stress_mpa - 434.78).abs() < 0.01);
        assert!((result.working_load_kn - working_load(25.0, 0.30)).abs() < 1e-9);
        assert_eq!(result.equations.unique_equations().len(), 4);
    }

    #[test]
    fn test_aggressive_soil_reduces_load() {
        let table = SacrificialThicknessTable::standard();
        let mut nail = test_nail();
        nail.design_life = DesignLife::Years50;
        let mild = calculate(&nail, &table).unwrap();

        nail.aggressiveness = AggressivenessClass::Aggressive;
        nail.soil_type = SoilType::AshSlagFill;
        let harsh = calculate(&nail, &table).unwrap();

        assert!(harsh.working_load_kn < mild.working_load_kn);
        // 25 - 6.5 = 18.5 mm net
        assert!((harsh.net_diameter_mm - 18.5).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_combination() {
        let mut nail = test_nail();
        nail.aggressiveness = AggressivenessClass::Aggressive;
        let err = calculate(&nail, &SacrificialThicknessTable::standard()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_COMBINATION");
    }

    #[test]
    fn test_bar_consumed_by_corrosion() {
        let mut nail = test_nail();
        nail.aggressiveness = AggressivenessClass::Aggressive;
        nail.soil_type = SoilType::AshSlagFill;
        nail.design_life = DesignLife::Years50;
        nail.diameter_mm = 6.5;
        let err = calculate(&nail, &SacrificialThicknessTable::standard()).unwrap_err();
        assert_eq!(err.error_code(), "DOMAIN_ERROR");
    }

    #[test]
    fn test_invalid_diameter() {
        let mut nail = test_nail();
        nail.diameter_mm = 0.0;
        assert!(calculate(&nail, &SacrificialThicknessTable::standard()).is_err());
        nail.diameter_mm = f64::NAN;
        assert!(nail.validate().is_err());
    }

    #[test]
    fn test_serialization() {
        let nail = test_nail();
        let json = serde_json::to_string_pretty(&nail).unwrap();
        assert!(json.contains("\"design_life\": 25"));
        let roundtrip: WorkingLoadInput = serde_json::from_str(&json).unwrap();
        assert_eq!(nail, roundtrip);
    }
}
