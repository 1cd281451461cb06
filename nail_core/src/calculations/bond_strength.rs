//! # Bond Strength
//!
//! Grout-soil adhesion `q_s` estimated from the SPT blow count with one or
//! more published correlations, and the resulting pull-out resistance per
//! meter of nail.
//!
//! ## Units
//!
//! `q_s` is in kPa and the borehole diameter in mm, so
//! `bond_strength = q_s · π · D · 0.001` comes out in kN per meter of
//! bonded length. Some references label the same number kPa/m; the value
//! is identical either way.
//!
//! ## Example
//!
//! ```rust
//! use nail_core::calculations::bond_strength::{evaluate, CorrelationReference};
//!
//! let rows = evaluate(&[CorrelationReference::Ortigao1997], 20.0, 150.0).unwrap();
//! assert!((rows[0].qs_kpa - 200.0).abs() < 1e-9);
//! assert!((rows[0].bond_strength - 94.25).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::nail::{
    bond_strength_per_length, qs_ortigao_1997, qs_ortigao_et_al_1997, qs_springer_2006,
};
use crate::equations::registry::{Equation, EquationTracker};
use crate::errors::{CalcError, CalcResult};
use crate::units::{Kilopascals, Millimeters};

/// Published SPT-to-adhesion correlations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CorrelationReference {
    /// Ortigão (1997): q_s = 50 + 7.5 N
    Ortigao1997,
    /// Ortigão et al. (1997): q_s = 67 + 60 ln N
    OrtigaoEtAl1997,
    /// Springer (2006): q_s = 45.12 ln N - 14.99
    Springer2006,
}

impl CorrelationReference {
    /// All references for UI selection
    pub const ALL: [CorrelationReference; 3] = [
        CorrelationReference::Ortigao1997,
        CorrelationReference::OrtigaoEtAl1997,
        CorrelationReference::Springer2006,
    ];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            CorrelationReference::Ortigao1997 => "Ortigão (1997)",
            CorrelationReference::OrtigaoEtAl1997 => "Ortigão et al. (1997)",
            CorrelationReference::Springer2006 => "Springer (2006)",
        }
    }

    /// Registry entry for this correlation
    pub fn equation(&self) -> Equation {
        match self {
            CorrelationReference::Ortigao1997 => Equation::AdhesionOrtigao1997,
            CorrelationReference::OrtigaoEtAl1997 => Equation::AdhesionOrtigaoEtAl1997,
            CorrelationReference::Springer2006 => Equation::AdhesionSpringer2006,
        }
    }

    /// Whether the correlation takes ln(N) and so needs N > 0
    pub fn is_logarithmic(&self) -> bool {
        match self {
            CorrelationReference::Ortigao1997 => false,
            CorrelationReference::OrtigaoEtAl1997 | CorrelationReference::Springer2006 => true,
        }
    }

    /// Unit adhesion q_s (kPa) for a blow count
    pub fn qs(&self, n_spt: f64) -> Kilopascals {
        let qs = match self {
            CorrelationReference::Ortigao1997 => qs_ortigao_1997(n_spt),
            CorrelationReference::OrtigaoEtAl1997 => qs_ortigao_et_al_1997(n_spt),
            CorrelationReference::Springer2006 => qs_springer_2006(n_spt),
        };
        Kilopascals(qs)
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let key: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "ortigao1997" | "ortigão1997" | "ortigao" | "ortigão" => Ok(CorrelationReference::Ortigao1997),
            "ortigaoetal1997" | "ortigãoetal1997" | "ortigaoetal" | "ortigãoetal" => {
                Ok(CorrelationReference::OrtigaoEtAl1997)
            }
            "springer2006" | "springer" => Ok(CorrelationReference::Springer2006),
            _ => Err(CalcError::unknown_label("correlation reference", s)),
        }
    }
}

impl std::fmt::Display for CorrelationReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One row of the bond strength table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BondStrengthResult {
    /// Correlation used for this row
    pub reference: CorrelationReference,

    /// Unit adhesion (kPa)
    pub qs_kpa: f64,

    /// q_s · π · D · 0.001 (kN per meter of nail)
    pub bond_strength: f64,
}

/// Evaluate each reference in order, duplicates included.
///
/// Rejects `n_spt <= 0` (or a non-finite blow count) with
/// [`CalcError::DomainError`] when any logarithmic correlation is selected.
/// Ortigão (1997) alone accepts a zero blow count.
pub fn evaluate(
    references: &[CorrelationReference],
    n_spt: f64,
    borehole_diameter_mm: f64,
) -> CalcResult<Vec<BondStrengthResult>> {
    evaluate_tracked(references, n_spt, borehole_diameter_mm, &mut EquationTracker::new())
}

fn evaluate_tracked(
    references: &[CorrelationReference],
    n_spt: f64,
    borehole_diameter_mm: f64,
    equations: &mut EquationTracker,
) -> CalcResult<Vec<BondStrengthResult>> {
    if let Some(log_ref) = references.iter().find(|r| r.is_logarithmic()) {
        if !n_spt.is_finite() || n_spt <= 0.0 {
            tracing::warn!(n_spt, reference = %log_ref, "blow count outside logarithmic domain");
            return Err(CalcError::domain_error(
                "n_spt",
                n_spt.to_string(),
                format!("{} takes ln(N), which requires N > 0", log_ref.display_name()),
            ));
        }
    }

    let diameter = Millimeters(borehole_diameter_mm);

    let rows = references
        .iter()
        .map(|&reference| {
            equations.record(reference.equation(), reference.display_name());
            let qs = reference.qs(n_spt);

            equations.record(Equation::BondStrengthPerLength, reference.display_name());
            let bond_strength = bond_strength_per_length(qs.value(), diameter.value());

            BondStrengthResult {
                reference,
                qs_kpa: qs.value(),
                bond_strength,
            }
        })
        .collect();

    Ok(rows)
}

/// Input parameters for a bond strength table.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "SPT-2, 3 m",
///   "references": ["Ortigao1997", "Springer2006"],
///   "n_spt": 12.0,
///   "borehole_diameter_mm": 100.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondStrengthInput {
    /// User label (e.g., borehole and depth)
    #[serde(default)]
    pub label: String,

    /// Correlations to evaluate, in display order
    pub references: Vec<CorrelationReference>,

    /// SPT blow count N
    pub n_spt: f64,

    /// Borehole (grout column) diameter in millimeters
    pub borehole_diameter_mm: f64,
}

impl BondStrengthInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.references.is_empty() {
            return Err(CalcError::missing_selection("references"));
        }
        if !self.n_spt.is_finite() || self.n_spt < 0.0 {
            return Err(CalcError::invalid_input(
                "n_spt",
                self.n_spt.to_string(),
                "Blow count must be a non-negative number",
            ));
        }
        if !self.borehole_diameter_mm.is_finite() || self.borehole_diameter_mm <= 0.0 {
            return Err(CalcError::invalid_input(
                "borehole_diameter_mm",
                self.borehole_diameter_mm.to_string(),
                "Borehole diameter must be a positive number",
            ));
        }
        Ok(())
    }
}

/// Results for a bond strength table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondStrengthTable {
    /// One row per requested reference, in request order
    pub rows: Vec<BondStrengthResult>,

    /// Equations applied, in order
    pub equations: EquationTracker,
}

/// Validate the input and evaluate every selected correlation.
///
/// # Returns
///
/// * `Ok(BondStrengthTable)` - One row per reference
/// * `Err(CalcError::MissingSelection)` - No reference chosen
/// * `Err(CalcError::DomainError)` - N = 0 with a logarithmic correlation
/// * `Err(CalcError::InvalidInput)` - Negative N or non-positive diameter
pub fn calculate(input: &BondStrengthInput) -> CalcResult<BondStrengthTable> {
    input.validate()?;

    let mut equations = EquationTracker::new();
    let rows = evaluate_tracked(&input.references, input.n_spt, input.borehole_diameter_mm, &mut equations)?;

    tracing::debug!(
        label = %input.label,
        n_spt = input.n_spt,
        borehole_diameter_mm = input.borehole_diameter_mm,
        rows = rows.len(),
        "bond strength evaluated"
    );

    Ok(BondStrengthTable { rows, equations })
}
