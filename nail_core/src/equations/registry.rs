//! # Equation Registry
//!
//! Central registry of every formula used by the nail calculators, with
//! the metadata needed to audit a result: plain-text formula, variables,
//! literature source and assumptions.
//!
//! ## Usage
//!
//! ```rust
//! use nail_core::equations::registry::{Equation, EquationTracker};
//!
//! let mut tracker = EquationTracker::new();
//! tracker.record(Equation::TensileWorkingLoad, "Nail N-1");
//!
//! let meta = Equation::TensileWorkingLoad.metadata();
//! println!("Formula: {}", meta.formula_plain);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Literature References
// ============================================================================

/// Source of an equation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum CodeReference {
    /// Ortigão (1997), SPT correlation for nail adhesion
    Ortigao { year: u16, et_al: bool },
    /// Springer (2006), SPT correlation for nail adhesion
    Springer { year: u16 },
    /// Limit-state steel check with a partial safety factor
    SteelPartialFactor { gamma_s: &'static str },
    /// Fundamental mechanics (no specific reference needed)
    Mechanics,
}

impl CodeReference {
    /// Format the reference for display
    pub fn citation(&self) -> String {
        match self {
            CodeReference::Ortigao { year, et_al: false } => format!("Ortigão ({})", year),
            CodeReference::Ortigao { year, et_al: true } => format!("Ortigão et al. ({})", year),
            CodeReference::Springer { year } => format!("Springer ({})", year),
            CodeReference::SteelPartialFactor { gamma_s } => {
                format!("Steel partial safety factor γs = {}", gamma_s)
            }
            CodeReference::Mechanics => "Fundamental Mechanics".to_string(),
        }
    }
}

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for grouping equations in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Net bar geometry after corrosion
    SectionProperties,
    /// Steel tensile capacity
    SteelCapacity,
    /// Empirical SPT adhesion correlations
    Adhesion,
    /// Pull-out resistance per unit length
    BondStrength,
}

impl EquationCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::SectionProperties => "Section Properties",
            EquationCategory::SteelCapacity => "Steel Capacity",
            EquationCategory::Adhesion => "Adhesion Correlations",
            EquationCategory::BondStrength => "Bond Strength",
        }
    }

    /// Sort order for reports (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::SectionProperties => 1,
            EquationCategory::SteelCapacity => 2,
            EquationCategory::Adhesion => 3,
            EquationCategory::BondStrength => 4,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol (e.g., "d", "q_s")
    pub symbol: &'static str,
    /// Description
    pub description: &'static str,
    /// Units (e.g., "mm", "kPa")
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for one equation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// Brief description of what this equation calculates
    pub description: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    /// Literature reference
    pub reference: CodeReference,
    /// Variable definitions
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    /// Category for grouping
    pub category: EquationCategory,
    /// Source module where the equation implementation lives
    pub source_module: &'static str,
    /// Function name implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All equations used by the nail calculators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Equation {
    /// d_net = d - 2t
    NetDiameter,
    /// A = π d_net² / 4
    NetSectionArea,
    /// f_allow = f_y / γ_s
    AllowableSteelStress,
    /// T = A f_allow
    TensileWorkingLoad,
    /// q_s = 50 + 7.5 N
    AdhesionOrtigao1997,
    /// q_s = 67 + 60 ln N
    AdhesionOrtigaoEtAl1997,
    /// q_s = 45.12 ln N - 14.99
    AdhesionSpringer2006,
    /// T_b = q_s π D
    BondStrengthPerLength,
}

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::NetDiameter => EquationMetadata {
                name: "Net Bar Diameter",
                description: "Bar diameter remaining after corrosion removes the sacrificial thickness all around",
                formula_plain: "d_net = d - 2t",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("d", "Nominal bar diameter", "mm"),
                    Variable::new("t", "Sacrificial thickness", "mm"),
                    Variable::new("d_net", "Net bar diameter", "mm"),
                ],
                assumptions: vec!["Uniform corrosion on the whole circumference"],
                category: EquationCategory::SectionProperties,
                source_module: "equations/nail.rs",
                source_function: "net_diameter_mm",
            },

            Equation::NetSectionArea => EquationMetadata {
                name: "Net Section Area",
                description: "Cross-sectional area of the corroded bar",
                formula_plain: "A = pi * d_net^2 / 4",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("A", "Net steel area", "m^2"),
                    Variable::new("d_net", "Net bar diameter", "m"),
                ],
                assumptions: vec!["Solid circular bar"],
                category: EquationCategory::SectionProperties,
                source_module: "equations/nail.rs",
                source_function: "circular_area",
            },

            Equation::AllowableSteelStress => EquationMetadata {
                name: "Allowable Steel Stress",
                description: "Yield strength reduced by the steel partial safety factor",
                formula_plain: "f_allow = f_y / gamma_s = 500 / 1.15",
                reference: CodeReference::SteelPartialFactor { gamma_s: "1.15" },
                variables: vec![
                    Variable::new("f_y", "Steel yield strength", "MPa"),
                    Variable::new("gamma_s", "Steel partial safety factor", "-"),
                    Variable::new("f_allow", "Allowable stress", "MPa"),
                ],
                assumptions: vec!["f_y = 500 MPa", "gamma_s = 1.15"],
                category: EquationCategory::SteelCapacity,
                source_module: "equations/nail.rs",
                source_function: "allowable_stress_mpa",
            },

            Equation::TensileWorkingLoad => EquationMetadata {
                name: "Tensile Working Load",
                description: "Allowable axial tension carried by the net steel section",
                formula_plain: "T = A * f_allow * 1000",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("T", "Tensile working load", "kN"),
                    Variable::new("A", "Net steel area", "m^2"),
                    Variable::new("f_allow", "Allowable stress", "MPa"),
                ],
                assumptions: vec!["Axial tension only", "Threads and couplers not deducted"],
                category: EquationCategory::SteelCapacity,
                source_module: "equations/nail.rs",
                source_function: "tensile_load_kn",
            },

            Equation::AdhesionOrtigao1997 => EquationMetadata {
                name: "Adhesion, Ortigão (1997)",
                description: "Unit grout-soil adhesion from SPT blow count, linear fit",
                formula_plain: "q_s = 50 + 7.5 N",
                reference: CodeReference::Ortigao { year: 1997, et_al: false },
                variables: vec![
                    Variable::new("q_s", "Unit adhesion", "kPa"),
                    Variable::new("N", "SPT blow count", "blows"),
                ],
                assumptions: vec!["Empirical fit to pull-out tests"],
                category: EquationCategory::Adhesion,
                source_module: "equations/nail.rs",
                source_function: "qs_ortigao_1997",
            },

            Equation::AdhesionOrtigaoEtAl1997 => EquationMetadata {
                name: "Adhesion, Ortigão et al. (1997)",
                description: "Unit grout-soil adhesion from SPT blow count, logarithmic fit",
                formula_plain: "q_s = 67 + 60 ln(N)",
                reference: CodeReference::Ortigao { year: 1997, et_al: true },
                variables: vec![
                    Variable::new("q_s", "Unit adhesion", "kPa"),
                    Variable::new("N", "SPT blow count", "blows"),
                ],
                assumptions: vec!["Empirical fit to pull-out tests", "Requires N > 0"],
                category: EquationCategory::Adhesion,
                source_module: "equations/nail.rs",
                source_function: "qs_ortigao_et_al_1997",
            },

            Equation::AdhesionSpringer2006 => EquationMetadata {
                name: "Adhesion, Springer (2006)",
                description: "Unit grout-soil adhesion from SPT blow count, logarithmic fit",
                formula_plain: "q_s = 45.12 ln(N) - 14.99",
                reference: CodeReference::Springer { year: 2006 },
                variables: vec![
                    Variable::new("q_s", "Unit adhesion", "kPa"),
                    Variable::new("N", "SPT blow count", "blows"),
                ],
                assumptions: vec!["Empirical fit to pull-out tests", "Requires N > 0"],
                category: EquationCategory::Adhesion,
                source_module: "equations/nail.rs",
                source_function: "qs_springer_2006",
            },

            Equation::BondStrengthPerLength => EquationMetadata {
                name: "Bond Strength per Unit Length",
                description: "Adhesion integrated over the borehole perimeter",
                formula_plain: "T_b = q_s * pi * D * 0.001",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("T_b", "Bond strength per meter of nail", "kN/m"),
                    Variable::new("q_s", "Unit adhesion", "kPa"),
                    Variable::new("D", "Borehole diameter", "mm"),
                ],
                assumptions: vec![
                    "Adhesion uniform around the perimeter",
                    "Unit label reported inconsistently in practice (kN/m vs kPa/m)",
                ],
                category: EquationCategory::BondStrength,
                source_module: "equations/nail.rs",
                source_function: "bond_strength_per_length",
            },
        }
    }

    /// Get all equations in a given category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }

    /// Get all categories in report order
    pub fn all_categories() -> Vec<EquationCategory> {
        use EquationCategory::*;
        let mut cats = vec![SectionProperties, SteelCapacity, Adhesion, BondStrength];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

/// All equations in the registry (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    Equation::NetDiameter,
    Equation::NetSectionArea,
    Equation::AllowableSteelStress,
    Equation::TensileWorkingLoad,
    Equation::AdhesionOrtigao1997,
    Equation::AdhesionOrtigaoEtAl1997,
    Equation::AdhesionSpringer2006,
    Equation::BondStrengthPerLength,
];

// ============================================================================
// Equation Usage Tracking
// ============================================================================

/// Record of an equation being used in a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquationUsage {
    /// The equation that was used
    pub equation: Equation,
    /// Where/why it was used (e.g., "Springer (2006)")
    pub context: String,
}

impl EquationUsage {
    pub fn new(equation: Equation, context: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
        }
    }
}

/// Collector for equation usage during a calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquationTracker {
    usages: Vec<EquationUsage>,
}

impl EquationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that an equation was used
    pub fn record(&mut self, equation: Equation, context: impl Into<String>) {
        self.usages.push(EquationUsage::new(equation, context));
    }

    /// Get all recorded usages
    pub fn usages(&self) -> &[EquationUsage] {
        &self.usages
    }

    /// Get unique equations used, in first-use order
    pub fn unique_equations(&self) -> Vec<Equation> {
        let mut seen = std::collections::HashSet::new();
        self.usages
            .iter()
            .filter(|u| seen.insert(u.equation))
            .map(|u| u.equation)
            .collect()
    }

    /// Group unique equations by category, in report order
    pub fn by_category(&self) -> Vec<(EquationCategory, Vec<Equation>)> {
        let mut by_cat: std::collections::HashMap<EquationCategory, Vec<Equation>> =
            std::collections::HashMap::new();

        for eq in self.unique_equations() {
            by_cat.entry(eq.metadata().category).or_default().push(eq);
        }

        let mut result: Vec<_> = by_cat.into_iter().collect();
        result.sort_by_key(|(cat, _)| cat.sort_order());
        result
    }
}

// ============================================================================
// Markdown Generation for EQUATIONS.md
// ============================================================================

/// Generate a complete EQUATIONS.md listing every registered equation.
///
/// # Example
///
/// ```rust
/// use nail_core::equations::registry::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("Soilnail Equations Reference"));
/// assert!(markdown.contains("Adhesion Correlations"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(8_000);

    output.push_str(
        r#"# Soilnail Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-equations`

This document lists every formula used by the soil-nail working load and
bond strength calculators, with its source and assumptions.

---

"#,
    );

    let categories = Equation::all_categories();

    for category in &categories {
        let equations = Equation::in_category(*category);
        if equations.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!("| {} | {} | {} |\n", var.symbol, var.description, var.units));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Equations:** {}\n- **Categories:** {}\n",
        ALL_EQUATIONS.len(),
        categories.len()
    ));

    output
}
