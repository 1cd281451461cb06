//! # Soil Nail Equations
//!
//! All closed-form formulas used by the calculators live here, so they can
//! be checked against their literature sources in one place.
//!
//! ## Modules
//!
//! - [`nail`] - Steel bar net section, tensile capacity, SPT adhesion correlations
//! - [`registry`] - Equation metadata and usage tracking for reports
//!
//! ## Units
//!
//! - Diameters are entered in millimeters
//! - Steel stress in MPa, soil adhesion in kPa
//! - Forces in kN, bond strength in kN per meter of nail
//!
//! ## References
//!
//! - Ortigão, J.A.R. (1997), SPT-based nail adhesion, linear fit
//! - Ortigão, J.A.R. et al. (1997), SPT-based nail adhesion, logarithmic fit
//! - Springer, F.O. (2006), SPT-based nail adhesion, logarithmic fit

pub mod nail;
pub mod registry;

pub use nail::{
    allowable_stress_mpa,
    bond_strength_per_length,
    circular_area,
    net_diameter_mm,
    qs_ortigao_1997,
    qs_ortigao_et_al_1997,
    qs_springer_2006,
    tensile_load_kn,
};

pub use registry::{
    CodeReference,
    Equation,
    EquationCategory,
    EquationMetadata,
    EquationTracker,
    EquationUsage,
    Variable,
    ALL_EQUATIONS,
    generate_equations_markdown,
};
