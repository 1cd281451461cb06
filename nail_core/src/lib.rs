//! # nail_core - Soil Nail Design Calculation Engine
//!
//! `nail_core` is the computational heart of Soilnail: two independent
//! calculators for soil-nailed walls, with JSON-serializable inputs and
//! outputs so any front end can drive them.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All inputs and results implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Auditable**: Every formula is registered with its literature source
//!
//! ## Quick Start
//!
//! ```rust
//! use nail_core::calculations::bond_strength::{evaluate, CorrelationReference};
//! use nail_core::calculations::working_load::working_load;
//! use nail_core::corrosion::{AggressivenessClass, DesignLife, SacrificialThicknessTable, SoilType};
//!
//! let table = SacrificialThicknessTable::shared();
//! let t = table
//!     .thickness_for(AggressivenessClass::Aggressive, SoilType::NaturalOrganicSoils, DesignLife::Years25)
//!     .unwrap();
//! let load_kn = working_load(25.0, t);
//!
//! let rows = evaluate(&[CorrelationReference::Springer2006], 12.0, 100.0).unwrap();
//! println!("T = {:.1} kN, qs = {:.1} kPa", load_kn, rows[0].qs_kpa);
//! ```
//!
//! ## Modules
//!
//! - [`corrosion`] - Sacrificial thickness table and soil categories
//! - [`calculations`] - Working load and bond strength calculators
//! - [`equations`] - Closed-form formulas and the equation registry
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod corrosion;
pub mod equations;
pub mod errors;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CalculationItem, CalculationOutput, CorrelationReference};
pub use corrosion::{AggressivenessClass, DesignLife, SacrificialThicknessTable, SoilType};
pub use errors::{CalcError, CalcResult};
