//! # Soil Nail Formulas
//!
//! Closed-form expressions for the steel bar and the grout-soil interface.
//!
//! ## Notation
//!
//! - `d` = nominal bar diameter (mm)
//! - `t` = sacrificial (corrosion) thickness (mm)
//! - `A` = net steel area
//! - `f_y` = steel yield strength (MPa)
//! - `γ_s` = steel partial safety factor
//! - `N` = SPT blow count
//! - `q_s` = unit adhesion along the grout-soil interface (kPa)
//! - `D` = borehole diameter (mm)

use std::f64::consts::PI;

// =============================================================================
// STEEL BAR
// =============================================================================

/// Net bar diameter after corrosion loss on the whole circumference
///
/// # Formula
/// d_net = d - 2t
///
/// # Example
/// ```rust
/// use nail_core::equations::nail::net_diameter_mm;
///
/// assert!((net_diameter_mm(25.0, 0.30) - 24.4).abs() < 1e-12);
/// ```
#[inline]
pub fn net_diameter_mm(diameter_mm: f64, sacrificial_thickness_mm: f64) -> f64 {
    diameter_mm - 2.0 * sacrificial_thickness_mm
}

/// Area of a solid circular section
///
/// # Formula
/// A = π d² / 4
///
/// Output units are the square of the input units.
#[inline]
pub fn circular_area(diameter: f64) -> f64 {
    PI * diameter * diameter / 4.0
}

/// Allowable steel stress
///
/// # Formula
/// f_allow = f_y / γ_s
#[inline]
pub fn allowable_stress_mpa(yield_strength_mpa: f64, safety_factor: f64) -> f64 {
    yield_strength_mpa / safety_factor
}

/// Tensile working load of the net section in kN
///
/// # Formula
/// T = A × f_allow × 1000
///
/// # Arguments
/// * `net_area_m2` - Net steel area (m²)
/// * `allowable_stress_mpa` - Allowable stress (MPa)
#[inline]
pub fn tensile_load_kn(net_area_m2: f64, allowable_stress_mpa: f64) -> f64 {
    net_area_m2 * allowable_stress_mpa * 1000.0
}

// =============================================================================
// GROUT-SOIL INTERFACE
// =============================================================================

/// Ortigão (1997): linear in N
///
/// # Formula
/// q_s = 50 + 7.5 N
#[inline]
pub fn qs_ortigao_1997(n_spt: f64) -> f64 {
    50.0 + 7.5 * n_spt
}

/// Ortigão et al. (1997): logarithmic in N, undefined for N <= 0
///
/// # Formula
/// q_s = 67 + 60 ln N
#[inline]
pub fn qs_ortigao_et_al_1997(n_spt: f64) -> f64 {
    67.0 + 60.0 * n_spt.ln()
}

/// Springer (2006): logarithmic in N, undefined for N <= 0
///
/// # Formula
/// q_s = 45.12 ln N - 14.99
#[inline]
pub fn qs_springer_2006(n_spt: f64) -> f64 {
    45.12 * n_spt.ln() - 14.99
}

/// Pull-out resistance per meter of nail
///
/// # Formula
/// T_b = q_s π D × 0.001
///
/// With `q_s` in kPa and `D` in mm the result is kN per meter of bonded
/// length.
///
/// # Example
/// ```rust
/// use nail_core::equations::nail::bond_strength_per_length;
///
/// let tb = bond_strength_per_length(200.0, 150.0);
/// assert!((tb - 94.25).abs() < 0.01);
/// ```
#[inline]
pub fn bond_strength_per_length(qs_kpa: f64, borehole_diameter_mm: f64) -> f64 {
    qs_kpa * PI * borehole_diameter_mm * 0.001
}
