//! # Unit Types
//!
//! Type-safe wrappers for the SI units used by the nail calculators. These
//! are plain f64 newtypes that serialize as bare numbers.
//!
//! ## SI Units
//!
//! - Length: millimeters (bar and borehole diameters), meters
//! - Area: square millimeters, square meters
//! - Force: kilonewtons (kN)
//! - Stress: megapascals (MPa, steel), kilopascals (kPa, soil adhesion)
//!
//! ## Example
//!
//! ```rust
//! use nail_core::units::{Meters, Millimeters};
//!
//! let bar = Millimeters(25.0);
//! let bar_m: Meters = bar.into();
//! assert!((bar_m.0 - 0.025).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in square millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqMm(pub f64);

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqM(pub f64);

impl From<SqM> for SqMm {
    fn from(m2: SqM) -> Self {
        SqMm(m2.0 * 1.0e6)
    }
}

impl From<SqMm> for SqM {
    fn from(mm2: SqMm) -> Self {
        SqM(mm2.0 / 1.0e6)
    }
}

// ============================================================================
// Force Units
// ============================================================================

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilonewtons(pub f64);

// ============================================================================
// Stress Units
// ============================================================================

/// Stress in megapascals (N/mm²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Megapascals(pub f64);

/// Stress in kilopascals (kN/m²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilopascals(pub f64);

impl From<Megapascals> for Kilopascals {
    fn from(mpa: Megapascals) -> Self {
        Kilopascals(mpa.0 * 1000.0)
    }
}

impl From<Kilopascals> for Megapascals {
    fn from(kpa: Kilopascals) -> Self {
        Megapascals(kpa.0 / 1000.0)
    }
}

/// Stress acting over an area gives a force: kPa × m² = kN
impl Mul<SqM> for Kilopascals {
    type Output = Kilonewtons;
    fn mul(self, rhs: SqM) -> Self::Output {
        Kilonewtons(self.0 * rhs.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Millimeters);
impl_arithmetic!(Meters);
impl_arithmetic!(SqMm);
impl_arithmetic!(SqM);
impl_arithmetic!(Kilonewtons);
impl_arithmetic!(Megapascals);
impl_arithmetic!(Kilopascals);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millimeters_to_meters() {
        let m: Meters = Millimeters(24.4).into();
        assert!((m.0 - 0.0244).abs() < 1e-12);
        let back: Millimeters = m.into();
        assert!((back.0 - 24.4).abs() < 1e-9);
    }

    #[test]
    fn test_stress_times_area() {
        // 434.78 MPa over 4.676e-4 m² ≈ 203.3 kN
        let stress: Kilopascals = Megapascals(500.0 / 1.15).into();
        let force = stress * SqM(4.676e-4);
        assert!((force.0 - 203.3).abs() < 0.1);
    }

    #[test]
    fn test_arithmetic() {
        let a = Millimeters(25.0);
        let b = Millimeters(0.6);
        assert!(((a - b).0 - 24.4).abs() < 1e-12);
        assert!(((a + b).0 - 25.6).abs() < 1e-12);
        assert_eq!((a * 2.0).0, 50.0);
        assert_eq!((a / 2.0).0, 12.5);
    }

    #[test]
    fn test_serialization() {
        let kpa = Kilopascals(200.0);
        let json = serde_json::to_string(&kpa).unwrap();
        assert_eq!(json, "200.0");

        let roundtrip: Kilopascals = serde_json::from_str(&json).unwrap();
        assert_eq!(kpa, roundtrip);
    }
}
