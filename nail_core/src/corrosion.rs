//! Sacrificial Thickness for Steel Soil Nails
//!
//! Corrosion allowance (mm) to subtract from the bar surface, by how
//! aggressive the surrounding ground is, the soil category, and the
//! required design life.
//!
//! The table is an immutable value. Build one with
//! [`SacrificialThicknessTable::standard`] and pass it around, or borrow the
//! process-wide instance from [`SacrificialThicknessTable::shared`].
//!
//! ## Example
//!
//! ```rust
//! use nail_core::corrosion::{AggressivenessClass, DesignLife, SacrificialThicknessTable, SoilType};
//!
//! let table = SacrificialThicknessTable::shared();
//! let t = table.thickness_for(
//!     AggressivenessClass::NotAggressive,
//!     SoilType::UndisturbedNaturalSoils,
//!     DesignLife::Years50,
//! );
//! assert_eq!(t, Some(0.60));
//! ```

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Ground aggressiveness toward buried steel
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AggressivenessClass {
    NotAggressive,
    Aggressive,
}

impl AggressivenessClass {
    /// All classes for UI selection
    pub const ALL: [AggressivenessClass; 2] = [
        AggressivenessClass::NotAggressive,
        AggressivenessClass::Aggressive,
    ];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            AggressivenessClass::NotAggressive => "Not Aggressive",
            AggressivenessClass::Aggressive => "Aggressive",
        }
    }

    /// Bundled Portuguese label
    pub fn label_pt(&self) -> &'static str {
        match self {
            AggressivenessClass::NotAggressive => "Não Agressivo",
            AggressivenessClass::Aggressive => "Agressivo",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match normalize(s).as_str() {
            "notaggressive" | "nonaggressive" | "naoagressivo" | "nãoagressivo" | "n" | "na" => {
                Ok(AggressivenessClass::NotAggressive)
            }
            "aggressive" | "agressivo" | "a" => Ok(AggressivenessClass::Aggressive),
            _ => Err(CalcError::unknown_label("aggressiveness class", s)),
        }
    }
}

impl std::fmt::Display for AggressivenessClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Soil categories, each filed under exactly one aggressiveness class
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SoilType {
    UndisturbedNaturalSoils,
    CompactedFill,
    UncompactedFill,
    PollutedNaturalSoils,
    NaturalOrganicSoils,
    AshSlagFill,
}

impl SoilType {
    /// All soil types in table order
    pub const ALL: [SoilType; 6] = [
        SoilType::UndisturbedNaturalSoils,
        SoilType::CompactedFill,
        SoilType::UncompactedFill,
        SoilType::PollutedNaturalSoils,
        SoilType::NaturalOrganicSoils,
        SoilType::AshSlagFill,
    ];

    /// The class this soil type belongs to
    pub fn aggressiveness(&self) -> AggressivenessClass {
        match self {
            SoilType::UndisturbedNaturalSoils | SoilType::CompactedFill | SoilType::UncompactedFill => {
                AggressivenessClass::NotAggressive
            }
            SoilType::PollutedNaturalSoils | SoilType::NaturalOrganicSoils | SoilType::AshSlagFill => {
                AggressivenessClass::Aggressive
            }
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SoilType::UndisturbedNaturalSoils => "Undisturbed Natural Soils",
            SoilType::CompactedFill => "Compacted Fill (sand/silt/clay)",
            SoilType::UncompactedFill => "Uncompacted Fill (sand/silt/clay)",
            SoilType::PollutedNaturalSoils => "Polluted Natural Soils / Industrial Regions",
            SoilType::NaturalOrganicSoils => "Natural Organic Soils (Swamp, Peat)",
            SoilType::AshSlagFill => "Uncompacted/Compacted Fill (ash, slag)",
        }
    }

    /// Bundled Portuguese label
    pub fn label_pt(&self) -> &'static str {
        match self {
            SoilType::UndisturbedNaturalSoils => "Solos Naturais Inalterados",
            SoilType::CompactedFill => "Aterro Compactado (areia, silte, argila etc.)",
            SoilType::UncompactedFill => "Aterro Não Compactado (areia, silte, argila etc.)",
            SoilType::PollutedNaturalSoils => "Solos Naturais Poluídos e Regiões Industriais",
            SoilType::NaturalOrganicSoils => "Solos Naturais (Pântano, Turfa, Solos Orgânicos)",
            SoilType::AshSlagFill => "Aterros não compactados ou compactados (cinzas, escórias etc.)",
        }
    }

    fn variant_name(&self) -> &'static str {
        match self {
            SoilType::UndisturbedNaturalSoils => "UndisturbedNaturalSoils",
            SoilType::CompactedFill => "CompactedFill",
            SoilType::UncompactedFill => "UncompactedFill",
            SoilType::PollutedNaturalSoils => "PollutedNaturalSoils",
            SoilType::NaturalOrganicSoils => "NaturalOrganicSoils",
            SoilType::AshSlagFill => "AshSlagFill",
        }
    }

    /// Parse from a display label, Portuguese label, variant name, or the
    /// English label up to its first parenthesis (e.g. "Natural Organic Soils").
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let wanted = normalize(s);
        if wanted.is_empty() {
            return Err(CalcError::unknown_label("soil type", s));
        }
        SoilType::ALL
            .into_iter()
            .find(|soil| {
                let short = soil.display_name().split('(').next().unwrap_or_default();
                [soil.display_name(), soil.label_pt(), soil.variant_name(), short]
                    .iter()
                    .any(|label| normalize(label) == wanted)
            })
            .ok_or_else(|| CalcError::unknown_label("soil type", s))
    }
}

impl std::fmt::Display for SoilType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Required service life of the nail
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum DesignLife {
    Years5,
    Years25,
    Years50,
}

impl DesignLife {
    pub const ALL: [DesignLife; 3] = [DesignLife::Years5, DesignLife::Years25, DesignLife::Years50];

    pub fn years(&self) -> u32 {
        match self {
            DesignLife::Years5 => 5,
            DesignLife::Years25 => 25,
            DesignLife::Years50 => 50,
        }
    }

    /// Only 5, 25 and 50 years are tabulated
    pub fn from_years(years: u32) -> Option<Self> {
        match years {
            5 => Some(DesignLife::Years5),
            25 => Some(DesignLife::Years25),
            50 => Some(DesignLife::Years50),
            _ => None,
        }
    }
}

impl TryFrom<u32> for DesignLife {
    type Error = CalcError;

    fn try_from(years: u32) -> Result<Self, Self::Error> {
        DesignLife::from_years(years).ok_or_else(|| CalcError::unknown_label("design life", years.to_string()))
    }
}

impl From<DesignLife> for u32 {
    fn from(life: DesignLife) -> Self {
        life.years()
    }
}

impl std::fmt::Display for DesignLife {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} years", self.years())
    }
}

/// Sacrificial thickness (mm) per design life for one table row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThicknessRow {
    pub years_5_mm: f64,
    pub years_25_mm: f64,
    pub years_50_mm: f64,
}

impl ThicknessRow {
    const fn new(years_5_mm: f64, years_25_mm: f64, years_50_mm: f64) -> Self {
        Self { years_5_mm, years_25_mm, years_50_mm }
    }

    pub fn get(&self, life: DesignLife) -> f64 {
        match life {
            DesignLife::Years5 => self.years_5_mm,
            DesignLife::Years25 => self.years_25_mm,
            DesignLife::Years50 => self.years_50_mm,
        }
    }
}

// Rows as (class, soil type, 5y, 25y, 50y)
const STANDARD_ROWS: [(AggressivenessClass, SoilType, ThicknessRow); 6] = [
    (AggressivenessClass::NotAggressive, SoilType::UndisturbedNaturalSoils, ThicknessRow::new(0.0, 0.30, 0.60)),
    (AggressivenessClass::NotAggressive, SoilType::CompactedFill, ThicknessRow::new(0.09, 0.35, 0.60)),
    (AggressivenessClass::NotAggressive, SoilType::UncompactedFill, ThicknessRow::new(0.18, 0.70, 1.20)),
    (AggressivenessClass::Aggressive, SoilType::PollutedNaturalSoils, ThicknessRow::new(0.15, 0.75, 1.50)),
    (AggressivenessClass::Aggressive, SoilType::NaturalOrganicSoils, ThicknessRow::new(0.20, 1.00, 1.75)),
    (AggressivenessClass::Aggressive, SoilType::AshSlagFill, ThicknessRow::new(0.50, 2.00, 3.25)),
];

static SHARED_TABLE: Lazy<SacrificialThicknessTable> = Lazy::new(SacrificialThicknessTable::standard);

/// Immutable (class, soil type) -> design life -> thickness lookup
#[derive(Debug, Clone, PartialEq)]
pub struct SacrificialThicknessTable {
    rows: BTreeMap<(AggressivenessClass, SoilType), ThicknessRow>,
}

impl SacrificialThicknessTable {
    /// Build the standard table
    pub fn standard() -> Self {
        let rows = STANDARD_ROWS
            .iter()
            .map(|&(class, soil, row)| ((class, soil), row))
            .collect();
        Self { rows }
    }

    /// Process-wide instance of the standard table, built on first use
    pub fn shared() -> &'static SacrificialThicknessTable {
        &SHARED_TABLE
    }

    /// Soil types registered under `class`, in table order
    pub fn soil_types_for(&self, class: AggressivenessClass) -> Vec<SoilType> {
        self.rows
            .keys()
            .filter(|(c, _)| *c == class)
            .map(|&(_, soil)| soil)
            .collect()
    }

    /// Thickness in mm, or `None` if the triple is not tabulated
    pub fn thickness_for(&self, class: AggressivenessClass, soil: SoilType, life: DesignLife) -> Option<f64> {
        self.rows.get(&(class, soil)).map(|row| row.get(life))
    }

    /// Thickness lookup from a raw soil label and year count.
    ///
    /// Unknown labels and untabulated years both come back as `None`.
    pub fn thickness_for_label(&self, class: AggressivenessClass, soil_label: &str, years: u32) -> Option<f64> {
        let soil = SoilType::from_str_flexible(soil_label).ok()?;
        let life = DesignLife::from_years(years)?;
        self.thickness_for(class, soil, life)
    }

    /// Like [`thickness_for`](Self::thickness_for) but reports a missing
    /// entry as [`CalcError::InvalidCombination`].
    pub fn lookup(&self, class: AggressivenessClass, soil: SoilType, life: DesignLife) -> CalcResult<f64> {
        self.thickness_for(class, soil, life).ok_or_else(|| {
            tracing::warn!(%class, %soil, years = life.years(), "no sacrificial thickness entry");
            CalcError::invalid_combination(class.display_name(), soil.display_name(), life.years())
        })
    }

    /// All rows in table order
    pub fn entries(&self) -> impl Iterator<Item = (AggressivenessClass, SoilType, &ThicknessRow)> + '_ {
        self.rows.iter().map(|(&(class, soil), row)| (class, soil, row))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Default for SacrificialThicknessTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Lowercase, keep letters and digits only
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_soil_has_all_design_lives() {
        let table = SacrificialThicknessTable::standard();
        for class in AggressivenessClass::ALL {
            let soils = table.soil_types_for(class);
            assert_eq!(soils.len(), 3);
            for soil in soils {
                for life in DesignLife::ALL {
                    assert!(table.thickness_for(class, soil, life).is_some(), "{class} / {soil} / {life}");
                }
            }
        }
    }

    #[test]
    fn test_soil_types_belong_to_one_class() {
        let table = SacrificialThicknessTable::standard();
        for (class, soil, _) in table.entries() {
            assert_eq!(soil.aggressiveness(), class);
        }
        let not_aggressive = table.soil_types_for(AggressivenessClass::NotAggressive);
        let aggressive = table.soil_types_for(AggressivenessClass::Aggressive);
        assert!(not_aggressive.iter().all(|s| !aggressive.contains(s)));
        assert_eq!(table.len(), 6);
    }

    #[test]
    fn test_known_values() {
        let table = SacrificialThicknessTable::shared();
        assert_eq!(
            table.thickness_for(AggressivenessClass::NotAggressive, SoilType::UndisturbedNaturalSoils, DesignLife::Years5),
            Some(0.0)
        );
        assert_eq!(
            table.thickness_for(AggressivenessClass::Aggressive, SoilType::NaturalOrganicSoils, DesignLife::Years25),
            Some(1.00)
        );
        assert_eq!(
            table.thickness_for(AggressivenessClass::Aggressive, SoilType::AshSlagFill, DesignLife::Years50),
            Some(3.25)
        );
    }

    #[test]
    fn test_cross_class_is_not_found() {
        let table = SacrificialThicknessTable::standard();
        assert_eq!(
            table.thickness_for(AggressivenessClass::Aggressive, SoilType::CompactedFill, DesignLife::Years5),
            None
        );
        let err = table
            .lookup(AggressivenessClass::Aggressive, SoilType::CompactedFill, DesignLife::Years5)
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_COMBINATION");
    }

    #[test]
    fn test_label_lookup() {
        let table = SacrificialThicknessTable::standard();
        assert_eq!(
            table.thickness_for_label(AggressivenessClass::Aggressive, "Natural Organic Soils", 25),
            Some(1.00)
        );
        assert_eq!(
            table.thickness_for_label(AggressivenessClass::NotAggressive, "Solos Naturais Inalterados", 50),
            Some(0.60)
        );
        assert_eq!(table.thickness_for_label(AggressivenessClass::NotAggressive, "nonexistent soil", 5), None);
        assert_eq!(table.thickness_for_label(AggressivenessClass::NotAggressive, "Compacted Fill", 10), None);
    }

    #[test]
    fn test_soil_type_parsing() {
        assert_eq!(SoilType::from_str_flexible("compacted fill").unwrap(), SoilType::CompactedFill);
        assert_eq!(
            SoilType::from_str_flexible("Uncompacted/Compacted Fill (ash, slag)").unwrap(),
            SoilType::AshSlagFill
        );
        assert_eq!(SoilType::from_str_flexible("AshSlagFill").unwrap(), SoilType::AshSlagFill);
        assert!(SoilType::from_str_flexible("").is_err());
        assert!(SoilType::from_str_flexible("granite").is_err());
    }

    #[test]
    fn test_class_parsing() {
        assert_eq!(
            AggressivenessClass::from_str_flexible("Não Agressivo").unwrap(),
            AggressivenessClass::NotAggressive
        );
        assert_eq!(
            AggressivenessClass::from_str_flexible("not-aggressive").unwrap(),
            AggressivenessClass::NotAggressive
        );
        assert_eq!(AggressivenessClass::from_str_flexible("AGGRESSIVE").unwrap(), AggressivenessClass::Aggressive);
        assert!(AggressivenessClass::from_str_flexible("mild").is_err());
    }

    #[test]
    fn test_design_life() {
        assert_eq!(DesignLife::from_years(25), Some(DesignLife::Years25));
        assert_eq!(DesignLife::from_years(10), None);

        let json = serde_json::to_string(&DesignLife::Years50).unwrap();
        assert_eq!(json, "50");
        assert!(serde_json::from_str::<DesignLife>("7").is_err());
    }
}
