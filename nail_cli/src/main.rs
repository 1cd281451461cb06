//! # Soilnail CLI Application
//!
//! Terminal front end for the soil-nail calculators.
//!
//! Usage:
//!   nail_cli                                  interactive prompts
//!   nail_cli soil-types <class>
//!   nail_cli working-load --class <c> --soil <label> --life <years> --diameter <mm>
//!   nail_cli bond-strength --nspt <n> --hole <mm> --ref <name> [--ref <name> ...]
//!   nail_cli --json <file>                    run a CalculationItem JSON document
//!
//! Set `RUST_LOG=debug` to see calculation traces on stderr.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use nail_core::calculations::bond_strength::{self, BondStrengthInput, BondStrengthTable};
use nail_core::calculations::working_load::{self, WorkingLoadInput, WorkingLoadResult};
use nail_core::calculations::{CalculationItem, CalculationOutput, CorrelationReference};
use nail_core::corrosion::{AggressivenessClass, DesignLife, SacrificialThicknessTable, SoilType};
use nail_core::errors::{CalcError, CalcResult};
use tracing_subscriber::EnvFilter;

/// Soil nail design calculator.
#[derive(Parser, Debug)]
#[command(name = "nail_cli")]
#[command(about = "Soil nail working load and SPT bond strength calculator")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Run a CalculationItem JSON document and print the JSON result.
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    // None runs the interactive prompts
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the soil types filed under an aggressiveness class.
    SoilTypes(SoilTypesArgs),

    /// Tensile working load of a nail bar after corrosion.
    WorkingLoad(WorkingLoadArgs),

    /// Adhesion and bond strength per meter from N(SPT).
    BondStrength(BondStrengthArgs),
}

#[derive(Args, Debug)]
struct SoilTypesArgs {
    /// Aggressiveness class ("not aggressive" or "aggressive").
    class: String,
}

#[derive(Args, Debug)]
struct WorkingLoadArgs {
    /// Aggressiveness class of the ground.
    #[arg(long)]
    class: String,

    /// Soil type label (English or Portuguese).
    #[arg(long)]
    soil: String,

    /// Design life in years: 5, 25 or 50.
    #[arg(long)]
    life: u32,

    /// Nominal bar diameter in mm.
    #[arg(long, allow_negative_numbers = true)]
    diameter: f64,

    /// Free-form label echoed in the JSON output.
    #[arg(long, default_value = "")]
    label: String,
}

impl WorkingLoadArgs {
    fn into_input(self) -> CalcResult<WorkingLoadInput> {
        Ok(WorkingLoadInput {
            label: self.label,
            diameter_mm: self.diameter,
            aggressiveness: AggressivenessClass::from_str_flexible(&self.class)?,
            soil_type: SoilType::from_str_flexible(&self.soil)?,
            design_life: DesignLife::from_years(self.life)
                .ok_or_else(|| CalcError::unknown_label("design life", self.life.to_string()))?,
        })
    }
}

#[derive(Args, Debug)]
struct BondStrengthArgs {
    /// SPT blow count N.
    #[arg(long, allow_negative_numbers = true)]
    nspt: f64,

    /// Borehole diameter in mm.
    #[arg(long, allow_negative_numbers = true)]
    hole: f64,

    /// Correlation to evaluate. Repeat for several, rows keep this order.
    #[arg(long = "ref", value_name = "NAME")]
    refs: Vec<String>,

    /// Free-form label echoed in the JSON output.
    #[arg(long, default_value = "")]
    label: String,
}

impl BondStrengthArgs {
    fn into_input(self) -> CalcResult<BondStrengthInput> {
        let references = self
            .refs
            .iter()
            .map(|r| CorrelationReference::from_str_flexible(r))
            .collect::<CalcResult<Vec<_>>>()?;
        Ok(BondStrengthInput {
            label: self.label,
            references,
            n_spt: self.nspt,
            borehole_diameter_mm: self.hole,
        })
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(cli, SacrificialThicknessTable::shared()) {
        report_error(&e);
        std::process::exit(1);
    }
}

fn run(cli: Cli, table: &SacrificialThicknessTable) -> CalcResult<()> {
    if let Some(path) = cli.json {
        println!("{}", json_command(&path, table)?);
        return Ok(());
    }

    match cli.command {
        None => interactive(table),
        Some(Command::SoilTypes(args)) => {
            print!("{}", soil_types_command(&args.class, table)?);
            Ok(())
        }
        Some(Command::WorkingLoad(args)) => {
            let input = args.into_input()?;
            let result = working_load::calculate(&input, table)?;
            print_working_load(&input, &result);
            Ok(())
        }
        Some(Command::BondStrength(args)) => {
            let input = args.into_input()?;
            let rows = bond_strength::calculate(&input)?;
            print_bond_strength(&input, &rows);
            Ok(())
        }
    }
}

fn report_error(e: &CalcError) {
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}

// ============================================================================
// Argument Mode
// ============================================================================

fn soil_types_command(class: &str, table: &SacrificialThicknessTable) -> CalcResult<String> {
    let class = AggressivenessClass::from_str_flexible(class)?;
    let mut out = format!("Soil types for {}:\n", class);
    for soil in table.soil_types_for(class) {
        out.push_str(&format!("  - {} ({})\n", soil.display_name(), soil.label_pt()));
    }
    Ok(out)
}

fn json_command(path: &Path, table: &SacrificialThicknessTable) -> CalcResult<String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::invalid_input("json file", path.display().to_string(), e.to_string()))?;
    let item: CalculationItem = serde_json::from_str(&contents)?;
    tracing::debug!(calc_type = item.calc_type(), label = item.label(), "running JSON request");

    let output: CalculationOutput = item.run(table)?;
    Ok(serde_json::to_string_pretty(&output)?)
}

// ============================================================================
// Interactive Mode
// ============================================================================

fn prompt_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;

    let mut input = String::new();
    match io::stdin().lock().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    prompt_line(prompt)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Numbered menu, returns the chosen index (default on empty/invalid input)
fn prompt_choice(title: &str, options: &[String], default: usize) -> usize {
    println!("{}", title);
    for (i, option) in options.iter().enumerate() {
        println!("  {}) {}", i + 1, option);
    }
    prompt_line(&format!("Choice [{}]: ", default + 1))
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|n| (1..=options.len()).contains(n))
        .map(|n| n - 1)
        .unwrap_or(default)
}

/// Map "1, 3" style menu picks onto references; unknown entries are skipped.
fn parse_reference_picks(raw: &str) -> Vec<CorrelationReference> {
    raw.split(',')
        .filter_map(|part| part.trim().parse::<usize>().ok())
        .filter_map(|n| n.checked_sub(1))
        .filter_map(|i| CorrelationReference::ALL.get(i).copied())
        .collect()
}

fn interactive(table: &SacrificialThicknessTable) -> CalcResult<()> {
    println!("Soilnail CLI - Soil Nail Design Calculator");
    println!("==========================================");
    println!();

    let calculators = vec![
        "Tensile working load Ft (kN)".to_string(),
        "Grout-soil adhesion / bond strength (kN/m)".to_string(),
    ];
    match prompt_choice("Select calculator:", &calculators, 0) {
        0 => interactive_working_load(table),
        _ => interactive_bond_strength(),
    }
}

fn interactive_working_load(table: &SacrificialThicknessTable) -> CalcResult<()> {
    println!();
    println!("Working load from sacrificial thickness.");
    println!();

    let classes: Vec<String> = AggressivenessClass::ALL.iter().map(|c| c.to_string()).collect();
    let aggressiveness = AggressivenessClass::ALL[prompt_choice("Ground:", &classes, 0)];

    let soils = table.soil_types_for(aggressiveness);
    let soil_labels: Vec<String> = soils.iter().map(|s| s.to_string()).collect();
    let soil_type = soils[prompt_choice("Soil type:", &soil_labels, 0)];

    let lives: Vec<String> = DesignLife::ALL.iter().map(|l| l.to_string()).collect();
    let design_life = DesignLife::ALL[prompt_choice("Design life:", &lives, 0)];

    let diameter_mm = prompt_f64("Bar diameter (mm) [25]: ", 25.0);

    let input = WorkingLoadInput {
        label: String::new(),
        diameter_mm,
        aggressiveness,
        soil_type,
        design_life,
    };
    let result = working_load::calculate(&input, table)?;
    print_working_load(&input, &result);
    Ok(())
}

fn interactive_bond_strength() -> CalcResult<()> {
    println!();
    println!("Adhesion qs from N(SPT) and bond strength per meter of nail.");
    println!();

    let n_spt = prompt_f64("N(SPT) [10]: ", 10.0);
    let borehole_diameter_mm = prompt_f64("Borehole diameter (mm) [100]: ", 100.0);

    println!("References:");
    for (i, reference) in CorrelationReference::ALL.iter().enumerate() {
        println!("  {}) {}", i + 1, reference);
    }
    let references = prompt_line("Choose references, comma separated (e.g. 1,3): ")
        .map(|s| parse_reference_picks(&s))
        .unwrap_or_default();

    let input = BondStrengthInput {
        label: String::new(),
        references,
        n_spt,
        borehole_diameter_mm,
    };
    let table = bond_strength::calculate(&input)?;
    print_bond_strength(&input, &table);
    Ok(())
}

// ============================================================================
// Output
// ============================================================================

fn print_working_load(input: &WorkingLoadInput, result: &WorkingLoadResult) {
    print!("{}", working_load_report(input, result));
    println!();
    println!("JSON Output:");
    if let Ok(json) = serde_json::to_string_pretty(result) {
        println!("{}", json);
    }
}

/// Human-readable block, one decimal throughout
fn working_load_report(input: &WorkingLoadInput, result: &WorkingLoadResult) -> String {
    let mut out = String::new();
    out.push_str("═══════════════════════════════════════\n");
    out.push_str("  WORKING LOAD\n");
    out.push_str("═══════════════════════════════════════\n\n");
    out.push_str("Input:\n");
    out.push_str(&format!("  Ground:       {}\n", input.aggressiveness));
    out.push_str(&format!("  Soil:         {}\n", input.soil_type));
    out.push_str(&format!("  Design life:  {}\n", input.design_life));
    out.push_str(&format!("  Diameter:     {:.1} mm\n\n", input.diameter_mm));
    out.push_str("Results:\n");
    out.push_str(&format!("  Sacrificial thickness: {:.1} mm\n", result.sacrificial_thickness_mm));
    out.push_str(&format!("  Net diameter:          {:.1} mm\n", result.net_diameter_mm));
    out.push_str(&format!("  Net area:              {:.1} mm²\n", result.net_area_mm2));
    out.push_str(&format!("  Working load:          {:.1} kN\n", result.working_load_kn));
    out
}

fn print_bond_strength(input: &BondStrengthInput, table: &BondStrengthTable) {
    println!("═══════════════════════════════════════════════════════════");
    println!("  BOND STRENGTH  N(SPT) = {}, D = {:.0} mm", input.n_spt, input.borehole_diameter_mm);
    println!("═══════════════════════════════════════════════════════════");
    println!("  {:<24} {:>10} {:>18}", "Reference", "qs (kPa)", "Bond str. (kN/m)");
    for row in &table.rows {
        println!("  {:<24} {:>10.1} {:>18.1}", row.reference.display_name(), row.qs_kpa, row.bond_strength);
    }
    println!();
    println!("JSON Output:");
    if let Ok(json) = serde_json::to_string_pretty(table) {
        println!("{}", json);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::NamedTempFile;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("nail_cli").chain(args.iter().copied()))
    }

    fn bond_strength_args(cli: Cli) -> BondStrengthArgs {
        match cli.command {
            Some(Command::BondStrength(args)) => args,
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_repeated_refs_keep_order() {
        let cli = parse(&["bond-strength", "--ref", "springer", "--nspt", "12", "--hole", "100", "--ref", "ortigao"])
            .unwrap();
        let args = bond_strength_args(cli);
        assert_eq!(args.refs, vec!["springer", "ortigao"]);
        assert_eq!(args.nspt, 12.0);
    }

    #[test]
    fn test_label_without_value_is_rejected() {
        // --label must not swallow the next flag
        assert!(parse(&["bond-strength", "--label", "--nspt", "10", "--hole", "100", "--ref", "ortigao"]).is_err());

        let cli = parse(&["bond-strength", "--label", "SPT-2", "--nspt", "10", "--hole", "100", "--ref", "ortigao"])
            .unwrap();
        let args = bond_strength_args(cli);
        assert_eq!(args.label, "SPT-2");
        assert_eq!(args.nspt, 10.0);
    }

    #[test]
    fn test_bad_arguments_rejected() {
        assert!(parse(&["bond-strength", "--nspt", "abc", "--hole", "100"]).is_err());
        assert!(parse(&["bond-strength", "--nspt", "10"]).is_err());
        assert!(parse(&["working-load", "--class", "aggressive"]).is_err());
        assert!(parse(&["--json", "item.json", "soil-types", "aggressive"]).is_err());
        assert!(parse(&["unknown"]).is_err());
    }

    #[test]
    fn test_no_arguments_is_interactive() {
        let cli = parse(&[]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.json.is_none());
    }

    #[test]
    fn test_design_life_must_be_tabulated() {
        let cli = parse(&[
            "working-load", "--class", "not aggressive", "--soil", "Compacted Fill", "--life", "30", "--diameter", "25",
        ])
        .unwrap();
        let Some(Command::WorkingLoad(args)) = cli.command else {
            panic!("expected working-load");
        };
        assert_eq!(args.into_input().unwrap_err().error_code(), "UNKNOWN_LABEL");
    }

    #[test]
    fn test_bond_strength_requires_reference() {
        let cli = parse(&["bond-strength", "--nspt", "10", "--hole", "100"]).unwrap();
        let err = run(cli, SacrificialThicknessTable::shared()).unwrap_err();
        assert_eq!(err.error_code(), "MISSING_SELECTION");
    }

    #[test]
    fn test_working_load_invalid_combination() {
        let cli = parse(&[
            "working-load", "--class", "aggressive", "--soil", "Compacted Fill", "--life", "5", "--diameter", "25",
        ])
        .unwrap();
        let err = run(cli, SacrificialThicknessTable::shared()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_COMBINATION");
    }

    #[test]
    fn test_empty_reference_pick_selects_nothing() {
        assert!(parse_reference_picks("").is_empty());
        assert_eq!(
            parse_reference_picks("3, 1, 9, x"),
            vec![CorrelationReference::Springer2006, CorrelationReference::Ortigao1997]
        );

        let input = BondStrengthInput {
            label: String::new(),
            references: parse_reference_picks(""),
            n_spt: 10.0,
            borehole_diameter_mm: 100.0,
        };
        assert_eq!(bond_strength::calculate(&input).unwrap_err().error_code(), "MISSING_SELECTION");
    }

    #[test]
    fn test_soil_types_command() {
        let out = soil_types_command("aggressive", SacrificialThicknessTable::shared()).unwrap();
        assert!(out.starts_with("Soil types for Aggressive:"));
        assert!(out.contains("Polluted Natural Soils / Industrial Regions"));
        assert!(out.contains("Uncompacted/Compacted Fill (ash, slag)"));
        assert!(!out.contains("Undisturbed Natural Soils"));
        assert_eq!(out.lines().count(), 4);

        let err = soil_types_command("mildly aggressive", SacrificialThicknessTable::shared()).unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_LABEL");
    }

    #[test]
    fn test_json_command() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "type": "BondStrength", "label": "SPT-4", "references": ["Ortigao1997"], "n_spt": 20, "borehole_diameter_mm": 150 }}"#
        )
        .unwrap();

        let out = json_command(file.path(), SacrificialThicknessTable::shared()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["type"], "BondStrength");
        assert_eq!(value["rows"][0]["reference"], "Ortigao1997");
        assert!((value["rows"][0]["qs_kpa"].as_f64().unwrap() - 200.0).abs() < 1e-9);
        assert!((value["rows"][0]["bond_strength"].as_f64().unwrap() - 94.248).abs() < 0.001);
    }

    #[test]
    fn test_json_command_errors() {
        let table = SacrificialThicknessTable::shared();

        let missing = json_command(Path::new("/nonexistent/item.json"), table).unwrap_err();
        assert_eq!(missing.error_code(), "INVALID_INPUT");

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let bad = json_command(file.path(), table).unwrap_err();
        assert_eq!(bad.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_working_load_report_one_decimal() {
        let input = WorkingLoadInput {
            label: String::new(),
            diameter_mm: 25.0,
            aggressiveness: AggressivenessClass::NotAggressive,
            soil_type: SoilType::UncompactedFill,
            design_life: DesignLife::Years25,
        };
        let result = working_load::calculate(&input, SacrificialThicknessTable::shared()).unwrap();
        let report = working_load_report(&input, &result);

        assert!(report.contains("Sacrificial thickness: 0.7 mm"), "{report}");
        assert!(!report.contains("0.70 mm"));
        assert!(report.contains("Net diameter:          23.6 mm"));
    }
}
