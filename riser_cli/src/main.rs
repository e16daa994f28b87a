//! # Riser CLI Application
//!
//! Command-line front end for `riser_core`: loads a building snapshot,
//! runs one calculation pass and prints a summary or writes the full
//! report as JSON.
//!
//! ```text
//! riser run block_a.json --output block_a.report.json -v
//! riser example > sample.json
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use tracing::instrument;

use riser_core::calculations::distribution::collector_name;
use riser_core::calculations::fittings::group_total;
use riser_core::{
    calculate, load_building, save_report, AlbumType, Building, BuildingReport, EngineConstants, Section, Zone,
};

#[derive(Debug, Parser)]
#[command(name = "riser", version, about)]
struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        match self.command {
            Command::Run(run) => run.run(),
            Command::Example => print_example(),
        }
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false)
            .with_writer(std::io::stderr);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a calculation pass over a building snapshot
    Run(Run),

    /// Print a sample building snapshot as JSON
    Example,
}

#[derive(Debug, clap::Args)]
struct Run {
    /// Building snapshot (JSON)
    path: PathBuf,

    /// Write the full report to this file instead of printing a summary
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override the floor 1 height (m)
    #[arg(long)]
    h1: Option<f64>,

    /// Override the typical floor height (m)
    #[arg(long)]
    hn: Option<f64>,

    /// Enable in-apartment fire suppression for this run
    #[arg(long)]
    ivpt: bool,
}

impl Run {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn run(self) -> anyhow::Result<()> {
        let mut building = load_building(&self.path)
            .with_context(|| format!("Failed to load building from {}", self.path.display()))?;

        if let Some(h1) = self.h1 {
            building.settings.h1 = h1;
        }
        if let Some(hn) = self.hn {
            building.settings.hn = hn;
        }
        if self.ivpt {
            building.settings.ivpt_enabled = true;
        }

        let report = calculate(&building, &EngineConstants::default()).context("Calculation failed")?;

        match self.output {
            Some(output) => {
                save_report(&report, &output)
                    .with_context(|| format!("Failed to write report to {}", output.display()))?;
                tracing::info!(path = %output.display(), "report written");
                println!("Report written to {}", output.display());
            }
            None => print_summary(&report),
        }
        Ok(())
    }
}

fn print_summary(report: &BuildingReport) {
    println!("═══════════════════════════════════════");
    println!("  RISER CALCULATION: {}", report.building_name);
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:");
    println!("  h1 / hn:     {:.2} m / {:.2} m", report.settings.h1, report.settings.hn);
    println!("  Apartments:  {}", report.total_apartments);
    println!("  Rent units:  {}", report.total_rent_units);
    println!("  Floors:      {}", report.floors.len());
    println!();

    println!("Risers:");
    for row in &report.risers.overall {
        println!(
            "  {} Ду {:<4} {:>4} шт  {:>10.2} m",
            row.system, row.diameter, row.count, row.length_m
        );
    }
    println!("  Total length:            {:>10.2} m", report.risers.grand_total_length_m);
    println!();

    println!("Zones:");
    for zone in &report.zones {
        println!(
            "  [{}] {} (1–{}): {} apts, {} risers, n = {}, {}",
            zone.section_index + 1,
            zone.zone_name,
            zone.to,
            zone.apts_in_zone,
            zone.risers_per_section,
            zone.n_auto,
            zone.album_name
        );
    }
    println!();

    println!("Fittings:");
    let fittings = &report.fittings;
    println!("  Compensators:    {}", group_total(&fittings.compensators));
    println!("  Fixed supports:  {}", group_total(&fittings.fixed_supports));
    println!("  End nodes:       {}", group_total(&fittings.end_nodes));
    println!("  Water meters:    {}", group_total(&fittings.water_meters));
    for (&outlets, &count) in &report.collectors.overall {
        println!("  {}: {}", collector_name(outlets), count);
    }
    println!();

    println!("Corridor PEX:");
    println!("  В1: {:.2} m", report.corridor_totals.total_v1_m);
    println!("  Т3: {:.2} m", report.corridor_totals.total_t3_m);

    if !report.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &report.warnings {
            println!("  ⚠ {warning}");
        }
    }
}

fn example_building() -> Building {
    let mut building = Building::new("Example block");
    building.sections.push(
        Section::new(17)
            .with_apartments_range(2..=17, 8)
            .with_rent(6)
            .with_corridor(36.0, 0.5)
            .with_zone(Zone::new(1, "Zone 1", 9, 2).with_diameters(40, 40, 32))
            .with_zone(Zone::new(2, "Zone 2", 17, 2).with_diameters(50, 50, 40)),
    );
    building.sections.push(
        Section::new(12)
            .with_apartments_range(2..=12, 6)
            .with_corridor(24.0, 0.25)
            .with_zone(
                Zone::new(1, "Zone 1", 12, 2)
                    .with_diameters(40, 40, 32)
                    .with_album(AlbumType::CollectorPreApt),
            ),
    );
    building
}

fn print_example() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&example_building()).context("Failed to serialize example")?;
    println!("{json}");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    Cli::parse().run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_example_is_valid() {
        let building = example_building();
        assert!(building.validate().is_ok());
        let report = calculate(&building, &EngineConstants::default()).unwrap();
        assert!(report.warnings.is_empty());
        assert_eq!(report.total_apartments, 128 + 66);
    }

    #[test]
    fn test_run_arguments() {
        let cli = Cli::parse_from(["riser", "-vv", "run", "b.json", "--h1", "4.5", "--ivpt"]);
        assert_eq!(cli.verbose, 2);
        let Command::Run(run) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(run.path, PathBuf::from("b.json"));
        assert_eq!(run.h1, Some(4.5));
        assert_eq!(run.hn, None);
        assert!(run.ivpt);
        assert!(run.output.is_none());
    }

    #[test]
    fn test_run_writes_warnings_once() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("gaps.json");
        let output = dir.path().join("gaps.report.json");

        let mut building = Building::new("Gaps");
        building
            .sections
            .push(Section::new(4).with_apartments_range(2..=4, 2).with_zone(Zone::new(1, "Z", 2, 1)));
        riser_core::save_building(&building, &input).unwrap();

        let run = Run {
            path: input,
            output: Some(output.clone()),
            h1: None,
            hn: None,
            ivpt: false,
        };
        run.run().unwrap();

        let file: riser_core::ReportFile =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(file.report.warnings.len(), 2);
    }
}
