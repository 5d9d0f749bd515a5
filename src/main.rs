use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use household_energy::model::round2;
use household_energy::{
    BudgetAnalysis, BudgetStatus, HouseholdProfile, IncomeLevel, RecommendationKind, Region,
    ReportLog, ReportStore, Settings, bucketize, detect, export_summary_csv, generate,
    input::load_appliances, record,
};

/// Monthly electricity estimates for a household, plus analysis of saved reports
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML settings file (rates, cohort bounds, anomaly sensitivity)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// JSON file holding saved reports
    #[arg(short, long, global = true, default_value = "reports.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate consumption and bill from an appliance CSV and save the report
    Estimate {
        /// CSV with Name,Power,Hours,Quantity,UsageDays columns
        #[arg(short, long)]
        appliances: PathBuf,
        #[arg(long, default_value = "Kigali")]
        region: Region,
        #[arg(long, default_value = "Medium")]
        income: IncomeLevel,
        #[arg(long, default_value = "4")]
        household_size: u32,
        #[arg(long, default_value = "50000")]
        budget: f64,
    },
    /// Segment saved reports into consumption cohorts and list anomalies
    Analyze,
    /// Write a CSV summary of saved reports
    Export {
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("household_energy=info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };

    match cli.command {
        Command::Estimate {
            appliances,
            region,
            income,
            household_size,
            budget,
        } => {
            let household = HouseholdProfile {
                region,
                income_level: income,
                household_size,
                monthly_budget: budget,
            };
            run_estimate(&settings, &cli.store, &appliances, &household)
        }
        Command::Analyze => run_analyze(&settings, &cli.store),
        Command::Export { output } => run_export(&cli.store, &output),
    }
}

fn run_estimate(
    settings: &Settings,
    store_path: &Path,
    appliances_path: &Path,
    household: &HouseholdProfile,
) -> Result<()> {
    let appliances = load_appliances(appliances_path)
        .with_context(|| format!("Failed to read appliances from {}", appliances_path.display()))?;
    let mut log = ReportLog::load(store_path).context("Failed to load report log")?;

    let report = record(&mut log, &appliances, household, &settings.tariff)?;
    log.save(store_path).context("Failed to save report log")?;
    info!("Saved report {} ({} total)", report.id, log.len());

    let currency = &settings.currency;
    println!("Energy Consumption Estimate:\n");
    println!("   Monthly Consumption: {:.2} kWh", report.consumption_kwh);
    println!("   Estimated Bill:      {:.2} {}", report.bill, currency);
    println!("   Tariff Bracket:      {}\n", report.tariff_bracket);

    println!("Consumption by Appliance:");
    for usage in &report.appliances {
        println!("   {:<20} {:>10.2} kWh", usage.name, usage.display_kwh());
    }

    let analysis = BudgetAnalysis::new(report.bill, household.monthly_budget);
    println!("\nBudget Analysis:");
    println!(
        "   Bill {:.2} {} of budget {:.2} {} ({:.0}% used)",
        analysis.bill, currency, analysis.budget, currency, analysis.usage_pct
    );
    match analysis.status {
        BudgetStatus::Exceeded { overage } => println!(
            "   Warning: your estimated bill exceeds your budget by {:.2} {}",
            overage, currency
        ),
        BudgetStatus::WithinBudget { headroom } => println!(
            "   Within budget. You can save {:.2} {}",
            headroom, currency
        ),
    }

    println!("\nRecommendations:");
    for rec in generate(&report, household) {
        let tag = match rec.kind {
            RecommendationKind::Warning => "!",
            RecommendationKind::Success => "+",
        };
        println!("   [{}] {}", tag, rec.text);
    }

    Ok(())
}

fn run_analyze(settings: &Settings, store_path: &Path) -> Result<()> {
    let log = ReportLog::load(store_path).context("Failed to load report log")?;
    let reports = log.reports();
    println!("Total Reports: {}\n", reports.len());

    println!("Consumption Cohorts:");
    for cohort in bucketize(reports, &settings.cohorts) {
        println!("   {}. {} ({})", cohort.id(), cohort.name(), cohort.description());
        println!(
            "      Households: {}   Avg Consumption: {:.2} kWh",
            cohort.len(),
            cohort.average_consumption
        );
        for member in &cohort.members {
            println!(
                "      {}  {:<9} {:>10.2} kWh {:>12.2} {}",
                member.timestamp.format("%Y-%m-%d %H:%M"),
                member.region().map_or("-", |r| r.as_str()),
                round2(member.consumption_kwh),
                round2(member.bill),
                settings.currency
            );
        }
    }

    let flags = detect(reports, &settings.anomaly);
    println!("\nDetected Anomalies: {}", flags.len());
    if flags.is_empty() {
        println!("   No anomalies detected. All households show normal consumption patterns.");
    }
    for flag in &flags {
        let report = flag.report;
        println!(
            "   {:.2} kWh, bill {:.2} {}, region {}, income {} (+{:.2} kWh, z={:.2})",
            report.consumption_kwh,
            report.bill,
            settings.currency,
            report.region().map_or("-", |r| r.as_str()),
            report.income_level().map_or("-", |i| i.as_str()),
            flag.deviation,
            flag.z_score
        );
        println!("      {}", flag.advice());
    }

    Ok(())
}

fn run_export(store_path: &Path, output: &Path) -> Result<()> {
    let log = ReportLog::load(store_path).context("Failed to load report log")?;
    let file = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    export_summary_csv(log.reports(), file)?;
    info!("Exported {} reports to {}", log.len(), output.display());
    Ok(())
}
