mod cli;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use cli::{Cli, Commands};
use herdops::config::{Config, OutputFormat};
use herdops::datasources::SnapshotFileSource;
use herdops::logic::alerts::urgent_only;
use herdops::logic::{
    assess_mating, AlertEngine, AnimalReport, HerdSummary, HerdSyncService, MatingAssessment,
    MatingProposal,
};
use herdops::models::{Alert, HerdSnapshot};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(cli.config.clone()).context("Failed to load configuration")?;
    let format = cli.format.unwrap_or(config.output);
    let as_of = cli.as_of.unwrap_or_else(|| Local::now().date_naive());

    let snapshot_path = config.snapshot_path(cli.snapshot.as_ref())?;
    let source = SnapshotFileSource::open(&snapshot_path)
        .await
        .with_context(|| format!("Failed to load herd snapshot {}", snapshot_path.display()))?;

    let mut sync = HerdSyncService::new(
        Box::new(source),
        AlertEngine::with_policy(config.alerts),
    );

    match cli.command {
        Commands::Alerts { urgent } => {
            let mut alerts = sync.alerts(as_of).await?;
            if urgent {
                alerts = urgent_only(&alerts);
            }
            match format {
                OutputFormat::Json => print_json(&alerts)?,
                OutputFormat::Text => print_alerts(&config.herd_name, as_of, &alerts),
            }
        }
        Commands::Summary => {
            let alerts = sync.alerts(as_of).await?;
            let herd = sync.current().context("Herd snapshot not loaded")?;
            let summary = HerdSummary::build(herd, &alerts, as_of);
            match format {
                OutputFormat::Json => print_json(&summary)?,
                OutputFormat::Text => print_summary(&config.herd_name, &summary),
            }
        }
        Commands::Mate { female, male, date } => {
            let herd = sync.refresh().await?;
            let proposal = MatingProposal {
                female_id: female,
                male_id: male,
                date: date.unwrap_or(as_of),
            };
            let assessment = assess_mating(proposal, herd);
            match format {
                OutputFormat::Json => print_json(&assessment)?,
                OutputFormat::Text => print_assessment(herd, &assessment),
            }
            if !assessment.is_allowed() {
                std::process::exit(1);
            }
        }
        Commands::Animal { id } => {
            let herd = sync.refresh().await?;
            let report = AnimalReport::build(herd, id, as_of)?;
            match format {
                OutputFormat::Json => print_json(&report)?,
                OutputFormat::Text => print_animal(&report),
            }
        }
        Commands::Check => {
            let herd = sync.refresh().await?;
            check_snapshot(herd, as_of)?;
            println!(
                "{}: {} animals, {} reproductive events, {} health events OK",
                snapshot_path.display(),
                herd.animals.len(),
                herd.reproductive_events.len(),
                herd.health_events.len()
            );
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn check_snapshot(herd: &HerdSnapshot, as_of: NaiveDate) -> Result<()> {
    for (kind, id) in herd.unknown_references() {
        tracing::warn!(animal_id = id, "{} references an animal not in the snapshot", kind);
    }
    if let Err(e) = herd.validate(as_of) {
        bail!("Snapshot failed validation: {}", e);
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

fn print_alerts(herd_name: &str, as_of: NaiveDate, alerts: &[Alert]) {
    if alerts.is_empty() {
        println!("{}: no alerts as of {}", herd_name, as_of);
        return;
    }

    println!("{}: {} alert(s) as of {}", herd_name, alerts.len(), as_of);
    for alert in alerts {
        let due = alert
            .due_date
            .map(|d| format!(" (due {})", d))
            .unwrap_or_default();
        println!(
            "  {} [{}] {}{}",
            alert.priority.symbol(),
            alert.category.tag(),
            alert.message,
            due
        );
    }
}

fn print_summary(herd_name: &str, summary: &HerdSummary) {
    println!("{} as of {}", herd_name, summary.as_of);
    println!(
        "  Animals:     {} active of {} ({} female, {} male)",
        summary.active, summary.total_animals, summary.females, summary.males
    );
    println!("  Pregnant:    {}", summary.pregnant);
    println!("  Undiagnosed: {}", summary.awaiting_diagnosis);
    println!("  Withdrawal:  {}", summary.in_withdrawal);
    println!(
        "  Alerts:      {} ({} high, {} medium, {} low)",
        summary.alerts.total, summary.alerts.high, summary.alerts.medium, summary.alerts.low
    );
}

fn print_assessment(herd: &HerdSnapshot, assessment: &MatingAssessment) {
    let proposal = &assessment.proposal;
    let verdict = if assessment.is_allowed() {
        "ALLOWED"
    } else {
        "BLOCKED"
    };
    println!(
        "{} x {} on {}: {}",
        herd.label_for(proposal.female_id),
        herd.label_for(proposal.male_id),
        proposal.date,
        verdict
    );

    let related = &assessment.relatedness;
    println!(
        "  Relatedness: {} (coefficient {:.4}, {} risk)",
        related.class,
        related.coefficient,
        related.risk_level().as_str()
    );

    let interval = &assessment.interval;
    match (interval.days_elapsed, interval.days_required) {
        (Some(elapsed), Some(required)) => println!(
            "  Interval:    {}, {} of {} day(s)",
            interval.reason, elapsed, required
        ),
        _ => println!("  Interval:    {}", interval.reason),
    }

    for issue in &assessment.blocking {
        println!("  ✗ {}", issue.describe());
    }
    for issue in &assessment.warnings {
        println!("  ⚠ {}", issue.describe());
    }
}

fn print_animal(report: &AnimalReport) {
    println!(
        "{} (#{}) {} {}",
        report.label, report.animal_id, report.sex, report.status
    );
    println!(
        "  Age:         {}",
        report.age.as_deref().unwrap_or("unknown")
    );
    println!("  Mature:      {}", report.mature);
    println!("  Past breeding age: {}", report.past_breeding_age);

    if report.withdrawals.is_empty() {
        println!("  Withdrawal:  none");
    }
    for w in &report.withdrawals {
        println!(
            "  Withdrawal:  {} until {} ({} day(s) left)",
            w.kind, w.ends, w.days_remaining
        );
    }

    if let Some(ref milk) = report.milk {
        let stage = milk.stage.map(|s| s.as_str()).unwrap_or("unknown stage");
        println!(
            "  Milk:        {:.1} L on {} ({}), yield {}, SCC {}, composition {}",
            milk.liters,
            milk.date,
            stage,
            if milk.normal_yield { "normal" } else { "low" },
            if milk.somatic_cells_normal { "normal" } else { "high" },
            milk.composition.as_str()
        );
    }

    if let Some(ref growth) = report.growth {
        let gain = growth
            .daily_gain
            .map(|g| format!("{:.3} kg/day", g))
            .unwrap_or_else(|| "n/a".into());
        println!(
            "  Weight:      {:.1} kg on {}, gain {}{}{}",
            growth.kg,
            growth.date,
            gain,
            if growth.adequate_gain { "" } else { " (below target)" },
            if growth.body_condition_optimal {
                ""
            } else {
                ", body condition outside 2.5-3.5"
            }
        );
    }
}
