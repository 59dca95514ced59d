use crate::infra::{InMemoryReportStorage, InMemorySessionStorage, JsonStateFile};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

use civic_report::error::AppError;
use civic_report::reports::{
    CitizenId, IssueCategory, QueueEntryView, ReportDeskService, ReportDraft, ReportStatus,
    ReportStorage, SessionStorage,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the mock image classification portion of the demo output
    #[arg(long)]
    pub(crate) skip_detection: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct QueueArgs {
    /// JSON state file to read reports from (defaults to seeded demo data)
    #[arg(long)]
    pub(crate) state_path: Option<PathBuf>,
    /// Include the full report listing after the queue
    #[arg(long)]
    pub(crate) list_reports: bool,
}

type MemoryDesk = ReportDeskService<InMemoryReportStorage, InMemorySessionStorage>;

fn memory_desk() -> Arc<MemoryDesk> {
    Arc::new(ReportDeskService::new(
        Arc::new(InMemoryReportStorage::default()),
        Arc::new(InMemorySessionStorage::default()),
    ))
}

fn demo_drafts() -> Vec<ReportDraft> {
    vec![
        ReportDraft {
            reporter: CitizenId("asha@example.com".to_string()),
            category: IssueCategory::Pothole,
            severity: 76,
            location_query: "MG Road / 5th Cross".to_string(),
            location_text: String::new(),
            image_name: "pothole-01.jpg".to_string(),
        },
        ReportDraft {
            reporter: CitizenId("dev@example.com".to_string()),
            category: IssueCategory::Waterlogging,
            severity: 88,
            location_query: "Market Street underpass".to_string(),
            location_text: "Underpass south entrance".to_string(),
            image_name: "flood-03.jpg".to_string(),
        },
        ReportDraft {
            reporter: CitizenId("asha@example.com".to_string()),
            category: IssueCategory::Garbage,
            severity: 35,
            location_query: "Jubilee Park east gate".to_string(),
            location_text: String::new(),
            image_name: "dump-11.jpg".to_string(),
        },
        ReportDraft {
            reporter: CitizenId("mira@example.com".to_string()),
            category: IssueCategory::BrokenStreetlight,
            severity: 55,
            location_query: "Station Road, pole 14".to_string(),
            location_text: String::new(),
            image_name: "light-07.jpg".to_string(),
        },
    ]
}

/// Seed a desk the way the demo walkthrough does: four submissions, one
/// verified, one resolved, one flagged.
fn seed_desk(desk: &MemoryDesk) -> Result<Vec<civic_report::reports::ReportId>, AppError> {
    let mut ids = Vec::new();
    for draft in demo_drafts() {
        let receipt = desk.submit(draft)?;
        ids.push(receipt.report.id);
    }

    desk.transition(&ids[0], ReportStatus::Verified)?;
    desk.transition(&ids[1], ReportStatus::Resolved)?;
    desk.transition(&ids[2], ReportStatus::Flagged)?;

    Ok(ids)
}

pub(crate) fn run_queue(args: QueueArgs) -> Result<(), AppError> {
    let QueueArgs {
        state_path,
        list_reports,
    } = args;

    match state_path {
        Some(path) => {
            println!("Triage queue ({})", path.display());
            let storage = Arc::new(JsonStateFile::new(path));
            let desk = ReportDeskService::new(storage.clone(), storage);
            render_queue(&desk.triage_queue()?);
            if list_reports {
                render_reports(&desk)?;
            }
        }
        None => {
            println!("Triage queue (seeded demo data)");
            let desk = memory_desk();
            seed_desk(&desk)?;
            render_queue(&desk.triage_queue()?);
            if list_reports {
                render_reports(desk.as_ref())?;
            }
        }
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { skip_detection } = args;

    println!("Civic report desk demo");

    let desk = memory_desk();

    println!("\nIntake");
    let mut ids = Vec::new();
    for draft in demo_drafts() {
        let reporter = draft.reporter.clone();
        let receipt = desk.submit(draft)?;
        println!(
            "- {} filed {} at '{}' -> risk {} ({}), +{} pts",
            reporter.0,
            receipt.report.category,
            receipt.report.location_text,
            receipt.report.risk_score,
            receipt.report.severity_band,
            receipt.points_granted
        );
        ids.push(receipt.report.id);
    }

    println!("\nTriage actions");
    let verified = desk.transition(&ids[0], ReportStatus::Verified)?;
    println!("- {} verified, +{} pts", ids[0].0, verified.points_granted);
    let resolved = desk.transition(&ids[1], ReportStatus::Resolved)?;
    println!("- {} resolved, +{} pts", ids[1].0, resolved.points_granted);
    let flagged = desk.transition(&ids[2], ReportStatus::Flagged)?;
    println!(
        "- {} flagged, +{} pts (flagged reports never earn)",
        ids[2].0, flagged.points_granted
    );

    println!("\nTriage queue");
    render_queue(&desk.triage_queue()?);

    println!("\nReward ledgers");
    for citizen in [
        "asha@example.com",
        "dev@example.com",
        "mira@example.com",
    ] {
        let ledger = desk.ledger(&CitizenId(citizen.to_string()))?;
        println!(
            "- {}: {} pts (reported {}, verified {}, resolved {})",
            citizen,
            ledger.total,
            ledger.breakdown.reported,
            ledger.breakdown.verified,
            ledger.breakdown.resolved
        );
    }

    if !skip_detection {
        println!("\nMock image classification");
        let outcome = desk.mock_detection("kerbside-upload.jpg");
        let view = outcome.to_view();
        println!(
            "- {} -> {} (severity {} / {}, confidence {}%)",
            view.image_name, view.category, view.severity, view.severity_band, view.confidence_pct
        );
    }

    Ok(())
}

fn render_queue(entries: &[QueueEntryView]) {
    if entries.is_empty() {
        println!("- queue is empty");
        return;
    }

    for entry in entries {
        println!(
            "- #{} {} | {} | risk {} ({}) | {}",
            entry.priority_rank,
            entry.id.0,
            entry.category,
            entry.risk_score,
            entry.severity_band,
            entry.location_text
        );
    }
}

fn render_reports<S, N>(desk: &ReportDeskService<S, N>) -> Result<(), AppError>
where
    S: ReportStorage + 'static,
    N: SessionStorage + 'static,
{
    println!("\nAll reports (newest first)");
    for view in desk.reports()? {
        let rank = view
            .priority_rank
            .map(|rank| format!("#{rank}"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "- {} | {} | {} | rank {} | reporter {}",
            view.id.0, view.status, view.category, rank, view.reporter.0
        );
    }
    Ok(())
}
