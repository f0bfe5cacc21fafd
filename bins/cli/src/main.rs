//! Finnote terminal front end
//!
//! Prints the goal board, the monthly summary and the notes list served by
//! the Finnote API.

use anyhow::{Context, bail};
use chrono::Utc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use finnote_client::{ApiClient, FinanceLedger, GoalBoard, NotesDesk};
use finnote_core::finance::Period;
use finnote_core::goals::{CategoryFilter, GoalPriority, ProgressStatus, calculate_overall_progress};
use finnote_core::notes::{PREVIEW_LENGTH, SearchNotesParams, content_preview};
use finnote_core::notify::NotificationCenter;
use finnote_shared::AppConfig;
use finnote_shared::types::{display_value, format_amount, format_plain};

const USAGE: &str = "usage: finnote <goals [CATEGORY] | summary [YEAR MONTH] | notes [QUERY] | health>";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Goals(CategoryFilter),
    Summary(Option<Period>),
    Notes(Option<String>),
    Health,
}

impl Command {
    fn parse(args: &[String]) -> anyhow::Result<Self> {
        let Some((name, rest)) = args.split_first() else {
            bail!(USAGE);
        };

        match (name.as_str(), rest) {
            ("goals", []) => Ok(Self::Goals(CategoryFilter::All)),
            ("goals", [category]) => Ok(Self::Goals(CategoryFilter::from(category.as_str()))),
            ("summary", []) => Ok(Self::Summary(None)),
            ("summary", [year, month]) => {
                let year = year.parse().with_context(|| format!("invalid year: {year}"))?;
                let month = month.parse().with_context(|| format!("invalid month: {month}"))?;
                Ok(Self::Summary(Some(Period::new(year, month)?)))
            }
            ("notes", []) => Ok(Self::Notes(None)),
            ("notes", words) => Ok(Self::Notes(Some(words.join(" ")))),
            ("health", []) => Ok(Self::Health),
            _ => bail!(USAGE),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "finnote=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args)?;

    let config = AppConfig::load().context("Failed to load configuration")?;
    let client = ApiClient::new(&config.api)?;
    let center = NotificationCenter::new(&config.notifications);
    let symbol = config.display.currency_symbol.as_str();
    info!(base_url = %client.base_url(), ?command, "Finnote CLI");

    let result = match command {
        Command::Goals(filter) => goals(client, center.clone(), &filter, symbol).await,
        Command::Summary(period) => summary(client, center.clone(), period, symbol).await,
        Command::Notes(query) => notes(client, center.clone(), query).await,
        Command::Health => health(&client).await,
    };

    for toast in center.toasts() {
        match &toast.message {
            Some(message) => eprintln!("[{:?}] {}: {message}", toast.kind, toast.title),
            None => eprintln!("[{:?}] {}", toast.kind, toast.title),
        }
    }

    result
}

async fn goals(
    client: ApiClient,
    center: NotificationCenter,
    filter: &CategoryFilter,
    symbol: &str,
) -> anyhow::Result<()> {
    let board = GoalBoard::new(client, center);
    board.load_all().await?;

    let analytics = board.analytics().await;
    let view = analytics.view(filter);
    let now = Utc::now();

    if view.groups.is_empty() {
        println!("No goals for category '{filter}'.");
    }

    for group in &view.groups {
        let pct = calculate_overall_progress(group);
        let status = ProgressStatus::for_percentage(pct);
        let priority = GoalPriority::for_target_date(group.goal.target_date, now);
        println!(
            "{:<32} {:>6}%  {:<12} {}",
            group.goal.name,
            format_plain(pct),
            status.status,
            priority.priority.as_str()
        );

        for sub in &group.subgoals {
            let monetary = sub.goal_type.is_monetary();
            println!(
                "    - {:<26} {} / {}",
                sub.name,
                display_value(sub.progress(), monetary, symbol),
                display_value(sub.target(), monetary, symbol)
            );
        }
    }

    let totals = &view.totals;
    println!();
    println!(
        "{} of {} goals complete, {} saved of {} ({}%)",
        totals.completed,
        totals.count,
        format_amount(totals.total_saved, symbol),
        format_amount(totals.total_target, symbol),
        format_plain(totals.overall_pct)
    );
    println!("Categories: {}", analytics.categories().join(", "));
    Ok(())
}

async fn summary(
    client: ApiClient,
    center: NotificationCenter,
    period: Option<Period>,
    symbol: &str,
) -> anyhow::Result<()> {
    let period = period.unwrap_or_else(|| Period::containing(Utc::now()));
    let ledger = FinanceLedger::new(client, center, period);
    ledger.refresh().await?;

    let Some(kpis) = ledger.kpis().await else {
        println!("No summary for {period}.");
        return Ok(());
    };

    println!("Summary for {period}");
    for kpi in kpis {
        println!("  {:<10} {:>14}", kpi.name, format_amount(kpi.value, symbol));
    }

    let rows = ledger.category_rows().await;
    if !rows.is_empty() {
        println!();
        println!("Expenses by category");
        for row in rows {
            println!(
                "  {:<20} {:>14} {:>7}%",
                row.name,
                format_amount(row.amount, symbol),
                format_plain(row.share_pct)
            );
        }
    }
    Ok(())
}

async fn notes(client: ApiClient, center: NotificationCenter, query: Option<String>) -> anyhow::Result<()> {
    let desk = NotesDesk::new(client, center);
    desk.search(query.map(SearchNotesParams::query).unwrap_or_default())
        .await?;

    let state = desk.snapshot().await;
    if state.notes.is_empty() {
        println!("No notes found.");
    }

    for note in &state.notes {
        let star = if note.is_favorite { " *" } else { "" };
        println!("{} [{}]{star}", note.title, note.category.display_name());
        let preview = content_preview(&note.content, PREVIEW_LENGTH);
        if !preview.is_empty() {
            println!("    {preview}");
        }
    }
    Ok(())
}

async fn health(client: &ApiClient) -> anyhow::Result<()> {
    if !client.health().await {
        bail!("API at {} is unreachable", client.base_url());
    }
    println!("API at {} is healthy", client.base_url());
    Ok(())
}
