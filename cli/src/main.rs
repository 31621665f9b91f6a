mod bootstrap;
mod stats;
mod table;
mod tui;

use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;
use uuid::Uuid;

use fmds_core::schedule::ScheduleInsights;
use fmds_core::{
    parse_args, parse_duration, time, ClockTime, Config, DayOverride, ExportUseCase, FileSegmentRepository,
    ReportFormat, SegmentDto, SegmentService, Weekday,
};

#[derive(Parser)]
#[command(name = "fmds")]
#[command(about = "Plan and run the daily FMDS stand-up", long_about = None)]
struct Cli {
    /// Directory holding segments.json (default ~/.fmds)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file (default ~/.fmds/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "fmds_core=trace". Falls back to RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List all segments
    List {
        #[arg(long)]
        json: bool,
    },
    /// Add a segment (usage: add "Backlog Review" dur:10 days:sun,mon start:7:10)
    Add {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Change a segment; free words replace the title, `start:` clears a time
    Edit {
        id: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Delete a segment
    Delete { id: String },
    /// Set or clear a per-day start/duration override
    Override {
        id: String,
        day: Weekday,
        start: Option<ClockTime>,
        /// Minutes; defaults to the segment's own duration
        duration: Option<String>,
        #[arg(long)]
        clear: bool,
    },
    /// Show one day's agenda (default: today, Sunday on Friday and Saturday)
    Day {
        day: Option<Weekday>,
        #[arg(long)]
        json: bool,
    },
    /// Weekly totals and derived metrics
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// Interactive weekly chart
    Dashboard,
    /// Write a CSV or printable HTML report
    Export {
        format: ReportFormat,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Load the default stand-up agenda into an empty store
    Seed,
    /// Countdown timer for a day's agenda
    Timer { day: Option<Weekday> },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    bootstrap::setup_logging(cli.log_level.as_deref());

    let config = bootstrap::load_config(cli.config.as_deref(), cli.data_dir)?;
    let service = SegmentService::new(bootstrap::open_store(&config)?);

    match cli.command {
        Some(Commands::List { json }) => {
            let dtos: Vec<SegmentDto> = service.list_segments()?.iter().map(SegmentDto::from_entity).collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&dtos)?);
            } else if dtos.is_empty() {
                println!("No segments found. Run `fmds seed` to load the default agenda.");
            } else {
                println!("{}", table::segment_table(&dtos));
            }
        }
        Some(Commands::Add { args }) => {
            let parsed = parse_args(&args);
            if parsed.title.is_empty() {
                bail!("Segment title is required.");
            }
            let created = service.create_segment(parsed.to_new_segment()?)?;
            println!("Segment added: {} (ID: {})", created.title, created.id);
            print_segment(&SegmentDto::from_entity(&created));
        }
        Some(Commands::Edit { id, args }) => {
            let id = service.resolve_id(&id)?;
            let patch = parse_args(&args).to_patch()?;
            if patch.is_empty() {
                bail!("Nothing to change. Pass a new title or key:value fields.");
            }
            let updated = service.update_segment(&id, patch)?;
            println!("Segment updated: {}", updated.title);
            print_segment(&SegmentDto::from_entity(&updated));
        }
        Some(Commands::Delete { id }) => {
            let id = service.resolve_id(&id)?;
            let title = service.get_segment(&id)?.title;
            service.delete_segment(&id)?;
            println!("Segment deleted: {title}");
        }
        Some(Commands::Override { id, day, start, duration, clear }) => {
            let id = service.resolve_id(&id)?;
            override_command(&service, &id, day, start, duration, clear)?;
        }
        Some(Commands::Day { day, json }) => {
            let day = day.unwrap_or_else(time::today);
            let view = service.day_view(day)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else if view.is_empty() {
                println!("No meetings scheduled for {day}.");
            } else {
                println!("{day}: {} segments, {} minutes", view.activity_count, view.total_duration);
                println!("{}", table::day_table(&view));
                if view.segments.iter().any(|s| s.effective.overridden) {
                    println!("* day override applied");
                }
            }
        }
        Some(Commands::Stats { json }) => {
            let segments = service.list_segments()?;
            let analytics = fmds_core::build_analytics(&segments);
            let insights = ScheduleInsights::new(&segments, &analytics, config.meeting.window_minutes());
            if json {
                let out = serde_json::json!({
                    "analytics": analytics,
                    "insights": insights,
                    "performance": insights.performance(&analytics),
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                print_stats(&analytics, &insights);
            }
        }
        Some(Commands::Dashboard) => {
            stats::run(&service, &config)?;
        }
        Some(Commands::Export { format, out }) => {
            let path = ExportUseCase::new(service.repository(), &config).export(format, out.as_deref())?;
            println!("Report written to {}", path.display());
        }
        Some(Commands::Seed) => match service.seed_defaults()? {
            0 => println!("Store already has segments; nothing seeded."),
            n => println!("Seeded {n} default segments."),
        },
        Some(Commands::Timer { day }) => {
            tui::run(&service, &config, day.unwrap_or_else(time::today))?;
        }
        None => {
            tui::run(&service, &config, time::today())?;
        }
    }
    Ok(())
}

fn override_command(
    service: &SegmentService<FileSegmentRepository>,
    id: &Uuid,
    day: Weekday,
    start: Option<ClockTime>,
    duration: Option<String>,
    clear: bool,
) -> Result<()> {
    if clear {
        if service.clear_override(id, day)? {
            println!("Override for {day} removed.");
        } else {
            println!("No override for {day}.");
        }
        return Ok(());
    }

    let Some(start) = start else {
        bail!("A start time is required, e.g. `fmds override {id} {day} 08:00 20`.");
    };
    let duration = match duration {
        Some(d) => parse_duration(&d)?,
        None => service.get_segment(id)?.duration,
    };
    let updated = service.set_override(id, DayOverride::new(day, start, duration))?;
    println!(
        "{}: {day} now runs {start}-{} ({duration} min).",
        updated.title,
        start.add_minutes(duration)
    );
    Ok(())
}

fn print_segment(dto: &SegmentDto) {
    let time = |t: Option<ClockTime>| t.map(|t| t.to_string()).unwrap_or_else(|| "-".to_string());
    println!("  Duration: {} min", dto.duration);
    println!("  Days: {}", dto.day_summary());
    println!("  Time: {} - {}", time(dto.start_time), time(dto.end_time));
}

fn print_stats(analytics: &fmds_core::Analytics, insights: &ScheduleInsights) {
    println!("Segments:        {}", analytics.total_activities);
    println!("Total duration:  {} min", analytics.total_duration);
    println!("Weekly minutes:  {} min", analytics.total_weekly_minutes);
    println!("Average:         {} min", analytics.average_duration);
    println!("Active days:     {}/5", analytics.active_days);
    println!(
        "Busiest day:     {} ({} min, {} segments)",
        analytics.most_busy_day.day, analytics.most_busy_day.total_duration, analytics.most_busy_day.activity_count
    );
    println!("Coverage:        {}%", insights.coverage_percent);
    println!();
    println!("{}", table::week_table(analytics, insights));
}
