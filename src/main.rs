//! table-rotation: assign league tables from a schedule file.
//!
//! # Usage
//!
//! ```text
//! table-rotation assign 787-2025-01-705-02-Schedule.csv --config configs/table_configs.json
//! table-rotation analyze 787-2025-01-705-02-TableStats.csv
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};

use table_rotation::config::{InfeasiblePolicy, SearchStrategy, TieBreak};
use table_rotation::io::{
    analyze_table_stats, read_schedule, write_reports, LeagueConfig, ScheduleFileName,
};
use table_rotation::{RotationKpi, TimelineAssigner};

#[derive(Parser)]
#[command(name = "table-rotation", about = "Fair table rotation for league schedules")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Assign tables to every fixture of a schedule and write the reports.
    Assign {
        /// Schedule file named <league>-<year>-<session>-<division>-<location>-Schedule.csv.
        schedule: PathBuf,

        /// League configuration JSON.
        #[arg(long, default_value = "configs/table_configs.json")]
        config: PathBuf,

        /// Seed for tie-breaking; canonical table order when absent.
        #[arg(long)]
        seed: Option<u64>,

        /// Candidate search strategy.
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Number of recent plays whose tables a team may not reuse.
        #[arg(long)]
        repeat_window: Option<usize>,

        /// What to do with a week that has no valid assignment.
        #[arg(long, value_enum)]
        on_infeasible: Option<PolicyArg>,

        /// Directory for the reports; defaults to the schedule's directory.
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Summarize a TableStats.csv report.
    Analyze {
        /// Table stats file.
        stats: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Auto,
    Exhaustive,
    Greedy,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    Abort,
    Relax,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Assign {
            schedule,
            config,
            seed,
            strategy,
            repeat_window,
            on_infeasible,
            out_dir,
        } => run_assign(AssignArgs {
            schedule,
            config,
            seed,
            strategy,
            repeat_window,
            on_infeasible,
            out_dir,
        }),
        Command::Analyze { stats } => {
            let report = analyze_table_stats(&stats)
                .with_context(|| format!("analyzing {}", stats.display()))?;
            println!("{report}");
            Ok(())
        }
    }
}

struct AssignArgs {
    schedule: PathBuf,
    config: PathBuf,
    seed: Option<u64>,
    strategy: Option<StrategyArg>,
    repeat_window: Option<usize>,
    on_infeasible: Option<PolicyArg>,
    out_dir: Option<PathBuf>,
}

fn run_assign(args: AssignArgs) -> anyhow::Result<()> {
    let name = ScheduleFileName::from_path(&args.schedule)?;
    info!(
        league = %name.league,
        year = %name.year,
        session = %name.session,
        division = %name.division,
        location = %name.location,
        "schedule"
    );

    let leagues = LeagueConfig::from_file(&args.config)?;
    let division = leagues.division(&name.league, &name.division)?;
    let directory = division.directory()?;
    let timeline = read_schedule(&args.schedule)?;

    let mut engine = division.engine_config();
    if let Some(seed) = args.seed {
        engine = engine.with_tie_break(TieBreak::Seeded(seed));
    }
    if let Some(strategy) = args.strategy {
        engine = engine.with_strategy(match strategy {
            StrategyArg::Auto => SearchStrategy::default(),
            StrategyArg::Exhaustive => SearchStrategy::Exhaustive,
            StrategyArg::Greedy => SearchStrategy::Greedy,
        });
    }
    if let Some(window) = args.repeat_window {
        engine = engine.with_repeat_window(window);
    }
    if let Some(policy) = args.on_infeasible {
        engine = engine.with_infeasible_policy(match policy {
            PolicyArg::Abort => InfeasiblePolicy::Abort,
            PolicyArg::Relax => InfeasiblePolicy::RelaxRepeat,
        });
    }

    let result = TimelineAssigner::new(engine).assign(&directory, &timeline)?;

    let out_dir = match args.out_dir {
        Some(dir) => dir,
        None => args
            .schedule
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    };
    let paths = write_reports(&out_dir, &name, &result, &directory)?;
    println!("Table assignments written to {}", paths.assignments.display());
    println!("Table stats written to {}", paths.stats.display());

    let kpi = RotationKpi::calculate(&result, &directory, &timeline);
    println!(
        "{} of {} weeks resolved, {} fixtures on tables, {} bye fixtures",
        kpi.weeks_resolved,
        timeline.total_weeks(),
        kpi.assigned_fixtures,
        kpi.bye_fixtures
    );
    println!(
        "ideal usage {}, max spread {}, max deviation {}, repeats {}",
        kpi.ideal_usage, kpi.max_spread, kpi.max_deviation, kpi.repeat_count
    );
    if kpi.relaxed_weeks > 0 {
        warn!(weeks = kpi.relaxed_weeks, "no-repeat rule was relaxed");
    }

    result.check()?;
    Ok(())
}
