use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use finboard_assistant::{ResponseTable, default_table, match_query};
use finboard_core::{
    Granularity, RngNoise, filter_transactions, forecast_all, generate_series, group_by_date,
    income_expense_ratio, savings_rate, series_stats, summarize,
};

mod config;
mod filters;
mod report;
mod rollup_cmd;
mod state;

use config::Config;
use filters::{FilterArgs, date_arg};
use rollup_cmd::RollupCommand;
use state::ImportArgs;

#[derive(Parser, Debug)]
#[command(name = "finboard", version, about = "Personal finance dashboard metrics")]
struct Cli {
    /// Pin "today" (YYYY-MM-DD) instead of using the configured timezone
    #[arg(long, global = true, value_parser = date_arg)]
    today: Option<NaiveDate>,

    /// Debug logging on stderr
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(flatten)]
    import: ImportArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default ~/.finboard/config.toml
    InitConfig,

    /// List transactions matching the filters, newest first
    Transactions {
        #[command(flatten)]
        filters: FilterArgs,

        /// Bucket the list by calendar day
        #[arg(long, default_value_t = false)]
        group_by_date: bool,

        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Income, expense and net-flow totals over the filtered transactions
    Summary {
        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Simulated net worth / cashflow history ending today
    Series {
        /// daily, weekly, monthly or yearly
        #[arg(long, default_value = "monthly")]
        granularity: Granularity,

        #[arg(long, default_value_t = 12)]
        points: usize,

        /// Overrides [series].seed
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Partition budgets, investments, accounts or spending into buckets
    Rollup {
        #[command(subcommand)]
        command: RollupCommand,

        #[arg(long, global = true, default_value_t = false)]
        json: bool,
    },

    /// Progress and projections for every savings goal
    Goals {
        /// Monthly income to base recommendations on (overrides [forecast].monthly_income)
        #[arg(long)]
        income: Option<f64>,

        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Ask the assistant a question
    Ask {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "finboard=debug" } else { "finboard=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Config plus the reference "today" every command computes against.
fn context(pinned: Option<NaiveDate>) -> Result<(Config, NaiveDate)> {
    let cfg = config::load_config()?;
    let today = state::resolve_today(&cfg, pinned)?;
    debug!(%today, timezone = %cfg.data.timezone, "resolved context");
    Ok((cfg, today))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    debug!(command = ?cli.command, "dispatch");

    match cli.command {
        Command::InitConfig => config::init_config()?,

        Command::Transactions { filters, group_by_date: grouped, json } => {
            let (cfg, today) = context(cli.today)?;
            let store = state::load_store(&cfg, today, &cli.import)?;
            let criteria = filters.criteria()?;
            let txns = filter_transactions(store.transactions(), &criteria, today);
            if grouped {
                let groups = group_by_date(&txns);
                if json {
                    report::print_json(&report::day_groups(&groups))?;
                } else {
                    report::print_grouped(&store, &groups);
                }
            } else if json {
                report::print_json(&txns)?;
            } else {
                report::print_transactions(&store, &txns);
            }
        }

        Command::Summary { filters, json } => {
            let (cfg, today) = context(cli.today)?;
            let store = state::load_store(&cfg, today, &cli.import)?;
            let criteria = filters.criteria()?;
            let summary = summarize(&filter_transactions(store.transactions(), &criteria, today));
            let r = report::SummaryReport {
                summary,
                savings_rate: savings_rate(&summary),
                income_expense_ratio: income_expense_ratio(&summary),
            };
            if json {
                report::print_json(&r)?;
            } else {
                report::print_summary(&r);
            }
        }

        Command::Series { granularity, points, seed, json } => {
            let (cfg, today) = context(cli.today)?;
            let params = cfg.series.params(granularity, points, today);
            let series = match seed.or(cfg.series.seed) {
                Some(seed) => {
                    info!(seed, "seeded series");
                    generate_series(&params, &mut RngNoise::seeded(seed))?
                }
                None => generate_series(&params, &mut RngNoise::from_entropy())?,
            };
            let stats = series_stats(&series);
            if json {
                report::print_json(&report::SeriesReport { points: &series, stats })?;
            } else {
                report::print_series(&series, &stats);
            }
        }

        Command::Rollup { command, json } => {
            let (cfg, today) = context(cli.today)?;
            let store = state::load_store(&cfg, today, &cli.import)?;
            rollup_cmd::run(command, &store, today, json)?;
        }

        Command::Goals { income, json } => {
            let (cfg, today) = context(cli.today)?;
            let store = state::load_store(&cfg, today, &cli.import)?;
            let basis = cfg.forecast.basis(income);
            basis.validate().context("check [forecast] settings and --income")?;
            let forecasts = forecast_all(store.goals(), today, basis);
            if json {
                report::print_json(&forecasts)?;
            } else {
                report::print_goals(&store, &forecasts);
            }
        }

        Command::Ask { query } => {
            let cfg = config::load_config()?;
            let table = match &cfg.assistant.responses {
                Some(path) => ResponseTable::load(path)?,
                None => default_table(),
            };
            let response = match_query(&table, &query.join(" "));
            debug!(id = %response.id, "matched response");
            println!("{}", response.text);
            for s in &response.suggestions {
                println!("  - {s}");
            }
        }
    }

    Ok(())
}
