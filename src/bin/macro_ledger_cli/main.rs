// ABOUTME: macro-ledger CLI - plan day types, view generated meals and track intake
// ABOUTME: Drives the ledger against the configured storage, printing results as JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors
//!
//! Usage:
//! ```bash
//! # Store budgets (kcal,protein,carbs,fat)
//! macro-ledger budgets set --training 2500,180,250,80 --rest 2000,160,120,70
//!
//! # Plan tomorrow as a training day and move the session
//! macro-ledger assign tomorrow training
//! macro-ledger training-time tomorrow 07:00
//!
//! # Show today's meals, timeline and remaining budget
//! macro-ledger show
//!
//! # Track lunch; calories are derived from the grams when omitted
//! macro-ledger meal track today lunch --protein 40 --carbs 80 --fat 12
//!
//! # Change a planned day's type (needs confirmation)
//! macro-ledger assign today rest
//! macro-ledger confirm
//! ```

mod commands;
mod helpers;

use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use macro_ledger::clock::{Clock, SystemClock};
use macro_ledger::config::LedgerConfig;
use macro_ledger::ledger::Ledger;
use macro_ledger::logging::LoggingConfig;
use macro_ledger::AppResult;
use macro_ledger_core::models::{DayType, MacroSet, MealIntake};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use commands::budgets::BudgetUpdate;
use helpers::args::{parse_date, parse_macro_set, parse_time, DateArg};

type Result<T> = AppResult<T>;

#[derive(Parser)]
#[command(
    name = "macro-ledger",
    version,
    about = "Daily macro ledger and meal-plan engine",
    long_about = "Assign a day type to calendar days, get a meal plan for each and track intake."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Data directory override (uses the JSON file backend)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Assign a day type (changing a planned day needs confirmation)
    Assign {
        /// Date (YYYY-MM-DD, today, tomorrow, yesterday)
        #[arg(value_parser = parse_date)]
        date: DateArg,

        /// Day type (training, rest, fasting)
        day_type: DayType,
    },

    /// Apply the pending day-type change
    Confirm,

    /// Discard the pending day-type change
    Cancel,

    /// Lock a day and freeze its budget
    Complete {
        /// Date (YYYY-MM-DD, today, tomorrow, yesterday)
        #[arg(value_parser = parse_date, default_value = "today")]
        date: DateArg,
    },

    /// Reopen a completed day
    Unlock {
        /// Date (YYYY-MM-DD, today, tomorrow, yesterday)
        #[arg(value_parser = parse_date)]
        date: DateArg,
    },

    /// Show a day with meals, timeline and remaining budget
    Show {
        /// Date (YYYY-MM-DD, today, tomorrow, yesterday)
        #[arg(value_parser = parse_date, default_value = "today")]
        date: DateArg,
    },

    /// Show the type history of a day
    History {
        /// Date (YYYY-MM-DD, today, tomorrow, yesterday)
        #[arg(value_parser = parse_date)]
        date: DateArg,
    },

    /// Show the Monday-to-Sunday week containing a date
    Week {
        /// Date (YYYY-MM-DD, today, tomorrow, yesterday)
        #[arg(value_parser = parse_date, default_value = "today")]
        date: DateArg,
    },

    /// Move the training session of a training day
    TrainingTime {
        /// Date (YYYY-MM-DD, today, tomorrow, yesterday)
        #[arg(value_parser = parse_date)]
        date: DateArg,

        /// Session start (HH:MM)
        #[arg(value_parser = parse_time)]
        time: NaiveTime,
    },

    /// Budget management commands
    Budgets {
        #[command(subcommand)]
        action: BudgetsCommand,
    },

    /// Meal commands
    Meal {
        #[command(subcommand)]
        action: MealCommand,
    },

    /// Complete the previous day on every date change until Ctrl-C
    Watch {
        /// Poll interval in seconds (defaults to MACRO_LEDGER_ROLLOVER_POLL_SECS)
        #[arg(long)]
        poll_secs: Option<u64>,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum BudgetsCommand {
    /// Print the stored budgets
    Show,

    /// Replace budgets; omitted ones are kept
    Set {
        /// Basal metabolic rate (kcal)
        #[arg(long)]
        bmr: Option<u32>,

        /// Training-day budget as kcal,protein,carbs,fat
        #[arg(long, value_parser = parse_macro_set)]
        training: Option<MacroSet>,

        /// Rest-day budget as kcal,protein,carbs,fat
        #[arg(long, value_parser = parse_macro_set)]
        rest: Option<MacroSet>,

        /// Fasting-day budget as kcal,protein,carbs,fat
        #[arg(long, value_parser = parse_macro_set)]
        fasting: Option<MacroSet>,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum MealCommand {
    /// Record what was eaten
    Track {
        /// Date (YYYY-MM-DD, today, tomorrow, yesterday)
        #[arg(value_parser = parse_date)]
        date: DateArg,

        /// Meal slot id (e.g. breakfast, pre-workout)
        meal_id: String,

        /// Protein (g)
        #[arg(long)]
        protein: u32,

        /// Carbohydrates (g)
        #[arg(long)]
        carbs: u32,

        /// Fat (g)
        #[arg(long)]
        fat: u32,

        /// Calories (kcal); derived from grams when omitted
        #[arg(long)]
        calories: Option<u32>,
    },

    /// Clear what was recorded
    Untrack {
        /// Date (YYYY-MM-DD, today, tomorrow, yesterday)
        #[arg(value_parser = parse_date)]
        date: DateArg,

        /// Meal slot id
        meal_id: String,
    },

    /// Skip a meal and move its allocation to the open meals
    Skip {
        /// Date (YYYY-MM-DD, today, tomorrow, yesterday)
        #[arg(value_parser = parse_date)]
        date: DateArg,

        /// Meal slot id
        meal_id: String,
    },

    /// Bring a skipped meal back
    Unskip {
        /// Date (YYYY-MM-DD, today, tomorrow, yesterday)
        #[arg(value_parser = parse_date)]
        date: DateArg,

        /// Meal slot id
        meal_id: String,
    },

    /// Rename a meal
    Rename {
        /// Date (YYYY-MM-DD, today, tomorrow, yesterday)
        #[arg(value_parser = parse_date)]
        date: DateArg,

        /// Meal slot id
        meal_id: String,

        /// New display name
        name: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    logging.init()?;

    let mut config = LedgerConfig::from_env()?;
    if let Some(data_dir) = cli.data_dir {
        config = config.with_data_dir(data_dir);
    }

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let today = clock.today();
    let mut ledger = Ledger::open(&config, clock)?;
    debug!(%today, "Ledger ready");

    let day = |date: DateArg| -> NaiveDate { date.resolve(today) };

    match cli.command {
        Command::Assign { date, day_type } => {
            commands::day::assign(&mut ledger, day(date), day_type)?;
        }
        Command::Confirm => commands::day::confirm(&mut ledger)?,
        Command::Cancel => commands::day::cancel(&mut ledger)?,
        Command::Complete { date } => commands::day::complete(&mut ledger, day(date))?,
        Command::Unlock { date } => commands::day::unlock(&mut ledger, day(date))?,
        Command::Show { date } => commands::day::show(&mut ledger, day(date))?,
        Command::History { date } => commands::day::history(&ledger, day(date))?,
        Command::Week { date } => commands::day::week(&ledger, day(date))?,
        Command::TrainingTime { date, time } => {
            commands::day::training_time(&mut ledger, day(date), time)?;
        }
        Command::Budgets { action } => match action {
            BudgetsCommand::Show => commands::budgets::show(&ledger)?,
            BudgetsCommand::Set {
                bmr,
                training,
                rest,
                fasting,
            } => commands::budgets::set(
                &mut ledger,
                BudgetUpdate {
                    bmr,
                    training,
                    rest,
                    fasting,
                },
            )?,
        },
        Command::Meal { action } => match action {
            MealCommand::Track {
                date,
                meal_id,
                protein,
                carbs,
                fat,
                calories,
            } => commands::meal::track(
                &mut ledger,
                day(date),
                &meal_id,
                MealIntake {
                    calories,
                    protein,
                    carbs,
                    fat,
                },
            )?,
            MealCommand::Untrack { date, meal_id } => {
                commands::meal::untrack(&mut ledger, day(date), &meal_id)?;
            }
            MealCommand::Skip { date, meal_id } => {
                commands::meal::skip(&mut ledger, day(date), &meal_id)?;
            }
            MealCommand::Unskip { date, meal_id } => {
                commands::meal::unskip(&mut ledger, day(date), &meal_id)?;
            }
            MealCommand::Rename {
                date,
                meal_id,
                name,
            } => commands::meal::rename(&mut ledger, day(date), &meal_id, &name)?,
        },
        Command::Watch { poll_secs } => {
            let poll_secs = poll_secs.unwrap_or(config.rollover_poll_secs).max(1);
            commands::watch::run(&mut ledger, poll_secs).await?;
        }
    }

    Ok(())
}
