mod app;
mod commands;
mod config;
mod input;
mod render;

use anyhow::Result;
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;
use crate::commands::edit::EventChanges;
use crate::commands::new::NewEvent;
use crate::commands::settings::SettingsChanges;

#[derive(Parser)]
#[command(name = "huddle")]
#[command(about = "Plan events with your group: RSVP, reminders and a shared calendar")]
struct Cli {
    /// Act as this user (e.g. user2) instead of the configured profile
    #[arg(long = "as", global = true)]
    acting_user: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List upcoming events
    Events {
        /// Include past events
        #[arg(short, long)]
        all: bool,

        /// Only events you're attending
        #[arg(short, long)]
        mine: bool,

        /// How many upcoming events to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show everything planned on a day
    Day {
        /// YYYY-MM-DD, or e.g. "today", "next friday"
        date: String,
    },
    /// Show a month calendar
    Calendar {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        /// Move this many months forward (or back, if negative)
        #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i32,
    },
    /// Create an event
    New {
        title: String,

        /// When (e.g. "2025-03-20T15:00", "tomorrow 6pm"), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(short, long)]
        location: Option<String>,

        /// Remind this many days before (repeatable), defaults to your default reminders
        #[arg(short, long = "remind", value_parser = reminder_days())]
        remind: Vec<u32>,
    },
    /// Change an event's details
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(short, long)]
        date: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(short, long)]
        location: Option<String>,
    },
    /// Delete an event
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Join an event, or leave it if you're already attending
    Rsvp { id: String },
    /// Set a reminder some days before an event, or remove it
    Remind {
        id: String,
        #[arg(value_parser = reminder_days())]
        days: u32,
    },
    /// Show reminders that are due
    Reminders,
    /// Show or change settings
    Settings {
        #[arg(long, action = ArgAction::Set, value_parser = BoolishValueParser::new())]
        dark_mode: Option<bool>,

        /// calendar or list
        #[arg(long)]
        default_view: Option<String>,

        /// Add or remove a default reminder (days before, repeatable)
        #[arg(long = "toggle-reminder", value_parser = reminder_days())]
        toggle_reminder: Vec<u32>,

        #[arg(long, action = ArgAction::Set, value_parser = BoolishValueParser::new())]
        notifications: Option<bool>,
    },
    /// List the available profiles
    Users,
    /// Show config and data paths
    Config,
}

/// Reminder offsets are whole days, at least one.
fn reminder_days() -> clap::builder::RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(1..)
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut app = App::load(cli.acting_user.as_deref())?;

    let result = match cli.command {
        None => commands::home::run(&app),
        Some(Commands::Events { all, mine, limit }) => commands::events::run(&app, all, mine, limit),
        Some(Commands::Day { date }) => commands::day::run(&app, &date),
        Some(Commands::Calendar { month, offset }) => {
            commands::calendar::run(&app, month.as_deref(), offset)
        }
        Some(Commands::New {
            title,
            date,
            description,
            location,
            remind,
        }) => commands::new::run(
            &mut app,
            NewEvent {
                title,
                date,
                description,
                location,
                reminders: remind,
            },
        ),
        Some(Commands::Edit {
            id,
            title,
            date,
            description,
            location,
        }) => commands::edit::run(
            &mut app,
            &id,
            EventChanges {
                title,
                date,
                description,
                location,
            },
        ),
        Some(Commands::Delete { id, yes }) => commands::delete::run(&mut app, &id, yes),
        Some(Commands::Rsvp { id }) => commands::rsvp::run(&mut app, &id),
        Some(Commands::Remind { id, days }) => commands::remind::run(&mut app, &id, days),
        Some(Commands::Reminders) => commands::reminders::run(&app),
        Some(Commands::Settings {
            dark_mode,
            default_view,
            toggle_reminder,
            notifications,
        }) => commands::settings::run(
            &mut app,
            SettingsChanges {
                dark_mode,
                default_view,
                toggle_reminders: toggle_reminder,
                notifications,
            },
        ),
        Some(Commands::Users) => commands::users::run(&app),
        Some(Commands::Config) => commands::config::run(&app),
    };

    app.report_persist_errors();
    result
}
