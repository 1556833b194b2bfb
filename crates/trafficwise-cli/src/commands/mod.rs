//! CLI command definitions and dispatch.

pub mod audit;
pub mod camera;
pub mod config;
pub mod dashboard;
pub mod incident;
pub mod role;
pub mod signal;
pub mod user;

use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::output::OutputFormat;
use trafficwise_core::AppError;
use trafficwise_core::config::AppConfig;
use trafficwise_core::types::filter::is_match_any;
use trafficwise_core::types::{DateRange, FilterSpec, SortDirection, SortField};
use trafficwise_service::{ActorContext, ConsoleSession, ListView};

/// TrafficWise traffic management console
#[derive(Debug, Parser)]
#[command(name = "trafficwise", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Environment overlay loaded from `config/{env}.toml`
    #[arg(long, default_value = "development")]
    pub env: String,

    /// Operator name recorded in the audit log (defaults to the configured actor)
    #[arg(long)]
    pub actor: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Incident management
    Incident(incident::IncidentArgs),
    /// User management
    User(user::UserArgs),
    /// Role management
    Role(role::RoleArgs),
    /// Camera locations
    Camera(camera::CameraArgs),
    /// Intersection signal control
    Signal(signal::SignalArgs),
    /// Audit log
    Audit(audit::AuditArgs),
    /// Dashboard summary
    Dashboard,
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        if let Commands::Config(args) = &self.command {
            return config::execute(args, &config, &self.config, self.format);
        }

        let mut session = ConsoleSession::seeded(config.console)?;
        let ctx = match &self.actor {
            Some(actor) => ActorContext::new(actor.clone()),
            None => session.default_actor(),
        };

        match &self.command {
            Commands::Incident(args) => incident::execute(args, &mut session, &ctx, self.format),
            Commands::User(args) => user::execute(args, &mut session, &ctx, self.format),
            Commands::Role(args) => role::execute(args, &mut session, &ctx, self.format),
            Commands::Camera(args) => camera::execute(args, &session, self.format),
            Commands::Signal(args) => signal::execute(args, &mut session, &ctx, self.format),
            Commands::Audit(args) => audit::execute(args, &session, self.format).await,
            Commands::Dashboard => dashboard::execute(&session, self.format),
            Commands::Config(_) => Ok(()),
        }
    }
}

/// Options shared by every list command
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Case-insensitive text search
    #[arg(short, long)]
    pub search: Option<String>,
    /// Only records on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,
    /// Only records on or before this date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,
    /// Field to sort by (camelCase, e.g. reportedAt)
    #[arg(long)]
    pub sort: Option<String>,
    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,
    /// Page number (1-based; out-of-range values clamp)
    #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
    pub page: i64,
    /// Rows per page
    #[arg(long)]
    pub page_size: Option<u64>,
}

impl ListArgs {
    /// Build a list view, adding the given exact field matches.
    pub fn view(&self, default_page_size: u64, matches: FilterSpec) -> ListView {
        let mut filter = matches;
        if let Some(term) = &self.search {
            filter = filter.with_text(term.clone());
        }
        if self.from.is_some() || self.to.is_some() {
            filter = filter.with_range(DateRange::new(self.from, self.to));
        }

        let mut view = ListView::new(self.page_size.unwrap_or(default_page_size));
        view.set_filter(filter);
        if let Some(field) = &self.sort {
            let direction = if self.desc {
                SortDirection::Desc
            } else {
                SortDirection::Asc
            };
            view.set_sort(Some(SortField::new(field.clone(), direction)));
        }
        view.go_to(self.page);
        view
    }
}

/// Add an exact match for `field`, normalizing the value through its
/// typed parser so `--status active` matches `"Active"`.
pub fn match_typed<T>(
    filter: FilterSpec,
    field: &str,
    value: Option<&String>,
) -> Result<FilterSpec, AppError>
where
    T: FromStr<Err = AppError> + Display,
{
    match value {
        None => Ok(filter),
        Some(value) if is_match_any(value) => Ok(filter),
        Some(value) => Ok(filter.with_match(field, value.parse::<T>()?.to_string())),
    }
}

/// Add an exact free-text match for `field`.
pub fn match_text(filter: FilterSpec, field: &str, value: Option<&String>) -> FilterSpec {
    match value {
        Some(value) => filter.with_match(field, value.clone()),
        None => filter,
    }
}

/// Parse an optional typed flag.
pub fn parse_opt<T>(value: Option<&String>) -> Result<Option<T>, AppError>
where
    T: FromStr<Err = AppError>,
{
    value.map(|value| value.parse::<T>()).transpose()
}
