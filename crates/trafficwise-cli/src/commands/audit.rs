//! Audit log CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use super::{ListArgs, match_text};
use crate::output::{self, OutputFormat};
use trafficwise_core::AppError;
use trafficwise_core::types::{FilterSpec, SortField};
use trafficwise_entity::audit::AuditLogEntry;
use trafficwise_service::{ConsoleSession, filter_records, sort_records};

/// Arguments for audit commands
#[derive(Debug, Args)]
pub struct AuditArgs {
    /// Audit subcommand
    #[command(subcommand)]
    pub command: AuditCommand,
}

/// Audit subcommands
#[derive(Debug, Subcommand)]
pub enum AuditCommand {
    /// List audit log entries
    List {
        /// Shared list options
        #[command(flatten)]
        list: ListArgs,
        /// Filter by user ("all_users" for any)
        #[arg(short, long)]
        user: Option<String>,
    },
    /// Export the audit log to a JSON file
    Export {
        /// Output file path
        #[arg(short, long, default_value = "audit_export.json")]
        output: String,
        /// Case-insensitive text search
        #[arg(short, long)]
        search: Option<String>,
    },
}

/// Audit display row
#[derive(Debug, Serialize, Tabled)]
struct AuditRow {
    /// Time
    time: String,
    /// User
    user: String,
    /// Action
    action: String,
    /// Details
    details: String,
}

impl From<&AuditLogEntry> for AuditRow {
    fn from(entry: &AuditLogEntry) -> Self {
        Self {
            time: entry.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            user: entry.user.clone(),
            action: entry.action.clone(),
            details: entry.details.clone(),
        }
    }
}

/// Execute audit commands
pub async fn execute(
    args: &AuditArgs,
    session: &ConsoleSession,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        AuditCommand::List { list, user } => {
            let filter = match_text(FilterSpec::new(), "user", user.as_ref());
            let view = list.view(session.config().audit_page_size, filter);
            let page = session.list(session.audit_log(), &view);
            output::print_page(&page.map(|entry| AuditRow::from(&entry)), format);
        }
        AuditCommand::Export { output: out_path, search } => {
            let mut filter = FilterSpec::new();
            if let Some(term) = search {
                filter = filter.with_text(term.clone());
            }
            let entries = sort_records(
                filter_records(session.audit_log().as_slice(), &filter),
                &SortField::desc("timestamp"),
            );

            let json = serde_json::to_string_pretty(&entries)?;
            tokio::fs::write(out_path, json)
                .await
                .map_err(|e| AppError::internal(format!("Failed to write export: {}", e)))?;

            output::print_success(&format!(
                "Exported {} audit entries to '{}'",
                entries.len(),
                out_path
            ));
        }
    }

    Ok(())
}
