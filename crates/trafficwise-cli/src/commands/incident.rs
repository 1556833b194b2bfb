//! Incident management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use super::{ListArgs, match_text, match_typed, parse_opt};
use crate::output::{self, OutputFormat};
use trafficwise_core::AppError;
use trafficwise_core::types::{FilterSpec, RecordId};
use trafficwise_entity::incident::{
    Incident, IncidentDraft, IncidentPatch, IncidentStatus, Severity,
};
use trafficwise_service::{ActorContext, ConsoleSession};

/// Arguments for incident commands
#[derive(Debug, Args)]
pub struct IncidentArgs {
    /// Incident subcommand
    #[command(subcommand)]
    pub command: IncidentCommand,
}

/// Editable incident fields
#[derive(Debug, Clone, Args)]
pub struct IncidentFields {
    /// Incident type (e.g. "Accident")
    #[arg(long = "type")]
    pub kind: Option<String>,
    /// Location
    #[arg(long)]
    pub location: Option<String>,
    /// Severity: Low, Medium, High, Critical
    #[arg(long)]
    pub severity: Option<String>,
    /// Description
    #[arg(long)]
    pub description: Option<String>,
    /// Assigned team or operator
    #[arg(long)]
    pub assigned_to: Option<String>,
    /// Status
    #[arg(long)]
    pub status: Option<String>,
}

/// Incident subcommands
#[derive(Debug, Subcommand)]
pub enum IncidentCommand {
    /// List incidents
    List {
        /// Shared list options
        #[command(flatten)]
        list: ListArgs,
        /// Filter by severity
        #[arg(long)]
        severity: Option<String>,
        /// Filter by status
        #[arg(long)]
        status: Option<String>,
        /// Filter by incident type
        #[arg(long = "type")]
        kind: Option<String>,
    },
    /// Report a new incident
    Create {
        /// Incident fields
        #[command(flatten)]
        fields: IncidentFields,
    },
    /// Update an incident
    Update {
        /// Incident ID
        id: String,
        /// Incident fields
        #[command(flatten)]
        fields: IncidentFields,
        /// Resolution notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete an incident
    Delete {
        /// Incident ID
        id: String,
    },
    /// Move an incident to a new status
    Transition {
        /// Incident ID
        id: String,
        /// Target status
        status: String,
    },
    /// Resolve an incident
    Resolve {
        /// Incident ID
        id: String,
        /// Resolution notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// Escalate an incident to critical, active handling
    Escalate {
        /// Incident ID
        id: String,
    },
    /// Archive a resolved incident
    Close {
        /// Incident ID
        id: String,
    },
}

/// Incident display row
#[derive(Debug, Serialize, Tabled)]
struct IncidentRow {
    /// Incident ID
    id: String,
    /// Type
    #[tabled(rename = "type")]
    kind: String,
    /// Location
    location: String,
    /// Severity
    severity: String,
    /// Status
    status: String,
    /// Reported at
    reported_at: String,
    /// Assigned to
    assigned_to: String,
}

impl From<&Incident> for IncidentRow {
    fn from(incident: &Incident) -> Self {
        Self {
            id: incident.id.to_string(),
            kind: incident.kind.clone(),
            location: incident.location.clone(),
            severity: incident.severity.to_string(),
            status: incident.status.to_string(),
            reported_at: incident.reported_at.format("%Y-%m-%d %H:%M").to_string(),
            assigned_to: incident.assigned_to.clone().unwrap_or_default(),
        }
    }
}

/// Execute incident commands
pub fn execute(
    args: &IncidentArgs,
    session: &mut ConsoleSession,
    ctx: &ActorContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        IncidentCommand::List {
            list,
            severity,
            status,
            kind,
        } => {
            let filter = match_typed::<Severity>(FilterSpec::new(), "severity", severity.as_ref())?;
            let filter = match_typed::<IncidentStatus>(filter, "status", status.as_ref())?;
            let filter = match_text(filter, "type", kind.as_ref());
            let view = list.view(session.config().incident_page_size, filter);
            let page = session.list(session.incidents(), &view);
            output::print_page(&page.map(|incident| IncidentRow::from(&incident)), format);
        }
        IncidentCommand::Create { fields } => {
            let draft = IncidentDraft {
                kind: fields.kind.clone(),
                location: fields.location.clone(),
                severity: parse_opt(fields.severity.as_ref())?,
                description: fields.description.clone(),
                status: parse_opt(fields.status.as_ref())?,
                assigned_to: fields.assigned_to.clone(),
                reported_at: None,
            };
            let incident = session.create_incident(ctx, draft)?;
            output::print_success(&format!("Incident {} reported", incident.id));
            output::print_item(&incident, format);
        }
        IncidentCommand::Update { id, fields, notes } => {
            let patch = IncidentPatch {
                kind: fields.kind.clone(),
                location: fields.location.clone(),
                severity: parse_opt(fields.severity.as_ref())?,
                status: parse_opt(fields.status.as_ref())?,
                description: fields.description.clone(),
                assigned_to: fields.assigned_to.clone(),
                resolution_notes: notes.clone(),
            };
            let incident = session.update_incident(ctx, &RecordId::from(id.as_str()), &patch)?;
            output::print_success(&format!("Incident {} updated", incident.id));
            output::print_item(&incident, format);
        }
        IncidentCommand::Delete { id } => {
            let incident = session.delete_incident(ctx, &RecordId::from(id.as_str()))?;
            output::print_success(&format!("Incident {} deleted", incident.id));
        }
        IncidentCommand::Transition { id, status } => {
            let next: IncidentStatus = status.parse()?;
            let incident = session.transition_incident(ctx, &RecordId::from(id.as_str()), next)?;
            output::print_success(&format!("Incident {} is now {}", incident.id, incident.status));
        }
        IncidentCommand::Resolve { id, notes } => {
            let incident =
                session.resolve_incident(ctx, &RecordId::from(id.as_str()), notes.clone())?;
            output::print_success(&format!("Incident {} resolved", incident.id));
        }
        IncidentCommand::Escalate { id } => {
            let incident = session.escalate_incident(ctx, &RecordId::from(id.as_str()))?;
            output::print_success(&format!(
                "Incident {} escalated to {} ({}, {})",
                incident.id,
                incident.assigned_to.as_deref().unwrap_or_default(),
                incident.severity,
                incident.status
            ));
        }
        IncidentCommand::Close { id } => {
            let incident = session.close_incident(ctx, &RecordId::from(id.as_str()))?;
            output::print_success(&format!("Incident {} closed", incident.id));
        }
    }

    Ok(())
}
