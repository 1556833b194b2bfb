//! Intersection signal control CLI commands.

use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;
use tabled::Tabled;

use super::ListArgs;
use crate::output::{self, OutputFormat};
use trafficwise_core::AppError;
use trafficwise_core::types::{FilterSpec, RecordId};
use trafficwise_entity::signal::{Intersection, PriorityKind};
use trafficwise_service::{ActorContext, ConsoleSession};

/// Arguments for signal commands
#[derive(Debug, Args)]
pub struct SignalArgs {
    /// Signal subcommand
    #[command(subcommand)]
    pub command: SignalCommand,
}

/// Priority switch position
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    /// Enable the priority lane
    On,
    /// Disable the priority lane
    Off,
}

/// Signal subcommands
#[derive(Debug, Subcommand)]
pub enum SignalCommand {
    /// List intersections
    List {
        /// Shared list options
        #[command(flatten)]
        list: ListArgs,
    },
    /// Manually override an intersection's signal plan
    Override {
        /// Intersection ID
        id: String,
        /// Override action (e.g. "All Red", "Flashing Yellow", "Resume Normal Cycle")
        action: String,
    },
    /// Switch a priority lane
    Priority {
        /// Intersection ID
        id: String,
        /// Priority kind: pt (public transport) or ev (emergency vehicle)
        kind: String,
        /// Switch position
        #[arg(value_enum)]
        state: Switch,
    },
}

/// Intersection display row
#[derive(Debug, Serialize, Tabled)]
struct IntersectionRow {
    /// Intersection ID
    id: String,
    /// Name
    name: String,
    /// Current signal
    signal: String,
    /// Mode
    mode: String,
    /// Public transport priority
    pt: bool,
    /// Emergency vehicle priority
    ev: bool,
}

impl From<&Intersection> for IntersectionRow {
    fn from(intersection: &Intersection) -> Self {
        Self {
            id: intersection.id.to_string(),
            name: intersection.name.clone(),
            signal: intersection.current_signal.clone(),
            mode: intersection.mode.to_string(),
            pt: intersection.public_transport_priority,
            ev: intersection.emergency_vehicle_priority,
        }
    }
}

/// Execute signal commands
pub fn execute(
    args: &SignalArgs,
    session: &mut ConsoleSession,
    ctx: &ActorContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        SignalCommand::List { list } => {
            let view = list.view(session.config().camera_page_size, FilterSpec::new());
            let page = session.list(session.intersections(), &view);
            output::print_page(&page.map(|int| IntersectionRow::from(&int)), format);
        }
        SignalCommand::Override { id, action } => {
            let intersection = session.override_signal(ctx, &RecordId::from(id.as_str()), action)?;
            output::print_success(&format!(
                "Signal at {} set to {}",
                intersection.name, intersection.current_signal
            ));
        }
        SignalCommand::Priority { id, kind, state } => {
            let kind: PriorityKind = kind.parse()?;
            let enabled = *state == Switch::On;
            let intersection =
                session.set_signal_priority(ctx, &RecordId::from(id.as_str()), kind, enabled)?;
            output::print_success(&format!(
                "{} priority {} for {}",
                kind,
                if enabled { "enabled" } else { "disabled" },
                intersection.name
            ));
        }
    }

    Ok(())
}
