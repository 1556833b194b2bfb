//! Role management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use super::ListArgs;
use crate::output::{self, OutputFormat};
use trafficwise_core::AppError;
use trafficwise_core::types::FilterSpec;
use trafficwise_entity::role::{Role, RoleDraft};
use trafficwise_service::{ActorContext, ConsoleSession};

/// Arguments for role commands
#[derive(Debug, Args)]
pub struct RoleArgs {
    /// Role subcommand
    #[command(subcommand)]
    pub command: RoleCommand,
}

/// Role subcommands
#[derive(Debug, Subcommand)]
pub enum RoleCommand {
    /// List roles
    List {
        /// Shared list options
        #[command(flatten)]
        list: ListArgs,
    },
    /// Define a role
    Create {
        /// Role name
        #[arg(long)]
        name: Option<String>,
        /// Granted permission (repeatable)
        #[arg(long = "permission")]
        permissions: Vec<String>,
    },
}

/// Role display row
#[derive(Debug, Serialize, Tabled)]
struct RoleRow {
    /// Role ID
    id: String,
    /// Name
    name: String,
    /// Permissions
    permissions: String,
}

impl From<&Role> for RoleRow {
    fn from(role: &Role) -> Self {
        Self {
            id: role.id.to_string(),
            name: role.name.clone(),
            permissions: role.permissions.join(", "),
        }
    }
}

/// Execute role commands
pub fn execute(
    args: &RoleArgs,
    session: &mut ConsoleSession,
    ctx: &ActorContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        RoleCommand::List { list } => {
            let view = list.view(session.config().user_page_size, FilterSpec::new());
            let page = session.list(session.roles(), &view);
            output::print_page(&page.map(|role| RoleRow::from(&role)), format);
        }
        RoleCommand::Create { name, permissions } => {
            let role = session.create_role(
                ctx,
                RoleDraft {
                    name: name.clone(),
                    permissions: permissions.clone(),
                },
            )?;
            output::print_success(&format!(
                "Role '{}' created with {} permission(s)",
                role.name,
                role.permissions.len()
            ));
        }
    }

    Ok(())
}
