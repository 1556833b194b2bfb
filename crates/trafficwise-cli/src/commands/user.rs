//! User management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use super::{ListArgs, match_text, match_typed, parse_opt};
use crate::output::{self, OutputFormat};
use trafficwise_core::AppError;
use trafficwise_core::types::{FilterSpec, RecordId};
use trafficwise_entity::user::{User, UserDraft, UserStatus};
use trafficwise_service::{ActorContext, ConsoleSession};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List users
    List {
        /// Shared list options
        #[command(flatten)]
        list: ListArgs,
        /// Filter by role ("all_users" for any)
        #[arg(short, long)]
        role: Option<String>,
        /// Filter by status
        #[arg(long)]
        status: Option<String>,
    },
    /// Create a user
    Create {
        /// Display name
        #[arg(long)]
        name: Option<String>,
        /// Email address
        #[arg(long)]
        email: Option<String>,
        /// Role name
        #[arg(short, long)]
        role: Option<String>,
        /// Initial status (defaults to Pending)
        #[arg(long)]
        status: Option<String>,
    },
    /// Delete a user
    Delete {
        /// User ID
        id: String,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: String,
    /// Name
    name: String,
    /// Email
    email: String,
    /// Role
    role: String,
    /// Status
    status: String,
    /// Last login
    last_login: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            status: user.status.to_string(),
            last_login: user
                .last_login
                .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "Never".to_string()),
        }
    }
}

/// Execute user commands
pub fn execute(
    args: &UserArgs,
    session: &mut ConsoleSession,
    ctx: &ActorContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        UserCommand::List { list, role, status } => {
            let filter = match_text(FilterSpec::new(), "role", role.as_ref());
            let filter = match_typed::<UserStatus>(filter, "status", status.as_ref())?;
            let view = list.view(session.config().user_page_size, filter);
            let page = session.list(session.users(), &view);
            output::print_page(&page.map(|user| UserRow::from(&user)), format);
        }
        UserCommand::Create {
            name,
            email,
            role,
            status,
        } => {
            let draft = UserDraft {
                name: name.clone(),
                email: email.clone(),
                role: role.clone(),
                status: parse_opt(status.as_ref())?,
            };
            let user = session.create_user(ctx, draft)?;
            output::print_success(&format!("User '{}' created as {}", user.name, user.id));
            output::print_item(&user, format);
        }
        UserCommand::Delete { id } => {
            let user = session.delete_user(ctx, &RecordId::from(id.as_str()))?;
            output::print_success(&format!("User '{}' deleted", user.name));
        }
    }

    Ok(())
}
