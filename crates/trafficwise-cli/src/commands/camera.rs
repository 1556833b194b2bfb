//! Camera location CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use super::{ListArgs, match_text, match_typed};
use crate::output::{self, OutputFormat};
use trafficwise_core::AppError;
use trafficwise_core::types::FilterSpec;
use trafficwise_entity::camera::{CameraLocation, CameraStatus};
use trafficwise_service::ConsoleSession;

/// Arguments for camera commands
#[derive(Debug, Args)]
pub struct CameraArgs {
    /// Camera subcommand
    #[command(subcommand)]
    pub command: CameraCommand,
}

/// Camera subcommands
#[derive(Debug, Subcommand)]
pub enum CameraCommand {
    /// List camera locations
    List {
        /// Shared list options
        #[command(flatten)]
        list: ListArgs,
        /// Filter by area
        #[arg(long)]
        area: Option<String>,
        /// Filter by status
        #[arg(long)]
        status: Option<String>,
    },
}

/// Camera display row
#[derive(Debug, Serialize, Tabled)]
struct CameraRow {
    /// Camera ID
    id: u32,
    /// Name
    name: String,
    /// Area
    area: String,
    /// Status
    status: String,
    /// Vehicles in view
    vehicles: String,
    /// Resolution
    resolution: String,
    /// Last maintenance
    last_maintenance: String,
}

impl From<&CameraLocation> for CameraRow {
    fn from(camera: &CameraLocation) -> Self {
        Self {
            id: camera.id.0,
            name: camera.name.clone(),
            area: camera.area.clone(),
            status: camera.status.to_string(),
            vehicles: camera
                .live_vehicles()
                .map(|count| count.to_string())
                .unwrap_or_else(|| "-".to_string()),
            resolution: camera.resolution.clone(),
            last_maintenance: camera.last_maintenance.to_string(),
        }
    }
}

/// Execute camera commands
pub fn execute(
    args: &CameraArgs,
    session: &ConsoleSession,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        CameraCommand::List { list, area, status } => {
            let filter = match_text(FilterSpec::new(), "area", area.as_ref());
            let filter = match_typed::<CameraStatus>(filter, "status", status.as_ref())?;
            let view = list.view(session.config().camera_page_size, filter);
            let page = session.list(session.cameras(), &view);
            output::print_page(&page.map(|camera| CameraRow::from(&camera)), format);
        }
    }

    Ok(())
}
