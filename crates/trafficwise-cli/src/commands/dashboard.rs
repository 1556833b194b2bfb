//! Dashboard summary CLI command.

use crate::output::{self, OutputFormat};
use trafficwise_core::AppError;
use trafficwise_service::ConsoleSession;

/// Print the dashboard summary
pub fn execute(session: &ConsoleSession, format: OutputFormat) -> Result<(), AppError> {
    let summary = session.dashboard();

    match format {
        OutputFormat::Json => output::print_item(&summary, format),
        OutputFormat::Table => {
            println!("TrafficWise dashboard");
            output::print_kv("Active incidents", &summary.active_incidents.to_string());
            output::print_kv("Critical incidents", &summary.critical_incidents.to_string());
            output::print_kv("Cameras online", &summary.cameras_online.to_string());
            output::print_kv("Cameras offline", &summary.cameras_offline.to_string());
            output::print_kv(
                "Cameras in maintenance",
                &summary.cameras_in_maintenance.to_string(),
            );
            output::print_kv("Vehicles in view", &summary.vehicles_in_view.to_string());
            output::print_kv(
                "Signals not in normal mode",
                &summary.intersections_not_normal.to_string(),
            );
        }
    }

    Ok(())
}
