use actix_web::web::{Data, Json};
use actix_web::get;
use serde::Serialize;

use pilotwatch::report::{CategoryReport, Overview};
use pilotwatch::state::MonitorState;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub last_update: Option<String>,
    pub cycles: u64,
}

#[derive(Debug, Serialize)]
pub struct ChangesResponse {
    pub changes: Vec<CategoryReport>,
}

#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub overview: Overview,
}

/// Returns the status of the last monitoring cycle.
#[get("/v1/status")]
pub async fn status(state: Data<MonitorState>) -> Json<StatusResponse> {
    let dashboard = state.dashboard();
    Json(StatusResponse {
        status: dashboard.status,
        last_update: dashboard.last_update,
        cycles: dashboard.cycles,
    })
}

/// Returns the reportable changes of the last cycle, grouped by category.
#[get("/v1/changes")]
pub async fn changes(state: Data<MonitorState>) -> Json<ChangesResponse> {
    Json(ChangesResponse {
        changes: state.dashboard().changes,
    })
}

/// Returns the movement overview computed from the last snapshot.
#[get("/v1/overview")]
pub async fn overview(state: Data<MonitorState>) -> Json<OverviewResponse> {
    Json(OverviewResponse {
        overview: state.dashboard().overview,
    })
}
