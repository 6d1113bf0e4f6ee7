//! Read-only agent profile route: `GET /api/agent/profile`.

use crate::AppState;
use axum::{Extension, Json};
use consult_types::AgentProfile;
use std::sync::Arc;

/// Returns the static agent configuration shown in the UI shell. Never
/// derived from live agent state.
pub async fn get_agent_profile_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Json<AgentProfile> {
    Json(state.agent.clone())
}
