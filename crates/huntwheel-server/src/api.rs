use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use huntwheel_core::assign::{DuplicatePolicy, required_pool_size};
use huntwheel_core::catalog::Weapon;
use huntwheel_core::errors::WheelError;
use huntwheel_core::player::PlayerId;
use huntwheel_core::reroll::reroll_player;
use huntwheel_core::reveal::{RevealPacing, run_assignment};
use huntwheel_core::rng::RandDraw;
use huntwheel_core::session::{Mode, SessionSnapshot};
use huntwheel_core::spin::{SpinOutcome, spin_to_rest};

use crate::error::AppError;
use crate::settings::{self, PersistedSettings};
use crate::state::AppState;

const MAX_NAME_LEN: usize = 64;

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub weapons: Vec<Weapon>,
    pub challenges: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct NameBody {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct PlayerCreatedResponse {
    pub id: PlayerId,
}

#[derive(Debug, Deserialize)]
pub struct PolicyBody {
    pub allow_duplicate: bool,
}

#[derive(Debug, Deserialize)]
pub struct PoolBody {
    pub weapons: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ModeBody {
    pub mode: Mode,
}

fn validate_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".to_string()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(AppError::BadRequest(format!(
            "name exceeds {MAX_NAME_LEN} chars"
        )));
    }
    Ok(())
}

/// Persist the preference slice of the session. Failures are logged, never
/// surfaced; preferences are best-effort.
async fn persist_preferences(state: &AppState) {
    if state.config.settings_path.is_empty() {
        return;
    }
    let captured = {
        let session = state.session.read().await;
        PersistedSettings::capture(&session)
    };
    let path = std::path::PathBuf::from(&state.config.settings_path);
    if let Err(e) = settings::save(&path, &captured) {
        tracing::warn!(path = %path.display(), "failed to persist settings: {e}");
    }
}

/// GET /api/v1/state — full session snapshot.
pub async fn get_state(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.session.read().await.snapshot())
}

/// GET /api/v1/catalog — the immutable weapon and challenge catalogs.
pub async fn get_catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    let session = state.session.read().await;
    Json(CatalogResponse {
        weapons: session.weapons().to_vec(),
        challenges: session.challenges().to_vec(),
    })
}

/// POST /api/v1/players — add a roster player.
pub async fn post_player(
    State(state): State<AppState>,
    Json(body): Json<NameBody>,
) -> Result<(StatusCode, Json<PlayerCreatedResponse>), AppError> {
    validate_name(&body.name)?;
    let mut session = state.session.write().await;
    match session.add_player(body.name) {
        Some(id) => Ok((StatusCode::CREATED, Json(PlayerCreatedResponse { id }))),
        None => Err(AppError::Conflict(
            "roster is full or an assignment run is in progress".to_string(),
        )),
    }
}

/// DELETE /api/v1/players/{id} — remove a roster player.
pub async fn delete_player(
    State(state): State<AppState>,
    Path(id): Path<PlayerId>,
) -> Result<StatusCode, AppError> {
    let mut session = state.session.write().await;
    if session.player(id).is_none() {
        return Err(AppError::NotFound(format!("no player with id {id}")));
    }
    if session.remove_player(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Conflict(
            "roster is at its minimum size or an assignment run is in progress".to_string(),
        ))
    }
}

/// PATCH /api/v1/players/{id} — rename a roster player.
pub async fn rename_player(
    State(state): State<AppState>,
    Path(id): Path<PlayerId>,
    Json(body): Json<NameBody>,
) -> Result<StatusCode, AppError> {
    validate_name(&body.name)?;
    let mut session = state.session.write().await;
    if session.rename_player(id, body.name) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("no player with id {id}")))
    }
}

/// PUT /api/v1/policy — toggle the duplicate-weapon policy.
pub async fn put_policy(
    State(state): State<AppState>,
    Json(body): Json<PolicyBody>,
) -> StatusCode {
    state
        .session
        .write()
        .await
        .set_allow_duplicate(body.allow_duplicate);
    persist_preferences(&state).await;
    StatusCode::NO_CONTENT
}

/// PUT /api/v1/pool — replace the active weapon pool.
pub async fn put_pool(State(state): State<AppState>, Json(body): Json<PoolBody>) -> StatusCode {
    state.session.write().await.set_active_weapons(&body.weapons);
    persist_preferences(&state).await;
    StatusCode::NO_CONTENT
}

/// PUT /api/v1/mode — switch between single and multiplayer surfaces.
pub async fn put_mode(State(state): State<AppState>, Json(body): Json<ModeBody>) -> StatusCode {
    state.session.write().await.set_mode(body.mode);
    persist_preferences(&state).await;
    StatusCode::NO_CONTENT
}

/// POST /api/v1/assignment — start a reveal run in the background.
///
/// Pool and busy violations are rejected here so the caller gets a
/// synchronous error; the spawned run re-checks busy atomically, so a
/// race between two accepted requests still ends with exactly one run.
pub async fn post_assignment(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    {
        let session = state.session.read().await;
        if session.is_assigning() {
            return Err(WheelError::AssignmentBusy.into());
        }
        let policy = DuplicatePolicy::from_flag(session.allow_duplicate());
        let required = required_pool_size(session.players().len(), policy);
        if session.active_weapons().len() < required {
            return Err(WheelError::PoolInsufficient { required }.into());
        }
    }

    let session = std::sync::Arc::clone(&state.session);
    let pacing = RevealPacing::from_millis(state.config.reveal.delay_ms);
    let cancel = state.cancel.child_token();
    tokio::spawn(async move {
        if let Err(e) = run_assignment(session, pacing, RandDraw::from_os(), cancel).await {
            // Lost the race with a concurrent request; nothing was mutated.
            tracing::debug!("assignment run not started: {e}");
        }
    });
    Ok(StatusCode::ACCEPTED)
}

/// POST /api/v1/players/{id}/reroll — replace one player's weapon.
///
/// Core-level silent no-ops (unknown id, exhausted credits, never
/// assigned) come back as 204 with nothing changed, matching the
/// non-fatal contract.
pub async fn post_reroll(
    State(state): State<AppState>,
    Path(id): Path<PlayerId>,
) -> Result<StatusCode, AppError> {
    let mut session = state.session.write().await;
    reroll_player(&mut session, id, &mut RandDraw::from_os())?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/spin — resolve a single-player spin to rest.
pub async fn post_spin(State(state): State<AppState>) -> Result<Json<SpinOutcome>, AppError> {
    let session = state.session.read().await;
    let active = session.active_weapons();
    let outcome = spin_to_rest(&active, session.challenges(), 0.0, &mut RandDraw::from_os())?;
    Ok(Json(outcome))
}
