use std::time::Duration;

use serde::Serialize;
use tauri::State;
use tracing::{debug, info};

use crate::error::EcoConnectError;
use crate::tips::{filter_tips as apply_filter, next_daily_index, RawTipQuery, Tip, TipQuery};
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct DailyTip {
    pub index: usize,
    pub text: String,
}

#[tauri::command]
pub fn list_tips(state: State<'_, AppState>) -> Vec<Tip> {
    state.catalog.tips.clone()
}

/// Filter the catalog. Unknown facet names are rejected.
#[tauri::command]
pub fn filter_tips(state: State<'_, AppState>, query: RawTipQuery) -> Result<Vec<Tip>, String> {
    let query = TipQuery::try_from(query)?;
    let tips = apply_filter(&state.catalog.tips, &query);
    debug!("Tip filter '{}' matched {} entries", query.text, tips.len());
    Ok(tips)
}

/// Rotate the dashboard tip, never showing the same one twice in a row.
#[tauri::command]
pub async fn daily_tip(state: State<'_, AppState>) -> Result<DailyTip, String> {
    tokio::time::sleep(Duration::from_millis(state.config.tips.rotation_delay_ms)).await;

    let daily = &state.catalog.daily;
    let mut current = state
        .daily_tip
        .lock()
        .map_err(|_| EcoConnectError::Store("daily tip lock poisoned".to_string()))?;

    let index = next_daily_index(&mut rand::rng(), daily.len(), *current)
        .ok_or_else(|| EcoConnectError::NotFound("daily tips".to_string()))?;
    *current = Some(index);

    info!("Daily tip rotated to {}", index);
    Ok(DailyTip {
        index,
        text: daily[index].clone(),
    })
}
