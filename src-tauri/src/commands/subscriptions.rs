use tauri::State;
use tracing::debug;

use crate::state::AppState;
use crate::store::SubscriptionHandle;

/// Cancel a feed or chat subscription. Unknown handles are ignored.
#[tauri::command]
pub fn unsubscribe(state: State<'_, AppState>, handle: SubscriptionHandle) -> bool {
    let store_removed = state.store.unsubscribe(handle);
    let task_removed = state.subscriptions.cancel(handle);
    debug!(
        "Unsubscribe {}: store={}, task={}",
        handle.0, store_removed, task_removed
    );
    store_removed || task_removed
}
