use tauri::{command, AppHandle, Runtime};

use crate::models::ShareResult;
use crate::Result;
use crate::ShareDataExt;

/// Get and consume the pending shared data.
///
/// Returns the normalized result of the most recent share event, or `null`
/// when nothing is pending. The pending slot is cleared either way, so a
/// second call without a new share event returns `null`.
#[command]
pub(crate) async fn get_shared_data<R: Runtime>(
    app: AppHandle<R>,
) -> Result<Option<ShareResult>> {
    app.share_data().get_shared_data()
}
