//! Intercepts OS "share with…" requests and normalizes their heterogeneous
//! payloads (attachments, links, plain text) into a single flat map of
//! primitive values, held until the frontend fetches it exactly once.

use tauri::{
    plugin::{Builder, TauriPlugin},
    Emitter, Manager, Runtime,
};

pub use models::*;

#[cfg(desktop)]
mod desktop;
#[cfg(mobile)]
mod mobile;

mod commands;
mod error;
mod extractor;
mod models;

pub use error::{Error, Result};
pub use extractor::{ContentResolver, ShareExtractor};

#[cfg(desktop)]
use desktop::ShareData;
#[cfg(mobile)]
use mobile::ShareData;

/// Extensions to [`tauri::App`], [`tauri::AppHandle`] and [`tauri::Window`] to access the share-data APIs.
pub trait ShareDataExt<R: Runtime> {
    fn share_data(&self) -> &ShareData<R>;
}

impl<R: Runtime, T: Manager<R>> crate::ShareDataExt<R> for T {
    fn share_data(&self) -> &ShareData<R> {
        self.state::<ShareData<R>>().inner()
    }
}

/// Initializes the share-data plugin.
///
/// The host forwards incoming share events to [`ShareData::handle`] — once
/// at cold start when the process was launched by a share, and again for
/// every event delivered while it is already running; both paths are
/// treated identically. The frontend retrieves the normalized result via
/// the `get_shared_data` command, which consumes it.
pub fn init<R: Runtime>() -> TauriPlugin<R> {
    Builder::new("share-data")
        .invoke_handler(tauri::generate_handler![commands::get_shared_data])
        .setup(|app, api| {
            #[cfg(mobile)]
            let share_data = mobile::init(app, api)?;
            #[cfg(desktop)]
            let share_data = desktop::init(app, api)?;
            app.manage(share_data);
            Ok(())
        })
        .build()
}

/// Notify a live frontend that a share event was normalized and stored.
///
/// Best-effort: a frontend that missed the event still finds the result by
/// calling `get_shared_data`.
pub(crate) fn emit_received<R: Runtime>(app: &tauri::AppHandle<R>, event: &ShareEvent) {
    if event.action == ShareAction::Other {
        return;
    }
    let item_count = match event.action {
        ShareAction::SendMultiple => event.streams.len(),
        ShareAction::Send => event.streams.len().min(1),
        _ => 0,
    };
    let payload = ShareReceivedPayload {
        action: event.action,
        item_count,
        timestamp: now_millis(),
    };
    if let Err(err) = app.emit("share-received", payload) {
        tracing::warn!("failed to emit share-received event: {err}");
    }
}

fn now_millis() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
