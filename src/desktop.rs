//! Desktop implementation over plain files.
//!
//! Share sheets are a mobile concept; on desktop the locators are treated
//! as filesystem paths so the same pipeline serves development, tests and
//! hosts that forward file drops as share events. There is no metadata
//! store or type registry to consult, so display names come from the
//! extractor's path-segment fallback and types resolve to the placeholder.

use std::fs::File;
use std::io::Read;

use serde::de::DeserializeOwned;
use tauri::{plugin::PluginApi, AppHandle, Runtime};
use tracing::debug;

use crate::extractor::{ContentResolver, ShareExtractor};
use crate::models::*;

/// Initialize the desktop plugin.
pub fn init<R: Runtime, C: DeserializeOwned>(
    app: &AppHandle<R>,
    _api: PluginApi<R, C>,
) -> crate::Result<ShareData<R>> {
    Ok(ShareData {
        app: app.clone(),
        extractor: ShareExtractor::new(FsContentResolver),
    })
}

/// Resolves content handles as filesystem paths.
struct FsContentResolver;

impl ContentResolver for FsContentResolver {
    fn open_stream(&self, handle: &ContentHandle) -> std::io::Result<Box<dyn Read>> {
        let path = handle
            .locator()
            .strip_prefix("file://")
            .unwrap_or_else(|| handle.locator());
        Ok(Box::new(File::open(path)?))
    }

    fn display_name(&self, _handle: &ContentHandle) -> Option<String> {
        None
    }

    fn content_type(&self, _handle: &ContentHandle) -> Option<String> {
        None
    }
}

/// Access to the share-data APIs on desktop.
pub struct ShareData<R: Runtime> {
    app: AppHandle<R>,
    extractor: ShareExtractor<FsContentResolver>,
}

impl<R: Runtime> ShareData<R> {
    /// Normalize and store one incoming share event.
    pub fn handle(&self, event: &ShareEvent) -> crate::Result<()> {
        debug!(action = ?event.action, "share event received");
        self.extractor.handle(event)?;
        crate::emit_received(&self.app, event);
        Ok(())
    }

    /// Get and consume the pending shared data.
    pub fn get_shared_data(&self) -> crate::Result<Option<ShareResult>> {
        Ok(self.extractor.fetch())
    }
}
