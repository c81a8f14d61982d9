//! Mobile implementation backed by the registered native plugin.
//!
//! The native layer forwards each share intent (action, declared type,
//! stream locators, data string) to [`ShareData::handle`]; normalization
//! happens here, and every handle dereference maps to one synchronous
//! native call that owns the actual content-provider machinery.

use std::io::Read;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tauri::{
    plugin::{PluginApi, PluginHandle},
    AppHandle, Runtime,
};
use tracing::debug;

use crate::extractor::{ContentResolver, ShareExtractor};
use crate::models::*;

#[cfg(target_os = "ios")]
tauri::ios_plugin_binding!(init_plugin_share_data);

/// Initialize the mobile plugin by registering with the native layer.
pub fn init<R: Runtime, C: DeserializeOwned>(
    app: &AppHandle<R>,
    api: PluginApi<R, C>,
) -> crate::Result<ShareData<R>> {
    #[cfg(target_os = "android")]
    let handle = api.register_android_plugin("com.plugins.sharedata", "ShareDataPlugin")?;
    #[cfg(target_os = "ios")]
    let handle = api.register_ios_plugin(init_plugin_share_data)?;
    Ok(ShareData {
        app: app.clone(),
        extractor: ShareExtractor::new(NativeContentResolver(handle)),
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HandleArgs<'a> {
    locator: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReadContentResponse {
    bytes: Vec<u8>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupResponse {
    value: Option<String>,
}

/// Resolves content handles through the registered native plugin.
struct NativeContentResolver<R: Runtime>(PluginHandle<R>);

impl<R: Runtime> ContentResolver for NativeContentResolver<R> {
    fn open_stream(&self, handle: &ContentHandle) -> std::io::Result<Box<dyn Read>> {
        let response: ReadContentResponse = self
            .0
            .run_mobile_plugin("readContent", HandleArgs { locator: handle.locator() })
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err.to_string()))?;
        Ok(Box::new(std::io::Cursor::new(response.bytes)))
    }

    fn display_name(&self, handle: &ContentHandle) -> Option<String> {
        self.0
            .run_mobile_plugin::<LookupResponse>(
                "getDisplayName",
                HandleArgs { locator: handle.locator() },
            )
            .ok()
            .and_then(|response| response.value)
    }

    fn content_type(&self, handle: &ContentHandle) -> Option<String> {
        self.0
            .run_mobile_plugin::<LookupResponse>(
                "getType",
                HandleArgs { locator: handle.locator() },
            )
            .ok()
            .and_then(|response| response.value)
    }
}

/// Access to the share-data APIs on mobile.
pub struct ShareData<R: Runtime> {
    app: AppHandle<R>,
    extractor: ShareExtractor<NativeContentResolver<R>>,
}

impl<R: Runtime> ShareData<R> {
    /// Normalize and store one incoming share event.
    ///
    /// Called for the intent that launched the process as well as intents
    /// delivered while it is running; both are treated the same way.
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
