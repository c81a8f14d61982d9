//! Share-event normalization.
//!
//! Turns one OS share event into a flat [`ShareResult`] and holds it in a
//! single pending slot until the frontend asks for it. Content handles are
//! dereferenced through a [`ContentResolver`], which keeps the platform's
//! resolution mechanics (content providers on Android, plain files on
//! desktop) out of the control flow here.

use std::io::Read;
use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{ContentHandle, ShareAction, ShareEvent, ShareResult};

/// Placeholder emitted when a display name or media type cannot be resolved.
const UNRESOLVED: &str = "null";

/// Platform access to the content behind a [`ContentHandle`].
pub trait ContentResolver {
    /// Open a fresh read stream for the handle's content.
    fn open_stream(&self, handle: &ContentHandle) -> std::io::Result<Box<dyn Read>>;

    /// Display name from the platform's metadata store, if it has a row
    /// (and a name column) for this handle.
    fn display_name(&self, handle: &ContentHandle) -> Option<String>;

    /// Media type from the platform's type registry, if known.
    fn content_type(&self, handle: &ContentHandle) -> Option<String>;
}

/// Normalizes share events and holds at most one pending result.
///
/// Holding is single-slot: a new event overwrites an unfetched result, and
/// fetching always clears the slot. Both entry points are synchronous and
/// may be called from different threads; the slot is internally locked.
pub struct ShareExtractor<C> {
    resolver: C,
    pending: Mutex<Option<ShareResult>>,
}

impl<C: ContentResolver> ShareExtractor<C> {
    pub fn new(resolver: C) -> Self {
        Self {
            resolver,
            pending: Mutex::new(None),
        }
    }

    /// Normalize one share event and store the result as the pending value.
    ///
    /// Events with an unrecognized action are ignored. If any content
    /// stream cannot be read the whole call fails and the pending slot is
    /// left untouched, so no partial result ever surfaces.
    pub fn handle(&self, event: &ShareEvent) -> Result<()> {
        let Some(result) = self.normalize(event)? else {
            debug!(action = ?event.action, "ignoring share event with unrecognized action");
            return Ok(());
        };
        if self.slot().replace(result).is_some() {
            debug!("overwriting a pending share result that was never fetched");
        }
        Ok(())
    }

    /// Take the pending result. The slot is cleared whether or not a value
    /// was present, so a second fetch with no intervening event yields
    /// `None`.
    pub fn fetch(&self) -> Option<ShareResult> {
        self.slot().take()
    }

    fn slot(&self) -> MutexGuard<'_, Option<ShareResult>> {
        // A poisoned lock only means a prior panic mid-store; the slot
        // itself is still a valid Option.
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Build the flat result for one event, or `None` for ignored actions.
    fn normalize(&self, event: &ShareEvent) -> Result<Option<ShareResult>> {
        let mut result = ShareResult::new();
        if let Some(mime) = &event.mime_type {
            result.set_text("mimeType", mime.clone());
        }
        match event.action {
            ShareAction::SendMultiple => {
                result.set_int("length", event.streams.len() as i64);
                for (index, handle) in event.streams.iter().enumerate() {
                    self.attach(&mut result, index, handle)?;
                }
            }
            ShareAction::SendTo | ShareAction::View => {
                if let Some(text) = &event.data_string {
                    result.set_text("text", text.clone());
                }
            }
            ShareAction::Send => {
                if let Some(handle) = event.streams.first() {
                    result.set_int("length", 1);
                    self.attach(&mut result, 0, handle)?;
                }
            }
            ShareAction::Other => return Ok(None),
        }
        debug!(action = ?event.action, keys = result.len(), "normalized share event");
        Ok(Some(result))
    }

    /// Emit the `data.<i>` / `name.<i>` / `type.<i>` triple for one handle.
    fn attach(&self, result: &mut ShareResult, index: usize, handle: &ContentHandle) -> Result<()> {
        result.set_bytes(format!("data.{index}"), self.read_bytes(handle)?);
        result.set_text(format!("name.{index}"), self.resolve_name(handle));
        result.set_text(format!("type.{index}"), self.resolve_type(handle));
        Ok(())
    }

    /// Read the handle's content fully into memory.
    ///
    /// The stream is opened fresh and dropped on every exit path. Open and
    /// read failures are both fatal to the surrounding `handle()` call.
    fn read_bytes(&self, handle: &ContentHandle) -> Result<Vec<u8>> {
        let mut stream = self
            .resolver
            .open_stream(handle)
            .map_err(|source| unreadable(handle, source))?;
        let mut bytes = Vec::new();
        stream
            .read_to_end(&mut bytes)
            .map_err(|source| unreadable(handle, source))?;
        Ok(bytes)
    }

    /// Best-effort display name: metadata lookup, then the locator's final
    /// path segment, then a placeholder. Never fails.
    fn resolve_name(&self, handle: &ContentHandle) -> String {
        self.resolver
            .display_name(handle)
            .or_else(|| handle.file_name().map(str::to_string))
            .unwrap_or_else(|| UNRESOLVED.to_string())
    }

    /// Best-effort media type from the platform's type registry.
    fn resolve_type(&self, handle: &ContentHandle) -> String {
        self.resolver
            .content_type(handle)
            .unwrap_or_else(|| UNRESOLVED.to_string())
    }
}

fn unreadable(handle: &ContentHandle, source: std::io::Error) -> Error {
    Error::UnreadableContent {
        locator: handle.locator().to_string(),
        source,
    }
}
