//! Process-wide display settings shared by producers and the render worker.
//!
//! Every field is replaced as a whole and no invariant spans two fields, so
//! each one is synchronized on its own. A reader may see a value that is one
//! update behind.

use alloc::borrow::Cow;
use alloc::borrow::ToOwned;
use alloc::string::String;
use core::cell::RefCell;
use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use crate::colors::{EpdColor, INK};
use crate::config::{DEFAULT_TEXT, ENABLE_PARTIAL_UPDATE};

/// Runtime display settings.
pub struct DisplaySettings {
    partial_update_enabled: AtomicBool,
    current_text: Mutex<CriticalSectionRawMutex, RefCell<Cow<'static, str>>>,
    current_color: AtomicU8,
}

impl DisplaySettings {
    pub const fn new() -> Self {
        Self {
            partial_update_enabled: AtomicBool::new(ENABLE_PARTIAL_UPDATE),
            current_text: Mutex::new(RefCell::new(Cow::Borrowed(DEFAULT_TEXT))),
            current_color: AtomicU8::new(INK as u8),
        }
    }

    #[inline]
    pub fn partial_update_enabled(&self) -> bool { self.partial_update_enabled.load(Ordering::Relaxed) }

    #[inline]
    pub fn set_partial_update_enabled(
        &self,
        enabled: bool,
    ) {
        self.partial_update_enabled.store(enabled, Ordering::Relaxed);
    }

    /// Text of the last text job the worker started.
    pub fn current_text(&self) -> String { self.current_text.lock(|text| text.borrow().clone().into_owned()) }

    /// Color of the last text job the worker started.
    #[inline]
    pub fn current_color(&self) -> EpdColor { EpdColor::from_u8(self.current_color.load(Ordering::Relaxed)) }

    /// Record the text job about to be drawn.
    pub fn record_text(
        &self,
        text: &str,
        color: EpdColor,
    ) {
        self.current_text.lock(|current| {
            *current.borrow_mut() = Cow::Owned(text.to_owned());
        });
        self.current_color.store(color as u8, Ordering::Relaxed);
    }
}

impl Default for DisplaySettings {
    fn default() -> Self { Self::new() }
}
