//! Render service: the only way producers reach the panel.
//!
//! HTTP handlers, button callbacks and app pollers build jobs and hand them
//! to a [`RenderService`]. Every enqueue call returns immediately. The
//! service owns the bounded job queue and the runtime settings; the single
//! [`RenderWorker`](crate::tasks::RenderWorker) drains the queue and owns
//! the panel.
//!
//! # Busy Flag
//!
//! `in_flight` counts jobs that were accepted and have not finished. It is
//! raised before a job enters the queue and lowered after the worker has
//! executed it, so `is_busy()` covers both the queued backlog and the job
//! currently being drawn without a separate "executing" flag.
//!
//! # Overflow
//!
//! A full queue rejects the newest job. Queued jobs are never evicted, so
//! a later `clear()` cannot jump ahead of an earlier text render.

use alloc::string::String;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, TryReceiveError, TrySendError};

use crate::colors::EpdColor;
use crate::config::QUEUE_CAPACITY;
use crate::drivers::PanelInfo;
use crate::jobs::{ImageFormat, ImageJob, Job, TextJob};
use crate::log_warn;
use crate::pages::Page;
use crate::state::DisplaySettings;

/// Job queue, busy counter and settings shared between producers and the worker.
pub struct RenderService<const N: usize = QUEUE_CAPACITY> {
    queue: Channel<CriticalSectionRawMutex, Job, N>,
    in_flight: AtomicUsize,
    settings: DisplaySettings,
    panel: PanelInfo,
}

impl<const N: usize> RenderService<N> {
    /// Create a service for a panel described by `panel`.
    ///
    /// `const` so firmware can keep the service in a `static`.
    pub const fn new(panel: PanelInfo) -> Self {
        Self {
            queue: Channel::new(),
            in_flight: AtomicUsize::new(0),
            settings: DisplaySettings::new(),
            panel,
        }
    }

    // =========================================================================
    // Enqueue API
    // =========================================================================

    /// Hand `job` to the worker without blocking.
    ///
    /// Returns `false` and drops the job when the queue is full.
    pub fn enqueue(
        &self,
        job: Job,
    ) -> bool {
        self.in_flight.fetch_add(1, Ordering::AcqRel);
        match self.queue.try_send(job) {
            Ok(()) => true,
            Err(TrySendError::Full(job)) => {
                self.in_flight.fetch_sub(1, Ordering::AcqRel);
                log_warn!("Queue full, dropped {}", job.kind());
                false
            }
        }
    }

    /// Show `text` centered on the panel.
    pub fn display_text(
        &self,
        text: &str,
        color: EpdColor,
        force_full: bool,
    ) -> bool {
        self.enqueue(Job::Text(TextJob {
            text: String::from(text),
            color,
            force_full,
        }))
    }

    /// Show a packed bitplane image centered on the panel.
    ///
    /// `data` is copied, so the caller may reuse its buffer right away.
    /// Size and plane checks happen on the worker.
    pub fn display_image(
        &self,
        width: u32,
        height: u32,
        data: &[u8],
        format: ImageFormat,
        color: EpdColor,
        force_full: bool,
    ) -> bool {
        self.enqueue(Job::Image(ImageJob {
            width,
            height,
            data: Vec::from(data),
            format,
            color,
            force_full,
        }))
    }

    /// Show a structured page with a full refresh.
    pub fn display_page(
        &self,
        page: Page,
    ) -> bool {
        self.enqueue(Job::Page(page))
    }

    /// Show a page containing only `title`.
    pub fn display_header(
        &self,
        title: &str,
    ) -> bool {
        self.enqueue(Job::Header(String::from(title)))
    }

    /// Fill the panel with background once.
    pub fn clear(&self) -> bool { self.enqueue(Job::Clear) }

    /// Run the ghost removal sequence.
    pub fn force_clear(&self) -> bool { self.enqueue(Job::ForceClear) }

    /// Show the date of a Unix `timestamp` in the accent color.
    pub fn display_date(
        &self,
        timestamp: i64,
    ) -> bool {
        self.enqueue(Job::Date(timestamp))
    }

    // =========================================================================
    // Introspection API
    // =========================================================================

    /// A job is executing or waiting in the queue.
    #[inline]
    pub fn is_busy(&self) -> bool { self.in_flight.load(Ordering::Acquire) > 0 }

    /// Jobs waiting in the queue, not counting the one executing.
    #[inline]
    pub fn pending_count(&self) -> usize { self.queue.len() }

    /// Maximum number of queued jobs.
    #[inline]
    pub const fn capacity(&self) -> usize { N }

    /// Text of the last text or date job the worker started.
    pub fn current_text(&self) -> String { self.settings.current_text() }

    /// Color of the last text or date job the worker started.
    pub fn current_color(&self) -> EpdColor { self.settings.current_color() }

    #[inline]
    pub const fn panel_width(&self) -> u32 { self.panel.size.width }

    #[inline]
    pub const fn panel_height(&self) -> u32 { self.panel.size.height }

    #[inline]
    pub const fn panel_info(&self) -> PanelInfo { self.panel }

    #[inline]
    pub const fn has_partial_update_support(&self) -> bool { self.panel.partial_update }

    #[inline]
    pub fn partial_update_enabled(&self) -> bool { self.settings.partial_update_enabled() }

    pub fn set_partial_update_enabled(
        &self,
        enabled: bool,
    ) {
        self.settings.set_partial_update_enabled(enabled);
    }

    // =========================================================================
    // Worker Side
    // =========================================================================

    /// Wait for the next job.
    pub(crate) async fn next_job(&self) -> Job { self.queue.receive().await }

    /// Take the next job if one is queued.
    pub(crate) fn try_next_job(&self) -> Option<Job> {
        match self.queue.try_receive() {
            Ok(job) => Some(job),
            Err(TryReceiveError::Empty) => None,
        }
    }

    /// Mark one dequeued job as finished.
    pub(crate) fn finish_job(&self) { self.in_flight.fetch_sub(1, Ordering::AcqRel); }

    pub(crate) const fn settings(&self) -> &DisplaySettings { &self.settings }
}
