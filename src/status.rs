//! Secondary status display reported to by the render worker.
//!
//! On the device this is the small OLED next to the e-paper panel. It shows
//! short progress and error messages while the slow panel refreshes, since
//! the e-paper itself cannot show "working" feedback.

/// Sink for short status messages from the render worker.
pub trait StatusIndicator {
    /// Replace the status line with `message`.
    fn show_status(
        &mut self,
        message: &str,
    );

    /// Show step `step` of `total` for a multi-step operation.
    fn show_progress(
        &mut self,
        label: &str,
        step: u32,
        total: u32,
    );
}

/// No status display attached.
impl StatusIndicator for () {
    fn show_status(
        &mut self,
        _message: &str,
    ) {
    }

    fn show_progress(
        &mut self,
        _label: &str,
        _step: u32,
        _total: u32,
    ) {
    }
}

impl<S: StatusIndicator + ?Sized> StatusIndicator for &mut S {
    fn show_status(
        &mut self,
        message: &str,
    ) {
        (**self).show_status(message);
    }

    fn show_progress(
        &mut self,
        label: &str,
        step: u32,
        total: u32,
    ) {
        (**self).show_progress(label, step, total);
    }
}
