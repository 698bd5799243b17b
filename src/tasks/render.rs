//! Render worker: the single consumer of the job queue.
//!
//! The worker owns the panel for the lifetime of the process. It waits on the
//! queue, executes one job to completion, lowers the busy counter, and goes
//! back to waiting. It only suspends while waiting for a job, while a panel
//! refresh is in progress, and during force-clear settle delays, so producers
//! sharing the executor keep running during multi-second refreshes.
//!
//! On the device `run()` is awaited from an embassy task that owns the worker.

use core::fmt::Write;

use embassy_time::{Instant, Timer};
use embedded_graphics::prelude::*;
use heapless::String;

use crate::colors::{ACCENT, BACKGROUND, EpdColor, INK};
use crate::config::{ForceClearTiming, QUEUE_CAPACITY};
use crate::drivers::EpdPanel;
use crate::jobs::{ImageJob, Job};
use crate::log_buffer::LOG_MSG_LEN;
use crate::pages::Page;
use crate::render::compose_page;
use crate::screens::{TextLayout, draw_image, format_date, image_area};
use crate::service::RenderService;
use crate::status::StatusIndicator;
use crate::{log_debug, log_error, log_info, log_warn};

const ERROR_PREFIX: &str = "Error: ";

/// Status messages hold a full log message after the error prefix.
const STATUS_MSG_LEN: usize = ERROR_PREFIX.len() + LOG_MSG_LEN;

/// Executes queued jobs against a panel.
pub struct RenderWorker<'a, P, S = (), const N: usize = QUEUE_CAPACITY> {
    service: &'a RenderService<N>,
    panel: P,
    status: S,
    force_clear_timing: ForceClearTiming,
}

impl<'a, P, const N: usize> RenderWorker<'a, P, (), N>
where
    P: EpdPanel,
{
    /// Create a worker without a status display.
    pub fn new(
        service: &'a RenderService<N>,
        panel: P,
    ) -> Self {
        Self {
            service,
            panel,
            status: (),
            force_clear_timing: ForceClearTiming::new(),
        }
    }
}

impl<'a, P, S, const N: usize> RenderWorker<'a, P, S, N>
where
    P: EpdPanel,
    S: StatusIndicator,
{
    /// Report progress and errors to `status`.
    pub fn with_status<T: StatusIndicator>(
        self,
        status: T,
    ) -> RenderWorker<'a, P, T, N> {
        RenderWorker {
            service: self.service,
            panel: self.panel,
            status,
            force_clear_timing: self.force_clear_timing,
        }
    }

    /// Override the force-clear cycle count and settle delays.
    pub fn with_force_clear_timing(
        mut self,
        timing: ForceClearTiming,
    ) -> Self {
        self.force_clear_timing = timing;
        self
    }

    /// The panel this worker draws on.
    #[inline]
    pub fn panel(&self) -> &P { &self.panel }

    /// The status display this worker reports to.
    #[inline]
    pub fn status(&self) -> &S { &self.status }

    /// Process jobs forever.
    pub async fn run(&mut self) -> ! {
        log_info!("Render worker started");
        loop {
            self.process_next().await;
        }
    }

    /// Wait for one job and execute it.
    pub async fn process_next(&mut self) {
        let job = self.service.next_job().await;
        self.execute(job).await;
        self.service.finish_job();
    }

    /// Execute every job already queued, then return how many ran.
    ///
    /// Jobs enqueued while draining are executed too.
    pub async fn drain(&mut self) -> usize {
        let mut executed = 0;
        while let Some(job) = self.service.try_next_job() {
            self.execute(job).await;
            self.service.finish_job();
            executed += 1;
        }
        executed
    }

    async fn execute(
        &mut self,
        job: Job,
    ) {
        let kind = job.kind();
        let start = Instant::now();

        match job {
            Job::Text(text) => self.render_text(&text.text, text.color, text.force_full).await,
            Job::Image(image) => self.render_image(&image).await,
            Job::Page(page) => self.render_page(&page).await,
            Job::Header(title) => self.render_page(&Page::titled(title)).await,
            Job::Clear => self.fill_full(BACKGROUND).await,
            Job::ForceClear => self.force_clear().await,
            Job::Date(timestamp) => {
                let date = format_date(timestamp);
                self.render_text(&date, ACCENT, false).await;
            }
        }

        log_debug!("{} done in {} ms", kind, start.elapsed().as_millis());
    }

    /// Partial refresh is used only when enabled, supported and not overridden.
    fn use_partial(
        &self,
        force_full: bool,
    ) -> bool {
        !force_full
            && self.service.settings().partial_update_enabled()
            && self.service.has_partial_update_support()
            && self.panel.supports_partial_update()
    }

    async fn render_text(
        &mut self,
        text: &str,
        color: EpdColor,
        force_full: bool,
    ) {
        if text.is_empty() {
            log_warn!("Ignoring empty text");
            return;
        }
        self.service.settings().record_text(text, color);

        let layout = TextLayout::new(text, self.panel.size());
        let partial = self.use_partial(force_full);
        if partial {
            let area = layout.update_area();
            self.panel.set_partial_window(area);
            self.panel.begin_frame();
            self.panel.fill_solid(&area, BACKGROUND).ok();
        } else {
            self.panel.set_full_window();
            self.panel.begin_frame();
            self.panel.clear(BACKGROUND).ok();
        }
        layout.draw(&mut self.panel, color);
        self.commit().await;

        log_info!("Text shown ({})", if partial { "partial" } else { "full" });
    }

    async fn render_image(
        &mut self,
        image: &ImageJob,
    ) {
        if let Err(err) = image.validate(self.panel.size()) {
            log_error!("Image rejected: {}", err);
            let mut message: String<STATUS_MSG_LEN> = String::new();
            let _ = write!(message, "{}{}", ERROR_PREFIX, err);
            self.status.show_status(&message);
            return;
        }

        let area = image_area(image, self.panel.size());
        let partial = self.use_partial(image.force_full);
        if partial {
            self.panel.set_partial_window(area);
            self.panel.begin_frame();
            self.panel.fill_solid(&area, BACKGROUND).ok();
        } else {
            self.panel.set_full_window();
            self.panel.begin_frame();
            self.panel.clear(BACKGROUND).ok();
        }
        draw_image(&mut self.panel, image, area.top_left);
        self.commit().await;

        log_info!("Image {}x{} shown ({})", image.width, image.height, if partial { "partial" } else { "full" });
    }

    async fn render_page(
        &mut self,
        page: &Page,
    ) {
        self.panel.set_full_window();
        self.panel.begin_frame();
        self.panel.clear(BACKGROUND).ok();
        let layout = compose_page(&mut self.panel, page);
        self.commit().await;

        if layout.is_truncated() {
            log_debug!("Page truncated, {} dropped", layout.dropped);
        }
    }

    /// One full-window refresh of a single color.
    async fn fill_full(
        &mut self,
        color: EpdColor,
    ) {
        self.panel.set_full_window();
        self.panel.begin_frame();
        self.panel.clear(color).ok();
        self.commit().await;
    }

    async fn force_clear(&mut self) {
        let timing = self.force_clear_timing;
        log_info!("Force clear, {} cycles", timing.cycles);

        for cycle in 1..=timing.cycles {
            self.status.show_progress("Clearing", cycle, timing.cycles);
            self.fill_full(BACKGROUND).await;
            Timer::after(timing.settle).await;
            self.fill_full(INK).await;
            Timer::after(timing.settle).await;
        }
        self.fill_full(BACKGROUND).await;
        Timer::after(timing.final_settle).await;

        self.status.show_status("Clear done");
    }

    async fn commit(&mut self) {
        if let Err(err) = self.panel.commit_frame().await {
            log_error!("Refresh failed: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use embassy_futures::block_on;
    use embassy_time::Duration;
    use embedded_graphics::primitives::Rectangle;

    use super::*;
    use crate::config::layout::{PANEL_HEIGHT, PANEL_WIDTH};
    use crate::drivers::{MemoryPanel, PanelError, PanelInfo, RefreshWindow};
    use crate::jobs::{ImageError, ImageFormat};
    use crate::screens::padded_area;

    const PANEL: Size = Size::new(PANEL_WIDTH, PANEL_HEIGHT);

    #[derive(Default)]
    struct RecordingStatus {
        messages: Vec<std::string::String>,
    }

    impl StatusIndicator for RecordingStatus {
        fn show_status(
            &mut self,
            message: &str,
        ) {
            self.messages.push(message.to_string());
        }

        fn show_progress(
            &mut self,
            label: &str,
            step: u32,
            total: u32,
        ) {
            self.messages.push(format!("{} {}/{}", label, step, total));
        }
    }

    /// Memory panel that records the service state at every refresh.
    struct ObservingPanel<'s> {
        inner: MemoryPanel,
        service: &'s RenderService,
        seen: Vec<(bool, usize)>,
    }

    impl OriginDimensions for ObservingPanel<'_> {
        fn size(&self) -> Size { self.inner.size() }
    }

    impl DrawTarget for ObservingPanel<'_> {
        type Color = EpdColor;
        type Error = core::convert::Infallible;

        fn draw_iter<I>(
            &mut self,
            pixels: I,
        ) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            self.inner.draw_iter(pixels)
        }
    }

    impl EpdPanel for ObservingPanel<'_> {
        fn supports_partial_update(&self) -> bool { self.inner.supports_partial_update() }

        fn set_full_window(&mut self) { self.inner.set_full_window(); }

        fn set_partial_window(
            &mut self,
            area: Rectangle,
        ) {
            self.inner.set_partial_window(area);
        }

        fn begin_frame(&mut self) { self.inner.begin_frame(); }

        async fn commit_frame(&mut self) -> Result<(), PanelError> {
            self.seen.push((self.service.is_busy(), self.service.pending_count()));
            self.inner.commit_frame().await
        }
    }

    fn panel(partial: bool) -> MemoryPanel { MemoryPanel::new(PANEL).with_partial_update(partial) }

    fn service_for(panel: &MemoryPanel) -> RenderService { RenderService::new(PanelInfo::of(panel)) }

    fn instant() -> ForceClearTiming {
        ForceClearTiming {
            cycles: 4,
            settle: Duration::from_ticks(0),
            final_settle: Duration::from_ticks(0),
        }
    }

    #[test]
    fn test_text_busy_until_drained() {
        let panel = panel(false);
        let service = service_for(&panel);
        let mut worker = RenderWorker::new(&service, panel);

        assert!(service.display_text("Hello", EpdColor::Red, false));
        assert!(service.is_busy(), "Service should be busy while the job is queued");

        assert_eq!(block_on(worker.drain()), 1);
        assert!(!service.is_busy(), "Service should be idle after draining");
        assert_eq!(service.current_text(), "Hello");
        assert_eq!(service.current_color(), EpdColor::Red);
        assert!(worker.panel().frame().count(&worker.panel().bounding_box(), EpdColor::Red) > 0);
    }

    #[test]
    fn test_busy_while_executing_last_job() {
        let memory = panel(false);
        let service = service_for(&memory);
        let observing = ObservingPanel {
            inner: memory,
            service: &service,
            seen: Vec::new(),
        };
        let mut worker = RenderWorker::new(&service, observing);

        assert!(service.display_text("A", INK, false));
        assert!(service.clear());
        block_on(worker.drain());

        assert_eq!(
            worker.panel().seen,
            vec![(true, 1), (true, 0)],
            "Service should stay busy while the last job refreshes the panel"
        );
        assert!(!service.is_busy());
    }

    #[test]
    fn test_text_full_refresh_by_default() {
        let panel = panel(true);
        let service = service_for(&panel);
        let mut worker = RenderWorker::new(&service, panel);

        service.display_text("Hello", INK, false);
        block_on(worker.drain());
        assert_eq!(worker.panel().refreshes(), &[RefreshWindow::Full], "Partial updates start disabled");
    }

    #[test]
    fn test_text_partial_refresh_when_enabled() {
        let panel = panel(true);
        let service = service_for(&panel);
        service.set_partial_update_enabled(true);
        let mut worker = RenderWorker::new(&service, panel);

        service.display_text("Hello", INK, false);
        block_on(worker.drain());
        let expected = TextLayout::new("Hello", PANEL).update_area();
        assert_eq!(worker.panel().refreshes(), &[RefreshWindow::Partial(expected)]);

        service.display_text("Hello", INK, true);
        block_on(worker.drain());
        assert_eq!(worker.panel().refreshes()[1], RefreshWindow::Full, "force_full should skip partial refresh");
    }

    #[test]
    fn test_partial_refresh_keeps_outside_pixels() {
        let panel = panel(true);
        let service = service_for(&panel);
        service.set_partial_update_enabled(true);
        let mut worker = RenderWorker::new(&service, panel);

        service.display_page(Page::titled("Keep me"));
        block_on(worker.drain());
        let title_ink = worker.panel().frame().count(&Rectangle::new(Point::zero(), Size::new(PANEL_WIDTH, 30)), INK);
        assert!(title_ink > 0);

        service.display_text("Hi", INK, false);
        block_on(worker.drain());
        let after = worker.panel().frame().count(&Rectangle::new(Point::zero(), Size::new(PANEL_WIDTH, 30)), INK);
        assert_eq!(after, title_ink, "Partial refresh should not touch pixels outside its window");
    }

    #[test]
    fn test_partial_needs_panel_support() {
        let panel = panel(false);
        let service = service_for(&panel);
        service.set_partial_update_enabled(true);
        let mut worker = RenderWorker::new(&service, panel);

        service.display_text("Hello", INK, false);
        block_on(worker.drain());
        assert_eq!(worker.panel().refreshes(), &[RefreshWindow::Full]);
    }

    #[test]
    fn test_empty_text_ignored() {
        let panel = panel(false);
        let service = service_for(&panel);
        let mut worker = RenderWorker::new(&service, panel);

        service.display_text("", INK, false);
        assert_eq!(block_on(worker.drain()), 1);
        assert!(worker.panel().refreshes().is_empty(), "Empty text should not refresh the panel");
        assert_eq!(service.current_text(), "Hello API");
        assert!(!service.is_busy());
    }

    #[test]
    fn test_image_short_buffer_rejected() {
        let panel = panel(false);
        let service = service_for(&panel);
        let mut worker = RenderWorker::new(&service, panel).with_status(RecordingStatus::default());

        // 10 px wide needs 2 bytes per row: 6 bytes for 3 rows.
        assert!(service.display_image(10, 3, &[0xFF; 5], ImageFormat::Mono, INK, false));
        block_on(worker.drain());

        assert!(worker.panel().refreshes().is_empty(), "Rejected image should not touch the panel");
        assert_eq!(worker.panel().frame(), MemoryPanel::new(PANEL).frame());
        assert_eq!(worker.status().messages, vec!["Error: need 6 bytes, got 5"]);
        assert!(!service.is_busy());
    }

    #[test]
    fn test_image_error_status_not_cut() {
        let panel = panel(false);
        let service = service_for(&panel);
        let mut worker = RenderWorker::new(&service, panel).with_status(RecordingStatus::default());

        assert!(service.display_image(u32::MAX, u32::MAX, &[], ImageFormat::Mono, INK, false));
        block_on(worker.drain());

        let expected = ImageError::TooLarge {
            width: u32::MAX,
            height: u32::MAX,
        };
        assert_eq!(worker.status().messages, vec![format!("Error: {}", expected)], "Status should carry the whole error");
    }

    #[test]
    fn test_image_plane_overlap_rejected() {
        let panel = panel(false);
        let service = service_for(&panel);
        let mut worker = RenderWorker::new(&service, panel);

        service.display_image(8, 2, &[0x80, 0x00, 0x80, 0x00], ImageFormat::TriColor, INK, false);
        block_on(worker.drain());
        assert!(worker.panel().refreshes().is_empty());
        assert_eq!(worker.panel().frame(), MemoryPanel::new(PANEL).frame());
    }

    #[test]
    fn test_image_drawn_centered() {
        let panel = panel(false);
        let service = service_for(&panel);
        let mut worker = RenderWorker::new(&service, panel);

        service.display_image(8, 2, &[0xF0, 0x00, 0x00, 0x0F], ImageFormat::TriColor, INK, false);
        block_on(worker.drain());

        let frame = worker.panel().frame();
        assert_eq!(frame.pixel(Point::new(60, 147)), EpdColor::Black);
        assert_eq!(frame.pixel(Point::new(67, 148)), EpdColor::Red);
        assert_eq!(frame.count(&frame.bounding_box(), EpdColor::Black), 4);
        assert_eq!(worker.panel().refreshes(), &[RefreshWindow::Full]);
    }

    #[test]
    fn test_image_partial_window_is_image_area() {
        let panel = panel(true);
        let service = service_for(&panel);
        service.set_partial_update_enabled(true);
        let mut worker = RenderWorker::new(&service, panel);

        service.display_image(8, 2, &[0xFF, 0xFF], ImageFormat::Mono, EpdColor::Red, false);
        block_on(worker.drain());
        let area = Rectangle::new(Point::new(60, 147), Size::new(8, 2));
        assert_eq!(worker.panel().refreshes(), &[RefreshWindow::Partial(area)]);
        assert_eq!(worker.panel().frame().count(&area, EpdColor::Red), 16);
    }

    #[test]
    fn test_page_always_full_refresh() {
        let panel = panel(true);
        let service = service_for(&panel);
        service.set_partial_update_enabled(true);
        let mut worker = RenderWorker::new(&service, panel);

        service.display_page(Page::titled("Status").with_row("Up", "3d"));
        service.display_header("Only a title");
        block_on(worker.drain());
        assert_eq!(worker.panel().refreshes(), &[RefreshWindow::Full, RefreshWindow::Full]);
    }

    #[test]
    fn test_header_matches_title_page() {
        let panel = panel(false);
        let service = service_for(&panel);
        let mut worker = RenderWorker::new(&service, panel);
        service.display_header("News");
        block_on(worker.drain());

        let mut expected = MemoryPanel::new(PANEL);
        compose_page(&mut expected, &Page::titled("News"));
        assert_eq!(worker.panel().frame(), expected.frame());
    }

    #[test]
    fn test_clear_fills_background() {
        let panel = panel(false);
        let service = service_for(&panel);
        let mut worker = RenderWorker::new(&service, panel);

        service.display_text("Hello", INK, false);
        service.clear();
        block_on(worker.drain());
        let frame = worker.panel().frame();
        assert_eq!(frame.count(&frame.bounding_box(), BACKGROUND), (PANEL_WIDTH * PANEL_HEIGHT) as usize);
        assert_eq!(worker.panel().refreshes().len(), 2);
    }

    #[test]
    fn test_fifo_order() {
        let panel = panel(false);
        let service = service_for(&panel);
        let mut worker = RenderWorker::new(&service, panel);

        service.clear();
        service.display_text("Later", INK, false);
        block_on(worker.drain());
        let frame = worker.panel().frame();
        assert!(frame.count(&frame.bounding_box(), INK) > 0, "Text queued after clear should stay visible");
        assert_eq!(service.current_text(), "Later");
    }

    #[test]
    fn test_force_clear_sequence() {
        let panel = panel(false);
        let service = service_for(&panel);
        let mut worker = RenderWorker::new(&service, panel)
            .with_status(RecordingStatus::default())
            .with_force_clear_timing(instant());

        service.display_text("Ghost", INK, false);
        service.force_clear();
        block_on(worker.drain());

        // One refresh for the text, then four white/black pairs and a final white.
        assert_eq!(worker.panel().refreshes().len(), 1 + 9);
        assert!(worker.panel().refreshes().iter().all(|r| *r == RefreshWindow::Full));
        let frame = worker.panel().frame();
        assert_eq!(frame.count(&frame.bounding_box(), BACKGROUND), (PANEL_WIDTH * PANEL_HEIGHT) as usize);
        assert_eq!(
            worker.status().messages,
            vec!["Clearing 1/4", "Clearing 2/4", "Clearing 3/4", "Clearing 4/4", "Clear done"]
        );
    }

    #[test]
    fn test_date_shown_in_accent() {
        let panel = panel(false);
        let service = service_for(&panel);
        let mut worker = RenderWorker::new(&service, panel);

        service.display_date(1_700_000_000);
        block_on(worker.drain());
        assert_eq!(service.current_text(), "14/11/2023");
        assert_eq!(service.current_color(), ACCENT);
        let frame = worker.panel().frame();
        assert!(frame.count(&frame.bounding_box(), ACCENT) > 0);
        assert_eq!(frame.count(&frame.bounding_box(), INK), 0, "Date text should be drawn only in the accent color");
    }

    #[test]
    fn test_process_next_waits_for_job() {
        let panel = panel(false);
        let service = service_for(&panel);
        let mut worker = RenderWorker::new(&service, panel);

        service.display_text("One", INK, false);
        block_on(worker.process_next());
        assert!(!service.is_busy());
        assert_eq!(worker.panel().refreshes().len(), 1);
    }

    #[test]
    fn test_threaded_producers_then_worker() {
        let panel = panel(false);
        let service = service_for(&panel);

        std::thread::scope(|scope| {
            for n in 0..3 {
                let service = &service;
                scope.spawn(move || {
                    let text = format!("Producer {}", n);
                    service.display_text(&text, INK, false)
                });
            }
        });
        assert_eq!(service.pending_count(), 3);

        let mut worker = RenderWorker::new(&service, panel);
        assert_eq!(block_on(worker.drain()), 3);
        assert!(!service.is_busy());
        assert!(service.current_text().starts_with("Producer "));
    }

    #[test]
    fn test_padded_area_matches_text_update_area() {
        let layout = TextLayout::new("Hello", PANEL);
        assert_eq!(layout.update_area(), padded_area(layout.bounds(), PANEL));
    }
}
