use crate::models::channel::StillFrame;
use crate::traits::modal_filter::{DialogEvent, FilterOutcome, ModalEventFilter};
use crate::traits::window_toolkit::{WindowId, WindowToolkit};

/// Keeps the monitor window painted while a settings dialog is modal.
///
/// The engine is paused behind the dialog, so monitor repaints use the
/// still frame grabbed just before the dialog opened. Updates for other
/// windows and idle ticks are forwarded to the toolkit but never marked
/// handled, so default dialog processing continues.
pub struct MonitorRefreshFilter<'a, T: WindowToolkit> {
    toolkit: &'a mut T,
    monitor: WindowId,
    still: Option<StillFrame>,
}

impl<'a, T: WindowToolkit> MonitorRefreshFilter<'a, T> {
    pub fn new(toolkit: &'a mut T, monitor: WindowId, still: Option<StillFrame>) -> Self {
        Self {
            toolkit,
            monitor,
            still,
        }
    }
}

impl<T: WindowToolkit> ModalEventFilter for MonitorRefreshFilter<'_, T> {
    fn filter_event(&mut self, event: &DialogEvent) -> FilterOutcome {
        match event {
            DialogEvent::WindowUpdate(window) if *window == self.monitor => {
                if let Some(frame) = &self.still {
                    self.toolkit.draw_still(self.monitor, frame);
                }
                self.toolkit.acknowledge_update(self.monitor);
                FilterOutcome::Handled
            }
            DialogEvent::WindowUpdate(window) => {
                self.toolkit.handle_window_update(*window);
                FilterOutcome::Pass
            }
            DialogEvent::IdleTick => {
                if self.toolkit.app_in_foreground() {
                    self.toolkit.idle_windows();
                }
                FilterOutcome::Pass
            }
            DialogEvent::Other => FilterOutcome::Pass,
        }
    }
}
