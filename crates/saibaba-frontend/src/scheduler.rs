//! [`Scheduler`] over browser timers and animation frames.

use std::time::Duration;

use gloo_timers::callback::{Interval, Timeout};
use saibaba_interactions::dom::{DomError, Scheduler};
use wasm_bindgen::{JsCast, prelude::Closure};
use web_sys::Window;

pub struct BrowserScheduler {
    window: Window,
}

impl BrowserScheduler {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

fn millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

impl Scheduler for BrowserScheduler {
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) {
        Timeout::new(millis(delay), callback).forget();
    }

    fn set_interval(&self, period: Duration, callback: Box<dyn FnMut()>) {
        Interval::new(millis(period), callback).forget();
    }

    fn request_animation_frame(&self, callback: Box<dyn FnOnce()>) -> Result<(), DomError> {
        let frame = Closure::once_into_js(move || callback());
        self.window
            .request_animation_frame(frame.unchecked_ref())
            .map(drop)
            .map_err(|err| DomError::FrameRejected(format!("{err:?}")))
    }
}
