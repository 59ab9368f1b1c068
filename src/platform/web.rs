//! Browser timers backed by `setInterval`

use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::{RoundTask, TaskHandle, TimerHost};

/// Receives task firings (set once the game is wrapped in `Rc<RefCell<_>>`)
pub type TaskSink = Rc<dyn Fn(RoundTask)>;

struct Interval {
    id: i32,
    // Kept alive for as long as the interval is armed
    _closure: Closure<dyn FnMut()>,
}

/// `TimerHost` over `window.setInterval` / `clearInterval`
#[derive(Default)]
pub struct BrowserTimers {
    sink: Option<TaskSink>,
    next_handle: u32,
    live: HashMap<TaskHandle, Interval>,
}

impl BrowserTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route firings to `sink`
    pub fn bind(&mut self, sink: impl Fn(RoundTask) + 'static) {
        self.sink = Some(Rc::new(sink));
    }
}

impl TimerHost for BrowserTimers {
    fn arm(&mut self, task: RoundTask, interval_ms: u32) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;

        let Some(sink) = self.sink.clone() else {
            log::warn!("Timer {task:?} armed before a sink was bound; it will never fire");
            return handle;
        };
        let Some(window) = web_sys::window() else {
            return handle;
        };

        let closure = Closure::<dyn FnMut()>::new(move || sink(task));
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            interval_ms.min(i32::MAX as u32) as i32,
        ) {
            Ok(id) => {
                self.live.insert(
                    handle,
                    Interval {
                        id,
                        _closure: closure,
                    },
                );
            }
            Err(e) => log::error!("setInterval failed for {task:?}: {e:?}"),
        }
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        if let Some(interval) = self.live.remove(&handle) {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(interval.id);
            }
        }
    }
}
