//! WebScheduler - SchedulerPort over window timers and requestAnimationFrame
//!
//! All timers share one JS callback that receives the handle id as its
//! argument. Frame callbacks get no argument, but the browser runs them in
//! request order, so pending frames are kept in a queue and matched FIFO.

use std::collections::{HashMap, VecDeque};

use js_sys::Function;
use wasm_bindgen::JsValue;
use web_sys::Window;

use crate::application::ports::{FrameHandle, SchedulerPort, TimerHandle};

#[derive(Clone, Copy, Debug)]
struct BrowserTimer {
    js_id: i32,
    repeating: bool,
}

pub struct WebScheduler {
    window: Window,
    on_timer: Function,
    on_frame: Function,
    next_id: u64,
    timers: HashMap<TimerHandle, BrowserTimer>,
    frames: VecDeque<(FrameHandle, i32)>,
}

impl WebScheduler {
    /// `on_timer` is called with the handle id, `on_frame` with the
    /// high-resolution timestamp
    pub fn new(window: Window, on_timer: Function, on_frame: Function) -> Self {
        Self {
            window,
            on_timer,
            on_frame,
            next_id: 0,
            timers: HashMap::new(),
            frames: VecDeque::new(),
        }
    }

    /// Record that the browser fired timer `id`. Returns the handle to
    /// deliver, or `None` if it was cleared in the meantime.
    pub fn fired(&mut self, id: f64) -> Option<TimerHandle> {
        let handle = TimerHandle(id as u64);
        let timer = *self.timers.get(&handle)?;
        if !timer.repeating {
            self.timers.remove(&handle);
        }
        Some(handle)
    }

    /// The frame request the browser just answered
    pub fn next_frame(&mut self) -> Option<FrameHandle> {
        self.frames.pop_front().map(|(handle, _)| handle)
    }

    /// Cancel everything still scheduled, whoever owns it
    pub fn clear_all(&mut self) {
        let handles: Vec<TimerHandle> = self.timers.keys().copied().collect();
        for handle in handles {
            self.clear_timer(handle);
        }
        while let Some((_, js_id)) = self.frames.pop_front() {
            let _ = self.window.cancel_animation_frame(js_id);
        }
    }

    fn allocate(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn schedule(&mut self, delay_ms: u32, repeating: bool) -> TimerHandle {
        let handle = TimerHandle(self.allocate());
        let id = JsValue::from_f64(handle.0 as f64);
        let timeout = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        let scheduled = if repeating {
            self.window
                .set_interval_with_callback_and_timeout_and_arguments_1(&self.on_timer, timeout, &id)
        } else {
            self.window
                .set_timeout_with_callback_and_timeout_and_arguments_1(&self.on_timer, timeout, &id)
        };

        match scheduled {
            Ok(js_id) => {
                self.timers.insert(handle, BrowserTimer { js_id, repeating });
            }
            Err(e) => log!("WebScheduler: timer {} not scheduled: {:?}", handle.0, e),
        }
        handle
    }
}

impl SchedulerPort for WebScheduler {
    fn set_interval(&mut self, interval_ms: u32) -> TimerHandle {
        self.schedule(interval_ms, true)
    }

    fn set_timeout(&mut self, delay_ms: u32) -> TimerHandle {
        self.schedule(delay_ms, false)
    }

    fn clear_timer(&mut self, handle: TimerHandle) {
        let Some(timer) = self.timers.remove(&handle) else {
            return;
        };
        if timer.repeating {
            self.window.clear_interval_with_handle(timer.js_id);
        } else {
            self.window.clear_timeout_with_handle(timer.js_id);
        }
    }

    fn request_frame(&mut self) -> Option<FrameHandle> {
        match self.window.request_animation_frame(&self.on_frame) {
            Ok(js_id) => {
                let handle = FrameHandle(self.allocate());
                self.frames.push_back((handle, js_id));
                Some(handle)
            }
            Err(e) => {
                log!("WebScheduler: animation frame refused: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Some(pos) = self.frames.iter().position(|(h, _)| *h == handle) {
            if let Some((_, js_id)) = self.frames.remove(pos) {
                let _ = self.window.cancel_animation_frame(js_id);
            }
        }
    }
}
