//! Browser host - runs the storefront against the live DOM
//!
//! Built with the `web` feature for `wasm32-unknown-unknown`. The JS side
//! calls `startStorefront` once the script loads:
//!
//! ```javascript
//! import init, { startStorefront } from './vitrine.js';
//!
//! await init();
//! const page = startStorefront(null, null);
//! // later, e.g. before a client-side navigation
//! page.dispose();
//! ```
//!
//! One DOM listener is attached per event kind the page binds: window
//! events on `window`, everything else on `document` (capture phase for
//! the non-bubbling mouseenter/mouseleave). The page routes each event to
//! its widgets itself.

mod document;
mod images;
mod scheduler;

pub use document::WebDocument;
pub use images::WebImages;
pub use scheduler::WebScheduler;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::Function;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, KeyboardEvent, TouchEvent, Window};

use crate::adapters::controllers::{DispatchOutcome, EventKind, PageEvent, Storefront};
use crate::application::ports::NodeId;
use crate::domain::entities::Catalog;
use crate::domain::value_objects::{Key, Point, Viewport};
use crate::shared::config::SiteConfig;
use crate::widget::Surface;

/// Install the panic hook
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Mirror the page log to the devtools console
#[wasm_bindgen(js_name = enableLogging)]
pub fn enable_logging() {
    crate::log::init_console();
}

struct Listener {
    target: EventTarget,
    kind: EventKind,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn capture(&self) -> bool {
        !self.kind.bubbles()
    }
}

struct Runtime {
    window: Window,
    document: WebDocument,
    scheduler: WebScheduler,
    images: WebImages,
    storefront: Option<Storefront>,
    listeners: Vec<Listener>,
    _on_timer: Closure<dyn FnMut(f64)>,
    _on_frame: Closure<dyn FnMut(f64)>,
}

impl Runtime {
    fn dispatch(&mut self, event: PageEvent) -> DispatchOutcome {
        let Some(storefront) = self.storefront.as_mut() else {
            return DispatchOutcome::default();
        };
        let mut cx = Surface::new(&mut self.document, &mut self.scheduler, &mut self.images);
        storefront.dispatch(&mut cx, &event)
    }

    fn target(&mut self, event: &Event) -> Option<NodeId> {
        let element = event.target()?.dyn_into::<Element>().ok()?;
        Some(self.document.intern(element))
    }

    fn touch_point(event: &Event) -> Option<Point> {
        let touch = event.dyn_ref::<TouchEvent>()?.changed_touches().get(0)?;
        Some(Point::new(touch.screen_x() as f32, touch.screen_y() as f32))
    }

    /// Read what the page needs out of a DOM event
    fn translate(&mut self, kind: EventKind, event: &Event) -> Option<PageEvent> {
        Some(match kind {
            EventKind::Click => PageEvent::Click {
                target: self.target(event)?,
            },
            EventKind::KeyDown => PageEvent::KeyDown {
                key: Key::from_dom(&event.dyn_ref::<KeyboardEvent>()?.key()),
            },
            EventKind::TouchStart => PageEvent::TouchStart {
                point: Self::touch_point(event)?,
                target: self.target(event)?,
            },
            EventKind::TouchEnd => PageEvent::TouchEnd {
                point: Self::touch_point(event)?,
                target: self.target(event)?,
            },
            EventKind::MouseEnter => PageEvent::MouseEnter {
                target: self.target(event)?,
            },
            EventKind::MouseLeave => PageEvent::MouseLeave {
                target: self.target(event)?,
            },
            EventKind::Submit => PageEvent::Submit {
                target: self.target(event)?,
            },
            EventKind::Scroll => PageEvent::Scroll {
                scroll_y: self.window.scroll_y().unwrap_or(0.0) as f32,
            },
            EventKind::Resize => PageEvent::Resize(viewport(&self.window)),
            EventKind::VisibilityChange => PageEvent::VisibilityChange {
                hidden: self.document.dom().hidden(),
            },
            EventKind::Load => PageEvent::Load,
        })
    }

    fn detach(&mut self) {
        for listener in self.listeners.drain(..) {
            let _ = listener.target.remove_event_listener_with_callback_and_bool(
                listener.kind.dom_name(),
                listener.callback.as_ref().unchecked_ref(),
                listener.capture(),
            );
        }
    }

    fn dispose(&mut self) {
        self.detach();
        if let Some(storefront) = self.storefront.as_mut() {
            let mut cx = Surface::new(&mut self.document, &mut self.scheduler, &mut self.images);
            storefront.dispose(&mut cx);
        }
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        // Listeners and timers must not outlive the closures they call
        self.dispose();
        self.scheduler.clear_all();
    }
}

fn viewport(window: &Window) -> Viewport {
    let size = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
    Viewport::new(size(window.inner_width()), size(window.inner_height()))
}

fn with_runtime(weak: &Weak<RefCell<Runtime>>, f: impl FnOnce(&mut Runtime)) {
    let Some(runtime) = weak.upgrade() else {
        return;
    };
    match runtime.try_borrow_mut() {
        Ok(mut guard) => f(&mut *guard),
        Err(_) => log!("Runtime: re-entrant callback dropped"),
    };
}

fn js_error(message: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&message.to_string()).into()
}

/// Handle to the running page
#[wasm_bindgen]
pub struct StorefrontHandle {
    runtime: Rc<RefCell<Runtime>>,
}

#[wasm_bindgen]
impl StorefrontHandle {
    /// Stop every timer, remove the listeners and undo the campaign track
    pub fn dispose(&self) {
        match self.runtime.try_borrow_mut() {
            Ok(mut runtime) => runtime.dispose(),
            Err(_) => log!("StorefrontHandle: dispose while dispatching ignored"),
        }
    }

    /// Number of bindings the page registered
    #[wasm_bindgen(js_name = bindingCount)]
    pub fn binding_count(&self) -> usize {
        self.runtime
            .borrow()
            .storefront
            .as_ref()
            .map_or(0, |s| s.bindings().len())
    }
}

/// Mount the storefront on the current document.
///
/// `config_json` overrides the site settings, `catalog_json` replaces the
/// built-in product tables; pass `null` for the defaults.
#[wasm_bindgen(js_name = startStorefront)]
pub fn start_storefront(
    config_json: Option<String>,
    catalog_json: Option<String>,
) -> Result<StorefrontHandle, JsValue> {
    let config = match config_json {
        Some(json) => SiteConfig::from_json_str(&json).map_err(js_error)?,
        None => SiteConfig::default(),
    };
    let catalog = match catalog_json {
        Some(json) => Catalog::from_json_str(&json).map_err(js_error)?,
        None => Catalog::builtin(),
    };

    let window = web_sys::window().ok_or_else(|| js_error("no window"))?;
    let dom = window.document().ok_or_else(|| js_error("no document"))?;

    let runtime = Rc::new_cyclic(|weak: &Weak<RefCell<Runtime>>| {
        let timer_weak = weak.clone();
        let on_timer = Closure::<dyn FnMut(f64)>::new(move |id: f64| {
            with_runtime(&timer_weak, |runtime| {
                if let Some(handle) = runtime.scheduler.fired(id) {
                    runtime.dispatch(PageEvent::TimerFired(handle));
                }
            });
        });
        let frame_weak = weak.clone();
        let on_frame = Closure::<dyn FnMut(f64)>::new(move |_timestamp: f64| {
            with_runtime(&frame_weak, |runtime| {
                if let Some(handle) = runtime.scheduler.next_frame() {
                    runtime.dispatch(PageEvent::AnimationFrame(handle));
                }
            });
        });

        let scheduler = WebScheduler::new(
            window.clone(),
            on_timer.as_ref().unchecked_ref::<Function>().clone(),
            on_frame.as_ref().unchecked_ref::<Function>().clone(),
        );
        RefCell::new(Runtime {
            window: window.clone(),
            document: WebDocument::new(window.clone(), dom.clone()),
            scheduler,
            images: WebImages::new(),
            storefront: None,
            listeners: Vec::new(),
            _on_timer: on_timer,
            _on_frame: on_frame,
        })
    });

    let kinds = {
        let mut guard = runtime.borrow_mut();
        let rt = &mut *guard;
        let mut cx = Surface::new(&mut rt.document, &mut rt.scheduler, &mut rt.images);
        let storefront =
            Storefront::mount(&mut cx, &config, catalog, viewport(&window)).map_err(js_error)?;
        let kinds = storefront.bindings().kinds();
        rt.storefront = Some(storefront);
        kinds
    };

    for kind in kinds {
        let target: EventTarget = if kind.is_window_event() {
            window.clone().into()
        } else {
            dom.clone().into()
        };
        let weak = Rc::downgrade(&runtime);
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            with_runtime(&weak, |runtime| {
                let Some(page_event) = runtime.translate(kind, &event) else {
                    return;
                };
                let outcome = runtime.dispatch(page_event);
                if outcome.default_prevented {
                    event.prevent_default();
                }
                if outcome.propagation_stopped {
                    event.stop_propagation();
                }
            });
        });

        let listener = Listener {
            target,
            kind,
            callback,
        };
        if let Err(e) = listener.target.add_event_listener_with_callback_and_bool(
            kind.dom_name(),
            listener.callback.as_ref().unchecked_ref(),
            listener.capture(),
        ) {
            log!("startStorefront: cannot listen for {}: {:?}", kind.dom_name(), e);
            continue;
        }
        runtime.borrow_mut().listeners.push(listener);
    }

    // The script may run after the load event has already fired
    if dom.ready_state() == "complete" {
        runtime.borrow_mut().dispatch(PageEvent::Load);
    }

    log!("startStorefront: mounted");
    Ok(StorefrontHandle { runtime })
}
