//! DOM host: the browser side of the engine.
//!
//! ARCHITECTURE
//! ============
//! `EngineCore` never sees a DOM node. This host measures elements into
//! snapshots, forwards pointer events, and applies the returned [`Action`]s to
//! the live document. Per-element hover and press listeners live for the
//! page's lifetime; the document-level move/release (and optional Escape)
//! listeners exist only while a session is open and are detached exactly once
//! when it ends. Detached closures are parked and dropped on the next press,
//! never from inside their own invocation.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Date;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, HtmlElement, KeyboardEvent, MouseEvent, Window};

use crate::config::DragConfig;
use crate::engine::{Action, EngineCore, Marker};
use crate::error::{ErrorCode, HostError};
use crate::geom::{Point, Rect, Viewport};
use crate::instrument::{Candidate, InstrumentReport, Instrumentor, Plan};
use crate::page::{ElementId, ElementKey, ElementSnapshot};

type MouseHandler = Closure<dyn FnMut(MouseEvent)>;
type KeyHandler = Closure<dyn FnMut(KeyboardEvent)>;

/// Document listeners owned by the open session.
struct SessionListeners {
    on_move: MouseHandler,
    on_release: MouseHandler,
    on_key: Option<KeyHandler>,
}

/// One instrumented element. Its index in `HostState::elements` is its key;
/// entries are only ever appended.
struct Registered {
    id: ElementId,
    element: Element,
}

struct HostState {
    core: EngineCore,
    window: Window,
    document: Document,
    elements: Vec<Registered>,
    listeners: Option<SessionListeners>,
    retired: Option<SessionListeners>,
}

/// Shared handle to the host; cloned into every listener.
#[derive(Clone)]
pub struct DomHost {
    state: Rc<RefCell<HostState>>,
}

impl DomHost {
    /// Instrument the current document and keep the host alive for the page's lifetime.
    ///
    /// # Errors
    ///
    /// Returns `NoWindow`/`NoDocument`/`NoBody` outside a loaded page, or `Js`
    /// if the element query fails.
    pub fn install(config: DragConfig) -> Result<InstrumentReport, HostError> {
        let window = web_sys::window().ok_or(HostError::NoWindow)?;
        let document = window.document().ok_or(HostError::NoDocument)?;
        if document.body().is_none() {
            return Err(HostError::NoBody);
        }

        if let Err(err) = crate::cosmetics::inject_stylesheet(&document, &config) {
            log::warn!("{}: stylesheet not injected: {err}", err.error_code());
        }
        if let Err(err) = crate::cosmetics::show_banner(&document, &config) {
            log::warn!("{}: banner not shown: {err}", err.error_code());
        }

        let host = Self {
            state: Rc::new(RefCell::new(HostState {
                core: EngineCore::new(config),
                window,
                document,
                elements: Vec::new(),
                listeners: None,
                retired: None,
            })),
        };
        let started_ms = Date::now();
        let report = host.instrument()?;
        let elapsed_ms = (Date::now() - started_ms).max(0.0);
        log::info!(
            "free-float ready: {} instrumented, {} skipped, {} ids assigned in {elapsed_ms:.1}ms",
            report.instrumented,
            report.skipped,
            report.assigned
        );
        Ok(report)
    }

    fn instrument(&self) -> Result<InstrumentReport, HostError> {
        let (config, document) = {
            let state = self.state.borrow();
            (state.core.config.clone(), state.document.clone())
        };
        let mut instrumentor = Instrumentor::new(&config);
        let nodes = document.query_selector_all(&instrumentor.selector())?;
        let mut report = InstrumentReport::default();

        for i in 0..nodes.length() {
            let Some(element) = nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok_or_log()) else {
                continue;
            };
            let tag = element.tag_name().to_ascii_lowercase();
            let existing = element.id();
            let classes = class_names(&element);
            let html = element.dyn_ref::<HtmlElement>().is_some();
            let plan = instrumentor.plan(Candidate { tag: &tag, id: &existing, classes: &classes, html });
            report.record(&plan);

            let Plan::Instrument { id, assign } = plan else {
                continue;
            };
            if assign {
                element.set_id(id.as_str());
            }
            // Registered before wiring, so a key is never handed out twice even
            // when some listeners fail to attach.
            let key = {
                let mut state = self.state.borrow_mut();
                state.elements.push(Registered { id: id.clone(), element: element.clone() });
                ElementKey(state.elements.len() - 1)
            };
            if let Err(err) = self.attach_element(&element, key, &config) {
                log::warn!("{}: could not instrument {id}: {err}", err.error_code());
            }
        }
        log::debug!("instrument pass issued {} ids", instrumentor.ids().issued());
        Ok(report)
    }

    /// Mark `element` grabbable and register its hover and press listeners.
    fn attach_element(&self, element: &Element, key: ElementKey, config: &DragConfig) -> Result<(), HostError> {
        set_styles(element, &[("cursor", "move".to_owned())]);
        element.set_attribute("draggable", "false")?;
        element.class_list().add_1(&config.markers.instrumented)?;

        let host = self.clone();
        let dragging_class = config.markers.dragging.clone();
        let hover_el = element.clone();
        let on_over: MouseHandler = Closure::new(move |_: MouseEvent| {
            let dragging = hover_el.class_list().contains(&dragging_class);
            host.with_state(|state| {
                let actions = state.core.hover_enter(key, dragging);
                state.apply_all(&actions);
            });
        });

        let host = self.clone();
        let on_out: MouseHandler = Closure::new(move |_: MouseEvent| {
            host.with_state(|state| {
                let actions = state.core.hover_leave(key);
                state.apply_all(&actions);
            });
        });

        let host = self.clone();
        let on_down: MouseHandler = Closure::new(move |event: MouseEvent| {
            event.prevent_default();
            event.stop_propagation();
            host.press(key, &event);
        });

        element.add_event_listener_with_callback("mouseover", on_over.as_ref().unchecked_ref())?;
        element.add_event_listener_with_callback("mouseout", on_out.as_ref().unchecked_ref())?;
        element.add_event_listener_with_callback("mousedown", on_down.as_ref().unchecked_ref())?;
        // Element listeners live as long as the page.
        on_over.forget();
        on_out.forget();
        on_down.forget();
        Ok(())
    }

    /// Run `f` against the state, skipping the event if it arrives re-entrantly.
    fn with_state(&self, f: impl FnOnce(&mut HostState)) {
        match self.state.try_borrow_mut() {
            Ok(mut state) => f(&mut state),
            Err(err) => log::warn!("event dropped, host busy: {err}"),
        }
    }

    fn press(&self, key: ElementKey, event: &MouseEvent) {
        // Whole pixels: `page_x`/`page_y` truncate sub-pixel pointer positions.
        let pointer = Point::new(f64::from(event.page_x()), f64::from(event.page_y()));
        self.with_state(|state| {
            state.retired = None;
            let viewport = state.viewport();
            let page: Vec<ElementSnapshot> = state
                .elements
                .iter()
                .enumerate()
                .map(|(i, r)| state.snapshot(ElementKey(i), r, &viewport))
                .collect();
            let Some(target) = page.get(key.0) else {
                log::warn!("press on unregistered element {key}");
                return;
            };
            match state.core.press(target, pointer, &page) {
                Ok(actions) => {
                    state.apply_all(&actions);
                    if let Err(err) = state.attach_session(self) {
                        log::warn!("{}: session listeners not attached: {err}", err.error_code());
                    }
                }
                Err(err) => log::debug!("{}: press ignored: {err}", err.error_code()),
            }
        });
    }

    fn pointer_move(&self, event: &MouseEvent) {
        // Truncated to whole pixels, as in `press`.
        let pointer = Point::new(f64::from(event.page_x()), f64::from(event.page_y()));
        self.with_state(|state| {
            let viewport = state.viewport();
            let zones = state.restricted_zones(&viewport);
            let actions = state.core.pointer_move(pointer, &viewport, &zones);
            state.apply_all(&actions);
        });
    }

    fn release(&self) {
        self.with_state(|state| {
            let viewport = state.viewport();
            let zones = state.restricted_zones(&viewport);
            match state.core.release(&zones) {
                Ok(actions) => state.apply_all(&actions),
                Err(err) => {
                    log::debug!("{}: release ignored: {err}", err.error_code());
                    state.detach_session();
                }
            }
        });
    }

    fn key_down(&self, event: &KeyboardEvent) {
        if event.key() != "Escape" {
            return;
        }
        self.with_state(|state| match state.core.cancel() {
            Ok(actions) => state.apply_all(&actions),
            Err(err) => log::debug!("{}: cancel ignored: {err}", err.error_code()),
        });
    }
}

impl HostState {
    fn viewport(&self) -> Viewport {
        let extent = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
            v.map_or(0.0, |v| v.as_f64().unwrap_or(0.0))
        };
        Viewport {
            width: extent(self.window.inner_width()),
            height: extent(self.window.inner_height()),
            scroll_x: self.window.scroll_x().unwrap_or(0.0),
            scroll_y: self.window.scroll_y().unwrap_or(0.0),
        }
    }

    fn snapshot(&self, key: ElementKey, registered: &Registered, viewport: &Viewport) -> ElementSnapshot {
        let markers = &self.core.config.markers;
        let element = &registered.element;
        let classes = element.class_list();
        ElementSnapshot {
            key,
            id: registered.id.clone(),
            tag: element.tag_name().to_ascii_lowercase(),
            rect: page_rect(element, viewport),
            child_count: element.child_element_count(),
            floating: classes.contains(&markers.floating),
            dragging: classes.contains(&markers.dragging),
        }
    }

    /// Measure every restricted zone now, in page coordinates.
    fn restricted_zones(&self, viewport: &Viewport) -> Vec<Rect> {
        let selector = format!(".{}", self.core.config.markers.restricted);
        let nodes = match self.document.query_selector_all(&selector) {
            Ok(nodes) => nodes,
            Err(err) => {
                log::warn!("zone query failed: {err:?}");
                return Vec::new();
            }
        };
        (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|n| n.dyn_into::<Element>().ok_or_log())
            .map(|el| page_rect(&el, viewport))
            .collect()
    }

    fn element(&self, key: ElementKey) -> Option<&Registered> {
        self.elements.get(key.0)
    }

    fn apply_all(&mut self, actions: &[Action]) {
        for action in actions {
            self.apply(action);
        }
    }

    fn apply(&mut self, action: &Action) {
        if let Action::SessionEnded { key, outcome } = action {
            log::debug!("session for {key} ended: {outcome:?}");
            self.detach_session();
            return;
        }
        let config = &self.core.config;
        let key = match action {
            Action::Float { key, .. }
            | Action::Reparent { key }
            | Action::SetMarker { key, .. }
            | Action::MoveTo { key, .. }
            | Action::SetForbidden { key, .. }
            | Action::SessionEnded { key, .. } => *key,
        };
        let Some(Registered { id, element }) = self.element(key) else {
            log::warn!("action for unknown element {key}");
            return;
        };

        match action {
            Action::Float { rect, z_index, .. } => set_styles(
                element,
                &[
                    ("position", "absolute".to_owned()),
                    ("left", px(rect.left)),
                    ("top", px(rect.top)),
                    ("width", px(rect.width)),
                    ("height", px(rect.height)),
                    ("margin", "0".to_owned()),
                    ("z-index", z_index.to_string()),
                    ("pointer-events", "auto".to_owned()),
                ],
            ),
            Action::Reparent { .. } => match self.document.body() {
                Some(body) => {
                    if let Err(err) = body.append_child(element) {
                        log::warn!("reparent of {id} failed: {err:?}");
                    }
                }
                None => log::warn!("reparent of {id} failed: no body"),
            },
            Action::SetMarker { marker, on, .. } => {
                let name = match marker {
                    Marker::Hover => &config.markers.hover,
                    Marker::Dragging => &config.markers.dragging,
                    Marker::Floating => &config.markers.floating,
                };
                let list = element.class_list();
                let result = if *on { list.add_1(name) } else { list.remove_1(name) };
                if let Err(err) = result {
                    log::warn!("class toggle on {id} failed: {err:?}");
                }
            }
            Action::MoveTo { position, .. } => {
                set_styles(element, &[("left", px(position.x)), ("top", px(position.y))]);
            }
            Action::SetForbidden { on, .. } => {
                let outline = if *on { config.forbidden_outline.clone() } else { String::new() };
                set_styles(element, &[("outline", outline)]);
            }
            Action::SessionEnded { .. } => {}
        }
    }

    fn attach_session(&mut self, host: &DomHost) -> Result<(), HostError> {
        let on_move_host = host.clone();
        let on_move: MouseHandler = Closure::new(move |event: MouseEvent| on_move_host.pointer_move(&event));
        let on_release_host = host.clone();
        let on_release: MouseHandler = Closure::new(move |_: MouseEvent| on_release_host.release());

        self.document
            .add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
        self.document
            .add_event_listener_with_callback("mouseup", on_release.as_ref().unchecked_ref())?;

        let on_key = if self.core.config.cancel_on_escape {
            let key_host = host.clone();
            let on_key: KeyHandler = Closure::new(move |event: KeyboardEvent| key_host.key_down(&event));
            self.document
                .add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())?;
            Some(on_key)
        } else {
            None
        };

        self.listeners = Some(SessionListeners { on_move, on_release, on_key });
        Ok(())
    }

    /// Detach the session's document listeners. Safe to call when none are attached.
    fn detach_session(&mut self) {
        let Some(listeners) = self.listeners.take() else {
            return;
        };
        let doc = &self.document;
        let mut result = doc.remove_event_listener_with_callback("mousemove", listeners.on_move.as_ref().unchecked_ref());
        result = result.and(doc.remove_event_listener_with_callback("mouseup", listeners.on_release.as_ref().unchecked_ref()));
        if let Some(on_key) = &listeners.on_key {
            result = result.and(doc.remove_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref()));
        }
        if let Err(err) = result {
            log::warn!("listener removal failed: {err:?}");
        }
        self.retired = Some(listeners);
    }
}

/// Log-and-discard for failed casts, where the element is simply skipped.
trait OkOrLog<T> {
    fn ok_or_log(self) -> Option<T>;
}

impl<T, E: std::fmt::Debug> OkOrLog<T> for Result<T, E> {
    fn ok_or_log(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(err) => {
                log::trace!("skipping non-element node: {err:?}");
                None
            }
        }
    }
}

fn class_names(element: &Element) -> Vec<String> {
    let list = element.class_list();
    (0..list.length()).filter_map(|i| list.item(i)).collect()
}

fn page_rect(element: &Element, viewport: &Viewport) -> Rect {
    let r = element.get_bounding_client_rect();
    viewport.client_to_page(Rect::new(r.left(), r.top(), r.width(), r.height()))
}

fn px(value: f64) -> String {
    format!("{value}px")
}

/// Set inline style properties. Elements without an inline style (non-HTML) are skipped.
fn set_styles(element: &Element, props: &[(&str, String)]) {
    let Some(html) = element.dyn_ref::<HtmlElement>() else {
        log::debug!("{} has no inline style", element.tag_name());
        return;
    };
    let style = html.style();
    for (name, value) in props {
        if let Err(err) = style.set_property(name, value) {
            log::warn!("style {name} failed: {err:?}");
        }
    }
}
