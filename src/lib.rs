//! Drag-anything layout testing tool for already-rendered web pages.
//!
//! This crate is compiled to WebAssembly and injected into an arbitrary page.
//! Every element becomes grabbable; on press it is converted to free-floating
//! absolute positioning and follows the pointer, clamped to the viewport and
//! snapped to nearby edges of other elements and containers. Elements marked
//! as restricted zones veto drops: releasing inside one snaps the element back.
//! Nothing is persisted.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Drag state machine ([`engine::EngineCore`]) and the [`engine::Action`]s it emits |
//! | [`session`] | One drag: frozen snapshot and per-move placement |
//! | [`snap`] | Viewport clamping and edge snapping |
//! | [`zone`] | Restricted-zone containment |
//! | [`instrument`] | Which elements are instrumented and their identifiers |
//! | [`page`] | Element identifiers and geometry snapshots |
//! | [`geom`] | Points, boxes, viewport coordinate conversion |
//! | [`config`] | Tool configuration |
//! | [`error`] | Error types |
//! | [`dom`] | Browser host wiring the engine to the live document |
//! | [`cosmetics`] | Injected stylesheet and notice banner |
//! | [`consts`] | Default thresholds and names |

pub mod config;
pub mod consts;
pub mod cosmetics;
pub mod dom;
pub mod engine;
pub mod error;
pub mod geom;
pub mod instrument;
pub mod page;
pub mod session;
pub mod snap;
pub mod zone;

use wasm_bindgen::prelude::*;

use crate::config::DragConfig;
use crate::error::HostError;

/// Instrument the current page.
///
/// `config_json` optionally overrides any subset of [`DragConfig`] fields.
///
/// # Errors
///
/// Rejects invalid configuration, or a page without a window, document or body.
#[wasm_bindgen]
pub fn install(config_json: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let config = match config_json {
        Some(json) => DragConfig::from_json(&json).map_err(HostError::from)?,
        None => DragConfig::default(),
    };
    let level = config.level().map_err(HostError::from)?;
    if console_log::init_with_level(level).is_err() {
        log::debug!("logger already initialised");
    }

    dom::DomHost::install(config)?;
    Ok(())
}
