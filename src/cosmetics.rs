//! Page-wide decoration: the injected stylesheet and the notice banner.
//!
//! Nothing in the engine reads from here. The stylesheet only gives the marker
//! classes a look; the banner announces the tool and fades out on a timer.

#[cfg(test)]
#[path = "cosmetics_test.rs"]
mod cosmetics_test;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::config::{DragConfig, Markers};
use crate::error::HostError;

/// Class added to the banner when its fade starts.
#[must_use]
pub fn banner_hidden_class(markers: &Markers) -> String {
    format!("{}-hidden", markers.banner)
}

/// CSS for the hover, dragging, restricted and banner markers.
#[must_use]
pub fn stylesheet(config: &DragConfig) -> String {
    let m = &config.markers;
    let hidden = banner_hidden_class(m);
    let fade_s = f64::from(config.banner.fade_ms) / 1000.0;
    format!(
        ".{hover} {{ outline: 2px dashed #00ffff !important; outline-offset: -2px; }}\n\
         .{dragging} {{ box-shadow: 0 4px 8px rgba(0, 0, 0, 0.3) !important; opacity: 0.9 !important; transition: transform 0.05s ease; }}\n\
         .{restricted} {{ outline: 2px solid red !important; background: rgba(255, 0, 0, 0.1) !important; }}\n\
         .{banner} {{ position: fixed; top: 10px; left: 10px; background: #1e90ff; color: white; padding: 8px 12px; \
         border-radius: 4px; font-size: 14px; z-index: 10000; user-select: none; transition: opacity {fade_s}s ease; }}\n\
         .{banner}.{hidden} {{ opacity: 0; pointer-events: none; }}\n",
        hover = m.hover,
        dragging = m.dragging,
        restricted = m.restricted,
        banner = m.banner,
    )
}

/// Append the stylesheet to `<head>`.
///
/// # Errors
///
/// Returns `Js` if the element cannot be created or appended.
pub fn inject_stylesheet(document: &Document, config: &DragConfig) -> Result<(), HostError> {
    let style = document.create_element("style")?;
    style.set_text_content(Some(stylesheet(config).as_str()));
    match document.head() {
        Some(head) => head.append_child(&style)?,
        None => document.body().ok_or(HostError::NoBody)?.append_child(&style)?,
    };
    Ok(())
}

/// Show the notice banner and schedule its fade-out and removal from layout.
///
/// # Errors
///
/// Returns `NoBody` without a body, or `Js` if the banner cannot be inserted.
pub fn show_banner(document: &Document, config: &DragConfig) -> Result<(), HostError> {
    if !config.banner.enabled {
        return Ok(());
    }
    let body = document.body().ok_or(HostError::NoBody)?;
    let banner = document.create_element("div")?;
    banner.set_class_name(&config.markers.banner);
    banner.set_text_content(Some(config.banner.text.as_str()));
    body.append_child(&banner)?;

    let hidden = banner_hidden_class(&config.markers);
    let fade_ms = config.banner.fade_ms;
    Timeout::new(config.banner.visible_ms, move || {
        if let Err(err) = banner.class_list().add_1(&hidden) {
            log::warn!("banner fade failed: {err:?}");
        }
        Timeout::new(fade_ms, move || hide(&banner)).forget();
    })
    .forget();
    Ok(())
}

fn hide(banner: &Element) {
    let Some(html) = banner.dyn_ref::<HtmlElement>() else {
        return;
    };
    if let Err(err) = html.style().set_property("display", "none") {
        log::warn!("banner hide failed: {err:?}");
    }
}
