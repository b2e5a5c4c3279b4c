use std::cell::RefCell;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

use crate::dom;

// Single shared floating panel, created on first use and reused by every
// hover target.
thread_local! {
    static TOOLTIP: RefCell<Option<HtmlElement>> = const { RefCell::new(None) };
}

const PANEL_STYLE: &[(&str, &str)] = &[
    ("position", "absolute"),
    ("padding", "12px"),
    ("background", "rgba(15, 23, 42, 0.95)"),
    ("color", "white"),
    ("border-radius", "8px"),
    ("pointer-events", "none"),
    ("font-size", "14px"),
    ("z-index", "1000"),
    ("max-width", "200px"),
    ("box-shadow", "0 4px 6px rgba(0, 0, 0, 0.3)"),
];

fn ensure() -> Result<HtmlElement, JsValue> {
    if let Some(el) = TOOLTIP.with(|t| t.borrow().clone()) {
        return Ok(el);
    }

    let document = dom::document()?;
    let el: HtmlElement = document.create_element("div")?.dyn_into()?;
    let style = el.style();
    for (key, value) in PANEL_STYLE {
        style.set_property(key, value)?;
    }
    style.set_property("display", "none")?;
    document
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?
        .append_child(&el)?;

    TOOLTIP.with(|t| *t.borrow_mut() = Some(el.clone()));
    Ok(el)
}

fn place(el: &HtmlElement, page_x: i32, page_y: i32) -> Result<(), JsValue> {
    let style = el.style();
    style.set_property("left", &format!("{}px", page_x + 10))?;
    style.set_property("top", &format!("{}px", page_y - 10))?;
    Ok(())
}

pub fn show(page_x: i32, page_y: i32, html: &str) -> Result<(), JsValue> {
    let el = ensure()?;
    el.set_inner_html(html);
    el.style().set_property("display", "block")?;
    place(&el, page_x, page_y)
}

/// Repositions the panel if it exists; a no-op before first show.
pub fn move_to(page_x: i32, page_y: i32) {
    TOOLTIP.with(|t| {
        if let Some(el) = t.borrow().as_ref() {
            let _ = place(el, page_x, page_y);
        }
    });
}

pub fn hide() {
    TOOLTIP.with(|t| {
        if let Some(el) = t.borrow().as_ref() {
            let _ = el.style().set_property("display", "none");
        }
    });
}
