use chart::encoding::LegendSpec;
use wasm_bindgen::JsValue;
use web_sys::Document;

use crate::dom;

const LEGEND_WIDTH: f64 = 250.0;
const LEGEND_HEIGHT: f64 = 20.0;

/// Renders a gradient legend into the container with the given class.
pub fn render(document: &Document, container_class: &str, spec: &LegendSpec) -> Result<(), JsValue> {
    let container = document
        .query_selector(&format!(".{container_class}"))?
        .ok_or_else(|| JsValue::from_str(&format!("missing legend container .{container_class}")))?;
    container.set_inner_html("");

    let svg = dom::svg_element(document, "svg")?;
    dom::set_attrs(
        &svg,
        &[("width", &LEGEND_WIDTH.to_string()), ("height", "50")],
    )?;

    // Gradient ids are per-container so legends don't cross-reference.
    let gradient_id = format!("legend-gradient-{container_class}");
    let defs = dom::svg_element(document, "defs")?;
    let gradient = dom::svg_element(document, "linearGradient")?;
    dom::set_attrs(
        &gradient,
        &[
            ("id", &gradient_id),
            ("x1", "0%"),
            ("y1", "0%"),
            ("x2", "100%"),
            ("y2", "0%"),
        ],
    )?;
    for (offset, color) in &spec.stops {
        let stop = dom::svg_element(document, "stop")?;
        dom::set_attrs(
            &stop,
            &[
                ("offset", &format!("{}%", offset * 100.0)),
                ("stop-color", &color.hex()),
            ],
        )?;
        gradient.append_child(&stop)?;
    }
    defs.append_child(&gradient)?;
    svg.append_child(&defs)?;

    let bar = dom::svg_element(document, "rect")?;
    dom::set_attrs(
        &bar,
        &[
            ("x", "0"),
            ("y", "0"),
            ("width", &LEGEND_WIDTH.to_string()),
            ("height", &LEGEND_HEIGHT.to_string()),
            ("rx", "4"),
            ("fill", &format!("url(#{gradient_id})")),
        ],
    )?;
    svg.append_child(&bar)?;

    let labels = [
        (0.0, "start", spec.min_label.as_str()),
        (LEGEND_WIDTH, "end", spec.max_label.as_str()),
    ];
    for (x, anchor, text) in labels {
        let label = dom::svg_element(document, "text")?;
        dom::set_attrs(
            &label,
            &[
                ("x", &x.to_string()),
                ("y", &(LEGEND_HEIGHT + 16.0).to_string()),
                ("text-anchor", anchor),
                ("font-size", "12px"),
            ],
        )?;
        label.set_text_content(Some(text));
        svg.append_child(&label)?;
    }

    container.append_child(&svg)?;
    Ok(())
}
