use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::JsValue;
use web_sys::{Document, Element, MouseEvent};

use chart::metric::Metric;
use chart::regression::fit_access_on_log_density;
use chart::selection::{DOT_HOVER, dot_style, label_opacity};
use chart::table::RegionTable;
use chart::ticks::{LOG_DENSITY_TICKS, linear_ticks};
use foundation::format::group_thousands;
use foundation::ids::RegionCode;
use foundation::scale::{LinearScale, LogScale};

use crate::{SharedHub, dom, tooltip};

const MARGIN_TOP: f64 = 40.0;
const MARGIN_RIGHT: f64 = 120.0;
const MARGIN_BOTTOM: f64 = 60.0;
const MARGIN_LEFT: f64 = 60.0;
const INNER_WIDTH: f64 = 900.0 - MARGIN_LEFT - MARGIN_RIGHT;
const INNER_HEIGHT: f64 = 500.0 - MARGIN_TOP - MARGIN_BOTTOM;

const AXIS_COLOR: &str = "#475569";
const GRID_COLOR: &str = "#0f172a";

/// The density-vs-access scatter: dots and labels it owns plus the
/// listeners keeping their event closures alive.
pub struct ScatterView {
    dots: Vec<(RegionCode, Element)>,
    labels: Vec<(RegionCode, Element)>,
    _listeners: Vec<Closure<dyn FnMut(MouseEvent)>>,
}

impl ScatterView {
    pub fn build(
        document: &Document,
        container_id: &str,
        table: &RegionTable,
        hub: &SharedHub,
    ) -> Result<Rc<ScatterView>, JsValue> {
        let container = dom::require_element(document, container_id)?;
        container.set_inner_html("");

        let svg = dom::svg_element(document, "svg")?;
        dom::set_attrs(
            &svg,
            &[
                ("width", "100%"),
                ("height", "100%"),
                ("viewBox", "0 0 900 500"),
                ("preserveAspectRatio", "xMidYMid meet"),
            ],
        )?;
        container.append_child(&svg)?;

        let group = dom::svg_element(document, "g")?;
        group.set_attribute(
            "transform",
            &format!("translate({MARGIN_LEFT},{MARGIN_TOP})"),
        )?;
        svg.append_child(&group)?;

        let (Some(density_extent), Some(access_extent)) = (
            table.extent(Metric::Density),
            table.extent(Metric::Access),
        ) else {
            // Nothing to plot; leave the empty frame in place.
            return Ok(Rc::new(ScatterView {
                dots: Vec::new(),
                labels: Vec::new(),
                _listeners: Vec::new(),
            }));
        };

        // Log x padded ±20%, linear y padded ±2 points.
        let x = LogScale::new(
            (density_extent.0 * 0.8, density_extent.1 * 1.2),
            (0.0, INNER_WIDTH),
        );
        let y = LinearScale::new(
            (access_extent.0 - 2.0, access_extent.1 + 2.0),
            (INNER_HEIGHT, 0.0),
        );

        let y_ticks = linear_ticks(y.domain, 10);
        let x_ticks: Vec<f64> = LOG_DENSITY_TICKS
            .iter()
            .copied()
            .filter(|t| *t >= x.domain.0 && *t <= x.domain.1)
            .collect();

        draw_grid(document, &group, &x, &y, &x_ticks, &y_ticks)?;
        draw_trend(document, &group, table, &x, &y)?;
        draw_axes(document, &group, &x, &y, &x_ticks, &y_ticks)?;
        draw_chrome(document, &group)?;

        let mut dots = Vec::with_capacity(table.len());
        let mut labels = Vec::with_capacity(table.len());
        let mut listeners: Vec<Closure<dyn FnMut(MouseEvent)>> = Vec::new();

        let on_move = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            tooltip::move_to(event.page_x(), event.page_y());
        });

        let selection = hub.borrow().current();
        for record in table.iter() {
            let code = record.code;
            let cx = x.apply(record.density);
            let cy = y.apply(record.access);

            let style = dot_style(code, selection);
            let dot = dom::svg_element(document, "circle")?;
            dom::set_attrs(
                &dot,
                &[
                    ("cx", &format!("{cx:.2}")),
                    ("cy", &format!("{cy:.2}")),
                    ("r", &style.radius.to_string()),
                    ("fill", &style.fill.hex()),
                    ("stroke", "#1e40af"),
                    ("stroke-width", "1.5"),
                    ("opacity", &style.opacity.to_string()),
                    ("cursor", "pointer"),
                ],
            )?;

            let label = dom::svg_element(document, "text")?;
            dom::set_attrs(
                &label,
                &[
                    ("x", &format!("{:.2}", cx + 10.0)),
                    ("y", &format!("{:.2}", cy + 4.0)),
                    ("font-size", "11px"),
                    ("font-weight", "600"),
                    ("fill", "#1e293b"),
                    ("opacity", &label_opacity(code, selection).to_string()),
                    ("pointer-events", "none"),
                ],
            )?;
            label.set_text_content(Some(code.as_str()));

            let tooltip_html = format!(
                "<strong>{}</strong><br/>Density: {}/km²<br/>Access: {:.1}%",
                record.name,
                record.density.round() as i64,
                record.access
            );

            let on_over = {
                let dot = dot.clone();
                let label = label.clone();
                Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
                    let _ = dot.set_attribute("r", &DOT_HOVER.radius.to_string());
                    let _ = dot.set_attribute("fill", &DOT_HOVER.fill.hex());
                    let _ = dot.set_attribute("opacity", &DOT_HOVER.opacity.to_string());
                    let _ = label.set_attribute("opacity", "1");
                    let _ = tooltip::show(event.page_x(), event.page_y(), &tooltip_html);
                })
            };

            let on_out = {
                let dot = dot.clone();
                let label = label.clone();
                let hub = Rc::clone(hub);
                Closure::<dyn FnMut(MouseEvent)>::new(move |_event: MouseEvent| {
                    // Selection styling wins over the hover revert.
                    let selection = hub.borrow().current();
                    let style = dot_style(code, selection);
                    let _ = dot.set_attribute("r", &style.radius.to_string());
                    let _ = dot.set_attribute("fill", &style.fill.hex());
                    let _ = dot.set_attribute("opacity", &style.opacity.to_string());
                    let _ = label.set_attribute("opacity", &label_opacity(code, selection).to_string());
                    tooltip::hide();
                })
            };

            let on_click = {
                let hub = Rc::clone(hub);
                Closure::<dyn FnMut(MouseEvent)>::new(move |_event: MouseEvent| {
                    hub.borrow_mut().toggle(code);
                })
            };

            dot.add_event_listener_with_callback("mouseover", on_over.as_ref().unchecked_ref())?;
            dot.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
            dot.add_event_listener_with_callback("mouseout", on_out.as_ref().unchecked_ref())?;
            dot.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
            listeners.push(on_over);
            listeners.push(on_out);
            listeners.push(on_click);

            group.append_child(&dot)?;
            group.append_child(&label)?;
            dots.push((code, dot));
            labels.push((code, label));
        }
        listeners.push(on_move);

        Ok(Rc::new(ScatterView {
            dots,
            labels,
            _listeners: listeners,
        }))
    }

    /// Restyles dots and labels for the new selection.
    pub fn update(&self, selection: Option<RegionCode>) {
        for (code, dot) in &self.dots {
            let style = dot_style(*code, selection);
            let _ = dot.set_attribute("r", &style.radius.to_string());
            let _ = dot.set_attribute("fill", &style.fill.hex());
            let _ = dot.set_attribute("opacity", &style.opacity.to_string());
        }
        for (code, label) in &self.labels {
            let _ = label.set_attribute("opacity", &label_opacity(*code, selection).to_string());
        }
    }
}

fn line(
    document: &Document,
    parent: &Element,
    (x1, y1): (f64, f64),
    (x2, y2): (f64, f64),
    attrs: &[(&str, &str)],
) -> Result<(), JsValue> {
    let el = dom::svg_element(document, "line")?;
    dom::set_attrs(
        &el,
        &[
            ("x1", &format!("{x1:.2}")),
            ("y1", &format!("{y1:.2}")),
            ("x2", &format!("{x2:.2}")),
            ("y2", &format!("{y2:.2}")),
        ],
    )?;
    dom::set_attrs(&el, attrs)?;
    parent.append_child(&el)?;
    Ok(())
}

fn text(
    document: &Document,
    parent: &Element,
    content: &str,
    attrs: &[(&str, &str)],
) -> Result<(), JsValue> {
    let el = dom::svg_element(document, "text")?;
    dom::set_attrs(&el, attrs)?;
    el.set_text_content(Some(content));
    parent.append_child(&el)?;
    Ok(())
}

fn draw_grid(
    document: &Document,
    group: &Element,
    x: &LogScale,
    y: &LinearScale,
    x_ticks: &[f64],
    y_ticks: &[f64],
) -> Result<(), JsValue> {
    let style: &[(&str, &str)] = &[("stroke", GRID_COLOR), ("opacity", "0.1")];
    for tick in y_ticks {
        let py = y.apply(*tick);
        line(document, group, (0.0, py), (INNER_WIDTH, py), style)?;
    }
    for tick in x_ticks {
        let px = x.apply(*tick);
        line(document, group, (px, 0.0), (px, INNER_HEIGHT), style)?;
    }
    Ok(())
}

fn draw_trend(
    document: &Document,
    group: &Element,
    table: &RegionTable,
    x: &LogScale,
    y: &LinearScale,
) -> Result<(), JsValue> {
    let Some(trend) = fit_access_on_log_density(table.iter()) else {
        return Ok(());
    };
    let Some((d_min, d_max)) = table.extent(Metric::Density) else {
        return Ok(());
    };

    // Dashed fit across the observed density range.
    let path = dom::svg_element(document, "path")?;
    let d = format!(
        "M{:.2},{:.2}L{:.2},{:.2}",
        x.apply(d_min),
        y.apply(trend.value_at(d_min)),
        x.apply(d_max),
        y.apply(trend.value_at(d_max)),
    );
    dom::set_attrs(
        &path,
        &[
            ("d", &d),
            ("fill", "none"),
            ("stroke", "#94a3b8"),
            ("stroke-width", "2"),
            ("stroke-dasharray", "5,5"),
        ],
    )?;
    group.append_child(&path)?;
    Ok(())
}

fn draw_axes(
    document: &Document,
    group: &Element,
    x: &LogScale,
    y: &LinearScale,
    x_ticks: &[f64],
    y_ticks: &[f64],
) -> Result<(), JsValue> {
    let axis_style: &[(&str, &str)] = &[("stroke", AXIS_COLOR)];

    line(
        document,
        group,
        (0.0, INNER_HEIGHT),
        (INNER_WIDTH, INNER_HEIGHT),
        axis_style,
    )?;
    for tick in x_ticks {
        let px = x.apply(*tick);
        line(
            document,
            group,
            (px, INNER_HEIGHT),
            (px, INNER_HEIGHT + 6.0),
            axis_style,
        )?;
        text(
            document,
            group,
            &group_thousands(*tick as u64),
            &[
                ("x", &format!("{px:.2}")),
                ("y", &format!("{:.2}", INNER_HEIGHT + 20.0)),
                ("text-anchor", "middle"),
                ("font-size", "12px"),
                ("fill", AXIS_COLOR),
            ],
        )?;
    }

    line(document, group, (0.0, 0.0), (0.0, INNER_HEIGHT), axis_style)?;
    for tick in y_ticks {
        let py = y.apply(*tick);
        line(document, group, (-6.0, py), (0.0, py), axis_style)?;
        text(
            document,
            group,
            &format!("{tick}"),
            &[
                ("x", "-10"),
                ("y", &format!("{:.2}", py + 4.0)),
                ("text-anchor", "end"),
                ("font-size", "12px"),
                ("fill", AXIS_COLOR),
            ],
        )?;
    }
    Ok(())
}

fn draw_chrome(document: &Document, group: &Element) -> Result<(), JsValue> {
    text(
        document,
        group,
        "Population Density (per km²) - Log Scale",
        &[
            ("x", &format!("{:.2}", INNER_WIDTH / 2.0)),
            ("y", &format!("{:.2}", INNER_HEIGHT + 45.0)),
            ("text-anchor", "middle"),
            ("font-size", "14px"),
            ("font-weight", "600"),
            ("fill", AXIS_COLOR),
        ],
    )?;
    text(
        document,
        group,
        "Broadband Access (%)",
        &[
            ("transform", "rotate(-90)"),
            ("x", &format!("{:.2}", -INNER_HEIGHT / 2.0)),
            ("y", "-45"),
            ("text-anchor", "middle"),
            ("font-size", "14px"),
            ("font-weight", "600"),
            ("fill", AXIS_COLOR),
        ],
    )?;
    text(
        document,
        group,
        "Does Density Predict Access?",
        &[
            ("x", &format!("{:.2}", INNER_WIDTH / 2.0)),
            ("y", "-15"),
            ("text-anchor", "middle"),
            ("font-size", "18px"),
            ("font-weight", "700"),
            ("fill", "#1e293b"),
        ],
    )?;
    text(
        document,
        group,
        "Dashed line shows trend",
        &[
            ("x", &format!("{:.2}", INNER_WIDTH - 10.0)),
            ("y", "20"),
            ("text-anchor", "end"),
            ("font-size", "11px"),
            ("fill", "#64748b"),
        ],
    )?;
    Ok(())
}
