use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::JsValue;
use web_sys::{Document, Element, MouseEvent};

use chart::encoding::MetricEncoding;
use chart::metric::Metric;
use chart::projection::{FitProjection, path_data};
use chart::selection::{HOVER_STROKE, region_stroke};
use chart::table::{RegionTable, region_code_for};
use foundation::color::Ramp;
use foundation::ids::RegionCode;
use formats::topology::BoundaryCollection;

use crate::{SharedHub, dom, legend, tooltip};

pub const MAP_WIDTH: f64 = 500.0;
pub const MAP_HEIGHT: f64 = 400.0;

/// One choropleth: the rendered region paths it owns plus the listeners
/// keeping their event closures alive.
pub struct MapView {
    regions: Vec<(Option<RegionCode>, Element)>,
    _listeners: Vec<Closure<dyn FnMut(MouseEvent)>>,
}

impl MapView {
    /// Builds the map into `container_id` and its legend into
    /// `legend_class`. Features with no joined record render the neutral
    /// fallback fill and show no tooltip.
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        document: &Document,
        container_id: &str,
        legend_class: &str,
        boundaries: &BoundaryCollection,
        table: &RegionTable,
        metric: Metric,
        ramp: Ramp,
        projection: &FitProjection,
        hub: &SharedHub,
    ) -> Result<Rc<MapView>, JsValue> {
        let container = dom::require_element(document, container_id)?;

        let svg = dom::svg_element(document, "svg")?;
        dom::set_attrs(
            &svg,
            &[
                ("width", "100%"),
                ("height", "100%"),
                ("viewBox", &format!("0 0 {MAP_WIDTH} {MAP_HEIGHT}")),
                ("preserveAspectRatio", "xMidYMid meet"),
            ],
        )?;

        let encoding = MetricEncoding::from_table(table, metric, ramp);

        let mut regions = Vec::with_capacity(boundaries.features.len());
        let mut listeners: Vec<Closure<dyn FnMut(MouseEvent)>> = Vec::new();

        let on_move = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            tooltip::move_to(event.page_x(), event.page_y());
        });

        for feature in &boundaries.features {
            let code = feature.id.and_then(region_code_for);
            let record = code.and_then(|c| table.get(c));

            let fill = match &encoding {
                Some(enc) => enc.fill(record),
                None => chart::encoding::FALLBACK_FILL,
            };

            let path = dom::svg_element(document, "path")?;
            let stroke = region_stroke(code, hub.borrow().current());
            dom::set_attrs(
                &path,
                &[
                    ("d", &path_data(feature, projection)),
                    ("fill", &fill.hex()),
                    ("stroke", &stroke.color.hex()),
                    ("stroke-width", &stroke.width.to_string()),
                    ("cursor", "pointer"),
                ],
            )?;

            let tooltip_html = record.map(|r| {
                format!(
                    "<strong>{}</strong><br/>{}",
                    r.name,
                    metric.tooltip_text(r)
                )
            });

            let on_over = {
                let path = path.clone();
                Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
                    let _ = path.set_attribute("stroke", &HOVER_STROKE.color.hex());
                    let _ = path.set_attribute("stroke-width", &HOVER_STROKE.width.to_string());
                    if let Some(html) = &tooltip_html {
                        let _ = tooltip::show(event.page_x(), event.page_y(), html);
                    }
                })
            };

            let on_out = {
                let path = path.clone();
                let hub = Rc::clone(hub);
                Closure::<dyn FnMut(MouseEvent)>::new(move |_event: MouseEvent| {
                    let stroke = region_stroke(code, hub.borrow().current());
                    let _ = path.set_attribute("stroke", &stroke.color.hex());
                    let _ = path.set_attribute("stroke-width", &stroke.width.to_string());
                    tooltip::hide();
                })
            };

            let on_click = {
                let hub = Rc::clone(hub);
                Closure::<dyn FnMut(MouseEvent)>::new(move |_event: MouseEvent| {
                    let mut hub = hub.borrow_mut();
                    match code {
                        Some(code) => hub.toggle(code),
                        // A feature outside the mapping matches nothing;
                        // clicking it drops any selection.
                        None => hub.set(None),
                    }
                })
            };

            path.add_event_listener_with_callback("mouseover", on_over.as_ref().unchecked_ref())?;
            path.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
            path.add_event_listener_with_callback("mouseout", on_out.as_ref().unchecked_ref())?;
            path.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
            listeners.push(on_over);
            listeners.push(on_out);
            listeners.push(on_click);

            svg.append_child(&path)?;
            regions.push((code, path));
        }
        listeners.push(on_move);

        container.append_child(&svg)?;

        if let Some(enc) = &encoding {
            legend::render(document, legend_class, &enc.legend())?;
        }

        Ok(Rc::new(MapView {
            regions,
            _listeners: listeners,
        }))
    }

    /// Restyles every region outline for the new selection.
    pub fn update(&self, selection: Option<RegionCode>) {
        for (code, path) in &self.regions {
            let stroke = region_stroke(*code, selection);
            let _ = path.set_attribute("stroke", &stroke.color.hex());
            let _ = path.set_attribute("stroke-width", &stroke.width.to_string());
        }
    }
}
