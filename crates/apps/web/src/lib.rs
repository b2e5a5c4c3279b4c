use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use chart::gate::VisibilityGate;
use chart::metric::Metric;
use chart::projection::FitProjection;
use chart::selection::SelectionHub;
use chart::table::RegionTable;
use foundation::color::Ramp;
use formats::dataset::DatasetError;
use formats::topology::{BoundaryCollection, TopologyError};

mod dom;
mod legend;
mod map_view;
mod ranking_view;
mod scatter_view;
mod tooltip;

use map_view::{MAP_HEIGHT, MAP_WIDTH, MapView};
use ranking_view::RankingView;
use scatter_view::ScatterView;

pub type SharedHub = Rc<RefCell<SelectionHub>>;

const TOPOLOGY_URL: &str = "https://cdn.jsdelivr.net/npm/us-atlas@3/states-10m.json";
const TOPOLOGY_OBJECT: &str = "states";
const DATASET_URL: &str = "states_data.json";

/// Containers that surface the load failure message.
const ERROR_CONTAINER_IDS: [&str; 2] = ["map-density", "map-access"];

const SCROLL_REVEAL_THRESHOLD: f64 = 0.25;
const CHART_SECTION_THRESHOLD: f64 = 0.3;

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// App-wide state: the selection hub, the rendered views (which keep their
/// event closures alive), and the observers driving deferred setup.
#[derive(Default)]
struct App {
    hub: SharedHub,
    chart_gate: VisibilityGate,
    // Retained so their DOM closures stay alive for the page lifetime.
    #[allow(dead_code)]
    maps: Vec<Rc<MapView>>,
    #[allow(dead_code)]
    scatter: Option<Rc<ScatterView>>,
    #[allow(dead_code)]
    ranking: Option<RankingView>,
    #[allow(dead_code)]
    observers: Vec<(IntersectionObserver, ObserverCallback)>,
}

thread_local! {
    static APP: RefCell<App> = RefCell::new(App::default());
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    Ok(())
}

/// Wires both visibility triggers. The heavy chart pipeline stays deferred
/// until its section scrolls into view.
#[wasm_bindgen]
pub fn init_app() -> Result<(), JsValue> {
    let document = dom::document()?;
    observe_scroll_sections(&document)?;
    observe_chart_section(&document)?;
    Ok(())
}

fn observer_with_threshold(
    callback: &ObserverCallback,
    threshold: f64,
) -> Result<IntersectionObserver, JsValue> {
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
}

/// Reveals each `.scroll-section`'s inner panel the first time a quarter of
/// it is visible, then stops watching that section.
fn observe_scroll_sections(document: &Document) -> Result<(), JsValue> {
    let callback: ObserverCallback = Closure::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                if let Ok(Some(panel)) = target.query_selector("div") {
                    let classes = panel.class_list();
                    let _ = classes.remove_2("opacity-0", "translate-y-8");
                    let _ = classes.add_2("opacity-100", "translate-y-0");
                }
                observer.unobserve(&target);
            }
        },
    );
    let observer = observer_with_threshold(&callback, SCROLL_REVEAL_THRESHOLD)?;

    let sections = document.query_selector_all(".scroll-section")?;
    for i in 0..sections.length() {
        if let Some(section) = sections.item(i)
            && let Ok(section) = section.dyn_into::<Element>()
        {
            observer.observe(&section);
        }
    }

    APP.with(|app| app.borrow_mut().observers.push((observer, callback)));
    Ok(())
}

/// Defers the data fetch and all renders until the chart section is 30%
/// visible. Without such a section, initialization runs immediately.
fn observe_chart_section(document: &Document) -> Result<(), JsValue> {
    let section = document
        .get_element_by_id("map-density")
        .and_then(|el| el.closest("section").ok().flatten());

    let Some(section) = section else {
        dom::log("map section not found, initializing immediately");
        if APP.with(|app| app.borrow_mut().chart_gate.fire()) {
            spawn_local(initialize_charts());
        }
        return Ok(());
    };

    let callback: ObserverCallback = Closure::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                observer.unobserve(&entry.target());
                if APP.with(|app| app.borrow_mut().chart_gate.fire()) {
                    dom::log("map section visible, initializing");
                    spawn_local(initialize_charts());
                }
            }
        },
    );
    let observer = observer_with_threshold(&callback, CHART_SECTION_THRESHOLD)?;
    observer.observe(&section);

    APP.with(|app| app.borrow_mut().observers.push((observer, callback)));
    Ok(())
}

#[derive(Debug)]
enum LoadError {
    Fetch { url: String, message: String },
    Topology(TopologyError),
    Dataset(DatasetError),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Fetch { url, message } => write!(f, "failed to fetch {url}: {message}"),
            LoadError::Topology(e) => write!(f, "topology decode failed: {e}"),
            LoadError::Dataset(e) => write!(f, "dataset decode failed: {e}"),
        }
    }
}

impl std::error::Error for LoadError {}

async fn fetch_text(url: &str) -> Result<String, LoadError> {
    let response = gloo_net::http::Request::get(url)
        .send()
        .await
        .map_err(|e| LoadError::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        })?;
    response.text().await.map_err(|e| LoadError::Fetch {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// Both sources fetch concurrently; the pipeline waits for both.
async fn load_inputs() -> Result<(BoundaryCollection, RegionTable), LoadError> {
    let (topology, dataset) = futures_util::join!(
        fetch_text(TOPOLOGY_URL),
        fetch_text(DATASET_URL),
    );
    let boundaries = formats::topology::decode_boundaries(&topology?, TOPOLOGY_OBJECT)
        .map_err(LoadError::Topology)?;
    let records = formats::dataset::decode_records(&dataset?).map_err(LoadError::Dataset)?;
    Ok((boundaries, RegionTable::new(records)))
}

async fn initialize_charts() {
    dom::log("Loading map data...");
    match load_inputs().await {
        Ok((boundaries, table)) => {
            dom::log("map data loaded");
            if let Err(err) = render_all(&boundaries, &table) {
                dom::error(&format!("map init error: {err:?}"));
            }
        }
        Err(err) => {
            dom::error(&format!("Error loading map data: {err}"));
            if let Err(dom_err) = show_load_failure(&err.to_string()) {
                dom::error(&format!("could not surface load failure: {dom_err:?}"));
            }
        }
    }
}

fn failure_html(message: &str) -> String {
    format!(r#"<p class="text-center p-8 text-red-600">Could not load map data: {message}</p>"#)
}

/// Writes the failure inline into the two designated map containers. Other
/// containers are deliberately left untouched.
fn show_load_failure(message: &str) -> Result<(), JsValue> {
    let document = dom::document()?;
    for id in ERROR_CONTAINER_IDS {
        dom::require_element(&document, id)?.set_inner_html(&failure_html(message));
    }
    Ok(())
}

fn map_specs() -> [(&'static str, &'static str, Metric, Ramp); 4] {
    [
        (
            "map-income",
            "legend-income",
            Metric::Income,
            chart::encoding::purples(),
        ),
        (
            "map-access-2",
            "legend-access-2",
            Metric::Access,
            chart::encoding::greens(),
        ),
        (
            "map-density",
            "legend-density",
            Metric::Density,
            chart::encoding::blues(),
        ),
        (
            "map-access",
            "legend-access",
            Metric::Access,
            chart::encoding::greens(),
        ),
    ]
}

fn render_all(boundaries: &BoundaryCollection, table: &RegionTable) -> Result<(), JsValue> {
    let document = dom::document()?;
    let projection = FitProjection::fit_planar(boundaries, MAP_WIDTH, MAP_HEIGHT)
        .ok_or_else(|| JsValue::from_str("topology has no drawable boundaries"))?;

    let hub = APP.with(|app| Rc::clone(&app.borrow().hub));

    for (container_id, legend_class, metric, ramp) in map_specs() {
        let view = MapView::build(
            &document,
            container_id,
            legend_class,
            boundaries,
            table,
            metric,
            ramp,
            &projection,
            &hub,
        )?;
        let subscriber = Rc::clone(&view);
        hub.borrow_mut().subscribe(move |sel| subscriber.update(sel));
        APP.with(|app| app.borrow_mut().maps.push(view));
        dom::log(&format!("rendered #{container_id} choropleth"));
    }

    let scatter = ScatterView::build(&document, "scatter-plot", table, &hub)?;
    let subscriber = Rc::clone(&scatter);
    hub.borrow_mut().subscribe(move |sel| subscriber.update(sel));
    APP.with(|app| app.borrow_mut().scatter = Some(scatter));
    dom::log("rendered scatter plot");

    let ranking = RankingView::build(&document, table)?;
    APP.with(|app| app.borrow_mut().ranking = Some(ranking));
    dom::log("rendered ranking lists");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ERROR_CONTAINER_IDS, LoadError, failure_html};

    #[test]
    fn failure_targets_are_the_two_map_containers() {
        assert_eq!(ERROR_CONTAINER_IDS, ["map-density", "map-access"]);
    }

    #[test]
    fn failure_html_embeds_the_message() {
        let err = LoadError::Fetch {
            url: "states_data.json".to_string(),
            message: "connection reset".to_string(),
        };
        let html = failure_html(&err.to_string());
        assert!(html.contains("Could not load map data:"));
        assert!(html.contains("failed to fetch states_data.json: connection reset"));
    }
}
