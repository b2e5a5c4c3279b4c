use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::JsValue;
use web_sys::{Document, Element, Event, HtmlInputElement};

use chart::ranking::rank_by_access;
use chart::table::RegionTable;
use foundation::format::group_thousands;
use formats::dataset::RegionRecord;

use crate::dom;

const TOP_LIST_ID: &str = "top-states-list";
const BOTTOM_LIST_ID: &str = "bottom-states-list";
const SEARCH_INPUT_ID: &str = "state-search";

/// The two ranking lists plus the live search wiring.
pub struct RankingView {
    _core: Rc<RankingCore>,
    _on_input: Closure<dyn FnMut(Event)>,
}

struct RankingCore {
    table: RegionTable,
    top_list: Element,
    bottom_list: Element,
}

impl RankingCore {
    /// Recomputes both lists for the current filter text.
    fn render(&self, filter: &str) {
        let lists = rank_by_access(&self.table, filter);
        self.top_list.set_inner_html(&list_html(&lists.top, "text-green-600"));
        self.bottom_list
            .set_inner_html(&list_html(&lists.bottom, "text-red-600"));
    }
}

impl RankingView {
    pub fn build(document: &Document, table: &RegionTable) -> Result<RankingView, JsValue> {
        let top_list = dom::require_element(document, TOP_LIST_ID)?;
        let bottom_list = dom::require_element(document, BOTTOM_LIST_ID)?;
        let input: HtmlInputElement = dom::require_element(document, SEARCH_INPUT_ID)?
            .dyn_into()
            .map_err(|_| JsValue::from_str("state-search is not an input"))?;

        let core = Rc::new(RankingCore {
            table: table.clone(),
            top_list,
            bottom_list,
        });
        core.render("");

        let on_input = {
            let core = Rc::clone(&core);
            let input = input.clone();
            Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                core.render(&input.value());
            })
        };
        input.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())?;

        Ok(RankingView {
            _core: core,
            _on_input: on_input,
        })
    }
}

fn list_html(records: &[RegionRecord], accent_class: &str) -> String {
    if records.is_empty() {
        return r#"<p class="text-center text-slate-400 py-10">No states found</p>"#.to_string();
    }
    records
        .iter()
        .map(|r| card_html(r, accent_class))
        .collect()
}

fn card_html(record: &RegionRecord, accent_class: &str) -> String {
    format!(
        concat!(
            r#"<div class="flex justify-between items-center bg-white p-3 rounded-lg shadow-sm border border-transparent hover:border-blue-200 transition-colors">"#,
            r#"<div><span class="font-bold text-slate-700">{name}</span>"#,
            r#"<div class="text-xs text-slate-500">${income} Income</div></div>"#,
            r#"<div class="text-right"><span class="text-lg font-black {accent}">{access:.1}%</span>"#,
            r#"<div class="text-[10px] uppercase tracking-wider text-slate-400">Access</div></div>"#,
            r#"</div>"#
        ),
        name = record.name,
        income = group_thousands(u64::from(record.income)),
        accent = accent_class,
        access = record.access,
    )
}

#[cfg(test)]
mod tests {
    use super::{card_html, list_html};
    use foundation::ids::RegionCode;
    use formats::dataset::RegionRecord;

    fn record() -> RegionRecord {
        RegionRecord {
            code: RegionCode::parse("NJ").unwrap(),
            name: "New Jersey".to_string(),
            density: 488.5,
            income: 85751,
            access: 88.7,
        }
    }

    #[test]
    fn card_formats_income_and_access() {
        let html = card_html(&record(), "text-green-600");
        assert!(html.contains("New Jersey"));
        assert!(html.contains("$85,751 Income"));
        assert!(html.contains("88.7%"));
        assert!(html.contains("text-green-600"));
    }

    #[test]
    fn empty_list_renders_placeholder() {
        let html = list_html(&[], "text-red-600");
        assert!(html.contains("No states found"));
    }
}
