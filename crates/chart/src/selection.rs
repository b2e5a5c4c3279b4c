use foundation::color::Rgb;
use foundation::ids::RegionCode;

/// Shared highlight color for the selected region across all views.
pub const HIGHLIGHT: Rgb = Rgb::new(0xfb, 0xbf, 0x24);

/// Map region outline.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RegionStroke {
    pub color: Rgb,
    pub width: f64,
}

pub const DEFAULT_STROKE: RegionStroke = RegionStroke {
    color: Rgb::new(0xff, 0xff, 0xff),
    width: 1.0,
};

pub const SELECTED_STROKE: RegionStroke = RegionStroke {
    color: HIGHLIGHT,
    width: 3.0,
};

/// Transient outline while the pointer is over a map region.
pub const HOVER_STROKE: RegionStroke = RegionStroke {
    color: HIGHLIGHT,
    width: 2.5,
};

/// Scatter dot presentation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DotStyle {
    pub radius: f64,
    pub fill: Rgb,
    pub opacity: f64,
}

pub const DOT_BASE: DotStyle = DotStyle {
    radius: 6.0,
    fill: Rgb::new(0x3b, 0x82, 0xf6),
    opacity: 0.7,
};

pub const DOT_SELECTED: DotStyle = DotStyle {
    radius: 12.0,
    fill: HIGHLIGHT,
    opacity: 1.0,
};

/// Transient style while the pointer is over a dot.
pub const DOT_HOVER: DotStyle = DotStyle {
    radius: 10.0,
    fill: HIGHLIGHT,
    opacity: 1.0,
};

/// Stroke for a map region given the current selection. Features without a
/// region code always keep the default stroke.
pub fn region_stroke(code: Option<RegionCode>, selection: Option<RegionCode>) -> RegionStroke {
    match (code, selection) {
        (Some(c), Some(s)) if c == s => SELECTED_STROKE,
        _ => DEFAULT_STROKE,
    }
}

/// Dot style for a region given the current selection: the selected dot is
/// enlarged and recolored, every other dot dims while a selection exists.
pub fn dot_style(code: RegionCode, selection: Option<RegionCode>) -> DotStyle {
    match selection {
        Some(s) if s == code => DOT_SELECTED,
        Some(_) => DotStyle {
            opacity: 0.3,
            ..DOT_BASE
        },
        None => DOT_BASE,
    }
}

/// Scatter label opacity: only the selected region's label shows.
pub fn label_opacity(code: RegionCode, selection: Option<RegionCode>) -> f64 {
    if selection == Some(code) { 1.0 } else { 0.0 }
}

type Subscriber = Box<dyn FnMut(Option<RegionCode>)>;

/// The process-wide selection: one optional region code, fanned out to
/// registered view callbacks on every change.
///
/// Contracts:
/// - `set` is idempotent: setting the current value re-notifies with the
///   same styling inputs, so the visual state is unchanged.
/// - `toggle` implements the click rule: toggling the current selection
///   clears it.
#[derive(Default)]
pub struct SelectionHub {
    current: Option<RegionCode>,
    subscribers: Vec<Subscriber>,
}

impl SelectionHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<RegionCode> {
        self.current
    }

    /// Registers an update callback and immediately brings it in sync.
    pub fn subscribe(&mut self, mut f: impl FnMut(Option<RegionCode>) + 'static) {
        f(self.current);
        self.subscribers.push(Box::new(f));
    }

    pub fn set(&mut self, selection: Option<RegionCode>) {
        self.current = selection;
        for f in &mut self.subscribers {
            f(selection);
        }
    }

    pub fn toggle(&mut self, code: RegionCode) {
        let next = if self.current == Some(code) {
            None
        } else {
            Some(code)
        };
        self.set(next);
    }
}

impl std::fmt::Debug for SelectionHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionHub")
            .field("current", &self.current)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{
        DEFAULT_STROKE, DOT_BASE, DOT_SELECTED, SELECTED_STROKE, SelectionHub, dot_style,
        label_opacity, region_stroke,
    };
    use foundation::ids::RegionCode;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn code(s: &str) -> RegionCode {
        RegionCode::parse(s).unwrap()
    }

    #[test]
    fn toggle_law_second_toggle_clears() {
        let mut hub = SelectionHub::new();
        assert_eq!(hub.current(), None);
        hub.toggle(code("CA"));
        assert_eq!(hub.current(), Some(code("CA")));
        hub.toggle(code("CA"));
        assert_eq!(hub.current(), None);
    }

    #[test]
    fn toggling_another_region_replaces_the_selection() {
        let mut hub = SelectionHub::new();
        hub.toggle(code("CA"));
        hub.toggle(code("NY"));
        assert_eq!(hub.current(), Some(code("NY")));
    }

    #[test]
    fn set_is_idempotent_for_styling_inputs() {
        let mut hub = SelectionHub::new();
        hub.set(Some(code("TX")));
        let first = region_stroke(Some(code("TX")), hub.current());
        hub.set(Some(code("TX")));
        let second = region_stroke(Some(code("TX")), hub.current());
        assert_eq!(first, second);
    }

    #[test]
    fn subscribers_observe_every_set_and_the_initial_state() {
        let seen: Rc<RefCell<Vec<Option<RegionCode>>>> = Rc::default();
        let mut hub = SelectionHub::new();
        let sink = Rc::clone(&seen);
        hub.subscribe(move |sel| sink.borrow_mut().push(sel));

        hub.toggle(code("CA"));
        hub.toggle(code("CA"));
        assert_eq!(
            *seen.borrow(),
            vec![None, Some(code("CA")), None],
        );
    }

    #[test]
    fn unselected_regions_keep_default_styles() {
        let sel = Some(code("CA"));
        assert_eq!(region_stroke(Some(code("NY")), sel), DEFAULT_STROKE);
        assert_eq!(region_stroke(None, sel), DEFAULT_STROKE);
        assert_eq!(dot_style(code("NY"), None), DOT_BASE);
        assert_eq!(label_opacity(code("NY"), sel), 0.0);
    }

    #[test]
    fn selected_region_gets_highlight_styles() {
        let sel = Some(code("CA"));
        assert_eq!(region_stroke(Some(code("CA")), sel), SELECTED_STROKE);
        assert_eq!(dot_style(code("CA"), sel), DOT_SELECTED);
        assert_eq!(label_opacity(code("CA"), sel), 1.0);
    }

    #[test]
    fn other_dots_dim_while_a_selection_exists() {
        let style = dot_style(code("NY"), Some(code("CA")));
        assert_eq!(style.radius, DOT_BASE.radius);
        assert_eq!(style.fill, DOT_BASE.fill);
        assert_eq!(style.opacity, 0.3);
    }
}
