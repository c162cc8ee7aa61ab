use crate::format::group_thousands;
use crate::models::Suggestion;
use std::time::Duration;

pub const LOADING_MESSAGE: &str = "Searching...";
pub const NO_RESULTS_MESSAGE: &str = "No suggestions found";
pub const UNAVAILABLE_MESSAGE: &str = "Search temporarily unavailable";

/// Keys the suggestion panel reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowDown" => Key::ArrowDown,
            "ArrowUp" => Key::ArrowUp,
            "Enter" => Key::Enter,
            "Escape" => Key::Escape,
            _ => Key::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Down,
    Up,
}

/// One rendered suggestion
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionRow {
    /// Listing to open when the row is selected
    pub listing_id: Option<u64>,
    /// Text copied into the search box when the row is a refinement
    pub fallback: String,
    pub title: String,
    pub detail: String,
    pub price: String,
}

impl From<&Suggestion> for SuggestionRow {
    fn from(flat: &Suggestion) -> Self {
        Self {
            listing_id: flat.id,
            fallback: format!("{} {}", flat.block, flat.street_name),
            title: format!("Block {}, {}", flat.block, flat.street_name),
            detail: format!("{} • {}", flat.town, flat.flat_type),
            price: format!("${}", group_thousands(flat.resale_price)),
        }
    }
}

/// What the suggestion panel currently shows
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PanelContent {
    #[default]
    Empty,
    Loading,
    Rows(Vec<SuggestionRow>),
    NoResults,
    Unavailable,
}

impl PanelContent {
    /// Selectable rows; message rows are not selectable
    pub fn rows(&self) -> &[SuggestionRow] {
        match self {
            PanelContent::Rows(rows) => rows,
            _ => &[],
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            PanelContent::Loading => Some(LOADING_MESSAGE),
            PanelContent::NoResults => Some(NO_RESULTS_MESSAGE),
            PanelContent::Unavailable => Some(UNAVAILABLE_MESSAGE),
            PanelContent::Empty | PanelContent::Rows(_) => None,
        }
    }
}

/// View model of the suggestion panel
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Panel {
    pub visible: bool,
    pub content: PanelContent,
    /// Highlighted row; at most one at a time
    pub active: Option<usize>,
}

impl Panel {
    pub fn active_row(&self) -> Option<&SuggestionRow> {
        self.active.and_then(|i| self.content.rows().get(i))
    }
}

/// A query handed to the driver for fetching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
    /// Monotonic per controller; only the latest ticket's results are rendered
    pub id: u64,
    pub query: String,
}

/// Work the page has to carry out after the controller handled an event
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Redraw the suggestion panel from `SearchController::panel`
    Render,
    /// Start the debounce timer, replacing any running one
    ScheduleQuery { generation: u64, delay: Duration },
    /// Stop the debounce timer
    CancelQuery,
    Fetch(QueryTicket),
    SetQuery(String),
    ClearFilters,
    SubmitForm,
    Navigate(String),
}

/// Outcome of one controller event
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Reaction {
    /// Whether the DOM event's default action should be suppressed
    pub prevent_default: bool,
    pub effects: Vec<Effect>,
}

impl Reaction {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with(effects: Vec<Effect>) -> Self {
        Self {
            prevent_default: false,
            effects,
        }
    }

    pub fn prevented(mut self) -> Self {
        self.prevent_default = true;
        self
    }

    pub fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }
}
