//! Autocomplete state for the search box.
//!
//! The controller never touches timers, the network or the DOM. Every
//! handler updates the panel view model and returns a [`Reaction`] listing
//! the effects the driver must carry out, so the same logic runs under the
//! browser bindings and the tokio session.

use crate::config::UiConfig;
use crate::models::Suggestion;
use crate::search::types::{
    Direction, Effect, Key, Panel, PanelContent, QueryTicket, Reaction, SuggestionRow,
};
use anyhow::Result;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
struct PendingQuery {
    generation: u64,
    query: String,
}

/// Autocomplete controller for one search box
#[derive(Debug)]
pub struct SearchController {
    config: UiConfig,
    panel: Panel,
    pending: Option<PendingQuery>,
    generation: u64,
    next_ticket: u64,
    in_flight: Option<u64>,
}

impl SearchController {
    pub fn new(config: &UiConfig) -> Self {
        Self {
            config: config.clone(),
            panel: Panel::default(),
            pending: None,
            generation: 0,
            next_ticket: 0,
            in_flight: None,
        }
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    /// Whether a debounced query is waiting for its timer
    pub fn has_pending_query(&self) -> bool {
        self.pending.is_some()
    }

    /// Text in the search box changed
    pub fn on_input(&mut self, text: &str) -> Reaction {
        let query = text.trim();

        // Unicode scalar values, not UTF-16 units: one emoji counts as one
        if query.chars().count() < self.config.min_query_len {
            self.pending = None;
            self.in_flight = None;
            self.panel.content = PanelContent::Empty;
            return Reaction::with(vec![Effect::CancelQuery, self.hide()]);
        }

        self.generation += 1;
        self.pending = Some(PendingQuery {
            generation: self.generation,
            query: query.to_string(),
        });

        Reaction::with(vec![Effect::ScheduleQuery {
            generation: self.generation,
            delay: self.config.debounce(),
        }])
    }

    /// The debounce timer for `generation` fired
    pub fn on_debounce_elapsed(&mut self, generation: u64) -> Reaction {
        let pending = match self.pending.take() {
            Some(pending) if pending.generation == generation => pending,
            other => {
                self.pending = other;
                debug!("Ignoring superseded debounce timer {}", generation);
                return Reaction::none();
            }
        };

        self.next_ticket += 1;
        self.in_flight = Some(self.next_ticket);
        self.panel = Panel {
            visible: true,
            content: PanelContent::Loading,
            active: None,
        };

        debug!("Issuing suggestion query #{} for {:?}", self.next_ticket, pending.query);

        Reaction::with(vec![
            Effect::Render,
            Effect::Fetch(QueryTicket {
                id: self.next_ticket,
                query: pending.query,
            }),
        ])
    }

    /// A fetch issued for `ticket` completed
    pub fn on_results(&mut self, ticket: u64, result: Result<Vec<Suggestion>>) -> Reaction {
        if self.in_flight != Some(ticket) {
            debug!("Discarding stale suggestions for query #{}", ticket);
            return Reaction::none();
        }
        self.in_flight = None;

        self.panel.content = match result {
            Ok(suggestions) if suggestions.is_empty() => PanelContent::NoResults,
            Ok(suggestions) => {
                debug!("Rendering {} suggestions", suggestions.len());
                PanelContent::Rows(suggestions.iter().map(SuggestionRow::from).collect())
            }
            Err(err) => {
                warn!("Search error: {:#}", err);
                PanelContent::Unavailable
            }
        };
        self.panel.active = None;

        Reaction::with(vec![Effect::Render])
    }

    /// A key was pressed in the search box
    pub fn on_key(&mut self, key: Key) -> Reaction {
        match key {
            Key::ArrowDown => self.navigate(Direction::Down),
            Key::ArrowUp => self.navigate(Direction::Up),
            Key::Enter => match self.panel.active {
                Some(index) if self.panel.visible => self.select(index).prevented(),
                _ => Reaction::none(),
            },
            Key::Escape => Reaction::with(vec![self.hide()]),
            Key::Other => Reaction::none(),
        }
    }

    /// The pointer entered row `index`
    pub fn on_hover(&mut self, index: usize) -> Reaction {
        if index >= self.panel.content.rows().len() || self.panel.active == Some(index) {
            return Reaction::none();
        }
        self.panel.active = Some(index);
        Reaction::with(vec![Effect::Render])
    }

    /// Row `index` was clicked
    pub fn on_row_click(&mut self, index: usize) -> Reaction {
        self.select(index)
    }

    /// A click landed outside both the search box and the panel
    pub fn on_outside_click(&mut self) -> Reaction {
        Reaction::with(vec![self.hide()])
    }

    /// Reset the search form and drop any outstanding query
    pub fn on_clear(&mut self) -> Reaction {
        self.pending = None;
        self.in_flight = None;
        self.panel.content = PanelContent::Empty;
        Reaction::with(vec![
            Effect::CancelQuery,
            Effect::SetQuery(String::new()),
            Effect::ClearFilters,
            self.hide(),
        ])
    }

    fn navigate(&mut self, direction: Direction) -> Reaction {
        let mut reaction = Reaction::none().prevented();
        if !self.panel.visible {
            return reaction;
        }

        let next = step_active(self.panel.active, self.panel.content.rows().len(), direction);
        if next.is_some() && next != self.panel.active {
            self.panel.active = next;
            reaction.push(Effect::Render);
        }
        reaction
    }

    fn select(&mut self, index: usize) -> Reaction {
        let Some(row) = self.panel.content.rows().get(index) else {
            return Reaction::none();
        };

        if let Some(id) = row.listing_id {
            return Reaction::with(vec![Effect::Navigate(self.config.flat_url(id))]);
        }

        if row.fallback.is_empty() {
            return Reaction::none();
        }

        let text = row.fallback.clone();
        Reaction::with(vec![Effect::SetQuery(text), self.hide(), Effect::SubmitForm])
    }

    fn hide(&mut self) -> Effect {
        self.panel.visible = false;
        self.panel.active = None;
        Effect::Render
    }
}

/// Next highlighted row when moving through `len` rows with wraparound
pub fn step_active(current: Option<usize>, len: usize, direction: Direction) -> Option<usize> {
    if len == 0 {
        return None;
    }

    match (current.filter(|&i| i < len), direction) {
        (None, Direction::Down) => Some(0),
        (None, Direction::Up) => Some(len - 1),
        (Some(i), Direction::Down) => Some((i + 1) % len),
        (Some(i), Direction::Up) => Some((i + len - 1) % len),
    }
}
