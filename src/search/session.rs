//! Tokio driver for [`SearchController`].
//!
//! Timer and fetch completions come back through one channel and are applied
//! on the task that owns the session, so controller state is never shared.

use crate::config::UiConfig;
use crate::models::Suggestion;
use crate::search::controller::SearchController;
use crate::search::traits::{SearchView, SuggestionSource};
use crate::search::types::{Effect, Key, Reaction};
use anyhow::{anyhow, Result};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Page events routed to the search controller
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Input(String),
    Key(Key),
    Hover(usize),
    RowClick(usize),
    OutsideClick,
    Clear,
}

enum Completion {
    DebounceElapsed(u64),
    Results {
        ticket: u64,
        result: Result<Vec<Suggestion>>,
    },
}

pub struct SearchSession<S, V> {
    controller: SearchController,
    source: Arc<S>,
    view: V,
    timer: Option<(u64, JoinHandle<()>)>,
    outstanding: usize,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl<S, V> SearchSession<S, V>
where
    S: SuggestionSource + 'static,
    V: SearchView,
{
    pub fn new(config: &UiConfig, source: S, view: V) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            controller: SearchController::new(config),
            source: Arc::new(source),
            view,
            timer: None,
            outstanding: 0,
            tx,
            rx,
        }
    }

    pub fn controller(&self) -> &SearchController {
        &self.controller
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// No debounce timer running and no fetch outstanding
    pub fn is_idle(&self) -> bool {
        self.timer.is_none() && self.outstanding == 0
    }

    /// Apply a page event; returns whether its default action should be prevented
    pub fn handle(&mut self, event: UiEvent) -> bool {
        let reaction = match event {
            UiEvent::Input(text) => self.controller.on_input(&text),
            UiEvent::Key(key) => self.controller.on_key(key),
            UiEvent::Hover(index) => self.controller.on_hover(index),
            UiEvent::RowClick(index) => self.controller.on_row_click(index),
            UiEvent::OutsideClick => self.controller.on_outside_click(),
            UiEvent::Clear => self.controller.on_clear(),
        };
        self.apply(reaction)
    }

    /// Wait for the next timer or fetch completion and apply it
    pub async fn step(&mut self) {
        if let Some(completion) = self.rx.recv().await {
            self.complete(completion);
        }
    }

    /// Run until no timer or fetch is outstanding
    pub async fn settle(&mut self) {
        while !self.is_idle() {
            self.step().await;
        }
    }

    /// Feed page events from `events` until the sender side closes, then
    /// finish outstanding work and hand back the view
    pub async fn run(mut self, mut events: mpsc::Receiver<UiEvent>) -> V {
        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => {
                        self.handle(event);
                    }
                    None => break,
                },
                Some(completion) = self.rx.recv() => self.complete(completion),
            }
        }
        self.settle().await;
        self.view
    }

    fn complete(&mut self, completion: Completion) {
        let reaction = match completion {
            Completion::DebounceElapsed(generation) => {
                if matches!(self.timer, Some((current, _)) if current == generation) {
                    self.timer = None;
                }
                self.controller.on_debounce_elapsed(generation)
            }
            Completion::Results { ticket, result } => {
                self.outstanding = self.outstanding.saturating_sub(1);
                self.controller.on_results(ticket, result)
            }
        };
        self.apply(reaction);
    }

    fn apply(&mut self, reaction: Reaction) -> bool {
        for effect in reaction.effects {
            match effect {
                Effect::Render => self.view.render_panel(self.controller.panel()),
                Effect::ScheduleQuery { generation, delay } => {
                    self.cancel_timer();
                    let tx = self.tx.clone();
                    let handle = tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        let _ = tx.send(Completion::DebounceElapsed(generation));
                    });
                    self.timer = Some((generation, handle));
                }
                Effect::CancelQuery => self.cancel_timer(),
                Effect::Fetch(ticket) => {
                    debug!(
                        "Querying {} source for {:?}",
                        self.source.source_name(),
                        ticket.query
                    );
                    let source = Arc::clone(&self.source);
                    let tx = self.tx.clone();
                    self.outstanding += 1;
                    tokio::spawn(async move {
                        let query = ticket.query;
                        let fetch = tokio::spawn(async move { source.suggest(&query).await });
                        // a panicking source still has to release `outstanding`
                        let result = match fetch.await {
                            Ok(result) => result,
                            Err(err) => Err(anyhow!("Suggestion task failed: {}", err)),
                        };
                        let _ = tx.send(Completion::Results {
                            ticket: ticket.id,
                            result,
                        });
                    });
                }
                Effect::SetQuery(text) => self.view.set_query(&text),
                Effect::ClearFilters => self.view.clear_filters(),
                Effect::SubmitForm => self.view.submit_form(),
                Effect::Navigate(url) => self.view.navigate(&url),
            }
        }
        reaction.prevent_default
    }

    fn cancel_timer(&mut self) {
        if let Some((_, handle)) = self.timer.take() {
            handle.abort();
        }
    }
}
