//! Event/action/render loop
//!
//! Owns the store and is the only place state is mutated. Terminal events and
//! task completions arrive on channels; effects returned by the reducer are
//! handed to the effect handler together with the task manager.

use std::io;
use std::time::Duration;

use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::event::{EventKind, RawEvent, process_raw_event, spawn_event_poller};
use crate::store::{Action, Middleware, Store};
use crate::tasks::TaskManager;

/// Configuration for the crossterm poller.
#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    /// Timeout passed to each `crossterm::event::poll` call.
    pub poll_timeout: Duration,
    /// Sleep between poll cycles.
    pub loop_sleep: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(10),
            loop_sleep: Duration::from_millis(16),
        }
    }
}

/// Actions produced by mapping one event, plus a render hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome<A> {
    pub actions: Vec<A>,
    pub needs_render: bool,
}

impl<A> EventOutcome<A> {
    pub fn ignored() -> Self {
        Self::from_actions(None)
    }

    pub fn action(action: A) -> Self {
        Self::from_actions(Some(action))
    }

    pub fn from_actions(iter: impl IntoIterator<Item = A>) -> Self {
        Self {
            actions: iter.into_iter().collect(),
            needs_render: false,
        }
    }

    /// Redraw even if no action changes state (terminal resize).
    pub fn with_render(mut self) -> Self {
        self.needs_render = true;
        self
    }
}

/// Handed to the effect handler for each effect.
pub struct EffectContext<'a, A: Action> {
    action_tx: &'a mpsc::UnboundedSender<A>,
    tasks: &'a mut TaskManager<A>,
}

impl<A: Action> EffectContext<'_, A> {
    /// Queue an action behind the ones already pending.
    pub fn emit(&self, action: A) {
        let _ = self.action_tx.send(action);
    }

    pub fn tasks(&mut self) -> &mut TaskManager<A> {
        self.tasks
    }
}

/// Where terminal events come from.
enum EventSource {
    Terminal(PollerConfig),
    Channel(mpsc::UnboundedReceiver<RawEvent>),
}

/// Whether the loop keeps going after an action.
enum Flow {
    Continue,
    Quit,
}

pub struct Runtime<S, A: Action, E, M: Middleware<A>> {
    store: Store<S, A, E, M>,
    action_tx: mpsc::UnboundedSender<A>,
    action_rx: mpsc::UnboundedReceiver<A>,
    tasks: TaskManager<A>,
    events: Option<EventSource>,
    dirty: bool,
}

impl<S, A: Action, E, M: Middleware<A>> Runtime<S, A, E, M> {
    pub fn from_store(store: Store<S, A, E, M>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let tasks = TaskManager::new(action_tx.clone());
        Self {
            store,
            action_tx,
            action_rx,
            tasks,
            events: Some(EventSource::Terminal(PollerConfig::default())),
            dirty: true,
        }
    }

    /// Read events from the terminal with the given poll timings.
    pub fn with_event_poller(mut self, config: PollerConfig) -> Self {
        self.events = Some(EventSource::Terminal(config));
        self
    }

    /// Read events from a channel instead of the terminal.
    pub fn with_event_channel(mut self, events: mpsc::UnboundedReceiver<RawEvent>) -> Self {
        self.events = Some(EventSource::Channel(events));
        self
    }

    /// Send an action into the runtime queue.
    pub fn enqueue(&self, action: A) {
        let _ = self.action_tx.send(action);
    }

    pub fn state(&self) -> &S {
        self.store.state()
    }

    pub fn tasks(&mut self) -> &mut TaskManager<A> {
        &mut self.tasks
    }

    fn open_events(&mut self, cancel: &CancellationToken) -> mpsc::UnboundedReceiver<RawEvent> {
        let config = match self.events.take() {
            Some(EventSource::Channel(rx)) => return rx,
            Some(EventSource::Terminal(config)) => config,
            // a previous run consumed the source
            None => PollerConfig::default(),
        };
        let (tx, rx) = mpsc::unbounded_channel();
        spawn_event_poller(tx, config.poll_timeout, config.loop_sleep, cancel.clone());
        rx
    }

    fn apply<FQuit, FEffect>(
        &mut self,
        action: A,
        should_quit: &mut FQuit,
        handle_effect: &mut FEffect,
    ) -> Flow
    where
        FQuit: FnMut(&A) -> bool,
        FEffect: FnMut(E, &mut EffectContext<A>),
    {
        if should_quit(&action) {
            return Flow::Quit;
        }

        let result = self.store.dispatch(action);
        if result.has_effects() {
            let mut ctx = EffectContext {
                action_tx: &self.action_tx,
                tasks: &mut self.tasks,
            };
            for effect in result.effects {
                handle_effect(effect, &mut ctx);
            }
        }
        self.dirty |= result.changed;
        Flow::Continue
    }

    /// Run the loop until `should_quit` accepts an action.
    ///
    /// Every task is cancelled on the way out.
    pub async fn run<B, FRender, FEvent, FQuit, FEffect>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut render: FRender,
        mut map_event: FEvent,
        mut should_quit: FQuit,
        mut handle_effect: FEffect,
    ) -> io::Result<()>
    where
        B: Backend,
        FRender: FnMut(&mut Frame, Rect, &S),
        FEvent: FnMut(&EventKind, &S) -> EventOutcome<A>,
        FQuit: FnMut(&A) -> bool,
        FEffect: FnMut(E, &mut EffectContext<A>),
    {
        let cancel = CancellationToken::new();
        let mut events = self.open_events(&cancel);

        let result = loop {
            if self.dirty {
                let state = self.store.state();
                if let Err(err) = terminal.draw(|frame| {
                    let area = frame.area();
                    render(frame, area, state);
                }) {
                    break Err(err);
                }
                self.dirty = false;
            }

            let next = tokio::select! {
                Some(raw) = events.recv() => {
                    let Some(event) = process_raw_event(raw) else {
                        continue;
                    };
                    let outcome = map_event(&event, self.store.state());
                    self.dirty |= outcome.needs_render;
                    for action in outcome.actions {
                        let _ = self.action_tx.send(action);
                    }
                    None
                }

                Some(action) = self.action_rx.recv() => Some(action),

                else => break Ok(()),
            };

            if let Some(action) = next {
                if let Flow::Quit = self.apply(action, &mut should_quit, &mut handle_effect) {
                    break Ok(());
                }
            }
        };

        cancel.cancel();
        debug!(tasks = self.tasks.len(), "Stopping runtime");
        self.tasks.cancel_all();
        result
    }
}
