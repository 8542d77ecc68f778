use crossterm::event::{Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::action::Action;

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// The one place terminal input is read from.
pub struct EventReader {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventReader {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let event_tx = tx.clone();
        tokio::spawn(async move {
            let mut reader = EventStream::new();
            loop {
                match reader.next().await {
                    Some(Ok(CrosstermEvent::Key(key))) if key.kind != KeyEventKind::Release => {
                        if event_tx.send(Event::Key(key)).is_err() {
                            break;
                        }
                    }
                    Some(Ok(CrosstermEvent::Resize(_, _))) => {
                        if event_tx.send(Event::Resize).is_err() {
                            break;
                        }
                    }
                    Some(Err(err)) => {
                        tracing::error!(%err, "terminal event stream failed");
                        break;
                    }
                    None => break,
                    _ => {}
                }
            }
        });

        let tick_tx = tx;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick_rate);
            loop {
                interval.tick().await;
                if tick_tx.send(Event::Tick).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Non-blocking: returns a pending event if one is available, or None.
    pub fn try_next(&mut self) -> Option<Event> {
        self.rx.try_recv().ok()
    }
}

/// A set of key bindings that is active while its view is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyLayer {
    /// Always mounted at the bottom.
    Global,
    DiffView,
    SafetyGate,
    Help,
}

/// Outcome of offering a key to one layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routed {
    Action(Action),
    /// Consumed with no effect; lower layers never see it.
    Swallow,
    /// Not handled here; try the next layer down.
    Pass,
}

impl KeyLayer {
    fn handle(self, key: &KeyEvent) -> Routed {
        use Routed::{Action as Act, Pass, Swallow};

        match self {
            KeyLayer::Global => match key.code {
                KeyCode::Char('q') => Act(Action::Quit),
                KeyCode::Char('?') => Act(Action::ToggleHelp),
                KeyCode::Char(']') => Act(Action::NextPair),
                KeyCode::Char('[') => Act(Action::PrevPair),
                KeyCode::Char('w') => Act(Action::ToggleWhitespace),
                KeyCode::Char('s') => Act(Action::ToggleSpaceChange),
                KeyCode::Char('J') => Act(Action::ToggleNormalizeJson),
                KeyCode::Char('a') => Act(Action::CycleAlgorithm),
                KeyCode::Char('z') => Act(Action::ToggleWrap),
                KeyCode::Char('+') | KeyCode::Char('=') => Act(Action::MoreContext),
                KeyCode::Char('-') => Act(Action::LessContext),
                _ => Pass,
            },
            KeyLayer::DiffView => match key.code {
                KeyCode::Char('j') | KeyCode::Down => Act(Action::ScrollDown),
                KeyCode::Char('k') | KeyCode::Up => Act(Action::ScrollUp),
                KeyCode::PageDown | KeyCode::Char(' ') => Act(Action::ScrollPageDown),
                KeyCode::PageUp => Act(Action::ScrollPageUp),
                KeyCode::Char('g') | KeyCode::Home => Act(Action::ScrollToTop),
                KeyCode::Char('G') | KeyCode::End => Act(Action::ScrollToBottom),
                KeyCode::Char('n') => Act(Action::NextHunk),
                KeyCode::Char('p') => Act(Action::PrevHunk),
                KeyCode::Char('t') => Act(Action::ShowMoreAbove),
                KeyCode::Char('b') => Act(Action::ShowMoreBelow),
                KeyCode::Enter => Act(Action::ShowAll),
                KeyCode::Char('y') => Act(Action::CopyAfter),
                KeyCode::Char('Y') => Act(Action::CopyBefore),
                _ => Pass,
            },
            // The diff is not on screen, so its bindings must not fire.
            KeyLayer::SafetyGate => match key.code {
                KeyCode::Enter => Act(Action::RenderAnyway),
                KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Char(']') | KeyCode::Char('[') => Pass,
                _ => Swallow,
            },
            KeyLayer::Help => match key.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Act(Action::ToggleHelp),
                _ => Swallow,
            },
        }
    }
}

/// Ordered stack of key layers. The most recently mounted layer sees each
/// key first.
#[derive(Debug, Clone)]
pub struct KeyRouter {
    layers: Vec<KeyLayer>,
}

impl Default for KeyRouter {
    fn default() -> Self {
        Self {
            layers: vec![KeyLayer::Global],
        }
    }
}

impl KeyRouter {
    /// Mount a layer on top. Mounting an already mounted layer is a no-op.
    pub fn mount(&mut self, layer: KeyLayer) {
        if !self.layers.contains(&layer) {
            self.layers.push(layer);
        }
    }

    pub fn unmount(&mut self, layer: KeyLayer) {
        if layer != KeyLayer::Global {
            self.layers.retain(|l| *l != layer);
        }
    }

    pub fn set_mounted(&mut self, layer: KeyLayer, mounted: bool) {
        if mounted {
            self.mount(layer);
        } else {
            self.unmount(layer);
        }
    }

    pub fn route(&self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Some(Action::Quit),
                _ => None,
            };
        }
        if key.modifiers.contains(KeyModifiers::ALT) {
            return None;
        }

        for layer in self.layers.iter().rev() {
            match layer.handle(&key) {
                Routed::Action(action) => return Some(action),
                Routed::Swallow => return None,
                Routed::Pass => {}
            }
        }
        None
    }
}
