use crate::source::{DiffOptions, FileSource};
use crate::theme::Theme;

use super::{DiffSession, SessionSettings};

pub struct AppState {
    pub pairs: Vec<FileSource>,
    pub current_pair: usize,
    pub options: DiffOptions,
    pub session: DiffSession,
    pub theme: Theme,
    /// Long lines wrap instead of being cut at the pane edge.
    pub wrap_lines: bool,
    /// Generation of the newest diff request; older results are dropped.
    pub generation: u64,
    pub should_quit: bool,
    pub show_help: bool,
    pub status_message: Option<(String, bool)>, // (message, is_error)
}

impl AppState {
    pub fn new(
        pairs: Vec<FileSource>,
        options: DiffOptions,
        settings: SessionSettings,
        theme: Theme,
    ) -> Self {
        Self {
            pairs,
            current_pair: 0,
            options,
            session: DiffSession::new(settings),
            theme,
            wrap_lines: false,
            generation: 0,
            should_quit: false,
            show_help: false,
            status_message: None,
        }
    }

    pub fn current_source(&self) -> Option<&FileSource> {
        self.pairs.get(self.current_pair)
    }

    /// Step to a neighbouring pair. Returns false at either end of the list.
    pub fn step_pair(&mut self, forward: bool) -> bool {
        let next = if forward {
            self.current_pair + 1
        } else {
            match self.current_pair.checked_sub(1) {
                Some(prev) => prev,
                None => return false,
            }
        };
        if next >= self.pairs.len() {
            return false;
        }
        self.current_pair = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn state(n: usize) -> AppState {
        let pairs = (0..n)
            .map(|i| FileSource::Precomputed(PathBuf::from(format!("{i}.json"))))
            .collect();
        AppState::new(
            pairs,
            DiffOptions::default(),
            SessionSettings::default(),
            Theme::from_name("one-dark"),
        )
    }

    #[test]
    fn test_step_pair_stops_at_ends() {
        let mut app = state(2);
        assert!(!app.step_pair(false));
        assert!(app.step_pair(true));
        assert_eq!(app.current_pair, 1);
        assert!(!app.step_pair(true));
        assert!(app.step_pair(false));
        assert_eq!(app.current_pair, 0);
    }
}
