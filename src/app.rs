use anyhow::Result;
use ratatui::layout::{Constraint, Direction, Layout};
use std::time::Duration;

use crate::action::Action;
use crate::async_diff::{DiffRequest, DiffWorker};
use crate::components::action_hud::{render_help, ActionHud};
use crate::components::context_bar::ContextBar;
use crate::components::diff_view::{wrap_width_for, DiffView};
use crate::components::Component;
use crate::config::CodediffConfig;
use crate::diff::{ExpandEdge, HunkDirection};
use crate::event::{Event, EventReader, KeyLayer, KeyRouter};
use crate::highlight::HighlightEngine;
use crate::source::FileSource;
use crate::state::{AppState, LoadState, Side};
use crate::tui::Tui;

/// Upper bound for `+`; more context than this is better served by `Enter`.
const MAX_CONTEXT_LINES: usize = 100;

pub struct App {
    state: AppState,
    worker: DiffWorker,
    highlight_engine: HighlightEngine,
    router: KeyRouter,
    status_clear_countdown: u32,
}

impl App {
    pub fn new(pairs: Vec<FileSource>, config: CodediffConfig) -> Self {
        let mut state = AppState::new(
            pairs,
            config.diff_options(),
            config.session_settings(),
            config.theme.clone(),
        );
        state.wrap_lines = config.wrap_lines;
        Self {
            state,
            worker: DiffWorker::new(),
            highlight_engine: HighlightEngine::new(),
            router: KeyRouter::default(),
            status_clear_countdown: 0,
        }
    }

    pub async fn run(&mut self, terminal: &mut Tui) -> Result<()> {
        self.request_diff();

        let mut events = EventReader::new(Duration::from_millis(50));

        let context_bar = ContextBar;
        let diff_view = DiffView;
        let action_hud = ActionHud;

        loop {
            self.poll_diff_results();
            self.sync_key_layers();

            // context bar + hud + diff borders
            let term_size = terminal.size()?;
            self.state.session.viewport_height = term_size.height.saturating_sub(4) as usize;
            self.state.session.rows();
            let wrap_width = self.state.wrap_lines.then(|| wrap_width_for(term_size.width));
            if wrap_width != self.state.session.wrap_width {
                self.state.session.wrap_width = wrap_width;
                self.state.session.ensure_cursor_visible();
            }

            terminal.draw(|frame| {
                let outer = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(1),
                        Constraint::Min(3),
                        Constraint::Length(1),
                    ])
                    .split(frame.area());

                context_bar.render(frame, outer[0], &self.state);
                diff_view.render(frame, outer[1], &self.state);
                action_hud.render(frame, outer[2], &self.state);

                if self.state.show_help {
                    render_help(frame, &self.state);
                }
            })?;

            // Wait for at least one event, then drain all pending events
            // to avoid input lag from buffered scroll/key events.
            let mut pending = Vec::new();
            if let Some(ev) = events.next().await {
                pending.push(ev);
            }
            while let Some(ev) = events.try_next() {
                pending.push(ev);
            }

            // Coalesce: collapse consecutive scroll actions into net movement
            let mut scroll_delta: isize = 0;
            let mut actions: Vec<Action> = Vec::new();
            for event in pending {
                let action = match event {
                    Event::Key(key) => self.router.route(key),
                    Event::Resize => Some(Action::Resize),
                    Event::Tick => Some(Action::Tick),
                };
                match action {
                    Some(Action::ScrollUp) => scroll_delta -= 1,
                    Some(Action::ScrollDown) => scroll_delta += 1,
                    Some(other) => actions.push(other),
                    None => {}
                }
            }

            if scroll_delta != 0 {
                self.state.session.move_cursor(scroll_delta);
            }
            for action in actions {
                self.update(action);
            }

            if self.state.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Mount exactly the key layers whose views are on screen.
    fn sync_key_layers(&mut self) {
        let session = &self.state.session;
        let ready = session.load == LoadState::Ready;
        let gated = ready && session.gate.is_armed();
        self.router.set_mounted(KeyLayer::DiffView, ready && !gated);
        self.router.set_mounted(KeyLayer::SafetyGate, gated);
        self.router.set_mounted(KeyLayer::Help, self.state.show_help);
    }

    fn request_diff(&mut self) {
        let Some(source) = self.state.current_source().cloned() else {
            return;
        };
        self.state.generation += 1;
        self.state.session.begin_load(source.title());
        self.worker.request(DiffRequest {
            generation: self.state.generation,
            pair: self.state.current_pair,
            source,
            options: self.state.options,
        });
    }

    fn poll_diff_results(&mut self) {
        while let Some(result) = self.worker.try_recv() {
            if result.generation < self.state.generation {
                tracing::debug!(
                    generation = result.generation,
                    latest = self.state.generation,
                    "discarding stale diff"
                );
                continue;
            }
            match result.data {
                Ok(data) => {
                    let path = self
                        .state
                        .pairs
                        .get(result.pair)
                        .map(|s| s.display_path().to_path_buf())
                        .unwrap_or_default();
                    self.state
                        .session
                        .apply_file_data(data, &path, &self.highlight_engine);
                }
                Err(message) => self.state.session.fail(message),
            }
        }
    }

    fn update(&mut self, action: Action) {
        match action {
            Action::Quit => self.state.should_quit = true,
            Action::Tick => {
                if self.status_clear_countdown > 0 {
                    self.status_clear_countdown -= 1;
                    if self.status_clear_countdown == 0 {
                        self.state.status_message = None;
                    }
                }
            }
            Action::Resize => {}

            Action::ScrollUp => self.state.session.move_cursor(-1),
            Action::ScrollDown => self.state.session.move_cursor(1),
            Action::ScrollPageUp => self.state.session.page(false),
            Action::ScrollPageDown => self.state.session.page(true),
            Action::ScrollToTop => self.state.session.cursor_to_top(),
            Action::ScrollToBottom => self.state.session.cursor_to_bottom(),

            Action::NextHunk => {
                if !self.state.session.jump_hunk(HunkDirection::Up) {
                    self.set_status("Already at the last hunk".to_string(), false);
                }
            }
            Action::PrevHunk => {
                if !self.state.session.jump_hunk(HunkDirection::Down) {
                    self.set_status("Already at the first hunk".to_string(), false);
                }
            }

            Action::ShowMoreAbove => self.expand(Some(ExpandEdge::Top)),
            Action::ShowMoreBelow => self.expand(Some(ExpandEdge::Bottom)),
            Action::ShowAll => self.expand(None),

            Action::RenderAnyway => {
                tracing::info!(title = %self.state.session.title, "rendering past the long-line warning");
                self.state.session.gate.bypass();
                self.state.session.refresh_highlight(&self.highlight_engine);
            }

            Action::NextPair | Action::PrevPair => {
                if self.state.step_pair(action == Action::NextPair) {
                    self.request_diff();
                }
            }

            Action::ToggleWhitespace => {
                self.state.options.ignore_whitespace = !self.state.options.ignore_whitespace;
                self.request_diff();
            }
            Action::ToggleSpaceChange => {
                self.state.options.ignore_space_change = !self.state.options.ignore_space_change;
                self.request_diff();
            }
            Action::ToggleNormalizeJson => {
                self.state.options.normalize_json = !self.state.options.normalize_json;
                self.request_diff();
            }
            Action::CycleAlgorithm => {
                let algorithm = self.state.options.algorithm.next();
                self.state.options.algorithm = algorithm;
                self.set_status(format!("Diff algorithm: {}", algorithm.name()), false);
                self.request_diff();
            }
            Action::MoreContext => {
                if self.state.options.context_lines < MAX_CONTEXT_LINES {
                    self.state.options.context_lines += 1;
                    self.request_diff();
                }
            }
            Action::LessContext => {
                if self.state.options.context_lines > 0 {
                    self.state.options.context_lines -= 1;
                    self.request_diff();
                }
            }

            Action::CopyAfter => self.copy(Side::After),
            Action::CopyBefore => self.copy(Side::Before),

            Action::ToggleWrap => self.state.wrap_lines = !self.state.wrap_lines,

            Action::ToggleHelp => self.state.show_help = !self.state.show_help,
        }
    }

    fn expand(&mut self, edge: Option<ExpandEdge>) {
        let session = &mut self.state.session;
        let expanded = match edge {
            Some(edge) => session.expand_under_cursor(edge),
            None => session.show_all_under_cursor(),
        };
        // Enter on an ordinary row is not an error.
        if !expanded && edge.is_some() {
            self.set_status("Move the cursor onto a collapsed region first".to_string(), true);
        }
    }

    fn copy(&mut self, side: Side) {
        let Some(text) = self.state.session.copy_text(side) else {
            self.set_status("Nothing on that side to copy".to_string(), true);
            return;
        };
        let lines = text.lines().count().max(1);
        match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text)) {
            Ok(()) => self.set_status(format!("Copied {lines} line(s)"), false),
            Err(e) => {
                tracing::warn!(error = %e, "clipboard unavailable");
                self.set_status(format!("Clipboard error: {e}"), true);
            }
        }
    }

    fn set_status(&mut self, msg: String, is_error: bool) {
        self.state.status_message = Some((msg, is_error));
        // ~3 seconds at 50ms tick rate
        self.status_clear_countdown = 60;
    }
}
