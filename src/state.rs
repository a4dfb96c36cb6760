use std::collections::VecDeque;

use crate::stats::{self, PlayerStatRecord, ScoringView, SortDirection, SortSpec, StatField};
use crate::team::TeamSelection;

#[derive(Debug, Clone)]
pub struct AppState {
    /// Records exactly as the last successful fetch returned them. Views are
    /// derived, never written back.
    pub records: Vec<PlayerStatRecord>,
    pub loading: bool,
    pub fetches_in_flight: usize,
    pub error: Option<String>,
    pub updated: Option<String>,
    pub view: ScoringView,
    pub sort: SortSpec,
    pub search: String,
    pub search_active: bool,
    pub page: usize,
    pub cursor: usize,
    pub header_focus: usize,
    pub team: TeamSelection,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        let view = ScoringView::Ppr;
        let sort = SortSpec::default();
        let header_focus = view
            .columns()
            .iter()
            .position(|f| *f == sort.field)
            .unwrap_or(0);
        Self {
            records: Vec::new(),
            loading: true,
            fetches_in_flight: 0,
            error: None,
            updated: None,
            view,
            sort,
            search: String::new(),
            search_active: false,
            page: 1,
            cursor: 0,
            header_focus,
            team: TeamSelection::new(),
            logs: VecDeque::new(),
            help_overlay: false,
        }
    }

    pub fn sorted_records(&self) -> Vec<&PlayerStatRecord> {
        stats::sort_records(&self.records, self.sort)
    }

    /// Sorts and filters once; callers that need several derived values in one
    /// pass (a frame, a key press) should go through this.
    pub fn table_view(&self) -> TableView<'_> {
        TableView {
            filtered: stats::filter_records(&self.sorted_records(), &self.search),
            page: self.page,
        }
    }

    pub fn filtered_records(&self) -> Vec<&PlayerStatRecord> {
        self.table_view().filtered
    }

    pub fn page_records(&self) -> Vec<&PlayerStatRecord> {
        self.table_view().rows().to_vec()
    }

    pub fn total_pages(&self) -> usize {
        self.table_view().total_pages()
    }

    pub fn mark_fetch_requested(&mut self) {
        self.fetches_in_flight += 1;
    }

    pub fn is_refreshing(&self) -> bool {
        !self.loading && self.fetches_in_flight > 0
    }

    /// Applies a header click on `field`. Returns the new sort so the caller can
    /// request a refetch.
    pub fn sort_on(&mut self, field: StatField) -> SortSpec {
        self.sort = self.sort.toggled(field);
        self.sync_header_focus();
        self.cursor = 0;
        self.push_log(format!(
            "[INFO] Sort: {} {}",
            self.sort.field.label(),
            direction_label(self.sort.direction)
        ));
        self.sort
    }

    pub fn sort_on_focused(&mut self) -> SortSpec {
        let columns = self.view.columns();
        let field = columns[self.header_focus.min(columns.len() - 1)];
        self.sort_on(field)
    }

    /// Switches PPR / Non-PPR. The sort column follows the view's fantasy column.
    /// Returns `false` when `view` was already active.
    pub fn set_view(&mut self, view: ScoringView) -> bool {
        if self.view == view {
            return false;
        }
        self.view = view;
        self.sort.field = view.scoring_field();
        self.sync_header_focus();
        self.cursor = 0;
        self.push_log(format!("[INFO] Scoring view: {}", view_label(view)));
        true
    }

    pub fn toggle_view(&mut self) -> bool {
        let next = match self.view {
            ScoringView::Ppr => ScoringView::NonPpr,
            ScoringView::NonPpr => ScoringView::Ppr,
        };
        self.set_view(next)
    }

    pub fn focus_next_column(&mut self) {
        let total = self.view.columns().len();
        self.header_focus = (self.header_focus + 1) % total;
    }

    pub fn focus_prev_column(&mut self) {
        let total = self.view.columns().len();
        if self.header_focus == 0 {
            self.header_focus = total - 1;
        } else {
            self.header_focus -= 1;
        }
    }

    fn sync_header_focus(&mut self) {
        if let Some(pos) = self.view.columns().iter().position(|f| *f == self.sort.field) {
            self.header_focus = pos;
        }
    }

    /// Moves to `page` when it lies within `1..=total_pages`.
    pub fn change_page(&mut self, page: usize) -> bool {
        if page == 0 || page > self.total_pages() {
            return false;
        }
        self.page = page;
        self.cursor = 0;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.change_page(self.page + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        self.change_page(self.page.saturating_sub(1))
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
        self.cursor = 0;
    }

    pub fn push_search_char(&mut self, c: char) {
        let mut search = std::mem::take(&mut self.search);
        search.push(c);
        self.set_search(search);
    }

    pub fn pop_search_char(&mut self) {
        let mut search = std::mem::take(&mut self.search);
        search.pop();
        self.set_search(search);
    }

    pub fn select_next(&mut self) {
        let total = self.page_records().len();
        if total == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = (self.cursor + 1) % total;
    }

    pub fn select_prev(&mut self) {
        let total = self.page_records().len();
        if total == 0 {
            self.cursor = 0;
            return;
        }
        if self.cursor == 0 {
            self.cursor = total - 1;
        } else {
            self.cursor -= 1;
        }
    }

    pub fn clamp_cursor(&mut self) {
        let total = self.page_records().len();
        if total == 0 {
            self.cursor = 0;
        } else if self.cursor >= total {
            self.cursor = total - 1;
        }
    }

    pub fn cursor_player(&self) -> Option<String> {
        self.page_records()
            .get(self.cursor)
            .map(|r| r.player.clone())
    }

    /// Toggles `player` on the team. Names without a loaded record are never
    /// added; the call is then a no-op returning `false`.
    pub fn toggle_player(&mut self, player: &str) -> bool {
        if !self.team.contains(player) && !self.records.iter().any(|r| r.player == player) {
            self.push_log(format!("[WARN] {player} is not in the loaded stats"));
            return false;
        }
        let selected = self.team.toggle(player);
        let verb = if selected { "Added" } else { "Removed" };
        self.push_log(format!("[INFO] {verb} {player}"));
        selected
    }

    /// Toggles the player under the cursor. `None` when the page is empty.
    pub fn toggle_cursor_player(&mut self) -> Option<bool> {
        let player = self.cursor_player()?;
        Some(self.toggle_player(&player))
    }

    pub fn reset_team(&mut self) {
        self.team.reset();
        self.push_log("[INFO] Team reset");
    }

    pub fn total_points(&self) -> f64 {
        self.team
            .total_points(&self.records, self.view.scoring_field())
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

/// Sorted + filtered rows for the current search, with the active page.
#[derive(Debug, Clone)]
pub struct TableView<'a> {
    pub filtered: Vec<&'a PlayerStatRecord>,
    pub page: usize,
}

impl<'a> TableView<'a> {
    pub fn rows(&self) -> &[&'a PlayerStatRecord] {
        stats::paginate(&self.filtered, self.page)
    }

    pub fn total_pages(&self) -> usize {
        stats::page_count(self.filtered.len())
    }
}

#[derive(Debug, Clone)]
pub enum Delta {
    SetStats {
        records: Vec<PlayerStatRecord>,
        updated: String,
    },
    FetchFailed(String),
    Log(String),
}

#[derive(Debug, Clone)]
pub enum ProviderCommand {
    FetchStats { sort: SortSpec },
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetStats { records, updated } => {
            state.fetches_in_flight = state.fetches_in_flight.saturating_sub(1);
            state.loading = false;
            state.error = None;
            state.updated = Some(updated);
            state.records = records;

            let dropped = state.team.retain_loaded(&state.records);
            if dropped > 0 {
                state.push_log(format!(
                    "[INFO] Dropped {dropped} selected player(s) missing from refreshed stats"
                ));
            }

            let total = state.table_view().total_pages();
            if total == 0 {
                state.page = 1;
            } else if state.page > total {
                state.page = total;
            }
            state.clamp_cursor();
            state.push_log(format!(
                "[INFO] Loaded {} player records",
                state.records.len()
            ));
        }
        Delta::FetchFailed(message) => {
            state.fetches_in_flight = state.fetches_in_flight.saturating_sub(1);
            state.loading = false;
            state.push_log(format!("[WARN] Stats fetch error: {message}"));
            state.error = Some(message);
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}

pub fn view_label(view: ScoringView) -> &'static str {
    match view {
        ScoringView::Ppr => "PPR",
        ScoringView::NonPpr => "Non-PPR",
    }
}

pub fn direction_label(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Asc => "asc",
        SortDirection::Desc => "desc",
    }
}

pub fn direction_marker(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Asc => "▲",
        SortDirection::Desc => "▼",
    }
}
