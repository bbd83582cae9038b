//! Interaction mode and the multi-point selection that feeds the chart.

use crate::error::SelectionError;
use crate::index::PointIndex;
use crate::models::{Point, PointId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseKind {
    /// Data and command points; tapping opens the readings sheet.
    Data,
    /// Media points only; tapping opens the media viewer.
    Media,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareView {
    /// Every chartable point is charted; no manual selection.
    Full,
    /// Manual selection by tap, range or box.
    Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browse(BrowseKind),
    Compare(CompareView),
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Browse(BrowseKind::Data)
    }
}

/// Bottom sheet contents.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Sheet {
    #[default]
    Closed,
    Detail(PointId),
    FullChart,
    SelectionChart,
}

/// Ordered, identity-deduplicated selection. The last entry is the highlighted one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: Vec<PointId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

impl SelectionSet {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &PointId) -> bool {
        self.ids.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointId> {
        self.ids.iter()
    }

    pub fn last(&self) -> Option<&PointId> {
        self.ids.last()
    }

    /// Append unless already present. Returns whether it was added.
    pub fn insert(&mut self, id: PointId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn toggle(&mut self, id: PointId) -> Toggle {
        match self.ids.iter().position(|x| *x == id) {
            Some(i) => {
                self.ids.remove(i);
                Toggle::Removed
            }
            None => {
                self.ids.push(id);
                Toggle::Added
            }
        }
    }

    /// Union in file order; returns how many were new.
    pub fn extend<I: IntoIterator<Item = PointId>>(&mut self, ids: I) -> usize {
        ids.into_iter().filter(|id| self.insert(id.clone())).count()
    }

    pub fn replace<I: IntoIterator<Item = PointId>>(&mut self, ids: I) {
        self.ids.clear();
        self.extend(ids);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    mode: Mode,
    selected: SelectionSet,
    /// Single highlighted point outside manual comparison.
    active: Option<PointId>,
    sheet: Sheet,
    /// Point whose comment is shown in the side box.
    comment: Option<PointId>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn selected(&self) -> &SelectionSet {
        &self.selected
    }

    pub fn active(&self) -> Option<&PointId> {
        self.active.as_ref()
    }

    /// The last selected point while comparing, otherwise the active one.
    pub fn highlighted(&self) -> Option<&PointId> {
        match self.mode {
            Mode::Compare(CompareView::Range) => self.selected.last(),
            _ => self.active.as_ref(),
        }
    }

    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    pub fn comment(&self) -> Option<&PointId> {
        self.comment.as_ref()
    }

    /// Shift-drag box selection is only live during manual comparison.
    pub fn box_select_enabled(&self) -> bool {
        self.mode == Mode::Compare(CompareView::Range)
    }

    fn reset(&mut self) {
        self.selected.clear();
        self.active = None;
        self.sheet = Sheet::Closed;
        self.comment = None;
    }

    pub fn enter_browse(&mut self, kind: BrowseKind) {
        tracing::debug!(?kind, "entering browse mode");
        self.mode = Mode::Browse(kind);
        self.reset();
    }

    /// Entering comparison always starts from an empty selection.
    pub fn enter_compare(&mut self, view: CompareView) {
        tracing::debug!(?view, "entering compare mode");
        self.mode = Mode::Compare(view);
        self.reset();
        if view == CompareView::Full {
            self.sheet = Sheet::FullChart;
        }
    }

    /// Switch the comparison sub-mode. `Full` clears the selection and charts
    /// everything; `Range` keeps the selection and waits for input.
    pub fn set_compare_view(&mut self, view: CompareView) {
        if !matches!(self.mode, Mode::Compare(_)) {
            self.enter_compare(view);
            return;
        }
        self.mode = Mode::Compare(view);
        match view {
            CompareView::Full => {
                self.selected.clear();
                self.sheet = Sheet::FullChart;
            }
            CompareView::Range => self.close_sheet(),
        }
    }

    pub fn tap(&mut self, point: &Point) {
        match self.mode {
            Mode::Browse(_) => {
                self.active = Some(point.id.clone());
                self.sheet = Sheet::Detail(point.id.clone());
                self.comment = point.comment.as_ref().map(|_| point.id.clone());
            }
            Mode::Compare(CompareView::Full) => {
                self.active = Some(point.id.clone());
                self.comment = point.comment.as_ref().map(|_| point.id.clone());
            }
            Mode::Compare(CompareView::Range) => {
                if point.is_chartable() {
                    let toggled = self.selected.toggle(point.id.clone());
                    tracing::debug!(id = %point.id, ?toggled, "selection toggled");
                } else {
                    // Notes without readings cannot be charted; just show what they say.
                    self.comment = point.comment.as_ref().map(|_| point.id.clone());
                    return;
                }
                self.sheet = if self.selected.is_empty() {
                    Sheet::Closed
                } else {
                    Sheet::SelectionChart
                };
                if self.selected.is_empty() {
                    self.comment = None;
                }
            }
        }
    }

    /// Called after a tap in manual comparison so the side box follows the
    /// most recently selected point.
    pub fn follow_last_comment(&mut self, index: &PointIndex) {
        if self.mode != Mode::Compare(CompareView::Range) {
            return;
        }
        self.comment = self
            .selected
            .last()
            .and_then(|id| index.get(id))
            .filter(|p| p.comment.is_some())
            .map(|p| p.id.clone());
    }

    /// Replace the selection with every chartable point whose ordinal is in `[from, to]`.
    ///
    /// Rejected ranges and empty results leave the state untouched.
    pub fn apply_range(
        &mut self,
        index: &PointIndex,
        from: i64,
        to: i64,
    ) -> Result<usize, SelectionError> {
        if self.mode != Mode::Compare(CompareView::Range) {
            return Err(SelectionError::NotComparing);
        }
        if from > to {
            tracing::warn!(from, to, "rejected inverted range");
            return Err(SelectionError::InvalidRange { from, to });
        }
        let matches: Vec<PointId> = index
            .by_ordinal_range(from, to)
            .map(|p| p.id.clone())
            .collect();
        if matches.is_empty() {
            tracing::warn!(from, to, "range matched no points");
            return Err(SelectionError::EmptyRange { from, to });
        }
        let count = matches.len();
        self.selected.replace(matches);
        self.sheet = Sheet::SelectionChart;
        Ok(count)
    }

    /// Union box matches into the selection. Returns how many were new.
    pub fn merge_box(&mut self, ids: Vec<PointId>) -> usize {
        if !self.box_select_enabled() {
            return 0;
        }
        let added = self.selected.extend(ids);
        if !self.selected.is_empty() {
            self.sheet = Sheet::SelectionChart;
        }
        added
    }

    /// Chart click: add the point behind a category if it isn't selected yet.
    pub fn select_from_chart(&mut self, point: &Point) -> bool {
        if !self.box_select_enabled() || !point.is_chartable() {
            return false;
        }
        let added = self.selected.insert(point.id.clone());
        if added {
            self.sheet = Sheet::SelectionChart;
        }
        added
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
        self.close_sheet();
    }

    pub fn close_sheet(&mut self) {
        self.sheet = Sheet::Closed;
        self.comment = None;
        if self.mode == Mode::Compare(CompareView::Range) {
            self.active = None;
        }
    }
}
