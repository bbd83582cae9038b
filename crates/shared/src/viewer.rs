//! The viewer controller: single owner of the loaded points, the pan/zoom
//! transform, the in-progress gesture and the selection.
//!
//! The frontend keeps one `Viewer` in a signal and dispatches every input into
//! it; rendering reads back from the accessors.

use crate::chart::{sheet_heading, ChartData, ChartKind, FULL_SHEET_HEADING};
use crate::error::{LoadError, SelectionError};
use crate::gesture::{GestureOutcome, GestureRouter, GestureSession, InputEvent};
use crate::index::PointIndex;
use crate::models::{parse_leading_int, FloorData, Point, PointId, PointKind, ViewportSnapshot};
use crate::selection::{BrowseKind, CompareView, Mode, SelectionState, Sheet};
use crate::viewport::{is_mobile_width, ScreenRect, Size, Viewport};

/// Value used when a range bound is not a number.
pub const DEFAULT_RANGE_BOUND: i64 = 1;

/// Parse a range input box: leading integer; zero and non-numbers are [`DEFAULT_RANGE_BOUND`].
pub fn parse_range_bound(input: &str) -> i64 {
    parse_leading_int(input)
        .filter(|&n| n != 0)
        .unwrap_or(DEFAULT_RANGE_BOUND)
}

/// Before the data file has loaded the viewer is empty: no points, identity transform.
#[derive(Debug, Clone, Default)]
pub struct Viewer {
    index: PointIndex,
    viewport: Viewport,
    gestures: GestureRouter,
    selection: SelectionState,
    persisted: Option<ViewportSnapshot>,
    viewport_size: Size,
    content_size: Option<Size>,
    /// The transform is an automatic fit the user hasn't touched yet.
    auto_fit: bool,
    notice: Option<String>,
}

impl Viewer {
    pub fn new(data: FloorData) -> Result<Self, LoadError> {
        let index = PointIndex::new(data.points)?;
        tracing::debug!(points = index.len(), "viewer initialized");
        Ok(Self {
            index,
            viewport: Viewport::default(),
            gestures: GestureRouter::new(),
            selection: SelectionState::new(),
            persisted: data.viewport_state,
            viewport_size: Size::default(),
            content_size: None,
            auto_fit: false,
            notice: None,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Self::new(FloorData::from_json(json)?)
    }

    /// First layout: restore the persisted transform on desktop, fit otherwise.
    pub fn initialize_viewport(&mut self, size: Size) {
        self.viewport_size = size;
        match self.persisted {
            Some(snapshot) if !self.is_mobile() => {
                self.viewport = Viewport::from(snapshot);
                self.auto_fit = false;
            }
            _ => self.fit(),
        }
    }

    /// The floor image finished decoding; its natural size is now known.
    /// An untouched automatic fit is redone with the real size.
    pub fn set_content_size(&mut self, content: Size) {
        self.content_size = Some(content);
        if self.auto_fit {
            self.fit();
        }
    }

    /// Window resize. Small screens keep the map fitted.
    pub fn resize(&mut self, size: Size) {
        self.viewport_size = size;
        if self.is_mobile() {
            self.fit();
        }
    }

    pub fn is_mobile(&self) -> bool {
        is_mobile_width(self.viewport_size.width)
    }

    pub fn handle(&mut self, event: InputEvent) -> GestureOutcome {
        let outcome = self.gestures.handle(
            event,
            &mut self.viewport,
            self.selection.box_select_enabled(),
        );
        match &outcome {
            GestureOutcome::PointTapped(id) => self.tap(id),
            GestureOutcome::BoxFinished(rect) => self.merge_box(*rect),
            GestureOutcome::ViewportChanged => self.auto_fit = false,
            _ => {}
        }
        outcome
    }

    /// Point tap by identity.
    pub fn tap(&mut self, id: &PointId) {
        let Some(point) = self.index.get(id) else {
            tracing::warn!(%id, "tap on unknown point");
            return;
        };
        self.selection.tap(point);
        self.selection.follow_last_comment(&self.index);
    }

    fn merge_box(&mut self, rect: ScreenRect) {
        let hits: Vec<PointId> = self
            .index
            .by_screen_bounds(rect, &self.viewport)
            .map(|p| p.id.clone())
            .collect();
        let added = self.selection.merge_box(hits);
        tracing::debug!(added, total = self.selection.selected().len(), "box merged");
    }

    pub fn enter_browse(&mut self, kind: BrowseKind) {
        self.notice = None;
        self.selection.enter_browse(kind);
    }

    pub fn enter_compare(&mut self, view: CompareView) {
        self.notice = None;
        self.selection.enter_compare(view);
    }

    pub fn set_compare_view(&mut self, view: CompareView) {
        self.notice = None;
        self.selection.set_compare_view(view);
    }

    /// Range query from the two text inputs. A rejected query leaves a notice.
    pub fn apply_range(&mut self, from: &str, to: &str) -> Result<usize, SelectionError> {
        let (from, to) = (parse_range_bound(from), parse_range_bound(to));
        match self.selection.apply_range(&self.index, from, to) {
            Ok(count) => {
                self.notice = None;
                self.selection.follow_last_comment(&self.index);
                Ok(count)
            }
            Err(e) => {
                self.notice = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Click on a chart category: add the point with that ordinal.
    pub fn select_chart_category(&mut self, category: usize) -> bool {
        let Some(chart) = self.chart() else {
            return false;
        };
        if chart.kind != ChartKind::Selection {
            return false;
        }
        let Some(ordinal) = chart
            .points
            .get(category)
            .and_then(|id| self.index.get(id))
            .map(Point::ordinal)
        else {
            return false;
        };
        match self.index.find_by_ordinal(ordinal) {
            Some(point) => self.selection.select_from_chart(point),
            None => false,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear_selection();
    }

    pub fn close_sheet(&mut self) {
        self.selection.close_sheet();
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn zoom_in(&mut self) {
        self.auto_fit = false;
        self.viewport.zoom_step(self.viewport_size, true);
    }

    pub fn zoom_out(&mut self) {
        self.auto_fit = false;
        self.viewport.zoom_step(self.viewport_size, false);
    }

    /// Fit-to-screen; also bound to the reset button.
    pub fn fit(&mut self) {
        self.auto_fit = true;
        self.viewport.fit(self.viewport_size, self.content_size);
    }

    /// Markers to render in the current mode, in file order.
    pub fn visible_points(&self) -> impl Iterator<Item = &Point> {
        let media_only = self.mode() == Mode::Browse(BrowseKind::Media);
        self.index.iter().filter(move |p| match p.kind() {
            PointKind::Media => media_only,
            PointKind::Data | PointKind::Command => !media_only,
        })
    }

    pub fn chart(&self) -> Option<ChartData> {
        match self.selection.sheet() {
            Sheet::FullChart => Some(ChartData::build(ChartKind::Full, self.index.chartable())),
            Sheet::SelectionChart => Some(ChartData::build(
                ChartKind::Selection,
                self.selected_points(),
            )),
            Sheet::Closed | Sheet::Detail(_) => None,
        }
    }

    /// Selected points in selection order.
    pub fn selected_points(&self) -> impl Iterator<Item = &Point> {
        self.selection
            .selected()
            .iter()
            .filter_map(|id| self.index.get(id))
    }

    pub fn chart_heading(&self) -> String {
        match self.selection.sheet() {
            Sheet::FullChart => FULL_SHEET_HEADING.to_string(),
            _ => sheet_heading(&self.selected_points().collect::<Vec<_>>()),
        }
    }

    pub fn detail_point(&self) -> Option<&Point> {
        match self.selection.sheet() {
            Sheet::Detail(id) => self.index.get(id),
            _ => None,
        }
    }

    pub fn comment_point(&self) -> Option<&Point> {
        self.selection.comment().and_then(|id| self.index.get(id))
    }

    pub fn is_selected(&self, id: &PointId) -> bool {
        self.selection.selected().contains(id)
    }

    pub fn is_highlighted(&self, id: &PointId) -> bool {
        self.selection.highlighted() == Some(id)
    }

    pub fn mode(&self) -> Mode {
        self.selection.mode()
    }

    pub fn sheet(&self) -> &Sheet {
        self.selection.sheet()
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selection_rect(&self) -> Option<ScreenRect> {
        self.gestures.selection_rect()
    }

    pub fn gesture(&self) -> GestureSession {
        self.gestures.session()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    pub fn index(&self) -> &PointIndex {
        &self.index
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }
}
