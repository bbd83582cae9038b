use std::collections::HashMap;

use crate::error::LoadError;
use crate::models::{Point, PointId, PointKind};
use crate::viewport::{ScreenRect, Viewport};

/// The loaded point set. Order is file order and never changes.
#[derive(Debug, Clone, Default)]
pub struct PointIndex {
    points: Vec<Point>,
    by_id: HashMap<PointId, usize>,
}

impl PointIndex {
    pub fn new(points: Vec<Point>) -> Result<Self, LoadError> {
        let mut by_id = HashMap::with_capacity(points.len());
        for (i, p) in points.iter().enumerate() {
            if by_id.insert(p.id.clone(), i).is_some() {
                return Err(LoadError::DuplicateId(p.id.clone()));
            }
        }
        Ok(Self { points, by_id })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    pub fn get(&self, id: &PointId) -> Option<&Point> {
        self.by_id.get(id).map(|&i| &self.points[i])
    }

    pub fn by_type(&self, kind: PointKind) -> impl Iterator<Item = &Point> {
        self.points.iter().filter(move |p| p.kind() == kind)
    }

    /// Points with signal readings: the only candidates for charting and range/box selection.
    pub fn chartable(&self) -> impl Iterator<Item = &Point> {
        self.points.iter().filter(|p| p.is_chartable())
    }

    /// Chartable points whose ordinal lies in `[from, to]`.
    pub fn by_ordinal_range(&self, from: i64, to: i64) -> impl Iterator<Item = &Point> {
        self.chartable().filter(move |p| (from..=to).contains(&p.ordinal()))
    }

    /// Chartable points whose projected center falls inside `rect`.
    ///
    /// Hit testing uses the exact marker center, not the rendered marker radius.
    pub fn by_screen_bounds<'a>(
        &'a self,
        rect: ScreenRect,
        viewport: &'a Viewport,
    ) -> impl Iterator<Item = &'a Point> + 'a {
        self.chartable()
            .filter(move |p| rect.contains(viewport.map_to_screen(p.position)))
    }

    /// First chartable point carrying the given ordinal.
    pub fn find_by_ordinal(&self, ordinal: i64) -> Option<&Point> {
        self.chartable().find(|p| p.ordinal() == ordinal)
    }
}
