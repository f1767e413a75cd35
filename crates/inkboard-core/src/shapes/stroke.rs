//! Freehand stroke.

use super::EntityId;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One continuous freehand gesture. Always holds at least one point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StrokeData")]
pub struct Stroke {
    pub(crate) id: EntityId,
    points: Vec<Point>,
}

#[derive(Deserialize)]
struct StrokeData {
    id: EntityId,
    points: Vec<Point>,
}

impl TryFrom<StrokeData> for Stroke {
    type Error = &'static str;

    fn try_from(data: StrokeData) -> Result<Self, Self::Error> {
        let mut stroke = Self::from_points(data.points).ok_or("stroke has no points")?;
        stroke.id = data.id;
        Ok(stroke)
    }
}

impl Stroke {
    /// Start a stroke at a single point.
    pub fn new(start: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            points: vec![start],
        }
    }

    /// Build a stroke from existing points. Returns `None` when empty.
    pub fn from_points(points: Vec<Point>) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4(),
            points,
        })
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Points in motion order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The first point of the gesture.
    pub fn first(&self) -> Point {
        self.points[0]
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Never true for a constructed or deserialized stroke.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Extend the gesture.
    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Rigidly move every point.
    pub fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point += delta;
        }
    }

    /// Overwrite the first point.
    pub fn set_first(&mut self, point: Point) {
        self.points[0] = point;
    }

    /// Axis-aligned bounds of all points.
    pub fn bounds(&self) -> Rect {
        let first = self.first();
        self.points
            .iter()
            .skip(1)
            .fold(Rect::from_points(first, first), |rect, p| rect.union_pt(*p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_starts_with_one_point() {
        let stroke = Stroke::new(Point::new(1.0, 2.0));
        assert_eq!(stroke.len(), 1);
        assert_eq!(stroke.first(), Point::new(1.0, 2.0));
        assert!(!stroke.is_empty());
    }

    #[test]
    fn test_from_points_rejects_empty() {
        assert!(Stroke::from_points(Vec::new()).is_none());
        assert!(Stroke::from_points(vec![Point::ZERO]).is_some());
    }

    #[test]
    fn test_deserialize_requires_points() {
        let id = Uuid::new_v4();
        let empty = format!(r#"{{"id":"{id}","points":[]}}"#);
        assert!(serde_json::from_str::<Stroke>(&empty).is_err());

        let stroke = Stroke::from_points(vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)]).unwrap();
        let json = serde_json::to_string(&stroke).unwrap();
        let parsed: Stroke = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, stroke);
        assert_eq!(parsed.first(), Point::new(1.0, 2.0));
    }

    #[test]
    fn test_translate_moves_every_point() {
        let mut stroke = Stroke::new(Point::new(0.0, 0.0));
        stroke.push(Point::new(10.0, 5.0));
        stroke.translate(Vec2::new(2.0, 3.0));
        assert_eq!(stroke.points(), &[Point::new(2.0, 3.0), Point::new(12.0, 8.0)]);
    }

    #[test]
    fn test_bounds() {
        let stroke = Stroke::from_points(vec![
            Point::new(0.0, 10.0),
            Point::new(100.0, 50.0),
            Point::new(50.0, 0.0),
        ])
        .unwrap();
        let bounds = stroke.bounds();
        assert!((bounds.x0).abs() < f64::EPSILON);
        assert!((bounds.y0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 100.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 50.0).abs() < f64::EPSILON);
    }
}
