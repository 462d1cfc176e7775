// Vector stroke geometry in source-image coordinates.
// Plain owned data: cloning it is how a snapshot is taken.

use crate::types::Point;

/// Move-to/line-to polylines, one per drag gesture kept.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StrokePath {
    subpaths: Vec<Vec<Point>>,
}

impl StrokePath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new subpath at `p`.
    pub fn move_to(&mut self, p: Point) {
        self.subpaths.push(vec![p]);
    }

    /// Append a segment to the last subpath. Returns false when there is none.
    pub fn line_to(&mut self, p: Point) -> bool {
        match self.subpaths.last_mut() {
            Some(points) => {
                points.push(p);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.subpaths.clear();
    }

    /// A path is empty while it has no segment to stroke.
    /// A lone move-to does not count.
    pub fn is_empty(&self) -> bool {
        self.subpaths.iter().all(|s| s.len() < 2)
    }

    pub fn subpaths(&self) -> &[Vec<Point>] {
        &self.subpaths
    }

    /// Last point of the current subpath, if any.
    pub fn current_point(&self) -> Option<Point> {
        self.subpaths.last().and_then(|s| s.last().copied())
    }

    /// Total number of points across subpaths.
    pub fn len(&self) -> usize {
        self.subpaths.iter().map(Vec::len).sum()
    }

    /// Build the tiny-skia path for a `width × height` canvas, skipping
    /// subpaths without a segment. Segments are clipped to the canvas grown
    /// by `margin` on every side, so far-away points never reach the
    /// rasterizer. `None` when nothing is left to stroke.
    pub(crate) fn to_skia(&self, width: f32, height: f32, margin: f32) -> Option<tiny_skia::Path> {
        let bounds = ClipRect {
            left: -f64::from(margin),
            top: -f64::from(margin),
            right: f64::from(width) + f64::from(margin),
            bottom: f64::from(height) + f64::from(margin),
        };
        let mut pb = tiny_skia::PathBuilder::new();
        for points in self.subpaths.iter().filter(|s| s.len() >= 2) {
            let mut pen: Option<Point> = None;
            for seg in points.windows(2) {
                let Some((a, b)) = bounds.clip(seg[0], seg[1]) else {
                    pen = None;
                    continue;
                };
                if pen != Some(a) {
                    pb.move_to(a.x, a.y);
                }
                pb.line_to(b.x, b.y);
                pen = Some(b);
            }
        }
        pb.finish()
    }
}

/// Clip rectangle in f64 so crossings of very long segments stay exact
/// enough to land on the canvas.
struct ClipRect {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl ClipRect {
    /// Liang-Barsky. Endpoints inside the rectangle come back unchanged;
    /// clipped ones are snapped onto the edge that cut them.
    fn clip(&self, a: Point, b: Point) -> Option<(Point, Point)> {
        let (x0, y0) = (f64::from(a.x), f64::from(a.y));
        let (dx, dy) = (f64::from(b.x) - x0, f64::from(b.y) - y0);
        // (p, q, edge) per side: left, right, top, bottom.
        let sides = [
            (-dx, x0 - self.left, 0),
            (dx, self.right - x0, 1),
            (-dy, y0 - self.top, 2),
            (dy, self.bottom - y0, 3),
        ];
        let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
        let (mut enter, mut exit) = (None, None);
        for (p, q, edge) in sides {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let t = q / p;
            if p < 0.0 {
                if t > t1 {
                    return None;
                }
                if t > t0 {
                    t0 = t;
                    enter = Some(edge);
                }
            } else {
                if t < t0 {
                    return None;
                }
                if t < t1 {
                    t1 = t;
                    exit = Some(edge);
                }
            }
        }
        let start = enter.map_or(a, |edge| self.point_on(edge, x0 + t0 * dx, y0 + t0 * dy));
        let end = exit.map_or(b, |edge| self.point_on(edge, x0 + t1 * dx, y0 + t1 * dy));
        Some((start, end))
    }

    fn point_on(&self, edge: u8, x: f64, y: f64) -> Point {
        let x = x.clamp(self.left, self.right);
        let y = y.clamp(self.top, self.bottom);
        let (x, y) = match edge {
            0 => (self.left, y),
            1 => (self.right, y),
            2 => (x, self.top),
            _ => (x, self.bottom),
        };
        Point::new(x as f32, y as f32)
    }
}
