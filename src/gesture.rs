// Turns per-frame pointer samples (button state + position) into drag events.

use crate::types::Point;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragEvent {
    Start(Point),
    Move(Point),
    End,
}

/// Remembers whether a drag is in progress and where the pointer last was.
#[derive(Debug, Default)]
pub struct DragTracker {
    last: Option<Point>,
    dragging: bool,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Feed one sample. `pos` is `None` when the pointer is outside the canvas;
    /// a drag that leaves the canvas just stops producing moves.
    pub fn update(&mut self, down: bool, pos: Option<Point>) -> Option<DragEvent> {
        match (self.dragging, down, pos) {
            (false, true, Some(p)) => {
                self.dragging = true;
                self.last = Some(p);
                Some(DragEvent::Start(p))
            }
            (true, true, Some(p)) if self.last != Some(p) => {
                self.last = Some(p);
                Some(DragEvent::Move(p))
            }
            (true, false, _) => {
                self.dragging = false;
                self.last = None;
                Some(DragEvent::End)
            }
            _ => None,
        }
    }
}
