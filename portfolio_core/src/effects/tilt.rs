use crate::traits::ElementHandle;


/// An element's box in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// How far a card leans toward the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltProfile {
    /// Rotation reached with the pointer on an edge.
    pub max_deg: f64,
    pub lift_px: f64,
    /// When set the card gets its own perspective and keeps 3D children.
    pub perspective_px: Option<f64>,
}

impl TiltProfile {
    /// `(rotate_x, rotate_y)` in degrees for a pointer at `(x, y)`.
    pub fn angles(&self, rect: Rect, x: f64, y: f64) -> Option<(f64, f64)> {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return None;
        }
        let nx = (x - rect.left) / rect.width;
        let ny = (y - rect.top) / rect.height;

        Some(((0.5 - ny) * 2.0 * self.max_deg, (nx - 0.5) * 2.0 * self.max_deg))
    }

    pub fn transform(&self, rect: Rect, x: f64, y: f64) -> Option<String> {
        let (rx, ry) = self.angles(rect, x, y)?;

        Some(match self.perspective_px {
            Some(perspective) => format!(
                "perspective({}px) translateY(-{}px) rotateX({:.2}deg) rotateY({:.2}deg)",
                perspective, self.lift_px, rx, ry
            ),
            None => format!(
                "rotateX({:.2}deg) rotateY({:.2}deg) translateY(-{}px)",
                rx, ry, self.lift_px
            ),
        })
    }

    /// One-time setup before the first pointer event.
    pub fn prepare<E: ElementHandle>(&self, card: &E) {
        if self.perspective_px.is_some() {
            card.set_style("transform-style", "preserve-3d");
        }
    }

    pub fn track<E: ElementHandle>(&self, card: &E, rect: Rect, x: f64, y: f64) {
        if let Some(transform) = self.transform(rect, x, y) {
            card.set_style("transform", &transform);
        }
    }

    pub fn release<E: ElementHandle>(&self, card: &E) {
        card.set_style("transform", "");
    }
}
