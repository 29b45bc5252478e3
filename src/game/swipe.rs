use super::direction::Direction;

/// Displacement of one finished swipe, in pixels.
/// Positive `dx` is rightwards, positive `dy` is downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeVector {
    pub dx: f32,
    pub dy: f32,
}

impl SwipeVector {
    pub fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    /// A swipe of `length` pixels straight in `direction`
    pub fn toward(direction: Direction, length: f32) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(dx as f32 * length, dy as f32 * length)
    }

    /// Classify the swipe by its dominant axis.
    ///
    /// The swipe is horizontal when `|dx| > |dy|` and vertical otherwise, so
    /// a perfect diagonal counts as vertical. The component along the chosen
    /// axis must be strictly longer than `threshold`, or the swipe does not
    /// register at all.
    pub fn classify(&self, threshold: f32) -> Option<Direction> {
        if self.dx.abs() > self.dy.abs() {
            if self.dx > threshold {
                Some(Direction::Right)
            } else if self.dx < -threshold {
                Some(Direction::Left)
            } else {
                None
            }
        } else if self.dy > threshold {
            Some(Direction::Down)
        } else if self.dy < -threshold {
            Some(Direction::Up)
        } else {
            None
        }
    }
}
