//! Bolt reveal and fade timing

/// Reveal, hold and fade windows for a bolt, in seconds since spawn
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoltTiming {
    /// Time for the main stroke to draw from top to bottom
    pub reveal: f32,
    /// Full opacity until this age
    pub hold: f32,
    /// Linear fade ends here and the bolt is removed
    pub lifetime: f32,
}

impl Default for BoltTiming {
    fn default() -> Self {
        Self {
            reveal: 0.06,
            hold: 0.15,
            lifetime: 0.6,
        }
    }
}

impl BoltTiming {
    pub fn opacity(&self, age: f32) -> f32 {
        if age <= self.hold {
            return 1.0;
        }
        let span = (self.lifetime - self.hold).max(f32::EPSILON);
        (1.0 - (age - self.hold) / span).clamp(0.0, 1.0)
    }

    pub fn is_expired(&self, age: f32) -> bool {
        age >= self.lifetime
    }
}

/// Main-stroke segments drawn at `age`: `ceil(total * min(1, age / reveal))`
pub fn segments_drawn(total: usize, age: f32, reveal: f32) -> usize {
    if reveal <= 0.0 {
        return total;
    }
    let fraction = (age / reveal).clamp(0.0, 1.0);
    ((total as f32 * fraction).ceil() as usize).min(total)
}

/// Segments of a branch drawn given how far its parent has drawn.
///
/// A branch stays hidden until the parent has drawn past its attachment
/// vertex, then grows one segment per parent segment.
pub fn branch_segments_drawn(len: usize, parent_drawn: usize, start_index: usize) -> usize {
    if start_index < parent_drawn {
        len.min(parent_drawn - start_index)
    } else {
        0
    }
}
