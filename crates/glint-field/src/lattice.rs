use glint_core::Vec2;

/// Smallest spacing accepted when building a lattice
pub const MIN_SPACING: f32 = 2.0;

/// Grid of static points covering the surface plus a padding margin
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Lattice {
    points: Vec<Vec2>,
    columns: usize,
    rows: usize,
}

impl Lattice {
    /// Points from `-pad` to `size + pad` on both axes at `spacing`, so that
    /// displacing every point by at most `pad` never exposes an empty edge
    pub fn build(width: f32, height: f32, spacing: f32, pad: f32) -> Self {
        let usable = |v: f32| v.is_finite() && v > 0.0;
        if !usable(width) || !usable(height) || !spacing.is_finite() {
            return Self::default();
        }
        let spacing = spacing.max(MIN_SPACING);
        let pad = if pad.is_finite() { pad.max(0.0) } else { 0.0 };

        let columns = ((width + 2.0 * pad) / spacing).floor() as usize + 1;
        let rows = ((height + 2.0 * pad) / spacing).floor() as usize + 1;
        let mut points = Vec::with_capacity(columns * rows);
        for row in 0..rows {
            for col in 0..columns {
                points.push(Vec2::new(
                    -pad + col as f32 * spacing,
                    -pad + row as f32 * spacing,
                ));
            }
        }
        Self {
            points,
            columns,
            rows,
        }
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_surface_plus_padding() {
        let lattice = Lattice::build(100.0, 50.0, 10.0, 12.0);
        assert_eq!(lattice.columns(), 13);
        assert_eq!(lattice.rows(), 8);
        assert_eq!(lattice.len(), 13 * 8);

        let first = lattice.points()[0];
        assert_eq!(first, Vec2::new(-12.0, -12.0));
        let max_x = lattice.points().iter().map(|p| p.x).fold(f32::MIN, f32::max);
        let max_y = lattice.points().iter().map(|p| p.y).fold(f32::MIN, f32::max);
        // The last column/row reach within one spacing of the padded edge
        assert!(max_x + 10.0 >= 112.0);
        assert!(max_y + 10.0 >= 62.0);
    }

    #[test]
    fn degenerate_inputs_give_empty_lattice() {
        assert!(Lattice::build(0.0, 50.0, 10.0, 0.0).is_empty());
        assert!(Lattice::build(100.0, f32::NAN, 10.0, 0.0).is_empty());
        assert!(Lattice::build(100.0, 50.0, f32::INFINITY, 0.0).is_empty());
    }

    #[test]
    fn spacing_is_clamped() {
        let lattice = Lattice::build(10.0, 10.0, 0.0, 0.0);
        assert_eq!(lattice.columns(), 6);
    }
}
