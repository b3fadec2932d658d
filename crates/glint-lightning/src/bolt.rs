//! Bolt and branch geometry

use glint_core::{Color, FxRng, Vec2};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

/// Shape parameters for bolt generation
#[derive(Clone, Debug, PartialEq)]
pub struct BoltParams {
    /// Main stroke segment length in px
    pub step: f32,
    /// Maximum per-step angle perturbation in radians
    pub jitter: f32,
    /// Branch spawn probability at depth 1
    pub branch_probability: f32,
    /// Per-depth multiplier applied to the spawn probability below depth 1
    pub probability_decay: f32,
    pub max_depth: u32,
    pub min_segments: usize,
    pub max_segments: usize,
    /// Segment length ratio per depth level
    pub length_decay: f32,
    /// Thickness ratio per depth level
    pub thickness_decay: f32,
    /// Branch deflection off the parent direction, radians
    pub deflection: (f32, f32),
}

impl Default for BoltParams {
    fn default() -> Self {
        Self {
            step: 18.0,
            jitter: 0.3,
            branch_probability: 0.35,
            probability_decay: 0.5,
            max_depth: 3,
            min_segments: 3,
            max_segments: 6,
            length_decay: 0.7,
            thickness_decay: 0.6,
            deflection: (0.3, 0.9),
        }
    }
}

impl BoltParams {
    /// Probability that a vertex spawns a branch of the given depth
    pub fn probability_at(&self, depth: u32) -> f32 {
        if depth == 0 || depth > self.max_depth {
            return 0.0;
        }
        self.branch_probability * self.probability_decay.powi(depth as i32 - 1)
    }

    pub fn thickness_at(&self, root: f32, depth: u32) -> f32 {
        root * self.thickness_decay.powi(depth as i32)
    }

    pub fn segment_length_at(&self, depth: u32) -> f32 {
        self.step * self.length_decay.powi(depth as i32)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Branch {
    /// Vertex index in the parent polyline this branch starts from
    pub start_index: usize,
    pub points: Vec<Vec2>,
    pub thickness: f32,
    pub depth: u32,
    pub children: Vec<Branch>,
}

impl Branch {
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    fn count(&self) -> usize {
        1 + self.children.iter().map(Branch::count).sum::<usize>()
    }

    fn deepest(&self) -> u32 {
        self.children
            .iter()
            .map(Branch::deepest)
            .max()
            .unwrap_or(self.depth)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bolt {
    pub points: Vec<Vec2>,
    pub branches: Vec<Branch>,
    pub thickness: f32,
    pub color: Color,
    /// Seconds since the bolt was spawned
    pub age: f32,
}

impl Bolt {
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Total branches at every depth
    pub fn branch_count(&self) -> usize {
        self.branches.iter().map(Branch::count).sum()
    }

    /// Deepest branch level, 0 when the bolt has no branches
    pub fn max_depth(&self) -> u32 {
        self.branches.iter().map(Branch::deepest).max().unwrap_or(0)
    }
}

/// Walk downward from `(start_x, 0)` until `y >= end_y`.
///
/// The heading is clamped to [45°, 135°] (90° is straight down), so every
/// step descends at least `step * sin(45°)` and the walk terminates.
pub fn generate_bolt(
    start_x: f32,
    end_y: f32,
    thickness: f32,
    color: Color,
    params: &BoltParams,
    rng: &mut FxRng,
) -> Bolt {
    let mut points = vec![Vec2::new(start_x, 0.0)];
    let mut branches = Vec::new();

    let min_descent = params.step * FRAC_PI_4.sin();
    let max_steps = if end_y.is_finite() && min_descent > 0.0 {
        (end_y.max(0.0) / min_descent).ceil() as usize + 1
    } else {
        0
    };

    let mut angle = FRAC_PI_2;
    let mut current = points[0];
    for _ in 0..max_steps {
        if current.y >= end_y {
            break;
        }
        angle = (angle + rng.range(-params.jitter, params.jitter))
            .clamp(FRAC_PI_4, 3.0 * FRAC_PI_4);
        current += Vec2::from_angle(angle) * params.step;
        points.push(current);

        if rng.chance(params.probability_at(1)) {
            branches.push(generate_branch(
                current,
                angle,
                points.len() - 1,
                1,
                thickness,
                params,
                rng,
            ));
        }
    }

    Bolt {
        points,
        branches,
        thickness,
        color,
        age: 0.0,
    }
}

/// Grow one branch of `depth` off a parent heading `parent_angle`.
///
/// Each branch has a fixed 3–6 segments and children only below `max_depth`.
pub fn generate_branch(
    origin: Vec2,
    parent_angle: f32,
    start_index: usize,
    depth: u32,
    root_thickness: f32,
    params: &BoltParams,
    rng: &mut FxRng,
) -> Branch {
    let segments = rng.range_usize(params.min_segments, params.max_segments);
    let length = params.segment_length_at(depth);
    let mut angle =
        parent_angle + rng.range(params.deflection.0, params.deflection.1) * rng.sign();

    let mut points = Vec::with_capacity(segments + 1);
    points.push(origin);
    let mut children = Vec::new();
    let mut current = origin;

    for _ in 0..segments {
        angle += rng.range(-params.jitter, params.jitter);
        current += Vec2::from_angle(angle) * length;
        points.push(current);

        let child_depth = depth + 1;
        if child_depth <= params.max_depth && rng.chance(params.probability_at(child_depth)) {
            children.push(generate_branch(
                current,
                angle,
                points.len() - 1,
                child_depth,
                root_thickness,
                params,
                rng,
            ));
        }
    }

    Branch {
        start_index,
        points,
        thickness: params.thickness_at(root_thickness, depth),
        depth,
        children,
    }
}
