use crate::{
    config::model::ResolvedConfig,
    foundation::{
        core::{BezPath, Canvas, Point, Rgba8},
        error::SmudgeResult,
        rng::RandomStream,
    },
    render::layer::Layer,
};

/// Quadratic segments per curve.
pub const SEGMENTS_PER_CURVE: usize = 3;

/// One planned curve, in canvas coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct CurvePlan {
    /// Stroke color.
    pub color: Rgba8,
    /// Start point followed by quadratic segments.
    pub path: BezPath,
    /// Control-polygon length of each emitted segment, in order.
    pub segment_lengths: Vec<f64>,
}

/// Summary of the curve overlay for one generation call.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct OverlayStats {
    /// `width + height`, shared by every curve.
    pub budget: f64,
    /// Control-polygon length of every segment across all curves.
    pub segment_lengths: Vec<f64>,
    /// Curves started before the budget ran out.
    pub curves_drawn: u32,
}

impl OverlayStats {
    /// Sum of all segment lengths.
    pub fn total_length(&self) -> f64 {
        self.segment_lengths.iter().sum()
    }
}

/// Plan up to `count` random curves under a shared arc-length budget of `width + height`.
///
/// A curve is started only while the accumulated length is below the budget. Each curve draws
/// its color, its start point, then per segment a control point and an end point offset from
/// the previous end by at most a third of the budget left when the curve started. Points are
/// clamped to `[0, width] x [0, height]`. The curve stops emitting segments as soon as the
/// accumulated length reaches the budget, so the total can overshoot by at most one segment.
pub fn plan_curves(
    width: u32,
    height: u32,
    count: u32,
    rng: &mut dyn RandomStream,
) -> Vec<CurvePlan> {
    let (w, h) = (f64::from(width), f64::from(height));
    let budget = w + h;
    let clamp = |p: Point| Point::new(p.x.clamp(0.0, w), p.y.clamp(0.0, h));

    let mut accumulated = 0.0;
    let mut plans = Vec::new();
    for _ in 0..count {
        if accumulated >= budget {
            break;
        }

        let color = rng.opaque_color();
        let start = Point::new(rng.next_f64_01() * w, rng.next_f64_01() * h);
        let max_segment = (budget - accumulated) / SEGMENTS_PER_CURVE as f64;

        let mut path = BezPath::new();
        path.move_to(start);
        let mut last = start;
        let mut segment_lengths = Vec::with_capacity(SEGMENTS_PER_CURVE);
        for _ in 0..SEGMENTS_PER_CURVE {
            let ctrl = clamp(Point::new(
                last.x + offset(rng, max_segment),
                last.y + offset(rng, max_segment),
            ));
            let end = clamp(Point::new(
                last.x + offset(rng, max_segment),
                last.y + offset(rng, max_segment),
            ));
            path.quad_to(ctrl, end);

            let len = last.distance(ctrl) + ctrl.distance(end);
            segment_lengths.push(len);
            accumulated += len;
            last = end;
            if accumulated >= budget {
                break;
            }
        }

        plans.push(CurvePlan {
            color,
            path,
            segment_lengths,
        });
    }
    plans
}

fn offset(rng: &mut dyn RandomStream, max_segment: f64) -> f64 {
    (rng.next_f64_01() * 2.0 - 1.0) * max_segment
}

/// Plan the overlay and stroke it onto the canvas with the configured line width.
pub fn render_curves(
    canvas: &mut Canvas,
    config: &ResolvedConfig,
    rng: &mut dyn RandomStream,
) -> SmudgeResult<OverlayStats> {
    let plans = plan_curves(config.width, config.height, config.curve_count, rng);

    if !canvas.is_empty() && !plans.is_empty() {
        let mut layer = Layer::for_canvas(canvas)?;
        for plan in &plans {
            layer.stroke_path(&plan.path, plan.color, config.line_width);
        }
        layer.composite_onto(canvas)?;
    }

    let stats = OverlayStats {
        budget: f64::from(config.width) + f64::from(config.height),
        segment_lengths: plans
            .iter()
            .flat_map(|p| p.segment_lengths.iter().copied())
            .collect(),
        curves_drawn: plans.len() as u32,
    };
    tracing::debug!(
        curves = stats.curves_drawn,
        length = stats.total_length(),
        budget = stats.budget,
        "drew curve overlay"
    );
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/curves.rs"]
mod tests;
