// Trajectory projection for the opponent controller

use crate::game::Ball;

/// Reflect a raw straight-line projection off the top and bottom bounds.
///
/// This is a single-reflection fold, not a step-by-step bounce simulation:
/// projections past the far bound are mirrored by whole-height periods.
/// Trajectories with several real bounces come out slightly wrong; that is
/// one of the ways the opponent stays beatable.
pub fn fold_projection(raw_y: f32, field_height: f32) -> f32 {
    let mut y = raw_y;
    if y < 0.0 {
        y = -y;
    }
    if y > field_height {
        let over = y - field_height;
        let periods = (over / field_height).floor() as i64;
        y = if periods % 2 == 0 {
            field_height - over % field_height
        } else {
            over % field_height
        };
    }
    y
}

/// Project where the ball will cross the vertical plane at `plane_x`,
/// folded into the field. Returns None when the ball is not approaching
/// the plane, so the time-to-impact division only ever runs with a
/// positive denominator.
pub fn project_impact(ball: &Ball, plane_x: f32, field_height: f32) -> Option<f32> {
    if ball.dx <= 0.0 {
        return None;
    }
    let distance = plane_x - ball.x;
    if distance <= 0.0 {
        return None;
    }
    let time_to_impact = distance / ball.dx;
    Some(fold_projection(
        ball.y + ball.dy * time_to_impact,
        field_height,
    ))
}
