//! Glass block refraction
//!
//! The ray refracts into the block at its entry face, then bounces inside
//! the unit square until a face lets it out.

use glam::DVec2;

use super::cell::Interaction;
use super::geometry::{Axis, RaySegment, boundary_normal, refract};
use crate::consts::{AIR_INDEX, GLASS_BOUNCE_LIMIT};

const HALF: f64 = 0.5;

/// Distance along `dir` to the nearest face of the cell square ahead
fn nearest_face(pos: DVec2, dir: DVec2) -> Option<(f64, Axis)> {
    let tx = axis_distance(pos.x, dir.x);
    let ty = axis_distance(pos.y, dir.y);
    match (tx, ty) {
        (Some(tx), Some(ty)) if tx < ty => Some((tx, Axis::X)),
        (_, Some(ty)) => Some((ty, Axis::Y)),
        (Some(tx), None) => Some((tx, Axis::X)),
        (None, None) => None,
    }
}

fn axis_distance(pos: f64, vel: f64) -> Option<f64> {
    if vel == 0.0 {
        return None;
    }
    Some(((vel.signum() * HALF - pos) / vel).max(0.0))
}

pub fn glass_interact(index: f64, local_pos: DVec2, direction: DVec2, normal: DVec2) -> Interaction {
    let (inside, reflected) = refract(direction, normal, AIR_INDEX, index);
    if reflected {
        return Interaction::redirect(local_pos, inside);
    }

    let mut segments = vec![RaySegment::new(local_pos, inside)];
    let mut pos = local_pos;
    let mut dir = inside;

    for _ in 0..GLASS_BOUNCE_LIMIT {
        let Some((t, axis)) = nearest_face(pos, dir) else {
            break;
        };
        let exit = pos + dir * t;
        let face_normal = boundary_normal(dir, axis);
        let (out, bounced) = refract(dir, face_normal, index, AIR_INDEX);

        segments.push(RaySegment::new(exit, out));
        if !bounced {
            return Interaction {
                segments,
                terminate: false,
            };
        }
        pos = exit;
        dir = out;
    }

    log::debug!("glass bounce limit reached at {pos:?}");
    Interaction {
        segments,
        terminate: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_incidence_goes_straight_through() {
        let result = glass_interact(1.5, DVec2::new(0.0, -0.5), DVec2::Y, DVec2::NEG_Y);
        assert!(!result.terminate);
        assert_eq!(result.segments.len(), 2);

        let entry = result.segments[0];
        let exit = result.segments[1];
        assert!(entry.direction.abs_diff_eq(DVec2::Y, 1e-12));
        assert!(exit.start.abs_diff_eq(DVec2::new(0.0, 0.5), 1e-12));
        assert!(exit.direction.abs_diff_eq(DVec2::Y, 1e-12));
    }

    #[test]
    fn test_oblique_entry_exits_parallel_on_opposite_face() {
        let dir = DVec2::new(0.3, 1.0).normalize();
        let result = glass_interact(1.5, DVec2::new(-0.2, -0.5), dir, DVec2::NEG_Y);
        assert!(!result.terminate);
        assert_eq!(result.segments.len(), 2);

        // Bent toward the normal inside
        assert!(result.segments[0].direction.x < dir.x);
        let exit = result.segments[1];
        assert!((exit.start.y - 0.5).abs() < 1e-12);
        // Parallel faces: leaves with the original heading
        assert!(exit.direction.abs_diff_eq(dir, 1e-12));
    }

    #[test]
    fn test_total_internal_reflection_on_side_face() {
        // Steep entry through the top lands on the right face past the critical angle
        let angle = 80f64.to_radians();
        let dir = DVec2::new(angle.sin(), angle.cos());
        let result = glass_interact(1.5, DVec2::new(0.4, -0.5), dir, DVec2::NEG_Y);
        assert!(!result.terminate);
        assert!(result.segments.len() >= 3);

        let bounce = result.segments[1];
        assert!((bounce.start.x - 0.5).abs() < 1e-12);
        assert!(bounce.direction.x < 0.0);

        let exit = result.segments.last().unwrap();
        assert!(exit.start.x.abs() <= 0.5 + 1e-12 && exit.start.y.abs() <= 0.5 + 1e-12);
    }

    #[test]
    fn test_index_below_air_can_reflect_at_entry() {
        let angle = 70f64.to_radians();
        let dir = DVec2::new(angle.sin(), angle.cos());
        let result = glass_interact(0.8, DVec2::new(0.0, -0.5), dir, DVec2::NEG_Y);
        assert_eq!(result.segments.len(), 1);
        assert!(!result.terminate);
        assert!(result.segments[0].direction.y < 0.0);
    }
}
