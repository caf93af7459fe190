//! Vector helpers for ray/cell interaction
//!
//! Reflection, Snell refraction with total internal reflection, and
//! ray/segment intersection. Normals are expected to be unit length.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::PARALLEL_EPSILON;

/// One leg of a ray: a point and the direction leaving it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaySegment {
    pub start: DVec2,
    pub direction: DVec2,
}

impl RaySegment {
    pub fn new(start: DVec2, direction: DVec2) -> Self {
        Self { start, direction }
    }
}

/// Axis of a grid line or cell face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Vertical line (constant x)
    X,
    /// Horizontal line (constant y)
    Y,
}

#[inline]
pub fn dot(v1: DVec2, v2: DVec2) -> f64 {
    v1.x * v2.x + v1.y * v2.y
}

/// Reflect a direction off a surface with the given normal
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect(incident: DVec2, normal: DVec2) -> DVec2 {
    incident - 2.0 * dot(incident, normal) * normal
}

/// Refract `incident` through a boundary from index `n1` into `n2`
///
/// Returns the new direction and whether total internal reflection occurred,
/// in which case the direction is the mirror reflection instead.
pub fn refract(incident: DVec2, normal: DVec2, n1: f64, n2: f64) -> (DVec2, bool) {
    let mut normal = normal;
    let mut cos_i = -dot(normal, incident);
    if cos_i < 0.0 {
        // Normal must face the incoming ray
        normal = -normal;
        cos_i = -cos_i;
    }

    let eta = n1 / n2;
    let sin_t2 = eta * eta * (1.0 - cos_i * cos_i);
    if sin_t2 > 1.0 {
        return (reflect(incident, normal), true);
    }

    let cos_t = (1.0 - sin_t2).sqrt();
    (eta * incident + (eta * cos_i - cos_t) * normal, false)
}

/// Intersect a ray with the segment `p1..p2`
///
/// Returns `None` when they are parallel, when the hit lies behind the ray
/// origin, or when it falls outside the segment.
pub fn line_segment_intersection(
    ray_start: DVec2,
    ray_dir: DVec2,
    p1: DVec2,
    p2: DVec2,
) -> Option<DVec2> {
    let seg = p2 - p1;
    let denom = ray_dir.perp_dot(seg);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let diff = p1 - ray_start;
    let t1 = diff.perp_dot(seg) / denom;
    let t2 = diff.perp_dot(ray_dir) / denom;

    if t1 < 0.0 || !(0.0..=1.0).contains(&t2) {
        return None;
    }
    Some(ray_start + ray_dir * t1)
}

/// Normal of a crossed grid line or cell face, pointing back against `direction`
#[inline]
pub fn boundary_normal(direction: DVec2, axis: Axis) -> DVec2 {
    match axis {
        Axis::X => DVec2::new(-direction.x.signum(), 0.0),
        Axis::Y => DVec2::new(0.0, -direction.y.signum()),
    }
}
