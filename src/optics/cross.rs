//! Cross cell: a round body with a cross-shaped slot cut through it
//!
//! The slot is two perpendicular arms of half-width `width` along the cell's
//! local axes (after rotation). A ray that stays inside one arm from one side
//! of the circle to the other passes; anything else is stopped where it first
//! meets solid material.

use glam::DVec2;

use super::cell::Interaction;
use crate::consts::CROSS_RADIUS;
use crate::rotate;

/// Which slot arm a point lies in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arm {
    /// Along the x axis (|y| < width)
    Horizontal,
    /// Along the y axis (|x| < width)
    Vertical,
}

fn arm_at(p: DVec2, width: f64) -> Option<Arm> {
    if p.x.abs() < width {
        Some(Arm::Vertical)
    } else if p.y.abs() < width {
        Some(Arm::Horizontal)
    } else {
        None
    }
}

pub fn cross_interact(rotation: f64, width: f64, local_pos: DVec2, direction: DVec2) -> Interaction {
    let dir_len = direction.length();
    if dir_len == 0.0 {
        return Interaction::stop(local_pos, direction);
    }

    // Broad phase: perpendicular distance from the center to the ray line
    if (local_pos.perp_dot(direction) / dir_len).abs() > CROSS_RADIUS {
        return Interaction::pass();
    }

    let p = rotate(local_pos, -rotation);
    let d = rotate(direction, -rotation);

    let a = d.length_squared();
    let b = 2.0 * p.dot(d);
    let c = p.length_squared() - CROSS_RADIUS * CROSS_RADIUS;
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return Interaction::pass();
    }

    let sqrt_disc = disc.sqrt();
    let t2 = (-b + sqrt_disc) / (2.0 * a);
    if t2 < 0.0 {
        // Circle lies behind the ray
        return Interaction::pass();
    }
    // Ray starting inside the body enters at its own origin
    let t1 = ((-b - sqrt_disc) / (2.0 * a)).max(0.0);

    let h1 = p + d * t1;
    let h2 = p + d * t2;

    let through_vertical = h1.x.abs() < width && h2.x.abs() < width;
    let through_horizontal = h1.y.abs() < width && h2.y.abs() < width;
    if through_vertical || through_horizontal {
        return Interaction::pass();
    }

    let hit = solid_hit(p, d, h1, t1, t2, width).unwrap_or(h1);
    Interaction::stop(rotate(hit, rotation), direction)
}

/// Where the ray, entering the circle at `h1`, first touches solid material
///
/// `None` when no clip against the slot walls lands on the chord.
fn solid_hit(p: DVec2, d: DVec2, h1: DVec2, t1: f64, t2: f64, width: f64) -> Option<DVec2> {
    let Some(entered) = arm_at(h1, width) else {
        return Some(h1);
    };

    let Some(t) = wall_exit(p, d, entered, width) else {
        return Some(h1);
    };
    if t < t1 || t > t2 {
        return None;
    }
    let rh = p + d * t;

    // Clip landed in the central square: continue along the other arm
    let other = match entered {
        Arm::Vertical => Arm::Horizontal,
        Arm::Horizontal => Arm::Vertical,
    };
    let inside_other = match other {
        Arm::Horizontal => rh.y.abs() < width,
        Arm::Vertical => rh.x.abs() < width,
    };
    if !inside_other {
        return Some(rh);
    }

    let t = wall_exit(p, d, other, width)?;
    (t >= t1 && t <= t2).then(|| p + d * t)
}

/// Ray parameter where it leaves `arm` through one of its walls
///
/// `None` when the ray runs parallel to the arm's walls.
fn wall_exit(p: DVec2, d: DVec2, arm: Arm, width: f64) -> Option<f64> {
    let (pos, vel) = match arm {
        Arm::Vertical => (p.x, d.x),
        Arm::Horizontal => (p.y, d.y),
    };
    if vel == 0.0 {
        return None;
    }
    Some((vel.signum() * width - pos) / vel)
}
