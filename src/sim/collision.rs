//! Collision predicates
//!
//! Everything here is a plain geometric test on positions; the resolver in
//! `tick` decides what a hit means.

use glam::Vec2;

/// Check if a point lies within (or on) a circle
#[inline]
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance(center) <= radius
}

/// Check if a ray's forward strip covers an entity centre
///
/// The ray occupies `(ray_pos.x, ray_pos.x + ray_width)` horizontally (open
/// interval) and hits anything whose centre is vertically closer than the
/// entity's own radius.
#[inline]
pub fn ray_hits_circle(ray_pos: Vec2, ray_width: f32, center: Vec2, radius: f32) -> bool {
    ray_pos.x < center.x
        && center.x < ray_pos.x + ray_width
        && (ray_pos.y - center.y).abs() < radius
}

/// Check if a falling circle has reached a platform
///
/// The bottom edge must be past the platform's top and the centre strictly
/// inside its horizontal span. There is no lower bound: anything below the
/// top edge and over the platform counts.
#[inline]
pub fn circle_reaches_platform(
    center: Vec2,
    radius: f32,
    platform_pos: Vec2,
    platform_width: f32,
) -> bool {
    center.y + radius > platform_pos.y
        && platform_pos.x < center.x
        && center.x < platform_pos.x + platform_width
}

/// Bounce velocity straight up, keeping speed
#[inline]
pub fn reflect_upward(velocity: Vec2) -> Vec2 {
    Vec2::new(velocity.x, -velocity.y.abs())
}
