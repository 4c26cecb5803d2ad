//! Shape generation for 2D primitives
//!
//! Everything is emitted as triangle lists in play-field pixels.

use glam::Vec2;
use std::f32::consts::PI;

use super::RenderSnapshot;
use super::vertex::{Vertex, colors};
use crate::sim::ArcSegment;

/// Width of outline strokes (walls, ripple rings)
const STROKE: f32 = 1.5;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Axis-aligned filled rectangle (two triangles)
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Rectangle outline built from four thin bars
pub fn rect_outline(min: Vec2, max: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(24);
    vertices.extend(rect(min, Vec2::new(max.x, min.y + width), color));
    vertices.extend(rect(Vec2::new(min.x, max.y - width), max, color));
    vertices.extend(rect(min, Vec2::new(min.x + width, max.y), color));
    vertices.extend(rect(Vec2::new(max.x - width, min.y), max, color));
    vertices
}

/// Generate vertices for an arc band centered on `center`
pub fn arc_segment(
    center: Vec2,
    arc: &ArcSegment,
    color: [f32; 4],
    segments_per_radian: f32,
) -> Vec<Vertex> {
    let span = arc.angular_span();
    let num_segments = ((span * segments_per_radian) as u32).max(4);
    let inner_r = arc.inner_radius().max(0.0);
    let outer_r = arc.outer_radius();

    let mut vertices = Vec::with_capacity((num_segments * 6) as usize);

    for i in 0..num_segments {
        let t1 = i as f32 / num_segments as f32;
        let t2 = (i + 1) as f32 / num_segments as f32;

        let theta1 = arc.theta_start + t1 * span;
        let theta2 = arc.theta_start + t2 * span;

        let dir1 = Vec2::new(theta1.cos(), theta1.sin());
        let dir2 = Vec2::new(theta2.cos(), theta2.sin());
        let inner1 = center + dir1 * inner_r;
        let outer1 = center + dir1 * outer_r;
        let inner2 = center + dir2 * inner_r;
        let outer2 = center + dir2 * outer_r;

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Upward half rings of an active ripple
pub fn ripple(center: Vec2, rings: &[f32]) -> Vec<Vertex> {
    rings
        .iter()
        .filter(|r| **r > 0.0)
        .flat_map(|&r| {
            let band = ArcSegment {
                thickness: STROKE,
                ..ArcSegment::upper_half_ring(r)
            };
            arc_segment(center, &band, colors::RIPPLE, 8.0)
        })
        .collect()
}

/// Full frame: background, walls, bullets with ripples, player, and a game-over tint
pub fn frame(snapshot: &RenderSnapshot) -> Vec<Vertex> {
    let [left, top, width, height] = snapshot.walls.map(|v| v as f32);
    let [frame_w, frame_h] = snapshot.frame_size.map(|v| v as f32);
    let mut vertices = rect(Vec2::ZERO, Vec2::new(frame_w, frame_h), colors::BACKGROUND);
    vertices.extend(rect_outline(
        Vec2::new(left, top),
        Vec2::new(left + width, top + height),
        STROKE,
        colors::WALL,
    ));

    let dot = snapshot.bullet_size / 2.0;
    for sprite in &snapshot.fired {
        if let Some(rings) = &sprite.rings {
            vertices.extend(ripple(sprite.pos, rings));
        }
        vertices.extend(circle(sprite.pos, dot, colors::FIRED_BULLET, 8));
    }
    for sprite in &snapshot.bouncing {
        vertices.extend(circle(sprite.pos, dot, colors::BOUNCING_BULLET, 8));
    }

    let player_min = snapshot.player_pos.as_vec2();
    let player_max = player_min + Vec2::splat(snapshot.player_size as f32);
    vertices.extend(rect(player_min, player_max, colors::PLAYER));

    if snapshot.game_over {
        vertices.extend(rect(
            Vec2::new(left, top),
            Vec2::new(left + width, top + height),
            colors::GAME_OVER_TINT,
        ));
    }

    vertices
}
