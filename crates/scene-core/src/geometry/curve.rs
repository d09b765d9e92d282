//! Polyline primitives used by the geometry builders.

use glam::Vec3;
use std::f32::consts::TAU;

pub fn segment(a: Vec3, b: Vec3) -> Vec<Vec3> {
    vec![a, b]
}

/// Archimedean spiral around `(cx, cy)`, `segments + 1` points.
pub fn spiral(cx: f32, cy: f32, r0: f32, r1: f32, turns: f32, segments: usize) -> Vec<Vec3> {
    (0..=segments)
        .map(|i| {
            let t = i as f32 / segments as f32;
            let angle = t * TAU * turns;
            let radius = r0 + (r1 - r0) * t;
            Vec3::new(cx + angle.cos() * radius, cy + angle.sin() * radius, 0.0)
        })
        .collect()
}

pub fn arc(cx: f32, cy: f32, radius: f32, start: f32, end: f32, segments: usize) -> Vec<Vec3> {
    (0..=segments)
        .map(|i| {
            let t = i as f32 / segments as f32;
            let angle = start + (end - start) * t;
            Vec3::new(cx + angle.cos() * radius, cy + angle.sin() * radius, 0.0)
        })
        .collect()
}

/// Closed regular polygon (first point repeated at the end).
pub fn polygon(radius: f32, sides: usize) -> Vec<Vec3> {
    arc(0.0, 0.0, radius, 0.0, TAU, sides)
}

/// Centripetal Catmull-Rom through `control`, sampled at `segments + 1`
/// uniformly spaced parameters. Open curve; the ends are extrapolated.
pub fn catmull_rom(control: &[Vec3], segments: usize) -> Vec<Vec3> {
    match control.len() {
        0 => Vec::new(),
        1 => vec![control[0]; segments + 1],
        _ => (0..=segments)
            .map(|i| catmull_rom_point(control, i as f32 / segments as f32))
            .collect(),
    }
}

fn catmull_rom_point(points: &[Vec3], t: f32) -> Vec3 {
    let l = points.len();
    let p = (l - 1) as f32 * t;
    let mut int_point = p.floor() as usize;
    let mut weight = p - int_point as f32;
    if int_point >= l - 1 {
        int_point = l - 2;
        weight = 1.0;
    }

    let p1 = points[int_point];
    let p2 = points[int_point + 1];
    let p0 = if int_point > 0 {
        points[int_point - 1]
    } else {
        p1 * 2.0 - p2
    };
    let p3 = if int_point + 2 < l {
        points[int_point + 2]
    } else {
        p2 * 2.0 - p1
    };

    let mut dt0 = p0.distance_squared(p1).powf(0.25);
    let mut dt1 = p1.distance_squared(p2).powf(0.25);
    let mut dt2 = p2.distance_squared(p3).powf(0.25);
    if dt1 < 1e-4 {
        dt1 = 1.0;
    }
    if dt0 < 1e-4 {
        dt0 = dt1;
    }
    if dt2 < 1e-4 {
        dt2 = dt1;
    }

    let axis = |x0: f32, x1: f32, x2: f32, x3: f32| {
        let t1 = ((x1 - x0) / dt0 - (x2 - x0) / (dt0 + dt1) + (x2 - x1) / dt1) * dt1;
        let t2 = ((x2 - x1) / dt1 - (x3 - x1) / (dt1 + dt2) + (x3 - x2) / dt2) * dt1;
        hermite(x1, x2, t1, t2, weight)
    };
    Vec3::new(
        axis(p0.x, p1.x, p2.x, p3.x),
        axis(p0.y, p1.y, p2.y, p3.y),
        axis(p0.z, p1.z, p2.z, p3.z),
    )
}

#[inline]
fn hermite(x0: f32, x1: f32, t0: f32, t1: f32, w: f32) -> f32 {
    let c2 = -3.0 * x0 + 3.0 * x1 - 2.0 * t0 - t1;
    let c3 = 2.0 * x0 - 2.0 * x1 + t0 + t1;
    x0 + t0 * w + c2 * w * w + c3 * w * w * w
}
