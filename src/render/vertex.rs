//! Star-field vertex program evaluated on the CPU.
//!
//! The displacement is a pure function of the rest position and the uniforms, so the particle
//! buffers never change between frames.

use glam::{Vec2, Vec3, Vec4};

use crate::foundation::math::smoothstep;
use crate::frame::system::StarUniforms;

fn mod289_3(x: Vec3) -> Vec3 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

fn mod289_4(x: Vec4) -> Vec4 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

fn permute(x: Vec4) -> Vec4 {
    mod289_4((x * 34.0 + Vec4::ONE) * x)
}

fn taylor_inv_sqrt(r: Vec4) -> Vec4 {
    Vec4::splat(1.792_842_9) - r * 0.853_734_7
}

fn step3(edge: Vec3, x: Vec3) -> Vec3 {
    Vec3::select(x.cmplt(edge), Vec3::ZERO, Vec3::ONE)
}

fn step4(edge: Vec4, x: Vec4) -> Vec4 {
    Vec4::select(x.cmplt(edge), Vec4::ZERO, Vec4::ONE)
}

/// 3D simplex noise in roughly `[-1, 1]`.
pub fn snoise(v: Vec3) -> f32 {
    const C: Vec2 = Vec2::new(1.0 / 6.0, 1.0 / 3.0);
    const D: Vec4 = Vec4::new(0.0, 0.5, 1.0, 2.0);

    let mut i = (v + Vec3::splat(v.dot(Vec3::splat(C.y)))).floor();
    let x0 = v - i + Vec3::splat(i.dot(Vec3::splat(C.x)));

    let g = step3(Vec3::new(x0.y, x0.z, x0.x), x0);
    let l = Vec3::ONE - g;
    let l_zxy = Vec3::new(l.z, l.x, l.y);
    let i1 = g.min(l_zxy);
    let i2 = g.max(l_zxy);

    let x1 = x0 - i1 + Vec3::splat(C.x);
    let x2 = x0 - i2 + Vec3::splat(C.y);
    let x3 = x0 - Vec3::splat(D.y);

    i = mod289_3(i);
    let p = permute(
        permute(
            permute(Vec4::splat(i.z) + Vec4::new(0.0, i1.z, i2.z, 1.0))
                + Vec4::splat(i.y)
                + Vec4::new(0.0, i1.y, i2.y, 1.0),
        ) + Vec4::splat(i.x)
            + Vec4::new(0.0, i1.x, i2.x, 1.0),
    );

    let n_ = 0.142_857_15_f32;
    let ns = Vec3::new(D.w, D.y, D.z) * n_ - Vec3::new(D.x, D.z, D.x);

    let j = p - (p * ns.z * ns.z).floor() * 49.0;

    let x_ = (j * ns.z).floor();
    let y_ = (j - x_ * 7.0).floor();

    let x = x_ * ns.x + Vec4::splat(ns.y);
    let y = y_ * ns.x + Vec4::splat(ns.y);
    let h = Vec4::ONE - x.abs() - y.abs();

    let b0 = Vec4::new(x.x, x.y, y.x, y.y);
    let b1 = Vec4::new(x.z, x.w, y.z, y.w);

    let s0 = b0.floor() * 2.0 + Vec4::ONE;
    let s1 = b1.floor() * 2.0 + Vec4::ONE;
    let sh = -step4(h, Vec4::ZERO);

    let a0 = Vec4::new(b0.x, b0.z, b0.y, b0.w)
        + Vec4::new(s0.x, s0.z, s0.y, s0.w) * Vec4::new(sh.x, sh.x, sh.y, sh.y);
    let a1 = Vec4::new(b1.x, b1.z, b1.y, b1.w)
        + Vec4::new(s1.x, s1.z, s1.y, s1.w) * Vec4::new(sh.z, sh.z, sh.w, sh.w);

    let mut p0 = Vec3::new(a0.x, a0.y, h.x);
    let mut p1 = Vec3::new(a0.z, a0.w, h.y);
    let mut p2 = Vec3::new(a1.x, a1.y, h.z);
    let mut p3 = Vec3::new(a1.z, a1.w, h.w);

    let norm = taylor_inv_sqrt(Vec4::new(p0.dot(p0), p1.dot(p1), p2.dot(p2), p3.dot(p3)));
    p0 *= norm.x;
    p1 *= norm.y;
    p2 *= norm.z;
    p3 *= norm.w;

    let m = (Vec4::splat(0.6) - Vec4::new(x0.dot(x0), x1.dot(x1), x2.dot(x2), x3.dot(x3)))
        .max(Vec4::ZERO);
    let m = m * m;
    42.0 * (m * m).dot(Vec4::new(p0.dot(x0), p1.dot(x1), p2.dot(x2), p3.dot(x3)))
}

struct Vortex {
    center: Vec2,
    strength: f32,
    rate: f32,
}

const VORTICES: [Vortex; 3] = [
    Vortex {
        center: Vec2::new(20.0, 15.0),
        strength: 0.5,
        rate: 0.8,
    },
    Vortex {
        center: Vec2::new(-25.0, -10.0),
        strength: 0.4,
        rate: -0.6,
    },
    Vortex {
        center: Vec2::new(10.0, -20.0),
        strength: 0.3,
        rate: 1.2,
    },
];

/// Displaced position of a star at rest position `pos`.
pub fn displace(pos: Vec3, u: &StarUniforms) -> Vec3 {
    let ts = u.time * 0.3;

    let noise_pos = pos * 0.02 + Vec3::splat(ts * 0.5);
    let noise_x = snoise(noise_pos);
    let noise_y = snoise(noise_pos + Vec3::new(100.0, 0.0, 0.0));
    let noise_z = snoise(noise_pos + Vec3::new(0.0, 100.0, 0.0));

    let xy = pos.truncate();
    let dist = xy.length();

    let mut spiral = Vec2::ZERO;
    for v in &VORTICES {
        let to = xy - v.center;
        let angle = to.y.atan2(to.x) + ts * v.rate;
        spiral += Vec2::new(angle.cos(), angle.sin()) * v.strength / (1.0 + to.length() * 0.05);
    }

    let wave1 = (dist * 0.1 + ts * 2.0).sin() * 0.8;
    let wave2 = (dist * 0.15 + ts * 1.5).cos() * 0.6;

    let mut out = pos;
    out.x += (noise_x * 2.0 + spiral.x + wave1 * 0.5) * u.motion_strength;
    out.y += (noise_y * 2.0 + spiral.y + wave2 * 0.5) * u.motion_strength;
    out.z += (noise_z * 1.5 + (ts + dist * 0.1).sin() * 0.3) * u.motion_strength;

    out.x += spiral.x * (u.vortex_strength - 1.0);
    out.y += spiral.y * (u.vortex_strength - 1.0);

    let pulse = (ts * 0.5).sin() * 0.1 + 1.0;
    out * pulse
}

/// Point diameter in pixels for a star of `size` at view depth `view_z`.
pub fn star_point_size(size: f32, u: &StarUniforms, view_z: f32) -> f32 {
    if view_z >= 0.0 {
        return 0.0;
    }
    size * u.base_size * (300.0 / -view_z)
}

/// Fragment alpha at normalized radius `r` from the sprite center (`0.5` is the edge).
pub fn star_alpha(r: f32, opacity: f32) -> f32 {
    if r > 0.5 {
        return 0.0;
    }
    smoothstep(0.0, 1.0, 1.0 - r * 2.0) * opacity
}

#[cfg(test)]
#[path = "../../tests/unit/render/vertex.rs"]
mod tests;
