//! Surface coloring and shading.

use genposter_core::{Rgb, Vec3, sub};

/// Viridis key colors at t = 0, 0.25, 0.5, 0.75, 1.
const VIRIDIS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

/// Map `t` (clamped to `0.0..=1.0`) onto the viridis colormap.
pub fn viridis(t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0) * (VIRIDIS.len() - 1) as f64;
    let index = (t.floor() as usize).min(VIRIDIS.len() - 2);
    let local = (t - index as f64) as f32;
    let (r0, g0, b0) = VIRIDIS[index];
    let (r1, g1, b1) = VIRIDIS[index + 1];
    Rgb::from_u8(r0, g0, b0).lerp(Rgb::from_u8(r1, g1, b1), local)
}

/// Unit normal of the plane through `a`, `b`, `c`, or `None` if degenerate.
pub fn calculate_normal(a: &Vec3, b: &Vec3, c: &Vec3) -> Option<Vec3> {
    let u = sub(b, a);
    let v = sub(c, a);
    let normal = [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ];
    let length = (normal[0] * normal[0] + normal[1] * normal[1] + normal[2] * normal[2]).sqrt();
    (length > f64::EPSILON).then(|| [normal[0] / length, normal[1] / length, normal[2] / length])
}

/// Light coming from the upper left, like a lamp over the viewer's shoulder.
const LIGHT_DIR: Vec3 = [-0.5, 0.5, 0.707_106_781_186_547_6];

/// Minimum brightness of a fully unlit face.
const AMBIENT: f64 = 0.35;

/// Lambert shading with an ambient floor. Faces are lit from either side.
pub fn shade(color: Rgb, normal: Option<Vec3>) -> Rgb {
    let Some(normal) = normal else {
        return color;
    };
    let dot = normal[0] * LIGHT_DIR[0] + normal[1] * LIGHT_DIR[1] + normal[2] * LIGHT_DIR[2];
    let intensity = AMBIENT + (1.0 - AMBIENT) * dot.abs();
    color.scaled(intensity as f32)
}
