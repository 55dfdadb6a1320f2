use crate::model::Vec2;

#[inline]
pub fn dist(a: Vec2, b: Vec2) -> f64 {
    (a.x - b.x).hypot(a.z - b.z)
}

#[inline]
pub fn within_square(p: Vec2, center: Vec2, half: f64) -> bool {
    (p.x - center.x).abs() <= half && (p.z - center.z).abs() <= half
}
