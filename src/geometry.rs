use crate::types::Landmark;

const EPSILON: f64 = 1e-9;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn between(from: Landmark, to: Landmark) -> Self {
        Self {
            x: to.x - from.x,
            y: to.y - from.y,
            z: to.z - from.z,
        }
    }

    pub fn dot(self, other: Vector) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn is_zero(self) -> bool {
        self.length() < EPSILON
    }
}

pub fn distance(p1: Landmark, p2: Landmark) -> f64 {
    Vector::between(p1, p2).length()
}

/// Unit vector pointing from `p1` to `p2`, or [`Vector::ZERO`] when the two
/// points coincide.
pub fn normalized_vector(p1: Landmark, p2: Landmark) -> Vector {
    let v = Vector::between(p1, p2);
    let len = v.length();
    if len < EPSILON {
        Vector::ZERO
    } else {
        Vector {
            x: v.x / len,
            y: v.y / len,
            z: v.z / len,
        }
    }
}

/// Angle in radians at vertex `p2` formed by `p1` and `p3`. Returns 0.0 if
/// either leg has zero length.
pub fn angle(p1: Landmark, p2: Landmark, p3: Landmark) -> f64 {
    let a = normalized_vector(p2, p1);
    let b = normalized_vector(p2, p3);
    if a.is_zero() || b.is_zero() {
        return 0.0;
    }
    a.dot(b).clamp(-1.0, 1.0).acos()
}

pub fn centroid(points: &[Landmark]) -> Option<Landmark> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sx, sy, sz) = points.iter().fold((0.0, 0.0, 0.0), |acc, p| {
        (acc.0 + p.x, acc.1 + p.y, acc.2 + p.z)
    });
    Some(Landmark::new(sx / n, sy / n, sz / n))
}
