use crate::core::Vec3;

/// Integer cell coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl CellKey {
    /// Floor-divide each coordinate by the cell size. Non-finite components
    /// map to 0; values beyond i32 saturate.
    #[inline]
    pub fn from_position(position: Vec3, inv_cell_size: f32) -> Self {
        Self {
            x: axis(position.x, inv_cell_size),
            y: axis(position.y, inv_cell_size),
            z: axis(position.z, inv_cell_size),
        }
    }

    /// `None` when the neighbor would overflow i32
    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
            z: self.z.checked_add(dz)?,
        })
    }
}

#[inline]
fn axis(v: f32, inv_cell_size: f32) -> i32 {
    if v.is_finite() {
        // `as` saturates and maps NaN to 0
        (v * inv_cell_size).floor() as i32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(x: i32, y: i32, z: i32) -> CellKey {
        CellKey { x, y, z }
    }

    #[test]
    fn floors_negative_coordinates() {
        let inv = 1.0 / 0.5;
        assert_eq!(CellKey::from_position(Vec3::new(0.0, 0.49, 0.5), inv), key(0, 0, 1));
        assert_eq!(CellKey::from_position(Vec3::new(-0.01, -0.5, -0.51), inv), key(-1, -1, -2));
    }

    #[test]
    fn sign_does_not_collide() {
        let inv = 1.0;
        let a = CellKey::from_position(Vec3::new(1.5, -1.5, 0.0), inv);
        let b = CellKey::from_position(Vec3::new(-1.5, 1.5, 0.0), inv);
        assert_ne!(a, b);
    }

    #[test]
    fn non_finite_maps_to_origin_cell() {
        let got = CellKey::from_position(Vec3::new(f32::NAN, f32::INFINITY, 1.2), 2.0);
        assert_eq!(got, key(0, 0, 2));
    }

    #[test]
    fn offset_refuses_overflow() {
        let edge = key(i32::MAX, 0, 0);
        assert_eq!(edge.offset(1, 0, 0), None);
        assert_eq!(edge.offset(-1, 1, 0), Some(key(i32::MAX - 1, 1, 0)));
    }
}
