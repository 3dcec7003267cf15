#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform2D {
    // Affine 2D: [a, b, c, d, e, f] for matrix [[a c e],[b d f],[0 0 1]]
    pub m: [f32; 6],
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2D {
    pub fn identity() -> Self {
        Self {
            m: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        }
    }

    /// Compose two transforms: self ∘ other (apply `other`, then `self`).
    pub fn concat(self, other: Self) -> Self {
        let [a1, b1, c1, d1, e1, f1] = self.m;
        let [a2, b2, c2, d2, e2, f2] = other.m;
        let a = a1 * a2 + c1 * b2;
        let b = b1 * a2 + d1 * b2;
        let c = a1 * c2 + c1 * d2;
        let d = b1 * c2 + d1 * d2;
        let e = a1 * e2 + c1 * f2 + e1;
        let f = b1 * e2 + d1 * f2 + f1;
        Self {
            m: [a, b, c, d, e, f],
        }
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        Self {
            m: [sx, 0.0, 0.0, sy, 0.0, 0.0],
        }
    }

    /// Uniform scale on both axes.
    pub fn uniform_scale(s: f32) -> Self {
        Self::scale(s, s)
    }

    pub fn translate(tx: f32, ty: f32) -> Self {
        Self {
            m: [1.0, 0.0, 0.0, 1.0, tx, ty],
        }
    }

    #[inline]
    pub fn apply(&self, p: [f32; 2]) -> [f32; 2] {
        let [a, b, c, d, e, f] = self.m;
        [a * p[0] + c * p[1] + e, b * p[0] + d * p[1] + f]
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ColorLinPremul {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

// Constructors for ColorLinPremul are defined in color.rs to keep scene.rs focused

#[derive(Clone, Debug, PartialEq)]
pub enum Brush {
    Solid(ColorLinPremul),
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Corners in clockwise order starting at the top-left (y-down space).
    pub fn corners(&self) -> [[f32; 2]; 4] {
        let x1 = self.x + self.w;
        let y1 = self.y + self.h;
        [[self.x, self.y], [x1, self.y], [x1, y1], [self.x, y1]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concat_applies_right_operand_first() {
        let t = Transform2D::uniform_scale(2.0).concat(Transform2D::translate(1.0, 3.0));
        assert_eq!(t.apply([0.0, 0.0]), [2.0, 6.0]);
        assert_eq!(t.apply([1.0, 1.0]), [4.0, 8.0]);
    }

    #[test]
    fn identity_is_neutral() {
        let t = Transform2D::translate(5.0, -2.0);
        assert_eq!(Transform2D::identity().concat(t), t);
        assert_eq!(t.concat(Transform2D::identity()), t);
    }

    #[test]
    fn rect_corners_are_clockwise() {
        let r = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(r.corners(), [[1.0, 2.0], [4.0, 2.0], [4.0, 6.0], [1.0, 6.0]]);
    }
}
