use std::{
    fmt,
    ops::{Index, IndexMut, Mul, MulAssign},
};

use crate::{
    vec3::{cross, dot, normalize},
    MathError, Vec3,
};

/// A 4x4 homogeneous transform, stored row-major.
///
/// Points are treated as row vectors (`p' = p * M`), so the translation lives
/// in row 3 (`data[12..15]`). Read as a flat slice, the same 16 floats are the
/// column-major layout expected by `glUniformMatrix4fv`, and can be uploaded
/// without transposing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    pub data: [f32; 16],
}

/// Principal axis for single-axis rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Outcome of [`Mat4::rotate_by_flags`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateStatus {
    /// The matrix was rotated about the selected axis.
    Rotated,
    /// No axis was selected; the matrix is unchanged.
    NotRotated,
}

impl Axis {
    /// Maps three independent axis flags to a single axis.
    ///
    /// Returns `Ok(None)` when no flag is set and an error when more than one
    /// flag is set.
    pub fn from_flags(x: bool, y: bool, z: bool) -> Result<Option<Axis>, MathError> {
        match (x, y, z) {
            (false, false, false) => Ok(None),
            (true, false, false) => Ok(Some(Axis::X)),
            (false, true, false) => Ok(Some(Axis::Y)),
            (false, false, true) => Ok(Some(Axis::Z)),
            _ => Err(MathError::ambiguous_axis(x as u8 + y as u8 + z as u8)),
        }
    }
}

impl Mat4 {
    pub fn new_identity() -> Self {
        let mut data = [0.0; 16];
        data[0] = 1.0;
        data[5] = 1.0;
        data[10] = 1.0;
        data[15] = 1.0;
        Self { data }
    }

    pub fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        let mut data = [0.0; 16];
        for (row, values) in rows.iter().enumerate() {
            data[row * 4..row * 4 + 4].copy_from_slice(values);
        }
        Self { data }
    }

    pub fn from_translation(x: f32, y: f32, z: f32) -> Self {
        let mut result = Self::new_identity();
        result.data[12] = x;
        result.data[13] = y;
        result.data[14] = z;
        result
    }

    pub fn from_scale(x: f32, y: f32, z: f32) -> Self {
        let mut result = Self::new_identity();
        result.data[0] = x;
        result.data[5] = y;
        result.data[10] = z;
        result
    }

    /// Right-handed rotation of `degrees` about a single principal axis.
    pub fn from_rotation(degrees: f32, axis: Axis) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();

        #[rustfmt::skip]
        let rows = match axis {
            Axis::X => [
                [1.0, 0.0, 0.0, 0.0],
                [0.0,   c,   s, 0.0],
                [0.0,  -s,   c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
            Axis::Y => [
                [  c, 0.0,  -s, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [  s, 0.0,   c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
            Axis::Z => [
                [  c,   s, 0.0, 0.0],
                [ -s,   c, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        };

        Self::from_rows(rows)
    }

    /// Builds a right-handed view matrix for a camera at `eye` looking at
    /// `target`.
    ///
    /// Fails when `eye == target`, or when `up` is zero or parallel to the
    /// viewing direction.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Result<Self, MathError> {
        let forward = normalize(target - eye, "forward")?;
        let right = normalize(cross(forward, up), "right")?;
        let up = normalize(cross(right, forward), "up")?;

        #[rustfmt::skip]
        let rows = [
            [right.x,            up.x,            -forward.x,         0.0],
            [right.y,            up.y,            -forward.y,         0.0],
            [right.z,            up.z,            -forward.z,         0.0],
            [-dot(right, eye),   -dot(up, eye),   dot(forward, eye),  1.0],
        ];

        Ok(Self::from_rows(rows))
    }

    /// Right-handed perspective projection with a vertical field of view in
    /// radians, mapping depth to the `[-1, 1]` clip range.
    pub fn perspective(fov: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov * 0.5).tan();

        #[rustfmt::skip]
        let rows = [
            [f / aspect_ratio, 0.0, 0.0,                                0.0],
            [0.0,              f,   0.0,                                0.0],
            [0.0,              0.0, (far + near) / (near - far),        -1.0],
            [0.0,              0.0, (2.0 * far * near) / (near - far),  0.0],
        ];

        Self::from_rows(rows)
    }

    pub fn set_identity(&mut self) {
        *self = Self::new_identity();
    }

    /// Adds the offset to the translation row.
    ///
    /// For an affine matrix this is `self * from_translation(x, y, z)`.
    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.data[12] += x;
        self.data[13] += y;
        self.data[14] += z;
    }

    /// Scales the upper-left 3x3 block row by row.
    ///
    /// For an affine matrix this is `from_scale(x, y, z) * self`.
    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        for (row, factor) in [x, y, z].into_iter().enumerate() {
            for value in &mut self.data[row * 4..row * 4 + 3] {
                *value *= factor;
            }
        }
    }

    /// Right-multiplies by the rotation of `degrees` about `axis`.
    pub fn rotate(&mut self, degrees: f32, axis: Axis) {
        *self *= Self::from_rotation(degrees, axis);
    }

    /// Rotation driven by three independent axis flags.
    ///
    /// Exactly one flag must be set. With no flag set the matrix is left
    /// unchanged and [`RotateStatus::NotRotated`] is returned; with several
    /// flags set the matrix is left unchanged and an error is returned.
    pub fn rotate_by_flags(
        &mut self,
        degrees: f32,
        x: bool,
        y: bool,
        z: bool,
    ) -> Result<RotateStatus, MathError> {
        match Axis::from_flags(x, y, z)? {
            Some(axis) => {
                self.rotate(degrees, axis);
                Ok(RotateStatus::Rotated)
            },
            None => {
                tracing::debug!(degrees, "no rotation axis selected, matrix left unchanged");
                Ok(RotateStatus::NotRotated)
            },
        }
    }

    /// Standard row-major product `a * b`.
    pub fn multiply(a: &Mat4, b: &Mat4) -> Mat4 {
        let mut data = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                data[row * 4 + col] = (0..4).map(|k| a[(row, k)] * b[(k, col)]).sum();
            }
        }
        Mat4 { data }
    }

    /// Transforms `p` as the row vector `[x, y, z, 1]`, without perspective
    /// division.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let v = [p.x, p.y, p.z, 1.0];
        let component = |col: usize| (0..4).map(|k| v[k] * self[(k, col)]).sum::<f32>();
        Vec3::new(component(0), component(1), component(2))
    }

    pub fn row(&self, row: usize) -> [f32; 4] {
        let mut values = [0.0; 4];
        values.copy_from_slice(&self.data[row * 4..row * 4 + 4]);
        values
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Prints the matrix to stdout, one row per line.
    pub fn print(&self) {
        print!("{self}");
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::new_identity()
    }
}

impl Index<(usize, usize)> for Mat4 {
    type Output = f32;

    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        &self.data[row * 4 + col]
    }
}

impl IndexMut<(usize, usize)> for Mat4 {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
        &mut self.data[row * 4 + col]
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        Mat4::multiply(&self, &rhs)
    }
}

impl MulAssign for Mat4 {
    fn mul_assign(&mut self, rhs: Mat4) {
        *self = Mat4::multiply(self, &rhs);
    }
}

/// Tab separated, two decimals per value, one row per line.
impl fmt::Display for Mat4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..4 {
            for col in 0..4 {
                write!(f, "{:.2}\t", self[(row, col)])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
