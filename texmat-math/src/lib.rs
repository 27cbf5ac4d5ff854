mod error;
mod mat4;
mod vec3;

pub use crate::{
    error::MathError,
    mat4::{Axis, Mat4, RotateStatus},
    vec3::{cross, dot, normalize, Vec3},
};
