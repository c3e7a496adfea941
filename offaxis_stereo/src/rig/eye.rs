/// Eye identifiers, per-eye containers and rig/eye poses.
///
/// Everything here is a plain value: the rig pose is supplied by the caller
/// each frame and eye states are recomputed from it, never stored.

use std::ops::{Index, IndexMut};
use glam::{Mat4, Quat, Vec3};

/// Left or right eye.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Eye {
    Left,
    Right,
}

impl Eye {
    /// Both eyes, left first.
    pub const BOTH: [Eye; 2] = [Eye::Left, Eye::Right];

    /// Sign of the eye's offset along the rig's lateral (+X) axis.
    pub fn lateral_sign(self) -> f32 {
        match self {
            Eye::Left => -1.0,
            Eye::Right => 1.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Eye::Left => "left",
            Eye::Right => "right",
        }
    }
}

/// One value per eye.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StereoPair<T> {
    pub left: T,
    pub right: T,
}

impl<T> StereoPair<T> {
    pub fn new(left: T, right: T) -> Self {
        Self { left, right }
    }

    /// Build a pair by calling `f` once per eye, left first.
    pub fn from_fn(mut f: impl FnMut(Eye) -> T) -> Self {
        let left = f(Eye::Left);
        let right = f(Eye::Right);
        Self { left, right }
    }

    pub fn get(&self, eye: Eye) -> &T {
        match eye {
            Eye::Left => &self.left,
            Eye::Right => &self.right,
        }
    }

    pub fn get_mut(&mut self, eye: Eye) -> &mut T {
        match eye {
            Eye::Left => &mut self.left,
            Eye::Right => &mut self.right,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(Eye, T) -> U) -> StereoPair<U> {
        StereoPair {
            left: f(Eye::Left, self.left),
            right: f(Eye::Right, self.right),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Eye, &T)> {
        [(Eye::Left, &self.left), (Eye::Right, &self.right)].into_iter()
    }
}

impl<T> Index<Eye> for StereoPair<T> {
    type Output = T;

    fn index(&self, eye: Eye) -> &T {
        self.get(eye)
    }
}

impl<T> IndexMut<Eye> for StereoPair<T> {
    fn index_mut(&mut self, eye: Eye) -> &mut T {
        self.get_mut(eye)
    }
}

/// World pose of the stereo rig (head or virtual camera).
///
/// Right-handed: the rig looks down its local -Z, +Y is up, +X is the
/// lateral axis the eyes are spread along.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigTransform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for RigTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl RigTransform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Rig-local point to world space.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite()
    }

    /// Finite with a rotation that can be normalized.
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.rotation.length_squared() > f32::EPSILON
    }
}

/// Placement of one eye for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyeState {
    pub eye: Eye,
    /// Offset from the rig origin in rig space: `(±ipd / 2, 0, 0)`
    pub local_position: Vec3,
    pub world_position: Vec3,
    pub orientation: Quat,
}

impl EyeState {
    /// World-space look direction (-Z of the eye).
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    pub fn up(&self) -> Vec3 {
        self.orientation * Vec3::Y
    }

    pub fn is_finite(&self) -> bool {
        self.world_position.is_finite() && self.orientation.is_finite()
    }

    /// Eye-to-world transform.
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.world_position)
    }
}
