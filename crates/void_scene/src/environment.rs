//! Scene environment and editor camera pose.

use glam::Vec3;

/// Distance fog.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fog {
    pub density: f32,
    pub gradient: f32,
}

impl Default for Fog {
    fn default() -> Self {
        Self {
            density: 0.09,
            gradient: 1.5,
        }
    }
}

/// Ambient light applied to the whole scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BaseLight {
    /// Linear RGBA
    pub color: [f32; 4],
    pub intensity: f32,
}

impl Default for BaseLight {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0, 1.0],
            intensity: 1.0,
        }
    }
}

/// Per-scene environment state.
///
/// `None` fog is a distinct state from fog with zero density.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Environment {
    pub fog: Option<Fog>,
    pub ambient_light: Option<BaseLight>,
}

/// Editor camera pose stored with each scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub direction: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.0, -3.0),
            direction: Vec3::NEG_Z,
        }
    }
}

impl Camera {
    pub fn new(position: Vec3, direction: Vec3) -> Self {
        Self { position, direction }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fog_differs_from_zero_fog() {
        let none = Environment::default();
        let zero = Environment {
            fog: Some(Fog { density: 0.0, gradient: 0.0 }),
            ..Default::default()
        };
        assert_ne!(none, zero);
    }
}
