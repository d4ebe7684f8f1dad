//! Scene model types.
//!
//! A scene is a flat, ordered list of analytic primitives plus a materials
//! table. Primitive order is significant: it defines the object indices
//! reported by hit payloads and which primitive wins an exact distance tie.

use ember_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported by [`Scene::validate`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("primitive {primitive} references material {material}, but the scene has {available} materials")]
    MaterialOutOfRange {
        primitive: usize,
        material: usize,
        available: usize,
    },

    #[error("primitive {primitive} has non-positive radius {radius}")]
    InvalidRadius { primitive: usize, radius: f32 },

    #[error("cylinder {primitive} has an empty vertical extent [{y_min}, {y_max}]")]
    InvalidExtent {
        primitive: usize,
        y_min: f32,
        y_max: f32,
    },
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Surface description used by the shading loop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Optional display name
    pub name: String,

    /// Diffuse color (RGB, nominally 0-1, not clamped)
    pub albedo: Vec3,

    /// Scale of the random jitter applied to reflection normals
    pub roughness: f32,

    /// Metallic factor. Carried with the material, not read by shading.
    pub metallic: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            albedo: Vec3::ONE,
            roughness: 1.0,
            metallic: 0.0,
        }
    }
}

impl Material {
    /// Create a new material from an albedo and roughness.
    pub fn new(albedo: Vec3, roughness: f32) -> Self {
        Self {
            albedo,
            roughness,
            ..Default::default()
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the metallic factor.
    pub fn with_metallic(mut self, metallic: f32) -> Self {
        self.metallic = metallic;
        self
    }
}

/// A sphere centered at `position`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub position: Vec3,
    pub radius: f32,
    pub material_index: usize,
}

impl Sphere {
    pub fn new(position: Vec3, radius: f32, material_index: usize) -> Self {
        Self {
            position,
            radius,
            material_index,
        }
    }
}

/// A finite cylinder aligned to the Y axis, closed by flat caps.
///
/// `y_min` and `y_max` are relative to `position`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cylinder {
    pub position: Vec3,
    pub radius: f32,
    pub y_min: f32,
    pub y_max: f32,
    pub material_index: usize,
}

impl Cylinder {
    pub fn new(position: Vec3, radius: f32, y_min: f32, y_max: f32, material_index: usize) -> Self {
        Self {
            position,
            radius,
            y_min,
            y_max,
            material_index,
        }
    }
}

/// Closed set of primitive shapes a scene can hold.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Primitive {
    Sphere(Sphere),
    Cylinder(Cylinder),
}

impl Primitive {
    pub fn material_index(&self) -> usize {
        match self {
            Primitive::Sphere(s) => s.material_index,
            Primitive::Cylinder(c) => c.material_index,
        }
    }

    pub fn radius(&self) -> f32 {
        match self {
            Primitive::Sphere(s) => s.radius,
            Primitive::Cylinder(c) => c.radius,
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl From<Cylinder> for Primitive {
    fn from(cylinder: Cylinder) -> Self {
        Primitive::Cylinder(cylinder)
    }
}

/// Primitives and the materials they reference.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    pub primitives: Vec<Primitive>,
    pub materials: Vec<Material>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a material and return its index.
    pub fn add_material(&mut self, material: Material) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    /// Append a primitive and return its object index.
    pub fn add_primitive(&mut self, primitive: impl Into<Primitive>) -> usize {
        self.primitives.push(primitive.into());
        self.primitives.len() - 1
    }

    /// Material used by the primitive at `object_index`.
    ///
    /// Panics if either index is out of range.
    #[inline]
    pub fn material_for(&self, object_index: usize) -> &Material {
        &self.materials[self.primitives[object_index].material_index()]
    }

    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Check that every primitive is well formed and references an existing
    /// material. Rendering an invalid scene panics on the first bad lookup.
    pub fn validate(&self) -> SceneResult<()> {
        for (index, primitive) in self.primitives.iter().enumerate() {
            let material = primitive.material_index();
            if material >= self.materials.len() {
                return Err(SceneError::MaterialOutOfRange {
                    primitive: index,
                    material,
                    available: self.materials.len(),
                });
            }

            let radius = primitive.radius();
            if radius.is_nan() || radius <= 0.0 {
                return Err(SceneError::InvalidRadius {
                    primitive: index,
                    radius,
                });
            }

            if let Primitive::Cylinder(c) = primitive {
                if !(c.y_min < c.y_max) {
                    return Err(SceneError::InvalidExtent {
                        primitive: index,
                        y_min: c.y_min,
                        y_max: c.y_max,
                    });
                }
            }
        }

        log::debug!(
            "Scene validated: {} primitives, {} materials",
            self.primitives.len(),
            self.materials.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_shape_scene() -> Scene {
        let mut scene = Scene::new();
        let pink = scene.add_material(Material::new(Vec3::new(1.0, 0.0, 1.0), 0.0));
        let blue = scene.add_material(Material::new(Vec3::new(0.2, 0.3, 1.0), 0.1));
        scene.add_primitive(Sphere::new(Vec3::ZERO, 1.0, pink));
        scene.add_primitive(Cylinder::new(Vec3::new(0.0, -101.0, 0.0), 100.0, -0.5, 0.5, blue));
        scene
    }

    #[test]
    fn test_indices_follow_insertion_order() {
        let mut scene = Scene::new();
        assert_eq!(scene.add_material(Material::default()), 0);
        assert_eq!(scene.add_material(Material::default()), 1);
        assert_eq!(scene.add_primitive(Sphere::new(Vec3::ZERO, 1.0, 1)), 0);
        assert_eq!(scene.add_primitive(Sphere::new(Vec3::X, 1.0, 0)), 1);
        assert_eq!(scene.primitive_count(), 2);
    }

    #[test]
    fn test_material_for_object() {
        let scene = two_shape_scene();
        assert_eq!(scene.material_for(0).albedo, Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(scene.material_for(1).roughness, 0.1);
    }

    #[test]
    #[should_panic]
    fn test_material_for_out_of_range_panics() {
        let mut scene = Scene::new();
        scene.add_primitive(Sphere::new(Vec3::ZERO, 1.0, 3));
        scene.material_for(0);
    }

    #[test]
    fn test_material_defaults() {
        let material = Material::default();
        assert_eq!(material.albedo, Vec3::ONE);
        assert_eq!(material.roughness, 1.0);
        assert_eq!(material.metallic, 0.0);
    }

    #[test]
    fn test_validate_accepts_consistent_scene() {
        assert_eq!(two_shape_scene().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_missing_material() {
        let mut scene = two_shape_scene();
        scene.add_primitive(Sphere::new(Vec3::ZERO, 1.0, 7));

        assert_eq!(
            scene.validate(),
            Err(SceneError::MaterialOutOfRange {
                primitive: 2,
                material: 7,
                available: 2,
            })
        );
    }

    #[test]
    fn test_validate_rejects_bad_geometry() {
        let mut scene = Scene::new();
        scene.add_material(Material::default());
        scene.add_primitive(Sphere::new(Vec3::ZERO, 0.0, 0));
        assert!(matches!(scene.validate(), Err(SceneError::InvalidRadius { primitive: 0, .. })));

        let mut scene = Scene::new();
        scene.add_material(Material::default());
        scene.add_primitive(Cylinder::new(Vec3::ZERO, 1.0, 0.5, 0.5, 0));
        assert!(matches!(scene.validate(), Err(SceneError::InvalidExtent { primitive: 0, .. })));
    }

    #[test]
    fn test_scene_from_json() {
        let json = r#"{
            "materials": [
                { "name": "floor", "albedo": [0.2, 0.3, 1.0], "roughness": 0.1 }
            ],
            "primitives": [
                { "type": "sphere", "position": [0.0, 0.0, 0.0], "radius": 1.0, "material_index": 0 },
                { "type": "cylinder", "position": [2.0, 0.0, 0.0], "radius": 0.5,
                  "y_min": -0.3, "y_max": 0.3, "material_index": 0 }
            ]
        }"#;

        let scene: Scene = serde_json::from_str(json).unwrap();
        assert_eq!(scene.primitive_count(), 2);
        assert_eq!(scene.materials[0].name, "floor");
        // Unspecified fields keep their defaults
        assert_eq!(scene.materials[0].metallic, 0.0);
        assert!(matches!(scene.primitives[1], Primitive::Cylinder(c) if c.y_max == 0.3));
        assert!(scene.validate().is_ok());
    }
}
