//! Ember Core - Scene model for the Ember path tracer.
//!
//! This crate provides:
//!
//! - **Materials**: albedo/roughness/metallic surface descriptions
//! - **Primitives**: analytic spheres and finite Y-aligned cylinders
//! - **Scene**: ordered primitive list plus materials table
//!
//! # Example
//!
//! ```
//! use ember_core::{Material, Scene, Sphere};
//! use ember_math::Vec3;
//!
//! let mut scene = Scene::new();
//! let pink = scene.add_material(Material::new(Vec3::new(1.0, 0.0, 1.0), 0.0));
//! scene.add_primitive(Sphere::new(Vec3::ZERO, 1.0, pink));
//! assert!(scene.validate().is_ok());
//! ```

pub mod scene;

// Re-export commonly used types
pub use scene::{Cylinder, Material, Primitive, Scene, SceneError, SceneResult, Sphere};
