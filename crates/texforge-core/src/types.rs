//! Common types used across texforge
//!
//! This module provides shared type definitions used by multiple crates.

use serde::{Deserialize, Serialize};

/// Color in RGBA format (0-255 per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self { r: 255, g: 255, b: 255, a: 255 };
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0, a: 255 };
    pub const TRANSPARENT: Self = Self { r: 0, g: 0, b: 0, a: 0 };

    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Convert to normalized float values (0.0-1.0)
    pub fn to_float(&self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }

    /// Quantize normalized float channels back to 8-bit, clamping to [0, 1]
    pub fn from_float(r: f32, g: f32, b: f32, a: f32) -> Self {
        fn quantize(v: f32) -> u8 {
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        Self {
            r: quantize(r),
            g: quantize(g),
            b: quantize(b),
            a: quantize(a),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Structural identity of an asset: its container file plus the name of the
/// sub-asset inside that container.
///
/// Two assets sharing a container path but carrying different in-container
/// names are distinct keys. The key is only ever compared and hashed, never
/// dereferenced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetKey {
    /// Path of the file the asset lives in
    pub container: String,
    /// Name of the asset inside the container
    pub name: String,
}

impl AssetKey {
    pub fn new(container: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for AssetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.container, self.name)
    }
}

/// Category an asset belongs to in the export pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetCategory {
    Mesh,
    Material,
    Texture,
    /// Anything the pipeline carries along but does not transform
    Other,
}

/// Namespace partition of the asset path registry
///
/// Paths are deduplicated independently per namespace, so a mesh and a
/// material extracted from the same container do not collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetNamespace {
    Mesh,
    Material,
    Texture,
}
