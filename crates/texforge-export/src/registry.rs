//! Asset path registry
//!
//! Remembers which relative output path every exported asset was assigned,
//! keyed by the asset's structural identity and partitioned into three
//! independent namespaces. Later-running exporters use it to resolve
//! cross-references (a material referencing its packed texture, a mesh
//! referencing its material) without ordering dependencies.

use std::collections::HashMap;

use texforge_core::{AssetCategory, AssetKey, AssetNamespace};
use tracing::debug;

use crate::assets::SourceAsset;

/// Deduplicated mapping from asset identity to assigned output path
///
/// Within one namespace a key maps to at most one path; registering a
/// duplicate key is a no-op that reports `false` rather than overwriting.
pub struct AssetPathRegistry {
    assets: Vec<SourceAsset>,
    mesh_paths: HashMap<AssetKey, String>,
    material_paths: HashMap<AssetKey, String>,
    texture_paths: HashMap<AssetKey, String>,
}

impl AssetPathRegistry {
    /// Build a registry for an export session.
    ///
    /// Every material-category asset in the input list is pre-registered
    /// into the material namespace under its declared output name, so
    /// texture and mesh exporters running later in the session can resolve
    /// material paths regardless of export order.
    pub fn new(assets: impl IntoIterator<Item = SourceAsset>) -> Self {
        let mut registry = Self {
            assets: assets.into_iter().collect(),
            mesh_paths: HashMap::new(),
            material_paths: HashMap::new(),
            texture_paths: HashMap::new(),
        };

        let materials: Vec<(AssetKey, String)> = registry
            .assets
            .iter()
            .filter(|asset| asset.category == AssetCategory::Material)
            .map(|asset| (asset.key.clone(), asset.output_name.clone()))
            .collect();
        for (key, path) in materials {
            registry.register(AssetNamespace::Material, key, path);
        }

        registry
    }

    /// Register an output path for an asset.
    ///
    /// Returns `false` without modifying the registry when the key is
    /// already present in the namespace. Path separators are normalized
    /// to '/'.
    pub fn register(
        &mut self,
        namespace: AssetNamespace,
        key: AssetKey,
        path: impl Into<String>,
    ) -> bool {
        let path = fix_asset_separator(path.into());
        let paths = self.paths_mut(namespace);
        if paths.contains_key(&key) {
            debug!(asset = %key, "Duplicate asset registration ignored");
            return false;
        }
        paths.insert(key, path);
        true
    }

    /// Look up the previously registered path for an asset
    pub fn lookup(&self, namespace: AssetNamespace, key: &AssetKey) -> Option<&str> {
        self.paths(namespace).get(key).map(String::as_str)
    }

    /// The ordered source-asset list this registry was built from
    pub fn assets(&self) -> &[SourceAsset] {
        &self.assets
    }

    fn paths(&self, namespace: AssetNamespace) -> &HashMap<AssetKey, String> {
        match namespace {
            AssetNamespace::Mesh => &self.mesh_paths,
            AssetNamespace::Material => &self.material_paths,
            AssetNamespace::Texture => &self.texture_paths,
        }
    }

    fn paths_mut(&mut self, namespace: AssetNamespace) -> &mut HashMap<AssetKey, String> {
        match namespace {
            AssetNamespace::Mesh => &mut self.mesh_paths,
            AssetNamespace::Material => &mut self.material_paths,
            AssetNamespace::Texture => &mut self.texture_paths,
        }
    }
}

/// Normalize path separators to the engine's '/' convention
fn fix_asset_separator(path: String) -> String {
    if path.contains('\\') {
        path.replace('\\', "/")
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantics::TextureSource;
    use std::path::PathBuf;

    fn make_asset(container: &str, name: &str, category: AssetCategory, output: &str) -> SourceAsset {
        SourceAsset::new(
            AssetKey::new(container, name),
            category,
            output,
            TextureSource::File(PathBuf::from(container)),
        )
    }

    #[test]
    fn test_duplicate_registration_keeps_first_path() {
        let mut registry = AssetPathRegistry::new([]);
        let key = AssetKey::new("Assets/ship_diff.png", "ship_diff");

        assert!(registry.register(AssetNamespace::Texture, key.clone(), "Textures/A.png"));
        assert!(!registry.register(AssetNamespace::Texture, key.clone(), "Textures/B.png"));

        assert_eq!(
            registry.lookup(AssetNamespace::Texture, &key),
            Some("Textures/A.png")
        );
    }

    #[test]
    fn test_namespaces_are_independent() {
        let mut registry = AssetPathRegistry::new([]);
        let key = AssetKey::new("Assets/ship.fbx", "hull");

        assert!(registry.register(AssetNamespace::Mesh, key.clone(), "Meshes/hull.mdl"));
        assert!(registry.register(AssetNamespace::Material, key.clone(), "Materials/hull.xml"));

        assert_eq!(
            registry.lookup(AssetNamespace::Mesh, &key),
            Some("Meshes/hull.mdl")
        );
        assert_eq!(
            registry.lookup(AssetNamespace::Material, &key),
            Some("Materials/hull.xml")
        );
        assert_eq!(registry.lookup(AssetNamespace::Texture, &key), None);
    }

    #[test]
    fn test_materials_are_seeded_at_construction() {
        let assets = vec![
            make_asset("Assets/hull.mat", "hull", AssetCategory::Material, "Materials/hull.xml"),
            make_asset("Assets/diff.png", "diff", AssetCategory::Texture, "Textures/diff.png"),
        ];
        let registry = AssetPathRegistry::new(assets);

        assert_eq!(
            registry.lookup(
                AssetNamespace::Material,
                &AssetKey::new("Assets/hull.mat", "hull")
            ),
            Some("Materials/hull.xml")
        );
        // Textures are registered during export, not at construction
        assert_eq!(
            registry.lookup(
                AssetNamespace::Texture,
                &AssetKey::new("Assets/diff.png", "diff")
            ),
            None
        );
        assert_eq!(registry.assets().len(), 2);
    }

    #[test]
    fn test_separator_normalization() {
        let mut registry = AssetPathRegistry::new([]);
        let key = AssetKey::new("Assets/diff.png", "diff");

        registry.register(AssetNamespace::Texture, key.clone(), "Textures\\Ship\\diff.png");
        assert_eq!(
            registry.lookup(AssetNamespace::Texture, &key),
            Some("Textures/Ship/diff.png")
        );
    }
}
