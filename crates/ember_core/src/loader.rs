//! Scene file loading.

use std::path::Path;

use crate::error::SceneResult;
use crate::spec::RenderSpec;

/// Load and validate a render spec from a JSON file.
///
/// Any configuration problem (unknown surface type, degenerate camera,
/// bad patch) is returned here, before rendering starts.
pub fn load_spec<P: AsRef<Path>>(path: P) -> SceneResult<RenderSpec> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let spec = load_spec_from_str(&content)?;

    log::info!(
        "Loaded {} ({}x{}, {} spp, {} spheres)",
        path.display(),
        spec.image.width,
        spec.image.height,
        spec.image.samples,
        spec.scene.objects.spheres.len()
    );

    Ok(spec)
}

/// Parse and validate a render spec from a JSON string.
pub fn load_spec_from_str(content: &str) -> SceneResult<RenderSpec> {
    let spec: RenderSpec = serde_json::from_str(content)?;
    spec.validate()?;
    Ok(spec)
}
