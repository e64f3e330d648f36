//! Scene file types.
//!
//! The JSON layout uses PascalCase keys:
//!
//! ```json
//! {
//!   "Settings": { "RenderRoutines": 8, "RenderDepth": 10, "ShowProgress": true },
//!   "Image": { "OutputFile": "out.png", "Width": 400, "Height": 200, "Samples": 100 },
//!   "Scene": {
//!     "Camera": { "LookFrom": [0, 0, 0], "LookAt": [0, 0, -1], "UpVector": [0, 1, 0],
//!                 "FieldOfView": 90, "AspectRatio": 2, "Aperture": 0, "Focus": 1 },
//!     "Objects": { "Spheres": [
//!       { "Center": [0, 0, -1], "Radius": 0.5,
//!         "Surface": { "Type": "Lambertian", "Albedo": [0.8, 0.3, 0.3] } }
//!     ] },
//!     "AmbientLight": [0.1, 0.1, 0.1]
//!   }
//! }
//! ```

use std::fmt;
use std::str::FromStr;

use ember_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};

/// Bounce limit used when the file leaves `RenderDepth` unset or zero.
pub const DEFAULT_RENDER_DEPTH: u32 = 10;

/// Largest accepted image, in pixels (16384 x 16384).
pub const MAX_IMAGE_PIXELS: u64 = 1 << 28;

/// Complete render request: engine settings, output image and scene.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RenderSpec {
    #[serde(default)]
    pub settings: Settings,
    pub image: ImageSpec,
    pub scene: SceneSpec,
}

impl RenderSpec {
    /// Check every section, failing on the first problem found.
    pub fn validate(&self) -> SceneResult<()> {
        self.image.validate()?;
        self.scene.validate()
    }

    /// Bounce limit, falling back to [`DEFAULT_RENDER_DEPTH`].
    pub fn render_depth(&self) -> u32 {
        if self.settings.render_depth > 0 {
            self.settings.render_depth
        } else {
            DEFAULT_RENDER_DEPTH
        }
    }
}

/// Engine settings.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Settings {
    /// Worker count; 0 picks one from the available cores
    pub render_routines: usize,
    /// Maximum bounce depth; 0 means [`DEFAULT_RENDER_DEPTH`]
    pub render_depth: u32,
    pub show_progress: bool,
}

/// Output image description.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageSpec {
    #[serde(default)]
    pub output_file: String,
    pub width: u32,
    pub height: u32,
    pub samples: u32,
    /// `[row_min, row_max, col_min, col_max]`, half-open, rows counted from
    /// the top. Absent or all zero renders the full image.
    #[serde(default)]
    pub patch: Option<[u32; 4]>,
}

impl ImageSpec {
    pub fn validate(&self) -> SceneResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SceneError::InvalidImage(format!(
                "image must have a non-zero size, got {}x{}",
                self.width, self.height
            )));
        }
        let pixels = u64::from(self.width) * u64::from(self.height);
        if pixels > MAX_IMAGE_PIXELS {
            return Err(SceneError::InvalidImage(format!(
                "{}x{} is {} pixels, more than the limit of {}",
                self.width, self.height, pixels, MAX_IMAGE_PIXELS
            )));
        }
        if self.samples == 0 {
            return Err(SceneError::InvalidImage(
                "samples per pixel must be at least 1".to_string(),
            ));
        }
        if let Some(patch) = self.patch() {
            let [row_min, row_max, col_min, col_max] = patch;
            if row_min >= row_max || col_min >= col_max || row_max > self.height || col_max > self.width
            {
                return Err(SceneError::InvalidPatch {
                    patch,
                    width: self.width,
                    height: self.height,
                });
            }
        }
        Ok(())
    }

    /// The requested patch, or `None` for the whole image.
    pub fn patch(&self) -> Option<[u32; 4]> {
        self.patch.filter(|p| p.iter().any(|&v| v != 0))
    }
}

/// Everything that is visible: camera, objects and background.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SceneSpec {
    pub camera: CameraSpec,
    #[serde(default)]
    pub objects: ObjectsSpec,
    /// Constant background radiance. Absent selects the sky gradient.
    #[serde(default)]
    pub ambient_light: Option<[f64; 3]>,
}

impl SceneSpec {
    pub fn validate(&self) -> SceneResult<()> {
        self.camera.validate()?;
        for (index, sphere) in self.objects.spheres.iter().enumerate() {
            sphere.validate(index)?;
        }
        Ok(())
    }
}

/// Camera placement and lens.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CameraSpec {
    pub look_from: [f64; 3],
    pub look_at: [f64; 3],
    #[serde(default = "default_up")]
    pub up_vector: [f64; 3],
    /// Vertical field of view in degrees
    pub field_of_view: f64,
    pub aspect_ratio: f64,
    #[serde(default)]
    pub aperture: f64,
    /// Focus distance; 0 focuses on `look_at`
    #[serde(default)]
    pub focus: f64,
}

fn default_up() -> [f64; 3] {
    [0.0, 1.0, 0.0]
}

impl Default for CameraSpec {
    fn default() -> Self {
        Self {
            look_from: [0.0, 0.0, 0.0],
            look_at: [0.0, 0.0, -1.0],
            up_vector: default_up(),
            field_of_view: 90.0,
            aspect_ratio: 1.0,
            aperture: 0.0,
            focus: 0.0,
        }
    }
}

impl CameraSpec {
    pub fn validate(&self) -> SceneResult<()> {
        if !(self.field_of_view > 0.0 && self.field_of_view < 180.0) {
            return Err(SceneError::InvalidCamera(format!(
                "field of view must be in (0, 180) degrees, got {}",
                self.field_of_view
            )));
        }
        if !(self.aspect_ratio > 0.0 && self.aspect_ratio.is_finite()) {
            return Err(SceneError::InvalidCamera(format!(
                "aspect ratio must be positive, got {}",
                self.aspect_ratio
            )));
        }
        if self.aperture < 0.0 || self.focus < 0.0 {
            return Err(SceneError::InvalidCamera(
                "aperture and focus must not be negative".to_string(),
            ));
        }
        let view = Vec3::from(self.look_from) - Vec3::from(self.look_at);
        if view.length_squared() == 0.0 {
            return Err(SceneError::InvalidCamera(
                "look-from and look-at are the same point".to_string(),
            ));
        }
        if Vec3::from(self.up_vector).cross(view).length_squared() == 0.0 {
            return Err(SceneError::InvalidCamera(
                "up vector is parallel to the view direction".to_string(),
            ));
        }
        Ok(())
    }

    /// Effective focus distance.
    pub fn focus_distance(&self) -> f64 {
        if self.focus > 0.0 {
            self.focus
        } else {
            (Vec3::from(self.look_from) - Vec3::from(self.look_at)).length()
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ObjectsSpec {
    #[serde(default)]
    pub spheres: Vec<SphereSpec>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SphereSpec {
    pub center: [f64; 3],
    pub radius: f64,
    pub surface: SurfaceSpec,
}

impl SphereSpec {
    fn validate(&self, index: usize) -> SceneResult<()> {
        if !(self.radius > 0.0 && self.radius.is_finite()) {
            return Err(SceneError::InvalidSphere {
                index,
                message: format!("radius must be positive, got {}", self.radius),
            });
        }
        if self.center.iter().any(|c| !c.is_finite()) {
            return Err(SceneError::InvalidSphere {
                index,
                message: "center must be finite".to_string(),
            });
        }
        if self.surface.kind()? == SurfaceKind::Dielectric
            && !(self.surface.ref_index > 0.0 && self.surface.ref_index.is_finite())
        {
            return Err(SceneError::InvalidSphere {
                index,
                message: format!(
                    "refractive index must be positive, got {}",
                    self.surface.ref_index
                ),
            });
        }
        Ok(())
    }
}

/// Surface response, tagged by `Type`.
///
/// `Type` is kept as a string so an unknown tag is reported as a
/// [`SceneError::UnknownSurfaceType`] rather than a generic JSON error.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SurfaceSpec {
    #[serde(rename = "Type")]
    pub surface_type: String,
    pub albedo: [f64; 3],
    /// Metal only
    #[serde(default)]
    pub fuzz: f64,
    /// Dielectric only
    #[serde(default)]
    pub ref_index: f64,
}

impl SurfaceSpec {
    pub fn kind(&self) -> SceneResult<SurfaceKind> {
        self.surface_type.parse()
    }
}

/// The closed set of surface types a scene file may name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceKind {
    Lambertian,
    Metal,
    Dielectric,
    Light,
}

impl FromStr for SurfaceKind {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Lambertian" => Ok(SurfaceKind::Lambertian),
            "Metal" => Ok(SurfaceKind::Metal),
            "Dielectric" => Ok(SurfaceKind::Dielectric),
            "Light" => Ok(SurfaceKind::Light),
            other => Err(SceneError::UnknownSurfaceType(other.to_string())),
        }
    }
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SurfaceKind::Lambertian => "Lambertian",
            SurfaceKind::Metal => "Metal",
            SurfaceKind::Dielectric => "Dielectric",
            SurfaceKind::Light => "Light",
        };
        f.write_str(name)
    }
}
