//! Runtime-switchable lighting. Each mode is a constant record of light and
//! material parameters; activating a mode replaces the previous record
//! wholesale, so no state leaks between modes.

pub const MAX_LIGHTS: usize = 2;

/// Scene-wide ambient term applied whenever lighting is active.
pub const SCENE_AMBIENT: [f32; 3] = [0.2, 0.2, 0.2];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LightingMode {
    Off,
    Basic,
    LightMapped,
    Directional,
    Point,
    Spot,
    Multi,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Spotlight {
    pub direction: [f32; 3],
    /// Half-angle of the cone in degrees; 180 disables the cone entirely.
    pub cutoff_deg: f32,
    pub exponent: f32,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Light {
    /// Homogeneous position; w == 0 makes this a directional light.
    pub position: [f32; 4],
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    /// Constant, linear and quadratic attenuation coefficients.
    pub attenuation: [f32; 3],
    pub spot: Option<Spotlight>,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    pub specular: [f32; 3],
    pub shininess: f32,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LightConfig {
    pub lights: [Option<Light>; MAX_LIGHTS],
    pub scene_ambient: [f32; 3],
    pub material: Material,
}

const NO_ATTENUATION: [f32; 3] = [1.0, 0.0, 0.0];

const MATTE: Material = Material {
    specular: [0.0, 0.0, 0.0],
    shininess: 0.0,
};

fn white_light(position: [f32; 4]) -> Light {
    Light {
        position,
        ambient: [0.0, 0.0, 0.0],
        diffuse: [1.0, 1.0, 1.0],
        specular: [0.0, 0.0, 0.0],
        attenuation: NO_ATTENUATION,
        spot: None,
    }
}

lazy_static! {
    static ref BASIC: LightConfig = LightConfig {
        lights: [Some(white_light([0.0, 0.0, -8.0, 1.0])), None],
        scene_ambient: SCENE_AMBIENT,
        material: MATTE,
    };
    static ref LIGHT_MAPPED: LightConfig = LightConfig {
        lights: [
            Some(Light {
                ambient: [0.55, 0.55, 0.5],
                diffuse: [0.45, 0.45, 0.4],
                ..white_light([0.0, 0.0, -8.0, 1.0])
            }),
            None,
        ],
        scene_ambient: SCENE_AMBIENT,
        material: MATTE,
    };
    static ref DIRECTIONAL: LightConfig = LightConfig {
        lights: [
            Some(Light {
                specular: [1.0, 1.0, 1.0],
                ..white_light([1.0, 1.0, 1.0, 0.0])
            }),
            None,
        ],
        scene_ambient: SCENE_AMBIENT,
        material: Material {
            specular: [1.0, 1.0, 1.0],
            shininess: 32.0,
        },
    };
    static ref POINT: LightConfig = LightConfig {
        lights: [
            Some(Light {
                diffuse: [1.0, 0.95, 0.85],
                specular: [1.0, 1.0, 1.0],
                attenuation: [1.0, 0.09, 0.032],
                ..white_light([2.0, 2.0, -3.0, 1.0])
            }),
            None,
        ],
        scene_ambient: SCENE_AMBIENT,
        material: Material {
            specular: [1.0, 1.0, 1.0],
            shininess: 32.0,
        },
    };
    static ref SPOT: LightConfig = LightConfig {
        lights: [
            Some(Light {
                specular: [1.0, 1.0, 1.0],
                attenuation: [1.0, 0.05, 0.01],
                spot: Some(Spotlight {
                    direction: [0.0, 0.0, 1.0],
                    cutoff_deg: 30.0,
                    exponent: 2.0,
                }),
                ..white_light([0.0, 0.0, -6.0, 1.0])
            }),
            None,
        ],
        scene_ambient: SCENE_AMBIENT,
        material: Material {
            specular: [1.0, 1.0, 1.0],
            shininess: 64.0,
        },
    };
    static ref MULTI: LightConfig = LightConfig {
        lights: [
            Some(Light {
                diffuse: [1.0, 0.6, 0.4],
                specular: [1.0, 1.0, 1.0],
                attenuation: [1.0, 0.07, 0.017],
                ..white_light([-3.0, 1.0, -3.0, 1.0])
            }),
            Some(Light {
                diffuse: [0.4, 0.6, 1.0],
                specular: [1.0, 1.0, 1.0],
                attenuation: [1.0, 0.07, 0.017],
                ..white_light([3.0, 1.0, -3.0, 1.0])
            }),
        ],
        scene_ambient: SCENE_AMBIENT,
        material: Material {
            specular: [1.0, 1.0, 1.0],
            shininess: 32.0,
        },
    };
}

impl LightingMode {
    /// Parameter record for this mode; `None` means unlit rendering.
    pub fn config(self) -> Option<&'static LightConfig> {
        match self {
            LightingMode::Off => None,
            LightingMode::Basic => Some(&BASIC),
            LightingMode::LightMapped => Some(&LIGHT_MAPPED),
            LightingMode::Directional => Some(&DIRECTIONAL),
            LightingMode::Point => Some(&POINT),
            LightingMode::Spot => Some(&SPOT),
            LightingMode::Multi => Some(&MULTI),
        }
    }
}

/// Holds the active lighting mode. Any mode may follow any other; the
/// renderer re-derives the full light state from `active_config` every
/// frame, so a switch is atomic.
pub struct LightingController {
    mode: LightingMode,
}

impl LightingController {
    pub fn new() -> LightingController {
        LightingController {
            mode: LightingMode::Off,
        }
    }

    pub fn activate(&mut self, mode: LightingMode) {
        if self.mode != mode {
            debug!("lighting mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
    }

    /// Back to unlit full-color rendering.
    pub fn deactivate(&mut self) {
        self.activate(LightingMode::Off);
    }

    pub fn mode(&self) -> LightingMode {
        self.mode
    }

    pub fn active_config(&self) -> Option<&'static LightConfig> {
        self.mode.config()
    }
}

impl Default for LightingController {
    fn default() -> Self {
        LightingController::new()
    }
}
