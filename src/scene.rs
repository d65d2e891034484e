use crate::camera::Frustum;
use crate::geometry::{self, Vertex, FACE_COUNT};
use crate::input::CubePose;
use crate::lighting::{Light, LightConfig, Spotlight};
use crate::texture::TextureSet;
use glium::backend::Facade;
use glium::index::PrimitiveType;
use glium::uniforms::{MagnifySamplerFilter, MinifySamplerFilter};
use glium::{Frame, IndexBuffer, Program, Surface, VertexBuffer};
use nalgebra::{Matrix4, Point3, Rotation3, Unit, Vector3};
use thiserror::Error;

/// Degrees of cube rotation per pixel of absolute pointer position.
pub const POINTER_DEGREES_PER_PIXEL: f32 = 0.5;

/// Degrees the free-running spin advances each frame.
pub const SPIN_STEP_DEGREES: f32 = 1.0;

lazy_static! {
    /// Axis of the free-running spin.
    static ref SPIN_AXIS: Unit<Vector3<f32>> = Unit::new_normalize(Vector3::new(1.0, 1.0, 1.0));
}

#[derive(Debug, Error)]
pub enum GraphicsInitError {
    #[error("could not create the window and GL context: {0}")]
    Display(#[from] glium::backend::glutin::DisplayCreationError),

    #[error("could not compile the scene program: {0}")]
    Program(#[from] glium::ProgramCreationError),

    #[error("could not allocate a vertex buffer: {0}")]
    VertexBuffer(#[from] glium::vertex::BufferCreationError),

    #[error("could not allocate an index buffer: {0}")]
    IndexBuffer(#[from] glium::index::BufferCreationError),
}

/// Draws the six textured quads of the cube. Owns one small vertex buffer
/// per face so each draw call can bind that face's texture.
pub struct SceneRenderer {
    program: Program,
    face_buffers: Vec<VertexBuffer<Vertex>>,
    index_buffer: IndexBuffer<u16>,
}

impl SceneRenderer {
    pub fn new<F: ?Sized + Facade>(facade: &F) -> Result<SceneRenderer, GraphicsInitError> {
        let program = Program::from_source(facade, VERTEX_SHADER, FRAGMENT_SHADER, None)?;

        let mut face_buffers = Vec::with_capacity(FACE_COUNT);
        for face in 0..FACE_COUNT {
            face_buffers.push(VertexBuffer::new(facade, &geometry::face_vertices(face))?);
        }

        let index_buffer =
            IndexBuffer::new(facade, PrimitiveType::TrianglesList, &geometry::QUAD_INDICES)?;

        Ok(SceneRenderer {
            program,
            face_buffers,
            index_buffer,
        })
    }

    /// Renders one frame of the cube into `frame`. Pure with respect to
    /// shared state: everything it draws derives from the arguments.
    pub fn draw(
        &self,
        frame: &mut Frame,
        frustum: &Frustum,
        eye: Point3<f32>,
        pose: &CubePose,
        pointer: (f64, f64),
        spin_deg: f32,
        lighting: Option<&LightConfig>,
        textures: &TextureSet,
    ) {
        let model = model_matrix(pose, pointer, spin_deg);

        let params = glium::DrawParameters {
            depth: glium::Depth {
                test: glium::draw_parameters::DepthTest::IfLess,
                write: true,
                ..Default::default()
            },
            ..Default::default()
        };

        let dark = LightSlot::dark();
        let (ambient, material, light0, light1) = match lighting {
            Some(config) => (
                config.scene_ambient,
                (config.material.specular, config.material.shininess),
                LightSlot::from_light(config.lights[0].as_ref()),
                LightSlot::from_light(config.lights[1].as_ref()),
            ),
            None => ([0.0; 3], ([0.0; 3], 0.0), dark, dark),
        };

        for (face, vertex_buffer) in self.face_buffers.iter().enumerate() {
            let sampler = textures
                .get(face)
                .sampled()
                .minify_filter(MinifySamplerFilter::Linear)
                .magnify_filter(MagnifySamplerFilter::Linear);

            let uniforms = uniform! {
                viewProjection: Into::<[[f32; 4]; 4]>::into(frustum.view_projection),
                model: Into::<[[f32; 4]; 4]>::into(model),
                eyePosition: [eye.x, eye.y, eye.z],
                tex: sampler,

                lightingEnabled: lighting.is_some(),
                sceneAmbient: ambient,
                materialSpecular: material.0,
                materialShininess: material.1,

                light0Enabled: light0.enabled,
                light0Position: light0.position,
                light0Ambient: light0.ambient,
                light0Diffuse: light0.diffuse,
                light0Specular: light0.specular,
                light0Attenuation: light0.attenuation,
                light0SpotDirection: light0.spot_direction,
                light0SpotCutoff: light0.spot_cutoff,
                light0SpotExponent: light0.spot_exponent,

                light1Enabled: light1.enabled,
                light1Position: light1.position,
                light1Ambient: light1.ambient,
                light1Diffuse: light1.diffuse,
                light1Specular: light1.specular,
                light1Attenuation: light1.attenuation,
                light1SpotDirection: light1.spot_direction,
                light1SpotCutoff: light1.spot_cutoff,
                light1SpotExponent: light1.spot_exponent,
            };

            frame
                .draw(
                    vertex_buffer,
                    &self.index_buffer,
                    &self.program,
                    &uniforms,
                    &params,
                )
                .unwrap();
        }
    }
}

/// Model transform of the cube: translate to the pose, orient by the
/// pointer, then apply the free-running diagonal spin. The rotation is
/// bracketed by the translation, so the cube center always lands exactly at
/// (pose.x, pose.y, 0) and rotation only orients around it.
pub fn model_matrix(pose: &CubePose, pointer: (f64, f64), spin_deg: f32) -> Matrix4<f32> {
    let yaw = (pointer.0 as f32 * POINTER_DEGREES_PER_PIXEL).to_radians();
    let pitch = (pointer.1 as f32 * POINTER_DEGREES_PER_PIXEL).to_radians();

    let pointer_rotation = Rotation3::from_axis_angle(&Vector3::y_axis(), yaw)
        * Rotation3::from_axis_angle(&Vector3::x_axis(), pitch);
    let spin = Rotation3::from_axis_angle(&SPIN_AXIS, spin_deg.to_radians());

    Matrix4::new_translation(&Vector3::new(pose.x, pose.y, 0.0))
        * (pointer_rotation * spin).to_homogeneous()
}

/// Flattened per-light uniform values; a disabled slot carries zeroed
/// parameters and a 180 degree cutoff (no cone).
#[derive(Copy, Clone)]
struct LightSlot {
    enabled: bool,
    position: [f32; 4],
    ambient: [f32; 3],
    diffuse: [f32; 3],
    specular: [f32; 3],
    attenuation: [f32; 3],
    spot_direction: [f32; 3],
    spot_cutoff: f32,
    spot_exponent: f32,
}

impl LightSlot {
    fn dark() -> LightSlot {
        LightSlot {
            enabled: false,
            position: [0.0; 4],
            ambient: [0.0; 3],
            diffuse: [0.0; 3],
            specular: [0.0; 3],
            attenuation: [1.0, 0.0, 0.0],
            spot_direction: [0.0, 0.0, 1.0],
            spot_cutoff: 180.0,
            spot_exponent: 0.0,
        }
    }

    fn from_light(light: Option<&Light>) -> LightSlot {
        match light {
            None => LightSlot::dark(),
            Some(light) => {
                let spot = light.spot.unwrap_or(Spotlight {
                    direction: [0.0, 0.0, 1.0],
                    cutoff_deg: 180.0,
                    exponent: 0.0,
                });
                LightSlot {
                    enabled: true,
                    position: light.position,
                    ambient: light.ambient,
                    diffuse: light.diffuse,
                    specular: light.specular,
                    attenuation: light.attenuation,
                    spot_direction: spot.direction,
                    spot_cutoff: spot.cutoff_deg,
                    spot_exponent: spot.exponent,
                }
            }
        }
    }
}

const VERTEX_SHADER: &str = r#"
    #version 330 core

    in vec3 position;
    in vec3 normal;
    in vec2 uv;

    out vec3 WorldPos;
    out vec3 Normal;
    out vec2 Uv;

    uniform mat4 viewProjection;
    uniform mat4 model;

    void main() {
        vec4 world = model * vec4(position, 1.0);
        gl_Position = viewProjection * world;

        WorldPos = world.xyz;
        // The model transform is rigid, so its upper 3x3 rotates normals.
        Normal = mat3(model) * normal;
        Uv = uv;
    }
"#;

const FRAGMENT_SHADER: &str = r#"
    #version 330 core

    in vec3 WorldPos;
    in vec3 Normal;
    in vec2 Uv;

    out vec4 color;

    uniform sampler2D tex;
    uniform vec3 eyePosition;

    uniform bool lightingEnabled;
    uniform vec3 sceneAmbient;
    uniform vec3 materialSpecular;
    uniform float materialShininess;

    uniform bool light0Enabled;
    uniform vec4 light0Position;
    uniform vec3 light0Ambient;
    uniform vec3 light0Diffuse;
    uniform vec3 light0Specular;
    uniform vec3 light0Attenuation;
    uniform vec3 light0SpotDirection;
    uniform float light0SpotCutoff;
    uniform float light0SpotExponent;

    uniform bool light1Enabled;
    uniform vec4 light1Position;
    uniform vec3 light1Ambient;
    uniform vec3 light1Diffuse;
    uniform vec3 light1Specular;
    uniform vec3 light1Attenuation;
    uniform vec3 light1SpotDirection;
    uniform float light1SpotCutoff;
    uniform float light1SpotExponent;

    vec3 shade(vec4 lightPosition, vec3 lightAmbient, vec3 lightDiffuse,
               vec3 lightSpecular, vec3 attenuationCoefficients,
               vec3 spotDirection, float spotCutoff, float spotExponent,
               vec3 n, vec3 baseColor) {
        vec3 toLight;
        float attenuation = 1.0;
        if (lightPosition.w == 0.0) {
            toLight = normalize(lightPosition.xyz);
        } else {
            vec3 offset = lightPosition.xyz - WorldPos;
            float dist = length(offset);
            toLight = offset / dist;
            attenuation = 1.0 / (attenuationCoefficients.x
                + attenuationCoefficients.y * dist
                + attenuationCoefficients.z * dist * dist);
        }

        float spot = 1.0;
        if (spotCutoff < 180.0) {
            float angleCos = dot(-toLight, normalize(spotDirection));
            spot = angleCos >= cos(radians(spotCutoff))
                ? pow(max(angleCos, 0.0), spotExponent)
                : 0.0;
        }

        float nDotL = max(dot(n, toLight), 0.0);
        vec3 result = lightAmbient * baseColor + lightDiffuse * baseColor * nDotL;
        if (nDotL > 0.0) {
            vec3 toEye = normalize(eyePosition - WorldPos);
            vec3 halfway = normalize(toLight + toEye);
            result += lightSpecular * materialSpecular
                * pow(max(dot(n, halfway), 0.0), materialShininess);
        }

        return attenuation * spot * result;
    }

    void main() {
        vec3 baseColor = texture(tex, Uv).rgb;

        if (!lightingEnabled) {
            color = vec4(baseColor, 1.0);
            return;
        }

        vec3 n = normalize(Normal);
        vec3 shaded = sceneAmbient * baseColor;
        if (light0Enabled) {
            shaded += shade(light0Position, light0Ambient, light0Diffuse,
                            light0Specular, light0Attenuation,
                            light0SpotDirection, light0SpotCutoff,
                            light0SpotExponent, n, baseColor);
        }
        if (light1Enabled) {
            shaded += shade(light1Position, light1Ambient, light1Diffuse,
                            light1Specular, light1Attenuation,
                            light1SpotDirection, light1SpotCutoff,
                            light1SpotExponent, n, baseColor);
        }

        color = vec4(shaded, 1.0);
    }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn assert_matrices_close(actual: &Matrix4<f32>, expected: &Matrix4<f32>) {
        for (a, b) in actual.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-4, "{} != {}", a, b);
        }
    }

    #[test]
    fn rotation_never_translates_the_pivot() {
        let poses = [
            CubePose { x: 0.0, y: 0.0 },
            CubePose { x: -1.0, y: 0.5 },
            CubePose { x: 3.7, y: -2.2 },
        ];
        for pose in poses.iter() {
            for &pointer in &[(0.0, 0.0), (400.0, 300.0), (123.0, 777.0)] {
                for &spin in &[0.0, 45.0, 361.0] {
                    let model = model_matrix(pose, pointer, spin);
                    let center = model.transform_point(&Point3::origin());
                    assert!((center.x - pose.x).abs() < 1e-5);
                    assert!((center.y - pose.y).abs() < 1e-5);
                    assert!(center.z.abs() < 1e-5);
                }
            }
        }
    }

    #[test]
    fn window_center_pointer_gives_the_fixed_reference_rotation() {
        // Pointer (400, 300) scales to 200 degrees about y and 150 about x.
        let model = model_matrix(&CubePose::default(), (400.0, 300.0), 0.0);
        let expected = (Rotation3::from_axis_angle(&Vector3::y_axis(), 200.0_f32.to_radians())
            * Rotation3::from_axis_angle(&Vector3::x_axis(), 150.0_f32.to_radians()))
        .to_homogeneous();
        assert_matrices_close(&model, &expected);
    }

    #[test]
    fn pointer_at_origin_leaves_the_cube_unrotated() {
        let pose = CubePose { x: 2.0, y: -1.0 };
        let model = model_matrix(&pose, (0.0, 0.0), 0.0);
        let expected = Matrix4::new_translation(&Vector3::new(2.0, -1.0, 0.0));
        assert_matrices_close(&model, &expected);
    }

    #[test]
    fn spin_keeps_the_diagonal_axis_fixed() {
        let model = model_matrix(&CubePose::default(), (0.0, 0.0), 123.0);
        let axis = Vector3::new(1.0, 1.0, 1.0).normalize();
        let rotated = model.transform_vector(&axis);
        assert!((rotated - axis).norm() < 1e-5);
    }

    #[test]
    fn spin_composes_after_the_pointer_rotation() {
        let pointer = (80.0, 40.0);
        let spinless = model_matrix(&CubePose::default(), pointer, 0.0);
        let spun = model_matrix(&CubePose::default(), pointer, 90.0);
        let spin_only = Rotation3::from_axis_angle(&SPIN_AXIS, 90.0_f32.to_radians());
        let expected = spinless * spin_only.to_homogeneous();
        assert_matrices_close(&spun, &expected);
    }

    #[test]
    fn disabled_light_slot_has_no_cone() {
        let slot = LightSlot::from_light(None);
        assert!(!slot.enabled);
        assert_eq!(slot.spot_cutoff, 180.0);
    }

    #[test]
    fn spot_light_slot_carries_the_cone_parameters() {
        use crate::lighting::LightingMode;
        let config = LightingMode::Spot.config().unwrap();
        let slot = LightSlot::from_light(config.lights[0].as_ref());
        assert!(slot.enabled);
        assert_eq!(slot.spot_cutoff, 30.0);
        assert_eq!(slot.spot_exponent, 2.0);
    }
}
