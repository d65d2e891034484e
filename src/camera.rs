use nalgebra as na;
use nalgebra::{Matrix4, Point3, Vector3};

/// Fixed camera looking at the origin from behind the cube's forward axis.
pub struct Camera {
    eye: Point3<f32>,
    target: Point3<f32>,
    up: Vector3<f32>,

    fov: f32,
    near: f32,
    far: f32,
}

impl Camera {
    pub fn new() -> Camera {
        Camera {
            eye: Point3::new(0.0, 0.0, -10.0),
            target: Point3::origin(),
            up: Vector3::y(),
            fov: 45.0_f32.to_radians(),
            near: 0.1,
            far: 50.0,
        }
    }

    pub fn eye(&self) -> Point3<f32> {
        self.eye
    }

    pub fn frustum(&self, aspect_ratio: f32) -> Frustum {
        Frustum::new(
            Matrix4::look_at_rh(&self.eye, &self.target, &self.up),
            Matrix4::new_perspective(aspect_ratio, self.fov, self.near, self.far),
        )
    }
}

impl Default for Camera {
    fn default() -> Self {
        Camera::new()
    }
}

pub struct Frustum {
    pub view: na::Matrix4<f32>,
    pub projection: na::Matrix4<f32>,
    pub view_projection: na::Matrix4<f32>,
}

impl Frustum {
    pub fn new(view: na::Matrix4<f32>, projection: na::Matrix4<f32>) -> Frustum {
        Frustum {
            view,
            projection,
            view_projection: projection * view,
        }
    }
}
