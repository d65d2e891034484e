#[macro_use]
extern crate glium;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate log;

extern crate nalgebra;

pub mod camera;
pub mod clock;
pub mod config;
pub mod geometry;
pub mod input;
pub mod lighting;
pub mod scene;
pub mod session;
pub mod texture;
