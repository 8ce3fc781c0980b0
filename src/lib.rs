pub mod camera;
pub mod cli;
pub mod frame;
pub mod light;
pub mod material;
pub mod mesh;
pub mod renderer;
pub mod scene;
pub mod types;
pub mod ui;
