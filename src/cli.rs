// cli.rs - Command-line interface configuration
use crate::mesh::ShapeKind;
use clap::{Parser, ValueEnum};

#[derive(Parser, Debug, Clone)]
#[command(name = "shape-lab")]
#[command(about = "Interactive lit-primitive viewer", long_about = None)]
pub struct Cli {
    /// Hide the options panel
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// Look around with the mouse; the scroll wheel then zooms instead of
    /// tilting the shape
    #[arg(long = "mouse-look", default_value = "false")]
    pub mouse_look: bool,

    /// Primitive shown at startup
    #[arg(long = "shape", value_enum, default_value = "cube")]
    pub shape: ShapeArg,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ShapeArg {
    Cube,
    Pyramid,
    Cuboid,
}

impl From<ShapeArg> for ShapeKind {
    fn from(arg: ShapeArg) -> Self {
        match arg {
            ShapeArg::Cube => ShapeKind::Cube,
            ShapeArg::Pyramid => ShapeKind::Pyramid,
            ShapeArg::Cuboid => ShapeKind::Cuboid,
        }
    }
}
