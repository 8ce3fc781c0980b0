use crate::camera::Camera;
use crate::light::ShadingModel;
use crate::material::MaterialKind;
use crate::mesh::ShapeKind;
use crate::scene::SceneState;

/// The "Options" overlay panel.
///
/// The camera sliders write the yaw/pitch/zoom fields directly and then
/// re-derive the basis. This deliberately skips the clamping that the
/// continuous look/scroll input path applies; the two update paths stay
/// distinct on purpose.
pub fn options_panel(ctx: &egui::Context, camera: &mut Camera, scene: &mut SceneState) {
    egui::Window::new("Options").show(ctx, |ui| {
        ui.label(egui::RichText::new("Camera").strong());
        ui.add(egui::Slider::new(&mut camera.zoom, 1.0..=90.0).text("Zoom"));
        if ui
            .add(egui::Slider::new(&mut camera.pitch, -89.0..=89.0).text("Pitch"))
            .changed()
        {
            camera.refresh_basis();
        }
        if ui
            .add(egui::Slider::new(&mut camera.yaw, -180.0..=180.0).text("Yaw"))
            .changed()
        {
            camera.refresh_basis();
        }

        ui.separator();
        ui.label(egui::RichText::new("Geometry shape").strong());
        ui.collapsing("Color", |ui| {
            for kind in MaterialKind::ALL {
                if ui
                    .selectable_label(scene.material == kind, swatch_label(kind))
                    .clicked()
                {
                    scene.material = kind;
                }
            }
        });
        ui.collapsing("Type", |ui| {
            for kind in ShapeKind::ALL {
                ui.selectable_value(&mut scene.shape, kind, kind.label());
            }
        });

        ui.separator();
        ui.label(egui::RichText::new("Lighting").strong());
        ui.collapsing("Model", |ui| {
            for model in ShadingModel::ALL {
                ui.selectable_value(&mut scene.shading, model, model.label());
            }
        });
        ui.checkbox(&mut scene.rotate_light, "Rotate");
        ui.checkbox(&mut scene.show_light_direction, "Direction");

        ui.separator();
        ui.label("Light position");
        ui.add(egui::Slider::new(&mut scene.light.position.x, -5.0..=5.0).text("X-axis"));
        ui.add(egui::Slider::new(&mut scene.light.position.y, -5.0..=5.0).text("Y-axis"));
        ui.add(egui::Slider::new(&mut scene.light.position.z, -5.0..=5.0).text("Z-axis"));
    });
}

fn swatch_label(kind: MaterialKind) -> egui::RichText {
    let color = kind.material().color * 255.0;
    egui::RichText::new(kind.label()).color(egui::Color32::from_rgb(
        color.x as u8,
        color.y as u8,
        color.z as u8,
    ))
}
