use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::{EguiContexts, egui};
use constants::buildings::BuildingRecord;

/// Offset of the info panel from the cursor, logical pixels.
const OVERLAY_OFFSET: f32 = 15.0;

/// Contents of the hover info panel; `None` hides it. The hover tool
/// owns this, the renderer only reads it.
#[derive(Resource, Default)]
pub struct InfoOverlayState {
    pub record: Option<BuildingRecord>,
}

/// Draw the info panel beside the cursor while a building is hovered.
pub fn render_info_overlay(
    mut contexts: EguiContexts,
    overlay: Res<InfoOverlayState>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let Some(record) = &overlay.record else {
        return;
    };
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };

    let ctx = contexts.ctx_mut();
    egui::Area::new(egui::Id::new("building_info"))
        .fixed_pos(egui::pos2(
            cursor.x + OVERLAY_OFFSET,
            cursor.y + OVERLAY_OFFSET,
        ))
        .interactable(false)
        .order(egui::Order::Tooltip)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.label(egui::RichText::new(format!("ID: {}", record.struct_id)).strong());
                ui.label(format!("Height: {:.2} m", record.height));
                ui.label(format!("Status: {}", record.stage));
            });
        });
}
