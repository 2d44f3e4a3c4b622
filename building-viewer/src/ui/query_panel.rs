use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::tools::query::{ClearRequested, QueryPanelState, QuerySubmitted};

/// The query panel: a text input, highlight and clear actions, the match
/// count, and the error slot.
pub fn render_query_panel(
    mut contexts: EguiContexts,
    mut panel: ResMut<QueryPanelState>,
    mut submissions: EventWriter<QuerySubmitted>,
    mut clears: EventWriter<ClearRequested>,
) {
    let ctx = contexts.ctx_mut();
    egui::Window::new("Query")
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(12.0, 12.0))
        .resizable(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let input = ui.text_edit_singleline(&mut panel.input);
                let submitted = ui.button("Highlight").clicked()
                    || (input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)));
                if submitted {
                    submissions.write(QuerySubmitted(panel.input.clone()));
                }
                if ui.button("Clear").clicked() {
                    clears.write(ClearRequested);
                }
            });

            if panel.in_flight {
                ui.label("Searching...");
            }
            if let Some(count) = panel.result_count {
                ui.label(format!(
                    "{count} match{}",
                    if count == 1 { "" } else { "es" }
                ));
            }
            if !panel.error.is_empty() {
                ui.colored_label(egui::Color32::LIGHT_RED, &panel.error);
            }
        });
}
