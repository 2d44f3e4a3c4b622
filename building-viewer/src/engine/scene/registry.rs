//! The pickable building registry and per-building display state.
//!
//! Every spawned building is listed in [`BuildingRegistry`] in load order,
//! which is also the tie-break order for picking. Colour never comes from
//! writing materials directly in tool code: tools set the `hovered` and
//! `matched` flags on [`DisplayState`], and a single system derives the
//! material colour from the flags, touching the material only on change.

use bevy::prelude::*;
use constants::buildings::BuildingRecord;
use constants::palette::{HOVER_COLOUR, MATCH_COLOUR, NEUTRAL_COLOUR};

use crate::engine::scene::extrusion::PickShape;

/// Convert a palette entry to a bevy colour.
pub fn palette_colour(rgb: [f32; 3]) -> Color {
    Color::srgb(rgb[0], rgb[1], rgb[2])
}

/// Ordered registry of every pickable building entity.
#[derive(Resource, Default)]
pub struct BuildingRegistry {
    pub entities: Vec<Entity>,
}

/// The source record a building was built from.
#[derive(Component, Debug, Clone)]
pub struct BuildingMeta {
    pub record: BuildingRecord,
}

/// CPU-side pick geometry for one building.
#[derive(Component)]
pub struct PickVolume(pub PickShape);

/// Why a building is coloured the way it is. Hover outranks match;
/// with neither flag set the building renders neutral.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct DisplayState {
    pub hovered: bool,
    pub matched: bool,
    applied: [f32; 3],
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            hovered: false,
            matched: false,
            applied: NEUTRAL_COLOUR,
        }
    }
}

impl DisplayState {
    /// The colour the current flags resolve to.
    pub fn resolve_colour(&self) -> [f32; 3] {
        if self.hovered {
            HOVER_COLOUR
        } else if self.matched {
            MATCH_COLOUR
        } else {
            NEUTRAL_COLOUR
        }
    }

    /// The colour to write if it differs from the one already applied.
    /// Recording the write here is what keeps redundant flag updates from
    /// touching materials at all.
    pub fn take_pending_write(&mut self) -> Option<[f32; 3]> {
        let next = self.resolve_colour();
        if next == self.applied {
            None
        } else {
            self.applied = next;
            Some(next)
        }
    }
}

/// Total material colour writes since startup.
#[derive(Resource, Default)]
pub struct ColourWriteCounter(pub usize);

/// The single writer of building material colours.
pub fn apply_display_colours(
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut buildings: Query<(&mut DisplayState, &MeshMaterial3d<StandardMaterial>)>,
    mut writes: ResMut<ColourWriteCounter>,
) {
    for (mut state, material) in &mut buildings {
        if let Some(colour) = state.take_pending_write() {
            if let Some(material) = materials.get_mut(&material.0) {
                material.base_color = palette_colour(colour);
                writes.0 += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_outranks_match() {
        let state = DisplayState {
            hovered: true,
            matched: true,
            ..default()
        };
        assert_eq!(state.resolve_colour(), HOVER_COLOUR);
    }

    #[test]
    fn match_outranks_neutral() {
        let state = DisplayState {
            hovered: false,
            matched: true,
            ..default()
        };
        assert_eq!(state.resolve_colour(), MATCH_COLOUR);
    }

    #[test]
    fn fresh_state_has_nothing_to_write() {
        // Buildings spawn with neutral materials, so neutral is pre-applied.
        let mut state = DisplayState::default();
        assert_eq!(state.take_pending_write(), None);
    }

    #[test]
    fn repeated_resolves_write_once() {
        let mut state = DisplayState::default();
        state.hovered = true;
        assert_eq!(state.take_pending_write(), Some(HOVER_COLOUR));
        assert_eq!(state.take_pending_write(), None);
        assert_eq!(state.take_pending_write(), None);

        state.hovered = false;
        assert_eq!(state.take_pending_write(), Some(NEUTRAL_COLOUR));
        assert_eq!(state.take_pending_write(), None);
    }

    #[test]
    fn flag_flips_that_cancel_out_write_nothing() {
        let mut state = DisplayState::default();
        state.hovered = true;
        state.hovered = false;
        assert_eq!(state.take_pending_write(), None);
    }

    #[test]
    fn dropping_hover_falls_back_to_match() {
        let mut state = DisplayState::default();
        state.matched = true;
        assert_eq!(state.take_pending_write(), Some(MATCH_COLOUR));

        state.hovered = true;
        assert_eq!(state.take_pending_write(), Some(HOVER_COLOUR));

        state.hovered = false;
        assert_eq!(state.take_pending_write(), Some(MATCH_COLOUR));
    }
}
