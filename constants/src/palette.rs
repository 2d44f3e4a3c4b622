//! Display palette, as sRGB components in `[0, 1]`.

/// Resting colour for building volumes (#a0aebc).
pub const NEUTRAL_COLOUR: [f32; 3] = [0.627, 0.682, 0.737];

/// Colour for the building under the cursor (#ffaa00).
pub const HOVER_COLOUR: [f32; 3] = [1.0, 0.667, 0.0];

/// Colour for buildings matched by the active query (#27ae60).
pub const MATCH_COLOUR: [f32; 3] = [0.153, 0.682, 0.376];

/// Ground plane colour.
pub const GROUND_COLOUR: [f32; 3] = [0.85, 0.85, 0.84];

/// Window clear colour (#f0f0f0).
pub const CLEAR_COLOUR: [f32; 3] = [0.94, 0.94, 0.94];
