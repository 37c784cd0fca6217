use serde::{Deserialize, Serialize};

/// Visual shape of a marker's hint dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MarkerShape {
    #[default]
    Dot,
    Ring,
    Star,
    Sparkle,
}

/// Styling descriptor for a marker's on-page dot.
/// Pure configuration data; the engine only forwards it to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    /// Dot shape.
    #[serde(default)]
    pub shape: MarkerShape,
    /// Dot diameter in CSS pixels.
    #[serde(default = "default_size")]
    pub size: f32,
    /// Pulse amplitude multiplier in [0, 1].
    #[serde(default = "default_pulse_intensity")]
    pub pulse_intensity: f32,
    /// Design-system color token (e.g. "gold", "sage").
    #[serde(default)]
    pub color_token: String,
}

fn default_size() -> f32 {
    12.0
}

fn default_pulse_intensity() -> f32 {
    1.0
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            shape: MarkerShape::Dot,
            size: default_size(),
            pulse_intensity: default_pulse_intensity(),
            color_token: String::new(),
        }
    }
}

/// A single discoverable marker, as declared in the catalog manifest.
/// Immutable after load; ids are unique across the whole catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerDefinition {
    /// Stable unique id, also the key used in the persisted progress record.
    pub id: String,
    /// Human-readable name shown in acknowledgements.
    pub display_name: String,
    /// Optional hint shown on hover/focus/long-press while undiscovered.
    #[serde(default)]
    pub hint_text: Option<String>,
    /// Bonus markers get a distinct acknowledgement variant.
    #[serde(default)]
    pub is_bonus: bool,
    /// Dot styling.
    #[serde(default)]
    pub style: MarkerStyle,
    /// Per-marker proximity radius override, in CSS pixels. Falls back to
    /// the engine-wide default when absent.
    #[serde(default)]
    pub radius: Option<f32>,
    /// Reference to the reveal artwork (path or asset key).
    #[serde(default)]
    pub asset_ref: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_definition_fills_defaults() {
        let json = r#"{ "id": "attic-key", "display_name": "The Attic Key" }"#;
        let def: MarkerDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.id, "attic-key");
        assert!(def.hint_text.is_none());
        assert!(!def.is_bonus);
        assert_eq!(def.style.shape, MarkerShape::Dot);
        assert_eq!(def.style.size, 12.0);
        assert_eq!(def.style.pulse_intensity, 1.0);
    }

    #[test]
    fn full_definition_round_trips() {
        let def = MarkerDefinition {
            id: "garden-gnome".into(),
            display_name: "Garden Gnome".into(),
            hint_text: Some("Look near the hedges".into()),
            is_bonus: true,
            style: MarkerStyle {
                shape: MarkerShape::Star,
                size: 16.0,
                pulse_intensity: 0.6,
                color_token: "gold".into(),
            },
            radius: Some(90.0),
            asset_ref: "secrets/gnome.png".into(),
        };
        let json = serde_json::to_string(&def).unwrap();
        let back: MarkerDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, def);
    }
}
