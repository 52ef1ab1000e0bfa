//! Data model for QR customization settings and generator state
//!
//! Every type here is a plain serializable value. Reads from the store yield
//! private copies and writes replace the stored document wholesale, so none
//! of these types carry shared mutable references. Persisted documents use
//! camelCase field names.

use serde::{Deserialize, Serialize};

/// Provenance tag recording where a payload came from.
///
/// Purely informational: rendering never consults it, but it is persisted as
/// part of the last-used state so a UI can label the restored payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QrSourceType {
    ActiveTabUrl,
    CustomText,
    CustomUrl,
    ImageUrl,
    UploadedImage,
    ContextPage,
    ContextLink,
    ContextImage,
}

/// Export formats offered by renderer backends.
///
/// Raster formats yield byte blobs; `Svg` yields text content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Png,
    Svg,
    Jpeg,
    Webp,
}

impl ExportFormat {
    /// File extension (and hash-domain tag) for this format.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Svg => "svg",
            ExportFormat::Jpeg => "jpeg",
            ExportFormat::Webp => "webp",
        }
    }
}

/// Module dot shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DotStyle {
    Square,
    Rounded,
    Dots,
}

/// Gradient geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    Linear,
    Radial,
}

/// A single gradient stop. `offset` is expected in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub offset: f32,
    pub color: String,
}

/// Gradient fill applied to the QR modules when enabled.
///
/// Stops are stored in the order the user supplied them; at least two are
/// expected when `enabled` is true. Renderer backends require ascending
/// offsets, which the renderer adapter establishes at resolve time.
/// `rotation` is in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrGradient {
    pub enabled: bool,
    #[serde(rename = "type")]
    pub kind: GradientKind,
    pub rotation: f32,
    pub color_stops: Vec<ColorStop>,
}

/// Flat color assignments.
///
/// When `transparent_background` is set the renderer ignores `background`,
/// but the value stays stored so toggling transparency back off restores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrColors {
    pub foreground: String,
    pub background: String,
    pub eye_inner: String,
    pub eye_outer: String,
    pub transparent_background: bool,
}

/// Embedded center logo.
///
/// `size_percent` is intended to stay roughly within 5–60 but the stored
/// value is not clamped here; clamping happens at the renderer boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrLogoSettings {
    pub enabled: bool,
    /// Base64 data URL of the logo image, if one was supplied.
    pub data_url: Option<String>,
    pub size_percent: f32,
    pub padding: f32,
    pub border_radius: f32,
}

/// Decorative border drawn around the QR matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrFrameSettings {
    pub enabled: bool,
    pub thickness: f32,
    pub color: String,
}

/// Output size selection: a fixed preset or a user-chosen pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SizePreset {
    Px128,
    Px256,
    Px512,
    Px1024,
    Custom,
}

/// Size settings.
///
/// `custom_size` is retained even while a fixed preset is active, so
/// switching back to `Custom` restores the last custom value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrSizeSettings {
    pub preset: SizePreset,
    pub custom_size: u32,
}

impl QrSizeSettings {
    /// The effective render size in pixels.
    pub fn effective_pixels(&self) -> u32 {
        match self.preset {
            SizePreset::Px128 => 128,
            SizePreset::Px256 => 256,
            SizePreset::Px512 => 512,
            SizePreset::Px1024 => 1024,
            SizePreset::Custom => self.custom_size,
        }
    }
}

/// The full visual customization of a QR code, independent of any payload.
///
/// This is the unit persisted under the `defaultSettings` key and embedded
/// in every [`QrState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCustomizationSettings {
    pub colors: QrColors,
    pub dot_style: DotStyle,
    pub gradient: QrGradient,
    pub logo: QrLogoSettings,
    pub frame: QrFrameSettings,
    pub size: QrSizeSettings,
}

impl Default for QrCustomizationSettings {
    fn default() -> Self {
        Self {
            colors: QrColors {
                foreground: "#111111".to_string(),
                background: "#ffffff".to_string(),
                eye_inner: "#111111".to_string(),
                eye_outer: "#111111".to_string(),
                transparent_background: false,
            },
            dot_style: DotStyle::Square,
            gradient: QrGradient {
                enabled: false,
                kind: GradientKind::Linear,
                rotation: 0.0,
                color_stops: vec![
                    ColorStop { offset: 0.0, color: "#111111".to_string() },
                    ColorStop { offset: 1.0, color: "#111111".to_string() },
                ],
            },
            logo: QrLogoSettings {
                enabled: false,
                data_url: None,
                size_percent: 22.0,
                padding: 6.0,
                border_radius: 8.0,
            },
            frame: QrFrameSettings {
                enabled: false,
                thickness: 14.0,
                color: "#111111".to_string(),
            },
            size: QrSizeSettings {
                preset: SizePreset::Px256,
                custom_size: 256,
            },
        }
    }
}

/// A full snapshot of the generator: provenance, payload, and settings.
///
/// This is the unit persisted under the `lastState` key; it is sufficient to
/// re-render without asking the user anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrState {
    pub source_type: QrSourceType,
    pub payload: String,
    pub settings: QrCustomizationSettings,
}

impl QrState {
    /// An empty custom-text state carrying the given settings.
    pub fn with_settings(settings: QrCustomizationSettings) -> Self {
        Self {
            source_type: QrSourceType::CustomText,
            payload: String::new(),
            settings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_match_documented_values() {
        let s = QrCustomizationSettings::default();
        assert_eq!(s.colors.background, "#ffffff");
        assert!(!s.colors.transparent_background);
        assert_eq!(s.dot_style, DotStyle::Square);
        assert!(!s.gradient.enabled);
        assert_eq!(s.gradient.color_stops.len(), 2);
        assert!(!s.logo.enabled);
        assert!(!s.frame.enabled);
        assert_eq!(s.size.preset, SizePreset::Px256);
    }

    #[test]
    fn effective_pixels_uses_custom_only_for_custom_preset() {
        let mut size = QrSizeSettings { preset: SizePreset::Px512, custom_size: 900 };
        assert_eq!(size.effective_pixels(), 512);
        size.preset = SizePreset::Custom;
        assert_eq!(size.effective_pixels(), 900);
    }

    #[test]
    fn state_documents_round_trip_through_json() {
        let state = QrState::with_settings(QrCustomizationSettings::default());
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"sourceType\":\"customText\""));
        assert!(json.contains("\"dotStyle\":\"square\""));
        let back: QrState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
