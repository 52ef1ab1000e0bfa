//! Renderer adapter boundary
//!
//! QR matrix encoding and image codecs live outside this crate, behind the
//! [`Renderer`] trait. What belongs here is the translation step: taking a
//! fully-merged [`QrCustomizationSettings`] value and resolving it into a
//! [`RenderPlan`] a backend can consume directly (one effective pixel size,
//! a flat-or-gradient fill, a validated logo, clamped ranges). All value
//! validation and clamping happens at this boundary; the stored model and
//! the merge engine pass values through untouched.

pub mod hash;

pub use hash::HashRenderer;

use base64::Engine as _;
use serde::Serialize;

use crate::model::{DotStyle, ExportFormat, GradientKind, QrCustomizationSettings};
use crate::Result;

/// Transparent color handed to backends when the background is disabled.
const TRANSPARENT: &str = "rgba(0,0,0,0)";

/// Module fill resolved from the color and gradient groups.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Fill {
    Flat { color: String },
    Gradient { kind: GradientKind, rotation: f32, stops: Vec<(f32, String)> },
}

/// Logo placement with the size already clamped into the safe render range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoPlan {
    pub data_url: String,
    /// Fraction of the QR area covered by the logo, clamped to `[0.05, 0.60]`.
    pub size_fraction: f32,
    pub padding: f32,
    pub border_radius: f32,
}

/// Frame placement; only present when the frame is enabled.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FramePlan {
    pub thickness: f32,
    pub color: String,
}

/// The fully-resolved instruction set for one render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPlan {
    pub size_px: u32,
    pub background: String,
    pub fill: Fill,
    pub dot_style: DotStyle,
    pub eye_inner: String,
    pub eye_outer: String,
    pub logo: Option<LogoPlan>,
    pub frame: Option<FramePlan>,
}

impl RenderPlan {
    /// Resolve a complete settings value into a backend-ready plan.
    pub fn resolve(settings: &QrCustomizationSettings) -> Self {
        let background = if settings.colors.transparent_background {
            TRANSPARENT.to_string()
        } else {
            settings.colors.background.clone()
        };

        let fill = if settings.gradient.enabled {
            let mut stops: Vec<(f32, String)> = settings
                .gradient
                .color_stops
                .iter()
                .map(|s| (s.offset, s.color.clone()))
                .collect();
            // Backends assume ascending offsets; the stored document keeps
            // the user's order.
            stops.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
            Fill::Gradient {
                kind: settings.gradient.kind,
                rotation: settings.gradient.rotation,
                stops,
            }
        } else {
            Fill::Flat { color: settings.colors.foreground.clone() }
        };

        let logo = settings
            .logo
            .enabled
            .then(|| settings.logo.data_url.as_deref())
            .flatten()
            .filter(|data_url| decode_data_url(data_url).is_some())
            .map(|data_url| LogoPlan {
                data_url: data_url.to_string(),
                size_fraction: (settings.logo.size_percent / 100.0).clamp(0.05, 0.60),
                padding: settings.logo.padding,
                border_radius: settings.logo.border_radius,
            });

        let frame = settings.frame.enabled.then(|| FramePlan {
            thickness: settings.frame.thickness.max(0.0),
            color: settings.frame.color.clone(),
        });

        RenderPlan {
            size_px: settings.size.effective_pixels(),
            background,
            fill,
            dot_style: settings.dot_style,
            eye_inner: settings.colors.eye_inner.clone(),
            eye_outer: settings.colors.eye_outer.clone(),
            logo,
            frame,
        }
    }
}

/// Decode the body of a `data:<mime>;base64,<payload>` reference.
///
/// Returns `None` for anything else; malformed references drop the logo from
/// the plan rather than failing the render.
pub fn decode_data_url(data_url: &str) -> Option<Vec<u8>> {
    let rest = data_url.strip_prefix("data:")?;
    let (_mime, body) = rest.split_once(";base64,")?;
    base64::engine::general_purpose::STANDARD.decode(body).ok()
}

/// Encode raw image bytes as a data URL suitable for `logo.data_url`.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, base64::engine::general_purpose::STANDARD.encode(bytes))
}

/// The result of an export: raster formats yield bytes, svg yields text.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportBlob {
    Raster(Vec<u8>),
    Text(String),
}

impl ExportBlob {
    /// Raw bytes of the blob regardless of kind.
    pub fn bytes(&self) -> &[u8] {
        match self {
            ExportBlob::Raster(bytes) => bytes,
            ExportBlob::Text(text) => text.as_bytes(),
        }
    }
}

/// Core trait for renderer backend implementations.
///
/// Callers guarantee that `settings` is a complete, fully-merged value on
/// every call; backends never see partial documents.
pub trait Renderer {
    /// Re-render for the given payload and settings.
    fn update(&mut self, payload: &str, settings: &QrCustomizationSettings) -> Result<()>;

    /// Export the last rendered image in the requested format.
    fn export(&self, format: ExportFormat) -> Result<ExportBlob>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ColorStop, SizePreset};

    #[test]
    fn transparent_background_overrides_stored_color() {
        let mut settings = QrCustomizationSettings::default();
        settings.colors.background = "#00ff00".to_string();
        settings.colors.transparent_background = true;

        let plan = RenderPlan::resolve(&settings);
        assert_eq!(plan.background, TRANSPARENT);
    }

    #[test]
    fn gradient_enabled_switches_fill_and_sorts_stops() {
        let mut settings = QrCustomizationSettings::default();
        settings.gradient.enabled = true;
        settings.gradient.color_stops = vec![
            ColorStop { offset: 1.0, color: "#bbbbbb".to_string() },
            ColorStop { offset: 0.0, color: "#aaaaaa".to_string() },
        ];

        let plan = RenderPlan::resolve(&settings);
        match plan.fill {
            Fill::Gradient { ref stops, .. } => {
                assert_eq!(stops[0], (0.0, "#aaaaaa".to_string()));
                assert_eq!(stops[1], (1.0, "#bbbbbb".to_string()));
            }
            Fill::Flat { .. } => panic!("expected gradient fill"),
        }
    }

    #[test]
    fn logo_size_is_clamped_into_render_range() {
        let mut settings = QrCustomizationSettings::default();
        settings.logo.enabled = true;
        settings.logo.data_url = Some(encode_data_url("image/png", b"fake-image"));
        settings.logo.size_percent = 250.0;

        let plan = RenderPlan::resolve(&settings);
        let logo = plan.logo.expect("logo should survive resolution");
        assert_eq!(logo.size_fraction, 0.60);
    }

    #[test]
    fn malformed_logo_reference_is_dropped() {
        let mut settings = QrCustomizationSettings::default();
        settings.logo.enabled = true;
        settings.logo.data_url = Some("not a data url".to_string());
        assert!(RenderPlan::resolve(&settings).logo.is_none());
    }

    #[test]
    fn disabled_groups_resolve_to_absent() {
        let settings = QrCustomizationSettings::default();
        let plan = RenderPlan::resolve(&settings);
        assert!(plan.logo.is_none());
        assert!(plan.frame.is_none());
        assert!(matches!(plan.fill, Fill::Flat { .. }));
    }

    #[test]
    fn custom_preset_uses_custom_size() {
        let mut settings = QrCustomizationSettings::default();
        settings.size.preset = SizePreset::Custom;
        settings.size.custom_size = 777;
        assert_eq!(RenderPlan::resolve(&settings).size_px, 777);
    }

    #[test]
    fn data_url_round_trip() {
        let url = encode_data_url("image/png", b"\x89PNG");
        assert_eq!(decode_data_url(&url).unwrap(), b"\x89PNG");
        assert!(decode_data_url("data:image/png;base64,!!!").is_none());
    }
}
