//! Merge engine combining full settings/state values with partial patches
//!
//! The merge is pure and total: shallow at the top level, then one more
//! shallow level inside each settings group. Fields absent from a patch
//! never null anything, and `color_stops` is replaced wholesale when the
//! patch carries it. No validation happens here; out-of-range numbers pass
//! through untouched and are dealt with at the renderer boundary.

use serde::{Deserialize, Serialize};

use crate::model::{
    ColorStop, DotStyle, GradientKind, QrCustomizationSettings, QrSourceType, QrState, SizePreset,
};

/// Partial update to [`crate::model::QrColors`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColorsPatch {
    pub foreground: Option<String>,
    pub background: Option<String>,
    pub eye_inner: Option<String>,
    pub eye_outer: Option<String>,
    pub transparent_background: Option<bool>,
}

/// Partial update to [`crate::model::QrGradient`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GradientPatch {
    pub enabled: Option<bool>,
    #[serde(rename = "type")]
    pub kind: Option<GradientKind>,
    pub rotation: Option<f32>,
    /// Replaces the whole stop list when present; stops are never merged
    /// element-wise.
    pub color_stops: Option<Vec<ColorStop>>,
}

/// Partial update to [`crate::model::QrLogoSettings`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogoPatch {
    pub enabled: Option<bool>,
    pub data_url: Option<String>,
    pub size_percent: Option<f32>,
    pub padding: Option<f32>,
    pub border_radius: Option<f32>,
}

/// Partial update to [`crate::model::QrFrameSettings`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FramePatch {
    pub enabled: Option<bool>,
    pub thickness: Option<f32>,
    pub color: Option<String>,
}

/// Partial update to [`crate::model::QrSizeSettings`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SizePatch {
    pub preset: Option<SizePreset>,
    pub custom_size: Option<u32>,
}

/// Partial update to a full [`QrCustomizationSettings`] value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SettingsPatch {
    pub colors: Option<ColorsPatch>,
    pub dot_style: Option<DotStyle>,
    pub gradient: Option<GradientPatch>,
    pub logo: Option<LogoPatch>,
    pub frame: Option<FramePatch>,
    pub size: Option<SizePatch>,
}

impl SettingsPatch {
    /// A patch that changes nothing.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Partial update to a full [`QrState`] value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatePatch {
    pub source_type: Option<QrSourceType>,
    pub payload: Option<String>,
    pub settings: Option<SettingsPatch>,
}

fn take<T: Clone>(patch: &Option<T>, base: &T) -> T {
    patch.as_ref().cloned().unwrap_or_else(|| base.clone())
}

/// Merge a partial settings patch over a complete base value.
///
/// The result is always a complete settings value: a patch supplying only
/// `colors.foreground` leaves the other four color fields and every other
/// group exactly as they were in `base`.
pub fn merge_settings(
    base: &QrCustomizationSettings,
    patch: &SettingsPatch,
) -> QrCustomizationSettings {
    let mut merged = base.clone();

    if let Some(colors) = &patch.colors {
        merged.colors.foreground = take(&colors.foreground, &base.colors.foreground);
        merged.colors.background = take(&colors.background, &base.colors.background);
        merged.colors.eye_inner = take(&colors.eye_inner, &base.colors.eye_inner);
        merged.colors.eye_outer = take(&colors.eye_outer, &base.colors.eye_outer);
        merged.colors.transparent_background =
            take(&colors.transparent_background, &base.colors.transparent_background);
    }

    if let Some(dot_style) = patch.dot_style {
        merged.dot_style = dot_style;
    }

    if let Some(gradient) = &patch.gradient {
        merged.gradient.enabled = take(&gradient.enabled, &base.gradient.enabled);
        merged.gradient.kind = take(&gradient.kind, &base.gradient.kind);
        merged.gradient.rotation = take(&gradient.rotation, &base.gradient.rotation);
        merged.gradient.color_stops = take(&gradient.color_stops, &base.gradient.color_stops);
    }

    if let Some(logo) = &patch.logo {
        merged.logo.enabled = take(&logo.enabled, &base.logo.enabled);
        if let Some(data_url) = &logo.data_url {
            merged.logo.data_url = Some(data_url.clone());
        }
        merged.logo.size_percent = take(&logo.size_percent, &base.logo.size_percent);
        merged.logo.padding = take(&logo.padding, &base.logo.padding);
        merged.logo.border_radius = take(&logo.border_radius, &base.logo.border_radius);
    }

    if let Some(frame) = &patch.frame {
        merged.frame.enabled = take(&frame.enabled, &base.frame.enabled);
        merged.frame.thickness = take(&frame.thickness, &base.frame.thickness);
        merged.frame.color = take(&frame.color, &base.frame.color);
    }

    if let Some(size) = &patch.size {
        merged.size.preset = take(&size.preset, &base.size.preset);
        merged.size.custom_size = take(&size.custom_size, &base.size.custom_size);
    }

    merged
}

/// Merge a partial state patch over a complete base state.
///
/// `fallback_payload` is the caller's current UI input: it is used only when
/// neither the patch nor the base carries a non-empty payload, so a blank
/// patch does not erase in-progress typing. `source_type` keeps the base's
/// value when the patch omits it.
pub fn merge_state(base: &QrState, patch: &StatePatch, fallback_payload: &str) -> QrState {
    let settings = match &patch.settings {
        Some(settings_patch) => merge_settings(&base.settings, settings_patch),
        None => base.settings.clone(),
    };

    let payload = match &patch.payload {
        Some(payload) => payload.clone(),
        None if !base.payload.is_empty() => base.payload.clone(),
        None => fallback_payload.to_string(),
    };

    QrState {
        source_type: patch.source_type.unwrap_or(base.source_type),
        payload,
        settings,
    }
}
