//! Deterministic in-tree renderer backend
//!
//! Stands in for a real QR rendering engine: it records the resolved plan
//! for the current payload and exports content-addressed blobs, so the same
//! `(payload, plan, format)` always yields the same bytes. This keeps the
//! whole pipeline executable and lets golden tests pin export output without
//! pulling in a matrix encoder or image codecs.

use sha2::{Digest, Sha256};

use crate::model::{ExportFormat, QrCustomizationSettings};
use crate::{Error, Result};

use super::{ExportBlob, RenderPlan, Renderer};

#[derive(Default)]
pub struct HashRenderer {
    current: Option<Current>,
}

struct Current {
    payload: String,
    plan: RenderPlan,
}

impl HashRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The plan resolved by the most recent `update`, if any.
    pub fn plan(&self) -> Option<&RenderPlan> {
        self.current.as_ref().map(|c| &c.plan)
    }

    /// The payload passed to the most recent `update`, if any.
    pub fn payload(&self) -> Option<&str> {
        self.current.as_ref().map(|c| c.payload.as_str())
    }

    fn fingerprint(&self, format: ExportFormat) -> Result<Vec<u8>> {
        let current = self
            .current
            .as_ref()
            .ok_or_else(|| Error::Render("nothing rendered yet".to_string()))?;

        let plan_json = serde_json::to_vec(&current.plan)?;
        let mut hasher = Sha256::new();
        hasher.update(format.extension().as_bytes());
        hasher.update([0u8]);
        hasher.update(current.payload.as_bytes());
        hasher.update([0u8]);
        hasher.update(&plan_json);
        Ok(hasher.finalize().to_vec())
    }
}

impl Renderer for HashRenderer {
    fn update(&mut self, payload: &str, settings: &QrCustomizationSettings) -> Result<()> {
        if payload.is_empty() {
            return Err(Error::Render("cannot encode an empty payload".to_string()));
        }
        self.current = Some(Current {
            payload: payload.to_string(),
            plan: RenderPlan::resolve(settings),
        });
        Ok(())
    }

    fn export(&self, format: ExportFormat) -> Result<ExportBlob> {
        let digest = self.fingerprint(format)?;
        match format {
            ExportFormat::Svg => {
                let size = self.current.as_ref().map(|c| c.plan.size_px).unwrap_or(0);
                Ok(ExportBlob::Text(format!(
                    "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{size}\" height=\"{size}\"><desc>{}</desc></svg>",
                    hex::encode(&digest)
                )))
            }
            _ => Ok(ExportBlob::Raster(digest)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_before_update_is_an_error() {
        let renderer = HashRenderer::new();
        assert!(renderer.export(ExportFormat::Png).is_err());
    }

    #[test]
    fn empty_payload_is_rejected() {
        let mut renderer = HashRenderer::new();
        let err = renderer.update("", &QrCustomizationSettings::default());
        assert!(err.is_err());
    }

    #[test]
    fn same_input_exports_same_bytes() {
        let settings = QrCustomizationSettings::default();
        let mut a = HashRenderer::new();
        let mut b = HashRenderer::new();
        a.update("https://example.com", &settings).unwrap();
        b.update("https://example.com", &settings).unwrap();
        assert_eq!(
            a.export(ExportFormat::Png).unwrap(),
            b.export(ExportFormat::Png).unwrap()
        );
    }

    #[test]
    fn payload_and_format_change_the_bytes() {
        let settings = QrCustomizationSettings::default();
        let mut renderer = HashRenderer::new();
        renderer.update("one", &settings).unwrap();
        let png = renderer.export(ExportFormat::Png).unwrap();
        let jpeg = renderer.export(ExportFormat::Jpeg).unwrap();
        assert_ne!(png, jpeg);

        renderer.update("two", &settings).unwrap();
        assert_ne!(renderer.export(ExportFormat::Png).unwrap(), png);
    }

    #[test]
    fn svg_export_is_text() {
        let mut renderer = HashRenderer::new();
        renderer.update("hello", &QrCustomizationSettings::default()).unwrap();
        match renderer.export(ExportFormat::Svg).unwrap() {
            ExportBlob::Text(svg) => {
                assert!(svg.starts_with("<svg"));
                assert!(svg.contains("width=\"256\""));
            }
            ExportBlob::Raster(_) => panic!("svg export must be text"),
        }
    }
}
