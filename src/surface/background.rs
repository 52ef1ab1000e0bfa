//! The background trigger surface: context-menu clicks
//!
//! A click resolves to a `(payload, source type)` pair, publishes it into
//! the handoff slot, and only then asks the host to open the popup. A click
//! whose context carries no resolvable payload is a complete no-op: nothing
//! is published and no surface opens.

use crate::model::QrSourceType;
use crate::pending;
use crate::platform::Host;
use crate::store::StoreHandle;
use crate::Result;

/// The three context-menu entries the trigger surface installs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Page,
    Link,
    Image,
}

impl MenuAction {
    /// Stable menu item id registered with the host.
    pub fn id(self) -> &'static str {
        match self {
            MenuAction::Page => "qr_generate_from_page",
            MenuAction::Link => "qr_generate_from_link",
            MenuAction::Image => "qr_generate_from_image",
        }
    }

    /// Human-readable menu title.
    pub fn title(self) -> &'static str {
        match self {
            MenuAction::Page => "Generate QR from this page",
            MenuAction::Link => "Generate QR from this link",
            MenuAction::Image => "Generate QR from this image",
        }
    }

    /// Look an action up by its registered id.
    pub fn from_id(id: &str) -> Option<Self> {
        [MenuAction::Page, MenuAction::Link, MenuAction::Image]
            .into_iter()
            .find(|action| action.id() == id)
    }
}

/// The host's click report: which menu entry, plus whatever URLs the
/// clicked context exposes.
#[derive(Debug, Clone, Default)]
pub struct MenuClick {
    pub action: Option<MenuAction>,
    pub page_url: Option<String>,
    pub link_url: Option<String>,
    pub src_url: Option<String>,
}

pub struct BackgroundSurface {
    store: StoreHandle,
    host: Host,
}

impl BackgroundSurface {
    pub fn new(store: StoreHandle, host: Host) -> Self {
        Self { store, host }
    }

    /// Handle a context-menu click.
    ///
    /// Returns `true` when a context was published and the popup open was
    /// requested. The publish is awaited before the open request goes out,
    /// so the popup's consume always observes this click's entry or a
    /// later one, never an earlier one.
    pub async fn handle_menu_click(&self, click: &MenuClick) -> Result<bool> {
        let Some((payload, source_type)) = resolve_click(click) else {
            log::debug!("menu click without resolvable payload; ignoring");
            return Ok(false);
        };

        pending::publish(&self.store, &payload, source_type).await?;
        self.host.opener.open_popup()?;
        Ok(true)
    }
}

fn resolve_click(click: &MenuClick) -> Option<(String, QrSourceType)> {
    let (url, source_type) = match click.action? {
        MenuAction::Page => (&click.page_url, QrSourceType::ContextPage),
        MenuAction::Link => (&click.link_url, QrSourceType::ContextLink),
        MenuAction::Image => (&click.src_url, QrSourceType::ContextImage),
    };
    let url = url.as_ref().filter(|u| !u.is_empty())?;
    Some((url.clone(), source_type))
}
