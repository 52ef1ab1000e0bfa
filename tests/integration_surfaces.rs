//! End-to-end tests driving the three surfaces against one shared store

use std::sync::{Arc, Mutex};

use qrforge::merge::{SettingsPatch, StatePatch};
use qrforge::platform::{NoopClipboard, NoopOpener, NoopTabs, StaticTabs};
use qrforge::render::Fill;
use qrforge::{
    BackgroundSurface, DotStyle, ExportBlob, ExportFormat, HashRenderer, Host, MenuAction,
    MenuClick, OptionsSurface, PopupSurface, QrSourceType, QrState, SizePreset, StorageKey,
    StoreHandle,
};

fn collecting_notices() -> (Arc<Mutex<Vec<String>>>, impl Fn(&qrforge::Notice) + Send + Sync) {
    let notices = Arc::new(Mutex::new(Vec::new()));
    let sink = notices.clone();
    (notices, move |n: &qrforge::Notice| sink.lock().unwrap().push(n.message.clone()))
}

fn popup(store: &StoreHandle, host: Host) -> PopupSurface<HashRenderer> {
    PopupSurface::new(store.clone(), HashRenderer::new(), host)
}

#[tokio::test]
async fn defaults_plus_dot_style_edit_keeps_everything_else() {
    let store = StoreHandle::in_memory();
    let mut popup = popup(&store, Host::noop());

    popup.open().await.unwrap();
    assert_eq!(popup.state().settings.dot_style, DotStyle::Square);
    assert_eq!(popup.state().settings.size.preset, SizePreset::Px256);

    popup.set_input("hello world");
    let patch = StatePatch {
        settings: Some(
            serde_json::from_str::<SettingsPatch>(r#"{"dotStyle":"rounded"}"#).unwrap(),
        ),
        ..Default::default()
    };
    assert!(popup.generate(patch).await.unwrap());

    assert_eq!(popup.state().settings.dot_style, DotStyle::Rounded);
    assert_eq!(popup.state().settings.size.preset, SizePreset::Px256);
    assert_eq!(popup.state().payload, "hello world");

    // and the snapshot was persisted
    let saved: Option<QrState> = store.get(StorageKey::LastState).await.unwrap();
    assert_eq!(saved.unwrap().settings.dot_style, DotStyle::Rounded);
}

#[tokio::test]
async fn context_menu_click_flows_into_the_popup() {
    let store = StoreHandle::in_memory();
    let opener = Arc::new(NoopOpener::new());
    let host = Host {
        tabs: Arc::new(NoopTabs),
        opener: opener.clone(),
        clipboard: Arc::new(NoopClipboard::new()),
    };

    let background = BackgroundSurface::new(store.clone(), host.clone());
    let click = MenuClick {
        action: Some(MenuAction::Image),
        src_url: Some("https://example.com/img.png".to_string()),
        ..Default::default()
    };
    assert!(background.handle_menu_click(&click).await.unwrap());
    assert_eq!(opener.open_count(), 1);

    let mut popup = popup(&store, host);
    assert!(popup.open().await.unwrap(), "popup must consume the pending context");

    assert_eq!(popup.state().source_type, QrSourceType::ContextImage);
    assert_eq!(popup.state().payload, "https://example.com/img.png");
    assert_eq!(popup.renderer().payload(), Some("https://example.com/img.png"));

    // a second popup open finds the slot empty and just restores state
    let mut second = PopupSurface::new(store, HashRenderer::new(), Host::noop());
    assert!(!second.open().await.unwrap());
    assert_eq!(second.state().payload, "https://example.com/img.png");
}

#[tokio::test]
async fn two_clicks_without_consume_deliver_only_the_second() {
    let store = StoreHandle::in_memory();
    let host = Host::noop();
    let background = BackgroundSurface::new(store.clone(), host.clone());

    for url in ["https://first.example", "https://second.example"] {
        let click = MenuClick {
            action: Some(MenuAction::Link),
            link_url: Some(url.to_string()),
            ..Default::default()
        };
        background.handle_menu_click(&click).await.unwrap();
    }

    let mut popup = popup(&store, host);
    assert!(popup.open().await.unwrap());
    assert_eq!(popup.state().payload, "https://second.example");
    assert_eq!(popup.state().source_type, QrSourceType::ContextLink);
}

#[tokio::test]
async fn click_without_payload_publishes_nothing_and_opens_nothing() {
    let store = StoreHandle::in_memory();
    let opener = Arc::new(NoopOpener::new());
    let host = Host {
        tabs: Arc::new(NoopTabs),
        opener: opener.clone(),
        clipboard: Arc::new(NoopClipboard::new()),
    };

    let background = BackgroundSurface::new(store.clone(), host);
    let click = MenuClick { action: Some(MenuAction::Link), ..Default::default() };
    assert!(!background.handle_menu_click(&click).await.unwrap());
    assert_eq!(opener.open_count(), 0);

    let mut popup = popup(&store, Host::noop());
    assert!(!popup.open().await.unwrap());
}

#[tokio::test]
async fn blank_payload_notices_and_writes_nothing() {
    let store = StoreHandle::in_memory();
    let mut popup = popup(&store, Host::noop());
    let (notices, handler) = collecting_notices();
    popup.on_notice(handler);

    popup.open().await.unwrap();
    popup.set_input("   ");
    assert!(!popup.generate_from_input().await.unwrap());

    assert_eq!(notices.lock().unwrap().len(), 1);
    let saved: Option<QrState> = store.get(StorageKey::LastState).await.unwrap();
    assert!(saved.is_none(), "aborted generate must not persist state");
}

#[tokio::test]
async fn unreadable_active_tab_degrades_to_a_notice() {
    let store = StoreHandle::in_memory();
    let mut popup = popup(&store, Host::noop());
    let (notices, handler) = collecting_notices();
    popup.on_notice(handler);

    popup.open().await.unwrap();
    assert!(!popup.generate_from_active_tab().await.unwrap());

    let messages = notices.lock().unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("Active tab unavailable"));
}

#[tokio::test]
async fn active_tab_generate_uses_the_tab_url() {
    let store = StoreHandle::in_memory();
    let host = Host {
        tabs: Arc::new(StaticTabs::new("https://docs.example/page")),
        opener: Arc::new(NoopOpener::new()),
        clipboard: Arc::new(NoopClipboard::new()),
    };
    let mut popup = popup(&store, host);

    popup.open().await.unwrap();
    assert!(popup.generate_from_active_tab().await.unwrap());
    assert_eq!(popup.state().source_type, QrSourceType::ActiveTabUrl);
    assert_eq!(popup.state().payload, "https://docs.example/page");
    assert_eq!(popup.input(), "https://docs.example/page");
}

#[tokio::test]
async fn copy_png_lands_on_the_clipboard() {
    let store = StoreHandle::in_memory();
    let clipboard = Arc::new(NoopClipboard::new());
    let host = Host {
        tabs: Arc::new(NoopTabs),
        opener: Arc::new(NoopOpener::new()),
        clipboard: clipboard.clone(),
    };
    let mut popup = popup(&store, host);

    popup.open().await.unwrap();
    popup.set_input("copy me");
    popup.generate_from_input().await.unwrap();
    assert!(popup.copy_png().unwrap());

    let (mime, bytes) = clipboard.last_write().unwrap();
    assert_eq!(mime, "image/png");
    match popup.export(ExportFormat::Png).unwrap().unwrap() {
        ExportBlob::Raster(expected) => assert_eq!(bytes, expected),
        ExportBlob::Text(_) => panic!("png export must be raster"),
    }
}

#[tokio::test]
async fn saved_defaults_seed_a_fresh_popup() {
    let store = StoreHandle::in_memory();

    let options = OptionsSurface::new(store.clone());
    let patch: SettingsPatch =
        serde_json::from_str(r##"{"colors":{"foreground":"#abcdef"},"dotStyle":"dots"}"##).unwrap();
    options.save(&patch).await.unwrap();

    let mut popup = popup(&store, Host::noop());
    popup.open().await.unwrap();
    assert_eq!(popup.state().settings.colors.foreground, "#abcdef");
    assert_eq!(popup.state().settings.dot_style, DotStyle::Dots);
    // untouched groups stay at built-in defaults
    assert_eq!(popup.state().settings.size.preset, SizePreset::Px256);
}

#[tokio::test]
async fn url_input_is_classified_as_custom_url() {
    let store = StoreHandle::in_memory();
    let mut popup = popup(&store, Host::noop());

    popup.open().await.unwrap();
    popup.set_input("https://example.com/deep/link");
    popup.generate_from_input().await.unwrap();
    assert_eq!(popup.state().source_type, QrSourceType::CustomUrl);

    popup.set_input("just some words");
    popup.generate_from_input().await.unwrap();
    assert_eq!(popup.state().source_type, QrSourceType::CustomText);
}

#[tokio::test]
async fn gradient_settings_flow_through_to_the_render_plan() {
    let store = StoreHandle::in_memory();
    let mut popup = popup(&store, Host::noop());
    popup.open().await.unwrap();

    popup.set_input("gradient payload");
    let patch = StatePatch {
        settings: Some(
            serde_json::from_str::<SettingsPatch>(
                r##"{"gradient":{"enabled":true,"type":"radial","colorStops":[
                    {"offset":0.8,"color":"#ff0000"},{"offset":0.2,"color":"#0000ff"}]}}"##,
            )
            .unwrap(),
        ),
        ..Default::default()
    };
    popup.generate(patch).await.unwrap();

    let plan = popup.renderer().plan().expect("a plan must exist after generate");
    match &plan.fill {
        Fill::Gradient { stops, .. } => {
            assert_eq!(stops[0].0, 0.2, "plan stops must be sorted ascending");
            assert_eq!(stops[1].0, 0.8);
        }
        Fill::Flat { .. } => panic!("gradient must switch the fill"),
    }
    // stored document keeps the user's order
    assert_eq!(popup.state().settings.gradient.color_stops[0].offset, 0.8);
}
