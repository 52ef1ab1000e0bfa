//! Context-menu handoff walkthrough: background publishes, popup consumes

use qrforge::{
    BackgroundSurface, HashRenderer, Host, MenuAction, MenuClick, PopupSurface, StoreHandle,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("qrforge - Context Handoff Example\n");

    let store = StoreHandle::in_memory();
    let host = Host::noop();

    // The background surface reacts to a context-menu click on a link.
    let background = BackgroundSurface::new(store.clone(), host.clone());
    let click = MenuClick {
        action: Some(MenuAction::Link),
        link_url: Some("https://example.com/shared/doc".to_string()),
        ..Default::default()
    };
    let published = background.handle_menu_click(&click).await?;
    println!("Published pending context: {published}");

    // The popup opens next and consumes the handoff exactly once.
    let mut popup = PopupSurface::new(store.clone(), HashRenderer::new(), host);
    popup.on_notice(|notice| println!("[notice] {}", notice.message));

    let consumed = popup.open().await?;
    println!(
        "Consumed: {consumed} -> payload '{}' ({:?})",
        popup.state().payload,
        popup.state().source_type
    );

    // A second popup finds the slot already empty.
    let mut second = PopupSurface::new(store, HashRenderer::new(), Host::noop());
    let consumed_again = second.open().await?;
    println!("Second open consumed: {consumed_again} (slot is empty after first read)");

    Ok(())
}
