//! Minimal walkthrough of the popup surface: defaults, edits, export

use qrforge::merge::{ColorsPatch, SettingsPatch, StatePatch};
use qrforge::{ExportBlob, ExportFormat, HashRenderer, Host, OptionsSurface, PopupSurface, StoreHandle};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("qrforge - Popup Flow Example\n");

    let store = StoreHandle::in_memory();

    // Save some user defaults first, the way the options page would.
    let options = OptionsSurface::new(store.clone());
    options
        .save(&SettingsPatch {
            colors: Some(ColorsPatch {
                foreground: Some("#0b5394".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        })
        .await?;

    // Open the popup: it finds no last state, so the saved defaults apply.
    let mut popup = PopupSurface::new(store, HashRenderer::new(), Host::noop());
    popup.on_notice(|notice| println!("[notice] {}", notice.message));

    popup.open().await?;
    println!("Foreground after open: {}", popup.state().settings.colors.foreground);

    // Type a payload and generate.
    popup.set_input("https://www.rust-lang.org");
    popup.generate(StatePatch::default()).await?;
    println!("Generated for: {}", popup.state().payload);

    // Export in a couple of formats.
    for format in [ExportFormat::Png, ExportFormat::Svg] {
        match popup.export(format)? {
            Some(ExportBlob::Raster(bytes)) => {
                println!("{:?} export: {} bytes", format, bytes.len())
            }
            Some(ExportBlob::Text(svg)) => println!("{:?} export: {}", format, svg),
            None => println!("{:?} export: nothing rendered", format),
        }
    }

    Ok(())
}
