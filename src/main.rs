use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use qrforge::merge::{ColorsPatch, LogoPatch, SizePatch};
use qrforge::render::encode_data_url;
use qrforge::{
    DotStyle, ExportBlob, ExportFormat, HashRenderer, Host, JsonFileBackend, OptionsSurface,
    PopupSurface, QrState, SettingsPatch, SizePreset, StorageKey, StoreHandle,
};

#[derive(Parser)]
#[command(name = "qrforge", about = "QR customization state engine", version)]
struct Cli {
    /// Path of the JSON store file
    #[arg(long, global = true, default_value = "qrforge.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a QR from text or a URL and export it
    Generate {
        /// The text or URL to encode
        payload: String,
        /// Export format: png, svg, jpeg or webp
        #[arg(long, default_value = "png")]
        format: String,
        /// Write the export here instead of printing a summary
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the last generated state
    Last,
    /// Show or change the default customization settings
    Defaults {
        #[command(subcommand)]
        command: DefaultsCommand,
    },
}

#[derive(Subcommand)]
enum DefaultsCommand {
    /// Print the effective default settings
    Show,
    /// Merge the given fields into the saved defaults
    Set {
        #[arg(long)]
        foreground: Option<String>,
        #[arg(long)]
        background: Option<String>,
        /// square, rounded or dots
        #[arg(long)]
        dot_style: Option<String>,
        /// 128, 256, 512, 1024 or a custom pixel size
        #[arg(long)]
        size: Option<u32>,
        /// Embed this image file as the default logo
        #[arg(long)]
        logo_file: Option<PathBuf>,
    },
}

fn parse_format(s: &str) -> qrforge::Result<ExportFormat> {
    match s {
        "png" => Ok(ExportFormat::Png),
        "svg" => Ok(ExportFormat::Svg),
        "jpeg" | "jpg" => Ok(ExportFormat::Jpeg),
        "webp" => Ok(ExportFormat::Webp),
        other => Err(qrforge::Error::Other(format!("unknown format '{other}'"))),
    }
}

fn parse_dot_style(s: &str) -> qrforge::Result<DotStyle> {
    match s {
        "square" => Ok(DotStyle::Square),
        "rounded" => Ok(DotStyle::Rounded),
        "dots" => Ok(DotStyle::Dots),
        other => Err(qrforge::Error::Other(format!("unknown dot style '{other}'"))),
    }
}

fn size_patch(pixels: u32) -> SizePatch {
    let preset = match pixels {
        128 => SizePreset::Px128,
        256 => SizePreset::Px256,
        512 => SizePreset::Px512,
        1024 => SizePreset::Px1024,
        _ => SizePreset::Custom,
    };
    SizePatch {
        preset: Some(preset),
        custom_size: (preset == SizePreset::Custom).then_some(pixels),
    }
}

async fn generate(
    store: StoreHandle,
    payload: String,
    format: &str,
    out: Option<PathBuf>,
) -> qrforge::Result<()> {
    let format = parse_format(format)?;
    let mut popup = PopupSurface::new(store, HashRenderer::new(), Host::noop());
    popup.on_notice(|notice| eprintln!("{}", notice.message));

    popup.open().await?;
    popup.set_input(payload);
    if !popup.generate_from_input().await? {
        return Err(qrforge::Error::Other("nothing to encode".to_string()));
    }

    let Some(blob) = popup.export(format)? else {
        return Err(qrforge::Error::Other("export produced nothing".to_string()));
    };

    match out {
        Some(path) => {
            std::fs::write(&path, blob.bytes())
                .map_err(|e| qrforge::Error::Other(format!("cannot write '{}': {e}", path.display())))?;
            println!("wrote {} ({} bytes)", path.display(), blob.bytes().len());
        }
        None => match blob {
            ExportBlob::Text(svg) => println!("{svg}"),
            ExportBlob::Raster(bytes) => println!("{} bytes: {}", bytes.len(), hex::encode(bytes)),
        },
    }
    Ok(())
}

async fn run(cli: Cli) -> qrforge::Result<()> {
    let backend = JsonFileBackend::open(&cli.store)?;
    let store = StoreHandle::new(backend);

    match cli.command {
        Command::Generate { payload, format, out } => {
            generate(store, payload, &format, out).await
        }
        Command::Last => {
            match store.get::<QrState>(StorageKey::LastState).await? {
                Some(state) => println!("{}", serde_json::to_string_pretty(&state)?),
                None => println!("no state saved yet"),
            }
            Ok(())
        }
        Command::Defaults { command } => {
            let options = OptionsSurface::new(store);
            match command {
                DefaultsCommand::Show => {
                    let settings = options.load().await?;
                    println!("{}", serde_json::to_string_pretty(&settings)?);
                }
                DefaultsCommand::Set { foreground, background, dot_style, size, logo_file } => {
                    let colors = (foreground.is_some() || background.is_some()).then(|| {
                        ColorsPatch { foreground, background, ..Default::default() }
                    });
                    let logo = match logo_file {
                        Some(path) => {
                            let bytes = std::fs::read(&path).map_err(|e| {
                                qrforge::Error::Other(format!("cannot read '{}': {e}", path.display()))
                            })?;
                            Some(LogoPatch {
                                enabled: Some(true),
                                data_url: Some(encode_data_url("image/png", &bytes)),
                                ..Default::default()
                            })
                        }
                        None => None,
                    };
                    let patch = SettingsPatch {
                        colors,
                        dot_style: dot_style.as_deref().map(parse_dot_style).transpose()?,
                        logo,
                        size: size.map(size_patch),
                        ..Default::default()
                    };
                    let saved = options.save(&patch).await?;
                    println!("{}", serde_json::to_string_pretty(&saved)?);
                }
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        let _ = writeln!(std::io::stderr(), "qrforge: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
