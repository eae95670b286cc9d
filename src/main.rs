use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;

use qirender::{
    Color, EcLevel, Exporter, FileExporter, GenerateRequest, Generator, ModuleGrid, OutputFormat,
    RenderConfig,
};

/// Render a QR code as PNG or SVG, optionally with a logo in the center.
#[derive(Parser, Debug)]
#[command(name = "qirender", version, about)]
struct Cli {
    /// Text or URL to encode
    text: String,

    /// JSON file with default render settings; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output edge length in pixels
    #[arg(short, long)]
    size: Option<u32>,

    /// Error correction level: L, M, Q or H
    #[arg(short, long)]
    ecc: Option<EcLevel>,

    /// Output format: png or svg
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Module color, #RGB or #RRGGBB
    #[arg(long)]
    fg: Option<Color>,

    /// Background color, #RGB or #RRGGBB
    #[arg(long)]
    bg: Option<Color>,

    /// PNG or JPEG image to place in the center
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Directory to save into
    #[arg(short, long, default_value = "generated")]
    out: PathBuf,

    /// File name without extension; defaults to a timestamp
    #[arg(long)]
    name: Option<String>,

    /// Copy to the clipboard instead of saving
    #[arg(long)]
    copy: bool,

    /// Print the module grid to the terminal
    #[arg(long)]
    preview: bool,
}

impl Cli {
    fn render_config(&self) -> anyhow::Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::from_json_file(path)?,
            None => RenderConfig::default(),
        };
        if let Some(size) = self.size {
            config.size = size;
        }
        if let Some(ecc) = self.ecc {
            config.ec_level = ecc;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(fg) = self.fg {
            config.foreground = fg;
        }
        if let Some(bg) = self.bg {
            config.background = bg;
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(feature = "clipboard")]
fn clipboard_exporter() -> anyhow::Result<Box<dyn Exporter>> {
    Ok(Box::new(qirender::ClipboardExporter))
}

#[cfg(not(feature = "clipboard"))]
fn clipboard_exporter() -> anyhow::Result<Box<dyn Exporter>> {
    bail!("clipboard export requires building with the 'clipboard' feature")
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if cli.text.trim().is_empty() {
        bail!("nothing to encode: text is empty");
    }

    let config = cli.render_config()?;
    let mut request = GenerateRequest::new(cli.text.trim(), config);
    if let Some(path) = &cli.logo {
        let bytes = std::fs::read(path)
            .with_context(|| format!("reading logo {}", path.display()))?;
        request = request.with_logo(bytes);
    }

    let generator: Generator = Generator::default();
    if cli.preview {
        let grid = generator.encode(&request)?;
        log::debug!("preview of {} modules per side", grid.module_count());
        print!("{}", grid.to_ascii(4));
    }

    let out = generator.generate(&request).context("failed to generate QR code")?;
    for warning in &out.warnings {
        eprintln!("warning: {}", warning);
    }

    let exporter: Box<dyn Exporter> = if cli.copy {
        clipboard_exporter()?
    } else {
        let mut files = FileExporter::new(&cli.out);
        if let Some(name) = &cli.name {
            files = files.with_file_name(name);
        }
        Box::new(files)
    };
    match exporter.export(&out.artifact)? {
        qirender::ExportOutcome::Saved(path) => println!("{}", path.display()),
        qirender::ExportOutcome::Copied => println!("QR code copied to clipboard"),
        qirender::ExportOutcome::CopiedAsDataUrl => println!("QR code data URL copied to clipboard"),
    }
    Ok(())
}
