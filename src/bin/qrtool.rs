use clap::{Parser, Subcommand};
use qr_studio::render::parse_hex_color;
use qr_studio::tools::{frame_paths, load_rgb, read_bytes, write_bytes};
use qr_studio::{
    EmbedOptions, LiveTracker, QrBuilder, QrError, QrResult, RenderStyle, STYLED_EC_LEVEL,
    decode_image, render_embedded, render_styled, to_png,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing::Level;

#[derive(Parser)]
#[command(name = "qrtool", version, about = "Styled QR generation and scanning")]
struct Cli {
    /// Log pipeline decisions (also enabled by QR_DEBUG=1)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a styled QR code
    Styled {
        #[arg(long)]
        data: String,
        /// Circle, Square, Rounded or Gapped Square
        #[arg(long, default_value = "Square")]
        shape: String,
        #[arg(long, default_value = "#000000")]
        color: String,
        /// Image composited behind the code
        #[arg(long)]
        background: Option<PathBuf>,
        #[arg(long, default_value_t = 4)]
        box_size: u32,
        #[arg(long, default_value_t = 4)]
        border: u32,
        #[arg(long)]
        out: PathBuf,
    },
    /// Render a level-H QR code painted with an image
    Embedded {
        #[arg(long)]
        data: String,
        #[arg(long)]
        image: PathBuf,
        /// Channel multiplier for image blocks, in (0, 1]
        #[arg(long, default_value_t = 0.4)]
        darken: f32,
        #[arg(long, default_value_t = 4)]
        box_size: u32,
        #[arg(long)]
        out: PathBuf,
    },
    /// Decode the QR code in an image
    Decode {
        #[arg(long)]
        image: PathBuf,
    },
    /// Replay a directory of frames through the live tracker
    Scan {
        #[arg(long)]
        dir: PathBuf,
        #[arg(long, default_value_t = 30.0)]
        fps: f64,
        /// Write annotated frames here
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = if cli.verbose || qr_studio::config::debug_enabled() {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Command::Styled {
            data,
            shape,
            color,
            background,
            box_size,
            border,
            out,
        } => styled_cmd(&data, &shape, &color, background.as_deref(), box_size, border, &out),
        Command::Embedded {
            data,
            image,
            darken,
            box_size,
            out,
        } => embedded_cmd(&data, &image, darken, box_size, &out),
        Command::Decode { image } => decode_cmd(&image),
        Command::Scan { dir, fps, out_dir } => scan_cmd(&dir, fps, out_dir.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn save(path: &Path, png: &[u8]) -> QrResult<()> {
    write_bytes(path, png)
        .map_err(|e| QrError::invalid(format!("cannot write {}: {e}", path.display())))
}

fn styled_cmd(
    data: &str,
    shape: &str,
    color: &str,
    background: Option<&Path>,
    box_size: u32,
    border: u32,
    out: &Path,
) -> QrResult<()> {
    let shape = RenderStyle::shape_from_name(shape);
    let mut style = RenderStyle::new(shape, parse_hex_color(color)?);
    if let Some(path) = background {
        style = style.with_background(read_bytes(path)?);
    }
    let matrix = QrBuilder::new(STYLED_EC_LEVEL)
        .box_size(box_size)
        .border(border)
        .build(data)?;
    let render = render_styled(&matrix, &style)?;
    if let Some(warning) = &render.warning {
        eprintln!("warning: {warning}");
    }
    save(out, &to_png(&render.image)?)?;
    println!(
        "Wrote {} (version {}, {}x{} px)",
        out.display(),
        matrix.version(),
        render.image.width(),
        render.image.height()
    );
    Ok(())
}

fn embedded_cmd(data: &str, image: &Path, darken: f32, box_size: u32, out: &Path) -> QrResult<()> {
    let options = EmbedOptions {
        box_size,
        darken_factor: darken,
    };
    let rendered = render_embedded(data, &read_bytes(image)?, &options)?;
    save(out, &to_png(&rendered)?)?;
    println!(
        "Wrote {} ({}x{} px)",
        out.display(),
        rendered.width(),
        rendered.height()
    );
    Ok(())
}

fn decode_cmd(image: &Path) -> QrResult<()> {
    let outcome = decode_image(&read_bytes(image)?)?;
    match outcome.payload {
        Some(payload) if outcome.is_url => println!("URL: {payload}"),
        Some(payload) => println!("Data: {payload}"),
        None => println!("No QR code found in {}", image.display()),
    }
    Ok(())
}

fn scan_cmd(dir: &Path, fps: f64, out_dir: Option<&Path>) -> QrResult<()> {
    if !(fps.is_finite() && fps > 0.0) {
        return Err(QrError::invalid("fps must be positive"));
    }
    let frames = frame_paths(dir)
        .map_err(|e| QrError::invalid(format!("cannot list {}: {e}", dir.display())))?;
    let step = Duration::from_secs_f64(1.0 / fps);
    let start = Instant::now();
    let mut tracker = LiveTracker::new();

    for (i, path) in frames.iter().enumerate() {
        let mut frame = load_rgb(path)?;
        let report = tracker.process_frame(&mut frame, start + step * i as u32);
        let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        match &report.current_payload {
            Some(payload) => println!(
                "{name}: {payload}{}",
                if report.is_url { " (url)" } else { "" }
            ),
            None => println!("{name}: -"),
        }
        if let Some(out_dir) = out_dir {
            save(&out_dir.join(format!("{name}.png")), &to_png(&frame)?)?;
        }
    }
    println!("Processed {} frames", frames.len());
    Ok(())
}
