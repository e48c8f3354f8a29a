//! Font Resolution Report
//!
//! Resolves a font request, escapes a line of text with it and prints the
//! artifacts a PDF writer would embed.
//!
//! Usage:
//!   cargo run --release --bin font_report -- --dir /usr/share/fonts --family "DejaVu Sans" --text "Hello"
//!   cargo run --release --bin font_report -- --family Helvetica --bold --mode embed

use pdf_fontkit::fonts::to_unicode::to_unicode_cmap;
use pdf_fontkit::{FontEncoding, FontManager, FontManagerConfig, FontStyle, RenderMode};
use std::path::PathBuf;

struct ReportConfig {
    font_dirs: Vec<PathBuf>,
    family: String,
    style: FontStyle,
    mode: RenderMode,
    text: String,
}

impl ReportConfig {
    fn from_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();
        let mut config = Self {
            font_dirs: Vec::new(),
            family: "Times".to_string(),
            style: FontStyle::empty(),
            mode: RenderMode::Default,
            text: "The quick brown fox jumps over the lazy dog".to_string(),
        };

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--dir" => {
                    i += 1;
                    if i < args.len() {
                        config.font_dirs.push(PathBuf::from(&args[i]));
                    }
                },
                "--family" => {
                    i += 1;
                    if i < args.len() {
                        config.family = args[i].clone();
                    }
                },
                "--text" => {
                    i += 1;
                    if i < args.len() {
                        config.text = args[i].clone();
                    }
                },
                "--mode" => {
                    i += 1;
                    config.mode = match args.get(i).map(String::as_str) {
                        Some("default") => RenderMode::Default,
                        Some("embed") => RenderMode::Embed,
                        Some("path") => RenderMode::PathRendering,
                        other => return Err(format!("Unknown render mode: {:?}", other)),
                    };
                },
                "--bold" => config.style |= FontStyle::BOLD,
                "--italic" => config.style |= FontStyle::ITALIC,
                other => return Err(format!("Unknown argument: {}", other)),
            }
            i += 1;
        }

        Ok(config)
    }
}

fn run(config: ReportConfig) -> pdf_fontkit::Result<()> {
    let mut manager_config = FontManagerConfig::new();
    for dir in &config.font_dirs {
        manager_config = manager_config.with_font_directory(dir);
    }
    let mut manager = FontManager::new(manager_config);
    let (files, faces) = manager.catalog_len();
    println!("Catalog: {} TrueType files, {} collection faces", files, faces);

    let font = manager.make_font(&config.family, config.style, FontEncoding::WinAnsi, config.mode)?;
    println!("Resolved: {} (id {}, {})", font.search_name(), font.id(), font.font_name());

    let codes = font.escape_string(&config.text);
    let metrics = font.text_width(&config.text)?;
    println!("Codes: {}", codes);
    println!(
        "Width: {:.1} ({} chars, {} spaces, {} words)",
        metrics.width, metrics.num_chars, metrics.num_spaces, metrics.num_words
    );
    println!("Height: {:.1}", font.text_height(&config.text)?);
    println!("Vertical: {}", font.can_write_vertical());
    println!("Widths: {}", font.generate_widths()?);

    let ranges = font.generate_ranges();
    if !ranges.is_empty() {
        println!("ToUnicode:\n{}", to_unicode_cmap(&ranges));
    }

    let descriptor = font.font_descriptor()?;
    println!(
        "Descriptor: {} flags={} bbox={:?} ascent={} descent={} capHeight={}",
        descriptor.font_name,
        descriptor.flags.bits(),
        descriptor.bbox,
        descriptor.ascent,
        descriptor.descent,
        descriptor.cap_height
    );

    match font.embedded_program()? {
        Some(program) => println!(
            "Embedded: {} ({} bytes, {} glyphs)",
            program.font_name(),
            program.len()?,
            program.num_glyphs()?
        ),
        None => println!("Embedded: none (built-in font)"),
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let config = match ReportConfig::from_args() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!(
                "Usage: font_report [--dir DIR]... [--family NAME] [--bold] [--italic] \
                 [--mode default|embed|path] [--text TEXT]"
            );
            std::process::exit(2);
        },
    };

    if let Err(e) = run(config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
