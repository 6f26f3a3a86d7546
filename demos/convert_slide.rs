//! Converts HTML slides into a presentation graph and writes it as JSON.
//!
//! ```text
//! cargo run --example convert_slide --features chromium -- slide1.html slide2.html
//! ```

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use html2pptx_tools::{convert_file, ChromiumLauncher, ConvertOptions, PresLayout, Presentation};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let inputs: Vec<PathBuf> = env::args().skip(1).map(PathBuf::from).collect();
    if inputs.is_empty() {
        bail!("usage: convert_slide <slide.html>...");
    }

    let options = ConvertOptions::from_env();
    let launcher = ChromiumLauncher::from_options(&options);
    let mut presentation = Presentation::new(PresLayout::LAYOUT_16X9);

    for input in &inputs {
        let conversion = convert_file(&launcher, input, &mut presentation, &options).await?;
        log::info!(
            "{} -> slide {} ({} placeholders)",
            input.display(),
            conversion.slide + 1,
            conversion.placeholders.len()
        );
        for placeholder in &conversion.placeholders {
            log::info!(
                "  placeholder {} at ({:.2}, {:.2}) {:.2}\" x {:.2}\"",
                placeholder.id,
                placeholder.x,
                placeholder.y,
                placeholder.w,
                placeholder.h
            );
        }
    }

    let output = "converted_presentation.json";
    let json = serde_json::to_string_pretty(&presentation).context("serializing presentation")?;
    fs::write(output, json).with_context(|| format!("writing {output}"))?;
    log::info!("wrote {} slides to {output}", presentation.slides.len());
    Ok(())
}
