//! # render-picker
//!
//! Prints the HTML for a Tempus Dominus picker widget, optionally preceded by
//! the asset tags the page needs.
//!
//! ```bash
//! cargo run -p render-picker -- --kind datetime --value "2024-03-01 10:00:00" \
//!     --attr placeholder="Meeting time" --option stepping=15 --media meeting-at
//! ```
//!
//! Settings come from `--settings FILE` (TOML, or JSON by extension) and
//! `TEMPUS_DOMINUS_*` environment variables.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use tempus_dominus::core::logging::{render_span, setup_logging};
use tempus_dominus::core::settings_loader;
use tempus_dominus::{Attrs, Options, PickerKind, PickerWidget, Widget};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Date,
    Datetime,
    Time,
}

impl From<Kind> for PickerKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Date => Self::Date,
            Kind::Datetime => Self::DateTime,
            Kind::Time => Self::Time,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "render-picker", about = "Render a Tempus Dominus picker widget")]
struct Cli {
    /// Settings file (TOML, or JSON when the extension is .json)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Picker flavour
    #[arg(long, value_enum, default_value_t = Kind::Date)]
    kind: Kind,

    /// Current field value
    #[arg(long)]
    value: Option<String>,

    /// Explicit display format
    #[arg(long)]
    format: Option<String>,

    /// HTML attribute as NAME=VALUE (repeatable)
    #[arg(long = "attr", value_parser = parse_attr)]
    attrs: Vec<(String, String)>,

    /// Calendar option as KEY=JSON (repeatable); non-JSON values are taken as strings
    #[arg(long = "option", value_parser = parse_option)]
    options: Vec<(String, serde_json::Value)>,

    /// Print the asset tags before the widget
    #[arg(long)]
    media: bool,

    /// Field name
    name: String,
}

fn parse_attr(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected NAME=VALUE, got {s:?}"))
}

fn parse_option(s: &str) -> Result<(String, serde_json::Value), String> {
    let (key, raw) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=JSON, got {s:?}"))?;
    let value = serde_json::from_str(raw)
        .unwrap_or_else(|_| serde_json::Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => settings_loader::from_file_with_env(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => settings_loader::from_env(),
    };
    if !setup_logging(&settings) {
        tracing::debug!("keeping the existing tracing subscriber");
    }

    let span = render_span("render-picker");
    let _guard = span.enter();

    let mut options = Options::new();
    for (key, value) in &cli.options {
        options.insert(key.clone(), value)?;
    }

    let mut picker = PickerWidget::new(cli.kind.into(), Arc::new(settings)).with_options(options);
    if let Some(format) = &cli.format {
        picker = picker.with_format(format.clone());
    }
    tracing::info!(kind = %picker.kind(), format = picker.js_format(), "picker configured");

    let attrs: Attrs = cli.attrs.into_iter().collect();
    let html = picker
        .render(&cli.name, cli.value.as_deref(), &attrs)
        .with_context(|| format!("rendering field {:?}", cli.name))?;

    if cli.media {
        let media = picker.media();
        if !media.is_empty() {
            println!("{media}");
        }
    }
    println!("{html}");
    Ok(())
}
