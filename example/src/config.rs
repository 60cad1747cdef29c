//! Ring options: an optional TOML file, overridden by command-line flags.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use ringlet_components::circular_progressbar::CircularProgressbarArgs;
use serde::Deserialize;

#[derive(Debug, Parser)]
#[command(name = "ringlet-example")]
#[command(version, about = "Render a circular progress ring as SVG", long_about = None)]
pub struct Cli {
    /// TOML file with ring options
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Target percentage, normally 0 to 100
    #[arg(short, long, allow_hyphen_values = true)]
    pub percentage: Option<f64>,
    /// Ring thickness in view box units
    #[arg(long)]
    pub stroke_width: Option<f64>,
    /// Inset between the view box edge and the ring
    #[arg(long)]
    pub background_gutter: Option<f64>,
    /// Extra classes for the root element
    #[arg(long)]
    pub class_name: Option<String>,
    /// Start from an empty ring and fill it after the first frame
    #[arg(long)]
    pub initial_animation: bool,
    /// Write the SVG to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Picks `class` once the percentage reaches `min`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ClassThreshold {
    pub min: f64,
    pub class: String,
}

/// Options read from a config file.
///
/// ```toml
/// percentage = 72
/// stroke_width = 10
/// class_name = "upload"
/// initial_animation = true
///
/// [[class_thresholds]]
/// min = 0
/// class = "low"
///
/// [[class_thresholds]]
/// min = 50
/// class = "high"
/// ```
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RingOptions {
    pub percentage: Option<f64>,
    pub stroke_width: Option<f64>,
    pub background_gutter: Option<f64>,
    pub class_name: Option<String>,
    pub initial_animation: Option<bool>,
    pub class_thresholds: Vec<ClassThreshold>,
}

impl RingOptions {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid ring options in {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Flags given on the command line win over file values.
    pub fn apply_cli(mut self, cli: &Cli) -> Self {
        if let Some(percentage) = cli.percentage {
            self.percentage = Some(percentage);
        }
        if let Some(stroke_width) = cli.stroke_width {
            self.stroke_width = Some(stroke_width);
        }
        if let Some(background_gutter) = cli.background_gutter {
            self.background_gutter = Some(background_gutter);
        }
        if let Some(class_name) = &cli.class_name {
            self.class_name = Some(class_name.clone());
        }
        if cli.initial_animation {
            self.initial_animation = Some(true);
        }
        self
    }

    pub fn to_args(&self) -> CircularProgressbarArgs {
        let mut args = CircularProgressbarArgs::new(self.percentage.unwrap_or(0.0));
        if let Some(stroke_width) = self.stroke_width {
            args = args.stroke_width(stroke_width);
        }
        if let Some(background_gutter) = self.background_gutter {
            args = args.background_gutter(background_gutter);
        }
        if let Some(class_name) = &self.class_name {
            args = args.class_name(class_name.as_str());
        }
        if let Some(initial_animation) = self.initial_animation {
            args = args.initial_animation(initial_animation);
        }
        if !self.class_thresholds.is_empty() {
            let mut thresholds = self.class_thresholds.clone();
            thresholds.sort_by(|a, b| a.min.total_cmp(&b.min));
            args = args.class_for_percentage(move |percentage| class_for(&thresholds, percentage));
        }
        args
    }
}

/// Class of the highest threshold not above `percentage`; thresholds must be
/// sorted by `min`.
fn class_for(thresholds: &[ClassThreshold], percentage: f64) -> String {
    thresholds
        .iter()
        .take_while(|threshold| threshold.min <= percentage)
        .last()
        .map(|threshold| threshold.class.clone())
        .unwrap_or_default()
}
