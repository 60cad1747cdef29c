mod config;

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::Parser;
use ringlet_components::circular_progressbar::{CircularProgressbar, PATH_CLASS, RingPhase};
use ringlet_ui::{
    AttributeValue, ComponentHost, Element, FRAME_INTERVAL, TokioScheduler, logging::init_tracing,
};
use tracing::info;

use crate::config::{Cli, RingOptions};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let options = match &cli.config {
        Some(path) => RingOptions::load(path)?,
        None => RingOptions::default(),
    }
    .apply_cli(&cli);
    let args = options.to_args();

    let scheduler = Arc::new(TokioScheduler::current());
    let mut host = ComponentHost::new(CircularProgressbar::new(args, scheduler));

    let first = host.mount()?;
    info!(style = progress_style_of(&first), "first frame rendered");

    while host.component().phase() == RingPhase::AnimatingIn {
        tokio::time::sleep(FRAME_INTERVAL).await;
    }
    let tree = host.render()?;
    info!(
        percentage = host.component().displayed_percentage(),
        style = progress_style_of(&tree),
        "ring settled"
    );

    write_tree(&tree, cli.output.as_deref())?;
    host.unmount()?;
    Ok(())
}

fn progress_style_of(tree: &Element) -> &str {
    tree.find_by_class(PATH_CLASS)
        .and_then(|path| path.attribute("style"))
        .and_then(AttributeValue::as_text)
        .unwrap_or_default()
}

fn write_tree(tree: &Element, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            tree.write_to(&mut writer)?;
            writer.flush()?;
            info!(path = %path.display(), "ring written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            tree.write_to(&mut stdout)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}
