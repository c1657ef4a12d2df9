//! Polyview - rotate a mesh in a desktop window
//!
//! Controls:
//!   - Left mouse drag: Rotate the object
//!   - ESC or closing the window: Quit

use anyhow::{Context, Result};
use clap::Parser;
use polyview_core::{load_mesh, prompt_mesh_path, Session, ViewerConfig};
use polyview_window::WindowApp;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "polyview")]
#[command(author, version, about = "Interactive flat-shaded mesh viewer", long_about = None)]
struct Cli {
    /// Object description file; prompted for when omitted
    mesh: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let path = match cli.mesh {
        Some(path) => path,
        None => prompt_mesh_path(&mut io::stdin().lock(), &mut io::stdout())
            .context("failed to read the object filename")?,
    };

    let config = ViewerConfig::default();
    let mesh = load_mesh(&path, config.scale)
        .with_context(|| format!("failed to load {}", path.display()))?;

    let mut app = WindowApp::new(Session::new(mesh, config)).context("failed to open the window")?;
    app.run().context("window viewer failed")?;

    Ok(())
}
