//! Polyview Terminal - rotate a mesh with the mouse in the terminal
//!
//! Controls:
//!   - Left mouse drag: Rotate the object
//!   - Q/ESC: Quit

use anyhow::{Context, Result};
use clap::Parser;
use polyview_core::{load_mesh, prompt_mesh_path, Session, ViewerConfig};
use polyview_terminal::TerminalApp;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "polyview-terminal")]
#[command(author, version, about = "Interactive mesh viewer for the terminal", long_about = None)]
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

    let mut app = TerminalApp::new(Session::new(mesh, config))
        .context("failed to initialize the terminal")?;
    app.run().context("terminal viewer failed")?;

    Ok(())
}
