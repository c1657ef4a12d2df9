//! Example: rotate the built-in tetrahedron without an object file
//!
//! Usage: cargo run --example tetrahedron

use polyview_core::{Mesh, Session, ViewerConfig};
use polyview_terminal::TerminalApp;
use std::io;

fn main() -> io::Result<()> {
    env_logger::init();

    let config = ViewerConfig::default();
    let mesh = Mesh::tetrahedron(config.scale);
    println!("Loaded {} faces, starting terminal viewer (press Q to quit)...", mesh.faces().len());

    let mut app = TerminalApp::new(Session::new(mesh, config))?;
    app.run()
}
