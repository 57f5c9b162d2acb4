/// glyph3d terminal demo - spinning shaded mesh
///
/// Usage: glyph3d-terminal [mesh.stl]
///
/// With no argument, spins the built-in unit cube. Press Q or ESC to quit.

use std::env;
use std::fs;

use anyhow::{Context, Result};
use glyph3d_core::{stl, Mesh};
use glyph3d_terminal::TerminalApp;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let mesh = match args.get(1) {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path))?;
            let mesh = stl::parse_ascii_stl(&text)
                .with_context(|| format!("failed to parse {}", path))?;
            println!("Loaded {} triangles from {}", mesh.triangles.len(), path);
            mesh
        }
        None => {
            eprintln!("No STL file given, spinning the built-in cube...");
            Mesh::unit_cube()
        }
    };

    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(mesh)?;
    app.run()
}
