/// Terminal front end for the glyph3d renderer
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use std::io::{stdout, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use glyph3d_core::{Mesh, Renderer};

pub mod grid;

pub use grid::CharGrid;

/// Owns the mesh, renderer, and grid, and drives them at a fixed frame
/// rate inside a raw-mode alternate screen.
pub struct TerminalApp {
    mesh: Mesh,
    renderer: Renderer,
    grid: CharGrid,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

/// Nominal frame rate of the main loop.
const TARGET_FPS: u64 = 30;

impl TerminalApp {
    pub fn new(mesh: Mesh) -> Result<Self> {
        let (width, height) = terminal::size()?;
        let (width, height) = (width as usize, height as usize);

        Ok(Self {
            mesh,
            renderer: Renderer::new(width, height),
            grid: CharGrid::new(width, height),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> Result<()> {
        let target_frame_time = Duration::from_millis(1000 / TARGET_FPS);

        while self.running {
            let frame_start = Instant::now();

            // Quit is only checked between render passes.
            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            self.render()?;

            // Wait out the remainder of the frame interval.
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> Result<()> {
        if let Event::Key(KeyEvent { code, .. }) = event::read()? {
            if matches!(code, KeyCode::Char('q') | KeyCode::Esc) {
                self.running = false;
            }
        }
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        self.renderer.render(&self.mesh, &mut self.grid);

        let mut stdout = stdout();
        self.grid.draw(&mut stdout)?;

        // Status overlay on the top row
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!("glyph3d | FPS: {:.1} | Q to quit", self.fps)),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
