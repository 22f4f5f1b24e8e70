use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::{self, stdout};
use std::time::Duration;

use crate::animation::Animation;
use crate::config::Config;
use crate::renderer::{self, Canvas, Scene};

pub async fn run(config: Config, scene: Scene) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, config, scene).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: Config,
    scene: Scene,
) -> Result<()> {
    let mut canvas = Canvas::new(scene.width, scene.height);
    let mut animation = Animation::new();
    let frame_duration = Duration::from_secs_f64(1.0 / f64::from(config.output.fps.max(1)));

    loop {
        // A stopped animation keeps showing its last frame.
        if animation.tick() {
            renderer::render_frame(&mut canvas, &scene, animation.scale());
        }

        terminal.draw(|frame| {
            let area = frame.area();
            draw_canvas(frame, area, &canvas);
            render_status(frame, area, &animation);
        })?;

        // Handle input; the poll timeout doubles as frame pacing.
        if event::poll(frame_duration)? {
            if let Event::Key(key) = event::read()? {
                match key {
                    KeyEvent {
                        code: KeyCode::Char('q'),
                        ..
                    }
                    | KeyEvent {
                        code: KeyCode::Char('c'),
                        modifiers: KeyModifiers::CONTROL,
                        ..
                    } => {
                        break;
                    }
                    KeyEvent {
                        code: KeyCode::Char('r'),
                        ..
                    } => {
                        animation = Animation::new();
                    }
                    _ => {}
                }
            }
        }
    }

    Ok(())
}

/// Present the full-resolution canvas on the cell grid. Each cell holds
/// two vertically stacked samples shown through the upper half block, so
/// the effective pixel grid is width x 2*height and roughly square.
fn draw_canvas(frame: &mut Frame, area: Rect, canvas: &Canvas) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let grid_w = area.width as usize;
    let grid_h = area.height as usize * 2;

    // Aspect-preserving downscale, centered.
    let step = (canvas.width as f64 / grid_w as f64).max(canvas.height as f64 / grid_h as f64);
    let out_w = ((canvas.width as f64 / step) as usize).max(1);
    let out_h = ((canvas.height as f64 / step) as usize).max(1);
    let off_x = (grid_w - out_w.min(grid_w)) / 2;
    let off_y = (grid_h - out_h.min(grid_h)) / 2;

    let sample = |gx: usize, gy: usize| -> Option<(u8, u8, u8)> {
        if gx < off_x || gy < off_y {
            return None;
        }
        let px = ((gx - off_x) as f64 * step) as usize;
        let py = ((gy - off_y) as f64 * step) as usize;
        if px >= canvas.width || py >= canvas.height {
            return None;
        }
        let c = canvas.get_pixel(px, py);
        // Composite over black for display.
        let a = u16::from(c.a);
        Some((
            (u16::from(c.r) * a / 255) as u8,
            (u16::from(c.g) * a / 255) as u8,
            (u16::from(c.b) * a / 255) as u8,
        ))
    };

    for cy in 0..area.height {
        for cx in 0..area.width {
            let top = sample(cx as usize, cy as usize * 2);
            let bottom = sample(cx as usize, cy as usize * 2 + 1);
            if top.is_none() && bottom.is_none() {
                continue;
            }
            let (tr, tg, tb) = top.unwrap_or((0, 0, 0));
            let (br, bg, bb) = bottom.unwrap_or((0, 0, 0));
            if let Some(cell) = frame
                .buffer_mut()
                .cell_mut((area.x + cx, area.y + cy))
            {
                cell.set_char('▀');
                cell.set_fg(Color::Rgb(tr, tg, tb));
                cell.set_bg(Color::Rgb(br, bg, bb));
            }
        }
    }
}

fn render_status(frame: &mut Frame, area: Rect, animation: &Animation) {
    // Status line at top
    let status = if animation.is_stopped() {
        " done | [r]eplay | [q]uit ".to_string()
    } else {
        format!(" scale: {:.2} | [r]eplay | [q]uit ", animation.scale())
    };

    for (i, ch) in status.chars().enumerate() {
        if i < area.width as usize {
            let cell = frame.buffer_mut().cell_mut((area.x + i as u16, area.y));
            if let Some(cell) = cell {
                cell.set_char(ch);
                cell.set_fg(Color::DarkGray);
            }
        }
    }
}
