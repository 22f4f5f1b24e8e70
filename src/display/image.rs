//! Off-screen rendering to PNG.
//!
//! Runs the animation to completion without a display, optionally dumping
//! every frame, then writes the final presented frame.

use anyhow::{Context, Result};
use image::imageops::FilterType;
use image::RgbaImage;
use tracing::info;

use crate::animation::Animation;
use crate::config::Config;
use crate::renderer::{self, Canvas, Scene};

pub async fn run(config: Config, scene: Scene) -> Result<()> {
    let mut canvas = Canvas::new(scene.width, scene.height);
    let mut animation = Animation::new();

    if let Some(dir) = &config.output.frames_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating frames directory {}", dir.display()))?;
    }

    let mut frame_index = 0u32;
    while animation.tick() {
        renderer::render_frame(&mut canvas, &scene, animation.scale());
        if let Some(dir) = &config.output.frames_dir {
            let path = dir.join(format!("frame_{frame_index:03}.png"));
            present(&canvas, scene.pixel_ratio)
                .save(&path)
                .with_context(|| format!("writing {}", path.display()))?;
            frame_index += 1;
        }
    }
    if frame_index > 0 {
        info!("Wrote {} animation frames", frame_index);
    }

    let out = config
        .output
        .file
        .clone()
        .unwrap_or_else(|| "chart.png".into());
    present(&canvas, scene.pixel_ratio)
        .save(&out)
        .with_context(|| format!("writing {}", out.display()))?;
    info!("Wrote {}", out.display());

    Ok(())
}

/// Convert the canvas for presentation. Rendering happens at the full
/// backing resolution; a pixel ratio above 1 presents the image scaled
/// down to width/ratio x height/ratio.
fn present(canvas: &Canvas, pixel_ratio: f64) -> RgbaImage {
    let img = RgbaImage::from_raw(
        canvas.width as u32,
        canvas.height as u32,
        canvas.data.clone(),
    )
    .expect("canvas buffer length matches its dimensions");
    if (pixel_ratio - 1.0).abs() < f64::EPSILON {
        return img;
    }
    let w = ((canvas.width as f64 / pixel_ratio).round() as u32).max(1);
    let h = ((canvas.height as f64 / pixel_ratio).round() as u32).max(1);
    image::imageops::resize(&img, w, h, FilterType::Triangle)
}
