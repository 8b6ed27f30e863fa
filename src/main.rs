use std::time::Instant;

use rasterry::prelude::*;

const FRAMES: u32 = 8;

/// Renders a few frames of a spinning cube and writes them as PNG files.
///
/// Usage: `rasterry [output-prefix]` (default `frame`).
fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let prefix = std::env::args().nth(1).unwrap_or_else(|| "frame".to_string());

    let config = RenderConfig::new(320, 240)
        .with_fov_degrees(60.0)
        .with_clear_color(Color::gray(30));
    let mut renderer = Renderer::new(config)?;
    renderer
        .camera_mut()
        .look_at(Vec3::new(0.0, 1.5, 5.0), Vec3::ZERO, Vec3::Y);

    let cube = Mesh::cube();
    let (width, height) = renderer.config().output_resolution();
    println!("rendering {FRAMES} frames, presented at {width}x{height}");

    for frame in 0..FRAMES {
        let angle = frame as f32 / FRAMES as f32 * std::f32::consts::TAU;
        let model_to_world = Mat4::rotation_y(angle) * Mat4::rotation_x(angle * 0.5);

        let start = Instant::now();
        renderer.begin_frame();
        let clear_time = start.elapsed();

        let start = Instant::now();
        renderer.draw_mesh(&cube, &model_to_world, Color::new(200, 80, 40));
        renderer.draw_mesh_wireframe(&cube, &model_to_world, Color::WHITE);
        let draw_time = start.elapsed();
        let stats = renderer.end_frame();

        let path = format!("{prefix}_{frame:02}.png");
        renderer.frame_buffer().save_png(&path)?;

        println!(
            "{path}: clear {:.2}ms draw {:.2}ms, {} triangles, {} pixels",
            clear_time.as_secs_f64() * 1000.0,
            draw_time.as_secs_f64() * 1000.0,
            stats.triangles,
            stats.pixels,
        );
    }

    Ok(())
}
