//! Record a small scene, recolor one op, and replay it into a second recorder
//!
//! Run with:
//! `RUST_LOG=trace cargo run -p pictura_display_list --example record_replay`

use pictura_core::{Canvas, ClipOp, Color, Paint, Point, Rect};
use pictura_display_list::{DisplayListRecorder, RecorderConfig, Result};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = RecorderConfig::from_toml_str(
        r#"
        initial_capacity = 4096

        [default_cull_rect]
        left = 0.0
        top = 0.0
        right = 320.0
        bottom = 240.0
        "#,
    )?;
    let mut recorder = DisplayListRecorder::new(config);

    let canvas = recorder.begin_recording()?;
    canvas.draw_paint(&Color::WHITE.into());
    canvas.save();
    canvas.clip_rect(Rect::from_xywh(20.0, 20.0, 200.0, 120.0), ClipOp::Intersect);
    canvas.translate(40.0, 40.0);
    canvas.draw_rect(Rect::from_xywh(0.0, 0.0, 80.0, 40.0), &Color::RED.into());
    let highlight = canvas.last_op_index();
    canvas.draw_circle(Point::new(120.0, 20.0), 16.0, &Paint::new().stroked(3.0));
    canvas.restore();
    let mut scene = recorder.finish_recording()?;

    println!(
        "recorded {} ops, {} bytes, bounds {:?}",
        scene.op_count(),
        scene.byte_count(),
        scene.bounds()
    );

    if let Some(paint) = highlight.and_then(|index| scene.op_paint_mut(index)) {
        paint.color = Color::BLUE;
    }

    let canvas = recorder.begin_recording()?;
    scene.draw(canvas);
    let copy = recorder.finish_recording()?;
    println!(
        "replayed into {} ops, bounds {:?}",
        copy.op_count(),
        copy.bounds()
    );

    Ok(())
}
