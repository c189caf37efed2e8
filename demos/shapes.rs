use knn_canvas::{codec, colors, Canvas, Rgb};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut canvas = Canvas::with_size(64, 48)?;

    canvas.set_pen(colors::RED);
    canvas.draw_rectangle(4, 4, 59, 43)?;

    canvas.set_pen(colors::BLUE);
    canvas.draw_line(4, 4, 59, 43)?;
    canvas.draw_line(4, 43, 59, 4)?;

    canvas.set_pen(Rgb::new(0, 160, 0));
    for x in (8..56).step_by(6) {
        canvas.draw_line(x, 24, x + 3, 20)?;
    }

    codec::save(&canvas, "shapes.ppm")?;
    codec::save_png(&canvas, "shapes.png")?;
    println!("wrote shapes.ppm and shapes.png ({}x{})", canvas.width(), canvas.height());

    let reloaded = codec::load("shapes.ppm")?;
    println!("round trip identical: {}", reloaded == canvas);
    Ok(())
}
