#![forbid(unsafe_code)]

//! Emit a generated test image with the detected graphics protocol.
//!
//! The graphics emitters are stateless collaborators of the terminal layer;
//! this demo drives them directly without the prompt engine.

use std::io::Write;

use asker_term::graphics::{self, GraphicsProtocol, RgbaImage};

fn main() {
    asker_demos::init_tracing();
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (width, height) = (96usize, 48usize);
    let mut pixels = vec![0u8; width * height * 4];
    for y in 0..height {
        for x in 0..width {
            let i = (y * width + x) * 4;
            pixels[i] = (x * 255 / width) as u8;
            pixels[i + 1] = (y * 255 / height) as u8;
            pixels[i + 2] = 96;
            pixels[i + 3] = 255;
        }
    }
    let image = RgbaImage::new(width, height, &pixels)?;

    let mut stdout = std::io::stdout().lock();
    match graphics::detect_protocol(None) {
        GraphicsProtocol::Kitty => graphics::emit_kitty(&mut stdout, image)?,
        GraphicsProtocol::Sixel => graphics::emit_sixel(&mut stdout, image)?,
        GraphicsProtocol::None => {
            eprintln!("no inline graphics support detected; forcing sixel");
            graphics::emit_sixel(&mut stdout, image)?;
        }
    }
    stdout.write_all(b"\n")?;
    stdout.flush()?;
    Ok(())
}
