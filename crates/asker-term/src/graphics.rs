#![forbid(unsafe_code)]

//! Stateless terminal-graphics emitters.
//!
//! Sixel and Kitty inline-image encoders over raw RGBA pixel buffers. These
//! are collaborators of the prompt engine, not part of it: user code calls
//! them directly against a writer and they keep no state.
//!
//! | Protocol | Envelope |
//! |----------|----------|
//! | Sixel    | `DCS q … ST` (`ESC P q … ESC \`) |
//! | Kitty    | `APC G f=32,s=W,v=H,a=T,m=… ; base64 ST` |

use std::env;
use std::io::{self, Write};

/// Chunk size for Kitty base64 payloads (protocol maximum is 4096).
const KITTY_CHUNK: usize = 4096;

/// Per-channel quantisation levels for the Sixel palette (6³ = 216 colors,
/// within the 256-register limit).
const SIXEL_LEVELS: u32 = 6;

/// A borrowed RGBA image, 8 bits per channel, row-major.
#[derive(Debug, Clone, Copy)]
pub struct RgbaImage<'a> {
    width: usize,
    height: usize,
    pixels: &'a [u8],
}

impl<'a> RgbaImage<'a> {
    /// Wrap a pixel buffer. `pixels` must hold exactly `width * height * 4`
    /// bytes.
    pub fn new(width: usize, height: usize, pixels: &'a [u8]) -> io::Result<Self> {
        if pixels.len() != width * height * 4 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "pixel buffer is {} bytes, expected {}",
                    pixels.len(),
                    width * height * 4
                ),
            ));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Image width in pixels.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    fn rgba(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width + x) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }
}

/// Graphics protocols the probe can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphicsProtocol {
    /// Kitty graphics protocol (APC G).
    Kitty,
    /// Sixel (DCS q).
    Sixel,
    /// No inline graphics support detected.
    None,
}

/// Probe the environment for an inline-graphics protocol.
///
/// `sixel_override` forces the Sixel answer either way; pass `None` for
/// detection. Detection is heuristic (environment only, no DA1 round-trip):
/// Kitty via `KITTY_WINDOW_ID`/`TERM=…kitty…`, Sixel via a known-good
/// `TERM`/`TERM_PROGRAM` list.
#[must_use]
pub fn detect_protocol(sixel_override: Option<bool>) -> GraphicsProtocol {
    let term = env::var("TERM").unwrap_or_default();
    let term_program = env::var("TERM_PROGRAM").unwrap_or_default();

    if env::var_os("KITTY_WINDOW_ID").is_some() || term.contains("kitty") {
        return GraphicsProtocol::Kitty;
    }
    if let Some(forced) = sixel_override {
        return if forced {
            GraphicsProtocol::Sixel
        } else {
            GraphicsProtocol::None
        };
    }
    let sixel_terms = ["foot", "mlterm", "yaft", "st-sixel", "xterm-sixel"];
    if sixel_terms.iter().any(|t| term.starts_with(t)) || term_program == "WezTerm" {
        GraphicsProtocol::Sixel
    } else {
        GraphicsProtocol::None
    }
}

// ── Kitty ────────────────────────────────────────────────────────────────

/// Emit an image with the Kitty graphics protocol (transmit-and-display,
/// raw RGBA payload, chunked base64).
pub fn emit_kitty(w: &mut dyn Write, image: RgbaImage<'_>) -> io::Result<()> {
    let payload = base64(image.pixels);
    let mut chunks = payload.as_bytes().chunks(KITTY_CHUNK).peekable();
    let mut first = true;
    while let Some(chunk) = chunks.next() {
        let more = u8::from(chunks.peek().is_some());
        if first {
            write!(
                w,
                "\x1b_Gf=32,s={},v={},a=T,m={};",
                image.width, image.height, more
            )?;
            first = false;
        } else {
            write!(w, "\x1b_Gm={};", more)?;
        }
        w.write_all(chunk)?;
        w.write_all(b"\x1b\\")?;
    }
    Ok(())
}

// ── Sixel ────────────────────────────────────────────────────────────────

/// Emit an image as Sixel.
///
/// Colors are quantised to a fixed 6-level-per-channel palette; pixels with
/// alpha below 128 are left transparent. Output is run-length encoded per
/// sixel band.
pub fn emit_sixel(w: &mut dyn Write, image: RgbaImage<'_>) -> io::Result<()> {
    // DCS q, raster attributes: 1:1 aspect, explicit size.
    write!(w, "\x1bPq\"1;1;{};{}", image.width, image.height)?;

    // Define the palette registers actually used.
    let mut used = vec![false; (SIXEL_LEVELS * SIXEL_LEVELS * SIXEL_LEVELS) as usize];
    for y in 0..image.height {
        for x in 0..image.width {
            if let Some(reg) = quantise(image.rgba(x, y)) {
                used[reg as usize] = true;
            }
        }
    }
    for (reg, _) in used.iter().enumerate().filter(|(_, u)| **u) {
        let (r, g, b) = register_rgb(reg as u32);
        // Percent scale per the DCS color-introducer format.
        write!(
            w,
            "#{};2;{};{};{}",
            reg,
            r as u32 * 100 / 255,
            g as u32 * 100 / 255,
            b as u32 * 100 / 255
        )?;
    }

    // Emit 6-row bands; one pass per color used in the band.
    for band in 0..image.height.div_ceil(6) {
        let y0 = band * 6;
        let mut band_regs: Vec<u32> = Vec::new();
        for y in y0..(y0 + 6).min(image.height) {
            for x in 0..image.width {
                if let Some(reg) = quantise(image.rgba(x, y)) {
                    if !band_regs.contains(&reg) {
                        band_regs.push(reg);
                    }
                }
            }
        }

        for (pass, &reg) in band_regs.iter().enumerate() {
            if pass > 0 {
                // Return to the start of the band for the next color.
                w.write_all(b"$")?;
            }
            write!(w, "#{}", reg)?;
            emit_band_run(w, image, y0, reg)?;
        }
        if band + 1 < image.height.div_ceil(6) {
            w.write_all(b"-")?;
        }
    }

    // ST terminator.
    w.write_all(b"\x1b\\")
}

/// Emit one color's pixels for a band, run-length encoded.
fn emit_band_run(w: &mut dyn Write, image: RgbaImage<'_>, y0: usize, reg: u32) -> io::Result<()> {
    let mut run_char = 0u8;
    let mut run_len = 0usize;
    for x in 0..image.width {
        let mut bits = 0u8;
        for dy in 0..6 {
            let y = y0 + dy;
            if y >= image.height {
                break;
            }
            if quantise(image.rgba(x, y)) == Some(reg) {
                bits |= 1 << dy;
            }
        }
        let ch = 0x3F + bits;
        if ch == run_char {
            run_len += 1;
        } else {
            flush_run(w, run_char, run_len)?;
            run_char = ch;
            run_len = 1;
        }
    }
    flush_run(w, run_char, run_len)
}

fn flush_run(w: &mut dyn Write, ch: u8, len: usize) -> io::Result<()> {
    match len {
        0 => Ok(()),
        1..=3 => {
            for _ in 0..len {
                w.write_all(&[ch])?;
            }
            Ok(())
        }
        _ => write!(w, "!{}{}", len, ch as char),
    }
}

/// Quantise an RGBA pixel to a palette register; `None` for transparent.
fn quantise(rgba: [u8; 4]) -> Option<u32> {
    if rgba[3] < 128 {
        return None;
    }
    let level = |v: u8| (v as u32 * (SIXEL_LEVELS - 1) + 127) / 255;
    Some(level(rgba[0]) * SIXEL_LEVELS * SIXEL_LEVELS + level(rgba[1]) * SIXEL_LEVELS + level(rgba[2]))
}

/// The representative RGB for a palette register.
fn register_rgb(reg: u32) -> (u8, u8, u8) {
    let expand = |l: u32| (l * 255 / (SIXEL_LEVELS - 1)) as u8;
    (
        expand(reg / (SIXEL_LEVELS * SIXEL_LEVELS)),
        expand(reg / SIXEL_LEVELS % SIXEL_LEVELS),
        expand(reg % SIXEL_LEVELS),
    )
}

// ── Base64 ───────────────────────────────────────────────────────────────

const BASE64_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Standard base64 with padding.
fn base64(input: &[u8]) -> String {
    let mut out = String::with_capacity(input.len().div_ceil(3) * 4);
    for chunk in input.chunks(3) {
        let b = [
            chunk[0],
            chunk.get(1).copied().unwrap_or(0),
            chunk.get(2).copied().unwrap_or(0),
        ];
        let n = (u32::from(b[0]) << 16) | (u32::from(b[1]) << 8) | u32::from(b[2]);
        out.push(BASE64_ALPHABET[(n >> 18) as usize & 0x3F] as char);
        out.push(BASE64_ALPHABET[(n >> 12) as usize & 0x3F] as char);
        out.push(if chunk.len() > 1 {
            BASE64_ALPHABET[(n >> 6) as usize & 0x3F] as char
        } else {
            '='
        });
        out.push(if chunk.len() > 2 {
            BASE64_ALPHABET[n as usize & 0x3F] as char
        } else {
            '='
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: usize, height: usize, rgba: [u8; 4]) -> Vec<u8> {
        rgba.iter()
            .copied()
            .cycle()
            .take(width * height * 4)
            .collect()
    }

    #[test]
    fn base64_known_vectors() {
        assert_eq!(base64(b""), "");
        assert_eq!(base64(b"f"), "Zg==");
        assert_eq!(base64(b"fo"), "Zm8=");
        assert_eq!(base64(b"foo"), "Zm9v");
        assert_eq!(base64(b"foobar"), "Zm9vYmFy");
    }

    #[test]
    fn rgba_image_validates_length() {
        assert!(RgbaImage::new(2, 2, &[0u8; 16]).is_ok());
        assert!(RgbaImage::new(2, 2, &[0u8; 15]).is_err());
    }

    #[test]
    fn kitty_envelope() {
        let pixels = solid(2, 1, [255, 0, 0, 255]);
        let image = RgbaImage::new(2, 1, &pixels).unwrap();
        let mut out = Vec::new();
        emit_kitty(&mut out, image).unwrap();
        let s = String::from_utf8(out).unwrap();
        assert!(s.starts_with("\x1b_Gf=32,s=2,v=1,a=T,m=0;"));
        assert!(s.ends_with("\x1b\\"));
    }

    #[test]
    fn kitty_chunks_large_payloads() {
        let pixels = solid(64, 64, [1, 2, 3, 255]);
        let image = RgbaImage::new(64, 64, &pixels).unwrap();
        let mut out = Vec::new();
        emit_kitty(&mut out, image).unwrap();
        let s = String::from_utf8(out).unwrap();
        // 64*64*4 bytes of base64 exceeds one chunk, so a continuation
        // envelope must be present and the final chunk must carry m=0.
        assert!(s.contains("m=1;"));
        assert!(s.contains("\x1b_Gm=0;"));
    }

    #[test]
    fn sixel_envelope_and_palette() {
        let pixels = solid(3, 3, [0, 255, 0, 255]);
        let image = RgbaImage::new(3, 3, &pixels).unwrap();
        let mut out = Vec::new();
        emit_sixel(&mut out, image).unwrap();
        let s = String::from_utf8(out).unwrap();
        assert!(s.starts_with("\x1bPq\"1;1;3;3"));
        assert!(s.ends_with("\x1b\\"));
        // Pure green quantises to register g=5 → 5 * 6 = 30.
        assert!(s.contains("#30;2;0;100;0"));
    }

    #[test]
    fn sixel_transparent_pixels_are_skipped() {
        let pixels = solid(4, 4, [10, 10, 10, 0]);
        let image = RgbaImage::new(4, 4, &pixels).unwrap();
        let mut out = Vec::new();
        emit_sixel(&mut out, image).unwrap();
        let s = String::from_utf8(out).unwrap();
        // No color introducer beyond the raster attributes.
        assert!(!s.contains(";2;"));
    }

    #[test]
    fn detect_protocol_honors_override() {
        // Only meaningful outside a kitty terminal.
        let term = std::env::var("TERM").unwrap_or_default();
        if std::env::var_os("KITTY_WINDOW_ID").is_none() && !term.contains("kitty") {
            assert_eq!(detect_protocol(Some(false)), GraphicsProtocol::None);
        }
    }
}
