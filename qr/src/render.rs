//! Output renderers: SVG, PNG (feature `png`) and terminal art.

use std::fmt::Write;

use crate::matrix::Matrix;

/// Quiet zone around the symbol, in modules.
pub const QUIET_ZONE: usize = 4;

/// Largest module scale accepted by [`to_png`].
pub const MAX_MODULE_SCALE: u32 = 64;

/// Smaller quiet zone for terminal output.
const TERMINAL_QUIET_ZONE: usize = 2;

/// Edge length of the rendered image in units: `(size + 8) * module_scale`.
pub fn image_size(matrix: &Matrix, module_scale: u32) -> usize {
    (matrix.size() + 2 * QUIET_ZONE) * module_scale as usize
}

/// Render as an SVG document, one unit per pixel.
pub fn to_svg(matrix: &Matrix, module_scale: u32) -> String {
    let total = image_size(matrix, module_scale);
    svg_document(matrix, module_scale, total)
}

/// Render as an SVG whose coordinate system uses `module_scale` units per
/// module but which displays at `pixel_size` x `pixel_size`.
pub fn to_svg_sized(matrix: &Matrix, module_scale: u32, pixel_size: u32) -> String {
    svg_document(matrix, module_scale, pixel_size as usize)
}

fn svg_document(matrix: &Matrix, module_scale: u32, display: usize) -> String {
    let total = image_size(matrix, module_scale);
    let scale = module_scale as usize;

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {total} {total}" width="{display}" height="{display}" shape-rendering="crispEdges">"#
    );

    // White background
    let _ = write!(
        svg,
        r#"<rect width="{total}" height="{total}" fill="white"/>"#
    );

    // Black modules
    for (row, modules) in matrix.rows().iter().enumerate() {
        for (col, &dark) in modules.iter().enumerate() {
            if dark {
                let x = (col + QUIET_ZONE) * scale;
                let y = (row + QUIET_ZONE) * scale;
                let _ = write!(
                    svg,
                    r#"<rect x="{x}" y="{y}" width="{scale}" height="{scale}" fill="black"/>"#
                );
            }
        }
    }

    svg.push_str("</svg>");
    svg
}

/// Render as an 8-bit grayscale PNG.
///
/// Fails with `LimitsExceeded` when `module_scale` is above
/// [`MAX_MODULE_SCALE`].
#[cfg(feature = "png")]
pub fn to_png(matrix: &Matrix, module_scale: u32) -> Result<Vec<u8>, png::EncodingError> {
    if module_scale > MAX_MODULE_SCALE {
        return Err(png::EncodingError::LimitsExceeded);
    }
    // At most (57 + 8) * 64 = 4160, well inside u32.
    let total = image_size(matrix, module_scale);
    let scale = module_scale as usize;

    // 0 = black, 255 = white
    let mut pixels = vec![255u8; total * total];

    for (row, modules) in matrix.rows().iter().enumerate() {
        for (col, &dark) in modules.iter().enumerate() {
            if !dark {
                continue;
            }
            let px = (col + QUIET_ZONE) * scale;
            let py = (row + QUIET_ZONE) * scale;
            for dy in 0..scale {
                let start = (py + dy) * total + px;
                pixels[start..start + scale].fill(0);
            }
        }
    }

    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, total as u32, total as u32);
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&pixels)?;
    }

    Ok(png_data)
}

/// Terminal art, two characters per module for a square aspect ratio.
pub fn to_ascii(matrix: &Matrix) -> String {
    let size = matrix.size();
    let width = (size + 2 * TERMINAL_QUIET_ZONE) * 2;
    let blank_line = format!("{}\n", " ".repeat(width));
    let margin = " ".repeat(TERMINAL_QUIET_ZONE * 2);

    let mut result = blank_line.repeat(TERMINAL_QUIET_ZONE);
    for modules in matrix.rows() {
        result.push_str(&margin);
        for &dark in modules {
            result.push_str(if dark { "\u{2588}\u{2588}" } else { "  " });
        }
        result.push_str(&margin);
        result.push('\n');
    }
    result.push_str(&blank_line.repeat(TERMINAL_QUIET_ZONE));

    result
}

/// Terminal art using half blocks, two module rows per line.
pub fn to_ascii_compact(matrix: &Matrix) -> String {
    let size = matrix.size();
    let span = size + 2 * TERMINAL_QUIET_ZONE;
    let module = |row: usize, col: usize| {
        let symbol = TERMINAL_QUIET_ZONE..size + TERMINAL_QUIET_ZONE;
        let inside = |i: usize| symbol.contains(&i);
        inside(row)
            && inside(col)
            && matrix.get(row - TERMINAL_QUIET_ZONE, col - TERMINAL_QUIET_ZONE)
    };

    let mut result = String::new();
    for row in (0..span).step_by(2) {
        for col in 0..span {
            let ch = match (module(row, col), module(row + 1, col)) {
                (true, true) => '\u{2588}',  // Full block
                (true, false) => '\u{2580}', // Upper half block
                (false, true) => '\u{2584}', // Lower half block
                (false, false) => ' ',
            };
            result.push(ch);
        }
        result.push('\n');
    }

    result
}
