use std::fmt::Write;

use colored::Colorize;

/// Renders the leftmost `columns` of a coverage bitmap with half-block
/// characters, two bitmap rows per output line.
pub(super) fn render_preview(bitmap: &[u8], width: usize, height: usize, columns: usize) -> String {
    let columns = columns.min(width);
    let mut output = String::new();

    for y in (0..height).step_by(2) {
        for x in 0..columns {
            let top = bitmap[y * width + x];
            let bottom = if y + 1 < height { bitmap[(y + 1) * width + x] } else { 0 };

            match (top > 0, bottom > 0) {
                (true, true) => {
                    let px = "▀".truecolor(top, top, top).on_truecolor(bottom, bottom, bottom);
                    write!(output, "{px}").ok();
                },
                (true, false) => {
                    write!(output, "{}", "▀".truecolor(top, top, top)).ok();
                },
                (false, true) => {
                    write!(output, "{}", "▄".truecolor(bottom, bottom, bottom)).ok();
                },
                (false, false) => output.push(' '),
            }
        }
        output.push('\n');
    }

    output
}
