use crate::font::TextMetrics;

/// Greedily wraps `text` into lines no wider than `max_width` pixels.
///
/// Words are split on whitespace and joined with single spaces. Words are added to the
/// current line for as long as the joined line still measures within `max_width`; the
/// word that overflows starts the next line. A word that is wider than `max_width` on its
/// own is kept whole on a line of its own: there is no character-level breaking, so such
/// a line is the one exception to the width guarantee.
///
/// Empty or all-whitespace text produces no lines.
pub fn wrap_text<M: TextMetrics + ?Sized>(text: &str, metrics: &M, max_width: i32) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };

        if metrics.text_width(&candidate) <= max_width {
            current = candidate;
        } else if current.is_empty() {
            // even a lone word doesn't fit, keep it as is
            lines.push(word.to_string());
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Height in pixels of a block of wrapped lines: each line's measured height, plus
/// `line_spacing` between consecutive lines. No lines measure 0.
pub fn text_height<M, S>(lines: &[S], metrics: &M, line_spacing: i32) -> i32
where
    M: TextMetrics + ?Sized,
    S: AsRef<str>,
{
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let gap = if i > 0 { line_spacing } else { 0 };
            metrics.line_height(line.as_ref()) + gap
        })
        .sum()
}
