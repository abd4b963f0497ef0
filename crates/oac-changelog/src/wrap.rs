//! Whitespace-aware line wrapping.

/// Wrap text to `width` columns, breaking at whitespace.
///
/// Embedded newlines are kept as hard breaks. A single word longer than
/// the width is never split; it overflows on its own line.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for segment in text.split('\n') {
        wrap_segment(segment, width, &mut lines);
    }
    lines
}

fn wrap_segment(segment: &str, width: usize, lines: &mut Vec<String>) {
    let mut rest = segment;
    loop {
        if rest.chars().count() <= width {
            lines.push(rest.to_string());
            return;
        }
        let at = match break_index(rest, width) {
            Some(at) => at,
            // No whitespace inside the budget: take the overlong word
            // whole and break after it, if anything follows.
            None => match rest.find(char::is_whitespace) {
                Some(at) => at,
                None => {
                    lines.push(rest.to_string());
                    return;
                }
            },
        };
        let (head, tail) = rest.split_at(at);
        lines.push(head.trim_end().to_string());
        rest = tail.trim_start();
        if rest.is_empty() {
            return;
        }
    }
}

/// Byte offset of the last whitespace within the first `width + 1`
/// characters, so the text before the break never exceeds the width.
fn break_index(text: &str, width: usize) -> Option<usize> {
    let mut best = None;
    for (count, (offset, ch)) in text.char_indices().enumerate() {
        if count > width {
            break;
        }
        if count > 0 && ch.is_whitespace() {
            best = Some(offset);
        }
    }
    best
}
