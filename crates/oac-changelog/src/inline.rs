//! Inline markdown diffs of description text.
//!
//! Documentation changes render the old and new text as one string with
//! `**...**` insert and `~~...~~` delete markers. Single-line text diffs
//! at word granularity; once either side spans multiple lines the diff
//! switches to line granularity, marking whole lines instead.

use similar::{ChangeTag, TextDiff};

/// Render an inline diff between old and new text.
pub fn inline_diff(old: &str, new: &str) -> String {
    if old.contains('\n') || new.contains('\n') {
        line_diff(old, new)
    } else {
        word_diff(old, new)
    }
}

fn word_diff(old: &str, new: &str) -> String {
    let diff = TextDiff::from_words(old, new);
    let mut out = String::new();
    let mut run_tag: Option<ChangeTag> = None;
    let mut run = String::new();

    // Consecutive tokens with the same tag coalesce into one marked span,
    // so an inserted phrase gets a single pair of markers.
    for change in diff.iter_all_changes() {
        let tag = change.tag();
        if run_tag != Some(tag) {
            flush_run(&mut out, run_tag, &run);
            run.clear();
            run_tag = Some(tag);
        }
        run.push_str(change.value());
    }
    flush_run(&mut out, run_tag, &run);
    out
}

fn flush_run(out: &mut String, tag: Option<ChangeTag>, run: &str) {
    let Some(tag) = tag else {
        return;
    };
    if run.is_empty() {
        return;
    }
    match tag {
        ChangeTag::Equal => out.push_str(run),
        // Whitespace-only churn carries no content worth marking: keep
        // inserted spacing, drop deleted spacing.
        ChangeTag::Insert if run.trim().is_empty() => out.push_str(run),
        ChangeTag::Delete if run.trim().is_empty() => {}
        ChangeTag::Insert => push_marked(out, run, "**"),
        ChangeTag::Delete => push_marked(out, run, "~~"),
    }
}

/// Wrap the trimmed core of a run in markers, keeping its surrounding
/// whitespace outside them.
fn push_marked(out: &mut String, run: &str, marker: &str) {
    let start = run.len() - run.trim_start().len();
    let end = run.trim_end().len();
    out.push_str(&run[..start]);
    out.push_str(marker);
    out.push_str(&run[start..end]);
    out.push_str(marker);
    out.push_str(&run[end..]);
}

fn line_diff(old: &str, new: &str) -> String {
    let diff = TextDiff::from_lines(old, new);
    let mut lines: Vec<String> = Vec::new();
    for change in diff.iter_all_changes() {
        let text = change.value().trim_end_matches('\n');
        let line = if text.trim().is_empty() {
            text.to_string()
        } else {
            match change.tag() {
                ChangeTag::Equal => text.to_string(),
                ChangeTag::Insert => format!("**{text}**"),
                ChangeTag::Delete => format!("~~{text}~~"),
            }
        };
        lines.push(line);
    }
    lines.join("\n")
}
