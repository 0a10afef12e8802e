//! Plain-text views of a call tree.

use crate::calltree::{Event, TreeStats};
use crate::parser::schema::HotCall;

/// Indented outline, one call per line with its duration
///
/// ```text
/// app.py^1^main (5.00ms)
///   app.py^7^load (2.00ms)
/// ```
pub fn generate_text_outline(root: &Event) -> String {
    let mut lines = Vec::new();

    let mut pending = vec![(root, 0usize)];
    while let Some((event, depth)) = pending.pop() {
        lines.push(format!(
            "{}{} ({:.2}ms)",
            "  ".repeat(depth),
            event.target(),
            event.length()
        ));
        pending.extend(event.children().iter().rev().map(|child| (child, depth + 1)));
    }

    lines.join("\n")
}

/// Create a text summary table of the hottest functions
pub fn generate_text_summary(hot_calls: &[HotCall], stats: &TreeStats) -> String {
    let mut lines = Vec::new();

    lines.push("  HOT CALLS (by self time)".to_string());
    lines.push("  ┏━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┳━━━━━━━━━┳━━━━━━━━━━━━━━┳━━━━━━━━━━━━━━┳━━━━━━━━━┓".to_string());
    lines.push(format!(
        "  ┃ {:<42} ┃ {:^7} ┃ {:^12} ┃ {:^12} ┃ {:^7} ┃",
        "Function", "CALLS", "SELF (ms)", "TOTAL (ms)", "%"
    ));
    lines.push("  ┣━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━╋━━━━━━━━━╋━━━━━━━━━━━━━━╋━━━━━━━━━━━━━━╋━━━━━━━━━┫".to_string());

    for call in hot_calls {
        lines.push(format!(
            "  ┃ {:<42} ┃ {:>7} ┃ {:>12.2} ┃ {:>12.2} ┃ {:>6.1}% ┃",
            truncate_left(&call.name, 42),
            call.calls,
            call.self_ms,
            call.total_ms,
            call.percentage
        ));
    }

    lines.push("  ┗━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┻━━━━━━━━━┻━━━━━━━━━━━━━━┻━━━━━━━━━━━━━━┻━━━━━━━━━┛".to_string());
    lines.push(String::new());
    lines.push(format!("  {}", stats.summary()));

    lines.join("\n")
}

/// Keep the tail of long names, which carries the function
fn truncate_left(name: &str, max_chars: usize) -> String {
    let count = name.chars().count();
    if count <= max_chars {
        return name.to_string();
    }
    let tail: String = name.chars().skip(count - (max_chars - 3)).collect();
    format!("...{}", tail)
}
