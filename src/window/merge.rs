//! Post-processing over built windows: coalescing, filtering and lookup.

use super::types::{reindex, Window};

/// Coalesce consecutive windows while their summed token counts fit.
///
/// Windows are grouped greedily in order; a group closes when the next
/// window would push its total past `max_merge_tokens`, and that window
/// opens the next group. A merged window joins its members' contents with
/// `\n`, spans from the first member's `start_line` to the last member's
/// `end_line`, and carries the summed token count. The result is re-indexed.
///
/// Overlapping windows are merged as they are; shared lines are not
/// deduplicated.
pub fn merge(windows: &[Window], max_merge_tokens: usize) -> Vec<Window> {
    let mut merged = Vec::new();
    let mut group: Vec<&Window> = Vec::new();
    let mut group_tokens = 0;

    for window in windows {
        if group_tokens + window.token_count <= max_merge_tokens {
            group.push(window);
            group_tokens += window.token_count;
        } else {
            if !group.is_empty() {
                merged.push(merge_group(&group, group_tokens));
            }
            group = vec![window];
            group_tokens = window.token_count;
        }
    }

    if !group.is_empty() {
        merged.push(merge_group(&group, group_tokens));
    }

    reindex(&mut merged);
    tracing::debug!(
        before = windows.len(),
        after = merged.len(),
        max_merge_tokens,
        "merged windows"
    );
    merged
}

fn merge_group(group: &[&Window], token_count: usize) -> Window {
    let content = group
        .iter()
        .map(|w| w.content.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let start_line = group.first().map(|w| w.start_line).unwrap_or(0);
    let end_line = group.last().map(|w| w.end_line).unwrap_or(0);

    Window::new(content, start_line, end_line, token_count)
}

/// Drop windows with fewer than `min_tokens` tokens. Order is kept and
/// indices are left untouched.
pub fn filter_by_min_tokens(windows: Vec<Window>, min_tokens: usize) -> Vec<Window> {
    windows
        .into_iter()
        .filter(|w| w.token_count >= min_tokens)
        .collect()
}

/// Bounds-checked lookup.
pub fn get_by_index(windows: &[Window], index: usize) -> Option<&Window> {
    windows.get(index)
}
