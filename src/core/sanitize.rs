// src/core/sanitize.rs
//
// Small text-repair primitives shared by the normaliser, the classifier
// and the correction catalog.

/// Collapse runs of literal spaces to one. Other whitespace is kept as-is:
/// line breaks are structural in compendium bodies.
pub fn collapse_spaces(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch == ' ' {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out
}

/// Keep ASCII digits only ("1,000 gp" → "1000").
pub fn digits_only(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Upper-case the first character.
pub fn ucfirst(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => s!(),
    }
}

/// Replace every occurrence of `from` that is not already part of an
/// occurrence of `to`. Returns `None` when nothing changed, so applying the
/// same swap to its own output is a no-op.
pub fn swap_all(data: &str, from: &str, to: &str) -> Option<String> {
    if from.is_empty() || !data.contains(from) {
        return None;
    }
    // Offsets at which `from` sits inside `to`.
    let inside: Vec<usize> = (0..=to.len().saturating_sub(from.len()))
        .filter(|&k| to.is_char_boundary(k) && to[k..].starts_with(from))
        .collect();

    let mut out = String::with_capacity(data.len() + to.len());
    let mut last = 0usize;
    let mut changed = false;
    for (i, _) in data.match_indices(from) {
        let covered = inside.iter().any(|&k| {
            i >= k && data.get(i - k..).is_some_and(|rest| rest.starts_with(to))
        });
        if covered { continue; }
        out.push_str(&data[last..i]);
        out.push_str(to);
        last = i + from.len();
        changed = true;
    }
    if !changed {
        return None;
    }
    out.push_str(&data[last..]);
    Some(out)
}

/// Replace the first occurrence of `from`, unless `to` is already present.
pub fn swap_first(data: &str, from: &str, to: &str) -> Option<String> {
    if from.is_empty() || (!to.is_empty() && data.contains(to)) {
        return None;
    }
    data.find(from).map(|_| data.replacen(from, to, 1))
}
