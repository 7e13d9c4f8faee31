/// The selection engine: one function per command kind, dispatched from a
/// tagged-variant `CmdKind` rather than a table of function pointers.
use crate::buffer::Buffer;
use crate::interval::{self, Interval, IntervalList};
use crate::regex_adapter::{self, Regex};
use std::io::Write;

/// Runs a single command against the current `(buffer, selections)` state,
/// producing the next state in place. File and external-command commands
/// delegate to `crate::io` / `crate::external`, which call back into the
/// `change`/`insert`/`append` helpers below to share the rewriting protocol.
pub fn print(buffer: &Buffer, sels: &IntervalList, out: &mut impl Write) -> std::io::Result<()> {
    for sel in sels {
        out.write_all(sel.as_slice(buffer.as_bytes()))?;
    }
    Ok(())
}

/// `d`: delete every selection, then reset selections to the whole buffer.
pub fn delete(buffer: &mut Buffer, sels: &mut IntervalList) {
    change(buffer, sels, b"");
}

/// `c/str/`: replace every selection with `str`, then reset selections to
/// the whole buffer. This reset happens even if `sels` was empty.
pub fn change(buffer: &mut Buffer, sels: &mut IntervalList, replacement: &[u8]) {
    buffer.rewrite(sels, |_, _| replacement.to_vec());
    *sels = buffer.select_all();
}

/// Replaces each selection with the value a per-index callback produces
/// (used by the external-command bridge, where every selection gets a
/// distinct replacement captured from a child process), then resets
/// selections to the whole buffer.
pub fn change_each<F>(buffer: &mut Buffer, sels: &mut IntervalList, replacement: F)
where
    F: FnMut(usize, &Interval) -> Vec<u8>,
{
    buffer.rewrite(sels, replacement);
    *sels = buffer.select_all();
}

/// `s/regex/replacement/`, and the shared implementation behind `i`, `a`,
/// `S`. `pattern` is `None` for an uncompiled (empty) pattern; `pattern_str`
/// is always the raw first argument, needed to recognize the `^`, `$`, `^$`
/// anchor-only special cases.
pub fn sub(
    buffer: &mut Buffer,
    sels: &mut IntervalList,
    pattern: Option<&Regex>,
    pattern_str: Option<&str>,
    replacement: &[u8],
) {
    let anchor_start = pattern_str == Some("^");
    let anchor_end = pattern_str == Some("$");
    let anchor_both = pattern_str == Some("^$");

    if pattern.is_none() && !anchor_start && !anchor_end {
        return; // empty regex matches nothing: no-op
    }

    let bytes = buffer.as_bytes();
    let mut targets: Vec<Interval> = Vec::new();
    let mut per_sel_counts: Vec<usize> = Vec::with_capacity(sels.len());
    let mut per_sel_replaced: Vec<usize> = Vec::with_capacity(sels.len());

    for sel in sels.iter() {
        let mut count = 0usize;
        let mut replaced = 0usize;

        if anchor_start {
            targets.push(Interval::new(sel.from, 0));
            count += 1;
        } else if anchor_end {
            targets.push(Interval::new(sel.end(), 0));
            count += 1;
        } else if anchor_both {
            if sel.is_empty() {
                targets.push(Interval::new(sel.from, 0));
                count += 1;
            }
        } else if let Some(re) = pattern {
            for (so, eo) in regex_adapter::find_all(re, sel.as_slice(bytes)) {
                targets.push(Interval::new(sel.from + so, eo - so));
                count += 1;
                replaced += eo - so;
            }
        }

        per_sel_counts.push(count);
        per_sel_replaced.push(replaced);
    }

    if targets.is_empty() {
        return; // no match: buffer unchanged
    }

    buffer.rewrite(&targets, |_, _| replacement.to_vec());

    // Rewrite selection offsets in place: accumulate the net byte shift in
    // document order and fold each selection's own delta in.
    let mut cumulative: i64 = 0;
    for (sel, (count, replaced)) in sels
        .iter_mut()
        .zip(per_sel_counts.into_iter().zip(per_sel_replaced))
    {
        sel.from = (sel.from as i64 + cumulative) as usize;
        let delta = count as i64 * replacement.len() as i64 - replaced as i64;
        sel.len = (sel.len as i64 + delta) as usize;
        cumulative += delta;
    }
}

/// `g/regex/`: drop selections that do not match anywhere inside their
/// range; `v/regex/`: drop the ones that do. An empty pattern makes `g`
/// drop everything and `v` keep everything.
pub fn guard(buffer: &Buffer, sels: &mut IntervalList, pattern: Option<&Regex>, negated: bool) {
    let bytes = buffer.as_bytes();
    sels.retain(|sel| {
        let matches = match pattern {
            Some(re) => re.is_match(sel.as_slice(bytes)),
            None => false,
        };
        matches == !negated
    });
}

/// `x/regex/` and `y/regex/`: for each selection, splice in its
/// non-overlapping non-zero-length matches (or, for `y`, their complement
/// within the selection). A selection whose only match is itself is left
/// untouched. Zero-length matches are never stored (`find_all` already
/// skips them), so an empty, or purely anchor, pattern naturally extracts
/// nothing for `x` and leaves every selection untouched for `y`. No
/// separate special case is needed.
pub fn xtract(buffer: &Buffer, sels: &mut IntervalList, pattern: Option<&Regex>, negated: bool) {
    let bytes = buffer.as_bytes();

    let mut next: IntervalList = Vec::with_capacity(sels.len());
    for sel in sels.iter() {
        let matches: IntervalList = match pattern {
            Some(re) => regex_adapter::find_all(re, sel.as_slice(bytes))
                .into_iter()
                .map(|(so, eo)| Interval::new(sel.from + so, eo - so))
                .collect(),
            None => Vec::new(),
        };

        let spliced = if negated {
            interval::flip(&matches, *sel)
        } else {
            matches
        };

        if spliced.len() == 1 && spliced[0] == *sel {
            next.push(*sel);
        } else {
            next.extend(spliced);
        }
    }
    *sels = next;
}

/// `~`: replace selections with their complement within `(0, n)`.
pub fn flip(buffer: &Buffer, sels: &mut IntervalList) {
    *sels = interval::flip(sels, buffer.whole());
}

/// `u`: discard all selections and reseed with the whole buffer.
pub fn undo(buffer: &Buffer, sels: &mut IntervalList) {
    *sels = buffer.select_all();
}

/// `L`, shorthand for `x/[^\n]*\n/`.
pub fn lines(buffer: &Buffer, sels: &mut IntervalList, lines_regex: &Regex) {
    xtract(buffer, sels, Some(lines_regex), false);
}
