//! Pure text layout helpers and dimensional constants for the InputBox.
//!
//! Everything here works on `&str` + width and has no knowledge of the
//! component itself.

/// Border (2) + padding (2) consumed horizontally by the bordered block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Maximum visible content lines before internal scrolling kicks in
pub(super) const MAX_VISIBLE_LINES: u16 = 5;
/// Offset from area edge to the first content cell (border + padding)
pub(super) const CONTENT_OFFSET_X: u16 = 2;
/// Offset from area edge to the first content row (border)
pub(super) const CONTENT_OFFSET_Y: u16 = 1;

fn wrap_options(inner_width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(inner_width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Inner content width after subtracting border/padding overhead.
/// Returns 0 if the area is too narrow.
pub(super) fn inner_width(area_width: u16) -> u16 {
    area_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Visual rows of `text` at `width`. Every `\n` starts a new row, including
/// a trailing one, so the cursor has a row to sit on after Ctrl+J.
pub(super) fn wrap_rows(text: &str, width: u16) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    text.split('\n')
        .flat_map(|line| {
            if line.is_empty() {
                vec![String::new()]
            } else {
                textwrap::wrap(line, wrap_options(width))
                    .into_iter()
                    .map(|row| row.into_owned())
                    .collect()
            }
        })
        .collect()
}

/// Row and column of byte offset `pos` within the wrapped layout of `text`.
pub(super) fn cursor_row_col(text: &str, pos: usize, width: u16) -> (u16, u16) {
    let before = &text[..pos];
    let row = wrap_rows(before, width).len().saturating_sub(1);

    // Column within the current logical line, minus the rows it already filled
    let partial = before.rsplit('\n').next().unwrap_or("");
    let partial_rows = wrap_rows(partial, width);
    let consumed: usize = partial_rows
        .iter()
        .take(partial_rows.len().saturating_sub(1))
        .map(|r| r.chars().count())
        .sum();
    let col = partial.chars().count().saturating_sub(consumed);

    (row as u16, (col as u16).min(width))
}

/// Byte offset of the previous character boundary before `pos`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset of the next character boundary after `pos`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

/// Byte offset of the same character column on the neighbouring logical line.
/// `None` when there is no line in that direction.
pub(super) fn vertical_target(text: &str, pos: usize, up: bool) -> Option<usize> {
    let line_start = text[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = text[line_start..pos].chars().count();

    let (target_start, target_end) = if up {
        if line_start == 0 {
            return None;
        }
        let prev_end = line_start - 1;
        let prev_start = text[..prev_end].rfind('\n').map(|i| i + 1).unwrap_or(0);
        (prev_start, prev_end)
    } else {
        let line_end = text[pos..].find('\n').map(|i| pos + i)?;
        let next_start = line_end + 1;
        let next_end = text[next_start..]
            .find('\n')
            .map(|i| next_start + i)
            .unwrap_or(text.len());
        (next_start, next_end)
    };

    let target = &text[target_start..target_end];
    let offset = target
        .char_indices()
        .nth(column)
        .map(|(i, _)| i)
        .unwrap_or(target.len());
    Some(target_start + offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_rows_empty_is_one_row() {
        assert_eq!(wrap_rows("", 80), vec![String::new()]);
    }

    #[test]
    fn wrap_rows_trailing_newline_adds_row() {
        assert_eq!(wrap_rows("hello\n", 80).len(), 2);
        assert_eq!(wrap_rows("a\nb\nc", 80).len(), 3);
    }

    #[test]
    fn wrap_rows_wraps_long_text() {
        assert_eq!(wrap_rows("aaaaaaaaaa", 5), vec!["aaaaa", "aaaaa"]);
    }

    #[test]
    fn cursor_row_col_tracks_newlines_and_wraps() {
        assert_eq!(cursor_row_col("hello", 5, 80), (0, 5));
        assert_eq!(cursor_row_col("hello\n", 6, 80), (1, 0));
        assert_eq!(cursor_row_col("aaaaaaa", 7, 5), (1, 2));
        assert_eq!(cursor_row_col("", 0, 80), (0, 0));
    }

    #[test]
    fn char_boundaries_handle_multibyte() {
        let s = "a🔥b";
        assert_eq!(next_char_boundary(s, 0), 1);
        assert_eq!(next_char_boundary(s, 1), 5);
        assert_eq!(prev_char_boundary(s, 5), 1);
        assert_eq!(prev_char_boundary(s, 1), 0);
    }

    #[test]
    fn vertical_target_moves_between_lines() {
        let text = "first line\nhi\nthird";
        // From column 4 on line 1, down lands on end of "hi"
        assert_eq!(vertical_target(text, 4, false), Some(13));
        // From end of "hi", up keeps column 2
        assert_eq!(vertical_target(text, 13, true), Some(2));
        // No line above the first, none below the last
        assert_eq!(vertical_target(text, 2, true), None);
        assert_eq!(vertical_target(text, text.len(), false), None);
    }
}
