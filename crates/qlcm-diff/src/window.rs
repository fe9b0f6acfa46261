//! Divergence window: a fixed-width preview around the first differing character.
//!
//! Both blobs are read lazily, in lockstep, into trailing windows that keep
//! only the most recent `width` characters. Reading stops `width - lead_in`
//! characters past the first difference, so neither the time nor the memory
//! spent depends on how much of either blob follows.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::config::PreviewConfig;

const FILLER: char = ' ';

/// Two preview lines, left above right.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preview {
    pub left: String,
    pub right: String,
    /// Character offset of the first difference.
    pub offset: usize,
}

/// A window that keeps the last `capacity` characters appended to it.
#[derive(Debug)]
struct TrailingWindow {
    capacity: usize,
    chars: VecDeque<char>,
}

impl TrailingWindow {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            chars: VecDeque::with_capacity(capacity + 1),
        }
    }

    fn push(&mut self, c: char) {
        self.chars.push_back(c);
        while self.chars.len() > self.capacity {
            self.chars.pop_front();
        }
    }

    /// Append `c`, or the filler once the source is exhausted.
    fn push_or_fill(&mut self, c: Option<char>) {
        self.push(c.unwrap_or(FILLER));
    }

    fn as_string(&self) -> String {
        self.chars.iter().collect()
    }
}

/// Untrimmed windows as they stand when scanning stops.
#[derive(Debug)]
struct Scan {
    left: TrailingWindow,
    right: TrailingWindow,
    offset: usize,
}

fn scan(left: &str, right: &str, config: &PreviewConfig) -> Scan {
    let mut left_window = TrailingWindow::new(config.width);
    let mut right_window = TrailingWindow::new(config.width);
    let mut left_chars = left.chars();
    let mut right_chars = right.chars();

    // The character at `offset` is pushed before the stop test, so the
    // difference itself is part of the lead-in.
    let mut offset = 0;
    loop {
        let (l, r) = (left_chars.next(), right_chars.next());
        left_window.push_or_fill(l);
        right_window.push_or_fill(r);
        if l.is_none() || r.is_none() || l != r {
            break;
        }
        offset += 1;
    }

    for _ in 0..config.tail() {
        left_window.push_or_fill(left_chars.next());
        right_window.push_or_fill(right_chars.next());
    }

    Scan {
        left: left_window,
        right: right_window,
        offset,
    }
}

/// Render a preview of where `left` and `right` first differ.
///
/// Each line holds at most `config.width` characters: up to `lead_in`
/// characters ending at the first difference, followed by the rest of the
/// window. Surrounding whitespace is trimmed.
pub fn render_window(left: &str, right: &str, config: &PreviewConfig) -> Preview {
    let scan = scan(left, right, config);

    Preview {
        left: scan.left.as_string().trim().to_string(),
        right: scan.right.as_string().trim().to_string(),
        offset: scan.offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn trailing_window_evicts_oldest() {
        let mut w = TrailingWindow::new(3);
        for c in "abcde".chars() {
            w.push(c);
        }
        assert_eq!(w.as_string(), "cde");
    }

    #[test]
    fn exhausted_source_is_filled() {
        let mut w = TrailingWindow::new(4);
        let mut src = "ab".chars();
        for _ in 0..4 {
            w.push_or_fill(src.next());
        }
        assert_eq!(w.as_string(), "ab  ");
    }

    #[test]
    fn difference_after_forty_chars_sits_at_end_of_lead_in() {
        let prefix = "x".repeat(40);
        let left = format!("{prefix}A{}", "l".repeat(100));
        let right = format!("{prefix}B{}", "r".repeat(100));
        let config = PreviewConfig::default();

        let scan = scan(&left, &right, &config);
        assert_eq!(scan.offset, 40);
        assert_eq!(scan.left.chars.len(), 95);

        // 41 characters up to the difference plus 65 after: 106 pushed, 95 kept.
        let window = chars(&scan.left.as_string());
        let diff_at = window.iter().position(|&c| c == 'A').unwrap();
        assert_eq!(diff_at, 29);
        assert!(window.len() - diff_at <= config.tail() + 1);
        assert_eq!(chars(&scan.right.as_string())[diff_at], 'B');
    }

    #[test]
    fn rendered_preview_is_bounded() {
        let prefix = "y".repeat(40);
        let left = format!("{prefix}1{}", "z".repeat(500));
        let right = format!("{prefix}2{}", "z".repeat(500));
        let preview = render_window(&left, &right, &PreviewConfig::default());

        assert!(preview.left.chars().count() <= 95);
        assert!(preview.right.chars().count() <= 95);
        assert!(preview.left.starts_with(&"y".repeat(29)));
        assert_eq!(preview.left.chars().nth(29), Some('1'));
        assert_eq!(preview.right.chars().nth(29), Some('2'));
    }

    #[test]
    fn short_blobs_are_shown_whole() {
        let preview = render_window("<Step>1</Step>", "<Step>2</Step>", &PreviewConfig::default());
        assert_eq!(preview.left, "<Step>1</Step>");
        assert_eq!(preview.right, "<Step>2</Step>");
        assert_eq!(preview.offset, 6);
    }

    #[test]
    fn prefix_blob_stops_at_shorter_end() {
        let preview = render_window("abc", "abcdef", &PreviewConfig::default());
        assert_eq!(preview.offset, 3);
        assert_eq!(preview.left, "abc");
        assert_eq!(preview.right, "abcdef");
    }

    #[test]
    fn empty_against_content() {
        let preview = render_window("", "<Step/>", &PreviewConfig::default());
        assert_eq!(preview.offset, 0);
        assert_eq!(preview.left, "");
        assert_eq!(preview.right, "<Step/>");
    }

    #[test]
    fn custom_window_shape() {
        let config = PreviewConfig::new(10, 4).unwrap();
        let preview = render_window("0123456789ABCDEFGHIJ", "0123456789aBCDEFGHIJ", &config);
        // Lead-in "789A" followed by six characters of tail.
        assert_eq!(preview.left, "789ABCDEFG");
        assert_eq!(preview.right, "789aBCDEFG");
        assert_eq!(preview.offset, 10);
    }

    #[test]
    fn reading_stops_after_the_tail() {
        // Everything past offset + tail is never reached, however long.
        let config = PreviewConfig::new(10, 4).unwrap();
        let left = format!("abX{}", "q".repeat(10_000));
        let right = format!("abY{}", "q".repeat(10_000));
        let scan = scan(&left, &right, &config);
        assert_eq!(scan.offset, 2);
        assert_eq!(scan.left.as_string(), "abXqqqqqq");
        assert_eq!(scan.right.as_string(), "abYqqqqqq");
    }

    #[test]
    fn multibyte_characters_count_once() {
        let config = PreviewConfig::new(6, 2).unwrap();
        let preview = render_window("ééééXéé", "ééééYéé", &config);
        assert_eq!(preview.left, "éXéé");
        assert_eq!(preview.offset, 4);
    }

    proptest! {
        #[test]
        fn preview_never_exceeds_width(
            left in ".{0,300}",
            right in ".{0,300}",
            width in 1usize..120,
            lead in 0usize..120,
        ) {
            let config = PreviewConfig { width, lead_in: lead.min(width) };
            let preview = render_window(&left, &right, &config);
            prop_assert!(preview.left.chars().count() <= width);
            prop_assert!(preview.right.chars().count() <= width);
        }
    }
}
