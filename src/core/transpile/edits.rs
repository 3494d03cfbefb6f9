use std::ops::Range;

use tree_sitter::Node;

/// Whitespace to swallow next to a removed span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Trim {
    None,
    /// Spaces in front of the span, when the span is followed by a
    /// separator (`f() : T {` becomes `f() {`).
    Before,
    /// Spaces after the span (`private x` becomes `x`).
    After,
}

/// Byte ranges to delete from a source text.
pub(super) struct Edits<'a> {
    source: &'a str,
    ranges: Vec<Range<usize>>,
}

impl<'a> Edits<'a> {
    pub(super) fn new(source: &'a str) -> Self {
        Self {
            source,
            ranges: Vec::new(),
        }
    }

    pub(super) fn len(&self) -> usize {
        self.ranges.len()
    }

    pub(super) fn remove(&mut self, range: Range<usize>, trim: Trim) {
        if range.is_empty() {
            return;
        }
        let bytes = self.source.as_bytes();
        let mut start = range.start;
        let mut end = range.end;

        match trim {
            Trim::None => {}
            Trim::Before => {
                let followed_by_separator = bytes
                    .get(end)
                    .map_or(true, |b| matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b')' | b']' | b',' | b';'));
                if followed_by_separator {
                    while start > 0 && matches!(bytes[start - 1], b' ' | b'\t') {
                        start -= 1;
                    }
                }
            }
            Trim::After => {
                while end < bytes.len() && matches!(bytes[end], b' ' | b'\t') {
                    end += 1;
                }
            }
        }

        self.ranges.push(self.widen_to_lines(start..end));
    }

    /// Remove a statement-level node together with the comments directly
    /// above it.
    pub(super) fn remove_statement(&mut self, node: Node) {
        let mut start = node.start_byte();
        let mut cursor = node.prev_sibling();

        while let Some(prev) = cursor {
            if prev.kind() != "comment" || !self.attached(prev.end_byte(), start) {
                break;
            }
            if !self.starts_line(prev.start_byte()) {
                break;
            }
            start = prev.start_byte();
            cursor = prev.prev_sibling();
        }

        self.ranges.push(self.widen_to_lines(start..node.end_byte()));
    }

    /// Remove a span verbatim, widening to whole lines when nothing else
    /// remains on them.
    pub(super) fn remove_span(&mut self, range: Range<usize>) {
        if !range.is_empty() {
            self.ranges.push(self.widen_to_lines(range));
        }
    }

    /// Remove the dropped entries of a comma-separated list. Each dropped
    /// entry takes its trailing comma, or the comma before it when it is
    /// the last entry.
    pub(super) fn remove_list_entries(&mut self, entries: &[(Node, bool)]) {
        let mut last_kept: Option<Node> = None;

        for (entry, kept) in entries {
            if *kept {
                last_kept = Some(*entry);
                continue;
            }

            match entry.next_sibling().filter(|next| next.kind() == ",") {
                Some(comma) => {
                    let bytes = self.source.as_bytes();
                    let mut end = comma.end_byte();
                    while end < bytes.len() && matches!(bytes[end], b' ' | b'\t') {
                        end += 1;
                    }
                    self.remove_span(entry.start_byte()..end);
                }
                None => match last_kept {
                    Some(prev) => self.remove_span(prev.end_byte()..entry.end_byte()),
                    None => self.remove_span(entry.byte_range()),
                },
            }
        }
    }

    /// Whether `node` lies entirely inside a span already marked for removal.
    pub(super) fn covers(&self, node: &Node) -> bool {
        let (start, end) = (node.start_byte(), node.end_byte());
        self.ranges
            .iter()
            .any(|range| range.start <= start && end <= range.end)
    }

    /// Produce the source text with every marked range cut out.
    pub(super) fn apply(mut self) -> String {
        self.ranges.sort_by_key(|range| (range.start, range.end));

        let mut output = String::with_capacity(self.source.len());
        let mut cursor = 0;
        for range in &self.ranges {
            if range.end <= cursor {
                continue;
            }
            let start = range.start.max(cursor);
            output.push_str(&self.source[cursor..start]);
            cursor = range.end;
        }
        output.push_str(&self.source[cursor..]);
        output
    }

    /// Comment ending at `comment_end` belongs to the node starting at
    /// `node_start` when no blank line separates them.
    fn attached(&self, comment_end: usize, node_start: usize) -> bool {
        let between = &self.source[comment_end..node_start];
        between.trim().is_empty() && between.matches('\n').count() <= 1
    }

    fn starts_line(&self, offset: usize) -> bool {
        let line_start = self.line_start(offset);
        self.source[line_start..offset].trim().is_empty()
    }

    fn line_start(&self, offset: usize) -> usize {
        self.source[..offset].rfind('\n').map_or(0, |i| i + 1)
    }

    fn widen_to_lines(&self, range: Range<usize>) -> Range<usize> {
        let line_start = self.line_start(range.start);
        let line_end = self.source[range.end..]
            .find('\n')
            .map_or(self.source.len(), |i| range.end + i + 1);

        let before_blank = self.source[line_start..range.start].trim().is_empty();
        let after_blank = self.source[range.end..line_end].trim().is_empty();

        if before_blank && after_blank {
            line_start..line_end
        } else {
            range
        }
    }
}
