//! Line and column lookup for spans.

/// Byte offsets of every line start, for O(log L) lookups.
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    offsets: Vec<usize>,
}

impl LineOffsetTable {
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0];
        offsets.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        LineOffsetTable { offsets }
    }

    /// 1-based line containing `offset`.
    pub fn line_from_offset(&self, offset: usize) -> usize {
        match self.offsets.binary_search(&offset) {
            Ok(exact) => exact + 1,
            Err(insert) => insert,
        }
    }

    /// Byte offset where 1-based `line` starts.
    pub fn line_start(&self, line: usize) -> usize {
        self.offsets
            .get(line.saturating_sub(1))
            .copied()
            .unwrap_or(0)
    }

    /// 1-based (line, column); the column counts characters, not bytes.
    pub fn offset_to_line_col(&self, source: &str, offset: usize) -> (usize, usize) {
        let line = self.line_from_offset(offset);
        let start = self.line_start(line).min(source.len());
        let end = offset.min(source.len()).max(start);
        let col = source
            .get(start..end)
            .map_or(end - start, |s| s.chars().count());
        (line, col + 1)
    }

    /// Text of 1-based `line` without its newline.
    pub fn line_text<'a>(&self, source: &'a str, line: usize) -> &'a str {
        let start = self.line_start(line).min(source.len());
        let rest = source.get(start..).unwrap_or("");
        rest.split('\n').next().unwrap_or("").trim_end_matches('\r')
    }
}
