//! Page layout engine
//!
//! Fixed-size pages measured in integer layout units on a US-Letter point
//! grid. A vertical cursor tracks the fill of the current page; every write
//! first checks the near-bottom threshold and starts a new page when the
//! cursor has passed it.

use serde::{Deserialize, Serialize};

/// Cursor position at the top of every page
pub const TOP_MARGIN: u32 = 50;

/// Near-bottom threshold: a cursor past this starts a new page
pub const PAGE_BREAK_AT: u32 = 700;

/// Vertical gap before the divider that separates file blocks
pub const BLOCK_GAP: u32 = 10;

/// Maximum characters of a rendered content line
pub const MAX_LINE_CHARS: usize = 120;

/// Marker appended to truncated lines
pub const ELLIPSIS: &str = "...";

/// Visual weight of a rendered line; determines its row height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    Title,
    Heading,
    /// Bold-weight file-path header of a listing block
    FileHeader,
    Meta,
    Text,
    /// Numbered source line
    Code,
    /// Horizontal rule between file blocks
    Divider,
}

impl LineStyle {
    /// Row height in layout units
    pub fn row_height(self) -> u32 {
        match self {
            LineStyle::Title => 28,
            LineStyle::Heading => 18,
            LineStyle::FileHeader => 16,
            LineStyle::Meta => 14,
            LineStyle::Text => 14,
            LineStyle::Code => 12,
            LineStyle::Divider => 2,
        }
    }
}

/// One laid-out line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageLine {
    pub style: LineStyle,
    pub text: String,
}

/// One fixed-size page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page {
    pub lines: Vec<PageLine>,
}

/// Truncate a line to the character cap, appending the ellipsis marker.
///
/// Character-exact: a line over the cap keeps exactly `MAX_LINE_CHARS`
/// characters plus the 3-character marker.
pub fn truncate_line(line: &str) -> String {
    if line.chars().count() <= MAX_LINE_CHARS {
        return line.to_string();
    }
    let mut truncated: String = line.chars().take(MAX_LINE_CHARS).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Page-break state machine.
///
/// Owns the growing page list and the vertical cursor of the page being
/// filled.
pub struct PageBuilder {
    pages: Vec<Page>,
    current: Page,
    cursor: u32,
}

impl Default for PageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PageBuilder {
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: Page::default(),
            cursor: TOP_MARGIN,
        }
    }

    /// Write one line, breaking the page first if the cursor has passed the
    /// near-bottom threshold
    pub fn push(&mut self, style: LineStyle, text: impl Into<String>) {
        if self.cursor > PAGE_BREAK_AT {
            self.break_page();
        }
        self.cursor += style.row_height();
        self.current.lines.push(PageLine {
            style,
            text: text.into(),
        });
    }

    /// End a file block: advance by the block gap and draw a divider, unless
    /// that would overflow the current page's remaining space. An omitted
    /// divider is never deferred to the next page.
    pub fn block_break(&mut self) {
        let needed = BLOCK_GAP + LineStyle::Divider.row_height();
        if self.cursor + needed <= PAGE_BREAK_AT {
            self.cursor += needed;
            self.current.lines.push(PageLine {
                style: LineStyle::Divider,
                text: String::new(),
            });
        }
    }

    fn break_page(&mut self) {
        let filled = std::mem::take(&mut self.current);
        self.pages.push(filled);
        self.cursor = TOP_MARGIN;
    }

    /// Current cursor position, for layout decisions and tests
    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    /// Finish the document, returning all pages
    pub fn finish(mut self) -> Vec<Page> {
        self.pages.push(self.current);
        self.pages
    }
}
