//! Handles to the two page regions that components write into.
//!
//! Each component receives only the handle it needs: the product fetcher gets a
//! [`DisplayRegion`], the chat widget a [`Transcript`].

/// The single region holding the passport or a notice. Writes replace the content.
pub trait DisplayRegion: Send {
    fn replace(&mut self, html: String);
}

/// Display region that ends up holding whatever was written last.
#[derive(Debug, Default, Clone)]
pub struct RenderedRegion {
    html: Option<String>,
}

impl RenderedRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_html(self) -> Option<String> {
        self.html
    }
}

impl DisplayRegion for RenderedRegion {
    fn replace(&mut self, html: String) {
        self.html = Some(html);
    }
}

/// Identifies a line appended to a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineId(u64);

/// Append-only list of chat lines; only the typing placeholder is ever removed.
pub trait Transcript: Send {
    fn append(&mut self, html: String) -> LineId;
    fn remove(&mut self, id: LineId) -> bool;
    fn scroll_to_latest(&mut self);
}

/// Lines produced by one submit on the server. The browser inserts them and does the
/// scrolling, so `scroll_to_latest` is a no-op here.
#[derive(Debug, Default, Clone)]
pub struct TranscriptBuffer {
    lines: Vec<(LineId, String)>,
    next_id: u64,
}

impl TranscriptBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines.into_iter().map(|(_, html)| html).collect()
    }
}

impl Transcript for TranscriptBuffer {
    fn append(&mut self, html: String) -> LineId {
        let id = LineId(self.next_id);
        self.next_id += 1;
        self.lines.push((id, html));
        id
    }

    fn remove(&mut self, id: LineId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|(line, _)| *line != id);
        self.lines.len() != before
    }

    fn scroll_to_latest(&mut self) {}
}
