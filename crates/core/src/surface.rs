#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Plain,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceLine {
    pub text: String,
    pub style: LineStyle,
}

impl SurfaceLine {
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: LineStyle::Plain,
        }
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: LineStyle::Error,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TextSurface {
    lines: Vec<SurfaceLine>,
    cursor: usize,
    scroll: usize,
}

impl TextSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_line(&mut self, text: impl Into<String>) {
        self.lines.push(SurfaceLine::plain(text));
    }

    pub fn append_error_line(&mut self, text: impl Into<String>) {
        self.lines.push(SurfaceLine::error(text));
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.rewind();
    }

    pub fn rewind(&mut self) {
        self.cursor = 0;
        self.scroll = 0;
    }

    #[must_use]
    pub fn lines(&self) -> &[SurfaceLine] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    #[must_use]
    pub fn line_at_cursor(&self) -> Option<&str> {
        self.lines.get(self.cursor).map(|line| line.text.as_str())
    }

    pub fn move_cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_down(&mut self) {
        if self.lines.is_empty() {
            return;
        }
        self.cursor = (self.cursor + 1).min(self.lines.len() - 1);
    }

    pub fn ensure_cursor_visible(&mut self, viewport: usize) {
        if viewport == 0 {
            return;
        }
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + viewport {
            self.scroll = self.cursor + 1 - viewport;
        }
    }

    #[must_use]
    pub fn visible_lines(&self, limit: usize) -> &[SurfaceLine] {
        if limit == 0 || self.scroll >= self.lines.len() {
            return &[];
        }
        let end = (self.scroll + limit).min(self.lines.len());
        &self.lines[self.scroll..end]
    }

    #[must_use]
    pub fn buffer(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn push_char(&mut self, ch: char) {
        if ch == '\n' {
            self.lines.push(SurfaceLine::plain(""));
            return;
        }
        match self.lines.last_mut() {
            Some(line) => line.text.push(ch),
            None => self.lines.push(SurfaceLine::plain(ch.to_string())),
        }
    }

    pub fn pop_char(&mut self) {
        let Some(line) = self.lines.last_mut() else {
            return;
        };
        if line.text.pop().is_none() && self.lines.len() > 1 {
            self.lines.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LineStyle, TextSurface};

    #[test]
    fn clear_drops_content_and_resets_cursor_and_scroll() {
        let mut surface = TextSurface::new();
        surface.append_line("users");
        surface.append_line("orders");
        surface.move_cursor_down();
        surface.ensure_cursor_visible(1);

        surface.clear();

        assert!(surface.is_empty());
        assert_eq!(surface.cursor(), 0);
        assert_eq!(surface.scroll(), 0);
        assert!(surface.line_at_cursor().is_none());
    }

    #[test]
    fn cursor_is_clamped_to_existing_lines() {
        let mut surface = TextSurface::new();
        surface.move_cursor_down();
        assert_eq!(surface.cursor(), 0);

        surface.append_line("users");
        surface.append_line("orders");
        surface.move_cursor_down();
        surface.move_cursor_down();
        surface.move_cursor_down();
        assert_eq!(surface.cursor(), 1);
        assert_eq!(surface.line_at_cursor(), Some("orders"));

        surface.move_cursor_up();
        surface.move_cursor_up();
        assert_eq!(surface.cursor(), 0);
    }

    #[test]
    fn visible_lines_follow_the_scroll_offset() {
        let mut surface = TextSurface::new();
        for index in 0..5 {
            surface.append_line(format!("line-{index}"));
        }

        for _ in 0..4 {
            surface.move_cursor_down();
        }
        surface.ensure_cursor_visible(2);

        let window = surface.visible_lines(2);
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].text, "line-3");
        assert_eq!(window[1].text, "line-4");
    }

    #[test]
    fn error_lines_keep_their_style() {
        let mut surface = TextSurface::new();
        surface.append_error_line("syntax error");

        assert_eq!(surface.lines()[0].style, LineStyle::Error);
        assert_eq!(surface.lines()[0].text, "syntax error");
    }

    #[test]
    fn char_editing_builds_and_shrinks_the_buffer() {
        let mut surface = TextSurface::new();
        for ch in "SELECT 1".chars() {
            surface.push_char(ch);
        }
        assert_eq!(surface.buffer(), "SELECT 1");

        surface.pop_char();
        assert_eq!(surface.buffer(), "SELECT ");

        surface.push_char('\n');
        surface.push_char('x');
        assert_eq!(surface.buffer(), "SELECT \nx");

        surface.pop_char();
        surface.pop_char();
        assert_eq!(surface.buffer(), "SELECT ");
    }
}
