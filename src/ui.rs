use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget, Wrap},
};
use tui_input::Input;

use crate::models::{Entry, EntryState};

/// Input bar for the candidate URL; its value doubles as the deletion
/// match key.
pub struct UrlBar<'a> {
    input: &'a Input,
    focused: bool,
}

impl<'a> UrlBar<'a> {
    pub fn new(input: &'a Input, focused: bool) -> Self {
        Self { input, focused }
    }

    /// Where the frame should place the terminal cursor while the bar
    /// is focused.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let inner_width = area.width.saturating_sub(2) as usize;
        let scroll = self.input.visual_scroll(inner_width);
        let offset = self.input.visual_cursor().saturating_sub(scroll) as u16;

        let x = (area.x + 1 + offset).min(area.x + area.width.saturating_sub(2));
        (x, area.y + 1)
    }
}

impl Widget for UrlBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" URL (Enter: Shorten | Ctrl+D: Delete matching) ")
            .border_style(border_style);

        let inner_width = area.width.saturating_sub(2) as usize;
        let scroll = self.input.visual_scroll(inner_width);

        let value = if self.input.value().is_empty() {
            Paragraph::new("Enter a URL to shorten...")
                .style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new(self.input.value()).scroll((0, scroll as u16))
        };
        value.block(block).render(area, buf);
    }
}

/// One-line text region for the single validation message.
pub struct ErrorLine<'a> {
    message: Option<&'a str>,
}

impl<'a> ErrorLine<'a> {
    pub fn new(message: Option<&'a str>) -> Self {
        Self { message }
    }
}

impl Widget for ErrorLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if let Some(message) = self.message {
            Paragraph::new(message)
                .style(Style::default().fg(Color::Red))
                .render(area, buf);
        }
    }
}

/// The rendered list of short links.
pub struct EntryList<'a> {
    entries: &'a [Entry],
    base_url: &'a str,
    selected: Option<usize>,
    scroll_offset: usize,
    focused: bool,
}

impl<'a> EntryList<'a> {
    pub fn new(
        entries: &'a [Entry],
        base_url: &'a str,
        selected: Option<usize>,
        scroll_offset: usize,
        focused: bool,
    ) -> Self {
        Self {
            entries,
            base_url,
            selected,
            scroll_offset,
            focused,
        }
    }
}

impl Widget for EntryList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Short Links ({}) ", self.entries.len()))
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        if self.entries.is_empty() {
            let empty_msg =
                Paragraph::new("No short links yet.\n\nPress 'i', type a URL, then Enter.")
                    .style(Style::default().fg(Color::DarkGray))
                    .wrap(Wrap { trim: true });
            empty_msg.render(inner, buf);
            return;
        }

        // Only the visible window is turned into list items.
        let visible_height = inner.height as usize;
        let end = (self.scroll_offset + visible_height).min(self.entries.len());

        let items: Vec<ListItem> = self.entries[self.scroll_offset..end]
            .iter()
            .enumerate()
            .map(|(offset, entry)| {
                let idx = self.scroll_offset + offset;
                let style = if Some(idx) == self.selected {
                    Style::default()
                        .bg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(row_line(entry, self.base_url)).style(style)
            })
            .collect();

        Widget::render(List::new(items), inner, buf);
    }
}

/// One row, left to right: link (or inline edit input), " - ", the
/// original URL, the click display, and the Edit/Save control label.
fn row_line(entry: &Entry, base_url: &str) -> Line<'static> {
    let mut spans = Vec::new();

    match &entry.state {
        EntryState::Viewing => {
            spans.push(Span::styled(
                entry.short_url(base_url),
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED),
            ));
        }
        EntryState::Editing { buffer } => {
            spans.push(Span::styled(
                format!("{}_", buffer),
                Style::default().bg(Color::Blue).fg(Color::White),
            ));
        }
    }

    spans.push(Span::raw(" - "));
    spans.push(Span::raw(entry.original_url.clone()));
    spans.push(Span::styled(
        entry.clicks_label(),
        Style::default().fg(Color::Green),
    ));
    spans.push(Span::styled(
        if entry.is_editing() {
            " [Save]"
        } else {
            " [Edit]"
        },
        Style::default().fg(Color::Yellow),
    ));

    Line::from(spans)
}

/// Width in columns of the link portion of a row; an editing row has no
/// link to activate.
pub fn link_width(entry: &Entry, base_url: &str) -> usize {
    if entry.is_editing() {
        0
    } else {
        entry.short_url(base_url).chars().count()
    }
}

/// Single-line key reference at the bottom of the screen.
pub struct HelpBar<'a> {
    text: &'a str,
}

impl<'a> HelpBar<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }
}

impl Widget for HelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.text)
            .style(Style::default().bg(Color::DarkGray).fg(Color::White))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LinkList;
    use crate::shortener::DEFAULT_BASE_URL;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).unwrap().symbol())
            .collect()
    }

    fn rendered(list: &LinkList, selected: Option<usize>) -> Buffer {
        let area = Rect::new(0, 0, 80, 10);
        let mut buf = Buffer::empty(area);
        EntryList::new(list.entries(), list.base_url(), selected, 0, true).render(area, &mut buf);
        buf
    }

    #[test]
    fn test_viewing_row_shows_link_original_and_edit_control() {
        let mut list = LinkList::new(DEFAULT_BASE_URL);
        list.shorten("https://openai.com").unwrap();
        let short_url = list.entries()[0].short_url(DEFAULT_BASE_URL);

        let buf = rendered(&list, Some(0));
        let row = row_text(&buf, 1);

        assert!(row.contains(&format!("{} - https://openai.com", short_url)));
        assert!(row.contains("[Edit]"));
        // The click display stays blank until the first click.
        assert!(!row.contains("Clicks:"));
    }

    #[test]
    fn test_click_display_appears_after_clicks() {
        let mut list = LinkList::new(DEFAULT_BASE_URL);
        list.shorten("https://openai.com").unwrap();
        for _ in 0..3 {
            list.entry_mut(0).unwrap().record_click();
        }

        let buf = rendered(&list, Some(0));
        assert!(row_text(&buf, 1).contains("Clicks: 3"));
    }

    #[test]
    fn test_editing_row_shows_the_buffer_and_save_control() {
        let mut list = LinkList::new(DEFAULT_BASE_URL);
        list.shorten("https://openai.com").unwrap();
        let entry = list.entry_mut(0).unwrap();
        entry.begin_edit();
        *entry.edit_buffer_mut().unwrap() = "alias".to_string();

        let buf = rendered(&list, Some(0));
        let row = row_text(&buf, 1);

        assert!(row.contains("alias_ - https://openai.com"));
        assert!(row.contains("[Save]"));
        assert!(!row.contains("[Edit]"));
    }

    #[test]
    fn test_empty_list_placeholder() {
        let list = LinkList::new(DEFAULT_BASE_URL);
        let buf = rendered(&list, None);
        assert!(row_text(&buf, 1).contains("No short links yet."));
    }

    #[test]
    fn test_link_width_covers_the_link_text_only() {
        let mut list = LinkList::new(DEFAULT_BASE_URL);
        list.shorten("https://openai.com").unwrap();

        let entry = &list.entries()[0];
        assert_eq!(
            link_width(entry, DEFAULT_BASE_URL),
            entry.short_url(DEFAULT_BASE_URL).len()
        );

        let entry = list.entry_mut(0).unwrap();
        entry.begin_edit();
        assert_eq!(link_width(entry, DEFAULT_BASE_URL), 0);
    }

    #[test]
    fn test_error_line_renders_message_only_when_present() {
        let area = Rect::new(0, 0, 40, 1);

        let mut buf = Buffer::empty(area);
        ErrorLine::new(Some("Please enter a valid url")).render(area, &mut buf);
        assert!(row_text(&buf, 0).contains("Please enter a valid url"));

        let mut buf = Buffer::empty(area);
        ErrorLine::new(None).render(area, &mut buf);
        assert_eq!(row_text(&buf, 0).trim(), "");
    }
}
