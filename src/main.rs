mod models;
mod shortener;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
        MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use models::LinkList;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Terminal,
};
use std::io;
use tui_input::{backend::crossterm::EventHandler, Input};
use ui::{EntryList, ErrorLine, HelpBar, UrlBar};

#[derive(Parser)]
#[command(name = "tui-shorten")]
#[command(about = "A terminal-based URL shortener widget with simulated redirects", long_about = None)]
struct Cli {
    /// Base prefix for generated short links
    #[arg(long, default_value = shortener::DEFAULT_BASE_URL)]
    base_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FocusPanel {
    UrlBar,
    Links,
}

struct App {
    links: LinkList,
    url_input: Input,
    error_message: Option<String>,
    focus: FocusPanel,
    selected: Option<usize>,
    scroll_offset: usize,
    links_area: Rect,
    should_quit: bool,
}

impl App {
    fn new(base_url: String) -> Self {
        Self {
            links: LinkList::new(base_url),
            url_input: Input::default(),
            error_message: None,
            focus: FocusPanel::UrlBar,
            selected: None,
            scroll_offset: 0,
            links_area: Rect::default(),
            should_quit: false,
        }
    }

    fn select_next(&mut self) {
        if self.links.is_empty() {
            return;
        }

        let new_idx = match self.selected {
            Some(idx) => (idx + 1).min(self.links.len() - 1),
            None => 0,
        };
        self.selected = Some(new_idx);
        self.ensure_visible(new_idx);
    }

    fn select_prev(&mut self) {
        if self.links.is_empty() {
            return;
        }

        let new_idx = match self.selected {
            Some(idx) => idx.saturating_sub(1),
            None => 0,
        };
        self.selected = Some(new_idx);
        self.ensure_visible(new_idx);
    }

    fn ensure_visible(&mut self, idx: usize) {
        let visible_height = self.links_area.height.saturating_sub(2) as usize;
        if visible_height == 0 {
            return;
        }

        if idx < self.scroll_offset {
            self.scroll_offset = idx;
        } else if idx >= self.scroll_offset + visible_height {
            self.scroll_offset = idx.saturating_sub(visible_height - 1);
        }
    }

    fn selected_is_editing(&self) -> bool {
        self.selected
            .and_then(|idx| self.links.entries().get(idx))
            .map_or(false, |entry| entry.is_editing())
    }

    /// Creation flow: clear the error surface, then validate and append.
    fn shorten_current_input(&mut self) {
        self.error_message = None;

        match self.links.shorten(self.url_input.value()) {
            Ok(()) => {
                let new_idx = self.links.len() - 1;
                self.selected = Some(new_idx);
                self.ensure_visible(new_idx);
            }
            Err(err) => self.error_message = Some(err.to_string()),
        }
    }

    /// Deletion flow, keyed on the URL bar's current value.
    fn delete_matching_input(&mut self) {
        self.links.delete_matching(self.url_input.value());

        // Clamp selection and scroll to the shrunken list.
        if self.links.is_empty() {
            self.selected = None;
            self.scroll_offset = 0;
        } else {
            if let Some(idx) = self.selected {
                if idx >= self.links.len() {
                    self.selected = Some(self.links.len() - 1);
                }
            }
            self.scroll_offset = self.scroll_offset.min(self.links.len() - 1);
        }
    }

    fn begin_edit_selected(&mut self) {
        if let Some(idx) = self.selected {
            if let Some(entry) = self.links.entry_mut(idx) {
                entry.begin_edit();
            }
        }
    }

    /// Simulated navigation to the original address; only bumps the
    /// entry's own counter.
    fn activate_selected(&mut self) {
        if let Some(idx) = self.selected {
            if let Some(entry) = self.links.entry_mut(idx) {
                if !entry.is_editing() {
                    entry.record_click();
                }
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // Deletion is reachable from either panel.
        if key.code == KeyCode::Char('d') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.delete_matching_input();
            return;
        }

        match self.focus {
            FocusPanel::UrlBar => match key.code {
                KeyCode::Enter => self.shorten_current_input(),
                KeyCode::Esc | KeyCode::Tab => self.focus = FocusPanel::Links,
                _ => {
                    let _ = self.url_input.handle_event(&Event::Key(key));
                }
            },
            FocusPanel::Links => self.handle_links_key(key),
        }
    }

    fn handle_links_key(&mut self, key: KeyEvent) {
        // While the selected entry is editing, printable keys go to its
        // inline input and Enter saves. Arrows still move the selection,
        // so other rows stay reachable mid-edit. There is no cancel.
        if self.selected_is_editing() {
            let idx = self.selected.unwrap_or_default();
            match key.code {
                KeyCode::Enter => {
                    if let Some(entry) = self.links.entry_mut(idx) {
                        entry.save_edit();
                    }
                    return;
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    if let Some(buffer) = self
                        .links
                        .entry_mut(idx)
                        .and_then(|entry| entry.edit_buffer_mut())
                    {
                        buffer.push(c);
                    }
                    return;
                }
                KeyCode::Backspace => {
                    if let Some(buffer) = self
                        .links
                        .entry_mut(idx)
                        .and_then(|entry| entry.edit_buffer_mut())
                    {
                        buffer.pop();
                    }
                    return;
                }
                KeyCode::Up | KeyCode::Down | KeyCode::Tab => {}
                _ => return,
            }
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Char('i') | KeyCode::Char('/') | KeyCode::Tab => {
                self.focus = FocusPanel::UrlBar;
            }
            KeyCode::Char('e') => self.begin_edit_selected(),
            KeyCode::Char('d') => self.delete_matching_input(),
            KeyCode::Enter => self.activate_selected(),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: event::MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let area = self.links_area;
                let inside = mouse.column > area.x
                    && mouse.column < area.x + area.width.saturating_sub(1)
                    && mouse.row > area.y
                    && mouse.row < area.y + area.height.saturating_sub(1);
                if !inside {
                    return;
                }

                let relative_row = mouse.row.saturating_sub(area.y + 1) as usize;
                let idx = self.scroll_offset + relative_row;
                if idx >= self.links.len() {
                    return;
                }

                self.selected = Some(idx);
                self.focus = FocusPanel::Links;

                // A press on the link text itself counts as navigation.
                let link_cols = ui::link_width(&self.links.entries()[idx], self.links.base_url());
                let relative_col = mouse.column.saturating_sub(area.x + 1) as usize;
                if relative_col < link_cols {
                    self.activate_selected();
                }
            }
            MouseEventKind::ScrollUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
            }
            MouseEventKind::ScrollDown => {
                let max_scroll = self.links.len().saturating_sub(1);
                self.scroll_offset = (self.scroll_offset + 1).min(max_scroll);
            }
            _ => {}
        }
    }
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Length(1),
                    Constraint::Min(1),
                    Constraint::Length(1),
                ])
                .split(f.area());

            let url_bar = UrlBar::new(&app.url_input, app.focus == FocusPanel::UrlBar);
            if app.focus == FocusPanel::UrlBar {
                f.set_cursor_position(url_bar.cursor_position(chunks[0]));
            }
            f.render_widget(url_bar, chunks[0]);

            f.render_widget(ErrorLine::new(app.error_message.as_deref()), chunks[1]);

            // Remember where the list landed for mouse hit-testing.
            app.links_area = chunks[2];
            f.render_widget(
                EntryList::new(
                    app.links.entries(),
                    app.links.base_url(),
                    app.selected,
                    app.scroll_offset,
                    app.focus == FocusPanel::Links,
                ),
                chunks[2],
            );

            let help_text = if app.focus == FocusPanel::UrlBar {
                " Enter: Shorten | Ctrl+D: Delete matching | Esc/Tab: Link list "
            } else if app.selected_is_editing() {
                " Type to edit the identifier | Enter: Save | ↑/↓: Select "
            } else {
                " ↑/↓: Select | Enter: Open (simulated) | e: Edit | d: Delete matching | i: URL bar | q: Quit "
            };
            f.render_widget(HelpBar::new(help_text), chunks[3]);
        })?;

        if app.should_quit {
            return Ok(());
        }

        match event::read()? {
            Event::Key(key) => app.handle_key(key),
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new(cli.base_url);
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
