// Login window
// First screen shown after startup. Displays application identity and storage location.

use crate::config::AppConfig;
use crate::ui::{Palette, Window};
use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub struct LoginView {
    title: String,
    subtitle: String,
    database: String,
    today: String,
    palette: Palette,
    min_size: (u16, u16),
    visible: bool,
}

impl LoginView {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_date(config, Local::now().date_naive())
    }

    pub fn with_date(config: &AppConfig, today: NaiveDate) -> Self {
        Self {
            title: config.app_name.clone(),
            subtitle: format!("v{} · {}", config.app_version, config.app_author),
            database: config.database_file.display().to_string(),
            today: config.format_date(today),
            palette: Palette::for_theme(config.default_theme),
            min_size: config.min_terminal_size(),
            visible: false,
        }
    }

    fn too_small(&self, area: Rect) -> bool {
        area.width < self.min_size.0 || area.height < self.min_size.1
    }
}

impl Window for LoginView {
    fn title(&self) -> &str {
        &self.title
    }

    fn show(&mut self) {
        self.visible = true;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn draw(&mut self, f: &mut Frame) {
        let area = f.size();
        let base = Style::default()
            .fg(self.palette.foreground)
            .bg(self.palette.background);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Identity panel
                Constraint::Length(3), // Key hints / size warning
            ])
            .split(area);

        let body = vec![
            Line::from(""),
            Line::from(Span::styled(
                self.title.clone(),
                Style::default()
                    .fg(self.palette.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                self.subtitle.clone(),
                Style::default().fg(self.palette.muted),
            )),
            Line::from(""),
            Line::from(format!("Veritabanı: {}", self.database)),
            Line::from(format!("Tarih: {}", self.today)),
        ];

        let panel = Paragraph::new(body)
            .alignment(Alignment::Center)
            .style(base)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Giriş ")
                    .border_style(Style::default().fg(self.palette.accent)),
            );
        f.render_widget(panel, chunks[0]);

        let status = if self.too_small(area) {
            Line::from(Span::styled(
                format!(
                    "Pencere çok küçük: en az {}x{} gerekli ({}x{})",
                    self.min_size.0, self.min_size.1, area.width, area.height
                ),
                Style::default().fg(self.palette.warning),
            ))
        } else {
            Line::from(Span::styled(
                "q / Esc: çıkış",
                Style::default().fg(self.palette.muted),
            ))
        };

        let status_bar = Paragraph::new(status)
            .alignment(Alignment::Center)
            .style(base)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(status_bar, chunks[1]);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<i32> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(0),
            _ => None,
        }
    }
}
