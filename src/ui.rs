use crate::config::{AppConfig, Theme};
use crate::error::{AppError, Result};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, backend::CrosstermBackend, style::Color, Frame, Terminal};
use std::io::{self, IsTerminal};
use tracing::{debug, info};

/// Exit code returned when the user interrupts with Ctrl+C
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

// ============================================================================
// CAPABILITIES
// ============================================================================

/// A top-level window managed by the toolkit.
pub trait Window {
    fn title(&self) -> &str;

    /// Mark the window visible. Never blocks.
    fn show(&mut self);

    fn is_visible(&self) -> bool;

    fn draw(&mut self, frame: &mut Frame);

    /// Handle a key press. `Some(code)` asks the application to exit with `code`.
    fn handle_key(&mut self, key: KeyEvent) -> Option<i32>;
}

/// The UI application object: owns the display and runs the event loop.
pub trait Toolkit {
    /// Block until the window requests exit and return the exit code.
    fn exec(&mut self, window: &mut dyn Window) -> Result<i32>;
}

/// Where the event loop reads input from
pub trait EventSource {
    fn next_event(&mut self) -> io::Result<Event>;
}

/// Blocking reads from the real terminal
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn next_event(&mut self) -> io::Result<Event> {
        event::read()
    }
}

// ============================================================================
// PALETTE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub accent: Color,
    pub muted: Color,
    pub warning: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Palette {
                background: Color::White,
                foreground: Color::Black,
                accent: Color::Blue,
                muted: Color::DarkGray,
                warning: Color::Red,
            },
            Theme::Dark => Palette {
                background: Color::Black,
                foreground: Color::White,
                accent: Color::Cyan,
                muted: Color::Gray,
                warning: Color::Yellow,
            },
        }
    }
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Draw/dispatch loop shared by the real terminal and tests.
pub fn run_event_loop<B, E>(
    terminal: &mut Terminal<B>,
    window: &mut dyn Window,
    events: &mut E,
) -> io::Result<i32>
where
    B: Backend,
    E: EventSource + ?Sized,
{
    loop {
        if window.is_visible() {
            terminal.draw(|f| window.draw(f))?;
        }

        match events.next_event()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    debug!("Interrupted from keyboard");
                    return Ok(INTERRUPTED_EXIT_CODE);
                }
                if let Some(code) = window.handle_key(key) {
                    return Ok(code);
                }
            }
            // Resize and everything else: just redraw on the next pass
            _ => {}
        }
    }
}

// ============================================================================
// TERMINAL APPLICATION
// ============================================================================

/// Full-screen terminal application object.
pub struct TerminalApplication {
    args: Vec<String>,
    alternate_screen: bool,
}

impl TerminalApplication {
    /// Fails when there is no terminal to draw on.
    pub fn new(args: Vec<String>, config: &AppConfig) -> Result<Self> {
        if !io::stdout().is_terminal() {
            return Err(AppError::Toolkit("stdout is not a terminal".to_string()));
        }

        let (cols, rows) = crossterm::terminal::size()
            .map_err(|e| AppError::Toolkit(format!("cannot query terminal size: {}", e)))?;

        info!(cols, rows, ?args, "Terminal application created");

        Ok(Self {
            args,
            alternate_screen: config.start_maximized,
        })
    }

    /// Process arguments as given to the constructor
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    fn enter_and_run(&self, window: &mut dyn Window) -> io::Result<i32> {
        if self.alternate_screen {
            execute!(io::stdout(), EnterAlternateScreen)?;
        }
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        terminal.clear()?;

        run_event_loop(&mut terminal, window, &mut CrosstermEvents)
    }
}

impl Toolkit for TerminalApplication {
    fn exec(&mut self, window: &mut dyn Window) -> Result<i32> {
        info!(window = window.title(), "Entering event loop");

        enable_raw_mode()?;
        let result = self.enter_and_run(window);
        let restored = restore_terminal(self.alternate_screen);

        let code = result?;
        restored?;

        info!(code, "Event loop finished");
        Ok(code)
    }
}

fn restore_terminal(alternate_screen: bool) -> io::Result<()> {
    disable_raw_mode()?;
    if alternate_screen {
        execute!(io::stdout(), LeaveAlternateScreen)?;
    }
    execute!(io::stdout(), cursor::Show)?;
    Ok(())
}
