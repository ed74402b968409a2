//! Interactive chart viewer: one tab per chart, full-screen.
//!
//! Keys: ←/→ (h/l, Tab) switch chart, 1-4 jump, q/Esc quit.

use std::io::{self, stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::{Frame, Terminal};

use tradejournal_core::AggregateReport;
use tradejournal_report::{ChartKind, JournalChart, Theme};

struct Viewer<'a> {
    report: &'a AggregateReport,
    theme: Theme,
    selected: usize,
    running: bool,
}

impl<'a> Viewer<'a> {
    fn new(report: &'a AggregateReport) -> Self {
        Self {
            report,
            theme: Theme::default(),
            selected: 0,
            running: true,
        }
    }

    fn kind(&self) -> ChartKind {
        ChartKind::ALL[self.selected]
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let count = ChartKind::ALL.len();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => {
                self.selected = (self.selected + 1) % count;
            }
            KeyCode::Left | KeyCode::BackTab | KeyCode::Char('h') => {
                self.selected = (self.selected + count - 1) % count;
            }
            KeyCode::Char(c @ '1'..='4') => {
                self.selected = c as usize - '1' as usize;
            }
            _ => {}
        }
    }
}

/// Take over the terminal until the user quits.
pub fn run(report: &AggregateReport) -> Result<()> {
    // Restore the terminal before the default hook prints the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut viewer = Viewer::new(report);
    let result = event_loop(&mut terminal, &mut viewer);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, viewer: &mut Viewer<'_>) -> Result<()> {
    while viewer.running {
        terminal.draw(|f| draw(f, viewer))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                viewer.handle_key(key);
            }
        }
    }
    Ok(())
}

fn draw(frame: &mut Frame, viewer: &Viewer<'_>) {
    let theme = &viewer.theme;
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(frame.area());

    let titles: Vec<&str> = ChartKind::ALL.iter().map(|k| k.title()).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(" Trade Journal ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.neutral)),
        )
        .style(Style::default().fg(theme.text_secondary))
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .select(viewer.selected);
    frame.render_widget(tabs, chunks[0]);

    frame.render_widget(
        JournalChart::new(viewer.kind(), viewer.report, theme),
        chunks[1],
    );

    let stats = &viewer.report.stats;
    let final_pl = viewer.report.final_pl();
    let status = Line::from(vec![
        Span::styled(
            format!(" {} trades ", stats.total_trades),
            Style::default().fg(theme.text_primary),
        ),
        Span::styled(
            format!(" win rate {:.1}% ", stats.win_rate_pct),
            Style::default().fg(theme.win_rate_color(stats.win_rate_pct)),
        ),
        Span::styled(
            format!(" P/L {:+.2} ", final_pl),
            Style::default().fg(theme.pnl_color(final_pl)),
        ),
        Span::styled(
            "  \u{2190}/\u{2192} switch  1-4 jump  q quit",
            Style::default().fg(theme.muted),
        ),
    ]);
    frame.render_widget(Paragraph::new(status), chunks[2]);
}
