mod app;
mod config;
mod event;
mod quiz;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use app::App;
use config::Config;
use event::{AppEvent, EventHandler};
use ui::components::question_list::QuestionList;
use ui::layout::AppLayout;

#[derive(Parser)]
#[command(name = "quizdr", version, about = "Terminal quiz runner for spreadsheet question banks")]
struct Cli {
    #[arg(help = "Quiz spreadsheet (xlsx, xls or ods)")]
    file: PathBuf,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Pass threshold percentage (0-100)")]
    pass_threshold: Option<u32>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    if let Some(threshold) = cli.pass_threshold {
        config.pass_threshold = threshold;
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    config.normalize_pass_threshold();

    let mut app = App::new(config, cli.file);
    app.load_file();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(250));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor_down(),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::PageUp => app.prev_page(),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::PageDown => app.next_page(),
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_current(),
        KeyCode::Char('s') => app.submit(),
        KeyCode::Char('r') => app.reload(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let layout = AppLayout::new(area);

    render_header(frame, app, layout.header);

    let list = QuestionList::new(&app.state, app.cursor, app.theme);
    frame.render_widget(list, layout.main);

    render_footer(frame, app, layout.footer);
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let header_style = Style::default().bg(colors.header_bg());

    let mut spans = vec![
        Span::styled(
            " quizdr ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {}", app.state.title),
            Style::default().fg(colors.header_fg()).bg(colors.header_bg()),
        ),
    ];

    if let Some(ref summary) = app.summary {
        let verdict_color = if summary.passed { colors.pass() } else { colors.fail() };
        spans.push(Span::styled(
            format!("  {}", summary.message()),
            Style::default()
                .fg(verdict_color)
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ));
    }

    let mut lines = vec![Line::from(spans)];

    // Second header row: load errors take priority over data-quality warnings.
    if let Some(ref error) = app.load_error {
        lines.push(Line::from(Span::styled(
            format!(" load error: {error}"),
            Style::default().fg(colors.fail()).bg(colors.header_bg()),
        )));
    } else if app.unanswerable > 0 {
        lines.push(Line::from(Span::styled(
            format!(
                " warning: {} question(s) have no correct answer marked",
                app.unanswerable
            ),
            Style::default().fg(colors.warning()).bg(colors.header_bg()),
        )));
    }

    let header = Paragraph::new(lines).style(header_style);
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let hint = Style::default().fg(colors.dim());
    let active = Style::default().fg(colors.fg());

    let prev_style = if app.state.has_prev_page() { active } else { hint };
    let next_style = if app.state.has_next_page() { active } else { hint };

    let page_indicator = format!(
        "Page {} of {} ",
        app.state.current_page + 1,
        app.state.page_count().max(1)
    );

    let footer = Paragraph::new(Line::from(vec![
        Span::styled(" [\u{2191}\u{2193}] Move  [Space] Toggle  ", hint),
        Span::styled("[\u{2190}] Prev  ", prev_style),
        Span::styled("[\u{2192}] Next  ", next_style),
        Span::styled("[s] Submit  [r] Reload  [q] Quit   ", hint),
        Span::styled(page_indicator, Style::default().fg(colors.accent())),
    ]));
    frame.render_widget(footer, area);
}
