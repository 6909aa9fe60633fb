use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use markdown_lens_config::{Config, Palette};
use markdown_lens_engine::{Decoration, DecorationKind, extract_decorations};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::{
    io::{Stdout, stdout},
    path::Path,
    str::FromStr,
};

const RULE_WIDTH: usize = 40;

/// Terminal colours resolved from the configured palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Styles {
    pub heading: Color,
    pub link: Color,
    pub code: Color,
    pub quote: Color,
    pub highlight: Color,
}

impl Styles {
    pub fn from_palette(palette: &Palette) -> Self {
        let defaults = Palette::default();
        let color = |name: &str, fallback: &str| {
            Color::from_str(name).unwrap_or_else(|_| {
                log::warn!("Unknown colour '{name}', using '{fallback}'");
                Color::from_str(fallback).unwrap_or(Color::Reset)
            })
        };
        Self {
            heading: color(&palette.heading, &defaults.heading),
            link: color(&palette.link, &defaults.link),
            code: color(&palette.code, &defaults.code),
            quote: color(&palette.quote, &defaults.quote),
            highlight: color(&palette.highlight, &defaults.highlight),
        }
    }

    fn for_kind(&self, kind: DecorationKind) -> Style {
        let style = Style::default();
        match kind {
            DecorationKind::Hide => style,
            DecorationKind::Bold => style.add_modifier(Modifier::BOLD),
            DecorationKind::Italic => style.add_modifier(Modifier::ITALIC),
            DecorationKind::BoldItalic => style.add_modifier(Modifier::BOLD | Modifier::ITALIC),
            DecorationKind::Strikethrough => style.add_modifier(Modifier::CROSSED_OUT),
            DecorationKind::Code | DecorationKind::CodeBlock => style.fg(self.code),
            DecorationKind::Blockquote | DecorationKind::HorizontalRule => style.fg(self.quote),
            DecorationKind::Heading1 => style
                .fg(self.heading)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            DecorationKind::Heading
            | DecorationKind::Heading2
            | DecorationKind::Heading3
            | DecorationKind::Heading4
            | DecorationKind::Heading5
            | DecorationKind::Heading6 => style.fg(self.heading).add_modifier(Modifier::BOLD),
            DecorationKind::Link => style.fg(self.link).add_modifier(Modifier::UNDERLINED),
            DecorationKind::Image => style.fg(self.link).add_modifier(Modifier::ITALIC),
            DecorationKind::Highlight => style.bg(self.highlight).fg(Color::Black),
        }
    }
}

/// Lays out `text` as terminal lines.
///
/// With decorations disabled the raw markdown is shown as is. Otherwise
/// hidden ranges are dropped, every other decoration styles the text it
/// covers, and a line holding a horizontal rule is drawn as a rule.
pub fn render_document(
    text: &str,
    decorations: &[Decoration],
    enabled: bool,
    styles: &Styles,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut offset = 0;
    for raw_line in text.split('\n') {
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        let (start, end) = (offset, offset + line.len());
        offset += raw_line.len() + 1;

        if !enabled {
            lines.push(Line::raw(line.to_string()));
            continue;
        }
        let on_line: Vec<&Decoration> = decorations
            .iter()
            .filter(|d| d.start() < end.max(start + 1) && d.end() > start)
            .collect();
        if on_line.iter().any(|d| d.kind == DecorationKind::HorizontalRule) {
            lines.push(Line::styled(
                "─".repeat(RULE_WIDTH),
                styles.for_kind(DecorationKind::HorizontalRule),
            ));
            continue;
        }
        lines.push(Line::from(styled_spans(text, start, end, &on_line, styles)));
    }
    lines
}

/// Cuts `start..end` at every decoration boundary and styles each piece by
/// the decorations covering it.
fn styled_spans(
    text: &str,
    start: usize,
    end: usize,
    decorations: &[&Decoration],
    styles: &Styles,
) -> Vec<Span<'static>> {
    let mut cuts = vec![start, end];
    for d in decorations {
        cuts.extend([d.start(), d.end()].into_iter().filter(|&c| c > start && c < end));
    }
    cuts.sort_unstable();
    cuts.dedup();

    let mut spans = Vec::new();
    for window in cuts.windows(2) {
        let (from, to) = (window[0], window[1]);
        let covering = decorations
            .iter()
            .filter(|d| d.start() <= from && to <= d.end());
        let mut style = Style::default();
        let mut hidden = false;
        for d in covering {
            hidden |= d.kind == DecorationKind::Hide;
            style = style.patch(styles.for_kind(d.kind));
        }
        if hidden {
            continue;
        }
        if let Some(piece) = text.get(from..to) {
            spans.push(Span::styled(piece.to_string(), style));
        }
    }
    spans
}

struct App {
    title: String,
    text: String,
    decorations: Vec<Decoration>,
    enabled: bool,
    scroll: u16,
    styles: Styles,
}

impl App {
    fn new(path: &Path, text: String, config: &Config) -> Result<Self> {
        let decorations = extract_decorations(&text)?;
        Ok(Self {
            title: path.display().to_string(),
            text,
            decorations,
            enabled: config.decorations_enabled,
            scroll: 0,
            styles: Styles::from_palette(&config.palette),
        })
    }

    fn toggle(&mut self) {
        self.enabled = !self.enabled;
        log::debug!("decorations {}", if self.enabled { "on" } else { "off" });
    }

    fn scroll_down(&mut self) {
        let last = self.text.lines().count().saturating_sub(1);
        self.scroll = self
            .scroll
            .saturating_add(1)
            .min(u16::try_from(last).unwrap_or(u16::MAX));
    }

    fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}

/// Runs the viewer until the user quits.
pub fn run(path: &Path, text: String, config: &Config) -> Result<()> {
    let mut app = App::new(path, text, config)?;

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('d') => app.toggle(),
                KeyCode::Down | KeyCode::Char('j') => app.scroll_down(),
                KeyCode::Up | KeyCode::Char('k') => app.scroll_up(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());

    let mode = if app.enabled { "decorated" } else { "raw" };
    let content = Paragraph::new(render_document(
        &app.text,
        &app.decorations,
        app.enabled,
        &app.styles,
    ))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("{} ({mode})", app.title)),
    )
    .scroll((app.scroll, 0));
    f.render_widget(content, chunks[0]);

    let help = Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("d: Toggle decorations | "),
        Span::raw("↑/k ↓/j: Scroll"),
    ]);
    f.render_widget(Paragraph::new(help), chunks[1]);
}
