use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Terminal;

use folio_core::actions::{ConsoleAction, RuntimeAction, UserAction};
use folio_core::command_registry::CommandRegistry;
use folio_core::config::ConsoleConfig;
use folio_core::content::PortfolioContent;
use folio_core::outputs::skill_bar;
use folio_core::payload::{StyledRun, TextStyle};
use folio_core::reducer::{reduce, ConsoleEffect, NavigationTarget};
use folio_core::state::{ConsoleSettings, ConsoleState, EntryInput, TranscriptEntry};

const IDLE_POLL: Duration = Duration::from_millis(250);
const MATRIX_FRAME: Duration = Duration::from_millis(60);
const SCROLL_STEP: u16 = 5;

const LANDING_CHOICES: [(&str, &str); 3] = [
    ("Terminal mode", "type commands into the portfolio console"),
    ("Modern mode", "scroll through a one-page overview"),
    ("Quit", "leave folio"),
];

struct TuiGuard;

impl Drop for TuiGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableBracketedPaste,
            crossterm::cursor::Show
        );
    }
}

pub fn run(registry: CommandRegistry, config: &ConsoleConfig) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableBracketedPaste,
        crossterm::cursor::Hide
    )?;
    let _guard = TuiGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let mut app = App::new(registry, config);
    run_app(&mut terminal, &mut app)?;
    tracing::info!("console session ended");
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Landing,
    Console,
    Modern,
}

/// Pending timer deliveries, fired in deadline order.
#[derive(Debug, Default)]
struct TimerQueue {
    pending: Vec<(Instant, RuntimeAction)>,
}

impl TimerQueue {
    fn schedule(&mut self, now: Instant, after_ms: u64, action: RuntimeAction) {
        self.pending
            .push((now + Duration::from_millis(after_ms), action));
    }

    fn take_due(&mut self, now: Instant) -> Vec<RuntimeAction> {
        let mut due = Vec::new();
        self.pending.retain(|(at, action)| {
            if *at <= now {
                due.push((*at, *action));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|(at, _)| *at);
        due.into_iter().map(|(_, action)| action).collect()
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|(at, _)| *at).min()
    }

    fn clear(&mut self) {
        self.pending.clear();
    }
}

struct App {
    registry: CommandRegistry,
    settings: ConsoleSettings,
    prompt: String,
    screen: Screen,
    landing_selected: usize,
    console: Option<ConsoleState>,
    timers: TimerQueue,
    scroll_back: u16,
    modern_scroll: u16,
    frame: u64,
    should_quit: bool,
}

impl App {
    fn new(registry: CommandRegistry, config: &ConsoleConfig) -> Self {
        Self {
            registry,
            settings: ConsoleSettings::from(config),
            prompt: config.prompt.clone(),
            screen: Screen::Landing,
            landing_selected: 0,
            console: None,
            timers: TimerQueue::default(),
            scroll_back: 0,
            modern_scroll: 0,
            frame: 0,
            should_quit: false,
        }
    }

    fn open_console(&mut self) {
        self.timers.clear();
        self.console = Some(ConsoleState::new(self.registry.clone(), self.settings));
        self.scroll_back = 0;
        self.screen = Screen::Console;
        tracing::info!("console opened");
    }

    fn open_modern(&mut self) {
        self.console = None;
        self.timers.clear();
        self.modern_scroll = 0;
        self.screen = Screen::Modern;
    }

    fn open_landing(&mut self) {
        self.console = None;
        self.timers.clear();
        self.screen = Screen::Landing;
    }

    fn dispatch(&mut self, action: ConsoleAction) {
        let Some(console) = self.console.as_mut() else {
            return;
        };
        let effects = reduce(console, action);
        self.apply_effects(effects, Instant::now());
    }

    fn fire_due_timers(&mut self, now: Instant) {
        for action in self.timers.take_due(now) {
            self.dispatch(ConsoleAction::Runtime(action));
        }
    }

    fn apply_effects(&mut self, effects: Vec<ConsoleEffect>, now: Instant) {
        for effect in effects {
            match effect {
                ConsoleEffect::RequestFrame => {}
                ConsoleEffect::ScheduleRevealTick { reveal_id, after_ms } => {
                    self.timers
                        .schedule(now, after_ms, RuntimeAction::RevealTick { reveal_id });
                }
                ConsoleEffect::ScheduleGuiRedirect { timer_id, after_ms } => {
                    self.timers
                        .schedule(now, after_ms, RuntimeAction::GuiRedirectDue { timer_id });
                }
                ConsoleEffect::ScheduleMatrixClear { timer_id, after_ms } => {
                    self.timers
                        .schedule(now, after_ms, RuntimeAction::MatrixExpired { timer_id });
                }
                ConsoleEffect::SetMatrixOverlay(active) => {
                    tracing::debug!(active, "matrix overlay");
                }
                ConsoleEffect::RevealCompleted(entry) => {
                    tracing::trace!(entry = entry.0, "reveal completed");
                    self.scroll_back = 0;
                }
                ConsoleEffect::Navigate(target) => {
                    tracing::info!(route = target.label(), "navigating");
                    match target {
                        NavigationTarget::Landing => self.open_landing(),
                        NavigationTarget::AlternateUi => self.open_modern(),
                    }
                    // Navigation drops the session; later effects have no target.
                    return;
                }
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match self.screen {
            Screen::Landing => self.handle_landing_key(key),
            Screen::Console => self.handle_console_key(key),
            Screen::Modern => self.handle_modern_key(key),
        }
    }

    fn handle_landing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.landing_selected = self.landing_selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.landing_selected = (self.landing_selected + 1).min(LANDING_CHOICES.len() - 1);
            }
            KeyCode::Char('1') => self.open_console(),
            KeyCode::Char('2') => self.open_modern(),
            KeyCode::Enter => match self.landing_selected {
                0 => self.open_console(),
                1 => self.open_modern(),
                _ => self.should_quit = true,
            },
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_console_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let action = match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
                return;
            }
            KeyCode::PageUp => {
                self.scroll_back = self.scroll_back.saturating_add(SCROLL_STEP);
                return;
            }
            KeyCode::PageDown => {
                self.scroll_back = self.scroll_back.saturating_sub(SCROLL_STEP);
                return;
            }
            KeyCode::Enter => UserAction::Submit,
            KeyCode::Backspace => UserAction::InputBackspace,
            KeyCode::Up => UserAction::HistoryPrevious,
            KeyCode::Down => UserAction::HistoryNext,
            KeyCode::Char(ch) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                UserAction::InputChar(ch)
            }
            _ => return,
        };
        if action == UserAction::Submit {
            self.scroll_back = 0;
        }
        self.dispatch(ConsoleAction::User(action));
    }

    fn handle_modern_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q') => self.open_landing(),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('t') => self.open_console(),
            KeyCode::Up | KeyCode::Char('k') => {
                self.modern_scroll = self.modern_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.modern_scroll = self.modern_scroll.saturating_add(1);
            }
            KeyCode::PageUp => self.modern_scroll = self.modern_scroll.saturating_sub(SCROLL_STEP * 2),
            KeyCode::PageDown => self.modern_scroll = self.modern_scroll.saturating_add(SCROLL_STEP * 2),
            KeyCode::Home => self.modern_scroll = 0,
            _ => {}
        }
    }

    fn handle_paste(&mut self, text: String) {
        if self.screen == Screen::Console {
            self.dispatch(ConsoleAction::User(UserAction::InputPaste(text)));
        }
    }

    fn matrix_active(&self) -> bool {
        self.console
            .as_ref()
            .is_some_and(|console| console.matrix.active)
    }

    fn poll_timeout(&self, now: Instant) -> Duration {
        let idle = if self.matrix_active() {
            MATRIX_FRAME
        } else {
            IDLE_POLL
        };
        self.timers
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
            .map_or(idle, |until| until.min(idle))
    }
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        app.fire_due_timers(Instant::now());
        if app.should_quit {
            return Ok(());
        }

        app.frame = app.frame.wrapping_add(1);
        terminal.draw(|f| ui(f, app))?;

        if event::poll(app.poll_timeout(Instant::now()))? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Paste(text) => app.handle_paste(text),
                _ => {}
            }
        }
        if app.should_quit {
            return Ok(());
        }
    }
}

#[derive(Clone, Copy)]
struct UiPalette {
    text: Color,
    accent: Color,
    accent_alt: Color,
    success: Color,
    danger: Color,
    muted: Color,
    pink: Color,
    border: Color,
    selected_bg: Color,
}

/// The terminal's neon palette.
const PALETTE: UiPalette = UiPalette {
    text: Color::Rgb(224, 224, 224),
    accent: Color::Rgb(0, 255, 65),
    accent_alt: Color::Rgb(0, 217, 255),
    success: Color::Rgb(0, 255, 136),
    danger: Color::Rgb(255, 59, 59),
    muted: Color::Rgb(107, 114, 128),
    pink: Color::Rgb(255, 0, 110),
    border: Color::Rgb(42, 63, 95),
    selected_bg: Color::Rgb(21, 27, 46),
};

fn text_style(style: TextStyle, palette: UiPalette) -> Style {
    match style {
        TextStyle::Plain => Style::default().fg(palette.text),
        TextStyle::Primary => Style::default().fg(palette.accent),
        TextStyle::Accent => Style::default().fg(palette.accent_alt),
        TextStyle::Dim => Style::default().fg(palette.muted),
        TextStyle::Success => Style::default().fg(palette.success),
        TextStyle::Error => Style::default().fg(palette.danger),
        TextStyle::Pink => Style::default()
            .fg(palette.pink)
            .add_modifier(Modifier::BOLD),
        TextStyle::Banner => Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD),
    }
}

fn run_style(run: &StyledRun, palette: UiPalette) -> Style {
    let style = text_style(run.style, palette);
    if run.href.is_some() {
        style.fg(palette.accent_alt).add_modifier(Modifier::UNDERLINED)
    } else {
        style
    }
}

/// Converts styled payload lines to display lines, cut after `limit`
/// characters of the flattened stream. Each line break counts as one
/// character.
fn payload_lines(
    runs: &[Vec<StyledRun>],
    limit: Option<usize>,
    palette: UiPalette,
) -> Vec<Line<'static>> {
    let mut budget = limit.unwrap_or(usize::MAX);
    let mut out = Vec::with_capacity(runs.len());
    for (idx, line) in runs.iter().enumerate() {
        if idx > 0 {
            if budget == 0 {
                break;
            }
            budget -= 1;
        }
        let mut spans = Vec::with_capacity(line.len());
        for run in line {
            if budget == 0 {
                break;
            }
            let count = run.text.chars().count();
            let text = if count <= budget {
                budget -= count;
                run.text.clone()
            } else {
                let cut = run.text.chars().take(budget).collect();
                budget = 0;
                cut
            };
            spans.push(Span::styled(text, run_style(run, palette)));
        }
        out.push(Line::from(spans));
    }
    out
}

fn revealed_chars(console: &ConsoleState, entry: &TranscriptEntry) -> Option<usize> {
    console
        .reveal
        .as_ref()
        .filter(|active| active.entry_id == entry.id)
        .map(|active| active.engine.progress().0)
}

fn transcript_lines(console: &ConsoleState, prompt: &str, palette: UiPalette) -> Vec<Line<'static>> {
    let prompt_style = Style::default()
        .fg(palette.accent)
        .add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();
    for entry in console.transcript.iter() {
        if let EntryInput::Command(text) = &entry.input {
            lines.push(Line::from(vec![
                Span::styled(prompt.to_string(), prompt_style),
                Span::raw(" "),
                Span::styled(text.clone(), Style::default().fg(palette.text)),
            ]));
        }
        let limit = revealed_chars(console, entry);
        lines.extend(payload_lines(&entry.output.lines(), limit, palette));
        lines.push(Line::default());
    }
    lines
}

fn wrapped_height(lines: &[Line<'_>], width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let total: usize = lines
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum();
    u16::try_from(total).unwrap_or(u16::MAX)
}

fn ui(f: &mut ratatui::Frame, app: &App) {
    let palette = PALETTE;
    let area = f.area();
    match app.screen {
        Screen::Landing => render_landing(f, area, app, palette),
        Screen::Console => match &app.console {
            Some(console) => render_console(f, area, app, console, palette),
            None => render_landing(f, area, app, palette),
        },
        Screen::Modern => render_modern(f, area, app, palette),
    }
}

fn render_landing(f: &mut ratatui::Frame, area: Rect, app: &App, palette: UiPalette) {
    let personal = &app.registry.content().personal;
    let popup = centered_rect(60, 60, area);
    let mut lines = vec![
        Line::from(Span::styled(
            personal.name.clone(),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            personal.title.clone(),
            Style::default().fg(palette.muted),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Choose your experience:",
            Style::default().fg(palette.text),
        )),
        Line::default(),
    ];
    for (idx, (label, hint)) in LANDING_CHOICES.iter().enumerate() {
        let selected = idx == app.landing_selected;
        let marker = if selected { "▶ " } else { "  " };
        let mut label_style = Style::default().fg(palette.accent_alt);
        if selected {
            label_style = label_style.bg(palette.selected_bg).add_modifier(Modifier::BOLD);
        }
        lines.push(Line::from(vec![
            Span::styled(format!("{marker}{label}"), label_style),
            Span::styled(format!("  {hint}"), Style::default().fg(palette.muted)),
        ]));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "↑/↓ select · Enter open · q quit",
        Style::default().fg(palette.muted),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(" folio ");
    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        popup,
    );
}

fn render_console(
    f: &mut ratatui::Frame,
    area: Rect,
    app: &App,
    console: &ConsoleState,
    palette: UiPalette,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let mut lines = transcript_lines(console, &app.prompt, palette);
    if console.is_accepting() {
        let cursor = if (app.frame / 4) % 2 == 0 { "█" } else { " " };
        lines.push(Line::from(vec![
            Span::styled(
                app.prompt.clone(),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(console.input.clone(), Style::default().fg(palette.text)),
            Span::styled(cursor, Style::default().fg(palette.accent)),
        ]));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(format!(" {} ", app.prompt.trim_end_matches(['$', ' ', ':', '~'])));
    let inner = block.inner(chunks[0]);
    let max_scroll = wrapped_height(&lines, inner.width).saturating_sub(inner.height);
    let scroll = max_scroll.saturating_sub(app.scroll_back.min(max_scroll));
    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        chunks[0],
    );

    let hints = if console.is_accepting() {
        "Enter run · ↑/↓ history · PgUp/PgDn scroll · Esc quit"
    } else {
        "PgUp/PgDn scroll · Esc quit"
    };
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                format!(" {} ", console.phase.label()),
                Style::default().fg(palette.accent_alt),
            ),
            Span::styled(hints, Style::default().fg(palette.muted)),
        ])),
        chunks[1],
    );

    if console.matrix.active {
        f.render_widget(Clear, inner);
        f.render_widget(
            Paragraph::new(matrix_lines(inner.width, inner.height, app.frame, palette)),
            inner,
        );
    }
}

const MATRIX_GLYPHS: [char; 24] = [
    '0', '1', 'ｱ', 'ｲ', 'ｳ', 'ｴ', 'ｵ', 'ｶ', 'ｷ', 'ｸ', 'ｹ', 'ｺ', 'ﾊ', 'ﾐ', 'ﾋ', 'ｰ', 'ｼ', 'ﾅ',
    'ﾓ', 'ﾆ', 'ｻ', 'ﾜ', 'ﾂ', 'ﾘ',
];
const MATRIX_TRAIL: u64 = 8;

fn scramble(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}

/// Falling-glyph rain: one drop per column, head bright, trail fading.
fn matrix_lines(width: u16, height: u16, frame: u64, palette: UiPalette) -> Vec<Line<'static>> {
    let span = u64::from(height) + MATRIX_TRAIL;
    (0..height)
        .map(|row| {
            let spans: Vec<Span<'static>> = (0..width)
                .map(|col| {
                    let seed = scramble(u64::from(col));
                    let speed = 1 + seed % 3;
                    let head = (seed / 7 + frame * speed / 2) % span;
                    let row = u64::from(row);
                    if row > head || head - row >= MATRIX_TRAIL {
                        return Span::raw(" ");
                    }
                    let glyph_seed = scramble(seed ^ (row << 32) ^ (frame / 3));
                    let glyph = MATRIX_GLYPHS[(glyph_seed % MATRIX_GLYPHS.len() as u64) as usize];
                    let style = if row == head {
                        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
                    } else if head - row < MATRIX_TRAIL / 2 {
                        Style::default().fg(palette.success)
                    } else {
                        Style::default().fg(Color::DarkGray)
                    };
                    Span::styled(glyph.to_string(), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn section_title(title: &str, palette: UiPalette) -> Line<'static> {
    Line::from(Span::styled(
        title.to_uppercase(),
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD),
    ))
}

fn link_span(label: &str, palette: UiPalette) -> Span<'static> {
    Span::styled(
        label.to_string(),
        Style::default()
            .fg(palette.accent_alt)
            .add_modifier(Modifier::UNDERLINED),
    )
}

fn modern_lines(content: &PortfolioContent, palette: UiPalette) -> Vec<Line<'static>> {
    let personal = &content.personal;
    let text = Style::default().fg(palette.text);
    let muted = Style::default().fg(palette.muted);
    let mut lines = vec![
        Line::from(Span::styled(
            personal.name.clone(),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(personal.title.clone(), Style::default().fg(palette.accent_alt)),
            Span::styled(format!("  ·  {}", personal.location), muted),
        ]),
        Line::default(),
        Line::from(Span::styled(personal.bio.clone(), text)),
        Line::default(),
        section_title("About", palette),
    ];
    for item in &content.about {
        lines.push(Line::from(vec![
            Span::styled(format!("• {}: ", item.title), Style::default().fg(palette.accent_alt)),
            Span::styled(item.description.clone(), text),
        ]));
    }

    lines.push(Line::default());
    lines.push(section_title("Skills", palette));
    for (label, skills) in content.skills.categories() {
        if skills.is_empty() {
            continue;
        }
        lines.push(Line::from(Span::styled(
            format!("{label}:"),
            Style::default().fg(palette.accent_alt),
        )));
        for skill in skills {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<16}", skill.name), text),
                Span::styled(skill_bar(skill.level), Style::default().fg(palette.success)),
                Span::styled(format!(" {}%", skill.level), muted),
            ]));
        }
    }

    lines.push(Line::default());
    lines.push(section_title("Projects", palette));
    for project in &content.projects {
        let mut heading = vec![Span::styled(
            project.title.clone(),
            Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
        )];
        if let Some(category) = project.category.as_deref() {
            heading.push(Span::styled(format!("  [{category}]"), muted));
        }
        lines.push(Line::from(heading));
        lines.push(Line::from(Span::styled(project.description.clone(), text)));
        if !project.tech_stack.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("Tech: {}", project.tech_stack.join(", ")),
                muted,
            )));
        }
        let mut links = Vec::new();
        if let Some(live) = project.live_link() {
            links.push(Span::styled("Live: ", muted));
            links.push(link_span(live, palette));
            links.push(Span::raw("  "));
        }
        if let Some(github) = project.github_link() {
            links.push(Span::styled("GitHub: ", muted));
            links.push(link_span(github, palette));
        }
        if !links.is_empty() {
            lines.push(Line::from(links));
        }
        lines.push(Line::default());
    }

    lines.push(section_title("Experience", palette));
    for job in &content.experience {
        lines.push(Line::from(vec![
            Span::styled(job.date.clone(), Style::default().fg(palette.accent_alt)),
            Span::raw("  "),
            Span::styled(
                format!("{} @ {}", job.title, job.organization),
                Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(Span::styled(job.description.clone(), text)));
        if !job.skills.is_empty() {
            lines.push(Line::from(Span::styled(job.skills.join(" · "), muted)));
        }
        lines.push(Line::default());
    }

    let social = &personal.social;
    lines.push(section_title("Contact", palette));
    for (label, value) in [
        ("Email", personal.email.as_str()),
        ("Phone", personal.phone.as_str()),
        ("GitHub", social.github.as_str()),
        ("LinkedIn", social.linkedin.as_str()),
        ("Instagram", social.instagram.as_str()),
        ("Resume", personal.resume.as_str()),
    ] {
        lines.push(Line::from(vec![
            Span::styled(format!("{label:<10}"), muted),
            link_span(value, palette),
        ]));
    }
    lines
}

fn render_modern(f: &mut ratatui::Frame, area: Rect, app: &App, palette: UiPalette) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let lines = modern_lines(app.registry.content(), palette);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(" overview ");
    let inner = block.inner(chunks[0]);
    let max_scroll = wrapped_height(&lines, inner.width).saturating_sub(inner.height);
    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((app.modern_scroll.min(max_scroll), 0)),
        chunks[0],
    );
    f.render_widget(
        Paragraph::new(Span::styled(
            " ↑/↓ scroll · t terminal · Esc back",
            Style::default().fg(palette.muted),
        )),
        chunks[1],
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
