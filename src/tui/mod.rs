//! Ratatui-based terminal UI.
//!
//! The TUI shows the three regional bar charts, the risk-level and
//! bed-availability indicators (revealed after a short "calculation"), the
//! tier guidance and the district colour bands.

use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::pipeline::{Dashboard, load_dashboard};
use crate::chart::ChartStyle;
use crate::domain::{ChartKind, DashboardConfig, RiskLevel, TierStatus};
use crate::error::AppError;
use crate::metrics::{classify_risk, occupancy_text};
use crate::page::{AdviceBoard, ButtonFeedback, FlashPhase, PageButton, Reveal, RevealPhase};

mod plotters_chart;

use plotters_chart::BarPlottersChart;

const IDLE_POLL: Duration = Duration::from_millis(250);
const BUSY_POLL: Duration = Duration::from_millis(50);
const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];
const DEBUG_DIR: &str = "debug";

/// Start the TUI.
pub fn run(config: DashboardConfig) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(config)?;
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Key bindings for the homepage buttons, by their class name on the page.
const BUTTON_KEYS: [(char, &str); 2] = [('s', "sign-up-button"), ('w', "download-button")];

/// Page state machines driven by the event loop.
#[derive(Debug, Default)]
struct PageState {
    risk: Reveal,
    availability: Reveal,
    advice: AdviceBoard,
    feedback: ButtonFeedback,
}

/// What the timed widgets look like at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Phases {
    risk: RevealPhase,
    availability: RevealPhase,
    sign_up: FlashPhase,
    download: FlashPhase,
}

impl PageState {
    fn phases(&self, now: Instant) -> Phases {
        Phases {
            risk: self.risk.phase(now),
            availability: self.availability.phase(now),
            sign_up: self.feedback.flash(PageButton::SignUp, now),
            download: self.feedback.flash(PageButton::Download, now),
        }
    }

    /// True while a spinner or flash still needs frames.
    fn is_animating(&self, now: Instant) -> bool {
        let p = self.phases(now);
        p.risk == RevealPhase::Loading
            || p.availability == RevealPhase::Loading
            || p.sign_up != FlashPhase::Steady
            || p.download != FlashPhase::Steady
    }

    /// How long the loop may wait for input without missing a phase change.
    fn poll_timeout(&self, now: Instant) -> Duration {
        let base = if self.is_animating(now) || self.feedback.is_pending() {
            BUSY_POLL
        } else {
            IDLE_POLL
        };
        [self.risk.next_deadline(now), self.availability.next_deadline(now)]
            .into_iter()
            .flatten()
            .map(|deadline| deadline.saturating_duration_since(now))
            .fold(base, Duration::min)
    }

    fn reset_reveals(&mut self) {
        self.risk.cancel();
        self.availability.cancel();
    }
}

struct App {
    config: DashboardConfig,
    dashboard: Dashboard,
    status: String,
    page: PageState,
    started: Instant,
}

impl App {
    fn new(config: DashboardConfig) -> Result<Self, AppError> {
        let dashboard = load_dashboard(&config)?;
        Ok(Self {
            status: format!("Loaded {}.", config.region),
            config,
            dashboard,
            page: PageState::default(),
            started: Instant::now(),
        })
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        let mut drawn: Option<Phases> = None;
        loop {
            let now = Instant::now();
            if let Some(notice) = self.page.feedback.take_notice(now) {
                self.status = notice.to_string();
                needs_redraw = true;
            }
            // Spinner frames, plus the first frame of every new phase.
            let phases = self.page.phases(now);
            if self.page.is_animating(now) || drawn != Some(phases) {
                needs_redraw = true;
            }

            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
                drawn = Some(phases);
            }

            let timeout = self.page.poll_timeout(now);
            if !event::poll(timeout).map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> bool {
        let now = Instant::now();
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('k') => {
                if self.page.risk.trigger(now) {
                    self.status = "Calculating risk level...".to_string();
                }
            }
            KeyCode::Char('b') => {
                if self.page.availability.trigger(now) {
                    self.status = "Checking hospital availability...".to_string();
                }
            }
            KeyCode::Char('c') => {
                self.page.reset_reveals();
                self.status = "Indicators reset.".to_string();
            }
            KeyCode::Char('t') | KeyCode::Right => self.step_tier(true),
            KeyCode::Left => self.step_tier(false),
            KeyCode::Char('r') => self.reload(),
            KeyCode::Char('d') => match crate::debug::write_debug_bundle(&self.dashboard, Path::new(DEBUG_DIR)) {
                Ok(path) => {
                    self.status = format!("Wrote debug bundle: {}", path.display());
                }
                Err(err) => {
                    self.status = format!("Debug write failed: {err}");
                }
            },
            KeyCode::Char(c) => {
                if let Some((_, class)) = BUTTON_KEYS.iter().find(|(key, _)| *key == c) {
                    self.page.feedback.press_class(class, now);
                }
            }
            _ => {}
        }
        false
    }

    fn step_tier(&mut self, forward: bool) {
        let tier = match self.page.advice.selected() {
            None => TierStatus::Tier1,
            Some(t) if forward => t.next(),
            Some(t) => t.prev(),
        };
        self.page.advice.select_tier(tier);
        self.status = self.page.advice.header().to_string();
    }

    fn reload(&mut self) {
        self.status = "Reloading data...".to_string();
        match load_dashboard(&self.config) {
            Ok(dashboard) => {
                self.dashboard = dashboard;
                self.page.reset_reveals();
                self.status = format!("Reloaded {}.", self.config.region);
            }
            Err(err) => {
                tracing::warn!(%err, "reload failed");
                self.status = format!("Reload failed: {err}");
            }
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let line = Line::from(vec![
            Span::styled("cvd", Style::default().fg(Color::Cyan)),
            Span::raw(format!(" - {} COVID-19 dashboard", self.config.region)),
            Span::styled(
                format!(" | {}", self.page.advice.header()),
                Style::default().fg(Color::Gray),
            ),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(area);

        let charts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(columns[0]);
        for (kind, rect) in ChartKind::ALL.into_iter().zip(charts.iter()) {
            self.draw_chart(frame, *rect, kind);
        }

        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(8), Constraint::Min(6), Constraint::Length(8)])
            .split(columns[1]);
        self.draw_indicators(frame, side[0]);
        self.draw_advice(frame, side[1]);
        self.draw_districts(frame, side[2]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect, kind: ChartKind) {
        let style = ChartStyle::for_kind(kind);
        let series = self.dashboard.series(kind);
        let block = Block::default()
            .title(style.title(&self.config.region))
            .title_bottom(kind.caption(series.latest().value))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let values = series.values();
        let labels = series.labels();
        let y_max = (series.max_value().max(1) as f64) * 1.05;
        let widget = BarPlottersChart {
            values: &values,
            labels: &labels,
            y_max,
            bar_color: style.bar_rgb,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_indicators(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let now = Instant::now();
        let mut lines: Vec<Line> = Vec::new();

        lines.push(Line::from(Span::styled("Risk level", Style::default().add_modifier(Modifier::BOLD))));
        lines.extend(self.reveal_lines(&self.page.risk, now, "[k] Show risk level", || self.risk_lines()));

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Hospital availability",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.extend(self.reveal_lines(&self.page.availability, now, "[b] Show bed availability", || {
            vec![match self.dashboard.occupancy() {
                Ok(pct) => Line::from(occupancy_text(pct)),
                Err(e) => Line::from(Span::styled(
                    format!("Unavailable: {e}"),
                    Style::default().fg(Color::Yellow),
                )),
            }]
        }));

        let p = Paragraph::new(Text::from(lines))
            .block(Block::default().title("Indicators").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn reveal_lines<'a>(
        &self,
        reveal: &Reveal,
        now: Instant,
        button: &'a str,
        result: impl FnOnce() -> Vec<Line<'a>>,
    ) -> Vec<Line<'a>> {
        match reveal.phase(now) {
            RevealPhase::Idle => vec![Line::from(Span::styled(button, Style::default().fg(Color::Cyan)))],
            RevealPhase::Loading => {
                let frame_idx = (now.duration_since(self.started).as_millis() / 100) as usize % SPINNER.len();
                vec![Line::from(format!("{} calculating...", SPINNER[frame_idx]))]
            }
            RevealPhase::Settling => vec![Line::from("")],
            RevealPhase::Revealed => result(),
        }
    }

    fn risk_lines(&self) -> Vec<Line<'static>> {
        match self.dashboard.infection_metrics().weekly_delta {
            Ok(delta) => {
                let level = classify_risk(delta);
                vec![
                    Line::from(vec![
                        Span::styled(level.display_name(), Style::default().fg(risk_color(level)).add_modifier(Modifier::BOLD)),
                        Span::raw(format!(" ({delta:+.2}% this week)")),
                    ]),
                    Line::from(Span::styled(
                        "What does this mean? [t] government guidelines",
                        Style::default().fg(Color::Gray),
                    )),
                ]
            }
            Err(e) => vec![Line::from(Span::styled(
                format!("Unavailable: {e}"),
                Style::default().fg(Color::Yellow),
            ))],
        }
    }

    fn draw_advice(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let now = Instant::now();
        let mut lines: Vec<Line> = Vec::new();

        let menu: Vec<Span> = TierStatus::ALL
            .into_iter()
            .map(|tier| {
                let style = if self.page.advice.is_visible(tier) {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                Span::styled(format!("[{}] ", tier.display_name()), style)
            })
            .collect();
        lines.push(Line::from(menu));

        let guidance = self.page.advice.visible_guidance();
        if guidance.is_empty() {
            lines.push(Line::from(Span::styled(
                "[t] choose a tier to see its rules",
                Style::default().fg(Color::Gray),
            )));
        }
        for g in guidance {
            lines.push(Line::from(format!("• {g}")));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            button_span("[s] Subscribe", self.page.feedback.flash(PageButton::SignUp, now)),
            Span::raw("  "),
            button_span("[w] Download app", self.page.feedback.flash(PageButton::Download, now)),
        ]));

        let p = Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: true })
            .block(Block::default().title(self.page.advice.header().to_string()).borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_districts(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Districts").borders(Borders::ALL);
        let Some(map) = &self.dashboard.districts else {
            let p = match &self.dashboard.map_error {
                Some(err) => Paragraph::new(format!("District map unavailable: {err}"))
                    .style(Style::default().fg(Color::Yellow))
                    .wrap(Wrap { trim: true }),
                None => Paragraph::new("No district map loaded.").style(Style::default().fg(Color::Gray)),
            }
            .block(block);
            frame.render_widget(p, area);
            return;
        };

        let lines: Vec<Line> = map
            .band_counts()
            .into_iter()
            .map(|(band, count)| {
                let (r, g, b) = band.rgb();
                Line::from(vec![
                    Span::styled("██ ", Style::default().fg(Color::Rgb(r, g, b))),
                    Span::raw(format!("{:<12} {count}", band.range_label())),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "k risk  b beds  c reset  t/←/→ tier  s/w buttons  r reload  d debug  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn risk_color(level: RiskLevel) -> Color {
    match level {
        RiskLevel::Low => Color::Green,
        RiskLevel::Medium => Color::Yellow,
        RiskLevel::High => Color::Red,
    }
}

fn button_span(text: &'static str, phase: FlashPhase) -> Span<'static> {
    let style = match phase {
        FlashPhase::FadingOut => Style::default().fg(Color::DarkGray),
        FlashPhase::FadingIn => Style::default().fg(Color::Gray),
        FlashPhase::Steady => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    };
    Span::styled(text, style)
}
