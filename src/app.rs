use crate::help::Help;
use crate::provider::{self, Config, DateArithmeticError, DayEntry, RefreshPolicy, Timeline};
use crate::theme::{ThemeResolver, OVERLAY_STYLE};
use crate::widget::DayCard;
use anyhow::Context;
use crossterm::event::{self, read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::Backend, buffer::Buffer, layout::Rect, widgets::Widget, Terminal};
use std::io::{self, Write};
use std::time::Duration;
use time::{Date, OffsetDateTime};

/// How long to wait for input before checking whether the calendar day has
/// rolled over.
const TICK: Duration = Duration::from_secs(60);

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App {
    timeline: Timeline,
    config: Config,
    resolver: ThemeResolver,
    today: Date,
    cursor: usize,
    previewing: bool,
    pinned: bool,
    state: AppState,
}

impl App {
    /// `snapshot` is the host's immediate current-day entry; it seeds the
    /// app's notion of "today".
    pub(crate) fn new(snapshot: DayEntry, timeline: Timeline, config: Config) -> App {
        App {
            timeline,
            config,
            resolver: ThemeResolver::new(Vec::new()),
            today: snapshot.date,
            cursor: 0,
            previewing: false,
            pinned: false,
            state: AppState::Showing,
        }
    }

    /// Keep showing the starting date instead of following the clock.
    pub(crate) fn pinned(mut self) -> App {
        self.pinned = true;
        self
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> anyhow::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> anyhow::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if !event::poll(TICK)? {
            // No input before the tick elapsed; let the refresh policy run.
            return self.tick();
        }
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Showing => match key {
                KeyCode::Char('f') => self.toggle_fun_font(),
                KeyCode::Char('n') | KeyCode::Right => self.preview_next(),
                KeyCode::Char('p') | KeyCode::Left => self.preview_previous(),
                KeyCode::Char('0') | KeyCode::Home => {
                    self.back_to_today();
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Showing;
                true
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn toggle_fun_font(&mut self) -> bool {
        self.config.fun_font = Some(!self.config.fun_font());
        let Some(start) = self.timeline.entries().first().map(|e| e.date) else {
            return false;
        };
        match provider::timeline_from(start, &self.config) {
            Ok(timeline) => {
                self.timeline = timeline;
                true
            }
            Err(DateArithmeticError) => false,
        }
    }

    fn preview_next(&mut self) -> bool {
        if self.cursor + 1 < self.timeline.entries().len() {
            self.cursor += 1;
            self.previewing = true;
            true
        } else {
            false
        }
    }

    fn preview_previous(&mut self) -> bool {
        if let Some(cursor) = self.cursor.checked_sub(1) {
            self.cursor = cursor;
            self.previewing = true;
            true
        } else {
            false
        }
    }

    fn back_to_today(&mut self) {
        self.previewing = false;
        self.cursor = self.timeline.position_of(self.today).unwrap_or(0);
    }

    fn tick(&mut self) -> anyhow::Result<()> {
        if self.pinned {
            return Ok(());
        }
        let now = OffsetDateTime::now_local().context("failed to determine local time")?;
        self.refresh_if_due(now.date())?;
        Ok(())
    }

    /// Applies the timeline's refresh policy for the given current day:
    /// request a fresh window once the old one is exhausted, and keep the
    /// displayed entry in step with the clock unless the user is previewing.
    fn refresh_if_due(&mut self, today: Date) -> Result<(), DateArithmeticError> {
        self.today = today;
        let due = match self.timeline.policy() {
            RefreshPolicy::AtEnd => self.timeline.is_exhausted(today),
        };
        if due {
            self.timeline = provider::timeline_from(today, &self.config)?;
            self.cursor = 0;
            self.previewing = false;
        } else if !self.previewing {
            if let Some(i) = self.timeline.position_of(today) {
                self.cursor = i;
            }
        }
        Ok(())
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let entry = self
            .timeline
            .entries()
            .get(self.cursor)
            .copied()
            .unwrap_or_else(|| provider::placeholder(self.today));
        let theme = self.resolver.resolve(entry.date);
        DayCard::new(&entry, theme).render(area, buf);
        if self.state == AppState::Helping {
            Help(OVERLAY_STYLE).render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Showing,
    Helping,
    Quitting,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    fn app_at(day: Date) -> App {
        let config = Config::default();
        let timeline = provider::timeline_from(day, &config).unwrap();
        App::new(provider::placeholder(day), timeline, config)
    }

    #[test]
    fn test_toggle_fun_font_rebuilds_window() {
        let mut app = app_at(date!(2024 - 03 - 12));
        assert!(app.handle_key(KeyCode::Char('f')));
        assert!(app.timeline.entries().iter().all(|e| e.fun_font));
        assert_eq!(
            app.timeline.entries().first().map(|e| e.date),
            Some(date!(2024 - 03 - 12))
        );
        assert!(app.handle_key(KeyCode::Char('f')));
        assert!(app.timeline.entries().iter().all(|e| !e.fun_font));
    }

    #[test]
    fn test_preview_stays_within_window() {
        let mut app = app_at(date!(2024 - 03 - 12));
        assert!(!app.handle_key(KeyCode::Char('p')));
        for _ in 0..provider::LOOKAHEAD_DAYS - 1 {
            assert!(app.handle_key(KeyCode::Char('n')));
        }
        assert!(!app.handle_key(KeyCode::Char('n')));
        assert_eq!(app.cursor, provider::LOOKAHEAD_DAYS - 1);
        assert!(app.handle_key(KeyCode::Home));
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_refresh_follows_clock_within_window() {
        let mut app = app_at(date!(2024 - 12 - 30));
        app.refresh_if_due(date!(2025 - 01 - 02)).unwrap();
        assert_eq!(app.cursor, 3);
        assert_eq!(
            app.timeline,
            provider::timeline(datetime!(2024-12-30 00:00 UTC), &Config::default()).unwrap()
        );
    }

    #[test]
    fn test_refresh_rebuilds_exhausted_window() {
        let mut app = app_at(date!(2024 - 12 - 30));
        app.refresh_if_due(date!(2025 - 01 - 04)).unwrap();
        assert_eq!(app.cursor, 0);
        assert_eq!(
            app.timeline.entries().first().map(|e| e.date),
            Some(date!(2025 - 01 - 04))
        );
    }

    #[test]
    fn test_preview_not_disturbed_by_tick() {
        let mut app = app_at(date!(2024 - 12 - 30));
        assert!(app.handle_key(KeyCode::Char('n')));
        app.refresh_if_due(date!(2024 - 12 - 30)).unwrap();
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn test_help_dismissed_by_any_key() {
        let mut app = app_at(date!(2024 - 03 - 12));
        assert!(app.handle_key(KeyCode::Char('?')));
        assert_eq!(app.state, AppState::Helping);
        assert!(app.handle_key(KeyCode::Char('x')));
        assert_eq!(app.state, AppState::Showing);
    }

    #[test]
    fn test_quit() {
        let mut app = app_at(date!(2024 - 03 - 12));
        assert!(app.handle_key(KeyCode::Esc));
        assert!(app.quitting());
    }
}
