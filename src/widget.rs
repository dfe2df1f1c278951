use crate::display::{day_display, weekday_display};
use crate::provider::DayEntry;
use crate::theme::ThemeDescriptor;
use ratatui::{prelude::*, widgets::*};

/// Rows taken up by the large numeral
const DIGIT_ROWS: u16 = 5;

/// Columns per numeral glyph
const DIGIT_WIDTH: u16 = 5;

/// Columns between adjacent numeral glyphs
const DIGIT_GAP: u16 = 1;

/// Blank rows between the weekday header and the numeral
const HEADER_GAP: u16 = 1;

/// Header line + gap + numeral rows
const CONTENT_HEIGHT: u16 = 2 + DIGIT_ROWS;

type Glyph = [&'static str; 5];

/// Heavyweight numerals for the default look.
static BLOCK_DIGITS: [Glyph; 10] = [
    ["█████", "█   █", "█   █", "█   █", "█████"],
    ["  █  ", " ██  ", "  █  ", "  █  ", "█████"],
    ["█████", "    █", "█████", "█    ", "█████"],
    ["█████", "    █", " ████", "    █", "█████"],
    ["█   █", "█   █", "█████", "    █", "    █"],
    ["█████", "█    ", "█████", "    █", "█████"],
    ["█████", "█    ", "█████", "█   █", "█████"],
    ["█████", "    █", "   █ ", "  █  ", "  █  "],
    ["█████", "█   █", "█████", "█   █", "█████"],
    ["█████", "█   █", "█████", "    █", "█████"],
];

/// Hand-drawn numerals for the fun font, the terminal stand-in for a
/// chalkboard typeface.
static CHALK_DIGITS: [Glyph; 10] = [
    [" ___ ", "|   |", "|   |", "|   |", "|___|"],
    ["  |  ", " /|  ", "  |  ", "  |  ", " _|_ "],
    [" ___ ", "    |", " ___|", "|    ", "|___ "],
    [" ___ ", "    |", " ___|", "    |", " ___|"],
    ["  /| ", " / | ", "/__|_", "   | ", "   | "],
    [" ___ ", "|    ", "|___ ", "    |", " ___|"],
    [" ___ ", "|    ", "|___ ", "|   |", "|___|"],
    [" ___ ", "    |", "   / ", "  /  ", " /   "],
    [" ___ ", "|   |", "|___|", "|   |", "|___|"],
    [" ___ ", "|   |", "|___|", "    |", " ___|"],
];

fn digit_glyph(fun_font: bool, ch: char) -> Option<&'static Glyph> {
    let set = if fun_font {
        &CHALK_DIGITS
    } else {
        &BLOCK_DIGITS
    };
    let idx = ch.to_digit(10)?;
    set.get(usize::try_from(idx).ok()?)
}

/// Renders one [`DayEntry`] as a widget card: the whole area is filled with
/// the theme background, a centered header line shows the emoji and weekday
/// name, and the day-of-month is drawn below as a large numeral.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DayCard<'a> {
    entry: &'a DayEntry,
    theme: &'a ThemeDescriptor,
}

impl<'a> DayCard<'a> {
    pub(crate) fn new(entry: &'a DayEntry, theme: &'a ThemeDescriptor) -> DayCard<'a> {
        DayCard { entry, theme }
    }

    fn text_style(&self, fg: Color) -> Style {
        let style = Style::new().fg(fg).add_modifier(Modifier::BOLD);
        if self.entry.fun_font {
            style.add_modifier(Modifier::ITALIC)
        } else {
            style
        }
    }
}

impl Widget for DayCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::new().bg(self.theme.background));
        let mut canvas = Canvas::new(area, buf);
        let top = area.height.saturating_sub(CONTENT_HEIGHT) / 2;

        let header = Line::from(vec![
            Span::raw(self.theme.emoji),
            Span::raw(" "),
            Span::styled(
                weekday_display(self.entry.date),
                self.text_style(self.theme.weekday_text),
            ),
        ]);
        let header_width = u16::try_from(header.width()).unwrap_or(u16::MAX);
        canvas.print_line(top, center(area.width, header_width), header);

        let day = day_display(self.entry.date);
        let glyphs = day
            .chars()
            .filter_map(|ch| digit_glyph(self.entry.fun_font, ch))
            .collect::<Vec<_>>();
        let glyph_qty = u16::try_from(glyphs.len()).unwrap_or(u16::MAX);
        let numeral_width = glyph_qty * DIGIT_WIDTH + glyph_qty.saturating_sub(1) * DIGIT_GAP;
        let x = center(area.width, numeral_width);
        let style = self.text_style(self.theme.day_text);
        for dy in 0..DIGIT_ROWS {
            let mut line = String::new();
            for (i, glyph) in glyphs.iter().enumerate() {
                if i > 0 {
                    line.push(' ');
                }
                line.push_str(glyph[usize::from(dy)]);
            }
            canvas.print(top + 1 + HEADER_GAP + dy, x, &line, style);
        }
    }
}

fn center(total: u16, width: u16) -> u16 {
    total.saturating_sub(width) / 2
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> Canvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn print(&mut self, y: u16, x: u16, s: &str, style: Style) {
        self.print_line(y, x, Line::styled(s.to_owned(), style));
    }

    // A Paragraph clips text that runs past the card's area; the Rect handed
    // to it must stay inside the frame or rendering panics.
    fn print_line(&mut self, y: u16, x: u16, line: Line<'_>) {
        if y < self.area.height && x < self.area.width {
            let width = u16::try_from(line.width()).unwrap_or(u16::MAX);
            Paragraph::new(line).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }
}
