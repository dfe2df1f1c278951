use ratatui::style::{Color, Style};
use time::{Date, Month};

/// Style for the help overlay, independent of the month themes.
pub(crate) const OVERLAY_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

/// Visual parameters for one calendar date: card background, the color of
/// the large day numeral, the color of the weekday name, and a decorative
/// emoji shown next to the weekday.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ThemeDescriptor {
    pub(crate) background: Color,
    pub(crate) day_text: Color,
    pub(crate) weekday_text: Color,
    pub(crate) emoji: &'static str,
}

/// One theme per month.  The array is indexed by `Month`, so every month has
/// exactly one entry and a missing mapping cannot be expressed at all.
///
/// Text colors are picked per month for contrast against the background:
/// dark text on the pale backgrounds, light text on the saturated ones.
static MONTH_THEMES: [ThemeDescriptor; 12] = [
    // January: snow — light numeral and near-black weekday on mid gray
    ThemeDescriptor {
        background: Color::Rgb(142, 142, 147),
        day_text: Color::Rgb(242, 242, 247),
        weekday_text: Color::Rgb(28, 28, 30),
        emoji: "⛄",
    },
    // February: deep pink numeral on pale pink
    ThemeDescriptor {
        background: Color::Rgb(255, 209, 220),
        day_text: Color::Rgb(199, 21, 133),
        weekday_text: Color::Rgb(61, 21, 30),
        emoji: "❤",
    },
    // March: dark green numeral on pale green
    ThemeDescriptor {
        background: Color::Rgb(200, 237, 205),
        day_text: Color::Rgb(27, 94, 32),
        weekday_text: Color::Rgb(21, 59, 31),
        emoji: "☘",
    },
    // April: purple numeral on pale purple
    ThemeDescriptor {
        background: Color::Rgb(221, 205, 235),
        day_text: Color::Rgb(106, 27, 154),
        weekday_text: Color::Rgb(49, 29, 69),
        emoji: "🌧",
    },
    // May: navy numeral on pale blue
    ThemeDescriptor {
        background: Color::Rgb(205, 225, 242),
        day_text: Color::Rgb(13, 71, 161),
        weekday_text: Color::Rgb(25, 39, 64),
        emoji: "🌺",
    },
    // June: both texts dark on pale yellow
    ThemeDescriptor {
        background: Color::Rgb(250, 240, 190),
        day_text: Color::Rgb(41, 41, 41),
        weekday_text: Color::Rgb(59, 54, 21),
        emoji: "🌤",
    },
    // July: the one saturated summer blue; pale numeral, near-black weekday
    ThemeDescriptor {
        background: Color::Rgb(66, 133, 244),
        day_text: Color::Rgb(205, 225, 242),
        weekday_text: Color::Rgb(20, 35, 70),
        emoji: "🏖",
    },
    // August: burnt-orange numeral on pale orange
    ThemeDescriptor {
        background: Color::Rgb(255, 224, 189),
        day_text: Color::Rgb(230, 81, 0),
        weekday_text: Color::Rgb(79, 44, 15),
        emoji: "⛱",
    },
    // September: straw numeral on faded red
    ThemeDescriptor {
        background: Color::Rgb(233, 175, 163),
        day_text: Color::Rgb(250, 240, 190),
        weekday_text: Color::Rgb(69, 26, 21),
        emoji: "🍁",
    },
    // October: orange numeral and light-gray weekday on near-black
    ThemeDescriptor {
        background: Color::Rgb(20, 20, 22),
        day_text: Color::Rgb(255, 149, 0),
        weekday_text: Color::Rgb(229, 229, 234),
        emoji: "👻",
    },
    // November: dark browns on pale brown
    ThemeDescriptor {
        background: Color::Rgb(222, 198, 172),
        day_text: Color::Rgb(78, 52, 46),
        weekday_text: Color::Rgb(59, 44, 30),
        emoji: "🦃",
    },
    // December: pale-green numeral and near-white weekday on holly red
    ThemeDescriptor {
        background: Color::Rgb(170, 60, 55),
        day_text: Color::Rgb(200, 237, 205),
        weekday_text: Color::Rgb(245, 245, 245),
        emoji: "🎄",
    },
];

pub(crate) fn month_theme(month: Month) -> &'static ThemeDescriptor {
    &MONTH_THEMES[usize::from(u8::from(month) - 1)]
}

/// A date with bespoke theming that takes precedence over its month's theme.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DayOverride {
    pub(crate) month: Month,
    pub(crate) day: u8,
    pub(crate) theme: ThemeDescriptor,
}

/// Maps a calendar date to a `ThemeDescriptor`.  Day-specific overrides are
/// consulted first; otherwise the month table decides.  Total for every
/// valid date, stateless between calls.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct ThemeResolver {
    overrides: Vec<DayOverride>,
}

impl ThemeResolver {
    pub(crate) fn new(overrides: Vec<DayOverride>) -> ThemeResolver {
        ThemeResolver { overrides }
    }

    pub(crate) fn resolve(&self, date: Date) -> &ThemeDescriptor {
        self.overrides
            .iter()
            .find(|o| o.month == date.month() && o.day == date.day())
            .map_or_else(|| month_theme(date.month()), |o| &o.theme)
    }
}
