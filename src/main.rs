mod app;
mod display;
mod help;
mod provider;
mod theme;
mod widget;
use crate::app::App;
use crate::provider::Config;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run { date: Option<Date>, config: Config },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut date = None;
        let mut config = Config::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('f') | Arg::Long("fun-font") => config.fun_font = Some(true),
                Arg::Value(value) if date.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run { date, config })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run { date, config } => {
                let reference = match date {
                    Some(d) => d.midnight().assume_utc(),
                    None => OffsetDateTime::now_local()
                        .context("failed to determine local time")?,
                };
                let snapshot = provider::snapshot(reference, &config);
                let timeline = provider::timeline(reference, &config)?;
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    let mut app = App::new(snapshot, timeline, config);
                    if date.is_some() {
                        app = app.pinned();
                    }
                    app.run(terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: daycard [--fun-font] [YYYY-MM-DD]");
                println!();
                println!("Terminal widget showing today's date with month-themed colors");
                println!();
                println!("Options:");
                println!("  -f, --fun-font    Draw the card with the decorative font");
                println!("  -h, --help        Display this help message and exit");
                println!("  -V, --version     Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
