//! Logging for the game, through the [`log`] macros and [`env_logger`].
//!
//! The game owns the terminal while it runs and log lines go to stderr, so
//! only warnings and errors are shown unless `LOG_LEVEL` asks for more.
//! Send stderr elsewhere to read the rest: `LOG_LEVEL=debug snake 2> snake.log`.

use std::io;

use env_logger::fmt::{Color, Formatter};
use log::{Level, Record};

/// Used when `LOG_LEVEL` is unset, in debug and release builds alike.
const LOG_LEVEL: &str = "warn";

const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// `auto`, `always` or `never`, as `env_logger` understands them.
const LOG_STYLE_ENV: &str = "LOG_STYLE";

const LOG_STYLE: &str = "auto";

/// Installs the global logger from `main`, before the terminal is taken over.
pub fn init_logger() {
    env_logger::Builder::from_env(
        env_logger::Env::default()
            .filter_or(LOG_LEVEL_ENV, LOG_LEVEL)
            .write_style_or(LOG_STYLE_ENV, LOG_STYLE),
    )
    .format(format)
    .init();
}

/// `LEVEL<tab>module: message`, with the level coloured.
fn format(buf: &mut Formatter, record: &Record<'_>) -> io::Result<()> {
    use std::io::Write;

    let mut style = buf.style();
    style.set_color(level_color(record.level())).set_bold(record.level() == Level::Error);

    writeln!(
        buf,
        "{}\t{}: {}",
        style.value(record.level()),
        record.target(),
        record.args()
    )
}

fn level_color(level: Level) -> Color {
    match level {
        Level::Error => Color::Red,
        Level::Warn => Color::Yellow,
        Level::Info => Color::Cyan,
        Level::Debug => Color::Magenta,
        Level::Trace => Color::Blue,
    }
}
