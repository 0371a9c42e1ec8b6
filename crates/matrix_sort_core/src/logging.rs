use std::{
    fmt::Arguments,
    fs::File,
    io::Write,
};

use env_logger::{Builder, Target, WriteStyle};
use log::Level;

use crate::{
    Error, Result,
    options::{LogFormat, SortOptions},
};

/// Installs the global logger described by the `--log-*` options.
pub fn init_logger(options: &SortOptions) -> Result<()> {
    let log_format = options.log_format;
    let log_timestamp = options.log_timestamp;

    let mut builder = Builder::new();
    builder
        .filter_level(options.log_level.to_filter())
        .write_style(WriteStyle::Never)
        .format(move |buf, record| {
            if log_timestamp {
                write!(buf, "{} ", buf.timestamp_millis())?;
            }
            writeln!(
                buf,
                "{}",
                render_line(log_format, record.level(), record.target(), record.args())
            )
        })
        .target(log_target(options)?);

    builder
        .try_init()
        .map_err(|e| Error::other(format!("logger init failed: {e}")))
}

fn log_target(options: &SortOptions) -> Result<Target> {
    let Some(log_path) = options.log_output_path() else {
        return Ok(Target::Stderr);
    };
    let log_file = File::create(log_path).map_err(|e| {
        Error::other(format!(
            "failed to create log output file {}: {e}",
            log_path.display()
        ))
    })?;
    Ok(Target::Pipe(Box::new(log_file)))
}

fn render_line(format: LogFormat, level: Level, target: &str, args: &Arguments<'_>) -> String {
    match format {
        LogFormat::Compact => format!("{} {args}", level_tag(level)),
        LogFormat::Pretty => format!("{} [{target}] {args}", level_tag(level)),
    }
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

#[cfg(test)]
mod tests {
    use log::Level;

    use super::{level_tag, render_line};
    use crate::options::LogFormat;

    #[test]
    fn level_tags_are_upper_case_names() {
        assert_eq!(level_tag(Level::Error), "ERROR");
        assert_eq!(level_tag(Level::Warn), "WARN");
        assert_eq!(level_tag(Level::Trace), "TRACE");
    }

    #[test]
    fn compact_lines_omit_target() {
        let line = render_line(
            LogFormat::Compact,
            Level::Info,
            "matrix_sort_core::pipeline",
            &format_args!("sort: n={}", 4),
        );
        assert_eq!(line, "INFO sort: n=4");
    }

    #[test]
    fn pretty_lines_include_target() {
        let line = render_line(
            LogFormat::Pretty,
            Level::Debug,
            "matrix_sort_core::pipeline",
            &format_args!("clean: removed={}", 1),
        );
        assert_eq!(line, "DEBUG [matrix_sort_core::pipeline] clean: removed=1");
    }
}
