//! The output sink every handler prints through.
//!
//! Everything printed is captured so a whole invocation can be returned as a
//! string; a streaming sink additionally echoes to stdout as it goes.

use std::io::Write;

use console::{strip_ansi_codes, style};

use crate::locale::Locale;

#[derive(Debug)]
pub struct Output {
    captured: String,
    echo: bool,
    colored: bool,
    locale: Locale,
}

impl Output {
    /// Collects output without writing it anywhere.
    pub fn capturing(locale: Locale) -> Self {
        Output {
            captured: String::new(),
            echo: false,
            colored: true,
            locale,
        }
    }

    /// Collects output and mirrors it to stdout.
    pub fn streaming(locale: Locale) -> Self {
        Output {
            captured: String::new(),
            echo: true,
            colored: console::colors_enabled(),
            locale,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn is_colored(&self) -> bool {
        self.colored
    }

    pub fn is_streaming(&self) -> bool {
        self.echo
    }

    /// Writes `text` followed by a newline.
    pub fn print(&mut self, text: impl AsRef<str>) {
        self.write(text.as_ref());
        self.write("\n");
    }

    pub fn write(&mut self, text: impl AsRef<str>) {
        let text = if self.colored {
            text.as_ref().to_string()
        } else {
            strip_ansi_codes(text.as_ref()).into_owned()
        };
        if self.echo {
            let mut stdout = std::io::stdout().lock();
            // A closed pipe must not abort the handler.
            let _ = stdout.write_all(text.as_bytes());
            let _ = stdout.flush();
        }
        self.captured.push_str(&text);
    }

    /// Recoverable problems go to stderr and are never captured.
    pub fn warn(&self, text: impl AsRef<str>) {
        if self.colored {
            eprintln!("{}", style(text.as_ref()).yellow());
        } else {
            eprintln!("{}", strip_ansi_codes(text.as_ref()));
        }
    }

    pub fn captured(&self) -> &str {
        &self.captured
    }

    pub fn into_captured(self) -> String {
        self.captured
    }

    /// Runs `body` with a locale and colour setting that last for that call only.
    pub(crate) fn scoped<R>(
        &mut self,
        locale: Locale,
        colored: bool,
        body: impl FnOnce(&mut Output) -> R,
    ) -> R {
        let previous = (self.locale, self.colored);
        self.locale = locale;
        self.colored = colored;
        let result = body(self);
        (self.locale, self.colored) = previous;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_ansi_when_uncolored() {
        let mut out = Output::capturing(Locale::English);
        out.scoped(Locale::German, false, |o| {
            assert_eq!(o.locale(), Locale::German);
            o.print(style("red").red().force_styling(true).to_string());
        });
        assert_eq!(out.captured(), "red\n");
        assert_eq!(out.locale(), Locale::English);
        assert!(out.is_colored());
    }

    #[test]
    fn keeps_ansi_when_colored() {
        let mut out = Output::capturing(Locale::English);
        out.write(style("x").bold().force_styling(true).to_string());
        assert!(out.captured().contains('\u{1b}'));
    }
}
