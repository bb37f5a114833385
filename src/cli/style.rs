//! Terminal styling for contact output
//!
//! Colours go through [`Tone`]; `owo-colors` decides per stream whether to
//! emit ANSI codes (`NO_COLOR`, `CLICOLOR`, `CLICOLOR_FORCE`, TTY).
//!
//! | Tone       | Look   | Stream | Used for                              |
//! |------------|--------|--------|---------------------------------------|
//! | `Accent`   | Cyan   | stdout | field names, setting keys, endpoint   |
//! | `Success`  | Green  | stdout | valid fields, accepted submissions    |
//! | `Error`    | Red    | stderr | invalid fields, failure notices       |
//! | `Warn`     | Yellow | stderr | dry-run banner                        |
//! | `Muted`    | Dim    | stdout | config sources, payload details       |
//! | `Emphasis` | Bold   | stdout | headings                              |

use contact_relay::config::ConfigSource;
use contact_relay::types::FieldState;
use indicatif::ProgressStyle;
use owo_colors::{OwoColorize, Style};
use std::fmt::{self, Display};
use std::sync::OnceLock;

pub use owo_colors::Stream;

/// Semantic colour role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Accent,
    Success,
    Error,
    Warn,
    Muted,
    Emphasis,
}

impl Tone {
    const fn style(self) -> Style {
        match self {
            Self::Accent => Style::new().cyan(),
            Self::Success => Style::new().green(),
            Self::Error => Style::new().red(),
            Self::Warn => Style::new().yellow(),
            Self::Muted => Style::new().dimmed(),
            Self::Emphasis => Style::new().bold(),
        }
    }

    /// Failures and warnings are reported on stderr
    const fn stream(self) -> Stream {
        match self {
            Self::Error | Self::Warn => Stream::Stderr,
            _ => Stream::Stdout,
        }
    }
}

/// A value rendered in a [`Tone`] when its stream supports colour
#[derive(Clone, Debug)]
pub struct Styled<T> {
    value: T,
    tone: Tone,
    stream: Stream,
}

impl<T> Styled<T> {
    const fn new(value: T, tone: Tone) -> Self {
        Self {
            value,
            tone,
            stream: tone.stream(),
        }
    }

    /// Detect colour support against stderr.
    #[must_use]
    pub const fn for_stderr(mut self) -> Self {
        self.stream = Stream::Stderr;
        self
    }

    /// Detect colour support against stdout.
    #[must_use]
    pub const fn for_stdout(mut self) -> Self {
        self.stream = Stream::Stdout;
        self
    }
}

impl<T: Display> Display for Styled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = self.tone.style();
        write!(
            f,
            "{}",
            self.value.if_supports_color(self.stream, |v| v.style(style))
        )
    }
}

/// Tone shortcuts for anything displayable
pub trait Stylize: Display {
    /// [`Tone::Accent`]
    fn accent(&self) -> Styled<&Self> {
        Styled::new(self, Tone::Accent)
    }

    /// [`Tone::Success`]
    fn success(&self) -> Styled<&Self> {
        Styled::new(self, Tone::Success)
    }

    /// [`Tone::Error`], on stderr
    fn error(&self) -> Styled<&Self> {
        Styled::new(self, Tone::Error)
    }

    /// [`Tone::Warn`], on stderr
    fn warn(&self) -> Styled<&Self> {
        Styled::new(self, Tone::Warn)
    }

    /// [`Tone::Muted`]
    fn muted(&self) -> Styled<&Self> {
        Styled::new(self, Tone::Muted)
    }

    /// [`Tone::Emphasis`]
    fn emphasis(&self) -> Styled<&Self> {
        Styled::new(self, Tone::Emphasis)
    }
}

impl<T: Display + ?Sized> Stylize for T {}

/// Marker printed before a field name
///
/// `Unchecked` renders as blank padding so columns line up.
pub const fn field_mark(state: FieldState) -> Styled<&'static str> {
    match state {
        FieldState::Valid => Styled::new("✓", Tone::Success),
        FieldState::Invalid => Styled::new("✗", Tone::Error),
        FieldState::Unchecked => Styled::new(" ", Tone::Muted),
    }
}

/// Marker for the outcome notice
pub const fn outcome_mark(accepted: bool) -> Styled<&'static str> {
    field_mark(if accepted {
        FieldState::Valid
    } else {
        FieldState::Invalid
    })
}

/// Separator between a setting and its value
pub const fn arrow() -> Styled<&'static str> {
    Styled::new("→", Tone::Accent)
}

/// Setting name padded to a fixed column
pub fn setting_key(key: &str) -> Styled<String> {
    Styled::new(format!("{key:<16}"), Tone::Accent)
}

/// `(flag)`, `(env CONTACT_ENDPOINT)` and so on
pub fn source_tag(source: ConfigSource) -> Styled<String> {
    Styled::new(format!("({source})"), Tone::Muted)
}

const fn hyperlink_stream(stream: Stream) -> supports_hyperlinks::Stream {
    match stream {
        Stream::Stdout => supports_hyperlinks::Stream::Stdout,
        Stream::Stderr => supports_hyperlinks::Stream::Stderr,
    }
}

/// `text` as an OSC 8 link to `target`, or plain `text` where unsupported
pub fn hyperlink(stream: Stream, text: &str, target: &str) -> String {
    if supports_hyperlinks::on(hyperlink_stream(stream)) {
        terminal_link::Link::new(text, target).to_string()
    } else {
        text.to_string()
    }
}

/// An email address linked as `mailto:`
pub fn mailto(stream: Stream, address: &str) -> String {
    hyperlink(stream, address, &format!("mailto:{address}"))
}

/// Spinner shown while waiting on verification or the relay
pub fn spinner_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg} {elapsed:.dim}")
                .expect("hardcoded spinner template is valid")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_streams() {
        assert!(matches!(Tone::Error.stream(), Stream::Stderr));
        assert!(matches!(Tone::Warn.stream(), Stream::Stderr));
        assert!(matches!(Tone::Accent.stream(), Stream::Stdout));
        assert!(matches!("x".error().for_stdout().stream, Stream::Stdout));
    }

    #[test]
    fn test_setting_key_is_padded() {
        assert_eq!(setting_key("endpoint").value, "endpoint        ");
    }

    #[test]
    fn test_source_tag_text() {
        assert_eq!(
            source_tag(ConfigSource::Env("CONTACT_ENDPOINT")).value,
            "(env CONTACT_ENDPOINT)"
        );
        assert_eq!(source_tag(ConfigSource::Flag).value, "(flag)");
    }

    #[test]
    fn test_field_marks() {
        assert_eq!(field_mark(FieldState::Valid).value, "✓");
        assert_eq!(field_mark(FieldState::Invalid).value, "✗");
        assert_eq!(outcome_mark(false).tone, Tone::Error);
    }
}
