//! Terminal output.

use std::io::Write;

use storyloom_foundation::{Color, Result};
use storyloom_host::{ListedChoice, Presenter};
use storyloom_storage::Gate;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const CLEAR: &str = "\x1b[2J\x1b[H";

/// A presenter that writes lines to a terminal or any other writer.
///
/// Colors are ANSI escapes. With colors off, output is plain text and
/// clearing the screen prints a blank line instead.
pub struct ConsolePresenter<W: Write> {
    out: W,
    color: bool,
    divider: String,
}

impl<W: Write> ConsolePresenter<W> {
    /// Creates a colored presenter.
    pub fn new(out: W) -> Self {
        Self {
            out,
            color: true,
            divider: "---------------------------".to_string(),
        }
    }

    /// Builder method to turn colors on or off.
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Builder method to set the divider drawn around the inventory.
    #[must_use]
    pub fn with_divider(mut self, divider: impl Into<String>) -> Self {
        self.divider = divider.into();
        self
    }

    /// Consumes the presenter, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, color: Option<Color>, text: &str) -> Result<()> {
        match color {
            Some(color) if self.color => {
                writeln!(self.out, "\x1b[{}m{text}{RESET}", ansi_code(color))?;
            }
            _ => writeln!(self.out, "{text}")?,
        }
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> Presenter for ConsolePresenter<W> {
    fn title(&mut self, title: &str) -> Result<()> {
        if self.color {
            writeln!(self.out, "{BOLD}{title}{RESET}")?;
        } else {
            writeln!(self.out, "{title}")?;
        }
        self.line(None, "")
    }

    fn narrative(&mut self, text: &str) -> Result<()> {
        self.line(None, text)
    }

    fn print(&mut self, text: &str, color: Option<Color>) -> Result<()> {
        self.line(color, text)
    }

    fn clear(&mut self) -> Result<()> {
        if self.color {
            write!(self.out, "{CLEAR}")?;
            self.out.flush()?;
            Ok(())
        } else {
            self.line(None, "")
        }
    }

    fn separator(&mut self, divider: &str) -> Result<()> {
        self.line(Some(Color::Yellow), divider)
    }

    fn inventory(&mut self, heading: &str, items: &[&str]) -> Result<()> {
        let divider = self.divider.clone();
        self.separator(&divider)?;
        self.line(Some(Color::DarkYellow), heading)?;
        for item in items {
            self.line(Some(Color::DarkYellow), &format!("• {item}"))?;
        }
        self.separator(&divider)
    }

    fn choices(&mut self, choices: &[ListedChoice]) -> Result<()> {
        for choice in choices {
            let color = match choice.gate {
                Gate::Open => None,
                Gate::Unlocked => Some(Color::Green),
                Gate::Locked => Some(Color::Red),
            };
            self.line(color, &format!("{}) {}", choice.number, choice.text))?;
        }
        Ok(())
    }

    fn notice(&mut self, text: &str) -> Result<()> {
        self.line(Some(Color::Magenta), text)
    }

    fn rejection(&mut self, text: &str) -> Result<()> {
        self.line(Some(Color::Red), text)
    }
}

/// SGR foreground code for a console color.
const fn ansi_code(color: Color) -> u8 {
    match color {
        Color::Black => 30,
        Color::DarkRed => 31,
        Color::DarkGreen => 32,
        Color::DarkYellow => 33,
        Color::DarkBlue => 34,
        Color::DarkMagenta => 35,
        Color::DarkCyan => 36,
        Color::Gray => 37,
        Color::DarkGray => 90,
        Color::Red => 91,
        Color::Green => 92,
        Color::Yellow => 93,
        Color::Blue => 94,
        Color::Magenta => 95,
        Color::Cyan => 96,
        Color::White => 97,
    }
}
