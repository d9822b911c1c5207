use anyhow::Result;
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use serde_json::Value;
use std::io::{self, Write};

/// Color scheme for terminal output.
struct Colors;

impl Colors {
    const HEADER: Color = Color::Magenta;
    const DOC_PATH: Color = Color::Cyan;
    const INFO: Color = Color::Green;
    const ERROR: Color = Color::Red;
    const DIM: Color = Color::DarkGrey;
}

/// Renders command output to the terminal.
pub struct Terminal;

impl Terminal {
    /// Create a new terminal handler.
    pub fn new() -> Self {
        Self
    }

    /// Print a section header with a rule underneath.
    pub fn print_header(&self, title: &str) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            SetForegroundColor(Colors::HEADER),
            Print(title),
            Print("\n"),
            SetForegroundColor(Colors::DIM),
            Print("=".repeat(50)),
            Print("\n"),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Print an informational line.
    pub fn print_info(&self, text: &str) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            SetForegroundColor(Colors::INFO),
            Print(text),
            Print("\n"),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Print a dimmed line.
    pub fn print_dim(&self, text: &str) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            SetForegroundColor(Colors::DIM),
            Print(text),
            Print("\n"),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Print a line without coloring. Tool text payloads are shown as-is.
    pub fn print_plain(&self, text: &str) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(stdout, Print(text), Print("\n"))?;
        stdout.flush()?;
        Ok(())
    }

    /// Print an error message.
    pub fn print_error(&self, text: &str) -> Result<()> {
        let mut stderr = io::stderr();
        execute!(
            stderr,
            SetForegroundColor(Colors::ERROR),
            Print("Error: "),
            Print(text),
            Print("\n"),
            ResetColor,
        )?;
        stderr.flush()?;
        Ok(())
    }

    /// Pretty-print a JSON value.
    pub fn print_json(&self, value: &Value) -> Result<()> {
        let rendered = serde_json::to_string_pretty(value)?;
        let mut stdout = io::stdout();
        execute!(stdout, Print(rendered), Print("\n"))?;
        stdout.flush()?;
        Ok(())
    }

    /// Print a document block: colored path, rule, then the fields.
    pub fn print_document(&self, path: &str, fields: &Value) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            Print("\n"),
            SetForegroundColor(Colors::DOC_PATH),
            Print(path),
            Print("\n"),
            SetForegroundColor(Colors::DIM),
            Print("-".repeat(40)),
            Print("\n"),
            ResetColor,
        )?;
        stdout.flush()?;
        self.print_json(fields)
    }

    /// Print a bullet list item with an optional dimmed detail line.
    pub fn print_item(&self, label: &str, detail: Option<&str>) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(stdout, Print(format!("* {}\n", label)))?;
        if let Some(detail) = detail {
            execute!(
                stdout,
                SetForegroundColor(Colors::DIM),
                Print(format!("  {}\n", detail)),
                ResetColor,
            )?;
        }
        stdout.flush()?;
        Ok(())
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}
