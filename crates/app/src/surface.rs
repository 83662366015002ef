use powerbar_config::Placement;
use powerbar_core::Result;
use std::io::{self, Stdout, Write};

/// Fallback width when neither the terminal nor `$COLUMNS` says otherwise.
pub const DEFAULT_WIDTH: usize = 80;

/// Where rendered lines end up.
pub trait Surface {
    /// Columns available to the bar.
    fn width(&self) -> usize;

    /// Replace the displayed bar with `line`.
    fn show(&mut self, line: &str, placement: Placement) -> Result<()>;

    /// Remove the bar.
    fn clear(&mut self) -> Result<()>;
}

/// Writes one line per render to a byte sink, stdout by default.
///
/// Line-oriented output has a single slot, so placement is not used here.
#[derive(Debug)]
pub struct LineSurface<W: Write = Stdout> {
    out: W,
}

impl LineSurface<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> LineSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.out, "{line}")?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> Surface for LineSurface<W> {
    fn width(&self) -> usize {
        terminal_width()
    }

    fn show(&mut self, line: &str, _placement: Placement) -> Result<()> {
        self.write_line(line)
    }

    fn clear(&mut self) -> Result<()> {
        self.write_line("")
    }
}

/// Width of the controlling terminal, else `$COLUMNS`, else [`DEFAULT_WIDTH`].
pub fn terminal_width() -> usize {
    crossterm::terminal::size()
        .ok()
        .map(|(columns, _)| columns as usize)
        .filter(|&columns| columns > 0)
        .or_else(|| columns_env(std::env::var("COLUMNS").ok().as_deref()))
        .unwrap_or(DEFAULT_WIDTH)
}

fn columns_env(raw: Option<&str>) -> Option<usize> {
    raw?.trim().parse::<usize>().ok().filter(|&columns| columns > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_surface_writes_lines() {
        let mut surface = LineSurface::new(Vec::new());
        surface.show("main │ gpt-5", Placement::AboveEditor).unwrap();
        surface.clear().unwrap();
        assert_eq!(String::from_utf8(surface.into_inner()).unwrap(), "main │ gpt-5\n\n");
    }

    #[test]
    fn columns_variable_must_be_positive() {
        assert_eq!(columns_env(Some("132")), Some(132));
        assert_eq!(columns_env(Some(" 90 ")), Some(90));
        assert_eq!(columns_env(Some("0")), None);
        assert_eq!(columns_env(Some("wide")), None);
        assert_eq!(columns_env(None), None);
    }

    #[test]
    fn terminal_width_is_never_zero() {
        assert!(terminal_width() > 0);
    }
}
