use std::io::{self, Stdout, Write};

use termion::raw::{IntoRawMode, RawTerminal};

use crate::display::Display;

/// raw mode の端末。drop 時に画面を消して元のモードに戻す
pub struct Terminal {
    stdout: RawTerminal<Stdout>,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let stdout = io::stdout().into_raw_mode()?;
        let mut terminal = Self { stdout };
        terminal.clear_screen()?;
        Ok(terminal)
    }

    pub fn clear_screen(&mut self) -> io::Result<()> {
        write!(
            self.stdout,
            "{}{}",
            termion::clear::All,
            termion::cursor::Goto(1, 1)
        )?;
        self.stdout.flush()
    }
}

impl Display for Terminal {
    fn size(&self) -> io::Result<(u16, u16)> {
        termion::terminal_size()
    }

    fn goto(&mut self, row: u16, col: u16) -> io::Result<()> {
        // termion は 1 始まり
        write!(
            self.stdout,
            "{}",
            termion::cursor::Goto(col.saturating_add(1), row.saturating_add(1))
        )
    }

    fn write_str(&mut self, text: &str) -> io::Result<()> {
        write!(self.stdout, "{text}")
    }

    fn clear_eol(&mut self) -> io::Result<()> {
        write!(self.stdout, "{}", termion::clear::UntilNewline)
    }

    fn set_inverse(&mut self, inverse: bool) -> io::Result<()> {
        if inverse {
            write!(self.stdout, "{}", termion::style::Invert)
        } else {
            write!(self.stdout, "{}", termion::style::Reset)
        }
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        write!(self.stdout, "{}", termion::cursor::Hide)
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        write!(self.stdout, "{}", termion::cursor::Show)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        // 終了時の画面クリア
        let _ = self.clear_screen();
    }
}
