use std::borrow::Cow;
use std::io;

use crate::EDITOR_LABEL;
use crate::buffer::Buffer;
use crate::display::Display;
use crate::layout;
use crate::viewport::Viewport;

pub struct Screen;

impl Screen {
    /// バイトの表示形式。タブは `col` から次のタブストップまでの空白
    pub fn glyph(byte: u8, col: usize) -> Cow<'static, str> {
        match byte {
            b'\t' => Cow::Owned(" ".repeat(layout::glyph_width(byte, col))),
            b'\r' | b'\n' => Cow::Borrowed(""),
            0x20..=0x7e => Cow::Owned(char::from(byte).to_string()),
            0x00..=0x1f | 0x7f => Cow::Owned(format!("^{}", char::from(byte ^ 0x40))),
            _ => Cow::Owned(format!("\\x{byte:02X}")),
        }
    }

    /// `page` から描画し、`epage` とカーソル位置を更新する
    pub fn draw_rows(
        display: &mut impl Display,
        buffer: &Buffer,
        viewport: &mut Viewport,
    ) -> io::Result<()> {
        let rows = viewport.rows();
        let cols = viewport.cols();
        let point = buffer.point();

        let mut row = 0;
        let mut col = 0;
        let mut offset = viewport.page();
        display.goto(0, 0)?;

        loop {
            // カーソル位置を記録
            if offset == point {
                let (cursor_row, cursor_col) = Self::cursor_at(buffer, offset, row, col, cols);
                viewport.cursor_mut().set(cursor_row, cursor_col);
            }
            if rows <= row {
                break;
            }
            let Some(byte) = buffer.byte_at(offset) else {
                break;
            };

            match byte {
                b'\n' => {
                    display.clear_eol()?;
                    row += 1;
                    col = 0;
                    if row < rows {
                        display.goto(row as u16, 0)?;
                    }
                }
                // 読み込んだファイルの CR は表示しない
                b'\r' => {}
                _ => {
                    let (wrap, next) = layout::place(col, byte, cols);
                    if wrap {
                        display.clear_eol()?;
                        row += 1;
                        col = 0;
                        if rows <= row {
                            break;
                        }
                        display.goto(row as u16, 0)?;
                    }
                    let glyph = Self::glyph(byte, col);
                    // タブは折り返し幅で打ち切る
                    let visible = glyph.len().min(next - col);
                    display.write_str(&glyph[..visible])?;
                    col = next;
                }
            }
            offset += 1;
        }
        viewport.set_epage(offset);

        // 残りの行を消去
        if row < rows {
            display.clear_eol()?;
            for r in row + 1..rows {
                display.goto(r as u16, 0)?;
                display.clear_eol()?;
            }
        }

        viewport.cursor_mut().clamp(rows, cols);
        Ok(())
    }

    /// `offset` に到達したときのカーソルの画面位置
    fn cursor_at(
        buffer: &Buffer,
        offset: usize,
        row: usize,
        col: usize,
        cols: usize,
    ) -> (usize, usize) {
        match buffer.byte_at(offset) {
            Some(b'\n') => (row, col),
            Some(byte) if layout::place(col, byte, cols).0 => (row + 1, 0),
            None if 0 < col && cols <= col => (row + 1, 0),
            _ => (row, col),
        }
    }

    /// ステータスバー (反転表示)
    ///
    /// `=* zmacs: == filename ====` の 2 文字目が変更の有無を表す
    pub fn draw_status_bar(
        display: &mut impl Display,
        row: usize,
        cols: usize,
        filename: &str,
        modified: bool,
    ) -> io::Result<()> {
        let mark = if modified { '*' } else { '=' };
        let mut status = format!("={mark} {EDITOR_LABEL} == {filename} ");
        let padding = cols.saturating_sub(status.chars().count());
        status.push_str(&"=".repeat(padding));
        let status: String = status.chars().take(cols).collect();

        display.goto(row as u16, 0)?;
        display.set_inverse(true)?;
        display.write_str(&status)?;
        display.set_inverse(false)?;
        Ok(())
    }

    pub fn draw_command_line(display: &mut impl Display, row: usize, message: &str) -> io::Result<()> {
        display.goto(row as u16, 0)?;
        display.write_str(message)?;
        display.clear_eol()?;
        Ok(())
    }

    /// 画面全体を再描画する
    ///
    /// 描画前に端末サイズを取り直し、表示範囲を調整する
    pub fn refresh(
        display: &mut impl Display,
        buffer: &Buffer,
        viewport: &mut Viewport,
        filename: &str,
        message: &str,
    ) -> io::Result<()> {
        let (cols, rows) = display.size()?;
        viewport.resize(cols, rows);
        viewport.reframe(buffer);

        display.hide_cursor()?;
        Self::draw_rows(display, buffer, viewport)?;
        Self::draw_status_bar(
            display,
            viewport.rows(),
            viewport.cols(),
            filename,
            buffer.is_modified(),
        )?;
        Self::draw_command_line(display, viewport.rows() + 1, message)?;

        let cursor = viewport.cursor();
        display.goto(cursor.row() as u16, cursor.col() as u16)?;
        display.show_cursor()?;
        display.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::GridDisplay;

    fn render(text: &[u8], point: usize, cols: u16, rows: u16) -> (GridDisplay, Viewport) {
        let mut buffer = Buffer::from_bytes(text).unwrap();
        buffer.set_point(point);
        let mut display = GridDisplay::new(cols, rows);
        let mut viewport = Viewport::new(cols, rows);
        Screen::refresh(&mut display, &buffer, &mut viewport, "test.txt", "").unwrap();
        (display, viewport)
    }

    #[test]
    fn test_glyph() {
        assert_eq!(Screen::glyph(b'a', 0), "a");
        assert_eq!(Screen::glyph(b'\t', 3), "     ");
        assert_eq!(Screen::glyph(0x01, 0), "^A");
        assert_eq!(Screen::glyph(0x7f, 0), "^?");
        assert_eq!(Screen::glyph(0xe9, 0), "\\xE9");
        assert_eq!(Screen::glyph(b'\r', 0), "");
    }

    #[test]
    fn test_draw_plain_lines() {
        let (display, viewport) = render(b"hello\nworld\n", 0, 20, 6);
        assert_eq!(display.line(0), "hello");
        assert_eq!(display.line(1), "world");
        assert_eq!(display.line(2), "");
        assert_eq!(viewport.epage(), 12);
        assert_eq!(display.cursor(), (0, 0));
    }

    #[test]
    fn test_redraw_clears_previous_text() {
        let mut display = GridDisplay::new(10, 7);
        let long = Buffer::from_bytes(b"hello\nworld\nabcdefghijklmnop\nmore").unwrap();
        let mut viewport = Viewport::new(10, 7);
        Screen::refresh(&mut display, &long, &mut viewport, "test.txt", "message").unwrap();
        assert_eq!(display.line(3), "klmnop");
        assert_eq!(display.line(4), "more");
        assert_eq!(display.line(6), "message");

        // 短い内容で描き直すと古い文字は残らない
        let short = Buffer::from_bytes(b"hi\nabc").unwrap();
        let mut viewport = Viewport::new(10, 7);
        Screen::refresh(&mut display, &short, &mut viewport, "test.txt", "").unwrap();
        assert_eq!(display.line(0), "hi");
        assert_eq!(display.line(1), "abc");
        for row in 2..5 {
            assert_eq!(display.line(row), "", "row {row}");
        }
        assert_eq!(display.line(6), "");
    }

    #[test]
    fn test_draw_tabs_and_wrap() {
        let (display, _) = render(b"ab\tcd\nefgh", 0, 10, 6);
        assert_eq!(display.line(0), "ab      cd");
        assert_eq!(display.line(1), "efgh");
    }

    #[test]
    fn test_draw_long_line_wraps() {
        let (display, viewport) = render(b"abcdefghijklmno", 12, 10, 6);
        assert_eq!(display.line(0), "abcdefghij");
        assert_eq!(display.line(1), "klmno");
        assert_eq!((viewport.cursor().row(), viewport.cursor().col()), (1, 2));
    }

    #[test]
    fn test_control_bytes_take_columns() {
        let (display, viewport) = render(b"a\x01b\rc", 5, 20, 6);
        // CR は表示されず幅も持たない
        assert_eq!(display.line(0), "a^Abc");
        assert_eq!(viewport.cursor().col(), 5);
    }

    #[test]
    fn test_cursor_after_full_width_line_at_end() {
        let (_, viewport) = render(b"abcdefghij", 10, 10, 6);
        assert_eq!((viewport.cursor().row(), viewport.cursor().col()), (1, 0));
    }

    #[test]
    fn test_status_bar_and_message() {
        let mut buffer = Buffer::from_bytes(b"x").unwrap();
        buffer.insert_byte(b'y').unwrap();
        let mut display = GridDisplay::new(30, 5);
        let mut viewport = Viewport::new(30, 5);

        Screen::refresh(&mut display, &buffer, &mut viewport, "a.txt", "Mark set").unwrap();

        assert_eq!(display.line(3), "=* zmacs: == a.txt ===========");
        assert_eq!(display.line(4), "Mark set");
        assert_eq!(display.flushed, 1);
    }

    #[test]
    fn test_stops_at_window_bottom() {
        let text: String = (0..10).map(|i| format!("{i}\n")).collect();
        let (display, viewport) = render(text.as_bytes(), 0, 10, 5);
        // テキスト領域は 3 行
        assert_eq!(display.line(0), "0");
        assert_eq!(display.line(2), "2");
        assert_eq!(viewport.epage(), 6);
    }

    #[test]
    fn test_scrolls_when_point_below_window() {
        let text: String = (0..10).map(|i| format!("{i}\n")).collect();
        let (display, viewport) = render(text.as_bytes(), 14, 10, 5);
        // point は "7" の行
        assert_eq!(display.line(0), "5");
        assert_eq!(display.line(2), "7");
        assert_eq!(viewport.cursor().row(), 2);
    }
}
