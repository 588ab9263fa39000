use std::io;

/// 描画先となる `rows x cols` の文字グリッド
///
/// 座標は 0 始まりで (行, 列)
pub trait Display {
    /// 現在の大きさ (列数, 行数)
    fn size(&self) -> io::Result<(u16, u16)>;

    fn goto(&mut self, row: u16, col: u16) -> io::Result<()>;

    /// 現在位置から書き込む。行末を超えた分は捨てる
    fn write_str(&mut self, text: &str) -> io::Result<()>;

    /// 現在位置から行末までを消去
    fn clear_eol(&mut self) -> io::Result<()>;

    /// 反転表示の切り替え
    fn set_inverse(&mut self, _inverse: bool) -> io::Result<()> {
        Ok(())
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()>;
}

/// テスト用のメモリ上のグリッド
#[cfg(test)]
#[derive(Debug)]
pub struct GridDisplay {
    cells: Vec<Vec<char>>,
    row: usize,
    col: usize,
    pub flushed: usize,
}

#[cfg(test)]
impl GridDisplay {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cells: vec![vec![' '; usize::from(cols)]; usize::from(rows)],
            row: 0,
            col: 0,
            flushed: 0,
        }
    }

    /// 行の内容 (末尾の空白は除く)
    pub fn line(&self, row: usize) -> String {
        self.cells[row].iter().collect::<String>().trim_end().to_string()
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }
}

#[cfg(test)]
impl Display for GridDisplay {
    fn size(&self) -> io::Result<(u16, u16)> {
        let rows = self.cells.len();
        let cols = self.cells.first().map_or(0, Vec::len);
        Ok((cols as u16, rows as u16))
    }

    fn goto(&mut self, row: u16, col: u16) -> io::Result<()> {
        self.row = usize::from(row);
        self.col = usize::from(col);
        Ok(())
    }

    fn write_str(&mut self, text: &str) -> io::Result<()> {
        if let Some(line) = self.cells.get_mut(self.row) {
            for ch in text.chars() {
                if let Some(cell) = line.get_mut(self.col) {
                    *cell = ch;
                }
                self.col += 1;
            }
        }
        Ok(())
    }

    fn clear_eol(&mut self) -> io::Result<()> {
        if let Some(line) = self.cells.get_mut(self.row) {
            for cell in line.iter_mut().skip(self.col) {
                *cell = ' ';
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushed += 1;
        Ok(())
    }
}
