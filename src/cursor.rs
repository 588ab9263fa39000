/// 描画時に求めたカーソルの画面位置 (ウィンドウ内の 0 始まり)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    row: usize,
    col: usize,
}

impl Cursor {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn set(&mut self, row: usize, col: usize) {
        self.row = row;
        self.col = col;
    }

    /// 画面内に収める
    pub fn clamp(&mut self, max_rows: usize, max_cols: usize) {
        self.row = self.row.min(max_rows.saturating_sub(1));
        self.col = self.col.min(max_cols.saturating_sub(1));
    }
}
