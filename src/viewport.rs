use tracing::debug;

use crate::UI_HEIGHT;
use crate::buffer::Buffer;
use crate::cursor::Cursor;
use crate::layout;

/// バッファ上の表示範囲 `[page, epage)` とウィンドウの大きさ
#[derive(Debug, Clone)]
pub struct Viewport {
    /// 表示の先頭オフセット
    page: usize,
    /// 最後に描画した文字の次のオフセット
    epage: usize,
    /// テキスト領域の行数
    rows: usize,
    /// 端末の列数 (折り返し幅)
    cols: usize,
    cursor: Cursor,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

impl Viewport {
    pub fn new(term_cols: u16, term_rows: u16) -> Self {
        let mut viewport = Self {
            page: 0,
            epage: 0,
            rows: 1,
            cols: 1,
            cursor: Cursor::default(),
        };
        viewport.resize(term_cols, term_rows);
        viewport
    }

    /// 端末サイズからテキスト領域を決める (下 2 行はステータスバーとメッセージ行)
    pub fn resize(&mut self, term_cols: u16, term_rows: u16) {
        self.cols = usize::from(term_cols).max(1);
        self.rows = usize::from(term_rows.saturating_sub(UI_HEIGHT)).max(1);
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn epage(&self) -> usize {
        self.epage
    }

    pub fn set_epage(&mut self, epage: usize) {
        self.epage = epage;
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    /// カーソルが表示範囲外に出ていれば `page` を計算し直す
    ///
    /// `epage` とカーソル位置はこの後の描画で更新される
    pub fn reframe(&mut self, buffer: &Buffer) {
        let point = buffer.point();

        // 上にはみ出した: カーソルのある画面行を先頭にする
        if point < self.page {
            self.page = layout::segment_start(
                buffer,
                layout::line_start(buffer, point),
                point,
                self.cols,
            );
            debug!(point, page = self.page, "reframe up");
        }

        // 下にはみ出した: カーソルの次の画面行から rows 行戻る
        if self.epage <= point {
            self.page = layout::next_visual_line(buffer, point, self.cols);
            let mut remaining = if self.rows == 1 {
                // 1 行しかなければカーソルのある画面行だけを出す
                self.page = layout::segment_start(
                    buffer,
                    layout::line_start(buffer, point),
                    point,
                    self.cols,
                );
                0
            } else if buffer.len() <= self.page {
                // 末尾まで来たら最終行を空けておく
                self.page = buffer.len();
                self.rows - 1
            } else {
                self.rows
            };
            while 0 < remaining {
                self.page = layout::prev_visual_line(buffer, self.page, self.cols);
                remaining -= 1;
            }
            debug!(point, page = self.page, "reframe down");
        }
    }
}
