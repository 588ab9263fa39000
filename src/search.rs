use crate::SEARCH_MAX;

/// インクリメンタル検索の入力状態
#[derive(Debug, Default)]
pub struct Search {
    pattern: String,
    /// 検索開始時のカーソル位置 (中断時に戻す)
    origin: usize,
}

impl Search {
    pub fn new() -> Self {
        Self::default()
    }

    /// パターンを空にして開始位置を記録する
    pub fn begin(&mut self, origin: usize) {
        self.pattern.clear();
        self.origin = origin;
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn origin(&self) -> usize {
        self.origin
    }

    /// 表示可能な ASCII 文字を追加する。上限に達していれば無視
    pub fn push(&mut self, ch: char) -> bool {
        if !(ch.is_ascii_graphic() || ch == ' ') || SEARCH_MAX <= self.pattern.len() {
            return false;
        }
        self.pattern.push(ch);
        true
    }

    pub fn pop(&mut self) -> Option<char> {
        self.pattern.pop()
    }

    pub fn prompt(&self) -> String {
        format!("Search: {}", self.pattern)
    }

    pub fn failing_prompt(&self) -> String {
        format!("Failing Search: {}", self.pattern)
    }
}
