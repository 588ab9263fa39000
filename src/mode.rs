/// 入力の解釈モード。`Search` はインクリメンタル検索中
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    Normal,
    Search,
}

pub struct ModeManager {
    current: Mode,
}

impl Default for ModeManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeManager {
    pub fn new() -> Self {
        Self {
            current: Mode::Normal,
        }
    }

    pub fn current(&self) -> Mode {
        self.current
    }

    pub fn enter_search(&mut self) {
        self.current = Mode::Search;
    }

    pub fn enter_normal(&mut self) {
        self.current = Mode::Normal;
    }

    pub fn is_normal(&self) -> bool {
        self.current == Mode::Normal
    }

    pub fn is_search(&self) -> bool {
        self.current == Mode::Search
    }
}
