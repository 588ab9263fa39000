use termion::event::Key;

/// キーに割り当てられる編集操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    LineBegin,
    LineEnd,
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
    Top,
    Bottom,
    DeleteForward,
    DeleteBackward,
    KillToEol,
    SetMark,
    Cut,
    Copy,
    Paste,
    Search,
    Save,
    Quit,
}

/// キー列と操作の対応表
pub const BINDINGS: &[(&[Key], Action)] = &[
    (&[Key::Ctrl('a')], Action::LineBegin),
    (&[Key::Home], Action::LineBegin),
    (&[Key::Ctrl('e')], Action::LineEnd),
    (&[Key::End], Action::LineEnd),
    (&[Key::Ctrl('b')], Action::Left),
    (&[Key::Left], Action::Left),
    (&[Key::Ctrl('f')], Action::Right),
    (&[Key::Right], Action::Right),
    (&[Key::Ctrl('p')], Action::Up),
    (&[Key::Up], Action::Up),
    (&[Key::Ctrl('n')], Action::Down),
    (&[Key::Down], Action::Down),
    (&[Key::Ctrl('v')], Action::PageDown),
    (&[Key::PageDown], Action::PageDown),
    (&[Key::Alt('v')], Action::PageUp),
    (&[Key::PageUp], Action::PageUp),
    (&[Key::Alt('<')], Action::Top),
    (&[Key::Alt('>')], Action::Bottom),
    (&[Key::Ctrl('d')], Action::DeleteForward),
    (&[Key::Delete], Action::DeleteForward),
    (&[Key::Ctrl('h')], Action::DeleteBackward),
    (&[Key::Backspace], Action::DeleteBackward),
    (&[Key::Ctrl('k')], Action::KillToEol),
    (&[Key::Null], Action::SetMark),
    (&[Key::Alt('@')], Action::SetMark),
    (&[Key::Ctrl('w')], Action::Cut),
    (&[Key::Alt('k')], Action::Cut),
    (&[Key::Alt('w')], Action::Copy),
    (&[Key::Ctrl('y')], Action::Paste),
    (&[Key::Ctrl('s')], Action::Search),
    (&[Key::Ctrl('x'), Key::Ctrl('s')], Action::Save),
    (&[Key::Ctrl('x'), Key::Ctrl('c')], Action::Quit),
];

/// キー照合の結果
#[derive(Debug, PartialEq, Eq)]
pub enum Match {
    /// 複数キーの途中
    Pending,
    Matched(Action),
    /// 一致なし。溜めていたキーをそのまま返す
    Unbound(Vec<Key>),
}

/// 1 キーずつ受け取って `BINDINGS` と照合する
#[derive(Debug, Default)]
pub struct KeyMatcher {
    pending: Vec<Key>,
}

impl KeyMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, key: Key) -> Match {
        self.pending.push(key);

        if let Some((_, action)) = BINDINGS
            .iter()
            .find(|(keys, _)| *keys == self.pending.as_slice())
        {
            self.pending.clear();
            return Match::Matched(*action);
        }

        let prefix = BINDINGS
            .iter()
            .any(|(keys, _)| self.pending.len() < keys.len() && keys.starts_with(&self.pending));
        if prefix {
            Match::Pending
        } else {
            Match::Unbound(std::mem::take(&mut self.pending))
        }
    }

    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

/// メッセージ表示用のキー名
pub fn describe(key: Key) -> String {
    match key {
        Key::Char('\t') => "TAB".to_string(),
        Key::Char('\n') => "RET".to_string(),
        Key::Char(c) => c.to_string(),
        Key::Ctrl(c) => format!("C-{c}"),
        Key::Alt(c) => format!("M-{c}"),
        Key::Null => "C-SPC".to_string(),
        Key::Esc => "ESC".to_string(),
        other => format!("{other:?}"),
    }
}
