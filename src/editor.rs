use std::io;
use std::path::Path;

use termion::event::Key;
use tracing::{debug, warn};

use crate::CHUNK;
use crate::buffer::Buffer;
use crate::clipboard::Clipboard;
use crate::display::Display;
use crate::error::{EditorError, Result};
use crate::file_io::FileIO;
use crate::keymap::{self, Action, KeyMatcher, Match};
use crate::layout;
use crate::mode::ModeManager;
use crate::screen::Screen;
use crate::search::Search;
use crate::viewport::Viewport;

/// 編集セッション
///
/// バッファ、マーク、クリップボード、表示範囲、メッセージ行をまとめて持つ
pub struct Editor {
    buffer: Buffer,
    filename: String,
    /// 選択範囲のもう一端
    mark: Option<usize>,
    clipboard: Clipboard,
    viewport: Viewport,
    mode: ModeManager,
    search: Search,
    /// 次の描画で一度だけ表示するメッセージ
    status_message: Option<String>,
    done: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self::from_buffer(Buffer::new(), String::new())
    }

    pub fn from_buffer(buffer: Buffer, filename: String) -> Self {
        Self {
            buffer,
            filename,
            mark: None,
            clipboard: Clipboard::new(),
            viewport: Viewport::default(),
            mode: ModeManager::new(),
            search: Search::new(),
            status_message: None,
            done: false,
        }
    }

    /// ファイルを開いてセッションを作る
    ///
    /// ファイルが読めなくてもファイル名は保持し、理由をメッセージに出す。
    /// ストレージを確保できない場合だけエラーを返す
    pub fn open<P: AsRef<Path>>(path: P, clipboard: Clipboard) -> Result<Self> {
        let path = path.as_ref();
        let mut editor = Self::from_buffer(Buffer::new(), path.display().to_string());
        editor.clipboard = clipboard;

        match FileIO::load(path, &mut editor.buffer) {
            Ok(n) => editor.message(format!("File \"{}\" {n} bytes read.", editor.filename)),
            Err(err) if err.is_fatal() => return Err(err),
            Err(err) => {
                warn!(%err, "load failed");
                editor.message(err.to_string());
            }
        }

        editor
            .buffer
            .ensure_capacity(CHUNK)
            .map_err(|_| EditorError::InitialAllocation)?;
        Ok(editor)
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.buffer
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn mark(&self) -> Option<usize> {
        self.mark
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn is_searching(&self) -> bool {
        self.mode.is_search()
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn message(&mut self, text: impl Into<String>) {
        self.status_message = Some(text.into());
    }

    /// 画面を描画する。メッセージは一度表示したら消える
    pub fn refresh(&mut self, display: &mut impl Display) -> io::Result<()> {
        let message = self.status_message.take().unwrap_or_default();
        Screen::refresh(
            display,
            &self.buffer,
            &mut self.viewport,
            &self.filename,
            &message,
        )
    }

    /// キー 1 つを処理する
    pub fn process_key(&mut self, matcher: &mut KeyMatcher, key: Key) {
        if self.mode.is_search() {
            self.search_key(key);
            return;
        }
        match matcher.feed(key) {
            Match::Pending => {}
            Match::Matched(action) => self.execute(action),
            Match::Unbound(keys) => {
                for key in keys {
                    self.insert_key(key);
                }
            }
        }
    }

    pub fn execute(&mut self, action: Action) {
        debug!(?action, point = self.buffer.point(), "execute");
        match action {
            Action::LineBegin => self.line_begin(),
            Action::LineEnd => self.line_end(),
            Action::Left => self.left(),
            Action::Right => self.right(),
            Action::Up => self.up(),
            Action::Down => self.down(),
            Action::PageUp => self.page_up(),
            Action::PageDown => self.page_down(),
            Action::Top => self.top(),
            Action::Bottom => self.bottom(),
            Action::DeleteForward => self.buffer.delete_forward(),
            Action::DeleteBackward => self.buffer.delete_backward(),
            Action::KillToEol => self.kill_to_eol(),
            Action::SetMark => self.set_mark(),
            Action::Cut => self.copy_cut(true),
            Action::Copy => self.copy_cut(false),
            Action::Paste => self.paste(),
            Action::Search => self.begin_search(),
            Action::Save => self.save(),
            Action::Quit => self.done = true,
        }
    }

    /// 割り当てのないキー。文字なら挿入する
    pub fn insert_key(&mut self, key: Key) {
        match key {
            Key::Char(c) if c == '\n' || c == '\t' || c.is_ascii_graphic() || c == ' ' => {
                self.insert(c as u8);
            }
            _ => self.message(format!("Not bound: {}", keymap::describe(key))),
        }
    }

    pub fn insert(&mut self, byte: u8) {
        if let Err(err) = self.buffer.insert_byte(byte) {
            self.message(err.to_string());
        }
    }

    pub fn top(&mut self) {
        self.buffer.set_point(0);
    }

    /// 末尾へ移動して表示範囲を作り直させる
    pub fn bottom(&mut self) {
        let end = self.buffer.len();
        self.buffer.set_point(end);
        self.viewport.set_epage(end);
    }

    pub fn left(&mut self) {
        let point = self.buffer.point();
        if 0 < point {
            self.buffer.set_point(point - 1);
        }
    }

    pub fn right(&mut self) {
        let point = self.buffer.point();
        if point < self.buffer.len() {
            self.buffer.set_point(point + 1);
        }
    }

    /// 1 画面行上へ。表示列はなるべく保つ
    pub fn up(&mut self) {
        let cols = self.viewport.cols();
        let start = layout::prev_visual_line(&self.buffer, self.buffer.point(), cols);
        let col = self.viewport.cursor().col();
        let target = layout::column_to_offset(&self.buffer, start, col, cols);
        self.buffer.set_point(target);
    }

    pub fn down(&mut self) {
        let cols = self.viewport.cols();
        let start = layout::next_visual_line(&self.buffer, self.buffer.point(), cols);
        let col = self.viewport.cursor().col();
        let target = layout::column_to_offset(&self.buffer, start, col, cols);
        self.buffer.set_point(target);
    }

    pub fn line_begin(&mut self) {
        let start = self.segment_of(self.buffer.point());
        self.buffer.set_point(start);
    }

    /// 画面行の末尾へ
    pub fn line_end(&mut self) {
        let cols = self.viewport.cols();
        let point = self.buffer.point();
        let end = self.buffer.len();
        let next = layout::next_visual_line(&self.buffer, point, cols);

        // 最終行では改行がないのでバッファ末尾まで進める
        if next == end && self.segment_of(end) == self.segment_of(point) {
            self.buffer.set_point(end);
        } else {
            self.buffer.set_point(next);
            self.left();
        }
    }

    pub fn page_down(&mut self) {
        let cols = self.viewport.cols();
        let top = layout::prev_visual_line(&self.buffer, self.viewport.epage(), cols);
        self.viewport.set_page(top);
        self.buffer.set_point(top);
        for _ in 0..self.viewport.cursor().row() {
            self.down();
        }
        self.viewport.set_epage(self.buffer.len());
    }

    pub fn page_up(&mut self) {
        let cols = self.viewport.cols();
        for _ in 1..self.viewport.rows() {
            let page = layout::prev_visual_line(&self.buffer, self.viewport.page(), cols);
            self.viewport.set_page(page);
            self.up();
        }
    }

    fn segment_of(&self, offset: usize) -> usize {
        let start = layout::line_start(&self.buffer, offset);
        layout::segment_start(&self.buffer, start, offset, self.viewport.cols())
    }

    /// マークの切り替え。カーソル位置にマークがあれば解除する
    pub fn set_mark(&mut self) {
        let point = self.buffer.point();
        if self.mark == Some(point) {
            self.mark = None;
            self.message("Mark cleared");
        } else {
            self.mark = Some(point);
            self.message("Mark set");
        }
    }

    /// マークとカーソルの間をクリップボードへ。`cut` なら削除もする
    pub fn copy_cut(&mut self, cut: bool) {
        let point = self.buffer.point();
        let Some(mark) = self.mark.filter(|&mark| mark != point) else {
            return;
        };
        let (lo, hi) = (point.min(mark), point.max(mark));

        let bytes = match self.buffer.copy_range(lo, hi) {
            Ok(bytes) => bytes,
            Err(err) => {
                self.message(err.to_string());
                return;
            }
        };
        let count = bytes.len();
        self.clipboard.set(bytes);

        if cut {
            self.buffer.remove_range(lo, hi);
            self.message(format!("{count} bytes cut."));
        } else {
            self.message(format!("{count} bytes copied."));
        }
        self.mark = None;
    }

    pub fn paste(&mut self) {
        if self.clipboard.is_empty() {
            self.message("Nothing to paste.");
            return;
        }
        if let Err(err) = self.buffer.insert_bytes(self.clipboard.contents()) {
            self.message(err.to_string());
        }
    }

    /// カーソルから画面行末まで削除する (C-k)
    pub fn kill_to_eol(&mut self) {
        let point = self.buffer.point();
        // 空行か最後の 1 文字なら 1 文字削除
        if self.buffer.byte_at(point).is_none_or(|b| b == b'\n') || point + 1 == self.buffer.len() {
            self.buffer.delete_forward();
            return;
        }

        self.line_end();
        if self.buffer.point() == point {
            self.buffer.delete_forward();
            return;
        }
        self.mark = Some(point);
        self.copy_cut(true);
    }

    pub fn save(&mut self) {
        match FileIO::save(&self.filename, &mut self.buffer) {
            Ok(n) => {
                self.buffer.set_modified(false);
                self.message(format!("File \"{}\" {n} bytes saved.", self.filename));
            }
            Err(err) => {
                warn!(%err, "save failed");
                self.message(err.to_string());
            }
        }
    }

    pub fn begin_search(&mut self) {
        self.search.begin(self.buffer.point());
        self.mode.enter_search();
        debug!(origin = self.search.origin(), "search started");
        self.message(self.search.prompt());
    }

    /// 検索中のキー入力
    pub fn search_key(&mut self, key: Key) {
        match key {
            // 現在位置のまま終了
            Key::Esc => {
                self.mode.enter_normal();
                debug!(point = self.buffer.point(), "search finished");
                return;
            }
            // 開始位置に戻して中断
            Key::Ctrl('g') => {
                self.buffer.set_point(self.search.origin());
                self.mode.enter_normal();
                debug!(point = self.buffer.point(), "search aborted");
                return;
            }
            Key::Ctrl('s') | Key::Char('\n') => {
                let pattern = self.search.pattern().as_bytes();
                match self.buffer.find_forward(self.buffer.point(), pattern) {
                    Some(found) => {
                        self.buffer.set_point(found);
                        self.message(self.search.prompt());
                    }
                    None => {
                        self.message(self.search.failing_prompt());
                        self.buffer.set_point(0);
                    }
                }
                return;
            }
            Key::Backspace | Key::Ctrl('h') => {
                self.search.pop();
            }
            Key::Char(c) => {
                self.search.push(c);
            }
            _ => {}
        }
        self.message(self.search.prompt());
    }
}
