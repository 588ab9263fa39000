pub mod buffer;
pub mod clipboard;
pub mod cursor;
pub mod display;
pub mod editor;
pub mod error;
pub mod file_io;
pub mod keymap;
pub mod layout;
pub mod logger;
pub mod mode;
pub mod screen;
pub mod search;
pub mod terminal;
pub mod viewport;

// 画面レイアウト定数
pub const STATUS_BAR_HEIGHT: u16 = 1;
pub const COMMAND_LINE_HEIGHT: u16 = 1;
pub const UI_HEIGHT: u16 = STATUS_BAR_HEIGHT + COMMAND_LINE_HEIGHT;

/// タブストップの幅
pub const TAB_WIDTH: usize = 8;

// ギャップバッファの拡張量
pub const MIN_GAP_EXPAND: usize = 512;
pub const CHUNK: usize = 8096;

/// 検索パターンの最大長
pub const SEARCH_MAX: usize = 63;

pub const LOG_FILE: &str = "zmacs.log";
pub const EDITOR_LABEL: &str = "zmacs:";
