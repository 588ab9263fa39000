use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use termion::input::TermRead;
use tracing::info;

use zmacs::LOG_FILE;
use zmacs::clipboard::Clipboard;
use zmacs::editor::Editor;
use zmacs::keymap::KeyMatcher;
use zmacs::logger;
use zmacs::terminal::Terminal;

/// Emacs 風キーバインドの小さなテキストエディタ
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// 編集するファイル
    filename: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init(LOG_FILE).context("failed to open log file")?;

    // raw mode に入る前にバッファを確保する (失敗したらそのまま終了)
    let mut editor = Editor::open(&args.filename, Clipboard::with_system())
        .context("failed to start editor")?;
    info!(file = %args.filename.display(), "editor started");

    let mut terminal = Terminal::new()?;
    let mut matcher = KeyMatcher::new();

    // 初期画面
    editor.refresh(&mut terminal)?;

    // キー入力ループ
    for key in io::stdin().keys() {
        editor.process_key(&mut matcher, key?);
        if editor.is_done() {
            break;
        }
        // キー入力後に再描画
        editor.refresh(&mut terminal)?;
    }

    info!("editor finished");
    Ok(())
}
