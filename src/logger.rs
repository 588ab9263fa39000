/// ログ出力を初期化する
///
/// 端末は raw mode で使うため、ログはファイルに追記する。
/// debug build でのみ有効。`RUST_LOG` がなければ debug レベル
pub fn init(path: &str) -> std::io::Result<()> {
    #[cfg(debug_assertions)]
    {
        use std::fs::OpenOptions;
        use std::sync::Mutex;
        use tracing_subscriber::EnvFilter;

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        // 既に初期化済みなら何もしない
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .try_init();
    }
    #[cfg(not(debug_assertions))]
    {
        let _ = path; // unused variable warning を回避
    }
    Ok(())
}
