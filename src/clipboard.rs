use tracing::debug;

/// カット/コピーした最新のバイト列を 1 つだけ保持する
///
/// システムクリップボードと連携している場合は UTF-8 として読めるものを同期する。
/// ペーストは常に内部のバッファから行う
#[derive(Default)]
pub struct Clipboard {
    scrap: Vec<u8>,
    system: Option<arboard::Clipboard>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// システムクリップボード連携あり。使えない環境では連携なしと同じ
    pub fn with_system() -> Self {
        Self {
            scrap: Vec::new(),
            system: arboard::Clipboard::new().ok(),
        }
    }

    /// 内容を丸ごと置き換える
    pub fn set(&mut self, bytes: Vec<u8>) {
        self.scrap = bytes;
        self.sync_to_system();
    }

    pub fn contents(&self) -> &[u8] {
        &self.scrap
    }

    pub fn is_empty(&self) -> bool {
        self.scrap.is_empty()
    }

    fn sync_to_system(&mut self) {
        if let Some(system) = &mut self.system
            && let Ok(text) = std::str::from_utf8(&self.scrap)
        {
            // set_text に失敗しても無視する
            if let Err(err) = system.set_text(text.to_owned()) {
                debug!(%err, "system clipboard sync failed");
            }
        }
    }
}
