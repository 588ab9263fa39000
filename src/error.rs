use std::io;

use thiserror::Error;

/// エディタ操作のエラー
///
/// `Display` の文字列はそのままメッセージ行に表示される
#[derive(Debug, Error)]
pub enum EditorError {
    /// 起動時の初回確保に失敗 (続行不能)
    #[error("Failed to allocate required memory.")]
    InitialAllocation,

    #[error("No more memory available.")]
    OutOfMemory,

    #[error("Failed to find file \"{path}\".")]
    NotFound { path: String },

    #[error("Failed to open file \"{path}\".")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read file \"{path}\".")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write file \"{path}\".")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl EditorError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InitialAllocation)
    }
}

pub type Result<T> = std::result::Result<T, EditorError>;
