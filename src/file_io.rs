use std::{
    fs::{self, File},
    io::Write,
    path::Path,
};

use tracing::info;

use crate::buffer::Buffer;
use crate::error::{EditorError, Result};

pub struct FileIO;

impl FileIO {
    /// ファイルの内容をカーソル位置に読み込み、読み込んだバイト数を返す
    pub fn load<P: AsRef<Path>>(path: P, buffer: &mut Buffer) -> Result<usize> {
        let path = path.as_ref();
        let name = path.display().to_string();

        if !path.exists() {
            return Err(EditorError::NotFound { path: name });
        }
        let content = fs::read(path).map_err(|source| EditorError::Read {
            path: name.clone(),
            source,
        })?;
        buffer.load_bytes(&content)?;

        info!(path = %name, bytes = content.len(), "file loaded");
        Ok(content.len())
    }

    /// バッファ全体を書き出し、書き込んだバイト数を返す
    pub fn save<P: AsRef<Path>>(path: P, buffer: &mut Buffer) -> Result<usize> {
        let path = path.as_ref();
        let name = path.display().to_string();

        let mut file = File::create(path).map_err(|source| EditorError::Open {
            path: name.clone(),
            source,
        })?;
        let content = buffer.contiguous();
        file.write_all(content)
            .and_then(|()| file.flush())
            .map_err(|source| EditorError::Write {
                path: name.clone(),
                source,
            })?;

        info!(path = %name, bytes = content.len(), "file saved");
        Ok(content.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_into_empty_buffer() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "line1\nline2\n").unwrap();
        file.flush().unwrap();

        let mut buffer = Buffer::new();
        let n = FileIO::load(file.path(), &mut buffer).unwrap();

        assert_eq!(n, 12);
        assert_eq!(buffer.to_vec(), b"line1\nline2\n");
        assert_eq!(buffer.point(), 0);
        assert!(!buffer.is_modified());
    }

    #[test]
    fn test_load_keeps_carriage_returns() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "a\r\nb").unwrap();
        file.flush().unwrap();

        let mut buffer = Buffer::new();
        FileIO::load(file.path(), &mut buffer).unwrap();

        assert_eq!(buffer.to_vec(), b"a\r\nb");
    }

    #[test]
    fn test_load_at_point() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "XY").unwrap();
        file.flush().unwrap();

        let mut buffer = Buffer::from_bytes(b"abcd").unwrap();
        buffer.set_point(2);
        FileIO::load(file.path(), &mut buffer).unwrap();

        assert_eq!(buffer.to_vec(), b"abXYcd");
        assert_eq!(buffer.point(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");

        let mut buffer = Buffer::new();
        let err = FileIO::load(&path, &mut buffer).unwrap_err();

        assert!(matches!(err, EditorError::NotFound { .. }));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_load_empty_file() {
        let file = NamedTempFile::new().unwrap();
        let mut buffer = Buffer::new();
        assert_eq!(FileIO::load(file.path(), &mut buffer).unwrap(), 0);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_save_after_edits() {
        let file = NamedTempFile::new().unwrap();
        let mut buffer = Buffer::from_bytes(b"hello world").unwrap();
        buffer.set_point(5);
        buffer.insert_byte(b',').unwrap();

        let n = FileIO::save(file.path(), &mut buffer).unwrap();

        assert_eq!(n, 12);
        assert_eq!(std::fs::read(file.path()).unwrap(), b"hello, world");
        // 保存後も内容は変わらない
        assert_eq!(buffer.to_vec(), b"hello, world");
    }

    #[test]
    fn test_round_trip() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "a\tb\n\x01c").unwrap();
        file.flush().unwrap();

        let mut buffer = Buffer::new();
        FileIO::load(file.path(), &mut buffer).unwrap();
        FileIO::save(file.path(), &mut buffer).unwrap();

        assert_eq!(std::fs::read(file.path()).unwrap(), b"a\tb\n\x01c");
    }

    #[test]
    fn test_save_to_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no").join("such").join("file.txt");
        let mut buffer = Buffer::from_bytes(b"x").unwrap();

        let err = FileIO::save(&path, &mut buffer).unwrap_err();

        assert!(matches!(err, EditorError::Open { .. }));
    }
}
