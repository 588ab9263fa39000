use tracing::debug;

use crate::error::{EditorError, Result};
use crate::{CHUNK, MIN_GAP_EXPAND};

/// ギャップバッファ
///
/// ```text
///  [ ギャップ前のテキスト | ギャップ (未使用) | ギャップ後のテキスト ]
///    0..gap               gap..egap            egap..data.len()
/// ```
///
/// 論理オフセットはギャップを除いたバイト列上の位置。
/// ギャップの位置は外からは見えない。
#[derive(Debug, Default)]
pub struct Buffer {
    data: Vec<u8>,
    gap: usize,
    egap: usize,
    /// カーソルの論理オフセット
    point: usize,
    /// 未保存の変更があるか
    modified: bool,
}

impl Buffer {
    /// ストレージを持たない空のバッファ。最初の挿入か `ensure_capacity` で確保される
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut buffer = Self::new();
        buffer.insert_bytes(bytes)?;
        buffer.point = 0;
        buffer.modified = false;
        Ok(buffer)
    }

    /// 論理テキストのバイト数
    pub fn len(&self) -> usize {
        self.data.len() - self.gap_len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn gap_len(&self) -> usize {
        self.egap - self.gap
    }

    pub fn point(&self) -> usize {
        self.point
    }

    /// カーソルを移動する。末尾を超える場合は末尾に丸める
    pub fn set_point(&mut self, offset: usize) {
        self.point = offset.min(self.len());
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn set_modified(&mut self, modified: bool) {
        self.modified = modified;
    }

    /// 論理オフセット -> ストレージ位置
    pub fn offset_to_storage(&self, offset: usize) -> usize {
        if offset < self.gap {
            offset
        } else {
            offset + self.gap_len()
        }
    }

    /// ストレージ位置 -> 論理オフセット
    ///
    /// # Panics
    ///
    /// `position` がストレージの範囲外の場合
    pub fn storage_to_offset(&self, position: usize) -> usize {
        assert!(
            position <= self.data.len(),
            "storage position {position} out of range (storage {})",
            self.data.len()
        );
        if position < self.egap {
            position
        } else {
            position - self.gap_len()
        }
    }

    /// 論理オフセットのバイト。末尾以降は `None`
    pub fn byte_at(&self, offset: usize) -> Option<u8> {
        self.data.get(self.offset_to_storage(offset)).copied()
    }

    /// ギャップを少なくとも `n` バイト広げる
    ///
    /// 拡張量は `MIN_GAP_EXPAND` 以上。ギャップの開始位置は変わらない。
    /// 確保に失敗した場合は内容を一切変更せずにエラーを返す
    pub fn grow_gap(&mut self, n: usize) -> Result<()> {
        let n = n.max(MIN_GAP_EXPAND);
        let buflen = self.data.len();
        let alloc_error = if buflen == 0 {
            EditorError::InitialAllocation
        } else {
            EditorError::OutOfMemory
        };

        let Some(newlen) = buflen.checked_add(n) else {
            return Err(alloc_error);
        };
        if self.data.try_reserve_exact(n).is_err() {
            return Err(alloc_error);
        }
        self.data.resize(newlen, 0);

        // ギャップ後のテキストを新しい領域の末尾へ寄せる
        let tail = buflen - self.egap;
        self.data.copy_within(self.egap..buflen, newlen - tail);
        self.egap = newlen - tail;

        debug!(grow = n, storage = newlen, gap = self.gap_len(), "gap grown");
        self.debug_check();
        Ok(())
    }

    /// ギャップに `n` バイトの空きがなければ広げる
    pub fn ensure_capacity(&mut self, n: usize) -> Result<()> {
        if self.gap_len() < n || self.data.is_empty() {
            self.grow_gap(n)?;
        }
        Ok(())
    }

    /// ギャップの開始位置を `offset` に合わせる。移動後の `offset` を返す
    pub fn move_gap_to(&mut self, offset: usize) -> usize {
        let offset = offset.min(self.len());
        let target = self.offset_to_storage(offset);

        if target < self.gap {
            // ギャップを前方へ: gap 直前のバイトを egap 側へ移す
            let count = self.gap - target;
            self.data.copy_within(target..self.gap, self.egap - count);
            self.gap = target;
            self.egap -= count;
        } else if self.egap < target {
            // ギャップを後方へ
            let count = target - self.egap;
            self.data.copy_within(self.egap..target, self.gap);
            self.gap += count;
            self.egap = target;
        }

        self.debug_check();
        self.storage_to_offset(self.egap)
    }

    /// カーソル位置に 1 バイト挿入する (`\r` は `\n` に変換)
    pub fn insert_byte(&mut self, byte: u8) -> Result<()> {
        if self.gap == self.egap {
            self.grow_gap(CHUNK)?;
        }
        self.point = self.move_gap_to(self.point);
        self.data[self.gap] = if byte == b'\r' { b'\n' } else { byte };
        self.gap += 1;
        self.point = self.storage_to_offset(self.egap);
        self.modified = true;
        Ok(())
    }

    /// カーソル位置にバイト列をそのまま挿入し、カーソルをその後ろへ進める
    pub fn insert_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.ensure_capacity(bytes.len())?;
        self.point = self.move_gap_to(self.point);
        self.data[self.gap..self.gap + bytes.len()].copy_from_slice(bytes);
        self.gap += bytes.len();
        self.point = self.storage_to_offset(self.egap);
        self.modified = true;
        Ok(())
    }

    /// カーソル位置の前にバイト列を読み込む。カーソルと変更フラグはそのまま
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let (point, modified) = (self.point, self.modified);
        self.insert_bytes(bytes)?;
        self.point = point;
        self.modified = modified;
        Ok(())
    }

    /// カーソル位置の文字を削除 (C-d)
    pub fn delete_forward(&mut self) {
        self.point = self.move_gap_to(self.point);
        if self.egap < self.data.len() {
            self.egap += 1;
            self.point = self.storage_to_offset(self.egap);
            self.modified = true;
        }
    }

    /// カーソルの直前の文字を削除 (Backspace)
    pub fn delete_backward(&mut self) {
        self.point = self.move_gap_to(self.point);
        if 0 < self.gap {
            self.gap -= 1;
            self.modified = true;
        }
        self.point = self.storage_to_offset(self.egap);
    }

    /// `[lo, hi)` を削除してカーソルを `lo` に置く
    pub fn remove_range(&mut self, lo: usize, hi: usize) {
        let hi = hi.min(self.len());
        if hi <= lo {
            return;
        }
        self.move_gap_to(lo);
        self.egap += hi - lo;
        self.point = self.storage_to_offset(self.egap);
        self.modified = true;
        self.debug_check();
    }

    /// `[lo, hi)` のコピーを返す
    pub fn copy_range(&mut self, lo: usize, hi: usize) -> Result<Vec<u8>> {
        let hi = hi.min(self.len());
        if hi <= lo {
            return Ok(Vec::new());
        }
        // 範囲がストレージ上で連続するようにギャップを lo へ
        self.move_gap_to(lo);
        let start = self.egap;
        let mut copy = Vec::new();
        copy.try_reserve_exact(hi - lo)
            .map_err(|_| EditorError::OutOfMemory)?;
        copy.extend_from_slice(&self.data[start..start + (hi - lo)]);
        Ok(copy)
    }

    /// 全テキストを連続した 1 つのスライスとして返す (保存用)
    pub fn contiguous(&mut self) -> &[u8] {
        self.move_gap_to(0);
        &self.data[self.egap..]
    }

    /// `start` 以降で `pattern` を探し、一致の直後のオフセットを返す
    ///
    /// 空パターンは `start` で即一致する
    pub fn find_forward(&self, start: usize, pattern: &[u8]) -> Option<usize> {
        if pattern.is_empty() {
            return Some(start);
        }
        let len = self.len();
        (start..len)
            .find(|&p| {
                p + pattern.len() <= len
                    && pattern
                        .iter()
                        .enumerate()
                        .all(|(i, &b)| self.byte_at(p + i) == Some(b))
            })
            .map(|p| p + pattern.len())
    }

    /// 論理テキスト全体のコピー
    pub fn to_vec(&self) -> Vec<u8> {
        let mut text = Vec::with_capacity(self.len());
        text.extend_from_slice(&self.data[..self.gap]);
        text.extend_from_slice(&self.data[self.egap..]);
        text
    }

    fn debug_check(&self) {
        debug_assert!(self.gap <= self.egap);
        debug_assert!(self.egap <= self.data.len());
        debug_assert!(self.point <= self.len());
    }
}
