//! 論理オフセットと画面上の行/列の対応付け
//!
//! 論理行は `\n` で区切られた行、セグメントは端末幅 `cols` で折り返された
//! 1 画面行分の範囲。キャッシュは持たず、毎回バッファを走査して求める。
//! 折り返しの判定は描画と同じ `place` を使うので、両者の境界は常に一致する。

use crate::TAB_WIDTH;
use crate::buffer::Buffer;

/// `col` の位置に置いたときのグリフの表示幅
pub fn glyph_width(byte: u8, col: usize) -> usize {
    match byte {
        b'\t' => TAB_WIDTH - col % TAB_WIDTH,
        b'\r' | b'\n' => 0,
        0x20..=0x7e => 1,
        // ^X 表記
        0x00..=0x1f | 0x7f => 2,
        // \xNN 表記
        _ => 4,
    }
}

/// 改行以外のバイトを `col` に置く。
/// 戻り値は (直前で折り返すか, 置いた後の列)
pub fn place(col: usize, byte: u8, cols: usize) -> (bool, usize) {
    let width = glyph_width(byte, col);
    let wrap = col > 0
        && if byte == b'\t' {
            cols <= col
        } else {
            cols < col + width
        };
    let start = if wrap { 0 } else { col };
    let end = start + glyph_width(byte, start);
    (wrap, end.min(cols.max(1)))
}

/// `offset` を含む論理行の先頭
pub fn line_start(buffer: &Buffer, offset: usize) -> usize {
    let mut scan = offset.min(buffer.len());
    while 0 < scan {
        if buffer.byte_at(scan - 1) == Some(b'\n') {
            return scan;
        }
        scan -= 1;
    }
    0
}

/// 論理行の先頭 `lo` から走査して、`hi` を含むセグメントの先頭を返す
pub fn segment_start(buffer: &Buffer, lo: usize, hi: usize, cols: usize) -> usize {
    let mut col = 0;
    let mut start = lo;

    for scan in lo..hi {
        let Some(byte) = buffer.byte_at(scan) else {
            break;
        };
        if byte == b'\n' {
            col = 0;
            start = scan + 1;
            continue;
        }
        let (wrap, next) = place(col, byte, cols);
        if wrap {
            start = scan;
        }
        col = next;
    }

    // hi 自身が次の画面行に押し出される場合
    match buffer.byte_at(hi) {
        Some(b'\n') => start,
        Some(byte) if place(col, byte, cols).0 => hi,
        None if 0 < col && cols <= col => hi,
        _ => start,
    }
}

/// `hi` を含むセグメントの次のセグメントの先頭 (なければバッファ末尾)
pub fn segment_next(buffer: &Buffer, lo: usize, hi: usize, cols: usize) -> usize {
    let mut scan = segment_start(buffer, lo, hi, cols);
    let mut col = 0;

    while let Some(byte) = buffer.byte_at(scan) {
        if byte == b'\n' {
            return scan + 1;
        }
        let (wrap, next) = place(col, byte, cols);
        if wrap {
            return scan;
        }
        col = next;
        scan += 1;
    }
    buffer.len()
}

/// 1 画面行上のセグメントの先頭
pub fn prev_visual_line(buffer: &Buffer, offset: usize, cols: usize) -> usize {
    let curr = line_start(buffer, offset);
    let seg = segment_start(buffer, curr, offset, cols);
    if curr < seg {
        segment_start(buffer, curr, seg - 1, cols)
    } else {
        let prev = curr.saturating_sub(1);
        segment_start(buffer, line_start(buffer, prev), prev, cols)
    }
}

/// 1 画面行下のセグメントの先頭
pub fn next_visual_line(buffer: &Buffer, offset: usize, cols: usize) -> usize {
    segment_next(buffer, line_start(buffer, offset), offset, cols)
}

/// セグメント先頭 `start` から表示列 `column` に対応するオフセット
///
/// 行末・バッファ末尾・折り返し位置を超えない
pub fn column_to_offset(buffer: &Buffer, start: usize, column: usize, cols: usize) -> usize {
    let mut offset = start;
    let mut col = 0;

    while col < column {
        let Some(byte) = buffer.byte_at(offset) else {
            break;
        };
        if byte == b'\n' {
            break;
        }
        let (wrap, next) = place(col, byte, cols);
        if wrap {
            break;
        }
        col = next;
        offset += 1;
    }

    // 次の画面行に押し出される位置で止まったら、このセグメントの最後の文字に戻す
    let pushed = match buffer.byte_at(offset) {
        Some(b'\n') => false,
        Some(byte) => place(col, byte, cols).0,
        None => 0 < col && cols <= col,
    };
    if pushed && start < offset {
        offset - 1
    } else {
        offset
    }
}

/// `offset` の表示列
pub fn column_of(buffer: &Buffer, offset: usize, cols: usize) -> usize {
    let start = segment_start(buffer, line_start(buffer, offset), offset, cols);
    (start..offset)
        .filter_map(|o| buffer.byte_at(o))
        .fold(0, |col, byte| place(col, byte, cols).1)
}
