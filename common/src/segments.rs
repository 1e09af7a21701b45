//! パス文字列のセグメント操作
//!
//! ファイルシステムには触れず、文字列としてのみ扱う。

/// パス区切り文字（Windows由来の `\` も受け付ける）
const SEPARATORS: [char; 2] = ['/', '\\'];

/// 区切り文字を含むか
pub fn has_separator(path: &str) -> bool {
    path.contains(SEPARATORS)
}

/// 正規化したパス
///
/// 区切りを `/` に統一し、空セグメントと `.` を取り除く（先頭の `./` も消える）。
/// 何も残らなければ `"."`。
pub fn normalize(path: &str) -> String {
    let joined = segments(path).join("/");
    if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// 正規化済みのセグメント列
pub fn segments(path: &str) -> Vec<&str> {
    path.split(SEPARATORS)
        .filter(|s| !s.is_empty() && *s != ".")
        .collect()
}

/// 生のセグメント列（`.` や空要素もそのまま残す）
pub fn raw_segments(path: &str) -> Vec<&str> {
    path.split(SEPARATORS).collect()
}

/// 先頭 `count` 個のセグメントを基準ディレクトリとした相対パス
pub fn relative_after(segments: &[&str], count: usize) -> String {
    match segments.get(count..) {
        Some(rest) if !rest.is_empty() => rest.join("/"),
        _ => ".".to_string(),
    }
}
