//! 数字トークン抽出
//!
//! パス文字列全体から数字列を取り出すヘルパー群。
//! 結果はすべて出現順（左から右）。

use regex::Regex;

lazy_static::lazy_static! {
    // 最長一致の数字列。前後が数字でないことは最長一致で保証される
    static ref DIGIT_RUN_RE: Regex = Regex::new(r"[0-9]+").unwrap();
}

/// MBEの日付スキャンで使う接頭辞の範囲（20170 から 20490 まで10刻み）
const DATE_PREFIX_START: u32 = 20170;
const DATE_PREFIX_END: u32 = 20490;
const DATE_PREFIX_STEP: usize = 10;

/// 前後に数字が隣接しない、ちょうど `len` 桁の数字列
fn isolated_digit_runs(path: &str, len: usize) -> impl Iterator<Item = &str> {
    DIGIT_RUN_RE
        .find_iter(path)
        .map(|m| m.as_str())
        .filter(move |run| run.len() == len)
}

/// 孤立した3桁の数字列
///
/// # Examples
/// ```
/// use paradim_sorter_common::extractor::isolated_3_digit_numbers;
///
/// let ids: Vec<&str> = isolated_3_digit_numbers("329/run_1234_126.img").collect();
/// assert_eq!(ids, vec!["329", "126"]);
/// ```
pub fn isolated_3_digit_numbers(path: &str) -> impl Iterator<Item = &str> {
    isolated_digit_runs(path, 3)
}

/// 孤立した8桁の数字列（日付らしきもの）
pub fn isolated_8_digit_numbers(path: &str) -> impl Iterator<Item = &str> {
    isolated_digit_runs(path, 8)
}

/// `marker` の直後に続く3桁の数字列
///
/// 境界チェックは行わない（`marker` の位置だけで判定）。
/// 一致した部分（`marker` + 3桁）は重ねて使わない。
pub fn digits_after<'a>(path: &'a str, marker: &str) -> Vec<&'a str> {
    const ID_LEN: usize = 3;
    let mut found = Vec::new();
    let mut from = 0;

    while let Some(pos) = path[from..].find(marker) {
        let at = from + pos;
        let start = at + marker.len();
        match path.get(start..start + ID_LEN).filter(|digits| is_all_digits(digits)) {
            Some(digits) => {
                found.push(digits);
                from = start + ID_LEN;
            }
            None => match path[at..].chars().next() {
                Some(c) => from = at + c.len_utf8(),
                None => break,
            },
        }
    }

    found
}

/// MBEの日付スキャン用の接頭辞（"20170", "20180", ..., "20490"）
pub fn date_prefixes() -> impl Iterator<Item = String> {
    (DATE_PREFIX_START..=DATE_PREFIX_END)
        .step_by(DATE_PREFIX_STEP)
        .map(|year| year.to_string())
}

/// ちょうど `len` 文字のASCII数字列か
pub fn is_digits_of_len(s: &str, len: usize) -> bool {
    s.len() == len && is_all_digits(s)
}

/// 空でなく、全てASCII数字か
pub fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isolated_3_digit_numbers_order() {
        let ids: Vec<&str> = isolated_3_digit_numbers("a123b456c").collect();
        assert_eq!(ids, vec!["123", "456"]);
    }

    #[test]
    fn test_isolated_3_digit_numbers_skips_longer_runs() {
        let ids: Vec<&str> = isolated_3_digit_numbers("20250108_4_12_1234/x").collect();
        assert!(ids.is_empty());
    }

    #[test]
    fn test_isolated_3_digit_numbers_instrument_code() {
        let ids: Vec<&str> = isolated_3_digit_numbers("PDC_MBE316GM1_growth.zip").collect();
        assert_eq!(ids, vec!["316"]);
    }

    #[test]
    fn test_isolated_8_digit_numbers() {
        let dates: Vec<&str> =
            isolated_8_digit_numbers("PDC_MBE316GM1_20250108_4_321.zip").collect();
        assert_eq!(dates, vec!["20250108"]);
        assert_eq!(isolated_8_digit_numbers("202501081").count(), 0);
    }

    #[test]
    fn test_digits_after_marker() {
        assert_eq!(digits_after("scan_240329_a", "240"), vec!["329"]);
        assert_eq!(digits_after("2401234", "240"), vec!["123"]);
        assert!(digits_after("24012", "240").is_empty());
    }

    #[test]
    fn test_digits_after_non_overlapping() {
        assert_eq!(digits_after("230111230222", "230"), vec!["111", "222"]);
    }

    #[test]
    fn test_digits_after_consumes_whole_match() {
        assert_eq!(digits_after("2402401", "240"), vec!["240"]);
        assert_eq!(digits_after("24x240123", "240"), vec!["123"]);
        assert_eq!(digits_after("é240123", "240"), vec!["123"]);
    }

    #[test]
    fn test_digits_after_escapes_marker() {
        assert!(digits_after("a1b123", "a.b").is_empty());
        assert_eq!(digits_after("a.b123", "a.b"), vec!["123"]);
    }

    #[test]
    fn test_date_prefixes() {
        let prefixes: Vec<String> = date_prefixes().collect();
        assert_eq!(prefixes.first().map(String::as_str), Some("20170"));
        assert_eq!(prefixes.last().map(String::as_str), Some("20490"));
        assert_eq!(prefixes.len(), 33);
    }

    #[test]
    fn test_is_digits_of_len() {
        assert!(is_digits_of_len("321", 3));
        assert!(!is_digits_of_len("32", 3));
        assert!(!is_digits_of_len("32a", 3));
        assert!(!is_all_digits(""));
    }
}
