//! 分類結果の型定義
//!
//! - Confidence: 分類の信頼度（NONE < LOW < MEDIUM < HIGH）
//! - Timestamps: ファイルの作成/更新時刻（UNIX秒）
//! - ClassificationRecord: 分類器の唯一の出力
//! - Source: データソース（装置系統）

use serde::{Deserialize, Serialize};

/// 分類の信頼度
///
/// 順序付きの列挙型。シリアライズ時は 0..=3 の整数になる。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Confidence {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl Confidence {
    /// 全レベル（昇順）
    pub const ALL: [Confidence; 4] = [
        Confidence::None,
        Confidence::Low,
        Confidence::Medium,
        Confidence::High,
    ];

    pub fn as_u8(self) -> u8 {
        match self {
            Confidence::None => 0,
            Confidence::Low => 1,
            Confidence::Medium => 2,
            Confidence::High => 3,
        }
    }
}

impl From<Confidence> for u8 {
    fn from(c: Confidence) -> Self {
        c.as_u8()
    }
}

impl TryFrom<u8> for Confidence {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Confidence::None),
            1 => Ok(Confidence::Low),
            2 => Ok(Confidence::Medium),
            3 => Ok(Confidence::High),
            _ => Err(format!("Unknown confidence level: {}", v)),
        }
    }
}

impl std::str::FromStr for Confidence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" | "0" => Ok(Confidence::None),
            "low" | "1" => Ok(Confidence::Low),
            "medium" | "med" | "2" => Ok(Confidence::Medium),
            "high" | "3" => Ok(Confidence::High),
            _ => Err(format!("Unknown confidence: {}. Use none, low, medium, or high", s)),
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::None => write!(f, "NONE"),
            Confidence::Low => write!(f, "LOW"),
            Confidence::Medium => write!(f, "MEDIUM"),
            Confidence::High => write!(f, "HIGH"),
        }
    }
}

/// ファイルのタイムスタンプ（UNIX秒）
///
/// 現在の分類ルールはどれも参照しないが、インターフェースとしては必須。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timestamps {
    pub created_at: i64,
    pub modified_at: i64,
}

impl Timestamps {
    pub fn new(created_at: i64, modified_at: i64) -> Self {
        Self { created_at, modified_at }
    }
}

/// 分類結果
///
/// HIGH のときは provenance_id と project_path が必ず Some。
/// project_path は NONE でも元のパスが入る。
/// JSONから読み込む場合もこの条件を検査する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RecordFields")]
pub struct ClassificationRecord {
    /// プロジェクト番号（通常は3桁）
    pub provenance_id: Option<String>,
    /// プロジェクト内での格納パス
    pub project_path: Option<String>,
    pub confidence: Confidence,
    /// 診断用メモ
    pub extra: String,
    /// 採用されたルールの説明
    pub why: String,
}

/// 読み込み用（検査前）
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordFields {
    provenance_id: Option<String>,
    project_path: Option<String>,
    confidence: Confidence,
    #[serde(default)]
    extra: String,
    #[serde(default)]
    why: String,
}

impl TryFrom<RecordFields> for ClassificationRecord {
    type Error = String;

    fn try_from(fields: RecordFields) -> Result<Self, Self::Error> {
        if fields.confidence == Confidence::High
            && (fields.provenance_id.is_none() || fields.project_path.is_none())
        {
            return Err("HIGH record requires provenanceId and projectPath".to_string());
        }
        Ok(Self {
            provenance_id: fields.provenance_id,
            project_path: fields.project_path,
            confidence: fields.confidence,
            extra: fields.extra,
            why: fields.why,
        })
    }
}

impl ClassificationRecord {
    /// HIGH の結果を作る。id とパスは省略不可。
    pub fn high(
        id: impl Into<String>,
        path: impl Into<String>,
        extra: &str,
        why: &str,
    ) -> Self {
        Self {
            provenance_id: Some(id.into()),
            project_path: Some(path.into()),
            confidence: Confidence::High,
            extra: extra.to_string(),
            why: why.to_string(),
        }
    }

    pub fn medium(id: Option<String>, path: impl Into<String>, extra: &str, why: &str) -> Self {
        Self::graded(Confidence::Medium, id, path, extra, why)
    }

    pub fn low(id: Option<String>, path: impl Into<String>, extra: &str, why: &str) -> Self {
        Self::graded(Confidence::Low, id, path, extra, why)
    }

    /// NONE の結果。id は常に None。
    pub fn none(path: impl Into<String>, extra: &str, why: &str) -> Self {
        Self::graded(Confidence::None, None, path, extra, why)
    }

    fn graded(
        confidence: Confidence,
        id: Option<String>,
        path: impl Into<String>,
        extra: &str,
        why: &str,
    ) -> Self {
        Self {
            provenance_id: id,
            project_path: Some(path.into()),
            confidence,
            extra: extra.to_string(),
            why: why.to_string(),
        }
    }

    /// provenance_id を数値として取得
    pub fn provenance_number(&self) -> Option<u32> {
        self.provenance_id.as_deref().and_then(|id| id.trim().parse().ok())
    }

    pub fn is_high(&self) -> bool {
        self.confidence == Confidence::High
    }
}

/// データソース（装置系統）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Arpes,
    Andromeda,
    Mbe,
    Rheed,
}

impl Source {
    pub const ALL: [Source; 4] = [Source::Arpes, Source::Andromeda, Source::Mbe, Source::Rheed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Arpes => "arpes",
            Source::Andromeda => "andromeda",
            Source::Mbe => "mbe",
            Source::Rheed => "rheed",
        }
    }
}

impl std::str::FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "arpes" | "generic" => Ok(Source::Arpes),
            "andromeda" => Ok(Source::Andromeda),
            "mbe" => Ok(Source::Mbe),
            "rheed" => Ok(Source::Rheed),
            _ => Err(format!("Unknown source: {}. Use arpes, andromeda, mbe, or rheed", s)),
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
