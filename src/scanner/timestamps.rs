use chrono::{DateTime, Utc};
use paradim_sorter_common::Timestamps;
use std::fs::Metadata;
use std::time::SystemTime;

/// メタデータから作成/更新時刻を取得
///
/// 作成時刻を持たないファイルシステムでは更新時刻で代用する。
pub fn file_timestamps(meta: &Metadata) -> std::io::Result<Timestamps> {
    let modified = meta.modified()?;
    let created = meta.created().unwrap_or(modified);
    Ok(Timestamps::new(epoch_seconds(created), epoch_seconds(modified)))
}

fn epoch_seconds(time: SystemTime) -> i64 {
    DateTime::<Utc>::from(time).timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn test_epoch_seconds() {
        let time = UNIX_EPOCH + Duration::from_secs(1_709_078_400);
        assert_eq!(epoch_seconds(time), 1_709_078_400);
    }

    #[test]
    fn test_file_timestamps_of_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.img");
        std::fs::write(&path, b"dummy").unwrap();

        let ts = file_timestamps(&std::fs::metadata(&path).unwrap()).unwrap();
        assert!(ts.modified_at > 0);
        assert!(ts.created_at > 0);
    }
}
