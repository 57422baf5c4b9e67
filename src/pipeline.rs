//! 読み込みパイプライン
//!
//! 取得 → 行ごとの正規化 → 配置可能な行からマーカー生成。
//! 取得・解析の失敗は読み込み全体の失敗、座標のない行は除外するだけ。

use crate::error::Result;
use crate::source::TabularSource;
use landmark_map_common::{build_session, Locale, MapSession, Normalizer, RawRow};
use tracing::{debug, info, warn};

/// 取得元から1回分のセッションを作る
pub async fn load<S: TabularSource>(
    source: &S,
    normalizer: &Normalizer,
    locale: Locale,
) -> Result<MapSession> {
    let rows = source.fetch_rows().await?;
    info!(source = %source.describe(), rows = rows.len(), "取得完了");
    Ok(place_rows(&rows, normalizer, locale))
}

/// 取得済みの行からセッションを作る
pub fn place_rows(rows: &[RawRow], normalizer: &Normalizer, locale: Locale) -> MapSession {
    let session = build_session(rows, normalizer, &locale.labels());

    for &i in &session.unplaceable {
        if let Some(record) = session.records.get(i) {
            debug!(
                row = i + 1,
                title = %record.title,
                coords = %record.coords_raw,
                "座標を解決できない行を除外"
            );
        }
    }

    info!(
        fetched = session.fetched_count(),
        placed = session.placed_count(),
        excluded = session.unplaceable.len(),
        "正規化完了"
    );
    if session.placed_count() == 0 {
        warn!(
            fetched = session.fetched_count(),
            "配置できる行がありません。初期表示位置で地図を出力します"
        );
    }

    session
}
