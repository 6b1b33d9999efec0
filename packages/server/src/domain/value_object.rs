//! Value Object 定義
//!
//! 不変で、値によって等価性が判断されるオブジェクト群。

use std::fmt;

use genkan_shared::time::get_utc_timestamp;
use uuid::Uuid;

/// 接続 ID
///
/// 1 本の WebSocket 接続を識別する不透明な ID。
/// Registry はこの ID を通じてのみ接続を参照する（送信・比較・削除）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// 新しい接続 ID をランダムに生成
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// ルーム ID
///
/// 人が入力しやすい短いコード（例: `"AB12"`）。
/// 値の検証は行わない。存在しない ID は Repository の検索で弾かれる。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomId(String);

impl RoomId {
    /// 与えられた文字列をそのまま ID として扱う
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// 大文字に正規化した ID を作成（join 時の大文字小文字を区別しない照合用）
    pub fn normalized(value: &str) -> Self {
        Self(value.to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// タイムスタンプ（Unix ミリ秒、UTC）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// 現在時刻
    pub fn now() -> Self {
        Self(get_utc_timestamp())
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// `earlier` からの経過時間（ミリ秒）。負にはならない。
    pub fn millis_since(&self, earlier: Timestamp) -> i64 {
        (self.0 - earlier.0).max(0)
    }
}
