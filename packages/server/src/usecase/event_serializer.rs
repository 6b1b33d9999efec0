//! UseCase: イベントの直列化
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - EventSerializer::acquire() による排他
//!
//! ### なぜこのテストが必要か
//! - Registry の変更とそれに伴う通知は、他の接続のイベントと混ざらずに 1 つの単位として完了しなければならない
//! - Repository のロックは 1 回の呼び出しごとに解放されるため、それだけでは足りない
//!
//! ### どのような状況を想定しているか
//! - 正常系：ガードを保持している間、他のイベントは待たされる

use tokio::sync::{Mutex, MutexGuard};

/// ルームに関わるイベントを 1 つずつ処理するためのロック
///
/// create / join / relay / disconnect の各ユースケースが同じインスタンスを共有し、
/// `execute` の間ガードを保持する。ユースケース内部から呼ばれる `LeaveRoomUseCase` は
/// 呼び出し元のガードの下で動くため、自身ではロックしない。
#[derive(Debug, Default)]
pub struct EventSerializer {
    lock: Mutex<()>,
}

impl EventSerializer {
    /// 新しい EventSerializer を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 前のイベントの完了を待ってガードを取得する
    pub async fn acquire(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().await
    }
}
