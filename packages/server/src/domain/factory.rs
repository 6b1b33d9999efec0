//! RoomId の生成

use rand::Rng;

use super::value_object::RoomId;

/// ルーム ID に使用する文字（数字と英大文字）
pub const ROOM_ID_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// ルーム ID の長さ
pub const ROOM_ID_LENGTH: usize = 4;

/// ルーム ID の生成器
///
/// テストでは決まった ID 列を返す実装に差し替える。
pub trait RoomIdFactory: Send + Sync {
    fn generate(&self) -> RoomId;
}

/// ランダムなルーム ID を生成する実装
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomRoomIdFactory;

impl RoomIdFactory for RandomRoomIdFactory {
    fn generate(&self) -> RoomId {
        let mut rng = rand::thread_rng();
        let code: String = (0..ROOM_ID_LENGTH)
            .map(|_| ROOM_ID_ALPHABET[rng.gen_range(0..ROOM_ID_ALPHABET.len())] as char)
            .collect();
        RoomId::new(code)
    }
}
