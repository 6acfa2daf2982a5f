//! 追踪号生成

use std::fmt;

use rand::RngCore;
use sha2::{Digest, Sha256};

/// 不透明的运单追踪号，不持久化也不可反查
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackingId(String);

impl TrackingId {
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TrackingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 根据地址生成追踪号
pub fn create_tracking_id(base_address: &str) -> TrackingId {
    create_tracking_id_with(base_address, &mut rand::thread_rng())
}

/// 使用指定随机源生成追踪号
///
/// 格式 `LL-<地址长度><3 位数字>-<地址长度/2><7 位数字>`，
/// 字母与数字取自 SHA-256(地址 || 随机盐)。
pub fn create_tracking_id_with<R>(base_address: &str, rng: &mut R) -> TrackingId
where
    R: RngCore + ?Sized,
{
    let mut salt = [0u8; 16];
    rng.fill_bytes(&mut salt);

    let mut hasher = Sha256::new();
    hasher.update(base_address.as_bytes());
    hasher.update(salt);
    let digest = hasher.finalize();

    let len = base_address.len();
    TrackingId(format!(
        "{}{}-{}{}-{}{}",
        letter(digest[0]),
        letter(digest[1]),
        len,
        digits(&digest[2..5]),
        len / 2,
        digits(&digest[5..12]),
    ))
}

/// A..=Y
fn letter(byte: u8) -> char {
    char::from(b'A' + byte % 25)
}

fn digits(bytes: &[u8]) -> String {
    bytes.iter().map(|b| char::from(b'0' + b % 10)).collect()
}
