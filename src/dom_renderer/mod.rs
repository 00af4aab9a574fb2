use std::time::Duration;

pub mod html;

#[cfg(feature = "wasm")]
pub mod dom;

/// `setTimeout` に渡す遅延（i32 に収まらない値は i32::MAX に丸める）
pub fn timeout_millis(duration: Duration) -> i32 {
    i32::try_from(duration.as_millis()).unwrap_or(i32::MAX)
}
