// WASM専用のエントリーポイント

use crate::dom_renderer::dom;
use crate::engine::config::CartConfig;

/// ページ上のカートを起動する（モジュール読み込み時に一度だけ呼ぶ）
pub fn run_cart_wasm() {
    // パニック時のエラーメッセージをブラウザコンソールに表示
    console_error_panic_hook::set_once();

    // WebAssembly用のロガーを初期化
    if console_log::init_with_level(log::Level::Debug).is_err() {
        log::warn!("Logger was already initialized");
    }

    log::info!("Cart view starting...");

    match dom::start(CartConfig::default()) {
        Ok(_controller) => log::info!("Cart view initialized successfully!"),
        Err(e) => log::error!("Failed to start cart view: {}", e),
    }
}
