#[cfg(feature = "native")]
fn main() {
    use cart_view::engine::CartController;
    use cart_view::terminal::{self, StdinPrompter};
    use cart_view::ui::SnapshotView;
    use log::error;
    use std::io;

    let cli_args = cart_view::parse_args();

    // ログレベルを初期化
    cart_view::init_logger(&cli_args.log_level);

    let config = match cart_view::load_config(&cli_args) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    let cart = match cart_view::load_cart(&cli_args) {
        Ok(cart) => cart,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let view = SnapshotView::from_cart(&cart);
    let mut controller = CartController::new(cart, config, view, StdinPrompter);
    controller.initialize();

    println!("{}", terminal::COMMAND_HELP);
    let read_line = |buf: &mut String| io::stdin().read_line(buf);
    if let Err(e) = terminal::run_session(&mut controller, read_line, &mut io::stdout()) {
        error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    // WASM環境では何もしない（wasm_main関数で処理）
}

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
use wasm_bindgen::prelude::*;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    cart_view::run_cart_wasm();
}
