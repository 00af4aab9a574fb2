pub mod analysis;
pub mod cart;
pub mod dom_renderer;
pub mod engine;
pub mod ui;

#[cfg(feature = "native")]
pub mod terminal;

#[cfg(feature = "wasm")]
pub mod wasm_entry;

use analysis::error::DiagnosticLevel;
use log::{error, info, warn};
use std::env;
use std::path::PathBuf;

pub use cart::{Card, CardId, Cart, Quantity};
pub use engine::{CartConfig, CartController, Prompter};
pub use ui::{CartEvent, CartView, SnapshotView};

#[cfg(feature = "wasm")]
pub use wasm_entry::run_cart_wasm;

// ========================================
// コマンドライン引数構造体
// ========================================

/// コマンドライン引数の設定
#[derive(Debug)]
pub struct CliArgs {
    pub enable_lint: bool,
    pub quiet: bool, // panic以外のログを抑制
    pub log_level: LogLevel,
    pub show_help: bool,
    pub cart_path: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    // 設定ファイルより優先される
    pub confirm_on_remove: Option<bool>,
    pub notify_on_like: Option<bool>,
    pub highlight_on_total_change: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLevel {
    Off,   // ログを一切表示しない（panicは除く）
    Error, // エラーレベルのみ
    Warn,  // 警告レベル以上
    Info,  // 情報レベル以上
    Debug, // デバッグレベル以上
    Trace, // 全てのログ
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            enable_lint: true,
            quiet: false,
            log_level: LogLevel::Warn,
            show_help: false,
            cart_path: None,
            config_path: None,
            confirm_on_remove: None,
            notify_on_like: None,
            highlight_on_total_change: None,
        }
    }
}

pub fn parse_args() -> CliArgs {
    let cli_args = parse_args_from(env::args().skip(1));
    if cli_args.show_help {
        show_help();
        std::process::exit(0);
    }
    cli_args
}

/// プログラム名を除いた引数列を解釈する
pub fn parse_args_from<I, S>(args: I) -> CliArgs
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut cli_args = CliArgs::default();

    for arg in args {
        let arg = arg.as_ref();
        match arg {
            "--no-lint" => cli_args.enable_lint = false,
            "--lint" => cli_args.enable_lint = true,
            "--confirm" => cli_args.confirm_on_remove = Some(true),
            "--no-confirm" => cli_args.confirm_on_remove = Some(false),
            "--notify" => cli_args.notify_on_like = Some(true),
            "--no-notify" => cli_args.notify_on_like = Some(false),
            "--highlight" => cli_args.highlight_on_total_change = Some(true),
            "--no-highlight" => cli_args.highlight_on_total_change = Some(false),
            "--plain" => {
                cli_args.confirm_on_remove = Some(false);
                cli_args.notify_on_like = Some(false);
                cli_args.highlight_on_total_change = Some(false);
            }
            "--quiet" | "-q" => {
                cli_args.quiet = true;
                cli_args.log_level = LogLevel::Off;
            }
            "--log-level=off" => cli_args.log_level = LogLevel::Off,
            "--log-level=error" => cli_args.log_level = LogLevel::Error,
            "--log-level=warn" => cli_args.log_level = LogLevel::Warn,
            "--log-level=info" => cli_args.log_level = LogLevel::Info,
            "--log-level=debug" => cli_args.log_level = LogLevel::Debug,
            "--log-level=trace" => cli_args.log_level = LogLevel::Trace,
            "--help" | "-h" => cli_args.show_help = true,
            _ => {
                if let Some(path) = arg.strip_prefix("--cart=") {
                    cli_args.cart_path = Some(PathBuf::from(path));
                } else if let Some(path) = arg.strip_prefix("--config=") {
                    cli_args.config_path = Some(PathBuf::from(path));
                } else {
                    warn!("Ignoring unknown argument: {}", arg);
                }
            }
        }
    }
    cli_args
}

pub const HELP: &str = "Cart View Runner

USAGE:
    cart_view [OPTIONS]

OPTIONS:
    --cart=PATH              Load the cart from a JSON file (default: demo cart)
    --config=PATH            Load the controller settings from a JSON file
    --confirm/--no-confirm   Ask before removing a product (default: enabled)
    --notify/--no-notify     Notify when a product is liked/unliked (default: enabled)
    --highlight/--no-highlight
                             Highlight the total after each change (default: enabled)
    --plain                  Same as --no-confirm --no-notify --no-highlight
    --lint/--no-lint         Enable/disable cart checks (default: enabled)
    --quiet, -q              Suppress all logs except panics
    --log-level=LEVEL        Set log level (off/error/warn/info/debug/trace)
    --help, -h               Show this help";

pub fn show_help() {
    println!("{}", HELP);
}

/// ログレベルを初期化する関数
pub fn init_logger(log_level: &LogLevel) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::sync::Once;

    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let level = match log_level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        };

        let mut builder = Builder::from_default_env();

        if matches!(log_level, LogLevel::Off) {
            // quietモードの場合、何も出力しない（panicは別途処理される）
            builder
                .filter_level(LevelFilter::Off)
                .format(|_, _| Ok(()))
                .try_init()
                .ok(); // エラーを無視
        } else {
            builder
                .filter_level(level)
                .format_timestamp_secs()
                .try_init()
                .ok(); // エラーを無視
        }
    });
}

/// 設定ファイル（あれば）を読み込み、コマンドライン引数で上書きする
pub fn load_config(cli_args: &CliArgs) -> Result<CartConfig, String> {
    let mut config = match &cli_args.config_path {
        Some(path) => CartConfig::load(path)?,
        None => CartConfig::default(),
    };

    if let Some(v) = cli_args.confirm_on_remove {
        config.confirm_on_remove = v;
    }
    if let Some(v) = cli_args.notify_on_like {
        config.notify_on_like = v;
    }
    if let Some(v) = cli_args.highlight_on_total_change {
        config.highlight_on_total_change = v;
    }
    Ok(config)
}

/// 組み込みのデモ用カート
pub fn demo_cart() -> Cart {
    Cart::from_cards(vec![
        Card::new("Baskets", 100.0, 0).with_image("assets/baskets.png"),
        Card::new("Socks", 20.0, 0).with_image("assets/socks.png"),
        Card::new("Bag", 50.0, 0).with_image("assets/bag.png"),
    ])
}

/// カートを読み込み、必要なら点検結果を出力する
pub fn load_cart(cli_args: &CliArgs) -> Result<Cart, String> {
    let cart = match &cli_args.cart_path {
        Some(path) => Cart::load(path)?,
        None => demo_cart(),
    };
    info!("Loaded cart with {} cards", cart.len());

    if cli_args.enable_lint && !cli_args.quiet {
        let analysis_result = analysis::analyze_cart(&cart);

        for diag in &analysis_result.diagnostics {
            let loc = diag.location.as_deref().unwrap_or("");
            let text = format!("{} {}", loc, diag.message);
            let msg = paint(text.trim(), diag.level);
            match diag.level {
                DiagnosticLevel::Error => error!("[{:?}] {}", diag.level, msg),
                DiagnosticLevel::Warning => warn!("[{:?}] {}", diag.level, msg),
                DiagnosticLevel::Info => info!("[{:?}] {}", diag.level, msg),
            }
        }

        if analysis_result.has_errors() {
            error!("Cart checks found errors. Use --no-lint to skip cart checks.");
        }
    }

    Ok(cart)
}

#[cfg(feature = "native")]
fn paint(text: &str, level: DiagnosticLevel) -> String {
    use colored::*;
    match level {
        DiagnosticLevel::Error => text.red().bold().to_string(),
        DiagnosticLevel::Warning => text.yellow().bold().to_string(),
        DiagnosticLevel::Info => text.blue().to_string(),
    }
}

#[cfg(not(feature = "native"))]
fn paint(text: &str, _level: DiagnosticLevel) -> String {
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args_defaults() {
        let args = parse_args_from(Vec::<String>::new());
        assert!(args.enable_lint);
        assert_eq!(args.log_level, LogLevel::Warn);
        assert!(args.cart_path.is_none());
        assert!(args.confirm_on_remove.is_none());
    }

    #[test]
    fn test_parse_args_flags() {
        let args = parse_args_from([
            "--cart=fixtures/cart.json",
            "--no-confirm",
            "--highlight",
            "--log-level=debug",
            "--bogus",
        ]);
        assert_eq!(args.cart_path, Some(PathBuf::from("fixtures/cart.json")));
        assert_eq!(args.confirm_on_remove, Some(false));
        assert_eq!(args.highlight_on_total_change, Some(true));
        assert_eq!(args.notify_on_like, None);
        assert_eq!(args.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_plain_and_quiet() {
        let args = parse_args_from(["--plain", "-q", "--help"]);
        assert_eq!(args.confirm_on_remove, Some(false));
        assert_eq!(args.notify_on_like, Some(false));
        assert_eq!(args.highlight_on_total_change, Some(false));
        assert!(args.quiet);
        assert_eq!(args.log_level, LogLevel::Off);
        assert!(args.show_help);
    }

    #[test]
    fn test_load_config_applies_overrides() {
        let args = parse_args_from(["--no-notify"]);
        let config = load_config(&args).unwrap();
        assert!(config.confirm_on_remove);
        assert!(!config.notify_on_like);
    }

    #[test]
    fn test_load_cart_defaults_to_demo() {
        let args = parse_args_from(["--no-lint"]);
        let cart = load_cart(&args).unwrap();
        assert_eq!(cart.len(), 3);
        assert_eq!(cart::total_text(cart.cards()), "0.00 $");
    }

    #[test]
    fn test_load_cart_missing_file() {
        let args = parse_args_from(["--cart=/nonexistent/cart.json"]);
        assert!(load_cart(&args).unwrap_err().contains("Failed to read cart file"));
    }
}
