use std::fs;
use std::path::Path;
use std::process::Command;

use cart_view::dom_renderer::html::render_document;

fn main() {
    println!("🚀 Building cart_view WASM with HTML generation...");

    let cli_args = cart_view::parse_args();
    cart_view::init_logger(&cli_args.log_level);

    // 1. wasm-pack でビルド
    println!("📦 Running wasm-pack build...");
    let status = Command::new("wasm-pack")
        .args([
            "build",
            "--dev", // devビルドで高速化
            "--target",
            "web",
            "--out-dir",
            "pkg",
            "--no-default-features",
            "--features",
            "wasm",
            "--bin",
            "cart_view", // main.rsをエントリーポイントに指定
        ])
        .status()
        .expect("Failed to execute wasm-pack");

    if !status.success() {
        eprintln!("❌ wasm-pack build failed");
        std::process::exit(1);
    }

    println!("✅ WASM build completed");

    let pkg_dir = Path::new("pkg");

    // 2. cart_view.js を絶対パスに修正
    println!("🔧 Fixing asset paths...");
    fix_asset_paths(pkg_dir);

    // 3. カートを描画したHTMLを生成
    println!("📝 Generating HTML file...");
    let cart = match cart_view::load_cart(&cli_args) {
        Ok(cart) => cart,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };
    let html = render_document(&cart, "Panier", "/cart_view.js");
    fs::write(pkg_dir.join("index.html"), html).expect("Failed to write index.html");

    println!("✅ HTML file generated:");
    println!("   - pkg/index.html");
    println!("\n🎉 Build complete! Serve the pkg directory with any static file server.");
}

fn fix_asset_paths(pkg_dir: &Path) {
    let js_path = pkg_dir.join("cart_view.js");

    if !js_path.exists() {
        eprintln!("⚠️  Warning: cart_view.js not found, skipping path fix");
        return;
    }

    let content = fs::read_to_string(&js_path).expect("Failed to read cart_view.js");

    // new URL('cart_view_bg.wasm', import.meta.url) を new URL('/cart_view_bg.wasm', window.location.origin) に置換
    let fixed_content = content.replace(
        "new URL('cart_view_bg.wasm', import.meta.url)",
        "new URL('/cart_view_bg.wasm', window.location.origin)",
    );

    fs::write(&js_path, fixed_content).expect("Failed to write fixed cart_view.js");

    println!("   ✓ Fixed WASM path in cart_view.js");
}
