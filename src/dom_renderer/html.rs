// カートページのHTML生成
//
// ブラウザ側のアダプタ（dom.rs）が探すクラス名と同じ構造を出力する。

use crate::cart::{total_text, Cart};
use crate::ui::event::EffectTarget;
use crate::ui::view::CardRow;

pub const CARD_SELECTOR: &str = ".card";
pub const UNIT_PRICE_SELECTOR: &str = ".unit-price";
pub const QUANTITY_SELECTOR: &str = ".quantity";
pub const INCREASE_SELECTOR: &str = ".fa-plus-circle";
pub const DECREASE_SELECTOR: &str = ".fa-minus-circle";
pub const REMOVE_SELECTOR: &str = ".fa-trash-alt";
pub const LIKE_SELECTOR: &str = ".fa-heart";
pub const IMAGE_SELECTOR: &str = ".card img";
pub const TOTAL_SELECTOR: &str = ".total";
pub const TITLE_SELECTOR: &str = ".card-title";

pub const CARD_ID_ATTR: &str = "data-card-id";
pub const LIKED_CLASS: &str = "liked";

pub const PAGE_STYLE: &str = r#"
        body {
            font-family: sans-serif;
            margin: 2rem;
        }
        .list-products {
            display: flex;
            flex-wrap: wrap;
            gap: 1rem;
        }
        .card {
            border: 1px solid #ddd;
            border-radius: 8px;
            padding: 1rem;
            width: 14rem;
        }
        .card img {
            width: 100%;
            transition: transform 0.3s, filter 0.3s;
        }
        .card img.image-clicked {
            transform: scale(1.1);
            filter: hue-rotate(90deg);
        }
        .fas {
            cursor: pointer;
            margin-right: 0.5rem;
        }
        .fa-heart.liked {
            color: red;
        }
        .total.blink {
            animation: blink 0.5s step-start 3;
            color: #e67e22;
        }
        @keyframes blink {
            50% { opacity: 0; }
        }
"#;

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn class_attr(base: &str, extra: &[String]) -> String {
    if extra.is_empty() {
        base.to_string()
    } else {
        format!("{} {}", base, extra.join(" "))
    }
}

/// カード1枚分のマークアップ
pub fn render_card(row: &CardRow, image_classes: &[String]) -> String {
    let heart_class = if row.liked {
        format!("fas fa-heart {}", LIKED_CLASS)
    } else {
        "fas fa-heart".to_string()
    };
    let img_class_attr = if image_classes.is_empty() {
        String::new()
    } else {
        format!(r#" class="{}""#, image_classes.join(" "))
    };

    format!(
        r#"<div class="card" {attr}="{id}">
  <img src="{image}" alt="{name}"{img_class}>
  <h5 class="card-title">{name}</h5>
  <span class="unit-price">{price}</span>
  <div>
    <i class="fas fa-plus-circle"></i>
    <span class="quantity">{quantity}</span>
    <i class="fas fa-minus-circle"></i>
  </div>
  <div>
    <i class="fas fa-trash-alt"></i>
    <i class="{heart}"></i>
  </div>
</div>"#,
        attr = CARD_ID_ATTR,
        id = row.id,
        image = escape(&row.image),
        name = escape(&row.name),
        img_class = img_class_attr,
        price = escape(&row.price_text),
        quantity = escape(&row.quantity_text),
        heart = heart_class,
    )
}

/// カード一覧と合計欄
///
/// `classes_for` は一時的に付与されているクラスを返す。
pub fn render_rows<F>(rows: &[CardRow], total: &str, classes_for: F) -> String
where
    F: Fn(EffectTarget) -> Vec<String>,
{
    let mut html = String::from("<div class=\"list-products\">\n");
    for row in rows {
        html.push_str(&render_card(row, &classes_for(EffectTarget::Image(row.id))));
        html.push('\n');
    }
    html.push_str("</div>\n");
    html.push_str(&format!(
        "<div>Total: <span class=\"{}\">{}</span></div>\n",
        class_attr("total", &classes_for(EffectTarget::Total)),
        escape(total)
    ));
    html
}

/// カートの初期表示
pub fn render_page(cart: &Cart) -> String {
    let rows: Vec<CardRow> = cart.cards().iter().map(CardRow::from).collect();
    render_rows(&rows, &total_text(cart.cards()), |_| Vec::new())
}

/// wasmモジュールを読み込む完全なHTMLドキュメント
pub fn render_document(cart: &Cart, title: &str, script_path: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{style}    </style>
</head>
<body>
{body}    <script type="module">
        import init from '{script}';
        init().catch(console.error);
    </script>
</body>
</html>
"#,
        title = escape(title),
        style = PAGE_STYLE,
        body = render_page(cart),
        script = script_path,
    )
}
