// ========================================
// 表示テキストと数値の変換
// ========================================
//
// ページ上のテキストは常に正しい数値であるという前提で動くため、
// ここでのパースは寛容（先頭の数値部分だけを読む）で、読めなければ NaN になる。

use lazy_static::lazy_static;
use regex::Regex;

use super::card::Quantity;

/// 価格表示の通貨記号
pub const CURRENCY_MARKER: &str = "$";

lazy_static! {
    // 先頭の空白を除いた後の10進数プレフィックス
    static ref FLOAT_PREFIX: Regex =
        Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").unwrap();
    static ref INT_PREFIX: Regex = Regex::new(r"^([+-]?)(\d+)").unwrap();
}

/// 単価テキスト（例: `"12.50$"`）を数値に変換
///
/// 最初の通貨記号を取り除き、先頭から読める限りの数値を返す。
/// 数値が一文字も読めない場合は `NaN`。
pub fn parse_price(text: &str) -> f64 {
    let stripped = text.replacen(CURRENCY_MARKER, "", 1);
    parse_float_prefix(&stripped)
}

/// 先頭の数値部分を `f64` として読む
pub fn parse_float_prefix(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let Some(m) = FLOAT_PREFIX.find(trimmed) else {
        return f64::NAN;
    };

    let literal = m.as_str();
    match literal.trim_start_matches(['+', '-']) {
        "Infinity" => {
            if literal.starts_with('-') {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            }
        }
        _ => literal.parse::<f64>().unwrap_or(f64::NAN),
    }
}

/// 数量テキストを整数として読む
///
/// 小数部以降は無視する。負の値は 0 に丸め、桁あふれは `u32::MAX` に飽和させる。
pub fn parse_quantity(text: &str) -> Quantity {
    let trimmed = text.trim_start();
    let Some(caps) = INT_PREFIX.captures(trimmed) else {
        return Quantity::Malformed;
    };

    let negative = &caps[1] == "-";
    let digits = &caps[2];

    if negative {
        return Quantity::Count(0);
    }

    match digits.parse::<u32>() {
        Ok(n) => Quantity::Count(n),
        // 数字だけで構成されているので、失敗は桁あふれのみ
        Err(_) => Quantity::Count(u32::MAX),
    }
}

/// 小数点以下2桁の固定小数点表記
///
/// 2進数の厳密値に対して四捨五入する（0.125 -> "0.13"）。
/// `NaN` は `"NaN"`、無限大は `"Infinity"` / `"-Infinity"`。
pub fn to_fixed_2(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    // f64の小数部は最大1074桁なので、これで丸めのない厳密な10進展開になる
    let exact = format!("{:.1100}", value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(2))
        .map(|b| b - b'0')
        .collect();

    let round_up = frac_part.as_bytes().get(2).is_some_and(|d| *d >= b'5');
    if round_up {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == 9 {
                *d = 0;
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
        }
    }

    let split = digits.len() - 2;
    let mut out = String::with_capacity(digits.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    for d in &digits[..split] {
        out.push((b'0' + d) as char);
    }
    out.push('.');
    for d in &digits[split..] {
        out.push((b'0' + d) as char);
    }
    out
}

/// 単価の表示テキスト（`"<number>$"`）
pub fn format_unit_price(price: f64) -> String {
    format!("{}{}", to_fixed_2(price), CURRENCY_MARKER)
}

/// 合計の表示テキスト（`"<number> $"`）
pub fn format_total(total: f64) -> String {
    format!("{} {}", to_fixed_2(total), CURRENCY_MARKER)
}
