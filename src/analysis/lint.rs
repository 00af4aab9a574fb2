use crate::cart::{Cart, Quantity};
use std::collections::HashMap;

use super::error::Diagnostic;

/// 読み込んだカートの表示値を点検する
///
/// 壊れた値はそのまま計算に流れる（合計が NaN になる）ので、ここでは警告だけ出す。
pub fn run_lints(cart: &Cart) -> Vec<Diagnostic> {
    let mut diags = Vec::new();

    if cart.is_empty() {
        diags.push(Diagnostic::info("Cart has no cards; the total will be 0.00 $"));
    }

    for card in cart.cards() {
        let location = format!("card {}", card.id);

        if card.unit_price.is_nan() {
            diags.push(
                Diagnostic::warning("Unit price is not a number; the total will be NaN")
                    .at(location.clone()),
            );
        } else if card.unit_price.is_infinite() {
            diags.push(Diagnostic::error("Unit price is infinite").at(location.clone()));
        } else if card.unit_price < 0.0 {
            diags.push(Diagnostic::warning("Unit price is negative").at(location.clone()));
        }

        if card.quantity == Quantity::Malformed {
            diags.push(
                Diagnostic::warning("Quantity is not an integer; the total will be NaN")
                    .at(location.clone()),
            );
        }
    }

    // 同名カードチェック
    let mut name_counts: HashMap<&str, usize> = HashMap::new();
    for card in cart.cards().iter().filter(|c| !c.name.is_empty()) {
        *name_counts.entry(card.name.as_str()).or_insert(0) += 1;
    }
    let mut duplicates: Vec<_> = name_counts.into_iter().filter(|(_, n)| *n > 1).collect();
    duplicates.sort();
    for (name, count) in duplicates {
        diags.push(Diagnostic::info(format!("Product '{}' appears {} times", name, count)));
    }

    diags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::error::DiagnosticLevel;
    use crate::cart::Card;

    #[test]
    fn test_clean_cart_has_no_diagnostics() {
        let cart = Cart::from_cards(vec![Card::new("a", 1.0, 1), Card::new("b", 2.0, 0)]);
        assert!(run_lints(&cart).is_empty());
    }

    #[test]
    fn test_malformed_values_are_warned() {
        let cart = Cart::from_cards(vec![
            Card::from_display("a", "abc$", "1", false),
            Card::from_display("b", "3$", "many", false),
            Card::new("c", -1.0, 1),
        ]);
        let diags = run_lints(&cart);
        assert_eq!(diags.len(), 3);
        assert!(diags.iter().all(|d| d.level == DiagnosticLevel::Warning));
        assert_eq!(diags[0].location.as_deref(), Some("card 1"));
        assert_eq!(diags[1].location.as_deref(), Some("card 2"));
        assert!(diags[2].message.contains("negative"));
    }

    #[test]
    fn test_infinite_price_is_an_error() {
        let cart = Cart::from_cards(vec![Card::from_display("a", "Infinity$", "1", false)]);
        let diags = run_lints(&cart);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].level, DiagnosticLevel::Error);
        assert!(crate::analysis::analyze_cart(&cart).has_errors());
    }

    #[test]
    fn test_empty_and_duplicate_info() {
        let diags = run_lints(&Cart::new());
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].level, DiagnosticLevel::Info);

        let cart = Cart::from_cards(vec![Card::new("a", 1.0, 1), Card::new("a", 1.0, 2)]);
        let diags = run_lints(&cart);
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("'a' appears 2 times"));
    }
}
