use super::card::Card;
use super::number::format_total;

/// 表示中の全カードについて 単価 × 数量 の合計を求める
pub fn compute_total(cards: &[Card]) -> f64 {
    cards.iter().fold(0.0, |acc, card| acc + card.line_total())
}

/// 合計を計算して表示テキストにする
pub fn total_text(cards: &[Card]) -> String {
    format_total(compute_total(cards))
}
