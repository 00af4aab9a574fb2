use crate::cart::{Card, CardId, Cart};
use crate::engine::effects::EffectTimeline;
use crate::ui::event::EffectTarget;
use std::time::Duration;

/// レコードの変更を表示へ反映するアダプタ
///
/// ブラウザでは `dom_renderer::dom::DomCartView`、ネイティブとテストでは
/// `SnapshotView` が実装する。
pub trait CartView {
    fn set_quantity(&mut self, card: CardId, text: &str);
    fn set_liked(&mut self, card: CardId, liked: bool);
    fn remove_card(&mut self, card: CardId);
    fn set_total(&mut self, text: &str);

    /// `class` を付与し、`duration` 後に外す
    ///
    /// 付与ごとに独立したタイマーが走り、取り消しはできない。
    fn flash(&mut self, target: EffectTarget, class: &str, duration: Duration);
}

/// 表示上のカード1枚
#[derive(Debug, Clone, PartialEq)]
pub struct CardRow {
    pub id: CardId,
    pub name: String,
    pub image: String,
    pub price_text: String,
    pub quantity_text: String,
    pub liked: bool,
}

impl From<&Card> for CardRow {
    fn from(card: &Card) -> Self {
        Self {
            id: card.id,
            name: card.name.clone(),
            image: card.image.clone(),
            price_text: card.price_text(),
            quantity_text: card.quantity_text(),
            liked: card.liked,
        }
    }
}

/// メモリ上に表示内容を保持するビュー
///
/// 視覚効果は `EffectTimeline` で管理し、`advance` で時間を進める。
#[derive(Debug, Clone)]
pub struct SnapshotView {
    rows: Vec<CardRow>,
    total_text: String,
    effects: EffectTimeline,
}

impl SnapshotView {
    pub fn from_cart(cart: &Cart) -> Self {
        Self {
            rows: cart.cards().iter().map(CardRow::from).collect(),
            total_text: String::new(),
            effects: EffectTimeline::new(),
        }
    }

    pub fn rows(&self) -> &[CardRow] {
        &self.rows
    }

    pub fn row(&self, card: CardId) -> Option<&CardRow> {
        self.rows.iter().find(|r| r.id == card)
    }

    pub fn total_text(&self) -> &str {
        &self.total_text
    }

    pub fn quantity_text(&self, card: CardId) -> Option<&str> {
        self.row(card).map(|r| r.quantity_text.as_str())
    }

    pub fn has_class(&self, target: EffectTarget, class: &str) -> bool {
        self.effects.is_active(target, class)
    }

    /// 効果用の時計を進め、期限が来たクラスを外す
    pub fn advance(&mut self, elapsed: Duration) {
        self.effects.advance(elapsed);
    }

    pub fn effects(&self) -> &EffectTimeline {
        &self.effects
    }

    /// 現在の表示内容をHTMLとして出力
    pub fn render_html(&self) -> String {
        crate::dom_renderer::html::render_rows(&self.rows, &self.total_text, |target| {
            self.effects.active_classes(target)
        })
    }
}

impl CartView for SnapshotView {
    fn set_quantity(&mut self, card: CardId, text: &str) {
        if let Some(row) = self.rows.iter_mut().find(|r| r.id == card) {
            row.quantity_text = text.to_string();
        }
    }

    fn set_liked(&mut self, card: CardId, liked: bool) {
        if let Some(row) = self.rows.iter_mut().find(|r| r.id == card) {
            row.liked = liked;
        }
    }

    fn remove_card(&mut self, card: CardId) {
        self.rows.retain(|r| r.id != card);
        self.effects.forget(EffectTarget::Image(card));
    }

    fn set_total(&mut self, text: &str) {
        self.total_text = text.to_string();
    }

    fn flash(&mut self, target: EffectTarget, class: &str, duration: Duration) {
        self.effects.trigger(target, class, duration);
    }
}
