// ========================================
// Cart View Controller
// ========================================
//
// カードレコードの変更と表示への反映を担当する。
// 合計は変更のたびに全カードから計算し直す。

use crate::cart::{compute_total, format_total, CardId, Cart};
use crate::engine::config::CartConfig;
use crate::engine::prompt::Prompter;
use crate::ui::event::{CartEvent, EffectTarget, EventQueue};
use crate::ui::view::CartView;
use log::{debug, info, warn};

pub struct CartController<V: CartView, P: Prompter> {
    cart: Cart,
    config: CartConfig,
    view: V,
    prompter: P,
    total: f64,
}

impl<V: CartView, P: Prompter> CartController<V, P> {
    pub fn new(cart: Cart, config: CartConfig, view: V, prompter: P) -> Self {
        Self {
            cart,
            config,
            view,
            prompter,
            total: 0.0,
        }
    }

    /// 初期化時に一度だけ合計を計算する
    pub fn initialize(&mut self) -> String {
        info!(
            "Cart initialized with {} cards (confirm_on_remove={}, notify_on_like={}, highlight_on_total_change={})",
            self.cart.len(),
            self.config.confirm_on_remove,
            self.config.notify_on_like,
            self.config.highlight_on_total_change
        );
        self.recompute_total()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    /// 最後に計算した合計
    pub fn total(&self) -> f64 {
        self.total
    }

    /// イベントを対応する操作に振り分ける
    pub fn dispatch(&mut self, event: &CartEvent) -> bool {
        match *event {
            CartEvent::Increase { card } => self.increase(card),
            CartEvent::Decrease { card } => self.decrease(card),
            CartEvent::Remove { card } => self.remove(card),
            CartEvent::ToggleLike { card } => self.toggle_like(card),
            CartEvent::ImageClicked { card } => self.click_image(card),
        }
    }

    /// キューに溜まったイベントをすべて処理し、処理できた件数を返す
    pub fn process(&mut self, queue: &mut EventQueue) -> usize {
        queue
            .drain()
            .iter()
            .filter(|event| self.dispatch(event))
            .count()
    }

    pub fn increase(&mut self, card: CardId) -> bool {
        self.update_quantity(card, true)
    }

    /// 0 のときは数量を変えないが、合計の再計算は行う
    pub fn decrease(&mut self, card: CardId) -> bool {
        self.update_quantity(card, false)
    }

    fn update_quantity(&mut self, id: CardId, is_increase: bool) -> bool {
        let Some(card) = self.cart.get_mut(id) else {
            warn!("Quantity update for unknown card {}", id);
            return false;
        };

        card.quantity = if is_increase {
            card.quantity.increased()
        } else {
            card.quantity.decreased()
        };
        let text = card.quantity_text();
        debug!("card {} quantity -> {}", id, text);

        self.view.set_quantity(id, &text);
        self.recompute_total();
        true
    }

    /// カードを削除する。確認が拒否された場合は何もしない
    pub fn remove(&mut self, id: CardId) -> bool {
        if self.cart.get(id).is_none() {
            warn!("Remove requested for unknown card {}", id);
            return false;
        }

        if self.config.confirm_on_remove && !self.prompter.confirm(&self.config.messages.confirm_remove) {
            debug!("removal of card {} declined", id);
            return false;
        }

        self.cart.remove(id);
        self.view.remove_card(id);
        debug!("card {} removed, {} left", id, self.cart.len());
        self.recompute_total();
        true
    }

    pub fn toggle_like(&mut self, id: CardId) -> bool {
        let Some(card) = self.cart.get_mut(id) else {
            warn!("Like toggled on unknown card {}", id);
            return false;
        };

        card.liked = !card.liked;
        let liked = card.liked;
        debug!("card {} liked -> {}", id, liked);
        self.view.set_liked(id, liked);

        if self.config.notify_on_like {
            let message = if liked {
                &self.config.messages.liked
            } else {
                &self.config.messages.unliked
            };
            self.prompter.notify(message);
        }
        true
    }

    /// 画像クリックの演出（カートの状態には影響しない）
    pub fn click_image(&mut self, id: CardId) -> bool {
        if self.cart.get(id).is_none() {
            warn!("Image click on unknown card {}", id);
            return false;
        }
        self.view.flash(
            EffectTarget::Image(id),
            &self.config.image_click_class,
            self.config.image_click_duration(),
        );
        true
    }

    /// 合計を計算し直して表示に書き込む
    pub fn recompute_total(&mut self) -> String {
        self.total = compute_total(self.cart.cards());
        let text = format_total(self.total);
        debug!("total -> {}", text);

        self.view.set_total(&text);
        if self.config.highlight_on_total_change {
            self.view.flash(
                EffectTarget::Total,
                &self.config.highlight_class,
                self.config.highlight_duration(),
            );
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{Card, Quantity};
    use crate::engine::prompt::ScriptedPrompter;
    use crate::ui::view::SnapshotView;
    use proptest::prelude::*;
    use std::time::Duration;

    type TestController = CartController<SnapshotView, ScriptedPrompter>;

    fn controller_with(cards: Vec<Card>, config: CartConfig, prompter: ScriptedPrompter) -> TestController {
        let cart = Cart::from_cards(cards);
        let view = SnapshotView::from_cart(&cart);
        let mut controller = CartController::new(cart, config, view, prompter);
        controller.initialize();
        controller
    }

    fn two_cards() -> Vec<Card> {
        vec![Card::new("Baskets", 10.0, 2), Card::new("Socks", 5.5, 1)]
    }

    fn quantity(controller: &TestController, id: CardId) -> Quantity {
        controller.cart().get(id).unwrap().quantity
    }

    #[test]
    fn test_initial_total() {
        let controller = controller_with(two_cards(), CartConfig::silent(), ScriptedPrompter::default());
        assert_eq!(controller.view().total_text(), "25.50 $");
        assert_eq!(controller.total(), 25.5);
    }

    #[test]
    fn test_cart_scenario() {
        let mut c = controller_with(two_cards(), CartConfig::silent(), ScriptedPrompter::default());

        assert!(c.increase(CardId(1)));
        assert_eq!(c.view().quantity_text(CardId(1)), Some("3"));
        assert_eq!(c.view().total_text(), "35.50 $");

        assert!(c.remove(CardId(2)));
        assert_eq!(c.view().total_text(), "30.00 $");

        for _ in 0..3 {
            c.decrease(CardId(1));
        }
        assert_eq!(quantity(&c, CardId(1)), Quantity::Count(0));
        c.decrease(CardId(1));
        assert_eq!(quantity(&c, CardId(1)), Quantity::Count(0));
        assert_eq!(c.view().quantity_text(CardId(1)), Some("0"));
        assert_eq!(c.view().total_text(), "0.00 $");
    }

    #[test]
    fn test_remove_declined_leaves_card() {
        let config = CartConfig::default();
        let mut c = controller_with(two_cards(), config.clone(), ScriptedPrompter::new([false]));
        c.view_mut().set_total("sentinel");

        assert!(!c.remove(CardId(2)));
        assert!(c.cart().get(CardId(2)).is_some());
        assert!(c.view().row(CardId(2)).is_some());
        // 拒否した場合は再計算しない
        assert_eq!(c.view().total_text(), "sentinel");
        assert_eq!(c.prompter().confirms, vec![config.messages.confirm_remove]);
    }

    #[test]
    fn test_remove_confirmed() {
        let mut c = controller_with(two_cards(), CartConfig::default(), ScriptedPrompter::new([true]));
        assert!(c.remove(CardId(1)));
        assert!(c.cart().get(CardId(1)).is_none());
        assert_eq!(c.view().total_text(), "5.50 $");
    }

    #[test]
    fn test_remove_without_confirmation() {
        let mut c = controller_with(two_cards(), CartConfig::silent(), ScriptedPrompter::default());
        assert!(c.remove(CardId(1)));
        assert!(c.prompter().confirms.is_empty());
    }

    #[test]
    fn test_unknown_card_is_ignored() {
        let mut c = controller_with(two_cards(), CartConfig::default(), ScriptedPrompter::new([true]));
        c.remove(CardId(2));

        assert!(!c.increase(CardId(2)));
        assert!(!c.decrease(CardId(2)));
        assert!(!c.remove(CardId(2)));
        assert!(!c.toggle_like(CardId(2)));
        assert!(!c.click_image(CardId(99)));
        assert_eq!(c.prompter().confirms.len(), 1);
    }

    #[test]
    fn test_unknown_card_does_not_recompute_total() {
        let mut c = controller_with(two_cards(), CartConfig::default(), ScriptedPrompter::new([true]));
        c.remove(CardId(2));
        c.view_mut().advance(Duration::from_millis(1500));
        c.view_mut().set_total("sentinel");

        c.increase(CardId(2));
        c.decrease(CardId(2));
        c.remove(CardId(2));
        c.toggle_like(CardId(2));
        c.click_image(CardId(99));

        assert_eq!(c.view().total_text(), "sentinel");
        assert!(!c.view().has_class(EffectTarget::Total, "blink"));
        c.view_mut().advance(Duration::from_millis(1500));
        assert!(!c.view().has_class(EffectTarget::Total, "blink"));
    }

    #[test]
    fn test_decrease_at_zero_recomputes_total() {
        let cards = vec![Card::new("empty", 10.0, 0), Card::new("Socks", 5.5, 1)];
        let mut c = controller_with(cards, CartConfig::default(), ScriptedPrompter::default());
        c.view_mut().advance(Duration::from_millis(1500));
        c.view_mut().set_total("sentinel");

        assert!(c.decrease(CardId(1)));
        assert_eq!(quantity(&c, CardId(1)), Quantity::Count(0));
        // 数量は変わらなくても合計は書き直され、強調表示も付く
        assert_eq!(c.view().total_text(), "5.50 $");
        assert!(c.view().has_class(EffectTarget::Total, "blink"));
    }

    #[test]
    fn test_like_notifications() {
        let config = CartConfig::default();
        let mut c = controller_with(two_cards(), config.clone(), ScriptedPrompter::default());

        c.toggle_like(CardId(1));
        assert!(c.cart().get(CardId(1)).unwrap().liked);
        assert!(c.view().row(CardId(1)).unwrap().liked);
        c.toggle_like(CardId(1));
        assert!(!c.cart().get(CardId(1)).unwrap().liked);

        assert_eq!(
            c.prompter().notifications,
            vec![config.messages.liked.clone(), config.messages.unliked.clone()]
        );
    }

    #[test]
    fn test_silent_like() {
        let mut c = controller_with(two_cards(), CartConfig::silent(), ScriptedPrompter::default());
        c.toggle_like(CardId(2));
        assert!(c.cart().get(CardId(2)).unwrap().liked);
        assert!(c.prompter().notifications.is_empty());
    }

    #[test]
    fn test_total_highlight() {
        let mut c = controller_with(two_cards(), CartConfig::default(), ScriptedPrompter::default());
        assert!(c.view().has_class(EffectTarget::Total, "blink"));

        c.view_mut().advance(Duration::from_millis(1500));
        assert!(!c.view().has_class(EffectTarget::Total, "blink"));

        c.increase(CardId(1));
        assert!(c.view().has_class(EffectTarget::Total, "blink"));
    }

    #[test]
    fn test_no_highlight_when_disabled() {
        let mut c = controller_with(two_cards(), CartConfig::silent(), ScriptedPrompter::default());
        c.increase(CardId(1));
        assert!(!c.view().has_class(EffectTarget::Total, "blink"));
    }

    #[test]
    fn test_image_click_pulse() {
        let mut c = controller_with(two_cards(), CartConfig::silent(), ScriptedPrompter::default());
        let img = EffectTarget::Image(CardId(2));

        assert!(c.click_image(CardId(2)));
        assert!(c.view().has_class(img, "image-clicked"));
        assert_eq!(c.view().total_text(), "25.50 $");

        c.view_mut().advance(Duration::from_millis(500));
        assert!(!c.view().has_class(img, "image-clicked"));
    }

    #[test]
    fn test_dispatch_and_process_queue() {
        let mut c = controller_with(two_cards(), CartConfig::silent(), ScriptedPrompter::default());
        let mut queue = EventQueue::new();
        queue.push(CartEvent::Increase { card: CardId(2) });
        queue.push(CartEvent::ToggleLike { card: CardId(2) });
        queue.push(CartEvent::Remove { card: CardId(1) });
        queue.push(CartEvent::Decrease { card: CardId(1) });

        assert_eq!(c.process(&mut queue), 3);
        assert!(queue.is_empty());
        assert_eq!(c.view().total_text(), "11.00 $");
    }

    #[test]
    fn test_malformed_quantity_propagates_nan() {
        let cards = vec![
            Card::new("ok", 10.0, 1),
            Card::from_display("broken", "5$", "two", false),
        ];
        let mut c = controller_with(cards, CartConfig::silent(), ScriptedPrompter::default());
        assert_eq!(c.view().total_text(), "NaN $");

        c.increase(CardId(2));
        assert_eq!(c.view().quantity_text(CardId(2)), Some("NaN"));

        // 壊れたカードを消せば合計は元に戻る
        c.remove(CardId(2));
        assert_eq!(c.view().total_text(), "10.00 $");
    }

    proptest! {
        #[test]
        fn test_decrease_at_zero_stays_zero(extra in 1usize..10) {
            let mut c = controller_with(vec![Card::new("p", 1.0, 0)], CartConfig::silent(), ScriptedPrompter::default());
            for _ in 0..extra {
                c.decrease(CardId(1));
            }
            prop_assert_eq!(quantity(&c, CardId(1)), Quantity::Count(0));
        }

        #[test]
        fn test_increase_then_decrease_restores(start in 0u32..1000, n in 0usize..50) {
            let mut c = controller_with(vec![Card::new("p", 2.5, start)], CartConfig::silent(), ScriptedPrompter::default());
            let before = c.view().total_text().to_string();
            for _ in 0..n {
                c.increase(CardId(1));
            }
            for _ in 0..n {
                c.decrease(CardId(1));
            }
            prop_assert_eq!(quantity(&c, CardId(1)), Quantity::Count(start));
            prop_assert_eq!(c.view().total_text(), before.as_str());
        }

        #[test]
        fn test_toggle_like_twice_restores(initially_liked in any::<bool>()) {
            let card = Card::new("p", 1.0, 1).with_liked(initially_liked);
            let mut c = controller_with(vec![card], CartConfig::default(), ScriptedPrompter::default());
            c.toggle_like(CardId(1));
            c.toggle_like(CardId(1));
            prop_assert_eq!(c.cart().get(CardId(1)).unwrap().liked, initially_liked);
        }

        #[test]
        fn test_removed_card_excluded_from_total(
            lines in proptest::collection::vec((0u32..10_000, 0u32..100), 1..10),
            pick in any::<proptest::sample::Index>(),
        ) {
            let cards: Vec<Card> = lines
                .iter()
                .map(|(cents, qty)| Card::new("p", *cents as f64 / 100.0, *qty))
                .collect();
            let mut c = controller_with(cards, CartConfig::silent(), ScriptedPrompter::default());

            let removed = CardId(pick.index(lines.len()) as u32 + 1);
            c.remove(removed);
            let remaining = c.cart().cards().to_vec();
            c.increase(remaining.first().map(|card| card.id).unwrap_or(removed));

            let expected = compute_total(c.cart().cards());
            prop_assert!(c.cart().get(removed).is_none());
            prop_assert_eq!(c.view().total_text(), format_total(expected));
        }
    }
}
