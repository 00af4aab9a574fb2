// ブラウザのDOMに対するカートビュー
//
// ページに描画済みのカードを探してレコードを作り、各ボタンにクリックイベントを結びつける。

use crate::cart::{Card, CardId, Cart};
use crate::engine::config::CartConfig;
use crate::engine::controller::CartController;
use crate::engine::prompt::Prompter;
use crate::ui::event::{CartEvent, EffectTarget};
use crate::ui::view::CartView;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, window};

use super::timeout_millis;
use super::html::{
    CARD_ID_ATTR, CARD_SELECTOR, DECREASE_SELECTOR, IMAGE_SELECTOR, INCREASE_SELECTOR,
    LIKED_CLASS, LIKE_SELECTOR, QUANTITY_SELECTOR, REMOVE_SELECTOR, TITLE_SELECTOR,
    TOTAL_SELECTOR, UNIT_PRICE_SELECTOR,
};

pub type DomController = CartController<DomCartView, BrowserPrompter>;

/// `window.confirm` / `window.alert` を使うプロンプト
pub struct BrowserPrompter;

impl Prompter for BrowserPrompter {
    fn confirm(&mut self, message: &str) -> bool {
        window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    fn notify(&mut self, message: &str) {
        if let Some(w) = window() {
            let _ = w.alert_with_message(message);
        }
    }
}

/// 実際のDOM要素を書き換えるビュー
pub struct DomCartView {
    cards: HashMap<CardId, Element>,
    total: Option<Element>,
}

fn query_all(root: &Document, selector: &str) -> Vec<Element> {
    let mut elements = Vec::new();
    if let Ok(list) = root.query_selector_all(selector) {
        for i in 0..list.length() {
            if let Some(element) = list.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                elements.push(element);
            }
        }
    }
    elements
}

fn child_text(parent: &Element, selector: &str) -> String {
    parent
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|e| e.text_content())
        .unwrap_or_default()
}

impl DomCartView {
    /// ページ上のカードを読み取り、ビューとカートを作る
    ///
    /// 各カードには `data-card-id` を振り、クリック時に対応するレコードを引けるようにする。
    pub fn discover(document: &Document) -> (Self, Cart) {
        let mut cart = Cart::new();
        let mut cards = HashMap::new();

        for element in query_all(document, CARD_SELECTOR) {
            let liked = element
                .query_selector(LIKE_SELECTOR)
                .ok()
                .flatten()
                .map(|heart| heart.class_list().contains(LIKED_CLASS))
                .unwrap_or(false);
            let image = element
                .query_selector("img")
                .ok()
                .flatten()
                .and_then(|img| img.get_attribute("src"))
                .unwrap_or_default();

            let card = Card::from_display(
                child_text(&element, TITLE_SELECTOR).trim(),
                &child_text(&element, UNIT_PRICE_SELECTOR),
                &child_text(&element, QUANTITY_SELECTOR),
                liked,
            )
            .with_image(image);

            let id = cart.push(card);
            let _ = element.set_attribute(CARD_ID_ATTR, &id.to_string());
            cards.insert(id, element);
        }

        let total = document.query_selector(TOTAL_SELECTOR).ok().flatten();
        if total.is_none() {
            log::warn!("No {} element found; the total will not be displayed", TOTAL_SELECTOR);
        }

        log::info!("Discovered {} cards", cart.len());
        (Self { cards, total }, cart)
    }

    fn card_child(&self, card: CardId, selector: &str) -> Option<Element> {
        self.cards.get(&card)?.query_selector(selector).ok().flatten()
    }

    fn effect_element(&self, target: EffectTarget) -> Option<Element> {
        match target {
            EffectTarget::Total => self.total.clone(),
            EffectTarget::Image(card) => self.card_child(card, "img"),
        }
    }
}

impl CartView for DomCartView {
    fn set_quantity(&mut self, card: CardId, text: &str) {
        if let Some(el) = self.card_child(card, QUANTITY_SELECTOR) {
            el.set_text_content(Some(text));
        }
    }

    fn set_liked(&mut self, card: CardId, liked: bool) {
        if let Some(el) = self.card_child(card, LIKE_SELECTOR) {
            let _ = el.class_list().toggle_with_force(LIKED_CLASS, liked);
        }
    }

    fn remove_card(&mut self, card: CardId) {
        if let Some(el) = self.cards.remove(&card) {
            el.remove();
        }
    }

    fn set_total(&mut self, text: &str) {
        if let Some(el) = &self.total {
            el.set_text_content(Some(text));
        }
    }

    fn flash(&mut self, target: EffectTarget, class: &str, duration: Duration) {
        let Some(element) = self.effect_element(target) else {
            return;
        };
        let _ = element.class_list().add_1(class);

        let class = class.to_string();
        let callback = Closure::once_into_js(move || {
            let _ = element.class_list().remove_1(&class);
        });
        if let Some(w) = window() {
            let _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                timeout_millis(duration),
            );
        }
    }
}

/// クリックされた要素の属するカードのIDを取得
fn enclosing_card(element: &Element) -> Option<CardId> {
    let card = element.closest(CARD_SELECTOR).ok().flatten()?;
    let id = card.get_attribute(CARD_ID_ATTR)?.parse::<u32>().ok()?;
    Some(CardId(id))
}

fn bind_all<F>(document: &Document, selector: &str, controller: &Arc<Mutex<DomController>>, make_event: F)
where
    F: Fn(CardId) -> CartEvent + Copy + 'static,
{
    let elements = query_all(document, selector);
    let count = elements.len();

    for element in elements {
        let controller = Arc::clone(controller);
        let target = element.clone();
        let closure = Closure::wrap(Box::new(move |_event: web_sys::MouseEvent| {
            let Some(card) = enclosing_card(&target) else {
                return;
            };
            if let Ok(mut controller) = controller.lock() {
                controller.dispatch(&make_event(card));
            }
        }) as Box<dyn FnMut(_)>);
        element
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }

    log::debug!("Bound {} '{}' controls", count, selector);
}

/// 各操作ボタンにクリックイベントを登録する
pub fn bind_controls(document: &Document, controller: &Arc<Mutex<DomController>>) {
    bind_all(document, INCREASE_SELECTOR, controller, |card| CartEvent::Increase { card });
    bind_all(document, DECREASE_SELECTOR, controller, |card| CartEvent::Decrease { card });
    bind_all(document, REMOVE_SELECTOR, controller, |card| CartEvent::Remove { card });
    bind_all(document, LIKE_SELECTOR, controller, |card| CartEvent::ToggleLike { card });
    bind_all(document, IMAGE_SELECTOR, controller, |card| CartEvent::ImageClicked { card });
}

/// ページ上のカートを起動する
pub fn start(config: CartConfig) -> Result<Arc<Mutex<DomController>>, String> {
    let document = window()
        .and_then(|w| w.document())
        .ok_or_else(|| "No document available".to_string())?;

    let (view, cart) = DomCartView::discover(&document);
    let mut controller = CartController::new(cart, config, view, BrowserPrompter);
    controller.initialize();

    let controller = Arc::new(Mutex::new(controller));
    bind_controls(&document, &controller);
    log::info!("Cart controls bound");
    Ok(controller)
}
