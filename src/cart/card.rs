use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::number::{format_unit_price, parse_price, parse_quantity};

/// カードの識別子（セッション内で再利用されない）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// カードの数量
///
/// ページ上のテキストが整数として読めなかった場合は `Malformed` のまま保持し、
/// 増減しても変化しない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Count(u32),
    Malformed,
}

impl Quantity {
    /// 合計計算用の値（読めない数量は NaN）
    pub fn as_f64(&self) -> f64 {
        match self {
            Quantity::Count(n) => *n as f64,
            Quantity::Malformed => f64::NAN,
        }
    }

    pub fn increased(self) -> Self {
        match self {
            Quantity::Count(n) => Quantity::Count(n.saturating_add(1)),
            Quantity::Malformed => Quantity::Malformed,
        }
    }

    /// 0 未満にはならない
    pub fn decreased(self) -> Self {
        match self {
            Quantity::Count(n) if n > 0 => Quantity::Count(n - 1),
            other => other,
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::Count(0)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Count(n) => write!(f, "{}", n),
            Quantity::Malformed => write!(f, "NaN"),
        }
    }
}

/// 商品カード1枚分のレコード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    #[serde(default = "CardId::unassigned")]
    pub id: CardId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(deserialize_with = "price_or_nan")]
    pub unit_price: f64,
    #[serde(default)]
    pub quantity: Quantity,
    #[serde(default)]
    pub liked: bool,
}

impl CardId {
    fn unassigned() -> Self {
        CardId(0)
    }
}

// serde_json は NaN / 無限大を null として書き出すので、読み込み時は NaN に戻す
fn price_or_nan<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

impl Card {
    pub fn new(name: impl Into<String>, unit_price: f64, quantity: u32) -> Self {
        Self {
            id: CardId::unassigned(),
            name: name.into(),
            image: String::new(),
            unit_price,
            quantity: Quantity::Count(quantity),
            liked: false,
        }
    }

    /// 表示テキストからカードを組み立てる（ページから読み取る場合）
    pub fn from_display(name: impl Into<String>, price_text: &str, quantity_text: &str, liked: bool) -> Self {
        Self {
            id: CardId::unassigned(),
            name: name.into(),
            image: String::new(),
            unit_price: parse_price(price_text),
            quantity: parse_quantity(quantity_text),
            liked,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_liked(mut self, liked: bool) -> Self {
        self.liked = liked;
        self
    }

    /// 単価 × 数量
    pub fn line_total(&self) -> f64 {
        self.unit_price * self.quantity.as_f64()
    }

    pub fn price_text(&self) -> String {
        format_unit_price(self.unit_price)
    }

    pub fn quantity_text(&self) -> String {
        self.quantity.to_string()
    }
}

/// 表示中のカード一覧（表示順を保持）
#[derive(Debug, Clone, Default, Serialize)]
pub struct Cart {
    cards: Vec<Card>,
    #[serde(skip)]
    next_id: u32,
}

impl Cart {
    pub fn new() -> Self {
        Self {
            cards: Vec::new(),
            next_id: 1,
        }
    }

    /// カードのリストからカートを作成し、IDを先頭から順に振り直す
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut cart = Self::new();
        for card in cards {
            cart.push(card);
        }
        cart
    }

    /// JSONの `{"cards": [...]}` または `[...]` から読み込む
    pub fn from_json(source: &str) -> Result<Self, String> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum CartFile {
            Wrapped { cards: Vec<Card> },
            Bare(Vec<Card>),
        }

        let file: CartFile =
            serde_json::from_str(source).map_err(|e| format!("Failed to parse cart JSON: {}", e))?;
        let cards = match file {
            CartFile::Wrapped { cards } => cards,
            CartFile::Bare(cards) => cards,
        };
        Ok(Self::from_cards(cards))
    }

    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cart file {}: {}", path.display(), e))?;
        Self::from_json(&source)
    }

    /// カードを末尾に追加して、振られたIDを返す
    pub fn push(&mut self, mut card: Card) -> CardId {
        if self.next_id == 0 {
            self.next_id = 1;
        }
        let id = CardId(self.next_id);
        self.next_id += 1;
        card.id = id;
        self.cards.push(card);
        id
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.id == id)
    }

    /// カードを削除する（元に戻す手段はない）
    pub fn remove(&mut self, id: CardId) -> Option<Card> {
        let index = self.cards.iter().position(|c| c.id == id)?;
        Some(self.cards.remove(index))
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().map(|c| c.id)
    }
}
