use crate::cart::CardId;
use std::collections::VecDeque;

/// ユーザー操作から生成されるカートイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    Increase { card: CardId },
    Decrease { card: CardId },
    Remove { card: CardId },
    ToggleLike { card: CardId },
    ImageClicked { card: CardId },
}

impl CartEvent {
    pub fn card(&self) -> CardId {
        match self {
            CartEvent::Increase { card }
            | CartEvent::Decrease { card }
            | CartEvent::Remove { card }
            | CartEvent::ToggleLike { card }
            | CartEvent::ImageClicked { card } => *card,
        }
    }
}

/// 一時的な視覚効果の対象
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectTarget {
    Total,
    Image(CardId),
}

pub struct EventQueue {
    pub queue: VecDeque<CartEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { queue: VecDeque::new() }
    }
    pub fn push(&mut self, event: CartEvent) {
        self.queue.push_back(event);
    }
    pub fn pop(&mut self) -> Option<CartEvent> {
        self.queue.pop_front()
    }
    pub fn drain(&mut self) -> Vec<CartEvent> {
        self.queue.drain(..).collect()
    }
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_is_fifo() {
        let mut queue = EventQueue::new();
        queue.push(CartEvent::Increase { card: CardId(1) });
        queue.push(CartEvent::Remove { card: CardId(2) });

        assert_eq!(queue.pop(), Some(CartEvent::Increase { card: CardId(1) }));
        assert_eq!(queue.drain(), vec![CartEvent::Remove { card: CardId(2) }]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_event_card() {
        assert_eq!(CartEvent::ImageClicked { card: CardId(7) }.card(), CardId(7));
    }
}
