// ========================================
// 一時的な視覚効果のタイムライン
// ========================================
//
// ブラウザではクラスを付与して setTimeout で外すだけだが、ネイティブとテストでは
// 同じ挙動を決定的な時計で再現する。付与のたびに独立した削除予定が積まれ、
// どれか一つでも期限が来ればクラスは外れる。

use crate::ui::event::EffectTarget;
use std::collections::HashSet;
use std::time::Duration;

#[derive(Debug, Clone)]
struct PendingRemoval {
    due: Duration,
    target: EffectTarget,
    class: String,
}

#[derive(Debug, Clone, Default)]
pub struct EffectTimeline {
    now: Duration,
    active: HashSet<(EffectTarget, String)>,
    pending: Vec<PendingRemoval>,
}

impl EffectTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// クラスを付与して削除予定を登録
    pub fn trigger(&mut self, target: EffectTarget, class: &str, duration: Duration) {
        self.active.insert((target, class.to_string()));
        self.pending.push(PendingRemoval {
            due: self.now + duration,
            target,
            class: class.to_string(),
        });
        log::trace!("effect '{}' on {:?} until {:?}", class, target, self.now + duration);
    }

    /// 時計を進め、期限が来た削除予定を実行する
    pub fn advance(&mut self, elapsed: Duration) {
        self.now += elapsed;
        let now = self.now;
        let active = &mut self.active;
        self.pending.retain(|p| {
            if p.due <= now {
                active.remove(&(p.target, p.class.clone()));
                false
            } else {
                true
            }
        });
    }

    pub fn is_active(&self, target: EffectTarget, class: &str) -> bool {
        self.active.contains(&(target, class.to_string()))
    }

    /// 対象に現在付与されているクラス（名前順）
    pub fn active_classes(&self, target: EffectTarget) -> Vec<String> {
        let mut classes: Vec<String> = self
            .active
            .iter()
            .filter(|(t, _)| *t == target)
            .map(|(_, c)| c.clone())
            .collect();
        classes.sort();
        classes
    }

    /// 対象の効果と削除予定をすべて破棄する（要素が消えた場合）
    pub fn forget(&mut self, target: EffectTarget) {
        self.active.retain(|(t, _)| *t != target);
        self.pending.retain(|p| p.target != target);
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
