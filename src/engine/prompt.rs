use std::collections::VecDeque;

/// ブロッキングな確認・通知ダイアログの抽象
pub trait Prompter {
    /// 確認を求め、肯定されたら `true`
    fn confirm(&mut self, message: &str) -> bool;
    /// 通知を表示する
    fn notify(&mut self, message: &str);
}

impl<P: Prompter + ?Sized> Prompter for Box<P> {
    fn confirm(&mut self, message: &str) -> bool {
        (**self).confirm(message)
    }

    fn notify(&mut self, message: &str) {
        (**self).notify(message)
    }
}

/// クロージャで確認・通知を差し込む
pub struct FnPrompter<C, N>
where
    C: FnMut(&str) -> bool,
    N: FnMut(&str),
{
    confirm: C,
    notify: N,
}

impl<C, N> FnPrompter<C, N>
where
    C: FnMut(&str) -> bool,
    N: FnMut(&str),
{
    pub fn new(confirm: C, notify: N) -> Self {
        Self { confirm, notify }
    }
}

impl<C, N> Prompter for FnPrompter<C, N>
where
    C: FnMut(&str) -> bool,
    N: FnMut(&str),
{
    fn confirm(&mut self, message: &str) -> bool {
        (self.confirm)(message)
    }

    fn notify(&mut self, message: &str) {
        (self.notify)(message)
    }
}

/// 答えを順番に返し、表示されたメッセージを記録する（テスト用）
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<bool>,
    /// 答えが尽きた後の既定値
    pub default_answer: bool,
    pub confirms: Vec<String>,
    pub notifications: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, message: &str) -> bool {
        self.confirms.push(message.to_string());
        self.answers.pop_front().unwrap_or(self.default_answer)
    }

    fn notify(&mut self, message: &str) {
        self.notifications.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_answers_in_order() {
        let mut prompter = ScriptedPrompter::new([true, false]);
        assert!(prompter.confirm("a"));
        assert!(!prompter.confirm("b"));
        // 尽きたら既定値
        assert!(!prompter.confirm("c"));
        assert_eq!(prompter.confirms, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_fn_prompter() {
        let mut seen = Vec::new();
        {
            let mut prompter = FnPrompter::new(|m: &str| m.contains("yes"), |m: &str| seen.push(m.to_string()));
            assert!(prompter.confirm("yes please"));
            assert!(!prompter.confirm("no"));
            prompter.notify("hello");
        }
        assert_eq!(seen, vec!["hello"]);
    }

    #[test]
    fn test_boxed_prompter() {
        let mut prompter: Box<dyn Prompter> = Box::new(ScriptedPrompter::new([true]));
        assert!(prompter.confirm("remove?"));
        assert!(!prompter.confirm("remove again?"));
    }
}
