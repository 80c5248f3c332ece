//! Count game: an emoji repeated N times, pick N.

use super::{
    ANIMATION_DELAY_MS, Feedback, Followup, GameState, Lcg, OptionButton, Phase, QuestionView,
    Submit, View, Visual, summary_view,
};

/// Item pool the stimulus emoji is drawn from.
pub const COUNT_EMOJIS: &[&str] = &[
    "🍎", "🐶", "🌟", "🎈", "🍕", "🐱", "⚽", "📚", "🌈", "🍦",
    "🚗", "🌺", "🎨", "🏀", "🦋", "🍪", "🎮", "🌙", "🐠", "🎵",
];

#[derive(Clone, Debug)]
struct CountQuestion {
    emoji: &'static str,
    count: u32,
    options: Vec<u32>,
}

#[derive(Clone, Debug)]
pub struct CountGame {
    state: GameState,
    phase: Phase,
    question: Option<CountQuestion>,
}

impl CountGame {
    pub fn new() -> Self {
        Self {
            state: GameState::new(),
            phase: Phase::Awaiting,
            question: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub(crate) fn start(&mut self, rng: &mut Lcg) -> View {
        self.state.reset();
        self.phase = Phase::Awaiting;
        self.next_question(rng)
    }

    fn next_question(&mut self, rng: &mut Lcg) -> View {
        if self.state.finished() {
            self.phase = Phase::Ended;
            self.question = None;
            return summary_view(&self.state);
        }
        let count = rng.range_u32(1, 10);
        let emoji = *rng.pick(COUNT_EMOJIS);
        let options = generate_options(count, rng);
        self.question = Some(CountQuestion { emoji, count, options });
        self.phase = Phase::Awaiting;
        self.view(None, true)
    }

    fn view(&self, feedback: Option<Feedback>, enabled: bool) -> View {
        let q = self.question.as_ref().expect("question present");
        View::Question(QuestionView {
            title: "🍎 Chọn Số Đếm 🍎",
            accent: "#e74c3c",
            instructions: None,
            score: Some((self.state.score(), super::MAX_QUESTIONS)),
            visual: Visual::Items {
                emoji: q.emoji,
                count: q.count,
            },
            prompt: None,
            feedback,
            options: q
                .options
                .iter()
                .map(|n| OptionButton {
                    label: n.to_string(),
                    enabled,
                    color: None,
                })
                .collect(),
            show_restart: false,
        })
    }

    pub(crate) fn submit(&mut self, choice: usize, now_ms: f64) -> Option<Submit> {
        if self.phase != Phase::Awaiting {
            return None;
        }
        let q = self.question.as_ref()?;
        let chosen = *q.options.get(choice)?;
        let correct = q.count;
        let feedback = if chosen == correct {
            self.state.add_score(now_ms);
            Feedback::correct("✅ Đúng rồi! Tuyệt quá!")
        } else {
            Feedback::wrong(format!("❌ Sai rồi! Đáp án đúng là {correct}."))
        };
        self.state.count_question();
        self.phase = Phase::Feedback;
        Some(Submit {
            view: self.view(Some(feedback), false),
            followup: Followup::Advance {
                delay_ms: ANIMATION_DELAY_MS,
            },
        })
    }

    pub(crate) fn advance(&mut self, rng: &mut Lcg) -> Option<View> {
        if self.phase != Phase::Feedback {
            return None;
        }
        Some(self.next_question(rng))
    }
}

impl Default for CountGame {
    fn default() -> Self {
        Self::new()
    }
}

/// Four unique options around `correct`, each clamped to stay positive. The
/// delta window widens if it gets exhausted (a count of 1 has only two
/// positive neighbors in ±2).
fn generate_options(correct: u32, rng: &mut Lcg) -> Vec<u32> {
    let mut options = vec![correct];
    let mut span = 2;
    let mut attempts = 0u32;
    while options.len() < 4 {
        let wrong = (correct as i32 + rng.range_i32(-span, span)).max(1) as u32;
        if !options.contains(&wrong) {
            options.push(wrong);
        }
        attempts += 1;
        if attempts.is_multiple_of(8) {
            span += 1;
        }
    }
    rng.shuffle(&mut options);
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_are_unique_positive_and_contain_correct_once() {
        let mut rng = Lcg::new(3);
        for correct in 1..=10 {
            let opts = generate_options(correct, &mut rng);
            assert_eq!(opts.len(), 4);
            assert_eq!(opts.iter().filter(|&&o| o == correct).count(), 1);
            assert!(opts.iter().all(|&o| o >= 1));
            let mut dedup = opts.clone();
            dedup.sort_unstable();
            dedup.dedup();
            assert_eq!(dedup.len(), 4, "duplicate option in {opts:?}");
        }
    }

    #[test]
    fn double_submit_is_a_no_op() {
        let mut rng = Lcg::new(11);
        let mut g = CountGame::new();
        g.start(&mut rng);
        assert!(g.submit(0, 0.0).is_some());
        assert!(g.submit(1, 1.0).is_none(), "second submit before advance must be ignored");
        assert_eq!(g.state().questions_answered(), 1);
    }
}
