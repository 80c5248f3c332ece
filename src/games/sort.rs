//! Sort game: click shuffled numbers in ascending order. Not multiple-choice:
//! every number is its own control and correctness is judged once the whole
//! sequence has been picked. A wrong order shows the correct one and offers a
//! restart; progress never advances on a lost round.

use super::{
    FEEDBACK_DELAY_MS, Feedback, Followup, GameState, Lcg, OptionButton, QuestionView, Submit,
    View, Visual, summary_view,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SortPhase {
    Selecting,
    RoundWon,
    RoundLost,
    Ended,
}

#[derive(Clone, Debug)]
pub struct SortGame {
    state: GameState,
    phase: SortPhase,
    sorted: Vec<u32>,
    shuffled: Vec<u32>,
    /// Per-`shuffled` index; a picked number's control goes dead.
    picked: Vec<bool>,
    selected_order: Vec<u32>,
}

impl SortGame {
    pub fn new() -> Self {
        Self {
            state: GameState::new(),
            phase: SortPhase::Selecting,
            sorted: Vec::new(),
            shuffled: Vec::new(),
            picked: Vec::new(),
            selected_order: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn sorted(&self) -> &[u32] {
        &self.sorted
    }

    pub fn shuffled(&self) -> &[u32] {
        &self.shuffled
    }

    pub(crate) fn start(&mut self, rng: &mut Lcg) -> View {
        self.state.reset();
        self.next_round(rng)
    }

    /// Round size grows every two completed rounds.
    fn next_round(&mut self, rng: &mut Lcg) -> View {
        let count = 5 + self.state.questions_answered() as usize / 2;
        let mut numbers: Vec<u32> = (0..count).map(|_| rng.range_u32(1, 100)).collect();
        self.sorted = {
            let mut s = numbers.clone();
            s.sort_unstable();
            s
        };
        rng.shuffle(&mut numbers);
        self.shuffled = numbers;
        self.picked = vec![false; count];
        self.selected_order.clear();
        self.phase = SortPhase::Selecting;
        self.view(None, false)
    }

    fn view(&self, feedback: Option<Feedback>, show_restart: bool) -> View {
        View::Question(QuestionView {
            title: "🔢 Sắp Xếp Số 🔢",
            accent: "#e74c3c",
            instructions: Some("Chọn các số theo thứ tự tăng dần!"),
            score: Some((self.state.score(), super::MAX_QUESTIONS)),
            visual: Visual::None,
            prompt: None,
            feedback,
            options: self
                .shuffled
                .iter()
                .zip(&self.picked)
                .map(|(n, &picked)| OptionButton {
                    label: n.to_string(),
                    enabled: !picked && self.phase == SortPhase::Selecting,
                    color: picked.then_some("#95a5a6"),
                })
                .collect(),
            show_restart,
        })
    }

    pub(crate) fn submit(&mut self, choice: usize, now_ms: f64) -> Option<Submit> {
        if self.phase != SortPhase::Selecting {
            return None;
        }
        if *self.picked.get(choice)? {
            return None;
        }
        self.picked[choice] = true;
        self.selected_order.push(self.shuffled[choice]);

        if self.selected_order.len() < self.shuffled.len() {
            return Some(Submit {
                view: self.view(None, false),
                followup: Followup::None,
            });
        }

        if self.selected_order == self.sorted {
            self.state.add_score(now_ms);
            self.state.count_question();
            self.phase = SortPhase::RoundWon;
            Some(Submit {
                view: self.view(
                    Some(Feedback::correct("✅ Tuyệt vời! Bạn đã sắp xếp đúng!")),
                    false,
                ),
                followup: Followup::Advance {
                    delay_ms: FEEDBACK_DELAY_MS,
                },
            })
        } else {
            self.phase = SortPhase::RoundLost;
            let order = self
                .sorted
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            Some(Submit {
                view: self.view(
                    Some(Feedback::wrong(format!(
                        "❌ Chưa đúng! Thứ tự đúng là: {order}"
                    ))),
                    true,
                ),
                followup: Followup::None,
            })
        }
    }

    pub(crate) fn advance(&mut self, rng: &mut Lcg) -> Option<View> {
        if self.phase != SortPhase::RoundWon {
            return None;
        }
        if self.state.finished() {
            self.phase = SortPhase::Ended;
            return Some(summary_view(&self.state));
        }
        Some(self.next_round(rng))
    }
}

impl Default for SortGame {
    fn default() -> Self {
        Self::new()
    }
}
