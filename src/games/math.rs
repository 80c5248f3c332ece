//! Math game: integer arithmetic with difficulty scaling from the running
//! score. Subtraction is always max - min so answers never go negative.

use super::{
    ANIMATION_DELAY_MS, Feedback, Followup, GameState, Lcg, OptionButton, Phase, QuestionView,
    Submit, View, Visual, summary_view,
};

#[derive(Clone, Debug)]
struct MathQuestion {
    expression: String,
    answer: i32,
    options: Vec<i32>,
}

#[derive(Clone, Debug)]
pub struct MathGame {
    state: GameState,
    phase: Phase,
    question: Option<MathQuestion>,
}

impl MathGame {
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

    /// Difficulty 1..=3, stepping up every two points scored.
    fn difficulty(&self) -> i32 {
        (self.state.score() as i32 / 2 + 1).min(3)
    }

    fn next_question(&mut self, rng: &mut Lcg) -> View {
        if self.state.finished() {
            self.phase = Phase::Ended;
            self.question = None;
            return summary_view(&self.state);
        }

        let difficulty = self.difficulty();
        let max_num = 10 * difficulty;
        let num1 = rng.range_i32(1, max_num);
        let num2 = rng.range_i32(1, max_num / 2);
        // Subtraction unlocks at difficulty 2, multiplication at 3.
        let op = ["+", "-", "×"][rng.index(difficulty.min(3) as usize)];

        let (expression, answer) = match op {
            "+" => (format!("{num1} + {num2} = ?"), num1 + num2),
            "-" => {
                let a = num1.max(num2);
                let b = num1.min(num2);
                (format!("{a} - {b} = ?"), a - b)
            }
            _ => {
                let m1 = rng.range_i32(1, 10);
                let m2 = rng.range_i32(1, 10);
                (format!("{m1} × {m2} = ?"), m1 * m2)
            }
        };

        let options = generate_options(answer, rng);
        self.question = Some(MathQuestion {
            expression,
            answer,
            options,
        });
        self.phase = Phase::Awaiting;
        self.view(None, true)
    }

    fn view(&self, feedback: Option<Feedback>, enabled: bool) -> View {
        let q = self.question.as_ref().expect("question present");
        View::Question(QuestionView {
            title: "➕ Làm Phép Toán ➖",
            accent: "#3498db",
            instructions: None,
            score: Some((self.state.score(), super::MAX_QUESTIONS)),
            visual: Visual::Expression(q.expression.clone()),
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
        let correct = q.answer;
        let feedback = if chosen == correct {
            self.state.add_score(now_ms);
            Feedback::correct("✅ Đúng rồi! Giỏi quá!")
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

impl Default for MathGame {
    fn default() -> Self {
        Self::new()
    }
}

/// Four unique options: the answer plus variance in [-5, 4], floored at 0.
fn generate_options(correct: i32, rng: &mut Lcg) -> Vec<i32> {
    let mut options = vec![correct];
    while options.len() < 4 {
        let wrong = (correct + rng.range_i32(-5, 4)).max(0);
        if !options.contains(&wrong) {
            options.push(wrong);
        }
    }
    rng.shuffle(&mut options);
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::MAX_QUESTIONS;

    #[test]
    fn difficulty_scales_with_score() {
        let mut g = MathGame::new();
        assert_eq!(g.difficulty(), 1);
        g.state.add_score(0.0);
        g.state.add_score(0.0);
        assert_eq!(g.difficulty(), 2);
        g.state.add_score(0.0);
        g.state.add_score(0.0);
        assert_eq!(g.difficulty(), 3);
        g.state.add_score(0.0);
        assert_eq!(g.difficulty(), 3, "difficulty is capped at 3");
    }

    #[test]
    fn options_contain_answer_once_and_are_non_negative() {
        let mut rng = Lcg::new(17);
        for correct in [0, 1, 3, 12, 90] {
            let opts = generate_options(correct, &mut rng);
            assert_eq!(opts.len(), 4);
            assert_eq!(opts.iter().filter(|&&o| o == correct).count(), 1);
            assert!(opts.iter().all(|&o| o >= 0));
        }
    }

    #[test]
    fn five_correct_answers_end_in_perfect_summary() {
        let mut rng = Lcg::new(1);
        let mut g = MathGame::new();
        g.start(&mut rng);
        for i in 0..MAX_QUESTIONS {
            let q = g.question.clone().expect("active question");
            let idx = q.options.iter().position(|&o| o == q.answer).unwrap();
            let sub = g.submit(idx, i as f64).expect("submission accepted");
            assert!(matches!(sub.followup, Followup::Advance { .. }));
            let next = g.advance(&mut rng).expect("advance pending");
            if i + 1 == MAX_QUESTIONS {
                match next {
                    View::Summary(s) => {
                        assert_eq!(s.score, MAX_QUESTIONS);
                        assert_eq!(s.medal, "🏆");
                    }
                    View::Question(_) => panic!("expected summary after final question"),
                }
            }
        }
        assert_eq!(g.state().score(), MAX_QUESTIONS);
        assert_eq!(g.state().questions_answered(), MAX_QUESTIONS);
    }
}
