//! Racing game: quick addition/subtraction on small numbers. A correct answer
//! pushes the car 20 points down a 0-100 track; reaching the end wins the race
//! and ends the session. Wrong answers cost nothing but don't move the car,
//! so the win always lands on the fifth correct answer.

use super::{
    ANIMATION_DELAY_MS, Feedback, Followup, GameState, Lcg, OptionButton, Phase, QuestionView,
    Submit, View, Visual, WIN_BANNER_DELAY_MS,
};

pub const TRACK_LENGTH: u32 = 100;
const STEP: u32 = 20;

#[derive(Clone, Debug)]
struct RaceQuestion {
    expression: String,
    answer: i32,
    options: Vec<i32>,
}

#[derive(Clone, Debug)]
pub struct RacingGame {
    state: GameState,
    phase: Phase,
    position: u32,
    /// Set once the car reaches the end; the next advance shows the banner.
    won: bool,
    question: Option<RaceQuestion>,
}

impl RacingGame {
    pub fn new() -> Self {
        Self {
            state: GameState::new(),
            phase: Phase::Awaiting,
            position: 0,
            won: false,
            question: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn position(&self) -> u32 {
        self.position
    }

    pub(crate) fn start(&mut self, rng: &mut Lcg) -> View {
        self.state.reset();
        self.position = 0;
        self.won = false;
        self.phase = Phase::Awaiting;
        self.next_question(rng)
    }

    fn next_question(&mut self, rng: &mut Lcg) -> View {
        let num1 = rng.range_i32(1, 15);
        let num2 = rng.range_i32(1, 15);
        let (expression, answer) = if rng.chance(0.5) {
            (format!("{num1} + {num2} = ?"), num1 + num2)
        } else {
            let a = num1.max(num2);
            let b = num1.min(num2);
            (format!("{a} - {b} = ?"), a - b)
        };
        let options = generate_options(answer, rng);
        self.question = Some(RaceQuestion {
            expression,
            answer,
            options,
        });
        self.phase = Phase::Awaiting;
        self.view(None, true, false)
    }

    fn view(&self, feedback: Option<Feedback>, enabled: bool, show_restart: bool) -> View {
        let (prompt, options) = match &self.question {
            Some(q) => (
                Some(q.expression.clone()),
                q.options
                    .iter()
                    .map(|n| OptionButton {
                        label: n.to_string(),
                        enabled,
                        color: None,
                    })
                    .collect(),
            ),
            None => (None, Vec::new()),
        };
        View::Question(QuestionView {
            title: "🏁 Đua Xe Toán Học 🏁",
            accent: "#f39c12",
            instructions: None,
            score: None, // the track position is the score readout here
            visual: Visual::Track {
                position: self.position,
            },
            prompt,
            feedback,
            options,
            show_restart,
        })
    }

    pub(crate) fn submit(&mut self, choice: usize, now_ms: f64) -> Option<Submit> {
        if self.phase != Phase::Awaiting {
            return None;
        }
        let q = self.question.as_ref()?;
        let chosen = *q.options.get(choice)?;

        if chosen == q.answer {
            self.state.add_score(now_ms);
            self.state.count_question();
            self.position = (self.position + STEP).min(TRACK_LENGTH);
            self.phase = Phase::Feedback;
            if self.position >= TRACK_LENGTH {
                self.won = true;
                Some(Submit {
                    view: self.view(Some(Feedback::correct("✅ Đúng! Xe tăng tốc!")), false, false),
                    followup: Followup::Advance {
                        delay_ms: WIN_BANNER_DELAY_MS,
                    },
                })
            } else {
                Some(Submit {
                    view: self.view(Some(Feedback::correct("✅ Đúng! Xe tăng tốc!")), false, false),
                    followup: Followup::Advance {
                        delay_ms: ANIMATION_DELAY_MS,
                    },
                })
            }
        } else {
            // No penalty: the round is simply retried with a fresh question.
            self.phase = Phase::Feedback;
            Some(Submit {
                view: self.view(Some(Feedback::wrong("❌ Sai rồi! Thử lại!")), false, false),
                followup: Followup::Advance {
                    delay_ms: ANIMATION_DELAY_MS,
                },
            })
        }
    }

    pub(crate) fn advance(&mut self, rng: &mut Lcg) -> Option<View> {
        if self.phase != Phase::Feedback {
            return None;
        }
        if self.won {
            self.phase = Phase::Ended;
            self.question = None;
            return Some(self.win_view());
        }
        Some(self.next_question(rng))
    }

    fn win_view(&self) -> View {
        View::Question(QuestionView {
            title: "🏁 Đua Xe Toán Học 🏁",
            accent: "#f39c12",
            instructions: None,
            score: None,
            visual: Visual::Track {
                position: self.position,
            },
            prompt: None,
            feedback: Some(Feedback::correct("🎉 Bạn đã về đích! 🏆")),
            options: Vec::new(),
            show_restart: true,
        })
    }
}

impl Default for RacingGame {
    fn default() -> Self {
        Self::new()
    }
}

/// Correct answer plus three unique nearby distractors.
fn generate_options(correct: i32, rng: &mut Lcg) -> Vec<i32> {
    let mut options = vec![correct];
    while options.len() < 4 {
        let wrong = correct + rng.range_i32(-5, 4);
        if !options.contains(&wrong) {
            options.push(wrong);
        }
    }
    rng.shuffle(&mut options);
    options
}
