//! Animal game: classify an animal into its habitat. The three category
//! buttons are a fixed set; only the animal changes between questions.

use super::{
    FEEDBACK_DELAY_MS, Feedback, Followup, GameState, Lcg, OptionButton, Phase, QuestionView,
    Submit, View, Visual, summary_view,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Habitat {
    Land,
    Water,
    Air,
}

/// Option order on screen, fixed.
pub const HABITATS: [Habitat; 3] = [Habitat::Land, Habitat::Water, Habitat::Air];

impl Habitat {
    pub fn button_label(&self) -> &'static str {
        match self {
            Self::Land => "🏞️ Trên cạn",
            Self::Water => "🌊 Dưới nước",
            Self::Air => "☁️ Biết bay",
        }
    }

    pub fn button_color(&self) -> &'static str {
        match self {
            Self::Land => "#8b6914",
            Self::Water => "#3498db",
            Self::Air => "#87ceeb",
        }
    }

    /// Lowercase habitat phrase used inside the success message.
    pub fn phrase(&self) -> &'static str {
        match self {
            Self::Land => "trên cạn",
            Self::Water => "dưới nước",
            Self::Air => "biết bay",
        }
    }

    fn animals(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Land => &[
                ("🦁", "Sư tử"),
                ("🐯", "Hổ"),
                ("🐘", "Voi"),
                ("🦒", "Hươu cao cổ"),
                ("🦓", "Ngựa vằn"),
            ],
            Self::Water => &[
                ("🐬", "Cá heo"),
                ("🐙", "Bạch tuộc"),
                ("🐠", "Cá"),
                ("🦈", "Cá mập"),
                ("🐋", "Cá voi"),
            ],
            Self::Air => &[
                ("🦅", "Đại bàng"),
                ("🦋", "Bướm"),
                ("🐦", "Chim"),
                ("🦜", "Vẹt"),
                ("🦉", "Cú"),
            ],
        }
    }
}

/// Full dataset, exposed for dataset-invariant tests.
pub fn animals_of(habitat: Habitat) -> &'static [(&'static str, &'static str)] {
    habitat.animals()
}

#[derive(Clone, Debug)]
struct AnimalQuestion {
    habitat: Habitat,
    emoji: &'static str,
    name: &'static str,
}

#[derive(Clone, Debug)]
pub struct AnimalGame {
    state: GameState,
    phase: Phase,
    question: Option<AnimalQuestion>,
}

impl AnimalGame {
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
        let habitat = *rng.pick(&HABITATS);
        let (emoji, name) = *rng.pick(habitat.animals());
        self.question = Some(AnimalQuestion {
            habitat,
            emoji,
            name,
        });
        self.phase = Phase::Awaiting;
        self.view(None, true)
    }

    fn view(&self, feedback: Option<Feedback>, enabled: bool) -> View {
        let q = self.question.as_ref().expect("question present");
        View::Question(QuestionView {
            title: "🐘 Phân Loại Động Vật 🐠",
            accent: "#e67e22",
            instructions: Some("Chọn đúng môi trường sống của động vật!"),
            score: Some((self.state.score(), super::MAX_QUESTIONS)),
            visual: Visual::Figure {
                glyph: q.emoji,
                caption: Some(q.name),
            },
            prompt: None,
            feedback,
            options: HABITATS
                .iter()
                .map(|h| OptionButton {
                    label: h.button_label().to_string(),
                    enabled,
                    color: Some(h.button_color()),
                })
                .collect(),
            show_restart: false,
        })
    }

    pub(crate) fn submit(&mut self, choice: usize, now_ms: f64) -> Option<Submit> {
        if self.phase != Phase::Awaiting {
            return None;
        }
        let chosen = *HABITATS.get(choice)?;
        let q = self.question.as_ref()?;
        let feedback = if chosen == q.habitat {
            self.state.add_score(now_ms);
            Feedback::correct(format!("✅ Đúng rồi! {} sống {}!", q.name, q.habitat.phrase()))
        } else {
            Feedback::wrong("❌ Sai rồi! Thử lại nhé!")
        };
        self.state.count_question();
        self.phase = Phase::Feedback;
        Some(Submit {
            view: self.view(Some(feedback), false),
            followup: Followup::Advance {
                delay_ms: FEEDBACK_DELAY_MS,
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

impl Default for AnimalGame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_habitat_scores_and_names_the_animal() {
        let mut rng = Lcg::new(4);
        let mut g = AnimalGame::new();
        g.start(&mut rng);
        let q = g.question.clone().unwrap();
        let idx = HABITATS.iter().position(|&h| h == q.habitat).unwrap();
        let sub = g.submit(idx, 0.0).unwrap();
        assert_eq!(g.state().score(), 1);
        match sub.view {
            View::Question(v) => {
                let fb = v.feedback.unwrap();
                assert!(fb.correct);
                assert!(fb.message.contains(q.name));
                assert!(fb.message.contains(q.habitat.phrase()));
            }
            View::Summary(_) => panic!("not ended yet"),
        }
    }

    #[test]
    fn options_are_always_the_three_fixed_habitats() {
        let mut rng = Lcg::new(12);
        let mut g = AnimalGame::new();
        match g.start(&mut rng) {
            View::Question(v) => {
                let labels: Vec<_> = v.options.iter().map(|o| o.label.as_str()).collect();
                assert_eq!(labels, ["🏞️ Trên cạn", "🌊 Dưới nước", "☁️ Biết bay"]);
            }
            View::Summary(_) => panic!("fresh game"),
        }
    }

    #[test]
    fn wrong_habitat_still_consumes_the_question() {
        let mut rng = Lcg::new(15);
        let mut g = AnimalGame::new();
        g.start(&mut rng);
        let q = g.question.clone().unwrap();
        let idx = HABITATS.iter().position(|&h| h != q.habitat).unwrap();
        g.submit(idx, 0.0).unwrap();
        assert_eq!(g.state().score(), 0);
        assert_eq!(g.state().questions_answered(), 1);
    }
}
