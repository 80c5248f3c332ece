//! Solar system game: trivia about the eight planets, in three flavors —
//! orbital order, defining fact, relative size. Distractors are drawn from the
//! other planets' attributes so every option is plausible.

use super::{
    FEEDBACK_DELAY_MS, Feedback, Followup, GameState, Lcg, OptionButton, Phase, QuestionView,
    Submit, View, Visual, summary_view,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Planet {
    pub name: &'static str,
    pub order: u32,
    pub fact: &'static str,
    pub size: &'static str,
    pub emoji: &'static str,
}

pub const PLANETS: [Planet; 8] = [
    Planet { name: "Sao Thuỷ", order: 1, fact: "Gần Mặt Trời nhất", size: "nhỏ nhất", emoji: "☿️" },
    Planet { name: "Sao Kim", order: 2, fact: "Nóng nhất", size: "tương tự Trái Đất", emoji: "♀️" },
    Planet { name: "Trái Đất", order: 3, fact: "Có sự sống", size: "vừa phải", emoji: "🌍" },
    Planet { name: "Sao Hoả", order: 4, fact: "Hành tinh đỏ", size: "nhỏ", emoji: "♂️" },
    Planet { name: "Sao Mộc", order: 5, fact: "Lớn nhất", size: "khổng lồ", emoji: "♃" },
    Planet { name: "Sao Thổ", order: 6, fact: "Có vành đai đẹp nhất", size: "rất lớn", emoji: "♄" },
    Planet { name: "Sao Thiên Vương", order: 7, fact: "Nghiêng 98 độ", size: "lớn", emoji: "♅" },
    Planet { name: "Sao Hải Vương", order: 8, fact: "Xa nhất", size: "lớn", emoji: "♆" },
];

/// The size vocabulary size-distractors are drawn from.
pub const SIZE_LABELS: [&str; 7] = [
    "nhỏ nhất",
    "nhỏ",
    "vừa phải",
    "lớn",
    "rất lớn",
    "khổng lồ",
    "tương tự Trái Đất",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SubType {
    Order,
    Fact,
    Size,
}

#[derive(Clone, Debug)]
struct SolarQuestion {
    planet: Planet,
    subtype: SubType,
    prompt: String,
    options: Vec<String>,
    correct: String,
}

#[derive(Clone, Debug)]
pub struct SolarGame {
    state: GameState,
    phase: Phase,
    question: Option<SolarQuestion>,
}

impl SolarGame {
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
        let planet = *rng.pick(&PLANETS);
        let subtype = [SubType::Order, SubType::Fact, SubType::Size][rng.index(3)];

        let (prompt, options, correct) = match subtype {
            SubType::Order => {
                let mut orders = vec![planet.order];
                while orders.len() < 4 {
                    let wrong = rng.range_u32(1, 8);
                    if !orders.contains(&wrong) {
                        orders.push(wrong);
                    }
                }
                rng.shuffle(&mut orders);
                (
                    format!("{} là hành tinh thứ mấy tính từ Mặt Trời?", planet.name),
                    orders.iter().map(|n| format!("Thứ {n}")).collect(),
                    format!("Thứ {}", planet.order),
                )
            }
            SubType::Fact => {
                let mut pool: Vec<&Planet> =
                    PLANETS.iter().filter(|p| p.name != planet.name).collect();
                let mut names = vec![planet.name.to_string()];
                for _ in 0..3 {
                    let i = rng.index(pool.len());
                    names.push(pool.remove(i).name.to_string());
                }
                rng.shuffle(&mut names);
                (
                    format!("Hành tinh nào {}?", planet.fact.to_lowercase()),
                    names,
                    planet.name.to_string(),
                )
            }
            SubType::Size => {
                let mut sizes = vec![planet.size.to_string()];
                while sizes.len() < 4 {
                    let wrong = SIZE_LABELS[rng.index(SIZE_LABELS.len())].to_string();
                    if !sizes.contains(&wrong) {
                        sizes.push(wrong);
                    }
                }
                rng.shuffle(&mut sizes);
                (
                    format!("{} có kích thước như thế nào?", planet.name),
                    sizes,
                    planet.size.to_string(),
                )
            }
        };

        self.question = Some(SolarQuestion {
            planet,
            subtype,
            prompt,
            options,
            correct,
        });
        self.phase = Phase::Awaiting;
        self.view(None, true)
    }

    fn view(&self, feedback: Option<Feedback>, enabled: bool) -> View {
        let q = self.question.as_ref().expect("question present");
        View::Question(QuestionView {
            title: "🌌 Khám Phá Hệ Mặt Trời 🌌",
            accent: "#2c3e50",
            instructions: None,
            score: Some((self.state.score(), super::MAX_QUESTIONS)),
            visual: Visual::Figure {
                glyph: q.planet.emoji,
                caption: None,
            },
            prompt: Some(q.prompt.clone()),
            feedback,
            options: q
                .options
                .iter()
                .map(|o| OptionButton {
                    label: o.clone(),
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
        let chosen = q.options.get(choice)?;
        let feedback = if *chosen == q.correct {
            self.state.add_score(now_ms);
            let p = &q.planet;
            let message = match q.subtype {
                SubType::Order => {
                    format!("✅ Đúng rồi! {} là hành tinh thứ {}!", p.name, p.order)
                }
                SubType::Fact => {
                    format!("✅ Đúng rồi! {} {}!", p.name, p.fact.to_lowercase())
                }
                SubType::Size => {
                    format!("✅ Đúng rồi! {} có kích thước {}!", p.name, p.size)
                }
            };
            Feedback::correct(message)
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

impl Default for SolarGame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_options_contain_correct_answer_exactly_once() {
        let mut rng = Lcg::new(31);
        let mut g = SolarGame::new();
        g.start(&mut rng);
        for i in 0..200 {
            let q = g.question.clone().unwrap();
            assert_eq!(q.options.len(), 4);
            assert_eq!(
                q.options.iter().filter(|o| **o == q.correct).count(),
                1,
                "bad options {:?} for {:?}",
                q.options,
                q.subtype
            );
            let mut dedup = q.options.clone();
            dedup.sort();
            dedup.dedup();
            assert_eq!(dedup.len(), 4, "duplicate option");
            // Answer correctly so the game keeps producing questions.
            let idx = q.options.iter().position(|o| *o == q.correct).unwrap();
            g.submit(idx, i as f64).unwrap();
            match g.advance(&mut rng).unwrap() {
                View::Summary(_) => {
                    g.start(&mut rng);
                }
                View::Question(_) => {}
            }
        }
    }

    #[test]
    fn fact_distractors_are_real_other_planets() {
        let mut rng = Lcg::new(37);
        let mut g = SolarGame::new();
        g.start(&mut rng);
        loop {
            let q = g.question.clone().unwrap();
            if q.subtype == SubType::Fact {
                for o in &q.options {
                    assert!(PLANETS.iter().any(|p| p.name == *o), "unknown planet {o}");
                }
                break;
            }
            let idx = q.options.iter().position(|o| *o == q.correct).unwrap();
            g.submit(idx, 0.0).unwrap();
            if matches!(g.advance(&mut rng).unwrap(), View::Summary(_)) {
                g.start(&mut rng);
            }
        }
    }
}
