//! Blocks game: a pseudo-3D scatter of cubes on a small grid, count them.
//! Cells are dropped with ~20% probability while laying the arrangement out;
//! the asked count is the number of cubes actually displayed, so question and
//! picture can never disagree.

use super::{
    FEEDBACK_DELAY_MS, Feedback, Followup, GameState, Lcg, OptionButton, Phase, QuestionView,
    Submit, View, Visual, summary_view,
};

/// Pixel pitch of one grid cell in the rendered arrangement.
const CELL_PX: i32 = 45;

#[derive(Clone, Debug)]
struct BlocksQuestion {
    cells: Vec<(i32, i32)>,
    options: Vec<u32>,
}

impl BlocksQuestion {
    fn count(&self) -> u32 {
        self.cells.len() as u32
    }
}

#[derive(Clone, Debug)]
pub struct BlocksGame {
    state: GameState,
    phase: Phase,
    question: Option<BlocksQuestion>,
}

impl BlocksGame {
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
        let target = rng.range_u32(3, 10);
        let cells = arrangement(target, rng);
        let options = generate_options(cells.len() as u32, rng);
        self.question = Some(BlocksQuestion { cells, options });
        self.phase = Phase::Awaiting;
        self.view(None, true)
    }

    fn view(&self, feedback: Option<Feedback>, enabled: bool) -> View {
        let q = self.question.as_ref().expect("question present");
        View::Question(QuestionView {
            title: "🧱 Xếp Khối 3D 🧱",
            accent: "#3498db",
            instructions: Some("Đếm xem có bao nhiêu khối lập phương?"),
            score: Some((self.state.score(), super::MAX_QUESTIONS)),
            visual: Visual::Blocks {
                cells: q.cells.clone(),
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
        let correct = q.count();
        let feedback = if chosen == correct {
            self.state.add_score(now_ms);
            Feedback::correct("✅ Đúng rồi! Tuyệt vời!")
        } else {
            Feedback::wrong(format!("❌ Sai! Đáp án đúng là {correct}"))
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

impl Default for BlocksGame {
    fn default() -> Self {
        Self::new()
    }
}

/// Lay out up to `target` cubes on a ceil(sqrt(target))-sized grid, skipping
/// cells with 20% probability (forced placement once only one cube is still
/// owed). Offsets are centered around the grid origin. Never returns an empty
/// arrangement.
fn arrangement(target: u32, rng: &mut Lcg) -> Vec<(i32, i32)> {
    let rows = (target as f64).sqrt().ceil() as i32;
    let half = rows * CELL_PX / 2;
    let mut cells = Vec::new();
    let mut placed = 0;
    'grid: for row in 0..rows {
        for col in 0..rows {
            if placed >= target {
                break 'grid;
            }
            if rng.chance(0.8) || placed == target - 1 {
                cells.push((col * CELL_PX - half, row * CELL_PX - half));
                placed += 1;
            }
        }
    }
    if cells.is_empty() {
        cells.push((-half, -half));
    }
    cells
}

/// Four unique positive options around the displayed count. The window widens
/// if it gets exhausted (a count of 1 has only two positive neighbors in ±2).
fn generate_options(correct: u32, rng: &mut Lcg) -> Vec<u32> {
    let mut options = vec![correct];
    let mut span = 2;
    let mut attempts = 0u32;
    while options.len() < 4 {
        let wrong = correct as i32 + rng.range_i32(-span, span);
        if wrong > 0 && !options.contains(&(wrong as u32)) {
            options.push(wrong as u32);
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
    fn arrangement_is_nonempty_and_bounded_by_target() {
        let mut rng = Lcg::new(19);
        for target in 3..=10 {
            for _ in 0..50 {
                let cells = arrangement(target, &mut rng);
                assert!(!cells.is_empty());
                assert!(cells.len() as u32 <= target);
                let mut dedup = cells.clone();
                dedup.sort_unstable();
                dedup.dedup();
                assert_eq!(dedup.len(), cells.len(), "overlapping cubes");
            }
        }
    }

    #[test]
    fn asked_count_matches_displayed_cubes() {
        let mut rng = Lcg::new(23);
        let mut g = BlocksGame::new();
        let view = g.start(&mut rng);
        let q = g.question.clone().unwrap();
        match view {
            View::Question(v) => match v.visual {
                Visual::Blocks { cells } => assert_eq!(cells.len() as u32, q.count()),
                other => panic!("unexpected visual {other:?}"),
            },
            View::Summary(_) => panic!("fresh game"),
        }
        assert!(q.options.contains(&q.count()));
    }

    #[test]
    fn options_are_positive_and_unique() {
        let mut rng = Lcg::new(27);
        for correct in 1..=10 {
            let opts = generate_options(correct, &mut rng);
            assert_eq!(opts.len(), 4);
            assert_eq!(opts.iter().filter(|&&o| o == correct).count(), 1);
            assert!(opts.iter().all(|&o| o >= 1));
        }
    }
}
