//! Mini-game engine shared machinery.
//!
//! Each game variant lives in its own child module and owns its dataset plus
//! question generation; this module holds everything they share: fixed timing
//! configuration, the [`GameKind`] enumeration, per-session [`GameState`],
//! the seedable RNG, performance tiers for the end-of-game summary, the view
//! model types the host surface materializes, and the [`Session`] dispatch
//! enum the manager drives.
//!
//! Nothing in this module (or its children) touches the DOM: game logic is
//! pure `State -> View` so it can run under `cargo test` on the host. The
//! `dom` module is the only place browser APIs appear.

mod animal;
mod blocks;
mod color;
mod count;
mod math;
mod racing;
mod solar;
mod sort;

pub use animal::{AnimalGame, HABITATS, Habitat, animals_of};
pub use blocks::BlocksGame;
pub use color::{ColorGame, Mix, PRIMARIES, Primary, mix};
pub use count::{COUNT_EMOJIS, CountGame};
pub use math::MathGame;
pub use racing::{RacingGame, TRACK_LENGTH};
pub use solar::{PLANETS, Planet, SIZE_LABELS, SolarGame};
pub use sort::SortGame;

// --- Configuration -----------------------------------------------------------

/// Fixed quiz length for scored variants.
pub const MAX_QUESTIONS: u32 = 5;
/// Pause between "feedback shown" and the next question.
pub const ANIMATION_DELAY_MS: u32 = 1500;
/// Pause between "feedback shown" and the end-of-game summary (and the slower
/// variants' next question).
pub const FEEDBACK_DELAY_MS: u32 = 2000;
/// Pause before the racing win banner replaces the last feedback line.
pub const WIN_BANNER_DELAY_MS: u32 = 500;
/// How long a completed color mix keeps its palette selection highlighted.
pub const PALETTE_RESET_DELAY_MS: u32 = 2000;

// --- Game kinds --------------------------------------------------------------

/// Closed set of game variants. The triggering UI is data-driven, so kinds are
/// parsed from strings; unknown strings never reach a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum GameKind {
    Count,
    Math,
    Sort,
    Racing,
    Animal,
    Color,
    Blocks,
    Solar,
}

impl GameKind {
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "count" => Self::Count,
            "math" => Self::Math,
            "sort" => Self::Sort,
            "racing" => Self::Racing,
            "animal" => Self::Animal,
            "color" => Self::Color,
            "blocks" => Self::Blocks,
            "solar" => Self::Solar,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Math => "math",
            Self::Sort => "sort",
            Self::Racing => "racing",
            Self::Animal => "animal",
            Self::Color => "color",
            Self::Blocks => "blocks",
            Self::Solar => "solar",
        }
    }
}

// --- RNG ---------------------------------------------------------------------

/// Small LCG used for all question generation. Seeded once per manager; tests
/// seed it explicitly so generation is deterministic. Not crypto secure.
#[derive(Clone, Debug)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        // Avoid the all-zero fixpoint-ish start for tiny seeds.
        Self {
            state: seed ^ 0x5DEE_CE66_D153_9CB5,
        }
    }

    fn step(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1013904223);
        (self.state >> 33) as u32
    }

    /// Uniform index into `0..len` (0 when `len == 0`).
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 { 0 } else { self.step() as usize % len }
    }

    /// Uniform integer in `lo..=hi`.
    pub fn range_i32(&mut self, lo: i32, hi: i32) -> i32 {
        debug_assert!(lo <= hi);
        let span = (hi - lo) as u32 as u64 + 1;
        lo + (self.step() as u64 % span) as i32
    }

    pub fn range_u32(&mut self, lo: u32, hi: u32) -> u32 {
        self.range_i32(lo as i32, hi as i32) as u32
    }

    /// True with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        (self.step() as f64 / u32::MAX as f64) < p
    }

    /// In-place Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.index(i + 1);
            items.swap(i, j);
        }
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.index(items.len())]
    }
}

// --- Game state --------------------------------------------------------------

/// One scoring event, recorded whenever a point is awarded.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScoreEvent {
    pub score: u32,
    pub at_ms: f64,
}

/// Mutable per-session scoring record. Score only ever increases, by 1 per
/// correct answer; `questions_answered` never exceeds [`MAX_QUESTIONS`].
#[derive(Clone, Debug, Default)]
pub struct GameState {
    score: u32,
    questions_answered: u32,
    history: Vec<ScoreEvent>,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.score = 0;
        self.questions_answered = 0;
        // History survives reset: it is a running log across "play again".
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn questions_answered(&self) -> u32 {
        self.questions_answered
    }

    pub fn history(&self) -> &[ScoreEvent] {
        &self.history
    }

    pub(crate) fn add_score(&mut self, now_ms: f64) {
        self.score += 1;
        self.history.push(ScoreEvent {
            score: self.score,
            at_ms: now_ms,
        });
    }

    pub(crate) fn count_question(&mut self) {
        debug_assert!(self.questions_answered < MAX_QUESTIONS);
        self.questions_answered += 1;
    }

    pub(crate) fn finished(&self) -> bool {
        self.questions_answered >= MAX_QUESTIONS
    }
}

// --- Performance tiers -------------------------------------------------------

/// Qualitative band for the end-of-game summary, from final score ratio.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Tier {
    Perfect,
    Great,
    Good,
    NeedsPractice,
}

impl Tier {
    pub fn from_score(score: u32, max: u32) -> Self {
        let pct = score as f64 / max as f64 * 100.0;
        if pct >= 100.0 {
            Self::Perfect
        } else if pct >= 80.0 {
            Self::Great
        } else if pct >= 60.0 {
            Self::Good
        } else {
            Self::NeedsPractice
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Perfect => "🏆 Xuất sắc! Hoàn hảo!",
            Self::Great => "🌟 Tuyệt vời! Rất tốt!",
            Self::Good => "👍 Tốt! Cố gắng thêm nhé!",
            Self::NeedsPractice => "💪 Cần luyện tập thêm!",
        }
    }
}

/// Medal glyph for the summary. Finer-grained than [`Tier`]: adds a 40%
/// bronze band below silver.
pub fn medal_emoji(score: u32, max: u32) -> &'static str {
    let pct = score as f64 / max as f64 * 100.0;
    if pct >= 100.0 {
        "🏆"
    } else if pct >= 80.0 {
        "🥇"
    } else if pct >= 60.0 {
        "🥈"
    } else if pct >= 40.0 {
        "🥉"
    } else {
        "🎯"
    }
}

// --- View model --------------------------------------------------------------

/// Feedback line shown after an answer (or a Sort/Color status line).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Feedback {
    pub message: String,
    pub correct: bool,
}

impl Feedback {
    pub fn correct(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            correct: true,
        }
    }

    pub fn wrong(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            correct: false,
        }
    }
}

/// One clickable answer control. `color` overrides the default button color
/// (used by the Animal habitat buttons).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OptionButton {
    pub label: String,
    pub enabled: bool,
    pub color: Option<&'static str>,
}

impl OptionButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            enabled: true,
            color: None,
        }
    }
}

/// Kind-specific stimulus the surface draws above the options.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Visual {
    None,
    /// Count game: `emoji` repeated `count` times.
    Items { emoji: &'static str, count: u32 },
    /// Math/Racing: the arithmetic expression, large.
    Expression(String),
    /// Animal/Solar: one big glyph with an optional caption under it.
    Figure {
        glyph: &'static str,
        caption: Option<&'static str>,
    },
    /// Racing: car position along the 0-100 track.
    Track { position: u32 },
    /// Blocks: pixel offsets of the pseudo-3D cubes.
    Blocks { cells: Vec<(i32, i32)> },
    /// Color: palette selection plus the current mix result, if any.
    Palette {
        selected: Vec<Primary>,
        status: Option<String>,
        result: Option<&'static Mix>,
    },
}

/// In-progress question screen.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct QuestionView {
    pub title: &'static str,
    /// Title accent color, straight from the site palette.
    pub accent: &'static str,
    pub instructions: Option<&'static str>,
    /// `(score, max)` readout; `None` for the unscored variants.
    pub score: Option<(u32, u32)>,
    pub visual: Visual,
    pub prompt: Option<String>,
    pub feedback: Option<Feedback>,
    pub options: Vec<OptionButton>,
    pub show_restart: bool,
}

/// End-of-game summary screen.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SummaryView {
    pub medal: &'static str,
    pub message: &'static str,
    pub score: u32,
    pub max: u32,
}

/// What the surface should currently display.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum View {
    Question(QuestionView),
    Summary(SummaryView),
}

#[cfg(feature = "serde_json")]
impl View {
    /// JSON form for hosts that render outside this crate's DOM layer.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// What the host must schedule after a submission: either call
/// [`Session::advance`] once `delay_ms` elapses, or nothing. The timer must be
/// cancelable so teardown can revoke it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Followup {
    Advance { delay_ms: u32 },
    None,
}

/// Result of an accepted submission: the feedback view plus the follow-up.
#[derive(Clone, Debug, PartialEq)]
pub struct Submit {
    pub view: View,
    pub followup: Followup,
}

// --- Scored-variant phase ----------------------------------------------------

/// Lifecycle of the multiple-choice variants. A submission is accepted only in
/// `Awaiting`; the window between feedback and the scheduled advance sits in
/// `Feedback`, which makes a second submit for the same question a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Phase {
    Awaiting,
    Feedback,
    Ended,
}

pub(crate) fn summary_view(state: &GameState) -> View {
    View::Summary(SummaryView {
        medal: medal_emoji(state.score(), MAX_QUESTIONS),
        message: Tier::from_score(state.score(), MAX_QUESTIONS).message(),
        score: state.score(),
        max: MAX_QUESTIONS,
    })
}

// --- Session dispatch --------------------------------------------------------

/// One active game, polymorphic over [`GameKind`]. Owned by the manager; all
/// variants share the {start, submit, advance} operation set.
#[derive(Clone, Debug)]
pub enum Session {
    Count(CountGame),
    Math(MathGame),
    Sort(SortGame),
    Racing(RacingGame),
    Animal(AnimalGame),
    Color(ColorGame),
    Blocks(BlocksGame),
    Solar(SolarGame),
}

impl Session {
    pub fn new(kind: GameKind) -> Self {
        match kind {
            GameKind::Count => Self::Count(CountGame::new()),
            GameKind::Math => Self::Math(MathGame::new()),
            GameKind::Sort => Self::Sort(SortGame::new()),
            GameKind::Racing => Self::Racing(RacingGame::new()),
            GameKind::Animal => Self::Animal(AnimalGame::new()),
            GameKind::Color => Self::Color(ColorGame::new()),
            GameKind::Blocks => Self::Blocks(BlocksGame::new()),
            GameKind::Solar => Self::Solar(SolarGame::new()),
        }
    }

    pub fn kind(&self) -> GameKind {
        match self {
            Self::Count(_) => GameKind::Count,
            Self::Math(_) => GameKind::Math,
            Self::Sort(_) => GameKind::Sort,
            Self::Racing(_) => GameKind::Racing,
            Self::Animal(_) => GameKind::Animal,
            Self::Color(_) => GameKind::Color,
            Self::Blocks(_) => GameKind::Blocks,
            Self::Solar(_) => GameKind::Solar,
        }
    }

    /// Reset all session state and produce the first question screen. Also
    /// serves as the "play again" restart.
    pub fn start(&mut self, rng: &mut Lcg) -> View {
        match self {
            Self::Count(g) => g.start(rng),
            Self::Math(g) => g.start(rng),
            Self::Sort(g) => g.start(rng),
            Self::Racing(g) => g.start(rng),
            Self::Animal(g) => g.start(rng),
            Self::Color(g) => g.start(),
            Self::Blocks(g) => g.start(rng),
            Self::Solar(g) => g.start(rng),
        }
    }

    /// Submit the option at `choice` (palette/number index for Color/Sort).
    /// Returns `None` when the submission is not currently accepted.
    pub fn submit(&mut self, choice: usize, now_ms: f64) -> Option<Submit> {
        match self {
            Self::Count(g) => g.submit(choice, now_ms),
            Self::Math(g) => g.submit(choice, now_ms),
            Self::Sort(g) => g.submit(choice, now_ms),
            Self::Racing(g) => g.submit(choice, now_ms),
            Self::Animal(g) => g.submit(choice, now_ms),
            Self::Color(g) => g.submit(choice),
            Self::Blocks(g) => g.submit(choice, now_ms),
            Self::Solar(g) => g.submit(choice, now_ms),
        }
    }

    /// Timer-driven step after feedback: next question, summary, win banner,
    /// or palette reset. `None` when nothing is pending.
    pub fn advance(&mut self, rng: &mut Lcg) -> Option<View> {
        match self {
            Self::Count(g) => g.advance(rng),
            Self::Math(g) => g.advance(rng),
            Self::Sort(g) => g.advance(rng),
            Self::Racing(g) => g.advance(rng),
            Self::Animal(g) => g.advance(rng),
            Self::Color(g) => g.advance(),
            Self::Blocks(g) => g.advance(rng),
            Self::Solar(g) => g.advance(rng),
        }
    }

    /// Scoring record, where the variant keeps one (Color does not).
    pub fn state(&self) -> Option<&GameState> {
        match self {
            Self::Count(g) => Some(g.state()),
            Self::Math(g) => Some(g.state()),
            Self::Sort(g) => Some(g.state()),
            Self::Racing(g) => Some(g.state()),
            Self::Animal(g) => Some(g.state()),
            Self::Color(_) => None,
            Self::Blocks(g) => Some(g.state()),
            Self::Solar(g) => Some(g.state()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parse_round_trips() {
        for s in ["count", "math", "sort", "racing", "animal", "color", "blocks", "solar"] {
            let k = GameKind::parse(s).expect("known kind");
            assert_eq!(k.as_str(), s);
        }
        assert_eq!(GameKind::parse("chess"), None);
        assert_eq!(GameKind::parse(""), None);
        assert_eq!(GameKind::parse("Count"), None); // case-sensitive, data-driven ids are lowercase
    }

    #[test]
    fn tier_bands() {
        assert_eq!(Tier::from_score(5, 5), Tier::Perfect);
        assert_eq!(Tier::from_score(4, 5), Tier::Great);
        assert_eq!(Tier::from_score(3, 5), Tier::Good);
        assert_eq!(Tier::from_score(2, 5), Tier::NeedsPractice);
        assert_eq!(Tier::from_score(0, 5), Tier::NeedsPractice);
    }

    #[test]
    fn medal_scale_has_bronze_band() {
        assert_eq!(medal_emoji(5, 5), "🏆");
        assert_eq!(medal_emoji(4, 5), "🥇");
        assert_eq!(medal_emoji(3, 5), "🥈");
        assert_eq!(medal_emoji(2, 5), "🥉");
        assert_eq!(medal_emoji(1, 5), "🎯");
    }

    #[test]
    fn score_history_records_monotonic_snapshots() {
        let mut st = GameState::new();
        st.add_score(10.0);
        st.add_score(25.0);
        assert_eq!(st.score(), 2);
        let hist = st.history();
        assert_eq!(hist.len(), 2);
        assert_eq!(hist[0], ScoreEvent { score: 1, at_ms: 10.0 });
        assert_eq!(hist[1], ScoreEvent { score: 2, at_ms: 25.0 });
    }

    #[test]
    fn lcg_range_is_inclusive_and_in_bounds() {
        let mut rng = Lcg::new(7);
        let mut seen_lo = false;
        let mut seen_hi = false;
        for _ in 0..2000 {
            let v = rng.range_i32(1, 10);
            assert!((1..=10).contains(&v));
            seen_lo |= v == 1;
            seen_hi |= v == 10;
        }
        assert!(seen_lo && seen_hi, "range endpoints never produced");
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = Lcg::new(42);
        let mut v: Vec<u32> = (0..20).collect();
        rng.shuffle(&mut v);
        let mut sorted = v.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn session_dispatch_matches_kind() {
        for kind in [
            GameKind::Count,
            GameKind::Math,
            GameKind::Sort,
            GameKind::Racing,
            GameKind::Animal,
            GameKind::Color,
            GameKind::Blocks,
            GameKind::Solar,
        ] {
            let s = Session::new(kind);
            assert_eq!(s.kind(), kind);
        }
    }
}
