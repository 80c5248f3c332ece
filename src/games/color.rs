//! Color game: pick two primaries, see what they mix into. Purely exploratory
//! with no score and no question cap; the palette clears itself a moment after
//! each mix and an explicit reset control is always available.

use super::{Followup, PALETTE_RESET_DELAY_MS, QuestionView, Submit, View, Visual};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Primary {
    Red,
    Yellow,
    Blue,
}

/// Palette order on screen, fixed.
pub const PRIMARIES: [Primary; 3] = [Primary::Red, Primary::Yellow, Primary::Blue];

impl Primary {
    pub fn hex(&self) -> &'static str {
        match self {
            Self::Red => "#e74c3c",
            Self::Yellow => "#f1c40f",
            Self::Blue => "#3498db",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Red => "🔴 Đỏ",
            Self::Yellow => "🟡 Vàng",
            Self::Blue => "🔵 Xanh dương",
        }
    }
}

/// Result of mixing two distinct primaries.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Mix {
    pub color: &'static str,
    pub name: &'static str,
    pub hex: &'static str,
}

const ORANGE: Mix = Mix {
    color: "orange",
    name: "Cam",
    hex: "#ff8c00",
};
const PURPLE: Mix = Mix {
    color: "purple",
    name: "Tím",
    hex: "#9b59b6",
};
const GREEN: Mix = Mix {
    color: "green",
    name: "Xanh lá",
    hex: "#27ae60",
};

/// Pairwise mixing table, symmetric. `None` only for identical inputs.
pub fn mix(a: Primary, b: Primary) -> Option<&'static Mix> {
    use Primary::*;
    match (a, b) {
        (Red, Yellow) | (Yellow, Red) => Some(&ORANGE),
        (Red, Blue) | (Blue, Red) => Some(&PURPLE),
        (Yellow, Blue) | (Blue, Yellow) => Some(&GREEN),
        _ => None,
    }
}

#[derive(Clone, Debug)]
pub struct ColorGame {
    first: Option<Primary>,
    /// Both picks stay highlighted until the scheduled palette reset.
    second: Option<Primary>,
    result: Option<&'static Mix>,
}

impl ColorGame {
    pub fn new() -> Self {
        Self {
            first: None,
            second: None,
            result: None,
        }
    }

    pub fn pending(&self) -> Option<Primary> {
        self.first
    }

    pub(crate) fn start(&mut self) -> View {
        self.first = None;
        self.second = None;
        self.result = None;
        self.view()
    }

    fn view(&self) -> View {
        let selected: Vec<Primary> = self.first.into_iter().chain(self.second).collect();
        let status = match (self.first, self.second) {
            (Some(c), None) => Some(format!("Đã chọn: {}", c.label())),
            _ => None,
        };
        View::Question(QuestionView {
            title: "🎨 Trộn Màu Sắc 🎨",
            accent: "#9b59b6",
            instructions: Some("Chọn 2 màu để xem kết quả pha trộn!"),
            score: None,
            visual: Visual::Palette {
                selected,
                status,
                result: self.result,
            },
            prompt: None,
            feedback: None,
            options: Vec::new(), // the palette itself carries the click targets
            show_restart: true,  // "🔄 Reset" is always offered
        })
    }

    pub(crate) fn submit(&mut self, choice: usize) -> Option<Submit> {
        let color = *PRIMARIES.get(choice)?;
        match self.first {
            None => {
                self.first = Some(color);
                self.second = None;
                Some(Submit {
                    view: self.view(),
                    followup: Followup::None,
                })
            }
            Some(first) if first == color => None, // same color twice: no mix recorded
            Some(first) => {
                if self.second.is_some() {
                    // A mix is already showing and waiting for its reset timer.
                    return None;
                }
                self.second = Some(color);
                self.result = mix(first, color);
                Some(Submit {
                    view: self.view(),
                    followup: Followup::Advance {
                        delay_ms: PALETTE_RESET_DELAY_MS,
                    },
                })
            }
        }
    }

    /// Scheduled palette reset: clears the selection, keeps the mixed swatch
    /// on display until the next pick or an explicit reset.
    pub(crate) fn advance(&mut self) -> Option<View> {
        if self.second.is_none() {
            return None;
        }
        self.first = None;
        self.second = None;
        Some(self.view())
    }
}

impl Default for ColorGame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx(p: Primary) -> usize {
        PRIMARIES.iter().position(|&c| c == p).unwrap()
    }

    #[test]
    fn mixing_table_is_symmetric_and_total_for_distinct_pairs() {
        use Primary::*;
        for a in PRIMARIES {
            for b in PRIMARIES {
                if a == b {
                    assert_eq!(mix(a, b), None);
                } else {
                    assert_eq!(mix(a, b), mix(b, a));
                    assert!(mix(a, b).is_some());
                }
            }
        }
        assert_eq!(mix(Red, Yellow).unwrap().name, "Cam");
        assert_eq!(mix(Red, Yellow).unwrap().hex, "#ff8c00");
        assert_eq!(mix(Red, Blue).unwrap().name, "Tím");
        assert_eq!(mix(Yellow, Blue).unwrap().name, "Xanh lá");
    }

    #[test]
    fn two_picks_produce_a_mix_then_the_palette_clears() {
        let mut g = ColorGame::new();
        g.start();
        let s1 = g.submit(idx(Primary::Red)).unwrap();
        assert_eq!(s1.followup, Followup::None);
        let s2 = g.submit(idx(Primary::Yellow)).unwrap();
        assert!(matches!(
            s2.followup,
            Followup::Advance { delay_ms } if delay_ms == PALETTE_RESET_DELAY_MS
        ));
        match &s2.view {
            View::Question(q) => match &q.visual {
                Visual::Palette { selected, result, .. } => {
                    assert_eq!(selected.as_slice(), [Primary::Red, Primary::Yellow]);
                    assert_eq!(result.unwrap().name, "Cam");
                }
                other => panic!("unexpected visual {other:?}"),
            },
            View::Summary(_) => panic!("color game has no summary"),
        }
        // Reset timer fires: selection clears, swatch stays.
        match g.advance().unwrap() {
            View::Question(q) => match q.visual {
                Visual::Palette { selected, result, .. } => {
                    assert!(selected.is_empty());
                    assert_eq!(result.unwrap().name, "Cam");
                }
                other => panic!("unexpected visual {other:?}"),
            },
            View::Summary(_) => unreachable!(),
        }
    }

    #[test]
    fn same_color_twice_is_a_no_op() {
        let mut g = ColorGame::new();
        g.start();
        g.submit(idx(Primary::Blue)).unwrap();
        assert!(g.submit(idx(Primary::Blue)).is_none());
        assert_eq!(g.pending(), Some(Primary::Blue));
    }

    #[test]
    fn reset_clears_everything() {
        let mut g = ColorGame::new();
        g.start();
        g.submit(0).unwrap();
        g.submit(2).unwrap();
        match g.start() {
            View::Question(q) => match q.visual {
                Visual::Palette { selected, result, .. } => {
                    assert!(selected.is_empty());
                    assert!(result.is_none());
                }
                other => panic!("unexpected visual {other:?}"),
            },
            View::Summary(_) => unreachable!(),
        }
    }
}
