//! Pure helpers behind the detail overlay: star fills and text reveal timing.

use chrono::NaiveDate;

pub const STAR_COUNT: usize = 5;
/// Text past this many characters is appended without animation.
pub const REVEAL_LIMIT: usize = 1500;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StarFill {
    Empty,
    Half,
    Full,
}

/// Five stars for a 0..5 rating; a remainder of at least .5 adds a half star.
pub fn star_fills(rating: f64) -> [StarFill; STAR_COUNT] {
    let value = if rating.is_finite() { rating.clamp(0.0, STAR_COUNT as f64) } else { 0.0 };
    let full = value.floor() as usize;
    let half = value - value.floor() >= 0.5;
    let mut fills = [StarFill::Empty; STAR_COUNT];
    for (i, fill) in fills.iter_mut().enumerate() {
        if i < full {
            *fill = StarFill::Full;
        } else if i == full && half {
            *fill = StarFill::Half;
        }
    }
    fills
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealMode {
    Char,
    Word,
}

impl RevealMode {
    /// Delay between successive tokens and the cap on any single delay, in seconds.
    fn timing(self) -> (f64, f64) {
        match self {
            RevealMode::Char => (0.008, 0.8),
            RevealMode::Word => (0.03, 1.0),
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            RevealMode::Char => "char",
            RevealMode::Word => "word",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RevealToken {
    /// Fades in after `delay` seconds.
    Animated { text: String, delay: f64 },
    /// Whitespace, kept as-is so wrapping stays natural.
    Plain(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct RevealText {
    pub tokens: Vec<RevealToken>,
    /// Characters past [`REVEAL_LIMIT`], shown without animation.
    pub tail: Option<String>,
}

pub fn reveal_tokens(text: &str, mode: RevealMode) -> RevealText {
    let split = text
        .char_indices()
        .nth(REVEAL_LIMIT)
        .map_or(text.len(), |(i, _)| i);
    let (clipped, rest) = text.split_at(split);
    let (step, cap) = mode.timing();
    let delay = |i: usize| (i as f64 * step).min(cap);

    let tokens = match mode {
        RevealMode::Char => clipped
            .chars()
            .enumerate()
            .map(|(i, ch)| {
                if ch == ' ' {
                    RevealToken::Plain(" ".into())
                } else {
                    RevealToken::Animated {
                        text: ch.to_string(),
                        delay: delay(i),
                    }
                }
            })
            .collect(),
        RevealMode::Word => {
            let mut tokens = Vec::new();
            let mut words = 0;
            for (run, is_space) in whitespace_runs(clipped) {
                if is_space {
                    tokens.push(RevealToken::Plain(run.to_string()));
                } else {
                    tokens.push(RevealToken::Animated {
                        text: run.to_string(),
                        delay: delay(words),
                    });
                    words += 1;
                }
            }
            tokens
        }
    };

    RevealText {
        tokens,
        tail: (!rest.is_empty()).then(|| rest.to_string()),
    }
}

/// Maximal runs of whitespace and non-whitespace, in order.
fn whitespace_runs(text: &str) -> Vec<(&str, bool)> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut current: Option<bool> = None;
    for (i, ch) in text.char_indices() {
        let is_space = ch.is_whitespace();
        match current {
            Some(kind) if kind != is_space => {
                runs.push((&text[start..i], kind));
                start = i;
                current = Some(is_space);
            }
            None => current = Some(is_space),
            _ => {}
        }
    }
    if let Some(kind) = current {
        runs.push((&text[start..], kind));
    }
    runs
}

/// "Watched March 2, 2025".
pub fn watched_label(date: NaiveDate) -> String {
    format!("Watched {}", date.format("%B %-d, %Y"))
}
