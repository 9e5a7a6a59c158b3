//! Rapid serial visual presentation: one word at a time at a fixed pace.
//!
//! The session owns no timers. [`RsvpSession::play`] and
//! [`RsvpSession::advance`] hand back a [`Tick`] describing the word to show
//! and how long to show it; the caller waits and passes the tick back.
//! Pausing invalidates every outstanding tick, which is how a scheduled
//! advance is cancelled.

use std::time::Duration;

pub const MIN_WPM: u32 = 200;
pub const MAX_WPM: u32 = 1000;
pub const DEFAULT_WPM: u32 = 300;
/// Default step for [`RsvpSession::increase_wpm`] and friends.
pub const WPM_STEP: u32 = 50;

/// Clamp a words-per-minute value to the supported range.
pub fn clamp_wpm(wpm: u32) -> u32 {
    wpm.clamp(MIN_WPM, MAX_WPM)
}

/// How long `word` stays on screen at `wpm`.
///
/// Long words and words ending a sentence or clause get extra time:
///
/// | condition              | extra |
/// |------------------------|-------|
/// | more than 8 chars      | +30%  |
/// | more than 12 chars     | +20%  |
/// | ends with `.` `!` `?`  | +80%  |
/// | ends with `,` `;` `:`  | +40%  |
/// | ends with `"` `'` `)`  | +20%  |
pub fn word_delay(word: &str, wpm: u32) -> Duration {
    // Multiplier in tenths, so 10 == 1.0x
    let mut multiplier: u64 = 10;

    let len = word.chars().count();
    if len > 8 {
        multiplier += 3;
    }
    if len > 12 {
        multiplier += 2;
    }

    match word.chars().last() {
        Some('.' | '!' | '?') => multiplier += 8,
        Some(',' | ';' | ':') => multiplier += 4,
        Some('"' | '\'' | ')') => multiplier += 2,
        _ => {}
    }

    let wpm = u64::from(wpm.max(1));
    Duration::from_micros(60_000_000 * multiplier / (10 * wpm))
}

/// A scheduled word change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    word: String,
    delay: Duration,
    generation: u64,
}

impl Tick {
    /// Word to display now.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Time to wait before calling [`RsvpSession::advance`].
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Reading position, pace and playback state for one reader.
#[derive(Debug, Clone)]
pub struct RsvpSession {
    words: Vec<String>,
    /// Index of the next word to show.
    index: usize,
    wpm: u32,
    playing: bool,
    current_word: Option<String>,
    focus_mode: bool,
    /// Bumped on every pause; ticks from older generations are stale.
    generation: u64,
}

impl Default for RsvpSession {
    fn default() -> Self {
        Self::new()
    }
}

impl RsvpSession {
    pub fn new() -> Self {
        Self::with_wpm(DEFAULT_WPM)
    }

    /// Create an empty session at the given pace (clamped).
    pub fn with_wpm(wpm: u32) -> Self {
        Self {
            words: Vec::new(),
            index: 0,
            wpm: clamp_wpm(wpm),
            playing: false,
            current_word: None,
            focus_mode: false,
            generation: 0,
        }
    }

    /// Replace the text, stopping playback and positioning at
    /// `start_index` (clamped to the word count).
    pub fn load_text(&mut self, text: &str, start_index: usize) {
        self.pause();
        self.current_word = None;
        self.words = text.split_whitespace().map(str::to_owned).collect();
        self.index = start_index.min(self.words.len());
    }

    /// Start or resume playback and show the next word.
    ///
    /// A finished session restarts from the first word. Returns `None` if
    /// there is nothing to read.
    pub fn play(&mut self) -> Option<Tick> {
        if !self.has_text() {
            return None;
        }
        if self.is_complete() {
            self.index = 0;
        }
        // Drop any tick still scheduled from an earlier play().
        self.generation = self.generation.wrapping_add(1);
        self.playing = true;
        self.show_next()
    }

    /// Move on after `tick`'s delay has elapsed.
    ///
    /// Returns the following tick, or `None` when playback has finished or
    /// `tick` was cancelled by a pause.
    pub fn advance(&mut self, tick: &Tick) -> Option<Tick> {
        if !self.playing || tick.generation != self.generation {
            return None;
        }
        self.show_next()
    }

    fn show_next(&mut self) -> Option<Tick> {
        let Some(word) = self.words.get(self.index).cloned() else {
            self.playing = false;
            self.current_word = None;
            return None;
        };

        self.index += 1;
        let delay = word_delay(&word, self.wpm);
        self.current_word = Some(word.clone());

        Some(Tick {
            word,
            delay,
            generation: self.generation,
        })
    }

    /// Stop playback, cancelling any outstanding tick.
    pub fn pause(&mut self) {
        self.playing = false;
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn toggle_play(&mut self) -> Option<Tick> {
        if self.playing {
            self.pause();
            None
        } else {
            self.play()
        }
    }

    /// Stop and rewind to the first word, keeping the text.
    pub fn reset(&mut self) {
        self.pause();
        self.current_word = None;
        self.index = 0;
    }

    /// Stop and drop the text.
    pub fn clear(&mut self) {
        self.reset();
        self.words.clear();
    }

    pub fn toggle_focus_mode(&mut self) {
        self.focus_mode = !self.focus_mode;
    }

    pub fn set_wpm(&mut self, wpm: u32) {
        self.wpm = clamp_wpm(wpm);
    }

    pub fn increase_wpm(&mut self, step: u32) {
        self.set_wpm(self.wpm.saturating_add(step));
    }

    pub fn decrease_wpm(&mut self, step: u32) {
        self.set_wpm(self.wpm.saturating_sub(step));
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn has_text(&self) -> bool {
        !self.words.is_empty()
    }

    /// Word currently on display, if any.
    ///
    /// `None` both before the first word and after the last one; use
    /// [`is_complete`](Self::is_complete) to tell a finished session apart.
    pub fn current_word(&self) -> Option<&str> {
        self.current_word.as_deref()
    }

    /// Number of words shown so far.
    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn wpm(&self) -> u32 {
        self.wpm
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_focus_mode(&self) -> bool {
        self.focus_mode
    }

    /// Every word has been shown.
    pub fn is_complete(&self) -> bool {
        self.has_text() && self.index >= self.words.len()
    }

    /// Percentage of words shown, 0.0 to 100.0.
    pub fn progress(&self) -> f64 {
        if self.words.is_empty() {
            return 0.0;
        }
        self.index as f64 / self.words.len() as f64 * 100.0
    }

    /// Whole-text reading time at the current pace, rounded up.
    pub fn reading_time_secs(&self) -> u64 {
        reading_time_secs(self.words.len(), self.wpm)
    }
}

/// Seconds needed to read `words` words at `wpm`, rounded up.
pub fn reading_time_secs(words: usize, wpm: u32) -> u64 {
    let wpm = u64::from(wpm.max(1));
    (words as u64 * 60).div_ceil(wpm)
}
