//! Marquee engine for seamless infinite horizontal scrolling
//!
//! Implements the math behind the auto-scrolling card rows: measuring the width
//! of one un-cloned group of cards, padding the track with whole-group clones
//! until there is enough runway for the wraparound to be invisible, and advancing
//! a constant-speed offset that wraps modulo the group width.
//!
//! The engine is deliberately headless: widths come from a [`WidthProvider`]
//! rather than any rendering surface, so the wraparound and clone-padding logic
//! can be exercised with synthetic widths.

/// Upper bound on clone passes, guarding against runaway track growth
/// when measurements are unstable.
pub const MAX_CLONE_PASSES: usize = 8;

/// Source of rendered item widths for a track.
///
/// Index `i` refers to the i-th card on the track (clones included).
pub trait WidthProvider {
    /// Rendered width of the item at `index`, in display units.
    fn width_of(&self, index: usize) -> f32;
}

impl<F> WidthProvider for F
where
    F: Fn(usize) -> f32,
{
    fn width_of(&self, index: usize) -> f32 {
        self(index)
    }
}

/// Sums the widths of the first `group_count` items plus the inter-item gap
/// between each pair: `sum(width_i) + gap * (group_count - 1)`.
///
/// `group_count` is clamped to `track_len`, mirroring a track that has fewer
/// children than expected. Returns 0.0 for an empty group.
pub fn measure_group_width<W: WidthProvider>(
    widths: &W,
    track_len: usize,
    group_count: usize,
    gap: f32,
) -> f32 {
    let count = group_count.min(track_len);
    if count == 0 {
        return 0.0;
    }
    let mut total = 0.0;
    for i in 0..count {
        total += widths.width_of(i).max(0.0);
    }
    total + gap * (count - 1) as f32
}

/// An ordered list of cards plus the length of the original, un-cloned group.
///
/// Cards past `group_len` are clones appended by [`Track::ensure_enough_clones`],
/// always in whole-group units and in original order.
#[derive(Debug, Clone)]
pub struct Track<T> {
    cards: Vec<T>,
    group_len: usize,
}

impl<T> Track<T> {
    /// Creates a track whose initial cards form the original group.
    pub fn new(cards: Vec<T>) -> Self {
        let group_len = cards.len();
        Self { cards, group_len }
    }

    /// All cards on the track, clones included.
    pub fn cards(&self) -> &[T] {
        &self.cards
    }

    /// Number of cards currently on the track.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the track holds no cards at all.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Length of the original, un-cloned group.
    pub fn group_len(&self) -> usize {
        self.group_len
    }

    /// Total width of every card on the track including inter-item gaps.
    pub fn total_width<W: WidthProvider>(&self, widths: &W, gap: f32) -> f32 {
        measure_group_width(widths, self.cards.len(), self.cards.len(), gap)
    }
}

impl<T: Clone> Track<T> {
    /// Appends up to `groups` whole-group clones, capped at [`MAX_CLONE_PASSES`].
    pub fn append_group_clones(&mut self, groups: usize) {
        let groups = groups.min(MAX_CLONE_PASSES);
        for _ in 0..groups {
            for i in 0..self.group_len {
                let clone = self.cards[i].clone();
                self.cards.push(clone);
            }
        }
    }

    /// Pads the track with whole-group clones until its total width covers
    /// `viewport_width * 2 + group_width`, so a full group can scroll through
    /// with runway on both sides before wrapping.
    ///
    /// No-ops when `group_width` or `viewport_width` is degenerate (≤ 1.0,
    /// e.g. not yet laid out). Returns the number of groups appended.
    pub fn ensure_enough_clones<W: WidthProvider>(
        &mut self,
        viewport_width: f32,
        group_width: f32,
        widths: &W,
        gap: f32,
    ) -> usize {
        if group_width <= 1.0 || viewport_width <= 1.0 {
            return 0;
        }
        let need = viewport_width * 2.0 + group_width;
        let have = self.total_width(widths, gap);
        if have >= need {
            return 0;
        }
        let missing = need - have;
        let groups = (missing / group_width).ceil() as usize;
        let groups = groups.min(MAX_CLONE_PASSES);
        self.append_group_clones(groups);
        groups
    }
}

/// Scroll state for one marquee row.
///
/// The visual position of the track is `-offset`; `offset` stays in
/// `[0, group_width)` whenever the group width is known.
#[derive(Debug, Clone)]
pub struct Marquee {
    group_width: f32,
    offset: f32,
    speed: f32,
    paused: bool,
    running: bool,
}

impl Marquee {
    /// Creates a marquee scrolling at `speed` display units per second over a
    /// group of the given width.
    pub fn new(speed: f32, group_width: f32) -> Self {
        Self {
            group_width,
            offset: 0.0,
            speed,
            paused: false,
            running: true,
        }
    }

    /// Current scroll offset in display units.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Width of one un-cloned group as last measured.
    pub fn group_width(&self) -> f32 {
        self.group_width
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Cancels the marquee; subsequent ticks are no-ops.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Advances the offset by `dt` seconds of travel and wraps it modulo the
    /// group width.
    ///
    /// While paused, time still elapses on the caller's side but the offset does
    /// not move, so resuming continues seamlessly from the same position. A zero
    /// group width means "do not wrap yet": the offset keeps growing and the
    /// next [`Marquee::remeasure`] normalizes it.
    pub fn tick(&mut self, dt: f32) {
        if !self.running || self.paused || dt <= 0.0 {
            return;
        }
        self.offset += self.speed * dt;
        if self.group_width > 0.0 {
            while self.offset >= self.group_width {
                self.offset -= self.group_width;
            }
        }
    }

    /// Adopts a freshly measured group width and re-normalizes the offset into
    /// `[0, group_width)` so the visual position does not jump.
    ///
    /// Non-positive measurements are ignored and the previous width kept.
    pub fn remeasure(&mut self, group_width: f32) {
        if group_width > 0.0 {
            self.group_width = group_width;
            self.offset %= group_width;
        }
    }
}
