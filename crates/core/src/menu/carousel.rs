//! Per-card image carousel.

/// Image shown for items without any images.
pub const PLACEHOLDER_IMAGE: &str = "/static/img/placeholder-food.svg";

/// Direction of a carousel step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Next,
    Prev,
}

/// Position within one item's image list.
///
/// `index` is always in `0..len` when `len > 0`, and `0` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Carousel {
    len: usize,
    index: usize,
}

impl Carousel {
    /// Start at the first image.
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self { len, index: 0 }
    }

    /// Start at `index`, or at the first image when it is out of range.
    #[must_use]
    pub fn at(len: usize, index: usize) -> Self {
        let mut carousel = Self::new(len);
        carousel.select(index);
        carousel
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Prev/next buttons and dots are only shown with two or more images.
    #[must_use]
    pub const fn has_controls(&self) -> bool {
        self.len > 1
    }

    pub const fn next(&mut self) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
    }

    pub const fn previous(&mut self) {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
    }

    /// Jump to `index`; out-of-range values are ignored.
    pub const fn select(&mut self, index: usize) {
        if index < self.len {
            self.index = index;
        }
    }

    pub const fn step(&mut self, step: Step) {
        match step {
            Step::Next => self.next(),
            Step::Prev => self.previous(),
        }
    }

    /// URL of the image to display.
    #[must_use]
    pub fn current_image<'a>(&self, images: &'a [String]) -> &'a str {
        images
            .get(self.index)
            .map_or(PLACEHOLDER_IMAGE, String::as_str)
    }
}

/// One carousel per rendered card, addressed by card position.
///
/// Rebuilding the arena resets every card to its first image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardCarousels {
    cards: Vec<Carousel>,
}

impl CardCarousels {
    #[must_use]
    pub const fn for_no_cards() -> Self {
        Self { cards: Vec::new() }
    }

    /// Fresh carousels for a list of image counts.
    #[must_use]
    pub fn for_cards<I: IntoIterator<Item = usize>>(image_counts: I) -> Self {
        Self {
            cards: image_counts.into_iter().map(Carousel::new).collect(),
        }
    }

    #[must_use]
    pub fn get(&self, card: usize) -> Option<&Carousel> {
        self.cards.get(card)
    }

    pub fn get_mut(&mut self, card: usize) -> Option<&mut Carousel> {
        self.cards.get_mut(card)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
