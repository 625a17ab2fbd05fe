//! Load state of the menu page.
//!
//! ```text
//! Loading --ok--> Loaded { HasResults | NoResults }
//!         --err-> Failed
//! Failed | Loaded --reload--> Loading
//! ```
//!
//! At most one load is outstanding. A result is applied only if it carries
//! the ticket of the current load and the page has not been torn down.

use super::carousel::CardCarousels;
use super::filter::{CategoryFilter, MenuFilter, available, category_tabs};
use super::item::FoodItem;

/// Identifies one load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
enum LoadState {
    Idle,
    Loading(LoadTicket),
    Failed(String),
    Loaded(Vec<FoodItem>),
}

/// What the page should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuDisplay<'a> {
    Loading,
    Error(&'a str),
    Results(Vec<&'a FoodItem>),
    NoResults,
}

/// Outcome of [`MenuPage::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    /// The ticket was superseded or the page was torn down.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct MenuPage {
    state: LoadState,
    next_ticket: u64,
    torn_down: bool,
    carousels: CardCarousels,
}

impl Default for MenuPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuPage {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: LoadState::Idle,
            next_ticket: 0,
            torn_down: false,
            carousels: CardCarousels::for_no_cards(),
        }
    }

    /// Start the initial load. Returns `None` if a load is already running,
    /// the page has already loaded, or it has been torn down.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if self.torn_down || !matches!(self.state, LoadState::Idle) {
            return None;
        }
        Some(self.issue_ticket())
    }

    /// Manual "try again": discard the current result and load again.
    pub fn reload(&mut self) -> Option<LoadTicket> {
        if self.torn_down {
            return None;
        }
        Some(self.issue_ticket())
    }

    fn issue_ticket(&mut self) -> LoadTicket {
        let ticket = LoadTicket(self.next_ticket);
        self.next_ticket += 1;
        self.state = LoadState::Loading(ticket);
        self.carousels = CardCarousels::for_no_cards();
        ticket
    }

    /// Apply the result of a load. The item list is restricted to
    /// available items here.
    pub fn resolve<E: ToString>(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<FoodItem>, E>,
    ) -> Resolution {
        if self.torn_down || self.state != LoadState::Loading(ticket) {
            return Resolution::Ignored;
        }
        self.state = match result {
            Ok(items) => {
                let items = available(items);
                self.carousels = CardCarousels::for_cards(items.iter().map(|i| i.images.len()));
                LoadState::Loaded(items)
            }
            Err(e) => LoadState::Failed(e.to_string()),
        };
        Resolution::Applied
    }

    /// The view is gone; later results must not touch it.
    pub const fn teardown(&mut self) {
        self.torn_down = true;
    }

    #[must_use]
    pub const fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Loaded items, empty unless loaded.
    #[must_use]
    pub fn items(&self) -> &[FoodItem] {
        match &self.state {
            LoadState::Loaded(items) => items,
            _ => &[],
        }
    }

    /// Tabs for the loaded set.
    #[must_use]
    pub fn tabs(&self) -> Vec<CategoryFilter> {
        category_tabs(self.items())
    }

    /// Carousels, one per loaded item in load order.
    #[must_use]
    pub const fn carousels(&self) -> &CardCarousels {
        &self.carousels
    }

    pub const fn carousels_mut(&mut self) -> &mut CardCarousels {
        &mut self.carousels
    }

    #[must_use]
    pub fn display(&self, filter: &MenuFilter) -> MenuDisplay<'_> {
        match &self.state {
            LoadState::Idle | LoadState::Loading(_) => MenuDisplay::Loading,
            LoadState::Failed(message) => MenuDisplay::Error(message),
            LoadState::Loaded(items) => {
                let shown = filter.apply(items);
                if shown.is_empty() {
                    MenuDisplay::NoResults
                } else {
                    MenuDisplay::Results(shown)
                }
            }
        }
    }
}
