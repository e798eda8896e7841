//! # Browse View
//!
//! A selectable, filterable list over the catalog. The view owns the
//! catalog, the filter and the selection, and turns key presses into a
//! [`Command`] for the driver. It never runs anything itself: editing and
//! quitting are the driver's job.

use crate::model::NoteBundle;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What the driver should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    None,
    Edit(NoteBundle),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterState {
    Unfiltered,
    /// The user is typing a filter term
    Filtering,
    /// A term is applied and the list is narrowed to it
    Applied,
}

pub struct BrowseView {
    catalog: Vec<NoteBundle>,
    filter: String,
    filter_state: FilterState,
    /// Indices into `catalog` of the entries that match the filter
    visible: Vec<usize>,
    /// Position within `visible`
    selected: usize,
    /// First visible position, so the selection stays on screen
    offset: usize,
    page_size: usize,
}

impl BrowseView {
    pub fn new(catalog: Vec<NoteBundle>) -> Self {
        let visible = (0..catalog.len()).collect();
        Self {
            catalog,
            filter: String::new(),
            filter_state: FilterState::Unfiltered,
            visible,
            selected: 0,
            offset: 0,
            page_size: 1,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Command {
        if self.filter_state == FilterState::Filtering {
            self.handle_filter_key(key);
            return Command::None;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.select_by(-1),
            KeyCode::Down | KeyCode::Char('j') => self.select_by(1),
            KeyCode::PageUp | KeyCode::Left | KeyCode::Char('h') => {
                self.select_by(-(self.page_size as isize))
            }
            KeyCode::PageDown | KeyCode::Right | KeyCode::Char('l') => {
                self.select_by(self.page_size as isize)
            }
            KeyCode::Home | KeyCode::Char('g') => self.select_index(0),
            KeyCode::End | KeyCode::Char('G') => {
                self.select_index(self.visible.len().saturating_sub(1))
            }
            KeyCode::Char('/') => {
                self.filter_state = FilterState::Filtering;
            }
            KeyCode::Esc if self.filter_state == FilterState::Applied => self.reset_filter(),
            KeyCode::Enter => {
                if let Some(bundle) = self.selected_bundle() {
                    return Command::Edit(bundle.clone());
                }
            }
            KeyCode::Char('q') => return Command::Quit,
            _ => {}
        }
        Command::None
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.reset_filter(),
            KeyCode::Enter => {
                self.filter_state = if self.filter.is_empty() {
                    FilterState::Unfiltered
                } else {
                    FilterState::Applied
                };
            }
            KeyCode::Backspace => {
                self.filter.pop();
                self.refilter();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.filter.push(c);
                self.refilter();
            }
            _ => {}
        }
    }

    fn reset_filter(&mut self) {
        self.filter.clear();
        self.filter_state = FilterState::Unfiltered;
        self.refilter();
    }

    fn refilter(&mut self) {
        let term = &self.filter;
        self.visible = self
            .catalog
            .iter()
            .enumerate()
            .filter(|(_, bundle)| bundle.matches_filter(term))
            .map(|(i, _)| i)
            .collect();
        self.select_index(0);
    }

    fn select_by(&mut self, delta: isize) {
        let target = self.selected.saturating_add_signed(delta);
        self.select_index(target);
    }

    fn select_index(&mut self, index: usize) {
        self.selected = index.min(self.visible.len().saturating_sub(1));
        self.scroll_to_selection();
    }

    fn scroll_to_selection(&mut self) {
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + self.page_size {
            self.offset = self.selected + 1 - self.page_size;
        }
    }

    /// Sets how many entries fit on screen.
    pub fn set_viewport(&mut self, entries: usize) {
        self.page_size = entries.max(1);
        self.offset = self.offset.min(self.selected);
        self.scroll_to_selection();
    }

    pub fn selected_bundle(&self) -> Option<&NoteBundle> {
        self.visible
            .get(self.selected)
            .map(|&i| &self.catalog[i])
    }

    /// The entries currently on screen, paired with whether each is selected.
    pub fn page(&self) -> impl Iterator<Item = (&NoteBundle, bool)> + '_ {
        self.visible
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(self.page_size)
            .map(move |(pos, &i)| (&self.catalog[i], pos == self.selected))
    }

    pub fn catalog(&self) -> &[NoteBundle] {
        &self.catalog
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter_state
    }

    pub fn is_filtering(&self) -> bool {
        self.filter_state == FilterState::Filtering
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn offset(&self) -> usize {
        self.offset
    }
}
