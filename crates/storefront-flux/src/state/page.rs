use serde::{Deserialize, Serialize};

/// Selectable page sizes; `selected` indexes into `items`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSizes {
    pub items: Vec<u64>,
    pub selected: usize,
}

impl PageSizes {
    /// The currently selected size, if the index is valid
    pub fn selected_size(&self) -> Option<u64> {
        self.items.get(self.selected).copied()
    }
}

/// Paging state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based current page
    pub current: u64,
    pub sizes: PageSizes,
    pub first: u64,
    pub last: u64,
    /// 1-based inclusive record bounds of the current page
    pub from: u64,
    pub to: u64,
    pub previous: Option<u64>,
    pub next: Option<u64>,
}

impl Page {
    pub fn new(sizes: PageSizes) -> Self {
        Self {
            current: 1,
            sizes,
            first: 1,
            last: 1,
            from: 0,
            to: 0,
            previous: None,
            next: None,
        }
    }

    pub fn apply_window(&mut self, window: &PageWindow) {
        self.last = window.last;
        self.from = window.from;
        self.to = window.to;
        self.previous = window.previous;
        self.next = window.next;
    }
}

/// Page bounds derived from a record count
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    pub last: u64,
    pub from: u64,
    pub to: u64,
    pub previous: Option<u64>,
    pub next: Option<u64>,
}
