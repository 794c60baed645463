// Tab controller - which view is active, and which fetches may still land
use crate::domain::view::Tab;

/// What the app has to do after a tab was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabLoad {
    /// Dashboard data arrives through the poller.
    None,
    Plants { epoch: u64 },
    Analytics { epoch: u64 },
}

/// Every selection starts a new epoch, even when re-selecting the active tab.
/// Fetch completions carry the epoch they were dispatched in and are only
/// applied while it is still current.
#[derive(Debug, Clone, Default)]
pub struct TabController {
    current: Tab,
    epoch: u64,
}

impl TabController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Tab {
        self.current
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn select(&mut self, tab: Tab) -> TabLoad {
        self.current = tab;
        self.epoch += 1;
        tracing::debug!(%tab, epoch = self.epoch, "tab selected");

        match tab {
            Tab::Dashboard => TabLoad::None,
            Tab::Plants => TabLoad::Plants { epoch: self.epoch },
            Tab::Analytics => TabLoad::Analytics { epoch: self.epoch },
        }
    }

    pub fn is_current(&self, tab: Tab, epoch: u64) -> bool {
        self.current == tab && self.epoch == epoch
    }
}
