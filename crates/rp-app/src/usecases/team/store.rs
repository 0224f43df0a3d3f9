use tokio::sync::watch;

use rp_core::team::{Team, TeamSnapshot};

/// Per-session cache of team membership data.
///
/// Every change is published to all receivers handed out by
/// [`TeamStore::subscribe`]. There is no process-wide instance; callers own
/// and share the store explicitly.
pub struct TeamStore {
    tx: watch::Sender<TeamSnapshot>,
}

impl Default for TeamStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TeamStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(TeamSnapshot::default());
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<TeamSnapshot> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> TeamSnapshot {
        self.tx.borrow().clone()
    }

    pub fn update(&self, change: impl FnOnce(&mut TeamSnapshot)) {
        self.tx.send_modify(change);
    }

    pub fn set_teams(&self, teams: Vec<Team>) {
        self.update(|snapshot| snapshot.teams = teams);
    }

    pub fn clear_error(&self) {
        self.update(|snapshot| snapshot.last_error = None);
    }
}
