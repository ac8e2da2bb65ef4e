use std::sync::Arc;

use super::lifelog::LifeLog;
use super::screen::{Phase, ScreenId};
use super::store::StatusStore;

/// Records lifecycle callbacks on behalf of one screen.
///
/// One shared implementation parameterized by screen id; every screen gets
/// the same behavior. On each phase entry it overwrites the screen's store
/// entry with `"<id>: <phase>"` and appends `"<id>.<method>()"` to the
/// shared log.
pub struct Recorder {
    id: ScreenId,
    store: Arc<dyn StatusStore>,
    log: Arc<LifeLog>,
}

impl Recorder {
    pub fn new(id: ScreenId, store: Arc<dyn StatusStore>, log: Arc<LifeLog>) -> Self {
        Self { id, store, log }
    }

    pub fn record(&self, phase: Phase) {
        self.store.set(self.id, &format!("{}: {}", self.id, phase.state_name()));
        self.log.append(&format!("{}.{}()", self.id, phase.method_name()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::PrefsStore;

    fn recorder(id: ScreenId) -> (Recorder, Arc<dyn StatusStore>, Arc<LifeLog>) {
        let store: Arc<dyn StatusStore> = Arc::new(PrefsStore::in_memory());
        let log = Arc::new(LifeLog::new(64));
        (Recorder::new(id, store.clone(), log.clone()), store, log)
    }

    #[test]
    fn every_phase_overwrites_the_screen_entry() {
        let (rec, store, _) = recorder(ScreenId::A);
        let phases = [
            Phase::Created,
            Phase::Started,
            Phase::Resumed,
            Phase::Paused,
            Phase::Stopped,
            Phase::Destroyed,
        ];
        for phase in phases {
            rec.record(phase);
            assert_eq!(store.get(ScreenId::A), format!("A: {}", phase.state_name()));
        }
    }

    #[test]
    fn records_leave_other_screens_alone() {
        let (rec, store, _) = recorder(ScreenId::B);
        rec.record(Phase::Created);
        assert_eq!(store.get(ScreenId::B), "B: created");
        assert_eq!(store.get(ScreenId::A), crate::store::UNSET);
    }

    #[test]
    fn callback_lines_are_retrievable_newest_first() {
        let (rec, _, log) = recorder(ScreenId::A);
        rec.record(Phase::Created);
        rec.record(Phase::Started);
        assert_eq!(log.tail(2), ["A.on_start()", "A.on_create()"]);
    }
}
