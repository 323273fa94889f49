use std::{cell::RefCell, rc::Rc};

/// Raised when an authenticated call is rejected with 401. The persisted
/// session has already been cleared by the time listeners run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnauthorizedEvent {
    pub path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn(&UnauthorizedEvent)>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

#[derive(Clone, Default)]
pub struct UnauthorizedEvents {
    inner: Rc<RefCell<Listeners>>,
}

impl UnauthorizedEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl Fn(&UnauthorizedEvent) + 'static) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.entries.push((id, Rc::new(listener)));
        SubscriptionId(id)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner
            .borrow_mut()
            .entries
            .retain(|(entry, _)| *entry != id.0);
    }

    pub fn emit(&self, event: &UnauthorizedEvent) {
        // Snapshot so listeners may (un)subscribe while being notified.
        let listeners: Vec<Listener> = self
            .inner
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn emit_reaches_every_listener_until_unsubscribed() {
        let events = UnauthorizedEvents::new();
        let hits = Rc::new(Cell::new(0));
        let a = {
            let hits = hits.clone();
            events.subscribe(move |_| hits.set(hits.get() + 1))
        };
        {
            let hits = hits.clone();
            events.subscribe(move |_| hits.set(hits.get() + 10));
        }
        let event = UnauthorizedEvent {
            path: "/Categories".into(),
        };
        events.emit(&event);
        assert_eq!(hits.get(), 11);

        events.unsubscribe(a);
        events.emit(&event);
        assert_eq!(hits.get(), 21);
        assert_eq!(events.listener_count(), 1);
    }

    #[test]
    fn listener_may_unsubscribe_itself_during_emit() {
        let events = UnauthorizedEvents::new();
        let slot = Rc::new(Cell::new(None::<SubscriptionId>));
        let id = {
            let events = events.clone();
            let slot = slot.clone();
            events.clone().subscribe(move |_| {
                if let Some(id) = slot.get() {
                    events.unsubscribe(id);
                }
            })
        };
        slot.set(Some(id));
        events.emit(&UnauthorizedEvent { path: "/x".into() });
        assert_eq!(events.listener_count(), 0);
    }
}
