use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use dashmap::DashMap;
use portal_core::{SessionEvent, SessionObserver, SessionSubscription, SessionToken};

type Observers = Vec<(u64, Arc<dyn SessionObserver>)>;

/// Fan-out of session events to the observers subscribed to each token.
#[derive(Clone, Default)]
pub struct SessionEventHub {
    observers: Arc<DashMap<String, Observers>>,
    next_id: Arc<AtomicU64>,
}

impl SessionEventHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &self,
        token: &SessionToken,
        observer: Arc<dyn SessionObserver>,
    ) -> SessionSubscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let key = token.expose().to_owned();

        self.observers
            .entry(key.clone())
            .or_default()
            .push((id, observer));

        let observers = self.observers.clone();
        SessionSubscription::new(move || {
            {
                if let Some(mut entry) = observers.get_mut(&key) {
                    entry.retain(|(observer_id, _)| *observer_id != id);
                }
            }
            observers.remove_if(&key, |_, remaining| remaining.is_empty());
        })
    }

    pub fn publish(&self, token: &SessionToken, event: SessionEvent) {
        // Observers run outside the map lock so they may subscribe or release.
        let observers: Vec<Arc<dyn SessionObserver>> = match self.observers.get(token.expose()) {
            Some(entry) => entry.iter().map(|(_, observer)| observer.clone()).collect(),
            None => return,
        };

        tracing::debug!(observers = observers.len(), ?event, "publishing session event");
        for observer in observers {
            observer.on_session_event(&event);
        }
    }

    pub fn observer_count(&self, token: &SessionToken) -> usize {
        self.observers
            .get(token.expose())
            .map_or(0, |entry| entry.len())
    }
}
