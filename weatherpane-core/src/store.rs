//! Observable state read by the display layer.

use std::sync::Arc;

use tokio::sync::watch;

use crate::model::{CurrentConditions, ForecastSlot, SLOT_COUNT, WeatherSnapshot};

/// A value holder that notifies subscribers on every change.
///
/// Subscribers get a [`watch::Receiver`] and can either poll it with
/// `borrow()` or await `changed()` on whatever thread they render from.
#[derive(Debug)]
pub struct Observable<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone> Observable<T> {
    pub fn new(value: T) -> Self {
        Self { tx: watch::Sender::new(value) }
    }

    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Modify in place. Subscribers see the result as one change.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(f);
    }
}

impl<T: Clone + Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Latest clock text and weather, shared between the scheduler and consumers.
#[derive(Debug, Clone, Default)]
pub struct StateStore {
    current_time_text: Arc<Observable<String>>,
    weather: Arc<Observable<WeatherSnapshot>>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_time_text(&self) -> &Observable<String> {
        &self.current_time_text
    }

    /// Current conditions and all forecast slots, published together.
    pub fn weather(&self) -> &Observable<WeatherSnapshot> {
        &self.weather
    }

    pub fn current_conditions(&self) -> CurrentConditions {
        self.weather.tx.borrow().current.clone()
    }

    pub fn forecast_slots(&self) -> [ForecastSlot; SLOT_COUNT] {
        self.weather.tx.borrow().slots.clone()
    }

    pub fn slot_indices(&self) -> Vec<usize> {
        self.weather.tx.borrow().slot_indices().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get() {
        let text = Observable::new(String::new());
        text.set("Sun, Jun 30  10:55:29 PM".into());
        assert_eq!(text.get(), "Sun, Jun 30  10:55:29 PM");
    }

    #[tokio::test]
    async fn update_notifies_subscribers_once() {
        let store = StateStore::new();
        let mut rx = store.weather().subscribe();

        store.weather().update(|s| {
            s.current.summary = "Clear".into();
            s.slots[2].icon = "rain".into();
        });

        rx.changed().await.unwrap();
        let seen = rx.borrow_and_update().clone();
        assert_eq!(seen.current.summary, "Clear");
        assert_eq!(seen.slots[2].icon, "rain");
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn clones_share_state() {
        let store = StateStore::new();
        let other = store.clone();

        other.current_time_text().set("tick".into());
        assert_eq!(store.current_time_text().get(), "tick");
    }

    #[test]
    fn slots_keep_their_indices() {
        let store = StateStore::new();
        assert_eq!(store.slot_indices(), vec![0, 1, 2, 3]);
        assert_eq!(store.forecast_slots()[3].index(), 3);
        assert_eq!(store.current_conditions().summary, "");
    }
}
