use std::sync::{Arc, Mutex, Weak};

/// Records every output emitted while the tracker is alive.
pub struct OutputTrackerMt<T: Clone + 'static> {
    output: Mutex<Vec<T>>,
}

impl<T: Clone + 'static> OutputTrackerMt<T> {
    pub fn new() -> Self {
        Self {
            output: Mutex::new(Vec::new()),
        }
    }

    pub fn add(&self, t: T) {
        self.output.lock().unwrap().push(t);
    }

    pub fn output(&self) -> Vec<T> {
        self.output.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.output.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.output.lock().unwrap().is_empty()
    }

    pub fn clear(&self) {
        self.output.lock().unwrap().clear();
    }
}

impl<T: Clone + 'static> Default for OutputTrackerMt<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Hands out trackers and fans emitted outputs into all of them.
/// Trackers are held weakly, so dropping a tracker stops its tracking.
pub struct OutputListenerMt<T: Clone + 'static> {
    trackers: Mutex<Vec<Weak<OutputTrackerMt<T>>>>,
}

impl<T: Clone + 'static> OutputListenerMt<T> {
    pub fn new() -> Self {
        Self {
            trackers: Mutex::new(Vec::new()),
        }
    }

    pub fn track(&self) -> Arc<OutputTrackerMt<T>> {
        let tracker = Arc::new(OutputTrackerMt::new());
        self.trackers.lock().unwrap().push(Arc::downgrade(&tracker));
        tracker
    }

    pub fn emit(&self, t: T) {
        let mut guard = self.trackers.lock().unwrap();
        guard.retain(|tracker| match tracker.upgrade() {
            Some(tracker) => {
                tracker.add(t.clone());
                true
            }
            None => false,
        });
    }

    pub fn tracker_count(&self) -> usize {
        self.trackers.lock().unwrap().len()
    }
}

impl<T: Clone + 'static> Default for OutputListenerMt<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_without_trackers() {
        let listener = OutputListenerMt::new();
        listener.emit("foo");
    }

    #[test]
    fn track_outputs() {
        let listener = OutputListenerMt::new();
        let tracker = listener.track();
        listener.emit("foo");
        listener.emit("bar");
        assert_eq!(tracker.output(), vec!["foo", "bar"]);
    }

    #[test]
    fn trackers_see_only_outputs_after_track() {
        let listener = OutputListenerMt::new();
        let tracker1 = listener.track();
        listener.emit(1);
        let tracker2 = listener.track();
        listener.emit(2);
        assert_eq!(tracker1.output(), vec![1, 2]);
        assert_eq!(tracker2.output(), vec![2]);
    }

    #[test]
    fn dropped_tracker_is_forgotten() {
        let listener = OutputListenerMt::new();
        let tracker = listener.track();
        drop(tracker);
        listener.emit("foo");
        assert_eq!(listener.tracker_count(), 0);
    }
}
