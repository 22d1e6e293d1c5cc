/// Load progress for a cached collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

impl Default for LoadState {
    fn default() -> Self {
        Self::Idle
    }
}

/// A reference list fetched once per process. A failed fetch leaves the
/// list empty so dependent widgets render without options.
#[derive(Debug, Clone, Default)]
pub struct Cached<T> {
    state: LoadState,
    items: Vec<T>,
}

impl<T> Cached<T> {
    pub fn begin(&mut self) {
        self.state = LoadState::Loading;
    }

    pub fn accept(&mut self, result: Result<Vec<T>, String>) {
        match result {
            Ok(items) => {
                self.items = items;
                self.state = LoadState::Ready;
            }
            Err(detail) => {
                self.items.clear();
                self.state = LoadState::Failed(detail);
            }
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn needs_load(&self) -> bool {
        self.state == LoadState::Idle
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.state = LoadState::Idle;
    }
}

/// A list scoped to one opportunity. Results are stamped with the scope
/// they were fetched for; a result for any other scope is discarded.
#[derive(Debug, Clone, Default)]
pub struct ScopedList<T> {
    scope: Option<i64>,
    state: LoadState,
    items: Vec<T>,
}

impl<T> ScopedList<T> {
    /// Start a fetch for `scope`. Switching scope drops the old items;
    /// refetching the same scope keeps them visible while loading.
    pub fn begin(&mut self, scope: i64) {
        if self.scope != Some(scope) {
            self.items.clear();
            self.scope = Some(scope);
        }
        self.state = LoadState::Loading;
    }

    /// Apply a fetch result. Returns false when the result was for a
    /// stale scope and was dropped.
    pub fn accept(&mut self, scope: i64, result: Result<Vec<T>, String>) -> bool {
        if self.scope != Some(scope) {
            return false;
        }
        match result {
            Ok(items) => {
                self.items = items;
                self.state = LoadState::Ready;
            }
            Err(detail) => {
                self.state = LoadState::Failed(detail);
            }
        }
        true
    }

    pub fn clear(&mut self) {
        self.scope = None;
        self.items.clear();
        self.state = LoadState::Idle;
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// True when this list has never been requested for `scope`.
    pub fn needs_load(&self, scope: i64) -> bool {
        self.scope != Some(scope) || self.state == LoadState::Idle
    }

    /// Loading with nothing to show yet.
    pub fn is_initial_loading(&self) -> bool {
        self.state == LoadState::Loading && self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cached_failure_leaves_empty() {
        let mut cached: Cached<i64> = Cached::default();
        cached.begin();
        cached.accept(Err("connection refused".to_string()));
        assert!(cached.items().is_empty());
        assert!(matches!(cached.state(), LoadState::Failed(_)));
        assert!(!cached.needs_load());
    }

    #[test]
    fn cached_loads_once() {
        let mut cached: Cached<i64> = Cached::default();
        assert!(cached.needs_load());
        cached.begin();
        cached.accept(Ok(vec![1, 2]));
        assert!(!cached.needs_load());
        assert_eq!(cached.items(), &[1, 2]);
    }

    #[test]
    fn scoped_rejects_stale_scope() {
        let mut list: ScopedList<i64> = ScopedList::default();
        list.begin(1);
        // User switched to opportunity 2 before the first fetch landed.
        list.begin(2);
        assert!(!list.accept(1, Ok(vec![10, 11])));
        assert!(list.items().is_empty());
        assert_eq!(list.state(), &LoadState::Loading);

        assert!(list.accept(2, Ok(vec![20])));
        assert_eq!(list.items(), &[20]);
        assert_eq!(list.state(), &LoadState::Ready);
    }

    #[test]
    fn scoped_keeps_items_during_refetch() {
        let mut list: ScopedList<i64> = ScopedList::default();
        list.begin(7);
        assert!(list.accept(7, Ok(vec![1, 2, 3])));

        list.begin(7);
        assert_eq!(list.items(), &[1, 2, 3]);
        assert!(!list.is_initial_loading());

        assert!(list.accept(7, Ok(vec![1, 2])));
        assert_eq!(list.items(), &[1, 2]);
    }

    #[test]
    fn scoped_switch_drops_old_items() {
        let mut list: ScopedList<i64> = ScopedList::default();
        list.begin(7);
        assert!(list.accept(7, Ok(vec![1, 2, 3])));

        list.begin(8);
        assert!(list.items().is_empty());
        assert!(list.is_initial_loading());
    }

    #[test]
    fn scoped_needs_load_tracks_scope() {
        let mut list: ScopedList<i64> = ScopedList::default();
        assert!(list.needs_load(1));
        list.begin(1);
        assert!(!list.needs_load(1));
        assert!(list.needs_load(2));
        list.clear();
        assert!(list.needs_load(1));
    }

    #[test]
    fn scoped_failure_keeps_stale_items() {
        let mut list: ScopedList<i64> = ScopedList::default();
        list.begin(3);
        assert!(list.accept(3, Ok(vec![5])));
        list.begin(3);
        assert!(list.accept(3, Err("timeout".to_string())));
        assert_eq!(list.items(), &[5]);
        assert!(matches!(list.state(), LoadState::Failed(_)));
    }
}
