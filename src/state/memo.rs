/// Single-entry cache keyed on the inputs a value was derived from.
///
/// The value is recomputed only when the key changes.
#[derive(Debug, Clone)]
pub struct Memo<K, V> {
    entry: Option<(K, V)>,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self { entry: None }
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    pub fn is_current(&self, key: &K) -> bool {
        self.entry.as_ref().is_some_and(|(k, _)| k == key)
    }

    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> V) -> &V {
        if !self.is_current(&key) {
            self.entry = None;
        }
        &self.entry.get_or_insert_with(|| (key, compute())).1
    }

    pub fn get(&self) -> Option<&V> {
        self.entry.as_ref().map(|(_, v)| v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_recomputes_only_on_key_change() {
        let calls = Cell::new(0);
        let mut memo: Memo<(u64, Option<usize>), String> = Memo::default();
        let compute = |s: &str| {
            calls.set(calls.get() + 1);
            s.to_string()
        };

        assert_eq!(memo.get_or_compute((1, None), || compute("a")), "a");
        assert_eq!(memo.get_or_compute((1, None), || compute("b")), "a");
        assert_eq!(calls.get(), 1);

        assert_eq!(memo.get_or_compute((1, Some(3)), || compute("c")), "c");
        assert_eq!(calls.get(), 2);
        assert!(memo.is_current(&(1, Some(3))));
    }
}
