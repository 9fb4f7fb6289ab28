/// A cached pure function of `K`.
///
/// The value is recomputed only when the input differs (by `PartialEq`) from
/// the input of the previous call. Callers keep `V` cheap to clone (usually an
/// `Rc`) so that an unchanged input hands back the *same* value.
#[derive(Debug)]
pub struct Memo<K, V> {
    slot: Option<(K, V)>,
    computes: u64,
}

impl<K: PartialEq, V: Clone> Memo<K, V> {
    pub fn new() -> Self {
        Self {
            slot: None,
            computes: 0,
        }
    }

    pub fn get(&mut self, key: K, compute: impl FnOnce(&K) -> V) -> V {
        if let Some((cached, value)) = &self.slot {
            if *cached == key {
                return value.clone();
            }
        }
        let value = compute(&key);
        self.computes += 1;
        self.slot = Some((key, value.clone()));
        value
    }

    pub fn peek(&self) -> Option<&V> {
        self.slot.as_ref().map(|(_, value)| value)
    }

    /// How many times the value has been (re)computed.
    pub fn computes(&self) -> u64 {
        self.computes
    }

    pub fn reset(&mut self) {
        self.slot = None;
    }
}

impl<K: PartialEq, V: Clone> Default for Memo<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/core/memo.rs"]
mod tests;
