/// Maximum stack depth. Pushes beyond this are dropped.
pub const MAX_DEPTH: usize = 1 << 20;

/// LIFO integer stack. Popping an empty stack returns 0.
#[derive(Debug, Clone, Default)]
pub struct Stack {
    data: Vec<i64>,
    dropped: u64,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn push(&mut self, val: i64) {
        if self.data.len() < MAX_DEPTH {
            self.data.push(val);
        } else {
            if self.dropped == 0 {
                log::warn!("stack reached {MAX_DEPTH} entries, dropping pushes");
            }
            self.dropped += 1;
        }
    }

    #[inline(always)]
    pub fn pop(&mut self) -> i64 {
        self.data.pop().unwrap_or(0)
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of pushes discarded because the stack was full.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Stack contents, bottom first.
    pub fn as_slice(&self) -> &[i64] {
        &self.data
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn push_then_pop_round_trips(prefix in prop::collection::vec(any::<i64>(), 0..32), v in any::<i64>()) {
            let mut stack = Stack::new();
            for p in &prefix {
                stack.push(*p);
            }
            stack.push(v);
            prop_assert_eq!(stack.pop(), v);
            prop_assert_eq!(stack.size(), prefix.len());
        }

        #[test]
        fn popping_past_bottom_never_fails(values in prop::collection::vec(any::<i64>(), 0..16), extra in 0usize..16) {
            let mut stack = Stack::new();
            for v in &values {
                stack.push(*v);
            }
            for _ in 0..values.len() {
                stack.pop();
            }
            for _ in 0..extra {
                prop_assert_eq!(stack.pop(), 0);
            }
        }
    }
}
