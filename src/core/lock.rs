//! Per-parameter exclusivity for projection transitions.
//!
//! Each animated parameter owns a generation counter. Acquiring the lock
//! bumps the counter and hands out a token capturing the new value; any
//! token captured earlier is stale from then on and its frames must not
//! apply. Starting a new transition is therefore the only way to cancel one.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LockKey {
    Rotation,
    Translation,
    Scale,
}

impl LockKey {
    pub const ALL: [LockKey; 3] = [LockKey::Rotation, LockKey::Translation, LockKey::Scale];

    #[inline]
    fn slot(self) -> usize {
        match self {
            LockKey::Rotation => 0,
            LockKey::Translation => 1,
            LockKey::Scale => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LockKey::Rotation => "rotation",
            LockKey::Translation => "translation",
            LockKey::Scale => "scale",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LockToken {
    pub key: LockKey,
    generation: u64,
}

#[derive(Clone, Debug, Default)]
pub struct AnimationLocks {
    generations: [u64; 3],
}

impl AnimationLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supersede whatever currently holds `key` and return the new holder's token.
    pub fn acquire(&mut self, key: LockKey) -> LockToken {
        let slot = &mut self.generations[key.slot()];
        *slot = slot.wrapping_add(1);
        LockToken {
            key,
            generation: *slot,
        }
    }

    #[inline]
    pub fn is_current(&self, token: LockToken) -> bool {
        self.generations[token.key.slot()] == token.generation
    }

    pub fn generation(&self, key: LockKey) -> u64 {
        self.generations[key.slot()]
    }
}
