use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// A handle into an [`Arena`]. Only meaningful for the arena that issued it.
pub trait ArenaId: Copy {
    fn from_slot(slot: usize) -> Self;
    fn slot(self) -> usize;
}

/// Append-only storage addressed by typed ids.
///
/// Nothing is ever removed, so an id stays valid as long as its arena lives
/// and links between entries can be plain ids instead of references.
pub struct Arena<I, T> {
    slots: Vec<T>,
    _id: PhantomData<I>,
}

impl<I: ArenaId, T> Arena<I, T> {
    pub fn alloc(&mut self, value: T) -> I {
        let id = I::from_slot(self.slots.len());
        self.slots.push(value);
        id
    }

    /// Entries in allocation order, so parents come before their children.
    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> + '_ {
        self.slots.iter().enumerate().map(|(slot, value)| (I::from_slot(slot), value))
    }
}

impl<I, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self { slots: Vec::new(), _id: PhantomData }
    }
}

impl<I: ArenaId, T> Index<I> for Arena<I, T> {
    type Output = T;

    fn index(&self, id: I) -> &T {
        &self.slots[id.slot()]
    }
}

impl<I: ArenaId, T> IndexMut<I> for Arena<I, T> {
    fn index_mut(&mut self, id: I) -> &mut T {
        &mut self.slots[id.slot()]
    }
}
