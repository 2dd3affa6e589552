use std::collections::BTreeMap;
use std::fmt::Debug;
use crate::core::{BodyHandle, ConstraintHandle, ShapeId};
use crate::error::PhysicsError;
use crate::Result;

/// A typed key issued by a [`HandleStorage`]
pub trait StorageHandle: Copy + Ord + Debug {
    /// Human readable kind, used in lookup errors
    const KIND: &'static str;

    fn from_raw(id: u32) -> Self;
}

impl StorageHandle for BodyHandle {
    const KIND: &'static str = "Body";

    fn from_raw(id: u32) -> Self {
        BodyHandle(id)
    }
}

impl StorageHandle for ConstraintHandle {
    const KIND: &'static str = "Constraint";

    fn from_raw(id: u32) -> Self {
        ConstraintHandle(id)
    }
}

impl StorageHandle for ShapeId {
    const KIND: &'static str = "Shape";

    fn from_raw(id: u32) -> Self {
        ShapeId(id)
    }
}

/// Generic storage trait for physics objects
pub trait Storage<T, H> {
    /// Creates a new empty storage
    fn new() -> Self;

    /// Adds an item to the storage and returns its handle
    fn add(&mut self, item: T) -> H;

    /// Gets a reference to an item by its handle
    fn get(&self, handle: H) -> Option<&T>;

    /// Gets a mutable reference to an item by its handle
    fn get_mut(&mut self, handle: H) -> Option<&mut T>;

    /// Removes an item from the storage
    fn remove(&mut self, handle: H) -> Option<T>;

    /// Returns the number of items in the storage
    fn len(&self) -> usize;

    /// Returns whether the storage is empty
    fn is_empty(&self) -> bool;

    /// Clears all items from the storage
    fn clear(&mut self);

    /// Returns all handles in issue order
    fn handles(&self) -> Vec<H>;
}

/// Handle-indexed storage. Iteration follows handle issue order, which keeps
/// stepping deterministic.
#[derive(Debug)]
pub struct HandleStorage<H, T> {
    items: BTreeMap<H, T>,
    next_id: u32,
}

/// Storage for physics bodies
pub type BodyStorage<T> = HandleStorage<BodyHandle, T>;

/// Storage for physics constraints
pub type ConstraintStorage<T> = HandleStorage<ConstraintHandle, T>;

impl<H: StorageHandle, T> Storage<T, H> for HandleStorage<H, T> {
    fn new() -> Self {
        Self {
            items: BTreeMap::new(),
            next_id: 1, // Start at 1, so 0 can represent invalid handle
        }
    }

    fn add(&mut self, item: T) -> H {
        let handle = H::from_raw(self.next_id);
        self.next_id += 1;
        self.items.insert(handle, item);
        handle
    }

    fn get(&self, handle: H) -> Option<&T> {
        self.items.get(&handle)
    }

    fn get_mut(&mut self, handle: H) -> Option<&mut T> {
        self.items.get_mut(&handle)
    }

    fn remove(&mut self, handle: H) -> Option<T> {
        self.items.remove(&handle)
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn handles(&self) -> Vec<H> {
        self.items.keys().copied().collect()
    }
}

impl<H: StorageHandle, T> HandleStorage<H, T> {
    /// Gets an item by its handle, returning an error if not found
    pub fn get_checked(&self, handle: H) -> Result<&T> {
        self.items.get(&handle).ok_or_else(|| {
            PhysicsError::ResourceNotFound(format!("{} with handle {:?} not found", H::KIND, handle))
        })
    }

    /// Gets a mutable reference to an item by its handle, returning an error if not found
    pub fn get_checked_mut(&mut self, handle: H) -> Result<&mut T> {
        self.items.get_mut(&handle).ok_or_else(|| {
            PhysicsError::ResourceNotFound(format!("{} with handle {:?} not found", H::KIND, handle))
        })
    }

    /// Borrows two distinct items mutably at once
    pub fn get_pair_mut(&mut self, a: H, b: H) -> Option<(&mut T, &mut T)> {
        if a == b {
            return None;
        }

        let mut first = None;
        let mut second = None;
        for (handle, item) in self.items.iter_mut() {
            if *handle == a {
                first = Some(item);
            } else if *handle == b {
                second = Some(item);
            }
        }

        Some((first?, second?))
    }

    /// Returns an iterator over all items
    pub fn iter(&self) -> impl Iterator<Item = (H, &T)> + '_ {
        self.items.iter().map(|(h, item)| (*h, item))
    }

    /// Returns a mutable iterator over all items
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (H, &mut T)> + '_ {
        self.items.iter_mut().map(|(h, item)| (*h, item))
    }
}

impl<T> BodyStorage<T> {
    /// Gets a body by its handle, returning an error if not found
    pub fn get_body(&self, handle: BodyHandle) -> Result<&T> {
        self.get_checked(handle)
    }

    /// Gets a mutable reference to a body by its handle, returning an error if not found
    pub fn get_body_mut(&mut self, handle: BodyHandle) -> Result<&mut T> {
        self.get_checked_mut(handle)
    }
}

impl<T> ConstraintStorage<T> {
    /// Gets a constraint by its handle, returning an error if not found
    pub fn get_constraint(&self, handle: ConstraintHandle) -> Result<&T> {
        self.get_checked(handle)
    }
}
