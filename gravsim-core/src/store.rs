use crate::body::{Body, EntityKind};
use crate::error::SimError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Address of an entity inside the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId {
    pub kind: EntityKind,
    pub index: usize,
}

impl EntityId {
    pub fn regular(index: usize) -> Self {
        Self {
            kind: EntityKind::Regular,
            index,
        }
    }

    pub fn heavy(index: usize) -> Self {
        Self {
            kind: EntityKind::Heavy,
            index,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} body #{}", self.kind, self.index)
    }
}

/// Ordered collections of regular and heavy bodies
///
/// Insertion order is iteration order, for both force summation and
/// rendering. Regular bodies always come before heavy bodies.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    regular: Vec<Body>,
    heavy: Vec<Body>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn list(&self, kind: EntityKind) -> &Vec<Body> {
        match kind {
            EntityKind::Regular => &self.regular,
            EntityKind::Heavy => &self.heavy,
        }
    }

    fn list_mut(&mut self, kind: EntityKind) -> &mut Vec<Body> {
        match kind {
            EntityKind::Regular => &mut self.regular,
            EntityKind::Heavy => &mut self.heavy,
        }
    }

    /// Append a body to the list matching its kind
    pub fn insert(&mut self, body: Body) -> Result<EntityId, SimError> {
        body.validate()?;
        let kind = body.kind;
        let list = self.list_mut(kind);
        list.push(body);
        Ok(EntityId {
            kind,
            index: list.len() - 1,
        })
    }

    /// Remove an entity; later entities of the same kind shift down by one
    pub fn remove(&mut self, id: EntityId) -> Result<Body, SimError> {
        let list = self.list_mut(id.kind);
        if id.index < list.len() {
            Ok(list.remove(id.index))
        } else {
            Err(SimError::EntityNotFound(id))
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&Body> {
        self.list(id.kind).get(id.index)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Body> {
        self.list_mut(id.kind).get_mut(id.index)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        id.index < self.list(id.kind).len()
    }

    pub fn regular(&self) -> &[Body] {
        &self.regular
    }

    pub fn heavy(&self) -> &[Body] {
        &self.heavy
    }

    pub fn len(&self) -> usize {
        self.regular.len() + self.heavy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regular.is_empty() && self.heavy.is_empty()
    }

    /// All entities in store order: regular bodies first, then heavy bodies
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Body)> {
        let regular = self
            .regular
            .iter()
            .enumerate()
            .map(|(i, b)| (EntityId::regular(i), b));
        let heavy = self
            .heavy
            .iter()
            .enumerate()
            .map(|(i, b)| (EntityId::heavy(i), b));
        regular.chain(heavy)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Body> {
        self.regular.iter_mut().chain(self.heavy.iter_mut())
    }
}
