//! Per-frame driver tying the store, solver, integrator, boundary policy,
//! clock and selection together.

use crate::body::{Body, EntityKind};
use crate::boundary::BoundaryPolicy;
use crate::clock::SimulationClock;
use crate::edit::Edit;
use crate::error::SimError;
use crate::input::{InputEvent, Mutation, PointerButton};
use crate::integrator;
use crate::picking::{overlapping, pick};
use crate::scene::SpawnTemplates;
use crate::store::{EntityId, EntityStore};
use glam::Vec2;
use std::collections::VecDeque;
use std::time::Instant;

/// What the renderer needs to draw one entity
#[derive(Debug, Clone, PartialEq)]
pub struct RenderItem {
    pub id: EntityId,
    pub pos: Vec2,
    pub radius: f32,
    pub color: [f32; 3],
    pub fixed: bool,
}

/// Frame-coherent, read-only copy of the simulation for the shell
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSnapshot {
    /// Regular bodies first, then heavy bodies
    pub items: Vec<RenderItem>,
    pub paused: bool,
    pub selection: Option<EntityId>,
}

#[derive(Debug, Clone)]
pub struct Simulation {
    store: EntityStore,
    selection: Option<EntityId>,
    clock: SimulationClock,
    boundary: BoundaryPolicy,
    spawn: SpawnTemplates,
    pending: VecDeque<Mutation>,
}

impl Simulation {
    pub fn new(store: EntityStore, boundary: BoundaryPolicy) -> Self {
        Self {
            store,
            selection: None,
            clock: SimulationClock::new(),
            boundary,
            spawn: SpawnTemplates::default(),
            pending: VecDeque::new(),
        }
    }

    pub fn with_spawn_templates(mut self, spawn: SpawnTemplates) -> Self {
        self.spawn = spawn;
        self
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut SimulationClock {
        &mut self.clock
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    pub fn toggle_pause(&mut self) -> bool {
        let paused = self.clock.toggle_pause();
        log::debug!("simulation {}", if paused { "paused" } else { "resumed" });
        paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.clock.set_paused(paused);
    }

    pub fn boundary(&self) -> BoundaryPolicy {
        self.boundary
    }

    pub fn set_boundary(&mut self, boundary: BoundaryPolicy) {
        self.boundary = boundary;
    }

    /// The active selection; an index that no longer exists reads as none
    pub fn selection(&self) -> Option<EntityId> {
        self.selection.filter(|id| self.store.contains(*id))
    }

    pub fn selected_body(&self) -> Option<&Body> {
        self.selection().and_then(|id| self.store.get(id))
    }

    pub fn select(&mut self, id: Option<EntityId>) {
        self.selection = id;
    }

    /// Select whatever lies under `point`, or clear the selection
    pub fn select_at(&mut self, point: Vec2) -> Option<EntityId> {
        self.selection = pick(&self.store, point);
        self.selection
    }

    /// Number of mutations waiting for the next frame boundary
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Queue a mutation for the next frame boundary
    ///
    /// Invalid values and edits made while running are rejected here, so
    /// the caller learns about them right away.
    pub fn submit(&mut self, mutation: Mutation) -> Result<(), SimError> {
        match &mutation {
            Mutation::Spawn(body) => body.validate()?,
            Mutation::Edit(edit) => {
                let id = self.check_editable()?;
                let unit = self.store.get(id).ok_or(SimError::EntityNotFound(id))?.mass_unit();
                edit.validate(unit)?;
            }
            Mutation::DeleteSelected => {
                self.check_editable()?;
            }
        }
        self.pending.push_back(mutation);
        Ok(())
    }

    fn check_editable(&self) -> Result<EntityId, SimError> {
        if !self.is_paused() {
            return Err(SimError::NotPaused);
        }
        self.selection().ok_or(SimError::NoSelection)
    }

    /// Apply every queued mutation in submission order
    ///
    /// Returns how many were applied; rejected ones are logged and dropped.
    pub fn apply_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Some(mutation) = self.pending.pop_front() {
            match self.apply(mutation) {
                Ok(()) => applied += 1,
                Err(e) => log::warn!("mutation rejected: {}", e),
            }
        }
        applied
    }

    fn apply(&mut self, mutation: Mutation) -> Result<(), SimError> {
        match mutation {
            Mutation::Spawn(body) => {
                let id = self.store.insert(body)?;
                log::debug!("spawned {}", id);
            }
            Mutation::Edit(edit) => {
                let id = self.check_editable()?;
                let body = self
                    .store
                    .get_mut(id)
                    .ok_or(SimError::EntityNotFound(id))?;
                edit.apply(body)?;
                log::debug!("edited {}: {:?}", id, edit);
            }
            Mutation::DeleteSelected => {
                let id = self.check_editable()?;
                self.store.remove(id)?;
                self.selection = None;
                log::debug!("deleted {}", id);
            }
        }
        Ok(())
    }

    /// Queue a spawn of `kind` at `pos` using the spawn templates
    ///
    /// Spawning on top of an existing entity is allowed; the overlap is only
    /// reported in the log.
    pub fn spawn_at(&mut self, kind: EntityKind, pos: Vec2) -> Result<(), SimError> {
        let body = self.spawn.body_at(kind, pos);
        if let Some(other) = overlapping(&self.store, pos, body.radius) {
            log::debug!("spawning {} body over {}", kind, other);
        }
        self.submit(Mutation::Spawn(body))
    }

    /// Edit a field of the selected entity (paused only)
    pub fn edit(&mut self, edit: Edit) -> Result<(), SimError> {
        self.submit(Mutation::Edit(edit))
    }

    pub fn delete_selected(&mut self) -> Result<(), SimError> {
        self.submit(Mutation::DeleteSelected)
    }

    /// Consume this frame's input events
    pub fn handle_input(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        for event in events.into_iter().filter_map(InputEvent::normalize) {
            let result = match event {
                InputEvent::TogglePause => {
                    self.toggle_pause();
                    Ok(())
                }
                InputEvent::Pointer {
                    button: PointerButton::Secondary,
                    pos,
                    ..
                } => {
                    self.select_at(pos);
                    Ok(())
                }
                InputEvent::Pointer { .. } => Ok(()),
                InputEvent::SpawnBody { pos } => self.spawn_at(EntityKind::Regular, pos),
                InputEvent::SpawnHeavy { pos } => self.spawn_at(EntityKind::Heavy, pos),
            };
            if let Err(e) = result {
                log::warn!("input {:?} rejected: {}", event, e);
            }
        }
    }

    /// Advance physics by `dt` seconds unless paused
    pub fn step(&mut self, dt: f32) {
        if self.is_paused() {
            return;
        }
        integrator::step(&mut self.store, dt);
        self.boundary.resolve(&mut self.store);
    }

    /// One frame: apply queued mutations, measure dt, then step
    pub fn frame(&mut self, now: Instant) -> f32 {
        self.apply_pending();
        let dt = self.clock.tick(now);
        self.step(dt);
        dt
    }

    /// Run `steps` fixed steps of `dt`, for headless runs and tests
    pub fn run(&mut self, steps: usize, dt: f32) {
        self.apply_pending();
        for _ in 0..steps {
            self.step(dt);
        }
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        let items = self
            .store
            .iter()
            .map(|(id, b)| RenderItem {
                id,
                pos: b.pos,
                radius: b.radius,
                color: b.color,
                fixed: b.fixed,
            })
            .collect();
        RenderSnapshot {
            items,
            paused: self.is_paused(),
            selection: self.selection(),
        }
    }
}
