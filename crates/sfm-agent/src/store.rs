//! `AgentStore` — the simulation's exclusive, ordered agent collection.
//!
//! Agents are stored in spawn order and `AgentId(i)` is always the agent at
//! index `i`.  Membership is fixed once the store is built: there is no
//! insert or remove.
//!
//! The force pass borrows the store immutably and produces one result per
//! agent; only afterwards does the apply pass borrow it mutably.  The borrow
//! checker therefore guarantees no force computation observes a half-updated
//! step.

use sfm_core::{AgentId, SfmError, SfmResult};

use crate::Agent;

/// Ordered collection of [`Agent`]s addressed by [`AgentId`].
#[derive(Clone, Debug, PartialEq)]
pub struct AgentStore {
    agents: Vec<Agent>,
}

impl AgentStore {
    /// Build a store from explicitly placed agents.
    ///
    /// Agent `i` must carry `AgentId(i)`; the store is empty-checked by the
    /// simulation builder, not here.
    pub fn from_agents(agents: Vec<Agent>) -> SfmResult<Self> {
        for (i, agent) in agents.iter().enumerate() {
            if agent.id().index() != i {
                return Err(SfmError::config(format!(
                    "agent at index {i} carries id {}; ids must follow spawn order",
                    agent.id()
                )));
            }
        }
        Ok(Self { agents })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Iterator over all `AgentId`s in spawn order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.agents.iter().map(Agent::id)
    }

    #[inline]
    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.index())
    }

    /// Mutable access for the simulation's apply pass.
    #[inline]
    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(id.index())
    }

    /// Like [`get`](Self::get) but reports a missing id as an error.
    pub fn require(&self, id: AgentId) -> SfmResult<&Agent> {
        self.get(id).ok_or(SfmError::AgentNotFound(id))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Agent> {
        self.agents.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Agent> {
        self.agents.iter_mut()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Agent] {
        &self.agents
    }

    /// Number of agents that have reached their target.
    pub fn arrived_count(&self) -> usize {
        self.agents.iter().filter(|a| a.target_reached()).count()
    }

    /// `true` when every agent has reached its target.
    pub fn all_arrived(&self) -> bool {
        self.agents.iter().all(Agent::target_reached)
    }
}

impl<'a> IntoIterator for &'a AgentStore {
    type Item = &'a Agent;
    type IntoIter = std::slice::Iter<'a, Agent>;

    fn into_iter(self) -> Self::IntoIter {
        self.agents.iter()
    }
}
