//! Buff ledger - The active buff set of one character and its evolution
//!
//! The ledger is a value: every operation returns a new ledger and leaves
//! the receiver untouched, so a caller can hold the previous state until it
//! decides to commit the new one.

mod policy;

pub use policy::StackingPolicy;

use crate::error::CombatError;
use crate::source::Buff;
use crate::types::{BuffDuration, BuffId};
use serde::{Deserialize, Serialize};

/// Ordered set of buffs on one character
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuffLedger {
    buffs: Vec<Buff>,
}

impl BuffLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        BuffLedger::default()
    }

    /// Wrap buffs loaded from a character sheet as-is
    pub fn from_buffs(buffs: Vec<Buff>) -> Self {
        BuffLedger { buffs }
    }

    pub fn buffs(&self) -> &[Buff] {
        &self.buffs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Buff> {
        self.buffs.iter()
    }

    pub fn len(&self) -> usize {
        self.buffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffs.is_empty()
    }

    pub fn get(&self, id: BuffId) -> Option<&Buff> {
        self.buffs.iter().find(|b| b.id == id)
    }

    /// One past the largest id in use (ids start at 1)
    ///
    /// Once `BuffId::MAX` is taken the smallest free id is handed out instead.
    pub fn next_id(&self) -> BuffId {
        let max = self.buffs.iter().map(|b| b.id).max().unwrap_or(0);
        max.checked_add(1).unwrap_or_else(|| self.lowest_free_id())
    }

    fn lowest_free_id(&self) -> BuffId {
        let mut ids: Vec<BuffId> = self.buffs.iter().map(|b| b.id).filter(|&id| id > 0).collect();
        ids.sort_unstable();
        ids.dedup();

        let mut candidate: BuffId = 1;
        for id in ids {
            if id != candidate {
                break;
            }
            candidate = candidate.saturating_add(1);
        }
        candidate
    }

    /// True iff an active (non-reservation) buff with this tag is present
    pub fn has_duplicate(&self, source_tag: &str) -> bool {
        self.buffs
            .iter()
            .any(|b| !b.is_reservation && b.source_tag == source_tag)
    }

    /// The pending reservation for a tag, if any
    pub fn reservation(&self, source_tag: &str) -> Option<&Buff> {
        self.buffs
            .iter()
            .find(|b| b.is_reservation && b.source_tag == source_tag)
    }

    /// Add a buff, promoting or overwriting a reservation with the same tag
    ///
    /// Fails with [`CombatError::DuplicateBuff`] when `incoming` is active,
    /// an active buff with the same tag exists and the policy does not allow
    /// the tag to stack.
    pub fn add(&self, incoming: Buff, policy: &StackingPolicy) -> Result<BuffLedger, CombatError> {
        if !incoming.is_reservation
            && self.has_duplicate(&incoming.source_tag)
            && !policy.allows_stacking(&incoming.source_tag)
        {
            tracing::debug!(source_tag = %incoming.source_tag, "rejected duplicate buff");
            return Err(CombatError::DuplicateBuff {
                source_tag: incoming.source_tag,
            });
        }

        let mut buffs = self.buffs.clone();
        let reserved = buffs
            .iter()
            .position(|b| b.is_reservation && b.source_tag == incoming.source_tag);

        match reserved {
            Some(index) => {
                let replaced_id = buffs[index].id;
                tracing::debug!(
                    source_tag = %incoming.source_tag,
                    id = replaced_id,
                    promoted = !incoming.is_reservation,
                    "replaced reservation buff"
                );
                buffs[index] = Buff {
                    id: replaced_id,
                    ..incoming
                };
            }
            None => {
                let id = self.assign_id(incoming.id);
                tracing::debug!(source_tag = %incoming.source_tag, id, "added buff");
                buffs.push(Buff { id, ..incoming });
            }
        }

        Ok(BuffLedger { buffs })
    }

    /// Add a buff, replacing every buff that shares its tag
    ///
    /// This is the force-replace path a caller may take after a
    /// [`CombatError::DuplicateBuff`].
    pub fn force_add(&self, incoming: Buff) -> BuffLedger {
        let mut first_replaced = None;
        let mut buffs = Vec::with_capacity(self.buffs.len() + 1);
        for buff in &self.buffs {
            if buff.source_tag == incoming.source_tag {
                first_replaced.get_or_insert(buff.id);
            } else {
                buffs.push(buff.clone());
            }
        }

        let remaining = BuffLedger { buffs };
        let id = first_replaced.unwrap_or_else(|| remaining.assign_id(incoming.id));
        tracing::debug!(source_tag = %incoming.source_tag, id, "force-added buff");

        let mut buffs = remaining.buffs;
        buffs.push(Buff { id, ..incoming });
        BuffLedger { buffs }
    }

    /// Remove a buff by id. Unknown ids leave the ledger unchanged.
    pub fn remove(&self, id: BuffId) -> BuffLedger {
        BuffLedger {
            buffs: self.buffs.iter().filter(|b| b.id != id).cloned().collect(),
        }
    }

    /// Advance every buff by one round in a single pass
    ///
    /// Finite durations drop by one and buffs reaching zero are removed.
    /// Negative durations are treated as already expired. Indefinite buffs
    /// pass through untouched. Must be called once per round-end event.
    pub fn process_round_end(&self) -> BuffLedger {
        let buffs = self
            .buffs
            .iter()
            .filter_map(|buff| {
                if let BuffDuration::Rounds(rounds) = buff.remaining_duration {
                    if rounds < 0 {
                        tracing::warn!(id = buff.id, rounds, "dropping buff with negative duration");
                    }
                }
                match buff.remaining_duration.tick() {
                    Some(remaining_duration) => Some(Buff {
                        remaining_duration,
                        ..buff.clone()
                    }),
                    None => {
                        tracing::debug!(id = buff.id, name = %buff.name, "buff expired");
                        None
                    }
                }
            })
            .collect();

        BuffLedger { buffs }
    }

    /// Keep the requested id unless it is unset or already taken
    fn assign_id(&self, requested: BuffId) -> BuffId {
        if requested == 0 || self.get(requested).is_some() {
            self.next_id()
        } else {
            requested
        }
    }
}

impl<'a> IntoIterator for &'a BuffLedger {
    type Item = &'a Buff;
    type IntoIter = std::slice::Iter<'a, Buff>;

    fn into_iter(self) -> Self::IntoIter {
        self.buffs.iter()
    }
}

/// Add a buff to `current`, see [`BuffLedger::add`]
pub fn add_buff(
    current: &BuffLedger,
    incoming: Buff,
    policy: &StackingPolicy,
) -> Result<BuffLedger, CombatError> {
    current.add(incoming, policy)
}

/// See [`BuffLedger::force_add`]
pub fn force_add_buff(current: &BuffLedger, incoming: Buff) -> BuffLedger {
    current.force_add(incoming)
}

/// See [`BuffLedger::remove`]
pub fn remove_buff(current: &BuffLedger, id: BuffId) -> BuffLedger {
    current.remove(id)
}

/// See [`BuffLedger::has_duplicate`]
pub fn has_duplicate_buff(current: &BuffLedger, source_tag: &str) -> bool {
    current.has_duplicate(source_tag)
}

/// See [`BuffLedger::reservation`]
pub fn get_reservation_buff<'a>(current: &'a BuffLedger, source_tag: &str) -> Option<&'a Buff> {
    current.reservation(source_tag)
}

/// See [`BuffLedger::process_round_end`]
pub fn process_round_end(current: &BuffLedger) -> BuffLedger {
    current.process_round_end()
}
