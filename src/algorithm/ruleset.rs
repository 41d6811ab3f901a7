//! Prioritised rule collection
//!
//! Mutations never trigger a recompute themselves; the host calls
//! [`AutoTiler::on_ruleset_changed`](crate::algorithm::executor::AutoTiler::on_ruleset_changed)
//! afterwards.

use std::collections::{HashMap, HashSet};

use crate::algorithm::rule::{Rule, RuleId};
use crate::io::error::{Result, TileError, invalid_parameter};

/// Rules in match priority order, first match wins
///
/// The priority list and the id map always hold the same set of ids.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleSet {
    order: Vec<RuleId>,
    rules: HashMap<RuleId, Rule>,
}

impl RuleSet {
    /// Create an empty rule set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule at the lowest priority
    ///
    /// A rule carrying [`Rule::ID_NOT_SET`] receives the lowest unused id.
    /// Returns the id the rule was stored under.
    ///
    /// # Errors
    ///
    /// Returns [`TileError::DuplicateRule`] if the rule's explicit id is
    /// already taken, or an invalid parameter error if every id is in use.
    pub fn add(&mut self, mut rule: Rule) -> Result<RuleId> {
        if rule.id == Rule::ID_NOT_SET {
            rule.id = self.next_free_id()?;
        } else if self.rules.contains_key(&rule.id) {
            return Err(TileError::DuplicateRule { id: rule.id });
        }

        let id = rule.id;
        self.order.push(id);
        self.rules.insert(id, rule);
        Ok(id)
    }

    /// Replace the stored rule with the same id, keeping its priority
    ///
    /// # Errors
    ///
    /// Returns [`TileError::UnknownRule`] if no rule has that id
    pub fn update(&mut self, rule: Rule) -> Result<()> {
        let slot = self
            .rules
            .get_mut(&rule.id)
            .ok_or(TileError::UnknownRule { id: rule.id })?;
        *slot = rule;
        Ok(())
    }

    /// Remove a rule, returning it
    ///
    /// # Errors
    ///
    /// Returns [`TileError::UnknownRule`] if no rule has that id
    pub fn delete(&mut self, id: RuleId) -> Result<Rule> {
        let rule = self
            .rules
            .remove(&id)
            .ok_or(TileError::UnknownRule { id })?;
        self.order.retain(|&existing| existing != id);
        Ok(rule)
    }

    /// Replace the whole priority order
    ///
    /// # Errors
    ///
    /// Returns [`TileError::InvalidOrder`] unless `order` is a permutation of
    /// the current ids; the existing order is kept in that case.
    pub fn reorder(&mut self, order: Vec<RuleId>) -> Result<()> {
        if order.len() != self.order.len() {
            return Err(TileError::InvalidOrder {
                reason: format!("expected {} ids, got {}", self.order.len(), order.len()),
            });
        }

        let mut seen = HashSet::with_capacity(order.len());
        for &id in &order {
            if !self.rules.contains_key(&id) {
                return Err(TileError::InvalidOrder {
                    reason: format!("unknown rule id {id}"),
                });
            }
            if !seen.insert(id) {
                return Err(TileError::InvalidOrder {
                    reason: format!("rule id {id} listed twice"),
                });
            }
        }

        self.order = order;
        Ok(())
    }

    /// Move one rule to a new priority position, clamped to the end
    ///
    /// # Errors
    ///
    /// Returns [`TileError::UnknownRule`] if no rule has that id
    pub fn move_rule(&mut self, id: RuleId, position: usize) -> Result<()> {
        let current = self
            .order
            .iter()
            .position(|&existing| existing == id)
            .ok_or(TileError::UnknownRule { id })?;
        self.order.remove(current);
        self.order.insert(position.min(self.order.len()), id);
        Ok(())
    }

    /// Enable or disable a rule
    ///
    /// # Errors
    ///
    /// Returns [`TileError::UnknownRule`] if no rule has that id
    pub fn set_enabled(&mut self, id: RuleId, enabled: bool) -> Result<()> {
        let rule = self
            .rules
            .get_mut(&id)
            .ok_or(TileError::UnknownRule { id })?;
        rule.enabled = enabled;
        Ok(())
    }

    /// Rule with the given id
    pub fn get(&self, id: RuleId) -> Option<&Rule> {
        self.rules.get(&id)
    }

    /// Whether a rule with the given id exists
    pub fn contains(&self, id: RuleId) -> bool {
        self.rules.contains_key(&id)
    }

    /// Ids in priority order
    pub fn order(&self) -> &[RuleId] {
        &self.order
    }

    /// Rules in priority order
    pub fn iter(&self) -> impl Iterator<Item = &Rule> + '_ {
        self.order.iter().filter_map(|id| self.rules.get(id))
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the set holds no rules
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn next_free_id(&self) -> Result<RuleId> {
        (0..Rule::ID_NOT_SET)
            .find(|id| !self.rules.contains_key(id))
            .ok_or_else(|| invalid_parameter("id", &Rule::ID_NOT_SET, &"every rule id is in use"))
    }
}
