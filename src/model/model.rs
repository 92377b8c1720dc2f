//! The optimization model.

use std::collections::{HashMap, HashSet};

use super::constraint::{Constraint, ConstraintId, Objective, ObjectiveId};
use super::variable::{Domain, VarId, Variable, VariableBuilder};

/// A collection of variables, constraints, and objectives.
///
/// Constraints and objectives live in slot vectors so removal does not
/// shift the ids of the survivors. Component names are globally unique
/// across constraints, objectives, and constraint lists.
#[derive(Debug, Default)]
pub struct Model {
    variables: Vec<Variable>,
    constraints: Vec<Option<Constraint>>,
    objectives: Vec<Option<Objective>>,
    component_names: HashSet<String>,
    constraint_lists: HashMap<String, Vec<ConstraintId>>,
}

impl Model {
    /// Create an empty model.
    pub fn new() -> Self {
        Model::default()
    }

    /// Add a variable, assigning it the next sequential id.
    pub fn add_variable(&mut self, builder: VariableBuilder) -> VarId {
        let id = VarId(self.variables.len() as u32);
        self.variables.push(builder.build(id));
        id
    }

    /// Look up a variable.
    pub fn variable(&self, id: VarId) -> &Variable {
        &self.variables[id.0 as usize]
    }

    /// All variables in id order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Number of variables.
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Change a variable's domain, returning the previous one.
    pub fn set_domain(&mut self, id: VarId, domain: Domain) -> Domain {
        let var = &mut self.variables[id.0 as usize];
        std::mem::replace(&mut var.domain, domain)
    }

    /// Add a constraint. Unnamed constraints get a generated name; all
    /// names are made unique within the model.
    pub fn add_constraint(&mut self, mut constraint: Constraint) -> ConstraintId {
        let id = ConstraintId(self.constraints.len() as u32);
        let base = match constraint.name.take() {
            Some(name) => name,
            None => format!("c{}", id.0),
        };
        let name = self.unique_component_name(&base);
        self.component_names.insert(name.clone());
        constraint.name = Some(name);
        self.constraints.push(Some(constraint));
        id
    }

    /// Look up a constraint. Returns `None` if it was removed.
    pub fn constraint(&self, id: ConstraintId) -> Option<&Constraint> {
        self.constraints.get(id.0 as usize)?.as_ref()
    }

    /// Look up a constraint mutably. Returns `None` if it was removed.
    pub fn constraint_mut(&mut self, id: ConstraintId) -> Option<&mut Constraint> {
        self.constraints.get_mut(id.0 as usize)?.as_mut()
    }

    /// Ids of all active constraints, in insertion order.
    pub fn active_constraints(&self) -> Vec<ConstraintId> {
        self.constraints
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| match slot {
                Some(c) if c.is_active() => Some(ConstraintId(i as u32)),
                _ => None,
            })
            .collect()
    }

    /// Remove a constraint permanently, releasing its name and dropping
    /// it from any constraint list.
    pub fn remove_constraint(&mut self, id: ConstraintId) -> Option<Constraint> {
        let removed = self.constraints.get_mut(id.0 as usize)?.take()?;
        if let Some(name) = &removed.name {
            self.component_names.remove(name);
        }
        for list in self.constraint_lists.values_mut() {
            list.retain(|&cid| cid != id);
        }
        Some(removed)
    }

    /// Add an objective.
    pub fn add_objective(&mut self, mut objective: Objective) -> ObjectiveId {
        let id = ObjectiveId(self.objectives.len() as u32);
        let base = match objective.name.take() {
            Some(name) => name,
            None => format!("obj{}", id.0),
        };
        let name = self.unique_component_name(&base);
        self.component_names.insert(name.clone());
        objective.name = Some(name);
        self.objectives.push(Some(objective));
        id
    }

    /// Look up an objective. Returns `None` if it was removed.
    pub fn objective(&self, id: ObjectiveId) -> Option<&Objective> {
        self.objectives.get(id.0 as usize)?.as_ref()
    }

    /// Look up an objective mutably. Returns `None` if it was removed.
    pub fn objective_mut(&mut self, id: ObjectiveId) -> Option<&mut Objective> {
        self.objectives.get_mut(id.0 as usize)?.as_mut()
    }

    /// Ids of all active objectives, in insertion order.
    pub fn active_objectives(&self) -> Vec<ObjectiveId> {
        self.objectives
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| match slot {
                Some(o) if o.is_active() => Some(ObjectiveId(i as u32)),
                _ => None,
            })
            .collect()
    }

    /// Remove an objective permanently, releasing its name.
    pub fn remove_objective(&mut self, id: ObjectiveId) -> Option<Objective> {
        let removed = self.objectives.get_mut(id.0 as usize)?.take()?;
        if let Some(name) = &removed.name {
            self.component_names.remove(name);
        }
        Some(removed)
    }

    /// Whether a component name is already in use.
    pub fn component_name_taken(&self, name: &str) -> bool {
        self.component_names.contains(name)
    }

    /// Derive a name not currently in use: `base`, then `base_2`,
    /// `base_3`, and so on.
    pub fn unique_component_name(&self, base: &str) -> String {
        if !self.component_names.contains(base) {
            return base.to_string();
        }
        let mut i = 2;
        loop {
            let candidate = format!("{base}_{i}");
            if !self.component_names.contains(&candidate) {
                return candidate;
            }
            i += 1;
        }
    }

    /// Register a named constraint list. The name must be unused.
    pub(crate) fn add_constraint_list(&mut self, name: &str, ids: Vec<ConstraintId>) {
        self.component_names.insert(name.to_string());
        self.constraint_lists.insert(name.to_string(), ids);
    }

    /// Ids of a named constraint list, if present.
    pub fn constraint_list(&self, name: &str) -> Option<&[ConstraintId]> {
        self.constraint_lists.get(name).map(|v| v.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LinearExpr;

    #[test]
    fn test_sequential_var_ids() {
        let mut model = Model::new();
        let a = model.add_variable(VariableBuilder::continuous().name("a"));
        let b = model.add_variable(VariableBuilder::continuous().name("b"));
        assert_eq!(a.raw(), 0);
        assert_eq!(b.raw(), 1);
        assert_eq!(model.variable(b).name(), "b");
    }

    #[test]
    fn test_unique_component_names() {
        let mut model = Model::new();
        let x = model.add_variable(VariableBuilder::continuous());
        let c1 = model.add_constraint(Constraint::geq(LinearExpr::variable(x), 0.0).with_name("c"));
        let c2 = model.add_constraint(Constraint::geq(LinearExpr::variable(x), 1.0).with_name("c"));
        assert_eq!(model.constraint(c1).unwrap().name(), "c");
        assert_eq!(model.constraint(c2).unwrap().name(), "c_2");
        assert!(model.component_name_taken("c_2"));
    }

    #[test]
    fn test_remove_constraint_releases_name() {
        let mut model = Model::new();
        let x = model.add_variable(VariableBuilder::continuous());
        let c = model.add_constraint(Constraint::geq(LinearExpr::variable(x), 0.0).with_name("c"));
        model.add_constraint_list("list", vec![c]);
        assert_eq!(model.constraint_list("list"), Some(&[c][..]));

        model.remove_constraint(c);
        assert!(model.constraint(c).is_none());
        assert!(!model.component_name_taken("c"));
        assert_eq!(model.constraint_list("list"), Some(&[][..]));
    }

    #[test]
    fn test_active_constraints_skip_deactivated() {
        let mut model = Model::new();
        let x = model.add_variable(VariableBuilder::continuous());
        let c1 = model.add_constraint(Constraint::geq(LinearExpr::variable(x), 0.0));
        let c2 = model.add_constraint(Constraint::leq(LinearExpr::variable(x), 5.0));
        model.constraint_mut(c1).unwrap().deactivate();
        assert_eq!(model.active_constraints(), vec![c2]);
    }

    #[test]
    fn test_set_domain_returns_previous() {
        let mut model = Model::new();
        let x = model.add_variable(VariableBuilder::integer());
        let old = model.set_domain(x, Domain::Continuous);
        assert_eq!(old, Domain::Integer);
        assert_eq!(model.variable(x).domain(), Domain::Continuous);
    }
}
