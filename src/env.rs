use crate::value::Value;

#[derive(Debug, Clone)]
pub struct Variable {
    pub name: String,
    pub value: Value,
}

/// The variable store: a flat, case-sensitive name -> value table.
/// Lookup is linear and newest-inserted-first; reassignment overwrites
/// in place. There is no scoping, one table backs the whole interpreter.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    variables: Vec<Variable>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.variables
            .iter()
            .rev()
            .find(|var| var.name == name)
            .map(|var| var.value.clone())
    }

    pub fn set(&mut self, name: &str, value: Value) {
        if let Some(var) = self.variables.iter_mut().rev().find(|var| var.name == name) {
            var.value = value;
        } else {
            self.variables.push(Variable {
                name: name.to_string(),
                value,
            });
        }
    }

    /// Newest-first enumeration, used by the REPL's variable dump.
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
