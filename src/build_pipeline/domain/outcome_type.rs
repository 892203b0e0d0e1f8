use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Token identifying the Rust type of an outcome.
///
/// Equality and hashing use the `TypeId` only; the type name is carried for
/// error messages and logging.
#[derive(Clone, Copy)]
pub struct OutcomeType {
    id: TypeId,
    name: &'static str,
}

impl OutcomeType {
    pub fn of<T: Any + Send + Sync>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without its module path, e.g. `ResolvedDependencySet`.
    pub fn short_name(&self) -> &'static str {
        let generic_start = self.name.find('<').unwrap_or(self.name.len());
        match self.name[..generic_start].rfind("::") {
            Some(i) => &self.name[i + 2..],
            None => self.name,
        }
    }
}

impl PartialEq for OutcomeType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for OutcomeType {}

impl Hash for OutcomeType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for OutcomeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OutcomeType").field(&self.name).finish()
    }
}

impl fmt::Display for OutcomeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
