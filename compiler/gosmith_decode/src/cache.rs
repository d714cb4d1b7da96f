//! Resolution cache.
//!
//! An arena of slots plus a name index. A slot is reserved as a placeholder
//! before its declaration is decoded and filled exactly once afterwards, so a
//! reference back to a type still being decoded finds the placeholder instead
//! of recursing. Several names (`Node`, `example.com/app.Node`) may index the
//! same slot.

use rustc_hash::FxHashMap;

use gosmith_ir::Type;

/// Index of a slot in the arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct SlotId(usize);

#[derive(Clone, Debug)]
enum Slot {
    /// Reserved while the declaration is being decoded.
    Placeholder { pkg: String, name: String },
    Resolved(Type),
    Failed,
}

/// Observable state of a cache entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Pending,
    Resolved,
    Failed,
}

#[derive(Debug, Default)]
pub(crate) struct TypeCache {
    slots: Vec<Slot>,
    index: FxHashMap<String, SlotId>,
}

impl TypeCache {
    pub(crate) fn id(&self, key: &str) -> Option<SlotId> {
        self.index.get(key).copied()
    }

    /// Type for a cached entry: the resolved type, an opaque reference for a
    /// placeholder, `None` for a failure. `None` as the outer value is a miss.
    pub(crate) fn get(&self, key: &str) -> Option<Option<Type>> {
        let id = self.id(key)?;
        Some(self.type_at(id))
    }

    pub(crate) fn type_at(&self, id: SlotId) -> Option<Type> {
        match &self.slots[id.0] {
            Slot::Placeholder { pkg, name } => Some(Type::named(pkg, name)),
            Slot::Resolved(ty) => Some(ty.clone()),
            Slot::Failed => None,
        }
    }

    /// The type of a filled slot; placeholders and failures give `None`.
    pub(crate) fn resolved(&self, key: &str) -> Option<&Type> {
        match &self.slots[self.id(key)?.0] {
            Slot::Resolved(ty) => Some(ty),
            Slot::Placeholder { .. } | Slot::Failed => None,
        }
    }

    pub(crate) fn state(&self, key: &str) -> Option<Resolution> {
        let id = self.id(key)?;
        Some(match &self.slots[id.0] {
            Slot::Placeholder { .. } => Resolution::Pending,
            Slot::Resolved(_) => Resolution::Resolved,
            Slot::Failed => Resolution::Failed,
        })
    }

    pub(crate) fn reserve(&mut self, key: &str, pkg: &str, name: &str) -> SlotId {
        let id = SlotId(self.slots.len());
        self.slots.push(Slot::Placeholder {
            pkg: pkg.to_owned(),
            name: name.to_owned(),
        });
        self.index.insert(key.to_owned(), id);
        id
    }

    /// Point another name at an existing slot.
    pub(crate) fn alias(&mut self, key: &str, id: SlotId) {
        self.index.entry(key.to_owned()).or_insert(id);
    }

    /// Record a name that resolves to nothing.
    pub(crate) fn fail(&mut self, key: &str) {
        let id = SlotId(self.slots.len());
        self.slots.push(Slot::Failed);
        self.index.insert(key.to_owned(), id);
    }

    /// Fill a placeholder. Terminal slots are never overwritten.
    pub(crate) fn fill(&mut self, id: SlotId, ty: Option<Type>) {
        let slot = &mut self.slots[id.0];
        if !matches!(slot, Slot::Placeholder { .. }) {
            tracing::warn!(?id, "resolved slot filled again");
            return;
        }
        *slot = match ty {
            Some(ty) => Slot::Resolved(ty),
            None => Slot::Failed,
        };
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }
}
