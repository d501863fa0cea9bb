//! The handler table
//!
//! Built once, by expanding every [`Family`] over the four operand types,
//! and read-only afterwards. Lookups need no locking.

use super::{Family, HandlerEntry};
use crate::dtype::{Complex64, Complex128, DType, LapackScalar};
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::OnceLock;

/// Process-wide handler table, built on first use
static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// The process-wide handler table.
///
/// # Panics
///
/// Panics on first use if two handlers expand to the same name. The table
/// is fixed at compile time, so this only fires on a broken build.
pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(|| match Registry::build() {
        Ok(registry) => registry,
        Err(err) => panic!("LAPACK handler table is inconsistent: {err}"),
    })
}

/// Mapping from handler name to [`HandlerEntry`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registry {
    entries: BTreeMap<String, HandlerEntry>,
}

impl Registry {
    /// Expand every family over `f32`, `f64`, `Complex64` and `Complex128`
    pub fn build() -> Result<Self> {
        let mut entries = Vec::new();
        expand::<f32>(&mut entries);
        expand::<f64>(&mut entries);
        expand::<Complex64>(&mut entries);
        expand::<Complex128>(&mut entries);

        let registry = Self::from_entries(entries)?;
        tracing::debug!(handlers = registry.len(), "built LAPACK handler registry");
        Ok(registry)
    }

    /// Build a table from explicit entries, rejecting duplicate names
    pub fn from_entries(entries: impl IntoIterator<Item = HandlerEntry>) -> Result<Self> {
        let mut table = BTreeMap::new();
        for entry in entries {
            match table.entry(entry.name().to_string()) {
                Entry::Occupied(slot) => {
                    return Err(Error::DuplicateHandler {
                        name: slot.key().clone(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(entry);
                }
            }
        }
        Ok(Self { entries: table })
    }

    /// Entry registered under `name`
    pub fn get(&self, name: &str) -> Option<&HandlerEntry> {
        self.entries.get(name)
    }

    /// Entry registered under `name`, or [`Error::UnknownHandler`]
    pub fn lookup(&self, name: &str) -> Result<&HandlerEntry> {
        self.get(name).ok_or_else(|| Error::unknown_handler(name))
    }

    /// Whether `name` is registered
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, sorted by name
    pub fn iter(&self) -> impl Iterator<Item = &HandlerEntry> {
        self.entries.values()
    }

    /// All names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries of one family, sorted by name
    pub fn by_family(&self, family: Family) -> impl Iterator<Item = &HandlerEntry> {
        self.iter().filter(move |entry| entry.family() == family)
    }

    /// Entries whose operand type is `dtype`, sorted by name
    pub fn by_dtype(&self, dtype: DType) -> impl Iterator<Item = &HandlerEntry> {
        self.iter().filter(move |entry| entry.dtype() == dtype)
    }

    /// Entry whose kernel entry point is `symbol`
    pub fn by_symbol(&self, symbol: &str) -> Option<&HandlerEntry> {
        self.iter().find(|entry| entry.target().symbol == symbol)
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a HandlerEntry;
    type IntoIter = std::collections::btree_map::Values<'a, String, HandlerEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

fn expand<T: LapackScalar>(entries: &mut Vec<HandlerEntry>) {
    let instances = Family::ALL
        .into_iter()
        .filter_map(HandlerEntry::instantiate::<T>);
    entries.extend(instances);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_size() {
        // 8 families x 4 types, plus the symmetric/Hermitian pair x 2 types
        assert_eq!(Registry::build().unwrap().len(), 36);
    }

    #[test]
    fn test_global_is_shared() {
        assert!(std::ptr::eq(registry(), registry()));
        assert_eq!(registry(), &Registry::build().unwrap());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let entry = HandlerEntry::instantiate::<f64>(Family::Lu).unwrap();
        let err = Registry::from_entries([entry.clone(), entry]).unwrap_err();
        assert!(matches!(err, Error::DuplicateHandler { ref name } if name == "lapack_dgetrf_ffi"));
    }

    #[test]
    fn test_lookup_unknown() {
        let err = registry().lookup("lapack_qqq_ffi").unwrap_err();
        assert!(matches!(err, Error::UnknownHandler { ref name } if name == "lapack_qqq_ffi"));
        assert!(registry().get("lapack_qqq_ffi").is_none());
    }

    #[test]
    fn test_symbols_are_unique() {
        let mut symbols: Vec<_> = registry()
            .iter()
            .map(|e| e.target().symbol.as_str())
            .collect();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), registry().len());
        assert_eq!(
            registry().by_symbol("zheevd").map(HandlerEntry::name),
            Some("lapack_zheevd_ffi")
        );
    }
}
