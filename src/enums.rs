//! Enumerated Domain Contract - Typed Capability Registry
//!
//! An enum-like domain exposes two operations: a membership test and the
//! ordered set of allowed raw values. Domains are resolved through a typed
//! registry instead of reflecting on a type name. An entry wired by hand may
//! carry only part of the contract; `validate_enum` reports that as a
//! configuration failure, not a validation failure.

use std::collections::HashMap;

/// Capability contract every enum-like domain satisfies.
pub trait EnumDomain {
    /// Membership test against the allowed raw values.
    fn is_valid(value: &str) -> bool;

    /// Ordered sequence of allowed raw values.
    fn values() -> Vec<String>;
}

pub type IsValidFn = fn(&str) -> bool;
pub type ValuesFn = fn() -> Vec<String>;

/// One named domain's operations. Either may be absent on hand-wired
/// entries; [`EnumRegistry::register`] always wires both.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumEntry {
    is_valid: Option<IsValidFn>,
    values: Option<ValuesFn>,
}

impl EnumEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_is_valid(mut self, f: IsValidFn) -> Self {
        self.is_valid = Some(f);
        self
    }

    pub fn with_values(mut self, f: ValuesFn) -> Self {
        self.values = Some(f);
        self
    }

    pub fn is_valid_fn(&self) -> Option<IsValidFn> {
        self.is_valid
    }

    pub fn values_fn(&self) -> Option<ValuesFn> {
        self.values
    }
}

/// Maps domain names to capability entries.
#[derive(Debug, Clone, Default)]
pub struct EnumRegistry {
    entries: HashMap<String, EnumEntry>,
}

impl EnumRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a domain under `name` with both operations wired.
    pub fn register<E: EnumDomain>(&mut self, name: &str) {
        self.entries.insert(
            name.to_string(),
            EnumEntry::new()
                .with_is_valid(E::is_valid)
                .with_values(E::values),
        );
    }

    /// Register a hand-wired entry. Adapters that expose only part of the
    /// contract land here; the gap surfaces later as a configuration error.
    pub fn register_entry(&mut self, name: &str, entry: EnumEntry) {
        self.entries.insert(name.to_string(), entry);
    }

    pub fn lookup(&self, name: &str) -> Option<&EnumEntry> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ColorEnum;

    impl EnumDomain for ColorEnum {
        fn is_valid(value: &str) -> bool {
            matches!(value, "red" | "green" | "blue")
        }

        fn values() -> Vec<String> {
            vec!["red".to_string(), "green".to_string(), "blue".to_string()]
        }
    }

    #[test]
    fn test_register_wires_both_operations() {
        let mut registry = EnumRegistry::new();
        registry.register::<ColorEnum>("ColorEnum");

        let entry = registry.lookup("ColorEnum").unwrap();
        let is_valid = entry.is_valid_fn().unwrap();
        let values = entry.values_fn().unwrap();

        assert!(is_valid("red"));
        assert!(!is_valid("mauve"));
        assert_eq!(values(), vec!["red", "green", "blue"]);
    }

    #[test]
    fn test_hand_wired_entry_can_be_partial() {
        let mut registry = EnumRegistry::new();
        registry.register_entry("Partial", EnumEntry::new().with_is_valid(|_| true));

        let entry = registry.lookup("Partial").unwrap();
        assert!(entry.is_valid_fn().is_some());
        assert!(entry.values_fn().is_none());
    }

    #[test]
    fn test_unknown_name_does_not_resolve() {
        let registry = EnumRegistry::new();
        assert!(registry.lookup("Nope").is_none());
    }
}
