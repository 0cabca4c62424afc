//! Contract classifier.
//!
//! Pure, order-preserving filter over the canonical model: both analyzers
//! run only on the contracts admitted here.

use crate::model::{ContractKind, ContractUnit, SourceUnit};

/// Which contract kinds the analyzers should look at.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassifierConfig {
    /// Admit `library` declarations in addition to contracts.
    pub include_libraries: bool,
    /// Admit `interface` declarations in addition to contracts.
    pub include_interfaces: bool,
}

impl ClassifierConfig {
    /// True when `kind` passes the filter.
    #[must_use]
    pub const fn admits(self, kind: ContractKind) -> bool {
        match kind {
            ContractKind::Contract => true,
            ContractKind::Library => self.include_libraries,
            ContractKind::Interface => self.include_interfaces,
        }
    }
}

/// A source unit paired with the subset of its contracts that passed the
/// filter, preserving declaration order.
#[derive(Debug)]
pub struct ClassifiedUnit<'a> {
    /// The owning source unit.
    pub unit: &'a SourceUnit,
    /// Admitted contracts in declaration order.
    pub contracts: Vec<&'a ContractUnit>,
}

/// Filters the canonical units. Files keep their supplied order; files
/// whose every contract is filtered out are dropped entirely.
#[must_use]
pub fn classify<'a>(units: &'a [SourceUnit], config: ClassifierConfig) -> Vec<ClassifiedUnit<'a>> {
    units
        .iter()
        .filter_map(|unit| {
            let contracts: Vec<&ContractUnit> = unit
                .contracts
                .iter()
                .filter(|c| config.admits(c.kind))
                .collect();
            if contracts.is_empty() {
                None
            } else {
                Some(ClassifiedUnit { unit, contracts })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContractKind;
    use rustc_hash::FxHashMap;
    use std::path::PathBuf;

    fn unit_with_kinds(kinds: &[ContractKind]) -> SourceUnit {
        SourceUnit {
            path: PathBuf::from("a.sol"),
            contracts: kinds
                .iter()
                .enumerate()
                .map(|(i, &kind)| ContractUnit {
                    name: format!("C{i}"),
                    kind,
                    file: PathBuf::from("a.sol"),
                    functions: Vec::new(),
                    modifiers: FxHashMap::default(),
                })
                .collect(),
        }
    }

    #[test]
    fn default_admits_only_contracts() {
        let units = vec![unit_with_kinds(&[
            ContractKind::Contract,
            ContractKind::Library,
            ContractKind::Interface,
        ])];
        let classified = classify(&units, ClassifierConfig::default());
        assert_eq!(classified.len(), 1);
        assert_eq!(classified[0].contracts.len(), 1);
        assert_eq!(classified[0].contracts[0].kind, ContractKind::Contract);
    }

    #[test]
    fn flags_admit_libraries_and_interfaces() {
        let units = vec![unit_with_kinds(&[
            ContractKind::Library,
            ContractKind::Interface,
        ])];
        let config = ClassifierConfig {
            include_libraries: true,
            include_interfaces: true,
        };
        let classified = classify(&units, config);
        assert_eq!(classified[0].contracts.len(), 2);
        // Declaration order is preserved.
        assert_eq!(classified[0].contracts[0].kind, ContractKind::Library);
    }

    #[test]
    fn fully_filtered_files_are_dropped() {
        let units = vec![unit_with_kinds(&[ContractKind::Library])];
        assert!(classify(&units, ClassifierConfig::default()).is_empty());
    }
}
