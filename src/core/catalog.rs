//! Product catalog
//!
//! This module provides the `Catalog` that holds the closed list of known
//! products and decides whether a product name may be recorded.
//!
//! The catalog is loaded once at startup, either from the built-in list or
//! from a one-column CSV file with a `product` header. How unknown names are
//! treated depends on the [`CatalogPolicy`]:
//! - `Strict`: names outside the catalog are rejected
//! - `Open`: any non-empty name is accepted as free text

use crate::io::csv_format::CatalogRow;
use crate::types::LedgerError;
use clap::ValueEnum;
use csv::{ReaderBuilder, Trim};
use std::io::Read;
use std::path::Path;

/// Placeholder shown by a product selector when nothing is chosen
pub const NO_PRODUCT: &str = "-";

/// Products known when no catalog file is given
pub const DEFAULT_PRODUCTS: &[&str] = &[
    "11 10.5-19",
    "11 10.5-21",
    "11 10.5K-25",
    "11 10.5E-16",
    "11 10.5E-18",
    "5S 8-16.5",
    "5S 8A -19",
    "5S 8A-16.5",
    "5S 8E-18",
    "5S 8K-17.5",
    "5S 8M -16",
    "5S 8N-13",
    "6174 N (LTS)",
    "9 10-16",
    "9 10-18-5",
    "9 10-19",
    "9 10-21",
    "9 95SP-14-4",
    "9 9KS-17.5",
    "9 9LS-13.5",
    "9 9S - 12",
    "Manta BLSB 5590 - 680 X 0.9 mm",
    "Manta BLSB 5590 - 670 x 1.2 mm",
    "Manta BLSB 5590 - 515 X 1.4 mm",
    "Manta BLSB 5590 - 515 X 0.9 mm",
    "Tecido Calandrado Camaçari",
];

/// How product names outside the catalog are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CatalogPolicy {
    /// Reject names that are not in the catalog
    #[default]
    Strict,
    /// Accept any non-empty name
    Open,
}

/// The closed list of known products plus the policy for unknown names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    /// Product names in load order, without duplicates
    products: Vec<String>,
    policy: CatalogPolicy,
}

impl Catalog {
    /// Build a catalog from product names
    ///
    /// Names are trimmed; empty names, the `-` placeholder, and duplicates
    /// are dropped. An empty result is a configuration error.
    pub fn new<I, S>(products: I, policy: CatalogPolicy) -> Result<Self, LedgerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names: Vec<String> = Vec::new();
        for product in products {
            let name = product.as_ref().trim();
            if name.is_empty() || name == NO_PRODUCT {
                continue;
            }
            if !names.iter().any(|existing| existing == name) {
                names.push(name.to_string());
            }
        }

        if names.is_empty() {
            return Err(LedgerError::invalid_config("catalog contains no products"));
        }

        Ok(Catalog {
            products: names,
            policy,
        })
    }

    /// The built-in product list
    pub fn builtin(policy: CatalogPolicy) -> Self {
        Catalog {
            products: DEFAULT_PRODUCTS.iter().map(|p| p.to_string()).collect(),
            policy,
        }
    }

    /// Load a catalog from CSV with a `product` header column
    pub fn from_csv_reader<R: Read>(reader: R, policy: CatalogPolicy) -> Result<Self, LedgerError> {
        let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
        let mut names = Vec::new();
        for row in reader.deserialize::<CatalogRow>() {
            let row = row.map_err(|e| LedgerError::invalid_config(format!("catalog: {}", e)))?;
            names.push(row.product);
        }
        Catalog::new(names, policy)
    }

    /// Load a catalog from a CSV file
    pub fn from_csv_path(path: &Path, policy: CatalogPolicy) -> Result<Self, LedgerError> {
        let file = std::fs::File::open(path).map_err(|e| {
            LedgerError::invalid_config(format!(
                "cannot open catalog '{}': {}",
                path.display(),
                e
            ))
        })?;
        Catalog::from_csv_reader(file, policy)
    }

    pub fn products(&self) -> &[String] {
        &self.products
    }

    pub fn policy(&self) -> CatalogPolicy {
        self.policy
    }

    pub fn contains(&self, product: &str) -> bool {
        self.products.iter().any(|p| p == product)
    }

    /// Check a product name before it is recorded
    ///
    /// Returns the trimmed name to store.
    ///
    /// # Errors
    ///
    /// - `NoProductSelected` if the name is empty or the `-` placeholder
    /// - `UnknownProduct` if the policy is strict and the name is not listed
    pub fn resolve(&self, product: &str) -> Result<String, LedgerError> {
        let name = product.trim();
        if name.is_empty() || name == NO_PRODUCT {
            return Err(LedgerError::NoProductSelected);
        }
        if self.policy == CatalogPolicy::Strict && !self.contains(name) {
            return Err(LedgerError::unknown_product(name));
        }
        Ok(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_builtin_catalog_excludes_placeholder() {
        let catalog = Catalog::builtin(CatalogPolicy::Strict);
        assert_eq!(catalog.products().len(), DEFAULT_PRODUCTS.len());
        assert!(!catalog.contains(NO_PRODUCT));
        assert!(catalog.contains("Tecido Calandrado Camaçari"));
    }

    #[test]
    fn test_new_trims_and_dedupes() {
        let catalog =
            Catalog::new(["  A ", "B", "A", "", "-"], CatalogPolicy::Strict).unwrap();
        assert_eq!(catalog.products(), &["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_new_rejects_empty_catalog() {
        let err = Catalog::new(["-", "  "], CatalogPolicy::Strict).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidConfig { .. }));
    }

    #[test]
    fn test_from_csv_reader() {
        let data = "product\n9 10-16\n 9 10-19 \nManta BLSB 5590 - 680 X 0.9 mm\n";
        let catalog = Catalog::from_csv_reader(data.as_bytes(), CatalogPolicy::Open).unwrap();
        assert_eq!(catalog.products().len(), 3);
        assert!(catalog.contains("9 10-19"));
        assert_eq!(catalog.policy(), CatalogPolicy::Open);
    }

    #[test]
    fn test_from_csv_reader_requires_product_header() {
        let data = "name\nA\n";
        let err = Catalog::from_csv_reader(data.as_bytes(), CatalogPolicy::Strict).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidConfig { .. }));
    }

    #[rstest]
    #[case::strict_known(CatalogPolicy::Strict, "A", Ok("A".to_string()))]
    #[case::strict_known_padded(CatalogPolicy::Strict, " A ", Ok("A".to_string()))]
    #[case::strict_unknown(CatalogPolicy::Strict, "Z", Err(LedgerError::unknown_product("Z")))]
    #[case::open_unknown(CatalogPolicy::Open, "Z", Ok("Z".to_string()))]
    #[case::strict_placeholder(CatalogPolicy::Strict, "-", Err(LedgerError::NoProductSelected))]
    #[case::open_placeholder(CatalogPolicy::Open, "-", Err(LedgerError::NoProductSelected))]
    #[case::open_empty(CatalogPolicy::Open, "  ", Err(LedgerError::NoProductSelected))]
    fn test_resolve(
        #[case] policy: CatalogPolicy,
        #[case] input: &str,
        #[case] expected: Result<String, LedgerError>,
    ) {
        let catalog = Catalog::new(["A", "B"], policy).unwrap();
        assert_eq!(catalog.resolve(input), expected);
    }
}
