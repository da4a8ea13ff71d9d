use crate::error::ConfigError;
use std::path::Path;
use tracing::debug;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{AccountSettings, Settings, StockListing, TableSettings};

/// The file read when no `--config` path is given.
pub const DEFAULT_CONFIG_PATH: &str = "prices.toml";

/// Loads the simulation configuration from a TOML file.
///
/// Values can be overridden from the environment with the `HFT_` prefix and `__` as the
/// nesting separator, e.g. `HFT_ACCOUNT__BUDGET=250`. The result is validated before
/// it is returned.
pub fn load_config(path: impl AsRef<Path>) -> Result<Settings, ConfigError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Loading configuration");

    let builder = config::Config::builder()
        .add_source(config::File::new(
            &path.to_string_lossy(),
            config::FileFormat::Toml,
        ))
        .add_source(
            config::Environment::with_prefix("HFT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;

    Ok(settings)
}

/// Parses and validates configuration held in a TOML string. No environment overrides apply.
pub fn parse_config(toml: &str) -> Result<Settings, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?
        .try_deserialize::<Settings>()?;
    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SAMPLE: &str = r#"
        [account]
        budget = 100.0
        threshold = 12.5

        [table]
        capacity = 64

        [[stocks]]
        symbol = "AAPL"
        price = 10.0

        [[stocks]]
        symbol = "MSFT"
        price = 20.25
        shares = 3
    "#;

    #[test]
    fn test_parse_full_config() {
        let settings = parse_config(SAMPLE).unwrap();
        assert_eq!(settings.account.budget, dec!(100));
        assert_eq!(settings.account.threshold, dec!(12.5));
        assert_eq!(settings.table.capacity, 64);
        assert_eq!(settings.stocks.len(), 2);
        assert_eq!(settings.stocks[0].shares, 0);
        assert_eq!(settings.stocks[1].price, dec!(20.25));
    }

    #[test]
    fn test_into_parts_populates_table() {
        let (table, account) = parse_config(SAMPLE).unwrap().into_parts().unwrap();
        assert_eq!(table.bucket_count(), 64);
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("MSFT").unwrap().shares_owned, 3);
        assert_eq!(account.original_budget, dec!(100));
        assert_eq!(account.budget, dec!(100));
    }

    #[test]
    fn test_defaults_and_duplicate_rows() {
        let settings = parse_config(
            r#"
            [account]
            budget = 50
            threshold = 0

            [[stocks]]
            symbol = "AAPL"
            price = 1

            [[stocks]]
            symbol = "AAPL"
            price = 2
            "#,
        )
        .unwrap();
        assert_eq!(settings.table.capacity, 10_000);

        let (table, _) = settings.into_parts().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("AAPL").unwrap().price, dec!(2));
    }

    #[test]
    fn test_missing_account_is_load_error() {
        let err = parse_config("[[stocks]]\nsymbol = \"AAPL\"\nprice = 1\n").unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }

    #[test]
    fn test_validation_errors() {
        let negative_budget = "[account]\nbudget = -1\nthreshold = 0\n";
        assert!(matches!(
            parse_config(negative_budget).unwrap_err(),
            ConfigError::ValidationError(_)
        ));

        let negative_price =
            "[account]\nbudget = 1\nthreshold = 0\n[[stocks]]\nsymbol = \"X\"\nprice = -3\n";
        assert!(matches!(
            parse_config(negative_price).unwrap_err(),
            ConfigError::ValidationError(_)
        ));

        let blank_symbol =
            "[account]\nbudget = 1\nthreshold = 0\n[[stocks]]\nsymbol = \"\"\nprice = 3\n";
        assert!(matches!(
            parse_config(blank_symbol).unwrap_err(),
            ConfigError::ValidationError(_)
        ));
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let err = load_config("definitely/not/here/prices.toml").unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }
}
