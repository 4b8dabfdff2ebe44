//! Configuration validation.

use crate::config::Config;
use crate::constants::symbols::UNKNOWN_SYMBOL;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_conversion(config)?;
    validate_output(config)?;
    Ok(())
}

/// Validate conversion defaults.
fn validate_conversion(config: &Config) -> Result<()> {
    let conversion = &config.conversion;

    for (name, symbol) in [
        ("onset_symbol", conversion.onset_symbol),
        ("offset_symbol", conversion.offset_symbol),
    ] {
        if symbol.is_whitespace() || symbol.is_control() {
            return Err(Error::ConfigValidation {
                message: format!("{name} must be a printable character, got {symbol:?}"),
            });
        }
        if conversion.sentinels && symbol == UNKNOWN_SYMBOL {
            return Err(Error::ConfigValidation {
                message: format!("{name} '{UNKNOWN_SYMBOL}' is reserved for unknown labels"),
            });
        }
    }

    if conversion.sentinels && conversion.onset_symbol == conversion.offset_symbol {
        return Err(Error::ConfigValidation {
            message: format!(
                "onset_symbol and offset_symbol must differ, both are '{}'",
                conversion.onset_symbol
            ),
        });
    }

    // Separation, phrase minimum and label groups.
    conversion.to_options().validate()
}

/// Validate output settings.
fn validate_output(config: &Config) -> Result<()> {
    if config.output.formats.is_empty() {
        return Err(Error::ConfigValidation {
            message: "at least one output format is required".to_string(),
        });
    }
    Ok(())
}
