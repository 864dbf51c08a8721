use anyhow::{anyhow, Result};
use clap::Args;

use crate::animations::easing::NAMED_EASINGS;

/// Print every named easing sampled across [0, 1]
#[derive(Args)]
pub struct EasingsCommand {
    /// Number of evenly spaced samples, endpoints included
    #[arg(short = 's', long = "samples", default_value_t = 11)]
    pub samples: usize,

    /// Only print curves whose name contains this text
    pub filter: Option<String>,
}

impl EasingsCommand {
    pub fn execute(&self) -> Result<()> {
        let rows = self.table()?;
        if rows.is_empty() {
            return Err(anyhow!(
                "No easing matches {:?}",
                self.filter.as_deref().unwrap_or_default()
            ));
        }
        for row in rows {
            println!("{}", row);
        }
        Ok(())
    }

    fn table(&self) -> Result<Vec<String>> {
        if self.samples < 2 {
            return Err(anyhow!("--samples must be at least 2"));
        }

        let last = (self.samples - 1) as f64;
        Ok(NAMED_EASINGS
            .iter()
            .filter(|(name, _)| {
                self.filter
                    .as_deref()
                    .map_or(true, |filter| name.to_lowercase().contains(&filter.to_lowercase()))
            })
            .map(|(name, curve)| {
                let values: Vec<String> = (0..self.samples)
                    .map(|i| format!("{:>7.3}", curve(i as f64 / last)))
                    .collect();
                format!("{:<18}{}", name, values.join(""))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_rows() {
        let cmd = EasingsCommand {
            samples: 3,
            filter: Some("quad".to_string()),
        };
        let rows = cmd.table().unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].starts_with("easeInQuad"));
        assert!(rows[0].ends_with("  0.000  0.250  1.000"));
    }

    #[test]
    fn test_too_few_samples() {
        let cmd = EasingsCommand {
            samples: 1,
            filter: None,
        };
        assert!(cmd.table().is_err());
    }
}
