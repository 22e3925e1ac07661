//! Layered configuration of group parameters.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::primitives::groups::rfc5114;
use crate::{Error, GroupParameters, Result};

/// Group parameters as hex strings, as read from TOML or the environment.
///
/// Every value is hex, with or without a `0x` prefix, whatever digits it
/// contains: `SIGMA_Q=11` means seventeen. In TOML the values are strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupConfig {
    /// Group modulus `p`.
    pub p: String,
    /// Subgroup order `q`.
    pub q: String,
    /// Primary generator `g`.
    pub g: String,
    /// Blinding generator `h` for commitment proofs.
    #[serde(default)]
    pub h: Option<String>,
    /// Bases for multi-base commitment proofs.
    #[serde(default)]
    pub bases: Vec<String>,
}

/// Parsed group parameters and generators.
#[derive(Clone, Debug)]
pub struct GroupSetup {
    /// Modulus and subgroup order.
    pub group: GroupParameters,
    /// Primary generator `g`.
    pub g: BigUint,
    /// Blinding generator `h`, if configured.
    pub h: Option<BigUint>,
    /// Multi-base commitment bases.
    pub bases: Vec<BigUint>,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self::rfc5114()
    }
}

impl GroupConfig {
    /// The RFC 5114 2048/256 group without a blinding generator.
    pub fn rfc5114() -> Self {
        let (p, q, g) = rfc5114::hex_constants();
        Self {
            p: p.to_string(),
            q: q.to_string(),
            g: g.to_string(),
            h: None,
            bases: Vec::new(),
        }
    }

    /// Loads configuration from TOML file and environment variables.
    ///
    /// Configuration priority: environment variables > `config/group.toml` > defaults.
    /// `SIGMA_BASES` holds a comma-separated list.
    pub fn from_env() -> Result<Self> {
        use figment::Figment;
        use figment::providers::{Format, Serialized, Toml};

        Ok(Figment::from(Serialized::defaults(GroupConfig::default()))
            .merge(Toml::file("config/group.toml"))
            .merge(Serialized::defaults(EnvOverrides::read()))
            .extract()?)
    }

    /// Parses the hex strings into group parameters and generators.
    pub fn setup(&self) -> Result<GroupSetup> {
        let group = GroupParameters::new(parse_hex("p", &self.p)?, parse_hex("q", &self.q)?)?;
        let g = parse_hex("g", &self.g)?;
        let h = self.h.as_deref().map(|h| parse_hex("h", h)).transpose()?;
        let bases = self
            .bases
            .iter()
            .map(|b| parse_hex("bases", b))
            .collect::<Result<Vec<_>>>()?;

        Ok(GroupSetup { group, g, h, bases })
    }
}

/// `SIGMA_*` variables kept as raw text.
///
/// The environment provider would turn `11` into a number and `1e5` into a
/// float, so values are collected verbatim and parsed as hex later.
#[derive(Debug, Default, Serialize)]
struct EnvOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    p: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    g: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    h: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bases: Option<Vec<String>>,
}

impl EnvOverrides {
    fn read() -> Self {
        let mut overrides = Self::default();
        for (key, value) in figment::providers::Env::prefixed("SIGMA_").iter() {
            match key.as_str() {
                "p" => overrides.p = Some(value),
                "q" => overrides.q = Some(value),
                "g" => overrides.g = Some(value),
                "h" => overrides.h = Some(value),
                "bases" => {
                    overrides.bases = Some(
                        value
                            .split(',')
                            .map(str::trim)
                            .filter(|b| !b.is_empty())
                            .map(str::to_string)
                            .collect(),
                    )
                }
                _ => {}
            }
        }
        overrides
    }
}

/// Parses a hex integer, accepting an optional `0x` or `0X` prefix.
///
/// `field` names the value in the error.
pub fn parse_hex(field: &str, value: &str) -> Result<BigUint> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    BigUint::parse_bytes(digits.as_bytes(), 16)
        .ok_or_else(|| Error::InvalidParams(format!("{field} is not a hex integer")))
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;
    use crate::primitives::groups::{rfc5114_generator, rfc5114_group};

    #[test]
    fn default_is_rfc5114() {
        let setup = GroupConfig::default().setup().unwrap();
        assert_eq!(setup.group, rfc5114_group().unwrap());
        assert_eq!(setup.g, rfc5114_generator().unwrap());
        assert!(setup.h.is_none());
        assert!(setup.bases.is_empty());
    }

    #[test]
    fn parses_prefixed_hex() {
        let config = GroupConfig {
            p: "0x7f".to_string(),
            q: "7".to_string(),
            g: "2".to_string(),
            h: Some("0X4".to_string()),
            bases: vec!["2".to_string(), "8".to_string()],
        };
        let setup = config.setup().unwrap();
        assert_eq!(setup.group.p(), &BigUint::from(127u32));
        assert_eq!(setup.h, Some(BigUint::from(4u32)));
        assert_eq!(setup.bases.len(), 2);
    }

    #[test]
    fn parse_hex_accepts_either_prefix() {
        assert_eq!(parse_hex("v", "0x1F").unwrap(), BigUint::from(31u32));
        assert_eq!(parse_hex("v", "0X1f").unwrap(), BigUint::from(31u32));
        assert_eq!(parse_hex("v", " 1f ").unwrap(), BigUint::from(31u32));
        assert!(matches!(parse_hex("v", "0x"), Err(Error::InvalidParams(_))));
        assert!(matches!(parse_hex("v", "xyz"), Err(Error::InvalidParams(_))));
    }

    #[test]
    fn rejects_bad_hex() {
        let mut config = GroupConfig::rfc5114();
        config.g = "not-hex".to_string();
        assert!(matches!(config.setup(), Err(Error::InvalidParams(_))));

        let mut config = GroupConfig::rfc5114();
        config.q = "0".to_string();
        assert!(matches!(config.setup(), Err(Error::InvalidParams(_))));
    }

    #[test]
    fn toml_and_env_layering() {
        Jail::expect_with(|jail| {
            jail.create_dir("config")?;
            jail.create_file(
                "config/group.toml",
                r#"
                p = "7f"
                q = "7"
                g = "2"
                h = "4"
                "#,
            )?;
            jail.set_env("SIGMA_G", "0x8");
            jail.set_env("SIGMA_Q", "11");

            let config = GroupConfig::from_env().map_err(|e| e.to_string())?;
            assert_eq!(config.p, "7f");
            assert_eq!(config.g, "0x8");
            assert_eq!(config.h.as_deref(), Some("4"));

            let setup = config.setup().map_err(|e| e.to_string())?;
            assert_eq!(setup.g, BigUint::from(8u32));
            assert_eq!(setup.group.q(), &BigUint::from(0x11u32));
            Ok(())
        });
    }

    #[test]
    fn env_digits_are_always_hex() {
        Jail::expect_with(|jail| {
            let wide = "123456789012345678901234567890";
            jail.set_env("SIGMA_P", wide);
            jail.set_env("SIGMA_Q", "11");
            jail.set_env("SIGMA_G", "1e5");
            jail.set_env("SIGMA_BASES", "2, 0x8");
            jail.set_env("SIGMA_RFC5114", "false");

            let config = GroupConfig::from_env().map_err(|e| e.to_string())?;
            assert_eq!(config.p, wide);
            assert_eq!(config.q, "11");
            assert_eq!(config.g, "1e5");
            assert_eq!(config.bases, vec!["2".to_string(), "0x8".to_string()]);

            let setup = config.setup().map_err(|e| e.to_string())?;
            let expected_p = BigUint::parse_bytes(wide.as_bytes(), 16).unwrap();
            assert_eq!(setup.group.p(), &expected_p);
            assert_eq!(setup.group.q(), &BigUint::from(17u32));
            assert_eq!(setup.g, BigUint::from(0x1e5u32));
            assert_eq!(setup.bases, vec![BigUint::from(2u32), BigUint::from(8u32)]);
            Ok(())
        });
    }
}
