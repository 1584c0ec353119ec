use std::fs::File;
use std::io::{BufReader, Error as IOError, Read};
use std::path::{Path, PathBuf};

use log::debug;
use serde_json::{error::Error as SerdeError, Value};
use thiserror::Error;

use super::resources;
use crate::wordnet_lib::converter::Conversion;
use crate::wordnet_lib::id_prefix::IdPrefix;
use crate::wordnet_lib::lexical_entry::{InvalidMergePolicyErr, MergePolicy};

#[derive(Error, Debug)]
pub enum ConfigErr {
  #[error("{self:?}")]
  IOError(#[from] IOError),
  #[error("{self:?}")]
  SerdeError(#[from] SerdeError),
  #[error("{0}")]
  InvalidMergePolicyErr(#[from] InvalidMergePolicyErr),
  #[error("setting file is invalid format: {0}")]
  InvalidFormatErr(String),
}

#[derive(Debug)]
pub struct Config {
  pub settings: Value,
  pub conversions: Vec<Conversion>,
}

impl Config {
  /// Loads the settings file at `path`, or the built-in settings when
  /// `path` is `None`. Relative paths inside a settings file are resolved
  /// against the directory of that file.
  pub fn setup(path: Option<&str>) -> Result<Config, ConfigErr> {
    match path {
      Some(path) => {
        let mut buf = String::new();
        BufReader::new(File::open(path)?).read_to_string(&mut buf)?;
        let base_dir = Path::new(path).parent().unwrap_or_else(|| Path::new(""));
        Config::from_str_with_base(&buf, base_dir)
      }
      None => Config::from_str_with_base(resources::DEFAULT_SETTINGS_JSON, Path::new("")),
    }
  }

  pub fn from_str_with_base(settings: &str, base_dir: &Path) -> Result<Config, ConfigErr> {
    let settings: Value = serde_json::from_str(settings)?;
    let conversions = match settings.get("conversions") {
      Some(Value::Array(arr)) => arr
        .iter()
        .map(|v| parse_conversion(v, base_dir))
        .collect::<Result<Vec<Conversion>, ConfigErr>>()?,
      Some(_) => {
        return Err(ConfigErr::InvalidFormatErr(String::from(
          "`conversions` must be an array",
        )))
      }
      None => {
        return Err(ConfigErr::InvalidFormatErr(String::from(
          "`conversions` not defined",
        )))
      }
    };
    debug!("settings: {}", settings);
    Ok(Config {
      settings,
      conversions,
    })
  }
}

fn parse_conversion(v: &Value, base_dir: &Path) -> Result<Conversion, ConfigErr> {
  let merge_policy = match v.get("mergePolicy") {
    Some(Value::String(s)) => s.parse::<MergePolicy>()?,
    Some(_) => {
      return Err(ConfigErr::InvalidFormatErr(String::from(
        "`mergePolicy` must be a string",
      )))
    }
    None => MergePolicy::default(),
  };
  Ok(Conversion {
    input: resolve(base_dir, get_str(v, "input")?),
    output: resolve(base_dir, get_str(v, "output")?),
    prefix: IdPrefix::new(get_str(v, "idPrefix")?),
    merge_policy,
  })
}

fn get_str<'a>(v: &'a Value, key: &str) -> Result<&'a str, ConfigErr> {
  match v.get(key) {
    Some(Value::String(s)) => Ok(s),
    _ => Err(ConfigErr::InvalidFormatErr(format!(
      "`{}` must be a string",
      key
    ))),
  }
}

fn resolve(base_dir: &Path, path: &str) -> PathBuf {
  base_dir.join(path)
}
