use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum IdPrefixErr {
  #[error("`{id}` does not start with the id prefix `{prefix}`")]
  PrefixMismatchErr { id: String, prefix: String },
}

/// The literal prefix every id of one corpus carries, e.g. `oewn-`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IdPrefix {
  prefix: String,
}

impl IdPrefix {
  pub fn new<S: Into<String>>(prefix: S) -> IdPrefix {
    IdPrefix {
      prefix: prefix.into(),
    }
  }
  pub fn as_str(&self) -> &str {
    &self.prefix
  }
  /// Removes the prefix from `id`. An id without the prefix is rejected
  /// instead of being cut at the prefix length.
  pub fn strip(&self, id: &str) -> Result<String, IdPrefixErr> {
    id.strip_prefix(self.prefix.as_str())
      .map(|rest| rest.to_string())
      .ok_or_else(|| IdPrefixErr::PrefixMismatchErr {
        id: id.to_string(),
        prefix: self.prefix.clone(),
      })
  }
}
