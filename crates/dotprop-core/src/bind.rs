use std::convert::Infallible;
use std::str::FromStr;

use serde_json::Value;

/// Which keys [`bind`] copies from the source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum KeySelector {
    /// Every key of the source (`"*"`).
    All,
    /// Exactly these keys. A key missing from the source becomes `null`.
    Keys(Vec<String>),
    /// Every key the target already has.
    #[default]
    TargetShape,
}

impl KeySelector {
    /// Parses `"*"` or a comma-separated key list. Blank entries are ignored.
    pub fn parse(s: &str) -> Self {
        if s.trim() == "*" {
            return KeySelector::All;
        }
        KeySelector::Keys(
            s.split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(String::from)
                .collect(),
        )
    }
}

impl FromStr for KeySelector {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Shallow-copies the selected keys of `source` into `target`.
///
/// Returns `None` without touching `target` unless both sides are mappings.
pub fn bind<'t>(target: &'t mut Value, source: &Value, keys: &KeySelector) -> Option<&'t mut Value> {
    let (Value::Object(dst), Value::Object(src)) = (&mut *target, source) else {
        tracing::debug!("bind: target and source must both be mappings");
        return None;
    };
    let selected: Vec<String> = match keys {
        KeySelector::All => src.keys().cloned().collect(),
        KeySelector::Keys(list) => list.clone(),
        KeySelector::TargetShape => dst.keys().cloned().collect(),
    };
    for key in selected {
        let v = src.get(&key).cloned().unwrap_or(Value::Null);
        dst.insert(key, v);
    }
    Some(target)
}
