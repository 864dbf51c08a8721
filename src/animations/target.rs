//! Target adapters: the read/write boundary between the engine and whatever
//! is being animated.
//!
//! Two adapters ship with the crate: [`ObjectTarget`], a plain property map,
//! and [`StyleTarget`], an element-like inline style that folds transform
//! properties into a single `transform` declaration.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Result;

use super::interpolation::Value;

/// One batch of interpolated values, keyed by property name
pub type PropertyValues = BTreeMap<String, Value>;

/// Capabilities the engine needs from an animated object
pub trait TargetAdapter: Send {
    /// Current value of `property`, used when an animation has no explicit `from`
    fn current_value(&self, property: &str) -> Option<Value>;

    /// Fallback when the target has no current value
    fn default_value(&self, property: &str) -> Value {
        default_value(property)
    }

    /// Write a full batch of values; all of them belong to the same frame
    fn apply_values(&mut self, values: &PropertyValues) -> Result<()>;
}

/// Built-in defaults for well-known properties; anything else starts at `0`
pub fn default_value(property: &str) -> Value {
    match property {
        "opacity" | "scale" => Value::Number(1.0),
        "rotate" => Value::from("0deg"),
        "translateX" | "translateY" | "translateZ" => Value::from("0px"),
        _ => Value::Number(0.0),
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Plain property map. Clones share the same storage, so the caller keeps a
/// handle to observe what the animation writes.
#[derive(Debug, Clone, Default)]
pub struct ObjectTarget {
    values: Arc<Mutex<PropertyValues>>,
}

impl ObjectTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, property: &str, value: impl Into<Value>) -> Self {
        self.set(property, value);
        self
    }

    pub fn get(&self, property: &str) -> Option<Value> {
        lock(&self.values).get(property).cloned()
    }

    pub fn set(&self, property: &str, value: impl Into<Value>) {
        lock(&self.values).insert(property.to_string(), value.into());
    }

    pub fn snapshot(&self) -> PropertyValues {
        lock(&self.values).clone()
    }
}

impl TargetAdapter for ObjectTarget {
    fn current_value(&self, property: &str) -> Option<Value> {
        self.get(property)
    }

    fn apply_values(&mut self, values: &PropertyValues) -> Result<()> {
        let mut stored = lock(&self.values);
        for (property, value) in values {
            stored.insert(property.clone(), value.clone());
        }
        Ok(())
    }
}

/// Transform functions in the order they are composed
const TRANSFORM_ORDER: &[&str] = &["translateX", "translateY", "translateZ", "rotate", "scale"];

/// Map shorthand names (`x`, `y`, `z`) to the transform function they drive
fn transform_function(property: &str) -> Option<&'static str> {
    match property {
        "x" | "translateX" => Some("translateX"),
        "y" | "translateY" => Some("translateY"),
        "z" | "translateZ" => Some("translateZ"),
        "rotate" => Some("rotate"),
        "scale" => Some("scale"),
        _ => None,
    }
}

/// Unit appended to bare numbers written into a transform function
fn transform_unit(function: &str) -> &'static str {
    match function {
        "rotate" => "deg",
        "scale" => "",
        _ => "px",
    }
}

#[derive(Debug, Default)]
struct StyleState {
    declarations: BTreeMap<String, String>,
    transforms: BTreeMap<&'static str, Value>,
}

impl StyleState {
    fn compose_transform(&mut self) {
        let composed: Vec<String> = TRANSFORM_ORDER
            .iter()
            .filter_map(|function| {
                self.transforms.get(function).map(|value| match value {
                    Value::Number(n) => format!("{}({}{})", function, n, transform_unit(function)),
                    Value::Text(text) => format!("{}({})", function, text),
                })
            })
            .collect();

        if composed.is_empty() {
            self.declarations.remove("transform");
        } else {
            self.declarations.insert("transform".to_string(), composed.join(" "));
        }
    }
}

/// Element-like inline style.
///
/// Ordinary properties are stored as style declarations. Transform
/// properties (`translateX`, `rotate`, `scale`, and the `x`/`y`/`z`
/// shorthands) are kept individually and composed into one `transform`
/// declaration after every write.
#[derive(Debug, Clone, Default)]
pub struct StyleTarget {
    state: Arc<Mutex<StyleState>>,
}

impl StyleTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an inline declaration directly, as a stylesheet would
    pub fn with_style(self, property: &str, value: &str) -> Self {
        lock(&self.state)
            .declarations
            .insert(property.to_string(), value.to_string());
        self
    }

    /// Read a style declaration, including the composed `transform`
    pub fn style(&self, property: &str) -> Option<String> {
        lock(&self.state).declarations.get(property).cloned()
    }

    pub fn declarations(&self) -> BTreeMap<String, String> {
        lock(&self.state).declarations.clone()
    }
}

fn parse_declaration(raw: &str) -> Value {
    match raw.trim().parse::<f64>() {
        Ok(number) => Value::Number(number),
        Err(_) => Value::Text(raw.trim().to_string()),
    }
}

impl TargetAdapter for StyleTarget {
    fn current_value(&self, property: &str) -> Option<Value> {
        let state = lock(&self.state);
        match transform_function(property) {
            Some(function) => state.transforms.get(function).cloned(),
            None => state.declarations.get(property).map(|raw| parse_declaration(raw)),
        }
    }

    fn apply_values(&mut self, values: &PropertyValues) -> Result<()> {
        let mut state = lock(&self.state);
        let mut touched_transform = false;
        for (property, value) in values {
            match transform_function(property) {
                Some(function) => {
                    state.transforms.insert(function, value.clone());
                    touched_transform = true;
                }
                None => {
                    state.declarations.insert(property.clone(), value.to_string());
                }
            }
        }
        if touched_transform {
            state.compose_transform();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(entries: &[(&str, Value)]) -> PropertyValues {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_value("opacity"), Value::Number(1.0));
        assert_eq!(default_value("scale"), Value::Number(1.0));
        assert_eq!(default_value("rotate"), Value::from("0deg"));
        assert_eq!(default_value("translateY"), Value::from("0px"));
        assert_eq!(default_value("x"), Value::Number(0.0));
        assert_eq!(default_value("width"), Value::Number(0.0));
    }

    #[test]
    fn test_object_target_shares_storage() {
        let target = ObjectTarget::new().with("left", 5.0);
        let mut writer = target.clone();
        assert_eq!(writer.current_value("left"), Some(Value::Number(5.0)));
        assert_eq!(writer.current_value("top"), None);

        writer
            .apply_values(&batch(&[("left", 10.0.into()), ("top", "3px".into())]))
            .unwrap();
        assert_eq!(target.get("left"), Some(Value::Number(10.0)));
        assert_eq!(target.get("top"), Some(Value::from("3px")));
        assert_eq!(target.snapshot().len(), 2);
    }

    #[test]
    fn test_style_target_composes_transform() {
        let target = StyleTarget::new().with_style("opacity", "0.5");
        let mut writer = target.clone();
        assert_eq!(writer.current_value("opacity"), Some(Value::Number(0.5)));
        assert_eq!(writer.current_value("x"), None);

        writer
            .apply_values(&batch(&[
                ("x", 10.0.into()),
                ("rotate", "45deg".into()),
                ("scale", 1.5.into()),
                ("color", "rgba(0, 0, 0, 1)".into()),
            ]))
            .unwrap();

        assert_eq!(
            target.style("transform").as_deref(),
            Some("translateX(10px) rotate(45deg) scale(1.5)")
        );
        assert_eq!(target.style("color").as_deref(), Some("rgba(0, 0, 0, 1)"));
        assert_eq!(writer.current_value("translateX"), Some(Value::Number(10.0)));
        assert_eq!(writer.current_value("rotate"), Some(Value::from("45deg")));
    }
}
