//! The nested key-value accumulator shared by every builder
//!
//! A [`Dict`] is a JSON object. Builders mutate it through the helpers in
//! this module so the shape rules (promotion, get-or-create, union merge)
//! live in one place.

use serde_json::Value;

/// JSON object keyed by string
pub type Dict = serde_json::Map<String, Value>;

/// Serialize a dict to compact JSON text
///
/// Keys are emitted in sorted order. Characters such as `&`, `<` and `>`
/// are written literally.
pub fn to_string(dict: &Dict) -> String {
    // String keys and JSON values always encode
    serde_json::to_string(dict).unwrap_or_else(|e| unreachable!("dict encoding failed: {e}"))
}

/// Combine the value already stored under a key with a newly added one
///
/// - nothing stored: the new value is stored as is
/// - an array stored: the new value is appended
/// - anything else stored: both become a two-element array, in call order
pub fn promote(existing: Option<Value>, next: Value) -> Value {
    match existing {
        None => next,
        Some(Value::Array(mut items)) => {
            items.push(next);
            Value::Array(items)
        }
        Some(previous) => Value::Array(vec![previous, next]),
    }
}

/// Insert `value` under `key`, promoting to an array on collision
pub fn insert_promoted(dict: &mut Dict, key: &str, value: Value) {
    let existing = dict.remove(key);
    dict.insert(key.to_string(), promote(existing, value));
}

/// Get the object stored under `key`, creating it if absent
///
/// A non-object value under `key` is replaced by an empty object.
pub fn object_entry<'a>(dict: &'a mut Dict, key: &str) -> &'a mut Dict {
    let slot = dict
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Dict::new()));
    if !slot.is_object() {
        *slot = Value::Object(Dict::new());
    }
    match slot {
        Value::Object(map) => map,
        _ => unreachable!("slot holds an object"),
    }
}

/// Get the array stored under `key`, creating it if absent
///
/// A non-array value under `key` becomes the first element of the array.
pub fn array_entry<'a>(dict: &'a mut Dict, key: &str) -> &'a mut Vec<Value> {
    let slot = dict
        .entry(key.to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    if !slot.is_array() {
        let previous = slot.take();
        *slot = Value::Array(vec![previous]);
    }
    match slot {
        Value::Array(items) => items,
        _ => unreachable!("slot holds an array"),
    }
}

/// Collect a multi-valued field: an array, or `null` when there are no values
pub fn multiple<I, V>(values: I) -> Value
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    let values: Vec<Value> = values.into_iter().map(Into::into).collect();
    if values.is_empty() {
        Value::Null
    } else {
        Value::Array(values)
    }
}

/// Copy every key of `src` into `dst`, overwriting keys present in both
pub fn merge(dst: &mut Dict, src: Dict) {
    for (key, value) in src {
        dst.insert(key, value);
    }
}

/// Wrap a body under a single key: `{name: body}`
pub fn single(name: &str, body: Value) -> Dict {
    let mut dict = Dict::new();
    dict.insert(name.to_string(), body);
    dict
}
