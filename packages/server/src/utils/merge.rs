use serde_json::{Map, Value};

/// Merge a patch object into an existing JSON value, one level deep.
///
/// Patch keys are inserted or overwritten; keys absent from the patch are
/// preserved. Values are replaced wholesale — nested objects are not merged
/// recursively. A non-object base is discarded and treated as empty.
pub fn shallow_merge(base: &Value, patch: &Map<String, Value>) -> Value {
    let mut merged = match base {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    };

    for (key, value) in patch {
        merged.insert(key.clone(), value.clone());
    }

    Value::Object(merged)
}
