//! JSON signature: top-level key names of an object body.

use serde_json::Value;

/// Sorted top-level keys joined by newlines, or `None` if the body is not a
/// JSON object. Keys are sorted so the signature never depends on map
/// iteration order.
pub fn json_signature(body: &[u8]) -> Option<String> {
    match serde_json::from_slice::<Value>(body).ok()? {
        Value::Object(map) => {
            let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
            keys.sort_unstable();
            Some(keys.join("\n"))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_keys_different_order() {
        let d = json_signature(br#"{"status":"ok","data":[]}"#).unwrap();
        let e = json_signature(br#"{"data":[1,2],"status":"ok"}"#).unwrap();
        assert_eq!(d, e);
        assert_eq!(d, "data\nstatus");
    }

    #[test]
    fn nested_keys_ignored() {
        let a = json_signature(br#"{"a":{"x":1}}"#).unwrap();
        let b = json_signature(br#"{"a":{"y":2}}"#).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn non_object_rejected() {
        assert!(json_signature(b"[1,2,3]").is_none());
        assert!(json_signature(b"\"str\"").is_none());
        assert!(json_signature(b"{not json").is_none());
        assert!(json_signature(b"").is_none());
    }

    #[test]
    fn empty_object() {
        assert_eq!(json_signature(b"{}").as_deref(), Some(""));
    }
}
