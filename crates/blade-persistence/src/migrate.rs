//! Rewrites applied to raw state documents before they are parsed.
//!
//! There is no schema version in the document, so every rule here runs on
//! every load and must be a no-op on already-current data.

use serde_json::Value;

/// Status value written by older releases, now equivalent to `pending`.
pub const LEGACY_OPEN_STATUS: &str = "open";

/// Run every migration rule. Returns the number of rewritten fields.
pub fn migrate_document(document: &mut Value) -> usize {
    migrate_legacy_status(document)
}

/// Rewrite `status: "open"` to `"pending"` on every damage of every blade
/// of every turbine.
pub fn migrate_legacy_status(document: &mut Value) -> usize {
    let Some(turbines) = document.get_mut("turbines").and_then(Value::as_array_mut) else {
        return 0;
    };
    let mut rewritten = 0;
    for turbine in turbines {
        let Some(blades) = turbine.get_mut("blades").and_then(Value::as_array_mut) else {
            continue;
        };
        for blade in blades {
            let Some(damages) = blade.get_mut("damages").and_then(Value::as_array_mut) else {
                continue;
            };
            for damage in damages {
                if let Some(status) = damage.get_mut("status") {
                    if status.as_str() == Some(LEGACY_OPEN_STATUS) {
                        *status = Value::String("pending".to_string());
                        rewritten += 1;
                    }
                }
            }
        }
    }
    rewritten
}
