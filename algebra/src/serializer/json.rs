//! JSON serializer for the pattern catalog.
//!
//! Slots render as short strings (`mu`, `nu`, `0`, leg names, internal
//! names) so a dumped lookup such as `["g", "a", "prA"]` reads the way the
//! contraction is written by hand.

use serde_json::{json, Value};

use crate::model::{Catalog, Coefficient, ContractionPattern, Factor, Grouping, Slot};

/// Serializes the catalog to a JSON `Value`.
///
/// The returned value can be pretty-printed with [`serde_json::to_string_pretty`].
#[must_use]
pub fn to_json(catalog: &Catalog) -> Value {
    let patterns: Vec<Value> = catalog.patterns.iter().map(pattern_to_json).collect();
    json!({
        "version": catalog.version,
        "patterns": patterns
    })
}

/// Serializes one pattern.
#[must_use]
pub fn pattern_to_json(pattern: &ContractionPattern) -> Value {
    let name = |slot: Slot| slot_name(pattern, slot);
    let internals: Vec<Value> = pattern
        .internals
        .iter()
        .map(|i| json!({ "name": i.name, "start": i.start }))
        .collect();
    let restricted: Vec<Value> = pattern
        .restricted_pairs
        .iter()
        .map(|(x, y)| json!([name(*x), name(*y)]))
        .collect();
    let factors: Vec<Value> = pattern
        .factors
        .iter()
        .map(|f| match *f {
            Factor::Mixed(x, y, c) => {
                json!({ "kind": "mixed", "slots": [name(x), name(y)], "value": coefficient(c) })
            }
            Factor::Identity(x, c) => {
                json!({ "kind": "identity", "slots": [name(x)], "value": coefficient(c) })
            }
            Factor::Differ(x, y, c) => {
                json!({ "kind": "differ", "slots": [name(x), name(y)], "value": coefficient(c) })
            }
            Factor::Delta(x, y) => json!({ "kind": "delta", "slots": [name(x), name(y)] }),
            Factor::Constant(c) => json!({ "kind": "constant", "value": coefficient(c) }),
        })
        .collect();
    let products: Vec<Value> = pattern
        .products
        .iter()
        .map(|p| {
            let lookups: Vec<Value> = p
                .lookups
                .iter()
                .map(|l| json!([name(l[0]), name(l[1]), name(l[2])]))
                .collect();
            let operands: Vec<Value> = p
                .operands
                .iter()
                .map(|o| json!([name(o[0]), name(o[1])]))
                .collect();
            json!({ "lookups": lookups, "operands": operands })
        })
        .collect();
    let grouping = match pattern.grouping {
        Grouping::Legs => json!("legs"),
        Grouping::Internals(x, y) => json!([name(Slot::Internal(x)), name(Slot::Internal(y))]),
    };
    json!({
        "channel": pattern.channel.as_str(),
        "label": pattern.label,
        "comment": pattern.comment,
        "legs": pattern.legs,
        "internals": internals,
        "candidates": pattern.candidate_count(),
        "restrictedPairs": restricted,
        "factors": factors,
        "products": products,
        "grouping": grouping
    })
}

fn slot_name(pattern: &ContractionPattern, slot: Slot) -> String {
    match slot {
        Slot::Mu => "mu".to_owned(),
        Slot::Nu => "nu".to_owned(),
        Slot::Identity => "0".to_owned(),
        Slot::Leg(n) => pattern
            .legs
            .get(n)
            .map_or_else(|| format!("leg{n}"), |s| (*s).to_owned()),
        Slot::Internal(n) => pattern
            .internals
            .get(n)
            .map_or_else(|| format!("internal{n}"), |i| i.name.to_owned()),
    }
}

fn coefficient(c: Coefficient) -> Value {
    json!([c.re, c.im])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channels;

    #[test]
    fn s_channel_lookups_use_names() {
        let v = pattern_to_json(&channels::s::PATTERN);
        assert_eq!(v["channel"], "s");
        assert_eq!(v["products"][0]["lookups"][0], json!(["g", "a", "prA"]));
        assert_eq!(v["products"][0]["lookups"][1], json!(["mu", "g", "c"]));
        assert_eq!(v["candidates"], 4096);
    }

    #[test]
    fn rpa_grouping_names_internals() {
        let v = pattern_to_json(&channels::rpa::PATTERN);
        assert_eq!(v["grouping"], json!(["b", "c"]));
    }

    #[test]
    fn factors_carry_values() {
        let v = pattern_to_json(&channels::u::PATTERN);
        let factors = v["factors"].as_array().cloned().unwrap_or_default();
        assert!(factors
            .iter()
            .any(|f| f["kind"] == "differ" && f["value"] == json!([-1, 0])));
    }

    #[test]
    fn catalog_version() {
        let v = to_json(Catalog::full());
        assert_eq!(v["version"], env!("CARGO_PKG_VERSION"));
    }
}
