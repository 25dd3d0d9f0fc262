//! Shared fixtures for integration tests

#![allow(dead_code)]

/// The end-to-end example: three well-formed lines around CD3.
pub const CD3_MAP: &str =
    "PRE:ITAM:signal motif\nPOST:CAR-T:manufacturing use\nISSUE:exhaustion:durability loss";

/// Wrap graph lines in the causal layout with detail and gate questions.
pub fn causal_text(map: &str) -> String {
    format!(
        "Here is the analysis.\n\n=== MAP ===\n{}\n\n=== DETAIL ===\n- PRE: the doorbell that tells the cell it has found something\n- POST: engineered T cells borrow this switch\n- ISSUE: cells that ring too often stop answering\n\n=== GATES ===\nQ_POST: Why does a signalling motif matter for a manufactured therapy?\nQ_ISSUE: What does constant signalling do to durability?\n",
        map
    )
}

/// Tiered layout: one detail section per level.
pub fn tiered_text(map: &str) -> String {
    format!(
        "=== MAP ===\n{}\n=== LV1 ===\nA doorbell.\n=== LV3 ===\nITAM phosphorylation recruits ZAP-70.\n=== LV5 ===\nExhaustion limits CAR-T persistence.\n=== GATES ===\nQ_Lv3: Why does the doorbell need a wire?\nQ_Lv5: Why does the wire wear out?\n",
        map
    )
}
