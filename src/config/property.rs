/// Property file recognition
///
/// Test-Comp property files are matched verbatim against the specification
/// strings below. The first matching entry wins, so coverage variants are
/// listed before the reachability ones.
use crate::config::types::{PropertyCategory, Result, WrapperError};
use std::path::Path;

/// Recognised property specifications, in priority order
pub const PROPERTY_TABLE: [(&str, PropertyCategory); 5] = [
    (
        "COVER( init(main()), FQL(COVER EDGES(@DECISIONEDGE)) )",
        PropertyCategory::Coverage,
    ),
    (
        "COVER( init(main()), FQL(COVER EDGES(@CONDITIONEDGE)) )",
        PropertyCategory::Coverage,
    ),
    (
        "COVER( init(main()), FQL(COVER EDGES(@BASICBLOCKENTRY)) )",
        PropertyCategory::Coverage,
    ),
    (
        "COVER( init(main()), FQL(COVER EDGES(@CALL(__VERIFIER_error))) )",
        PropertyCategory::Reachability,
    ),
    (
        "CHECK( init(main()), LTL(G ! call(__VERIFIER_error())) )",
        PropertyCategory::Reachability,
    ),
];

/// Resolve the property category from property-file text
pub fn resolve_category(content: &str) -> Result<PropertyCategory> {
    PROPERTY_TABLE
        .iter()
        .find(|(spec, _)| content.contains(spec))
        .map(|(_, category)| *category)
        .ok_or(WrapperError::UnsupportedProperty)
}

/// Read a property file and resolve its category
pub fn read_category(path: &Path) -> Result<PropertyCategory> {
    let content =
        std::fs::read_to_string(path).map_err(|source| WrapperError::PropertyUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

    let category = resolve_category(&content)?;
    log::debug!("Property {} resolved to {}", path.display(), category);
    Ok(category)
}
