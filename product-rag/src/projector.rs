//! Document projector: renders each product into three text views.
//!
//! Output is a pure function of the record. Spec entries render in the
//! order they appear in the catalog file.

use crate::record::{DocMetadata, DocType, ProductRecord, ProjectedDocument};

/// Display labels for known spec keys. Unknown keys render as-is.
const SPEC_LABELS: &[(&str, &str)] = &[
    ("processor", "Processor"),
    ("ram", "Memory"),
    ("storage", "Storage"),
    ("display", "Display"),
    ("battery", "Battery"),
    ("ports", "Ports"),
    ("noise_cancellation", "Noise Cancellation"),
    ("battery_life", "Battery Life"),
    ("bluetooth", "Bluetooth Version"),
    ("weight", "Weight"),
    ("features", "Features"),
];

/// Label for a spec key, falling back to the raw key.
pub fn spec_label(key: &str) -> &str {
    SPEC_LABELS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| *label)
        .unwrap_or(key)
}

/// One `Label: value` line per spec entry.
pub fn format_specs(record: &ProductRecord) -> String {
    record
        .specs
        .iter()
        .map(|(key, value)| format!("{}: {}", spec_label(key), value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Short representation used for listings and the `basic_info` view.
pub fn format_basic_info(record: &ProductRecord) -> String {
    format!(
        "Product name: {}\nCategory: {}\nPrice: {}\nStock: {} units",
        record.name,
        record.category,
        record.price_display(),
        record.stock
    )
}

/// Full spec listing used by spec lookups and spec re-expansion.
pub fn format_spec_listing(record: &ProductRecord) -> String {
    format!("{} specifications:\n\n{}", record.name, format_specs(record))
}

/// Projects a record into `basic_info`, `specs` and `description` documents,
/// always in that order.
pub fn project(record: &ProductRecord) -> Vec<ProjectedDocument> {
    let doc = |doc_type: DocType, content: String| ProjectedDocument {
        content,
        metadata: DocMetadata {
            id: record.id.clone(),
            name: record.name.clone(),
            doc_type,
        },
    };

    vec![
        doc(DocType::BasicInfo, format_basic_info(record)),
        doc(
            DocType::Specs,
            format!(
                "Product name: {}\nFull specifications:\n{}",
                record.name,
                format_specs(record)
            ),
        ),
        doc(
            DocType::Description,
            format!(
                "Product name: {}\nDescription: {}\nWarranty: {}",
                record.name, record.description, record.warranty
            ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::SpecValue;
    use crate::testing::{record, sample_records};

    #[test]
    fn projects_three_views_in_fixed_order() {
        for r in sample_records() {
            let docs = project(&r);
            let types: Vec<_> = docs.iter().map(|d| d.metadata.doc_type).collect();
            assert_eq!(types, [DocType::BasicInfo, DocType::Specs, DocType::Description]);
            assert!(docs.iter().all(|d| d.metadata.id == r.id && d.metadata.name == r.name));
        }
    }

    #[test]
    fn projection_is_deterministic() {
        let mut r = record("p3", "BudsZ", "headphone", 3);
        r.specs.insert("weight".into(), SpecValue::Text("5g".into()));
        r.specs.insert("bluetooth".into(), SpecValue::Text("5.3".into()));
        r.specs.insert(
            "features".into(),
            SpecValue::List(vec!["ANC".into(), "IPX4".into()]),
        );
        assert_eq!(project(&r), project(&r.clone()));
    }

    #[test]
    fn specs_use_labels_and_join_lists() {
        let mut r = record("p3", "BudsZ", "headphone", 3);
        r.specs.insert(
            "features".into(),
            SpecValue::List(vec!["ANC".into(), "IPX4".into()]),
        );
        r.specs.insert("color".into(), SpecValue::Text("black".into()));
        assert_eq!(format_specs(&r), "Features: ANC, IPX4\ncolor: black");
    }

    #[test]
    fn bundled_catalog_specs_follow_file_order() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../data/products.json");
        let catalog = crate::catalog::Catalog::load(&path).expect("bundled catalog");
        let phone = catalog.get_by_id("phone-001").expect("phone-001");
        assert_eq!(
            format_specs(phone),
            "Processor: Octa-core 3.2GHz\n\
             Memory: 12GB\n\
             Storage: 256GB\n\
             Display: 6.7 inch AMOLED 120Hz\n\
             Battery: 5000mAh\n\
             Features: 5G, wireless charging, IP68 water resistance"
        );
    }

    #[test]
    fn spec_listing_has_header() {
        let r = &sample_records()[0];
        assert_eq!(format_spec_listing(r), "PhoneX specifications:\n\nMemory: 8GB");
    }
}
