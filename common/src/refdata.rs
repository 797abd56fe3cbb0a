//! Static reference tables the record synthesizer draws from.
//!
//! All of this is demonstration data: the farms, plants and warehouses are
//! descriptive strings, not pointers into any real supply chain.

/// Product descriptors keyed by variety.
#[derive(Debug)]
pub struct VarietyInfo {
    pub key: &'static str,
    pub product_name: &'static str,
    pub grade: &'static str,
    /// Long-grain varieties get an average grain length in the quality report.
    pub long_grain: bool,
}

pub const VARIETIES: &[VarietyInfo] = &[
    VarietyInfo {
        key: "SonaMasoori",
        product_name: "MKRM Sona Masoori Premium Rice",
        grade: "Premium",
        long_grain: false,
    },
    VarietyInfo {
        key: "Basmati",
        product_name: "MKRM Classic Basmati Rice",
        grade: "Export Grade A",
        long_grain: true,
    },
    VarietyInfo {
        key: "Kolam",
        product_name: "MKRM Wada Kolam Rice",
        grade: "Premium",
        long_grain: false,
    },
    VarietyInfo {
        key: "BrownRice",
        product_name: "MKRM Whole Grain Brown Rice",
        grade: "Organic",
        long_grain: false,
    },
];

/// Farm, plant and warehouse descriptors keyed by origin location.
#[derive(Debug)]
pub struct OriginInfo {
    pub key: &'static str,
    pub farm_name: &'static str,
    pub map_reference: &'static str,
    pub milling_facility: &'static str,
    pub warehouse: &'static str,
}

pub const ORIGINS: &[OriginInfo] = &[
    OriginInfo {
        key: "Chattisgarh",
        farm_name: "Baloda Bazar Cooperative Farms, Chattisgarh",
        map_reference: "21.66 N, 82.16 E",
        milling_facility: "MKRM Milling Unit I, Raipur",
        warehouse: "MKRM Central Warehouse, Raipur",
    },
    OriginInfo {
        key: "Punjab",
        farm_name: "Sangrur Growers Collective, Punjab",
        map_reference: "30.25 N, 75.84 E",
        milling_facility: "MKRM Milling Unit II, Ludhiana",
        warehouse: "MKRM Regional Warehouse, Ludhiana",
    },
    OriginInfo {
        key: "Haryana",
        farm_name: "Karnal Basmati Estates, Haryana",
        map_reference: "29.69 N, 76.99 E",
        milling_facility: "MKRM Milling Unit III, Karnal",
        warehouse: "MKRM Regional Warehouse, Karnal",
    },
    OriginInfo {
        key: "AndhraPradesh",
        farm_name: "Godavari Delta Farms, Andhra Pradesh",
        map_reference: "16.57 N, 81.78 E",
        milling_facility: "MKRM Milling Unit IV, Eluru",
        warehouse: "MKRM Regional Warehouse, Vijayawada",
    },
    OriginInfo {
        key: "WestBengal",
        farm_name: "Burdwan Paddy Cooperative, West Bengal",
        map_reference: "23.24 N, 87.86 E",
        milling_facility: "MKRM Milling Unit V, Burdwan",
        warehouse: "MKRM Regional Warehouse, Kolkata",
    },
];

/// Certifications, selected per batch by milling day-of-month modulo length.
pub const CERTIFICATIONS: &[&str] = &[
    "FSSAI Certified",
    "ISO 22000:2018",
    "AGMARK Grade A",
    "APEDA Registered",
    "India Organic (NPOP)",
];

/// Look up a variety. The key matches with or without internal whitespace,
/// so both `SonaMasoori` and `Sona Masoori` resolve the same entry.
pub fn variety(key: &str) -> Option<&'static VarietyInfo> {
    let squashed: String = key.chars().filter(|c| !c.is_whitespace()).collect();
    VARIETIES.iter().find(|v| v.key == key || v.key == squashed)
}

/// Look up an origin location by exact key.
pub fn origin(key: &str) -> Option<&'static OriginInfo> {
    ORIGINS.iter().find(|o| o.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variety_lookup_ignores_internal_whitespace() {
        assert_eq!(
            variety("Sona Masoori").map(|v| v.key),
            variety("SonaMasoori").map(|v| v.key),
        );
        assert!(variety("SonaMasoori").is_some());
    }

    #[test]
    fn unknown_keys_return_none() {
        assert!(variety("Jasmine").is_none());
        assert!(origin("Atlantis").is_none());
    }

    #[test]
    fn basmati_is_the_long_grain_variety() {
        assert!(variety("Basmati").unwrap().long_grain);
        assert!(!variety("Kolam").unwrap().long_grain);
    }

    #[test]
    fn certification_list_is_non_empty() {
        assert!(!CERTIFICATIONS.is_empty());
    }
}
