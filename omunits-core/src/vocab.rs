//! Ontology of Units of Measure (OM 2.0) vocabulary

/// OM 2.0 namespace
pub const OM2: &str = "http://www.ontology-of-units-of-measure.org/resource/om-2/";

pub const PERCENT: &str = "http://www.ontology-of-units-of-measure.org/resource/om-2/percent";

pub const THERMODYNAMIC_TEMPERATURE_DIMENSION: &str =
    "http://www.ontology-of-units-of-measure.org/resource/om-2/thermodynamicTemperature-Dimension";

/// Quantity marking information-capacity units (bit and friends)
pub const INFORMATION_CAPACITY: &str =
    "http://www.ontology-of-units-of-measure.org/resource/om-2/informationCapacityOfOneBinaryDigit";

/// Local part of an IRI: what follows the OM namespace, else the last `/` or `#`
pub fn local_name(iri: &str) -> &str {
    if let Some(rest) = iri.strip_prefix(OM2) {
        return rest;
    }
    match iri.rfind(|c: char| c == '/' || c == '#') {
        Some(pos) => &iri[pos + 1..],
        None => iri,
    }
}

/// Expand a bare name against `base`; full IRIs pass through
pub fn expand(base: &str, name: &str) -> String {
    if name.contains(':') {
        name.to_string()
    } else {
        format!("{}{}", base, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(PERCENT), "percent");
        assert_eq!(local_name("http://example.org/units#foot"), "foot");
        assert_eq!(local_name("metre"), "metre");
    }

    #[test]
    fn test_expand() {
        assert_eq!(expand(OM2, "metre"), format!("{}metre", OM2));
        assert_eq!(expand(OM2, PERCENT), PERCENT);
    }
}
