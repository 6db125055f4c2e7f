//! Typed deserialization for the PubChem PropertyTable API response.
//!
//! Only the properties the resolver's output-kind map (§4.2) can request are
//! modeled here: `CID`, `CanonicalSMILES`, `InChI`, `IUPACName`, `InChIKey`,
//! `Title`, `IsomericSMILES`. Unrequested properties are simply absent from
//! the response and deserialize as `None`.

use serde::{Deserialize, Serialize};

/// One row of the PubChem PropertyTable response.
///
/// All fields except [`cid`](Self::cid) are `Option<T>` because the API only
/// returns the properties that were requested in the property path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompoundProperties {
    #[serde(rename = "CID")]
    pub cid: u64,

    #[serde(rename = "CanonicalSMILES", default)]
    pub canonical_smiles: Option<String>,

    #[serde(rename = "IsomericSMILES", default)]
    pub isomeric_smiles: Option<String>,

    #[serde(rename = "InChI", default)]
    pub inchi: Option<String>,

    #[serde(rename = "InChIKey", default)]
    pub inchikey: Option<String>,

    #[serde(rename = "IUPACName", default)]
    pub iupac_name: Option<String>,

    #[serde(rename = "Title", default)]
    pub title: Option<String>,
}

/// Wrapper for the PubChem PropertyTable API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyTableResponse {
    #[serde(rename = "PropertyTable")]
    pub property_table: PropertyTable,
}

/// Container for a list of compound property rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyTable {
    #[serde(rename = "Properties")]
    pub properties: Vec<CompoundProperties>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASPIRIN_FIXTURE: &str = r#"{
        "PropertyTable": {
            "Properties": [{
                "CID": 2244,
                "CanonicalSMILES": "CC(=O)OC1=CC=CC=C1C(=O)O",
                "InChI": "InChI=1S/C9H8O4/c1-6(10)13-8-5-3-2-4-7(8)9(11)12/h2-5H,1H3,(H,11,12)",
                "InChIKey": "BSYNRYMUTXBXSQ-UHFFFAOYSA-N",
                "IUPACName": "2-acetyloxybenzoic acid",
                "Title": "Aspirin"
            }]
        }
    }"#;

    #[test]
    fn deserialize_property_table_response() {
        let response: PropertyTableResponse =
            serde_json::from_str(ASPIRIN_FIXTURE).expect("should deserialize");
        assert_eq!(response.property_table.properties.len(), 1);
    }

    #[test]
    fn deserialize_cid_and_string_fields() {
        let response: PropertyTableResponse = serde_json::from_str(ASPIRIN_FIXTURE).unwrap();
        let props = &response.property_table.properties[0];
        assert_eq!(props.cid, 2244);
        assert_eq!(
            props.canonical_smiles.as_deref(),
            Some("CC(=O)OC1=CC=CC=C1C(=O)O")
        );
        assert_eq!(
            props.inchikey.as_deref(),
            Some("BSYNRYMUTXBXSQ-UHFFFAOYSA-N")
        );
        assert_eq!(props.iupac_name.as_deref(), Some("2-acetyloxybenzoic acid"));
    }

    #[test]
    fn unrequested_properties_are_none() {
        let json = r#"{
            "PropertyTable": {
                "Properties": [{
                    "CID": 962,
                    "InChIKey": "XLYOFNOQVPJJNP-UHFFFAOYSA-N"
                }]
            }
        }"#;
        let response: PropertyTableResponse =
            serde_json::from_str(json).expect("should handle partial properties");
        let props = &response.property_table.properties[0];
        assert_eq!(props.cid, 962);
        assert!(props.canonical_smiles.is_none());
        assert!(props.iupac_name.is_none());
    }

    #[test]
    fn serialize_roundtrip() {
        let response: PropertyTableResponse = serde_json::from_str(ASPIRIN_FIXTURE).unwrap();
        let serialized = serde_json::to_string(&response).unwrap();
        let deserialized: PropertyTableResponse = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized.property_table.properties[0].cid, 2244);
    }
}
