use crate::constants::{CHANNEL_ACTIVE, CHANNEL_INACTIVE};
use serde::{Deserialize, Serialize};

/// One spreadsheet row as exported, cells in column order
pub type SourceRow = Vec<String>;

/// Normalized tour, serialized with the camelCase field names the tours API expects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourRecord {
    pub id: String,
    pub name: String,
    pub provider: String,
    pub location: String,

    // Shared adult economics
    pub net_rate: f64,
    pub factor_shared: f64,
    pub public_price: f64,

    pub net_child: f64,
    pub public_child: f64,

    /// Raw digits as found in the sheet, empty when there are none
    pub infant_age: String,
    pub min_pax_shared: u32,
    pub min_pax_private: u32,

    // Private economics
    pub net_private: f64,
    pub factor_private: f64,
    pub public_private: f64,

    pub last_update: String,

    pub images: Vec<String>,
    pub duration: String,
    pub ops_days: String,
    pub cxl_policy: String,
    pub landing_page_url: String,
    pub storytelling: String,
    pub meeting_point: String,
    pub extra_fees: String,

    pub channels: Channels,

    pub audit_notes: String,
}

/// Sales channel flags. GetYourGuide is never activated from the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channels {
    pub expedia: ChannelStatus,
    pub viator: ChannelStatus,
    pub gyg: ChannelStatus,
    pub civitatis: ChannelStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChannelStatus {
    Active,
    #[default]
    Inactive,
}

impl ChannelStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelStatus::Active => CHANNEL_ACTIVE,
            ChannelStatus::Inactive => CHANNEL_INACTIVE,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, ChannelStatus::Active)
    }
}

impl std::fmt::Display for ChannelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_channel_status_wire_format() {
        assert_eq!(serde_json::to_value(ChannelStatus::Active).unwrap(), json!("Active"));
        assert_eq!(serde_json::to_value(ChannelStatus::Inactive).unwrap(), json!("Inactive"));
        assert_eq!(ChannelStatus::default(), ChannelStatus::Inactive);
    }

    #[test]
    fn test_tour_record_uses_camel_case_keys() {
        let record = TourRecord {
            id: "T1".to_string(),
            name: "Holbox Tour".to_string(),
            provider: "Por Definir".to_string(),
            location: String::new(),
            net_rate: 85.0,
            factor_shared: 1.4,
            public_price: 120.0,
            net_child: 0.0,
            public_child: 0.0,
            infant_age: "4".to_string(),
            min_pax_shared: 1,
            min_pax_private: 2,
            net_private: 0.0,
            factor_private: 0.0,
            public_private: 0.0,
            last_update: String::new(),
            images: vec!["a.jpg".to_string()],
            duration: String::new(),
            ops_days: String::new(),
            cxl_policy: String::new(),
            landing_page_url: String::new(),
            storytelling: String::new(),
            meeting_point: String::new(),
            extra_fees: String::new(),
            channels: Channels {
                expedia: ChannelStatus::Active,
                viator: ChannelStatus::Inactive,
                gyg: ChannelStatus::Inactive,
                civitatis: ChannelStatus::Inactive,
            },
            audit_notes: String::new(),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["netRate"], json!(85.0));
        assert_eq!(value["publicPrice"], json!(120.0));
        assert_eq!(value["minPaxPrivate"], json!(2));
        assert_eq!(value["landingPageUrl"], json!(""));
        assert_eq!(value["channels"]["expedia"], json!("Active"));
        assert_eq!(value["channels"]["gyg"], json!("Inactive"));
        assert!(value.get("net_rate").is_none());
    }
}
