use crate::constants::{columns, DEFAULT_NAME_PREFIX, DEFAULT_PROVIDER};
use crate::parser::{
    channel_status, extract_number, parse_currency, parse_factor, parse_images, parse_min_pax,
    text_cell,
};
use crate::types::{ChannelStatus, Channels, TourRecord};

/// Maps one fixed-layout spreadsheet row to a [`TourRecord`].
#[derive(Debug, Default, Clone, Copy)]
pub struct RowNormalizer;

impl RowNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Returns `None` when the id column is blank. Every other field falls
    /// back to its default independently.
    pub fn normalize(&self, row: &[String]) -> Option<TourRecord> {
        let id = text_cell(row, columns::ID);
        if id.is_empty() {
            return None;
        }

        let cell = |index: usize| row.get(index).map(String::as_str).unwrap_or("");

        let name = non_empty_or(text_cell(row, columns::NAME), || {
            format!("{DEFAULT_NAME_PREFIX}{id}")
        });
        let provider = non_empty_or(text_cell(row, columns::PROVIDER), || {
            DEFAULT_PROVIDER.to_string()
        });

        Some(TourRecord {
            name,
            provider,
            location: text_cell(row, columns::LOCATION),

            net_rate: parse_currency(cell(columns::NET_RATE)),
            factor_shared: parse_factor(cell(columns::FACTOR_SHARED)),
            public_price: parse_currency(cell(columns::PUBLIC_PRICE)),

            net_child: parse_currency(cell(columns::NET_CHILD)),
            public_child: parse_currency(cell(columns::PUBLIC_CHILD)),

            infant_age: extract_number(cell(columns::INFANT_AGE)),
            min_pax_shared: parse_min_pax(cell(columns::MIN_PAX_SHARED)),
            min_pax_private: parse_min_pax(cell(columns::MIN_PAX_PRIVATE)),

            net_private: parse_currency(cell(columns::NET_PRIVATE)),
            factor_private: parse_factor(cell(columns::FACTOR_PRIVATE)),
            public_private: parse_currency(cell(columns::PUBLIC_PRIVATE)),

            last_update: text_cell(row, columns::LAST_UPDATE),

            images: parse_images(cell(columns::IMAGES)),
            duration: text_cell(row, columns::DURATION),
            ops_days: text_cell(row, columns::OPS_DAYS),
            cxl_policy: text_cell(row, columns::CXL_POLICY),
            landing_page_url: text_cell(row, columns::LANDING_PAGE_URL),
            storytelling: text_cell(row, columns::STORYTELLING),
            meeting_point: text_cell(row, columns::MEETING_POINT),
            extra_fees: text_cell(row, columns::EXTRA_FEES),

            channels: Channels {
                expedia: channel_status(cell(columns::EXPEDIA_STATUS)),
                viator: channel_status(cell(columns::VIATOR_STATUS)),
                gyg: ChannelStatus::Inactive,
                civitatis: channel_status(cell(columns::CIVITATIS_STATUS)),
            },

            audit_notes: text_cell(row, columns::AUDIT_NOTES),
            id,
        })
    }
}

fn non_empty_or(value: String, fallback: impl FnOnce() -> String) -> String {
    if value.is_empty() {
        fallback()
    } else {
        value
    }
}
