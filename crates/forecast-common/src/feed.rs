//! The two IMS XML feeds the story is built from.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const IMS_XML_BASE: &str = "https://ims.gov.il/sites/default/files/ims_data/xml_files";

/// Which IMS feed a file or download belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedKind {
    /// Per-city daily forecast (`isr_cities.xml`)
    Cities,
    /// Country-wide textual forecast (`isr_country.xml`)
    Country,
}

impl FeedKind {
    pub const ALL: [FeedKind; 2] = [FeedKind::Cities, FeedKind::Country];

    /// Upstream feed URL.
    pub fn default_url(&self) -> String {
        format!("{}/{}", IMS_XML_BASE, self.remote_file_name())
    }

    fn remote_file_name(&self) -> &'static str {
        match self {
            FeedKind::Cities => "isr_cities.xml",
            FeedKind::Country => "isr_country.xml",
        }
    }

    /// Name of the converted copy kept at the project root.
    pub fn current_file_name(&self) -> &'static str {
        match self {
            FeedKind::Cities => "isr_cities_utf8.xml",
            FeedKind::Country => "isr_country_utf8.xml",
        }
    }

    /// Prefix of dated archive copies, e.g. `isr_cities_2025-10-15.xml`.
    pub fn archive_prefix(&self) -> &'static str {
        match self {
            FeedKind::Cities => "isr_cities_",
            FeedKind::Country => "isr_country_",
        }
    }

    pub fn archive_file_name(&self, date: NaiveDate) -> String {
        format!("{}{}.xml", self.archive_prefix(), date.format("%Y-%m-%d"))
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedKind::Cities => write!(f, "cities"),
            FeedKind::Country => write!(f, "country"),
        }
    }
}
