//! Common test fixtures for the forecast workspace.
//!
//! Small but structurally faithful copies of the two IMS feeds. Both are
//! UTF-8 with a UTF-8 declaration; use [`iso_8859_8_feed`] to get the bytes
//! as the service actually publishes them.

/// Date forecast for every location in [`SAMPLE_CITIES_XML`].
pub const SAMPLE_DATE: &str = "2025-12-04";

/// Second date, which only some locations forecast.
pub const SAMPLE_NEXT_DATE: &str = "2025-12-05";

/// Cities feed with three locations.
///
/// * Haifa forecasts both dates completely.
/// * Tel Aviv - Yafo forecasts both dates but has no weather code on the second.
/// * Eilat forecasts only the first date, with a decimal maximum temperature.
pub const SAMPLE_CITIES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<LocationForecasts>
  <Identification>
    <Organization>Israel Meteorological Service</Organization>
    <Title>Cities forecast</Title>
    <IssueDateTime>2025-12-04 06:00</IssueDateTime>
  </Identification>
  <Location>
    <LocationMetaData>
      <LocationId>115</LocationId>
      <LocationNameEng>Haifa</LocationNameEng>
      <LocationNameHeb>חיפה</LocationNameHeb>
      <DisplayLat>32.794</DisplayLat>
      <DisplayLon>34.989</DisplayLon>
    </LocationMetaData>
    <LocationData>
      <TimeUnitData>
        <Date>2025-12-04</Date>
        <Element>
          <ElementName>Maximum temperature</ElementName>
          <ElementValue>22</ElementValue>
        </Element>
        <Element>
          <ElementName>Minimum temperature</ElementName>
          <ElementValue>15</ElementValue>
        </Element>
        <Element>
          <ElementName>Weather code</ElementName>
          <ElementValue>1220</ElementValue>
        </Element>
      </TimeUnitData>
      <TimeUnitData>
        <Date>2025-12-05</Date>
        <Element>
          <ElementName>Maximum temperature</ElementName>
          <ElementValue>21</ElementValue>
        </Element>
        <Element>
          <ElementName>Minimum temperature</ElementName>
          <ElementValue>14</ElementValue>
        </Element>
        <Element>
          <ElementName>Weather code</ElementName>
          <ElementValue>1530</ElementValue>
        </Element>
      </TimeUnitData>
    </LocationData>
  </Location>
  <Location>
    <LocationMetaData>
      <LocationId>402</LocationId>
      <LocationNameEng>Tel Aviv - Yafo</LocationNameEng>
      <LocationNameHeb>תל אביב - יפו</LocationNameHeb>
      <DisplayLat>32.08</DisplayLat>
      <DisplayLon>34.78</DisplayLon>
    </LocationMetaData>
    <LocationData>
      <TimeUnitData>
        <Date>2025-12-04</Date>
        <Element>
          <ElementName>Maximum temperature</ElementName>
          <ElementValue>24</ElementValue>
        </Element>
        <Element>
          <ElementName>Minimum temperature</ElementName>
          <ElementValue>16</ElementValue>
        </Element>
        <Element>
          <ElementName>Weather code</ElementName>
          <ElementValue>1250</ElementValue>
        </Element>
      </TimeUnitData>
      <TimeUnitData>
        <Date>2025-12-05</Date>
        <Element>
          <ElementName>Maximum temperature</ElementName>
          <ElementValue>23</ElementValue>
        </Element>
        <Element>
          <ElementName>Minimum temperature</ElementName>
          <ElementValue>17</ElementValue>
        </Element>
      </TimeUnitData>
    </LocationData>
  </Location>
  <Location>
    <LocationMetaData>
      <LocationId>520</LocationId>
      <LocationNameEng>Eilat</LocationNameEng>
      <LocationNameHeb>אילת</LocationNameHeb>
      <DisplayLat>29.55</DisplayLat>
      <DisplayLon>34.95</DisplayLon>
    </LocationMetaData>
    <LocationData>
      <TimeUnitData>
        <Date>2025-12-04</Date>
        <Element>
          <ElementName>Maximum temperature</ElementName>
          <ElementValue>27.6</ElementValue>
        </Element>
        <Element>
          <ElementName>Minimum temperature</ElementName>
          <ElementValue>18</ElementValue>
        </Element>
        <Element>
          <ElementName>Weather code</ElementName>
          <ElementValue>1580</ElementValue>
        </Element>
      </TimeUnitData>
    </LocationData>
  </Location>
</LocationForecasts>
"#;

/// Hebrew description of [`SAMPLE_DATE`] in [`SAMPLE_COUNTRY_XML`].
pub const SAMPLE_DESCRIPTION_HEB: &str = "מעונן חלקית. ללא שינוי ניכר בטמפרטורות.";

/// English description of [`SAMPLE_NEXT_DATE`], which has no Hebrew wording.
pub const SAMPLE_NEXT_DESCRIPTION: &str = "Partly cloudy, light rain in the north.";

/// Country feed with two days.
pub const SAMPLE_COUNTRY_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<CountryForecast>
  <Identification>
    <Organization>Israel Meteorological Service</Organization>
    <Title>Country forecast</Title>
  </Identification>
  <Location>
    <LocationData>
      <TimeUnitData>
        <Date>2025-12-04</Date>
        <Element>
          <ElementName>Weather in Hebrew</ElementName>
          <ElementValue>מעונן חלקית. ללא שינוי ניכר בטמפרטורות.</ElementValue>
        </Element>
        <Element>
          <ElementName>Weather</ElementName>
          <ElementValue>Partly cloudy, no significant change in temperatures.</ElementValue>
        </Element>
      </TimeUnitData>
      <TimeUnitData>
        <Date>2025-12-05</Date>
        <Element>
          <ElementName>Weather</ElementName>
          <ElementValue>Partly cloudy, light rain in the north.</ElementValue>
        </Element>
      </TimeUnitData>
    </LocationData>
  </Location>
</CountryForecast>
"#;

/// Re-encode a UTF-8 fixture the way IMS serves it: ISO-8859-8 bytes with an
/// ISO-8859-8 declaration.
///
/// # Panics
///
/// Panics if the text holds characters ISO-8859-8 cannot represent.
pub fn iso_8859_8_feed(xml: &str) -> Vec<u8> {
    let declared = xml.replacen(
        r#"encoding="UTF-8""#,
        r#"encoding="ISO-8859-8""#,
        1,
    );
    let (bytes, _, had_errors) = encoding_rs::ISO_8859_8.encode(&declared);
    assert!(!had_errors, "fixture is not representable in ISO-8859-8");
    bytes.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_feed_declares_encoding() {
        let raw = iso_8859_8_feed(SAMPLE_CITIES_XML);
        assert!(raw.starts_with(br#"<?xml version="1.0" encoding="ISO-8859-8"?>"#));
    }

    #[test]
    fn test_iso_feed_is_single_byte_hebrew() {
        let raw = iso_8859_8_feed("<n>חיפה</n>");
        assert_eq!(raw, b"<n>\xE7\xE9\xF4\xE4</n>");
    }

    #[test]
    fn test_fixtures_mention_sample_dates() {
        assert!(SAMPLE_CITIES_XML.contains(SAMPLE_DATE));
        assert!(SAMPLE_CITIES_XML.contains(SAMPLE_NEXT_DATE));
        assert!(SAMPLE_COUNTRY_XML.contains(SAMPLE_DESCRIPTION_HEB));
    }
}
