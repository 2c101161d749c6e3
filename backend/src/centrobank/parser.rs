use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::FeedError;

/// One plain rate record as the feed reports it. The fetch date is not part
/// of the record; the caller attaches it when building domain models.
#[derive(Debug, Clone, PartialEq)]
pub struct RateRecord {
    pub valute_id: String,
    pub num_code: i64,
    pub char_code: String,
    pub nominal: i64,
    pub name: String,
    pub value: f64,
}

/// Parsed `<ValCurs>` document: root attributes plus the rate records.
#[derive(Debug, Default)]
pub struct FeedDocument {
    pub date: Option<String>,
    pub name: Option<String>,
    pub rates: Vec<RateRecord>,
}

#[derive(Debug, Default)]
struct PartialRate {
    valute_id: String,
    num_code: Option<i64>,
    char_code: Option<String>,
    nominal: Option<i64>,
    name: Option<String>,
    value: Option<f64>,
}

#[derive(Debug, Clone, Copy)]
enum RateField {
    NumCode,
    CharCode,
    Nominal,
    Name,
    Value,
}

fn attribute(element: &BytesStart<'_>, name: &str) -> Result<Option<String>, FeedError> {
    match element.try_get_attribute(name)? {
        Some(attr) => {
            let value = attr.unescape_value().map_err(FeedError::Xml)?;
            Ok(Some(value.into_owned()))
        }
        None => Ok(None),
    }
}

fn parse_int(text: &str) -> Result<i64, FeedError> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| FeedError::Malformed(format!("expected an integer, got `{text}`")))
}

/// The feed writes decimals with a comma separator (`75,4571`).
fn parse_decimal(text: &str) -> Result<f64, FeedError> {
    text.trim()
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| FeedError::Malformed(format!("expected a decimal, got `{text}`")))
}

impl PartialRate {
    fn finish(self) -> Result<RateRecord, FeedError> {
        let missing = |field: &str| FeedError::Malformed(format!("Valute is missing <{field}>"));
        Ok(RateRecord {
            valute_id: self.valute_id,
            num_code: self.num_code.ok_or_else(|| missing("NumCode"))?,
            char_code: self.char_code.ok_or_else(|| missing("CharCode"))?,
            nominal: self.nominal.ok_or_else(|| missing("Nominal"))?,
            name: self.name.ok_or_else(|| missing("Name"))?,
            value: self.value.ok_or_else(|| missing("Value"))?,
        })
    }
}

/// Parses a `XML_daily` payload:
///
/// ```xml
/// <ValCurs Date="02.01.2020" name="Foreign Currency Market">
///   <Valute ID="R01235">
///     <NumCode>840</NumCode><CharCode>USD</CharCode>
///     <Nominal>1</Nominal><Name>Доллар США</Name><Value>61,9057</Value>
///   </Valute>
/// </ValCurs>
/// ```
pub fn parse_daily_rates(xml: &str) -> Result<FeedDocument, FeedError> {
    let mut reader = Reader::from_str(xml);

    let mut document = FeedDocument::default();
    let mut current: Option<PartialRate> = None;
    let mut field: Option<RateField> = None;

    loop {
        match reader.read_event()? {
            Event::Start(element) => match element.name().as_ref() {
                b"ValCurs" => {
                    document.date = attribute(&element, "Date")?;
                    document.name = attribute(&element, "name")?;
                }
                b"Valute" => {
                    current = Some(PartialRate {
                        valute_id: attribute(&element, "ID")?.unwrap_or_default(),
                        ..PartialRate::default()
                    });
                }
                b"NumCode" => field = Some(RateField::NumCode),
                b"CharCode" => field = Some(RateField::CharCode),
                b"Nominal" => field = Some(RateField::Nominal),
                b"Name" => field = Some(RateField::Name),
                b"Value" => field = Some(RateField::Value),
                _ => field = None,
            },
            Event::Text(text) => {
                if let (Some(rate), Some(field)) = (current.as_mut(), field) {
                    let text = text.unescape().map_err(FeedError::Xml)?;
                    match field {
                        RateField::NumCode => rate.num_code = Some(parse_int(&text)?),
                        RateField::CharCode => rate.char_code = Some(text.trim().to_string()),
                        RateField::Nominal => rate.nominal = Some(parse_int(&text)?),
                        RateField::Name => rate.name = Some(text.trim().to_string()),
                        RateField::Value => rate.value = Some(parse_decimal(&text)?),
                    }
                }
            }
            Event::End(element) => {
                if element.name().as_ref() == b"Valute" {
                    if let Some(rate) = current.take() {
                        document.rates.push(rate.finish()?);
                    }
                }
                field = None;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ValCurs Date="02.01.2020" name="Foreign Currency Market">
  <Valute ID="R01235">
    <NumCode>840</NumCode>
    <CharCode>USD</CharCode>
    <Nominal>1</Nominal>
    <Name>Доллар США</Name>
    <Value>61,9057</Value>
  </Valute>
  <Valute ID="R01239">
    <NumCode>978</NumCode>
    <CharCode>EUR</CharCode>
    <Nominal>1</Nominal>
    <Name>Евро</Name>
    <Value>69,3777</Value>
  </Valute>
</ValCurs>"#;

    #[test]
    fn parses_records_in_feed_order() {
        let document = parse_daily_rates(SAMPLE).unwrap();

        assert_eq!(document.rates.len(), 2);
        assert_eq!(
            document.rates[0],
            RateRecord {
                valute_id: "R01235".into(),
                num_code: 840,
                char_code: "USD".into(),
                nominal: 1,
                name: "Доллар США".into(),
                value: 61.9057,
            }
        );
        assert_eq!(document.rates[1].char_code, "EUR");
    }

    #[test]
    fn exposes_document_attributes() {
        let document = parse_daily_rates(SAMPLE).unwrap();
        assert_eq!(document.date.as_deref(), Some("02.01.2020"));
        assert_eq!(document.name.as_deref(), Some("Foreign Currency Market"));
    }

    #[test]
    fn comma_decimal_separator_is_normalized() {
        let document = parse_daily_rates(SAMPLE).unwrap();
        assert_eq!(document.rates[1].value, 69.3777);
    }

    #[test]
    fn missing_leaf_element_is_malformed() {
        let xml = r#"<ValCurs><Valute ID="R01235"><NumCode>840</NumCode></Valute></ValCurs>"#;
        let err = parse_daily_rates(xml).err().unwrap();
        assert!(matches!(err, FeedError::Malformed(_)));
        assert!(err.to_string().contains("CharCode"));
    }

    #[test]
    fn non_numeric_value_is_malformed() {
        let xml = r#"<ValCurs><Valute ID="x"><NumCode>oops</NumCode></Valute></ValCurs>"#;
        assert!(matches!(
            parse_daily_rates(xml).err().unwrap(),
            FeedError::Malformed(_)
        ));
    }

    #[test]
    fn attribute_values_are_unescaped() {
        let xml = r#"<ValCurs Date="02.01.2020" name="Market &amp; Rates"></ValCurs>"#;
        let document = parse_daily_rates(xml).unwrap();
        assert_eq!(document.name.as_deref(), Some("Market & Rates"));
    }

    #[test]
    fn empty_document_yields_no_rates() {
        let document = parse_daily_rates(r#"<ValCurs Date="01.01.2020"></ValCurs>"#).unwrap();
        assert!(document.rates.is_empty());
    }
}
