//! Title extraction from RSS 2.0 and Atom documents.
//!
//! Only the first `<title>` of each `<item>` / `<entry>` is taken; channel and
//! feed titles are ignored.

use quick_xml::events::Event;

use crate::error::{Error, Result};

/// Parse up to `limit` entry titles from `xml`, in document order.
///
/// Titles are trimmed; empty ones are skipped. Entity references and CDATA
/// sections are decoded.
pub fn parse_titles(xml: &[u8], limit: usize) -> Result<Vec<String>> {
  let mut titles = Vec::new();
  if limit == 0 {
    return Ok(titles);
  }

  let mut reader = quick_xml::Reader::from_reader(xml);
  reader.config_mut().trim_text(true);

  let mut in_entry = false;
  let mut title_taken = false;
  let mut in_title = false;
  let mut current = String::new();
  let mut buf = Vec::new();

  loop {
    match reader.read_event_into(&mut buf) {
      Ok(Event::Start(ref e)) => {
        let name = e.name();
        match local_name(name.as_ref()) {
          b"item" | b"entry" => {
            in_entry = true;
            title_taken = false;
          }
          b"title" if in_entry && !title_taken => {
            in_title = true;
            current.clear();
          }
          _ => {}
        }
      }
      Ok(Event::Text(ref e)) if in_title => {
        let text = e.unescape().map_err(|e| Error::Xml(e.to_string()))?;
        current.push_str(&text);
      }
      Ok(Event::CData(ref e)) if in_title => {
        current.push_str(&String::from_utf8_lossy(e));
      }
      Ok(Event::End(ref e)) => {
        let name = e.name();
        match local_name(name.as_ref()) {
          b"title" if in_title => {
            in_title = false;
            title_taken = true;
            let title = current.trim();
            if !title.is_empty() {
              titles.push(title.to_string());
              if titles.len() == limit {
                break;
              }
            }
          }
          b"item" | b"entry" => in_entry = false,
          _ => {}
        }
      }
      Ok(Event::Eof) => break,
      Err(e) => return Err(Error::Xml(e.to_string())),
      _ => {}
    }
    buf.clear();
  }

  Ok(titles)
}

fn local_name(name: &[u8]) -> &[u8] {
  // strip "prefix:" if present
  match name.iter().rposition(|&b| b == b':') {
    Some(pos) => &name[pos + 1..],
    None => name,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rss_items_in_order_and_capped() {
    let xml = br#"<rss><channel><title>Trends</title>
      <item><title>one</title></item>
      <item><title>two</title></item>
      <item><title>three</title></item>
    </channel></rss>"#;
    assert_eq!(parse_titles(xml, 2).unwrap(), ["one", "two"]);
    assert_eq!(parse_titles(xml, 5).unwrap(), ["one", "two", "three"]);
  }

  #[test]
  fn channel_title_is_ignored() {
    let xml = br#"<rss><channel><title>Daily Search Trends</title></channel></rss>"#;
    assert!(parse_titles(xml, 5).unwrap().is_empty());
  }

  #[test]
  fn atom_entries() {
    let xml = br#"<feed xmlns="http://www.w3.org/2005/Atom"><title>f</title>
      <entry><title type="text">alpha</title><source><title>src</title></source></entry>
      <entry><title>beta</title></entry>
    </feed>"#;
    assert_eq!(parse_titles(xml, 5).unwrap(), ["alpha", "beta"]);
  }

  #[test]
  fn prefixed_news_items_do_not_count() {
    let xml = r#"<rss xmlns:ht="https://trends.google.com/trending/rss"><channel>
      <item><title>猫動画</title>
        <ht:news_item><ht:news_item_title>headline</ht:news_item_title></ht:news_item>
      </item>
    </channel></rss>"#;
    assert_eq!(parse_titles(xml.as_bytes(), 5).unwrap(), ["猫動画"]);
  }

  #[test]
  fn entities_and_cdata_are_decoded() {
    let xml = br#"<rss><channel>
      <item><title>Tom &amp; Jerry</title></item>
      <item><title><![CDATA[<b>bold</b>]]></title></item>
      <item><title>   </title></item>
    </channel></rss>"#;
    assert_eq!(parse_titles(xml, 5).unwrap(), ["Tom & Jerry", "<b>bold</b>"]);
  }

  #[test]
  fn mismatched_tags_are_an_error() {
    let xml = br#"<rss><channel><item><title>x</item></channel></rss>"#;
    assert!(matches!(parse_titles(xml, 5), Err(Error::Xml(_))));
  }

  #[test]
  fn zero_limit_reads_nothing() {
    assert!(parse_titles(b"not even xml <", 0).unwrap().is_empty());
  }
}
