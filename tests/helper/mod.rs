//! Fixture builders shared by the e2e tests

use std::io::Write;

/// Builds a Chrome-for-Testing index document.
///
/// Each entry is `(version, &[(platform_key, url)])`.
pub fn modern_index(entries: &[(&str, &[(&str, &str)])]) -> String {
    let versions: Vec<serde_json::Value> = entries
        .iter()
        .map(|(version, downloads)| {
            let chromedriver: Vec<serde_json::Value> = downloads
                .iter()
                .map(|(platform, url)| {
                    serde_json::json!({"platform": platform, "url": url})
                })
                .collect();
            serde_json::json!({
                "version": version,
                "revision": "1148114",
                "downloads": {"chromedriver": chromedriver}
            })
        })
        .collect();

    serde_json::json!({
        "timestamp": "2023-07-28T10:09:11.565Z",
        "versions": versions
    })
    .to_string()
}

/// Builds a legacy `ListBucketResult` document from object keys.
pub fn legacy_listing(keys: &[&str]) -> String {
    let contents: String = keys
        .iter()
        .map(|key| format!("<Contents><Key>{key}</Key></Contents>"))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ListBucketResult xmlns="http://doc.s3.amazonaws.com/2006-03-01">{contents}</ListBucketResult>"#
    )
}

/// Builds an in-memory zip archive from `(name, data)` entries.
pub fn zip_archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut writer = zip::ZipWriter::new(&mut cursor);
        let options = zip::write::SimpleFileOptions::default();
        for (name, data) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap();
    }
    cursor.into_inner()
}
