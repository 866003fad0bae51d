//! Catalog fetch-and-resolve E2E tests

mod helper;

use mockito::Server;

use chromedriver_fetch::catalog::resolver::{VersionFilter, resolve};
use chromedriver_fetch::catalog::types::{Arch, Platform, Source};
use chromedriver_fetch::remote::{
    CatalogSource, LegacyCatalogSource, ModernCatalogSource, fetch_combined,
};
use helper::{legacy_listing, modern_index};

#[tokio::test]
async fn combined_catalog_resolves_across_both_sources() {
    let mut server = Server::new_async().await;

    let modern_body = modern_index(&[
        (
            "115.0.5790.102",
            &[
                ("win64", "https://storage.example/115/win64.zip"),
                ("linux64", "https://storage.example/115/linux64.zip"),
            ],
        ),
        (
            "116.0.5845.96",
            &[("win64", "https://storage.example/116/win64.zip")],
        ),
    ]);
    let legacy_body = legacy_listing(&[
        "85.0.4183.87/chromedriver_win32.zip",
        "114.0.5735.90/chromedriver_win64.zip",
        "114.0.5735.90/notes.txt",
        "LATEST_RELEASE",
    ]);

    let modern_mock = server
        .mock("GET", "/known-good-versions-with-downloads.json")
        .with_status(200)
        .with_body(&modern_body)
        .create_async()
        .await;
    let legacy_mock = server
        .mock("GET", "/?prefix=")
        .with_status(200)
        .with_body(&legacy_body)
        .create_async()
        .await;

    let modern = ModernCatalogSource::new(&server.url());
    let legacy = LegacyCatalogSource::new(&server.url());
    let combined = fetch_combined(&modern, Some(&legacy as &dyn CatalogSource)).await;

    modern_mock.assert_async().await;
    legacy_mock.assert_async().await;
    assert!(combined.failures.is_empty());

    let records = resolve(
        combined.modern,
        combined.legacy,
        &VersionFilter {
            platform: Some(Platform::Windows),
            arch: Some(Arch::X64),
            ..VersionFilter::default()
        },
    );

    let versions: Vec<(&str, Source)> = records
        .iter()
        .map(|r| (r.version.as_str(), r.source))
        .collect();
    assert_eq!(
        versions,
        vec![
            ("114.0.5735.90", Source::Legacy),
            ("115.0.5790.102", Source::Modern),
            ("116.0.5845.96", Source::Modern),
        ]
    );
}

#[tokio::test]
async fn overlapping_versions_keep_the_modern_record() {
    let mut server = Server::new_async().await;

    let modern_body = modern_index(&[(
        "115.0.5790.102",
        &[("win64", "https://storage.example/modern/115.zip")],
    )]);
    let legacy_body = legacy_listing(&["115.0.5790.102/chromedriver_win64.zip"]);

    server
        .mock("GET", "/known-good-versions-with-downloads.json")
        .with_status(200)
        .with_body(&modern_body)
        .create_async()
        .await;
    server
        .mock("GET", "/?prefix=")
        .with_status(200)
        .with_body(&legacy_body)
        .create_async()
        .await;

    let modern = ModernCatalogSource::new(&server.url());
    let legacy = LegacyCatalogSource::new(&server.url());
    let combined = fetch_combined(&modern, Some(&legacy as &dyn CatalogSource)).await;

    let records = resolve(combined.modern, combined.legacy, &VersionFilter::default());

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].source, Source::Modern);
    assert_eq!(
        records[0].download_url,
        "https://storage.example/modern/115.zip"
    );
}

#[tokio::test]
async fn broken_modern_catalog_still_resolves_legacy_records() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/known-good-versions-with-downloads.json")
        .with_status(200)
        .with_body("[]") // valid JSON, wrong top-level shape
        .create_async()
        .await;
    server
        .mock("GET", "/?prefix=")
        .with_status(200)
        .with_body(legacy_listing(&["85.0.4183.87/chromedriver_win32.zip"]))
        .create_async()
        .await;

    let modern = ModernCatalogSource::new(&server.url());
    let legacy = LegacyCatalogSource::new(&server.url());
    let combined = fetch_combined(&modern, Some(&legacy as &dyn CatalogSource)).await;

    assert_eq!(combined.failures.len(), 1);
    assert_eq!(combined.failures[0].0, Source::Modern);

    let records = resolve(combined.modern, combined.legacy, &VersionFilter::default());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].version.as_str(), "85.0.4183.87");
    assert_eq!(records[0].source, Source::Legacy);
}
