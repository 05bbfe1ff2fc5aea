//! Live smoke test against the real catalog API.
//!
//! Hits the network, so it is ignored by default. Run with:
//! ```sh
//! cargo test -- --ignored --nocapture
//! ```

use ptcg_etl::client::{CatalogClient, CatalogSource};
use ptcg_etl::config::{ResourceKind, API_BASE, API_KEY_ENV, DEFAULT_TIMEOUT};
use ptcg_etl::transform::transform;

#[test]
#[ignore]
fn live_catalog_fetch_and_transform() {
    let api_key = std::env::var(API_KEY_ENV).ok();
    let client = CatalogClient::new(API_BASE, api_key, DEFAULT_TIMEOUT).unwrap();

    for kind in ResourceKind::ALL {
        let names = client.list_all(kind).unwrap();
        assert!(!names.is_empty(), "{} came back empty", kind.endpoint());
        assert!(names.iter().all(|v| v.is_string()));
    }

    let page = client.list_cards_page(1, 5).unwrap();
    assert_eq!(page.len(), 5);
    for record in &page {
        let doc = transform(record).unwrap();
        assert!(!doc.id.is_empty());
        assert!(!doc.name.is_empty());
    }
}
