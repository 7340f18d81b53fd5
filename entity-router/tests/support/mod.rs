use std::sync::Arc;

use entity_router::entities::{EntityReadDriver, SourceQueryDriver};
use entity_router::{Router, SourceEntity};
use router_test_utils::MemorySourceDriver;

/// Router with one in-memory source driver bound for the whole source family.
pub(crate) fn single_source_router(
    router_id: &str,
    driver_id: &str,
    sources: Vec<SourceEntity>,
) -> (Router, Arc<MemorySourceDriver>) {
    let driver = Arc::new(MemorySourceDriver::with_sources(driver_id, sources));
    let router = Router::builder(router_id)
        .bind::<dyn EntityReadDriver<SourceEntity>, _>(
            driver_id,
            ["Sources.*"],
            driver.clone(),
        )
        .bind::<dyn SourceQueryDriver, _>(driver_id, ["Sources.*"], driver.clone())
        .build();
    (router, driver)
}
