use crate::catalog::domain::CatalogService;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::core::domain::Configuration;
use crate::core::repository::LibraryStore;

pub fn create_catalog_service<'a>(config: &Configuration, store: &'a mut LibraryStore) -> Box<dyn CatalogService + 'a> {
    Box::new(CatalogServiceImpl::new(config, store))
}
