use crate::catalog::Catalog;
use iced::widget::image;
use std::collections::HashMap;

pub struct CatalogState {
    pub(in crate::app) loading: bool,
    pub(in crate::app) error: Option<String>,
    pub(in crate::app) catalog: Catalog,
    pub(in crate::app) thumbnails: HashMap<String, image::Handle>,
}

impl CatalogState {
    pub(in crate::app) fn new(per_page: usize) -> Self {
        Self {
            loading: true,
            error: None,
            catalog: Catalog::new(Vec::new(), per_page),
            thumbnails: HashMap::new(),
        }
    }
}
